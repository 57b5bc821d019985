// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::table::TruthTable;
use itertools::Itertools;
use std::{borrow::Cow, fmt};

/// Renders a truth table: a header naming the variables and the output
/// column, a dashed rule, then one `0`/`1` line per assignment.
#[derive(Clone, Debug)]
pub struct TruthTableDisplay<'a> {
    table: &'a TruthTable,
    internal_separator: Cow<'a, str>,
    input_output_separator: Cow<'a, str>,
    output_label: Cow<'a, str>,
}

impl<'a> TruthTableDisplay<'a> {
    pub fn new(table: &'a TruthTable) -> Self {
        Self {
            table,
            internal_separator: Cow::Borrowed(" "),
            input_output_separator: Cow::Borrowed(" | "),
            output_label: Cow::Borrowed("f"),
        }
    }

    pub fn with_internal_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.internal_separator = separator.into();
        self
    }

    pub fn with_input_output_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.input_output_separator = separator.into();
        self
    }

    pub fn with_output_label(mut self, label: impl Into<Cow<'a, str>>) -> Self {
        self.output_label = label.into();
        self
    }
}

impl fmt::Display for TruthTableDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header = format!(
            "{}{}{}",
            self.table
                .variables()
                .iter()
                .join(&*self.internal_separator),
            self.input_output_separator,
            self.output_label,
        );
        writeln!(f, "{}", header)?;
        writeln!(f, "{}", "-".repeat(header.len()))?;

        let row_count = self.table.row_count();
        for (index, row) in self.table.rows().iter().enumerate() {
            let inputs = row
                .inputs
                .iter()
                .map(|&value| if value { "1" } else { "0" })
                .join(&*self.internal_separator);
            write!(
                f,
                "{}{}{}",
                inputs,
                self.input_output_separator,
                if row.result { "1" } else { "0" },
            )?;
            if index < row_count - 1 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
