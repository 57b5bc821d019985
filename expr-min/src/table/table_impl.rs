// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::EvalError,
    implicant::NormalForm,
    postfix::{evaluate, Assignment},
    table::{caches::TableCache, TruthTableDisplay},
    token::{Token, MAX_VARS},
};
use arrayvec::ArrayVec;
use bitvec::vec::BitVec;
use itertools::Itertools;

/// One row of a truth table: the ordered input tuple and the evaluation
/// result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub inputs: ArrayVec<bool, MAX_VARS>,
    pub result: bool,
}

/// The full truth table of an expression in canonical row order: row `i`
/// binds the variables to the bits of `i`, most significant bit first.
#[derive(Clone, Debug, Default)]
pub struct TruthTable {
    variables: Vec<char>,
    rows: Vec<Row>,
    cache: TableCache,
}

impl TruthTable {
    /// Builds all `2^n` rows, evaluating the postfix sequence once per
    /// row. An evaluation error aborts the build.
    pub fn build(variables: &[char], postfix: &[Token]) -> Result<Self, EvalError> {
        let row_count = 1_usize << variables.len();
        let mut rows = Vec::with_capacity(row_count);
        for index in 0..row_count {
            let assignment = Assignment::from_row_index(variables, index);
            let result = evaluate(postfix, &assignment)?;
            rows.push(Row {
                inputs: assignment.values().collect(),
                result,
            });
        }
        Ok(Self {
            variables: variables.to_vec(),
            rows,
            cache: TableCache::default(),
        })
    }

    #[inline]
    pub fn variables(&self) -> &[char] {
        &self.variables
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Canonical DNF: one parenthesized conjunction per true row, each
    /// variable negated when its row value is false.
    pub fn dnf(&self) -> String {
        let terms: Vec<String> = self
            .rows
            .iter()
            .filter(|row| row.result)
            .map(|row| format!("({})", self.row_literals(row, false)))
            .collect();
        if terms.is_empty() {
            NormalForm::Dnf.empty_marker().to_string()
        } else {
            terms.join(" | ")
        }
    }

    /// Canonical CNF: one parenthesized disjunction per false row, each
    /// variable negated when its row value is true.
    pub fn cnf(&self) -> String {
        let clauses: Vec<String> = self
            .rows
            .iter()
            .filter(|row| !row.result)
            .map(|row| format!("({})", self.row_literals(row, true)))
            .collect();
        if clauses.is_empty() {
            NormalForm::Cnf.empty_marker().to_string()
        } else {
            clauses.join(" & ")
        }
    }

    fn row_literals(&self, row: &Row, invert: bool) -> String {
        let separator = if invert { " | " } else { " & " };
        self.variables
            .iter()
            .zip(&row.inputs)
            .map(|(&var, &value)| {
                if value != invert {
                    var.to_string()
                } else {
                    format!("!{}", var)
                }
            })
            .join(separator)
    }

    /// Row indices where the expression is true.
    pub fn minterms(&self) -> &[usize] {
        &self.cache.get_or_init_index_data(&self.rows).minterms
    }

    /// Row indices where the expression is false.
    pub fn maxterms(&self) -> &[usize] {
        &self.cache.get_or_init_index_data(&self.rows).maxterms
    }

    /// The result column as bits, row 0 first.
    pub fn index_bits(&self) -> &BitVec {
        &self.cache.get_or_init_index_data(&self.rows).result_bits
    }

    /// The result column rendered as a `0`/`1` string.
    pub fn index_bit_string(&self) -> String {
        self.index_bits()
            .iter()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect()
    }

    /// The result column read as an unsigned integer, row 0 as the most
    /// significant bit.
    pub fn index_value(&self) -> u64 {
        self.cache.get_or_init_index_data(&self.rows).index_value
    }

    #[inline]
    pub fn display(&self) -> TruthTableDisplay<'_> {
        TruthTableDisplay::new(self)
    }
}
