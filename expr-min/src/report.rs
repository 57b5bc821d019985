// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::ExprError,
    implicant::NormalForm,
    minimize::{minimize, minimize_karnaugh, minimize_qmc, Minimized, StepLog},
    postfix::to_postfix,
    table::TruthTable,
    token::parse,
};
use itertools::Itertools;

/// Builds the complete textual report for one expression: truth table,
/// normal forms, numeric forms, and all three minimization strategies
/// with their step logs. Input errors short-circuit before any table
/// work.
pub fn full_report(text: &str) -> Result<String, ExprError> {
    let parsed = parse(text)?;
    let postfix = to_postfix(&parsed.tokens);
    let table = TruthTable::build(&parsed.variables, &postfix)?;
    let variables = &parsed.variables;

    let mut out = String::new();
    out.push_str("Truth table:\n");
    out.push_str(&table.display().to_string());
    out.push('\n');

    out.push_str(&format!("\nDNF: {}\n", table.dnf()));
    out.push_str(&format!("CNF: {}\n", table.cnf()));
    out.push_str(&format!(
        "DNF indices: {}\n",
        render_indices(table.minterms())
    ));
    out.push_str(&format!(
        "CNF indices: {}\n",
        render_indices(table.maxterms())
    ));
    out.push_str(&format!(
        "Index: {} (binary) = {} (decimal)\n",
        table.index_bit_string(),
        table.index_value(),
    ));

    push_section(
        &mut out,
        "Minimization (algebraic):",
        minimize(table.minterms(), variables, NormalForm::Dnf),
        minimize(table.maxterms(), variables, NormalForm::Cnf),
    );
    push_section(
        &mut out,
        "Minimization (Quine-McCluskey):",
        minimize_qmc(table.minterms(), variables, NormalForm::Dnf),
        minimize_qmc(table.maxterms(), variables, NormalForm::Cnf),
    );
    push_section(
        &mut out,
        "Minimization (Karnaugh):",
        minimize_karnaugh(table.minterms(), variables, NormalForm::Dnf),
        minimize_karnaugh(table.maxterms(), variables, NormalForm::Cnf),
    );

    Ok(out)
}

fn render_indices(indices: &[usize]) -> String {
    if indices.is_empty() {
        "none".to_string()
    } else {
        indices.iter().join(", ")
    }
}

fn push_section(out: &mut String, title: &str, dnf: Minimized, cnf: Minimized) {
    out.push_str(&format!("\n{}\n", title));
    out.push_str(&format!("Minimized DNF: {}\n", dnf.expression));
    push_steps(out, &dnf.steps);
    out.push_str(&format!("Minimized CNF: {}\n", cnf.expression));
    push_steps(out, &cnf.steps);
}

fn push_steps(out: &mut String, steps: &StepLog) {
    for (ix, stage) in steps.iter().enumerate() {
        out.push_str(&format!("  Stage {}:\n", ix + 1));
        for line in stage {
            out.push_str(&format!("    {}\n", line));
        }
    }
}
