// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod essential;
mod karnaugh;
mod reduce;

pub use essential::*;
pub use karnaugh::*;
pub use reduce::*;

use crate::implicant::{Implicant, NormalForm};
use itertools::Itertools;
use std::collections::BTreeSet;

/// Step log of one minimization: each stage is a list of display lines.
pub type StepLog = Vec<Vec<String>>;

/// Result of a minimization: the formatted expression plus the step log
/// explaining how it was reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minimized {
    pub expression: String,
    pub steps: StepLog,
}

impl Minimized {
    fn degenerate(form: NormalForm, steps: StepLog) -> Self {
        Self {
            expression: form.empty_marker().to_string(),
            steps,
        }
    }
}

/// Algebraic pairwise-merge minimization: implicant extraction followed by
/// essential/greedy cover selection. The step log holds the merge lines of
/// every extraction round.
pub fn minimize(targets: &[usize], variables: &[char], form: NormalForm) -> Minimized {
    if targets.is_empty() {
        return Minimized::degenerate(form, Vec::new());
    }

    let reduction = extract_implicants(targets, variables.len());
    let target_set: BTreeSet<usize> = targets.iter().copied().collect();
    let cover = select_cover(&reduction.primes, &target_set);

    Minimized {
        expression: render_cover(&cover, variables, form),
        steps: reduction.rounds,
    }
}

/// Tabular Quine-McCluskey minimization: the same algorithm as
/// [`minimize`], with the prime coverage table and the chosen essential
/// implicants logged as additional stages.
pub fn minimize_qmc(targets: &[usize], variables: &[char], form: NormalForm) -> Minimized {
    if targets.is_empty() {
        return Minimized::degenerate(form, Vec::new());
    }

    let reduction = extract_implicants(targets, variables.len());
    let target_set: BTreeSet<usize> = targets.iter().copied().collect();
    let cover = select_cover(&reduction.primes, &target_set);

    let mut steps = reduction.rounds;
    steps.push(coverage_table(&reduction.primes, &target_set));
    steps.push(essential_listing(&cover, variables, form));

    Minimized {
        expression: render_cover(&cover, variables, form),
        steps,
    }
}

/// Karnaugh-map minimization: Gray-coded grid, geometric group discovery,
/// then the same cover selection as the algebraic variant. The step log
/// holds the rendered grid and the discovered groups.
pub fn minimize_karnaugh(targets: &[usize], variables: &[char], form: NormalForm) -> Minimized {
    let map = KarnaughMap::build(targets, variables.len());
    let mut steps: StepLog = vec![vec!["Karnaugh map:".to_string()], map.grid_lines()];

    if targets.is_empty() {
        steps.push(vec!["No groups found".to_string()]);
        return Minimized::degenerate(form, steps);
    }

    let groups = map.find_groups();
    steps.push(map.group_lines(&groups));

    let implicants: Vec<Implicant> = groups
        .iter()
        .map(|group| map.group_implicant(group))
        .collect();
    let target_set: BTreeSet<usize> = targets.iter().copied().collect();
    let cover = select_cover(&implicants, &target_set);

    Minimized {
        expression: render_cover(&cover, variables, form),
        steps,
    }
}

/// Joins the cover's clauses into the final expression. A lone
/// all-wildcard implicant is the universal constant; multi-literal
/// clauses are parenthesized; single literals are not.
fn render_cover(cover: &[Implicant], variables: &[char], form: NormalForm) -> String {
    if cover.is_empty() {
        return form.empty_marker().to_string();
    }
    if let [only] = cover {
        if only.is_universal() {
            return form.universal_constant().to_string();
        }
    }
    cover
        .iter()
        .map(|implicant| {
            let clause = implicant.clause(variables, form);
            if implicant.literal_count() > 1 {
                format!("({})", clause)
            } else {
                clause
            }
        })
        .join(form.clause_separator())
}

/// The primes-by-indices coverage table: one column per target index, a
/// `-` mark where the prime covers it.
fn coverage_table(primes: &[Implicant], targets: &BTreeSet<usize>) -> Vec<String> {
    let mut lines = vec!["Coverage table:".to_string()];
    let header = format!("Imp {}", targets.iter().join(" "));
    lines.push(header.clone());
    lines.push("-".repeat(header.len()));
    for (ix, prime) in primes.iter().enumerate() {
        let marks = targets
            .iter()
            .map(|index| {
                if prime.covers().contains(index) {
                    "-"
                } else {
                    " "
                }
            })
            .join(" ");
        lines.push(format!("Imp {} {}", ix, marks));
    }
    lines
}

fn essential_listing(cover: &[Implicant], variables: &[char], form: NormalForm) -> Vec<String> {
    let title = match form {
        NormalForm::Dnf => "Essential implicants:",
        NormalForm::Cnf => "Essential implicates:",
    };
    let mut lines = vec![title.to_string()];
    for implicant in cover {
        lines.push(format!(
            "{} covers [{}] ({})",
            implicant.pattern(),
            implicant.covers().iter().join(", "),
            implicant.clause(variables, form),
        ));
    }
    lines
}
