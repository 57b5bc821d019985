// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::implicant::Implicant;
use itertools::Itertools;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of implicant extraction: the prime implicants and the merge
/// lines of every round.
#[derive(Clone, Debug)]
pub struct Reduction {
    pub primes: Vec<Implicant>,
    pub rounds: Vec<Vec<String>>,
}

/// Runs pairwise-merge rounds over popcount-adjacent implicant groups
/// until no merge succeeds.
///
/// Each round tries every pair drawn from adjacent groups of the sorted
/// weight list; a successful merge is logged and deduplicated by resulting
/// pattern within its new group, and the consumed indices go into the
/// round's `used` set. Implicants whose coverage is not a subset of `used`
/// after the round become prime. Termination: the merged patterns of each
/// round carry strictly more wildcards, and the pattern space is finite.
pub fn extract_implicants(targets: &[usize], width: usize) -> Reduction {
    let mut groups: BTreeMap<usize, Vec<Implicant>> = BTreeMap::new();
    for &index in targets {
        let seed = Implicant::minterm(index, width);
        groups.entry(seed.weight()).or_default().push(seed);
    }

    let mut primes: Vec<Implicant> = Vec::new();
    let mut rounds: Vec<Vec<String>> = Vec::new();

    loop {
        let mut merged: BTreeMap<usize, Vec<Implicant>> = BTreeMap::new();
        let mut lines: Vec<String> = Vec::new();
        // Indices consumed by a merge this round. Kept as a round-local
        // value so each round is checkable in isolation.
        let mut used: BTreeSet<usize> = BTreeSet::new();

        let weights: Vec<usize> = groups.keys().copied().collect();
        for (&lo, &hi) in weights.iter().tuple_windows() {
            for a in &groups[&lo] {
                for b in &groups[&hi] {
                    if let Some(result) = a.try_merge(b) {
                        let entry = merged.entry(result.weight()).or_default();
                        if entry.iter().any(|existing: &Implicant| {
                            existing.bits() == result.bits()
                        }) {
                            continue;
                        }
                        used.extend(a.covers().iter().copied());
                        used.extend(b.covers().iter().copied());
                        lines.push(format!(
                            "{} + {} => {} :: {{{}}}",
                            a.pattern(),
                            b.pattern(),
                            result.pattern(),
                            result.covers().iter().join(", "),
                        ));
                        entry.push(result);
                    }
                }
            }
        }

        for implicant in groups.values().flatten() {
            if !implicant.covers().is_subset(&used) && !primes.contains(implicant) {
                primes.push(implicant.clone());
            }
        }

        if lines.is_empty() {
            break;
        }

        debug!(
            "merge round {}: {} merges into {} weight groups",
            rounds.len() + 1,
            lines.len(),
            merged.len(),
        );
        rounds.push(lines);
        groups = merged;
    }

    Reduction { primes, rounds }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn patterns(primes: &[Implicant]) -> Vec<String> {
        let mut rendered: Vec<String> = primes
            .iter()
            .map(|prime| prime.pattern().to_string())
            .collect();
        rendered.sort();
        rendered
    }

    #[test]
    fn test_extract_zero_to_six() {
        let reduction = extract_implicants(&[0, 1, 2, 3, 4, 5, 6], 3);
        assert_eq!(patterns(&reduction.primes), vec!["--0", "-0-", "0--"]);
        assert!(!reduction.rounds.is_empty());

        let by_pattern = |wanted: &str| {
            reduction
                .primes
                .iter()
                .find(|prime| prime.pattern().to_string() == wanted)
                .unwrap()
                .covers()
                .iter()
                .copied()
                .collect::<Vec<_>>()
        };
        assert_eq!(by_pattern("--0"), vec![0, 2, 4, 6]);
        assert_eq!(by_pattern("-0-"), vec![0, 1, 4, 5]);
        assert_eq!(by_pattern("0--"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_extract_empty() {
        let reduction = extract_implicants(&[], 3);
        assert!(reduction.primes.is_empty());
        assert!(reduction.rounds.is_empty());
    }

    #[test]
    fn test_extract_single_minterm() {
        let reduction = extract_implicants(&[5], 3);
        assert_eq!(patterns(&reduction.primes), vec!["101"]);
        assert!(reduction.rounds.is_empty());
    }

    #[test]
    fn test_merge_log_lines() {
        let reduction = extract_implicants(&[0, 1], 2);
        assert_eq!(reduction.rounds.len(), 1);
        assert_eq!(reduction.rounds[0], vec!["00 + 01 => 0- :: {0, 1}"]);
        assert_eq!(patterns(&reduction.primes), vec!["0-"]);
    }

    #[test]
    fn test_unmergeable_seeds_are_prime() {
        // 0 and 3 differ in two positions; neither merges.
        let reduction = extract_implicants(&[0, 3], 2);
        assert_eq!(patterns(&reduction.primes), vec!["00", "11"]);
        assert!(reduction.rounds.is_empty());
    }

    #[test]
    fn test_full_set_collapses_to_universe() {
        let reduction = extract_implicants(&[0, 1, 2, 3], 2);
        assert_eq!(patterns(&reduction.primes), vec!["--"]);
        assert_eq!(reduction.rounds.len(), 2);
        let universe = &reduction.primes[0];
        assert_eq!(
            universe.covers().iter().copied().collect::<Vec<_>>(),
            vec![0, 1, 2, 3],
        );
    }
}
