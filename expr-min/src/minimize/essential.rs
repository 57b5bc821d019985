// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::implicant::Implicant;
use log::debug;
use std::collections::BTreeSet;

/// Selects a cover of the target set from the prime implicants.
///
/// A prime covering the whole set wins outright. Otherwise every index
/// covered by exactly one prime makes that prime essential, and the rest
/// of the set is covered greedily by maximum new coverage. Greedy ties are
/// broken by the lexicographically smallest pattern (`-` < `0` < `1`), a
/// stable policy rather than incidental iteration order; a pass where no
/// candidate gains coverage ends the selection.
pub fn select_cover(primes: &[Implicant], targets: &BTreeSet<usize>) -> Vec<Implicant> {
    if targets.is_empty() {
        return Vec::new();
    }

    if let Some(full) = primes.iter().find(|prime| prime.covers() == targets) {
        return vec![full.clone()];
    }

    let mut selected: Vec<Implicant> = Vec::new();
    let mut remaining: BTreeSet<usize> = targets.clone();

    for index in targets {
        let mut coverers = primes.iter().filter(|prime| prime.covers().contains(index));
        if let (Some(only), None) = (coverers.next(), coverers.next()) {
            if !selected.contains(only) {
                debug!("index {} marks {} essential", index, only.pattern());
                remaining = remaining.difference(only.covers()).copied().collect();
                selected.push(only.clone());
            }
        }
    }

    while !remaining.is_empty() {
        let mut best: Option<&Implicant> = None;
        let mut best_gain = 0_usize;
        for prime in primes {
            if selected.contains(prime) {
                continue;
            }
            let gain = prime.covers().intersection(&remaining).count();
            let wins = gain > best_gain
                || (gain == best_gain
                    && gain > 0
                    && best.map_or(false, |current| prime < current));
            if wins {
                best = Some(prime);
                best_gain = gain;
            }
        }
        match best {
            Some(prime) if best_gain > 0 => {
                debug!("greedy pick {} gains {}", prime.pattern(), best_gain);
                remaining = remaining.difference(prime.covers()).copied().collect();
                selected.push(prime.clone());
            }
            _ => break,
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implicant(numeric: &[u8], covers: &[usize]) -> Implicant {
        Implicant::from_numeric(numeric, covers.iter().copied()).unwrap()
    }

    fn patterns(cover: &[Implicant]) -> Vec<String> {
        cover
            .iter()
            .map(|implicant| implicant.pattern().to_string())
            .collect()
    }

    #[test]
    fn test_full_cover_shortcut() {
        let full = implicant(&[2, 2, 1], &[1, 3, 5, 7]);
        let partial = implicant(&[0, 2, 1], &[1, 3]);
        let targets: BTreeSet<usize> = [1, 3, 5, 7].into_iter().collect();
        let cover = select_cover(&[partial, full.clone()], &targets);
        assert_eq!(cover, vec![full]);
    }

    #[test]
    fn test_unique_coverers_become_essential() {
        let primes = vec![
            implicant(&[0, 2, 2], &[0, 1, 2, 3]),
            implicant(&[2, 0, 2], &[0, 1, 4, 5]),
            implicant(&[2, 2, 0], &[0, 2, 4, 6]),
        ];
        let targets: BTreeSet<usize> = (0..=6).collect();
        let cover = select_cover(&primes, &targets);
        // Index 3 forces the first, 5 the second, 6 the third.
        assert_eq!(patterns(&cover), vec!["0--", "-0-", "--0"]);
    }

    #[test]
    fn test_greedy_tie_break_prefers_smallest_pattern() {
        // Every target is covered twice, so nothing is essential and the
        // greedy pass decides; all four gains start equal at 2.
        let primes = vec![
            implicant(&[0, 1, 2], &[2, 3]),
            implicant(&[0, 0, 2], &[0, 1]),
            implicant(&[0, 2, 1], &[1, 3]),
            implicant(&[0, 2, 0], &[0, 2]),
        ];
        let targets: BTreeSet<usize> = [0, 1, 2, 3].into_iter().collect();
        let cover = select_cover(&primes, &targets);
        assert_eq!(patterns(&cover), vec!["0-0", "0-1"]);
    }

    #[test]
    fn test_zero_gain_terminates() {
        // Nothing covers index 3; selection stops after the useful pick.
        let primes = vec![implicant(&[0, 0], &[0]), implicant(&[0, 1], &[1])];
        let targets: BTreeSet<usize> = [0, 1, 3].into_iter().collect();
        let cover = select_cover(&primes, &targets);
        assert_eq!(patterns(&cover), vec!["00", "01"]);
    }

    #[test]
    fn test_empty_targets() {
        let primes = vec![implicant(&[0, 0], &[0])];
        assert!(select_cover(&primes, &BTreeSet::new()).is_empty());
        assert!(select_cover(&[], &BTreeSet::new()).is_empty());
    }
}
