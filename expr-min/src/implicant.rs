// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::InvalidImplicantNumeric, token::MAX_VARS};
use arrayvec::ArrayVec;
use itertools::Itertools;
use std::{cmp::Ordering, collections::BTreeSet, fmt};

/// Whether an expression is assembled as a disjunction of conjunctions
/// (DNF over minterms) or a conjunction of disjunctions (CNF over
/// maxterms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalForm {
    Dnf,
    Cnf,
}

impl NormalForm {
    /// Marker produced for an empty target set.
    pub fn empty_marker(self) -> &'static str {
        match self {
            Self::Dnf => "Contradiction",
            Self::Cnf => "Tautology",
        }
    }

    /// The constant an all-wildcard implicant denotes.
    pub fn universal_constant(self) -> &'static str {
        match self {
            Self::Dnf => "1",
            Self::Cnf => "0",
        }
    }

    /// Separator between literals inside one clause.
    pub(crate) fn literal_separator(self) -> &'static str {
        match self {
            Self::Dnf => " & ",
            Self::Cnf => " | ",
        }
    }

    /// Separator between the clauses of the final expression.
    pub(crate) fn clause_separator(self) -> &'static str {
        match self {
            Self::Dnf => " | ",
            Self::Cnf => " & ",
        }
    }
}

/// A bit pattern over `{0, 1, -}` paired with the set of target indices it
/// covers. `None` positions are don't-cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Implicant {
    bits: ArrayVec<Option<bool>, MAX_VARS>,
    covers: BTreeSet<usize>,
}

impl Implicant {
    /// Seed implicant for a single target index: `width` fixed bits, most
    /// significant first, covering exactly that index.
    pub fn minterm(index: usize, width: usize) -> Self {
        assert!(
            width <= MAX_VARS,
            "width {} must be at most {}",
            width,
            MAX_VARS
        );
        let bits = (0..width)
            .map(|j| Some((index >> (width - 1 - j)) & 1 == 1))
            .collect();
        Self {
            bits,
            covers: std::iter::once(index).collect(),
        }
    }

    /// Builds an implicant from numeric positions: 0 and 1 are fixed bits,
    /// 2 is a don't-care.
    pub fn from_numeric(
        numeric: &[u8],
        covers: impl IntoIterator<Item = usize>,
    ) -> Result<Self, InvalidImplicantNumeric> {
        if numeric.len() > MAX_VARS {
            return Err(InvalidImplicantNumeric);
        }
        let mut bits = ArrayVec::new();
        for &value in numeric {
            match value {
                0 => bits.push(Some(false)),
                1 => bits.push(Some(true)),
                2 => bits.push(None),
                _ => return Err(InvalidImplicantNumeric),
            }
        }
        Ok(Self {
            bits,
            covers: covers.into_iter().collect(),
        })
    }

    pub(crate) fn from_bits(
        bits: ArrayVec<Option<bool>, MAX_VARS>,
        covers: BTreeSet<usize>,
    ) -> Self {
        Self { bits, covers }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn bits(&self) -> &[Option<bool>] {
        &self.bits
    }

    #[inline]
    pub fn covers(&self) -> &BTreeSet<usize> {
        &self.covers
    }

    /// Number of positions fixed to 1 -- the grouping key for merge
    /// rounds.
    pub fn weight(&self) -> usize {
        self.bits.iter().filter(|bit| **bit == Some(true)).count()
    }

    /// Number of fixed (non-wildcard) positions.
    pub fn literal_count(&self) -> usize {
        self.bits.iter().filter(|bit| bit.is_some()).count()
    }

    /// True when every position is a don't-care.
    pub fn is_universal(&self) -> bool {
        self.bits.iter().all(|bit| bit.is_none())
    }

    /// Attempts the pairwise merge: the patterns must be identical in all
    /// but exactly one position, where one holds 0 and the other 1. A
    /// wildcard never matches a fixed bit, so implicants with wildcards in
    /// different positions do not merge.
    pub fn try_merge(&self, other: &Self) -> Option<Self> {
        if self.width() != other.width() {
            return None;
        }
        let mut bits = ArrayVec::new();
        let mut diffs = 0;
        for (&a, &b) in self.bits.iter().zip(&other.bits) {
            match (a, b) {
                (Some(x), Some(y)) if x != y => {
                    diffs += 1;
                    if diffs > 1 {
                        return None;
                    }
                    bits.push(None);
                }
                (a, b) if a == b => bits.push(a),
                _ => return None,
            }
        }
        if diffs != 1 {
            return None;
        }
        let covers = self.covers.union(&other.covers).copied().collect();
        Some(Self { bits, covers })
    }

    #[inline]
    pub fn pattern(&self) -> PatternDisplay<'_> {
        PatternDisplay { implicant: self }
    }

    /// Renders the fixed positions as literals. In DNF a 1 bit emits the
    /// plain variable and a 0 bit its negation; CNF inverts the polarity.
    /// An all-wildcard pattern renders as the universal constant.
    pub fn clause(&self, variables: &[char], form: NormalForm) -> String {
        if self.is_universal() {
            return form.universal_constant().to_string();
        }
        self.bits
            .iter()
            .zip(variables)
            .filter_map(|(&bit, &var)| {
                let value = bit?;
                let plain = match form {
                    NormalForm::Dnf => value,
                    NormalForm::Cnf => !value,
                };
                Some(if plain {
                    var.to_string()
                } else {
                    format!("!{}", var)
                })
            })
            .join(form.literal_separator())
    }
}

// Pattern rank used for ordering: `-` sorts before `0`, which sorts before
// `1`, matching the lexicographic order of the rendered pattern.
fn bit_rank(bit: Option<bool>) -> u8 {
    match bit {
        None => 0,
        Some(false) => 1,
        Some(true) => 2,
    }
}

impl Ord for Implicant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits
            .iter()
            .map(|&bit| bit_rank(bit))
            .cmp(other.bits.iter().map(|&bit| bit_rank(bit)))
            .then_with(|| self.covers.cmp(&other.covers))
    }
}

impl PartialOrd for Implicant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Displays the bit pattern as a string over `1`, `0` and `-`.
pub struct PatternDisplay<'a> {
    implicant: &'a Implicant,
}

impl fmt::Display for PatternDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &bit in &self.implicant.bits {
            let ch = match bit {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implicant(numeric: &[u8], covers: &[usize]) -> Implicant {
        Implicant::from_numeric(numeric, covers.iter().copied()).unwrap()
    }

    #[test]
    fn test_minterm() {
        let seed = Implicant::minterm(5, 3);
        assert_eq!(seed.pattern().to_string(), "101");
        assert_eq!(seed.weight(), 2);
        assert_eq!(seed.literal_count(), 3);
        assert_eq!(seed.covers().iter().copied().collect::<Vec<_>>(), vec![5]);

        assert_eq!(Implicant::minterm(0, 4).pattern().to_string(), "0000");
        assert_eq!(Implicant::minterm(7, 3).pattern().to_string(), "111");
    }

    #[test]
    fn test_from_numeric() {
        assert_eq!(implicant(&[1, 0, 2], &[4, 5]).pattern().to_string(), "10-");
        assert_eq!(
            Implicant::from_numeric(&[3], std::iter::empty()),
            Err(InvalidImplicantNumeric),
        );
        assert_eq!(
            Implicant::from_numeric(&[0; 6], std::iter::empty()),
            Err(InvalidImplicantNumeric),
        );
    }

    #[test]
    fn test_try_merge() {
        let a = implicant(&[1, 0, 1], &[5]);
        let b = implicant(&[1, 1, 1], &[7]);
        let merged = a.try_merge(&b).unwrap();
        assert_eq!(merged.pattern().to_string(), "1-1");
        assert_eq!(
            merged.covers().iter().copied().collect::<Vec<_>>(),
            vec![5, 7],
        );

        // Two differing positions never merge.
        let c = implicant(&[1, 1, 0], &[6]);
        assert_eq!(a.try_merge(&c), None);

        // Identical patterns never merge.
        assert_eq!(a.try_merge(&a.clone()), None);

        // A wildcard must line up with a wildcard.
        let d = implicant(&[1, 2, 1], &[5, 7]);
        assert_eq!(a.try_merge(&d), None);
        let e = implicant(&[2, 1, 1], &[3, 7]);
        assert_eq!(d.try_merge(&e), None);
    }

    #[test]
    fn test_universal() {
        let universe = implicant(&[2, 2, 2], &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert!(universe.is_universal());
        assert_eq!(universe.literal_count(), 0);
        assert!(!implicant(&[2, 0, 2], &[0]).is_universal());
    }

    #[test]
    fn test_clause_dnf() {
        let variables = ['a', 'b', 'c'];
        assert_eq!(
            implicant(&[2, 2, 1], &[]).clause(&variables, NormalForm::Dnf),
            "c",
        );
        assert_eq!(
            implicant(&[0, 2, 2], &[]).clause(&variables, NormalForm::Dnf),
            "!a",
        );
        assert_eq!(
            implicant(&[1, 2, 1], &[]).clause(&variables, NormalForm::Dnf),
            "a & c",
        );
        assert_eq!(
            implicant(&[2, 2, 2], &[]).clause(&variables, NormalForm::Dnf),
            "1",
        );
    }

    #[test]
    fn test_clause_cnf() {
        let variables = ['a', 'b', 'c'];
        // CNF literal polarity is inverted: 0 emits the plain variable.
        assert_eq!(
            implicant(&[1, 0, 2], &[]).clause(&variables, NormalForm::Cnf),
            "!a | b",
        );
        assert_eq!(
            implicant(&[2, 2, 2], &[]).clause(&variables, NormalForm::Cnf),
            "0",
        );
    }

    #[test]
    fn test_pattern_order() {
        // `-` < `0` < `1`, position by position.
        let dash = implicant(&[2, 2, 1], &[]);
        let zero = implicant(&[0, 2, 1], &[]);
        let one = implicant(&[1, 2, 1], &[]);
        assert!(dash < zero);
        assert!(zero < one);

        let mut sorted = vec![one.clone(), dash.clone(), zero.clone()];
        sorted.sort();
        assert_eq!(sorted, vec![dash, zero, one]);
    }
}
