// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{implicant::Implicant, token::MAX_VARS};
use arrayvec::ArrayVec;
use itertools::Itertools;
use log::debug;
use std::collections::BTreeSet;

/// Gray code of `i`: consecutive values differ in exactly one bit, so
/// neighboring grid rows and columns are single-bit adjacent.
#[inline]
fn gray(i: usize) -> usize {
    i ^ (i >> 1)
}

/// A grid position as (row, column).
pub type Cell = (usize, usize);

/// A Karnaugh grid for `width` variables: `2^(width/2)` rows by
/// `2^(width - width/2)` columns. A cell's address concatenates the row's
/// Gray-coded bits (high) with the column's (low), so geometric adjacency
/// implies single-bit difference in the address.
#[derive(Clone, Debug)]
pub struct KarnaughMap {
    width: usize,
    row_count: usize,
    col_count: usize,
    col_bits: usize,
    filled: Vec<Vec<bool>>,
}

impl KarnaughMap {
    pub fn build(targets: &[usize], width: usize) -> Self {
        assert!(
            width <= MAX_VARS,
            "width {} must be at most {}",
            width,
            MAX_VARS
        );
        let row_bits = width / 2;
        let col_bits = width - row_bits;
        let row_count = 1 << row_bits;
        let col_count = 1 << col_bits;
        let target_set: BTreeSet<usize> = targets.iter().copied().collect();

        let mut filled = vec![vec![false; col_count]; row_count];
        for (i, row) in filled.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let address = (gray(i) << col_bits) | gray(j);
                *cell = target_set.contains(&address);
            }
        }

        Self {
            width,
            row_count,
            col_count,
            col_bits,
            filled,
        }
    }

    /// The n-bit address of a cell.
    #[inline]
    pub fn address(&self, cell: Cell) -> usize {
        (gray(cell.0) << self.col_bits) | gray(cell.1)
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    #[inline]
    pub fn is_filled(&self, cell: Cell) -> bool {
        self.filled[cell.0][cell.1]
    }

    /// The grid rendered one line per row, `1` for filled cells.
    pub fn grid_lines(&self) -> Vec<String> {
        self.filled
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&cell| if cell { "1" } else { "0" })
                    .join(" ")
            })
            .collect()
    }

    /// Discovers rectangular groups of filled cells, largest first:
    /// four-cell groups (1x4 and 4x1 runs, 2x2 blocks), then two-cell
    /// runs, then singletons. Cells already claimed by a bigger group are
    /// skipped, so groups never overlap. The wraparound pairs along the
    /// grid edges (Gray-adjacent when an axis has exactly 4 entries) are
    /// checked before singletons so they are not swallowed cell by cell.
    pub fn find_groups(&self) -> Vec<BTreeSet<Cell>> {
        let mut groups: Vec<BTreeSet<Cell>> = Vec::new();
        let mut used: BTreeSet<Cell> = BTreeSet::new();

        for size in [4_usize, 2, 1] {
            for i in 0..self.row_count {
                for j in 0..self.col_count {
                    if j + size <= self.col_count {
                        let run: Vec<Cell> = (0..size).map(|k| (i, j + k)).collect();
                        self.claim(run, &mut groups, &mut used);
                    }
                    if size != 1 && i + size <= self.row_count {
                        let run: Vec<Cell> = (0..size).map(|k| (i + k, j)).collect();
                        self.claim(run, &mut groups, &mut used);
                    }
                    if size == 4 && i + 2 <= self.row_count && j + 2 <= self.col_count {
                        let block: Vec<Cell> = (0..2_usize)
                            .cartesian_product(0..2_usize)
                            .map(|(di, dj)| (i + di, j + dj))
                            .collect();
                        self.claim(block, &mut groups, &mut used);
                    }
                }
            }

            if size == 2 {
                if self.col_count == 4 {
                    for i in 0..self.row_count {
                        let pair = vec![(i, 0), (i, self.col_count - 1)];
                        self.claim(pair, &mut groups, &mut used);
                    }
                }
                if self.row_count == 4 {
                    for j in 0..self.col_count {
                        let pair = vec![(0, j), (self.row_count - 1, j)];
                        self.claim(pair, &mut groups, &mut used);
                    }
                }
            }
        }

        debug!("karnaugh: {} groups, {} cells claimed", groups.len(), used.len());
        groups
    }

    fn claim(
        &self,
        cells: Vec<Cell>,
        groups: &mut Vec<BTreeSet<Cell>>,
        used: &mut BTreeSet<Cell>,
    ) {
        let usable = cells
            .iter()
            .all(|&cell| self.is_filled(cell) && !used.contains(&cell));
        if usable {
            used.extend(cells.iter().copied());
            groups.push(cells.into_iter().collect());
        }
    }

    /// `Group k: rows r0-r1, columns c0-c1` lines for the step log.
    pub fn group_lines(&self, groups: &[BTreeSet<Cell>]) -> Vec<String> {
        let mut lines = vec!["Identified groups:".to_string()];
        for (ix, group) in groups.iter().enumerate() {
            let rows: BTreeSet<usize> = group.iter().map(|cell| cell.0).collect();
            let cols: BTreeSet<usize> = group.iter().map(|cell| cell.1).collect();
            let span = |axis: &BTreeSet<usize>| {
                let first = axis.iter().next().expect("groups are never empty");
                let last = axis.iter().next_back().expect("groups are never empty");
                format!("{}-{}", first, last)
            };
            lines.push(format!(
                "Group {}: rows {}, columns {}",
                ix + 1,
                span(&rows),
                span(&cols),
            ));
        }
        lines
    }

    /// Reduces a group to its common bit pattern: positions where every
    /// member cell agrees keep their bit, positions that vary become
    /// wildcards. The resulting implicant covers the member addresses.
    pub fn group_implicant(&self, group: &BTreeSet<Cell>) -> Implicant {
        let addresses: Vec<usize> = group.iter().map(|&cell| self.address(cell)).collect();
        let mut bits: ArrayVec<Option<bool>, MAX_VARS> = ArrayVec::new();
        for position in 0..self.width {
            let shift = self.width - 1 - position;
            let mut values = addresses.iter().map(|address| (address >> shift) & 1 == 1);
            let first = values.next().expect("groups are never empty");
            if values.all(|value| value == first) {
                bits.push(Some(first));
            } else {
                bits.push(None);
            }
        }
        Implicant::from_bits(bits, addresses.into_iter().collect())
    }
}
