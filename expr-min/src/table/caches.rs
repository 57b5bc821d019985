// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::table::table_impl::Row;
use bitvec::vec::BitVec;
use once_cell::sync::OnceCell;

/// Cache for numeric data derived from the rows. The rows are immutable
/// after construction, so this is computed at most once.
#[derive(Clone, Debug, Default)]
pub(super) struct TableCache {
    index_data: OnceCell<IndexData>,
}

impl TableCache {
    pub(super) fn get_or_init_index_data(&self, rows: &[Row]) -> &IndexData {
        self.index_data.get_or_init(|| IndexData::new(rows))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct IndexData {
    /// Row indices with a true result.
    pub(super) minterms: Vec<usize>,
    /// Row indices with a false result.
    pub(super) maxterms: Vec<usize>,
    /// The result column, row 0 first.
    pub(super) result_bits: BitVec,
    /// The result column read as an unsigned integer, row 0 as the most
    /// significant bit.
    pub(super) index_value: u64,
}

impl IndexData {
    fn new(rows: &[Row]) -> Self {
        let mut minterms = Vec::new();
        let mut maxterms = Vec::new();
        let mut result_bits = BitVec::with_capacity(rows.len());
        let mut index_value = 0_u64;

        for (index, row) in rows.iter().enumerate() {
            result_bits.push(row.result);
            if row.result {
                minterms.push(index);
                index_value |= 1 << (rows.len() - index - 1);
            } else {
                maxterms.push(index);
            }
        }

        Self {
            minterms,
            maxterms,
            result_bits,
            index_value,
        }
    }
}
