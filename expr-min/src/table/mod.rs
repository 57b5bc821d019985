// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod caches;
mod display;
mod table_impl;

pub use display::*;
pub use table_impl::*;
