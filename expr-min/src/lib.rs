// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod errors;
pub mod implicant;
pub mod minimize;
pub mod postfix;
pub mod report;
pub mod table;
pub mod token;
