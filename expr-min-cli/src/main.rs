// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use expr_min_cli::ExprMinApp;

fn main() -> Result<()> {
    color_eyre::install()?;
    let app = ExprMinApp::parse();
    app.exec()
}
