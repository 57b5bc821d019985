// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{ArgEnum, Parser};
use color_eyre::{eyre::eyre, Result};
use expr_min::{
    implicant::NormalForm,
    minimize::{minimize, minimize_karnaugh, minimize_qmc, Minimized},
    report::full_report,
    token::ALPHABET,
};
use std::io::{self, BufRead};

#[derive(Debug, Parser)]
pub struct ExprMinApp {
    /// Enable debug-level logging.
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: ExprMinCommand,
}

#[derive(Debug, Parser)]
pub enum ExprMinCommand {
    /// Evaluate an expression and print the truth table, normal forms and
    /// all three minimizations.
    Report {
        /// Infix expression over a-e with !, &, |, -> and parentheses;
        /// read from stdin when omitted.
        expression: Option<String>,
    },
    /// Minimize an explicit index set.
    Minimize {
        /// Target indices (minterms, or maxterms with --cnf).
        #[clap(long, short, required = true, use_value_delimiter = true)]
        indices: Vec<usize>,
        /// Number of variables.
        #[clap(long, short = 'n', default_value_t = 3)]
        variables: usize,
        /// Treat the indices as maxterms and produce CNF.
        #[clap(long)]
        cnf: bool,
        /// Reduction strategy.
        #[clap(long, arg_enum, default_value = "algebraic")]
        method: Method,
    },
}

#[derive(Clone, Copy, Debug, ArgEnum)]
pub enum Method {
    Algebraic,
    Qmc,
    Karnaugh,
}

impl ExprMinApp {
    pub fn exec(self) -> Result<()> {
        let level = if self.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        };
        simplelog::TermLogger::init(
            level,
            simplelog::Config::default(),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )?;
        self.command.exec()
    }
}

impl ExprMinCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Report { expression } => {
                let expression = match expression {
                    Some(expression) => expression,
                    None => read_expression()?,
                };
                let report = full_report(&expression)?;
                print!("{}", report);
                Ok(())
            }
            Self::Minimize {
                indices,
                variables,
                cnf,
                method,
            } => {
                if variables == 0 || variables > ALPHABET.len() {
                    return Err(eyre!(
                        "variable count must be between 1 and {}",
                        ALPHABET.len()
                    ));
                }
                let limit = 1_usize << variables;
                if let Some(&index) = indices.iter().find(|&&index| index >= limit) {
                    return Err(eyre!(
                        "index {} out of range for {} variables",
                        index,
                        variables
                    ));
                }
                let form = if cnf { NormalForm::Cnf } else { NormalForm::Dnf };
                let names = &ALPHABET[..variables];
                let result = match method {
                    Method::Algebraic => minimize(&indices, names, form),
                    Method::Qmc => minimize_qmc(&indices, names, form),
                    Method::Karnaugh => minimize_karnaugh(&indices, names, form),
                };
                print_minimized(&result);
                Ok(())
            }
        }
    }
}

fn read_expression() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_minimized(result: &Minimized) {
    println!("{}", result.expression);
    for (ix, stage) in result.steps.iter().enumerate() {
        println!("  Stage {}:", ix + 1);
        for line in stage {
            println!("    {}", line);
        }
    }
}
