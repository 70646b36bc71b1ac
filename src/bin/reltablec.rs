//! `reltablec <input>.dsl <output>.ll`. Grounded on
//! `y-lang`'s `src/bin/yc.rs` (thin `anyhow::Result` main delegating to the
//! library) and its sibling `main.rs` (`clap::Parser` derive `Cli` struct,
//! `std::fs::read_to_string` for the input file).
//!
//! Parsing `.dsl` source text into a typed parse tree is out of scope for
//! this compiler core — the crate's [`reltablec::driver`]
//! operates on an already-parsed [`reltablec::ast::Program`]. This binary
//! reads the input file and fixes the command's argument/exit-code
//! contract; it reports the parsing boundary honestly rather than
//! pretending to lex and parse RelTable source itself.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context as _};
use clap::Parser;
use colored::Colorize;
use log::error;

#[derive(Parser, Debug)]
#[command(author, version, about = "RelTable DSL semantic analyzer and LL-IR code generator")]
struct Cli {
    /// Path to the RelTable source file to compile.
    input: PathBuf,

    /// Path to write the generated LLVM IR to.
    output: PathBuf,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let _source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    // Lexing and parsing RelTable source text is an external collaborator
    // this crate does not implement; `reltablec::driver::compile`
    // is the entry point once a caller has its own `ast::Program` in hand.
    bail!(
        "parsing '{}' is out of scope for this compiler core; supply a pre-parsed ast::Program to reltablec::driver::compile",
        cli.input.display()
    );
}

fn main() -> ExitCode {
    simple_logger::SimpleLogger::new().env().init().ok();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
