// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! `sce` -- the sound-change engine's driver binary. Loads a structured
//! ruleset from disk and applies it, in block order, to a list of words.
//!
//! A textual rule-file grammar isn't implemented here; rulesets are
//! consumed already-structured as JSON or YAML. This binary is the
//! CLI/driver glue layered on top of the engine crates, the same role
//! a dedicated CLI crate plays in a larger workspace.

mod config;
mod error;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

use sce_core::word::Word;
use sce_engine::{Rng, RuleBlock, SoundChangeRule};

use config::Ruleset;
use error::CliResult;

#[derive(Parser)]
#[command(name = "sce")]
#[command(about = "Apply a structured sound-change ruleset to a list of words", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv). Overridden by `RUST_LOG` if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a ruleset to one or more words.
    Apply {
        /// Path to a JSON or YAML ruleset file.
        ruleset: PathBuf,
        /// Words to transform. Reads newline-separated words from stdin
        /// when omitted.
        words: Vec<String>,
    },
    /// Print the JSON Schema for the ruleset file format.
    Schema,
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn read_words(words: Vec<String>) -> io::Result<Vec<String>> {
    if !words.is_empty() {
        return Ok(words);
    }
    io::stdin()
        .lock()
        .lines()
        .map(|line| line.map(|l| l.trim().to_string()))
        .filter(|line| !matches!(line, Ok(l) if l.is_empty()))
        .collect()
}

fn apply_ruleset(ruleset: &Ruleset, word: &str) -> CliResult<Word> {
    let mut parsed = Word::parse(word, ruleset.grapheme_inventory(), ruleset.separator.clone())?;
    let mut rng = match ruleset.seed {
        Some(seed) => Rng::from_seed(seed),
        None => Rng::from_entropy(),
    };
    for block in &ruleset.blocks {
        tracing::debug!(block = %block.name, word = %parsed, "running block");
        parsed = match block.run(&parsed, &mut rng) {
            Ok(next) => next,
            Err(error) => {
                tracing::debug!(block = %block.name, %error, "block did not apply");
                parsed
            }
        };
    }
    Ok(parsed)
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Schema => {
            let schema = schemars::schema_for!(Ruleset);
            let rendered = serde_json::to_string_pretty(&schema).expect("schema serializes");
            println!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Apply { ruleset, words } => {
            let ruleset = Ruleset::load(&ruleset)?;
            let words = read_words(words).map_err(|source| error::CliError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for word in &words {
                let result = apply_ruleset(&ruleset, word)?;
                writeln!(out, "{result}").expect("stdout is writable");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
