//! cli component of the prefixcode project.
//!
//! lines starting with `> ` denote valid invocations. `$exename` stands for the executable name,
//! `<description>` denotes a required argument and `[description]` an optional one.
//!
//! # Schema
//!
//! > `$exename schema <text> [--strategy <name>] [--format text|json] [--single-symbol one-bit|reject]`
//!
//! prints the codeword of every distinct character of `<text>`, shortest codewords first.
//!
//! # Stats
//!
//! > `$exename stats <text> [--strategy <name>] [--fixed-width <bits>]`
//!
//! prints the average number of bits needed per character and the compression factor against a
//! fixed-width code of `--fixed-width` bits (8 by default, one byte per character).
//!
//! # Compare
//!
//! > `$exename compare <text> [--fixed-width <bits>] [--format text|json]`
//!
//! runs every available strategy over the same input and prints one stats line per strategy.
//!
//! # Listing
//!
//! > `$exename list-coders [--detailed]`
//!
//! `--strategy` takes any name or alias printed by `list-coders`, in any case.
//!
//! in every mode, `<text>` can be replaced with `--from-file <path>` to read the text from a file.
//! a text with a single distinct character has no proper prefix code; `--single-symbol one-bit`
//! (the default) gives it the codeword `0`, `--single-symbol reject` fails instead.
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use prefixcode::{Coding, CodingError, CodingSchema, Strategy, Symbol};

#[cfg(test)]
use prefixcode::ALL_CODERS;

pub mod list;
pub mod schema;
pub mod stats;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("could not read {path}: {source}")]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("unknown strategy: {0} (see `list-coders`)")]
    UnknownStrategy(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Coding(#[from] CodingError),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// CLI arguments for the prefixcode application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for prefixcode
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the codeword assigned to every symbol
    Schema(SchemaArgs),

    /// Print the average codeword length and compression factor
    Stats(StatsArgs),

    /// Run every strategy over the same input
    Compare(CompareArgs),

    /// List available strategies
    ListCoders {
        /// Show a description of each strategy
        #[arg(long)]
        detailed: bool,
    },
}

/// Where the text to code comes from
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Text to build the code for
    #[arg(required_unless_present = "from_file", conflicts_with = "from_file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    pub from_file: Option<PathBuf>,
}

impl InputArgs {
    pub fn read(&self) -> Result<String> {
        match (&self.text, &self.from_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => fs::read_to_string(path).map_err(|source| CliError::ReadInput {
                path: path.clone(),
                source,
            }),
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Strategy used to build the code
    #[arg(long, short, value_parser = parse_strategy, default_value_t = Strategy::Huffman)]
    pub strategy: Strategy,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, value_enum, default_value_t = SingleSymbolPolicy::OneBit)]
    pub single_symbol: SingleSymbolPolicy,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Strategy used to build the code
    #[arg(long, short, value_parser = parse_strategy, default_value_t = Strategy::Huffman)]
    pub strategy: Strategy,

    /// Bits per symbol of the fixed-width code the compression factor is measured against
    #[arg(long, default_value_t = 8)]
    pub fixed_width: u32,

    #[arg(long, value_enum, default_value_t = SingleSymbolPolicy::OneBit)]
    pub single_symbol: SingleSymbolPolicy,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Bits per symbol of the fixed-width code the compression factor is measured against
    #[arg(long, default_value_t = 8)]
    pub fixed_width: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, value_enum, default_value_t = SingleSymbolPolicy::OneBit)]
    pub single_symbol: SingleSymbolPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// How to code a text made of a single distinct symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SingleSymbolPolicy {
    /// Give the symbol the one-bit codeword `0`
    OneBit,
    /// Fail, since no proper prefix code exists
    Reject,
}

impl SingleSymbolPolicy {
    pub fn resolve<S: Symbol>(self, coding: Coding<S>) -> Result<CodingSchema<S>> {
        match self {
            SingleSymbolPolicy::OneBit => Ok(coding.with_one_bit_fallback()),
            SingleSymbolPolicy::Reject => Ok(coding.into_schema()?),
        }
    }
}

/// Parses a strategy from its registered name or any of its aliases.
pub fn parse_strategy(name: &str) -> Result<Strategy> {
    let lowered = name.to_ascii_lowercase();
    Strategy::from_name(&lowered).ok_or_else(|| CliError::UnknownStrategy(name.to_string()))
}

/// Builds the schema for `text`, applying the single-symbol policy.
pub fn build_schema(text: &str, strategy: Strategy, policy: SingleSymbolPolicy) -> Result<CodingSchema<char>> {
    let coding = strategy.build_from_symbols(text.chars())?;
    if_tracing! {{
        tracing::debug!(strategy = %strategy, single_symbol = coding.is_single_symbol(), "coding built");
    }}
    policy.resolve(coding)
}

/// Command execution
pub fn execute_command<W: io::Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Command::Schema(args) => schema::schema(args, out),
        Command::Stats(args) => stats::stats(args, out),
        Command::Compare(args) => stats::compare(args, out),
        Command::ListCoders { detailed } => list::list_coders(detailed, out),
    }
}
