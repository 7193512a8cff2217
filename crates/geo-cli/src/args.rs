use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for geo-disambig.
#[derive(Debug, Parser)]
#[command(
    name = "geo-disambig",
    version,
    about = "Disambiguates geographic-entity mentions against a gazetteer"
)]
pub struct CliArgs {
    /// Path to the engine request JSON (text, candidates, coordinate and
    /// ambiguity groups, and optionally the dictionary snapshot path).
    pub request: PathBuf,

    /// Path to the dictionary snapshot JSON. Overrides the `dictionary`
    /// field of the request file when given.
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}
