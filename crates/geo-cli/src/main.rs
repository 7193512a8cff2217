//! geo-disambig — command-line wrapper around the geo-core disambiguation
//! engine.
//!
//! Usage
//! -----
//! `geo-disambig request.json --dictionary gazetteer.json`

mod args;
mod loader;

use crate::args::{CliArgs, OutputFormat};
use anyhow::{Context, Result};
use clap::Parser;
use geo_core::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// The on-disk request format: everything `find_locations` needs except the
/// dictionary, which may instead be supplied via `--dictionary`.
#[derive(Debug, Deserialize)]
struct EngineRequest {
    dictionary: Option<PathBuf>,
    text: String,
    candidates: Vec<CandidateEntityDto>,
    #[serde(default)]
    coordinate_entities_groups: Vec<Vec<String>>,
    #[serde(default)]
    ambiguity_groups: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct CandidateEntityDto {
    name: String,
    score: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = CliArgs::parse();

    let request_file = File::open(&args.request)
        .with_context(|| format!("opening request file {}", args.request.display()))?;
    let request: EngineRequest = serde_json::from_reader(BufReader::new(request_file))
        .with_context(|| format!("parsing request file {}", args.request.display()))?;

    let dictionary_path = args
        .dictionary
        .clone()
        .or_else(|| request.dictionary.clone())
        .context("no dictionary path given (use --dictionary or the request's \"dictionary\" field)")?;
    let dictionary = loader::load_dictionary(&dictionary_path)?;
    tracing::info!(locations = dictionary.len(), "loaded dictionary");

    let text_tokens: Vec<String> = request.text.split_whitespace().map(str::to_string).collect();
    let candidate_entities: Vec<CandidateEntity> = request
        .candidates
        .iter()
        .map(|c| CandidateEntity::new(c.name.clone(), c.score))
        .collect();

    let result = find_locations(
        &dictionary,
        &text_tokens,
        &candidate_entities,
        &request.coordinate_entities_groups,
        &request.ambiguity_groups,
    )?;

    match args.output {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_table(&result),
    }

    Ok(())
}

fn print_json(result: &FindLocationsResult) -> Result<()> {
    let rows: Vec<_> = result
        .locations
        .iter()
        .map(|l| {
            serde_json::json!({
                "id": l.id(),
                "name": l.location.name,
                "score": l.score,
                "confidence": l.confidence,
                "assignedMentions": l.assigned_mentions,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn print_table(result: &FindLocationsResult) {
    if result.locations.is_empty() {
        println!("(no locations resolved)");
        return;
    }
    println!("{:<32} {:>8} {:>10} {}", "name", "score", "confidence", "mentions");
    for l in &result.locations {
        println!(
            "{:<32} {:>8.4} {:>10.4} {}",
            l.location.name,
            l.score,
            l.confidence,
            l.assigned_mentions.join(", "),
        );
    }
    if let Some(stats) = &result.statistics {
        println!();
        println!(
            "score avg {:.4} std_dev {:.4} ({:.1}%)",
            stats.score.avg, stats.score.std_dev, stats.score.std_dev_perc
        );
    }
}
