use std::path::PathBuf;

use anyhow::Context;
use careerline_core::{Era, TimelineConfig};
use careerline_data::merge_documents_str;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "careerline-cli",
    about = "Merge career events with their AI interpretations and summarize the timeline."
)]
struct Args {
    /// Path to the events JSON document.
    #[arg(short, long, default_value = "content.json")]
    events: PathBuf,

    /// Path to the interpretations JSON document.
    #[arg(short, long, default_value = "llm-interpretation.json")]
    interpretations: PathBuf,

    /// Print the merged records as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let events = std::fs::read_to_string(&args.events)
        .with_context(|| format!("Could not read events file {:?}", args.events))?;
    let interpretations = std::fs::read_to_string(&args.interpretations).with_context(|| {
        format!(
            "Could not read interpretations file {:?}",
            args.interpretations
        )
    })?;

    let config = TimelineConfig {
        events_url: args.events.display().to_string(),
        interpretations_url: args.interpretations.display().to_string(),
        ..TimelineConfig::default()
    };
    let merged = merge_documents_str(&events, &interpretations, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&merged.records)?);
        return Ok(());
    }

    if merged.records.is_empty() {
        println!("No timeline data available.");
        return Ok(());
    }

    let total = merged.records.len();
    for (index, record) in merged.records.iter().enumerate() {
        let era = match Era::for_position(index, total) {
            Era::Past => "past",
            Era::Future => "future",
        };
        let top_match = record
            .matches
            .first()
            .map(|m| format!("{} ({}%)", m.role, m.match_percentage))
            .unwrap_or_else(|| "--".to_string());
        println!(
            "{:>6}  {:<6}  {}  | skills: {} | top match: {}",
            record.year,
            era,
            record.title,
            record.skills.len(),
            top_match
        );
    }

    if let Some(latest) = merged.records.last() {
        let skills: Vec<String> = latest
            .skills
            .iter()
            .map(|(skill, score)| format!("{skill} {score}"))
            .collect();
        println!("\nLatest skills ({}): {}", latest.year, skills.join(", "));
    }
    if !merged.uninterpreted_years.is_empty() {
        println!(
            "Years without interpretation: {}",
            merged.uninterpreted_years.join(", ")
        );
    }
    if !merged.orphan_interpretations.is_empty() {
        println!(
            "Interpretations without events: {}",
            merged.orphan_interpretations.join(", ")
        );
    }

    Ok(())
}
