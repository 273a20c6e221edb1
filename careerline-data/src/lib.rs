//! Events + interpretations JSON to a sorted list of `YearRecord`s.

use std::cmp::Ordering;
use std::collections::HashMap;

use careerline_core::{
    CareerMatch, LoadError, SkillMatrix, TimelineConfig, YearRecord, NO_ANALYSIS_PLACEHOLDER,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One entry of the events document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventEntry {
    #[serde(deserialize_with = "year_key")]
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// AI reading of a single year, keyed by year in the interpretations document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Interpretation {
    #[serde(default)]
    pub skills_matrix: SkillMatrix,
    #[serde(default)]
    pub top_career_matches: Vec<CareerMatch>,
    #[serde(default)]
    pub analysis_summary: Option<String>,
}

/// Merged records plus what did not line up between the two documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTimeline {
    pub records: Vec<YearRecord>,
    /// Event years with no interpretation, in timeline order.
    pub uninterpreted_years: Vec<String>,
    /// Interpretation keys with no matching event, sorted.
    pub orphan_interpretations: Vec<String>,
}

/// Accepts `"2020"` as well as `2020` or `2020.0` and keys all of them as
/// `"2020"`.
fn year_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearKey {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match YearKey::deserialize(deserializer)? {
        YearKey::Text(text) => text,
        YearKey::Number(number) => number_key(&number),
    })
}

fn number_key(number: &serde_json::Number) -> String {
    if number.is_f64() {
        if let Some(value) = number.as_f64() {
            if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                return format!("{}", value as i64);
            }
        }
    }
    number.to_string()
}

/// Parses the events document.
pub fn parse_events(json: &str, document: &str) -> Result<Vec<EventEntry>, LoadError> {
    serde_json::from_str(json).map_err(|err| parse_error(document, err))
}

/// Parses the interpretations document.
pub fn parse_interpretations(
    json: &str,
    document: &str,
) -> Result<HashMap<String, Interpretation>, LoadError> {
    serde_json::from_str(json).map_err(|err| parse_error(document, err))
}

fn parse_error(document: &str, err: serde_json::Error) -> LoadError {
    LoadError::Parse {
        document: document.to_string(),
        message: err.to_string(),
    }
}

/// Merges two JSON documents given as text.
pub fn merge_documents_str(
    events_json: &str,
    interpretations_json: &str,
    config: &TimelineConfig,
) -> Result<MergedTimeline, LoadError> {
    let events = parse_events(events_json, &config.events_url)?;
    let interpretations = parse_interpretations(interpretations_json, &config.interpretations_url)?;
    Ok(merge(events, &interpretations))
}

/// Merges two already-parsed JSON documents.
pub fn merge_documents_value(
    events: &Value,
    interpretations: &Value,
    config: &TimelineConfig,
) -> Result<MergedTimeline, LoadError> {
    let events: Vec<EventEntry> = serde_json::from_value(events.clone())
        .map_err(|err| parse_error(&config.events_url, err))?;
    let interpretations: HashMap<String, Interpretation> =
        serde_json::from_value(interpretations.clone())
            .map_err(|err| parse_error(&config.interpretations_url, err))?;
    Ok(merge(events, &interpretations))
}

/// Attaches each event's interpretation and sorts by numeric year.
///
/// Years without an interpretation get no skills, no matches and the
/// placeholder summary.
pub fn merge(
    events: Vec<EventEntry>,
    interpretations: &HashMap<String, Interpretation>,
) -> MergedTimeline {
    let mut records: Vec<YearRecord> = events
        .into_iter()
        .map(|event| {
            let interpretation = interpretations.get(&event.year);
            attach_interpretation(event, interpretation)
        })
        .collect();
    sort_chronologically(&mut records);

    let uninterpreted_years: Vec<String> = records
        .iter()
        .filter(|record| !interpretations.contains_key(&record.year))
        .map(|record| record.year.clone())
        .collect();

    let mut orphan_interpretations: Vec<String> = interpretations
        .keys()
        .filter(|year| !records.iter().any(|record| &record.year == *year))
        .cloned()
        .collect();
    orphan_interpretations.sort();

    log::info!(
        "merged {} timeline records ({} without interpretation)",
        records.len(),
        uninterpreted_years.len()
    );
    for year in &orphan_interpretations {
        log::warn!("interpretation for {year} has no matching event");
    }

    MergedTimeline {
        records,
        uninterpreted_years,
        orphan_interpretations,
    }
}

fn attach_interpretation(event: EventEntry, interpretation: Option<&Interpretation>) -> YearRecord {
    let (skills, matches, ai_summary) = match interpretation {
        Some(found) => (
            found.skills_matrix.clone(),
            found.top_career_matches.clone(),
            found
                .analysis_summary
                .clone()
                .unwrap_or_else(|| NO_ANALYSIS_PLACEHOLDER.to_string()),
        ),
        None => (
            SkillMatrix::new(),
            Vec::new(),
            NO_ANALYSIS_PLACEHOLDER.to_string(),
        ),
    };

    YearRecord {
        year: event.year,
        title: event.title,
        description: event.description,
        images: event.images,
        skills,
        matches,
        ai_summary,
    }
}

/// Stable ascending sort by numeric year; non-numeric years go last in
/// their original order.
pub fn sort_chronologically(records: &mut [YearRecord]) {
    records.sort_by(|a, b| compare_years(a.numeric_year(), b.numeric_year()));
}

fn compare_years(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
