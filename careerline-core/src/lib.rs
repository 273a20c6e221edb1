//! Core logic for the career timeline: merged year records, chart specs and
//! the accordion controller.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod chart;
pub mod controller;
pub mod lightbox;
pub mod wrap;

pub use chart::{render_hero_charts, BarSpec, ChartAdapter, HeroCharts, Palette, RadarSpec};
pub use controller::{ClickOutcome, ClickTarget, ItemState, TimelineController};
pub use lightbox::Lightbox;
pub use wrap::{wrap_label, DEFAULT_MAX_CHARS_PER_LINE};

/// Summary shown for a year that has no AI interpretation.
pub const NO_ANALYSIS_PLACEHOLDER: &str = "No analysis available.";

/// Mount ids, document locations and chart limits. Missing fields take
/// their default when deserialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimelineConfig {
    /// Location of the events document.
    pub events_url: String,
    /// Location of the interpretations document.
    pub interpretations_url: String,
    /// Element id the timeline items are rendered into.
    pub app_mount: String,
    /// Canvas id of the hero skill radar.
    pub hero_skill_mount: String,
    /// Canvas id of the hero career bar chart.
    pub hero_career_mount: String,
    pub modal_id: String,
    pub modal_image_id: String,
    pub modal_close_selector: String,
    /// Point label width before the item radar wraps a role name.
    pub max_chars_per_line: usize,
    /// Career matches plotted by the hero bar chart.
    pub hero_match_limit: usize,
    /// Career matches plotted by each item radar.
    pub item_match_limit: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            events_url: "content.json".to_string(),
            interpretations_url: "llm-interpretation.json".to_string(),
            app_mount: "timeline-app".to_string(),
            hero_skill_mount: "heroSkillChart".to_string(),
            hero_career_mount: "heroCareerChart".to_string(),
            modal_id: "imageModal".to_string(),
            modal_image_id: "modalImg".to_string(),
            modal_close_selector: ".close".to_string(),
            max_chars_per_line: DEFAULT_MAX_CHARS_PER_LINE,
            hero_match_limit: 10,
            item_match_limit: 5,
        }
    }
}

impl TimelineConfig {
    /// Canvas id of the per-item radar for `index`.
    pub fn item_chart_mount(&self, index: usize) -> String {
        format!("chart-{index}")
    }

    /// Inline message shown in the app mount when loading fails.
    pub fn load_failure_message(&self, err: &LoadError) -> String {
        format!(
            "Error loading data: {err}. Please ensure {} and {} exist.",
            self.events_url, self.interpretations_url
        )
    }
}

/// One predicted role and how well the year's profile fits it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerMatch {
    pub role: String,
    pub match_percentage: f64,
}

/// Skill scores keyed by skill name, kept in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillMatrix(Vec<(String, f64)>);

impl SkillMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, skill: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == skill)
            .map(|(_, score)| *score)
    }

    /// Sets a score, replacing an existing entry in place.
    pub fn insert(&mut self, skill: impl Into<String>, score: f64) {
        let skill = skill.into();
        match self.0.iter_mut().find(|(name, _)| *name == skill) {
            Some(entry) => entry.1 = score,
            None => self.0.push((skill, score)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|(_, score)| *score).collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for SkillMatrix {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut matrix = SkillMatrix::new();
        for (skill, score) in iter {
            matrix.insert(skill, score);
        }
        matrix
    }
}

impl Serialize for SkillMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, score) in &self.0 {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SkillMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SkillMatrixVisitor;

        impl<'de> Visitor<'de> for SkillMatrixVisitor {
            type Value = SkillMatrix;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of skill names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut matrix = SkillMatrix::new();
                while let Some((skill, score)) = access.next_entry::<String, f64>()? {
                    matrix.insert(skill, score);
                }
                Ok(matrix)
            }
        }

        deserializer.deserialize_map(SkillMatrixVisitor)
    }
}

/// A timeline entry: one event merged with its optional interpretation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearRecord {
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub skills: SkillMatrix,
    #[serde(default)]
    pub matches: Vec<CareerMatch>,
    pub ai_summary: String,
}

impl YearRecord {
    /// Numeric reading of `year`, if it starts with an integer.
    pub fn numeric_year(&self) -> Option<i64> {
        parse_leading_int(&self.year)
    }
}

/// Reads an optionally signed decimal integer at the start of `text`,
/// skipping leading whitespace and ignoring anything after the digits.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Colour theme of a timeline item, fixed when the item is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    Past,
    Future,
}

impl Era {
    /// Items past the middle of the collection (`index > len / 2`) use the
    /// future theme.
    pub fn for_position(index: usize, len: usize) -> Self {
        if index * 2 > len {
            Era::Future
        } else {
            Era::Past
        }
    }

    pub fn is_future(self) -> bool {
        matches!(self, Era::Future)
    }
}

/// Failure to obtain one of the two source documents.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to load {document}: {message}")]
    Network { document: String, message: String },
    #[error("Failed to load {document}: {status_text}")]
    HttpStatus {
        document: String,
        status: u16,
        status_text: String,
    },
    #[error("Failed to parse {document}: {message}")]
    Parse { document: String, message: String },
}

impl LoadError {
    /// Builds an `HttpStatus` error; an empty status text is replaced by
    /// the numeric code.
    pub fn http_status(document: impl Into<String>, status: u16, status_text: &str) -> Self {
        let status_text = if status_text.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            status_text.to_string()
        };
        LoadError::HttpStatus {
            document: document.into(),
            status,
            status_text,
        }
    }

    pub fn document(&self) -> &str {
        match self {
            LoadError::Network { document, .. }
            | LoadError::HttpStatus { document, .. }
            | LoadError::Parse { document, .. } => document,
        }
    }
}

/// Failure reported by a chart backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("chart mount `{0}` not found")]
    MissingMount(String),
    #[error("chart backend failed on `{mount}`: {message}")]
    Backend { mount: String, message: String },
}
