//! Chart specs and the capability a chart backend has to provide.

use serde::{Deserialize, Serialize};

use crate::{wrap_label, ChartError, Era, TimelineConfig, YearRecord};

/// Colour set of a chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    HeroSkill,
    HeroCareer,
    Past,
    Future,
}

/// Concrete colours behind a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColors {
    pub fill: &'static str,
    pub border: &'static str,
    /// Point label colour, `None` leaves the library default.
    pub text: Option<&'static str>,
    pub grid: &'static str,
}

impl Palette {
    pub fn for_era(era: Era) -> Self {
        match era {
            Era::Past => Palette::Past,
            Era::Future => Palette::Future,
        }
    }

    pub fn colors(self) -> PaletteColors {
        match self {
            Palette::HeroSkill => PaletteColors {
                fill: "rgba(42, 161, 152, 0.2)",
                border: "#2aa198",
                text: None,
                grid: "rgba(100,100,100,0.1)",
            },
            Palette::HeroCareer => PaletteColors {
                fill: "rgba(255, 99, 132, 0.5)",
                border: "rgba(255, 99, 132, 1)",
                text: None,
                grid: "rgba(0,0,0,0.1)",
            },
            Palette::Past => PaletteColors {
                fill: "rgba(181, 137, 0, 0.5)",
                border: "#b58900",
                text: Some("#000"),
                grid: "rgba(0,0,0,0.1)",
            },
            Palette::Future => PaletteColors {
                fill: "rgba(42, 161, 152, 0.5)",
                border: "#2aa198",
                text: Some("#fff"),
                grid: "rgba(255,255,255,0.1)",
            },
        }
    }
}

/// Data for a single-dataset radar chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RadarSpec {
    pub dataset_label: String,
    /// Axis labels; a `'\n'` marks a line break.
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub palette: Palette,
}

impl RadarSpec {
    /// Hero radar of the record's skill scores.
    pub fn hero_skills(record: &YearRecord) -> Self {
        Self {
            dataset_label: "Current Skills".to_string(),
            labels: record.skills.labels(),
            values: record.skills.values(),
            palette: Palette::HeroSkill,
        }
    }

    /// Per-item radar of the top career matches with wrapped role names.
    pub fn item_matches(record: &YearRecord, era: Era, config: &TimelineConfig) -> Self {
        let top = top_matches(record, config.item_match_limit);
        Self {
            dataset_label: "Career Fit %".to_string(),
            labels: top
                .iter()
                .map(|m| wrap_label(&m.role, config.max_chars_per_line))
                .collect(),
            values: top.iter().map(|m| m.match_percentage).collect(),
            palette: Palette::for_era(era),
        }
    }
}

/// Data for a horizontal bar chart on a fixed 0..100 axis.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BarSpec {
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub palette: Palette,
}

impl BarSpec {
    /// Hero bar chart of the record's strongest career matches.
    pub fn hero_matches(record: &YearRecord, limit: usize) -> Self {
        let top = top_matches(record, limit);
        Self {
            dataset_label: "Match Probability (%)".to_string(),
            labels: top.iter().map(|m| m.role.clone()).collect(),
            values: top.iter().map(|m| m.match_percentage).collect(),
            palette: Palette::HeroCareer,
        }
    }
}

fn top_matches(record: &YearRecord, limit: usize) -> &[crate::CareerMatch] {
    &record.matches[..record.matches.len().min(limit)]
}

/// Drawing capability of a chart library.
///
/// Each render binds one chart to `mount`. Callers render a mount at most
/// once per session; backends do not replace an existing chart.
pub trait ChartAdapter {
    type Handle;

    fn render_radar(&mut self, mount: &str, spec: &RadarSpec) -> Result<Self::Handle, ChartError>;

    fn render_bar(&mut self, mount: &str, spec: &BarSpec) -> Result<Self::Handle, ChartError>;

    /// Radar with multi-line point labels and a `%` tooltip.
    fn render_item_radar(
        &mut self,
        mount: &str,
        spec: &RadarSpec,
    ) -> Result<Self::Handle, ChartError>;

    fn destroy(&mut self, handle: Self::Handle);
}

/// The two summary charts drawn from the latest record.
#[derive(Debug)]
pub struct HeroCharts<H> {
    pub skills: Option<H>,
    pub careers: Option<H>,
}

/// Draws both hero charts. A chart that fails is logged and left out so the
/// other one still renders.
pub fn render_hero_charts<A: ChartAdapter>(
    adapter: &mut A,
    latest: &YearRecord,
    config: &TimelineConfig,
) -> HeroCharts<A::Handle> {
    let skills = adapter
        .render_radar(&config.hero_skill_mount, &RadarSpec::hero_skills(latest))
        .map_err(|err| log::warn!("hero skill chart skipped: {err}"))
        .ok();
    let careers = adapter
        .render_bar(
            &config.hero_career_mount,
            &BarSpec::hero_matches(latest, config.hero_match_limit),
        )
        .map_err(|err| log::warn!("hero career chart skipped: {err}"))
        .ok();
    HeroCharts { skills, careers }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingAdapter;
    use super::*;
    use crate::{CareerMatch, SkillMatrix};

    fn record_with_matches(count: usize) -> YearRecord {
        YearRecord {
            year: "2024".to_string(),
            title: "Staff role".to_string(),
            description: String::new(),
            images: Vec::new(),
            skills: [("Rust", 90.0), ("SQL", 70.0)].into_iter().collect(),
            matches: (0..count)
                .map(|i| CareerMatch {
                    role: format!("Senior Backend Engineer {i}"),
                    match_percentage: 90.0 - i as f64,
                })
                .collect(),
            ai_summary: "Strong year".to_string(),
        }
    }

    #[test]
    fn hero_bar_keeps_the_top_ten_matches() {
        let spec = BarSpec::hero_matches(&record_with_matches(14), 10);
        assert_eq!(spec.labels.len(), 10);
        assert_eq!(spec.values.first(), Some(&90.0));
        assert_eq!(spec.values.last(), Some(&81.0));
        assert_eq!(spec.palette, Palette::HeroCareer);
        assert_eq!(spec.dataset_label, "Match Probability (%)");
    }

    #[test]
    fn hero_radar_plots_skills_in_order() {
        let spec = RadarSpec::hero_skills(&record_with_matches(0));
        assert_eq!(spec.labels, vec!["Rust", "SQL"]);
        assert_eq!(spec.values, vec![90.0, 70.0]);
    }

    #[test]
    fn item_radar_wraps_top_five_roles_with_era_palette() {
        let config = TimelineConfig::default();
        let record = record_with_matches(8);

        let spec = RadarSpec::item_matches(&record, Era::Future, &config);
        assert_eq!(spec.labels.len(), 5);
        assert_eq!(spec.labels[0], "Senior Backend\nEngineer 0");
        assert_eq!(spec.palette, Palette::Future);
        assert_eq!(spec.palette.colors().text, Some("#fff"));

        let past = RadarSpec::item_matches(&record, Era::Past, &config);
        assert_eq!(past.palette.colors().border, "#b58900");
    }

    #[test]
    fn empty_interpretation_gives_empty_specs() {
        let mut record = record_with_matches(0);
        record.skills = SkillMatrix::new();
        assert!(RadarSpec::hero_skills(&record).labels.is_empty());
        assert!(BarSpec::hero_matches(&record, 10).values.is_empty());
    }

    #[test]
    fn hero_charts_survive_a_missing_mount() {
        let config = TimelineConfig::default();
        let mut adapter = RecordingAdapter::with_missing(&config.hero_skill_mount);

        let hero = render_hero_charts(&mut adapter, &record_with_matches(3), &config);
        assert!(hero.skills.is_none());
        assert!(hero.careers.is_some());
        assert_eq!(adapter.count("bar"), 1);
    }
}
