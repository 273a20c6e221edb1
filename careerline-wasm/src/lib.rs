//! Framework-neutral WASM <-> JavaScript bridge for merging timeline data.

use careerline_core::{wrap_label, LoadError, TimelineConfig};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsTimelineConfig {
    #[serde(default)]
    events_url: Option<String>,
    #[serde(default)]
    interpretations_url: Option<String>,
    #[serde(default)]
    max_chars_per_line: Option<usize>,
    #[serde(default)]
    item_match_limit: Option<usize>,
    #[serde(default)]
    hero_match_limit: Option<usize>,
}

impl From<JsTimelineConfig> for TimelineConfig {
    fn from(cfg: JsTimelineConfig) -> Self {
        let mut base = TimelineConfig::default();
        if let Some(url) = cfg.events_url {
            base.events_url = url;
        }
        if let Some(url) = cfg.interpretations_url {
            base.interpretations_url = url;
        }
        if let Some(width) = cfg.max_chars_per_line {
            base.max_chars_per_line = width;
        }
        if let Some(limit) = cfg.item_match_limit {
            base.item_match_limit = limit;
        }
        if let Some(limit) = cfg.hero_match_limit {
            base.hero_match_limit = limit;
        }
        base
    }
}

/// Merges an events array and an interpretations object into sorted year
/// records.
#[wasm_bindgen]
pub fn merge_documents(
    events: JsValue,
    interpretations: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cfg = read_config(config)?;

    let events_value = from_value::<serde_json::Value>(events)
        .map_err(|err| JsValue::from_str(&format!("Could not read events document: {err}")))?;
    let interpretations_value = from_value::<serde_json::Value>(interpretations).map_err(|err| {
        JsValue::from_str(&format!("Could not read interpretations document: {err}"))
    })?;

    let merged =
        careerline_data::merge_documents_value(&events_value, &interpretations_value, &cfg)
            .map_err(|err| JsValue::from_str(&format_load_error(err)))?;

    to_value(&merged.records)
        .map_err(|err| JsValue::from_str(&format!("Could not serialize records: {err}")))
}

/// Wraps a chart label onto at most two lines.
#[wasm_bindgen]
pub fn wrap_chart_label(label: &str, max_chars_per_line: Option<usize>) -> String {
    wrap_label(
        label,
        max_chars_per_line.unwrap_or(TimelineConfig::default().max_chars_per_line),
    )
}

fn read_config(config: Option<JsValue>) -> Result<TimelineConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsTimelineConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            Ok(TimelineConfig::from(cfg))
        }
        _ => Ok(TimelineConfig::default()),
    }
}

fn format_load_error(err: LoadError) -> String {
    format!("Timeline error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_overrides_only_given_fields() {
        let cfg = TimelineConfig::from(JsTimelineConfig {
            events_url: Some("data/events.json".to_string()),
            interpretations_url: None,
            max_chars_per_line: Some(12),
            item_match_limit: None,
            hero_match_limit: None,
        });

        assert_eq!(cfg.events_url, "data/events.json");
        assert_eq!(cfg.interpretations_url, "llm-interpretation.json");
        assert_eq!(cfg.max_chars_per_line, 12);
        assert_eq!(cfg.item_match_limit, 5);
    }

    #[test]
    fn wrap_uses_default_width() {
        assert_eq!(
            wrap_chart_label("Senior Backend Engineer", None),
            "Senior Backend\nEngineer"
        );
        assert_eq!(wrap_chart_label("CEO", Some(2)), "C\nEO");
    }

    #[test]
    fn load_errors_are_prefixed() {
        let err = LoadError::Parse {
            document: "content.json".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(
            format_load_error(err),
            "Timeline error: Failed to parse content.json: expected value"
        );
    }
}
