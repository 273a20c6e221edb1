//! What the page does between loading the documents and mounting the
//! timeline, kept free of browser types.

use std::future::Future;

use careerline_core::{LoadError, TimelineConfig, YearRecord};
use careerline_data::{merge, parse_events, parse_interpretations};

/// Result of the load step as the bootstrap acts on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Startup {
    /// Inline error text for the app mount; nothing else is built.
    Failed(String),
    /// Both documents loaded but hold no events.
    Empty,
    /// Records to chart and render, never empty.
    Render(Vec<YearRecord>),
}

pub fn startup_outcome(
    loaded: Result<Vec<YearRecord>, LoadError>,
    config: &TimelineConfig,
) -> Startup {
    match loaded {
        Err(err) => {
            log::error!("Error loading data: {err}");
            Startup::Failed(config.load_failure_message(&err))
        }
        Ok(records) if records.is_empty() => {
            log::info!("no timeline events to render");
            Startup::Empty
        }
        Ok(records) => Startup::Render(records),
    }
}

/// Maps a response status to `LoadError::HttpStatus` unless it is 2xx.
pub fn check_status(document: &str, status: u16, status_text: &str) -> Result<(), LoadError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(LoadError::http_status(document, status, status_text))
    }
}

/// Fetches and parses the events document, then the interpretations
/// document, stopping at the first failure, and merges them.
pub async fn load_with<F, Fut>(
    config: &TimelineConfig,
    mut fetch: F,
) -> Result<Vec<YearRecord>, LoadError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<String, LoadError>>,
{
    let body = fetch(config.events_url.clone()).await?;
    let events = parse_events(&body, &config.events_url)?;

    let body = fetch(config.interpretations_url.clone()).await?;
    let interpretations = parse_interpretations(&body, &config.interpretations_url)?;

    Ok(merge(events, &interpretations).records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NO_DATA_MESSAGE;
    use futures::executor::block_on;

    fn not_found(document: &str) -> LoadError {
        LoadError::http_status(document, 404, "Not Found")
    }

    /// Serves `events` and `interpretations` and records every requested url.
    fn load(
        events: Result<&str, LoadError>,
        interpretations: Result<&str, LoadError>,
    ) -> (Result<Vec<YearRecord>, LoadError>, Vec<String>) {
        let config = TimelineConfig::default();
        let mut requested = Vec::new();
        let result = block_on(load_with(&config, |url: String| {
            let body = if url == config.events_url {
                events.clone()
            } else {
                interpretations.clone()
            };
            requested.push(url);
            async move { body.map(str::to_string) }
        }));
        (result, requested)
    }

    #[test]
    fn loads_events_before_interpretations_and_sorts() {
        let (result, requested) = load(
            Ok(r#"[{"year": "2021", "title": "b"}, {"year": 2019, "title": "a"}]"#),
            Ok(r#"{"2021": {"analysis_summary": "grew"}}"#),
        );

        assert_eq!(requested, vec!["content.json", "llm-interpretation.json"]);
        let records = result.unwrap();
        let years: Vec<&str> = records.iter().map(|r| r.year.as_str()).collect();
        assert_eq!(years, vec!["2019", "2021"]);
        assert_eq!(records[1].ai_summary, "grew");
    }

    #[test]
    fn malformed_events_fail_before_the_second_fetch() {
        let (result, requested) = load(Ok("{not json"), Err(not_found("llm-interpretation.json")));

        let err = result.unwrap_err();
        assert!(matches!(err, LoadError::Parse { ref document, .. } if document == "content.json"));
        assert_eq!(requested, vec!["content.json"]);
    }

    #[test]
    fn failed_events_fetch_stops_the_load() {
        let (result, requested) = load(Err(not_found("content.json")), Ok("{}"));

        assert_eq!(result.unwrap_err(), not_found("content.json"));
        assert_eq!(requested, vec!["content.json"]);
    }

    #[test]
    fn failed_interpretations_fetch_is_reported() {
        let (result, _) = load(Ok("[]"), Err(not_found("llm-interpretation.json")));
        assert_eq!(result.unwrap_err().document(), "llm-interpretation.json");
    }

    #[test]
    fn non_success_status_becomes_an_inline_error() {
        let config = TimelineConfig::default();
        let loaded = check_status("content.json", 404, "Not Found").map(|_| Vec::new());

        assert_eq!(
            startup_outcome(loaded, &config),
            Startup::Failed(
                "Error loading data: Failed to load content.json: Not Found. \
                 Please ensure content.json and llm-interpretation.json exist."
                    .to_string()
            )
        );
    }

    #[test]
    fn status_text_falls_back_to_the_code() {
        let err = check_status("content.json", 500, "").unwrap_err();
        assert_eq!(err.to_string(), "Failed to load content.json: HTTP 500");
        assert!(check_status("content.json", 200, "OK").is_ok());
        assert!(check_status("content.json", 204, "").is_ok());
        assert!(check_status("content.json", 304, "Not Modified").is_err());
    }

    #[test]
    fn no_events_halt_setup() {
        let config = TimelineConfig::default();
        assert_eq!(startup_outcome(Ok(Vec::new()), &config), Startup::Empty);
        assert_eq!(NO_DATA_MESSAGE, "No timeline data available.");
    }

    #[test]
    fn loaded_records_are_rendered() {
        let config = TimelineConfig::default();
        let (result, _) = load(Ok(r#"[{"year": "2020", "title": "t"}]"#), Ok("{}"));

        match startup_outcome(result, &config) {
            Startup::Render(records) => assert_eq!(records[0].year, "2020"),
            other => panic!("expected records, got {other:?}"),
        }
    }
}
