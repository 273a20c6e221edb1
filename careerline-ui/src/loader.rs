#![cfg(target_arch = "wasm32")]

use careerline_core::{LoadError, TimelineConfig, YearRecord};
use gloo_net::http::Request;

use crate::startup::{check_status, load_with};

/// Loads both documents over HTTP, one after the other, and merges them.
pub async fn load_timeline(config: &TimelineConfig) -> Result<Vec<YearRecord>, LoadError> {
    load_with(config, fetch_document).await
}

async fn fetch_document(url: String) -> Result<String, LoadError> {
    let network_error = |err: gloo_net::Error| LoadError::Network {
        document: url.clone(),
        message: err.to_string(),
    };

    let resp = Request::get(&url).send().await.map_err(network_error)?;
    check_status(&url, resp.status(), &resp.status_text())?;
    log::debug!("fetched {url} ({})", resp.status());
    resp.text().await.map_err(network_error)
}
