//! Outbound image fetching: the logo proxy and the logo health check.
//!
//! Logo images live on third-party hosts (mostly Wikimedia). The proxy
//! endpoint replays them from our origin so the SPA avoids hotlink and CORS
//! trouble, and the health check reports which stored URLs still load.
//!
//! Calls are instrumented and log sizes and content types, never payloads.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::domain::LogoItem;

const FETCH_USER_AGENT: &str = "Mozilla/5.0 (compatible; FindAirline/1.0)";
const FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct ImageFetcher {
  client: reqwest::Client,
}

/// Per-item outcome of a health check run.
#[derive(Clone, Debug, Serialize)]
pub struct LogoStatus {
  pub name: String,
  pub url: String,
  pub ok: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct HealthReport {
  pub checked: usize,
  pub healthy: usize,
  pub failed: usize,
  pub results: Vec<LogoStatus>,
}

impl ImageFetcher {
  /// Build the shared HTTP client; None if the TLS backend fails to set up.
  pub fn new() -> Option<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
      .build()
      .ok()?;
    Some(Self { client })
  }

  /// Download one image; returns the raw bytes and the content type.
  #[instrument(level = "info", skip(self), fields(%url))]
  pub async fn fetch_image(&self, url: &str) -> Result<(Vec<u8>, String), String> {
    let res = self
      .client
      .get(url)
      .header(USER_AGENT, FETCH_USER_AGENT)
      .send()
      .await
      .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      return Err(format!("Failed to fetch image: {}", res.status().as_u16()));
    }

    let content_type = res
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .unwrap_or("image/png")
      .to_string();
    let bytes = res.bytes().await.map_err(|e| e.to_string())?.to_vec();
    info!(target: "images", size = bytes.len(), %content_type, "Image fetched");
    Ok((bytes, content_type))
  }

  /// Probe every item's image URL, accounting success/failure per item.
  #[instrument(level = "info", skip(self, items), fields(count = items.len()))]
  pub async fn health_check(&self, items: &[LogoItem]) -> HealthReport {
    let mut handles = Vec::with_capacity(items.len());
    for item in items {
      let fetcher = self.clone();
      let name = item.name.clone();
      let url = item.image_url.clone();
      handles.push(tokio::spawn(async move {
        match fetcher.fetch_image(&url).await {
          Ok(_) => LogoStatus { name, url, ok: true, error: None },
          Err(e) => LogoStatus { name, url, ok: false, error: Some(e) },
        }
      }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
      match handle.await {
        Ok(status) => results.push(status),
        Err(e) => error!(target: "images", error = %e, "Health probe task failed"),
      }
    }
    summarize(results)
  }
}

fn summarize(results: Vec<LogoStatus>) -> HealthReport {
  let healthy = results.iter().filter(|r| r.ok).count();
  let failed = results.len() - healthy;
  HealthReport { checked: results.len(), healthy, failed, results }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn status(name: &str, ok: bool) -> LogoStatus {
    LogoStatus {
      name: name.into(),
      url: format!("https://upload.example.org/{name}.png"),
      ok,
      error: if ok { None } else { Some("Failed to fetch image: 404".into()) },
    }
  }

  #[test]
  fn report_accounts_every_item() {
    let report = summarize(vec![
      status("Emirates", true),
      status("Delta", false),
      status("JAL", true),
    ]);
    assert_eq!(report.checked, 3);
    assert_eq!(report.healthy, 2);
    assert_eq!(report.failed, 1);
    let broken: Vec<&LogoStatus> = report.results.iter().filter(|r| !r.ok).collect();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].name, "Delta");
    assert!(broken[0].error.is_some());
  }

  #[test]
  fn empty_pool_yields_an_empty_report() {
    let report = summarize(vec![]);
    assert_eq!(report.checked, 0);
    assert_eq!(report.healthy, 0);
    assert_eq!(report.failed, 0);
    assert!(report.results.is_empty());
  }
}
