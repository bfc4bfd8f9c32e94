use crate::parser::parse_leaflets;
use crate::utils::{RunSummary, current_parsed_time, write_leaflets_json};

use reqwest::{Client, StatusCode};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub url: String,
    pub output: PathBuf,
    /// `None` leaves the fetch unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: crate::WEB_URL.to_string(),
            output: PathBuf::from(crate::OUTPUT_FILE),
            timeout: None,
        }
    }
}

/// Capability to fetch a page. `Ok(None)` means the server answered with
/// something other than 200 and there is nothing to parse.
pub trait Fetch {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Option<String>, ScraperError>> + Send;
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
}

impl WebScraper {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ScraperError> {
        let mut builder = Client::builder().user_agent(format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Fetch for WebScraper {
    async fn fetch(&self, url: &str) -> Result<Option<String>, ScraperError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?;

        let status = response.status();
        if status != StatusCode::OK {
            log::error!("Failed to fetch data: {}", status);
            return Ok(None);
        }

        let html = response
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?;
        log::info!("Data fetched successfully");
        Ok(Some(html))
    }
}

/// One fetch-parse-write cycle. A non-200 response still writes an empty
/// list; transport and write failures are returned to the caller.
pub async fn run<F: Fetch>(fetcher: &F, config: &ScraperConfig) -> Result<RunSummary, ScraperError> {
    log::info!("Fetching leaflets from {}...", config.url);
    let html = fetcher.fetch(&config.url).await?;

    let parsed_time = current_parsed_time();
    let outcome = parse_leaflets(html.as_deref(), &parsed_time);

    write_leaflets_json(&config.output, &outcome.records).map_err(|source| {
        ScraperError::WriteError {
            path: config.output.clone(),
            source,
        }
    })?;
    log::info!(
        "Leaflets parsed successfully, wrote {} record(s) to {}",
        outcome.records.len(),
        config.output.display()
    );

    Ok(RunSummary::from_outcome(&outcome, &config.output))
}
