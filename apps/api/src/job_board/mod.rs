//! Public job board: listing search for job ids, bulk detail fetch, mapping to `JobMatch`.

pub mod detail;
pub mod fetcher;
pub mod handlers;
pub mod mapping;
pub mod query;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

use query::{listing_url, parse_listing_ids, JobBoardQuery};

pub(crate) const USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Error)]
pub enum JobBoardError {
    #[error("Invalid job board URL: {0}")]
    InvalidUrl(String),

    #[error("Job board request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Job board returned status {0}")]
    Status(StatusCode),
}

/// Job ids listed for `query` on the job board's public listing page.
pub async fn search_job_ids(
    base_url: &str,
    query: &JobBoardQuery,
    timeout: Duration,
) -> Result<Vec<String>, JobBoardError> {
    let url = listing_url(base_url, query)?;
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(JobBoardError::Status(status));
    }

    let ids = parse_listing_ids(&response.text().await?);
    info!("Job board listing returned {} id(s)", ids.len());
    Ok(ids)
}
