//! Bulk Job Fetcher: ordered, bounded fan-out over job detail pages.
//!
//! One HTTP client is created per `fetch_all` call and dropped when it returns.
//! Every id yields exactly one `JobDetail`, at the same index as its id: a
//! failed fetch becomes `JobDetail::empty(id)` and never affects its siblings.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::USER_AGENT;
use crate::job_board::detail::{parse_job_detail, JobDetail};

const DETAIL_PATH: &str = "/jobs-guest/jobs/api/jobPosting";

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

#[derive(Debug, Clone)]
pub struct JobFetcher {
    base_url: String,
    timeout: Duration,
}

impl JobFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Fetches every id with at most `batch_size` requests in flight.
    pub async fn fetch_all(&self, job_ids: &[String], batch_size: usize) -> Vec<JobDetail> {
        let client = match Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!("Could not build HTTP client, returning defaulted records: {e}");
                return job_ids.iter().map(JobDetail::empty).collect();
            }
        };

        let client = &client;
        let details: Vec<JobDetail> = stream::iter(job_ids.iter().cloned())
            .map(|job_id| async move { self.fetch_or_default(client, &job_id).await })
            .buffered(batch_size.max(1))
            .collect()
            .await;

        let failed = details.iter().filter(|d| d.job_title.is_empty()).count();
        info!(
            "Fetched {} job detail(s), {failed} without a title",
            details.len()
        );
        details
    }

    async fn fetch_or_default(&self, client: &Client, job_id: &str) -> JobDetail {
        match self.fetch_one(client, job_id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(job_id = %job_id, "Job detail fetch failed: {e}");
                JobDetail::empty(job_id)
            }
        }
    }

    async fn fetch_one(&self, client: &Client, job_id: &str) -> Result<JobDetail, FetchError> {
        let url = format!("{}{DETAIL_PATH}/{job_id}", self.base_url);
        let response = client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let html = response.text().await?;
        debug!(job_id = %job_id, "Detail page is {} bytes", html.len());
        Ok(parse_job_detail(job_id, &html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_board::detail::DETAIL_FIXTURE;
    use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Router};
    use tokio::net::TcpListener;

    async fn detail_page(Path(id): Path<String>) -> Result<String, AxumStatus> {
        match id.as_str() {
            "500" => Err(AxumStatus::INTERNAL_SERVER_ERROR),
            "404" => Err(AxumStatus::NOT_FOUND),
            "slow" => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(DETAIL_FIXTURE.to_string())
            }
            "bare" => Ok("<html><body>nothing here</body></html>".to_string()),
            _ => Ok(DETAIL_FIXTURE.replace("Senior Rust Engineer", &format!("Engineer {id}"))),
        }
    }

    async fn spawn_board() -> String {
        let app = Router::new().route("/jobs-guest/jobs/api/jobPosting/:id", get(detail_page));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_results_align_with_input_order() {
        let fetcher = JobFetcher::new(spawn_board().await, Duration::from_secs(5));
        let job_ids = ids(&["1", "2", "3", "4", "5", "6", "7"]);
        let details = fetcher.fetch_all(&job_ids, 3).await;

        assert_eq!(details.len(), job_ids.len());
        for (detail, id) in details.iter().zip(&job_ids) {
            assert_eq!(&detail.job_id, id);
            assert_eq!(detail.job_title, format!("Engineer {id}"));
        }
    }

    #[tokio::test]
    async fn test_fetch_runs_on_spawned_task() {
        let fetcher = JobFetcher::new(spawn_board().await, Duration::from_secs(5));
        let job_ids = ids(&["1", "500"]);
        let details = tokio::spawn(async move { fetcher.fetch_all(&job_ids, 2).await })
            .await
            .unwrap();

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].job_title, "Engineer 1");
        assert_eq!(details[1], JobDetail::empty("500"));
    }

    #[tokio::test]
    async fn test_failures_are_isolated_per_item() {
        let fetcher = JobFetcher::new(spawn_board().await, Duration::from_secs(5));
        let job_ids = ids(&["1", "500", "2", "404", "bare", "3"]);
        let details = fetcher.fetch_all(&job_ids, 2).await;

        assert_eq!(details.len(), 6);
        assert_eq!(details[0].job_title, "Engineer 1");
        assert_eq!(details[1], JobDetail::empty("500"));
        assert_eq!(details[2].job_title, "Engineer 2");
        assert_eq!(details[3], JobDetail::empty("404"));
        assert_eq!(details[4], JobDetail::empty("bare"));
        assert_eq!(details[5].job_title, "Engineer 3");
    }

    #[tokio::test]
    async fn test_timeout_becomes_defaulted_record() {
        let fetcher = JobFetcher::new(spawn_board().await, Duration::from_millis(200));
        let details = fetcher.fetch_all(&ids(&["slow", "1"]), 5).await;
        assert_eq!(details[0], JobDetail::empty("slow"));
        assert_eq!(details[1].job_title, "Engineer 1");
    }

    #[tokio::test]
    async fn test_unreachable_host_defaults_every_record() {
        // Nothing listens on port 9 (discard) in the test environment.
        let fetcher = JobFetcher::new("http://127.0.0.1:9", Duration::from_secs(2));
        let details = fetcher.fetch_all(&ids(&["1", "2"]), 0).await;
        assert_eq!(details, vec![JobDetail::empty("1"), JobDetail::empty("2")]);
    }

    #[tokio::test]
    async fn test_empty_input_yields_empty_output() {
        let fetcher = JobFetcher::new("http://127.0.0.1:9", Duration::from_secs(1));
        assert!(fetcher.fetch_all(&[], 5).await.is_empty());
    }
}
