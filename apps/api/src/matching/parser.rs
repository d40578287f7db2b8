//! Resilient job-match parser: strict JSON, then embedded object, then a degraded empty result.
//!
//! CRITICAL: `parse_job_matches` never fails. The caller always receives a
//! well-typed `JobMatchesResponse`; when nothing usable came back, `matches` is
//! empty and `search_summary` embeds (a bounded prefix of) the raw answer.
//! A schema violation is handled exactly like unparseable text. No partial records.

use tracing::{debug, warn};

use crate::matching::models::JobMatchesResponse;
use crate::structured_output::{extract_json_object, truncate_for_diagnostic};

/// Raw answers longer than this are truncated inside the diagnostic summary.
pub const MAX_DIAGNOSTIC_CHARS: usize = 4000;

pub fn parse_job_matches(raw_text: &str) -> JobMatchesResponse {
    let Some((strategy, value)) = extract_json_object(raw_text) else {
        warn!(
            "No JSON object found in job search answer ({} chars)",
            raw_text.len()
        );
        return degraded(raw_text);
    };

    match serde_json::from_value::<JobMatchesResponse>(value) {
        Ok(response) => {
            debug!(
                "Parsed {} job matches via {}",
                response.matches.len(),
                strategy.name()
            );
            response
        }
        Err(e) => {
            warn!("Job search answer violates schema ({}): {e}", strategy.name());
            degraded(raw_text)
        }
    }
}

fn degraded(raw_text: &str) -> JobMatchesResponse {
    JobMatchesResponse {
        matches: vec![],
        search_summary: Some(format!(
            "Error parsing job matches. Raw response: {}",
            truncate_for_diagnostic(raw_text, MAX_DIAGNOSTIC_CHARS)
        )),
    }
}
