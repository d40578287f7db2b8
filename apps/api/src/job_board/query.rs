//! Public job-board listing search: query codes, listing URL, job id extraction.

use reqwest::Url;
use scraper::{Html, Selector};
use serde::Deserialize;

use super::JobBoardError;

const LISTING_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search/";
const TRACKING_URN_MARKER: &str = "jobPosting:";

const EMPLOYMENT_TYPE_CODES: &[(&str, &str)] = &[
    ("full-time", "F"),
    ("contract", "C"),
    ("part-time", "P"),
    ("temporary", "T"),
    ("internship", "I"),
    ("volunteer", "V"),
    ("other", "O"),
];

const EXPERIENCE_LEVEL_CODES: &[(&str, &str)] = &[
    ("internship", "1"),
    ("entry-level", "2"),
    ("associate", "3"),
    ("mid-senior-level", "4"),
    ("director", "5"),
    ("executive", "6"),
];

const WORK_TYPE_CODES: &[(&str, &str)] = &[("onsite", "1"), ("remote", "2"), ("hybrid", "3")];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobBoardQuery {
    pub keywords: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub employment_types: Vec<String>,
    #[serde(default)]
    pub experience_levels: Vec<String>,
    #[serde(default)]
    pub work_types: Vec<String>,
}

/// Maps labels through `table`, dropping unknown ones. Labels are matched
/// case-insensitively, with spaces treated as hyphens ("entry level").
fn encode(labels: &[String], table: &[(&str, &str)]) -> Option<String> {
    let codes: Vec<&str> = labels
        .iter()
        .filter_map(|label| {
            let label = label.trim().to_ascii_lowercase().replace(' ', "-");
            table
                .iter()
                .find(|(name, _)| *name == label)
                .map(|(_, code)| *code)
        })
        .collect();
    (!codes.is_empty()).then(|| codes.join(","))
}

pub fn listing_url(base_url: &str, query: &JobBoardQuery) -> Result<Url, JobBoardError> {
    let mut params: Vec<(&str, String)> = vec![("keywords", query.keywords.trim().to_string())];

    if let Some(location) = query.location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        params.push(("location", location.to_string()));
    }
    if let Some(codes) = encode(&query.employment_types, EMPLOYMENT_TYPE_CODES) {
        params.push(("f_JT", codes));
    }
    if let Some(codes) = encode(&query.experience_levels, EXPERIENCE_LEVEL_CODES) {
        params.push(("f_E", codes));
    }
    if let Some(codes) = encode(&query.work_types, WORK_TYPE_CODES) {
        params.push(("f_WT", codes));
    }
    params.push(("sortBy", "R".to_string()));

    let base = format!("{}{LISTING_PATH}", base_url.trim_end_matches('/'));
    Url::parse_with_params(&base, &params).map_err(|e| JobBoardError::InvalidUrl(e.to_string()))
}

/// Job ids from the listing page's cards (`data-entity-urn="urn:li:jobPosting:<id>"`).
pub fn parse_listing_ids(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(cards) = Selector::parse("div.base-card[data-entity-urn]") else {
        return vec![];
    };

    document
        .select(&cards)
        .filter_map(|card| card.value().attr("data-entity-urn"))
        .filter_map(|urn| job_id_from_tracking_urn(urn).or_else(|| urn.rsplit(':').next()))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// The id after the fixed `jobPosting:` marker of a tracking URN.
pub fn job_id_from_tracking_urn(urn: &str) -> Option<&str> {
    urn.split_once(TRACKING_URN_MARKER)
        .map(|(_, id)| id.trim())
        .filter(|id| !id.is_empty())
}
