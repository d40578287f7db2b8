//! JobMatch schema. Deserialization is the schema validation for model output.
//!
//! Optional fields use one convention: absent. Placeholder strings the model
//! sometimes writes anyway ("NA", "Not specified", ...) are normalised to `None`
//! on the way in, and placeholder list entries are dropped.

use serde::{de, Deserialize, Deserializer, Serialize};

/// A single job opportunity, as returned by a job search or mapped from a job board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    #[serde(deserialize_with = "non_empty_text")]
    pub job_title: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub required_experience: Option<String>,
    #[serde(default, deserialize_with = "optional_list")]
    pub technologies: Option<Vec<String>>,
    /// Free-form ("Remote", "Hybrid", "Onsite" by convention, not enforced).
    pub work_type: String,
    pub location: String,
    pub company: String,
    #[serde(deserialize_with = "required_list")]
    pub required_qualifications: Vec<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub application_link: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub job_description: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub salary_range: Option<String>,
}

/// Ordered job matches plus a summary. When parsing degraded, `matches` is empty
/// and `search_summary` carries the diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchesResponse {
    pub matches: Vec<JobMatch>,
    #[serde(default)]
    pub search_summary: Option<String>,
}

/// Sparse filter set for criteria-driven search. Absent filters are omitted from the prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub required_experience: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub work_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
}

const PLACEHOLDERS: &[&str] = &[
    "",
    "na",
    "n/a",
    "n.a.",
    "none",
    "null",
    "not specified",
    "not available",
    "unknown",
];

pub fn is_placeholder(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    PLACEHOLDERS.contains(&normalized.as_str())
}

fn non_empty_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if is_placeholder(&value) {
        return Err(de::Error::custom(format!(
            "job_title must be a real title, got '{value}'"
        )));
    }
    Ok(value.trim().to_string())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .filter(|v| !is_placeholder(v))
        .map(|v| v.trim().to_string()))
}

fn optional_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.map(drop_placeholders).filter(|items| !items.is_empty()))
}

fn required_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer).map(drop_placeholders)
}

fn drop_placeholders(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .filter(|item| !is_placeholder(item))
        .map(|item| item.trim().to_string())
        .collect()
}
