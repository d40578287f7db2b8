//! Maps scraped job details into the canonical `JobMatch` shape.

use std::sync::LazyLock;

use regex::Regex;

use crate::job_board::detail::JobDetail;
use crate::matching::models::{is_placeholder, JobMatch};

const KNOWN_TECHNOLOGIES: &[&str] = &[
    "Python",
    "Java",
    "JavaScript",
    "React",
    "Angular",
    "Node.js",
    "AWS",
    "Docker",
];

/// `5 years`, `5+ years`, `3-5 years`, `3 to 5 years`; the first number wins.
static EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:\+|(?:-|to)\s*\d+)?\s*\+?\s*years?")
        .expect("experience pattern is valid")
});

/// `None` for details without a real title; failed fetches have an empty one.
pub fn to_job_match(detail: &JobDetail) -> Option<JobMatch> {
    if is_placeholder(&detail.job_title) {
        return None;
    }

    let description = detail.description.as_str();
    let technologies = extract_technologies(description);

    Some(JobMatch {
        job_title: detail.job_title.clone(),
        required_experience: extract_experience(description),
        technologies: (!technologies.is_empty()).then_some(technologies),
        work_type: work_type(detail).to_string(),
        location: detail.location.clone(),
        company: detail.company.clone(),
        required_qualifications: extract_qualifications(description),
        application_link: non_empty(&detail.apply_link),
        job_description: non_empty(description),
        salary_range: None,
    })
}

pub fn extract_technologies(description: &str) -> Vec<String> {
    let lower = description.to_lowercase();
    KNOWN_TECHNOLOGIES
        .iter()
        .filter(|tech| lower.contains(&tech.to_lowercase()))
        .map(|tech| tech.to_string())
        .collect()
}

pub fn extract_qualifications(description: &str) -> Vec<String> {
    let lower = description.to_lowercase();
    let mut qualifications = Vec::new();
    if lower.contains("bachelor") {
        qualifications.push("Bachelor's degree".to_string());
    }
    if lower.contains("master") {
        qualifications.push("Master's degree".to_string());
    }
    qualifications
}

pub fn extract_experience(description: &str) -> Option<String> {
    let lower = description.to_lowercase();
    EXPERIENCE
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .map(|years| format!("{}+ years", years.as_str()))
}

fn work_type(detail: &JobDetail) -> &'static str {
    let mentions_remote = |text: &str| text.to_lowercase().contains("remote");
    if mentions_remote(&detail.location) || mentions_remote(&detail.description) {
        "Remote"
    } else {
        "Not specified"
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_board::detail::{parse_job_detail, DETAIL_FIXTURE};

    #[test]
    fn test_maps_fixture_detail() {
        let job = to_job_match(&parse_job_detail("42", DETAIL_FIXTURE)).unwrap();
        assert_eq!(job.job_title, "Senior Rust Engineer");
        assert_eq!(job.company, "Acme Corp");
        assert_eq!(job.work_type, "Remote");
        assert_eq!(job.required_experience.as_deref(), Some("5+ years"));
        assert_eq!(
            job.technologies,
            Some(vec!["Python".to_string(), "AWS".to_string(), "Docker".to_string()])
        );
        assert_eq!(job.required_qualifications, vec!["Bachelor's degree"]);
        assert_eq!(
            job.application_link.as_deref(),
            Some("https://jobs.example.com/apply/42")
        );
        assert!(job.salary_range.is_none());
    }

    #[test]
    fn test_defaulted_detail_is_skipped() {
        assert!(to_job_match(&JobDetail::empty("13")).is_none());
    }

    #[test]
    fn test_placeholder_title_is_skipped() {
        let detail = JobDetail {
            job_title: "N/A".to_string(),
            ..JobDetail::empty("14")
        };
        assert!(to_job_match(&detail).is_none());
    }

    #[test]
    fn test_experience_patterns() {
        assert_eq!(extract_experience("At least 3 years in Go").as_deref(), Some("3+ years"));
        assert_eq!(extract_experience("3-5 years of Python").as_deref(), Some("3+ years"));
        assert_eq!(extract_experience("2 to 4 years").as_deref(), Some("2+ years"));
        assert_eq!(extract_experience("10+ Years experience").as_deref(), Some("10+ years"));
        assert_eq!(extract_experience("1 year minimum").as_deref(), Some("1+ years"));
        assert!(extract_experience("no experience required").is_none());
    }

    #[test]
    fn test_technology_matching_is_case_insensitive() {
        assert_eq!(
            extract_technologies("We use REACT and node.js"),
            vec!["React".to_string(), "Node.js".to_string()]
        );
        assert!(extract_technologies("Rust only").is_empty());
    }

    #[test]
    fn test_missing_description_leaves_optionals_absent() {
        let detail = JobDetail {
            job_title: "Analyst".to_string(),
            location: "Paris".to_string(),
            ..JobDetail::empty("5")
        };
        let job = to_job_match(&detail).unwrap();
        assert_eq!(job.work_type, "Not specified");
        assert!(job.technologies.is_none());
        assert!(job.required_experience.is_none());
        assert!(job.job_description.is_none());
        assert!(job.application_link.is_none());
        assert!(job.required_qualifications.is_empty());
    }
}
