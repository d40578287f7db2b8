//! Job detail page parsing. Each field is located independently; a missing
//! element leaves that field empty and never fails the page.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

const TITLE: &str = "h2.top-card-layout__title";
const LOCATION: &str = "span.topcard__flavor.topcard__flavor--bullet";
const COMPANY: &str = "a.topcard__org-name-link";
const TIME_POSTED: &str = "span.posted-time-ago__text";
const NUM_APPLICANTS: &str = "span.num-applicants__caption";
const DESCRIPTION: &str = "div.decorated-job-posting__details";
const APPLY_LINK: &str = "a.topcard__link";

/// Raw detail record for one job id. Empty strings mean "not found on the page".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobDetail {
    pub job_id: String,
    pub job_title: String,
    pub location: String,
    pub company: String,
    pub time_posted: String,
    pub num_applicants: String,
    pub description: String,
    pub apply_link: String,
}

impl JobDetail {
    /// The defaulted record used when a fetch fails: id kept, every field empty.
    pub fn empty(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }
}

pub fn parse_job_detail(job_id: &str, html: &str) -> JobDetail {
    let document = Html::parse_document(html);

    JobDetail {
        job_id: job_id.to_string(),
        job_title: first_element(&document, TITLE)
            .map(|e| inline_text(&e))
            .unwrap_or_default(),
        location: first_element(&document, LOCATION)
            .map(|e| inline_text(&e))
            .unwrap_or_default(),
        company: first_element(&document, COMPANY)
            .map(|e| inline_text(&e))
            .unwrap_or_default(),
        time_posted: first_element(&document, TIME_POSTED)
            .map(|e| inline_text(&e))
            .unwrap_or_default(),
        num_applicants: first_element(&document, NUM_APPLICANTS)
            .map(|e| inline_text(&e))
            .unwrap_or_default(),
        description: first_element(&document, DESCRIPTION)
            .map(|e| block_text(&e))
            .unwrap_or_default(),
        apply_link: first_element(&document, APPLY_LINK)
            .and_then(|e| e.value().attr("href"))
            .map(|href| href.trim().to_string())
            .unwrap_or_default(),
    }
}

fn first_element<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// All text collapsed onto one line.
fn inline_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text with line structure kept and blank lines dropped.
fn block_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
pub(crate) const DETAIL_FIXTURE: &str = r#"
<html><body>
  <section class="top-card-layout">
    <h2 class="top-card-layout__title font-sans text-lg papabear:text-xl font-bold leading-open text-color-text mb-0 topcard__title">
      Senior Rust Engineer
    </h2>
    <a class="topcard__org-name-link topcard__flavor--black-link" href="https://example.com/acme">
      Acme Corp
    </a>
    <span class="topcard__flavor topcard__flavor--bullet">
      Berlin, Germany (Remote)
    </span>
    <span class="posted-time-ago__text topcard__flavor--metadata">2 days ago</span>
    <span class="num-applicants__caption topcard__flavor--metadata topcard__flavor--bullet">
      Over 200 applicants
    </span>
    <a class="topcard__link" href="https://jobs.example.com/apply/42">Apply</a>
  </section>
  <div class="decorated-job-posting__details">
    <p>We build payment infrastructure in Rust and Python.</p>
    <ul>
      <li>5+ years of backend experience</li>
      <li>Bachelor's degree in CS or equivalent</li>
      <li>Experience with Docker and AWS</li>
    </ul>
  </div>
</body></html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_field() {
        let detail = parse_job_detail("42", DETAIL_FIXTURE);
        assert_eq!(detail.job_id, "42");
        assert_eq!(detail.job_title, "Senior Rust Engineer");
        assert_eq!(detail.company, "Acme Corp");
        assert_eq!(detail.location, "Berlin, Germany (Remote)");
        assert_eq!(detail.time_posted, "2 days ago");
        assert_eq!(detail.num_applicants, "Over 200 applicants");
        assert_eq!(detail.apply_link, "https://jobs.example.com/apply/42");
        assert!(detail
            .description
            .starts_with("We build payment infrastructure in Rust and Python.\n"));
        assert!(detail.description.contains("5+ years of backend experience"));
    }

    #[test]
    fn test_missing_fields_are_empty_individually() {
        let html = r#"<h2 class="top-card-layout__title">Data Engineer</h2>"#;
        let detail = parse_job_detail("7", html);
        assert_eq!(detail.job_title, "Data Engineer");
        assert_eq!(detail.company, "");
        assert_eq!(detail.location, "");
        assert_eq!(detail.description, "");
        assert_eq!(detail.apply_link, "");
    }

    #[test]
    fn test_location_selector_ignores_applicant_caption() {
        let html = r#"<span class="num-applicants__caption topcard__flavor--metadata topcard__flavor--bullet">Be among the first 25</span>"#;
        let detail = parse_job_detail("1", html);
        assert_eq!(detail.location, "");
        assert_eq!(detail.num_applicants, "Be among the first 25");
    }

    #[test]
    fn test_garbage_page_yields_empty_record() {
        assert_eq!(parse_job_detail("9", "not html at all"), JobDetail::empty("9"));
    }
}
