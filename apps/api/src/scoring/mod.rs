//! Scorer / Validator: domain detection, five-component scoring, improvement advice.

pub mod handlers;
pub mod prompts;
pub mod validator;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::extraction::{extract, Document, ExtractionError};
use crate::llm_client::{LlmError, Message, ReasoningService};
use prompts::{
    ADVICE_PROMPT_TEMPLATE, DOMAIN_PROMPT_TEMPLATE, SCORE_PROMPT_TEMPLATE, SCORING_SYSTEM,
};
use validator::{parse_component_scores, ComponentScores, ADVICE_FOCUS_THRESHOLD};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Scoring service failed: {0}")]
    Service(#[from] LlmError),

    #[error("Score answer is not a JSON object: {preview}")]
    Unparseable { preview: String },

    #[error("Score answer is missing component '{0}'")]
    MissingComponent(String),

    #[error("Score for '{component}' is not a number: {value}")]
    NotNumeric { component: String, value: String },

    #[error("Score for '{component}' is out of range [0, 20]: {value}")]
    OutOfRange { component: String, value: f64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub components: ComponentScores,
    pub total: f64,
    pub advice: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeScoreReport {
    pub domain: String,
    pub total_score: f64,
    pub component_scores: ComponentScores,
    pub resume_text: String,
    pub improvement_advice: String,
}

/// Primary professional domain of the résumé, as the trimmed model answer.
pub async fn detect_domain(
    text: &str,
    llm: &dyn ReasoningService,
) -> Result<String, ScoringError> {
    let prompt = DOMAIN_PROMPT_TEMPLATE.replace("{resume_text}", text);
    let domain = llm
        .complete(SCORING_SYSTEM, &[Message::user(prompt)])
        .await?;
    Ok(domain.trim().to_string())
}

/// Scores the five fixed components, sums them, then asks for advice on the weak ones.
pub async fn calculate_score(
    text: &str,
    domain: &str,
    llm: &dyn ReasoningService,
) -> Result<ScoreReport, ScoringError> {
    let prompt = SCORE_PROMPT_TEMPLATE
        .replace("{domain}", domain)
        .replace("{resume_text}", text);
    let raw = llm
        .complete(SCORING_SYSTEM, &[Message::user(prompt)])
        .await?;

    let components = parse_component_scores(&raw)?;
    let total = components.total();
    info!("Resume scored {total} for domain '{domain}'");

    let advice = request_advice(text, domain, &components, llm).await?;

    Ok(ScoreReport {
        components,
        total,
        advice,
    })
}

async fn request_advice(
    text: &str,
    domain: &str,
    components: &ComponentScores,
    llm: &dyn ReasoningService,
) -> Result<String, ScoringError> {
    let weak = components.below(ADVICE_FOCUS_THRESHOLD);
    let weak = if weak.is_empty() {
        "none".to_string()
    } else {
        weak.join(", ")
    };
    let scores_json = serde_json::to_string_pretty(components).unwrap_or_default();

    let prompt = ADVICE_PROMPT_TEMPLATE
        .replace("{domain}", domain)
        .replace("{resume_text}", text)
        .replace("{component_scores}", &scores_json)
        .replace("{threshold}", &ADVICE_FOCUS_THRESHOLD.to_string())
        .replace("{weak_components}", &weak);

    let advice = llm
        .complete(SCORING_SYSTEM, &[Message::user(prompt)])
        .await?;
    Ok(advice.trim().to_string())
}

/// Extract, detect the domain, score.
pub async fn process_resume_score(
    document: &Document,
    llm: &dyn ReasoningService,
) -> Result<ResumeScoreReport, ScoringError> {
    let text = extract(document, llm).await?;
    let domain = detect_domain(text.as_str(), llm).await?;
    let report = calculate_score(text.as_str(), &domain, llm).await?;

    Ok(ResumeScoreReport {
        domain,
        total_score: report.total,
        component_scores: report.components,
        resume_text: text.into_string(),
        improvement_advice: report.advice,
    })
}
