//! Profile Analyzer: summarises extracted résumé text into a narrative the search
//! prompt is seeded with. The answer is opaque text and is not validated.

use serde::Serialize;
use tracing::info;

use crate::extraction::ExtractedText;
use crate::llm_client::{LlmError, Message, ReasoningService};
use crate::matching::prompts::{PROFILE_ANALYSIS_PROMPT_TEMPLATE, PROFILE_ANALYSIS_SYSTEM};

/// Free-form candidate summary (skills, experience, role, industry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileAnalysis(String);

impl ProfileAnalysis {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub async fn analyze_profile(
    text: &ExtractedText,
    llm: &dyn ReasoningService,
) -> Result<ProfileAnalysis, LlmError> {
    let prompt = PROFILE_ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", text.as_str());
    let analysis = llm
        .complete(PROFILE_ANALYSIS_SYSTEM, &[Message::user(prompt)])
        .await?;

    info!("Profile analysis produced {} chars", analysis.len());
    Ok(ProfileAnalysis::new(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::scripted::ScriptedReasoner;

    fn extracted(text: &str) -> ExtractedText {
        ExtractedText::new(text.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_analysis_is_returned_verbatim() {
        let text = extracted("Jane Doe, 7 years of Rust");
        let llm = ScriptedReasoner::new(["Summary: senior systems engineer.\nSkills: Rust"]);
        let analysis = analyze_profile(&text, &llm).await.unwrap();
        assert_eq!(
            analysis.as_str(),
            "Summary: senior systems engineer.\nSkills: Rust"
        );
    }

    #[tokio::test]
    async fn test_prompt_embeds_resume_text() {
        let text = extracted("Jane Doe, 7 years of Rust");
        let llm = ScriptedReasoner::new(["ok"]);
        analyze_profile(&text, &llm).await.unwrap();
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Jane Doe, 7 years of Rust"));
        assert!(prompt.contains("Industry focus"));
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let text = extracted("Jane Doe");
        let llm = ScriptedReasoner::failing();
        assert!(analyze_profile(&text, &llm).await.is_err());
    }
}
