//! Recovering a JSON object from untrusted model output.
//!
//! Model answers are treated as unstructured-adjacent: sometimes a bare JSON
//! object, often an object wrapped in prose or code fences, sometimes no JSON at
//! all. Strategies are tried in a fixed order and each either yields an object or
//! reports that it could not parse. Callers decide what "nothing parsed" means:
//! the job-match parser degrades, the scorer fails.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Greedy span from the first `{` to the last `}`, across lines.
static EMBEDDED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("embedded-object pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The whole answer is a JSON object.
    StrictJson,
    /// A JSON object is embedded in surrounding text.
    EmbeddedObject,
}

impl ParseStrategy {
    /// The order strategies are attempted in.
    pub const ORDER: [ParseStrategy; 2] =
        [ParseStrategy::StrictJson, ParseStrategy::EmbeddedObject];

    pub fn name(&self) -> &'static str {
        match self {
            Self::StrictJson => "strict_json",
            Self::EmbeddedObject => "embedded_object",
        }
    }

    /// Returns the parsed object, or `None` if this strategy cannot parse `raw`.
    pub fn attempt(&self, raw: &str) -> Option<Value> {
        let candidate = match self {
            Self::StrictJson => raw.trim(),
            Self::EmbeddedObject => EMBEDDED_OBJECT.find(raw)?.as_str(),
        };
        serde_json::from_str::<Value>(candidate)
            .ok()
            .filter(Value::is_object)
    }
}

/// Runs the strategies in order and stops at the first one that yields an object.
pub fn extract_json_object(raw: &str) -> Option<(ParseStrategy, Value)> {
    ParseStrategy::ORDER
        .iter()
        .find_map(|strategy| strategy.attempt(raw).map(|value| (*strategy, value)))
}

/// Truncates `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_for_diagnostic(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{kept}… [truncated {} chars]", total - max_chars)
}
