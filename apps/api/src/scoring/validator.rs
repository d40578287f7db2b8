//! Component score parsing and validation.
//!
//! The score answer goes through the same strict-then-embedded strategy chain as
//! job matches, but there is no degraded fallback: a total cannot be computed
//! from nothing, so every failure is a `ScoringError`. Values are never clamped.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

use crate::scoring::ScoringError;
use crate::structured_output::{extract_json_object, truncate_for_diagnostic};

pub const COMPONENTS: [&str; 5] = [
    "Professional Experience",
    "Skills & Technologies",
    "Education & Certifications",
    "Resume Format",
    "Overall Impact",
];

pub const MAX_COMPONENT_SCORE: f64 = 20.0;

/// Components scoring below this are emphasised in the advice request.
pub const ADVICE_FOCUS_THRESHOLD: f64 = 15.0;

/// Validated scores in `COMPONENTS` order. Serializes as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentScores(Vec<(&'static str, f64)>);

impl ComponentScores {
    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, score)| score).sum()
    }

    #[cfg(test)]
    pub fn get(&self, component: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| *name == component)
            .map(|(_, score)| *score)
    }

    pub fn below(&self, threshold: f64) -> Vec<&'static str> {
        self.0
            .iter()
            .filter(|(_, score)| *score < threshold)
            .map(|(name, _)| *name)
            .collect()
    }
}

impl Serialize for ComponentScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, score) in &self.0 {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

pub fn parse_component_scores(raw: &str) -> Result<ComponentScores, ScoringError> {
    let unparseable = || ScoringError::Unparseable {
        preview: truncate_for_diagnostic(raw, 200),
    };
    let (strategy, value) = extract_json_object(raw).ok_or_else(unparseable)?;
    let object = value.as_object().ok_or_else(unparseable)?;
    debug!("Parsed score object via {}", strategy.name());

    let extra: Vec<&String> = object
        .keys()
        .filter(|key| !COMPONENTS.contains(&key.as_str()))
        .collect();
    if !extra.is_empty() {
        warn!("Ignoring unexpected score keys: {extra:?}");
    }

    let scores = COMPONENTS
        .iter()
        .map(|&component| {
            let value = object
                .get(component)
                .ok_or_else(|| ScoringError::MissingComponent(component.to_string()))?;
            let score = value.as_f64().ok_or_else(|| ScoringError::NotNumeric {
                component: component.to_string(),
                value: value.to_string(),
            })?;
            if !(0.0..=MAX_COMPONENT_SCORE).contains(&score) {
                return Err(ScoringError::OutOfRange {
                    component: component.to_string(),
                    value: score,
                });
            }
            Ok((component, score))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ComponentScores(scores))
}
