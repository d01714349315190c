//! Override trigger definitions

use ipcsense_core::{normalize, Error, Result};
use serde::{Deserialize, Serialize};

/// Trigger condition for an override rule.
///
/// All tests are case-insensitive substring tests. Text needles are compared
/// against the normalized case description, crime-type needles against the
/// lowercased `Crime Type:` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Description contains any of the phrases
    TextContains {
        /// Phrases to look for
        any: Vec<String>,
    },

    /// Crime-type field contains any of the phrases
    CrimeTypeContains {
        /// Phrases to look for
        any: Vec<String>,
    },

    /// Negation of a sub-trigger
    Not {
        /// Trigger to negate
        trigger: Box<Trigger>,
    },

    /// Composite trigger (AND/OR logic)
    Composite {
        /// Logic operator
        operator: CompositeOperator,

        /// Sub-triggers
        triggers: Vec<Trigger>,
    },
}

/// Operator for composite triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeOperator {
    And,
    Or,
}

/// Inputs a trigger is evaluated against
#[derive(Debug, Clone)]
pub struct MatchContext {
    text: String,
    crime_type: String,
}

impl MatchContext {
    /// Build a context from a case description and optional crime-type field
    pub fn new(description: &str, crime_type: Option<&str>) -> Self {
        Self {
            text: normalize(description),
            crime_type: crime_type.map(str::to_lowercase).unwrap_or_default(),
        }
    }

    /// Normalized description
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercased crime type (empty when absent)
    pub fn crime_type(&self) -> &str {
        &self.crime_type
    }
}

impl Trigger {
    /// Trigger on any of the given description phrases
    pub fn text_contains(phrases: &[&str]) -> Self {
        Self::TextContains {
            any: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Trigger on any of the given crime-type phrases
    pub fn crime_type_contains(phrases: &[&str]) -> Self {
        Self::CrimeTypeContains {
            any: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Negate a trigger
    pub fn not(trigger: Trigger) -> Self {
        Self::Not {
            trigger: Box::new(trigger),
        }
    }

    /// All sub-triggers must fire
    pub fn all(triggers: Vec<Trigger>) -> Self {
        Self::Composite {
            operator: CompositeOperator::And,
            triggers,
        }
    }

    /// At least one sub-trigger must fire
    pub fn any(triggers: Vec<Trigger>) -> Self {
        Self::Composite {
            operator: CompositeOperator::Or,
            triggers,
        }
    }

    /// Evaluate the trigger
    pub fn matches(&self, ctx: &MatchContext) -> bool {
        match self {
            Self::TextContains { any } => any.iter().any(|p| ctx.text.contains(p.as_str())),
            Self::CrimeTypeContains { any } => {
                any.iter().any(|p| ctx.crime_type.contains(p.as_str()))
            }
            Self::Not { trigger } => !trigger.matches(ctx),
            Self::Composite {
                operator: CompositeOperator::And,
                triggers,
            } => triggers.iter().all(|t| t.matches(ctx)),
            Self::Composite {
                operator: CompositeOperator::Or,
                triggers,
            } => triggers.iter().any(|t| t.matches(ctx)),
        }
    }

    /// Bring needles into the form `matches` compares against.
    ///
    /// Text phrases are normalized (so `"self-defense"` becomes
    /// `"self defense"`), crime-type phrases are trimmed and lowercased.
    /// Needles that end up empty and composites without sub-triggers are
    /// rejected, since they would fire on every input.
    pub fn compile(&self) -> Result<Self> {
        match self {
            Self::TextContains { any } => Ok(Self::TextContains {
                any: compile_phrases(any, normalize)?,
            }),
            Self::CrimeTypeContains { any } => Ok(Self::CrimeTypeContains {
                any: compile_phrases(any, |p| p.trim().to_lowercase())?,
            }),
            Self::Not { trigger } => Ok(Self::not(trigger.compile()?)),
            Self::Composite { operator, triggers } => {
                if triggers.is_empty() {
                    return Err(Error::policy("composite trigger has no sub-triggers"));
                }
                Ok(Self::Composite {
                    operator: *operator,
                    triggers: triggers
                        .iter()
                        .map(Trigger::compile)
                        .collect::<Result<Vec<_>>>()?,
                })
            }
        }
    }
}

fn compile_phrases(phrases: &[String], prepare: impl Fn(&str) -> String) -> Result<Vec<String>> {
    if phrases.is_empty() {
        return Err(Error::policy("trigger has no phrases"));
    }

    let mut compiled: Vec<String> = Vec::with_capacity(phrases.len());
    for phrase in phrases {
        let prepared = prepare(phrase);
        if prepared.is_empty() {
            return Err(Error::policy(format!(
                "phrase '{}' is empty after normalization",
                phrase
            )));
        }
        if !compiled.contains(&prepared) {
            compiled.push(prepared);
        }
    }

    Ok(compiled)
}
