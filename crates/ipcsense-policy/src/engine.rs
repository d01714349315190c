//! Override evaluation engine

use ipcsense_core::{Error, Result, SectionCode};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::{MatchContext, OverrideRule, RuleTable};

/// First-match-wins evaluation of an override rule table.
///
/// The engine holds a compiled copy of the table: needles are normalized
/// once at construction and the table is read-only afterwards, so a single
/// engine can be shared across requests.
#[derive(Debug, Clone)]
pub struct OverrideEngine {
    table_name: String,
    rules: Vec<OverrideRule>,
}

/// Outcome of the override policy for one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Section reported to the caller
    pub section: SectionCode,

    /// Whether a rule replaced the statistical section
    pub is_override: bool,

    /// Name of the rule that fired, if any
    pub rule: Option<String>,
}

impl OverrideEngine {
    /// Compile and validate a rule table
    pub fn new(table: RuleTable) -> Result<Self> {
        let mut names = HashSet::new();
        let mut rules = Vec::with_capacity(table.rules.len());

        for rule in table.rules {
            if rule.name.trim().is_empty() {
                return Err(Error::policy("rule with empty name"));
            }
            if !names.insert(rule.name.clone()) {
                return Err(Error::policy(format!("duplicate rule '{}'", rule.name)));
            }
            if rule.section.is_empty() {
                return Err(Error::policy(format!("rule '{}' has no section", rule.name)));
            }

            let trigger = rule
                .trigger
                .compile()
                .map_err(|e| Error::policy(format!("rule '{}': {}", rule.name, e)))?;

            rules.push(OverrideRule { trigger, ..rule });
        }

        Ok(Self {
            table_name: table.name,
            rules,
        })
    }

    /// Engine over the built-in IPC table
    pub fn ipc_default() -> Result<Self> {
        Self::new(RuleTable::ipc_default())
    }

    /// Load a rule table from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let table = RuleTable::from_file(path)
            .map_err(|e| Error::policy(format!("Failed to load rule table: {}", e)))?;
        Self::new(table)
    }

    /// Name of the loaded table
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Compiled rules in priority order
    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// The first enabled rule that fires for the case, if any
    pub fn evaluate(&self, description: &str, crime_type: Option<&str>) -> Option<&OverrideRule> {
        let ctx = MatchContext::new(description, crime_type);
        self.first_match(&ctx)
    }

    /// Combine the statistical section with the override rules
    pub fn decide(
        &self,
        description: &str,
        crime_type: Option<&str>,
        statistical: &SectionCode,
    ) -> Decision {
        match self.evaluate(description, crime_type) {
            Some(rule) => {
                debug!(
                    "Override rule '{}' replaced section {} with {}",
                    rule.name, statistical, rule.section
                );
                Decision {
                    section: rule.section.clone(),
                    is_override: true,
                    rule: Some(rule.name.clone()),
                }
            }
            None => Decision {
                section: statistical.clone(),
                is_override: false,
                rule: None,
            },
        }
    }

    fn first_match(&self, ctx: &MatchContext) -> Option<&OverrideRule> {
        self.rules
            .iter()
            .find(|rule| rule.enabled && rule.trigger.matches(ctx))
    }
}
