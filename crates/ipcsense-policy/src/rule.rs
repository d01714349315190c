//! Override rule and rule table definitions

use ipcsense_core::SectionCode;
use serde::{Deserialize, Serialize};

use crate::Trigger;

/// An ordered table of override rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTable {
    /// Table name
    pub name: String,

    /// Description of what this table enforces
    #[serde(default)]
    pub description: String,

    /// Version of the table
    #[serde(default)]
    pub version: String,

    /// Rules in priority order; the first matching rule wins
    pub rules: Vec<OverrideRule>,
}

impl RuleTable {
    /// Load a rule table from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a rule table from a file
    pub fn from_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }

    /// The built-in IPC override table.
    ///
    /// Self-defense is checked before every crime-type rule so that a death
    /// caused while defending oneself is not reported as murder just because
    /// a kill-verb is present. Reordering these rules changes outcomes.
    pub fn ipc_default() -> Self {
        let kill_verb = || Trigger::text_contains(&["kill", "killed"]);

        Self {
            name: "ipc-overrides".to_string(),
            description: "Keyword overrides for Indian Penal Code sections".to_string(),
            version: "1.0".to_string(),
            rules: vec![
                OverrideRule::new(
                    "self-defense",
                    "Right of private defense of the body extending to causing death",
                    "100",
                    Trigger::any(vec![
                        Trigger::text_contains(&["self defense", "self-defense"]),
                        Trigger::all(vec![
                            kill_verb(),
                            Trigger::text_contains(&["in defense", "defending"]),
                        ]),
                    ]),
                ),
                // Rule 1 has already excluded explicit self-defense, but the
                // exclusion is kept so the rule reads the same in isolation.
                // A non-fatal attempt ("tried to kill") still lands here.
                OverrideRule::new(
                    "murder",
                    "Murder",
                    "302",
                    Trigger::any(vec![
                        Trigger::crime_type_contains(&["murder"]),
                        Trigger::all(vec![
                            Trigger::text_contains(&["kill"]),
                            Trigger::not(Trigger::text_contains(&["self defense"])),
                        ]),
                    ]),
                ),
                OverrideRule::new(
                    "robbery",
                    "Robbery",
                    "392",
                    Trigger::any(vec![
                        Trigger::crime_type_contains(&["robbery"]),
                        Trigger::text_contains(&["robbery"]),
                    ]),
                ),
                OverrideRule::new(
                    "theft",
                    "Theft",
                    "379",
                    Trigger::any(vec![
                        Trigger::crime_type_contains(&["theft"]),
                        Trigger::text_contains(&["stole"]),
                    ]),
                ),
                OverrideRule::new(
                    "assault",
                    "Voluntarily causing hurt",
                    "323",
                    Trigger::any(vec![
                        Trigger::crime_type_contains(&["assault"]),
                        Trigger::text_contains(&["hurt"]),
                    ]),
                ),
                OverrideRule::new(
                    "minimum-wage",
                    "Non-payment of minimum wage treated as cheating",
                    "420",
                    Trigger::any(vec![
                        Trigger::text_contains(&["minimum wage"]),
                        Trigger::all(vec![
                            Trigger::text_contains(&["employer"]),
                            Trigger::text_contains(&["wage"]),
                        ]),
                    ]),
                ),
            ],
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::ipc_default()
    }
}

/// A single override rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideRule {
    /// Rule identifier
    pub name: String,

    /// Description of what this rule detects
    #[serde(default)]
    pub description: String,

    /// Section forced when the rule fires
    pub section: SectionCode,

    /// Trigger condition
    pub trigger: Trigger,

    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl OverrideRule {
    /// Create an enabled rule
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        section: impl Into<SectionCode>,
        trigger: Trigger,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            section: section.into(),
            trigger,
            enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}
