//! ipcsense Policy
//!
//! Deterministic layer applied on top of the statistical classifier.
//!
//! - An ordered table of keyword override rules, evaluated first-match-wins,
//!   that can replace the classifier's section (self-defense before murder,
//!   then robbery, theft, assault, and minimum-wage cases)
//! - Confidence bands that select a recommendation template
//! - A static explanation table keyed by section
//!
//! Rule tables are plain data and can be loaded from YAML.

pub mod engine;
pub mod explanation;
pub mod recommendation;
pub mod rule;
pub mod trigger;

pub use engine::{Decision, OverrideEngine};
pub use explanation::{explain, IpcSection};
pub use recommendation::ConfidenceBand;
pub use rule::{OverrideRule, RuleTable};
pub use trigger::{CompositeOperator, MatchContext, Trigger};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::{Decision, OverrideEngine};
    pub use crate::explanation::explain;
    pub use crate::recommendation::ConfidenceBand;
    pub use crate::rule::{OverrideRule, RuleTable};
    pub use crate::trigger::Trigger;
}
