//! ipcsense LLM
//!
//! Client for a locally hosted text-generation server speaking the
//! `/api/generate` protocol, plus prompt construction and best-effort parsing
//! of free-form answers into a section prediction.

pub mod client;
pub mod prompt;

pub use client::{describe_failure, LlmClient, LlmConfig, LlmError, NO_RESPONSE};
pub use prompt::{parse_llm_prediction, CaseReport, LlmPrediction};
