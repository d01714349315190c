//! ipcsense Core
//!
//! Core types, traits, and utilities shared across ipcsense components.
//!
//! This crate provides:
//! - Section codes, statistical predictions, and analysis result shapes
//! - Error types and result handling
//! - Text normalization and extraction of the upstream form fields
//!   (`Case Description:` and `Crime Type:`)

pub mod error;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use text::{extract_case_description, extract_crime_type, normalize};
pub use types::{
    AnalysisDebug, AnalysisFailure, AnalysisOutcome, AnalysisResult, SectionCode,
    SectionPrediction,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::text::{extract_case_description, extract_crime_type, normalize};
    pub use crate::types::{AnalysisOutcome, AnalysisResult, SectionCode, SectionPrediction};
}
