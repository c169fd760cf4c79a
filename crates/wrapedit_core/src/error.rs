//! Error types for invariant checks and configuration parsing.
//!
//! Nothing in the edit path is fatal: callers on the frame path log these and
//! keep going.
use thiserror::Error;

/// Diagnostic conditions raised by the wrapedit engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Reserved pivot codepoint arrived outside the entry filter at char {offset}")]
    ReservedCodepoint { offset: usize },

    #[error("Pivot marker survived normalization at char {offset}")]
    PivotSurvived { offset: usize },

    #[error("Line feed without carriage return after normalization at char {offset}")]
    BareLineFeed { offset: usize },

    #[error("Invalid extent '{value}': expected a positive number of points or -1")]
    InvalidExtent { value: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidSetting { key: String, value: String },
}
