//! Error types for the benefits eligibility engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading the program catalog,
//! validating applicant profiles, evaluating eligibility and storing results.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level problem found while validating an applicant profile.
///
/// # Example
///
/// ```
/// use benefits_engine::error::FieldViolation;
///
/// let violation = FieldViolation::new("age", "must be between 16 and 100");
/// assert_eq!(violation.to_string(), "age: must be between 16 and 100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// The name of the offending field, as it appears on the wire.
    pub field: String,
    /// What is wrong with the supplied value.
    pub message: String,
}

impl FieldViolation {
    /// Creates a new field violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type for the benefits eligibility engine.
///
/// # Example
///
/// ```
/// use benefits_engine::error::EngineError;
///
/// let error = EngineError::CatalogUnavailable {
///     message: "connection refused".to_string(),
/// };
/// assert_eq!(error.to_string(), "Program catalog unavailable: connection refused");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The applicant profile failed validation. Every offending field is listed.
    #[error("Invalid applicant profile: {}", join_violations(.violations))]
    Validation {
        /// The fields that failed validation.
        violations: Vec<FieldViolation>,
    },

    /// The program catalog could not be fetched.
    #[error("Program catalog unavailable: {message}")]
    CatalogUnavailable {
        /// A description of why the catalog could not be read.
        message: String,
    },

    /// The eligibility check store failed.
    #[error("Eligibility check store error: {message}")]
    Store {
        /// A description of the storage failure.
        message: String,
    },

    /// Configuration or catalog file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration or catalog file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A program definition in the catalog is inconsistent.
    #[error("Invalid program '{program_id}': {message}")]
    InvalidProgram {
        /// The ID of the offending program.
        program_id: String,
        /// A description of what made the program invalid.
        message: String,
    },

    /// The matched benefit amounts cannot be summed at cent precision.
    #[error("Benefit total overflows across {programs} matched programs")]
    BenefitTotalOverflow {
        /// How many programs were being summed.
        programs: usize,
    },

    /// A stored record does not exist for the requesting owner.
    #[error("{resource} '{id}' not found")]
    NotFound {
        /// The kind of record that was looked up.
        resource: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// The write would break a uniqueness rule.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting record.
        message: String,
    },

    /// A runtime setting could not be parsed.
    #[error("Invalid setting '{name}': {message}")]
    InvalidSetting {
        /// The environment variable name.
        name: String,
        /// A description of the problem.
        message: String,
    },

    /// An I/O operation outside catalog loading failed (e.g. binding a socket).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Returns the field violations for a validation error, or an empty slice.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            EngineError::Validation { violations } => violations,
            _ => &[],
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
