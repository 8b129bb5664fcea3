//! Validation modes
//!
//! How strictly a document is checked against its schema.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Validation mode for schema validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Strict validation - every violation rejects the document
    Strict,
    /// Lax validation - violations are reported as warnings
    Lax,
    /// Skip validation - no validation is performed
    #[default]
    Skip,
}

impl ValidationMode {
    /// Get the mode as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Lax => "lax",
            ValidationMode::Skip => "skip",
        }
    }

    /// Whether documents are checked at all
    pub fn is_validating(&self) -> bool {
        !matches!(self, ValidationMode::Skip)
    }
}

impl FromStr for ValidationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(ValidationMode::Strict),
            "lax" => Ok(ValidationMode::Lax),
            "skip" => Ok(ValidationMode::Skip),
            _ => Err(Error::UnsupportedOperation(format!(
                "Invalid validation mode: '{}'. Must be 'strict', 'lax', or 'skip'",
                s
            ))),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
