//! Error types for ormxml
//!
//! This module defines all error types used throughout the library.
//! Errors raised while one schema variant is being tried are recoverable
//! inside the reader; everything else terminates a read.

use std::fmt;
use thiserror::Error;

use crate::reader::VariantId;

/// Result type alias using the ormxml Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ormxml operations
#[derive(Error, Debug)]
pub enum Error {
    /// Document failed schema validation
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Schema could not be parsed or built
    #[error("schema error: {0}")]
    Parse(#[from] ParseError),

    /// Validated document could not be bound to the mapping model
    #[error("binding error: {0}")]
    Binding(String),

    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(String),

    /// Resource could not be located or opened
    #[error("resource error: {0}")]
    Resource(String),

    /// The stream cannot be read with the required text encoding
    #[error("cannot read '{location}' as UTF-8: {reason}")]
    Encoding {
        /// Location of the offending resource
        location: String,
        /// What was detected
        reason: String,
    },

    /// Every known schema variant rejected the mapping file
    #[error("error parsing mapping file '{location}' (last attempt: {variant}): {source}")]
    MappingFile {
        /// Location of the mapping file
        location: String,
        /// Variant of the last attempt
        variant: VariantId,
        /// Cause reported by the last attempt
        #[source]
        source: Box<Error>,
    },

    /// A stream could not be closed after use
    #[error("file error while closing '{location}': {source}")]
    FileClose {
        /// Location of the resource
        location: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The operation is not supported by this component
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Whether the reader may move on to the next schema variant after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::Parse(_)
                | Error::Binding(_)
                | Error::Xml(_)
                | Error::Io(_)
                | Error::LimitExceeded(_)
                | Error::Namespace(_)
                | Error::UnsupportedOperation(_)
        )
    }
}

/// Document validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Path to the element that failed validation
    pub path: Option<String>,
    /// Detailed reasons, one per violation
    pub reasons: Vec<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            reasons: Vec::new(),
        }
    }

    /// Set the path where validation failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    /// Add several reasons
    pub fn with_reasons(mut self, reasons: impl IntoIterator<Item = String>) -> Self {
        self.reasons.extend(reasons);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref path) = self.path {
            write!(f, " at {}", path)?;
        }

        for reason in &self.reasons {
            write!(f, "\n  - {}", reason)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Schema parsing error
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Resource path of the schema
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, " (in {})", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("Element 'entity' is not valid")
            .with_path("/entity-mappings/entity[1]")
            .with_reason("missing required attribute 'class'");

        let msg = format!("{}", err);
        assert!(msg.contains("Element 'entity' is not valid"));
        assert!(msg.contains("/entity-mappings/entity[1]"));
        assert!(msg.contains("missing required attribute 'class'"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("unsupported XSD construct 'xsd:import'")
            .with_location("xsd/orm_2_0.xsd");

        let msg = format!("{}", err);
        assert!(msg.contains("xsd:import"));
        assert!(msg.contains("xsd/orm_2_0.xsd"));
    }

    #[test]
    fn test_error_conversion() {
        let val_err = ValidationError::new("test");
        let err: Error = val_err.into();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_fatal_errors_are_not_recoverable() {
        let err = Error::Encoding {
            location: "file:///orm.xml".to_string(),
            reason: "UTF-16 byte order mark".to_string(),
        };
        assert!(!err.is_recoverable());
        assert!(!Error::Resource("missing".to_string()).is_recoverable());
    }

    #[test]
    fn test_mapping_file_error_keeps_cause() {
        let err = Error::MappingFile {
            location: "file:///orm.xml".to_string(),
            variant: VariantId::EclipseLink1_1,
            source: Box::new(Error::Xml("unexpected end of document".to_string())),
        };

        let msg = err.to_string();
        assert!(msg.contains("file:///orm.xml"));
        assert!(msg.contains("unexpected end of document"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
