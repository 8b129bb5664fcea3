//! XSD constraining facets
//!
//! Only `pattern` needs more than a list of values: XSD patterns are
//! implicitly anchored, so each one is compiled as `^(?:...)$`.

use std::fmt;

use regex::Regex;

use crate::error::{Error, ParseError, Result};

/// Pattern facet using regular expressions
///
/// Several `xsd:pattern` facets in one restriction step are alternatives;
/// they are compiled into a single expression.
#[derive(Debug, Clone)]
pub struct PatternFacet {
    /// Patterns as written in the schema
    pub patterns: Vec<String>,
    regex: Regex,
}

impl PatternFacet {
    /// Compile the patterns of one restriction step
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        let alternatives = patterns
            .iter()
            .map(|p| format!("(?:{})", p))
            .collect::<Vec<_>>()
            .join("|");

        let regex = Regex::new(&format!("^(?:{})$", alternatives)).map_err(|e| {
            Error::Parse(ParseError::new(format!(
                "Invalid pattern '{}': {}",
                patterns.join("' | '"),
                e
            )))
        })?;

        Ok(Self { patterns, regex })
    }

    /// Check a (whitespace-normalized) value
    pub fn validate(&self, value: &str) -> std::result::Result<(), String> {
        if self.regex.is_match(value) {
            Ok(())
        } else {
            Err(format!("'{}' does not match pattern {}", value, self))
        }
    }
}

impl PartialEq for PatternFacet {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
    }
}

impl Eq for PatternFacet {}

impl fmt::Display for PatternFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.patterns.join("' | '"))
    }
}
