//! XSD Simple Type validators
//!
//! Atomic simple types: a built-in base, optionally restricted by
//! enumeration and pattern facets. A restriction of another named simple
//! type inherits its base and facets.

use crate::namespaces::QName;
use crate::validators::builtins::BuiltinType;
use crate::validators::facets::PatternFacet;

/// A simple type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleType {
    /// Type name (None for anonymous or built-in types)
    pub name: Option<QName>,
    /// Built-in primitive the type restricts
    pub base: BuiltinType,
    /// Allowed values; empty means unrestricted
    pub enumeration: Vec<String>,
    /// Pattern facets, one per restriction step; a value must match all
    pub patterns: Vec<PatternFacet>,
}

impl SimpleType {
    /// A built-in type used directly
    pub fn builtin(base: BuiltinType) -> Self {
        Self {
            name: None,
            base,
            enumeration: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// A restriction of a built-in type
    pub fn restriction(name: Option<QName>, base: BuiltinType) -> Self {
        Self {
            name,
            ..Self::builtin(base)
        }
    }

    /// A restriction of another simple type, inheriting its facets
    pub fn derived(name: Option<QName>, parent: &SimpleType) -> Self {
        Self {
            name,
            base: parent.base,
            enumeration: parent.enumeration.clone(),
            patterns: parent.patterns.clone(),
        }
    }

    /// Add an enumeration value
    pub fn with_enumeration(mut self, value: impl Into<String>) -> Self {
        self.enumeration.push(value.into());
        self
    }

    /// Add the pattern facet of a restriction step
    pub fn with_pattern(mut self, pattern: PatternFacet) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Display name for error messages
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.local_name.clone(),
            None => self.base.to_string(),
        }
    }

    /// Validate a lexical value
    pub fn validate_value(&self, value: &str) -> Result<(), String> {
        self.base.validate(value)?;

        let normalized = self.base.normalize(value);
        for pattern in &self.patterns {
            pattern
                .validate(&normalized)
                .map_err(|e| format!("{} in type '{}'", e, self.display_name()))?;
        }

        if self.enumeration.is_empty() {
            return Ok(());
        }

        if self.enumeration.iter().any(|allowed| {
            self.base.normalize(allowed) == normalized
        }) {
            Ok(())
        } else {
            Err(format!(
                "'{}' is not one of [{}] allowed by type '{}'",
                normalized,
                self.enumeration.join(", "),
                self.display_name()
            ))
        }
    }

    /// Whether two lexical values are equal under this type
    pub fn values_equal(&self, a: &str, b: &str) -> bool {
        self.base.normalize(a) == self.base.normalize(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::ORM_NAMESPACE;

    fn access_type() -> SimpleType {
        SimpleType::restriction(
            Some(QName::namespaced(ORM_NAMESPACE, "access-type")),
            BuiltinType::Token,
        )
        .with_enumeration("PROPERTY")
        .with_enumeration("FIELD")
    }

    #[test]
    fn test_enumeration() {
        let ty = access_type();
        assert!(ty.validate_value("FIELD").is_ok());
        assert!(ty.validate_value(" PROPERTY ").is_ok());

        let err = ty.validate_value("METHOD").unwrap_err();
        assert!(err.contains("access-type"));
        assert!(err.contains("PROPERTY, FIELD"));
    }

    #[test]
    fn test_builtin_passthrough() {
        let ty = SimpleType::builtin(BuiltinType::Int);
        assert!(ty.validate_value("50").is_ok());
        assert!(ty.validate_value("fifty").is_err());
        assert_eq!(ty.display_name(), "xsd:int");
    }

    #[test]
    fn test_derived_type_inherits_facets() {
        let temporal = SimpleType::derived(
            Some(QName::namespaced(ORM_NAMESPACE, "temporal")),
            &SimpleType::restriction(None, BuiltinType::Token)
                .with_enumeration("DATE")
                .with_enumeration("TIMESTAMP"),
        );
        assert!(temporal.validate_value("DATE").is_ok());
        assert!(temporal.validate_value("INSTANT").unwrap_err().contains("'temporal'"));
    }

    #[test]
    fn test_pattern_applies_to_normalized_value() {
        let version = SimpleType::restriction(
            Some(QName::namespaced(ORM_NAMESPACE, "versionType")),
            BuiltinType::Token,
        )
        .with_pattern(PatternFacet::new(&[r"[0-9]+(\.[0-9]+)*"]).unwrap());

        assert!(version.validate_value(" 2.0 ").is_ok());
        let err = version.validate_value("two").unwrap_err();
        assert!(err.contains("versionType"), "{}", err);
    }

    #[test]
    fn test_values_equal_uses_whitespace_facet() {
        let token = SimpleType::builtin(BuiltinType::Token);
        assert!(token.values_equal("2.0", " 2.0\n"));
        let string = SimpleType::builtin(BuiltinType::String);
        assert!(!string.values_equal("2.0", " 2.0"));
    }
}
