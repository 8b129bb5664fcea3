//! XML namespace handling
//!
//! Qualified names, in-scope prefix mappings and the namespace URIs the
//! mapping dialects and their schemas use.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML Schema instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XML namespace, bound to the `xml` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// JPA ORM mapping namespace (shared by the 1.0 and 2.0 dialects)
pub const ORM_NAMESPACE: &str = "http://java.sun.com/xml/ns/persistence/orm";

/// EclipseLink ORM mapping namespace
pub const ECLIPSELINK_ORM_NAMESPACE: &str =
    "http://www.eclipse.org/eclipselink/xsds/persistence/orm";

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<String>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Check whether this name is in the given namespace
    pub fn is_in(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Prefix mappings in scope at one element
///
/// A child scope starts as a copy of its parent's and then applies its own
/// `xmlns` declarations, so every element owns a complete view.
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    prefixes: HashMap<String, String>,
    default_namespace: Option<String>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a child scope
    pub fn child(&self) -> Self {
        self.clone()
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace; an empty URI undeclares it
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        self.default_namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace)
        };
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Resolve an element name; unprefixed names take the default namespace
    pub fn resolve(&self, prefixed_name: &str) -> Result<QName> {
        match prefixed_name.split_once(':') {
            Some((prefix, local)) => self.resolve_prefixed(prefix, local),
            None => Ok(QName::new(self.default_namespace.clone(), prefixed_name)),
        }
    }

    /// Resolve an attribute name; unprefixed attributes are in no namespace
    pub fn resolve_attribute(&self, prefixed_name: &str) -> Result<QName> {
        match prefixed_name.split_once(':') {
            Some((prefix, local)) => self.resolve_prefixed(prefix, local),
            None => Ok(QName::local(prefixed_name)),
        }
    }

    fn resolve_prefixed(&self, prefix: &str, local: &str) -> Result<QName> {
        let namespace = self
            .get_namespace(prefix)
            .ok_or_else(|| Error::Namespace(format!("Unknown prefix: {}", prefix)))?;
        Ok(QName::namespaced(namespace, local))
    }
}
