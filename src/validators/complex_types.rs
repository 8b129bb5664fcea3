//! XSD Complex Type definitions
//!
//! Complex types here have element-only or empty content and a set of
//! unqualified attribute declarations.

use indexmap::IndexMap;

use crate::namespaces::QName;

use super::elements::{ElementDecl, TypeRef};
use super::particles::Particle;

/// How an attribute may appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeUse {
    /// May be omitted
    #[default]
    Optional,
    /// Must be present
    Required,
}

/// An attribute declaration local to a complex type
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    /// Local name (attributes are unqualified)
    pub name: String,
    /// Simple type of the value
    pub type_ref: TypeRef,
    /// Whether the attribute is required
    pub use_: AttributeUse,
    /// Value the attribute must have when present
    pub fixed: Option<String>,
    /// Value assumed when absent
    pub default: Option<String>,
}

impl AttributeDecl {
    /// Check if the attribute is required
    pub fn is_required(&self) -> bool {
        self.use_ == AttributeUse::Required
    }
}

/// A complex type definition
#[derive(Debug, Clone, Default)]
pub struct ComplexType {
    /// Type name (None for anonymous types)
    pub name: Option<QName>,
    /// Element content model; None means empty content
    pub content: Option<Particle>,
    /// Attribute declarations by local name
    pub attributes: IndexMap<String, AttributeDecl>,
}

impl ComplexType {
    /// Create an empty complex type
    pub fn new(name: Option<QName>) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Display name for error messages
    pub fn display_name(&self) -> String {
        self.name
            .as_ref()
            .map(|n| n.local_name.clone())
            .unwrap_or_else(|| "anonymous".to_string())
    }

    /// Whether the type allows no children and no text
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// Find the declaration of a child element
    pub fn element_decl(&self, name: &QName) -> Option<&ElementDecl> {
        self.content.as_ref().and_then(|p| p.find_element(name))
    }

    /// Look up an attribute declaration
    pub fn attribute(&self, name: &str) -> Option<&AttributeDecl> {
        self.attributes.get(name)
    }

    /// Iterate over required attribute declarations
    pub fn required_attributes(&self) -> impl Iterator<Item = &AttributeDecl> {
        self.attributes.values().filter(|a| a.is_required())
    }
}
