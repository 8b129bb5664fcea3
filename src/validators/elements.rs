//! XSD Element declarations
//!
//! Global and local element declarations and the type references they
//! carry. Named references are resolved against the schema when a document
//! is validated; `XsdSchema::build` guarantees they resolve.

use std::sync::Arc;

use crate::namespaces::QName;

use super::complex_types::ComplexType;
use super::particles::Occurs;
use super::simple_types::SimpleType;

/// Reference from a declaration to its type
#[derive(Debug, Clone)]
pub enum TypeRef {
    /// A named type defined in the schema
    Named(QName),
    /// An anonymous or built-in simple type
    Simple(Arc<SimpleType>),
    /// An anonymous complex type
    Complex(Arc<ComplexType>),
}

impl TypeRef {
    /// Name used in messages
    pub fn display_name(&self) -> String {
        match self {
            TypeRef::Named(name) => name.local_name.clone(),
            TypeRef::Simple(simple) => simple.display_name(),
            TypeRef::Complex(_) => "anonymous complex type".to_string(),
        }
    }
}

/// An element declaration
#[derive(Debug, Clone)]
pub struct ElementDecl {
    /// Qualified element name
    pub name: QName,
    /// Declared type
    pub type_ref: TypeRef,
    /// Occurrence bounds (always once for global declarations)
    pub occurs: Occurs,
}

impl ElementDecl {
    /// Create a declaration that occurs exactly once
    pub fn new(name: QName, type_ref: TypeRef) -> Self {
        Self {
            name,
            type_ref,
            occurs: Occurs::once(),
        }
    }

    /// Set occurrence bounds
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }
}
