//! XML Schema validators
//!
//! A compact XSD compiler and validator covering the schema constructs the
//! mapping file dialects use: global elements, named and anonymous complex
//! types, `sequence`/`choice` groups, attributes and simple types restricted
//! by enumerations and patterns.

pub mod base;
pub mod builtins;
pub mod complex_types;
pub mod document_validation;
pub mod elements;
pub mod facets;
pub mod models;
pub mod parsing;
pub mod particles;
pub mod schemas;
pub mod simple_types;

// Re-exports
pub use base::ValidationMode;
pub use builtins::BuiltinType;
pub use complex_types::{AttributeDecl, AttributeUse, ComplexType};
pub use elements::{ElementDecl, TypeRef};
pub use facets::PatternFacet;
pub use models::{match_content, ContentMismatch};
pub use parsing::parse_schema;
pub use particles::{ModelType, Occurs, Particle};
pub use schemas::{ResolvedType, ValidationResult, XsdSchema};
pub use simple_types::SimpleType;
