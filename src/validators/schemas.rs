//! XML Schema validators
//!
//! A compiled schema holds the global element declarations and named types
//! of one target namespace, and is the entry point for validating documents.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::complex_types::ComplexType;
use super::document_validation::validate_document;
use super::elements::{ElementDecl, TypeRef};
use super::simple_types::SimpleType;

use crate::documents::Document;
use crate::error::{Error, ParseError, Result, ValidationError};
use crate::namespaces::QName;

/// A type reference resolved against the schema
#[derive(Debug, Clone, Copy)]
pub enum ResolvedType<'a> {
    /// Simple type (text-only content)
    Simple(&'a SimpleType),
    /// Complex type (attributes and element content)
    Complex(&'a ComplexType),
}

/// A compiled XSD schema
#[derive(Debug, Clone, Default)]
pub struct XsdSchema {
    /// Target namespace of the schema
    pub target_namespace: Option<String>,
    /// Whether local elements are namespace qualified
    pub element_form_qualified: bool,
    /// Global element declarations
    pub elements: IndexMap<QName, ElementDecl>,
    /// Named complex types
    pub complex_types: IndexMap<QName, Arc<ComplexType>>,
    /// Named simple types
    pub simple_types: IndexMap<QName, Arc<SimpleType>>,
    /// Where the schema was loaded from, if known
    pub source: Option<String>,
}

impl XsdSchema {
    /// Create an empty schema for a target namespace
    pub fn new(target_namespace: Option<String>) -> Self {
        Self {
            target_namespace,
            ..Self::default()
        }
    }

    /// Look up a global element declaration
    pub fn lookup_element(&self, name: &QName) -> Option<&ElementDecl> {
        self.elements.get(name)
    }

    /// Look up a named complex type
    pub fn lookup_complex_type(&self, name: &QName) -> Option<&ComplexType> {
        self.complex_types.get(name).map(|t| t.as_ref())
    }

    /// Look up a named simple type
    pub fn lookup_simple_type(&self, name: &QName) -> Option<&SimpleType> {
        self.simple_types.get(name).map(|t| t.as_ref())
    }

    /// Resolve a type reference
    pub fn resolve<'a>(&'a self, type_ref: &'a TypeRef) -> Option<ResolvedType<'a>> {
        match type_ref {
            TypeRef::Simple(simple) => Some(ResolvedType::Simple(simple)),
            TypeRef::Complex(complex) => Some(ResolvedType::Complex(complex)),
            TypeRef::Named(name) => self
                .lookup_complex_type(name)
                .map(ResolvedType::Complex)
                .or_else(|| self.lookup_simple_type(name).map(ResolvedType::Simple)),
        }
    }

    /// Number of global components
    pub fn component_count(&self) -> usize {
        self.elements.len() + self.complex_types.len() + self.simple_types.len()
    }

    /// Check that every type reference in the schema resolves
    pub fn build(&self) -> std::result::Result<(), ParseError> {
        for decl in self.elements.values() {
            self.check_element(decl)?;
        }
        for complex in self.complex_types.values() {
            self.check_complex_type(complex)?;
        }
        Ok(())
    }

    fn check_element(&self, decl: &ElementDecl) -> std::result::Result<(), ParseError> {
        match self.resolve(&decl.type_ref) {
            Some(ResolvedType::Complex(complex)) => {
                if let TypeRef::Complex(_) = decl.type_ref {
                    self.check_complex_type(complex)?;
                }
                Ok(())
            }
            Some(ResolvedType::Simple(_)) => Ok(()),
            None => Err(ParseError::new(format!(
                "Element '{}' refers to unknown type '{}'",
                decl.name.local_name,
                decl.type_ref.display_name()
            ))),
        }
    }

    fn check_complex_type(&self, complex: &ComplexType) -> std::result::Result<(), ParseError> {
        let mut result = Ok(());
        if let Some(content) = &complex.content {
            content.for_each_element(&mut |decl| {
                if result.is_ok() {
                    result = self.check_element(decl);
                }
            });
        }
        result?;

        for attribute in complex.attributes.values() {
            match self.resolve(&attribute.type_ref) {
                Some(ResolvedType::Simple(_)) => {}
                Some(ResolvedType::Complex(_)) => {
                    return Err(ParseError::new(format!(
                        "Attribute '{}' of type '{}' must have a simple type",
                        attribute.name,
                        complex.display_name()
                    )));
                }
                None => {
                    return Err(ParseError::new(format!(
                        "Attribute '{}' refers to unknown type '{}'",
                        attribute.name,
                        attribute.type_ref.display_name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate a document, collecting every error
    pub fn validate(&self, doc: &Document) -> ValidationResult {
        validate_document(self, doc)
    }

    /// Check if a document is valid
    pub fn is_valid(&self, doc: &Document) -> bool {
        self.validate(doc).valid
    }

    /// Validate a document, failing with the collected errors
    pub fn assert_valid(&self, doc: &Document) -> Result<()> {
        let result = self.validate(doc);
        if result.valid {
            return Ok(());
        }

        let mut error = ValidationError::new(format!(
            "Document is not valid against schema {}",
            self.target_namespace.as_deref().unwrap_or("(no namespace)")
        ))
        .with_reasons(result.errors);
        if let Some(source) = &self.source {
            error = error.with_path(source.clone());
        }
        Err(Error::Validation(error))
    }
}

impl fmt::Display for XsdSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "XsdSchema(namespace={}, elements={}, types={})",
            self.target_namespace.as_deref().unwrap_or(""),
            self.elements.len(),
            self.complex_types.len() + self.simple_types.len()
        )
    }
}

/// Outcome of validating a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether validation succeeded
    pub valid: bool,
    /// Validation errors
    pub errors: Vec<String>,
    /// Validation warnings
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}
