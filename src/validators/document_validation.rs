//! Document Validation
//!
//! Validates an element tree against a compiled schema: root lookup,
//! attributes, simple content and element-only content models. Every error
//! is collected with the path of the element it was found on.

use std::collections::HashMap;

use crate::documents::{Document, Element};
use crate::namespaces::{QName, XML_NAMESPACE, XSI_NAMESPACE};

use super::complex_types::ComplexType;
use super::elements::ElementDecl;
use super::models::{match_content, ContentMismatch};
use super::schemas::{ResolvedType, ValidationResult, XsdSchema};
use super::simple_types::SimpleType;

/// Collected validation errors
#[derive(Debug, Default)]
struct ValidationContext {
    errors: Vec<String>,
}

impl ValidationContext {
    fn error(&mut self, path: &str, message: impl AsRef<str>) {
        self.errors.push(format!("{}: {}", path, message.as_ref()));
    }
}

/// Validate an XML document against the schema
pub fn validate_document(schema: &XsdSchema, doc: &Document) -> ValidationResult {
    let mut context = ValidationContext::default();

    let root = match doc.root() {
        Some(root) => root,
        None => return ValidationResult::invalid(vec!["Document has no root element".into()]),
    };

    let path = format!("/{}", root.local_name());
    match schema.lookup_element(&root.qname) {
        Some(decl) => validate_element(schema, root, decl, &path, &mut context),
        None => context.error(
            &path,
            format!("No global element declaration found for '{}'", root.qname),
        ),
    }

    if context.errors.is_empty() {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(context.errors)
    }
}

/// Validate an XML element against its declaration
fn validate_element(
    schema: &XsdSchema,
    elem: &Element,
    decl: &ElementDecl,
    path: &str,
    context: &mut ValidationContext,
) {
    match schema.resolve(&decl.type_ref) {
        Some(ResolvedType::Complex(complex)) => {
            validate_attributes(schema, elem, complex, path, context);
            validate_complex_content(schema, elem, complex, path, context);
        }
        Some(ResolvedType::Simple(simple)) => {
            validate_simple_element(elem, simple, path, context);
        }
        None => context.error(
            path,
            format!("Type '{}' is not defined", decl.type_ref.display_name()),
        ),
    }
}

fn is_reserved_attribute(name: &QName) -> bool {
    name.is_in(XSI_NAMESPACE) || name.is_in(XML_NAMESPACE)
}

fn validate_simple_element(
    elem: &Element,
    simple: &SimpleType,
    path: &str,
    context: &mut ValidationContext,
) {
    for name in elem.attributes.keys() {
        if !is_reserved_attribute(name) {
            context.error(path, format!("Attribute '{}' is not allowed", name));
        }
    }

    if let Some(child) = elem.children.first() {
        context.error(
            path,
            format!("Element '{}' is not allowed in simple content", child.local_name()),
        );
        return;
    }

    if let Err(reason) = simple.validate_value(elem.text()) {
        context.error(path, reason);
    }
}

fn validate_attributes(
    schema: &XsdSchema,
    elem: &Element,
    complex: &ComplexType,
    path: &str,
    context: &mut ValidationContext,
) {
    for (name, value) in &elem.attributes {
        if is_reserved_attribute(name) {
            continue;
        }

        let decl = match name.namespace {
            None => complex.attribute(&name.local_name),
            Some(_) => None,
        };
        let decl = match decl {
            Some(decl) => decl,
            None => {
                context.error(path, format!("Attribute '{}' is not allowed", name));
                continue;
            }
        };

        let simple = match schema.resolve(&decl.type_ref) {
            Some(ResolvedType::Simple(simple)) => simple,
            _ => {
                context.error(
                    path,
                    format!("Attribute '{}' has no simple type", decl.name),
                );
                continue;
            }
        };

        if let Err(reason) = simple.validate_value(value) {
            context.error(path, format!("Attribute '{}': {}", decl.name, reason));
            continue;
        }

        if let Some(fixed) = &decl.fixed {
            if !simple.values_equal(value, fixed) {
                context.error(
                    path,
                    format!(
                        "Attribute '{}' has value '{}' but the schema fixes it to '{}'",
                        decl.name, value, fixed
                    ),
                );
            }
        }
    }

    for decl in complex.required_attributes() {
        if elem.get_attribute(&decl.name).is_none() {
            context.error(path, format!("Missing required attribute '{}'", decl.name));
        }
    }
}

fn validate_complex_content(
    schema: &XsdSchema,
    elem: &Element,
    complex: &ComplexType,
    path: &str,
    context: &mut ValidationContext,
) {
    let has_text = !elem.text().trim().is_empty();

    let content = match &complex.content {
        Some(content) => content,
        None => {
            if !elem.children.is_empty() || has_text {
                context.error(
                    path,
                    format!("Element must be empty (type '{}')", complex.display_name()),
                );
            }
            return;
        }
    };

    if has_text {
        context.error(path, "Character data is not allowed in element-only content");
    }

    let names: Vec<&QName> = elem.children.iter().map(|c| &c.qname).collect();
    match match_content(content, &names) {
        Ok(()) => {}
        Err(ContentMismatch::Unexpected { index, name }) => {
            let expected = if complex.element_decl(&name).is_some() {
                "is not expected here"
            } else {
                "is not allowed"
            };
            context.error(
                path,
                format!("Child element '{}' at position {} {}", name, index + 1, expected),
            );
        }
        Err(ContentMismatch::Incomplete) => {
            context.error(path, "Content is incomplete: required child elements are missing");
        }
    }

    let totals = sibling_counts(elem);
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for child in &elem.children {
        let name = child.local_name();
        let nth = seen.entry(name).or_insert(0);
        *nth += 1;

        let child_path = if totals.get(name).copied().unwrap_or(0) > 1 {
            format!("{}/{}[{}]", path, name, nth)
        } else {
            format!("{}/{}", path, name)
        };

        if let Some(decl) = complex.element_decl(&child.qname) {
            validate_element(schema, child, decl, &child_path, context);
        }
    }
}

fn sibling_counts(elem: &Element) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for child in &elem.children {
        *counts.entry(child.local_name()).or_insert(0) += 1;
    }
    counts
}
