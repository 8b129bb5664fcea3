//! Binding contexts and unmarshallers
//!
//! A [`BindingContext`] is built once per schema variant: it compiles the
//! variant's bundled schema and knows the namespace of its root element.
//! Each read gets a fresh, single-use [`Unmarshaller`] from the context.

use std::io::Read;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::documents::Document;
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::QName;
use crate::reader::SchemaVariant;
use crate::resources::bundled_resource;
use crate::validators::{ResolvedType, ValidationMode, XsdSchema};

use super::binder::bind_entity_mappings;
use super::model::EntityMappings;

/// Local name of the root element of every mapping file dialect
pub const ROOT_ELEMENT: &str = "entity-mappings";

/// Schema-aware factory of unmarshallers for one variant
#[derive(Debug)]
pub struct BindingContext {
    variant: &'static SchemaVariant,
    schema: Arc<XsdSchema>,
    root: QName,
    schema_attachment: bool,
}

impl BindingContext {
    /// Build the context for a variant, compiling its bundled schema
    pub fn new(variant: &'static SchemaVariant) -> Result<Self> {
        let schema = Self::load_schema(variant)?;
        debug!(
            variant = %variant.id,
            resource = variant.schema_resource_path,
            components = schema.component_count(),
            "created binding context"
        );

        Ok(Self {
            variant,
            schema,
            root: QName::namespaced(variant.namespace_uri, ROOT_ELEMENT),
            schema_attachment: true,
        })
    }

    /// Compile the bundled schema of a variant into a validator
    pub fn load_schema(variant: &SchemaVariant) -> Result<Arc<XsdSchema>> {
        let source = bundled_resource(variant.schema_resource_path)?;
        let schema = XsdSchema::parse(
            source,
            Some(variant.schema_resource_path),
            &Limits::default(),
        )?;
        Ok(Arc::new(schema))
    }

    /// Make unmarshallers refuse precompiled schemas
    pub fn without_schema_attachment(mut self) -> Self {
        self.schema_attachment = false;
        self
    }

    /// Variant this context binds
    pub fn variant(&self) -> &'static SchemaVariant {
        self.variant
    }

    /// The variant's compiled schema
    pub fn schema(&self) -> &Arc<XsdSchema> {
        &self.schema
    }

    /// Whether unmarshallers accept a precompiled schema
    pub fn supports_schema_attachment(&self) -> bool {
        self.schema_attachment
    }

    /// Create a single-use unmarshaller
    pub fn create_unmarshaller(&self) -> Unmarshaller<'_> {
        Unmarshaller {
            context: self,
            schema: None,
            mode: ValidationMode::Skip,
            limits: Limits::default(),
        }
    }
}

/// Reads one mapping file into [`EntityMappings`]
#[derive(Debug)]
pub struct Unmarshaller<'a> {
    context: &'a BindingContext,
    schema: Option<Arc<XsdSchema>>,
    mode: ValidationMode,
    limits: Limits,
}

impl<'a> Unmarshaller<'a> {
    /// Attach a precompiled schema; documents are then validated strictly
    pub fn set_schema(&mut self, schema: Arc<XsdSchema>) -> Result<()> {
        if !self.context.schema_attachment {
            return Err(Error::UnsupportedOperation(format!(
                "unmarshaller for {} does not accept a precompiled schema",
                self.context.variant.id
            )));
        }
        self.schema = Some(schema);
        self.mode = ValidationMode::Strict;
        Ok(())
    }

    /// Set how documents are validated; without an attached schema the
    /// context's own schema is used
    pub fn set_validation_mode(&mut self, mode: ValidationMode) {
        self.mode = mode;
    }

    /// Current validation mode
    pub fn validation_mode(&self) -> ValidationMode {
        self.mode
    }

    /// Set the limits applied to documents
    pub fn set_limits(&mut self, limits: Limits) {
        self.limits = limits;
    }

    /// Read, validate and bind a document
    pub fn unmarshal<R: Read>(&self, reader: R) -> Result<EntityMappings> {
        let mut bytes = Vec::new();
        let max = self.limits.max_xml_size as u64;
        reader.take(max.saturating_add(1)).read_to_end(&mut bytes)?;
        self.limits.check_xml_size(bytes.len())?;

        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Xml(format!("Document is not valid UTF-8: {}", e)))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let doc = Document::parse(text, &self.limits)?;
        self.unmarshal_document(&doc)
    }

    /// Validate and bind an already parsed document
    pub fn unmarshal_document(&self, doc: &Document) -> Result<EntityMappings> {
        self.validate(doc)?;

        let root = doc
            .root()
            .ok_or_else(|| Error::Xml("Document has no root element".to_string()))?;
        if root.qname != self.context.root {
            return Err(Error::Binding(format!(
                "Unexpected root element '{}', expected '{}'",
                root.qname, self.context.root
            )));
        }

        let mut mappings = bind_entity_mappings(root)?;
        if mappings.version.is_none() {
            mappings.version = self.default_version();
        }
        mappings.schema_variant = Some(self.context.variant.id);
        Ok(mappings)
    }

    fn validate(&self, doc: &Document) -> Result<()> {
        if !self.mode.is_validating() {
            return Ok(());
        }

        let schema = self.schema.as_ref().unwrap_or(&self.context.schema);
        match self.mode {
            ValidationMode::Strict => schema.assert_valid(doc),
            _ => {
                for error in schema.validate(doc).errors {
                    warn!(variant = %self.context.variant.id, "{}", error);
                }
                Ok(())
            }
        }
    }

    /// Value the schema supplies for an absent root `version` attribute
    fn default_version(&self) -> Option<String> {
        let decl = self.context.schema.lookup_element(&self.context.root)?;
        match self.context.schema.resolve(&decl.type_ref)? {
            ResolvedType::Complex(complex) => {
                let version = complex.attribute("version")?;
                version.default.clone().or_else(|| version.fixed.clone())
            }
            ResolvedType::Simple(_) => None,
        }
    }
}
