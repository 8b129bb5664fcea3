//! Versioned mapping file reader
//!
//! A mapping file may be written in any of several schema dialects. The
//! reader tries each known [`SchemaVariant`] in order of preference, opening
//! a fresh stream for every attempt, and returns the first document that
//! unmarshals successfully. The dialect is never sniffed from the document;
//! the fallback chain alone decides.

use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::loaders::{Loader, OpenStream, ResourceOpener};
use crate::locations::Location;
use crate::mapping::{BindingContext, EntityMappings};
use crate::namespaces::{ECLIPSELINK_ORM_NAMESPACE, ORM_NAMESPACE};
use crate::validators::ValidationMode;

/// Identifier of a schema variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantId {
    /// ORM 2.0 (JPA 2.0)
    Orm2_0,
    /// ORM 1.0 (JPA 1.0)
    Orm1_0,
    /// EclipseLink ORM 1.1 (vendor extended)
    EclipseLink1_1,
}

impl VariantId {
    /// All variants in order of preference
    pub const ALL: [VariantId; 3] = [VariantId::Orm2_0, VariantId::Orm1_0, VariantId::EclipseLink1_1];

    /// Position in [`SCHEMA_VARIANTS`]
    pub fn index(&self) -> usize {
        match self {
            VariantId::Orm2_0 => 0,
            VariantId::Orm1_0 => 1,
            VariantId::EclipseLink1_1 => 2,
        }
    }

    /// Short name
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantId::Orm2_0 => "orm-2.0",
            VariantId::Orm1_0 => "orm-1.0",
            VariantId::EclipseLink1_1 => "eclipselink-1.1",
        }
    }

    /// The variant's descriptor
    pub fn variant(&self) -> &'static SchemaVariant {
        &SCHEMA_VARIANTS[self.index()]
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        VariantId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| {
                Error::UnsupportedOperation(format!(
                    "Unknown schema variant '{}'. Must be one of: orm-2.0, orm-1.0, eclipselink-1.1",
                    s
                ))
            })
    }
}

impl Serialize for VariantId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A mapping file dialect: a namespace and the schema that defines it
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaVariant {
    /// Identifier
    pub id: VariantId,
    /// Namespace of the root element
    pub namespace_uri: &'static str,
    /// Path of the bundled schema resource
    pub schema_resource_path: &'static str,
}

/// Known variants in order of preference, newest JPA release first
pub static SCHEMA_VARIANTS: [SchemaVariant; 3] = [
    SchemaVariant {
        id: VariantId::Orm2_0,
        namespace_uri: ORM_NAMESPACE,
        schema_resource_path: "xsd/orm_2_0.xsd",
    },
    SchemaVariant {
        id: VariantId::Orm1_0,
        namespace_uri: ORM_NAMESPACE,
        schema_resource_path: "xsd/orm_1_0.xsd",
    },
    SchemaVariant {
        id: VariantId::EclipseLink1_1,
        namespace_uri: ECLIPSELINK_ORM_NAMESPACE,
        schema_resource_path: "xsd/eclipselink_orm_1_1.xsd",
    },
];

static GLOBAL_REGISTRY: Lazy<Arc<ContextRegistry>> = Lazy::new(|| Arc::new(ContextRegistry::new()));

/// Binding contexts, built at most once per variant
#[derive(Debug)]
pub struct ContextRegistry {
    slots: [OnceCell<Arc<BindingContext>>; 3],
    constructions: [AtomicUsize; 3],
    schema_attachment: bool,
}

impl ContextRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
            constructions: Default::default(),
            schema_attachment: true,
        }
    }

    /// The process-wide registry
    pub fn global() -> Arc<ContextRegistry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Build contexts whose unmarshallers refuse precompiled schemas
    pub fn without_schema_attachment(mut self) -> Self {
        self.schema_attachment = false;
        self
    }

    /// Get the context of a variant, building it on first use
    pub fn context(&self, variant: &'static SchemaVariant) -> Result<Arc<BindingContext>> {
        let index = variant.id.index();
        self.slots[index]
            .get_or_try_init(|| {
                self.constructions[index].fetch_add(1, Ordering::SeqCst);
                let context = BindingContext::new(variant)?;
                Ok(Arc::new(if self.schema_attachment {
                    context
                } else {
                    context.without_schema_attachment()
                }))
            })
            .map(Arc::clone)
    }

    /// How many times a variant's context has been built
    pub fn constructions(&self, id: VariantId) -> usize {
        self.constructions[id.index()].load(Ordering::SeqCst)
    }

    /// Whether a variant's context exists
    pub fn is_initialized(&self, id: VariantId) -> bool {
        self.slots[id.index()].get().is_some()
    }
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads mapping files, falling back through the schema variants
#[derive(Debug, Clone)]
pub struct MappingReader {
    opener: Arc<dyn ResourceOpener>,
    registry: Arc<ContextRegistry>,
    limits: Limits,
}

impl MappingReader {
    /// Create a reader for local files using the process-wide registry
    pub fn new() -> Self {
        Self {
            opener: Arc::new(Loader::new()),
            registry: ContextRegistry::global(),
            limits: Limits::default(),
        }
    }

    /// Use a different resource opener
    pub fn with_opener(mut self, opener: Arc<dyn ResourceOpener>) -> Self {
        self.opener = opener;
        self
    }

    /// Use a private context registry
    pub fn with_registry(mut self, registry: Arc<ContextRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Set the limits applied to documents
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Read a mapping file from user input (URL or filesystem path)
    pub fn read_location(&self, location: &str) -> Result<EntityMappings> {
        let url = Location::parse(location)?.to_url()?;
        self.read(&url)
    }

    /// Read a mapping file
    ///
    /// Open failures and encoding errors end the read immediately. Parse,
    /// validation and binding failures move on to the next variant; when
    /// none is left the last failure is returned inside
    /// [`Error::MappingFile`]. If any stream failed to close and a variant
    /// succeeded, the first close failure is returned as
    /// [`Error::FileClose`]; it never replaces a parse failure.
    pub fn read(&self, url: &Url) -> Result<EntityMappings> {
        let mut last_failure: Option<(VariantId, Error)> = None;
        let mut close_failure: Option<io::Error> = None;

        for variant in SCHEMA_VARIANTS.iter() {
            let stream = OpenStream::open(self.opener.as_ref(), url)?;
            let (outcome, closed) = self.attempt(variant, stream);

            if let Err(close_error) = closed {
                warn!(location = %url, variant = %variant.id, error = %close_error, "failed to close stream");
                close_failure.get_or_insert(close_error);
            }

            match outcome {
                Ok(mut mappings) => {
                    if let Some(source) = close_failure {
                        return Err(Error::FileClose {
                            location: url.to_string(),
                            source,
                        });
                    }
                    mappings.set_mapping_file(url.clone());
                    info!(location = %url, variant = %variant.id, "read mapping file");
                    return Ok(mappings);
                }
                Err(error) => {
                    if !error.is_recoverable() {
                        return Err(error);
                    }
                    debug!(location = %url, variant = %variant.id, error = %error, "variant rejected mapping file");
                    last_failure = Some((variant.id, error));
                }
            }
        }

        match last_failure {
            Some((variant, source)) => Err(Error::MappingFile {
                location: url.to_string(),
                variant,
                source: Box::new(source),
            }),
            None => Err(Error::Resource(format!(
                "No schema variant available to read '{}'",
                url
            ))),
        }
    }

    /// Run one attempt, always closing the stream
    fn attempt(
        &self,
        variant: &'static SchemaVariant,
        mut stream: OpenStream,
    ) -> (Result<EntityMappings>, io::Result<()>) {
        let outcome = self.unmarshal(variant, &mut stream);
        (outcome, stream.close())
    }

    fn unmarshal(&self, variant: &'static SchemaVariant, stream: &mut OpenStream) -> Result<EntityMappings> {
        let context = self.registry.context(variant)?;
        let mut unmarshaller = context.create_unmarshaller();
        unmarshaller.set_limits(self.limits.clone());

        match unmarshaller.set_schema(Arc::clone(context.schema())) {
            Ok(()) => {}
            Err(Error::UnsupportedOperation(reason)) => {
                debug!(variant = %variant.id, %reason, "using built-in schema validation");
                unmarshaller.set_validation_mode(ValidationMode::Strict);
            }
            Err(e) => return Err(e),
        }

        unmarshaller.unmarshal(stream)
    }
}

impl Default for MappingReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a mapping file with the default reader
pub fn read_mapping_file(url: &Url) -> Result<EntityMappings> {
    MappingReader::new().read(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_order_and_namespaces() {
        let ids: Vec<_> = SCHEMA_VARIANTS.iter().map(|v| v.id).collect();
        assert_eq!(ids, VariantId::ALL.to_vec());
        assert_eq!(SCHEMA_VARIANTS[0].namespace_uri, SCHEMA_VARIANTS[1].namespace_uri);
        assert_ne!(SCHEMA_VARIANTS[1].namespace_uri, SCHEMA_VARIANTS[2].namespace_uri);
        for id in VariantId::ALL {
            assert_eq!(id.variant().id, id);
        }
    }

    #[test]
    fn test_variant_id_parse() {
        assert_eq!("eclipselink-1.1".parse::<VariantId>().unwrap(), VariantId::EclipseLink1_1);
        assert!("orm-3.0".parse::<VariantId>().is_err());
        assert_eq!(serde_json::to_string(&VariantId::Orm1_0).unwrap(), "\"orm-1.0\"");
    }

    #[test]
    fn test_registry_builds_once() {
        let registry = ContextRegistry::new();
        let variant = VariantId::Orm1_0.variant();
        assert!(!registry.is_initialized(VariantId::Orm1_0));

        let first = registry.context(variant).unwrap();
        let second = registry.context(variant).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.constructions(VariantId::Orm1_0), 1);
        assert_eq!(registry.constructions(VariantId::Orm2_0), 0);
    }

    #[test]
    fn test_registry_schema_attachment_flag() {
        let registry = ContextRegistry::new().without_schema_attachment();
        let context = registry.context(VariantId::Orm2_0.variant()).unwrap();
        assert!(!context.supports_schema_attachment());
    }
}
