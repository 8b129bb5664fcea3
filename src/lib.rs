//! # ormxml
//!
//! A reader for object-relational mapping files (`orm.xml`).
//!
//! Mapping files exist in several schema dialects that share a root element
//! (`entity-mappings`) but differ in namespace and content model. This
//! library reads a mapping file by trying each supported dialect in order of
//! preference until one accepts it:
//!
//! 1. ORM 2.0
//! 2. ORM 1.0
//! 3. EclipseLink ORM 1.1
//!
//! Each attempt opens a fresh stream, validates the document against the
//! dialect's bundled XSD and binds it to a typed [`EntityMappings`] graph.
//!
//! ## Features
//!
//! - Schema-validated binding of ORM and EclipseLink mapping files
//! - A small XSD compiler covering the constructs the bundled schemas use
//! - One binding context per dialect, built once and shared process-wide
//! - Local files, in-memory resources and (with `remote`) HTTP locations
//! - Protection against oversized or deeply nested documents
//!
//! ## Example
//!
//! ```rust,ignore
//! use ormxml::MappingReader;
//!
//! let mappings = MappingReader::new().read_location("META-INF/orm.xml")?;
//! for entity in &mappings.entities {
//!     println!("{} ({:?})", entity.class, mappings.schema_variant);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod namespaces;
pub mod locations;

// Resource loading
pub mod loaders;
pub mod resources;
pub mod documents;

// Schema validation
pub mod validators;

// Mapping model and reader
pub mod mapping;
pub mod reader;

// Re-exports for convenience
pub use error::{Error, Result};
pub use limits::Limits;
pub use loaders::{Loader, MemoryOpener, ResourceOpener, ResourceStream};
pub use locations::Location;
pub use mapping::{BindingContext, EntityMappings, Unmarshaller};
pub use reader::{
    read_mapping_file, ContextRegistry, MappingReader, SchemaVariant, VariantId, SCHEMA_VARIANTS,
};
pub use validators::{ValidationMode, XsdSchema};

/// Version of the ormxml library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
