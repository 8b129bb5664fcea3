//! Mapping file object model and binding
//!
//! [`model`] holds the typed `entity-mappings` object graph, [`binding`]
//! the per-variant binding contexts and unmarshallers that produce it.

pub mod binder;
pub mod binding;
#[allow(missing_docs)]
pub mod model;

pub use binder::bind_entity_mappings;
pub use binding::{BindingContext, Unmarshaller, ROOT_ELEMENT};
pub use model::*;
