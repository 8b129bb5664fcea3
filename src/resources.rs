//! Bundled schema resources
//!
//! The XSDs of every supported mapping file dialect are compiled into the
//! library and addressed by resource path, so schema lookup never touches
//! the caller's filesystem.

use crate::error::{Error, Result};

/// A schema embedded in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledResource {
    /// Resource path, relative to the resource root
    pub path: &'static str,
    /// Resource text
    pub content: &'static str,
}

/// Every bundled resource
pub static BUNDLED_RESOURCES: &[BundledResource] = &[
    BundledResource {
        path: "xsd/orm_2_0.xsd",
        content: include_str!("../resources/xsd/orm_2_0.xsd"),
    },
    BundledResource {
        path: "xsd/orm_1_0.xsd",
        content: include_str!("../resources/xsd/orm_1_0.xsd"),
    },
    BundledResource {
        path: "xsd/eclipselink_orm_1_1.xsd",
        content: include_str!("../resources/xsd/eclipselink_orm_1_1.xsd"),
    },
];

/// Look up a bundled resource by path
pub fn bundled_resource(path: &str) -> Result<&'static str> {
    let path = path.trim_start_matches('/');
    BUNDLED_RESOURCES
        .iter()
        .find(|r| r.path == path)
        .map(|r| r.content)
        .ok_or_else(|| Error::Resource(format!("No bundled resource at '{}'", path)))
}
