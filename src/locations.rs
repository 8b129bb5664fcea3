//! Resource location resolution
//!
//! Mapping files are addressed by URL. Command line arguments and other
//! user input may also be plain filesystem paths, which are turned into
//! absolute `file:` URLs here.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};

/// Resource location, either a URL or a filesystem path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// URL (file, http, https, mem, ...)
    Url(Url),
}

impl Location {
    /// Parse a location from user input, auto-detecting URLs and paths
    pub fn parse(s: &str) -> Result<Self> {
        if let Ok(url) = Url::parse(s) {
            // A one-letter scheme is a Windows drive letter, not a URL
            if url.scheme().len() > 1 {
                return Ok(Location::Url(url));
            }
        }
        Ok(Location::Path(PathBuf::from(s)))
    }

    /// Convert to an absolute URL
    pub fn to_url(&self) -> Result<Url> {
        match self {
            Location::Url(url) => Ok(url.clone()),
            Location::Path(path) => path_to_url(path),
        }
    }

    /// Check if this is a remote location
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(url) if is_remote(url))
    }

    /// Check if this is a local file
    pub fn is_file(&self) -> bool {
        match self {
            Location::Path(_) => true,
            Location::Url(url) => url.scheme() == "file",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(p) => write!(f, "{}", p.display()),
            Location::Url(u) => write!(f, "{}", u),
        }
    }
}

/// Turn a filesystem path into an absolute `file:` URL
pub fn path_to_url(path: &Path) -> Result<Url> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Url::from_file_path(&absolute).map_err(|()| {
        Error::Resource(format!("Cannot express '{}' as a URL", absolute.display()))
    })
}

/// Resolve a reference relative to a base location
pub fn resolve_location(base: &Url, href: &str) -> Result<Url> {
    Ok(base.join(href)?)
}

/// Whether the URL needs network access
pub fn is_remote(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
