//! Resource loading utilities
//!
//! Mapping files are read through a [`ResourceOpener`], which turns a URL
//! into a [`ResourceStream`]. Every stream handed to a parser is wrapped in
//! an [`OpenStream`] guard that checks the text encoding up front and makes
//! sure the stream is closed on every exit path.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::locations::is_remote;

/// How many leading bytes are inspected for a byte order mark
const PEEK_LEN: u64 = 4;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A readable resource that must be closed explicitly
pub trait ResourceStream: Read + Send {
    /// Release the resource, reporting any failure to do so
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// Opens resources by URL
pub trait ResourceOpener: Send + Sync + fmt::Debug {
    /// Open a fresh stream over the resource at `url`
    fn open(&self, url: &Url) -> Result<Box<dyn ResourceStream>>;
}

/// Stream over a local file
#[derive(Debug)]
struct FileStream {
    file: File,
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl ResourceStream for FileStream {
    fn close(self: Box<Self>) -> io::Result<()> {
        drop(self.file);
        Ok(())
    }
}

/// Stream over bytes held in memory
#[derive(Debug)]
pub struct MemoryStream {
    cursor: Cursor<Arc<[u8]>>,
}

impl MemoryStream {
    /// Create a stream over shared bytes
    pub fn new(bytes: Arc<[u8]>) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl ResourceStream for MemoryStream {
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "remote")]
struct HttpStream {
    response: reqwest::blocking::Response,
}

#[cfg(feature = "remote")]
impl Read for HttpStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}

#[cfg(feature = "remote")]
impl ResourceStream for HttpStream {
    fn close(self: Box<Self>) -> io::Result<()> {
        drop(self.response);
        Ok(())
    }
}

/// Resource loader for `file:` URLs and, with the `remote` feature, HTTP(S)
#[derive(Debug, Clone)]
pub struct Loader {
    /// Whether to allow remote resources
    allow_remote: bool,
    /// Timeout for remote requests
    #[cfg_attr(not(feature = "remote"), allow(dead_code))]
    timeout: Duration,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self {
            allow_remote: true,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set whether to allow remote resources
    pub fn with_allow_remote(mut self, allow: bool) -> Self {
        self.allow_remote = allow;
        self
    }

    /// Set the timeout for remote requests
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn open_file(&self, url: &Url) -> Result<Box<dyn ResourceStream>> {
        let path = url
            .to_file_path()
            .map_err(|()| Error::Resource(format!("'{}' is not a local file URL", url)))?;
        let file = File::open(&path).map_err(|e| {
            Error::Resource(format!("Failed to open '{}': {}", path.display(), e))
        })?;
        Ok(Box::new(FileStream { file }))
    }

    #[cfg(feature = "remote")]
    fn open_remote(&self, url: &Url) -> Result<Box<dyn ResourceStream>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Resource(format!("Failed to create HTTP client: {}", e)))?;
        let response = client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Resource(format!("Failed to fetch '{}': {}", url, e)))?;
        Ok(Box::new(HttpStream { response }))
    }

    #[cfg(not(feature = "remote"))]
    fn open_remote(&self, url: &Url) -> Result<Box<dyn ResourceStream>> {
        Err(Error::Resource(format!(
            "Cannot fetch '{}': built without the 'remote' feature",
            url
        )))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceOpener for Loader {
    fn open(&self, url: &Url) -> Result<Box<dyn ResourceStream>> {
        if url.scheme() == "file" {
            return self.open_file(url);
        }
        if is_remote(url) {
            if !self.allow_remote {
                return Err(Error::Resource(format!(
                    "Remote resources are not allowed: {}",
                    url
                )));
            }
            return self.open_remote(url);
        }
        Err(Error::Resource(format!(
            "Unsupported URL scheme '{}' in '{}'",
            url.scheme(),
            url
        )))
    }
}

/// In-memory resources keyed by URL, counting every stream opened
#[derive(Debug, Default)]
pub struct MemoryOpener {
    resources: HashMap<Url, Arc<[u8]>>,
    opened: AtomicUsize,
}

impl MemoryOpener {
    /// Create an empty opener
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource
    pub fn with_resource(mut self, url: Url, content: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(url, Arc::from(content.into()));
        self
    }

    /// Number of streams opened so far
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl ResourceOpener for MemoryOpener {
    fn open(&self, url: &Url) -> Result<Box<dyn ResourceStream>> {
        let bytes = self
            .resources
            .get(url)
            .ok_or_else(|| Error::Resource(format!("No resource at '{}'", url)))?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryStream::new(Arc::clone(bytes))))
    }
}

/// An open stream that is closed exactly once
///
/// The normal path calls [`OpenStream::close`] and gets the close error
/// back; if the guard is dropped instead, the stream is closed and a
/// failure is only logged.
pub struct OpenStream {
    location: String,
    prefix: Cursor<Vec<u8>>,
    stream: Option<Box<dyn ResourceStream>>,
}

impl OpenStream {
    /// Open `url`, rejecting UTF-16 streams
    pub fn open(opener: &dyn ResourceOpener, url: &Url) -> Result<Self> {
        let stream = opener.open(url)?;
        debug!(location = %url, "opened stream");

        let mut guard = Self {
            location: url.to_string(),
            prefix: Cursor::new(Vec::new()),
            stream: Some(stream),
        };

        let mut prefix = Vec::new();
        if let Some(stream) = guard.stream.as_mut() {
            stream.take(PEEK_LEN).read_to_end(&mut prefix)?;
        }
        let skip = check_encoding(&prefix, &guard.location)?;
        guard.prefix = Cursor::new(prefix);
        guard.prefix.set_position(skip as u64);
        Ok(guard)
    }

    /// Location the stream was opened from
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Close the stream, returning any error
    pub fn close(mut self) -> io::Result<()> {
        match self.stream.take() {
            Some(stream) => {
                debug!(location = %self.location, "closing stream");
                stream.close()
            }
            None => Ok(()),
        }
    }
}

impl Read for OpenStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.prefix.read(buf)?;
        if n > 0 {
            return Ok(n);
        }
        match self.stream.as_mut() {
            Some(stream) => stream.read(buf),
            None => Ok(0),
        }
    }
}

impl Drop for OpenStream {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.close() {
                warn!(location = %self.location, error = %e, "failed to close stream");
            }
        }
    }
}

impl fmt::Debug for OpenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenStream")
            .field("location", &self.location)
            .field("open", &self.stream.is_some())
            .finish()
    }
}

/// Check the leading bytes of a resource; returns how many bytes of BOM to skip
///
/// Streams are always decoded as UTF-8. A UTF-16 stream can never be, so
/// it is rejected here; an XML declaration naming another encoding is not
/// consulted, and bytes that are not UTF-8 fail later while parsing.
pub fn check_encoding(prefix: &[u8], location: &str) -> Result<usize> {
    let encoding_error = |reason: &str| Error::Encoding {
        location: location.to_string(),
        reason: reason.to_string(),
    };

    if prefix.starts_with(&[0xFE, 0xFF]) || prefix.starts_with(&[0xFF, 0xFE]) {
        return Err(encoding_error("UTF-16 byte order mark"));
    }
    if prefix.starts_with(&[0x00, b'<', 0x00, b'?']) || prefix.starts_with(&[b'<', 0x00, b'?', 0x00]) {
        return Err(encoding_error("UTF-16 content"));
    }

    if prefix.starts_with(UTF8_BOM) {
        Ok(UTF8_BOM.len())
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read_all(mut stream: OpenStream) -> String {
        let mut text = String::new();
        stream.read_to_string(&mut text).unwrap();
        stream.close().unwrap();
        text
    }

    #[test]
    fn test_open_file_url() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<entity-mappings/>").unwrap();

        let url = Url::from_file_path(file.path()).unwrap();
        let stream = OpenStream::open(&Loader::new(), &url).unwrap();
        assert_eq!(read_all(stream), "<entity-mappings/>");
    }

    #[test]
    fn test_missing_file_is_resource_error() {
        let url = Url::parse("file:///nonexistent/orm.xml").unwrap();
        let err = OpenStream::open(&Loader::new(), &url).unwrap_err();
        assert!(matches!(err, Error::Resource(_)));
    }

    #[test]
    fn test_unsupported_scheme() {
        let url = Url::parse("ftp://example.com/orm.xml").unwrap();
        assert!(matches!(Loader::new().open(&url), Err(Error::Resource(_))));
    }

    #[test]
    fn test_remote_can_be_disabled() {
        let url = Url::parse("https://example.com/orm.xml").unwrap();
        let loader = Loader::new().with_allow_remote(false);
        assert!(matches!(loader.open(&url), Err(Error::Resource(_))));
    }

    #[cfg(feature = "remote")]
    #[test]
    fn test_open_http_url() {
        use std::io::Write as _;
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).unwrap();
            let body = "<entity-mappings/>";
            write!(
                socket,
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .unwrap();
        });

        let url = Url::parse(&format!("http://127.0.0.1:{}/orm.xml", port)).unwrap();
        let stream = OpenStream::open(&Loader::new(), &url).unwrap();
        assert_eq!(read_all(stream), "<entity-mappings/>");
        server.join().unwrap();
    }

    #[test]
    fn test_memory_opener_counts_streams() {
        let url = Url::parse("mem:/orm.xml").unwrap();
        let opener = MemoryOpener::new().with_resource(url.clone(), "<a/>");
        for _ in 0..3 {
            assert_eq!(read_all(OpenStream::open(&opener, &url).unwrap()), "<a/>");
        }
        assert_eq!(opener.opened(), 3);

        let missing = Url::parse("mem:/other.xml").unwrap();
        assert!(OpenStream::open(&opener, &missing).is_err());
        assert_eq!(opener.opened(), 3);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let url = Url::parse("mem:/bom.xml").unwrap();
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"<a/>");
        let opener = MemoryOpener::new().with_resource(url.clone(), bytes);
        assert_eq!(read_all(OpenStream::open(&opener, &url).unwrap()), "<a/>");
    }

    #[test]
    fn test_long_content_is_read_past_prefix() {
        let url = Url::parse("mem:/long.xml").unwrap();
        let body = format!("<a>{}</a>", "x".repeat(2000));
        let opener = MemoryOpener::new().with_resource(url.clone(), body.clone());
        assert_eq!(read_all(OpenStream::open(&opener, &url).unwrap()), body);
    }

    #[test]
    fn test_check_encoding() {
        assert_eq!(check_encoding(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>", "t").unwrap(), 0);
        assert_eq!(check_encoding(b"<?xml version=\"1.0\"?><a/>", "t").unwrap(), 0);
        assert_eq!(check_encoding(b"\xEF\xBB\xBF<a/>", "t").unwrap(), 3);
        assert_eq!(check_encoding(b"<a", "t").unwrap(), 0);

        for bad in [&b"\xFF\xFE<\x00a\x00/\x00>\x00"[..], &b"<\x00?\x00x\x00m\x00l\x00"[..]] {
            assert!(matches!(check_encoding(bad, "t"), Err(Error::Encoding { .. })));
        }
    }

    #[test]
    fn test_declared_encoding_is_not_consulted() {
        let prolog = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a/>";
        assert_eq!(check_encoding(prolog, "t").unwrap(), 0);

        let url = Url::parse("mem:/latin1.xml").unwrap();
        let opener = MemoryOpener::new().with_resource(url.clone(), &prolog[..]);
        assert!(read_all(OpenStream::open(&opener, &url).unwrap()).ends_with("<a/>"));
    }
}
