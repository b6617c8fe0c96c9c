//! Destinations for generated files
//!
//! A sink receives the content type, a filename-bearing disposition and the
//! payload. Sinks report transport failures through `write`; the generator turns
//! those into a single `send_error` call.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// `Content-Disposition` value for a downloadable file
pub fn content_disposition(filename: &str) -> String {
    format!("attachment; filename={}", filename)
}

/// Destination of a generated file
pub trait ResponseSink {
    fn set_content_type(&mut self, content_type: &str);

    fn set_disposition(&mut self, filename: &str);

    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Replace whatever was staged with an error status. Nothing stays attached.
    fn send_error(&mut self, status: u16, message: &str) -> io::Result<()>;
}

/// In-memory sink
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySink {
    pub content_type: Option<String>,
    pub disposition: Option<String>,
    pub body: Vec<u8>,
    pub error: Option<(u16, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl ResponseSink for MemorySink {
    fn set_content_type(&mut self, content_type: &str) {
        self.content_type = Some(content_type.to_string());
    }

    fn set_disposition(&mut self, filename: &str) {
        self.disposition = Some(content_disposition(filename));
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(bytes);
        Ok(())
    }

    fn send_error(&mut self, status: u16, message: &str) -> io::Result<()> {
        self.content_type = None;
        self.disposition = None;
        self.body.clear();
        self.error = Some((status, message.to_string()));
        Ok(())
    }
}

/// Sink writing the payload to a file on disk
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    content_type: Option<String>,
    error: Option<(u16, String)>,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            content_type: None,
            error: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn error(&self) -> Option<&(u16, String)> {
        self.error.as_ref()
    }
}

impl ResponseSink for FileSink {
    fn set_content_type(&mut self, content_type: &str) {
        self.content_type = Some(content_type.to_string());
    }

    /// The target path is fixed at construction
    fn set_disposition(&mut self, _filename: &str) {}

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        fs::write(&self.path, bytes)
    }

    fn send_error(&mut self, status: u16, message: &str) -> io::Result<()> {
        self.error = Some((status, message.to_string()));
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
