//! Sink producing an HTTP response

use std::io;

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, EXPIRES};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::sink::{content_disposition, ResponseSink};

/// Collects a generated file into an axum response
#[derive(Debug)]
pub struct HttpResponseSink {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    /// Header rejected by the transport, surfaced on the next write
    invalid_header: Option<String>,
}

impl HttpResponseSink {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
            invalid_header: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn set_header(&mut self, name: axum::http::HeaderName, value: &str) {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(e) => {
                self.invalid_header = Some(format!("Invalid {} header: {}", name, e));
            }
        }
    }
}

impl Default for HttpResponseSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSink for HttpResponseSink {
    fn set_content_type(&mut self, content_type: &str) {
        self.set_header(CONTENT_TYPE, content_type);
        self.headers.insert(EXPIRES, HeaderValue::from_static("0"));
    }

    fn set_disposition(&mut self, filename: &str) {
        self.set_header(CONTENT_DISPOSITION, &content_disposition(filename));
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(message) = self.invalid_header.take() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, message));
        }
        self.body.extend_from_slice(bytes);
        Ok(())
    }

    fn send_error(&mut self, status: u16, message: &str) -> io::Result<()> {
        self.status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.headers.clear();
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.body = message.as_bytes().to_vec();
        Ok(())
    }
}

impl IntoResponse for HttpResponseSink {
    fn into_response(self) -> Response {
        (self.status, self.headers, Body::from(self.body)).into_response()
    }
}
