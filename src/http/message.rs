//! HTTP message types
//!
//! Core types shared by the reader, router and writer: the parsed request,
//! the response to be serialized, and status codes with their canonical
//! reason phrases.

use super::HeaderMap;
use std::fmt;

/// HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    code: u16,
}

impl Status {
    /// Get the status code
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Get the canonical reason phrase for this status code
    pub fn reason_phrase(&self) -> &'static str {
        match self.code {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            411 => "Length Required",
            413 => "Payload Too Large",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            _ => "Unknown",
        }
    }

    /// Check if this is a success status (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub const OK: Status = Status { code: 200 };
    pub const CREATED: Status = Status { code: 201 };
    pub const BAD_REQUEST: Status = Status { code: 400 };
    pub const NOT_FOUND: Status = Status { code: 404 };
    pub const METHOD_NOT_ALLOWED: Status = Status { code: 405 };
    pub const INTERNAL_SERVER_ERROR: Status = Status { code: 500 };
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason_phrase())
    }
}

/// A parsed HTTP request
///
/// The method is kept as the raw token from the request line rather than an
/// enum, so requests with methods the router does not support still parse
/// and can be answered with 405.
#[derive(Debug, Clone)]
pub struct RawRequest {
    method: String,
    path: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawRequest {
    /// Assemble a request from its parsed parts
    pub fn new(method: String, path: String, headers: HeaderMap, body: Vec<u8>) -> Self {
        RawRequest {
            method,
            path,
            headers,
            body,
        }
    }

    /// Get the request method token
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether the client accepts a gzip-encoded response body
    ///
    /// True iff the literal token `gzip` appears anywhere in the
    /// `Accept-Encoding` value.
    pub fn accepts_gzip(&self) -> bool {
        self.headers.get_or_empty("accept-encoding").contains("gzip")
    }
}

/// A response to be serialized onto the wire
///
/// `Content-Length` is only emitted alongside a content type; responses
/// without one (the empty-body status responses) carry neither header.
#[derive(Debug, Clone)]
pub struct OutgoingResponse {
    status: Status,
    content_type: Option<&'static str>,
    body: Vec<u8>,
}

impl OutgoingResponse {
    /// A bare status response with no content type and no body
    pub fn empty(status: Status) -> Self {
        OutgoingResponse {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// A response with a typed body
    pub fn with_body(status: Status, content_type: &'static str, body: Vec<u8>) -> Self {
        OutgoingResponse {
            status,
            content_type: Some(content_type),
            body,
        }
    }

    /// Get the status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Get the content type, if one was supplied
    pub fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    /// Get the body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
