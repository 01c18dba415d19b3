//! HTTP/1.1 framing layer
//!
//! This module implements the request/response framing used by the server:
//! reading a raw byte stream off a connection, splitting it into a request
//! line, headers and a `Content-Length`-framed body, and serializing a
//! well-formed response back out.
//!
//! The layer is deliberately small. Each connection carries exactly one
//! request/response exchange and is then closed; there is no keep-alive,
//! no chunked transfer encoding and no pipelining.

pub mod headers;
pub mod message;
pub mod parser;
pub mod reader;
pub mod server;
pub mod session;
pub mod writer;

pub use headers::HeaderMap;
pub use message::{OutgoingResponse, RawRequest, Status};
pub use server::Connection;
pub use session::{HttpSession, SessionOps, TcpSessionOps};

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP framing errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("read failed: {0}")]
    Read(std::io::Error),

    #[error("write failed: {0}")]
    Write(std::io::Error),

    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("invalid content-length: {0:?}")]
    InvalidContentLength(String),

    #[error("request head exceeds {MAX_HEAD_BYTES} bytes")]
    HeadTooLarge,

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("timed out waiting for peer")]
    Timeout,
}

/// Maximum size of the request head (request line + headers + blank line)
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

/// CRLF line ending
pub const CRLF: &str = "\r\n";
