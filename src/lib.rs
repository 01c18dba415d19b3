//! picohttpd - a minimal single-exchange HTTP/1.1 server
//!
//! Serves a fixed route table (greeting, echo, user-agent reflection, file
//! read/write) over plain TCP with optional gzip response compression. Each
//! accepted connection carries exactly one request/response exchange and is
//! then closed.

pub mod config;
pub mod http;
pub mod router;
