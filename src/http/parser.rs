//! Request head parsing
//!
//! Pure functions that split a complete request head (everything up to the
//! header-terminating blank line) into a request line and a header map. The
//! reader module is responsible for accumulating enough bytes off the socket
//! before these run.

use super::{Error, HeaderMap, Result};

/// Find the end of the request head (the `\r\n\r\n` separator)
///
/// Returns the offset of the separator itself; the body starts 4 bytes
/// after it.
pub fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Parse the request line into method and path
///
/// Format: `METHOD PATH [VERSION]`. The version token is tolerated but not
/// required; anything with fewer than two tokens is malformed.
pub fn parse_request_line(line: &str) -> Result<(String, String)> {
    let mut parts = line.split_whitespace();

    let method = parts
        .next()
        .ok_or_else(|| Error::MalformedRequestLine(line.to_string()))?;
    let path = parts
        .next()
        .ok_or_else(|| Error::MalformedRequestLine(line.to_string()))?;

    Ok((method.to_string(), path.to_string()))
}

/// Parse a header line into a lowercased name and its value
///
/// Lines without a `": "` separator are not valid headers; they yield `None`
/// and the caller skips them rather than failing the request.
pub fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (name, value) = line.split_once(": ")?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_lowercase(), value.to_string()))
}

/// Parse a complete head into (method, path, headers)
///
/// `head` must not include the terminating blank line.
pub fn parse_head(head: &[u8]) -> Result<(String, String, HeaderMap)> {
    let head = String::from_utf8_lossy(head);
    let mut lines = head.split("\r\n");

    let request_line = lines
        .next()
        .ok_or_else(|| Error::MalformedRequestLine(String::new()))?;
    let (method, path) = parse_request_line(request_line)?;

    let mut headers = HeaderMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = parse_header_line(line) {
            headers.insert(name, value);
        }
    }

    Ok((method, path, headers))
}
