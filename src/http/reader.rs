//! Request reading
//!
//! Accumulates bytes off a session until the request head is complete, then
//! parses it and completes the body. A single `read()` is not guaranteed to
//! return the full message: the head may arrive fragmented, and a
//! `Content-Length`-framed body can land in a later TCP segment. Both cases
//! are handled by continuing to read until the declared framing is
//! satisfied, with every wait bounded by the session timeout.

use super::parser::{find_head_end, parse_head};
use super::session::{HttpSession, SessionOps};
use super::{Error, RawRequest, Result, MAX_HEAD_BYTES};

const READ_CHUNK: usize = 4096;

/// Read one complete request off the session
///
/// Fails with `HeadTooLarge` if the blank line terminating the head has not
/// appeared within `MAX_HEAD_BYTES`, and with `InvalidContentLength` if a
/// `Content-Length` header is present but does not parse as a non-negative
/// integer. An absent `Content-Length` means an empty body; no extra read is
/// attempted.
pub fn read_request<S: SessionOps>(session: &mut HttpSession<S>) -> Result<RawRequest> {
    let mut buffer: Vec<u8> = Vec::with_capacity(READ_CHUNK);

    // Phase one: read until the head-terminating blank line shows up.
    let head_end = loop {
        if let Some(pos) = find_head_end(&buffer) {
            break pos;
        }
        if buffer.len() > MAX_HEAD_BYTES {
            return Err(Error::HeadTooLarge);
        }

        let mut temp = [0u8; READ_CHUNK];
        let n = session.read(&mut temp)?;
        if n == 0 {
            return Err(Error::ConnectionClosed);
        }
        buffer.extend_from_slice(&temp[..n]);
    };

    let (method, path, headers) = parse_head(&buffer[..head_end])?;

    // Bytes past the blank line already read in are the provisional body.
    let mut body = buffer.split_off(head_end + 4);

    // Phase two: the Content-Length header is authoritative for the body
    // length. Complete a short body with further reads; discard any surplus.
    if let Some(declared) = headers.get("content-length") {
        let declared: usize = declared
            .trim()
            .parse()
            .map_err(|_| Error::InvalidContentLength(declared.to_string()))?;

        body.truncate(declared);
        while body.len() < declared {
            let mut chunk = vec![0u8; declared - body.len()];
            let n = session.read(&mut chunk)?;
            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
            body.extend_from_slice(&chunk[..n]);
        }
    } else {
        body.clear();
    }

    Ok(RawRequest::new(method, path, headers, body))
}
