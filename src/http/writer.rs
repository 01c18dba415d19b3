//! Response serialization
//!
//! Turns an `OutgoingResponse` into the exact byte layout an HTTP/1.1 client
//! expects and writes it to the session in full. Compression is decided
//! here: when the exchange negotiated gzip and the response carries a typed,
//! non-empty body, the body is compressed first and `Content-Length`
//! reflects the compressed size.

use super::session::{HttpSession, SessionOps};
use super::{Error, OutgoingResponse, Result, CRLF};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Gzip-compress a body
fn gzip(body: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body).map_err(Error::Write)?;
    encoder.finish().map_err(Error::Write)
}

/// Serialize a response to wire format
///
/// Header emission rules:
/// - `Content-Type` only when a type was supplied.
/// - `Content-Encoding: gzip` only when compression was applied.
/// - `Content-Length` only alongside a content type, always equal to the
///   byte length of the body actually written.
pub fn encode(response: &OutgoingResponse, negotiated_gzip: bool) -> Result<Vec<u8>> {
    let compress =
        negotiated_gzip && response.content_type().is_some() && !response.body().is_empty();

    let body: Vec<u8> = if compress {
        gzip(response.body())?
    } else {
        response.body().to_vec()
    };

    let mut wire = Vec::with_capacity(body.len() + 128);

    wire.extend_from_slice(b"HTTP/1.1 ");
    wire.extend_from_slice(response.status().to_string().as_bytes());
    wire.extend_from_slice(CRLF.as_bytes());

    if let Some(content_type) = response.content_type() {
        wire.extend_from_slice(b"Content-Type: ");
        wire.extend_from_slice(content_type.as_bytes());
        wire.extend_from_slice(CRLF.as_bytes());

        if compress {
            wire.extend_from_slice(b"Content-Encoding: gzip");
            wire.extend_from_slice(CRLF.as_bytes());
        }

        wire.extend_from_slice(b"Content-Length: ");
        wire.extend_from_slice(body.len().to_string().as_bytes());
        wire.extend_from_slice(CRLF.as_bytes());
    }

    wire.extend_from_slice(CRLF.as_bytes());
    wire.extend_from_slice(&body);

    Ok(wire)
}

/// Write one response to the session in full
pub fn write_response<S: SessionOps>(
    session: &mut HttpSession<S>,
    response: &OutgoingResponse,
    negotiated_gzip: bool,
) -> Result<()> {
    let wire = encode(response, negotiated_gzip)?;
    let mut written = 0;

    while written < wire.len() {
        let n = session.write(&wire[written..])?;
        if n == 0 {
            return Err(Error::ConnectionClosed);
        }
        written += n;
    }

    Ok(())
}
