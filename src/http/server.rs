//! Per-connection exchange
//!
//! One `Connection` handles exactly one request/response pair: read and
//! parse the request, dispatch it, write the response, done. The caller
//! closes the socket by dropping the connection.

use super::reader::read_request;
use super::session::{HttpSession, SessionOps};
use super::writer::write_response;
use super::{Error, OutgoingResponse, Result, Status};
use crate::router::Router;
use log::debug;
use std::time::Duration;

/// A single-exchange HTTP connection
pub struct Connection<S: SessionOps> {
    session: HttpSession<S>,
}

impl<S: SessionOps> Connection<S> {
    /// Create a connection over a transport session
    pub fn new(session: S) -> Self {
        Connection {
            session: HttpSession::new(session),
        }
    }

    /// Set the I/O timeout for this connection
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.session.set_timeout(Some(timeout));
    }

    /// Serve one request/response exchange
    ///
    /// Framing errors that occur after the head is readable answer with a
    /// best-effort 400 before the error is surfaced; errors before that
    /// (unreadable socket, malformed request line) abort without a
    /// response.
    pub fn serve(&mut self, router: &Router) -> Result<()> {
        let request = match read_request(&mut self.session) {
            Ok(request) => request,
            Err(err @ (Error::InvalidContentLength(_) | Error::HeadTooLarge)) => {
                let bad_request = OutgoingResponse::empty(Status::BAD_REQUEST);
                let _ = write_response(&mut self.session, &bad_request, false);
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        debug!("{} {}", request.method(), request.path());

        let negotiated_gzip = request.accepts_gzip();
        let response = router.dispatch(&request);

        write_response(&mut self.session, &response, negotiated_gzip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::http::session::TcpSessionOps;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::Arc;
    use std::thread;

    fn test_router() -> Router {
        Router::new(Arc::new(ServerConfig {
            directory: None,
            listen: String::new(),
        }))
    }

    #[test]
    fn test_serve_root() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();

            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).unwrap();
            assert_eq!(buf, b"HTTP/1.1 200 OK\r\n\r\n");
        });

        let (stream, _) = listener.accept().unwrap();
        let mut conn = Connection::new(TcpSessionOps::new(stream));
        conn.serve(&test_router()).unwrap();
        drop(conn);

        handle.join().unwrap();
    }

    #[test]
    fn test_serve_malformed_request_line_aborts() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(b"BOGUS\r\n\r\n").unwrap();

            // No response at all, just a close.
            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).unwrap();
            assert!(buf.is_empty());
        });

        let (stream, _) = listener.accept().unwrap();
        let mut conn = Connection::new(TcpSessionOps::new(stream));
        let result = conn.serve(&test_router());
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
        drop(conn);

        handle.join().unwrap();
    }

    #[test]
    fn test_serve_bad_content_length_answers_400() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream
                .write_all(b"POST /files/a HTTP/1.1\r\nContent-Length: zzz\r\n\r\n")
                .unwrap();

            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).unwrap();
            assert_eq!(buf, b"HTTP/1.1 400 Bad Request\r\n\r\n");
        });

        let (stream, _) = listener.accept().unwrap();
        let mut conn = Connection::new(TcpSessionOps::new(stream));
        let result = conn.serve(&test_router());
        assert!(matches!(result, Err(Error::InvalidContentLength(_))));
        drop(conn);

        handle.join().unwrap();
    }
}
