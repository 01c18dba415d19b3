//! Session abstraction over the transport
//!
//! The `SessionOps` trait hides the concrete transport behind poll, read,
//! write and close operations, and `HttpSession` layers bounded waits on
//! top: every read and write first polls for readiness with a timeout, so a
//! silent peer surfaces as `Error::Timeout` instead of a stuck worker.

use super::{Error, Result};
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::os::fd::AsRawFd;
use std::time::Duration;

/// Transport operations for a single connection
pub trait SessionOps {
    /// Poll the transport for readiness
    ///
    /// Returns true if the requested operation would not block.
    fn poll(&self, events: PollEvents, timeout: Option<Duration>) -> io::Result<bool>;

    /// Read data from the transport
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write data to the transport
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Close the transport
    fn close(&mut self) -> io::Result<()>;
}

/// Poll events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvents {
    Read,
    Write,
}

/// A connection with timeout-guarded I/O
pub struct HttpSession<S: SessionOps> {
    session: S,
    timeout: Option<Duration>,
}

/// Default bound on how long a single read or write may wait for the peer
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(10);

impl<S: SessionOps> HttpSession<S> {
    /// Create a new session with the default timeout
    pub fn new(session: S) -> Self {
        HttpSession {
            session,
            timeout: Some(DEFAULT_IO_TIMEOUT),
        }
    }

    /// Set the timeout for subsequent operations
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// Read data, waiting at most the configured timeout
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self
            .session
            .poll(PollEvents::Read, self.timeout)
            .map_err(Error::Read)?
        {
            return Err(Error::Timeout);
        }

        self.session.read(buf).map_err(Error::Read)
    }

    /// Write data, waiting at most the configured timeout
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if !self
            .session
            .poll(PollEvents::Write, self.timeout)
            .map_err(Error::Write)?
        {
            return Err(Error::Timeout);
        }

        self.session.write(buf).map_err(Error::Write)
    }

    /// Close the connection
    pub fn close(&mut self) -> Result<()> {
        self.session.close().map_err(Error::Write)
    }

    /// Get a reference to the underlying session
    pub fn get_ref(&self) -> &S {
        &self.session
    }
}

/// Plain TCP session operations
pub struct TcpSessionOps {
    stream: TcpStream,
}

impl TcpSessionOps {
    /// Wrap a connected TCP stream
    pub fn new(stream: TcpStream) -> Self {
        TcpSessionOps { stream }
    }

    /// Get a reference to the underlying stream
    pub fn stream(&self) -> &TcpStream {
        &self.stream
    }
}

impl SessionOps for TcpSessionOps {
    fn poll(&self, events: PollEvents, timeout: Option<Duration>) -> io::Result<bool> {
        use libc::{poll, pollfd, POLLIN, POLLOUT};

        let mut pfd = pollfd {
            fd: self.stream.as_raw_fd(),
            events: match events {
                PollEvents::Read => POLLIN,
                PollEvents::Write => POLLOUT,
            },
            revents: 0,
        };

        // -1 = wait forever
        let timeout_ms = timeout.map(|d| d.as_millis() as i32).unwrap_or(-1);

        let result = unsafe { poll(&mut pfd as *mut pollfd, 1, timeout_ms) };

        if result < 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(result > 0)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn close(&mut self) -> io::Result<()> {
        use std::net::Shutdown;
        self.stream.shutdown(Shutdown::Both)
    }
}

/// Helper to create a timeout-guarded session from a TCP stream
pub fn from_tcp_stream(stream: TcpStream) -> HttpSession<TcpSessionOps> {
    HttpSession::new(TcpSessionOps::new(stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_tcp_session_ops() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream.write_all(b"Hello").unwrap();
        });

        let stream = TcpStream::connect(addr).unwrap();
        let mut session = TcpSessionOps::new(stream);

        assert!(session
            .poll(PollEvents::Read, Some(Duration::from_secs(1)))
            .unwrap());

        let mut buf = [0u8; 5];
        let n = session.read(&mut buf).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf, b"Hello");

        handle.join().unwrap();
    }

    #[test]
    fn test_session_read_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept but never send anything
        let _handle = thread::spawn(move || {
            let (_stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_secs(2));
        });

        let stream = TcpStream::connect(addr).unwrap();
        let mut session = from_tcp_stream(stream);
        session.set_timeout(Some(Duration::from_millis(100)));

        let mut buf = [0u8; 10];
        let result = session.read(&mut buf);
        assert!(matches!(result, Err(Error::Timeout)));
    }
}
