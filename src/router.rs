//! Route dispatch
//!
//! Maps (method, path) to a response. Routes are fixed: a static greeting
//! at `/`, request echo under `/echo/`, `User-Agent` reflection, and file
//! read/write under `/files/` when a base directory is configured.

use crate::config::ServerConfig;
use crate::http::{OutgoingResponse, RawRequest, Status};
use log::{error, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

const TEXT_PLAIN: &str = "text/plain";
const OCTET_STREAM: &str = "application/octet-stream";

/// Fixed route table over an immutable server configuration
pub struct Router {
    config: Arc<ServerConfig>,
}

impl Router {
    /// Create a router sharing the server configuration
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Router { config }
    }

    /// Dispatch a request to its handler
    ///
    /// Unknown paths answer 404, unknown methods 405. Error-status
    /// responses carry no content type and no body.
    pub fn dispatch(&self, request: &RawRequest) -> OutgoingResponse {
        match request.method() {
            "GET" => self.handle_get(request),
            "POST" => self.handle_post(request),
            _ => OutgoingResponse::empty(Status::METHOD_NOT_ALLOWED),
        }
    }

    fn handle_get(&self, request: &RawRequest) -> OutgoingResponse {
        let path = request.path();

        if path == "/" {
            OutgoingResponse::empty(Status::OK)
        } else if let Some(echo) = path.strip_prefix("/echo/") {
            OutgoingResponse::with_body(Status::OK, TEXT_PLAIN, echo.as_bytes().to_vec())
        } else if path == "/user-agent" {
            let agent = request.headers().get_or_empty("user-agent");
            OutgoingResponse::with_body(Status::OK, TEXT_PLAIN, agent.as_bytes().to_vec())
        } else if let Some(name) = path.strip_prefix("/files/") {
            self.read_file(name)
        } else {
            OutgoingResponse::empty(Status::NOT_FOUND)
        }
    }

    fn handle_post(&self, request: &RawRequest) -> OutgoingResponse {
        let Some(name) = request.path().strip_prefix("/files/") else {
            return OutgoingResponse::empty(Status::NOT_FOUND);
        };
        let Some(path) = self.resolve(name) else {
            return OutgoingResponse::empty(Status::NOT_FOUND);
        };

        // The write route requires explicit length framing; without it the
        // body read above defaulted to empty, which is not what the client
        // meant to store.
        if !request.headers().contains("content-length") {
            return OutgoingResponse::empty(Status::BAD_REQUEST);
        }

        self.write_file(&path, request.body())
    }

    fn read_file(&self, name: &str) -> OutgoingResponse {
        let Some(path) = self.resolve(name) else {
            return OutgoingResponse::empty(Status::NOT_FOUND);
        };

        match fs::read(&path) {
            Ok(contents) => OutgoingResponse::with_body(Status::OK, OCTET_STREAM, contents),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                OutgoingResponse::empty(Status::NOT_FOUND)
            }
            Err(err) => {
                error!("reading {}: {}", path.display(), err);
                OutgoingResponse::empty(Status::INTERNAL_SERVER_ERROR)
            }
        }
    }

    fn write_file(&self, path: &Path, body: &[u8]) -> OutgoingResponse {
        match fs::write(path, body) {
            Ok(()) => OutgoingResponse::empty(Status::CREATED),
            Err(err) => {
                error!("writing {}: {}", path.display(), err);
                OutgoingResponse::empty(Status::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Resolve a client-supplied file name against the base directory
    ///
    /// Yields `None` when no directory is configured, or when the name
    /// would escape it. Only plain path segments are accepted; `..`, `.`,
    /// absolute paths and empty names are all rejected, so the joined path
    /// cannot leave the base directory.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let base = self.config.directory.as_deref()?;

        let relative = Path::new(name);
        let contained = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !contained {
            warn!("rejected file name {:?}", name);
            return None;
        }

        Some(base.join(relative))
    }
}
