//! Server binary: bind, accept, one thread per connection.

use clap::Parser;
use log::{error, info, warn};
use picohttpd::config::{Cli, ServerConfig};
use picohttpd::http::{Connection, TcpSessionOps};
use picohttpd::router::Router;
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Arc::new(ServerConfig::from_cli(Cli::parse()));
    let listener = TcpListener::bind(&config.listen)?;
    info!("listening on {}", config.listen);
    if let Some(dir) = &config.directory {
        info!("serving files from {}", dir.display());
    }

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                // Accept failures must not take the listener down.
                error!("accept failed: {}", err);
                continue;
            }
        };

        let config = Arc::clone(&config);
        thread::spawn(move || {
            let peer = stream
                .peer_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| "unknown".to_string());

            let router = Router::new(config);
            let mut connection = Connection::new(TcpSessionOps::new(stream));
            if let Err(err) = connection.serve(&router) {
                warn!("{}: {}", peer, err);
            }
        });
    }

    Ok(())
}
