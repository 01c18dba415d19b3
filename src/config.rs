//! Server configuration
//!
//! Parsed once at startup from the command line and never mutated
//! afterwards; connection threads share it behind an `Arc`.

use clap::builder::TypedValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Command-line options
#[derive(Debug, Parser)]
#[command(name = "picohttpd", about = "A minimal single-exchange HTTP/1.1 server")]
pub struct Cli {
    /// Base directory served under /files/; the route family answers 404
    /// when unset
    #[arg(long, value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from))]
    pub directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:4221")]
    pub listen: String,
}

/// Immutable process-lifetime configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base directory for the `/files/` routes; `None` disables them
    pub directory: Option<PathBuf>,
    /// Listen address, `host:port`
    pub listen: String,
}

impl ServerConfig {
    /// Freeze the parsed command line into a configuration
    ///
    /// An empty `--directory` value counts as unset.
    pub fn from_cli(cli: Cli) -> Self {
        ServerConfig {
            directory: cli.directory.filter(|d| !d.as_os_str().is_empty()),
            listen: cli.listen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listen_address() {
        let cli = Cli::parse_from(["picohttpd"]);
        let config = ServerConfig::from_cli(cli);

        assert_eq!(config.listen, "0.0.0.0:4221");
        assert_eq!(config.directory, None);
    }

    #[test]
    fn test_directory_flag() {
        let cli = Cli::parse_from(["picohttpd", "--directory", "/tmp/files"]);
        let config = ServerConfig::from_cli(cli);

        assert_eq!(config.directory, Some(PathBuf::from("/tmp/files")));
    }

    #[test]
    fn test_empty_directory_counts_as_unset() {
        let cli = Cli::parse_from(["picohttpd", "--directory", ""]);
        let config = ServerConfig::from_cli(cli);

        assert_eq!(config.directory, None);
    }
}
