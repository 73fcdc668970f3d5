//! HTTP server command
//!
//! Opens (and if needed creates) the database, then serves the glossary
//! pages until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use glossary_server::{run_server, Database, ServerConfig};

use crate::config::GlossaryConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:5000)
    #[arg(long, short = 'b', env = "GLOSSARY_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database file path (default from config: ~/.glossary/glossary.db)
    #[arg(long, env = "GLOSSARY_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ServeArgs {
    /// Merge flags over the config file.
    fn resolve(self, config: &GlossaryConfig) -> (PathBuf, ServerConfig) {
        let db_path = self.db_path.unwrap_or_else(|| config.database.path.clone());
        let server = ServerConfig {
            bind_addr: self.bind.unwrap_or(config.server.bind),
            request_timeout: Duration::from_secs(
                self.timeout.unwrap_or(config.server.timeout_secs),
            ),
        };
        (db_path, server)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &GlossaryConfig) -> Result<()> {
    let (db_path, server_config) = args.resolve(config);

    tracing::info!("Starting glossary server on {}", server_config.bind_addr);

    let db = Database::open(&db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    // Run server (blocks until shutdown)
    run_server(db, server_config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let config = GlossaryConfig::default();
        let args = ServeArgs {
            bind: Some("0.0.0.0:8000".parse().unwrap()),
            db_path: Some(PathBuf::from("/tmp/other.db")),
            timeout: Some(5),
        };

        let (db_path, server) = args.resolve(&config);

        assert_eq!(db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(server.bind_addr.port(), 8000);
        assert_eq!(server.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn config_fills_missing_flags() {
        let config = GlossaryConfig::default();

        let (db_path, server) = ServeArgs::default().resolve(&config);

        assert_eq!(db_path, config.database.path);
        assert_eq!(server.bind_addr, config.server.bind);
        assert_eq!(server.request_timeout, Duration::from_secs(30));
    }
}
