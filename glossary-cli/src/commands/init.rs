//! Database initialization command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use glossary_server::Database;

use crate::config::GlossaryConfig;

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Database file path (default from config: ~/.glossary/glossary.db)
    #[arg(long, env = "GLOSSARY_DB_PATH")]
    pub db_path: Option<PathBuf>,
}

/// Create the database file and its tables, then exit.
///
/// Safe to run against an existing database; nothing is dropped.
pub async fn run_init(args: InitArgs, config: &GlossaryConfig) -> Result<()> {
    let db_path = args
        .db_path
        .unwrap_or_else(|| config.database.path.clone());

    let db = Database::open(&db_path)
        .await
        .with_context(|| format!("Failed to initialize database at {}", db_path.display()))?;
    db.close().await;

    println!("Initialized glossary database at {}", db_path.display());
    Ok(())
}
