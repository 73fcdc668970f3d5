//! glossary CLI - personal glossary manager
//!
//! Entry point for the `glossary` binary:
//! - `serve` runs the web interface (sections, terms, edit/delete forms)
//! - `init` creates the SQLite database explicitly
//! - `config` inspects the configuration file

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::GlossaryConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "glossary",
    author,
    version,
    about = "Personal glossary: terms organized into named sections, served as a small web app"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the glossary web server
    Serve(commands::serve::ServeArgs),
    /// Create the database file and tables
    Init(commands::init::InitArgs),
    /// Inspect glossary configuration (path, show)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values feed clap's `env` fallbacks, so load them first
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => {
            let config = GlossaryConfig::load()?;
            commands::serve::run_serve(args, &config).await
        }
        Commands::Init(args) => {
            let config = GlossaryConfig::load()?;
            commands::init::run_init(args, &config).await
        }
        Commands::Config(args) => config::run_config(args),
    }
}
