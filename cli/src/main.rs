//! # dumb_pelican_client CLI
//!
//! Command-line client for Pelican-style object storage federations.
//!
//! ## Usage
//!
//! - `dumb_pelican_client object get <url> <filename>` - Download an object
//! - `dumb_pelican_client object put <filename> <url>` - Upload an object
//!
//! Credentials come from the HTCondor credential directory named by the
//! `_CONDOR_CREDS` environment variable (or `--cred-dir`).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{get_command, put_command};
use config::ConfigLoader;

/// dumb_pelican_client - a simpler, more-correct Pelican client
#[derive(Parser)]
#[command(name = "dumb_pelican_client")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Get and put objects against a Pelican object storage federation")]
#[command(long_about = None)]
struct Cli {
    /// Log level filter (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Total transfer attempts across candidate origins
    #[arg(short, long, default_value_t = 1)]
    retries: u8,

    /// Federation director URL override
    #[arg(long)]
    director_url: Option<String>,

    /// Credential directory override (defaults to $_CONDOR_CREDS)
    #[arg(long)]
    cred_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Operate on single objects
    Object(ObjectArgs),
}

#[derive(Args)]
struct ObjectArgs {
    #[command(subcommand)]
    command: ObjectCommands,
}

#[derive(Subcommand)]
enum ObjectCommands {
    /// Download an object to a local file
    Get {
        /// Federation URL of the object (osdf://...)
        url: String,

        /// Local file to write
        filename: PathBuf,
    },

    /// Upload a local file as an object
    Put {
        /// Local file to read
        filename: PathBuf,

        /// Federation URL of the object (osdf://...)
        url: String,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> ConfigLoader {
    let mut loader = ConfigLoader::new().with_attempts(cli.retries);

    if let Some(director_url) = &cli.director_url {
        loader = loader.with_director_override(director_url.clone());
    }

    if let Some(cred_dir) = &cli.cred_dir {
        loader = loader.with_cred_dir_override(cred_dir.clone());
    }

    loader
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; transfers log to stderr so stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(cli.log_level.clone()))
        .with_writer(std::io::stderr)
        .init();

    let config_loader = build_config_loader(&cli);

    let result = match &cli.command {
        Commands::Object(object) => match &object.command {
            ObjectCommands::Get { url, filename } => {
                get_command(url.clone(), filename.clone(), config_loader).await
            }
            ObjectCommands::Put { filename, url } => {
                put_command(filename.clone(), url.clone(), config_loader).await
            }
        },
    };

    if let Err(e) = result {
        tracing::error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
