//! Object get/put commands

use anyhow::{Context, Result};
use pelican_client_core::{federation, CredentialStore, Direction, DirectorClient, Transfer};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::ConfigLoader;

/// Download an object to a local file
pub async fn get_command(url: String, filename: PathBuf, config_loader: ConfigLoader) -> Result<()> {
    run_transfer(Transfer::new(url, filename, Direction::Get), config_loader).await
}

/// Upload a local file as an object
pub async fn put_command(filename: PathBuf, url: String, config_loader: ConfigLoader) -> Result<()> {
    run_transfer(Transfer::new(url, filename, Direction::Put), config_loader).await
}

/// Resolve credentials and federation info, then run one transfer
async fn run_transfer(transfer: Transfer, config_loader: ConfigLoader) -> Result<()> {
    let config = config_loader.load()?;
    debug!("resolved config: {:?}", config);

    // Reject non-federation URLs before any network traffic
    let path = federation::federation_path(&transfer.url)
        .with_context(|| format!("cannot transfer {}", transfer.url))?;

    let store = CredentialStore::load(&config.credential_dir)
        .await
        .context("failed to load credentials")?;
    debug!("loaded {} credential(s)", store.len());

    let director = DirectorClient::new(&config.director_url, config.request_timeout)
        .context("failed to build director client")?;
    let federation = director
        .locate(path)
        .await
        .with_context(|| format!("failed to resolve {} through the director", transfer.url))?;

    transfer
        .execute(&store, &federation, config.attempts)
        .await
        .context("transfer failed")?;

    info!(
        "transfer complete: {} <-> {}",
        transfer.url,
        transfer.local_path.display()
    );

    Ok(())
}
