//! Object transfer against resolved origins

use crate::credentials::CredentialStore;
use crate::error::{Error, Result, TransferError};
use crate::federation::FederationInfo;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::AUTHORIZATION;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Download an object to a local file
    Get,

    /// Upload a local file as an object
    Put,
}

impl Direction {
    /// Scope operations that authorize this direction
    pub fn required_scopes(&self) -> &'static [&'static str] {
        match self {
            Direction::Get => &["storage.read"],
            Direction::Put => &["storage.create", "storage.modify"],
        }
    }
}

/// A single object transfer
#[derive(Debug, Clone)]
pub struct Transfer {
    /// Logical federation URL of the object
    pub url: String,

    /// Local file to write to (get) or read from (put)
    pub local_path: PathBuf,

    /// Transfer direction
    pub direction: Direction,
}

impl Transfer {
    /// Create a new transfer
    pub fn new(url: impl Into<String>, local_path: impl Into<PathBuf>, direction: Direction) -> Self {
        Self {
            url: url.into(),
            local_path: local_path.into(),
            direction,
        }
    }

    /// Splice the object path onto an origin endpoint
    ///
    /// Joining through `Url` keeps a trailing slash on the origin from
    /// doubling up with the leading slash of the object path.
    fn origin_url(&self, origin: &str, object_path: &str) -> Result<String> {
        Ok(Url::parse(origin)?.join(object_path)?.to_string())
    }

    /// Execute the transfer with fallback across candidate origins
    ///
    /// Origins are tried in randomized order, up to `attempts` total
    /// tries. The first success wins; if every attempt fails the last
    /// error propagates.
    pub async fn execute(
        &self,
        store: &CredentialStore,
        federation: &FederationInfo,
        attempts: u8,
    ) -> Result<()> {
        let object_path = federation.object_path(&self.url)?;
        debug!("object path within namespace: {}", object_path);

        let credential = store.select(self.direction, object_path)?;

        // Following redirects opens the client up to SSRF vulnerabilities.
        // No total timeout: large objects take as long as they take.
        let client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        let origins = federation.candidate_origins()?;
        let mut last_error: Option<Error> = None;
        for origin in origins.iter().cycle().take(attempts.max(1) as usize) {
            let target = self.origin_url(origin, object_path)?;
            info!("using origin url: {}", target);

            let result = match self.direction {
                Direction::Get => self.download(&client, &credential.access_token, &target).await,
                Direction::Put => self.upload(&client, &credential.access_token, &target).await,
            };

            match result {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!("transfer attempt against {} failed: {}", origin, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| Error::Generic("no transfer attempts were made".to_string())))
    }

    /// Stream the object to the local file
    async fn download(&self, client: &reqwest::Client, token: &str, url: &str) -> Result<()> {
        let response = client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(failed_response(response).await.into());
        }

        // Only touch the local file once the origin has accepted the request
        let mut file = tokio::fs::File::create(&self.local_path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(())
    }

    /// Upload the local file as the object body
    async fn upload(&self, client: &reqwest::Client, token: &str, url: &str) -> Result<()> {
        let body = Bytes::from(tokio::fs::read(&self.local_path).await?);

        let response = client
            .put(url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(failed_response(response).await.into());
        }

        Ok(())
    }
}

/// Turn a non-success response into a transfer error carrying the body
async fn failed_response(response: reqwest::Response) -> TransferError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "<no body>".to_string());
    TransferError::Failed { status, message }
}
