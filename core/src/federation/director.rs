//! HTTP client for the federation director

use crate::error::{FederationError, Result};
use crate::federation::{headers, FederationInfo};
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::{debug, info};

/// Path of the director's origin resolution endpoint
const ORIGIN_ENDPOINT: &str = "/api/v1.0/director/origin";

/// Client for resolving federation paths against the director
pub struct DirectorClient {
    client: reqwest::Client,
    base_url: String,
}

impl DirectorClient {
    /// Create a new director client
    ///
    /// Redirects are never followed: the director answers with a redirect
    /// to its preferred origin, but the full candidate set is read out of
    /// the response headers instead. Not following also keeps the client
    /// from being steered to arbitrary hosts.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Resolve a federation path to its origins and namespace
    pub async fn locate(&self, federation_path: &str) -> Result<FederationInfo> {
        let url = format!("{}{}{}", self.base_url, ORIGIN_ENDPOINT, federation_path);
        debug!("querying director: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(FederationError::Director {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let headers = response.headers();
        let origins = headers::parse_link_header(header_str(headers, "link")?)?;
        info!("origin urls: {:?}", origins);

        let namespace = headers::parse_namespace_header(header_str(headers, "x-pelican-namespace")?)?;
        info!("federation namespace: {}", namespace);

        Ok(FederationInfo::new(origins, namespace))
    }
}

/// Look up a header and decode it as a string
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str> {
    let value = headers
        .get(name)
        .ok_or_else(|| FederationError::MissingHeader {
            name: name.to_string(),
        })?;

    value.to_str().map_err(|_| {
        FederationError::MalformedHeader {
            name: name.to_string(),
            value: format!("{value:?}"),
        }
        .into()
    })
}
