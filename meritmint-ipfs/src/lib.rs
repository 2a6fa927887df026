//! Metadata publishing collaborator: a blocking pinning client for a
//! web3.storage-style endpoint, plus an in-memory fake for tests. Publish
//! failures are never fatal to a mint; the registry substitutes its local
//! fallback identifier.

use std::sync::Mutex;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use meritmint_registry::mint::{MetadataPublisher, PublishFailure};
use meritmint_registry::state::NftMetadata;

const DEFAULT_ENDPOINT: &str = "https://api.web3.storage/upload";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upload rejected with status {code}")]
    Status { code: u16 },

    #[error("upload response missing cid: {0}")]
    Decode(String),
}

/// Public gateway URL for a content identifier.
pub fn gateway_url(cid: &str) -> String {
    format!("https://{cid}.ipfs.w3s.link")
}

// ─── HTTP client ────────────────────────────────────────────────────────────

/// Bearer-token client posting the metadata JSON body and reading the `cid`
/// field of the response.
pub struct Web3StorageClient {
    endpoint: String,
    token: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct UploadResponse {
    cid: String,
}

impl Web3StorageClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(token, DEFAULT_ENDPOINT)
    }

    /// Endpoint override, used by tests and self-hosted pinning services.
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client: reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn upload(&self, metadata: &NftMetadata) -> Result<String, PublishError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(metadata)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Status {
                code: status.as_u16(),
            });
        }
        let body: UploadResponse = response
            .json()
            .map_err(|e| PublishError::Decode(e.to_string()))?;
        debug!(cid = %body.cid, "metadata pinned");
        Ok(body.cid)
    }
}

impl MetadataPublisher for Web3StorageClient {
    fn publish(&self, metadata: &NftMetadata) -> Result<String, PublishFailure> {
        Ok(self.upload(metadata)?)
    }
}

// ─── Test fake ──────────────────────────────────────────────────────────────

/// Records everything published and answers with a fixed identifier.
#[derive(Default)]
pub struct MemoryPublisher {
    cid: String,
    published: Mutex<Vec<NftMetadata>>,
}

impl MemoryPublisher {
    pub fn new(cid: impl Into<String>) -> Self {
        Self {
            cid: cid.into(),
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn published(&self) -> Vec<NftMetadata> {
        self.published
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl MetadataPublisher for MemoryPublisher {
    fn publish(&self, metadata: &NftMetadata) -> Result<String, PublishFailure> {
        if let Ok(mut records) = self.published.lock() {
            records.push(metadata.clone());
        }
        Ok(self.cid.clone())
    }
}
