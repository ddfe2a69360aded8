// HTTP client for the ContentProof API

use std::time::Duration;

use anyhow::{anyhow, Result};
use contentproof_crypto::Metadata;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const DEFAULT_SERVER: &str = "http://localhost:8080";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of `POST /api/v1/content`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub user_id: Uuid,
    pub wallet_address: String,
    pub file_name: String,
    pub file_type: String,
    /// Base64-encoded content bytes
    pub content: String,
    pub metadata: Metadata,
}

pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Registers content and returns the `content` object of the response.
    pub fn upload(&self, request: &UploadRequest) -> Result<Value> {
        let response = self
            .agent
            .post(&self.endpoint("/content"))
            .send_json(request);
        let body = read_body(response)?;
        Ok(body["content"].clone())
    }

    /// Fetches the verification record for a content hash.
    pub fn lookup(&self, digest: &str) -> Result<Value> {
        let response = self
            .agent
            .get(&self.endpoint(&format!("/content/verify/{}", digest)))
            .call();
        let body = read_body(response)?;
        Ok(body["verification"].clone())
    }
}

/// Turns a ureq result into the JSON body, surfacing the server's
/// `{error}` message on non-2xx statuses.
fn read_body(result: std::result::Result<ureq::Response, ureq::Error>) -> Result<Value> {
    match result {
        Ok(response) => response
            .into_json::<Value>()
            .map_err(|e| anyhow!("Invalid response from server: {}", e)),
        Err(ureq::Error::Status(code, response)) => {
            let message = response
                .into_json::<Value>()
                .ok()
                .and_then(|body| body["error"].as_str().map(str::to_string))
                .unwrap_or_else(|| "no error message".to_string());
            Err(anyhow!("Server returned {}: {}", code, message))
        }
        Err(ureq::Error::Transport(e)) => Err(anyhow!("Request failed: {}", e)),
    }
}
