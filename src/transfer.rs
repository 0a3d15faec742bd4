use crate::BoxError;
use serde_json::Value;

/// HTTP transfer capability: fetch raw resources and submit JSON answers.
///
/// The submission response is returned as body text rather than parsed
/// JSON, so the caller can tell a non-JSON body apart from a transport
/// failure.
pub trait Transfer {
    /// Fetch a resource and return its raw bytes
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, BoxError>;

    /// POST a JSON body and return the response body text
    async fn post_json(&self, url: &str, body: &Value) -> Result<String, BoxError>;
}

/// reqwest-backed transfer implementation
pub struct HttpTransfer {
    client: reqwest::Client,
}

impl HttpTransfer {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransfer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transfer for HttpTransfer {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, BoxError> {
        let response = self.client.get(url).send().await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<String, BoxError> {
        let response = self.client.post(url).json(body).send().await?;
        Ok(response.text().await?)
    }
}
