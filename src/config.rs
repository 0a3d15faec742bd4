use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the quiz chain solver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Reasoning model invoked for each quiz page
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the reasoning engine (usually supplied via GEMINI_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Email submitted with every answer
    #[serde(default)]
    pub email: String,

    /// Shared secret submitted with every answer and checked on inbound triggers
    #[serde(default)]
    pub secret: String,

    /// Maximum number of chain steps before the chain is cut off
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Delay in seconds before each reasoning engine call
    #[serde(default = "default_reason_delay_secs")]
    pub reason_delay_secs: u64,

    /// Delay in milliseconds after navigation, letting the page settle
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Number of retries for a failed submission POST
    #[serde(default = "default_submit_retries")]
    pub submit_retries: usize,

    /// Address the trigger endpoint binds to in server mode
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

/// Identity submitted with every answer in a chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub secret: String,
}

impl SolverConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            model: default_model(),
            api_key: None,
            email: String::new(),
            secret: String::new(),
            max_steps: default_max_steps(),
            reason_delay_secs: default_reason_delay_secs(),
            settle_ms: default_settle_ms(),
            submit_retries: default_submit_retries(),
            bind_addr: default_bind_addr(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Override settings from environment variables where present
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            if !api_key.is_empty() {
                self.api_key = Some(api_key);
            }
        }
        if let Ok(secret) = std::env::var("SECRET") {
            if !secret.is_empty() {
                self.secret = secret;
            }
        }
    }

    /// The identity derived from the configured email and secret
    pub fn identity(&self) -> Identity {
        Identity {
            email: self.email.clone(),
            secret: self.secret.clone(),
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default reasoning model
fn default_model() -> String {
    "gemini-2.5-pro".to_string()
}

/// Default maximum number of chain steps
fn default_max_steps() -> usize {
    25
}

/// Default delay before each reasoning call
fn default_reason_delay_secs() -> u64 {
    3
}

/// Default post-navigation settle delay
fn default_settle_ms() -> u64 {
    500
}

/// Default number of submission retries
fn default_submit_retries() -> usize {
    2
}

/// Default bind address for server mode
fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::new();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.max_steps, 25);
        assert_eq!(config.reason_delay_secs, 3);
        assert_eq!(config.submit_retries, 2);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"email": "solver@example.com", "secret": "hunter2"}"#)
                .unwrap();
        assert_eq!(config.email, "solver@example.com");
        assert_eq!(config.secret, "hunter2");
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.max_steps, 25);
    }

    #[test]
    fn test_identity() {
        let mut config = SolverConfig::new();
        config.email = "solver@example.com".to_string();
        config.secret = "hunter2".to_string();

        let identity = config.identity();
        assert_eq!(identity.email, "solver@example.com");
        assert_eq!(identity.secret, "hunter2");
    }
}
