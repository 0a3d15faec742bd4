#![allow(async_fn_in_trait)]

// Re-export modules
pub mod browser;
pub mod chain;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod reason;
pub mod results;
pub mod server;
pub mod submit;
pub mod transfer;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types for convenience
pub use config::{Identity, SolverConfig};
pub use results::{ChainReport, EvidenceBundle};

/// Boxed error type shared by the fallible seams of the crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

use crate::browser::WebDriverBrowser;
use crate::reason::GeminiReasoner;
use crate::transfer::HttpTransfer;

/// Main builder for configuring and running one quiz-solving chain
pub struct Solver {
    start_url: String,
    config: SolverConfig,
    identity: Option<Identity>,
}

impl Solver {
    /// Create a new Solver for the given starting quiz URL
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            config: SolverConfig::new(),
            identity: None,
        }
    }

    /// Set the full configuration
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self, BoxError> {
        let config = SolverConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Set the identity submitted with every answer
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Set the maximum number of chain steps
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = max_steps;
        self
    }

    /// Set the WebDriver server URL
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Run the chain to completion and report how it ended
    pub async fn run(self) -> Result<ChainReport, BoxError> {
        let mut config = self.config;

        // Environment overrides beat file/builder settings
        config.apply_env();

        let identity = self.identity.unwrap_or_else(|| config.identity());
        let api_key = config
            .api_key
            .clone()
            .ok_or("GEMINI_API_KEY is not set and no api_key was configured")?;

        let mut browser = WebDriverBrowser::connect(&config.webdriver_url, config.settle_ms).await?;
        let transfer = HttpTransfer::new();
        let reasoner = GeminiReasoner::new(&api_key, &config.model);

        let result = chain::run_chain(
            &mut browser,
            &transfer,
            &reasoner,
            &config,
            &identity,
            &self.start_url,
        )
        .await;

        browser.close().await;
        result
    }
}
