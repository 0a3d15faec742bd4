use crate::BoxError;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;

/// Browser capability consumed by the evidence extractor.
///
/// One implementation drives a real WebDriver session; tests substitute
/// a scripted stub. Structure extraction happens over the raw source, so
/// four operations are all the extractor ever needs.
pub trait PageBrowser {
    /// Navigate to a URL and wait until the page is ready
    async fn navigate(&mut self, url: &str) -> Result<(), BoxError>;

    /// The URL of the current page, after any redirects
    async fn current_url(&mut self) -> Result<String, BoxError>;

    /// Rendered visible text of the current page
    async fn visible_text(&mut self) -> Result<String, BoxError>;

    /// Raw markup of the current page
    async fn source(&mut self) -> Result<String, BoxError>;
}

/// WebDriver-backed browser session
pub struct WebDriverBrowser {
    client: Client,
    settle: Duration,
}

impl WebDriverBrowser {
    /// Connect to a WebDriver server, trying common fallback URLs if the
    /// configured one is unreachable
    pub async fn connect(webdriver_url: &str, settle_ms: u64) -> Result<Self, BoxError> {
        let client = connect_with_fallbacks(webdriver_url).await?;
        Ok(Self {
            client,
            settle: Duration::from_millis(settle_ms),
        })
    }

    /// Close the underlying WebDriver session
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }
    }
}

impl PageBrowser for WebDriverBrowser {
    async fn navigate(&mut self, url: &str) -> Result<(), BoxError> {
        self.client.goto(url).await?;
        // WebDriver has no network-idle signal; a short settle delay stands in
        tokio::time::sleep(self.settle).await;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, BoxError> {
        let url = self.client.current_url().await?;
        Ok(url.to_string())
    }

    async fn visible_text(&mut self) -> Result<String, BoxError> {
        let body = self.client.find(Locator::Css("body")).await?;
        Ok(body.text().await?)
    }

    async fn source(&mut self) -> Result<String, BoxError> {
        Ok(self.client.source().await?)
    }
}

/// Connects to the WebDriver instance, falling back to common server ports
async fn connect_with_fallbacks(webdriver_url: &str) -> Result<Client, BoxError> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4723", // Appium default
        "http://localhost:9222", // Chrome debug port default
        "http://127.0.0.1:4444", // Try with IP instead of localhost
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue; // Skip if it's the same as the one we already tried
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        match ClientBuilder::native().connect(url).await {
            Ok(client) => {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(client);
            }
            Err(_) => {
                // Don't log errors for fallbacks to avoid log spam
            }
        }
    }

    ::log::error!("Failed to connect to any WebDriver servers");
    Err("no WebDriver server reachable; start one or set WEBDRIVER_URL".into())
}
