//! Scripted stand-ins for the browser, transfer and reasoning seams,
//! shared by the unit tests.

use crate::BoxError;
use crate::browser::PageBrowser;
use crate::reason::{Reasoner, ResponsePart};
use crate::results::Attachment;
use crate::transfer::Transfer;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Browser stub serving canned pages keyed by URL
pub struct StubBrowser {
    pages: HashMap<String, (String, String)>,
    current: String,
    pub visits: Vec<String>,
}

impl StubBrowser {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            current: String::new(),
            visits: Vec::new(),
        }
    }

    /// Register a page under a URL: (text, html)
    pub fn page(mut self, url: &str, text: &str, html: &str) -> Self {
        self.pages
            .insert(url.to_string(), (text.to_string(), html.to_string()));
        self
    }
}

impl PageBrowser for StubBrowser {
    async fn navigate(&mut self, url: &str) -> Result<(), BoxError> {
        self.visits.push(url.to_string());
        if self.pages.contains_key(url) {
            self.current = url.to_string();
            Ok(())
        } else {
            Err(format!("no such page: {}", url).into())
        }
    }

    async fn current_url(&mut self) -> Result<String, BoxError> {
        if self.current.is_empty() {
            Err("no page loaded".into())
        } else {
            Ok(self.current.clone())
        }
    }

    async fn visible_text(&mut self) -> Result<String, BoxError> {
        self.pages
            .get(&self.current)
            .map(|(text, _)| text.clone())
            .ok_or_else(|| "no page loaded".into())
    }

    async fn source(&mut self) -> Result<String, BoxError> {
        self.pages
            .get(&self.current)
            .map(|(_, html)| html.clone())
            .ok_or_else(|| "no page loaded".into())
    }
}

/// Transfer stub with canned resources and queued submission responses
pub struct StubTransfer {
    resources: HashMap<String, Vec<u8>>,
    post_responses: Mutex<VecDeque<String>>,
    posts: Mutex<Vec<(String, Value)>>,
    fail_posts: bool,
}

impl StubTransfer {
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
            post_responses: Mutex::new(VecDeque::new()),
            posts: Mutex::new(Vec::new()),
            fail_posts: false,
        }
    }

    /// Register a fetchable resource
    pub fn resource(mut self, url: &str, bytes: &[u8]) -> Self {
        self.resources.insert(url.to_string(), bytes.to_vec());
        self
    }

    /// Queue a response body for the next submission POST
    pub fn post_response(self, body: &str) -> Self {
        self.post_responses
            .lock()
            .unwrap()
            .push_back(body.to_string());
        self
    }

    /// Make every submission POST fail at the transport level
    pub fn failing_posts(mut self) -> Self {
        self.fail_posts = true;
        self
    }

    /// Submissions recorded so far, as (url, payload) pairs
    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }
}

impl Transfer for StubTransfer {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, BoxError> {
        self.resources
            .get(url)
            .cloned()
            .ok_or_else(|| format!("fetch failed for {}", url).into())
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<String, BoxError> {
        if self.fail_posts {
            return Err("connection refused".into());
        }
        self.posts
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        self.post_responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| "no response queued".into())
    }
}

/// Reasoner stub returning canned response parts, or failing outright
pub struct StubReasoner {
    parts: Vec<ResponsePart>,
    fail: bool,
}

impl StubReasoner {
    /// A reasoner whose every invocation fails
    pub fn failing() -> Self {
        Self {
            parts: Vec::new(),
            fail: true,
        }
    }

    /// A reasoner returning the given parts
    pub fn with_parts(parts: Vec<ResponsePart>) -> Self {
        Self { parts, fail: false }
    }

    /// A reasoner that answers with a single JSON text part
    pub fn answering(payload: Value) -> Self {
        Self::with_parts(vec![ResponsePart::Text(payload.to_string())])
    }
}

impl Reasoner for StubReasoner {
    async fn generate(
        &self,
        _prompt: &str,
        _attachments: &[Attachment],
    ) -> Result<Vec<ResponsePart>, BoxError> {
        if self.fail {
            return Err("engine unavailable".into());
        }
        Ok(self.parts.clone())
    }
}
