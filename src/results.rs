use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Snapshot of a rendered quiz page, captured once per chain step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Final URL after any redirects
    pub url: String,

    /// Rendered visible text
    pub text: String,

    /// Raw document markup
    pub html: String,
}

/// Text and markup captured from a same-host linked page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedPage {
    pub text: String,
    pub html: String,
}

/// Structured extraction result for one page visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceBundle {
    /// The page this evidence was extracted from
    pub snapshot: PageSnapshot,

    /// JSON values successfully parsed out of <pre>/<code> blocks, in document order
    pub json_templates: Vec<serde_json::Value>,

    /// Inferred submission endpoint, if any
    pub submit_url: Option<String>,

    /// Hyperlink targets classified by file extension
    pub pdf_links: Vec<String>,
    pub csv_links: Vec<String>,
    pub audio_links: Vec<String>,
    pub image_links: Vec<String>,

    /// Same-host pages reached from this one, keyed by absolute URL
    pub linked_pages: HashMap<String, LinkedPage>,

    /// Inline <script> bodies (scripts without a src attribute)
    pub inline_scripts: Vec<String>,
}

/// Binary evidence retrieved for one classified resource link
#[derive(Debug, Clone)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

/// Why a chain stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEnd {
    /// The submission response carried no continuation URL
    Completed,
    /// The submission response was not parseable JSON
    NonJsonResponse,
    /// The configured step limit was reached
    StepLimit,
    /// The next URL was already visited in this chain
    Revisited,
}

/// Summary of a finished chain
#[derive(Debug, Clone)]
pub struct ChainReport {
    /// Number of quiz steps executed
    pub steps: usize,

    /// How the chain terminated
    pub end: ChainEnd,

    /// The last quiz page the chain worked on
    pub last_url: String,
}
