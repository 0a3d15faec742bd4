use crate::BoxError;
use crate::config::Identity;
use crate::results::{Attachment, EvidenceBundle};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use serde_json::{Value, json};
use std::time::Duration;

/// One fragment of a reasoning engine response, in arrival order
#[derive(Debug, Clone)]
pub enum ResponsePart {
    /// Plain response text
    Text(String),
    /// Output of engine-executed code
    CodeOutput(String),
    /// Code the engine generated
    GeneratedCode(String),
}

impl ResponsePart {
    fn fragment(&self) -> &str {
        match self {
            ResponsePart::Text(t) => t,
            ResponsePart::CodeOutput(t) => t,
            ResponsePart::GeneratedCode(t) => t,
        }
    }
}

/// Reasoning engine capability: prompt plus attachments in, response
/// fragments out. The engine is a black box to the rest of the chain.
pub trait Reasoner {
    async fn generate(
        &self,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<Vec<ResponsePart>, BoxError>;
}

/// Gemini generateContent client with code execution, URL context and
/// web search tools enabled
pub struct GeminiReasoner {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiReasoner {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        )
    }
}

impl Reasoner for GeminiReasoner {
    async fn generate(
        &self,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<Vec<ResponsePart>, BoxError> {
        let mut parts = vec![json!({ "text": prompt })];
        for attachment in attachments {
            parts.push(json!({
                "inline_data": {
                    "mime_type": attachment.mime,
                    "data": STANDARD.encode(&attachment.bytes),
                }
            }));
        }

        let body = json!({
            "contents": [{ "parts": parts }],
            "tools": [
                { "code_execution": {} },
                { "url_context": {} },
                { "google_search": {} }
            ]
        });

        let response: Value = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(collect_parts(&response))
    }
}

/// Flattens the first candidate's parts into response fragments.
///
/// Within one part the scan order is text, then executed-code output,
/// then generated code; downstream JSON extraction depends on this
/// ordering because the last parseable fragment wins.
fn collect_parts(response: &Value) -> Vec<ResponsePart> {
    let mut collected = Vec::new();

    let Some(parts) = response["candidates"][0]["content"]["parts"].as_array() else {
        return collected;
    };

    for part in parts {
        if let Some(text) = part["text"].as_str() {
            collected.push(ResponsePart::Text(text.to_string()));
        }
        if let Some(output) = part["codeExecutionResult"]["output"].as_str() {
            collected.push(ResponsePart::CodeOutput(output.to_string()));
        }
        if let Some(code) = part["executableCode"]["code"].as_str() {
            ::log::debug!("Engine generated code:\n{}", code);
            collected.push(ResponsePart::GeneratedCode(code.to_string()));
        }
    }

    collected
}

/// Builds the instruction sent to the engine for one quiz page
pub fn build_prompt(url: &str, page_text: &str, identity: &Identity) -> String {
    format!(
        r#"You are an expert data scientist who can solve quizzes given in any webpage as quickly as possible
This is the url of the current page: {url}
This is the content of the web page: {page_text}

IMPORTANT
    - Always return ONLY a JSON object in code execution output like:
        {{
            "email": "{email}",
            "secret": "{secret}",
            "url": "{url}",
            "answer": 12345
        }}
"#,
        url = url,
        page_text = page_text,
        email = identity.email,
        secret = identity.secret,
    )
}

/// Pulls a JSON object out of a response fragment: code fences are
/// stripped, then the widest brace-delimited span is parsed
pub fn extract_json(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }

    let fence_re = Regex::new(r"```\w*").expect("Invalid fence pattern");
    let brace_re = Regex::new(r"\{[\s\S]*\}").expect("Invalid brace pattern");

    let defenced = fence_re.replace_all(text, "");
    let span = brace_re.find(&defenced)?;
    serde_json::from_str(span.as_str()).ok()
}

/// The last parseable JSON object across all response fragments, if any
pub fn final_json_from_parts(parts: &[ResponsePart]) -> Option<Value> {
    let mut final_json = None;
    for part in parts {
        if let Some(parsed) = extract_json(part.fragment()) {
            final_json = Some(parsed);
        }
    }
    final_json
}

/// Stub payload used when the engine produces nothing usable
pub fn stub_payload(identity: &Identity, url: &str) -> Value {
    json!({
        "email": identity.email,
        "secret": identity.secret,
        "url": url,
        "answer": "unknown",
    })
}

/// Invokes the reasoning engine over the assembled evidence and extracts
/// the answer payload.
///
/// Never fails: engine errors and unparseable output both degrade to the
/// stub payload. Returns the resolved submission URL (the bundle's, else
/// the carried fallback) together with the payload.
pub async fn compute_answer<R: Reasoner>(
    reasoner: &R,
    bundle: &EvidenceBundle,
    attachments: &[Attachment],
    identity: &Identity,
    prev_submit: &Option<String>,
    delay: Duration,
) -> (Option<String>, Value) {
    let prompt = build_prompt(&bundle.snapshot.url, &bundle.snapshot.text, identity);

    // Courtesy delay so rapid chain steps don't hammer the engine
    tokio::time::sleep(delay).await;

    let payload = match reasoner.generate(&prompt, attachments).await {
        Ok(parts) => match final_json_from_parts(&parts) {
            Some(parsed) => parsed,
            None => {
                ::log::warn!("No valid JSON in reasoning output, using fallback answer");
                stub_payload(identity, &bundle.snapshot.url)
            }
        },
        Err(e) => {
            ::log::error!("Reasoning engine call failed: {}", e);
            stub_payload(identity, &bundle.snapshot.url)
        }
    };

    let submit_url = bundle.submit_url.clone().or_else(|| prev_submit.clone());
    (submit_url, payload)
}
