use crate::extract::links::absolutize;
use regex::Regex;
use serde_json::Value;

/// URL-shaped substrings: absolute http(s) URLs or root-relative paths
const URL_PATTERN: &str = r#"(https?://[^\s"'<>()]+|/[^\s"'<>()]+)"#;

/// Infers the submission endpoint for the current page.
///
/// Three sources are consulted in priority order: string fields of the
/// parsed JSON templates, URL-shaped substrings of the rendered text,
/// then the same scan over the raw markup. A later source only runs if
/// the earlier ones left the result unset.
///
/// Every candidate examined without matching "submit" re-reads the
/// carried fallback; a matching candidate is accepted and written back
/// into the fallback for later steps. The result is therefore the first
/// "submit"-containing URL across the sources, or whatever the fallback
/// held before this page was read.
pub fn infer_submit_url(
    templates: &[Value],
    page_text: &str,
    html: &str,
    current_url: &str,
    prev_submit: &mut Option<String>,
) -> Option<String> {
    let mut submit_url: Option<String> = None;

    for template in templates {
        let Some(object) = template.as_object() else {
            continue;
        };
        for value in object.values() {
            let Some(candidate) = value.as_str() else {
                continue;
            };
            let full_url = absolutize(current_url, candidate);
            if full_url.to_lowercase().contains("submit") {
                submit_url = Some(full_url.clone());
                *prev_submit = Some(full_url);
                break;
            } else {
                submit_url = prev_submit.clone();
            }
        }
    }

    if submit_url.is_none() {
        submit_url = scan_source(page_text, current_url, prev_submit);
    }

    if submit_url.is_none() {
        submit_url = scan_source(html, current_url, prev_submit);
    }

    if let Some(url) = &submit_url {
        ::log::debug!("Inferred submit URL: {}", url);
    } else {
        ::log::debug!("No submit URL found on page or in fallback");
    }

    submit_url
}

/// Scans unstructured content for a "submit"-containing URL, with the
/// same fallback re-read semantics as the template scan
fn scan_source(source: &str, current_url: &str, prev_submit: &mut Option<String>) -> Option<String> {
    let url_re = Regex::new(URL_PATTERN).expect("Invalid URL pattern");

    let mut submit_url = None;
    for candidate in url_re.find_iter(source) {
        let full_url = absolutize(current_url, candidate.as_str());
        if full_url.to_lowercase().contains("submit") {
            submit_url = Some(full_url.clone());
            *prev_submit = Some(full_url);
            break;
        } else {
            submit_url = prev_submit.clone();
        }
    }

    submit_url
}
