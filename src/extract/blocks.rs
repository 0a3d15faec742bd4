use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

/// Harvests JSON payload templates from every <pre>/<code> block.
///
/// Each block is tried verbatim first, then once more after the repair
/// pass; blocks that still fail to parse are dropped without comment.
pub fn harvest_templates(html: &str) -> Vec<Value> {
    let doc = Html::parse_document(html);
    let block_selector = Selector::parse("pre, code").unwrap();

    let mut templates = Vec::new();
    for block in doc.select(&block_selector) {
        let raw = block.text().collect::<String>().trim().to_string();

        if let Ok(value) = serde_json::from_str::<Value>(&raw) {
            templates.push(value);
            continue;
        }

        let repaired = repair_json_text(&raw);
        if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
            templates.push(value);
        }
    }

    ::log::debug!("Harvested {} JSON templates", templates.len());
    templates
}

/// Repairs the JSON malformations quiz pages commonly carry: embedded
/// markup, literal `...` placeholders and trailing commas
pub fn repair_json_text(raw: &str) -> String {
    let tag_re = Regex::new(r"<[^>]+>").expect("Invalid tag pattern");
    let trailing_comma_re = Regex::new(r",\s*([}\]])").expect("Invalid comma pattern");

    let cleaned = tag_re.replace_all(raw, "");
    let cleaned = cleaned.replace("...", "null");
    let cleaned = trailing_comma_re.replace_all(&cleaned, "$1");
    cleaned.trim().to_string()
}
