use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Hyperlink targets classified into resource buckets by file extension
#[derive(Debug, Clone, Default)]
pub struct ResourceBuckets {
    pub pdf: Vec<String>,
    pub csv: Vec<String>,
    pub audio: Vec<String>,
    pub image: Vec<String>,
}

/// Resolves a candidate link against a base URL.
///
/// Falls back to the verbatim candidate when resolution is impossible, so
/// downstream heuristics still get to examine it.
pub fn absolutize(base: &str, candidate: &str) -> String {
    match Url::parse(base) {
        Ok(base_url) => match base_url.join(candidate) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => candidate.to_string(),
        },
        Err(_) => candidate.to_string(),
    }
}

/// The host[:port] portion of a URL, as it appears between the scheme
/// separator and the first path slash
pub fn host_of(url: &str) -> Option<&str> {
    let after_scheme = url.split_once("//")?.1;
    Some(after_scheme.split('/').next().unwrap_or(after_scheme))
}

/// Collects every hyperlink target on the page, resolved to absolute form
pub fn collect_hrefs(html: &str, base_url: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let link_selector = Selector::parse("a").unwrap();

    let hrefs: Vec<String> = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(|href| absolutize(base_url, href))
        .collect();

    ::log::debug!("Collected {} hyperlinks", hrefs.len());
    hrefs
}

/// Classifies hyperlinks into PDF/CSV/audio/image buckets and merges in
/// `<audio src>`, `<img src>` and CSS `url(...)` references.
///
/// PDF, CSV and audio matching is case-sensitive on the extension; image
/// matching is case-insensitive. Data URIs are stored verbatim.
pub fn classify(hrefs: &[String], html: &str, base_url: &str) -> ResourceBuckets {
    let mut buckets = ResourceBuckets::default();

    for href in hrefs {
        if href.ends_with(".pdf") {
            buckets.pdf.push(href.clone());
        } else if href.ends_with(".csv") {
            buckets.csv.push(href.clone());
        } else if [".mp3", ".opus", ".wav"]
            .iter()
            .any(|ext| href.ends_with(ext))
        {
            buckets.audio.push(href.clone());
        } else if [".png", ".jpg", ".jpeg", ".gif"]
            .iter()
            .any(|ext| href.to_lowercase().ends_with(ext))
        {
            buckets.image.push(href.clone());
        }
    }

    let doc = Html::parse_document(html);

    let audio_selector = Selector::parse("audio").unwrap();
    for audio in doc.select(&audio_selector) {
        if let Some(src) = audio.value().attr("src") {
            buckets.audio.push(absolutize(base_url, src));
        }
    }

    let img_selector = Selector::parse("img").unwrap();
    for img in doc.select(&img_selector) {
        let Some(src) = img.value().attr("src") else {
            continue;
        };
        if src.starts_with("data:image") {
            buckets.image.push(src.to_string());
        } else {
            buckets.image.push(absolutize(base_url, src));
        }
    }

    // Background images referenced from inline CSS
    let css_url_re = Regex::new(r"url\((.*?)\)").expect("Invalid CSS url pattern");
    for capture in css_url_re.captures_iter(html) {
        let reference = capture[1].trim_matches(|c| c == '\'' || c == '"').to_string();
        buckets.image.push(absolutize(base_url, &reference));
    }

    ::log::debug!(
        "Classified resources: {} pdf, {} csv, {} audio, {} image",
        buckets.pdf.len(),
        buckets.csv.len(),
        buckets.audio.len(),
        buckets.image.len()
    );

    buckets
}

/// Collects the body text of every inline script (no src attribute)
pub fn inline_scripts(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let script_selector = Selector::parse("script").unwrap();

    doc.select(&script_selector)
        .filter(|e| e.value().attr("src").is_none())
        .map(|e| e.text().collect::<String>())
        .collect()
}
