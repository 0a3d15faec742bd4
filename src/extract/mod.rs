pub mod blocks;
pub mod endpoint;
pub mod links;

#[cfg(test)]
mod tests;

use crate::browser::PageBrowser;
use crate::results::{EvidenceBundle, LinkedPage, PageSnapshot};
use std::collections::HashMap;

/// Loads a quiz page and extracts every piece of evidence on it.
///
/// Never fails: each sub-extraction is independently best-effort and
/// degrades to an empty value, so one unreadable block or dead link
/// cannot cost the rest of the page.
pub async fn extract_evidence<B: PageBrowser>(
    browser: &mut B,
    url: &str,
    prev_submit: &mut Option<String>,
) -> EvidenceBundle {
    if let Err(e) = browser.navigate(url).await {
        ::log::error!("Failed to open {}: {}", url, e);
    }

    let current_url = browser
        .current_url()
        .await
        .unwrap_or_else(|_| url.to_string());
    let text = browser.visible_text().await.unwrap_or_default();
    let html = browser.source().await.unwrap_or_default();

    let json_templates = blocks::harvest_templates(&html);
    let submit_url =
        endpoint::infer_submit_url(&json_templates, &text, &html, &current_url, prev_submit);

    let hrefs = links::collect_hrefs(&html, &current_url);
    let linked_pages = crawl_linked_pages(browser, &hrefs, &current_url, url).await;

    let buckets = links::classify(&hrefs, &html, &current_url);
    let inline_scripts = links::inline_scripts(&html);

    EvidenceBundle {
        snapshot: PageSnapshot {
            url: current_url,
            text,
            html,
        },
        json_templates,
        submit_url,
        pdf_links: buckets.pdf,
        csv_links: buckets.csv,
        audio_links: buckets.audio,
        image_links: buckets.image,
        linked_pages,
        inline_scripts,
    }
}

/// Visits every same-host hyperlink and captures its text and markup,
/// then navigates back so the original page is current again.
///
/// Per-link navigation failures are tolerated; the link is simply absent
/// from the result.
async fn crawl_linked_pages<B: PageBrowser>(
    browser: &mut B,
    hrefs: &[String],
    current_url: &str,
    original_url: &str,
) -> HashMap<String, LinkedPage> {
    let mut linked_pages = HashMap::new();

    let Some(host) = links::host_of(current_url) else {
        return linked_pages;
    };
    let host = host.to_string();

    for href in hrefs {
        if !href.starts_with("http") {
            continue;
        }
        if !href.contains(&host) {
            continue;
        }

        if let Err(e) = browser.navigate(href).await {
            ::log::debug!("Skipping linked page {}: {}", href, e);
            continue;
        }
        let html = match browser.source().await {
            Ok(html) => html,
            Err(e) => {
                ::log::debug!("Skipping linked page {}: {}", href, e);
                continue;
            }
        };
        let text = match browser.visible_text().await {
            Ok(text) => text,
            Err(e) => {
                ::log::debug!("Skipping linked page {}: {}", href, e);
                continue;
            }
        };

        linked_pages.insert(href.clone(), LinkedPage { text, html });
    }

    // Restore the original page as current before extraction continues
    if let Err(e) = browser.navigate(original_url).await {
        ::log::warn!("Failed to navigate back to {}: {}", original_url, e);
    }

    ::log::debug!("Captured {} same-host linked pages", linked_pages.len());
    linked_pages
}
