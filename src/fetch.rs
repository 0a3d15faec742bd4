use crate::results::{Attachment, EvidenceBundle};
use crate::transfer::Transfer;

/// Retrieves the binary content of every classified resource link.
///
/// Attachments are collected in the order CSV, PDF, audio, image so the
/// evidence sequence handed to the reasoning engine is deterministic.
/// Each fetch is independent: a failed retrieval is dropped and never
/// affects the rest of the batch.
pub async fn fetch_evidence<T: Transfer>(transfer: &T, bundle: &EvidenceBundle) -> Vec<Attachment> {
    let mut attachments = Vec::new();

    fetch_links(transfer, &bundle.csv_links, |_| "text/csv", &mut attachments).await;
    fetch_links(
        transfer,
        &bundle.pdf_links,
        |_| "application/pdf",
        &mut attachments,
    )
    .await;
    fetch_links(transfer, &bundle.audio_links, guess_audio_mime, &mut attachments).await;
    fetch_links(transfer, &bundle.image_links, guess_image_mime, &mut attachments).await;

    ::log::info!(
        "Fetched {} evidence attachments for {}",
        attachments.len(),
        bundle.snapshot.url
    );
    attachments
}

/// Fetches one bucket of links sequentially, tagging each retrieved body
/// with its inferred MIME type
async fn fetch_links<T: Transfer>(
    transfer: &T,
    links: &[String],
    mime_for: fn(&str) -> &'static str,
    attachments: &mut Vec<Attachment>,
) {
    for link in links {
        match transfer.get_bytes(link).await {
            Ok(bytes) => attachments.push(Attachment {
                bytes,
                mime: mime_for(link),
            }),
            Err(e) => {
                ::log::debug!("Skipping evidence fetch for {}: {}", link, e);
            }
        }
    }
}

/// MIME type for an audio link, by extension
pub fn guess_audio_mime(url: &str) -> &'static str {
    if url.ends_with(".mp3") {
        "audio/mpeg"
    } else if url.ends_with(".wav") {
        "audio/wav"
    } else if url.ends_with(".opus") {
        "audio/ogg; codecs=opus"
    } else {
        "application/octet-stream"
    }
}

/// MIME type for an image link, by extension (case-insensitive)
pub fn guess_image_mime(url: &str) -> &'static str {
    let lower = url.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".svg") {
        "image/svg+xml"
    } else {
        "application/octet-stream"
    }
}
