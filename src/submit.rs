use crate::BoxError;
use crate::transfer::Transfer;
use serde_json::Value;
use std::time::Duration;

/// Outcome of one answer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The response carried the next quiz page URL
    Next(String),
    /// The response carried no continuation URL; the chain is done
    Ended,
    /// The response body was not parseable JSON
    NotJson,
}

/// Posts the answer payload to the submission endpoint and inspects the
/// response for a continuation URL.
///
/// Transport failures are retried a bounded number of times with
/// doubling backoff; if every attempt fails the error propagates and
/// ends the chain as a fault.
pub async fn submit_answer<T: Transfer>(
    transfer: &T,
    submit_url: &str,
    payload: &Value,
    retries: usize,
) -> Result<SubmitOutcome, BoxError> {
    ::log::info!("Submitting answer to {}", submit_url);
    ::log::debug!("Submission payload: {}", payload);

    let body = post_with_retry(transfer, submit_url, payload, retries).await?;
    ::log::info!("Submission response: {}", body);

    let result: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => {
            ::log::error!("Could not decode submission response as JSON");
            return Ok(SubmitOutcome::NotJson);
        }
    };

    match result.get("url").and_then(Value::as_str) {
        Some(next_url) if !next_url.is_empty() => {
            ::log::info!("Next quiz URL: {}", next_url);
            Ok(SubmitOutcome::Next(next_url.to_string()))
        }
        _ => {
            ::log::info!("Quiz chain ended");
            Ok(SubmitOutcome::Ended)
        }
    }
}

/// POSTs the payload, retrying with doubling backoff on transport failure
async fn post_with_retry<T: Transfer>(
    transfer: &T,
    submit_url: &str,
    payload: &Value,
    retries: usize,
) -> Result<String, BoxError> {
    let mut last_err: Option<BoxError> = None;

    for attempt in 0..=retries {
        if attempt > 0 {
            let backoff = Duration::from_secs(1 << (attempt - 1));
            ::log::warn!(
                "Retrying submission to {} in {:?} (attempt {} of {})",
                submit_url,
                backoff,
                attempt + 1,
                retries + 1
            );
            tokio::time::sleep(backoff).await;
        }

        match transfer.post_json(submit_url, payload).await {
            Ok(body) => return Ok(body),
            Err(e) => {
                ::log::warn!("Submission POST failed: {}", e);
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| "submission failed without a cause".into()))
}
