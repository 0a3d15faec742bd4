use crate::BoxError;
use crate::browser::PageBrowser;
use crate::config::{Identity, SolverConfig};
use crate::extract::extract_evidence;
use crate::fetch::fetch_evidence;
use crate::reason::{Reasoner, compute_answer};
use crate::results::{ChainEnd, ChainReport};
use crate::submit::{SubmitOutcome, submit_answer};
use crate::transfer::Transfer;
use std::collections::HashSet;
use std::time::Duration;

/// Per-chain state carried across steps.
///
/// Each chain owns its context, so concurrently triggered chains cannot
/// corrupt each other's submit-URL fallback.
#[derive(Debug, Default)]
pub struct ChainContext {
    /// Last successfully inferred submission endpoint
    pub prev_submit: Option<String>,

    /// URLs already worked on in this chain
    visited: HashSet<String>,

    /// Steps executed so far
    steps: usize,
}

/// Follows a quiz chain from the starting URL until no continuation is
/// indicated, a guard trips, or a submission fault ends it.
///
/// One step is extract, fetch evidence, reason, submit; the loop is the
/// original recursive submit-and-follow flow made explicit, bounded by
/// `max_steps` and a visited-URL set.
pub async fn run_chain<B, T, R>(
    browser: &mut B,
    transfer: &T,
    reasoner: &R,
    config: &SolverConfig,
    identity: &Identity,
    start_url: &str,
) -> Result<ChainReport, BoxError>
where
    B: PageBrowser,
    T: Transfer,
    R: Reasoner,
{
    ::log::info!("Starting quiz solving chain at {}", start_url);

    let mut ctx = ChainContext::default();
    let mut url = start_url.to_string();

    loop {
        if ctx.steps >= config.max_steps {
            ::log::warn!("Step limit of {} reached, cutting chain off", config.max_steps);
            return Ok(report(&ctx, ChainEnd::StepLimit, &url));
        }
        if !ctx.visited.insert(url.clone()) {
            ::log::warn!("Already visited {}, cutting chain off", url);
            return Ok(report(&ctx, ChainEnd::Revisited, &url));
        }
        ctx.steps += 1;

        ::log::info!("Solving quiz step {} at {}", ctx.steps, url);

        let bundle = extract_evidence(browser, &url, &mut ctx.prev_submit).await;
        let attachments = fetch_evidence(transfer, &bundle).await;

        let (submit_url, payload) = compute_answer(
            reasoner,
            &bundle,
            &attachments,
            identity,
            &ctx.prev_submit,
            Duration::from_secs(config.reason_delay_secs),
        )
        .await;

        let Some(submit_url) = submit_url else {
            return Err(format!("no submission endpoint could be inferred for {}", url).into());
        };

        match submit_answer(transfer, &submit_url, &payload, config.submit_retries).await? {
            SubmitOutcome::Next(next_url) => {
                url = next_url;
            }
            SubmitOutcome::Ended => {
                return Ok(report(&ctx, ChainEnd::Completed, &url));
            }
            SubmitOutcome::NotJson => {
                return Ok(report(&ctx, ChainEnd::NonJsonResponse, &url));
            }
        }
    }
}

fn report(ctx: &ChainContext, end: ChainEnd, last_url: &str) -> ChainReport {
    ChainReport {
        steps: ctx.steps,
        end,
        last_url: last_url.to_string(),
    }
}
