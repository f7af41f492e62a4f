//! Race coordinator.
//!
//! [`resolve`] launches one task per adapter against a shared identifier and
//! returns a single [`Decision`]: the first successful record by arrival
//! order, every failure when nobody succeeded, or [`Decision::TimedOut`] when
//! the deadline passes first.
//!
//! All tasks share one [`CancellationToken`]. It is cancelled as soon as the
//! decision is made, and the task set is shut down before `resolve` returns,
//! so no adapter outlives the call.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::adapters::AddressSource;
use crate::{Decision, FailureReason, FetchOutcome, ProviderFailure};

/// Races `providers` for `identifier` under a single `timeout`.
///
/// Never panics on adapter failure: transport, remote, decode and request
/// construction errors arrive as failure reasons, and a panicking adapter is
/// reported as an internal failure for its provider.
pub async fn resolve(
    identifier: &str,
    providers: &[Arc<dyn AddressSource>],
    timeout: Duration,
) -> Decision {
    let started = Instant::now();
    let ctx = CancellationToken::new();
    // Room for every provider's outcome so a late writer never waits on a
    // receiver that has stopped listening.
    let (tx, mut rx) = mpsc::channel::<FetchOutcome>(providers.len().max(1));
    let mut tasks = JoinSet::new();

    for source in providers {
        let source = Arc::clone(source);
        let tx = tx.clone();
        let ctx = ctx.child_token();
        let identifier = identifier.to_owned();

        tasks.spawn(async move {
            let provenance = source.id();
            debug!(provider = %provenance, identifier = %identifier, "launching fetch");

            let outcome = match AssertUnwindSafe(source.fetch(&identifier, &ctx))
                .catch_unwind()
                .await
            {
                Ok(Some(outcome)) => outcome,
                Ok(None) => return,
                Err(_) => {
                    warn!(provider = %provenance, "adapter panicked during fetch");
                    FetchOutcome::failed(
                        provenance,
                        FailureReason::internal("adapter panicked during fetch"),
                    )
                }
            };

            if let Err(error) = tx.try_send(outcome) {
                debug!(error = %error, "outcome arrived after the race was decided");
            }
        });
    }
    drop(tx);

    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    let mut failures = Vec::new();
    let decision = loop {
        tokio::select! {
            biased;
            received = rx.recv() => match received {
                Some(FetchOutcome { provenance, result: Ok(address) }) => {
                    break Decision::Resolved { address, provenance };
                }
                Some(FetchOutcome { provenance, result: Err(reason) }) => {
                    warn!(
                        provider = %provenance,
                        code = reason.code(),
                        reason = %reason.message(),
                        "provider failed"
                    );
                    failures.push(ProviderFailure { provenance, reason });
                }
                None => break Decision::AllFailed { failures },
            },
            () = &mut deadline => break Decision::TimedOut,
        }
    };

    ctx.cancel();
    rx.close();
    tasks.shutdown().await;

    info!(
        identifier = %identifier,
        status = decision.as_str(),
        provider = decision.provenance().map(|id| id.as_str()).unwrap_or("-"),
        elapsed_ms = elapsed_ms(started),
        "race decided"
    );
    decision
}

/// Milliseconds since `started`, saturating at `u64::MAX`.
pub fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
