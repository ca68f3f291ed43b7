use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::{CancellationToken, DropGuard};
use vidshare_core::constants::{PROGRESS_CAP, PROGRESS_STEP};

/// Cosmetic progress that advances while a commit is pending.
///
/// Dropping the ticker cancels it, so an abandoned submission never leaves a
/// task writing progress behind.
pub(crate) struct ProgressTicker {
    cancel: DropGuard,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Start ticking one `period` from now. Each tick adds a fixed step, never
    /// going past the cap.
    pub(crate) fn start(
        progress: Arc<watch::Sender<u8>>,
        period: Duration,
        token: CancellationToken,
    ) -> Self {
        // `interval_at` panics on a zero period.
        let period = period.max(Duration::from_millis(1));
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);

            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = ticks.tick() => {
                        let mut capped = false;
                        progress.send_modify(|value| {
                            *value = value.saturating_add(PROGRESS_STEP).min(PROGRESS_CAP);
                            capped = *value >= PROGRESS_CAP;
                        });
                        if capped {
                            break;
                        }
                    }
                }
            }
        });

        ProgressTicker {
            cancel: token.drop_guard(),
            handle,
        }
    }

    /// Cancel and wait until the task has exited. No tick lands after this
    /// returns.
    pub(crate) async fn stop(self) {
        self.cancel.disarm().cancel();
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "Progress ticker task failed");
        }
    }
}
