//! Dashboard status + metrics polling.
//!
//! The poller runs while the dashboard is mounted: one fetch immediately,
//! then one per interval. Each tick fetches status and metrics concurrently
//! and reports a single [`Message::SnapshotFetched`] once both resolve. A
//! failed tick is reported like any other; the schedule keeps going.
//!
//! The task stops when the dashboard's [`PollerHandle`] is dropped, including
//! while a fetch is in flight, in which case the result is never sent.
//!
//! [`PollerHandle`]: crate::state::PollerHandle

use std::sync::Arc;
use std::time::Duration;

use simcon_client::{ApiError, ControlApi};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::debug;

use crate::config::{PollingSettings, MIN_POLL_INTERVAL_MS};
use crate::message::Message;
use crate::state::{Snapshot, ViewId};

/// Largest backoff exponent, keeps the multiplication in range.
const MAX_BACKOFF_SHIFT: u32 = 16;

/// Poll schedule, with optional exponential backoff on repeated failures
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Consecutive failures before backoff starts (0 = never)
    pub backoff_after_failures: u32,
    pub max_backoff: Duration,
}

impl PollPolicy {
    /// Fixed interval, no backoff
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            backoff_after_failures: 0,
            max_backoff: interval,
        }
    }

    pub fn from_settings(settings: &PollingSettings) -> Self {
        let interval = Duration::from_millis(settings.interval_ms.max(MIN_POLL_INTERVAL_MS));
        Self {
            interval,
            backoff_after_failures: settings.backoff_after_failures,
            max_backoff: Duration::from_millis(settings.max_backoff_ms).max(interval),
        }
    }

    /// Delay before the next tick after `consecutive_failures` failures.
    ///
    /// Once the failure count reaches the backoff threshold the interval
    /// doubles for each further failure, capped at `max_backoff`.
    pub fn delay_after(&self, consecutive_failures: u32) -> Duration {
        let threshold = self.backoff_after_failures;
        if threshold == 0 || consecutive_failures < threshold {
            return self.interval;
        }
        let shift = (consecutive_failures - threshold + 1).min(MAX_BACKOFF_SHIFT);
        self.interval
            .saturating_mul(1u32 << shift)
            .min(self.max_backoff.max(self.interval))
    }
}

/// Fetch status and metrics concurrently; ready only when both resolve.
pub async fn fetch_snapshot<A: ControlApi>(api: &A) -> Result<Snapshot, ApiError> {
    let (status, metrics) = tokio::join!(api.get_status(), api.get_metrics());
    Ok(Snapshot {
        status: status?,
        metrics: metrics?,
    })
}

/// Spawn the polling task for one dashboard mount.
pub(super) fn spawn_snapshot_poller<A>(
    api: Arc<A>,
    view_id: ViewId,
    policy: PollPolicy,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()>
where
    A: ControlApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut failures: u32 = 0;

        loop {
            if *shutdown_rx.borrow() {
                break;
            }
            let started = Instant::now();

            let result = tokio::select! {
                result = fetch_snapshot(api.as_ref()) => result,
                _ = shutdown_rx.changed() => break,
            };

            failures = match &result {
                Ok(_) => 0,
                Err(e) => {
                    debug!("Snapshot poll failed ({} in a row): {}", failures + 1, e);
                    failures.saturating_add(1)
                }
            };

            if msg_tx
                .send(Message::SnapshotFetched { view_id, result })
                .await
                .is_err()
            {
                // Channel closed - engine is shutting down.
                break;
            }

            let next_tick = started + policy.delay_after(failures);
            tokio::select! {
                _ = tokio::time::sleep_until(next_tick) => {}
                _ = shutdown_rx.changed() => break,
            }
        }

        debug!("Snapshot poller for {:?} stopped", view_id);
    })
}
