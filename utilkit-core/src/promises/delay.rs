//! Timer-based suspension

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Options for [`delay_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayOptions {
    /// The pending timer must not keep the process alive by itself
    ///
    /// Tokio timers never hold the runtime open: once the future driving
    /// `block_on` returns, pending sleeps are dropped. Every delay therefore
    /// already behaves as a background timer, and this flag is recorded for
    /// tracing only.
    pub allow_process_exit_while_pending: bool,
}

impl DelayOptions {
    pub fn background() -> Self {
        Self {
            allow_process_exit_while_pending: true,
        }
    }
}

/// Suspend the current task for `duration`
pub async fn delay(duration: Duration) {
    delay_with(duration, DelayOptions::default()).await
}

/// Suspend the current task for `ms` milliseconds
pub async fn delay_ms(ms: u64) {
    delay(Duration::from_millis(ms)).await
}

/// Suspend the current task for `duration` with explicit options
pub async fn delay_with(duration: Duration, options: DelayOptions) {
    trace!(
        ?duration,
        background = options.allow_process_exit_while_pending,
        "delaying"
    );
    tokio::time::sleep(duration).await;
}
