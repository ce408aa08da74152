//! Countdown task for a live attempt.
//!
//! Ticks once per second until the attempt expires, is finalized, or is abandoned.
//! Expiry runs the same finalize path as a manual submit.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::assessment::attempt::FinalizeReason;
use crate::assessment::collector::Tick;
use crate::assessment::registry::AssessmentRegistry;

pub fn spawn_countdown(
    registry: AssessmentRegistry,
    id: Uuid,
    mut cancel: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        debug!("Countdown for assessment {id} cancelled");
                        break;
                    }
                }
                _ = interval.tick() => {
                    match registry.tick(id).await {
                        Some(Tick::Running { .. }) => {}
                        Some(Tick::Expired) => {
                            debug!("Countdown for assessment {id} expired");
                            if let Err(e) = registry.finalize(id, FinalizeReason::TimedOut).await {
                                warn!("Failed to finalize timed-out assessment {id}: {e}");
                            }
                            break;
                        }
                        None => break,
                    }
                }
            }
        }
    })
}
