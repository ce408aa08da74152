//! Live assessment attempts, keyed by attempt id.
//!
//! Each attempt owns its own collector; the registry only serialises access to it
//! and hands the scored result to the Profile Store exactly once.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assessment::attempt::{AssessmentAttempt, AttemptView, FinalizeOutcome, FinalizeReason};
use crate::assessment::collector::Tick;
use crate::assessment::lifecycle::AssessmentStatus;
use crate::assessment::question_bank::QuestionBank;
use crate::assessment::timer::spawn_countdown;
use crate::errors::AppError;
use crate::profile::models::ProfilePatch;
use crate::profile::store::ProfileStore;

/// How long a persisted attempt stays readable here before it is evicted.
pub const DEFAULT_RETENTION_SECS: u32 = 900;

struct TrackedAttempt {
    attempt: AssessmentAttempt,
    /// Stops the countdown task. Taken on finalize or abandon.
    cancel: Option<watch::Sender<bool>>,
    /// A profile write for this attempt is awaiting the store.
    persisting: bool,
}

#[derive(Clone)]
pub struct AssessmentRegistry {
    attempts: Arc<Mutex<HashMap<Uuid, TrackedAttempt>>>,
    bank: Arc<QuestionBank>,
    store: Arc<dyn ProfileStore>,
    duration_secs: u32,
    retention: Duration,
}

impl AssessmentRegistry {
    pub fn new(bank: Arc<QuestionBank>, store: Arc<dyn ProfileStore>, duration_secs: u32) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(HashMap::new())),
            bank,
            store,
            duration_secs,
            retention: Duration::seconds(i64::from(DEFAULT_RETENTION_SECS)),
        }
    }

    pub fn with_retention_secs(mut self, secs: u32) -> Self {
        self.retention = Duration::seconds(i64::from(secs));
        self
    }

    /// Creates an attempt, moves it to `InProgress` and starts its countdown.
    /// Also sweeps out attempts that settled more than the retention window ago.
    pub async fn start(&self, user_id: Uuid) -> Result<AttemptView, AppError> {
        let now = Utc::now();
        let mut attempt = AssessmentAttempt::new(user_id, self.duration_secs);
        attempt.start(now)?;
        let id = attempt.id();
        let view = attempt.view(&self.bank);

        let (cancel_tx, cancel_rx) = watch::channel(false);
        {
            let mut attempts = self.attempts.lock().await;
            let evicted = evict_settled(&mut attempts, now, self.retention);
            if evicted > 0 {
                debug!("Evicted {evicted} settled assessment(s)");
            }
            attempts.insert(
                id,
                TrackedAttempt {
                    attempt,
                    cancel: Some(cancel_tx),
                    persisting: false,
                },
            );
        }
        spawn_countdown(self.clone(), id, cancel_rx);

        info!(
            "Started assessment {id} for user {user_id} ({}s)",
            view.countdown.remaining_secs()
        );
        Ok(view)
    }

    pub async fn view(&self, id: Uuid) -> Result<AttemptView, AppError> {
        let attempts = self.attempts.lock().await;
        let tracked = attempts.get(&id).ok_or_else(|| attempt_not_found(id))?;
        Ok(tracked.attempt.view(&self.bank))
    }

    pub async fn record_answer(
        &self,
        id: Uuid,
        question_id: u32,
        value: String,
    ) -> Result<AttemptView, AppError> {
        let mut attempts = self.attempts.lock().await;
        let tracked = attempts.get_mut(&id).ok_or_else(|| attempt_not_found(id))?;
        tracked.attempt.record_answer(question_id, value)?;
        debug!("Assessment {id}: recorded answer for question {question_id}");
        Ok(tracked.attempt.view(&self.bank))
    }

    /// Advances the attempt's countdown by one second.
    /// `None` when the attempt is gone or no longer accepting answers.
    pub async fn tick(&self, id: Uuid) -> Option<Tick> {
        let mut attempts = self.attempts.lock().await;
        let tracked = attempts.get_mut(&id)?;
        if tracked.attempt.status() != AssessmentStatus::InProgress {
            return None;
        }
        Some(tracked.attempt.tick())
    }

    /// Manual submission. Requires every question to be answered while the attempt is
    /// still in progress; on an already-scored attempt it returns the stored result and
    /// retries persistence if the earlier write failed.
    pub async fn submit(&self, id: Uuid) -> Result<AttemptView, AppError> {
        {
            let attempts = self.attempts.lock().await;
            let tracked = attempts.get(&id).ok_or_else(|| attempt_not_found(id))?;
            if tracked.attempt.status() == AssessmentStatus::InProgress
                && !tracked.attempt.is_complete(&self.bank)
            {
                let missing = tracked.attempt.view(&self.bank).unanswered;
                return Err(AppError::Validation(format!(
                    "{} question(s) unanswered: {missing:?}",
                    missing.len()
                )));
            }
        }
        self.finalize(id, FinalizeReason::Submitted).await
    }

    /// Scores the attempt (once) and writes the result to the Profile Store.
    ///
    /// The store write happens outside the registry lock. A failed write leaves the
    /// attempt `Scored` so a later call can retry it.
    pub async fn finalize(&self, id: Uuid, reason: FinalizeReason) -> Result<AttemptView, AppError> {
        let (user_id, result) = {
            let mut attempts = self.attempts.lock().await;
            let tracked = attempts.get_mut(&id).ok_or_else(|| attempt_not_found(id))?;

            let outcome = tracked.attempt.finalize(reason, &self.bank, Utc::now())?;
            if let Some(cancel) = tracked.cancel.take() {
                let _ = cancel.send(true);
            }
            if let FinalizeOutcome::Scored(result) = &outcome {
                info!(
                    "Assessment {id} scored ({reason:?}): path={}, answered {}/{}",
                    result.recommended_path.as_str(),
                    result.answered_questions,
                    result.total_questions
                );
            }

            if tracked.attempt.status() != AssessmentStatus::Scored || tracked.persisting {
                return Ok(tracked.attempt.view(&self.bank));
            }
            tracked.persisting = true;
            (tracked.attempt.user_id(), outcome.result().clone())
        };

        let write = self
            .store
            .put(user_id, ProfilePatch::assessment(result))
            .await;

        let mut attempts = self.attempts.lock().await;
        let Some(tracked) = attempts.get_mut(&id) else {
            // Abandoned while the write was in flight.
            return write.and(Err(attempt_not_found(id)));
        };
        tracked.persisting = false;
        match write {
            Ok(_) => {
                tracked.attempt.mark_persisted()?;
                info!("Assessment {id} persisted to profile of user {user_id}");
            }
            Err(e) => {
                warn!("Assessment {id} scored but not persisted, will retry on submit: {e}");
            }
        }
        Ok(tracked.attempt.view(&self.bank))
    }

    /// Drops the attempt and stops its countdown. Nothing is written to the store.
    pub async fn abandon(&self, id: Uuid) -> Result<(), AppError> {
        let tracked = self
            .attempts
            .lock()
            .await
            .remove(&id)
            .ok_or_else(|| attempt_not_found(id))?;
        if let Some(cancel) = tracked.cancel {
            let _ = cancel.send(true);
        }
        let status = tracked.attempt.status();
        if status.is_finalized() {
            info!("Dropped assessment {id} after scoring ({status:?})");
        } else {
            info!("Abandoned assessment {id} in state {status:?}");
        }
        Ok(())
    }
}

/// Drops persisted attempts whose result is older than `retention`; the result itself
/// stays in the Profile Store. Attempts still owed a store write are kept for the retry.
fn evict_settled(
    attempts: &mut HashMap<Uuid, TrackedAttempt>,
    now: DateTime<Utc>,
    retention: Duration,
) -> usize {
    let before = attempts.len();
    attempts.retain(|_, tracked| {
        let settled = tracked.attempt.status().is_terminal()
            && tracked
                .attempt
                .result()
                .map_or(false, |r| r.completed_at + retention <= now);
        !settled
    });
    before - attempts.len()
}

fn attempt_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Assessment attempt {id} not found"))
}
