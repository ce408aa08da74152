use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::assessment::collector::{Countdown, ResponseCollector, Tick};
use crate::assessment::lifecycle::{AssessmentStatus, LifecycleError};
use crate::assessment::question_bank::QuestionBank;
use crate::assessment::scoring::{score_at, AnswerSet, AssessmentResult};

/// What ended the answering phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizeReason {
    Submitted,
    TimedOut,
}

impl FinalizeReason {
    fn status(self) -> AssessmentStatus {
        match self {
            FinalizeReason::Submitted => AssessmentStatus::Submitted,
            FinalizeReason::TimedOut => AssessmentStatus::TimedOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeOutcome {
    /// This call scored the attempt.
    Scored(AssessmentResult),
    /// The attempt had already been scored; the stored result is returned unchanged.
    AlreadyFinalized(AssessmentResult),
}

impl FinalizeOutcome {
    pub fn result(&self) -> &AssessmentResult {
        match self {
            FinalizeOutcome::Scored(r) | FinalizeOutcome::AlreadyFinalized(r) => r,
        }
    }
}

/// One user's run through the assessment.
#[derive(Debug, Clone)]
pub struct AssessmentAttempt {
    id: Uuid,
    user_id: Uuid,
    status: AssessmentStatus,
    collector: ResponseCollector,
    finalized_by: Option<FinalizeReason>,
    result: Option<AssessmentResult>,
    started_at: Option<DateTime<Utc>>,
}

impl AssessmentAttempt {
    pub fn new(user_id: Uuid, duration_secs: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            status: AssessmentStatus::NotStarted,
            collector: ResponseCollector::new(duration_secs),
            finalized_by: None,
            result: None,
            started_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn status(&self) -> AssessmentStatus {
        self.status
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    pub fn answers(&self) -> &AnswerSet {
        self.collector.current_answer_set()
    }

    pub fn is_complete(&self, bank: &QuestionBank) -> bool {
        self.collector.is_complete(bank)
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        self.status = self.status.transition_to(AssessmentStatus::InProgress)?;
        self.started_at = Some(now);
        Ok(())
    }

    /// Answers are only mutable while the attempt is in progress.
    pub fn record_answer(&mut self, question_id: u32, value: String) -> Result<(), LifecycleError> {
        if self.status != AssessmentStatus::InProgress {
            return Err(LifecycleError {
                from: self.status,
                to: AssessmentStatus::InProgress,
            });
        }
        self.collector.record_answer(question_id, value);
        Ok(())
    }

    /// Advances the countdown. Ticks after the answering phase has ended report `Expired`
    /// without touching state.
    pub fn tick(&mut self) -> Tick {
        if self.status != AssessmentStatus::InProgress {
            return Tick::Expired;
        }
        self.collector.tick()
    }

    /// Ends the answering phase and scores whatever answers exist right now.
    ///
    /// Idempotent: once scored, further calls return the stored result whatever the reason.
    pub fn finalize(
        &mut self,
        reason: FinalizeReason,
        bank: &QuestionBank,
        now: DateTime<Utc>,
    ) -> Result<FinalizeOutcome, LifecycleError> {
        if let Some(result) = &self.result {
            return Ok(FinalizeOutcome::AlreadyFinalized(result.clone()));
        }

        self.status = self.status.transition_to(reason.status())?;
        let result = score_at(self.collector.current_answer_set(), bank, now);
        self.status = self.status.transition_to(AssessmentStatus::Scored)?;
        self.finalized_by = Some(reason);
        self.result = Some(result.clone());
        Ok(FinalizeOutcome::Scored(result))
    }

    pub fn mark_persisted(&mut self) -> Result<(), LifecycleError> {
        self.status = self.status.transition_to(AssessmentStatus::Persisted)?;
        Ok(())
    }

    pub fn view(&self, bank: &QuestionBank) -> AttemptView {
        AttemptView {
            id: self.id,
            user_id: self.user_id,
            status: self.status,
            countdown: *self.collector.countdown(),
            started_at: self.started_at,
            answers: self.answers().clone(),
            unanswered: self.collector.unanswered(bank),
            finalized_by: self.finalized_by,
            result: self.result.clone(),
        }
    }
}

/// Read model returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: AssessmentStatus,
    pub countdown: Countdown,
    pub started_at: Option<DateTime<Utc>>,
    pub answers: AnswerSet,
    pub unanswered: Vec<u32>,
    pub finalized_by: Option<FinalizeReason>,
    pub result: Option<AssessmentResult>,
}
