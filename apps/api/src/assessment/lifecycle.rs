//! Assessment attempt lifecycle.
//!
//! ```text
//! NotStarted → InProgress → Submitted ─┐
//!                        └→ TimedOut  ─┴→ Scored → Persisted
//! ```
//! Both terminal input states go through scoring; nothing skips it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    NotStarted,
    InProgress,
    Submitted,
    TimedOut,
    Scored,
    Persisted,
}

impl AssessmentStatus {
    pub fn can_transition_to(&self, target: &Self) -> bool {
        use AssessmentStatus::*;
        matches!(
            (self, target),
            (NotStarted, InProgress)
                | (InProgress, Submitted)
                | (InProgress, TimedOut)
                | (Submitted, Scored)
                | (TimedOut, Scored)
                | (Scored, Persisted)
        )
    }

    pub fn valid_transitions(&self) -> Vec<Self> {
        use AssessmentStatus::*;
        match self {
            NotStarted => vec![InProgress],
            InProgress => vec![Submitted, TimedOut],
            Submitted | TimedOut => vec![Scored],
            Scored => vec![Persisted],
            Persisted => vec![],
        }
    }

    pub fn transition_to(&self, target: Self) -> Result<Self, LifecycleError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(LifecycleError {
                from: *self,
                to: target,
            })
        }
    }

    /// True once a result exists for the attempt.
    pub fn is_finalized(&self) -> bool {
        matches!(self, AssessmentStatus::Scored | AssessmentStatus::Persisted)
    }

    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot transition assessment from {from:?} to {to:?}")]
pub struct LifecycleError {
    pub from: AssessmentStatus,
    pub to: AssessmentStatus,
}
