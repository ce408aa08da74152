//! Response Collector: per-attempt answer accumulation and countdown.

use serde::Serialize;

use crate::assessment::question_bank::QuestionBank;
use crate::assessment::scoring::AnswerSet;

/// Default assessment duration: 20 minutes.
pub const DEFAULT_DURATION_SECS: u32 = 1200;

/// Result of advancing the countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running { remaining_secs: u32 },
    Expired,
}

/// Monotonically decreasing countdown, one second per tick.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
}

impl Countdown {
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
        }
    }

    pub fn tick(&mut self) -> Tick {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            Tick::Expired
        } else {
            Tick::Running {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }
}

#[derive(Debug, Clone)]
pub struct ResponseCollector {
    answers: AnswerSet,
    countdown: Countdown,
}

impl ResponseCollector {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            answers: AnswerSet::new(),
            countdown: Countdown::new(duration_secs),
        }
    }

    /// Records an answer, replacing any earlier answer for the same question.
    pub fn record_answer(&mut self, question_id: u32, value: impl Into<String>) {
        self.answers.insert(question_id, value.into());
    }

    pub fn current_answer_set(&self) -> &AnswerSet {
        &self.answers
    }

    /// Ids of bank questions with no recorded answer, in bank order.
    pub fn unanswered(&self, bank: &QuestionBank) -> Vec<u32> {
        bank.questions()
            .iter()
            .map(|q| q.id)
            .filter(|id| !self.answers.contains_key(id))
            .collect()
    }

    pub fn is_complete(&self, bank: &QuestionBank) -> bool {
        self.unanswered(bank).is_empty()
    }

    pub fn tick(&mut self) -> Tick {
        self.countdown.tick()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }
}
