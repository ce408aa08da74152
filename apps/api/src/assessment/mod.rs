//! Skill assessment: question bank, answer collection, scoring and the attempt lifecycle.

pub mod attempt;
pub mod collector;
pub mod handlers;
pub mod lifecycle;
pub mod question_bank;
pub mod registry;
pub mod scoring;
pub mod timer;
