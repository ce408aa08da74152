//! Scoring Engine: turns an answer set into trait scores, interest weights and
//! a recommended career path.
//!
//! Pure and infallible: unknown question ids and option tokens a question does
//! not declare contribute nothing. Persistence belongs to the caller.
//!
//! Per answered question, by question type:
//! - technical: `technical` +10; data-flavoured tokens add `data-science` +15 and
//!   `analytical` +10; web-flavoured tokens add `web-mobile` +15 and `creativity` +10
//! - interest: track tokens add +20 to that track; `leadership`, `team` and
//!   `creative` add +15 to `leadership`, `collaboration` and `creativity`
//! - personality: `plan` → `leadership`, `collaborate`/`discussion` → `collaboration`,
//!   `hands-on` → `creativity`, each +15
//! - aptitude: `problem_solving` +10 and `analytical` +10 whatever the option

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::question_bank::{QuestionBank, QuestionType};
use crate::taxonomy::PathId;

/// Answers keyed by question id. At most one value per question.
pub type AnswerSet = BTreeMap<u32, String>;

const TECHNICAL_INCREMENT: u32 = 10;
const KEYWORD_INTEREST_INCREMENT: u32 = 15;
const KEYWORD_TRAIT_INCREMENT: u32 = 10;
const INTEREST_TRACK_INCREMENT: u32 = 20;
const TRAIT_INCREMENT: u32 = 15;
const APTITUDE_INCREMENT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trait {
    Technical,
    ProblemSolving,
    DataScience,
    WebDevelopment,
    Leadership,
    Creativity,
    Analytical,
    Collaboration,
}

/// Accumulated trait scores for one scoring run.
///
/// Field names serialize in snake_case like the rest of the result. The camelCase
/// aliases read rows stored before the rename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub technical: u32,
    #[serde(alias = "problemSolving")]
    pub problem_solving: u32,
    #[serde(alias = "dataScience")]
    pub data_science: u32,
    #[serde(alias = "webDevelopment")]
    pub web_development: u32,
    pub leadership: u32,
    pub creativity: u32,
    pub analytical: u32,
    pub collaboration: u32,
}

impl ScoreVector {
    fn add(&mut self, t: Trait, amount: u32) {
        let slot = match t {
            Trait::Technical => &mut self.technical,
            Trait::ProblemSolving => &mut self.problem_solving,
            Trait::DataScience => &mut self.data_science,
            Trait::WebDevelopment => &mut self.web_development,
            Trait::Leadership => &mut self.leadership,
            Trait::Creativity => &mut self.creativity,
            Trait::Analytical => &mut self.analytical,
            Trait::Collaboration => &mut self.collaboration,
        };
        *slot += amount;
    }

    pub fn values(&self) -> [u32; 8] {
        [
            self.technical,
            self.problem_solving,
            self.data_science,
            self.web_development,
            self.leadership,
            self.creativity,
            self.analytical,
            self.collaboration,
        ]
    }

    /// Mean over all eight traits, answered or not.
    pub fn average(&self) -> f64 {
        let values = self.values();
        values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
    }
}

/// Interest tracks, in the order used to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterestTrack {
    AiMl,
    WebMobile,
    DataScience,
    Cybersecurity,
    Programming,
}

impl InterestTrack {
    pub const ORDER: [InterestTrack; 5] = [
        InterestTrack::AiMl,
        InterestTrack::WebMobile,
        InterestTrack::DataScience,
        InterestTrack::Cybersecurity,
        InterestTrack::Programming,
    ];

    fn from_token(token: &str) -> Option<InterestTrack> {
        match token {
            "ai-ml" => Some(InterestTrack::AiMl),
            "web-mobile" => Some(InterestTrack::WebMobile),
            "data-science" => Some(InterestTrack::DataScience),
            "cybersecurity" => Some(InterestTrack::Cybersecurity),
            _ => None,
        }
    }

    /// The career path a track leads to. Tracks without a dedicated path land on the default.
    pub fn path(&self) -> PathId {
        match self {
            InterestTrack::AiMl => PathId::AiMl,
            InterestTrack::DataScience => PathId::DataScience,
            InterestTrack::Cybersecurity => PathId::Cybersecurity,
            InterestTrack::WebMobile | InterestTrack::Programming => PathId::Fullstack,
        }
    }
}

/// Accumulated interest weights for one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestVector {
    #[serde(rename = "ai-ml")]
    pub ai_ml: u32,
    #[serde(rename = "web-mobile")]
    pub web_mobile: u32,
    #[serde(rename = "data-science")]
    pub data_science: u32,
    pub cybersecurity: u32,
    pub programming: u32,
}

impl InterestVector {
    pub fn weight(&self, track: InterestTrack) -> u32 {
        match track {
            InterestTrack::AiMl => self.ai_ml,
            InterestTrack::WebMobile => self.web_mobile,
            InterestTrack::DataScience => self.data_science,
            InterestTrack::Cybersecurity => self.cybersecurity,
            InterestTrack::Programming => self.programming,
        }
    }

    fn add(&mut self, track: InterestTrack, amount: u32) {
        let slot = match track {
            InterestTrack::AiMl => &mut self.ai_ml,
            InterestTrack::WebMobile => &mut self.web_mobile,
            InterestTrack::DataScience => &mut self.data_science,
            InterestTrack::Cybersecurity => &mut self.cybersecurity,
            InterestTrack::Programming => &mut self.programming,
        };
        *slot += amount;
    }

    /// First track holding the strict maximum weight, in `InterestTrack::ORDER`.
    /// `None` when every weight is zero.
    pub fn top_track(&self) -> Option<InterestTrack> {
        let mut best: Option<(InterestTrack, u32)> = None;
        for track in InterestTrack::ORDER {
            let w = self.weight(track);
            if w > best.map(|(_, bw)| bw).unwrap_or(0) {
                best = Some((track, w));
            }
        }
        best.map(|(track, _)| track)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub scores: ScoreVector,
    pub interests: InterestVector,
    pub recommended_path: PathId,
    pub completed_at: DateTime<Utc>,
    pub total_questions: u32,
    pub answered_questions: u32,
}

/// Scores an answer set against the bank, stamped with the current time.
pub fn score(answers: &AnswerSet, bank: &QuestionBank) -> AssessmentResult {
    score_at(answers, bank, Utc::now())
}

/// Scores an answer set against the bank with an explicit completion time.
pub fn score_at(
    answers: &AnswerSet,
    bank: &QuestionBank,
    completed_at: DateTime<Utc>,
) -> AssessmentResult {
    let mut scores = ScoreVector::default();
    let mut interests = InterestVector::default();

    for (question_id, value) in answers {
        let Some(question) = bank.get(*question_id) else {
            continue;
        };
        if !question.accepts(value) {
            continue;
        }
        let value = value.as_str();

        match question.question_type {
            QuestionType::Technical => {
                scores.add(Trait::Technical, TECHNICAL_INCREMENT);
                if is_data_flavoured(value) {
                    interests.add(InterestTrack::DataScience, KEYWORD_INTEREST_INCREMENT);
                    scores.add(Trait::Analytical, KEYWORD_TRAIT_INCREMENT);
                }
                if is_web_flavoured(value) {
                    interests.add(InterestTrack::WebMobile, KEYWORD_INTEREST_INCREMENT);
                    scores.add(Trait::Creativity, KEYWORD_TRAIT_INCREMENT);
                }
            }
            QuestionType::Interest => {
                if let Some(track) = InterestTrack::from_token(value) {
                    interests.add(track, INTEREST_TRACK_INCREMENT);
                }
                match value {
                    "leadership" => scores.add(Trait::Leadership, TRAIT_INCREMENT),
                    "team" => scores.add(Trait::Collaboration, TRAIT_INCREMENT),
                    "creative" => scores.add(Trait::Creativity, TRAIT_INCREMENT),
                    _ => {}
                }
            }
            QuestionType::Personality => match value {
                "plan" | "leadership" => scores.add(Trait::Leadership, TRAIT_INCREMENT),
                "collaborate" | "discussion" => scores.add(Trait::Collaboration, TRAIT_INCREMENT),
                "hands-on" => scores.add(Trait::Creativity, TRAIT_INCREMENT),
                _ => {}
            },
            QuestionType::Aptitude => {
                scores.add(Trait::ProblemSolving, APTITUDE_INCREMENT);
                scores.add(Trait::Analytical, APTITUDE_INCREMENT);
            }
        }
    }

    let recommended_path = interests
        .top_track()
        .map(|t| t.path())
        .unwrap_or(PathId::DEFAULT);

    AssessmentResult {
        scores,
        interests,
        recommended_path,
        completed_at,
        total_questions: bank.len() as u32,
        answered_questions: answers.len() as u32,
    }
}

fn is_data_flavoured(token: &str) -> bool {
    token.contains("python")
        || token.contains("data")
        || matches!(token, "clean" | "statistics" | "ml")
}

fn is_web_flavoured(token: &str) -> bool {
    token.contains("javascript") || token.contains("web") || matches!(token, "scale-out" | "cloud")
}
