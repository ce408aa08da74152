use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::assessment::scoring::AssessmentResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CareerStage {
    #[default]
    Student,
    FreshGraduate,
    EntryLevel,
    MidLevel,
    SeniorLevel,
    Executive,
}

impl CareerStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerStage::Student => "student",
            CareerStage::FreshGraduate => "fresh-graduate",
            CareerStage::EntryLevel => "entry-level",
            CareerStage::MidLevel => "mid-level",
            CareerStage::SeniorLevel => "senior-level",
            CareerStage::Executive => "executive",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "student" => Some(CareerStage::Student),
            "fresh-graduate" => Some(CareerStage::FreshGraduate),
            "entry-level" => Some(CareerStage::EntryLevel),
            "mid-level" => Some(CareerStage::MidLevel),
            "senior-level" => Some(CareerStage::SeniorLevel),
            "executive" => Some(CareerStage::Executive),
            _ => None,
        }
    }
}

/// The slice of a user profile this service reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub career_stage: CareerStage,
    pub assessment: Option<AssessmentResult>,
    pub roadmap: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// A blank profile for users the store has never seen.
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            skills: Vec::new(),
            interests: Vec::new(),
            career_stage: CareerStage::default(),
            assessment: None,
            roadmap: None,
            updated_at: Utc::now(),
        }
    }

    /// Applies a partial update. Absent fields keep their current value.
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(interests) = patch.interests {
            self.interests = interests;
        }
        if let Some(stage) = patch.career_stage {
            self.career_stage = stage;
        }
        if let Some(assessment) = patch.assessment {
            self.assessment = Some(assessment);
        }
        if let Some(roadmap) = patch.roadmap {
            self.roadmap = Some(roadmap);
        }
        self.updated_at = Utc::now();
    }
}

/// Partial profile write. A later write replaces (never merges) the stored assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub career_stage: Option<CareerStage>,
    #[serde(default)]
    pub assessment: Option<AssessmentResult>,
    #[serde(default)]
    pub roadmap: Option<Value>,
}

impl ProfilePatch {
    pub fn assessment(result: AssessmentResult) -> Self {
        Self {
            assessment: Some(result),
            ..Self::default()
        }
    }

    pub fn roadmap(roadmap: Value) -> Self {
        Self {
            roadmap: Some(roadmap),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub career_stage: String,
    pub assessment: Option<Json<AssessmentResult>>,
    pub roadmap: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: row.user_id,
            skills: row.skills,
            interests: row.interests,
            career_stage: CareerStage::parse(&row.career_stage).unwrap_or_default(),
            assessment: row.assessment.map(|Json(a)| a),
            roadmap: row.roadmap,
            updated_at: row.updated_at,
        }
    }
}
