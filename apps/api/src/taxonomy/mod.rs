//! Path Taxonomy: the fixed set of career tracks and their reference content.
//!
//! Everything here is static data. Adding a track means adding a `PathId`
//! variant and a `TrackProfile` row in `tracks.rs`; the scoring engine and
//! the ranker are untouched.

pub mod roadmap;
mod tracks;

use serde::{Deserialize, Serialize};

pub use tracks::TRACKS;

/// Identifier of a career path in the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathId {
    AiMl,
    DataScience,
    Fullstack,
    Cybersecurity,
}

impl PathId {
    pub const ALL: [PathId; 4] = [
        PathId::AiMl,
        PathId::DataScience,
        PathId::Fullstack,
        PathId::Cybersecurity,
    ];

    /// Track used whenever a path id is unknown or no interest stands out.
    pub const DEFAULT: PathId = PathId::Fullstack;

    pub fn as_str(&self) -> &'static str {
        match self {
            PathId::AiMl => "ai-ml",
            PathId::DataScience => "data-science",
            PathId::Fullstack => "fullstack",
            PathId::Cybersecurity => "cybersecurity",
        }
    }

    /// Parses a path id. `web-mobile` is accepted as an alias of `fullstack`.
    pub fn parse(raw: &str) -> Option<PathId> {
        match raw.trim().to_lowercase().as_str() {
            "ai-ml" => Some(PathId::AiMl),
            "data-science" => Some(PathId::DataScience),
            "fullstack" | "web-mobile" => Some(PathId::Fullstack),
            "cybersecurity" => Some(PathId::Cybersecurity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "beginner" => Some(DifficultyTier::Beginner),
            "intermediate" => Some(DifficultyTier::Intermediate),
            "advanced" => Some(DifficultyTier::Advanced),
            _ => None,
        }
    }
}

/// Descriptive metadata for a career path.
#[derive(Debug, Serialize)]
pub struct CareerPath {
    pub id: PathId,
    pub title: &'static str,
    pub description: &'static str,
    pub color_tag: &'static str,
    pub duration_estimate: &'static str,
    pub salary_band: &'static str,
    pub growth_rate: &'static str,
    pub difficulty_tier: DifficultyTier,
}

#[derive(Debug, Serialize)]
pub struct TimelinePhase {
    pub phase: &'static str,
    pub duration: &'static str,
    pub focus: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SkillCategory {
    pub category: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct Milestone {
    pub title: &'static str,
    pub points: u32,
}

#[derive(Debug, Serialize)]
pub struct CourseResource {
    pub platform: &'static str,
    pub title: &'static str,
    pub duration: &'static str,
    pub rating: f32,
}

/// Full reference record for one track.
#[derive(Debug, Serialize)]
pub struct TrackProfile {
    pub path: CareerPath,
    pub skill_map: &'static [SkillCategory],
    pub timeline: &'static [TimelinePhase],
    pub milestones: &'static [Milestone],
    pub courses: &'static [CourseResource],
}

/// Looks up the reference record for a path id.
pub fn track(id: PathId) -> &'static TrackProfile {
    TRACKS
        .iter()
        .find(|t| t.path.id == id)
        .unwrap_or(&TRACKS[DEFAULT_TRACK_INDEX])
}

/// Resolves a raw path id to its career path, falling back to `fullstack`.
pub fn resolve(raw: &str) -> &'static CareerPath {
    let id = PathId::parse(raw).unwrap_or(PathId::DEFAULT);
    &track(id).path
}

const DEFAULT_TRACK_INDEX: usize = 2;

/// Picks the path a roadmap should follow from profile interests and the
/// path recommended by the latest assessment, in fixed priority order.
pub fn determine_path(interests: &[String], assessed: Option<PathId>) -> PathId {
    let has = |name: &str| interests.iter().any(|i| i.eq_ignore_ascii_case(name));

    if has("Machine Learning") || has("Artificial Intelligence") || assessed == Some(PathId::AiMl)
    {
        return PathId::AiMl;
    }
    if has("Data Science") || assessed == Some(PathId::DataScience) {
        return PathId::DataScience;
    }
    if has("Cybersecurity") || assessed == Some(PathId::Cybersecurity) {
        return PathId::Cybersecurity;
    }
    PathId::Fullstack
}
