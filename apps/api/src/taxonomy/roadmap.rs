//! Roadmap assembly for a user on a given path, plus markdown snapshots in S3.

use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::assessment::scoring::AssessmentResult;
use crate::recommendation::ranker::UserSignals;
use crate::taxonomy::{
    track, CareerPath, CourseResource, Milestone, PathId, SkillCategory, TimelinePhase,
};

/// Weight of the average trait score in the job-fit score.
const TRAIT_WEIGHT: f64 = 0.4;
/// Weight of the roadmap skill match in the job-fit score.
const SKILL_WEIGHT: f64 = 0.3;
/// Interest contribution is a flat 50, weighted like the skill match.
const INTEREST_BASELINE: f64 = 50.0 * 0.3;
const MAX_JOB_FIT: u32 = 100;

/// Share of one skill-map category the user already covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillProgress {
    pub category: &'static str,
    pub percent: u32,
}

#[derive(Debug, Serialize)]
pub struct Roadmap {
    pub career_path: &'static CareerPath,
    pub timeline: &'static [TimelinePhase],
    pub skills: &'static [SkillCategory],
    pub milestones: &'static [Milestone],
    pub resources: &'static [CourseResource],
    /// Skill-map entries none of the user's skills cover, in skill-map order.
    pub missing_skills: Vec<&'static str>,
    pub skill_progress: Vec<SkillProgress>,
    /// Only present once the user has an assessment result.
    pub job_fit_score: Option<u32>,
    pub generated_at: DateTime<Utc>,
}

impl Roadmap {
    pub fn build(path: PathId, user_skills: &[String], now: DateTime<Utc>) -> Self {
        let profile = track(path);
        let signals = UserSignals::new(user_skills, None);
        let missing_skills = profile
            .skill_map
            .iter()
            .flat_map(|category| category.skills.iter().copied())
            .filter(|skill| !signals.covers(skill))
            .collect();
        let skill_progress = profile
            .skill_map
            .iter()
            .map(|category| SkillProgress {
                category: category.category,
                percent: coverage_percent(category.skills, &signals),
            })
            .collect();

        Self {
            career_path: &profile.path,
            timeline: profile.timeline,
            skills: profile.skill_map,
            milestones: profile.milestones,
            resources: profile.courses,
            missing_skills,
            skill_progress,
            job_fit_score: None,
            generated_at: now,
        }
    }

    /// Attaches the job-fit score for an assessed user.
    pub fn with_assessment(mut self, assessment: &AssessmentResult, user_skills: &[String]) -> Self {
        self.job_fit_score = Some(job_fit_score(assessment, &self, user_skills));
        self
    }

    pub fn required_skills(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.skills.iter().flat_map(|c| c.skills.iter().copied())
    }

    pub fn total_points(&self) -> u32 {
        self.milestones.iter().map(|m| m.points).sum()
    }

    /// S3 object key for this roadmap's snapshot.
    pub fn snapshot_key(&self, user_id: Uuid) -> String {
        format!(
            "roadmaps/{}/{}.md",
            user_id,
            self.generated_at.format("%Y%m%dT%H%M%SZ")
        )
    }
}

/// 40% of the average trait score, plus 30% of the share of user skills found inside
/// the roadmap's required skills, plus a flat interest baseline. Capped at 100.
///
/// Unlike skill coverage, the match here is one-way: a user skill counts when some
/// required skill contains it.
pub fn job_fit_score(assessment: &AssessmentResult, roadmap: &Roadmap, user_skills: &[String]) -> u32 {
    let required: Vec<String> = roadmap.required_skills().map(str::to_lowercase).collect();
    let signals = UserSignals::new(user_skills, None);
    let matched = signals
        .keywords()
        .iter()
        .filter(|skill| required.iter().any(|r| r.contains(skill.as_str())))
        .count();
    let skill_match = matched as f64 / required.len().max(1) as f64;

    let score = assessment.scores.average() * TRAIT_WEIGHT
        + skill_match * 100.0 * SKILL_WEIGHT
        + INTEREST_BASELINE;
    (score.round() as u32).min(MAX_JOB_FIT)
}

fn coverage_percent(skills: &[&str], signals: &UserSignals) -> u32 {
    if skills.is_empty() || signals.is_empty() {
        return 0;
    }
    let covered = skills.iter().filter(|s| signals.covers(s)).count();
    (covered as f64 * 100.0 / skills.len() as f64).round() as u32
}

/// Renders a roadmap as a markdown document.
pub fn render_roadmap_to_md(user_id: Uuid, roadmap: &Roadmap) -> String {
    let path = roadmap.career_path;
    let mut md = format!("# {} Roadmap — User {}\n\n", path.title, user_id);
    md.push_str(&format!("{}\n\n", path.description));
    md.push_str(&format!("- **Path:** {}\n", path.id.as_str()));
    md.push_str(&format!("- **Duration:** {}\n", path.duration_estimate));
    md.push_str(&format!("- **Salary:** {}\n", path.salary_band));
    md.push_str(&format!("- **Growth:** {}\n", path.growth_rate));
    md.push_str(&format!("- **Difficulty:** {:?}\n", path.difficulty_tier));
    if let Some(fit) = roadmap.job_fit_score {
        md.push_str(&format!("- **Job fit:** {fit}%\n"));
    }
    md.push_str(&format!(
        "- **Generated:** {}\n\n",
        roadmap.generated_at.to_rfc3339()
    ));

    md.push_str("## Timeline\n\n");
    for (i, phase) in roadmap.timeline.iter().enumerate() {
        md.push_str(&format!(
            "{}. **{}** ({}): {}\n",
            i + 1,
            phase.phase,
            phase.duration,
            phase.focus
        ));
    }
    md.push('\n');

    md.push_str("## Skills\n\n");
    for (category, progress) in roadmap.skills.iter().zip(&roadmap.skill_progress) {
        md.push_str(&format!("### {} ({}%)\n", category.category, progress.percent));
        for skill in category.skills {
            let mark = if roadmap.missing_skills.contains(skill) {
                " "
            } else {
                "x"
            };
            md.push_str(&format!("- [{mark}] {skill}\n"));
        }
        md.push('\n');
    }

    md.push_str("## Milestones\n\n");
    for milestone in roadmap.milestones {
        md.push_str(&format!("- {} ({} pts)\n", milestone.title, milestone.points));
    }
    md.push_str(&format!("\n**Total:** {} pts\n\n", roadmap.total_points()));

    md.push_str("## Resources\n\n");
    for course in roadmap.resources {
        md.push_str(&format!(
            "- {} ({}, {}, rated {:.1})\n",
            course.title, course.platform, course.duration, course.rating
        ));
    }

    md
}

/// Uploads the roadmap's markdown rendering and returns the object key.
pub async fn upload_roadmap_snapshot(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    user_id: Uuid,
    roadmap: &Roadmap,
) -> Result<String> {
    let s3_key = roadmap.snapshot_key(user_id);
    let md_content = render_roadmap_to_md(user_id, roadmap);

    s3.put_object()
        .bucket(s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(md_content.into_bytes()))
        .content_type("text/markdown")
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

    info!("Uploaded roadmap snapshot to s3://{}/{}", s3_bucket, s3_key);
    Ok(s3_key)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::assessment::scoring::{InterestVector, ScoreVector};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_build_copies_track_content() {
        let roadmap = Roadmap::build(PathId::DataScience, &[], at());
        let profile = track(PathId::DataScience);
        assert_eq!(roadmap.career_path.id, PathId::DataScience);
        assert_eq!(roadmap.timeline.len(), profile.timeline.len());
        assert_eq!(roadmap.resources.len(), profile.courses.len());
    }

    #[test]
    fn test_no_skills_means_everything_missing() {
        let roadmap = Roadmap::build(PathId::AiMl, &[], at());
        let total: usize = roadmap.skills.iter().map(|c| c.skills.len()).sum();
        assert_eq!(roadmap.missing_skills.len(), total);
    }

    #[test]
    fn test_user_skills_cover_case_insensitively() {
        let skills = vec!["python".to_string(), "PYTORCH".to_string()];
        let roadmap = Roadmap::build(PathId::AiMl, &skills, at());
        assert!(!roadmap.missing_skills.contains(&"Python"));
        assert!(!roadmap.missing_skills.contains(&"PyTorch"));
        assert!(roadmap.missing_skills.contains(&"TensorFlow"));
    }

    fn assessed(per_trait: u32) -> AssessmentResult {
        AssessmentResult {
            scores: ScoreVector {
                technical: per_trait,
                problem_solving: per_trait,
                data_science: per_trait,
                web_development: per_trait,
                leadership: per_trait,
                creativity: per_trait,
                analytical: per_trait,
                collaboration: per_trait,
            },
            interests: InterestVector::default(),
            recommended_path: PathId::AiMl,
            completed_at: at(),
            total_questions: 12,
            answered_questions: 12,
        }
    }

    #[test]
    fn test_skill_progress_per_category() {
        let skills = vec!["Python".to_string(), "statistics".to_string()];
        let roadmap = Roadmap::build(PathId::AiMl, &skills, at());
        let percents: Vec<(&str, u32)> = roadmap
            .skill_progress
            .iter()
            .map(|p| (p.category, p.percent))
            .collect();
        assert_eq!(
            percents,
            vec![("Core", 17), ("Math", 25), ("Tools", 0), ("Specialization", 0)]
        );
    }

    #[test]
    fn test_skill_progress_without_skills_is_zero() {
        let roadmap = Roadmap::build(PathId::Fullstack, &["  ".to_string()], at());
        assert!(roadmap.skill_progress.iter().all(|p| p.percent == 0));
        assert_eq!(roadmap.skill_progress.len(), roadmap.skills.len());
    }

    #[test]
    fn test_job_fit_without_skills_is_trait_share_plus_baseline() {
        let roadmap = Roadmap::build(PathId::AiMl, &[], at());
        // 20 * 0.4 + 0 + 15
        assert_eq!(job_fit_score(&assessed(20), &roadmap, &[]), 23);
        assert_eq!(roadmap.job_fit_score, None);
    }

    #[test]
    fn test_job_fit_counts_skills_inside_required_ones() {
        let skills = vec!["Python".to_string(), "statistics".to_string()];
        let roadmap = Roadmap::build(PathId::AiMl, &skills, at()).with_assessment(&assessed(5), &skills);
        // 5 * 0.4 + (2 / 19) * 30 + 15 = 20.16
        assert_eq!(roadmap.job_fit_score, Some(20));

        // A skill that only contains a required one does not count one-way.
        let broad = vec!["advanced python programming".to_string()];
        assert_eq!(job_fit_score(&assessed(5), &roadmap, &broad), 17);
    }

    #[test]
    fn test_job_fit_is_capped() {
        let roadmap = Roadmap::build(PathId::Cybersecurity, &[], at());
        assert_eq!(job_fit_score(&assessed(300), &roadmap, &[]), 100);
    }

    #[test]
    fn test_snapshot_key_layout() {
        let roadmap = Roadmap::build(PathId::Fullstack, &[], at());
        let user_id = Uuid::nil();
        assert_eq!(
            roadmap.snapshot_key(user_id),
            "roadmaps/00000000-0000-0000-0000-000000000000/20240115T103000Z.md"
        );
    }

    #[test]
    fn test_markdown_marks_covered_skills() {
        let roadmap = Roadmap::build(PathId::AiMl, &["Python".to_string()], at());
        let md = render_roadmap_to_md(Uuid::nil(), &roadmap);
        assert!(md.starts_with("# AI/Machine Learning Specialist Roadmap"));
        assert!(md.contains("- [x] Python\n"));
        assert!(md.contains("- [ ] TensorFlow\n"));
        assert!(md.contains("## Milestones"));
        assert!(md.contains("### Core (17%)\n"));
        assert!(!md.contains("Job fit"));
    }

    #[test]
    fn test_serializes_to_json_record() {
        let roadmap = Roadmap::build(PathId::Cybersecurity, &[], at());
        let value = serde_json::to_value(&roadmap).unwrap();
        assert_eq!(value["career_path"]["id"], "cybersecurity");
        assert_eq!(value["generated_at"], "2024-01-15T10:30:00Z");
        assert!(value["missing_skills"].is_array());
        assert_eq!(value["skill_progress"][0]["category"], "Core");
        assert!(value["job_fit_score"].is_null());
    }
}
