//! Recommendation Ranker: orders a catalog by relevance to a user's skills and interests.
//!
//! Matching is bag-of-tokens: a catalog skill matches when it contains a user
//! signal or a user signal contains it, ignoring case. No stemming, no weights.
//! Each catalog skill adds its increment at most once.

use serde::Serialize;

use crate::profile::models::{CareerStage, Profile};
use crate::recommendation::catalog::{CatalogDetails, CatalogItem, CatalogKind};
use crate::taxonomy::DifficultyTier;

const MAX_RELEVANCE: u32 = 100;

/// Lower-cased, non-blank skill and interest names for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSignals {
    keywords: Vec<String>,
    career_stage: Option<CareerStage>,
}

impl UserSignals {
    pub fn new<I, S>(raw: I, career_stage: Option<CareerStage>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = raw
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            keywords,
            career_stage,
        }
    }

    /// Skills followed by interests, plus the profile's career stage.
    pub fn from_profile(profile: &Profile) -> Self {
        Self::new(
            profile.skills.iter().chain(profile.interests.iter()),
            Some(profile.career_stage),
        )
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Bidirectional, case-insensitive containment against any signal.
    pub fn covers(&self, skill: &str) -> bool {
        let skill = skill.trim().to_lowercase();
        if skill.is_empty() {
            return false;
        }
        self.keywords
            .iter()
            .any(|k| skill.contains(k.as_str()) || k.contains(skill.as_str()))
    }

    /// True when some signal appears inside `text`.
    pub fn mentioned_in(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

/// Increments applied for one catalog kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingPolicy {
    /// Starting score for items that carry no seeded score of their own.
    pub base: u32,
    pub per_match: u32,
    /// Added to beginner courses when the user is a student.
    pub beginner_student_bonus: u32,
    /// Added when a signal appears in the item title.
    pub title_match_bonus: u32,
}

impl RankingPolicy {
    pub fn for_kind(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Course => RankingPolicy {
                base: 30,
                per_match: 20,
                beginner_student_bonus: 10,
                title_match_bonus: 0,
            },
            CatalogKind::Job => RankingPolicy {
                base: 0,
                per_match: 20,
                beginner_student_bonus: 0,
                title_match_bonus: 0,
            },
            CatalogKind::Career => RankingPolicy {
                base: 0,
                per_match: 0,
                beginner_student_bonus: 0,
                title_match_bonus: 5,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub relevance_score: u32,
}

/// Scores every item and sorts descending. Ties keep catalog order; nothing is dropped.
pub fn rank(catalog: &[CatalogItem], signals: &UserSignals, policy: &RankingPolicy) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = catalog
        .iter()
        .map(|item| RankedItem {
            relevance_score: relevance(item, signals, policy),
            item: item.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    ranked
}

fn relevance(item: &CatalogItem, signals: &UserSignals, policy: &RankingPolicy) -> u32 {
    let mut score = match &item.details {
        CatalogDetails::Career { base_match, .. } => *base_match,
        _ => policy.base,
    };

    let matched = item.skills.iter().filter(|s| signals.covers(s)).count() as u32;
    score = score.saturating_add(matched.saturating_mul(policy.per_match));

    if let CatalogDetails::Course { difficulty, .. } = &item.details {
        if *difficulty == DifficultyTier::Beginner
            && signals.career_stage == Some(CareerStage::Student)
        {
            score = score.saturating_add(policy.beginner_student_bonus);
        }
    }

    if policy.title_match_bonus > 0 && signals.mentioned_in(&item.title) {
        score = score.saturating_add(policy.title_match_bonus);
    }

    score.min(MAX_RELEVANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::catalog::StaticCatalog;
    use crate::taxonomy::PathId;

    fn course(id: &str, skills: &[&str], difficulty: DifficultyTier) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            title: format!("Course {id}"),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            track: None,
            details: CatalogDetails::Course {
                platform: "coursera".into(),
                provider: "Test U".into(),
                difficulty,
                duration: "4 weeks".into(),
                rating: 4.5,
                price: "Free".into(),
                url: "https://example.org".into(),
            },
        }
    }

    fn career(title: &str, base_match: u32) -> CatalogItem {
        CatalogItem {
            id: title.to_lowercase(),
            title: title.to_string(),
            skills: vec![],
            track: None,
            details: CatalogDetails::Career {
                base_match,
                reasons: vec![],
                skill_gaps: vec![],
                salary_min: 0,
                salary_max: 0,
                growth: "+0%".into(),
            },
        }
    }

    fn course_policy() -> RankingPolicy {
        RankingPolicy::for_kind(CatalogKind::Course)
    }

    #[test]
    fn test_course_scoring_example() {
        // Python, React × [python, react, sql] → 30 + 20 + 20
        let catalog = vec![course("a", &["python", "react", "sql"], DifficultyTier::Intermediate)];
        let signals = UserSignals::new(["Python", "React"], Some(CareerStage::MidLevel));
        let ranked = rank(&catalog, &signals, &course_policy());
        assert_eq!(ranked[0].relevance_score, 70);
    }

    #[test]
    fn test_matching_is_bidirectional() {
        let catalog = vec![
            // signal inside skill
            course("a", &["Machine Learning"], DifficultyTier::Advanced),
            // skill inside signal
            course("b", &["ML"], DifficultyTier::Advanced),
        ];
        let signals = UserSignals::new(["learning", "html"], None);
        let ranked = rank(&catalog, &signals, &course_policy());
        assert_eq!(ranked[0].relevance_score, 50);
        assert_eq!(ranked[1].relevance_score, 50);
    }

    #[test]
    fn test_skill_counts_once_even_with_many_signals() {
        let catalog = vec![course("a", &["Python"], DifficultyTier::Advanced)];
        let signals = UserSignals::new(["python", "py", "Python 3"], None);
        let ranked = rank(&catalog, &signals, &course_policy());
        assert_eq!(ranked[0].relevance_score, 50);
    }

    #[test]
    fn test_blank_signals_match_nothing() {
        let catalog = vec![course("a", &["Python", "Rust"], DifficultyTier::Advanced)];
        let signals = UserSignals::new(["", "   "], None);
        assert!(signals.is_empty());
        assert_eq!(rank(&catalog, &signals, &course_policy())[0].relevance_score, 30);
    }

    #[test]
    fn test_student_beginner_bonus() {
        let catalog = vec![
            course("adv", &[], DifficultyTier::Advanced),
            course("beg", &[], DifficultyTier::Beginner),
        ];
        let student = UserSignals::new(Vec::<String>::new(), Some(CareerStage::Student));
        let ranked = rank(&catalog, &student, &course_policy());
        assert_eq!(ranked[0].item.id, "beg");
        assert_eq!(ranked[0].relevance_score, 40);

        let graduate = UserSignals::new(Vec::<String>::new(), Some(CareerStage::FreshGraduate));
        let ranked = rank(&catalog, &graduate, &course_policy());
        assert!(ranked.iter().all(|r| r.relevance_score == 30));
    }

    #[test]
    fn test_scores_are_clamped() {
        let catalog = vec![course(
            "a",
            &["python", "pandas", "numpy", "sql", "statistics"],
            DifficultyTier::Beginner,
        )];
        let signals = UserSignals::new(
            ["python", "pandas", "numpy", "sql", "statistics"],
            Some(CareerStage::Student),
        );
        assert_eq!(rank(&catalog, &signals, &course_policy())[0].relevance_score, 100);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog: Vec<CatalogItem> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| course(id, &["go"], DifficultyTier::Intermediate))
            .collect();
        let signals = UserSignals::new(["go"], None);
        let ids: Vec<String> = rank(&catalog, &signals, &course_policy())
            .into_iter()
            .map(|r| r.item.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_career_title_bonus() {
        let catalog = vec![career("Data Scientist", 85), career("Full Stack Developer", 92)];
        let signals = UserSignals::new(["data"], None);
        let ranked = rank(&catalog, &signals, &RankingPolicy::for_kind(CatalogKind::Career));
        assert_eq!(ranked[0].item.title, "Full Stack Developer");
        assert_eq!(ranked[0].relevance_score, 92);
        assert_eq!(ranked[1].relevance_score, 90);
    }

    #[test]
    fn test_career_title_bonus_respects_ceiling() {
        let catalog = vec![career("Full Stack Developer", 98)];
        let signals = UserSignals::new(["developer"], None);
        let ranked = rank(&catalog, &signals, &RankingPolicy::for_kind(CatalogKind::Career));
        assert_eq!(ranked[0].relevance_score, 100);
    }

    #[test]
    fn test_rank_over_builtin_catalog_is_deterministic() {
        let catalog = StaticCatalog::builtin().unwrap();
        let signals = UserSignals::new(["Python", "Machine Learning"], Some(CareerStage::Student));
        for kind in [CatalogKind::Course, CatalogKind::Job, CatalogKind::Career] {
            let items = items_of(&catalog, kind, None);
            let policy = RankingPolicy::for_kind(kind);
            let first = rank(&items, &signals, &policy);
            let second = rank(&items, &signals, &policy);

            assert_eq!(first.len(), items.len());
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            assert!(first.iter().all(|r| r.relevance_score <= 100));
            assert!(first
                .windows(2)
                .all(|w| w[0].relevance_score >= w[1].relevance_score));
        }
    }

    #[test]
    fn test_ai_ml_student_sees_andrew_ng_first() {
        let catalog = StaticCatalog::builtin().unwrap();
        let items = items_of(&catalog, CatalogKind::Course, Some(PathId::AiMl));
        let signals = UserSignals::new(["Python"], Some(CareerStage::Student));
        let ranked = rank(&items, &signals, &course_policy());
        assert_eq!(ranked[0].item.title, "Machine Learning by Andrew Ng");
        assert_eq!(ranked[0].relevance_score, 60);
    }

    fn items_of(catalog: &StaticCatalog, kind: CatalogKind, track: Option<PathId>) -> Vec<CatalogItem> {
        catalog.document().select(kind, track).items
    }
}
