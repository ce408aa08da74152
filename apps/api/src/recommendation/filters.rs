//! Catalog search filters. Every criterion is optional; absent criteria match everything.

use serde::Deserialize;

use crate::recommendation::catalog::{CatalogDetails, CatalogItem};
use crate::taxonomy::DifficultyTier;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFilter {
    /// Courses: title or any skill. Jobs: title or company. Careers: title.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub min_rating: Option<f32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
}

impl CatalogFilter {
    pub fn apply(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        let query = non_blank(&self.query).map(str::to_lowercase);
        let title = item.title.to_lowercase();

        match &item.details {
            CatalogDetails::Course {
                provider,
                difficulty,
                rating,
                ..
            } => {
                if let Some(q) = &query {
                    let in_skills = item.skills.iter().any(|s| s.to_lowercase().contains(q));
                    if !title.contains(q) && !in_skills {
                        return false;
                    }
                }
                if let Some(wanted) = non_blank(&self.provider) {
                    if !provider.eq_ignore_ascii_case(wanted) {
                        return false;
                    }
                }
                if let Some(wanted) = non_blank(&self.difficulty) {
                    // Unrecognised difficulty names match nothing.
                    if DifficultyTier::parse(wanted) != Some(*difficulty) {
                        return false;
                    }
                }
                if let Some(min) = self.min_rating {
                    if *rating < min {
                        return false;
                    }
                }
                true
            }
            CatalogDetails::Job {
                company,
                employment_type,
                location,
                ..
            } => {
                if let Some(q) = &query {
                    if !title.contains(q) && !company.to_lowercase().contains(q) {
                        return false;
                    }
                }
                if let Some(wanted) = non_blank(&self.location) {
                    let wanted = wanted.to_lowercase();
                    let here = location.as_deref().unwrap_or_default().to_lowercase();
                    if !here.contains(&wanted) {
                        return false;
                    }
                }
                if let Some(wanted) = non_blank(&self.employment_type) {
                    if !employment_type.eq_ignore_ascii_case(wanted) {
                        return false;
                    }
                }
                true
            }
            CatalogDetails::Career { .. } => query.map_or(true, |q| title.contains(&q)),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
