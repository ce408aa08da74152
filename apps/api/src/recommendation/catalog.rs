//! Catalog: courses, jobs and career titles the ranker orders for a user.
//!
//! `AppState` holds an `Arc<dyn CatalogSource>`: the embedded catalog by default,
//! or a remote JSON document when `CATALOG_URL` is configured. The ranker never
//! knows which one produced its input.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::taxonomy::{DifficultyTier, PathId};

// ────────────────────────────────────────────────────────────────────────────
// Data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Course,
    Job,
    Career,
}

impl CatalogKind {
    /// Accepts singular or plural names. Anything else is not a catalog.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "course" | "courses" => Some(CatalogKind::Course),
            "job" | "jobs" => Some(CatalogKind::Job),
            "career" | "careers" => Some(CatalogKind::Career),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Course => "course",
            CatalogKind::Job => "job",
            CatalogKind::Career => "career",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub skills: Vec<String>,
    /// Track this item is curated for. `None` means it is offered on every track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<PathId>,
    #[serde(flatten)]
    pub details: CatalogDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogDetails {
    Course {
        platform: String,
        provider: String,
        difficulty: DifficultyTier,
        duration: String,
        rating: f32,
        price: String,
        url: String,
    },
    Job {
        company: String,
        employment_type: String,
        salary: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
    Career {
        /// Seeded match score the ranker starts from.
        base_match: u32,
        reasons: Vec<String>,
        skill_gaps: Vec<String>,
        salary_min: u64,
        salary_max: u64,
        growth: String,
    },
}

impl CatalogItem {
    pub fn kind(&self) -> CatalogKind {
        match self.details {
            CatalogDetails::Course { .. } => CatalogKind::Course,
            CatalogDetails::Job { .. } => CatalogKind::Job,
            CatalogDetails::Career { .. } => CatalogKind::Career,
        }
    }

    pub fn offered_on(&self, track: PathId) -> bool {
        self.track.map_or(true, |t| t == track)
    }
}

/// A versioned catalog, as embedded or as served by a remote collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub version: String,
    pub items: Vec<CatalogItem>,
}

impl CatalogDocument {
    /// Items of one kind, optionally narrowed to a track, in document order.
    pub fn select(&self, kind: CatalogKind, track: Option<PathId>) -> CatalogDocument {
        let items = self
            .items
            .iter()
            .filter(|item| item.kind() == kind)
            .filter(|item| track.map_or(true, |t| item.offered_on(t)))
            .cloned()
            .collect();
        CatalogDocument {
            version: self.version.clone(),
            items,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sources
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(
        &self,
        kind: CatalogKind,
        track: Option<PathId>,
    ) -> Result<CatalogDocument, AppError>;
}

/// Catalog compiled into the binary.
pub struct StaticCatalog {
    document: CatalogDocument,
}

impl StaticCatalog {
    pub fn new(document: CatalogDocument) -> Self {
        Self { document }
    }

    pub fn builtin() -> anyhow::Result<Self> {
        let document: CatalogDocument = serde_json::from_str(include_str!("catalog.json"))
            .context("Embedded catalog is not valid JSON")?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &CatalogDocument {
        &self.document
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch(
        &self,
        kind: CatalogKind,
        track: Option<PathId>,
    ) -> Result<CatalogDocument, AppError> {
        Ok(self.document.select(kind, track))
    }
}

/// Fetches the whole catalog document from a remote URL on every call.
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build catalog HTTP client")?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(
        &self,
        kind: CatalogKind,
        track: Option<PathId>,
    ) -> Result<CatalogDocument, AppError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Catalog(format!("request to {} failed: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Catalog(format!(
                "{} returned {status}: {body}",
                self.url
            )));
        }

        let document: CatalogDocument = response
            .json()
            .await
            .map_err(|e| AppError::Catalog(format!("invalid catalog document: {e}")))?;
        debug!(
            "Fetched catalog {} ({} items) from {}",
            document.version,
            document.items.len(),
            self.url
        );
        Ok(document.select(kind, track))
    }
}
