use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::models::{Profile, ProfilePatch};
use crate::recommendation::catalog::{CatalogItem, CatalogKind};
use crate::recommendation::filters::CatalogFilter;
use crate::recommendation::ranker::{rank, RankedItem, RankingPolicy, UserSignals};
use crate::state::AppState;
use crate::taxonomy::roadmap::{upload_roadmap_snapshot, Roadmap};
use crate::taxonomy::{determine_path, resolve, CareerPath, PathId};

#[derive(Deserialize)]
pub struct RecommendationQuery {
    pub user_id: Uuid,
    pub kind: String,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub kind: String,
    pub catalog_version: Option<String>,
    pub track: PathId,
    pub items: Vec<RankedItem>,
}

#[derive(Deserialize)]
pub struct TrackQuery {
    #[serde(default)]
    pub track: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub kind: String,
    pub catalog_version: Option<String>,
    pub total: usize,
    pub items: Vec<CatalogItem>,
}

#[derive(Deserialize)]
pub struct RoadmapRequest {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct RoadmapExportResponse {
    pub s3_key: String,
}

/// GET /api/v1/recommendations
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let profile = load_profile(&state, params.user_id).await?;
    let track = params
        .track
        .as_deref()
        .map(|raw| PathId::parse(raw).unwrap_or(PathId::DEFAULT))
        .unwrap_or_else(|| path_for(&profile));

    let Some(kind) = CatalogKind::parse(&params.kind) else {
        return Ok(Json(RecommendationResponse {
            kind: params.kind,
            catalog_version: None,
            track,
            items: Vec::new(),
        }));
    };

    let catalog = state.catalog.fetch(kind, Some(track)).await?;
    let signals = UserSignals::from_profile(&profile);
    let mut items = rank(&catalog.items, &signals, &RankingPolicy::for_kind(kind));
    if let Some(limit) = params.limit {
        items.truncate(limit);
    }

    info!(
        "Ranked {} {} item(s) on {} for user {}",
        items.len(),
        kind.as_str(),
        track.as_str(),
        params.user_id
    );
    Ok(Json(RecommendationResponse {
        kind: kind.as_str().to_string(),
        catalog_version: Some(catalog.version),
        track,
        items,
    }))
}

/// GET /api/v1/paths/:id
pub async fn handle_resolve_path(Path(id): Path<String>) -> Json<&'static CareerPath> {
    Json(resolve(&id))
}

/// GET /api/v1/catalog/:kind/search
pub async fn handle_search_catalog(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(scope): Query<TrackQuery>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<SearchResponse>, AppError> {
    let Some(parsed) = CatalogKind::parse(&kind) else {
        return Ok(Json(SearchResponse {
            kind,
            catalog_version: None,
            total: 0,
            items: Vec::new(),
        }));
    };

    let track = scope
        .track
        .as_deref()
        .map(|raw| PathId::parse(raw).unwrap_or(PathId::DEFAULT));
    let catalog = state.catalog.fetch(parsed, track).await?;
    let items = filter.apply(catalog.items);

    Ok(Json(SearchResponse {
        kind: parsed.as_str().to_string(),
        catalog_version: Some(catalog.version),
        total: items.len(),
        items,
    }))
}

/// GET /api/v1/roadmap
///
/// Builds the roadmap for the user's current path and stores it on the profile.
pub async fn handle_get_roadmap(
    State(state): State<AppState>,
    Query(req): Query<RoadmapRequest>,
) -> Result<Json<Value>, AppError> {
    let profile = load_profile(&state, req.user_id).await?;
    let roadmap = roadmap_for(&profile);
    let value = serde_json::to_value(&roadmap).map_err(anyhow::Error::from)?;

    state
        .profiles
        .put(req.user_id, ProfilePatch::roadmap(value.clone()))
        .await?;
    info!(
        "Stored {} roadmap for user {} ({} skill(s) missing, job fit {:?})",
        roadmap.career_path.id.as_str(),
        req.user_id,
        roadmap.missing_skills.len(),
        roadmap.job_fit_score
    );
    Ok(Json(value))
}

/// POST /api/v1/roadmap/export
pub async fn handle_export_roadmap(
    State(state): State<AppState>,
    Json(req): Json<RoadmapRequest>,
) -> Result<Json<RoadmapExportResponse>, AppError> {
    let profile = load_profile(&state, req.user_id).await?;
    let roadmap = roadmap_for(&profile);
    let s3_key = upload_roadmap_snapshot(&state.s3, &state.config.s3_bucket, req.user_id, &roadmap)
        .await
        .map_err(|e| AppError::S3(e.to_string()))?;
    Ok(Json(RoadmapExportResponse { s3_key }))
}

/// Users without a stored profile get recommendations from an empty one.
async fn load_profile(state: &AppState, user_id: Uuid) -> Result<Profile, AppError> {
    Ok(state
        .profiles
        .get(user_id)
        .await?
        .unwrap_or_else(|| Profile::empty(user_id)))
}

fn roadmap_for(profile: &Profile) -> Roadmap {
    let roadmap = Roadmap::build(path_for(profile), &profile.skills, Utc::now());
    match &profile.assessment {
        Some(assessment) => roadmap.with_assessment(assessment, &profile.skills),
        None => roadmap,
    }
}

fn path_for(profile: &Profile) -> PathId {
    determine_path(
        &profile.interests,
        profile.assessment.as_ref().map(|a| a.recommended_path),
    )
}
