//! Profile Store: durable keyed storage for profiles, assessment results and roadmaps.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`: PostgreSQL in production,
//! in-memory in tests. No transactions; last write wins.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::models::{Profile, ProfilePatch, ProfileRow};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Upserts the given fields and returns the stored profile.
    async fn put(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Profile, AppError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Profile::from))
    }

    async fn put(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Profile, AppError> {
        let ProfilePatch {
            skills,
            interests,
            career_stage,
            assessment,
            roadmap,
        } = patch;

        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles
                (user_id, skills, interests, career_stage, assessment, roadmap)
            VALUES
                ($1, COALESCE($2, ARRAY[]::TEXT[]), COALESCE($3, ARRAY[]::TEXT[]),
                 COALESCE($4, 'student'), $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                skills       = COALESCE($2, profiles.skills),
                interests    = COALESCE($3, profiles.interests),
                career_stage = COALESCE($4, profiles.career_stage),
                assessment   = COALESCE($5, profiles.assessment),
                roadmap      = COALESCE($6, profiles.roadmap),
                updated_at   = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(skills)
        .bind(interests)
        .bind(career_stage.map(|s| s.as_str()))
        .bind(assessment.map(Json))
        .bind(roadmap)
        .fetch_one(&self.pool)
        .await?;

        debug!("Upserted profile for user {user_id}");
        Ok(row.into())
    }
}

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn put(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Profile, AppError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(user_id)
            .or_insert_with(|| Profile::empty(user_id));
        profile.apply(patch);
        Ok(profile.clone())
    }
}
