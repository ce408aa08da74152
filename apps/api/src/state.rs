use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::assessment::question_bank::QuestionBank;
use crate::assessment::registry::AssessmentRegistry;
use crate::config::Config;
use crate::profile::store::ProfileStore;
use crate::recommendation::catalog::CatalogSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub config: Config,
    pub bank: Arc<QuestionBank>,
    /// PostgreSQL in production, in-memory in tests.
    pub profiles: Arc<dyn ProfileStore>,
    /// Embedded catalog by default; remote when `CATALOG_URL` is set.
    pub catalog: Arc<dyn CatalogSource>,
    pub assessments: AssessmentRegistry,
}
