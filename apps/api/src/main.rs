mod assessment;
mod config;
mod db;
mod errors;
mod profile;
mod recommendation;
mod routes;
mod state;
mod taxonomy;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::question_bank::QuestionBank;
use crate::assessment::registry::AssessmentRegistry;
use crate::config::Config;
use crate::db::create_pool;
use crate::profile::store::{PgProfileStore, ProfileStore};
use crate::recommendation::catalog::{CatalogSource, HttpCatalogSource, StaticCatalog};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathwise API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (Profile Store)
    let db = create_pool(&config.database_url).await?;
    let profiles: Arc<dyn ProfileStore> = Arc::new(PgProfileStore::new(db));

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize catalog source
    let catalog: Arc<dyn CatalogSource> = match &config.catalog_url {
        Some(url) => {
            info!("Using remote catalog at {url}");
            Arc::new(HttpCatalogSource::new(url.clone())?)
        }
        None => {
            let builtin = StaticCatalog::builtin()?;
            info!(
                "Using embedded catalog v{} ({} items)",
                builtin.document().version,
                builtin.document().items.len()
            );
            Arc::new(builtin)
        }
    };

    let bank = Arc::new(QuestionBank::standard());
    let assessments = AssessmentRegistry::new(
        bank.clone(),
        profiles.clone(),
        config.assessment_duration_secs,
    )
    .with_retention_secs(config.assessment_retention_secs);
    info!(
        "Assessment: {} questions, {}s countdown, settled attempts kept {}s",
        bank.len(),
        config.assessment_duration_secs,
        config.assessment_retention_secs
    );

    // Build app state
    let state = AppState {
        s3,
        config: config.clone(),
        bank,
        profiles,
        catalog,
        assessments,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the mobile client's hosts are fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "pathwise-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
