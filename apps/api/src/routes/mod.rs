pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::profile::handlers as profile;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment
        .route(
            "/api/v1/assessment/questions",
            get(assessment::handle_get_questions),
        )
        .route("/api/v1/assessment/score", post(assessment::handle_score))
        .route(
            "/api/v1/assessment/attempts",
            post(assessment::handle_start_attempt),
        )
        .route(
            "/api/v1/assessment/attempts/:id",
            get(assessment::handle_get_attempt).delete(assessment::handle_abandon_attempt),
        )
        .route(
            "/api/v1/assessment/attempts/:id/answers",
            put(assessment::handle_record_answer),
        )
        .route(
            "/api/v1/assessment/attempts/:id/submit",
            post(assessment::handle_submit_attempt),
        )
        // Paths, recommendations and roadmaps
        .route("/api/v1/paths/:id", get(recommendation::handle_resolve_path))
        .route(
            "/api/v1/recommendations",
            get(recommendation::handle_get_recommendations),
        )
        .route(
            "/api/v1/catalog/:kind/search",
            get(recommendation::handle_search_catalog),
        )
        .route("/api/v1/roadmap", get(recommendation::handle_get_roadmap))
        .route(
            "/api/v1/roadmap/export",
            post(recommendation::handle_export_roadmap),
        )
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use aws_sdk_s3::config::{BehaviorVersion, Region};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::assessment::question_bank::QuestionBank;
    use crate::assessment::registry::AssessmentRegistry;
    use crate::assessment::scoring::score;
    use crate::config::Config;
    use crate::profile::models::ProfilePatch;
    use crate::profile::store::{InMemoryProfileStore, ProfileStore};
    use crate::recommendation::catalog::StaticCatalog;

    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://unused".into(),
            s3_bucket: "pathwise-test".into(),
            s3_endpoint: "http://127.0.0.1:9000".into(),
            aws_access_key_id: "test".into(),
            aws_secret_access_key: "test".into(),
            port: 0,
            rust_log: "debug".into(),
            assessment_duration_secs: 1200,
            assessment_retention_secs: 900,
            catalog_url: None,
        };
        let s3 = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new("us-east-1"))
                .build(),
        );
        let bank = Arc::new(QuestionBank::standard());
        let profiles: Arc<dyn ProfileStore> = Arc::new(InMemoryProfileStore::new());
        let assessments = AssessmentRegistry::new(bank.clone(), profiles.clone(), 1200);

        AppState {
            s3,
            config,
            bank,
            profiles,
            catalog: Arc::new(StaticCatalog::builtin().unwrap()),
            assessments,
        }
    }

    async fn call(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state();
        let (status, body) = call(&state, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "pathwise-api");
    }

    #[tokio::test]
    async fn test_question_bank_endpoint() {
        let state = test_state();
        let (status, body) = call(&state, "GET", "/api/v1/assessment/questions", None).await;
        assert_eq!(status, StatusCode::OK);
        let questions = body["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 12);
        assert_eq!(questions[0]["type"], "technical");
    }

    #[tokio::test]
    async fn test_stateless_scoring() {
        let state = test_state();
        let (status, body) = call(
            &state,
            "POST",
            "/api/v1/assessment/score",
            Some(json!({"answers": {"1": "python", "3": "some-roses-red", "8": "ai-ml"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommended_path"], "ai-ml");
        assert_eq!(body["scores"]["analytical"], 20);
        assert_eq!(body["interests"]["ai-ml"], 20);
        assert_eq!(body["answered_questions"], 3);
    }

    #[tokio::test]
    async fn test_scoring_keeps_valid_answers_beside_non_numeric_ids() {
        let state = test_state();
        let (status, body) = call(
            &state,
            "POST",
            "/api/v1/assessment/score",
            Some(json!({"answers": {"q1": "python", "8": "ai-ml"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommended_path"], "ai-ml");
        assert_eq!(body["interests"]["ai-ml"], 20);
        assert_eq!(body["scores"]["technical"], 0);
        assert_eq!(body["answered_questions"], 2);
    }

    #[tokio::test]
    async fn test_attempt_lifecycle_over_http() {
        let state = test_state();
        let user_id = Uuid::new_v4();

        let (status, started) = call(
            &state,
            "POST",
            "/api/v1/assessment/attempts",
            Some(json!({"user_id": user_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(started["status"], "in_progress");
        let id = started["id"].as_str().unwrap().to_string();
        let answers_uri = format!("/api/v1/assessment/attempts/{id}/answers");
        let submit_uri = format!("/api/v1/assessment/attempts/{id}/submit");

        let (status, _) = call(
            &state,
            "PUT",
            &answers_uri,
            Some(json!({"question_id": 8, "value": "cybersecurity"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&state, "POST", &submit_uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let answers: Vec<(u32, &str)> = state
            .bank
            .questions()
            .iter()
            .filter(|q| q.id != 8)
            .map(|q| (q.id, q.options[0].value))
            .collect();
        for (question_id, value) in answers {
            let (status, _) = call(
                &state,
                "PUT",
                &answers_uri,
                Some(json!({"question_id": question_id, "value": value})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, submitted) = call(&state, "POST", &submit_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(submitted["status"], "persisted");
        assert_eq!(submitted["result"]["answered_questions"], 12);

        let (status, body) = call(
            &state,
            "PUT",
            &answers_uri,
            Some(json!({"question_id": 1, "value": "java"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");

        let (status, profile) = call(
            &state,
            "GET",
            &format!("/api/v1/profile?user_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["assessment"], submitted["result"]);
    }

    #[tokio::test]
    async fn test_abandon_over_http() {
        let state = test_state();
        let (_, started) = call(
            &state,
            "POST",
            "/api/v1/assessment/attempts",
            Some(json!({"user_id": Uuid::new_v4()})),
        )
        .await;
        let uri = format!("/api/v1/assessment/attempts/{}", started["id"].as_str().unwrap());

        let (status, _) = call(&state, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = call(&state, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_found() {
        let state = test_state();
        let (status, _) = call(
            &state,
            "GET",
            &format!("/api/v1/profile?user_id={}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_recommendations_follow_profile() {
        let state = test_state();
        let user_id = Uuid::new_v4();
        let (status, _) = call(
            &state,
            "PUT",
            "/api/v1/profile",
            Some(json!({
                "user_id": user_id,
                "skills": ["Python"],
                "interests": ["Machine Learning"],
                "career_stage": "student"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(
            &state,
            "GET",
            &format!("/api/v1/recommendations?user_id={user_id}&kind=courses&limit=3"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "course");
        assert_eq!(body["track"], "ai-ml");
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["title"], "Machine Learning by Andrew Ng");
        assert_eq!(items[0]["relevance_score"], 60);
    }

    #[tokio::test]
    async fn test_explicit_track_overrides_profile() {
        let state = test_state();
        let (status, body) = call(
            &state,
            "GET",
            &format!(
                "/api/v1/recommendations?user_id={}&kind=job&track=cybersecurity",
                Uuid::new_v4()
            ),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["track"], "cybersecurity");
        let items = body["items"].as_array().unwrap();
        assert!(items.iter().any(|i| i["company"] == "Paytm"));
        assert!(items.iter().all(|i| i["company"] != "Razorpay"));
    }

    #[tokio::test]
    async fn test_unknown_kind_yields_empty_list() {
        let state = test_state();
        let (status, body) = call(
            &state,
            "GET",
            &format!("/api/v1/recommendations?user_id={}&kind=podcasts", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"], json!([]));

        let (status, body) = call(&state, "GET", "/api/v1/catalog/podcasts/search", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_resolve_path_falls_back() {
        let state = test_state();
        let (status, body) = call(&state, "GET", "/api/v1/paths/astrophysics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "fullstack");

        let (_, body) = call(&state, "GET", "/api/v1/paths/data-science", None).await;
        assert_eq!(body["id"], "data-science");
    }

    #[tokio::test]
    async fn test_catalog_search() {
        let state = test_state();
        let (status, body) = call(
            &state,
            "GET",
            "/api/v1/catalog/courses/search?difficulty=Beginner&min_rating=4.8",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);

        let (_, body) = call(
            &state,
            "GET",
            "/api/v1/catalog/jobs/search?employment_type=internship&track=fullstack",
            None,
        )
        .await;
        let titles: Vec<&str> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Full Stack Intern", "Data Analyst Intern"]);
    }

    #[tokio::test]
    async fn test_roadmap_is_stored_on_profile() {
        let state = test_state();
        let user_id = Uuid::new_v4();
        call(
            &state,
            "PUT",
            "/api/v1/profile",
            Some(json!({"user_id": user_id, "interests": ["Cybersecurity"], "skills": ["Linux"]})),
        )
        .await;

        let (status, roadmap) = call(
            &state,
            "GET",
            &format!("/api/v1/roadmap?user_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(roadmap["career_path"]["id"], "cybersecurity");

        assert!(roadmap["job_fit_score"].is_null());

        let stored = state.profiles.get(user_id).await.unwrap().unwrap();
        assert_eq!(stored.roadmap, Some(roadmap));
    }

    #[tokio::test]
    async fn test_roadmap_scores_job_fit_for_assessed_user() {
        let state = test_state();
        let user_id = Uuid::new_v4();
        let answers = BTreeMap::from([(8, "cybersecurity".to_string())]);
        let result = score(&answers, &state.bank);
        state
            .profiles
            .put(user_id, ProfilePatch::assessment(result))
            .await
            .unwrap();
        state
            .profiles
            .put(
                user_id,
                ProfilePatch {
                    skills: Some(vec!["Linux".to_string()]),
                    ..ProfilePatch::default()
                },
            )
            .await
            .unwrap();

        let (status, roadmap) = call(
            &state,
            "GET",
            &format!("/api/v1/roadmap?user_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(roadmap["career_path"]["id"], "cybersecurity");
        // 0 * 0.4 + (1 / 16) * 30 + 15
        assert_eq!(roadmap["job_fit_score"], 17);
        assert_eq!(roadmap["skill_progress"][1]["category"], "Offensive");
        assert_eq!(roadmap["skill_progress"][1]["percent"], 25);
    }
}
