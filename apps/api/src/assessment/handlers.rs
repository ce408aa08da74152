use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::assessment::attempt::AttemptView;
use crate::assessment::question_bank::QuestionBank;
use crate::assessment::scoring::{score, AnswerSet, AssessmentResult};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ScoreRequest {
    /// Question id → chosen option token. Keys arrive as JSON object strings.
    pub answers: BTreeMap<String, String>,
}

#[derive(Deserialize)]
pub struct StartAttemptRequest {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct RecordAnswerRequest {
    pub question_id: u32,
    pub value: String,
}

/// GET /api/v1/assessment/questions
pub async fn handle_get_questions(State(state): State<AppState>) -> Json<QuestionBank> {
    Json(state.bank.as_ref().clone())
}

/// POST /api/v1/assessment/score
///
/// Never fails on answer content. Entries whose key is not a question id still count
/// as answered but contribute nothing.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Json<AssessmentResult> {
    let (answers, unmatched) = parse_answer_keys(req.answers);
    let mut result = score(&answers, &state.bank);
    if unmatched > 0 {
        debug!("Scored {unmatched} answer(s) with unrecognised question ids as zero");
        result.answered_questions += unmatched;
    }
    Json(result)
}

/// POST /api/v1/assessment/attempts
pub async fn handle_start_attempt(
    State(state): State<AppState>,
    Json(req): Json<StartAttemptRequest>,
) -> Result<(StatusCode, Json<AttemptView>), AppError> {
    let view = state.assessments.start(req.user_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/assessment/attempts/:id
pub async fn handle_get_attempt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AttemptView>, AppError> {
    Ok(Json(state.assessments.view(id).await?))
}

/// PUT /api/v1/assessment/attempts/:id/answers
pub async fn handle_record_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordAnswerRequest>,
) -> Result<Json<AttemptView>, AppError> {
    let view = state
        .assessments
        .record_answer(id, req.question_id, req.value)
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/assessment/attempts/:id/submit
pub async fn handle_submit_attempt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AttemptView>, AppError> {
    Ok(Json(state.assessments.submit(id).await?))
}

/// DELETE /api/v1/assessment/attempts/:id
pub async fn handle_abandon_attempt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.assessments.abandon(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Splits raw answer keys into question ids. Returns the parsed set and the number of
/// entries that could not be placed in it: non-numeric keys, and keys such as `"01"`
/// that land on an id already taken.
fn parse_answer_keys(raw: BTreeMap<String, String>) -> (AnswerSet, u32) {
    let mut answers = AnswerSet::new();
    let mut unmatched = 0;
    for (key, value) in raw {
        match key.trim().parse::<u32>() {
            Ok(id) if !answers.contains_key(&id) => {
                answers.insert(id, value);
            }
            _ => unmatched += 1,
        }
    }
    (answers, unmatched)
}
