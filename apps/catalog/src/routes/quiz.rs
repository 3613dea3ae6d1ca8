use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Breed;
use crate::quiz::{recommend, Profile, QuizView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OptionRequest {
    #[serde(alias = "optionId")]
    pub option_id: String,
}

#[derive(Serialize)]
pub struct RecommendationsResponse {
    pub profile: &'static Profile,
    pub breeds: Vec<Breed>,
}

/// GET /api/v1/quiz
pub async fn handle_quiz_state(State(state): State<AppState>) -> Json<QuizView> {
    Json(state.quiz.lock().await.current_state())
}

/// POST /api/v1/quiz/select
/// Marks an option as pending without scoring it.
pub async fn handle_select_option(
    State(state): State<AppState>,
    Json(req): Json<OptionRequest>,
) -> Result<Json<QuizView>, AppError> {
    let mut quiz = state.quiz.lock().await;
    quiz.select_option(&req.option_id)?;
    Ok(Json(quiz.current_state()))
}

/// POST /api/v1/quiz/advance
pub async fn handle_advance(State(state): State<AppState>) -> Result<Json<QuizView>, AppError> {
    let mut quiz = state.quiz.lock().await;
    quiz.advance()?;
    Ok(Json(quiz.current_state()))
}

/// POST /api/v1/quiz/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(req): Json<OptionRequest>,
) -> Result<Json<QuizView>, AppError> {
    let mut quiz = state.quiz.lock().await;
    quiz.answer_question(&req.option_id)?;
    Ok(Json(quiz.current_state()))
}

/// POST /api/v1/quiz/back
pub async fn handle_back(State(state): State<AppState>) -> Result<Json<QuizView>, AppError> {
    let mut quiz = state.quiz.lock().await;
    quiz.previous_question()?;
    Ok(Json(quiz.current_state()))
}

/// POST /api/v1/quiz/restart
pub async fn handle_restart(State(state): State<AppState>) -> Json<QuizView> {
    let mut quiz = state.quiz.lock().await;
    quiz.restart();
    Json(quiz.current_state())
}

/// GET /api/v1/quiz/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let profile = state.quiz.lock().await.result()?;
    let breeds = recommend(profile, &state.catalog)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(RecommendationsResponse { profile, breeds }))
}
