use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Breed, BreedId};
use crate::state::AppState;

#[derive(Serialize)]
pub struct FavoriteStatus {
    pub id: BreedId,
    pub favorite: bool,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct RecordSearchRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct SearchesResponse {
    pub searches: Vec<String>,
}

/// GET /api/v1/favorites
pub async fn handle_list_favorites(
    State(state): State<AppState>,
) -> Result<Json<Vec<Breed>>, AppError> {
    let favorites = state.tracker.lock().await.favorites().await?;
    Ok(Json(favorites))
}

/// POST /api/v1/favorites/:id/toggle
pub async fn handle_toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<BreedId>,
) -> Result<Json<FavoriteStatus>, AppError> {
    let favorite = state.tracker.lock().await.toggle_favorite(id).await?;
    Ok(Json(FavoriteStatus { id, favorite }))
}

/// GET /api/v1/favorites/:id
pub async fn handle_favorite_status(
    State(state): State<AppState>,
    Path(id): Path<BreedId>,
) -> Json<FavoriteStatus> {
    let favorite = state.tracker.lock().await.is_favorite(id);
    Json(FavoriteStatus { id, favorite })
}

/// GET /api/v1/searches?limit=
/// Without a limit, returns the cached suggestion list.
pub async fn handle_recent_searches(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<SearchesResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    let searches = match params.limit {
        Some(limit) => tracker.recent_searches(limit).await?,
        None => tracker.suggestions().to_vec(),
    };
    Ok(Json(SearchesResponse { searches }))
}

/// POST /api/v1/searches
/// Best-effort: a failed history write still answers with the current suggestions.
pub async fn handle_record_search(
    State(state): State<AppState>,
    Json(req): Json<RecordSearchRequest>,
) -> Json<SearchesResponse> {
    let mut tracker = state.tracker.lock().await;
    tracker.record_search(&req.query).await;
    Json(SearchesResponse {
        searches: tracker.suggestions().to_vec(),
    })
}
