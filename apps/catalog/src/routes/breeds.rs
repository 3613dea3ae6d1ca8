use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Breed, BreedId, CategoricalField};
use crate::query::{filter_options, run_query, BreedFilters, BreedQuery, FilterOptions};
use crate::state::AppState;

/// Query-string form of a catalog query. Every field is optional and values
/// that do not parse are dropped rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct BreedListParams {
    pub q: Option<String>,
    pub origin: Option<String>,
    pub temperament: Option<String>,
    pub coat_length: Option<String>,
    pub body_type: Option<String>,
    pub activity_level: Option<String>,
    pub grooming_needs: Option<String>,
    pub sort: Option<String>,
}

impl From<BreedListParams> for BreedQuery {
    fn from(p: BreedListParams) -> Self {
        let filters = BreedFilters {
            origin: p.origin,
            temperament: p.temperament,
            coat_length: p.coat_length.and_then(|v| v.parse().ok()),
            body_type: p.body_type.and_then(|v| v.parse().ok()),
            activity_level: p.activity_level.and_then(|v| v.parse().ok()),
            grooming_needs: p.grooming_needs.and_then(|v| v.parse().ok()),
        };
        BreedQuery {
            search: p.q,
            filters,
            sort: p.sort.and_then(|v| v.parse().ok()).unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
pub struct BreedListResponse {
    pub count: usize,
    pub breeds: Vec<Breed>,
}

impl BreedListResponse {
    fn new(breeds: Vec<Breed>) -> Self {
        Self {
            count: breeds.len(),
            breeds,
        }
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct FieldValuesResponse {
    pub field: CategoricalField,
    pub values: Vec<String>,
}

/// GET /api/v1/breeds
pub async fn handle_list_breeds(
    State(state): State<AppState>,
    Query(params): Query<BreedListParams>,
) -> Json<BreedListResponse> {
    let query = BreedQuery::from(params);
    let breeds = run_query(&state.catalog, &query)
        .into_iter()
        .cloned()
        .collect();
    Json(BreedListResponse::new(breeds))
}

/// GET /api/v1/breeds/search?q=
pub async fn handle_search_breeds(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<BreedListResponse>, AppError> {
    let breeds = state.store.search_breeds(&params.q).await?;
    state.tracker.lock().await.record_search(&params.q).await;
    Ok(Json(BreedListResponse::new(breeds)))
}

/// GET /api/v1/breeds/:id
pub async fn handle_get_breed(
    State(state): State<AppState>,
    Path(id): Path<BreedId>,
) -> Result<Json<Breed>, AppError> {
    state
        .store
        .get_breed_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Breed {id} not found")))
}

/// GET /api/v1/filters
/// Option sets derived from the in-memory catalog.
pub async fn handle_filter_options(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(filter_options(&state.catalog))
}

/// GET /api/v1/filters/:field
pub async fn handle_field_values(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<FieldValuesResponse>, AppError> {
    let field = field
        .parse::<CategoricalField>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let values = state.store.list_distinct_values(field).await?;
    Ok(Json(FieldValuesResponse { field, values }))
}
