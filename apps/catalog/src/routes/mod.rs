pub mod breeds;
pub mod favorites;
pub mod health;
pub mod quiz;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/breeds", get(breeds::handle_list_breeds))
        .route("/api/v1/breeds/search", get(breeds::handle_search_breeds))
        .route("/api/v1/breeds/:id", get(breeds::handle_get_breed))
        .route("/api/v1/filters", get(breeds::handle_filter_options))
        .route("/api/v1/filters/:field", get(breeds::handle_field_values))
        // Favorites & history
        .route("/api/v1/favorites", get(favorites::handle_list_favorites))
        .route(
            "/api/v1/favorites/:id",
            get(favorites::handle_favorite_status),
        )
        .route(
            "/api/v1/favorites/:id/toggle",
            post(favorites::handle_toggle_favorite),
        )
        .route(
            "/api/v1/searches",
            get(favorites::handle_recent_searches).post(favorites::handle_record_search),
        )
        // Quiz
        .route("/api/v1/quiz", get(quiz::handle_quiz_state))
        .route("/api/v1/quiz/select", post(quiz::handle_select_option))
        .route("/api/v1/quiz/advance", post(quiz::handle_advance))
        .route("/api/v1/quiz/answer", post(quiz::handle_answer))
        .route("/api/v1/quiz/back", post(quiz::handle_back))
        .route("/api/v1/quiz/restart", post(quiz::handle_restart))
        .route(
            "/api/v1/quiz/recommendations",
            get(quiz::handle_recommendations),
        )
        .with_state(state)
}
