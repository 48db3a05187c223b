use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{errors::ApiError, state::AppState};

// Include route modules
pub mod game;


pub const NEW_GAME: &str = "/new";
pub const VALIDATE: &str = "/validate";

pub fn routes(app_state: AppState) -> axum::Router {
    axum::Router::new()
        // Only GET is allowed on /new
        .route(NEW_GAME, get(game::new_game).fallback(method_not_allowed))
        // Only POST is allowed on /validate
        .route(VALIDATE, post(game::validate).fallback(method_not_allowed))
        .layer(DefaultBodyLimit::max(app_state.max_body_bytes))
        // Add trace layer for debugging
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
