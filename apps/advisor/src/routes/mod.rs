pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis_client::{ADVICES_PATH, PERSONALITY_PATH, POTENTIAL_PATH};
use crate::state::AppState;
use crate::stub::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(POTENTIAL_PATH, post(handlers::handle_potential))
        .route(PERSONALITY_PATH, post(handlers::handle_personality))
        .route(ADVICES_PATH, get(handlers::handle_advices))
        .with_state(state)
}
