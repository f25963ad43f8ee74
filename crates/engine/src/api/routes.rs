use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use super::handlers;
use crate::generation::GenerationService;

pub fn create_router() -> Router<Arc<GenerationService>> {
    Router::new()
        .route("/generate", post(handlers::handle_generate))
        .route("/health", get(handlers::health_check))
}
