use crate::handlers::{create_article, detect_image, get_article, health_check, list_articles};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/detect", post(detect_image))
        .route("/api/articles", post(create_article).get(list_articles))
        .route("/api/articles/{id}", get(get_article))
}
