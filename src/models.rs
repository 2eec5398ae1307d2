use serde::Serialize;

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Relay is healthy".to_string(),
        }
    }
}

/// The five article metadata fields, passed through to the backend untouched.
/// The relay performs no validation on any of them.
#[derive(Debug, Default)]
pub struct ArticleForm {
    pub title: String,
    pub content: String,
    pub author: String,
    pub publish_date: String,
    pub tags: String,
}
