use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Custom error type for the relay handlers
#[derive(Debug)]
pub enum RelayError {
    /// The client request could not be read (missing file part, bad multipart body)
    BadRequest(String),
    /// The backend reported 404 on a single-article lookup
    NotFound(&'static str),
    /// The backend was unreachable or answered outside the success range
    Upstream(&'static str),
}

/// Failure response body: a single `error` string, nothing else.
/// Backend error details are logged at the handler boundary, never exposed here.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RelayError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            RelayError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            RelayError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type for relay handlers
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upstream_maps_to_500() {
        let response = RelayError::Upstream("Error posting article").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Error posting article"})
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = RelayError::NotFound("Artikel tidak ditemukan").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Artikel tidak ditemukan"})
        );
    }

    #[tokio::test]
    async fn test_bad_request_maps_to_400() {
        let response = RelayError::BadRequest("missing required file field 'image'".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
