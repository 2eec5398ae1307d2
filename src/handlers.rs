use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Extension, Multipart, Path};
use axum::http::header;
use axum::response::{IntoResponse, Json as ResponseJson, Response};
use reqwest::multipart::Part;
use tracing::{debug, error, info};

use crate::app::Relay;
use crate::error::{RelayError, RelayResult};
use crate::models::{ArticleForm, HealthResponse};
use crate::upload::TransientUpload;

/// Fixed failure messages, one per route. These are the public error
/// contract; the underlying cause is only ever logged.
pub const DETECT_ERROR: &str = "Error during disease detection";
pub const CREATE_ARTICLE_ERROR: &str = "Error posting article";
pub const LIST_ARTICLES_ERROR: &str = "Error retrieving articles";
pub const GET_ARTICLE_ERROR: &str = "Error retrieving article";
pub const ARTICLE_NOT_FOUND: &str = "Artikel tidak ditemukan";

/// Health check handler
pub async fn health_check() -> RelayResult<ResponseJson<HealthResponse>> {
    debug!("Health check endpoint called");
    Ok(ResponseJson(HealthResponse::ok()))
}

/// Forward an uploaded image to the backend's disease-detection endpoint.
/// The backend's JSON body is re-emitted verbatim with status 200.
pub async fn detect_image(
    Extension(relay): Extension<Relay>,
    multipart: Multipart,
) -> RelayResult<Response> {
    info!("Detection endpoint called");

    // Guard is dropped when the handler returns, deleting the scratch file
    // on every exit path.
    let (upload, _) = receive_upload(&relay, multipart, DETECT_ERROR).await?;
    let image = image_part(&upload, DETECT_ERROR).await?;

    let response = relay.backend.detect(image).await.map_err(|e| {
        error!("Error during disease detection: {e}");
        RelayError::Upstream(DETECT_ERROR)
    })?;

    forward_success(response, DETECT_ERROR).await
}

/// Forward an uploaded image plus article metadata to the backend's
/// article-creation endpoint.
pub async fn create_article(
    Extension(relay): Extension<Relay>,
    multipart: Multipart,
) -> RelayResult<Response> {
    let (upload, article) = receive_upload(&relay, multipart, CREATE_ARTICLE_ERROR).await?;
    info!("Posting article '{}' by '{}'", article.title, article.author);

    let image = image_part(&upload, CREATE_ARTICLE_ERROR).await?;

    let response = relay
        .backend
        .create_article(image, article)
        .await
        .map_err(|e| {
            error!("Error posting article: {e}");
            RelayError::Upstream(CREATE_ARTICLE_ERROR)
        })?;

    forward_success(response, CREATE_ARTICLE_ERROR).await
}

/// Forward a listing request to the backend.
pub async fn list_articles(Extension(relay): Extension<Relay>) -> RelayResult<Response> {
    debug!("Listing articles");

    let response = relay.backend.list_articles().await.map_err(|e| {
        error!("Error retrieving articles: {e}");
        RelayError::Upstream(LIST_ARTICLES_ERROR)
    })?;

    forward_success(response, LIST_ARTICLES_ERROR).await
}

/// Fetch one article by its opaque identifier. A backend 404 is the only
/// backend status the relay inspects to change behavior.
pub async fn get_article(
    Extension(relay): Extension<Relay>,
    Path(id): Path<String>,
) -> RelayResult<Response> {
    debug!("Fetching article {id}");

    let response = relay.backend.get_article(&id).await.map_err(|e| {
        error!("Error retrieving article {id}: {e}");
        RelayError::Upstream(GET_ARTICLE_ERROR)
    })?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        info!("Article {id} not found on backend");
        return Err(RelayError::NotFound(ARTICLE_NOT_FOUND));
    }

    forward_success(response, GET_ARTICLE_ERROR).await
}

/// Drain the inbound multipart body: the "image" field goes to a transient
/// file, the article text fields are collected as-is. Unknown fields are
/// ignored. A request without an image field is rejected before any
/// outbound call is made.
async fn receive_upload(
    relay: &Relay,
    mut multipart: Multipart,
    failure: &'static str,
) -> RelayResult<(TransientUpload, ArticleForm)> {
    let mut upload: Option<TransientUpload> = None;
    let mut article = ArticleForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                let stored = TransientUpload::write(&relay.upload_dir, file_name, &bytes)
                    .await
                    .map_err(|e| {
                        error!("Failed to store transient upload: {e}");
                        RelayError::Upstream(failure)
                    })?;
                upload = Some(stored);
            }
            "title" => article.title = field.text().await.map_err(bad_multipart)?,
            "content" => article.content = field.text().await.map_err(bad_multipart)?,
            "author" => article.author = field.text().await.map_err(bad_multipart)?,
            "publishDate" => article.publish_date = field.text().await.map_err(bad_multipart)?,
            "tags" => article.tags = field.text().await.map_err(bad_multipart)?,
            _ => debug!("Ignoring unknown multipart field '{name}'"),
        }
    }

    let upload = upload.ok_or_else(|| {
        RelayError::BadRequest("missing required file field 'image'".to_string())
    })?;

    Ok((upload, article))
}

fn bad_multipart(e: MultipartError) -> RelayError {
    RelayError::BadRequest(format!("unreadable multipart body: {e}"))
}

/// Read the transient file back and wrap it as the outbound "image" part.
async fn image_part(upload: &TransientUpload, failure: &'static str) -> RelayResult<Part> {
    let bytes = upload.read().await.map_err(|e| {
        error!("Failed to read transient upload back: {e}");
        RelayError::Upstream(failure)
    })?;

    Ok(Part::bytes(bytes).file_name(upload.file_name().to_string()))
}

/// Re-emit a successful backend body verbatim. Status is forced to 200 on
/// every success, matching the inbound contract; any non-2xx backend answer
/// maps to the route's fixed 500.
async fn forward_success(response: reqwest::Response, failure: &'static str) -> RelayResult<Response> {
    let status = response.status();
    if !status.is_success() {
        error!("Backend answered {status}");
        return Err(RelayError::Upstream(failure));
    }

    let body: Bytes = response.bytes().await.map_err(|e| {
        error!("Failed to read backend response body: {e}");
        RelayError::Upstream(failure)
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
