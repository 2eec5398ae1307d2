use std::time::Duration;

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

use crate::models::ArticleForm;

/// HTTP client for the fixed backend service.
///
/// One reqwest client is built at startup and cloned into each handler;
/// clones share the same connection pool. Every request carries the
/// configured timeout so a stuck backend cannot hang inbound requests
/// indefinitely.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST /detect with the image as a multipart field named "image".
    pub async fn detect(&self, image: Part) -> reqwest::Result<Response> {
        self.http
            .post(format!("{}/detect", self.base_url))
            .multipart(Form::new().part("image", image))
            .send()
            .await
    }

    /// POST /articles with the image and the five metadata fields as form parts.
    pub async fn create_article(
        &self,
        image: Part,
        article: ArticleForm,
    ) -> reqwest::Result<Response> {
        let form = Form::new()
            .part("image", image)
            .text("title", article.title)
            .text("content", article.content)
            .text("author", article.author)
            .text("publishDate", article.publish_date)
            .text("tags", article.tags);

        self.http
            .post(format!("{}/articles", self.base_url))
            .multipart(form)
            .send()
            .await
    }

    /// GET /articles
    pub async fn list_articles(&self) -> reqwest::Result<Response> {
        self.http
            .get(format!("{}/articles", self.base_url))
            .send()
            .await
    }

    /// GET /articles/{id}; the identifier is opaque and interpolated as-is.
    pub async fn get_article(&self, id: &str) -> reqwest::Result<Response> {
        self.http
            .get(format!("{}/articles/{id}", self.base_url))
            .send()
            .await
    }
}
