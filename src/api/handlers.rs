//! API Handlers
//!
//! HTTP request handlers for each page service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use tracing::info;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    HealthResponse, InvalidateResponse, PublishResponse, PublishTemplateRequest, StatsResponse,
};
use crate::templates::{InMemoryTemplateStore, PageService, TemplateStore};

/// Application state shared across all handlers.
///
/// The page cache lives inside the page service; cloning the state only
/// clones `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub pages: PageService,
}

impl AppState {
    /// Creates a new AppState around an existing page service.
    pub fn new(pages: PageService) -> Self {
        Self { pages }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Seeds the template store from `templates_path` when one is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let templates: Arc<dyn TemplateStore> = match &config.templates_path {
            Some(path) => Arc::new(InMemoryTemplateStore::load_from_file(path)?),
            None => Arc::new(InMemoryTemplateStore::new()),
        };
        let cache = Arc::new(Cache::new());
        Ok(Self::new(PageService::new(cache, templates, config.page_ttl())))
    }

    /// The shared page cache.
    pub fn cache(&self) -> &Arc<Cache<String>> {
        self.pages.cache()
    }
}

/// Handler for GET /v1/page/:name
///
/// Serves the rendered page, from the cache when possible.
pub async fn page_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>> {
    let html = state.pages.render(&name)?;
    Ok(Html(html))
}

/// Handler for PUT /v1/templates
///
/// Stores a template and invalidates its cached page.
pub async fn publish_handler(
    State(state): State<AppState>,
    Json(req): Json<PublishTemplateRequest>,
) -> Result<Json<PublishResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let name = req.name.clone();
    state.pages.publish(req.into());
    info!(template = %name, "Template published");

    Ok(Json(PublishResponse::new(name)))
}

/// Handler for DELETE /v1/cache/:key
///
/// Drops a cached page; 404 if nothing live was cached under the key.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    if !state.pages.invalidate(&key) {
        return Err(AppError::NotFound(key));
    }

    Ok(Json(InvalidateResponse::new(key)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache().stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{Template, TemplateStatus};
    use std::time::Duration;

    fn test_state() -> AppState {
        let templates = InMemoryTemplateStore::from_templates(vec![
            Template::new("home", "<h1>{{ .title }}</h1>").with_data(r#"{"title": "Hi"}"#),
        ]);
        AppState::new(PageService::new(
            Arc::new(Cache::new()),
            Arc::new(templates),
            Duration::from_secs(60),
        ))
    }

    fn publish_request(name: &str, html: &str) -> PublishTemplateRequest {
        PublishTemplateRequest {
            name: name.to_string(),
            html: html.to_string(),
            data: None,
            status: TemplateStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_page_handler() {
        let state = test_state();

        let Html(body) = page_handler(State(state.clone()), Path("home".to_string()))
            .await
            .unwrap();
        assert_eq!(body, "<h1>Hi</h1>");
        assert_eq!(state.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_page_handler_not_found() {
        let state = test_state();

        let result = page_handler(State(state), Path("missing".to_string())).await;
        assert!(matches!(result, Err(AppError::TemplateNotFound(_))));
    }

    #[tokio::test]
    async fn test_publish_handler_invalidates_page() {
        let state = test_state();
        page_handler(State(state.clone()), Path("home".to_string()))
            .await
            .unwrap();

        let result = publish_handler(
            State(state.clone()),
            Json(publish_request("home", "<h2>new</h2>")),
        )
        .await;
        assert!(result.is_ok());

        let Html(body) = page_handler(State(state), Path("home".to_string()))
            .await
            .unwrap();
        assert_eq!(body, "<h2>new</h2>");
    }

    #[tokio::test]
    async fn test_publish_invalid_request() {
        let state = test_state();

        let result = publish_handler(State(state), Json(publish_request("", "<p></p>"))).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_invalidate_handler() {
        let state = test_state();

        let result = invalidate_handler(State(state.clone()), Path("home".to_string())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        page_handler(State(state.clone()), Path("home".to_string()))
            .await
            .unwrap();
        let result = invalidate_handler(State(state.clone()), Path("home".to_string())).await;
        assert!(result.is_ok());
        assert!(state.cache().is_empty());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_from_config_without_templates() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert!(state.cache().is_empty());
    }

    #[test]
    fn test_from_config_missing_templates_file() {
        let config = Config {
            templates_path: Some("/nonexistent/templates.json".into()),
            ..Config::default()
        };
        assert!(AppState::from_config(&config).is_err());
    }
}
