//! HTTP surface: a single aggregation endpoint plus a health probe.

use crate::config::Config;
use crate::core::{AggregateError, Aggregator, RankedVideo, SortMode, DEFAULT_MAX_VIDEOS};
use crate::sources::build_aggregator;
use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

/// Raw query parameters. Parsed by hand so bad values still get a JSON error body.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideosQuery {
    pub channel_url: Option<String>,
    pub sort_mode: Option<String>,
    pub max_videos: Option<String>,
}

impl VideosQuery {
    fn channel_url(&self) -> Result<&str, AggregateError> {
        self.channel_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AggregateError::invalid_input("Missing channelUrl param"))
    }

    fn sort_mode(&self) -> Result<SortMode, AggregateError> {
        match self.sort_mode.as_deref().map(str::trim) {
            None | Some("") => Ok(SortMode::default()),
            Some(value) => value.parse(),
        }
    }

    fn max_videos(&self) -> Result<usize, AggregateError> {
        match self.max_videos.as_deref().map(str::trim) {
            None | Some("") => Ok(DEFAULT_MAX_VIDEOS),
            Some(value) => value.parse::<usize>().map_err(|_| {
                AggregateError::invalid_input(format!("Invalid maxVideos '{}': expected an integer", value))
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideosResponse {
    pub data: Vec<RankedVideo>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<AggregateError> for ApiError {
    fn from(err: AggregateError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/videos", get(list_channel_videos))
        .route("/api/health", get(health))
        .fallback(not_found)
        .with_state(state)
}

/// `GET /api/videos?channelUrl=..&sortMode=likes|ratio&maxVideos=50..350`
pub async fn list_channel_videos(
    State(state): State<AppState>,
    query: Result<Query<VideosQuery>, QueryRejection>,
) -> ApiResult<Json<VideosResponse>> {
    let Query(query) = query?;
    let channel_url = query.channel_url()?;
    let sort_mode = query.sort_mode()?;
    let max_videos = query.max_videos()?;

    match state
        .aggregator
        .aggregate(channel_url, sort_mode, max_videos)
        .await
    {
        Ok(data) => Ok(Json(VideosResponse { data })),
        Err(err) => {
            if err.is_client_error() {
                info!("Rejected request for {}: {}", channel_url, err);
            } else {
                error!("Aggregation failed for {}: {}", channel_url, err);
            }
            Err(err.into())
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("endpoint not found: {}", uri.path()))
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let aggregator = build_aggregator(config)?;
    if config.youtube_api_key.is_none() {
        info!("No YouTube API key configured; only mirror instances will be used");
    }

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, router(AppState::new(aggregator)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running API server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", err);
    }
    info!("Shutting down");
}
