// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::error::ApiError;
use crate::models::crawler::{CrawlRequest, CrawlResponseItem};
use crate::models::settings::Settings;
use crate::models::version::VersionResponse;
use crate::services::crawler::CrawlApiClient;
use crate::services::decoder::decode_results;
use crate::services::extractor::to_response_item;
use crate::services::normalizer::normalize_urls;
use anyhow::Context;
use axum::{
    body::to_bytes,
    extract::{ConnectInfo, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `CRAWL_RELAY_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("CRAWL_RELAY_VERSION");

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub crawl_api: Arc<CrawlApiClient>,
}

impl AppState {
    pub fn new(crawl_api: CrawlApiClient) -> Self {
        Self {
            crawl_api: Arc::new(crawl_api),
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::new(CrawlApiClient::new(&settings.crawl4ai_endpoint)?))
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "crawl-relay".to_string(),
        version: VERSION.to_string(),
    })
}

/// Entry point for `/crawl` and `/md`. Accepts every method so that non-POST
/// requests get the JSON error body instead of an empty 405.
pub async fn crawl_handler(State(state): State<AppState>, request: Request) -> Response {
    let client = client_address(&request);

    match handle_crawl(&state, request, &client).await {
        Ok(items) => {
            info!(client = %client, status = 200, items = items.len(), "crawl request served");
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            let status = e.status_code().as_u16();
            if e.status_code().is_server_error() {
                error!(client = %client, status, error = %e, "crawl request failed");
            } else {
                warn!(client = %client, status, error = %e, "crawl request rejected");
            }
            e.into_response()
        }
    }
}

async fn handle_crawl(
    state: &AppState,
    request: Request,
    client: &str,
) -> Result<Vec<CrawlResponseItem>, ApiError> {
    if request.method() != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    if !is_json_content_type(request.headers()) {
        return Err(ApiError::InvalidContentType);
    }

    let body = to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| ApiError::InvalidJson(e.to_string()))?;

    let payload: CrawlRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidJson(e.to_string()))?;

    let urls = normalize_urls(&payload)?;
    info!(client = %client, urls = ?urls, "crawl requested");

    let data = state.crawl_api.crawl(&urls).await?;
    let records = decode_results(data)?;

    Ok(records.iter().map(to_response_item).collect())
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// Peer address when the server was started with connect info
fn client_address(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

/// Bind the listening socket. An empty `listen_ip` means every interface:
/// dual-stack `[::]` where IPv6 is available, `0.0.0.0` otherwise.
pub async fn bind_listener(settings: &Settings) -> anyhow::Result<TcpListener> {
    let port = settings.listen_port;

    if settings.listen_ip.is_empty() {
        match TcpListener::bind((Ipv6Addr::UNSPECIFIED, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) => debug!(error = %e, "IPv6 bind failed, falling back to IPv4"),
        }
        return TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
            .await
            .with_context(|| format!("Failed to bind {}", settings.listen_address()));
    }

    TcpListener::bind((settings.listen_ip.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}", settings.listen_address()))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the Axum application router. `/crawl` and `/md` are aliases.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/crawl", any(crawl_handler))
        .route("/md", any(crawl_handler))
        .route("/version", get(version_handler))
        .with_state(state)
}
