// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Error types for the relay: upstream call failures, response decoding, and
//! the client-facing `ApiError` that renders as a JSON error body.

use crate::models::crawler::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Failure of a single upstream crawl attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Connection, DNS or body read failure
    #[error("{0}")]
    Transport(String),

    /// Upstream answered with something other than 200
    #[error("crawl api returned status {status}{}", preview_suffix(.body_preview))]
    Status { status: u16, body_preview: String },

    /// Upstream answered 200 with a body that is not JSON
    #[error("invalid json received from crawl api")]
    InvalidJson,

    #[error("no crawl api request candidates to try")]
    NoCandidates,
}

impl UpstreamError {
    /// Build a transport error carrying the full `source()` chain, since
    /// reqwest's top-level message omits the underlying cause.
    pub fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut detail = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !detail.contains(&cause_text) {
                detail.push_str(": ");
                detail.push_str(&cause_text);
            }
            source = cause.source();
        }
        UpstreamError::Transport(detail)
    }
}

fn preview_suffix(preview: &str) -> String {
    if preview.is_empty() {
        String::new()
    } else {
        format!(": {}", preview)
    }
}

/// Upstream payload matched none of the recognised result layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid json structure received from crawl api")]
    UnrecognizedStructure,
}

/// Everything a crawl request can fail with, mapped onto an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("content type must be application/json")]
    InvalidContentType,

    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// Body parsed, but neither `urls` nor `url` produced a usable URL
    #[error("request must include `url` or `urls`")]
    InvalidRequest,

    #[error("crawl api call failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    MalformedUpstream(#[from] DecodeError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidContentType | ApiError::InvalidJson(_) | ApiError::InvalidRequest => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(_) | ApiError::MalformedUpstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short machine-readable name placed in the `error` field
    pub fn error_name(&self) -> &'static str {
        match self {
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::InvalidContentType => "content type must be application/json",
            ApiError::InvalidJson(_) | ApiError::InvalidRequest => "invalid json",
            ApiError::Upstream(_) | ApiError::MalformedUpstream(_) => "bad gateway",
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::MethodNotAllowed | ApiError::InvalidContentType => None,
            ApiError::InvalidJson(detail) => Some(detail.clone()),
            ApiError::InvalidRequest => Some(self.to_string()),
            ApiError::Upstream(err) => Some(err.to_string()),
            ApiError::MalformedUpstream(err) => Some(err.to_string()),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_name().to_string(),
            detail: self.detail(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
