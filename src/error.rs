// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Why a single exchange with the chat backend failed.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to chat backend failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("chat backend answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("chat backend sent an unreadable body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("chat backend reply has no usable `response` field")]
    MissingResponse,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("company id is not set (CHAT_WIDGET_COMPANY or --company)")]
    MissingCompany,

    #[error("invalid server url `{url}`: {reason}")]
    InvalidServerUrl { url: String, reason: String },
}

/// Errors returned by the reference backend handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(%status, error = %self, "request rejected");
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
