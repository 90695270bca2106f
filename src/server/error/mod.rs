//! Error types and HTTP response handling.
//!
//! The `AppError` enum is the top-level error type. It wraps domain-specific
//! errors and implements `IntoResponse` so API endpoints can return it
//! directly; Discord-side callers format it into an ephemeral error embed
//! instead.

pub mod auth;
pub mod config;
pub mod internal;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, internal::InternalError},
};

/// Top-level application error type.
///
/// Aggregates all error types that can occur in the application. Most
/// variants use `#[from]` for automatic conversion. `AuthError` handles its
/// own response mapping (401/403); generic variants map to standard status
/// codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error; delegates to
    /// `AuthError::into_response()` for status code mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity. Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// I/O error binding or serving the HTTP listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Invariant violation in internal plumbing (id parsing, timestamp
    /// conversion).
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Resource not found. Results in 404 with the provided message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request. Results in 400 with the provided message.
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to keep the AppError enum small; serenity::Error is large
/// enough to bloat every other variant otherwise.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Whether this error is a transient Discord outage.
    ///
    /// Discord surfaces gateway/REST unavailability as a plain-text
    /// "Service Unavailable" message; there is no structured code to match
    /// on, so the message text is the contract. Callers use this to show a
    /// friendlier notice instead of the raw error. Nothing is retried.
    pub fn is_discord_unavailable(&self) -> bool {
        match self {
            Self::DiscordErr(err) => err.to_string().contains("Service Unavailable"),
            _ => false,
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// Authentication errors delegate to their own response handling; other
/// errors use standard mappings. Internal errors are logged with full
/// details but return a generic message to avoid information leakage.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error message server-side and returns a generic message to
/// the client. Used as the fallback for errors without a specific mapping.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
