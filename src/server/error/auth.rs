use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token was provided on a protected route.
    #[error("Missing authorization bearer token")]
    MissingToken,

    /// The bearer token failed signature or expiry validation.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Discord rejected the OAuth2 access token presented at login.
    #[error("Discord rejected the provided access token")]
    DiscordTokenRejected,

    /// The authenticated user is not a member of the requested guild.
    #[error("User {0} is not a member of guild {1}")]
    NotGuildMember(u64, u64),

    /// The authenticated user lacks the permission tier for the route.
    ///
    /// # Fields
    /// - User id, and a description of the missing tier for the log.
    #[error("User {0} denied: {1}")]
    AccessDenied(u64, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Token problems map to 401 Unauthorized; permission problems map to
/// 403 Forbidden. Client-facing messages stay generic while the full error
/// is logged at debug level for diagnostics.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("auth error: {}", self);

        match self {
            Self::MissingToken | Self::InvalidToken | Self::DiscordTokenRejected => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Authentication required".to_string(),
                }),
            )
                .into_response(),
            Self::NotGuildMember(_, _) | Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "You do not have permission to do that".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
