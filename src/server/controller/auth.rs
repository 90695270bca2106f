use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    model::auth::{LoginDto, TokenDto, UserDto},
    server::{
        controller::AUTH_TAG,
        error::AppError,
        middleware::auth::AuthGuard,
        service::auth::{mint_token, DiscordAuthService},
        state::AppState,
    },
};

/// Exchange a Discord OAuth2 access token for a dashboard JWT.
///
/// The dashboard completes the OAuth2 flow itself; this endpoint validates
/// the resulting access token against Discord's `/users/@me` and mints a
/// 7-day JWT for the identity it belongs to.
///
/// # Returns
/// - `200 OK` - Signed token and its expiry
/// - `401 Unauthorized` - Discord rejected the access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed dashboard token", body = TokenDto),
        (status = 401, description = "Discord rejected the access token", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(state.http_client.clone());
    let identity = auth_service.fetch_identity(&payload.access_token).await?;

    let (token, expires_at) = mint_token(&state.jwt_secret, &identity, Utc::now())?;

    tracing::info!("Dashboard login for user {}", identity.id);

    Ok((StatusCode::OK, Json(TokenDto { token, expires_at })))
}

/// Get the authenticated user.
///
/// Echoes the identity carried by the bearer token.
///
/// # Returns
/// - `200 OK` - The authenticated user
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "The authenticated user", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state).authenticate(&headers)?;

    Ok((
        StatusCode::OK,
        Json(UserDto {
            id: user.id,
            username: user.username,
        }),
    ))
}
