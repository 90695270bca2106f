use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::config::{StaffRoleDto, TicketConfigDto, UpdateTicketConfigDto},
    server::{
        controller::CONFIG_TAG,
        data::{
            guild_tag::GuildTagRepository,
            staff_role::{StaffRoleParams, StaffRoleRepository},
            ticket_config::{TicketConfigParams, TicketConfigRepository},
        },
        error::AppError,
        middleware::auth::{AuthGuard, Tier},
        model::config::{NamingPattern, TranscriptFormat},
        state::AppState,
        util::parse::parse_u64_from_string,
    },
};

/// Get a guild's ticket configuration.
///
/// Unconfigured guilds get the defaults rather than a 404, so the dashboard
/// settings page always has something to render.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/config",
    tag = CONFIG_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Guild ticket configuration", body = TicketConfigDto),
        (status = 401, description = "Not authenticated", body = crate::model::api::ErrorDto),
        (status = 403, description = "Below required tier", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn get_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let config = TicketConfigRepository::new(&state.db)
        .find_by_guild_id(guild_id)
        .await?;
    let staff_roles = StaffRoleRepository::new(&state.db)
        .list_by_guild(guild_id)
        .await?;
    let tags = GuildTagRepository::new(&state.db)
        .list_by_guild(guild_id)
        .await?;

    let staff_roles = staff_roles
        .into_iter()
        .map(|role| {
            Ok::<_, AppError>(StaffRoleDto {
                role_id: parse_u64_from_string(role.role_id)?,
                can_view: role.can_view,
                can_assign: role.can_assign,
                can_close: role.can_close,
                can_delete: role.can_delete,
                can_reopen: role.can_reopen,
                can_manage_panels: role.can_manage_panels,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let dto = match config {
        Some(config) => TicketConfigDto {
            open_category_id: config.open_category_id,
            closed_category_id: config.closed_category_id,
            log_channel_id: config.log_channel_id,
            archive_channel_id: config.archive_channel_id,
            naming_pattern: config.naming_pattern,
            rate_limit_max: config.rate_limit_max,
            rate_limit_window_minutes: config.rate_limit_window_minutes,
            auto_close_enabled: config.auto_close_enabled,
            auto_close_hours: config.auto_close_hours,
            transcript_format: config.transcript_format,
            transcript_retention_days: config.transcript_retention_days,
            staff_roles,
            tags,
        },
        None => {
            let defaults = TicketConfigParams::default();
            TicketConfigDto {
                open_category_id: None,
                closed_category_id: None,
                log_channel_id: None,
                archive_channel_id: None,
                naming_pattern: defaults.naming_pattern.as_str().to_string(),
                rate_limit_max: defaults.rate_limit_max,
                rate_limit_window_minutes: defaults.rate_limit_window_minutes,
                auto_close_enabled: defaults.auto_close_enabled,
                auto_close_hours: defaults.auto_close_hours,
                transcript_format: defaults.transcript_format.as_str().to_string(),
                transcript_retention_days: defaults.transcript_retention_days,
                staff_roles,
                tags,
            }
        }
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// Replace a guild's ticket configuration.
///
/// Full-replace semantics for both the policy fields and the staff-role
/// list; the dashboard submits the complete form.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    put,
    path = "/api/guilds/{guild_id}/config",
    tag = CONFIG_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    request_body = UpdateTicketConfigDto,
    responses(
        (status = 200, description = "Stored configuration", body = TicketConfigDto),
        (status = 400, description = "Invalid enum value or id", body = crate::model::api::ErrorDto),
        (status = 403, description = "Below required tier", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn update_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
    Json(payload): Json<UpdateTicketConfigDto>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Admin)
        .await?;

    let naming_pattern = NamingPattern::parse(&payload.naming_pattern).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown naming pattern '{}'", payload.naming_pattern))
    })?;
    let transcript_format = TranscriptFormat::parse(&payload.transcript_format).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown transcript format '{}'",
            payload.transcript_format
        ))
    })?;

    let params = TicketConfigParams {
        open_category_id: parse_optional_id(payload.open_category_id.as_deref())?,
        closed_category_id: parse_optional_id(payload.closed_category_id.as_deref())?,
        log_channel_id: parse_optional_id(payload.log_channel_id.as_deref())?,
        archive_channel_id: parse_optional_id(payload.archive_channel_id.as_deref())?,
        naming_pattern,
        rate_limit_max: payload.rate_limit_max,
        rate_limit_window_minutes: payload.rate_limit_window_minutes,
        auto_close_enabled: payload.auto_close_enabled,
        auto_close_hours: payload.auto_close_hours,
        transcript_format,
        transcript_retention_days: payload.transcript_retention_days,
    };

    TicketConfigRepository::new(&state.db)
        .upsert(guild_id, params, Utc::now())
        .await?;

    let staff_roles: Vec<(u64, StaffRoleParams)> = payload
        .staff_roles
        .iter()
        .map(|role| {
            (
                role.role_id,
                StaffRoleParams {
                    can_view: role.can_view,
                    can_assign: role.can_assign,
                    can_close: role.can_close,
                    can_delete: role.can_delete,
                    can_reopen: role.can_reopen,
                    can_manage_panels: role.can_manage_panels,
                },
            )
        })
        .collect();
    StaffRoleRepository::new(&state.db)
        .replace_all(guild_id, staff_roles)
        .await?;

    get_config(State(state), headers, Path(guild_id)).await
}

fn parse_optional_id(value: Option<&str>) -> Result<Option<u64>, AppError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid channel id '{}'", raw))),
    }
}
