use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::collections::HashMap;

use crate::{
    model::panel::{CreatePanelDto, PanelButtonDto, PanelDto},
    server::{
        controller::PANEL_TAG,
        data::{
            panel::{CreatePanelParams, PanelButtonParams, PanelRepository},
            ticket_type::TicketTypeRepository,
        },
        error::AppError,
        middleware::auth::{AuthGuard, Tier},
        service::panel::PanelService,
        state::AppState,
        util::parse::parse_u64_from_string,
    },
};

const BUTTON_STYLES: [&str; 4] = ["primary", "secondary", "success", "danger"];

/// Get all panels for a guild.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/panels",
    tag = PANEL_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Panels with their buttons", body = Vec<PanelDto>),
        (status = 401, description = "Not authenticated", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn list_panels(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let panel_repo = PanelRepository::new(&state.db);
    let type_repo = TicketTypeRepository::new(&state.db);

    let type_names: HashMap<i32, String> = type_repo
        .list_by_guild(guild_id)
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();

    let mut dtos = Vec::new();
    for panel in panel_repo.list_by_guild(guild_id).await? {
        let buttons = panel_repo.buttons(panel.id).await?;
        dtos.push(panel_to_dto(panel, buttons, &type_names)?);
    }

    Ok((StatusCode::OK, Json(dtos)))
}

/// Create a panel and post its message.
///
/// Buttons must reference registered ticket types by name; unknown types are
/// rejected rather than silently given a default modal.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/panels",
    tag = PANEL_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    request_body = CreatePanelDto,
    responses(
        (status = 201, description = "Created and posted panel", body = PanelDto),
        (status = 400, description = "Unknown ticket type or invalid button", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn create_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CreatePanelDto>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Admin)
        .await?;

    if payload.buttons.is_empty() {
        return Err(AppError::BadRequest(
            "A panel needs at least one button".to_string(),
        ));
    }

    let type_repo = TicketTypeRepository::new(&state.db);

    let mut buttons = Vec::new();
    for button in &payload.buttons {
        if !BUTTON_STYLES.contains(&button.style.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unknown button style '{}'",
                button.style
            )));
        }

        let ticket_type = type_repo
            .find_by_name(guild_id, &button.ticket_type)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Ticket type '{}' is not registered",
                    button.ticket_type
                ))
            })?;

        buttons.push(PanelButtonParams {
            ticket_type_id: ticket_type.id,
            label: button.label.clone(),
            emoji: button.emoji.clone(),
            style: button.style.clone(),
        });
    }

    let panel_repo = PanelRepository::new(&state.db);
    let panel = panel_repo
        .create(CreatePanelParams {
            guild_id,
            channel_id: payload.channel_id,
            title: payload.title,
            description: payload.description,
            color: payload.color,
            buttons,
            now: Utc::now(),
        })
        .await?;

    let service = PanelService::new(&state.db, state.discord_http.clone());
    let posted = service.post(panel.id).await?;

    let type_names: HashMap<i32, String> = type_repo
        .list_by_guild(guild_id)
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();
    let buttons = panel_repo.buttons(posted.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(panel_to_dto(posted, buttons, &type_names)?),
    ))
}

/// Delete a panel and its posted message.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/guilds/{guild_id}/panels/{panel_id}",
    tag = PANEL_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("panel_id" = i32, Path, description = "Panel ID")
    ),
    responses(
        (status = 204, description = "Panel deleted"),
        (status = 404, description = "No such panel", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn delete_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, panel_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Admin)
        .await?;

    let repo = PanelRepository::new(&state.db);
    let panel = repo
        .find_by_id(panel_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Panel not found".to_string()))?;

    if panel.guild_id != guild_id.to_string() {
        return Err(AppError::NotFound("Panel not found".to_string()));
    }

    let service = PanelService::new(&state.db, state.discord_http.clone());
    service.delete(panel).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn panel_to_dto(
    panel: entity::panel::Model,
    buttons: Vec<entity::panel_button::Model>,
    type_names: &HashMap<i32, String>,
) -> Result<PanelDto, AppError> {
    Ok(PanelDto {
        id: panel.id,
        channel_id: parse_u64_from_string(panel.channel_id)?,
        message_id: panel.message_id,
        title: panel.title,
        description: panel.description,
        color: panel.color,
        buttons: buttons
            .into_iter()
            .map(|b| PanelButtonDto {
                ticket_type: type_names
                    .get(&b.ticket_type_id)
                    .cloned()
                    .unwrap_or_default(),
                label: b.label,
                emoji: b.emoji,
                style: b.style,
            })
            .collect(),
    })
}
