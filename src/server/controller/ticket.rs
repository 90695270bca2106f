use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    model::ticket::{
        AssignTicketDto, PaginatedTicketsDto, TicketDetailDto, TicketDto, TicketReopenDto,
    },
    server::{
        controller::TICKET_TAG,
        data::ticket::TicketRepository,
        error::AppError,
        middleware::auth::{AuthGuard, Tier},
        model::{config::TranscriptFormat, ticket::TicketStatus},
        service::{ticket::TicketService, transcript::TranscriptGenerator},
        state::AppState,
        util::parse::parse_u64_from_string,
    },
};

#[derive(Deserialize)]
pub struct TicketListQuery {
    pub status: Option<String>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub entries: u64,
}

fn default_per_page() -> u64 {
    25
}

#[derive(Deserialize)]
pub struct TranscriptQuery {
    pub format: Option<String>,
}

/// Get paginated tickets for a guild.
///
/// # Access Control
/// - `Moderator` - Staff capability or moderation permission required
///
/// # Returns
/// - `200 OK` - Page of tickets, newest first
/// - `400 Bad Request` - Unknown status filter
/// - `401/403` - Authentication or tier failure
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/tickets",
    tag = TICKET_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("status" = Option<String>, Query, description = "Filter by status (open, closed, deleted)"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 25)")
    ),
    responses(
        (status = 200, description = "Page of tickets", body = PaginatedTicketsDto),
        (status = 400, description = "Unknown status filter", body = crate::model::api::ErrorDto),
        (status = 401, description = "Not authenticated", body = crate::model::api::ErrorDto),
        (status = 403, description = "Below required tier", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
    Query(query): Query<TicketListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let status = match &query.status {
        Some(raw) => Some(
            TicketStatus::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{}'", raw)))?,
        ),
        None => None,
    };

    let repo = TicketRepository::new(&state.db);
    let (tickets, total) = repo
        .get_paginated_by_guild(guild_id, status, query.page, query.entries)
        .await?;

    let tickets = tickets
        .into_iter()
        .map(ticket_to_dto)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((
        StatusCode::OK,
        Json(PaginatedTicketsDto {
            tickets,
            total,
            page: query.page,
        }),
    ))
}

/// Get one ticket with tags and reopen history.
///
/// The path segment is the per-guild ticket number, not the row id.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/tickets/{ticket_id}",
    tag = TICKET_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("ticket_id" = i32, Path, description = "Per-guild ticket number")
    ),
    responses(
        (status = 200, description = "Ticket detail", body = TicketDetailDto),
        (status = 404, description = "No such ticket", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, ticket_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let repo = TicketRepository::new(&state.db);
    let ticket = find_ticket(&repo, guild_id, ticket_id).await?;

    let tags = repo.tags(ticket.id).await?;
    let reopens = repo
        .reopens(ticket.id)
        .await?
        .into_iter()
        .map(|r| {
            Ok::<_, AppError>(TicketReopenDto {
                user_id: parse_u64_from_string(r.user_id)?,
                reopened_at: r.reopened_at,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((
        StatusCode::OK,
        Json(TicketDetailDto {
            ticket: ticket_to_dto(ticket)?,
            tags,
            reopens,
        }),
    ))
}

/// Close a ticket.
///
/// Applies the same transition rules and Discord side effects as the
/// `/ticket close` slash command, with the dashboard user as the actor.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/tickets/{ticket_id}/close",
    tag = TICKET_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("ticket_id" = i32, Path, description = "Per-guild ticket number")
    ),
    responses(
        (status = 200, description = "The closed ticket", body = TicketDto),
        (status = 400, description = "Ticket is not open", body = crate::model::api::ErrorDto),
        (status = 404, description = "No such ticket", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn close_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, ticket_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let repo = TicketRepository::new(&state.db);
    let ticket = find_ticket(&repo, guild_id, ticket_id).await?;

    let service = TicketService::new(&state.db, state.discord_http.clone());
    let closed = service
        .close_ticket(&ticket, &user.id.to_string(), Utc::now())
        .await
        .map_err(transition_error)?;

    state.auto_close.disarm(ticket.id);

    Ok((StatusCode::OK, Json(ticket_to_dto(closed)?)))
}

/// Reopen a closed ticket.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/tickets/{ticket_id}/reopen",
    tag = TICKET_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("ticket_id" = i32, Path, description = "Per-guild ticket number")
    ),
    responses(
        (status = 200, description = "The reopened ticket", body = TicketDto),
        (status = 400, description = "Ticket is not closed", body = crate::model::api::ErrorDto),
        (status = 404, description = "No such ticket", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn reopen_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, ticket_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let repo = TicketRepository::new(&state.db);
    let ticket = find_ticket(&repo, guild_id, ticket_id).await?;

    let service = TicketService::new(&state.db, state.discord_http.clone());
    let reopened = service
        .reopen_ticket(&ticket, user.id, Utc::now())
        .await
        .map_err(transition_error)?;

    Ok((StatusCode::OK, Json(ticket_to_dto(reopened)?)))
}

/// Set or clear the assignee of a ticket.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/tickets/{ticket_id}/assign",
    tag = TICKET_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("ticket_id" = i32, Path, description = "Per-guild ticket number")
    ),
    request_body = AssignTicketDto,
    responses(
        (status = 200, description = "The updated ticket", body = TicketDto),
        (status = 404, description = "No such ticket", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn assign_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, ticket_id)): Path<(u64, i32)>,
    Json(payload): Json<AssignTicketDto>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let assignee_id = match payload.assignee_id {
        Some(raw) => Some(
            raw.parse::<u64>()
                .map_err(|_| AppError::BadRequest("Invalid assignee id".to_string()))?,
        ),
        None => None,
    };

    let repo = TicketRepository::new(&state.db);
    let ticket = find_ticket(&repo, guild_id, ticket_id).await?;

    let updated = repo
        .assign(ticket.id, assignee_id, Utc::now())
        .await
        .map_err(AppError::from)
        .map_err(transition_error)?;

    Ok((StatusCode::OK, Json(ticket_to_dto(updated)?)))
}

/// Delete a ticket (terminal).
///
/// Archives a transcript when configured, soft-deletes the row, and removes
/// the Discord channel.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/guilds/{guild_id}/tickets/{ticket_id}",
    tag = TICKET_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("ticket_id" = i32, Path, description = "Per-guild ticket number")
    ),
    responses(
        (status = 200, description = "The deleted ticket", body = TicketDto),
        (status = 404, description = "No such ticket", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, ticket_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Admin)
        .await?;

    let repo = TicketRepository::new(&state.db);
    let ticket = find_ticket(&repo, guild_id, ticket_id).await?;

    let service = TicketService::new(&state.db, state.discord_http.clone());
    let deleted = service
        .delete_ticket(&ticket, user.id, Utc::now())
        .await
        .map_err(transition_error)?;

    state.auto_close.disarm(ticket.id);

    Ok((StatusCode::OK, Json(ticket_to_dto(deleted)?)))
}

/// Render a ticket transcript.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/tickets/{ticket_id}/transcript",
    tag = TICKET_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("ticket_id" = i32, Path, description = "Per-guild ticket number"),
        ("format" = Option<String>, Query, description = "html, text, or json (default: guild config)")
    ),
    responses(
        (status = 200, description = "Rendered transcript"),
        (status = 404, description = "No such ticket", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn get_transcript(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, ticket_id)): Path<(u64, i32)>,
    Query(query): Query<TranscriptQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let repo = TicketRepository::new(&state.db);
    let ticket = find_ticket(&repo, guild_id, ticket_id).await?;

    let format = match &query.format {
        Some(raw) => TranscriptFormat::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown format '{}'", raw)))?,
        None => {
            let config = crate::server::data::ticket_config::TicketConfigRepository::new(&state.db)
                .find_by_guild_id(guild_id)
                .await?;
            config
                .and_then(|c| TranscriptFormat::parse(&c.transcript_format))
                .unwrap_or_default()
        }
    };

    let generator = TranscriptGenerator::new(state.discord_http.clone());
    let (_filename, contents) = generator.generate(&ticket, format).await?;

    let content_type = match format {
        TranscriptFormat::Html => "text/html; charset=utf-8",
        TranscriptFormat::Text => "text/plain; charset=utf-8",
        TranscriptFormat::Json => "application/json",
    };

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        contents,
    ))
}

async fn find_ticket(
    repo: &TicketRepository<'_>,
    guild_id: u64,
    ticket_id: i32,
) -> Result<entity::ticket::Model, AppError> {
    repo.find_by_guild_and_ticket_id(guild_id, ticket_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
}

/// Maps repository transition guards (surfaced as DbErr::Custom) to 400s so
/// "ticket is not open" doesn't come back as a 500.
fn transition_error(err: AppError) -> AppError {
    match err {
        AppError::DbErr(sea_orm::DbErr::Custom(msg)) => AppError::BadRequest(msg),
        other => other,
    }
}

fn ticket_to_dto(ticket: entity::ticket::Model) -> Result<TicketDto, AppError> {
    Ok(TicketDto {
        id: ticket.id,
        ticket_id: ticket.ticket_id,
        user_id: parse_u64_from_string(ticket.user_id)?,
        channel_id: parse_u64_from_string(ticket.channel_id)?,
        ticket_type: ticket.ticket_type,
        reason: ticket.reason,
        status: ticket.status,
        assignee_id: ticket.assignee_id,
        priority: ticket.priority,
        closed_by: ticket.closed_by,
        closed_at: ticket.closed_at,
        deleted: ticket.deleted,
        created_at: ticket.created_at,
        last_activity_at: ticket.last_activity_at,
    })
}
