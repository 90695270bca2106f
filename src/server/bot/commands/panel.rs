//! `/panel` subcommand handlers.

use chrono::Utc;
use serenity::all::{CommandInteraction, Context, CreateEmbed, ResolvedOption, ResolvedValue};

use crate::server::{
    bot::{
        commands::{
            authorize_member, ephemeral_message, success_embed,
            ticket::{find_channel, find_integer, find_string},
        },
        handler::Handler,
    },
    data::{
        panel::{CreatePanelParams, PanelButtonParams, PanelRepository},
        ticket_type::TicketTypeRepository,
    },
    error::AppError,
    model::permission::TicketAction,
    service::{panel::PanelService, ticket::COLOR_NEUTRAL},
};

pub async fn handle(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let options = command.data.options();
    let Some(ResolvedOption {
        name,
        value: ResolvedValue::SubCommand(sub_options),
        ..
    }) = options.into_iter().next()
    else {
        return Err(AppError::BadRequest("Missing subcommand".to_string()));
    };

    let (guild_id, member) = super::guild_and_member(command)?;
    authorize_member(&handler.db, guild_id, member, None, TicketAction::ManagePanels).await?;

    match name {
        "create" => create(handler, ctx, command, guild_id, &sub_options).await,
        "post" => post(handler, ctx, command, guild_id, &sub_options).await,
        "delete" => delete(handler, ctx, command, guild_id, &sub_options).await,
        "list" => list(handler, ctx, command, guild_id).await,
        other => Err(AppError::BadRequest(format!(
            "Unknown subcommand '{}'",
            other
        ))),
    }
}

async fn create(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let channel_id = find_channel(sub_options, "channel")
        .ok_or_else(|| AppError::BadRequest("Missing channel".to_string()))?;
    let title = find_string(sub_options, "title")
        .ok_or_else(|| AppError::BadRequest("Missing title".to_string()))?
        .to_string();
    let type_name = find_string(sub_options, "type")
        .ok_or_else(|| AppError::BadRequest("Missing ticket type".to_string()))?;
    let label = find_string(sub_options, "label")
        .ok_or_else(|| AppError::BadRequest("Missing button label".to_string()))?
        .to_string();
    let description = find_string(sub_options, "description").map(|s| s.to_string());

    // Buttons bind to registered types only; unknown names are an error,
    // never a silently synthesized default modal.
    let ticket_type = TicketTypeRepository::new(&handler.db)
        .find_by_name(guild_id, type_name)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Ticket type '{}' is not registered. Register it with /tickets tickettype first.",
                type_name
            ))
        })?;

    command.defer_ephemeral(&ctx.http).await?;

    let panel = PanelRepository::new(&handler.db)
        .create(CreatePanelParams {
            guild_id,
            channel_id,
            title,
            description,
            color: COLOR_NEUTRAL as i32,
            buttons: vec![PanelButtonParams {
                ticket_type_id: ticket_type.id,
                label,
                emoji: None,
                style: "primary".to_string(),
            }],
            now: Utc::now(),
        })
        .await?;

    let service = PanelService::new(&handler.db, ctx.http.clone());
    service.post(panel.id).await?;

    command
        .edit_response(
            &ctx.http,
            serenity::all::EditInteractionResponse::new().embed(success_embed(&format!(
                "Panel {} posted in <#{}>.",
                panel.id, channel_id
            ))),
        )
        .await?;

    Ok(())
}

async fn post(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let panel_id = find_integer(sub_options, "id")
        .ok_or_else(|| AppError::BadRequest("Missing panel id".to_string()))? as i32;

    require_guild_panel(handler, guild_id, panel_id).await?;

    command.defer_ephemeral(&ctx.http).await?;

    let service = PanelService::new(&handler.db, ctx.http.clone());
    let panel = service.post(panel_id).await?;

    command
        .edit_response(
            &ctx.http,
            serenity::all::EditInteractionResponse::new().embed(success_embed(&format!(
                "Panel {} re-posted in <#{}>.",
                panel.id, panel.channel_id
            ))),
        )
        .await?;

    Ok(())
}

async fn delete(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let panel_id = find_integer(sub_options, "id")
        .ok_or_else(|| AppError::BadRequest("Missing panel id".to_string()))? as i32;

    let panel = require_guild_panel(handler, guild_id, panel_id).await?;

    let service = PanelService::new(&handler.db, ctx.http.clone());
    service.delete(panel).await?;

    command
        .create_response(
            &ctx.http,
            ephemeral_message(success_embed(&format!("Panel {} deleted.", panel_id))),
        )
        .await?;

    Ok(())
}

async fn list(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<(), AppError> {
    let panels = PanelRepository::new(&handler.db)
        .list_by_guild(guild_id)
        .await?;

    let description = if panels.is_empty() {
        "No panels yet. Create one with /panel create.".to_string()
    } else {
        panels
            .iter()
            .map(|p| {
                let posted = if p.message_id.is_some() {
                    "posted"
                } else {
                    "not posted"
                };
                format!("`{}` **{}** in <#{}> ({})", p.id, p.title, p.channel_id, posted)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    command
        .create_response(
            &ctx.http,
            ephemeral_message(
                CreateEmbed::new()
                    .title("Ticket panels")
                    .color(COLOR_NEUTRAL)
                    .description(description),
            ),
        )
        .await?;

    Ok(())
}

async fn require_guild_panel(
    handler: &Handler,
    guild_id: u64,
    panel_id: i32,
) -> Result<entity::panel::Model, AppError> {
    let panel = PanelRepository::new(&handler.db)
        .find_by_id(panel_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Panel not found".to_string()))?;

    if panel.guild_id != guild_id.to_string() {
        return Err(AppError::NotFound("Panel not found".to_string()));
    }

    Ok(panel)
}
