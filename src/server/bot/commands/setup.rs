//! `/tickets` configuration subcommands.
//!
//! All of these require the ADMINISTRATOR permission; the staff capability
//! table governs ticket operations, not the configuration of the system
//! itself.

use chrono::Utc;
use serenity::all::{CommandInteraction, Context, CreateEmbed, ResolvedOption, ResolvedValue};

use crate::server::{
    bot::{
        commands::{
            ephemeral_message, guild_and_member, success_embed,
            ticket::{find_bool, find_channel, find_string},
        },
        handler::Handler,
    },
    data::{
        staff_role::{StaffRoleParams, StaffRoleRepository},
        ticket_config::{TicketConfigParams, TicketConfigRepository},
        ticket_type::{ModalFieldParams, TicketTypeRepository},
    },
    error::{auth::AuthError, AppError},
    model::config::{NamingPattern, TranscriptFormat},
    service::ticket::COLOR_NEUTRAL,
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

    let (guild_id, member) = guild_and_member(command)?;

    let is_admin = member
        .permissions
        .map(|p| p.administrator())
        .unwrap_or(false);
    if !is_admin {
        return Err(AuthError::AccessDenied(
            member.user.id.get(),
            "ticket configuration requires Administrator".to_string(),
        )
        .into());
    }

    match name {
        "setup" => setup(handler, ctx, command, guild_id, &sub_options).await,
        "settings" => settings(handler, ctx, command, guild_id).await,
        "staffrole" => staff_role(handler, ctx, command, guild_id, &sub_options).await,
        "tickettype" => ticket_type(handler, ctx, command, guild_id, &sub_options).await,
        other => Err(AppError::BadRequest(format!(
            "Unknown subcommand '{}'",
            other
        ))),
    }
}

async fn setup(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let repo = TicketConfigRepository::new(&handler.db);

    // Start from the existing policy (or defaults) and replace only the
    // channel routing given in the command.
    let existing = repo.find_by_guild_id(guild_id).await?;
    let mut params = match &existing {
        Some(config) => TicketConfigParams {
            open_category_id: parse_id(config.open_category_id.as_deref()),
            closed_category_id: parse_id(config.closed_category_id.as_deref()),
            log_channel_id: parse_id(config.log_channel_id.as_deref()),
            archive_channel_id: parse_id(config.archive_channel_id.as_deref()),
            naming_pattern: NamingPattern::parse(&config.naming_pattern).unwrap_or_default(),
            rate_limit_max: config.rate_limit_max,
            rate_limit_window_minutes: config.rate_limit_window_minutes,
            auto_close_enabled: config.auto_close_enabled,
            auto_close_hours: config.auto_close_hours,
            transcript_format: TranscriptFormat::parse(&config.transcript_format)
                .unwrap_or_default(),
            transcript_retention_days: config.transcript_retention_days,
        },
        None => TicketConfigParams::default(),
    };

    if let Some(id) = find_channel(sub_options, "open_category") {
        params.open_category_id = Some(id);
    }
    if let Some(id) = find_channel(sub_options, "closed_category") {
        params.closed_category_id = Some(id);
    }
    if let Some(id) = find_channel(sub_options, "log_channel") {
        params.log_channel_id = Some(id);
    }
    if let Some(id) = find_channel(sub_options, "archive_channel") {
        params.archive_channel_id = Some(id);
    }

    repo.upsert(guild_id, params, Utc::now()).await?;

    command
        .create_response(
            &ctx.http,
            ephemeral_message(success_embed(
                "Ticket system configured. Fine-tune rate limits, auto-close, and transcripts \
                 from the dashboard.",
            )),
        )
        .await?;

    Ok(())
}

async fn settings(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<(), AppError> {
    let config = TicketConfigRepository::new(&handler.db)
        .find_by_guild_id(guild_id)
        .await?;
    let staff_roles = StaffRoleRepository::new(&handler.db)
        .list_by_guild(guild_id)
        .await?;
    let ticket_types = TicketTypeRepository::new(&handler.db)
        .list_by_guild(guild_id)
        .await?;

    let embed = match config {
        Some(config) => {
            let channel_or_unset =
                |id: &Option<String>| match id {
                    Some(id) => format!("<#{}>", id),
                    None => "unset".to_string(),
                };

            CreateEmbed::new()
                .title("Ticket settings")
                .color(COLOR_NEUTRAL)
                .field("Open category", channel_or_unset(&config.open_category_id), true)
                .field(
                    "Closed category",
                    channel_or_unset(&config.closed_category_id),
                    true,
                )
                .field("Log channel", channel_or_unset(&config.log_channel_id), true)
                .field(
                    "Archive channel",
                    channel_or_unset(&config.archive_channel_id),
                    true,
                )
                .field("Naming pattern", config.naming_pattern.clone(), true)
                .field(
                    "Rate limit",
                    format!(
                        "{} per {} min",
                        config.rate_limit_max, config.rate_limit_window_minutes
                    ),
                    true,
                )
                .field(
                    "Auto-close",
                    if config.auto_close_enabled {
                        format!("after {} h of inactivity", config.auto_close_hours)
                    } else {
                        "disabled".to_string()
                    },
                    true,
                )
                .field("Transcripts", config.transcript_format.clone(), true)
                .field(
                    "Staff roles",
                    if staff_roles.is_empty() {
                        "none".to_string()
                    } else {
                        staff_roles
                            .iter()
                            .map(|r| format!("<@&{}>", r.role_id))
                            .collect::<Vec<_>>()
                            .join(", ")
                    },
                    false,
                )
                .field(
                    "Ticket types",
                    if ticket_types.is_empty() {
                        "none registered".to_string()
                    } else {
                        ticket_types
                            .iter()
                            .map(|t| t.name.clone())
                            .collect::<Vec<_>>()
                            .join(", ")
                    },
                    false,
                )
        }
        None => CreateEmbed::new()
            .title("Ticket settings")
            .color(COLOR_NEUTRAL)
            .description("Not configured yet. Run /tickets setup to get started."),
    };

    command
        .create_response(&ctx.http, ephemeral_message(embed))
        .await?;

    Ok(())
}

async fn staff_role(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let role_id = sub_options
        .iter()
        .find_map(|opt| match &opt.value {
            ResolvedValue::Role(role) if opt.name == "role" => Some(role.id.get()),
            _ => None,
        })
        .ok_or_else(|| AppError::BadRequest("Missing role".to_string()))?;

    let repo = StaffRoleRepository::new(&handler.db);

    if find_bool(sub_options, "remove").unwrap_or(false) {
        repo.delete(guild_id, role_id).await?;

        command
            .create_response(
                &ctx.http,
                ephemeral_message(success_embed(&format!(
                    "<@&{}> removed from the staff list.",
                    role_id
                ))),
            )
            .await?;

        return Ok(());
    }

    let params = StaffRoleParams {
        can_view: find_bool(sub_options, "view").unwrap_or(true),
        can_assign: find_bool(sub_options, "assign").unwrap_or(false),
        can_close: find_bool(sub_options, "close").unwrap_or(false),
        can_delete: find_bool(sub_options, "delete").unwrap_or(false),
        can_reopen: find_bool(sub_options, "reopen").unwrap_or(false),
        can_manage_panels: find_bool(sub_options, "manage_panels").unwrap_or(false),
    };
    repo.upsert(guild_id, role_id, params).await?;

    command
        .create_response(
            &ctx.http,
            ephemeral_message(success_embed(&format!(
                "<@&{}> staff capabilities updated.",
                role_id
            ))),
        )
        .await?;

    Ok(())
}

async fn ticket_type(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let name = find_string(sub_options, "name")
        .ok_or_else(|| AppError::BadRequest("Missing ticket type name".to_string()))?
        .trim()
        .to_lowercase();
    if name.is_empty() {
        return Err(AppError::BadRequest(
            "Ticket type name cannot be empty".to_string(),
        ));
    }

    let repo = TicketTypeRepository::new(&handler.db);

    if find_bool(sub_options, "remove").unwrap_or(false) {
        let existing = repo
            .find_by_name(guild_id, &name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket type '{}' not found", name)))?;
        repo.delete(existing.id).await?;

        command
            .create_response(
                &ctx.http,
                ephemeral_message(success_embed(&format!("Ticket type '{}' removed.", name))),
            )
            .await?;

        return Ok(());
    }

    if repo.find_by_name(guild_id, &name).await?.is_some() {
        return Err(AppError::BadRequest(format!(
            "Ticket type '{}' already exists",
            name
        )));
    }

    let modal_title = find_string(sub_options, "title")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Open a ticket".to_string());
    let question = find_string(sub_options, "question")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "What do you need help with?".to_string());

    repo.create(
        guild_id,
        &name,
        &modal_title,
        vec![ModalFieldParams {
            label: question,
            placeholder: None,
            required: true,
            style: "paragraph".to_string(),
            max_length: Some(1000),
        }],
    )
    .await?;

    command
        .create_response(
            &ctx.http,
            ephemeral_message(success_embed(&format!(
                "Ticket type '{}' registered. Edit its modal questions from the dashboard.",
                name
            ))),
        )
        .await?;

    Ok(())
}

fn parse_id(value: Option<&str>) -> Option<u64> {
    value.and_then(|raw| raw.parse().ok())
}
