//! `/ticket` subcommand handlers.
//!
//! All subcommands except `list` operate on the ticket bound to the channel
//! the command was invoked in.

use chrono::Utc;
use serenity::all::{
    ButtonStyle, CommandInteraction, Context, CreateActionRow, CreateAttachment, CreateButton,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse, ResolvedOption, ResolvedValue,
};

use crate::server::{
    bot::{
        commands::{authorize_member, ephemeral_message, guild_and_member, success_embed},
        handler::Handler,
        interaction::ComponentAction,
    },
    data::{guild_tag::GuildTagRepository, ticket::TicketRepository, ticket_config::TicketConfigRepository},
    error::AppError,
    model::{
        config::TranscriptFormat,
        permission::TicketAction,
        ticket::{TicketPriority, TicketStatus},
    },
    service::{
        ticket::{TicketService, COLOR_NEUTRAL},
        transcript::TranscriptGenerator,
    },
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

    match name {
        "close" => close(handler, ctx, command).await,
        "reopen" => reopen(handler, ctx, command).await,
        "assign" => assign(handler, ctx, command, &sub_options).await,
        "delete" => delete(handler, ctx, command).await,
        "transcript" => transcript(handler, ctx, command, &sub_options).await,
        "tag" => tag(handler, ctx, command, &sub_options).await,
        "priority" => priority(handler, ctx, command, &sub_options).await,
        "list" => list(handler, ctx, command, &sub_options).await,
        "info" => info(handler, ctx, command).await,
        other => Err(AppError::BadRequest(format!(
            "Unknown subcommand '{}'",
            other
        ))),
    }
}

async fn close(handler: &Handler, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;
    let ticket = current_ticket(handler, command).await?;

    authorize_member(
        &handler.db,
        guild_id,
        member,
        Some(&ticket.user_id),
        TicketAction::Close,
    )
    .await?;

    command.defer_ephemeral(&ctx.http).await?;

    let service = TicketService::new(&handler.db, ctx.http.clone());
    service
        .close_ticket(&ticket, &member.user.id.get().to_string(), Utc::now())
        .await?;
    handler.auto_close.disarm(ticket.id);

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(success_embed("Ticket closed.")),
        )
        .await?;

    Ok(())
}

async fn reopen(handler: &Handler, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;
    let ticket = current_ticket(handler, command).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::Reopen).await?;

    command.defer_ephemeral(&ctx.http).await?;

    let service = TicketService::new(&handler.db, ctx.http.clone());
    service
        .reopen_ticket(&ticket, member.user.id.get(), Utc::now())
        .await?;

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(success_embed("Ticket reopened.")),
        )
        .await?;

    Ok(())
}

async fn assign(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;
    let ticket = current_ticket(handler, command).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::Assign).await?;

    let assignee = sub_options.iter().find_map(|opt| match &opt.value {
        ResolvedValue::User(user, _) if opt.name == "member" => Some(user.id.get()),
        _ => None,
    });

    TicketRepository::new(&handler.db)
        .assign(ticket.id, assignee, Utc::now())
        .await?;

    let message = match assignee {
        Some(id) => format!("Ticket assigned to <@{}>.", id),
        None => "Ticket assignment cleared.".to_string(),
    };
    command
        .create_response(&ctx.http, ephemeral_message(success_embed(&message)))
        .await?;

    Ok(())
}

async fn delete(handler: &Handler, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;
    let ticket = current_ticket(handler, command).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::Delete).await?;

    // Deletion is destructive: require a second, confirming click.
    let confirm = CreateActionRow::Buttons(vec![CreateButton::new(
        ComponentAction::DeleteConfirm {
            ticket_pk: ticket.id,
        }
        .encode(),
    )
    .label("Yes, delete this ticket")
    .style(ButtonStyle::Danger)]);

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(
                        CreateEmbed::new()
                            .color(COLOR_NEUTRAL)
                            .description(
                                "This permanently deletes the ticket channel \
                                 (a transcript is archived first if configured). Are you sure?",
                            ),
                    )
                    .components(vec![confirm])
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

async fn transcript(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;
    let ticket = current_ticket(handler, command).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::View).await?;

    let format = match find_string(sub_options, "format") {
        Some(raw) => TranscriptFormat::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown format '{}'", raw)))?,
        None => {
            let config = TicketConfigRepository::new(&handler.db)
                .find_by_guild_id(guild_id)
                .await?;
            config
                .and_then(|c| TranscriptFormat::parse(&c.transcript_format))
                .unwrap_or_default()
        }
    };

    command.defer_ephemeral(&ctx.http).await?;

    let generator = TranscriptGenerator::new(ctx.http.clone());
    let (filename, contents) = generator.generate(&ticket, format).await?;

    command
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(format!("Transcript for ticket #{:04}", ticket.ticket_id))
                .add_file(CreateAttachment::bytes(contents.into_bytes(), filename))
                .ephemeral(true),
        )
        .await?;

    Ok(())
}

async fn tag(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;
    let ticket = current_ticket(handler, command).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::Assign).await?;

    let tag = find_string(sub_options, "tag")
        .ok_or_else(|| AppError::BadRequest("Missing tag".to_string()))?
        .trim()
        .to_lowercase();
    if tag.is_empty() {
        return Err(AppError::BadRequest("Tag cannot be empty".to_string()));
    }
    let remove = find_bool(sub_options, "remove").unwrap_or(false);

    let repo = TicketRepository::new(&handler.db);
    let message = if remove {
        repo.remove_tag(ticket.id, &tag).await?;
        format!("Removed tag `{}`.", tag)
    } else {
        repo.add_tag(ticket.id, &tag).await?;
        // Keep the guild catalog in sync so the dashboard can offer it.
        GuildTagRepository::new(&handler.db).add(guild_id, &tag).await?;
        format!("Added tag `{}`.", tag)
    };

    command
        .create_response(&ctx.http, ephemeral_message(success_embed(&message)))
        .await?;

    Ok(())
}

async fn priority(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;
    let ticket = current_ticket(handler, command).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::Assign).await?;

    let raw = find_string(sub_options, "priority")
        .ok_or_else(|| AppError::BadRequest("Missing priority".to_string()))?;
    let priority = TicketPriority::parse(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown priority '{}'", raw)))?;

    TicketRepository::new(&handler.db)
        .set_priority(ticket.id, priority, Utc::now())
        .await?;

    command
        .create_response(
            &ctx.http,
            ephemeral_message(success_embed(&format!(
                "Priority set to {}.",
                priority.as_str()
            ))),
        )
        .await?;

    Ok(())
}

async fn list(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::View).await?;

    let status = match find_string(sub_options, "status") {
        Some(raw) => Some(
            TicketStatus::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{}'", raw)))?,
        ),
        None => Some(TicketStatus::Open),
    };

    let (tickets, total) = TicketRepository::new(&handler.db)
        .get_paginated_by_guild(guild_id, status, 0, 15)
        .await?;

    let description = if tickets.is_empty() {
        "No tickets found.".to_string()
    } else {
        tickets
            .iter()
            .map(|t| {
                format!(
                    "`#{:04}` <#{}> — {} ({})",
                    t.ticket_id, t.channel_id, t.ticket_type, t.status
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = CreateEmbed::new()
        .title(format!("Tickets ({})", total))
        .color(COLOR_NEUTRAL)
        .description(description);

    command
        .create_response(&ctx.http, ephemeral_message(embed))
        .await?;

    Ok(())
}

async fn info(handler: &Handler, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;
    let ticket = current_ticket(handler, command).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::View).await?;

    let repo = TicketRepository::new(&handler.db);
    let tags = repo.tags(ticket.id).await?;
    let reopens = repo.reopens(ticket.id).await?;

    let mut embed = CreateEmbed::new()
        .title(format!("Ticket #{:04}", ticket.ticket_id))
        .color(COLOR_NEUTRAL)
        .field("Type", ticket.ticket_type.clone(), true)
        .field("Status", ticket.status.clone(), true)
        .field("Priority", ticket.priority.clone(), true)
        .field("Opened by", format!("<@{}>", ticket.user_id), true)
        .field(
            "Assignee",
            ticket
                .assignee_id
                .as_ref()
                .map(|id| format!("<@{}>", id))
                .unwrap_or_else(|| "Nobody".to_string()),
            true,
        )
        .field("Reopened", format!("{} time(s)", reopens.len()), true);

    if !tags.is_empty() {
        embed = embed.field("Tags", tags.join(", "), false);
    }
    if let Some(reason) = &ticket.reason {
        embed = embed.field("Reason", reason.clone(), false);
    }

    command
        .create_response(&ctx.http, ephemeral_message(embed))
        .await?;

    Ok(())
}

async fn current_ticket(
    handler: &Handler,
    command: &CommandInteraction,
) -> Result<entity::ticket::Model, AppError> {
    TicketRepository::new(&handler.db)
        .find_by_channel_id(command.channel_id.get())
        .await?
        .ok_or_else(|| AppError::BadRequest("This channel is not a ticket".to_string()))
}

pub(crate) fn find_string<'a>(options: &'a [ResolvedOption<'_>], name: &str) -> Option<&'a str> {
    options.iter().find_map(|opt| match opt.value {
        ResolvedValue::String(value) if opt.name == name => Some(value),
        _ => None,
    })
}

pub(crate) fn find_bool(options: &[ResolvedOption<'_>], name: &str) -> Option<bool> {
    options.iter().find_map(|opt| match opt.value {
        ResolvedValue::Boolean(value) if opt.name == name => Some(value),
        _ => None,
    })
}

pub(crate) fn find_integer(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    options.iter().find_map(|opt| match opt.value {
        ResolvedValue::Integer(value) if opt.name == name => Some(value),
        _ => None,
    })
}

pub(crate) fn find_channel(options: &[ResolvedOption<'_>], name: &str) -> Option<u64> {
    options.iter().find_map(|opt| match &opt.value {
        ResolvedValue::Channel(channel) if opt.name == name => Some(channel.id.get()),
        _ => None,
    })
}
