//! Button interaction handlers.

use chrono::{Duration, Utc};
use serenity::all::{
    ButtonStyle, ComponentInteraction, Context, CreateActionRow, CreateButton, CreateEmbed,
    CreateInputText, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateModal, EditInteractionResponse, InputTextStyle,
    Member,
};

use crate::server::{
    bot::{
        commands::{authorize_member, error_embed, success_embed, user_error_message},
        handler::Handler,
        interaction::{ComponentAction, ModalAction},
    },
    data::{ticket::TicketRepository, ticket_type::TicketTypeRepository},
    error::AppError,
    model::permission::TicketAction,
    service::ticket::{TicketService, COLOR_NEUTRAL},
};

/// Discord caps modals at five input rows.
pub(super) const MAX_MODAL_FIELDS: usize = 5;

pub async fn handle(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    action: ComponentAction,
) {
    if let Err(e) = run(handler, ctx, component, action).await {
        tracing::error!("Component action {:?} failed: {}", action, e);

        let embed = error_embed(&user_error_message(&e));
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .embed(embed.clone())
                .ephemeral(true),
        );

        if component.create_response(&ctx.http, response).await.is_err() {
            let _ = component
                .create_followup(
                    &ctx.http,
                    CreateInteractionResponseFollowup::new()
                        .embed(embed)
                        .ephemeral(true),
                )
                .await;
        }
    }
}

async fn run(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    action: ComponentAction,
) -> Result<(), AppError> {
    match action {
        ComponentAction::OpenTicket {
            panel_id,
            ticket_type_id,
        } => open_modal(handler, ctx, component, panel_id, ticket_type_id).await,
        ComponentAction::Close { ticket_pk } => close(handler, ctx, component, ticket_pk).await,
        ComponentAction::Reopen { ticket_pk } => reopen(handler, ctx, component, ticket_pk).await,
        ComponentAction::Delete { ticket_pk } => {
            confirm_delete(handler, ctx, component, ticket_pk).await
        }
        ComponentAction::DeleteConfirm { ticket_pk } => {
            delete(handler, ctx, component, ticket_pk).await
        }
    }
}

/// Panel button: show the creation modal for the referenced ticket type.
///
/// A button whose type has since been unregistered is a hard error shown to
/// the clicker; no default modal is synthesized.
async fn open_modal(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    panel_id: i32,
    ticket_type_id: i32,
) -> Result<(), AppError> {
    let (guild_id, _member) = guild_and_member(component)?;

    let type_repo = TicketTypeRepository::new(&handler.db);
    let ticket_type = type_repo
        .find_by_id(ticket_type_id)
        .await?
        .filter(|t| t.guild_id == guild_id.to_string())
        .ok_or_else(|| {
            AppError::BadRequest(
                "This ticket type no longer exists. Ask an admin to update the panel.".to_string(),
            )
        })?;

    let fields = type_repo.fields(ticket_type.id).await?;

    let rows: Vec<CreateActionRow> = if fields.is_empty() {
        // A registered type with no configured questions still gets one
        // (in-memory only; nothing is persisted behind the operator's back).
        vec![CreateActionRow::InputText(
            CreateInputText::new(
                InputTextStyle::Paragraph,
                "What do you need help with?",
                "answer_0",
            )
            .required(true),
        )]
    } else {
        fields
            .iter()
            .take(MAX_MODAL_FIELDS)
            .enumerate()
            .map(|(index, field)| {
                let style = match field.style.as_str() {
                    "paragraph" => InputTextStyle::Paragraph,
                    _ => InputTextStyle::Short,
                };

                let mut input = CreateInputText::new(
                    style,
                    field.label.clone(),
                    format!("answer_{}", index),
                )
                .required(field.required);
                if let Some(placeholder) = &field.placeholder {
                    input = input.placeholder(placeholder.clone());
                }
                if let Some(max_length) = field.max_length {
                    input = input.max_length(max_length.clamp(1, 4000) as u16);
                }

                CreateActionRow::InputText(input)
            })
            .collect()
    };

    let modal = CreateModal::new(
        ModalAction::OpenTicket {
            panel_id,
            ticket_type_id,
        }
        .encode(),
        ticket_type.modal_title.clone(),
    )
    .components(rows);

    component
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await?;

    Ok(())
}

async fn close(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    ticket_pk: i32,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(component)?;
    let ticket = require_ticket(handler, ticket_pk).await?;

    authorize_member(
        &handler.db,
        guild_id,
        member,
        Some(&ticket.user_id),
        TicketAction::Close,
    )
    .await?;

    component.defer_ephemeral(&ctx.http).await?;

    let service = TicketService::new(&handler.db, ctx.http.clone());
    service
        .close_ticket(&ticket, &member.user.id.get().to_string(), Utc::now())
        .await?;
    handler.auto_close.disarm(ticket.id);

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(success_embed("Ticket closed.")),
        )
        .await?;

    Ok(())
}

async fn reopen(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    ticket_pk: i32,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(component)?;
    let ticket = require_ticket(handler, ticket_pk).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::Reopen).await?;

    component.defer_ephemeral(&ctx.http).await?;

    let service = TicketService::new(&handler.db, ctx.http.clone());
    service
        .reopen_ticket(&ticket, member.user.id.get(), Utc::now())
        .await?;

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(success_embed("Ticket reopened.")),
        )
        .await?;

    Ok(())
}

/// First delete click: ask for confirmation.
async fn confirm_delete(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    ticket_pk: i32,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(component)?;
    let _ticket = require_ticket(handler, ticket_pk).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::Delete).await?;

    let confirm = CreateActionRow::Buttons(vec![CreateButton::new(
        ComponentAction::DeleteConfirm { ticket_pk }.encode(),
    )
    .label("Yes, delete this ticket")
    .style(ButtonStyle::Danger)]);

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(CreateEmbed::new().color(COLOR_NEUTRAL).description(
                        "This permanently deletes the ticket channel \
                         (a transcript is archived first if configured). Are you sure?",
                    ))
                    .components(vec![confirm])
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

/// Second, confirming click: actually delete.
///
/// The acknowledgement goes out before the channel is removed, because the
/// interaction can't be answered once its channel is gone.
async fn delete(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    ticket_pk: i32,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(component)?;
    let ticket = require_ticket(handler, ticket_pk).await?;

    authorize_member(&handler.db, guild_id, member, None, TicketAction::Delete).await?;

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(success_embed("Deleting the ticket..."))
                    .ephemeral(true),
            ),
        )
        .await?;

    let service = TicketService::new(&handler.db, ctx.http.clone());
    service
        .delete_ticket(&ticket, member.user.id.get(), Utc::now())
        .await?;
    handler.auto_close.disarm(ticket.id);

    Ok(())
}

async fn require_ticket(
    handler: &Handler,
    ticket_pk: i32,
) -> Result<entity::ticket::Model, AppError> {
    TicketRepository::new(&handler.db)
        .find_by_id(ticket_pk)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
}

fn guild_and_member(component: &ComponentInteraction) -> Result<(u64, &Member), AppError> {
    let guild_id = component
        .guild_id
        .ok_or_else(|| AppError::BadRequest("This only works in a server".to_string()))?
        .get();
    let member = component
        .member
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("This only works in a server".to_string()))?;

    Ok((guild_id, member))
}

/// Arms the auto-close timer for a fresh ticket when the guild policy has
/// auto-close enabled. Shared with the modal handler.
pub(super) fn arm_auto_close(
    handler: &Handler,
    ctx: &Context,
    config: Option<&entity::ticket_config::Model>,
    ticket_pk: i32,
) {
    let Some(config) = config else { return };
    if !config.auto_close_enabled {
        return;
    }

    let delay = Duration::hours(config.auto_close_hours as i64)
        .to_std()
        .unwrap_or_default();

    handler
        .auto_close
        .arm(ticket_pk, delay, handler.db.clone(), ctx.http.clone());
}
