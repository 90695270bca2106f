//! Modal submission handlers: the tail of the ticket-creation flow.

use serenity::all::{
    ActionRowComponent, Context, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse, Member, ModalInteraction,
};

use crate::server::{
    bot::{
        commands::{error_embed, success_embed, user_error_message},
        handler::{component::MAX_MODAL_FIELDS, Handler},
        interaction::ModalAction,
    },
    cache::fixed_window::RateLimitPolicy,
    data::{
        ticket_config::{
            TicketConfigRepository, DEFAULT_RATE_LIMIT_MAX, DEFAULT_RATE_LIMIT_WINDOW_MINUTES,
        },
        ticket_type::TicketTypeRepository,
    },
    error::AppError,
    service::ticket::{OpenTicketRequest, TicketService},
};

pub async fn handle(handler: &Handler, ctx: &Context, modal: &ModalInteraction, action: ModalAction) {
    if let Err(e) = run(handler, ctx, modal, action).await {
        tracing::error!("Modal action {:?} failed: {}", action, e);

        let embed = error_embed(&user_error_message(&e));
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .embed(embed.clone())
                .ephemeral(true),
        );

        if modal.create_response(&ctx.http, response).await.is_err() {
            let _ = modal
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
    modal: &ModalInteraction,
    action: ModalAction,
) -> Result<(), AppError> {
    match action {
        ModalAction::OpenTicket {
            panel_id: _,
            ticket_type_id,
        } => open_ticket(handler, ctx, modal, ticket_type_id).await,
    }
}

/// Creates the ticket from the submitted answers.
///
/// The rate-limit window is charged here, at actual creation, not at the
/// button click that opened the modal.
async fn open_ticket(
    handler: &Handler,
    ctx: &Context,
    modal: &ModalInteraction,
    ticket_type_id: i32,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(modal)?;
    let user_id = member.user.id.get();

    let type_repo = TicketTypeRepository::new(&handler.db);
    let ticket_type = type_repo
        .find_by_id(ticket_type_id)
        .await?
        .filter(|t| t.guild_id == guild_id.to_string())
        .ok_or_else(|| {
            AppError::BadRequest("This ticket type no longer exists.".to_string())
        })?;

    let config = TicketConfigRepository::new(&handler.db)
        .find_by_guild_id(guild_id)
        .await?;

    let policy = match &config {
        Some(config) => {
            RateLimitPolicy::from_config(config.rate_limit_max, config.rate_limit_window_minutes)
        }
        None => RateLimitPolicy::from_config(
            DEFAULT_RATE_LIMIT_MAX,
            DEFAULT_RATE_LIMIT_WINDOW_MINUTES,
        ),
    };
    if !handler.ticket_limiter.try_acquire(user_id, policy) {
        return Err(AppError::BadRequest(
            "You are opening tickets too quickly. Please wait a while and try again.".to_string(),
        ));
    }

    // Pair submitted values with the question labels by position. The
    // modal was built from the same field list, capped the same way.
    let labels: Vec<String> = {
        let fields = type_repo.fields(ticket_type.id).await?;
        if fields.is_empty() {
            vec!["What do you need help with?".to_string()]
        } else {
            fields
                .into_iter()
                .take(MAX_MODAL_FIELDS)
                .map(|f| f.label)
                .collect()
        }
    };

    let mut answers = Vec::new();
    let inputs = modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter());
    for (index, input) in inputs.enumerate() {
        let ActionRowComponent::InputText(input) = input else {
            continue;
        };

        let value = input.value.clone().unwrap_or_default();
        if value.trim().is_empty() {
            continue;
        }

        let label = labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Question {}", index + 1));
        answers.push((label, value));
    }

    modal.defer_ephemeral(&ctx.http).await?;

    let service = TicketService::new(&handler.db, ctx.http.clone());
    let ticket = service
        .open_ticket(OpenTicketRequest {
            guild_id,
            user_id,
            username: member.user.name.clone(),
            ticket_type,
            answers,
        })
        .await?;

    super::component::arm_auto_close(handler, ctx, config.as_ref(), ticket.id);

    modal
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(success_embed(&format!(
                "Your ticket is ready: <#{}>",
                ticket.channel_id
            ))),
        )
        .await?;

    Ok(())
}

fn guild_and_member(modal: &ModalInteraction) -> Result<(u64, &Member), AppError> {
    let guild_id = modal
        .guild_id
        .ok_or_else(|| AppError::BadRequest("This only works in a server".to_string()))?
        .get();
    let member = modal
        .member
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("This only works in a server".to_string()))?;

    Ok((guild_id, member))
}
