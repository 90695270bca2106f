//! `/embed` subcommand handlers.

use serenity::all::{CommandInteraction, Context, ResolvedOption, ResolvedValue};

use crate::server::{
    bot::{
        commands::{
            authorize_member, ephemeral_message, guild_and_member, success_embed,
            ticket::{find_channel, find_string},
        },
        handler::Handler,
    },
    data::embed_template::EmbedTemplateRepository,
    error::AppError,
    model::permission::TicketAction,
    service::embed_template::EmbedTemplateService,
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
        "post" => post(handler, ctx, command, &sub_options).await,
        other => Err(AppError::BadRequest(format!(
            "Unknown subcommand '{}'",
            other
        ))),
    }
}

async fn post(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    sub_options: &[ResolvedOption<'_>],
) -> Result<(), AppError> {
    let (guild_id, member) = guild_and_member(command)?;

    // Posting announcements is a panel-management grade action.
    authorize_member(&handler.db, guild_id, member, None, TicketAction::ManagePanels).await?;

    let name = find_string(sub_options, "name")
        .ok_or_else(|| AppError::BadRequest("Missing template name".to_string()))?;
    let channel_id = find_channel(sub_options, "channel").unwrap_or(command.channel_id.get());

    let template = EmbedTemplateRepository::new(&handler.db)
        .find_by_name(guild_id, name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No embed template named '{}'", name)))?;

    command.defer_ephemeral(&ctx.http).await?;

    let service = EmbedTemplateService::new(&handler.db);
    service
        .post(ctx.http.clone(), &template, channel_id)
        .await?;

    command
        .edit_response(
            &ctx.http,
            serenity::all::EditInteractionResponse::new().embed(success_embed(&format!(
                "Template '{}' posted in <#{}>.",
                name, channel_id
            ))),
        )
        .await?;

    Ok(())
}
