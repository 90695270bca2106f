//! Slash command definitions, registration, and dispatch.

pub mod embed;
pub mod panel;
pub mod setup;
pub mod ticket;

use serenity::all::{
    Command, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, Member,
};

use crate::server::{
    bot::handler::Handler,
    data::staff_role::StaffRoleRepository,
    error::{auth::AuthError, AppError},
    model::permission::{can_perform, TicketAction},
    service::ticket::{COLOR_CLOSED, COLOR_OPEN},
};

/// Registers all global slash commands. Called from `ready`.
pub async fn register(ctx: &Context) -> Result<(), AppError> {
    Command::set_global_commands(&ctx.http, definitions()).await?;

    tracing::info!("Registered global slash commands");

    Ok(())
}

/// Routes a slash command to its handler and converts errors into an
/// ephemeral reply.
pub async fn dispatch(handler: &Handler, ctx: &Context, command: &CommandInteraction) {
    let result = match command.data.name.as_str() {
        "ticket" => ticket::handle(handler, ctx, command).await,
        "panel" => panel::handle(handler, ctx, command).await,
        "tickets" => setup::handle(handler, ctx, command).await,
        "embed" => embed::handle(handler, ctx, command).await,
        other => {
            tracing::debug!("Ignoring unknown command '{}'", other);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("Command /{} failed: {}", command.data.name, e);
        respond_with_error(ctx, command, &e).await;
    }
}

/// Replies to a failed command, falling back to a followup when the initial
/// response window was already used (e.g. after a defer).
async fn respond_with_error(ctx: &Context, command: &CommandInteraction, error: &AppError) {
    let embed = error_embed(&user_error_message(error));

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(embed.clone())
            .ephemeral(true),
    );

    if command.create_response(&ctx.http, response).await.is_err() {
        let _ = command
            .create_followup(
                &ctx.http,
                CreateInteractionResponseFollowup::new()
                    .embed(embed)
                    .ephemeral(true),
            )
            .await;
    }
}

/// Converts an error into the message shown to the interacting user.
///
/// Transient Discord outages get a friendlier notice (no retry); validation
/// and permission errors pass their message through; everything else stays
/// generic.
pub fn user_error_message(error: &AppError) -> String {
    if error.is_discord_unavailable() {
        return "Discord is having temporary issues right now, please try again in a few minutes."
            .to_string();
    }

    match error {
        AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
        AppError::AuthErr(_) => "You don't have permission to do that.".to_string(),
        AppError::DbErr(sea_orm::DbErr::Custom(msg)) => msg.clone(),
        _ => "Something went wrong, please try again.".to_string(),
    }
}

pub fn error_embed(message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .color(COLOR_CLOSED)
        .description(message.to_string())
}

pub fn success_embed(message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .color(COLOR_OPEN)
        .description(message.to_string())
}

pub fn ephemeral_message(embed: CreateEmbed) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .ephemeral(true),
    )
}

/// Extracts the guild id and invoking member from a command, rejecting DM
/// invocations.
pub(crate) fn guild_and_member(
    command: &CommandInteraction,
) -> Result<(u64, &Member), AppError> {
    let guild_id = command
        .guild_id
        .ok_or_else(|| AppError::BadRequest("This command only works in a server".to_string()))?
        .get();
    let member = command
        .member
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("This command only works in a server".to_string()))?;

    Ok((guild_id, member))
}

/// Checks whether a member may perform a ticket action.
///
/// Applies the capability union of the member's staff roles, the standing
/// ADMINISTRATOR override, and the own-ticket close exception.
pub async fn authorize_member(
    db: &sea_orm::DatabaseConnection,
    guild_id: u64,
    member: &Member,
    ticket_owner: Option<&str>,
    action: TicketAction,
) -> Result<(), AppError> {
    let is_admin = member
        .permissions
        .map(|p| p.administrator())
        .unwrap_or(false);
    let member_roles: Vec<u64> = member.roles.iter().map(|id| id.get()).collect();
    let capabilities = StaffRoleRepository::new(db)
        .capabilities_for(guild_id, &member_roles)
        .await?;

    let is_owner = ticket_owner
        .map(|owner| owner == member.user.id.get().to_string())
        .unwrap_or(false);

    if !can_perform(capabilities, is_admin, is_owner, action) {
        return Err(AuthError::AccessDenied(
            member.user.id.get(),
            format!("missing {:?} capability in guild {}", action, guild_id),
        )
        .into());
    }

    Ok(())
}

fn definitions() -> Vec<CreateCommand> {
    vec![
        ticket_command(),
        panel_command(),
        tickets_command(),
        embed_command(),
    ]
}

fn ticket_command() -> CreateCommand {
    CreateCommand::new("ticket")
        .description("Manage the ticket in this channel")
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "close",
            "Close this ticket",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "reopen",
            "Reopen this closed ticket",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "assign",
                "Assign this ticket to a staff member",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::User,
                    "member",
                    "Staff member to assign, or nobody to clear",
                )
                .required(false),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "delete",
            "Permanently delete this ticket",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "transcript",
                "Export a transcript of this ticket",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "format", "Output format")
                    .add_string_choice("HTML", "html")
                    .add_string_choice("Plain text", "text")
                    .add_string_choice("JSON", "json"),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "tag",
                "Add or remove a tag on this ticket",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "tag", "Tag name")
                    .required(true),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "remove",
                "Remove the tag instead of adding it",
            )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "priority",
                "Set the priority of this ticket",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "priority", "Priority level")
                    .required(true)
                    .add_string_choice("Low", "low")
                    .add_string_choice("Normal", "normal")
                    .add_string_choice("High", "high")
                    .add_string_choice("Urgent", "urgent"),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "list",
                "List tickets in this server",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "status", "Filter by status")
                    .add_string_choice("Open", "open")
                    .add_string_choice("Closed", "closed"),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "info",
            "Show details for this ticket",
        ))
}

fn panel_command() -> CreateCommand {
    CreateCommand::new("panel")
        .description("Manage ticket panels")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "create",
                "Create and post a ticket panel",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel to post the panel in",
                )
                .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "title", "Panel title")
                    .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "type",
                    "Registered ticket type for the button",
                )
                .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "label", "Button label")
                    .required(true),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::String,
                "description",
                "Panel body text",
            )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "post",
                "Re-post an existing panel",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Integer, "id", "Panel id")
                    .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "delete", "Delete a panel")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::Integer, "id", "Panel id")
                        .required(true),
                ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "List panels in this server",
        ))
}

fn tickets_command() -> CreateCommand {
    CreateCommand::new("tickets")
        .description("Configure the ticket system")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "setup",
                "Set up channel routing for tickets",
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Channel,
                "open_category",
                "Category for open tickets",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Channel,
                "closed_category",
                "Category for closed tickets",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Channel,
                "log_channel",
                "Channel for audit embeds",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Channel,
                "archive_channel",
                "Channel for transcript archives",
            )),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "settings",
            "Show the current ticket configuration",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "staffrole",
                "Grant or revoke staff capabilities for a role",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "The staff role")
                    .required(true),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "view",
                "Can view tickets",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "assign",
                "Can assign tickets and edit tags/priority",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "close",
                "Can close tickets",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "delete",
                "Can delete tickets",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "reopen",
                "Can reopen tickets",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "manage_panels",
                "Can manage panels",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "remove",
                "Remove this role from the staff list",
            )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "tickettype",
                "Register or remove a ticket type",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "name", "Ticket type name")
                    .required(true),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::String,
                "title",
                "Modal title shown when opening",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::String,
                "question",
                "The question asked in the creation modal",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "remove",
                "Remove this ticket type",
            )),
        )
}

fn embed_command() -> CreateCommand {
    CreateCommand::new("embed")
        .description("Post saved embed templates")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "post",
                "Post a saved embed template",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "name", "Template name")
                    .required(true),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Channel,
                "channel",
                "Target channel (defaults to here)",
            )),
        )
}
