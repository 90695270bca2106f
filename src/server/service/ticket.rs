//! Ticket lifecycle orchestration.
//!
//! Every operation writes the database first and applies Discord side
//! effects second. There is no transaction spanning the two and no rollback:
//! a failure after the database commit leaves the row authoritative and the
//! channel out of step until the next operation touches it. Callers get the
//! error either way.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, ChannelType, CreateActionRow, CreateButton, CreateChannel, CreateEmbed,
    CreateMessage, EditChannel, GuildId, PermissionOverwrite, PermissionOverwriteType,
    Permissions, RoleId, UserId,
};
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    bot::interaction::ComponentAction,
    data::{
        staff_role::StaffRoleRepository,
        ticket::TicketRepository,
        ticket_config::TicketConfigRepository,
    },
    error::AppError,
    model::{
        config::{NamingPattern, TranscriptFormat},
        ticket::CreateTicketParams,
    },
    service::transcript::TranscriptGenerator,
};

/// Actor label recorded by the auto-close path.
pub const AUTO_CLOSE_ACTOR: &str = "auto-close";

pub const COLOR_OPEN: u32 = 0x57F287;
pub const COLOR_CLOSED: u32 = 0xED4245;
pub const COLOR_NEUTRAL: u32 = 0x5865F2;

/// Permissions granted to the creator and viewing staff in a ticket channel.
const TICKET_CHANNEL_PERMS: Permissions = Permissions::VIEW_CHANNEL
    .union(Permissions::SEND_MESSAGES)
    .union(Permissions::READ_MESSAGE_HISTORY)
    .union(Permissions::ATTACH_FILES)
    .union(Permissions::EMBED_LINKS);

pub struct OpenTicketRequest {
    pub guild_id: u64,
    pub user_id: u64,
    pub username: String,
    pub ticket_type: entity::ticket_type::Model,
    /// (question label, answer) pairs from the creation modal, in order.
    pub answers: Vec<(String, String)>,
}

pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Opens a ticket: creates the channel, inserts the row, posts the
    /// intro message, and logs an audit embed.
    ///
    /// The channel is created before the row exists (the row stores the
    /// channel id), so a database failure here can orphan a channel; that
    /// matches the no-rollback contract and the orphan is visible to staff.
    pub async fn open_ticket(
        &self,
        request: OpenTicketRequest,
    ) -> Result<entity::ticket::Model, AppError> {
        let config = TicketConfigRepository::new(self.db)
            .find_by_guild_id(request.guild_id)
            .await?;
        let staff_roles = StaffRoleRepository::new(self.db)
            .list_by_guild(request.guild_id)
            .await?;
        let ticket_repo = TicketRepository::new(self.db);

        let naming = config
            .as_ref()
            .and_then(|c| NamingPattern::parse(&c.naming_pattern))
            .unwrap_or_default();
        let ticket_number = ticket_repo.next_ticket_id(request.guild_id).await?;
        let channel_name = naming.channel_name(
            ticket_number,
            &request.username,
            &request.ticket_type.name,
            false,
        );

        // @everyone is hidden; the creator and viewing staff are let in.
        let mut overwrites = vec![
            PermissionOverwrite {
                allow: Permissions::empty(),
                deny: Permissions::VIEW_CHANNEL,
                kind: PermissionOverwriteType::Role(RoleId::new(request.guild_id)),
            },
            PermissionOverwrite {
                allow: TICKET_CHANNEL_PERMS,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(UserId::new(request.user_id)),
            },
        ];
        for staff in staff_roles.iter().filter(|r| r.can_view) {
            if let Ok(role_id) = staff.role_id.parse::<u64>() {
                overwrites.push(PermissionOverwrite {
                    allow: TICKET_CHANNEL_PERMS,
                    deny: Permissions::empty(),
                    kind: PermissionOverwriteType::Role(RoleId::new(role_id)),
                });
            }
        }

        let mut create = CreateChannel::new(channel_name)
            .kind(ChannelType::Text)
            .permissions(overwrites);
        if let Some(category_id) = config
            .as_ref()
            .and_then(|c| c.open_category_id.as_ref())
            .and_then(|id| id.parse::<u64>().ok())
        {
            create = create.category(ChannelId::new(category_id));
        }

        let channel = GuildId::new(request.guild_id)
            .create_channel(&self.http, create)
            .await?;

        let reason = if request.answers.is_empty() {
            None
        } else {
            Some(
                request
                    .answers
                    .iter()
                    .map(|(label, answer)| format!("{}: {}", label, answer))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        };

        let ticket = ticket_repo
            .create(CreateTicketParams {
                guild_id: request.guild_id,
                user_id: request.user_id,
                channel_id: channel.id.get(),
                ticket_type: request.ticket_type.name.clone(),
                reason: reason.clone(),
                now: Utc::now(),
            })
            .await?;

        let mut intro = CreateEmbed::new()
            .title(format!("Ticket #{:04}", ticket.ticket_id))
            .color(COLOR_OPEN)
            .field("Type", request.ticket_type.name.clone(), true)
            .field("Opened by", format!("<@{}>", request.user_id), true);
        for (label, answer) in &request.answers {
            intro = intro.field(label.clone(), answer.clone(), false);
        }

        let close_row = CreateActionRow::Buttons(vec![CreateButton::new(
            ComponentAction::Close {
                ticket_pk: ticket.id,
            }
            .encode(),
        )
        .label("Close ticket")
        .style(serenity::all::ButtonStyle::Danger)]);

        channel
            .id
            .send_message(
                &self.http,
                CreateMessage::new()
                    .content(format!("<@{}>", request.user_id))
                    .embed(intro)
                    .components(vec![close_row]),
            )
            .await?;

        self.audit_log(
            config.as_ref(),
            CreateEmbed::new()
                .title("Ticket opened")
                .color(COLOR_OPEN)
                .description(format!(
                    "Ticket #{:04} ({}) opened by <@{}> in <#{}>",
                    ticket.ticket_id, ticket.ticket_type, request.user_id, channel.id
                )),
        )
        .await;

        Ok(ticket)
    }

    /// Closes a ticket: database transition first, then channel relabeling,
    /// creator-visibility removal, closed notice, and audit embed.
    pub async fn close_ticket(
        &self,
        ticket: &entity::ticket::Model,
        closed_by: &str,
        now: DateTime<Utc>,
    ) -> Result<entity::ticket::Model, AppError> {
        let closed = TicketRepository::new(self.db)
            .close(ticket.id, closed_by, now)
            .await?;
        let config = TicketConfigRepository::new(self.db)
            .find_by_guild_id(ticket_guild_id(ticket)?)
            .await?;

        let channel_id = ChannelId::new(ticket_channel_id(ticket)?);

        let mut edit = EditChannel::new();
        if let Ok(channel) = self.http.get_channel(channel_id).await {
            if let Some(guild_channel) = channel.guild() {
                if !guild_channel.name.starts_with("closed-") {
                    edit = edit.name(format!("closed-{}", guild_channel.name));
                }
            }
        }
        if let Some(category_id) = config
            .as_ref()
            .and_then(|c| c.closed_category_id.as_ref())
            .and_then(|id| id.parse::<u64>().ok())
        {
            edit = edit.category(Some(ChannelId::new(category_id)));
        }
        channel_id.edit(&self.http, edit).await?;

        // The creator loses visibility; staff overwrites stay in place.
        channel_id
            .create_permission(
                &self.http,
                PermissionOverwrite {
                    allow: Permissions::empty(),
                    deny: Permissions::VIEW_CHANNEL,
                    kind: PermissionOverwriteType::Member(UserId::new(ticket_user_id(ticket)?)),
                },
            )
            .await?;

        let closed_notice = CreateEmbed::new()
            .title("Ticket closed")
            .color(COLOR_CLOSED)
            .description(format!("Closed by {}", actor_mention(closed_by)));
        let actions = CreateActionRow::Buttons(vec![
            CreateButton::new(
                ComponentAction::Reopen {
                    ticket_pk: closed.id,
                }
                .encode(),
            )
            .label("Reopen")
            .style(serenity::all::ButtonStyle::Secondary),
            CreateButton::new(
                ComponentAction::Delete {
                    ticket_pk: closed.id,
                }
                .encode(),
            )
            .label("Delete")
            .style(serenity::all::ButtonStyle::Danger),
        ]);
        channel_id
            .send_message(
                &self.http,
                CreateMessage::new()
                    .embed(closed_notice)
                    .components(vec![actions]),
            )
            .await?;

        self.audit_log(
            config.as_ref(),
            CreateEmbed::new()
                .title("Ticket closed")
                .color(COLOR_CLOSED)
                .description(format!(
                    "Ticket #{:04} closed by {}",
                    closed.ticket_id,
                    actor_mention(closed_by)
                )),
        )
        .await;

        Ok(closed)
    }

    /// Reopens a closed ticket and restores the creator's visibility.
    pub async fn reopen_ticket(
        &self,
        ticket: &entity::ticket::Model,
        reopened_by: u64,
        now: DateTime<Utc>,
    ) -> Result<entity::ticket::Model, AppError> {
        let reopened = TicketRepository::new(self.db)
            .reopen(ticket.id, reopened_by, now)
            .await?;
        let config = TicketConfigRepository::new(self.db)
            .find_by_guild_id(ticket_guild_id(ticket)?)
            .await?;

        let channel_id = ChannelId::new(ticket_channel_id(ticket)?);

        let mut edit = EditChannel::new();
        if let Ok(channel) = self.http.get_channel(channel_id).await {
            if let Some(guild_channel) = channel.guild() {
                if let Some(stripped) = guild_channel.name.strip_prefix("closed-") {
                    edit = edit.name(stripped.to_string());
                }
            }
        }
        if let Some(category_id) = config
            .as_ref()
            .and_then(|c| c.open_category_id.as_ref())
            .and_then(|id| id.parse::<u64>().ok())
        {
            edit = edit.category(Some(ChannelId::new(category_id)));
        }
        channel_id.edit(&self.http, edit).await?;

        channel_id
            .create_permission(
                &self.http,
                PermissionOverwrite {
                    allow: TICKET_CHANNEL_PERMS,
                    deny: Permissions::empty(),
                    kind: PermissionOverwriteType::Member(UserId::new(ticket_user_id(ticket)?)),
                },
            )
            .await?;

        channel_id
            .send_message(
                &self.http,
                CreateMessage::new().embed(
                    CreateEmbed::new()
                        .title("Ticket reopened")
                        .color(COLOR_OPEN)
                        .description(format!("Reopened by <@{}>", reopened_by)),
                ),
            )
            .await?;

        self.audit_log(
            config.as_ref(),
            CreateEmbed::new()
                .title("Ticket reopened")
                .color(COLOR_OPEN)
                .description(format!(
                    "Ticket #{:04} reopened by <@{}>",
                    reopened.ticket_id, reopened_by
                )),
        )
        .await;

        Ok(reopened)
    }

    /// Deletes a ticket: archives a transcript (best effort), soft-deletes
    /// the row, then deletes the channel.
    pub async fn delete_ticket(
        &self,
        ticket: &entity::ticket::Model,
        deleted_by: u64,
        now: DateTime<Utc>,
    ) -> Result<entity::ticket::Model, AppError> {
        let config = TicketConfigRepository::new(self.db)
            .find_by_guild_id(ticket_guild_id(ticket)?)
            .await?;

        // Archive before the channel (and its history) goes away. A failed
        // archive is logged but does not block deletion.
        if let Some(archive_channel) = config
            .as_ref()
            .and_then(|c| c.archive_channel_id.as_ref())
            .and_then(|id| id.parse::<u64>().ok())
        {
            let format = config
                .as_ref()
                .and_then(|c| TranscriptFormat::parse(&c.transcript_format))
                .unwrap_or_default();

            match TranscriptGenerator::new(self.http.clone())
                .generate(ticket, format)
                .await
            {
                Ok((filename, contents)) => {
                    let attachment = serenity::all::CreateAttachment::bytes(
                        contents.into_bytes(),
                        filename,
                    );
                    if let Err(e) = ChannelId::new(archive_channel)
                        .send_message(
                            &self.http,
                            CreateMessage::new()
                                .content(format!(
                                    "Transcript for ticket #{:04}",
                                    ticket.ticket_id
                                ))
                                .add_file(attachment),
                        )
                        .await
                    {
                        tracing::warn!(
                            "Failed to archive transcript for ticket {}: {}",
                            ticket.id,
                            e
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to generate transcript for ticket {}: {}",
                        ticket.id,
                        e
                    );
                }
            }
        }

        let deleted = TicketRepository::new(self.db)
            .soft_delete(ticket.id, now)
            .await?;

        ChannelId::new(ticket_channel_id(ticket)?)
            .delete(&self.http)
            .await?;

        self.audit_log(
            config.as_ref(),
            CreateEmbed::new()
                .title("Ticket deleted")
                .color(COLOR_CLOSED)
                .description(format!(
                    "Ticket #{:04} deleted by <@{}>",
                    deleted.ticket_id, deleted_by
                )),
        )
        .await;

        Ok(deleted)
    }

    /// Close path for the auto-close machinery.
    ///
    /// Re-checks the inactivity threshold at fire time: a timer armed hours
    /// ago may have been overtaken by new activity, in which case nothing
    /// happens and the sweep re-arms later if the ticket goes quiet again.
    ///
    /// # Returns
    /// - `Ok(true)`: The ticket was closed
    /// - `Ok(false)`: Not eligible (already closed, deleted, or active)
    pub async fn auto_close(&self, ticket_pk: i32, now: DateTime<Utc>) -> Result<bool, AppError> {
        let Some(ticket) = TicketRepository::new(self.db).find_by_id(ticket_pk).await? else {
            return Ok(false);
        };

        if ticket.status != crate::server::model::ticket::TicketStatus::Open.as_str() {
            return Ok(false);
        }

        let config = TicketConfigRepository::new(self.db)
            .find_by_guild_id(ticket_guild_id(&ticket)?)
            .await?;
        let Some(config) = config else {
            return Ok(false);
        };
        if !config.auto_close_enabled {
            return Ok(false);
        }

        let threshold = ticket.last_activity_at + Duration::hours(config.auto_close_hours as i64);
        if now < threshold {
            return Ok(false);
        }

        self.close_ticket(&ticket, AUTO_CLOSE_ACTOR, now).await?;

        Ok(true)
    }

    /// Posts an audit embed to the configured log channel, if any. Failures
    /// are logged and swallowed; audit logging never fails an operation.
    async fn audit_log(&self, config: Option<&entity::ticket_config::Model>, embed: CreateEmbed) {
        let Some(log_channel) = config
            .and_then(|c| c.log_channel_id.as_ref())
            .and_then(|id| id.parse::<u64>().ok())
        else {
            return;
        };

        if let Err(e) = ChannelId::new(log_channel)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::warn!("Failed to post ticket audit log: {}", e);
        }
    }
}

/// Formats a close actor for display: user ids become mentions, the
/// auto-close label stays literal.
fn actor_mention(closed_by: &str) -> String {
    if closed_by.chars().all(|c| c.is_ascii_digit()) {
        format!("<@{}>", closed_by)
    } else {
        closed_by.to_string()
    }
}

fn ticket_guild_id(ticket: &entity::ticket::Model) -> Result<u64, AppError> {
    crate::server::util::parse::parse_u64_from_string(ticket.guild_id.clone())
}

fn ticket_channel_id(ticket: &entity::ticket::Model) -> Result<u64, AppError> {
    crate::server::util::parse::parse_u64_from_string(ticket.channel_id.clone())
}

fn ticket_user_id(ticket: &entity::ticket::Model) -> Result<u64, AppError> {
    crate::server::util::parse::parse_u64_from_string(ticket.user_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_mention_distinguishes_users_from_system() {
        assert_eq!(actor_mention("123456"), "<@123456>");
        assert_eq!(actor_mention(AUTO_CLOSE_ACTOR), "auto-close");
    }
}
