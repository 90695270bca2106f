use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ExprTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::ticket::{CreateTicketParams, TicketPriority, TicketStatus};

/// Repository for ticket rows.
///
/// All lifecycle transition guards live here: the exposed operations only
/// permit `open -> closed`, `closed -> open`, and `open|closed -> deleted`.
/// Callers that need Discord side effects wrap this in `TicketService`.
pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the next sequential ticket number for a guild.
    ///
    /// The allocation is max+1 under last-write-wins concurrency; the unique
    /// index on (guild_id, ticket_id) turns a lost race into a database
    /// error rather than a duplicate. Also used to name the ticket channel
    /// before the row exists.
    pub async fn next_ticket_id(&self, guild_id: u64) -> Result<i32, DbErr> {
        let max_ticket_id: Option<Option<i32>> = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .select_only()
            .column_as(
                sea_orm::sea_query::Expr::col(entity::ticket::Column::TicketId).max(),
                "max_ticket_id",
            )
            .into_tuple()
            .one(self.db)
            .await?;

        Ok(max_ticket_id.flatten().unwrap_or(0) + 1)
    }

    /// Creates a new open ticket under the next sequential per-guild ticket
    /// number.
    ///
    /// # Returns
    /// - `Ok(Model)`: The created ticket
    /// - `Err(DbErr)`: Database error, including unique-index violations
    pub async fn create(&self, params: CreateTicketParams) -> Result<entity::ticket::Model, DbErr> {
        let next_ticket_id = self.next_ticket_id(params.guild_id).await?;

        entity::ticket::ActiveModel {
            guild_id: ActiveValue::Set(params.guild_id.to_string()),
            ticket_id: ActiveValue::Set(next_ticket_id),
            user_id: ActiveValue::Set(params.user_id.to_string()),
            channel_id: ActiveValue::Set(params.channel_id.to_string()),
            ticket_type: ActiveValue::Set(params.ticket_type),
            reason: ActiveValue::Set(params.reason),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            assignee_id: ActiveValue::Set(None),
            priority: ActiveValue::Set(TicketPriority::Normal.as_str().to_string()),
            closed_by: ActiveValue::Set(None),
            closed_at: ActiveValue::Set(None),
            deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(params.now),
            updated_at: ActiveValue::Set(params.now),
            last_activity_at: ActiveValue::Set(params.now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find_by_id(id).one(self.db).await
    }

    /// Finds a ticket by its per-guild ticket number.
    pub async fn find_by_guild_and_ticket_id(
        &self,
        guild_id: u64,
        ticket_id: i32,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::TicketId.eq(ticket_id))
            .one(self.db)
            .await
    }

    /// Finds the ticket bound to a Discord channel, if any.
    pub async fn find_by_channel_id(
        &self,
        channel_id: u64,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await
    }

    /// Gets paginated tickets for a guild, newest first, optionally filtered
    /// by status. Soft-deleted tickets are included only when explicitly
    /// requested via the `deleted` status filter.
    ///
    /// # Returns
    /// - `Ok((tickets, total))`: Page of tickets and total matching count
    /// - `Err(DbErr)`: Database error
    pub async fn get_paginated_by_guild(
        &self,
        guild_id: u64,
        status: Option<TicketStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::ticket::Model>, u64), DbErr> {
        let mut query = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::ticket::Column::CreatedAt);

        match status {
            Some(status) => {
                query = query.filter(entity::ticket::Column::Status.eq(status.as_str()));
            }
            None => {
                query = query.filter(entity::ticket::Column::Deleted.eq(false));
            }
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let tickets = paginator.fetch_page(page).await?;

        Ok((tickets, total))
    }

    /// Closes an open ticket.
    ///
    /// Sets `closed_by`/`closed_at` and leaves the reopen history untouched.
    /// Auto-close passes the literal actor `"auto-close"`.
    ///
    /// # Returns
    /// - `Ok(Model)`: The closed ticket
    /// - `Err(DbErr::Custom)`: The ticket is not open
    /// - `Err(DbErr::RecordNotFound)`: No such ticket
    pub async fn close(
        &self,
        id: i32,
        closed_by: &str,
        now: DateTime<Utc>,
    ) -> Result<entity::ticket::Model, DbErr> {
        let ticket = self
            .find_by_id(id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Ticket {} not found", id)))?;

        if ticket.status != TicketStatus::Open.as_str() {
            return Err(DbErr::Custom(format!(
                "Ticket {} is not open (status: {})",
                id, ticket.status
            )));
        }

        let mut active: entity::ticket::ActiveModel = ticket.into();
        active.status = ActiveValue::Set(TicketStatus::Closed.as_str().to_string());
        active.closed_by = ActiveValue::Set(Some(closed_by.to_string()));
        active.closed_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);

        active.update(self.db).await
    }

    /// Reopens a closed ticket, appending a reopen audit row.
    ///
    /// The close audit fields (`closed_by`/`closed_at`) are intentionally
    /// left as they were.
    ///
    /// # Returns
    /// - `Ok(Model)`: The reopened ticket
    /// - `Err(DbErr::Custom)`: The ticket is not closed
    /// - `Err(DbErr::RecordNotFound)`: No such ticket
    pub async fn reopen(
        &self,
        id: i32,
        reopened_by: u64,
        now: DateTime<Utc>,
    ) -> Result<entity::ticket::Model, DbErr> {
        let ticket = self
            .find_by_id(id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Ticket {} not found", id)))?;

        if ticket.status != TicketStatus::Closed.as_str() {
            return Err(DbErr::Custom(format!(
                "Ticket {} is not closed (status: {})",
                id, ticket.status
            )));
        }

        let mut active: entity::ticket::ActiveModel = ticket.into();
        active.status = ActiveValue::Set(TicketStatus::Open.as_str().to_string());
        active.updated_at = ActiveValue::Set(now);
        active.last_activity_at = ActiveValue::Set(now);
        let reopened = active.update(self.db).await?;

        entity::ticket_reopen::ActiveModel {
            ticket_id: ActiveValue::Set(id),
            user_id: ActiveValue::Set(reopened_by.to_string()),
            reopened_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(reopened)
    }

    /// Soft-deletes a ticket. Terminal: no transition leads out of
    /// `deleted`.
    ///
    /// # Returns
    /// - `Ok(Model)`: The deleted ticket
    /// - `Err(DbErr::Custom)`: The ticket is already deleted
    /// - `Err(DbErr::RecordNotFound)`: No such ticket
    pub async fn soft_delete(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<entity::ticket::Model, DbErr> {
        let ticket = self
            .find_by_id(id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Ticket {} not found", id)))?;

        if ticket.deleted {
            return Err(DbErr::Custom(format!("Ticket {} is already deleted", id)));
        }

        let mut active: entity::ticket::ActiveModel = ticket.into();
        active.status = ActiveValue::Set(TicketStatus::Deleted.as_str().to_string());
        active.deleted = ActiveValue::Set(true);
        active.updated_at = ActiveValue::Set(now);

        active.update(self.db).await
    }

    /// Sets or clears the assignee. Rejected on deleted tickets.
    pub async fn assign(
        &self,
        id: i32,
        assignee_id: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<entity::ticket::Model, DbErr> {
        let ticket = self.require_live(id).await?;

        let mut active: entity::ticket::ActiveModel = ticket.into();
        active.assignee_id = ActiveValue::Set(assignee_id.map(|id| id.to_string()));
        active.updated_at = ActiveValue::Set(now);

        active.update(self.db).await
    }

    /// Sets the priority. Rejected on deleted tickets.
    pub async fn set_priority(
        &self,
        id: i32,
        priority: TicketPriority,
        now: DateTime<Utc>,
    ) -> Result<entity::ticket::Model, DbErr> {
        let ticket = self.require_live(id).await?;

        let mut active: entity::ticket::ActiveModel = ticket.into();
        active.priority = ActiveValue::Set(priority.as_str().to_string());
        active.updated_at = ActiveValue::Set(now);

        active.update(self.db).await
    }

    /// Adds a tag to a ticket. Adding a tag the ticket already has is a
    /// no-op.
    pub async fn add_tag(&self, id: i32, tag: &str) -> Result<(), DbErr> {
        let existing = entity::prelude::TicketTag::find()
            .filter(entity::ticket_tag::Column::TicketId.eq(id))
            .filter(entity::ticket_tag::Column::Tag.eq(tag))
            .one(self.db)
            .await?;

        if existing.is_some() {
            return Ok(());
        }

        entity::ticket_tag::ActiveModel {
            ticket_id: ActiveValue::Set(id),
            tag: ActiveValue::Set(tag.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn remove_tag(&self, id: i32, tag: &str) -> Result<(), DbErr> {
        entity::prelude::TicketTag::delete_many()
            .filter(entity::ticket_tag::Column::TicketId.eq(id))
            .filter(entity::ticket_tag::Column::Tag.eq(tag))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn tags(&self, id: i32) -> Result<Vec<String>, DbErr> {
        Ok(entity::prelude::TicketTag::find()
            .filter(entity::ticket_tag::Column::TicketId.eq(id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|t| t.tag)
            .collect())
    }

    /// Gets the reopen history for a ticket, oldest first.
    pub async fn reopens(&self, id: i32) -> Result<Vec<entity::ticket_reopen::Model>, DbErr> {
        entity::prelude::TicketReopen::find()
            .filter(entity::ticket_reopen::Column::TicketId.eq(id))
            .order_by_asc(entity::ticket_reopen::Column::ReopenedAt)
            .all(self.db)
            .await
    }

    /// Bumps `last_activity_at` for the open ticket bound to a channel.
    ///
    /// Messages in closed or deleted ticket channels do not count as
    /// activity.
    pub async fn touch_activity(&self, channel_id: u64, now: DateTime<Utc>) -> Result<(), DbErr> {
        let Some(ticket) = self.find_by_channel_id(channel_id).await? else {
            return Ok(());
        };

        if ticket.status != TicketStatus::Open.as_str() {
            return Ok(());
        }

        let mut active: entity::ticket::ActiveModel = ticket.into();
        active.last_activity_at = ActiveValue::Set(now);
        active.update(self.db).await?;

        Ok(())
    }

    /// Open tickets in a guild whose last activity predates `cutoff`.
    /// Used by the auto-close sweep.
    pub async fn open_tickets_inactive_since(
        &self,
        guild_id: u64,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open.as_str()))
            .filter(entity::ticket::Column::LastActivityAt.lt(cutoff))
            .all(self.db)
            .await
    }

    async fn require_live(&self, id: i32) -> Result<entity::ticket::Model, DbErr> {
        let ticket = self
            .find_by_id(id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Ticket {} not found", id)))?;

        if ticket.deleted {
            return Err(DbErr::Custom(format!("Ticket {} is deleted", id)));
        }

        Ok(ticket)
    }
}
