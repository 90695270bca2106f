//! Ticket factory for creating test ticket entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tickets with customizable fields.
///
/// Inserts rows directly, so any status/flag combination can be staged.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::ticket::TicketFactory;
///
/// let ticket = TicketFactory::new(&db, 100)
///     .user_id(42)
///     .status("closed")
///     .build()
///     .await?;
/// ```
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    ticket_id: i32,
    user_id: u64,
    channel_id: u64,
    ticket_type: String,
    status: String,
    priority: String,
    deleted: bool,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory with default values.
    ///
    /// Defaults:
    /// - ticket_id / user_id / channel_id: auto-incremented unique ids
    /// - ticket_type: `"support"`
    /// - status: `"open"`, priority: `"normal"`, deleted: `false`
    /// - timestamps: now
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        let now = Utc::now();
        Self {
            db,
            guild_id,
            ticket_id: next_id() as i32,
            user_id: next_id(),
            channel_id: next_id(),
            ticket_type: "support".to_string(),
            status: "open".to_string(),
            priority: "normal".to_string(),
            deleted: false,
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn ticket_id(mut self, ticket_id: i32) -> Self {
        self.ticket_id = ticket_id;
        self
    }

    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn ticket_type(mut self, ticket_type: impl Into<String>) -> Self {
        self.ticket_type = ticket_type.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    pub fn last_activity_at(mut self, last_activity_at: DateTime<Utc>) -> Self {
        self.last_activity_at = last_activity_at;
        self
    }

    /// Builds and inserts the ticket entity into the database.
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            ticket_id: ActiveValue::Set(self.ticket_id),
            user_id: ActiveValue::Set(self.user_id.to_string()),
            channel_id: ActiveValue::Set(self.channel_id.to_string()),
            ticket_type: ActiveValue::Set(self.ticket_type),
            reason: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            assignee_id: ActiveValue::Set(None),
            priority: ActiveValue::Set(self.priority),
            closed_by: ActiveValue::Set(None),
            closed_at: ActiveValue::Set(None),
            deleted: ActiveValue::Set(self.deleted),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            last_activity_at: ActiveValue::Set(self.last_activity_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open ticket with default values.
///
/// Shorthand for `TicketFactory::new(db, guild_id).build().await`.
pub async fn create_ticket(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, guild_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_ticket_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let ticket = create_ticket(db, 100).await?;

        assert_eq!(ticket.guild_id, "100");
        assert_eq!(ticket.status, "open");
        assert_eq!(ticket.priority, "normal");
        assert!(!ticket.deleted);

        Ok(())
    }

    #[tokio::test]
    async fn creates_unique_channels_per_ticket() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let a = create_ticket(db, 100).await?;
        let b = create_ticket(db, 100).await?;

        assert_ne!(a.channel_id, b.channel_id);

        Ok(())
    }
}
