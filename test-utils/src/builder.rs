use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with
/// in-memory SQLite databases. Add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Ticket, TicketTag};
///
/// let test = TestBuilder::new()
///     .with_table(Ticket)
///     .with_table(TicketTag)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables should be added in dependency order (tables with foreign keys
    /// after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds all tables required for ticket lifecycle operations:
    /// configuration, staff roles, ticket types with modal fields, tickets
    /// and their tag/reopen child tables.
    pub fn with_ticket_tables(self) -> Self {
        self.with_table(TicketConfig)
            .with_table(StaffRole)
            .with_table(TicketType)
            .with_table(ModalField)
            .with_table(Ticket)
            .with_table(TicketTag)
            .with_table(TicketReopen)
            .with_table(GuildTag)
    }

    /// Ticket tables plus panels and panel buttons.
    pub fn with_panel_tables(self) -> Self {
        self.with_ticket_tables()
            .with_table(Panel)
            .with_table(PanelButton)
    }

    /// Adds the embed template tables.
    pub fn with_embed_template_tables(self) -> Self {
        self.with_table(EmbedTemplate).with_table(EmbedTemplateField)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
