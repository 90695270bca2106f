use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test panels with buttons.
pub struct PanelFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    channel_id: u64,
    title: String,
    /// (ticket_type_id, label) pairs inserted as primary buttons in order.
    buttons: Vec<(i32, String)>,
}

impl<'a> PanelFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            channel_id: next_id(),
            title: "Support".to_string(),
            buttons: Vec::new(),
        }
    }

    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn button(mut self, ticket_type_id: i32, label: impl Into<String>) -> Self {
        self.buttons.push((ticket_type_id, label.into()));
        self
    }

    pub async fn build(self) -> Result<entity::panel::Model, DbErr> {
        let panel = entity::panel::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            channel_id: ActiveValue::Set(self.channel_id.to_string()),
            message_id: ActiveValue::Set(None),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            color: ActiveValue::Set(0x5865F2),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (position, (ticket_type_id, label)) in self.buttons.into_iter().enumerate() {
            entity::panel_button::ActiveModel {
                panel_id: ActiveValue::Set(panel.id),
                ticket_type_id: ActiveValue::Set(ticket_type_id),
                label: ActiveValue::Set(label),
                emoji: ActiveValue::Set(None),
                style: ActiveValue::Set("primary".to_string()),
                position: ActiveValue::Set(position as i32),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(panel)
    }
}

/// Creates a panel with no buttons.
pub async fn create_panel(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::panel::Model, DbErr> {
    PanelFactory::new(db, guild_id).build().await
}
