use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// One button on a panel, bound to a registered ticket type.
pub struct PanelButtonParams {
    pub ticket_type_id: i32,
    pub label: String,
    pub emoji: Option<String>,
    /// `primary`, `secondary`, `success`, or `danger`.
    pub style: String,
}

pub struct CreatePanelParams {
    pub guild_id: u64,
    pub channel_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub color: i32,
    pub buttons: Vec<PanelButtonParams>,
    pub now: DateTime<Utc>,
}

pub struct PanelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PanelRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a panel with its buttons. `message_id` stays null until the
    /// Discord message is posted.
    pub async fn create(
        &self,
        params: CreatePanelParams,
    ) -> Result<entity::panel::Model, DbErr> {
        let panel = entity::panel::ActiveModel {
            guild_id: ActiveValue::Set(params.guild_id.to_string()),
            channel_id: ActiveValue::Set(params.channel_id.to_string()),
            message_id: ActiveValue::Set(None),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            color: ActiveValue::Set(params.color),
            created_at: ActiveValue::Set(params.now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (position, button) in params.buttons.into_iter().enumerate() {
            entity::panel_button::ActiveModel {
                panel_id: ActiveValue::Set(panel.id),
                ticket_type_id: ActiveValue::Set(button.ticket_type_id),
                label: ActiveValue::Set(button.label),
                emoji: ActiveValue::Set(button.emoji),
                style: ActiveValue::Set(button.style),
                position: ActiveValue::Set(position as i32),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(panel)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::panel::Model>, DbErr> {
        entity::prelude::Panel::find_by_id(id).one(self.db).await
    }

    pub async fn list_by_guild(&self, guild_id: u64) -> Result<Vec<entity::panel::Model>, DbErr> {
        entity::prelude::Panel::find()
            .filter(entity::panel::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::panel::Column::Id)
            .all(self.db)
            .await
    }

    /// Buttons for a panel, in display order.
    pub async fn buttons(&self, panel_id: i32) -> Result<Vec<entity::panel_button::Model>, DbErr> {
        entity::prelude::PanelButton::find()
            .filter(entity::panel_button::Column::PanelId.eq(panel_id))
            .order_by_asc(entity::panel_button::Column::Position)
            .all(self.db)
            .await
    }

    /// Records the Discord message id after the panel has been posted.
    pub async fn set_message_id(
        &self,
        panel_id: i32,
        message_id: u64,
    ) -> Result<entity::panel::Model, DbErr> {
        let panel = self.find_by_id(panel_id).await?.ok_or(DbErr::RecordNotFound(
            format!("Panel {} not found", panel_id),
        ))?;

        let mut active: entity::panel::ActiveModel = panel.into();
        active.message_id = ActiveValue::Set(Some(message_id.to_string()));
        active.update(self.db).await
    }

    /// Deletes a panel row; buttons cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Panel::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }
}
