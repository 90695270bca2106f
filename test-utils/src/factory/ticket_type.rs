use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating registered ticket types with modal fields.
pub struct TicketTypeFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    name: String,
    modal_title: String,
    /// (label, required) pairs inserted as short text fields in order.
    fields: Vec<(String, bool)>,
}

impl<'a> TicketTypeFactory<'a> {
    /// Defaults: name `"support"`, one required "What do you need help
    /// with?" question.
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            name: "support".to_string(),
            modal_title: "Open a ticket".to_string(),
            fields: vec![("What do you need help with?".to_string(), true)],
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn modal_title(mut self, modal_title: impl Into<String>) -> Self {
        self.modal_title = modal_title.into();
        self
    }

    pub fn fields(mut self, fields: Vec<(String, bool)>) -> Self {
        self.fields = fields;
        self
    }

    pub async fn build(self) -> Result<entity::ticket_type::Model, DbErr> {
        let ticket_type = entity::ticket_type::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            name: ActiveValue::Set(self.name),
            modal_title: ActiveValue::Set(self.modal_title),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (position, (label, required)) in self.fields.into_iter().enumerate() {
            entity::modal_field::ActiveModel {
                ticket_type_id: ActiveValue::Set(ticket_type.id),
                label: ActiveValue::Set(label),
                placeholder: ActiveValue::Set(None),
                required: ActiveValue::Set(required),
                style: ActiveValue::Set("short".to_string()),
                position: ActiveValue::Set(position as i32),
                max_length: ActiveValue::Set(None),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(ticket_type)
    }
}

/// Creates a ticket type named `support` with one default question.
pub async fn create_ticket_type(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::ticket_type::Model, DbErr> {
    TicketTypeFactory::new(db, guild_id).build().await
}
