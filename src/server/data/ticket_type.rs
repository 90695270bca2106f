use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// One modal question definition, used when registering a ticket type.
pub struct ModalFieldParams {
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    /// `short` or `paragraph`.
    pub style: String,
    pub max_length: Option<i32>,
}

/// Repository for registered ticket types and their modal schemas.
///
/// Ticket types are first-class: panel buttons reference them by id and a
/// type must exist before any button can offer it.
pub struct TicketTypeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketTypeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a ticket type with its ordered modal fields.
    ///
    /// # Returns
    /// - `Ok(Model)`: The registered type
    /// - `Err(DbErr)`: Database error, including the unique-name violation
    pub async fn create(
        &self,
        guild_id: u64,
        name: &str,
        modal_title: &str,
        fields: Vec<ModalFieldParams>,
    ) -> Result<entity::ticket_type::Model, DbErr> {
        let ticket_type = entity::ticket_type::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            modal_title: ActiveValue::Set(modal_title.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (position, field) in fields.into_iter().enumerate() {
            entity::modal_field::ActiveModel {
                ticket_type_id: ActiveValue::Set(ticket_type.id),
                label: ActiveValue::Set(field.label),
                placeholder: ActiveValue::Set(field.placeholder),
                required: ActiveValue::Set(field.required),
                style: ActiveValue::Set(field.style),
                position: ActiveValue::Set(position as i32),
                max_length: ActiveValue::Set(field.max_length),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(ticket_type)
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::ticket_type::Model>, DbErr> {
        entity::prelude::TicketType::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_name(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<entity::ticket_type::Model>, DbErr> {
        entity::prelude::TicketType::find()
            .filter(entity::ticket_type::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket_type::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    pub async fn list_by_guild(
        &self,
        guild_id: u64,
    ) -> Result<Vec<entity::ticket_type::Model>, DbErr> {
        entity::prelude::TicketType::find()
            .filter(entity::ticket_type::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::ticket_type::Column::Name)
            .all(self.db)
            .await
    }

    /// Modal fields for a type, in display order.
    pub async fn fields(&self, ticket_type_id: i32) -> Result<Vec<entity::modal_field::Model>, DbErr> {
        entity::prelude::ModalField::find()
            .filter(entity::modal_field::Column::TicketTypeId.eq(ticket_type_id))
            .order_by_asc(entity::modal_field::Column::Position)
            .all(self.db)
            .await
    }

    /// Deletes a ticket type; its modal fields and panel buttons cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::TicketType::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
