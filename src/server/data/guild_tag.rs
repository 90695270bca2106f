use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Repository for the per-guild free-form tag catalog.
pub struct GuildTagRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildTagRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_by_guild(&self, guild_id: u64) -> Result<Vec<String>, DbErr> {
        Ok(entity::prelude::GuildTag::find()
            .filter(entity::guild_tag::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::guild_tag::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect())
    }

    /// Adds a tag to the catalog; re-adding is a no-op.
    pub async fn add(&self, guild_id: u64, name: &str) -> Result<(), DbErr> {
        let existing = entity::prelude::GuildTag::find()
            .filter(entity::guild_tag::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_tag::Column::Name.eq(name))
            .one(self.db)
            .await?;

        if existing.is_some() {
            return Ok(());
        }

        entity::guild_tag::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn remove(&self, guild_id: u64, name: &str) -> Result<(), DbErr> {
        entity::prelude::GuildTag::delete_many()
            .filter(entity::guild_tag::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_tag::Column::Name.eq(name))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
