use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildTag::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildTag::Id))
                    .col(string(GuildTag::GuildId))
                    .col(string(GuildTag::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guild_tag_guild_name")
                    .table(GuildTag::Table)
                    .col(GuildTag::GuildId)
                    .col(GuildTag::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildTag {
    Table,
    Id,
    GuildId,
    Name,
}
