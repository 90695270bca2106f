use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketType::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketType::Id))
                    .col(string(TicketType::GuildId))
                    .col(string(TicketType::Name))
                    .col(string(TicketType::ModalTitle))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_type_guild_name")
                    .table(TicketType::Table)
                    .col(TicketType::GuildId)
                    .col(TicketType::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketType {
    Table,
    Id,
    GuildId,
    Name,
    ModalTitle,
}
