use sea_orm_migration::{prelude::*, schema::*};

use super::m20260704_000007_create_ticket_table::Ticket;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketTag::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketTag::Id))
                    .col(integer(TicketTag::TicketId))
                    .col(string(TicketTag::Tag))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_tag_ticket_id")
                            .from(TicketTag::Table, TicketTag::TicketId)
                            .to(Ticket::Table, Ticket::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_tag_ticket_tag")
                    .table(TicketTag::Table)
                    .col(TicketTag::TicketId)
                    .col(TicketTag::Tag)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketTag {
    Table,
    Id,
    TicketId,
    Tag,
}
