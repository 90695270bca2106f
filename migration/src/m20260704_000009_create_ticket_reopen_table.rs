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
                    .table(TicketReopen::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketReopen::Id))
                    .col(integer(TicketReopen::TicketId))
                    .col(string(TicketReopen::UserId))
                    .col(timestamp(TicketReopen::ReopenedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_reopen_ticket_id")
                            .from(TicketReopen::Table, TicketReopen::TicketId)
                            .to(Ticket::Table, Ticket::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketReopen::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketReopen {
    Table,
    Id,
    TicketId,
    UserId,
    ReopenedAt,
}
