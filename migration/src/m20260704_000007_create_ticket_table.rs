use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string(Ticket::GuildId))
                    .col(integer(Ticket::TicketId))
                    .col(string(Ticket::UserId))
                    .col(string_uniq(Ticket::ChannelId))
                    .col(string(Ticket::TicketType))
                    .col(text_null(Ticket::Reason))
                    .col(string(Ticket::Status))
                    .col(string_null(Ticket::AssigneeId))
                    .col(string(Ticket::Priority))
                    .col(string_null(Ticket::ClosedBy))
                    .col(timestamp_null(Ticket::ClosedAt))
                    .col(boolean(Ticket::Deleted))
                    .col(
                        timestamp(Ticket::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Ticket::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Ticket::LastActivityAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_guild_ticket_id")
                    .table(Ticket::Table)
                    .col(Ticket::GuildId)
                    .col(Ticket::TicketId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    GuildId,
    TicketId,
    UserId,
    ChannelId,
    TicketType,
    Reason,
    Status,
    AssigneeId,
    Priority,
    ClosedBy,
    ClosedAt,
    Deleted,
    CreatedAt,
    UpdatedAt,
    LastActivityAt,
}
