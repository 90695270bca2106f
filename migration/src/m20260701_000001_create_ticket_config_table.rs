use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketConfig::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketConfig::Id))
                    .col(string_uniq(TicketConfig::GuildId))
                    .col(string_null(TicketConfig::OpenCategoryId))
                    .col(string_null(TicketConfig::ClosedCategoryId))
                    .col(string_null(TicketConfig::LogChannelId))
                    .col(string_null(TicketConfig::ArchiveChannelId))
                    .col(string(TicketConfig::NamingPattern))
                    .col(integer(TicketConfig::RateLimitMax))
                    .col(integer(TicketConfig::RateLimitWindowMinutes))
                    .col(boolean(TicketConfig::AutoCloseEnabled))
                    .col(integer(TicketConfig::AutoCloseHours))
                    .col(string(TicketConfig::TranscriptFormat))
                    .col(integer(TicketConfig::TranscriptRetentionDays))
                    .col(
                        timestamp(TicketConfig::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(TicketConfig::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketConfig {
    Table,
    Id,
    GuildId,
    OpenCategoryId,
    ClosedCategoryId,
    LogChannelId,
    ArchiveChannelId,
    NamingPattern,
    RateLimitMax,
    RateLimitWindowMinutes,
    AutoCloseEnabled,
    AutoCloseHours,
    TranscriptFormat,
    TranscriptRetentionDays,
    CreatedAt,
    UpdatedAt,
}
