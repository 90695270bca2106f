use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Panel::Table)
                    .if_not_exists()
                    .col(pk_auto(Panel::Id))
                    .col(string(Panel::GuildId))
                    .col(string(Panel::ChannelId))
                    .col(string_null(Panel::MessageId))
                    .col(string(Panel::Title))
                    .col(text_null(Panel::Description))
                    .col(integer(Panel::Color))
                    .col(
                        timestamp(Panel::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Panel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Panel {
    Table,
    Id,
    GuildId,
    ChannelId,
    MessageId,
    Title,
    Description,
    Color,
    CreatedAt,
}
