use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmbedTemplate::Table)
                    .if_not_exists()
                    .col(pk_auto(EmbedTemplate::Id))
                    .col(string(EmbedTemplate::GuildId))
                    .col(string(EmbedTemplate::Name))
                    .col(text_null(EmbedTemplate::MessageContent))
                    .col(string_null(EmbedTemplate::Title))
                    .col(text_null(EmbedTemplate::Description))
                    .col(integer_null(EmbedTemplate::Color))
                    .col(string_null(EmbedTemplate::AuthorName))
                    .col(string_null(EmbedTemplate::AuthorIconUrl))
                    .col(string_null(EmbedTemplate::FooterText))
                    .col(string_null(EmbedTemplate::FooterIconUrl))
                    .col(string_null(EmbedTemplate::ImageUrl))
                    .col(string_null(EmbedTemplate::ThumbnailUrl))
                    .col(integer(EmbedTemplate::Uses).default(0))
                    .col(
                        timestamp(EmbedTemplate::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(EmbedTemplate::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_embed_template_guild_name")
                    .table(EmbedTemplate::Table)
                    .col(EmbedTemplate::GuildId)
                    .col(EmbedTemplate::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmbedTemplate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmbedTemplate {
    Table,
    Id,
    GuildId,
    Name,
    MessageContent,
    Title,
    Description,
    Color,
    AuthorName,
    AuthorIconUrl,
    FooterText,
    FooterIconUrl,
    ImageUrl,
    ThumbnailUrl,
    Uses,
    CreatedAt,
    UpdatedAt,
}
