use sea_orm_migration::{prelude::*, schema::*};

use super::m20260706_000011_create_embed_template_table::EmbedTemplate;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmbedTemplateField::Table)
                    .if_not_exists()
                    .col(pk_auto(EmbedTemplateField::Id))
                    .col(integer(EmbedTemplateField::TemplateId))
                    .col(string(EmbedTemplateField::Name))
                    .col(text(EmbedTemplateField::Value))
                    .col(boolean(EmbedTemplateField::Inline))
                    .col(integer(EmbedTemplateField::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_embed_template_field_template_id")
                            .from(EmbedTemplateField::Table, EmbedTemplateField::TemplateId)
                            .to(EmbedTemplate::Table, EmbedTemplate::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmbedTemplateField::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmbedTemplateField {
    Table,
    Id,
    TemplateId,
    Name,
    Value,
    Inline,
    Position,
}
