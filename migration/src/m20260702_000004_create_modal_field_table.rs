use sea_orm_migration::{prelude::*, schema::*};

use super::m20260702_000003_create_ticket_type_table::TicketType;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModalField::Table)
                    .if_not_exists()
                    .col(pk_auto(ModalField::Id))
                    .col(integer(ModalField::TicketTypeId))
                    .col(string(ModalField::Label))
                    .col(string_null(ModalField::Placeholder))
                    .col(boolean(ModalField::Required))
                    .col(string(ModalField::Style))
                    .col(integer(ModalField::Position))
                    .col(integer_null(ModalField::MaxLength))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_modal_field_ticket_type_id")
                            .from(ModalField::Table, ModalField::TicketTypeId)
                            .to(TicketType::Table, TicketType::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModalField::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ModalField {
    Table,
    Id,
    TicketTypeId,
    Label,
    Placeholder,
    Required,
    Style,
    Position,
    MaxLength,
}
