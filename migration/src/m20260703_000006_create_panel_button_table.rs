use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260702_000003_create_ticket_type_table::TicketType,
    m20260703_000005_create_panel_table::Panel,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PanelButton::Table)
                    .if_not_exists()
                    .col(pk_auto(PanelButton::Id))
                    .col(integer(PanelButton::PanelId))
                    .col(integer(PanelButton::TicketTypeId))
                    .col(string(PanelButton::Label))
                    .col(string_null(PanelButton::Emoji))
                    .col(string(PanelButton::Style))
                    .col(integer(PanelButton::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_panel_button_panel_id")
                            .from(PanelButton::Table, PanelButton::PanelId)
                            .to(Panel::Table, Panel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_panel_button_ticket_type_id")
                            .from(PanelButton::Table, PanelButton::TicketTypeId)
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
            .drop_table(Table::drop().table(PanelButton::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PanelButton {
    Table,
    Id,
    PanelId,
    TicketTypeId,
    Label,
    Emoji,
    Style,
    Position,
}
