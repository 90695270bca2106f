pub use sea_orm_migration::prelude::*;

mod m20260701_000001_create_ticket_config_table;
mod m20260701_000002_create_staff_role_table;
mod m20260702_000003_create_ticket_type_table;
mod m20260702_000004_create_modal_field_table;
mod m20260703_000005_create_panel_table;
mod m20260703_000006_create_panel_button_table;
mod m20260704_000007_create_ticket_table;
mod m20260704_000008_create_ticket_tag_table;
mod m20260704_000009_create_ticket_reopen_table;
mod m20260705_000010_create_guild_tag_table;
mod m20260706_000011_create_embed_template_table;
mod m20260706_000012_create_embed_template_field_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260701_000001_create_ticket_config_table::Migration),
            Box::new(m20260701_000002_create_staff_role_table::Migration),
            Box::new(m20260702_000003_create_ticket_type_table::Migration),
            Box::new(m20260702_000004_create_modal_field_table::Migration),
            Box::new(m20260703_000005_create_panel_table::Migration),
            Box::new(m20260703_000006_create_panel_button_table::Migration),
            Box::new(m20260704_000007_create_ticket_table::Migration),
            Box::new(m20260704_000008_create_ticket_tag_table::Migration),
            Box::new(m20260704_000009_create_ticket_reopen_table::Migration),
            Box::new(m20260705_000010_create_guild_tag_table::Migration),
            Box::new(m20260706_000011_create_embed_template_table::Migration),
            Box::new(m20260706_000012_create_embed_template_field_table::Migration),
        ]
    }
}
