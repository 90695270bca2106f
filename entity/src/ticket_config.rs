use sea_orm::entity::prelude::*;

/// Per-guild ticket policy. One row per guild.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket_config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guild_id: String,
    pub open_category_id: Option<String>,
    pub closed_category_id: Option<String>,
    pub log_channel_id: Option<String>,
    pub archive_channel_id: Option<String>,
    pub naming_pattern: String,
    pub rate_limit_max: i32,
    pub rate_limit_window_minutes: i32,
    pub auto_close_enabled: bool,
    pub auto_close_hours: i32,
    pub transcript_format: String,
    pub transcript_retention_days: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
