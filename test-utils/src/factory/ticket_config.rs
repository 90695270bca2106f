use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test ticket configurations.
pub struct TicketConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    open_category_id: Option<u64>,
    closed_category_id: Option<u64>,
    log_channel_id: Option<u64>,
    rate_limit_max: i32,
    rate_limit_window_minutes: i32,
    auto_close_enabled: bool,
    auto_close_hours: i32,
    transcript_format: String,
}

impl<'a> TicketConfigFactory<'a> {
    /// Defaults: no channel routing, rate limit 3 per 60 minutes,
    /// auto-close disabled at 72 hours, html transcripts.
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            open_category_id: None,
            closed_category_id: None,
            log_channel_id: None,
            rate_limit_max: 3,
            rate_limit_window_minutes: 60,
            auto_close_enabled: false,
            auto_close_hours: 72,
            transcript_format: "html".to_string(),
        }
    }

    pub fn open_category_id(mut self, id: u64) -> Self {
        self.open_category_id = Some(id);
        self
    }

    pub fn closed_category_id(mut self, id: u64) -> Self {
        self.closed_category_id = Some(id);
        self
    }

    pub fn log_channel_id(mut self, id: u64) -> Self {
        self.log_channel_id = Some(id);
        self
    }

    pub fn rate_limit(mut self, max: i32, window_minutes: i32) -> Self {
        self.rate_limit_max = max;
        self.rate_limit_window_minutes = window_minutes;
        self
    }

    pub fn auto_close(mut self, enabled: bool, hours: i32) -> Self {
        self.auto_close_enabled = enabled;
        self.auto_close_hours = hours;
        self
    }

    pub fn transcript_format(mut self, format: impl Into<String>) -> Self {
        self.transcript_format = format.into();
        self
    }

    pub async fn build(self) -> Result<entity::ticket_config::Model, DbErr> {
        let now = Utc::now();
        entity::ticket_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            open_category_id: ActiveValue::Set(self.open_category_id.map(|id| id.to_string())),
            closed_category_id: ActiveValue::Set(self.closed_category_id.map(|id| id.to_string())),
            log_channel_id: ActiveValue::Set(self.log_channel_id.map(|id| id.to_string())),
            archive_channel_id: ActiveValue::Set(None),
            naming_pattern: ActiveValue::Set("number".to_string()),
            rate_limit_max: ActiveValue::Set(self.rate_limit_max),
            rate_limit_window_minutes: ActiveValue::Set(self.rate_limit_window_minutes),
            auto_close_enabled: ActiveValue::Set(self.auto_close_enabled),
            auto_close_hours: ActiveValue::Set(self.auto_close_hours),
            transcript_format: ActiveValue::Set(self.transcript_format),
            transcript_retention_days: ActiveValue::Set(30),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a ticket configuration with default values.
pub async fn create_config(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::ticket_config::Model, DbErr> {
    TicketConfigFactory::new(db, guild_id).build().await
}
