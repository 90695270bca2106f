use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::config::{NamingPattern, TranscriptFormat};

/// Defaults applied when a guild has never been configured.
pub const DEFAULT_RATE_LIMIT_MAX: i32 = 3;
pub const DEFAULT_RATE_LIMIT_WINDOW_MINUTES: i32 = 60;
pub const DEFAULT_AUTO_CLOSE_HOURS: i32 = 72;
pub const DEFAULT_TRANSCRIPT_RETENTION_DAYS: i32 = 30;

/// Full set of configurable policy for one guild; used for upserts.
pub struct TicketConfigParams {
    pub open_category_id: Option<u64>,
    pub closed_category_id: Option<u64>,
    pub log_channel_id: Option<u64>,
    pub archive_channel_id: Option<u64>,
    pub naming_pattern: NamingPattern,
    pub rate_limit_max: i32,
    pub rate_limit_window_minutes: i32,
    pub auto_close_enabled: bool,
    pub auto_close_hours: i32,
    pub transcript_format: TranscriptFormat,
    pub transcript_retention_days: i32,
}

impl Default for TicketConfigParams {
    fn default() -> Self {
        Self {
            open_category_id: None,
            closed_category_id: None,
            log_channel_id: None,
            archive_channel_id: None,
            naming_pattern: NamingPattern::default(),
            rate_limit_max: DEFAULT_RATE_LIMIT_MAX,
            rate_limit_window_minutes: DEFAULT_RATE_LIMIT_WINDOW_MINUTES,
            auto_close_enabled: false,
            auto_close_hours: DEFAULT_AUTO_CLOSE_HOURS,
            transcript_format: TranscriptFormat::default(),
            transcript_retention_days: DEFAULT_TRANSCRIPT_RETENTION_DAYS,
        }
    }
}

/// Repository for the per-guild ticket configuration singleton.
pub struct TicketConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_guild_id(
        &self,
        guild_id: u64,
    ) -> Result<Option<entity::ticket_config::Model>, DbErr> {
        entity::prelude::TicketConfig::find()
            .filter(entity::ticket_config::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await
    }

    /// Creates or replaces the guild's configuration.
    ///
    /// The unique index on `guild_id` keeps this a singleton; an existing
    /// row is updated in place so its id and created_at survive.
    pub async fn upsert(
        &self,
        guild_id: u64,
        params: TicketConfigParams,
        now: DateTime<Utc>,
    ) -> Result<entity::ticket_config::Model, DbErr> {
        match self.find_by_guild_id(guild_id).await? {
            Some(model) => {
                let mut active: entity::ticket_config::ActiveModel = model.into();
                Self::apply(&mut active, params);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await
            }
            None => {
                let mut active = entity::ticket_config::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                };
                Self::apply(&mut active, params);
                active.insert(self.db).await
            }
        }
    }

    /// All guild configurations with auto-close enabled, for the hourly
    /// sweep.
    pub async fn all_with_auto_close(&self) -> Result<Vec<entity::ticket_config::Model>, DbErr> {
        entity::prelude::TicketConfig::find()
            .filter(entity::ticket_config::Column::AutoCloseEnabled.eq(true))
            .all(self.db)
            .await
    }

    fn apply(active: &mut entity::ticket_config::ActiveModel, params: TicketConfigParams) {
        active.open_category_id =
            ActiveValue::Set(params.open_category_id.map(|id| id.to_string()));
        active.closed_category_id =
            ActiveValue::Set(params.closed_category_id.map(|id| id.to_string()));
        active.log_channel_id = ActiveValue::Set(params.log_channel_id.map(|id| id.to_string()));
        active.archive_channel_id =
            ActiveValue::Set(params.archive_channel_id.map(|id| id.to_string()));
        active.naming_pattern = ActiveValue::Set(params.naming_pattern.as_str().to_string());
        active.rate_limit_max = ActiveValue::Set(params.rate_limit_max);
        active.rate_limit_window_minutes = ActiveValue::Set(params.rate_limit_window_minutes);
        active.auto_close_enabled = ActiveValue::Set(params.auto_close_enabled);
        active.auto_close_hours = ActiveValue::Set(params.auto_close_hours);
        active.transcript_format = ActiveValue::Set(params.transcript_format.as_str().to_string());
        active.transcript_retention_days = ActiveValue::Set(params.transcript_retention_days);
    }
}
