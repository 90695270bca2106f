use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct TicketConfigDto {
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
    pub staff_roles: Vec<StaffRoleDto>,
    /// Free-form tag catalog, maintained as staff tag tickets.
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct StaffRoleDto {
    #[serde(
        serialize_with = "super::api::serialize_u64_as_string",
        deserialize_with = "super::api::deserialize_u64_from_string"
    )]
    pub role_id: u64,
    pub can_view: bool,
    pub can_assign: bool,
    pub can_close: bool,
    pub can_delete: bool,
    pub can_reopen: bool,
    pub can_manage_panels: bool,
}

/// Full-replace update payload for a guild's ticket configuration.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UpdateTicketConfigDto {
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
    pub staff_roles: Vec<StaffRoleDto>,
}
