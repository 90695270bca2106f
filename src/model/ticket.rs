use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct TicketDto {
    pub id: i32,
    pub ticket_id: i32,
    #[serde(
        serialize_with = "super::api::serialize_u64_as_string",
        deserialize_with = "super::api::deserialize_u64_from_string"
    )]
    pub user_id: u64,
    #[serde(
        serialize_with = "super::api::serialize_u64_as_string",
        deserialize_with = "super::api::deserialize_u64_from_string"
    )]
    pub channel_id: u64,
    pub ticket_type: String,
    pub reason: Option<String>,
    pub status: String,
    pub assignee_id: Option<String>,
    pub priority: String,
    pub closed_by: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub closed_at: Option<DateTime<Utc>>,
    pub deleted: bool,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub last_activity_at: DateTime<Utc>,
}

/// Ticket detail including tags and the full reopen history.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct TicketDetailDto {
    #[serde(flatten)]
    pub ticket: TicketDto,
    pub tags: Vec<String>,
    pub reopens: Vec<TicketReopenDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct TicketReopenDto {
    #[serde(
        serialize_with = "super::api::serialize_u64_as_string",
        deserialize_with = "super::api::deserialize_u64_from_string"
    )]
    pub user_id: u64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub reopened_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedTicketsDto {
    pub tickets: Vec<TicketDto>,
    pub total: u64,
    pub page: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AssignTicketDto {
    /// Discord user id of the assignee; null clears the assignment.
    pub assignee_id: Option<String>,
}
