use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PanelDto {
    pub id: i32,
    #[serde(
        serialize_with = "super::api::serialize_u64_as_string",
        deserialize_with = "super::api::deserialize_u64_from_string"
    )]
    pub channel_id: u64,
    pub message_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub color: i32,
    pub buttons: Vec<PanelButtonDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PanelButtonDto {
    pub ticket_type: String,
    pub label: String,
    pub emoji: Option<String>,
    pub style: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreatePanelDto {
    #[serde(
        serialize_with = "super::api::serialize_u64_as_string",
        deserialize_with = "super::api::deserialize_u64_from_string"
    )]
    pub channel_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub color: i32,
    pub buttons: Vec<PanelButtonDto>,
}
