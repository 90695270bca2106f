use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login request carrying a Discord OAuth2 access token obtained by the
/// dashboard. The server validates it against Discord before minting a JWT.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct LoginDto {
    pub access_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TokenDto {
    pub token: String,
    /// Unix timestamp at which the token expires.
    pub expires_at: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, ToSchema)]
pub struct UserDto {
    #[serde(
        serialize_with = "super::api::serialize_u64_as_string",
        deserialize_with = "super::api::deserialize_u64_from_string"
    )]
    pub id: u64,
    pub username: String,
}
