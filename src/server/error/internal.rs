use thiserror::Error;

/// Invariant violations in internal plumbing.
///
/// These indicate data that should never have been stored or produced (a
/// snowflake column that doesn't parse, a timestamp Discord rejects), not
/// user mistakes; they always surface as 500s.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored snowflake failed to parse as u64.
    #[error("Failed to parse '{value}' as a Discord id")]
    ParseStringId {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A chrono timestamp was rejected by Discord's timestamp type.
    #[error("Invalid Discord timestamp {timestamp}: {reason}")]
    InvalidDiscordTimestamp { timestamp: i64, reason: String },

    /// Token minting/verification failed for a non-credential reason.
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
