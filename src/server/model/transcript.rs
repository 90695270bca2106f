use chrono::{DateTime, Utc};
use serde::Serialize;

/// Projection of one Discord message for transcript rendering.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TranscriptMessage {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Attachment URLs, in upload order.
    pub attachments: Vec<String>,
    /// Embeds are not reproduced, only counted.
    pub embed_count: usize,
}
