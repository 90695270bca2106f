//! Transcript generation: paginated history fetch plus three renderers.
//!
//! Rendering is pure formatting over a chronological message list; the only
//! I/O is the history fetch itself.

use serenity::all::{ChannelId, MessageId};
use serenity::http::{Http, MessagePagination};
use std::sync::Arc;

use chrono::DateTime;

use crate::server::{
    error::AppError,
    model::{config::TranscriptFormat, transcript::TranscriptMessage},
};

const FETCH_BATCH_SIZE: u8 = 100;

pub struct TranscriptGenerator {
    http: Arc<Http>,
}

impl TranscriptGenerator {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Fetches the complete history of a channel in chronological order.
    ///
    /// Pages backwards in batches of 100 using the oldest fetched message as
    /// the cursor, then reverses the whole list (Discord returns newest
    /// first).
    pub async fn fetch_messages(
        &self,
        channel_id: u64,
    ) -> Result<Vec<TranscriptMessage>, AppError> {
        let channel = ChannelId::new(channel_id);
        let mut collected: Vec<TranscriptMessage> = Vec::new();
        let mut cursor: Option<MessageId> = None;

        loop {
            let batch = self
                .http
                .get_messages(
                    channel,
                    cursor.map(MessagePagination::Before),
                    Some(FETCH_BATCH_SIZE),
                )
                .await?;

            if batch.is_empty() {
                break;
            }

            cursor = batch.last().map(|m| m.id);
            let batch_len = batch.len();

            collected.extend(batch.into_iter().map(|m| TranscriptMessage {
                id: m.id.get().to_string(),
                author_id: m.author.id.get().to_string(),
                author_name: m.author.name.clone(),
                content: m.content.clone(),
                timestamp: DateTime::from_timestamp(m.timestamp.unix_timestamp(), 0)
                    .unwrap_or_default(),
                attachments: m.attachments.iter().map(|a| a.url.clone()).collect(),
                embed_count: m.embeds.len(),
            }));

            if batch_len < FETCH_BATCH_SIZE as usize {
                break;
            }
        }

        collected.reverse();
        Ok(collected)
    }

    /// Fetches the channel history and renders it in the requested format.
    ///
    /// # Returns
    /// - `Ok((filename, contents))` - Rendered transcript and its filename
    pub async fn generate(
        &self,
        ticket: &entity::ticket::Model,
        format: TranscriptFormat,
    ) -> Result<(String, String), AppError> {
        let channel_id = crate::server::util::parse::parse_u64_from_string(
            ticket.channel_id.clone(),
        )?;
        let messages = self.fetch_messages(channel_id).await?;

        let filename = format!(
            "ticket-{}-transcript.{}",
            ticket.ticket_id,
            format.file_extension()
        );

        Ok((filename, render(format, ticket, &messages)))
    }
}

/// Renders a transcript in the requested format.
pub fn render(
    format: TranscriptFormat,
    ticket: &entity::ticket::Model,
    messages: &[TranscriptMessage],
) -> String {
    match format {
        TranscriptFormat::Html => render_html(ticket, messages),
        TranscriptFormat::Text => render_text(ticket, messages),
        TranscriptFormat::Json => render_json(ticket, messages),
    }
}

fn render_html(ticket: &entity::ticket::Model, messages: &[TranscriptMessage]) -> String {
    let mut body = String::new();

    for message in messages {
        let mut attachments = String::new();
        for url in &message.attachments {
            attachments.push_str(&format!(
                "<div class=\"attachment\"><a href=\"{}\">{}</a></div>",
                escape_html(url),
                escape_html(url)
            ));
        }

        body.push_str(&format!(
            "<div class=\"message\"><span class=\"author\">{}</span>\
             <span class=\"timestamp\">{}</span>\
             <div class=\"content\">{}</div>{}</div>\n",
            escape_html(&message.author_name),
            message.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            escape_html(&message.content),
            attachments
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Ticket #{id} transcript</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; background: #313338; color: #dbdee1; margin: 2em; }}\n\
         .header {{ border-bottom: 1px solid #4e5058; padding-bottom: 1em; }}\n\
         .message {{ margin: 1em 0; }}\n\
         .author {{ font-weight: bold; margin-right: 0.5em; }}\n\
         .timestamp {{ color: #949ba4; font-size: 0.8em; }}\n\
         .attachment {{ font-size: 0.9em; }}\n\
         </style>\n</head>\n<body>\n\
         <div class=\"header\"><h1>Ticket #{id}</h1>\
         <p>Type: {ticket_type} | Status: {status} | Opened by {user}</p></div>\n\
         {body}</body>\n</html>\n",
        id = ticket.ticket_id,
        ticket_type = escape_html(&ticket.ticket_type),
        status = escape_html(&ticket.status),
        user = escape_html(&ticket.user_id),
        body = body
    )
}

fn render_text(ticket: &entity::ticket::Model, messages: &[TranscriptMessage]) -> String {
    let mut out = format!(
        "Ticket #{} | type: {} | status: {} | opened by {}\n{}\n",
        ticket.ticket_id,
        ticket.ticket_type,
        ticket.status,
        ticket.user_id,
        "-".repeat(60)
    );

    for message in messages {
        out.push_str(&format!(
            "[{}] {}: {}\n",
            message.timestamp.format("%Y-%m-%d %H:%M:%S"),
            message.author_name,
            message.content
        ));
        for url in &message.attachments {
            out.push_str(&format!("    attachment: {}\n", url));
        }
    }

    out
}

fn render_json(ticket: &entity::ticket::Model, messages: &[TranscriptMessage]) -> String {
    serde_json::json!({
        "ticket_id": ticket.ticket_id,
        "guild_id": ticket.guild_id,
        "user_id": ticket.user_id,
        "channel_id": ticket.channel_id,
        "ticket_type": ticket.ticket_type,
        "reason": ticket.reason,
        "status": ticket.status,
        "priority": ticket.priority,
        "created_at": ticket.created_at.timestamp(),
        "closed_at": ticket.closed_at.map(|t| t.timestamp()),
        "messages": messages,
    })
    .to_string()
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ticket() -> entity::ticket::Model {
        entity::ticket::Model {
            id: 1,
            guild_id: "100".to_string(),
            ticket_id: 42,
            user_id: "555".to_string(),
            channel_id: "9001".to_string(),
            ticket_type: "support".to_string(),
            reason: Some("help".to_string()),
            status: "closed".to_string(),
            assignee_id: None,
            priority: "normal".to_string(),
            closed_by: Some("777".to_string()),
            closed_at: Some(Utc.with_ymd_and_hms(2026, 7, 2, 10, 0, 0).unwrap()),
            deleted: false,
            created_at: Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 7, 2, 10, 0, 0).unwrap(),
            last_activity_at: Utc.with_ymd_and_hms(2026, 7, 2, 10, 0, 0).unwrap(),
        }
    }

    fn messages() -> Vec<TranscriptMessage> {
        (0..3)
            .map(|i| TranscriptMessage {
                id: format!("{}", 1000 + i),
                author_id: "555".to_string(),
                author_name: "somebody".to_string(),
                content: format!("message {}", i),
                timestamp: Utc.with_ymd_and_hms(2026, 7, 1, 9, i, 0).unwrap(),
                attachments: vec![],
                embed_count: 0,
            })
            .collect()
    }

    #[test]
    fn json_round_trips_ticket_fields_and_message_order() {
        let rendered = render_json(&ticket(), &messages());
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["ticket_id"], 42);
        assert_eq!(value["status"], "closed");

        let ids: Vec<&str> = value["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1000", "1001", "1002"]);
    }

    #[test]
    fn text_renders_one_line_per_message_in_order() {
        let rendered = render_text(&ticket(), &messages());
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].contains("Ticket #42"));
        assert!(lines[2].ends_with("message 0"));
        assert!(lines[4].ends_with("message 2"));
    }

    #[test]
    fn html_escapes_message_content() {
        let mut msgs = messages();
        msgs[0].content = "<script>alert(1)</script>".to_string();

        let rendered = render_html(&ticket(), &msgs);

        assert!(!rendered.contains("<script>alert(1)</script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn html_includes_ticket_header() {
        let rendered = render_html(&ticket(), &[]);

        assert!(rendered.contains("Ticket #42"));
        assert!(rendered.contains("support"));
    }
}
