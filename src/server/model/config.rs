/// How ticket channels are named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NamingPattern {
    /// `ticket-0042`
    #[default]
    Number,
    /// `{username}-0042`
    Username,
    /// `{ticket_type}-0042`
    Type,
}

impl NamingPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Username => "username",
            Self::Type => "type",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "number" => Some(Self::Number),
            "username" => Some(Self::Username),
            "type" => Some(Self::Type),
            _ => None,
        }
    }

    /// Formats a channel name for a ticket.
    ///
    /// Discord channel names must be lowercase with no spaces; the username
    /// and type are sanitized accordingly. Closed tickets get a `closed-`
    /// prefix so staff can scan the channel list.
    pub fn channel_name(
        &self,
        ticket_id: i32,
        username: &str,
        ticket_type: &str,
        closed: bool,
    ) -> String {
        let stem = match self {
            Self::Number => format!("ticket-{:04}", ticket_id),
            Self::Username => format!("{}-{:04}", sanitize(username), ticket_id),
            Self::Type => format!("{}-{:04}", sanitize(ticket_type), ticket_id),
        };

        if closed {
            format!("closed-{}", stem)
        } else {
            stem
        }
    }
}

/// Transcript output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TranscriptFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl TranscriptFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "html" => Some(Self::Html),
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

fn sanitize(value: &str) -> String {
    let cleaned: String = value
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();

    let trimmed = cleaned.trim_matches('-');
    if trimmed.is_empty() {
        "ticket".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_pattern_pads_ticket_id() {
        assert_eq!(
            NamingPattern::Number.channel_name(42, "Somebody", "support", false),
            "ticket-0042"
        );
    }

    #[test]
    fn username_pattern_sanitizes() {
        assert_eq!(
            NamingPattern::Username.channel_name(7, "Some User!", "support", false),
            "some-user-0007"
        );
    }

    #[test]
    fn closed_prefix_is_applied() {
        assert_eq!(
            NamingPattern::Type.channel_name(3, "user", "Bug Report", true),
            "closed-bug-report-0003"
        );
    }

    #[test]
    fn empty_username_falls_back() {
        assert_eq!(
            NamingPattern::Username.channel_name(1, "!!!", "support", false),
            "ticket-0001"
        );
    }

    #[test]
    fn formats_round_trip() {
        for pattern in [
            NamingPattern::Number,
            NamingPattern::Username,
            NamingPattern::Type,
        ] {
            assert_eq!(NamingPattern::parse(pattern.as_str()), Some(pattern));
        }
        for format in [
            TranscriptFormat::Html,
            TranscriptFormat::Text,
            TranscriptFormat::Json,
        ] {
            assert_eq!(TranscriptFormat::parse(format.as_str()), Some(format));
        }
    }
}
