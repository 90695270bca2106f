use url::Url;

/// Validates a URL for use in embeds and templates.
///
/// Accepts only absolute `http`/`https` URLs whose host contains a dot.
/// Everything else (protocol-less strings, empty input, dotless hosts like
/// `https://localhost`) is rejected; Discord drops embeds carrying image or
/// icon URLs it cannot resolve publicly.
///
/// # Arguments
/// - `value` - Candidate URL string
///
/// # Returns
/// - `true` - The string is an absolute http(s) URL with a dotted host
/// - `false` - Anything else
pub fn is_valid_url(value: &str) -> bool {
    let Ok(parsed) = Url::parse(value) else {
        return false;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    match parsed.host_str() {
        Some(host) => host.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_http_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?query=1"));
        assert!(is_valid_url("https://cdn.discordapp.com/avatars/1/a.png"));
    }

    #[test]
    fn rejects_protocol_less_strings() {
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("www.example.com/image.png"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(!is_valid_url(""));
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("javascript:alert(1)"));
    }

    #[test]
    fn rejects_dotless_hosts() {
        assert!(!is_valid_url("https://localhost"));
        assert!(!is_valid_url("http://internal"));
    }
}
