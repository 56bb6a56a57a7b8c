//! Syntactic URL check gating the clip metadata fetch.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Scheme, host (domain, `localhost`, dotted-quad IPv4, or bracketed IPv6-like),
/// optional port, optional path/query. Matched case-insensitively.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|",
        r"localhost|",
        r"\d{1,3}(?:\.\d{1,3}){3}|",
        r"\[?[A-F0-9]*:[A-F0-9:]+\]?)",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("URL pattern is valid")
});

/// Whether `url` is a conventional absolute URL. Pure, no network access.
pub fn is_valid_url(url: &str) -> bool {
    URL_RE.is_match(url)
}

/// Like [`is_valid_url`] but tells an empty field apart from a malformed one.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        Err(ValidationError::EmptyUrl)
    } else if is_valid_url(url) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_conventional_urls() {
        for url in [
            "https://example.com/x",
            "http://localhost:8080/a?b=1",
            "https://player.vimeo.com/video/123456/config",
            "HTTPS://VIMEO.COM/76979871",
            "ftp://1.2.3.4/file",
            "ftp://192.168.0.10/file",
            "http://[::1]:8080/",
            "https://example.com",
        ] {
            assert!(is_valid_url(url), "expected valid: {url}");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for url in [
            "",
            "not a url",
            "vimeo.com/123",
            "mailto:someone@example.com",
            "https://",
            "http://exa mple.com",
            "https://example.com/ path",
            "gopher://example.com",
            "ftps://1.2.3/file",
        ] {
            assert!(!is_valid_url(url), "expected invalid: {url}");
        }
    }

    #[test]
    fn validate_distinguishes_empty() {
        assert_eq!(validate_url("  "), Err(ValidationError::EmptyUrl));
        assert_eq!(validate_url("nope"), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_url(" https://vimeo.com/1 "), Ok(()));
    }
}
