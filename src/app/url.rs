//! URL validation and normalization for input files.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a stream URL from an input file.
///
/// Adds an `https://` prefix to bare hosts, then checks that the URL is
/// syntactically valid and uses the http or https scheme. Oversized or
/// invalid entries are skipped with a warning rather than sent to the
/// validator.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            &url[..50.min(url.len())]
        );
        return None;
    }

    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Some(normalized),
            _ => {
                warn!("Skipping unsupported scheme for URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;

    #[test]
    fn adds_https_to_bare_hosts() {
        assert_eq!(
            validate_and_normalize_url("radio.example/stream"),
            Some("https://radio.example/stream".to_string())
        );
    }

    #[test]
    fn preserves_http_scheme() {
        // Plenty of radio streams are plain http; they must pass through
        // unchanged.
        assert_eq!(
            validate_and_normalize_url("http://radio.example:8000/stream"),
            Some("http://radio.example:8000/stream".to_string())
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(validate_and_normalize_url("not a url at all!!!"), None);
    }

    #[test]
    fn rejects_oversized_urls() {
        let url = format!("http://radio.example/{}", "a".repeat(3000));
        assert_eq!(validate_and_normalize_url(&url), None);
    }
}
