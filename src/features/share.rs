use url::Url;

pub const MIME_PLAIN: &str = "text/plain";
pub const MIME_URI_LIST: &str = "text/uri-list";
pub const MIME_PNG: &str = "image/png";

/// True when the text is an absolute URL with a host-bearing or known scheme.
pub fn is_valid_url(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return false;
    }
    match Url::parse(trimmed) {
        Ok(url) => !url.cannot_be_a_base() || matches!(url.scheme(), "mailto" | "tel" | "sms"),
        Err(_) => false,
    }
}

pub fn mime_for_text(text: &str) -> &'static str {
    if is_valid_url(text) {
        MIME_URI_LIST
    } else {
        MIME_PLAIN
    }
}
