//! Coarse grouping of response content types.

use std::collections::HashMap;
use std::sync::LazyLock;

static CONTENT_GROUPS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("application/javascript", "javascript"),
        ("application/x-javascript", "javascript"),
        ("application/json", "json"),
        ("image/gif", "image"),
        ("image/jpeg", "image"),
        ("image/png", "image"),
        ("image/x-icon", "image"),
        ("text/css", "css"),
        ("text/html", "html"),
        ("text/javascript", "javascript"),
        ("text/plain", "text"),
        ("font/eot", "font"),
        ("", "unknown"),
    ])
});

/// Group for a `Content Type` value, ignoring case and any `;` parameters.
///
/// An empty content type is `unknown`; types outside the table have no group.
pub fn content_group(content_type: &str) -> Option<&'static str> {
    let lowered = content_type.to_lowercase();
    let media_type = match lowered.find(';') {
        Some(semi) => &lowered[..semi],
        None => lowered.as_str(),
    };
    CONTENT_GROUPS.get(media_type).copied()
}
