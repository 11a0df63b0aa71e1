use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

/// Default pattern for expiry labels, e.g. "Oct 19, 6:30 PM".
pub const EXPIRY_PATTERN: &str = "%b %-d, %-I:%M %p";

/// Renders "Expires <time>". Patterns chrono cannot parse fall back to
/// [`EXPIRY_PATTERN`].
pub fn expiry_label(expires_at: &DateTime<Utc>, pattern: &str) -> String {
    let pattern = if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        tracing::warn!(pattern, "unusable expiry pattern, using default");
        EXPIRY_PATTERN
    } else {
        pattern
    };
    format!("Expires {}", expires_at.format(pattern))
}
