use once_cell::sync::Lazy;
use regex::Regex;

static SHARE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://v\.douyin\.com/[A-Za-z0-9_\-]+/?").unwrap());

/// First douyin short link in `text`, if any.
/// Returns the matched substring exactly as it appears in the message.
pub fn find_share_link(text: &str) -> Option<&str> {
    SHARE_LINK_RE.find(text).map(|m| m.as_str())
}
