use regex::Regex;
use std::sync::OnceLock;

fn html_block() -> &'static Regex {
    static HTML_BLOCK: OnceLock<Regex> = OnceLock::new();
    // case-insensitive, `.` spans newlines, shortest match
    HTML_BLOCK.get_or_init(|| Regex::new(r"(?is)<html.*?</html>").expect("html block pattern is valid"))
}

/// Returns the first `<html …>…</html>` region of `raw`, or `raw` unchanged
/// when the model left the document unwrapped.
pub fn extract_artifact(raw: &str) -> &str {
    html_block().find(raw).map_or(raw, |m| m.as_str())
}
