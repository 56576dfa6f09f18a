//! Content classification for saved text.
//!
//! Patterns are checked in priority order and the first match wins:
//! url, email, phone, code, then plain text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entry::ContentType;

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(https?://|ftp://|www\.)[^\s]+$").expect("valid url regex"));

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9\s().-]{6,18}[0-9]$").expect("valid phone regex"));

/// Any one of these marks the text as code.
static CODE_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // keyword at the start of a line
        r"(?m)^\s*(function|const|let|var|class|import|export|def|fn|pub|public|private|return|if|for|while)\b",
        // braces, brackets, parens
        r"[{}\[\]()]",
        // arrow function
        r"=>",
        // comment markers
        r"//|/\*|\*/",
        // markup tags
        r"</?[a-zA-Z][a-zA-Z0-9-]*(\s[^>]*)?/?>",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid code regex"))
    .collect()
});

/// Maps raw text to a [`ContentType`]. Pure and total.
pub fn classify(text: &str) -> ContentType {
    let text = text.trim();
    if text.is_empty() {
        return ContentType::Text;
    }

    if URL_REGEX.is_match(text) {
        ContentType::Url
    } else if EMAIL_REGEX.is_match(text) {
        ContentType::Email
    } else if PHONE_REGEX.is_match(text) {
        ContentType::Phone
    } else if CODE_REGEXES.iter().any(|re| re.is_match(text)) {
        ContentType::Code
    } else {
        ContentType::Text
    }
}
