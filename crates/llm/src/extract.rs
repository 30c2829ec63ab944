use gist_common::{GistError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<summary>(.*?)</summary>").expect("summary marker regex is valid")
});

/// Text between the first `<summary>` / `</summary>` pair, trimmed
pub fn extract_summary(content: &str) -> Result<String> {
    SUMMARY_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| {
            GistError::malformed_response("Response did not contain a properly formatted summary")
        })
}

/// Apply the response contract: marker extraction, or the raw text verbatim
pub fn parse_response(content: &str, requires_marker: bool) -> Result<String> {
    if requires_marker {
        extract_summary(content)
    } else {
        Ok(content.to_string())
    }
}
