//! Spreadsheet ID extraction from Google Sheets URLs.

use regex::Regex;
use std::sync::LazyLock;

/// `https://docs.google.com/spreadsheets/d/<ID>/...`, optionally with a `/u/<n>/` segment.
static SPREADSHEET_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://docs\.google\.com/spreadsheets/(?:u/\d+/)?d/([a-zA-Z0-9_-]+)")
        .expect("Invalid spreadsheet URL regex")
});

/// `https://drive.google.com/open?id=<ID>`
static OPEN_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://drive\.google\.com/open\?id=([a-zA-Z0-9_-]+)")
        .expect("Invalid open URL regex")
});

/// Extract a spreadsheet ID from a URL, or return the trimmed input unchanged.
///
/// Supports the following URL formats:
/// - `https://docs.google.com/spreadsheets/d/<ID>/edit#gid=0`
/// - `https://docs.google.com/spreadsheets/u/0/d/<ID>/edit`
/// - `https://drive.google.com/open?id=<ID>`
///
/// Anything else is treated as a raw ID and left for the Sheets API to judge.
///
/// # Examples
///
/// ```
/// use sheets_gateway::url_parser::normalize_spreadsheet_id;
///
/// let id = normalize_spreadsheet_id("https://docs.google.com/spreadsheets/d/1abc123/edit");
/// assert_eq!(id, "1abc123");
///
/// let id = normalize_spreadsheet_id("1abc123");
/// assert_eq!(id, "1abc123");
/// ```
pub fn normalize_spreadsheet_id(url_or_id: &str) -> String {
    let trimmed = url_or_id.trim();

    for regex in [&*SPREADSHEET_URL_REGEX, &*OPEN_URL_REGEX] {
        if let Some(id) = regex.captures(trimmed).and_then(|c| c.get(1)) {
            return id.as_str().to_string();
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_edit_url() {
        let url = "https://docs.google.com/spreadsheets/d/1abc123XYZ/edit#gid=0";
        assert_eq!(normalize_spreadsheet_id(url), "1abc123XYZ");
    }

    #[test]
    fn test_extract_url_with_user() {
        let url = "https://docs.google.com/spreadsheets/u/1/d/1abc123XYZ/edit";
        assert_eq!(normalize_spreadsheet_id(url), "1abc123XYZ");
    }

    #[test]
    fn test_extract_open_url() {
        let url = "https://drive.google.com/open?id=1abc123XYZ";
        assert_eq!(normalize_spreadsheet_id(url), "1abc123XYZ");
    }

    #[test]
    fn test_raw_id_untouched() {
        assert_eq!(normalize_spreadsheet_id("abc-123_XYZ"), "abc-123_XYZ");
        assert_eq!(normalize_spreadsheet_id("  1abc123XYZ  "), "1abc123XYZ");
    }

    #[test]
    fn test_unrecognized_input_passes_through() {
        assert_eq!(
            normalize_spreadsheet_id("https://example.com/sheet/123"),
            "https://example.com/sheet/123"
        );
        assert_eq!(normalize_spreadsheet_id(""), "");
    }
}
