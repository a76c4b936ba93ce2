//! Form text transforms
//!
//! Admin forms edit everything as plain text. These helpers convert between
//! the text a form holds and the typed values stored in documents. Each
//! `parse_*` has a `join_*` inverse, and `parse(join(x)) == x` holds for any
//! value that `parse` can produce.

use thiserror::Error;

/// Errors raised while turning a draft into storable content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required text field was blank
    #[error("{0} is required")]
    Required(&'static str),

    /// The skill level was not a number
    #[error("level must be a number between 0 and 100, got '{0}'")]
    InvalidLevel(String),

    /// The email address does not look like one
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    /// An edit operation was attempted with no draft open
    #[error("no draft is being edited")]
    NotEditing,

    /// A submit is already in flight
    #[error("a submit is already in progress")]
    Busy,
}

/// Highest allowed skill level
pub const MAX_LEVEL: u8 = 100;

/// Split comma-separated text into trimmed tags, dropping empty segments
///
/// ```
/// use folio::core::models::parse_tags;
///
/// assert_eq!(parse_tags("Kotlin, Java"), vec!["Kotlin", "Java"]);
/// assert!(parse_tags("  ").is_empty());
/// ```
#[must_use]
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Join tags back into the comma-separated form text
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Split newline-separated text into lines
///
/// Carriage returns from browser form posts are stripped. Empty text is an
/// empty sequence; blank lines in between are kept.
#[must_use]
pub fn parse_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(|line| line.trim_end_matches('\r').to_string()).collect()
}

/// Join detail lines back into the newline-separated form text
#[must_use]
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Parse numeric level text, clamped to `0..=100`
///
/// Fractional input is truncated.
pub fn parse_level(text: &str) -> Result<u8, FormError> {
    let trimmed = text.trim();
    let value: f64 = trimmed.parse().map_err(|_| FormError::InvalidLevel(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(FormError::InvalidLevel(trimmed.to_string()));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let level = value.trunc().clamp(0.0, f64::from(MAX_LEVEL)) as u8;
    Ok(level)
}

/// Fail with [`FormError::Required`] when `value` is blank
pub fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(())
    }
}

/// Treat blank optional text as absent
#[must_use]
pub fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
