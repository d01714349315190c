//! Text normalization and form-field extraction
//!
//! Case submissions arrive either as plain prose or as the output of an
//! upstream form that embeds labelled fields, e.g.
//!
//! ```text
//! Crime Type: Theft Location: Delhi Case Description: The man stole a phone
//! ```
//!
//! The helpers here are total: any string, including the empty string, is
//! accepted and produces a well-defined result.

use regex::Regex;
use std::sync::OnceLock;

/// Marker that precedes the free-text description in form submissions
pub const CASE_DESCRIPTION_MARKER: &str = "Case Description:";

/// Marker that precedes the crime type field in form submissions
pub const CRIME_TYPE_MARKER: &str = "Crime Type:";

fn crime_type_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Crime Type: *(.*?)(?:\n| Location:)").expect("crime type pattern is valid")
    })
}

/// Normalize text for matching and vectorization.
///
/// Lowercases, replaces every character that is not an ASCII letter with
/// whitespace, and collapses whitespace runs into single spaces. The result
/// never has leading or trailing spaces, and normalizing it again is a no-op.
pub fn normalize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            cleaned.push(c.to_ascii_lowercase());
        } else {
            cleaned.push(' ');
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the free-text description from a form submission.
///
/// Returns the trimmed text after the first `Case Description:` marker. When
/// the marker is absent, or nothing but whitespace follows it, the original
/// text is returned unchanged.
pub fn extract_case_description(text: &str) -> &str {
    match text.split_once(CASE_DESCRIPTION_MARKER) {
        Some((_, rest)) if !rest.trim().is_empty() => rest.trim(),
        _ => text,
    }
}

/// Extract the `Crime Type:` field from a form submission.
///
/// The field value runs up to the next newline or ` Location:` label. A field
/// that is missing, unterminated, or blank yields `None`.
pub fn extract_crime_type(text: &str) -> Option<String> {
    if !text.contains(CRIME_TYPE_MARKER) {
        return None;
    }

    let captures = crime_type_regex().captures(text)?;
    let value = captures.get(1)?.as_str().trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Title-case each whitespace-separated word, preserving the separators.
///
/// `"person a"` becomes `"Person A"` and `"THE ACCUSED"` becomes
/// `"The Accused"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
