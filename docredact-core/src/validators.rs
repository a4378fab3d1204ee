// File: docredact-core/src/validators.rs
//! Whole-string validation and normalization for already-extracted tokens.
//!
//! These functions classify a token in isolation, with no word-boundary
//! slack: the entire input must match the category grammar. They back the
//! manual classification path, which, unlike the document engine, recognises
//! bare nine-digit SSNs.
//!
//! License: MIT OR APACHE 2.0

use crate::matcher::strict_regex;
use crate::redaction_match::Category;

/// Returns `true` if the whole of `text` is an email address.
pub fn is_email(text: &str) -> bool {
    strict_regex(Category::Email).is_match(text)
}

/// Returns `true` if the whole of `text` is a phone number.
pub fn is_phone(text: &str) -> bool {
    strict_regex(Category::Phone).is_match(text)
}

/// Returns `true` if the whole of `text` is an SSN, either `DDD-DD-DDDD` or
/// nine bare digits.
pub fn is_ssn(text: &str) -> bool {
    strict_regex(Category::Ssn).is_match(text)
}

/// Validates `text` against the strict grammar of `category`.
pub fn is_valid(category: Category, text: &str) -> bool {
    match category {
        Category::Email => is_email(text),
        Category::Phone => is_phone(text),
        Category::Ssn => is_ssn(text),
    }
}

/// Classifies a token, checking categories in the engine's pass order.
///
/// A bare run of nine digits classifies as an SSN here even though the
/// document engine never redacts that shape.
pub fn classify(token: &str) -> Option<Category> {
    Category::REDACTION_ORDER
        .into_iter()
        .find(|category| is_valid(*category, token))
}

/// Strips every non-digit character, keeping a leading `+` if present.
///
/// ```
/// use docredact_core::validators::normalize_phone;
///
/// assert_eq!(normalize_phone("+1 (415) 555-0100"), "+14155550100");
/// assert_eq!(normalize_phone("415.555.0100"), "4155550100");
/// ```
pub fn normalize_phone(phone: &str) -> String {
    let (prefix, rest) = match phone.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", phone),
    };

    let mut normalized = String::with_capacity(phone.len());
    normalized.push_str(prefix);
    normalized.extend(rest.chars().filter(|c| c.is_ascii_digit()));
    normalized
}
