//! matcher.rs - Detection grammars for the three sensitive-text categories.
//!
//! Each category has up to three compiled forms:
//!
//! * a *standalone* scanner, used for free-text scanning and classification,
//! * a *redaction* scanner, the form the document engine runs against content
//!   blocks,
//! * a *strict* whole-string validator, anchored at both ends.
//!
//! The standalone and redaction forms are identical except for SSN, where the
//! engine only recognises the dashed `DDD-DD-DDDD` shape, and for email, which
//! the engine compiles case-insensitively.
//!
//! All patterns are compiled once into process-wide statics. Matching never
//! fails: text with no match simply yields an empty iterator.
//!
//! Word boundaries are ASCII (`(?-u:\b)`): an accented or other non-ASCII
//! letter next to a token does not hide it, so `jöhn@example.com` yields the
//! match `hn@example.com`. Digits are ASCII `[0-9]`.
//!
//! The phone grammar also accepts a bare run of ten digits such as
//! `1234567890`. Other ten-digit numeric data in a document will therefore be
//! redacted as a phone number. This is a known limitation of the grammar.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::redaction_match::{Category, SensitiveTextMatch};

const EMAIL_BODY: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
const PHONE_BODY: &str = r"(?:\+?1[\s.-]?)?\(?[0-9]{3}\)?[\s.-]?[0-9]{3}[\s.-]?[0-9]{4}";
const SSN_DASHED_BODY: &str = r"[0-9]{3}-[0-9]{2}-[0-9]{4}";
const SSN_BARE_BODY: &str = r"[0-9]{9}";
/// ASCII word boundary.
const WB: &str = r"(?-u:\b)";

fn compile(name: &str, pattern: &str, case_insensitive: bool) -> Regex {
    debug!("Compiling '{}' pattern: {}", name, pattern);
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .size_limit(10 * (1 << 20))
        .build()
        .unwrap_or_else(|e| panic!("built-in '{}' pattern failed to compile: {}", name, e))
}

static EMAIL_SCAN: Lazy<Regex> =
    Lazy::new(|| compile("email", &format!(r"{WB}{EMAIL_BODY}{WB}"), false));
static EMAIL_REDACT: Lazy<Regex> =
    Lazy::new(|| compile("email_redact", &format!(r"{WB}{EMAIL_BODY}{WB}"), true));
static EMAIL_STRICT: Lazy<Regex> =
    Lazy::new(|| compile("email_strict", &format!(r"^{EMAIL_BODY}$"), false));

static PHONE_SCAN: Lazy<Regex> =
    Lazy::new(|| compile("phone", &format!(r"{PHONE_BODY}{WB}"), false));
static PHONE_STRICT: Lazy<Regex> =
    Lazy::new(|| compile("phone_strict", &format!(r"^{PHONE_BODY}$"), false));

static SSN_SCAN: Lazy<Regex> = Lazy::new(|| {
    compile("ssn", &format!(r"{WB}{SSN_DASHED_BODY}{WB}|{WB}{SSN_BARE_BODY}{WB}"), false)
});
static SSN_REDACT: Lazy<Regex> =
    Lazy::new(|| compile("ssn_redact", &format!(r"{WB}{SSN_DASHED_BODY}{WB}"), false));
static SSN_STRICT: Lazy<Regex> = Lazy::new(|| {
    compile("ssn_strict", &format!(r"^(?:{SSN_DASHED_BODY}|{SSN_BARE_BODY})$"), false)
});

/// The scanner used for free-text scanning and classification.
pub fn standalone_regex(category: Category) -> &'static Regex {
    match category {
        Category::Email => &EMAIL_SCAN,
        Category::Phone => &PHONE_SCAN,
        Category::Ssn => &SSN_SCAN,
    }
}

/// The scanner the document engine runs against content blocks.
pub fn redaction_regex(category: Category) -> &'static Regex {
    match category {
        Category::Email => &EMAIL_REDACT,
        Category::Phone => &PHONE_SCAN,
        Category::Ssn => &SSN_REDACT,
    }
}

/// Whole-string validator for an already-extracted token.
pub fn strict_regex(category: Category) -> &'static Regex {
    match category {
        Category::Email => &EMAIL_STRICT,
        Category::Phone => &PHONE_STRICT,
        Category::Ssn => &SSN_STRICT,
    }
}

fn scan<'t>(
    regex: &'static Regex,
    category: Category,
    text: &'t str,
) -> impl Iterator<Item = SensitiveTextMatch<'t>> + 't {
    regex.find_iter(text).map(move |m| SensitiveTextMatch {
        matched: m.as_str(),
        category,
        start: m.start(),
        end: m.end(),
    })
}

/// Lazily yields the non-overlapping matches of `category` in `text`, left to right.
pub fn find_matches(category: Category, text: &str) -> impl Iterator<Item = SensitiveTextMatch<'_>> {
    scan(standalone_regex(category), category, text)
}

/// Same as [`find_matches`] but with the grammar the document engine redacts with.
pub fn find_redaction_matches(
    category: Category,
    text: &str,
) -> impl Iterator<Item = SensitiveTextMatch<'_>> {
    scan(redaction_regex(category), category, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(category: Category, text: &str) -> Vec<&str> {
        find_matches(category, text).map(|m| m.matched).collect()
    }

    #[test]
    fn email_matches_standard_addresses() {
        assert_eq!(
            matched(Category::Email, "Contact john.doe+work@mail.example.co.uk or ops@x.io today."),
            vec!["john.doe+work@mail.example.co.uk", "ops@x.io"]
        );
    }

    #[test]
    fn email_requires_two_letter_tld() {
        assert!(matched(Category::Email, "user@host.c").is_empty());
        assert!(matched(Category::Email, "user@host.123").is_empty());
    }

    #[test]
    fn email_redaction_grammar_is_case_insensitive() {
        let found: Vec<_> = find_redaction_matches(Category::Email, "MAIL JANE@EXAMPLE.COM")
            .map(|m| m.matched)
            .collect();
        assert_eq!(found, vec!["JANE@EXAMPLE.COM"]);
    }

    #[test]
    fn phone_matches_all_documented_formats() {
        for input in [
            "123-456-7890",
            "(123) 456-7890",
            "+1 123 456 7890",
            "123.456.7890",
            "1234567890",
            "1-800-555-0199",
        ] {
            assert_eq!(matched(Category::Phone, input), vec![input], "input: {input}");
        }
    }

    #[test]
    fn phone_rejects_short_runs() {
        assert!(matched(Category::Phone, "call 555-0199").is_empty());
        assert!(matched(Category::Phone, "123456789").is_empty());
    }

    #[test]
    fn ssn_standalone_accepts_dashed_and_bare() {
        assert_eq!(
            matched(Category::Ssn, "a 123-45-6789 b 987654321 c"),
            vec!["123-45-6789", "987654321"]
        );
    }

    #[test]
    fn ssn_redaction_grammar_is_dashed_only() {
        let found: Vec<_> = find_redaction_matches(Category::Ssn, "a 123-45-6789 b 987654321 c")
            .map(|m| m.matched)
            .collect();
        assert_eq!(found, vec!["123-45-6789"]);
    }

    #[test]
    fn matches_report_byte_offsets() {
        let text = "SSN: 123-45-6789";
        let m = find_matches(Category::Ssn, text).next().unwrap();
        assert_eq!((m.start, m.end), (5, 16));
        assert_eq!(&text[m.start..m.end], m.matched);
    }

    #[test]
    fn matches_never_overlap() {
        let text = "1234567890 0987654321 5555555555";
        let spans: Vec<_> = find_matches(Category::Phone, text).map(|m| (m.start, m.end)).collect();
        for pair in spans.windows(2) {
            assert!(pair[0].1 <= pair[1].0);
        }
        assert_eq!(spans.len(), 3);
    }

    #[test]
    fn word_boundaries_are_ascii() {
        assert_eq!(matched(Category::Email, "Contact: jöhn@example.com"), vec!["hn@example.com"]);
        assert_eq!(matched(Category::Ssn, "SSN:é123-45-6789"), vec!["123-45-6789"]);
        assert_eq!(matched(Category::Ssn, "n°987654321é"), vec!["987654321"]);
        assert_eq!(matched(Category::Phone, "Tél:4155550100é"), vec!["4155550100"]);
        let found: Vec<_> = find_redaction_matches(Category::Ssn, "日123-45-6789日")
            .map(|m| m.matched)
            .collect();
        assert_eq!(found, vec!["123-45-6789"]);
    }

    #[test]
    fn ascii_word_characters_still_block_a_match() {
        assert!(matched(Category::Ssn, "x123-45-6789").is_empty());
        assert!(matched(Category::Phone, "4155550100x").is_empty());
    }

    #[test]
    fn placeholders_are_not_rematched() {
        for category in Category::REDACTION_ORDER {
            for other in Category::REDACTION_ORDER {
                assert_eq!(
                    find_redaction_matches(category, other.default_placeholder()).count(),
                    0
                );
            }
        }
    }
}
