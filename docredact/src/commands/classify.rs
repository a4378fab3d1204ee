//! `classify` command: report which category each token belongs to.

use anyhow::Result;
use docredact_core::{classify, normalize_phone, Category};
use serde::Serialize;
use std::io::Write;

use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

/// Classification of a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub token: String,
    pub category: Option<Category>,
    /// Digits-only form, present for phone numbers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

impl Classification {
    pub fn of(token: &str) -> Self {
        let category = classify(token);
        let normalized = (category == Some(Category::Phone)).then(|| normalize_phone(token));
        Self { token: token.to_string(), category, normalized }
    }
}

/// Writes one line (or a JSON array) describing each token.
pub fn run_classify<W: Write>(
    out: &mut W,
    tokens: &[String],
    json: bool,
    theme: &ThemeMap,
    enable_color: bool,
) -> Result<Vec<Classification>> {
    let results: Vec<Classification> = tokens.iter().map(|t| Classification::of(t)).collect();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
        return Ok(results);
    }

    for result in &results {
        let label = match result.category {
            Some(category) => paint(category.name(), ThemeEntry::SummaryCategory, theme, enable_color),
            None => paint("none", ThemeEntry::Info, theme, enable_color),
        };
        match &result.normalized {
            Some(normalized) => writeln!(out, "{}\t{}\t{}", result.token, label, normalized)?,
            None => writeln!(out, "{}\t{}", result.token, label)?,
        }
    }
    Ok(results)
}
