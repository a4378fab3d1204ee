//! Configuration management for `docredact-core`.
//!
//! This module defines the placeholder tokens, the confidential header styling
//! and the change-tracking requirement used by the core operations. It handles
//! deserialization of YAML configurations and provides utilities for loading,
//! merging and validating them.
//!
//! A user configuration file is partial: every key is optional and is laid
//! over the built-in defaults with [`merge_config`].
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use log::{debug, info};

use crate::errors::DocRedactError;
use crate::host::parse_api_version;
use crate::matcher::redaction_regex;
use crate::redaction_match::Category;

/// Word accepts font sizes from 1 to 1638 points in half-point steps.
pub const MIN_FONT_SIZE: f32 = 1.0;
pub const MAX_FONT_SIZE: f32 = 1638.0;
/// Upper bound Word accepts for paragraph spacing, in points.
pub const MAX_SPACE_AFTER: f32 = 1584.0;

/// Per-category redaction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryConfig {
    /// A disabled category is skipped entirely and reports zero replacements.
    pub enabled: bool,
    /// The token written in place of every match.
    pub placeholder: String,
}

impl CategoryConfig {
    fn for_category(category: Category) -> Self {
        Self {
            enabled: true,
            placeholder: category.default_placeholder().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RedactionSettings {
    pub ssn: CategoryConfig,
    pub email: CategoryConfig,
    pub phone: CategoryConfig,
}

impl RedactionSettings {
    pub fn category(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::Email => &self.email,
            Category::Phone => &self.phone,
            Category::Ssn => &self.ssn,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut CategoryConfig {
        match category {
            Category::Email => &mut self.email,
            Category::Phone => &mut self.phone,
            Category::Ssn => &mut self.ssn,
        }
    }
}

impl Default for RedactionSettings {
    fn default() -> Self {
        Self {
            ssn: CategoryConfig::for_category(Category::Ssn),
            email: CategoryConfig::for_category(Category::Email),
            phone: CategoryConfig::for_category(Category::Phone),
        }
    }
}

/// Paragraph alignment for the header paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Centered,
    Right,
    Justified,
}

/// Font color for the header paragraph: a named palette entry or a `#RRGGBB` code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum HeaderColor {
    /// The red used for confidential markings, `#D32F2F`.
    Warning,
    Black,
    DarkGray,
    Navy,
    Hex(String),
}

impl HeaderColor {
    pub fn hex_code(&self) -> &str {
        match self {
            HeaderColor::Warning => "#D32F2F",
            HeaderColor::Black => "#000000",
            HeaderColor::DarkGray => "#595959",
            HeaderColor::Navy => "#1F3864",
            HeaderColor::Hex(code) => code,
        }
    }
}

/// Error type for parsing an invalid `HeaderColor` string.
#[derive(Debug, Clone)]
pub struct ParseHeaderColorError(String);

impl fmt::Display for ParseHeaderColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid header color '{}'; expected one of: warning, black, dark_gray, navy, \
            or a '#RRGGBB' hex code.",
            self.0
        )
    }
}

impl std::error::Error for ParseHeaderColorError {}

impl FromStr for HeaderColor {
    type Err = ParseHeaderColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "warning" => Ok(HeaderColor::Warning),
            "black" => Ok(HeaderColor::Black),
            "dark_gray" | "darkgray" => Ok(HeaderColor::DarkGray),
            "navy" => Ok(HeaderColor::Navy),
            _ => {
                let is_hex = trimmed.len() == 7
                    && trimmed.starts_with('#')
                    && trimmed[1..].chars().all(|c| c.is_ascii_hexdigit());
                if is_hex {
                    Ok(HeaderColor::Hex(trimmed.to_uppercase()))
                } else {
                    Err(ParseHeaderColorError(s.to_string()))
                }
            }
        }
    }
}

impl TryFrom<String> for HeaderColor {
    type Error = ParseHeaderColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HeaderColor> for String {
    fn from(color: HeaderColor) -> Self {
        match color {
            HeaderColor::Warning => "warning".to_string(),
            HeaderColor::Black => "black".to_string(),
            HeaderColor::DarkGray => "dark_gray".to_string(),
            HeaderColor::Navy => "navy".to_string(),
            HeaderColor::Hex(code) => code,
        }
    }
}

/// The confidential marker paragraph stamped into the first section's header.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeaderConfig {
    pub text: String,
    pub alignment: Alignment,
    pub bold: bool,
    pub font_size: f32,
    pub color: HeaderColor,
    /// Spacing after the paragraph, in points.
    pub space_after: f32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            text: "CONFIDENTIAL DOCUMENT".to_string(),
            alignment: Alignment::Centered,
            bold: true,
            font_size: 14.0,
            color: HeaderColor::Warning,
            space_after: 12.0,
        }
    }
}

/// The host requirement set that must be supported before change tracking is touched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackingConfig {
    pub requirement_set: String,
    pub min_version: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            requirement_set: "WordApi".to_string(),
            min_version: "1.5".to_string(),
        }
    }
}

/// Represents the top-level configuration structure for docredact.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DocRedactConfig {
    pub redaction: RedactionSettings,
    pub header: HeaderConfig,
    pub tracking: TrackingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialCategoryConfig {
    pub enabled: Option<bool>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialRedactionSettings {
    pub ssn: Option<PartialCategoryConfig>,
    pub email: Option<PartialCategoryConfig>,
    pub phone: Option<PartialCategoryConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialHeaderConfig {
    pub text: Option<String>,
    pub alignment: Option<Alignment>,
    pub bold: Option<bool>,
    pub font_size: Option<f32>,
    pub color: Option<HeaderColor>,
    pub space_after: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialTrackingConfig {
    pub requirement_set: Option<String>,
    pub min_version: Option<String>,
}

/// A user configuration file; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub redaction: PartialRedactionSettings,
    pub header: PartialHeaderConfig,
    pub tracking: PartialTrackingConfig,
}

impl PartialConfig {
    /// Loads a partial configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty file deserializes to YAML null.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(text)?)
    }
}

impl DocRedactConfig {
    /// Loads the built-in configuration from the embedded YAML file.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: DocRedactConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default configuration")?;
        Ok(config)
    }

    /// Loads the defaults, overlays the user file if one is given, and validates the result.
    pub fn load(user_path: Option<&Path>) -> Result<Self> {
        let defaults = Self::load_default()?;
        let user = user_path.map(PartialConfig::load_from_file).transpose()?;
        let merged = merge_config(defaults, user);
        merged.validate()?;
        Ok(merged)
    }

    /// Checks that the configuration can be applied safely to a document.
    ///
    /// Placeholders must not themselves be matched by any redaction grammar,
    /// otherwise a later pass would redact the output of an earlier one.
    pub fn validate(&self) -> Result<(), DocRedactError> {
        let mut errors = Vec::new();

        for category in Category::REDACTION_ORDER {
            let placeholder = &self.redaction.category(category).placeholder;
            if placeholder.trim().is_empty() {
                errors.push(format!("Placeholder for '{}' is empty.", category.name()));
                continue;
            }
            for scanner in Category::REDACTION_ORDER {
                if redaction_regex(scanner).is_match(placeholder) {
                    errors.push(format!(
                        "Placeholder '{}' for '{}' would be matched by the '{}' pattern.",
                        placeholder,
                        category.name(),
                        scanner.name()
                    ));
                }
            }
        }

        let header = &self.header;
        if header.text.trim().is_empty() {
            errors.push("Header text is empty.".to_string());
        }
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&header.font_size)
            || (header.font_size * 2.0).fract() != 0.0
        {
            errors.push(format!(
                "Header font size {} must be between {} and {} in half-point steps.",
                header.font_size, MIN_FONT_SIZE, MAX_FONT_SIZE
            ));
        }
        if !(0.0..=MAX_SPACE_AFTER).contains(&header.space_after) {
            errors.push(format!(
                "Header space_after {} must be between 0 and {}.",
                header.space_after, MAX_SPACE_AFTER
            ));
        }

        if self.tracking.requirement_set.trim().is_empty() {
            errors.push("Tracking requirement_set is empty.".to_string());
        }
        if parse_api_version(&self.tracking.min_version).is_none() {
            errors.push(format!(
                "Tracking min_version '{}' is not a dotted version number.",
                self.tracking.min_version
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DocRedactError::ConfigValidation(errors.join("\n")))
        }
    }
}

/// Lays a user configuration over the defaults, key by key.
pub fn merge_config(default_config: DocRedactConfig, user_config: Option<PartialConfig>) -> DocRedactConfig {
    let mut merged = default_config;
    let Some(user) = user_config else {
        debug!("No user configuration provided; using defaults.");
        return merged;
    };

    for category in Category::REDACTION_ORDER {
        let user_category = match category {
            Category::Email => &user.redaction.email,
            Category::Phone => &user.redaction.phone,
            Category::Ssn => &user.redaction.ssn,
        };
        if let Some(overrides) = user_category {
            let target = merged.redaction.category_mut(category);
            if let Some(enabled) = overrides.enabled {
                debug!("Overriding '{}' enabled with user value: {}", category.name(), enabled);
                target.enabled = enabled;
            }
            if let Some(placeholder) = &overrides.placeholder {
                debug!("Overriding '{}' placeholder with user value: {}", category.name(), placeholder);
                target.placeholder = placeholder.clone();
            }
        }
    }

    let header = user.header;
    if let Some(text) = header.text {
        merged.header.text = text;
    }
    if let Some(alignment) = header.alignment {
        merged.header.alignment = alignment;
    }
    if let Some(bold) = header.bold {
        merged.header.bold = bold;
    }
    if let Some(font_size) = header.font_size {
        merged.header.font_size = font_size;
    }
    if let Some(color) = header.color {
        merged.header.color = color;
    }
    if let Some(space_after) = header.space_after {
        merged.header.space_after = space_after;
    }

    if let Some(requirement_set) = user.tracking.requirement_set {
        merged.tracking.requirement_set = requirement_set;
    }
    if let Some(min_version) = user.tracking.min_version {
        merged.tracking.min_version = min_version;
    }

    merged
}
