// crates/fl1-i18n/src/locale.rs
// ============================================================================
// Module: Supported Locales
// Description: Closed set of display locales and locale tag parsing.
// Purpose: Provide the single source of truth for locale tags used in URLs.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The site is published in a fixed set of locales. [`Locale`] is a closed
//! enum so the set cannot grow at runtime; [`DEFAULT_LOCALE`] is used whenever
//! a request does not carry a recognized locale prefix.
//!
//! ## Invariants
//! - [`Locale::as_str`] is the canonical, lowercase URL prefix.
//! - [`SUPPORTED_LOCALES`] ordering is stable for deterministic presentation.
//! - Exactly one locale is the default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported display locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Czech (default).
    Cs,
    /// English.
    En,
    /// Italian.
    It,
}

/// Ordered list of supported locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::Cs, Locale::En, Locale::It];

/// Locale used when no supported locale prefix is present.
pub const DEFAULT_LOCALE: Locale = Locale::Cs;

impl Locale {
    /// Returns the canonical locale tag used as URL prefix and catalog name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cs => "cs",
            Self::En => "en",
            Self::It => "it",
        }
    }

    /// Returns the language name written in the language itself.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Cs => "Čeština",
            Self::En => "English",
            Self::It => "Italiano",
        }
    }

    /// Returns whether this is the default locale.
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Cs)
    }

    /// Parses an exact canonical tag (`cs`, `en`, `it`).
    ///
    /// This is the only form accepted as a canonical URL prefix.
    #[must_use]
    pub fn from_canonical(value: &str) -> Option<Self> {
        SUPPORTED_LOCALES.iter().copied().find(|locale| locale.as_str() == value)
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        Self::from_canonical(lang)
    }

    /// Picks the preferred supported locale from an `Accept-Language` header.
    ///
    /// Entries are ordered by quality value (highest first, header order on
    /// ties). Entries with `q=0` and wildcard entries are ignored.
    #[must_use]
    pub fn negotiate(accept_language: &str) -> Option<Self> {
        let mut candidates: Vec<(&str, f32)> = Vec::new();
        for part in accept_language.split(',') {
            let mut pieces = part.split(';');
            let tag = pieces.next().unwrap_or("").trim();
            if tag.is_empty() || tag == "*" {
                continue;
            }
            let quality = pieces
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            if quality <= 0.0 || quality.is_nan() {
                continue;
            }
            candidates.push((tag, quality));
        }
        candidates.sort_by(|left, right| right.1.total_cmp(&left.1));
        candidates.into_iter().find_map(|(tag, _)| Self::parse(tag))
    }
}

impl Default for Locale {
    fn default() -> Self {
        DEFAULT_LOCALE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_canonical(value).ok_or_else(|| LocaleError::Unsupported(value.to_string()))
    }
}

/// Locale parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The tag is not one of the supported locales.
    #[error("unsupported locale: {0}")]
    Unsupported(String),
}

// ============================================================================
// SECTION: Tag Shape
// ============================================================================

/// Returns true when `segment` looks like a BCP 47 language tag.
///
/// Accepts a 2-3 letter primary subtag followed by optional `-`/`_`
/// separated alphanumeric subtags of 1-8 characters (`fr`, `de-AT`,
/// `zh_Hant_TW`).
pub(crate) fn is_locale_shaped(segment: &str) -> bool {
    let mut parts = segment.split(['-', '_']);
    let primary = parts.next().unwrap_or("");
    if !(2 ..= 3).contains(&primary.len()) || !primary.chars().all(|ch| ch.is_ascii_alphabetic())
    {
        return false;
    }
    parts.all(|part| {
        (1 ..= 8).contains(&part.len()) && part.chars().all(|ch| ch.is_ascii_alphanumeric())
    })
}
