// crates/fl1-i18n/src/coverage.rs
// ============================================================================
// Module: Catalog Coverage
// Description: Translation completeness reports relative to the default locale.
// Purpose: Surface missing translations as defects before they reach readers.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The default locale's leaf keys are the reference set. Every other locale is
//! checked for missing keys, keys the default does not define, and leaves
//! whose shape differs (a string in one locale, a list in another). A key
//! whose value the translator would skip (an empty string, an empty list or
//! `null`) counts as missing.

use serde::Serialize;

use crate::catalog::CatalogSet;
use crate::catalog::is_renderable;
use crate::locale::DEFAULT_LOCALE;
use crate::locale::Locale;
use crate::locale::SUPPORTED_LOCALES;

/// Coverage of one locale against the reference key set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocaleCoverage {
    /// Locale being reported.
    pub locale: Locale,
    /// Reference keys present in this locale.
    pub present: usize,
    /// Reference keys absent from this locale or holding no renderable value.
    pub missing: Vec<String>,
    /// Keys this locale defines that the default locale does not.
    pub extra: Vec<String>,
    /// Keys present in both with a different leaf shape.
    pub shape_mismatches: Vec<String>,
    /// Coverage as a percentage (0.0-100.0).
    pub coverage_percent: f32,
}

impl LocaleCoverage {
    /// Returns true when no reference key is missing or mismatched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.shape_mismatches.is_empty()
    }
}

/// Coverage report across all supported locales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Locale whose keys form the reference set.
    pub reference_locale: Locale,
    /// Number of reference keys.
    pub total_keys: usize,
    /// Per-locale coverage, in supported-locale order (default excluded).
    pub locales: Vec<LocaleCoverage>,
}

impl CoverageReport {
    /// Builds the report for `catalogs`.
    #[must_use]
    pub fn build(catalogs: &CatalogSet) -> Self {
        let reference = catalogs.default_catalog().leaf_keys();
        let total = reference.len();
        let locales = SUPPORTED_LOCALES
            .iter()
            .copied()
            .filter(|locale| *locale != DEFAULT_LOCALE)
            .map(|locale| {
                let catalog = catalogs.catalog(locale);
                let keys = catalog.leaf_keys();
                let missing: Vec<String> = reference
                    .keys()
                    .filter(|key| catalog.get(key).is_none_or(|value| !is_renderable(value)))
                    .cloned()
                    .collect();
                let extra: Vec<String> =
                    keys.keys().filter(|key| !reference.contains_key(*key)).cloned().collect();
                let shape_mismatches: Vec<String> = reference
                    .iter()
                    .filter(|(key, kind)| keys.get(*key).is_some_and(|own| own != *kind))
                    .map(|(key, _)| key.clone())
                    .collect();
                let present = total.saturating_sub(missing.len());
                LocaleCoverage {
                    locale,
                    present,
                    missing,
                    extra,
                    shape_mismatches,
                    coverage_percent: percent(present, total),
                }
            })
            .collect();
        Self {
            reference_locale: DEFAULT_LOCALE,
            total_keys: total,
            locales,
        }
    }

    /// Returns true when every locale covers every reference key.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.locales.iter().all(LocaleCoverage::is_complete)
    }

    /// Returns the number of missing keys across all locales.
    #[must_use]
    pub fn missing_total(&self) -> usize {
        self.locales.iter().map(|locale| locale.missing.len()).sum()
    }
}

/// Computes `present / total` as a percentage; an empty reference is complete.
#[allow(clippy::cast_precision_loss, reason = "Catalog key counts stay far below 2^24.")]
fn percent(present: usize, total: usize) -> f32 {
    if total == 0 { 100.0 } else { (present as f32 / total as f32) * 100.0 }
}
