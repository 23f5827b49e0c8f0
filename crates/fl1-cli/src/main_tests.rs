// crates/fl1-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for locale selection, lookups and route reports.
// Purpose: Validate CLI helpers without spawning the binary.
// Dependencies: fl1-cli main helpers
// ============================================================================

//! ## Overview
//! Exercises the pure helpers behind `catalog` and `routes` against the
//! shipped catalogs and in-memory route tables.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use fl1_i18n::CatalogSet;
use fl1_i18n::Locale;
use fl1_i18n::LocaleRouter;
use fl1_i18n::MessageCatalog;
use fl1_i18n::RouteKey;
use fl1_i18n::RouteTable;
use serde_json::json;

use super::CatalogCheckReport;
use super::LangArg;
use super::describe_resolution;
use super::lookup_lines;
use super::resolve_locale;
use super::route_entries;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn shipped_catalogs() -> CatalogSet {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../messages");
    CatalogSet::load_dir(&dir).expect("shipped catalogs load")
}

fn sparse_catalogs() -> CatalogSet {
    CatalogSet::from_catalogs([
        MessageCatalog::from_value(
            Locale::Cs,
            json!({"common": {"nav": {"home": "Domů", "about": "O nás"}}}),
        )
        .unwrap(),
        MessageCatalog::from_value(Locale::En, json!({"common": {"nav": {"home": "Home"}}}))
            .unwrap(),
        MessageCatalog::from_value(
            Locale::It,
            json!({"common": {"nav": {"home": "Home", "about": "Chi siamo"}}}),
        )
        .unwrap(),
    ])
    .unwrap()
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

#[test]
fn lang_flag_wins_over_environment() {
    let locale = resolve_locale(Some(LangArg::It), Some("cs")).unwrap();
    assert_eq!(locale, Locale::It);
}

#[test]
fn environment_accepts_region_tags() {
    assert_eq!(resolve_locale(None, Some("cs-CZ")).unwrap(), Locale::Cs);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
}

#[test]
fn invalid_environment_locale_is_rejected() {
    let err = resolve_locale(None, Some("fr")).unwrap_err();
    assert!(err.to_string().contains("FL1_SITE_LANG"));
}

// ============================================================================
// SECTION: Catalog Reports
// ============================================================================

#[test]
fn shipped_catalogs_pass_the_check() {
    let report = CatalogCheckReport::build(&shipped_catalogs());
    assert!(report.complete);
    assert!(report.passes(false));
    assert_eq!(report.text_lines(false).last().unwrap(), "All catalogs are complete.");
}

#[test]
fn sparse_catalogs_fail_unless_missing_is_allowed() {
    let report = CatalogCheckReport::build(&sparse_catalogs());
    assert!(!report.complete);
    assert!(!report.required_missing.is_empty());
    assert!(!report.passes(true), "missing page keys fail even with allow_missing");
    let lines = report.text_lines(false);
    assert!(lines.iter().any(|line| line == "    missing: common.nav.about"));
    assert!(lines.iter().any(|line| line.starts_with("Default catalog lacks page key:")));
}

#[test]
fn lookup_reports_fallback_for_untranslated_key() {
    let (lines, note) = lookup_lines(&sparse_catalogs(), Locale::En, "common.nav.about").unwrap();
    assert_eq!(lines, vec!["O nás".to_string()]);
    assert!(note.unwrap().contains("not translated in en"));
}

#[test]
fn lookup_prints_list_items_and_missing_keys() {
    let catalogs = shipped_catalogs();
    let (lines, note) = lookup_lines(&catalogs, Locale::Cs, "home.highlights").unwrap();
    assert_eq!(lines.first().map(String::as_str), Some("Rychlá implementace"));
    assert!(note.is_none());
    let (lines, note) = lookup_lines(&catalogs, Locale::It, "nope.missing").unwrap();
    assert_eq!(lines, vec!["nope.missing".to_string()]);
    assert!(note.unwrap().contains("not defined"));
}

// ============================================================================
// SECTION: Routes
// ============================================================================

#[test]
fn route_entries_use_localized_pathnames() {
    let table =
        RouteTable::with_overrides([(RouteKey::Contact, Locale::Cs, "/kontakt".to_string())])
            .unwrap();
    let entries = route_entries(&LocaleRouter::new(table));
    let contact = entries.iter().find(|entry| entry.route == "contact").unwrap();
    assert_eq!(contact.paths["cs"], "/cs/kontakt");
    assert_eq!(contact.paths["en"], "/en/contact");
    let home = entries.iter().find(|entry| entry.route == "home").unwrap();
    assert_eq!(home.paths["it"], "/it");
}

#[test]
fn describe_resolution_covers_redirects_routes_and_misses() {
    let router = LocaleRouter::default();
    assert_eq!(
        describe_resolution(&router, "/fr/contact?x=1").unwrap(),
        "/fr/contact -> /cs/contact (unsupported_prefix)"
    );
    assert_eq!(describe_resolution(&router, "/it/3cx").unwrap(), "/it/3cx -> 3cx [it]");
    assert_eq!(describe_resolution(&router, "/en/blog").unwrap(), "/en/blog -> not found [en]");
    assert!(describe_resolution(&router, "contact").is_err());
}
