//! End-to-end locale routing and translation scenarios for fl1-i18n.
// crates/fl1-i18n/tests/scenarios.rs
// =============================================================================
// Module: Routing and Translation Scenarios
// Description: Exercise router and translator together against catalog files.
// Purpose: Ensure visitors always land on a prefixed URL with readable text.
// =============================================================================

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;

use fl1_i18n::CatalogError;
use fl1_i18n::CatalogSet;
use fl1_i18n::Locale;
use fl1_i18n::LocaleRouter;
use fl1_i18n::RedirectReason;
use fl1_i18n::RouteKey;
use fl1_i18n::catalog::MAX_CATALOG_BYTES;

mod common;

type TestResult = Result<(), String>;

/// Loads the on-disk fixture with an incomplete Italian catalog.
fn load_fixture() -> Result<(tempfile::TempDir, CatalogSet), String> {
    let dir = common::write_catalog_dir(
        &common::czech(),
        &common::english(),
        &common::italian_without_highlight(),
    )?;
    let catalogs = CatalogSet::load_dir(dir.path()).map_err(|err| err.to_string())?;
    Ok((dir, catalogs))
}

// ============================================================================
// SECTION: Routing
// ============================================================================

#[test]
fn unsupported_prefix_redirects_to_default_locale() -> TestResult {
    let router = LocaleRouter::default();
    let resolution = router.resolve_locale("/fr/contact");
    if resolution.locale != Locale::Cs {
        return Err(format!("expected cs, got {}", resolution.locale));
    }
    if resolution.redirect != Some(RedirectReason::UnsupportedPrefix) {
        return Err(format!("unexpected redirect {:?}", resolution.redirect));
    }
    let target = resolution.canonical_path();
    if target != "/cs/contact" {
        return Err(format!("expected /cs/contact, got {target}"));
    }
    let route = router.match_route(resolution.locale, &resolution.remainder);
    if route != Some(RouteKey::Contact) {
        return Err(format!("expected contact route, got {route:?}"));
    }
    Ok(())
}

#[test]
fn build_path_prefixes_english_contact() -> TestResult {
    let router = LocaleRouter::default();
    let path = router.build_path(RouteKey::Contact, Locale::En);
    if path != "/en/contact" {
        return Err(format!("expected /en/contact, got {path}"));
    }
    Ok(())
}

#[test]
fn bare_root_redirects_to_default_home() -> TestResult {
    let router = LocaleRouter::default();
    let resolution = router.resolve_locale("/");
    if resolution.canonical_path() != "/cs" {
        return Err(format!("expected /cs, got {}", resolution.canonical_path()));
    }
    if resolution.redirect != Some(RedirectReason::MissingPrefix) {
        return Err("bare root must redirect".to_string());
    }
    Ok(())
}

#[test]
fn language_switch_keeps_the_current_page() -> TestResult {
    let router = LocaleRouter::default();
    let switched = router.switch_locale_path("/cs/odoo-dev", Locale::It);
    if switched != "/it/odoo-dev" {
        return Err(format!("expected /it/odoo-dev, got {switched}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

#[test]
fn missing_italian_key_falls_back_to_czech() -> TestResult {
    let (_dir, catalogs) = load_fixture()?;
    let translator = catalogs.translator(Locale::It).scoped("home");
    let text = translator.t("hero.title.highlight");
    if text != "Odoo Magic" {
        return Err(format!("expected default-locale fallback, got {text}"));
    }
    if translator.has("hero.title.highlight") {
        return Err("italian catalog should not define the key".to_string());
    }
    Ok(())
}

#[test]
fn key_missing_everywhere_renders_the_key() -> TestResult {
    let (_dir, catalogs) = load_fixture()?;
    let text = catalogs.translator(Locale::En).t("home.hero.subtitle");
    if text != "home.hero.subtitle" {
        return Err(format!("expected raw key, got {text}"));
    }
    Ok(())
}

#[test]
fn coverage_reports_italian_gap() -> TestResult {
    let (_dir, catalogs) = load_fixture()?;
    let report = catalogs.coverage();
    let italian = report
        .locales
        .iter()
        .find(|entry| entry.locale == Locale::It)
        .ok_or_else(|| "missing italian coverage".to_string())?;
    if italian.missing != vec!["home.hero.title.highlight".to_string()] {
        return Err(format!("unexpected missing keys {:?}", italian.missing));
    }
    if report.is_complete() {
        return Err("report should be incomplete".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Catalog Loading
// ============================================================================

#[test]
fn load_dir_fails_when_a_locale_file_is_missing() -> TestResult {
    let (dir, _) = load_fixture()?;
    fs::remove_file(dir.path().join("it.json")).map_err(|err| err.to_string())?;
    match CatalogSet::load_dir(dir.path()) {
        Err(CatalogError::Io {
            locale: Locale::It,
            ..
        }) => Ok(()),
        other => Err(format!("expected io error for it, got {other:?}")),
    }
}

#[test]
fn load_dir_rejects_malformed_json() -> TestResult {
    let (dir, _) = load_fixture()?;
    fs::write(dir.path().join("en.json"), "{ \"common\": ").map_err(|err| err.to_string())?;
    match CatalogSet::load_dir(dir.path()) {
        Err(CatalogError::Parse {
            locale: Locale::En,
            ..
        }) => Ok(()),
        other => Err(format!("expected parse error for en, got {other:?}")),
    }
}

#[test]
fn load_dir_rejects_non_object_root() -> TestResult {
    let (dir, _) = load_fixture()?;
    fs::write(dir.path().join("cs.json"), "[\"not\", \"a\", \"tree\"]")
        .map_err(|err| err.to_string())?;
    match CatalogSet::load_dir(dir.path()) {
        Err(CatalogError::NotAnObject {
            locale: Locale::Cs,
        }) => Ok(()),
        other => Err(format!("expected root error for cs, got {other:?}")),
    }
}

#[test]
fn load_dir_rejects_oversized_catalog() -> TestResult {
    let (dir, _) = load_fixture()?;
    let padding = " ".repeat(MAX_CATALOG_BYTES);
    fs::write(dir.path().join("cs.json"), format!("{{}}{padding}"))
        .map_err(|err| err.to_string())?;
    match CatalogSet::load_dir(dir.path()) {
        Err(CatalogError::TooLarge {
            locale: Locale::Cs,
            ..
        }) => Ok(()),
        other => Err(format!("expected size error for cs, got {other:?}")),
    }
}

#[test]
fn shipped_catalogs_are_complete() -> TestResult {
    let catalogs =
        CatalogSet::load_dir(&common::shipped_catalog_dir()).map_err(|err| err.to_string())?;
    let report = catalogs.coverage();
    if !report.is_complete() {
        return Err(format!("shipped catalogs incomplete: {report:?}"));
    }
    let extras: usize = report.locales.iter().map(|entry| entry.extra.len()).sum();
    if extras != 0 {
        return Err(format!("shipped catalogs define extra keys: {report:?}"));
    }
    Ok(())
}
