// crates/fl1-i18n/src/tests/catalog.rs
// ============================================================================
// Module: Catalog Tests
// Description: Unit tests for catalog construction, addressing and coverage.
// Purpose: Ensure catalog loading fails closed and coverage reports gaps.
// Dependencies: fl1-i18n catalog and coverage modules
// ============================================================================

use serde_json::json;

use super::support::fixture_catalogs;
use crate::catalog::CatalogError;
use crate::catalog::CatalogSet;
use crate::catalog::LeafKind;
use crate::catalog::MessageCatalog;
use crate::catalog::RequiredKey;
use crate::locale::Locale;

#[test]
fn dotted_keys_address_nested_values() {
    let catalogs = fixture_catalogs();
    let cs = catalogs.catalog(Locale::Cs);
    assert_eq!(cs.get("common.nav.home"), Some(&json!("Domů")));
    assert!(cs.get("common.nav.home.extra").is_none());
    assert!(cs.get("common..home").is_none());
    assert!(cs.get("").is_none());
}

#[test]
fn leaf_keys_report_shapes() {
    let catalogs = fixture_catalogs();
    let keys = catalogs.catalog(Locale::En).leaf_keys();
    assert_eq!(keys.get("home.hero.features"), Some(&LeafKind::List));
    assert_eq!(keys.get("home.hero.title.highlight"), Some(&LeafKind::Scalar));
    assert!(!keys.contains_key("home.hero.title"));
}

#[test]
fn non_object_root_is_rejected() {
    let result = MessageCatalog::from_value(Locale::En, json!(["not", "an", "object"]));
    assert_eq!(
        result,
        Err(CatalogError::NotAnObject {
            locale: Locale::En
        })
    );
}

#[test]
fn malformed_json_is_rejected() {
    let result = MessageCatalog::from_json_str(Locale::It, "{\"a\": ");
    assert!(matches!(
        result,
        Err(CatalogError::Parse {
            locale: Locale::It,
            ..
        })
    ));
}

#[test]
fn catalog_set_requires_every_locale_once() {
    let cs = MessageCatalog::from_value(Locale::Cs, json!({})).unwrap();
    let en = MessageCatalog::from_value(Locale::En, json!({})).unwrap();
    let missing = CatalogSet::from_catalogs([cs.clone(), en.clone()]);
    assert_eq!(missing, Err(CatalogError::MissingLocale(Locale::It)));

    let duplicate = CatalogSet::from_catalogs([cs.clone(), en, cs]);
    assert_eq!(duplicate, Err(CatalogError::DuplicateLocale(Locale::Cs)));
}

#[test]
fn required_keys_are_checked_against_default_catalog() {
    let catalogs = fixture_catalogs();
    let missing = catalogs.missing_required(&[
        RequiredKey::text("common.nav.home"),
        RequiredKey::text("home.hero.title"),
        RequiredKey::text("common.nav.blog"),
    ]);
    assert_eq!(missing, vec!["home.hero.title".to_string(), "common.nav.blog".to_string()]);
}

#[test]
fn required_keys_must_match_their_leaf_shape() {
    let catalogs = fixture_catalogs();
    let missing = catalogs.missing_required(&[
        RequiredKey::list("home.hero.features"),
        RequiredKey::list("common.nav.home"),
        RequiredKey::text("home.hero.features"),
        RequiredKey::text("home.stats.years"),
    ]);
    assert_eq!(missing, vec!["common.nav.home".to_string(), "home.hero.features".to_string()]);
}

#[test]
fn coverage_reports_missing_extra_and_shape_mismatches() {
    let report = fixture_catalogs().coverage();
    assert_eq!(report.reference_locale, Locale::Cs);
    assert!(!report.is_complete());

    let en = report.locales.iter().find(|entry| entry.locale == Locale::En).unwrap();
    assert!(en.is_complete());
    assert!((en.coverage_percent - 100.0).abs() < f32::EPSILON);

    let it = report.locales.iter().find(|entry| entry.locale == Locale::It).unwrap();
    assert_eq!(
        it.missing,
        vec!["common.nav.about".to_string(), "home.hero.title.highlight".to_string()]
    );
    assert_eq!(it.extra, vec!["legacy.banner".to_string()]);
    assert_eq!(it.shape_mismatches, vec!["home.hero.features".to_string()]);
    assert_eq!(report.missing_total(), 2);
    assert!(report.locales.iter().all(|entry| entry.locale != Locale::Cs));
}

#[test]
fn coverage_agrees_with_translator_on_empty_values() {
    let catalogs = fixture_catalogs();
    let report = catalogs.coverage();
    let it = report.locales.iter().find(|entry| entry.locale == Locale::It).unwrap();
    for key in &it.missing {
        assert!(!catalogs.translator(Locale::It).has(key), "{key} reported missing but defined");
    }
    assert!(it.missing.contains(&"common.nav.about".to_string()));
    assert_eq!(it.present, report.total_keys - 2);
}
