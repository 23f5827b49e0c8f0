//! Config defaults and core validation tests for fl1-config.
// crates/fl1-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Core Validation Tests
// Description: Validate default behavior and core config invariants.
// Purpose: Ensure an empty config is usable and bad values are rejected.
// =============================================================================

use std::net::SocketAddr;

use fl1_config::DEFAULT_BIND;
use fl1_config::SiteConfig;
use fl1_i18n::Locale;
use fl1_i18n::RouteKey;

mod common;

type TestResult = Result<(), String>;

#[test]
fn default_config_validates() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn defaults_match_local_setup() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    let expected: SocketAddr = DEFAULT_BIND.parse().map_err(|_| "bad default".to_string())?;
    if config.server.bind_addr().map_err(|err| err.to_string())? != expected {
        return Err("default bind mismatch".to_string());
    }
    if config.server.max_body_bytes != 16 * 1024 {
        return Err(format!("unexpected max_body_bytes {}", config.server.max_body_bytes));
    }
    if !config.server.security_headers {
        return Err("security headers should default on".to_string());
    }
    if config.i18n.catalog_dir != "messages" || config.i18n.locale_detection {
        return Err("unexpected i18n defaults".to_string());
    }
    if !config.audit.enabled || config.audit.path.is_some() {
        return Err("audit should default to enabled on stderr".to_string());
    }
    Ok(())
}

#[test]
fn invalid_bind_is_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[server]\nbind = \"localhost\"\n"),
        "invalid server.bind address",
    )
}

#[test]
fn zero_body_limit_is_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[server]\nmax_body_bytes = 0\n"),
        "greater than zero",
    )
}

#[test]
fn oversized_body_limit_is_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[server]\nmax_body_bytes = 2097152\n"),
        "at most",
    )
}

#[test]
fn empty_catalog_dir_is_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[i18n]\ncatalog_dir = \"  \"\n"),
        "i18n.catalog_dir must be non-empty",
    )
}

#[test]
fn empty_audit_path_is_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[audit]\npath = \"\"\n"),
        "audit.path must be non-empty",
    )
}

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[server]\nport = 3000\n"),
        "config parse error",
    )
}

// ============================================================================
// SECTION: Localized Pathnames
// ============================================================================

#[test]
fn pathname_overrides_build_route_table() -> TestResult {
    let config = SiteConfig::from_toml_str(
        "[i18n.pathnames.contact]\ncs = \"/kontakt\"\nit = \"/contatti\"\n\n[i18n.pathnames.3cx]\nen = \"/telephony\"\n",
    )
    .map_err(|err| err.to_string())?;
    let table = config.i18n.route_table().map_err(|err| err.to_string())?;
    let checks = [
        (RouteKey::Contact, Locale::Cs, "/kontakt"),
        (RouteKey::Contact, Locale::It, "/contatti"),
        (RouteKey::Contact, Locale::En, "/contact"),
        (RouteKey::ThreeCx, Locale::En, "/telephony"),
    ];
    for (route, locale, expected) in checks {
        let actual = table.pathname(route, locale);
        if actual != expected {
            return Err(format!("{route} in {locale}: expected {expected}, got {actual}"));
        }
    }
    Ok(())
}

#[test]
fn unknown_route_in_pathnames_is_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[i18n.pathnames.blog]\ncs = \"/blog\"\n"),
        "unknown route key",
    )
}

#[test]
fn unsupported_locale_in_pathnames_is_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[i18n.pathnames.contact]\nfr = \"/contact-fr\"\n"),
        "unsupported locale",
    )
}

#[test]
fn home_pathname_override_is_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[i18n.pathnames.home]\nen = \"/start\"\n"),
        "home pathname cannot be overridden",
    )
}

#[test]
fn colliding_pathnames_are_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[i18n.pathnames.about]\ncs = \"/contact\"\n"),
        "is used by both",
    )
}

#[test]
fn locale_tag_pathname_is_rejected() -> TestResult {
    common::assert_invalid(
        SiteConfig::from_toml_str("[i18n.pathnames.about]\ncs = \"/en/about\"\n"),
        "must not be a locale tag",
    )
}
