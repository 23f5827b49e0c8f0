// crates/fl1-i18n/tests/common/mod.rs
// =============================================================================
// Module: i18n Test Helpers
// Description: Shared catalog fixtures for i18n integration tests.
// Purpose: Write catalog directories to disk and locate the shipped catalogs.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

/// Returns the repository `messages/` directory.
pub fn shipped_catalog_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../messages")
}

/// Writes one JSON file per locale into a fresh temporary directory.
pub fn write_catalog_dir(cs: &Value, en: &Value, it: &Value) -> Result<TempDir, String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    for (name, value) in [("cs", cs), ("en", en), ("it", it)] {
        let text = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
        fs::write(dir.path().join(format!("{name}.json")), text)
            .map_err(|err| err.to_string())?;
    }
    Ok(dir)
}

/// Czech catalog used as the default-locale reference.
pub fn czech() -> Value {
    json!({
        "common": {"nav": {"home": "Domů", "contact": "Kontakt"}},
        "home": {"hero": {"title": {"main": "Vaše transformace s", "highlight": "Odoo Magic"}}},
        "contact": {"hero": {"title": "Pojďme mluvit"}}
    })
}

/// English catalog with every Czech key translated.
pub fn english() -> Value {
    json!({
        "common": {"nav": {"home": "Home", "contact": "Contact"}},
        "home": {"hero": {"title": {"main": "Your transformation with", "highlight": "Odoo Magic"}}},
        "contact": {"hero": {"title": "Let's talk"}}
    })
}

/// Italian catalog that lacks `home.hero.title.highlight`.
pub fn italian_without_highlight() -> Value {
    json!({
        "common": {"nav": {"home": "Home", "contact": "Contatti"}},
        "home": {"hero": {"title": {"main": "La tua trasformazione con"}}},
        "contact": {"hero": {"title": "Parliamo"}}
    })
}
