// crates/fl1-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for fl1-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::PathBuf;

use fl1_config::ConfigError;
use fl1_config::SiteConfig;
use tempfile::TempDir;

/// Parses a TOML string into a `SiteConfig` without validation.
pub fn config_from_toml(toml_str: &str) -> Result<SiteConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<SiteConfig, toml::de::Error> {
    config_from_toml("")
}

/// Writes `contents` to `fl1-site.toml` in a fresh temporary directory.
pub fn write_config(contents: &[u8]) -> Result<(TempDir, PathBuf), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("fl1-site.toml");
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok((dir, path))
}

/// Checks that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
