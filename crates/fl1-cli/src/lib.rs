// crates/fl1-cli/src/lib.rs
// ============================================================================
// Module: FL1 CLI Library
// Description: Shared helpers for the `fl1-site` binary.
// Purpose: Expose the CLI message catalog to the binary and its tests.
// Dependencies: fl1-i18n
// ============================================================================

//! ## Overview
//! The `fl1-site` binary routes every operator-facing string through
//! [`i18n`] so output follows `--lang` or `FL1_SITE_LANG`.

#![forbid(unsafe_code)]

pub mod i18n;

#[cfg(test)]
mod tests;
