// crates/fl1-config/src/lib.rs
// ============================================================================
// Module: FL1 Config Library
// Description: Site configuration model and validation.
// Purpose: Single source of truth for fl1-site.toml semantics.
// Dependencies: fl1-i18n, serde, toml
// ============================================================================

//! ## Overview
//! `fl1-config` defines the configuration model for the FL1 site server and
//! CLI. Loading is strict and fail-closed: oversized, non-UTF-8, malformed or
//! inconsistent files are rejected before anything binds a socket.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
