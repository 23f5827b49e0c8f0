// crates/fl1-server/src/lib.rs
// ============================================================================
// Module: FL1 Server Library
// Description: HTTP front end for the localized FL1 site.
// Purpose: Serve locale-prefixed pages built from the shared i18n contract.
// Dependencies: axum, fl1-config, fl1-i18n, serde_json, tokio
// ============================================================================

//! ## Overview
//! `fl1-server` serves the FL1 marketing pages. Every request passes through
//! the [`fl1_i18n::LocaleRouter`]: unprefixed or unsupported paths are
//! redirected, known routes render localized HTML from the injected
//! [`fl1_i18n::CatalogSet`], and contact form posts are acknowledged with a
//! redacted audit record.

#![forbid(unsafe_code)]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod pages;
pub mod render;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::SiteAuditSink;
pub use audit::SiteFileAuditSink;
pub use audit::SiteNoopAuditSink;
pub use audit::SiteStderrAuditSink;
pub use pages::REQUIRED_KEYS;
pub use server::BoundServer;
pub use server::ServerError;
pub use server::SiteServer;
