// crates/fl1-i18n/src/lib.rs
// ============================================================================
// Module: FL1 i18n
// Description: Locale routing and translation resolution for the FL1 site.
// Purpose: Provide the shared locale contract every page builds on.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `fl1-i18n` holds the two pieces every page depends on:
//!
//! - the [`LocaleRouter`], which owns the closed locale set, the "always show
//!   locale prefix" policy and the route table, and
//! - the [`Translator`], which resolves dotted keys against immutable
//!   per-locale [`MessageCatalog`]s with default-locale and raw-key fallback.
//!
//! Nothing in this crate performs I/O after [`CatalogSet::load_dir`] returns.

#![forbid(unsafe_code)]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod coverage;
pub mod locale;
pub mod route;
pub mod router;
pub mod translator;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::CatalogError;
pub use catalog::CatalogSet;
pub use catalog::LeafKind;
pub use catalog::MessageCatalog;
pub use catalog::RequiredKey;
pub use coverage::CoverageReport;
pub use coverage::LocaleCoverage;
pub use locale::DEFAULT_LOCALE;
pub use locale::Locale;
pub use locale::LocaleError;
pub use locale::SUPPORTED_LOCALES;
pub use route::ALL_ROUTES;
pub use route::RouteKey;
pub use route::RouteKeyError;
pub use route::RouteTable;
pub use route::RouteTableError;
pub use router::ActiveLocale;
pub use router::LocaleResolution;
pub use router::LocaleRouter;
pub use router::Navigation;
pub use router::RedirectReason;
pub use translator::MessageArg;
pub use translator::Translator;
pub use translator::format_message;
