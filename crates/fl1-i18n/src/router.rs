// crates/fl1-i18n/src/router.rs
// ============================================================================
// Module: Locale Router
// Description: Locale prefix resolution and locale-aware navigation.
// Purpose: Guarantee every in-app URL carries an explicit locale prefix.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`LocaleRouter`] owns the prefix policy ("always show locale prefix") and
//! the [`RouteTable`]. It splits request paths into a locale and a remainder,
//! builds canonical paths for routes, and produces redirect instructions.
//!
//! ## Invariants
//! - [`LocaleRouter::resolve_locale`] never fails; unrecognized prefixes are
//!   treated as absent and resolve to [`DEFAULT_LOCALE`] with a redirect.
//! - [`LocaleRouter::build_path`] is pure: identical inputs give identical
//!   output, and the first segment is always the locale tag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::locale::DEFAULT_LOCALE;
use crate::locale::Locale;
use crate::locale::is_locale_shaped;
use crate::route::RouteKey;
use crate::route::RouteTable;
use crate::route::normalize_pathname;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Why a request path must be redirected to its canonical form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// The path has no locale prefix.
    MissingPrefix,
    /// The first segment looks like a locale tag but is not supported.
    UnsupportedPrefix,
    /// The prefix names a supported locale in a non-canonical form (`EN`, `en-US`).
    NonCanonicalPrefix,
}

impl RedirectReason {
    /// Returns a stable label for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingPrefix => "missing_prefix",
            Self::UnsupportedPrefix => "unsupported_prefix",
            Self::NonCanonicalPrefix => "non_canonical_prefix",
        }
    }
}

/// Outcome of splitting a request path into locale and remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolution {
    /// Resolved locale (the default when no supported prefix was found).
    pub locale: Locale,
    /// Path after the locale prefix, always starting with `/`.
    pub remainder: String,
    /// Set when the request must be redirected to [`Self::canonical_path`].
    pub redirect: Option<RedirectReason>,
}

impl LocaleResolution {
    /// Returns true when the request path is not canonical.
    #[must_use]
    pub const fn needs_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    /// Returns the canonical locale-prefixed path.
    #[must_use]
    pub fn canonical_path(&self) -> String {
        prefixed(self.locale, &self.remainder)
    }

    /// Returns a copy resolved against a different locale.
    ///
    /// Used when the redirect target is negotiated rather than defaulted.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// Locale selected for the request being rendered.
///
/// Created once the locale prefix is resolved and dropped with the request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ActiveLocale(Locale);

impl ActiveLocale {
    /// Wraps a resolved locale.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self(locale)
    }

    /// Returns the active locale.
    #[must_use]
    pub const fn locale(self) -> Locale {
        self.0
    }
}

/// Redirect instruction produced by [`LocaleRouter::navigate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Target route.
    pub route: RouteKey,
    /// Target locale.
    pub locale: Locale,
    /// Locale-prefixed target URL.
    pub location: String,
}

impl Navigation {
    /// Appends a query string (without the leading `?`).
    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        if !query.is_empty() {
            self.location.push('?');
            self.location.push_str(query);
        }
        self
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Locale-aware router over a [`RouteTable`].
#[derive(Debug, Clone, Default)]
pub struct LocaleRouter {
    /// Route to pathname mapping.
    table: RouteTable,
}

impl LocaleRouter {
    /// Creates a router over `table`.
    #[must_use]
    pub const fn new(table: RouteTable) -> Self {
        Self {
            table,
        }
    }

    /// Returns the underlying route table.
    #[must_use]
    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Splits `request_path` into a locale and the remaining path.
    ///
    /// Unrecognized or missing prefixes resolve to [`DEFAULT_LOCALE`] and
    /// request a redirect. A locale-shaped but unsupported first segment is
    /// dropped, so `/fr/contact` resolves to `/cs/contact`.
    #[must_use]
    pub fn resolve_locale(&self, request_path: &str) -> LocaleResolution {
        let segments: Vec<&str> =
            request_path.split('/').filter(|segment| !segment.is_empty()).collect();
        let Some((first, rest)) = segments.split_first() else {
            return LocaleResolution {
                locale: DEFAULT_LOCALE,
                remainder: "/".to_string(),
                redirect: Some(RedirectReason::MissingPrefix),
            };
        };
        let remainder = join_segments(rest);
        if let Some(locale) = Locale::from_canonical(first) {
            return LocaleResolution {
                locale,
                remainder,
                redirect: None,
            };
        }
        if is_locale_shaped(first) && !self.table.is_route_segment(first) {
            if let Some(locale) = Locale::parse(first) {
                return LocaleResolution {
                    locale,
                    remainder,
                    redirect: Some(RedirectReason::NonCanonicalPrefix),
                };
            }
            return LocaleResolution {
                locale: DEFAULT_LOCALE,
                remainder,
                redirect: Some(RedirectReason::UnsupportedPrefix),
            };
        }
        LocaleResolution {
            locale: DEFAULT_LOCALE,
            remainder: join_segments(&segments),
            redirect: Some(RedirectReason::MissingPrefix),
        }
    }

    /// Returns the request path with its locale prefix removed.
    #[must_use]
    pub fn pathname(&self, request_path: &str) -> String {
        self.resolve_locale(request_path).remainder
    }

    /// Builds the canonical URL path for `route` in `locale`.
    #[must_use]
    pub fn build_path(&self, route: RouteKey, locale: Locale) -> String {
        prefixed(locale, self.table.pathname(route, locale))
    }

    /// Finds the route addressed by `remainder` in `locale`.
    #[must_use]
    pub fn match_route(&self, locale: Locale, remainder: &str) -> Option<RouteKey> {
        self.table.lookup(locale, remainder)
    }

    /// Rebuilds `current_path` for `target`; unknown pages map to the target home.
    #[must_use]
    pub fn switch_locale_path(&self, current_path: &str, target: Locale) -> String {
        let resolution = self.resolve_locale(current_path);
        let route =
            self.match_route(resolution.locale, &resolution.remainder).unwrap_or(RouteKey::Home);
        self.build_path(route, target)
    }

    /// Produces a redirect to `route`, using the active locale when `locale` is omitted.
    #[must_use]
    pub fn navigate(
        &self,
        active: ActiveLocale,
        route: RouteKey,
        locale: Option<Locale>,
    ) -> Navigation {
        let locale = locale.unwrap_or_else(|| active.locale());
        Navigation {
            route,
            locale,
            location: self.build_path(route, locale),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Joins path segments into a normalized absolute path.
fn join_segments(segments: &[&str]) -> String {
    normalize_pathname(&segments.join("/"))
}

/// Prefixes a normalized pathname with a locale tag.
fn prefixed(locale: Locale, pathname: &str) -> String {
    if pathname == "/" { format!("/{locale}") } else { format!("/{locale}{pathname}") }
}
