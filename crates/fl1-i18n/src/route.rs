// crates/fl1-i18n/src/route.rs
// ============================================================================
// Module: Route Keys and Pathnames
// Description: Locale-independent page identifiers and their URL pathnames.
// Purpose: Keep the route set closed and the route-to-path mapping total.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`RouteKey`] names a page independently of any locale. The
//! [`RouteTable`] maps every `(route, locale)` pair to exactly one pathname:
//! a per-locale override when one is configured, otherwise the route's default
//! pathname. Because every lookup has a default, the mapping is total by
//! construction.
//!
//! ## Invariants
//! - Pathnames never include the locale prefix; the router adds it.
//! - Within one locale, no two routes share a pathname.
//! - The home route is always `/` and cannot be overridden.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::locale::Locale;
use crate::locale::SUPPORTED_LOCALES;

// ============================================================================
// SECTION: Route Keys
// ============================================================================

/// Locale-independent page identifiers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKey {
    /// Landing page.
    Home,
    /// Company profile.
    About,
    /// Contact details and enquiry form.
    Contact,
    /// Odoo development services.
    OdooDev,
    /// 3CX telephony services.
    #[serde(rename = "3cx")]
    ThreeCx,
    /// Website development services.
    WebsiteDev,
    /// `SuperChat` integration services.
    SuperchatIntegration,
}

/// Every route, in navigation order.
pub const ALL_ROUTES: &[RouteKey] = &[
    RouteKey::Home,
    RouteKey::About,
    RouteKey::Contact,
    RouteKey::OdooDev,
    RouteKey::ThreeCx,
    RouteKey::WebsiteDev,
    RouteKey::SuperchatIntegration,
];

impl RouteKey {
    /// Returns the stable textual key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Contact => "contact",
            Self::OdooDev => "odoo-dev",
            Self::ThreeCx => "3cx",
            Self::WebsiteDev => "website-dev",
            Self::SuperchatIntegration => "superchat-integration",
        }
    }

    /// Returns the pathname used when a locale has no override.
    #[must_use]
    pub const fn default_pathname(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Contact => "/contact",
            Self::OdooDev => "/odoo-dev",
            Self::ThreeCx => "/3cx",
            Self::WebsiteDev => "/website-dev",
            Self::SuperchatIntegration => "/superchat-integration",
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteKey {
    type Err = RouteKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ALL_ROUTES
            .iter()
            .copied()
            .find(|route| route.as_str() == value)
            .ok_or_else(|| RouteKeyError::Unknown(value.to_string()))
    }
}

/// Route key parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteKeyError {
    /// The key does not name a known page.
    #[error("unknown route key: {0}")]
    Unknown(String),
}

// ============================================================================
// SECTION: Route Table
// ============================================================================

/// Total mapping from `(route, locale)` to pathname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    /// Localized pathname overrides keyed by route then locale.
    overrides: BTreeMap<RouteKey, BTreeMap<Locale, String>>,
}

impl RouteTable {
    /// Builds a table that uses default pathnames for every locale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table with localized pathname overrides.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] when an override is malformed, targets the
    /// home route, or collides with another route in the same locale.
    pub fn with_overrides<I>(overrides: I) -> Result<Self, RouteTableError>
    where
        I: IntoIterator<Item = (RouteKey, Locale, String)>,
    {
        let mut table = Self::new();
        for (route, locale, pathname) in overrides {
            if route == RouteKey::Home {
                return Err(RouteTableError::HomeOverride {
                    locale,
                });
            }
            validate_pathname(&pathname).map_err(|reason| RouteTableError::InvalidPathname {
                route,
                locale,
                pathname: pathname.clone(),
                reason,
            })?;
            table.overrides.entry(route).or_default().insert(locale, pathname);
        }
        table.check_collisions()?;
        Ok(table)
    }

    /// Returns the pathname for `route` in `locale` (without locale prefix).
    #[must_use]
    pub fn pathname(&self, route: RouteKey, locale: Locale) -> &str {
        self.overrides
            .get(&route)
            .and_then(|by_locale| by_locale.get(&locale))
            .map_or_else(|| route.default_pathname(), String::as_str)
    }

    /// Finds the route whose pathname in `locale` equals `pathname`.
    ///
    /// Trailing slashes and repeated slashes are ignored.
    #[must_use]
    pub fn lookup(&self, locale: Locale, pathname: &str) -> Option<RouteKey> {
        let normalized = normalize_pathname(pathname);
        ALL_ROUTES
            .iter()
            .copied()
            .find(|route| self.pathname(*route, locale) == normalized)
    }

    /// Returns true when `segment` is the first segment of any route pathname
    /// in any locale.
    #[must_use]
    pub fn is_route_segment(&self, segment: &str) -> bool {
        SUPPORTED_LOCALES.iter().any(|locale| {
            ALL_ROUTES.iter().any(|route| {
                self.pathname(*route, *locale).split('/').nth(1).is_some_and(|first| {
                    !first.is_empty() && first == segment
                })
            })
        })
    }

    /// Verifies that no two routes share a pathname within one locale.
    fn check_collisions(&self) -> Result<(), RouteTableError> {
        for locale in SUPPORTED_LOCALES {
            let mut seen: BTreeMap<&str, RouteKey> = BTreeMap::new();
            for route in ALL_ROUTES {
                let pathname = self.pathname(*route, *locale);
                if let Some(existing) = seen.insert(pathname, *route) {
                    return Err(RouteTableError::Collision {
                        locale: *locale,
                        pathname: pathname.to_string(),
                        first: existing,
                        second: *route,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Route table construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    /// The home route pathname is fixed.
    #[error("home pathname cannot be overridden (locale {locale})")]
    HomeOverride {
        /// Locale of the rejected override.
        locale: Locale,
    },
    /// An override pathname is malformed.
    #[error("invalid pathname {pathname:?} for route {route} in locale {locale}: {reason}")]
    InvalidPathname {
        /// Route of the rejected override.
        route: RouteKey,
        /// Locale of the rejected override.
        locale: Locale,
        /// Rejected pathname.
        pathname: String,
        /// Why the pathname was rejected.
        reason: &'static str,
    },
    /// Two routes resolve to the same pathname in one locale.
    #[error("pathname {pathname} is used by both {first} and {second} in locale {locale}")]
    Collision {
        /// Locale where the collision occurs.
        locale: Locale,
        /// Shared pathname.
        pathname: String,
        /// Route that claimed the pathname first.
        first: RouteKey,
        /// Route that collided.
        second: RouteKey,
    },
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Collapses empty segments and strips trailing slashes; empty becomes `/`.
pub(crate) fn normalize_pathname(pathname: &str) -> String {
    let segments: Vec<&str> = pathname.split('/').filter(|segment| !segment.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

/// Validates an override pathname.
fn validate_pathname(pathname: &str) -> Result<(), &'static str> {
    let Some(rest) = pathname.strip_prefix('/') else {
        return Err("must start with '/'");
    };
    if rest.is_empty() {
        return Err("only the home route may use '/'");
    }
    for segment in rest.split('/') {
        if segment.is_empty() {
            return Err("must not contain empty segments or a trailing slash");
        }
        if !segment.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        {
            return Err("segments must use [a-z0-9-]");
        }
    }
    let first = rest.split('/').next().unwrap_or("");
    if Locale::from_canonical(first).is_some() {
        return Err("first segment must not be a locale tag");
    }
    Ok(())
}
