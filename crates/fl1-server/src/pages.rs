// crates/fl1-server/src/pages.rs
// ============================================================================
// Module: Page Descriptors
// Description: Static description of what each route renders.
// Purpose: Declare every catalog key the page skeleton reads.
// Dependencies: fl1-i18n
// ============================================================================

//! ## Overview
//! Each route maps to a catalog namespace and a fixed set of relative keys.
//! [`REQUIRED_KEYS`] lists every fully qualified key the renderer reads; the
//! server refuses to start when the default catalog lacks one of them.

use fl1_i18n::RequiredKey;
use fl1_i18n::RouteKey;

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Catalog keys rendered for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    /// Route this page serves.
    pub route: RouteKey,
    /// Catalog namespace holding the page strings.
    pub namespace: &'static str,
    /// Heading parts; the first is plain text, the rest are highlighted.
    pub heading: &'static [&'static str],
    /// Key under `common.nav` labelling this route.
    pub nav_key: &'static str,
}

/// Relative key of the page title.
pub const TITLE_KEY: &str = "meta.title";
/// Relative key of the intro paragraph.
pub const DESCRIPTION_KEY: &str = "hero.description";
/// Relative key of the highlight list.
pub const HIGHLIGHTS_KEY: &str = "highlights";

/// Contact form field names, in display order.
pub const CONTACT_FIELDS: &[&str] = &["name", "email", "phone", "service", "message"];

/// Contact form fields that must be non-empty.
pub const CONTACT_REQUIRED_FIELDS: &[&str] = &["name", "email", "service", "message"];

/// Routes offered in the contact form's service selector.
pub const SERVICE_ROUTES: &[RouteKey] = &[
    RouteKey::OdooDev,
    RouteKey::ThreeCx,
    RouteKey::WebsiteDev,
    RouteKey::SuperchatIntegration,
];

/// Returns true when `value` is one of the service selector's option values.
#[must_use]
pub fn is_service_value(value: &str) -> bool {
    SERVICE_ROUTES.iter().any(|route| page(*route).nav_key == value)
}

/// Returns the descriptor for `route`.
#[must_use]
pub const fn page(route: RouteKey) -> PageDescriptor {
    match route {
        RouteKey::Home => PageDescriptor {
            route,
            namespace: "home",
            heading: &["hero.title.main", "hero.title.highlight"],
            nav_key: "home",
        },
        RouteKey::About => simple(route, "about", "about"),
        RouteKey::Contact => simple(route, "contact", "contact"),
        RouteKey::OdooDev => simple(route, "odooDev", "odoo-dev"),
        RouteKey::ThreeCx => simple(route, "3cx", "3cx"),
        RouteKey::WebsiteDev => simple(route, "websiteDev", "website-dev"),
        RouteKey::SuperchatIntegration => simple(route, "superChat", "superchat"),
    }
}

/// Descriptor for a page with a single-part heading.
const fn simple(
    route: RouteKey,
    namespace: &'static str,
    nav_key: &'static str,
) -> PageDescriptor {
    PageDescriptor {
        route,
        namespace,
        heading: &["hero.title"],
        nav_key,
    }
}

// ============================================================================
// SECTION: Required Keys
// ============================================================================

/// Every catalog key the page skeleton reads, with the shape it expects.
pub const REQUIRED_KEYS: &[RequiredKey] = &[
    RequiredKey::text("common.meta.title"),
    RequiredKey::text("common.meta.description"),
    RequiredKey::text("common.nav.home"),
    RequiredKey::text("common.nav.about"),
    RequiredKey::text("common.nav.contact"),
    RequiredKey::text("common.nav.services"),
    RequiredKey::text("common.nav.odoo-dev"),
    RequiredKey::text("common.nav.3cx"),
    RequiredKey::text("common.nav.website-dev"),
    RequiredKey::text("common.nav.superchat"),
    RequiredKey::text("common.language"),
    RequiredKey::text("common.notFound.title"),
    RequiredKey::text("common.notFound.description"),
    RequiredKey::text("common.notFound.backHome"),
    RequiredKey::text("common.footer.copyright"),
    RequiredKey::text("home.meta.title"),
    RequiredKey::text("home.hero.title.main"),
    RequiredKey::text("home.hero.title.highlight"),
    RequiredKey::text("home.hero.description"),
    RequiredKey::list("home.highlights"),
    RequiredKey::text("about.meta.title"),
    RequiredKey::text("about.hero.title"),
    RequiredKey::text("about.hero.description"),
    RequiredKey::list("about.highlights"),
    RequiredKey::text("contact.meta.title"),
    RequiredKey::text("contact.hero.title"),
    RequiredKey::text("contact.hero.description"),
    RequiredKey::list("contact.highlights"),
    RequiredKey::text("contact.form.name"),
    RequiredKey::text("contact.form.email"),
    RequiredKey::text("contact.form.phone"),
    RequiredKey::text("contact.form.service"),
    RequiredKey::text("contact.form.servicePlaceholder"),
    RequiredKey::text("contact.form.message"),
    RequiredKey::text("contact.form.submit"),
    RequiredKey::text("contact.form.sent"),
    RequiredKey::text("contact.form.invalid"),
    RequiredKey::text("odooDev.meta.title"),
    RequiredKey::text("odooDev.hero.title"),
    RequiredKey::text("odooDev.hero.description"),
    RequiredKey::list("odooDev.highlights"),
    RequiredKey::text("3cx.meta.title"),
    RequiredKey::text("3cx.hero.title"),
    RequiredKey::text("3cx.hero.description"),
    RequiredKey::list("3cx.highlights"),
    RequiredKey::text("websiteDev.meta.title"),
    RequiredKey::text("websiteDev.hero.title"),
    RequiredKey::text("websiteDev.hero.description"),
    RequiredKey::list("websiteDev.highlights"),
    RequiredKey::text("superChat.meta.title"),
    RequiredKey::text("superChat.hero.title"),
    RequiredKey::text("superChat.hero.description"),
    RequiredKey::list("superChat.highlights"),
];
