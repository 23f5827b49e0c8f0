// crates/fl1-server/src/render.rs
// ============================================================================
// Module: Page Rendering
// Description: Minimal localized HTML skeleton for site pages.
// Purpose: Turn catalog strings and router paths into escaped HTML.
// Dependencies: fl1-i18n
// ============================================================================

//! ## Overview
//! Rendering is a pure function of the router, the catalogs, the active
//! locale and the copyright year. Every interpolated string goes through
//! [`escape_html`]; every link comes from the router so it carries a locale
//! prefix.

// ============================================================================
// SECTION: Imports
// ============================================================================

use fl1_i18n::CatalogSet;
use fl1_i18n::Locale;
use fl1_i18n::LocaleRouter;
use fl1_i18n::MessageArg;
use fl1_i18n::RouteKey;
use fl1_i18n::SUPPORTED_LOCALES;
use fl1_i18n::Translator;

use crate::pages::CONTACT_FIELDS;
use crate::pages::CONTACT_REQUIRED_FIELDS;
use crate::pages::DESCRIPTION_KEY;
use crate::pages::HIGHLIGHTS_KEY;
use crate::pages::PageDescriptor;
use crate::pages::SERVICE_ROUTES;
use crate::pages::TITLE_KEY;
use crate::pages::page;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Status banner shown above the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactNotice {
    /// No banner.
    None,
    /// The previous submission was accepted.
    Sent,
    /// The previous submission lacked required fields.
    Invalid,
}

/// Inputs shared by every page of one response.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Router used for every link.
    pub router: &'a LocaleRouter,
    /// Loaded catalogs.
    pub catalogs: &'a CatalogSet,
    /// Active locale.
    pub locale: Locale,
    /// Year shown in the footer.
    pub year: i32,
}

impl<'a> RenderContext<'a> {
    /// Returns a translator for the active locale.
    fn translator(&self) -> Translator<'a> {
        self.catalogs.translator(self.locale)
    }
}

// ============================================================================
// SECTION: Pages
// ============================================================================

/// Renders the page for `route`.
#[must_use]
pub fn render_page(ctx: &RenderContext<'_>, route: RouteKey, notice: ContactNotice) -> String {
    let descriptor = page(route);
    let t = ctx.translator().scoped(descriptor.namespace);
    let mut main = String::new();
    main.push_str(&heading(&t, &descriptor));
    main.push_str(&format!("<p>{}</p>\n", escape_html(&t.t(DESCRIPTION_KEY))));
    main.push_str(&list(&t.t_list(HIGHLIGHTS_KEY)));
    if route == RouteKey::Contact {
        main.push_str(&contact_form(ctx, &t, notice));
    }
    let current = ctx.router.build_path(route, ctx.locale);
    layout(ctx, &t.t(TITLE_KEY), Some(route), &current, &main)
}

/// Renders the localized not-found page for `request_path`.
#[must_use]
pub fn render_not_found(ctx: &RenderContext<'_>, request_path: &str) -> String {
    let t = ctx.translator().scoped("common.notFound");
    let home = ctx.router.build_path(RouteKey::Home, ctx.locale);
    let main = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"{}\">{}</a></p>\n",
        escape_html(&t.t("title")),
        escape_html(&t.t("description")),
        escape_html(&home),
        escape_html(&t.t("backHome")),
    );
    layout(ctx, &t.t("title"), None, request_path, &main)
}

/// Renders the page heading; parts after the first are highlighted.
fn heading(t: &Translator<'_>, descriptor: &PageDescriptor) -> String {
    let mut parts = descriptor.heading.iter();
    let mut html = String::from("<h1>");
    if let Some(first) = parts.next() {
        html.push_str(&escape_html(&t.t(first)));
    }
    for part in parts {
        html.push_str(&format!(
            " <span class=\"highlight\">{}</span>",
            escape_html(&t.t(part))
        ));
    }
    html.push_str("</h1>\n");
    html
}

/// Renders an unordered list of plain items.
fn list(items: &[String]) -> String {
    let mut html = String::from("<ul class=\"highlights\">\n");
    for item in items {
        html.push_str(&format!("<li>{}</li>\n", escape_html(item)));
    }
    html.push_str("</ul>\n");
    html
}

/// Renders the contact form posting back to the localized contact path.
fn contact_form(ctx: &RenderContext<'_>, t: &Translator<'_>, notice: ContactNotice) -> String {
    let form = t.scoped("form");
    let mut html = String::new();
    match notice {
        ContactNotice::Sent => html.push_str(&format!(
            "<p class=\"notice\" role=\"status\">{}</p>\n",
            escape_html(&form.t("sent"))
        )),
        ContactNotice::Invalid => html.push_str(&format!(
            "<p class=\"notice error\" role=\"alert\">{}</p>\n",
            escape_html(&form.t("invalid"))
        )),
        ContactNotice::None => {}
    }
    let action = ctx.router.build_path(RouteKey::Contact, ctx.locale);
    html.push_str(&format!("<form method=\"post\" action=\"{}\">\n", escape_html(&action)));
    let nav = ctx.translator().scoped("common.nav");
    for field in CONTACT_FIELDS {
        let label = escape_html(&form.t(field));
        let required = if CONTACT_REQUIRED_FIELDS.contains(field) { " required" } else { "" };
        let control = match *field {
            "message" => {
                format!("<textarea id=\"{field}\" name=\"{field}\"{required}></textarea>")
            }
            "service" => {
                let mut select = format!(
                    "<select id=\"{field}\" name=\"{field}\"{required}>\
                     <option value=\"\">{}</option>",
                    escape_html(&form.t("servicePlaceholder"))
                );
                for route in SERVICE_ROUTES {
                    let key = page(*route).nav_key;
                    select.push_str(&format!(
                        "<option value=\"{key}\">{}</option>",
                        escape_html(&nav.t(key))
                    ));
                }
                select.push_str("</select>");
                select
            }
            "email" => input(field, "email", required),
            "phone" => input(field, "tel", required),
            _ => input(field, "text", required),
        };
        html.push_str(&format!("<label for=\"{field}\">{label}</label>\n{control}\n"));
    }
    html.push_str(&format!(
        "<button type=\"submit\">{}</button>\n</form>\n",
        escape_html(&form.t("submit"))
    ));
    html
}

/// Renders a single-line form input.
fn input(field: &str, kind: &str, required: &str) -> String {
    format!("<input id=\"{field}\" name=\"{field}\" type=\"{kind}\"{required}>")
}

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Wraps `main` in the document skeleton with navigation and footer.
fn layout(
    ctx: &RenderContext<'_>,
    title: &str,
    active: Option<RouteKey>,
    current_path: &str,
    main: &str,
) -> String {
    let common = ctx.translator().scoped("common");
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"{locale}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<meta name=\"description\" content=\"{description}\">\n\
         </head>\n<body>\n<header>\n",
        locale = ctx.locale,
        title = escape_html(title),
        description = escape_html(&common.t("meta.description")),
    ));
    html.push_str(&format!(
        "<a class=\"brand\" href=\"{}\">{}</a>\n",
        escape_html(&ctx.router.build_path(RouteKey::Home, ctx.locale)),
        escape_html(&common.t("meta.title")),
    ));
    html.push_str(&navigation(ctx, &common.scoped("nav"), active));
    html.push_str(&language_switcher(ctx, &common.t("language"), current_path));
    html.push_str("</header>\n<main>\n");
    html.push_str(main);
    html.push_str("</main>\n<footer>\n");
    let copyright =
        common.t_with("footer.copyright", &[MessageArg::new("year", ctx.year.to_string())]);
    html.push_str(&format!("<p>{}</p>\n", escape_html(&copyright)));
    html.push_str("</footer>\n</body>\n</html>\n");
    html
}

/// Renders the main navigation with services grouped under one entry.
fn navigation(ctx: &RenderContext<'_>, nav: &Translator<'_>, active: Option<RouteKey>) -> String {
    let link = |route: RouteKey| {
        let current = if active == Some(route) { " aria-current=\"page\"" } else { "" };
        format!(
            "<a href=\"{}\"{current}>{}</a>",
            escape_html(&ctx.router.build_path(route, ctx.locale)),
            escape_html(&nav.t(page(route).nav_key)),
        )
    };
    let mut html = String::from("<nav>\n<ul>\n");
    html.push_str(&format!("<li>{}</li>\n", link(RouteKey::Home)));
    html.push_str(&format!("<li>{}</li>\n", link(RouteKey::About)));
    html.push_str(&format!("<li>{}\n<ul>\n", escape_html(&nav.t("services"))));
    for route in SERVICE_ROUTES {
        html.push_str(&format!("<li>{}</li>\n", link(*route)));
    }
    html.push_str("</ul>\n</li>\n");
    html.push_str(&format!("<li>{}</li>\n", link(RouteKey::Contact)));
    html.push_str("</ul>\n</nav>\n");
    html
}

/// Renders links to the current page in every supported locale.
fn language_switcher(ctx: &RenderContext<'_>, label: &str, current_path: &str) -> String {
    let mut html =
        format!("<ul class=\"language-switcher\" aria-label=\"{}\">\n", escape_html(label));
    for target in SUPPORTED_LOCALES {
        let href = ctx.router.switch_locale_path(current_path, *target);
        let current = if *target == ctx.locale { " aria-current=\"true\"" } else { "" };
        html.push_str(&format!(
            "<li><a href=\"{}\" hreflang=\"{target}\" lang=\"{target}\"{current}>{}</a></li>\n",
            escape_html(&href),
            escape_html(target.native_name()),
        ));
    }
    html.push_str("</ul>\n");
    html
}

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
