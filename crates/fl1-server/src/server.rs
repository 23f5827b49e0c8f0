// crates/fl1-server/src/server.rs
// ============================================================================
// Module: Site Server
// Description: Axum HTTP server for locale-prefixed site pages.
// Purpose: Redirect to canonical locale paths and render localized pages.
// Dependencies: axum, fl1-config, fl1-i18n, time, tokio, url
// ============================================================================

//! ## Overview
//! [`SiteServer`] is built once from [`SiteConfig`]: catalogs are loaded and
//! checked against [`REQUIRED_KEYS`] before any socket is bound. Requests are
//! handled by a single fallback handler that delegates to a pure dispatch
//! function:
//!
//! - non-canonical paths answer `307` to the canonical locale-prefixed path,
//! - known routes render localized HTML,
//! - `POST` to the contact route records a redacted audit event and answers `303`,
//! - everything else is a localized `404`.
//!
//! Bodies are read inside the handler under `server.max_body_bytes`, so a
//! rejected oversized body is audited like any other request.
//!
//! ## Invariants
//! - Every `Location` header the server emits starts with a locale segment.
//! - Shared state is immutable after construction; no request mutates it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header;
use axum::middleware;
use axum::response::IntoResponse;
use axum::response::Response;
use fl1_config::AuditConfig;
use fl1_config::SiteConfig;
use fl1_i18n::ActiveLocale;
use fl1_i18n::CatalogSet;
use fl1_i18n::Locale;
use fl1_i18n::LocaleRouter;
use fl1_i18n::RedirectReason;
use fl1_i18n::RouteKey;
use http_body_util::BodyExt;
use http_body_util::LengthLimitError;
use http_body_util::Limited;
use tokio::net::TcpListener;

use crate::audit::CatalogAuditEvent;
use crate::audit::ContactAuditEvent;
use crate::audit::LifecycleAuditEvent;
use crate::audit::RequestAuditEvent;
use crate::audit::RequestAuditParams;
use crate::audit::SiteAuditSink;
use crate::audit::SiteFileAuditSink;
use crate::audit::SiteNoopAuditSink;
use crate::audit::SiteStderrAuditSink;
use crate::pages::CONTACT_FIELDS;
use crate::pages::CONTACT_REQUIRED_FIELDS;
use crate::pages::REQUIRED_KEYS;
use crate::pages::is_service_value;
use crate::render::ContactNotice;
use crate::render::RenderContext;
use crate::render::render_not_found;
use crate::render::render_page;

// ============================================================================
// SECTION: Site Server
// ============================================================================

/// Site server instance.
pub struct SiteServer {
    /// Validated configuration.
    config: SiteConfig,
    /// Shared request state.
    state: Arc<ServerState>,
}

impl SiteServer {
    /// Builds a server from configuration, loading catalogs from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration, catalogs or the audit sink
    /// cannot be initialized.
    pub fn from_config(config: SiteConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let audit = build_audit_sink(&config.audit)?;
        let catalogs = CatalogSet::load_dir(config.i18n.catalog_dir())
            .map_err(|err| ServerError::Catalog(err.to_string()))?;
        Self::with_parts(config, Arc::new(catalogs), audit)
    }

    /// Builds a server from already loaded catalogs and an audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the route table is invalid or the default
    /// catalog lacks a key listed in [`REQUIRED_KEYS`].
    pub fn with_parts(
        config: SiteConfig,
        catalogs: Arc<CatalogSet>,
        audit: Arc<dyn SiteAuditSink>,
    ) -> Result<Self, ServerError> {
        let table = config.i18n.route_table().map_err(|err| ServerError::Config(err.to_string()))?;
        let missing = catalogs.missing_required(REQUIRED_KEYS);
        if !missing.is_empty() {
            return Err(ServerError::MissingKeys(missing));
        }
        audit.record_catalog(&CatalogAuditEvent::new(
            config.i18n.catalog_dir(),
            catalogs.coverage(),
        ));
        let state = Arc::new(ServerState {
            router: LocaleRouter::new(table),
            catalogs,
            audit,
            locale_detection: config.i18n.locale_detection,
            max_body_bytes: config.server.max_body_bytes,
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the axum application serving every site path.
    #[must_use]
    pub fn app(&self) -> Router {
        build_app(Arc::clone(&self.state), self.config.server.security_headers)
    }

    /// Binds the configured listener address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the address is invalid or cannot be bound.
    pub async fn bind(self) -> Result<BoundServer, ServerError> {
        let addr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| ServerError::Transport(format!("bind {addr} failed: {err}")))?;
        let local_addr = listener
            .local_addr()
            .map_err(|err| ServerError::Transport(format!("local address unavailable: {err}")))?;
        self.state.audit.record_lifecycle(&LifecycleAuditEvent::new(
            "listening",
            local_addr.to_string(),
            self.config.server.security_headers,
            self.state.locale_detection,
        ));
        Ok(BoundServer {
            app: self.app(),
            listener,
            local_addr,
            audit: Arc::clone(&self.state.audit),
            security_headers: self.config.server.security_headers,
            locale_detection: self.state.locale_detection,
        })
    }

    /// Binds and serves until interrupted.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        self.bind().await?.run().await
    }
}

/// Server with a bound listener, ready to accept connections.
pub struct BoundServer {
    /// Application router.
    app: Router,
    /// Bound TCP listener.
    listener: TcpListener,
    /// Address the listener is bound to.
    local_addr: SocketAddr,
    /// Audit sink for lifecycle events.
    audit: Arc<dyn SiteAuditSink>,
    /// Whether static security headers are attached.
    security_headers: bool,
    /// Whether `Accept-Language` negotiation is enabled.
    locale_detection: bool,
}

impl BoundServer {
    /// Returns the bound address (useful when binding port 0).
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves requests until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when the server fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let result = axum::serve(self.listener, self.app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")));
        self.audit.record_lifecycle(&LifecycleAuditEvent::new(
            "stopped",
            self.local_addr.to_string(),
            self.security_headers,
            self.locale_detection,
        ));
        result
    }
}

/// Builds the audit sink selected by configuration.
fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn SiteAuditSink>, ServerError> {
    if !config.enabled {
        return Ok(Arc::new(SiteNoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = SiteFileAuditSink::new(Path::new(path.trim()))
                .map_err(|err| ServerError::Audit(format!("{path}: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(SiteStderrAuditSink)),
    }
}

// ============================================================================
// SECTION: HTTP Handling
// ============================================================================

/// Shared server state for request handlers.
pub(crate) struct ServerState {
    /// Locale router with the configured route table.
    pub(crate) router: LocaleRouter,
    /// Immutable catalogs shared by every request.
    pub(crate) catalogs: Arc<CatalogSet>,
    /// Audit sink.
    pub(crate) audit: Arc<dyn SiteAuditSink>,
    /// Negotiate redirect locales from `Accept-Language`.
    pub(crate) locale_detection: bool,
    /// Largest accepted request body in bytes.
    pub(crate) max_body_bytes: usize,
}

/// Builds the axum router around the fallback handler.
fn build_app(state: Arc<ServerState>, security_headers: bool) -> Router {
    let app = Router::new().fallback(handle_request).with_state(state);
    if security_headers { app.layer(middleware::map_response(add_security_headers)) } else { app }
}

/// Handles every request and records its audit event.
async fn handle_request(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let started = Instant::now();
    let outcome = match read_body(body, state.max_body_bytes).await {
        Ok(body) => {
            let request = SiteRequest {
                method: &method,
                path: uri.path(),
                query: uri.query(),
                headers: &headers,
                body: &body,
            };
            dispatch(&state, &request, current_year())
        }
        Err(status) => rejected_body(&state, uri.path(), status),
    };
    state.audit.record_request(&RequestAuditEvent::new(RequestAuditParams {
        method: method.to_string(),
        path: uri.path().to_string(),
        locale: outcome.locale,
        route: outcome.route,
        status: outcome.response.status().as_u16(),
        redirect: outcome.redirect,
        duration_ms: started.elapsed().as_millis(),
    }));
    outcome.response
}

/// Collects a request body, failing with `413` past `limit` bytes.
pub(crate) async fn read_body(body: Body, limit: usize) -> Result<Bytes, StatusCode> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.is::<LengthLimitError>() => Err(StatusCode::PAYLOAD_TOO_LARGE),
        Err(_) => Err(StatusCode::BAD_REQUEST),
    }
}

/// Outcome for a request whose body could not be read.
pub(crate) fn rejected_body(state: &ServerState, path: &str, status: StatusCode) -> Outcome {
    let resolution = state.router.resolve_locale(path);
    let route = if resolution.redirect.is_none() {
        state.router.match_route(resolution.locale, &resolution.remainder)
    } else {
        None
    };
    Outcome {
        response: status.into_response(),
        locale: resolution.locale,
        route,
        redirect: None,
    }
}

/// Borrowed view of an incoming request.
pub(crate) struct SiteRequest<'a> {
    /// HTTP method.
    pub(crate) method: &'a Method,
    /// Request path.
    pub(crate) path: &'a str,
    /// Raw query string, if any.
    pub(crate) query: Option<&'a str>,
    /// Request headers.
    pub(crate) headers: &'a HeaderMap,
    /// Request body.
    pub(crate) body: &'a [u8],
}

/// Response plus the routing facts recorded in the audit log.
pub(crate) struct Outcome {
    /// HTTP response.
    pub(crate) response: Response,
    /// Locale the request resolved to.
    pub(crate) locale: Locale,
    /// Matched route, if any.
    pub(crate) route: Option<RouteKey>,
    /// Redirect reason for non-canonical paths.
    pub(crate) redirect: Option<RedirectReason>,
}

/// Routes one request to a redirect, page, form intake or 404.
pub(crate) fn dispatch(state: &ServerState, request: &SiteRequest<'_>, year: i32) -> Outcome {
    let mut resolution = state.router.resolve_locale(request.path);
    if let Some(reason) = resolution.redirect {
        if state.locale_detection
            && reason != RedirectReason::NonCanonicalPrefix
            && let Some(negotiated) = request
                .headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .and_then(Locale::negotiate)
        {
            resolution = resolution.with_locale(negotiated);
        }
        let mut location = resolution.canonical_path();
        if let Some(query) = request.query.filter(|query| !query.is_empty()) {
            location.push('?');
            location.push_str(query);
        }
        return Outcome {
            response: redirect_response(
                StatusCode::TEMPORARY_REDIRECT,
                location,
                state.locale_detection,
            ),
            locale: resolution.locale,
            route: state.router.match_route(resolution.locale, &resolution.remainder),
            redirect: Some(reason),
        };
    }

    let locale = resolution.locale;
    let route = state.router.match_route(locale, &resolution.remainder);
    let ctx = RenderContext {
        router: &state.router,
        catalogs: &state.catalogs,
        locale,
        year,
    };
    let is_read = request.method == Method::GET || request.method == Method::HEAD;
    let response = match route {
        Some(route) if is_read => {
            let notice = if route == RouteKey::Contact && has_query_flag(request.query, "sent") {
                ContactNotice::Sent
            } else {
                ContactNotice::None
            };
            html_response(StatusCode::OK, locale, render_page(&ctx, route, notice))
        }
        Some(RouteKey::Contact) if request.method == Method::POST => {
            handle_contact(state, &ctx, request)
        }
        Some(RouteKey::Contact) => method_not_allowed("GET, HEAD, POST"),
        Some(_) => method_not_allowed("GET, HEAD"),
        None => html_response(StatusCode::NOT_FOUND, locale, render_not_found(&ctx, request.path)),
    };
    Outcome {
        response,
        locale,
        route,
        redirect: None,
    }
}

// ============================================================================
// SECTION: Contact Intake
// ============================================================================

/// Accepts a contact form post; only field lengths reach the audit log.
fn handle_contact(
    state: &ServerState,
    ctx: &RenderContext<'_>,
    request: &SiteRequest<'_>,
) -> Response {
    if !is_form_content(request.headers) {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }
    let fields = parse_contact_form(request.body);
    let accepted = CONTACT_REQUIRED_FIELDS
        .iter()
        .all(|name| fields.get(name).is_some_and(|value| !value.is_empty()))
        && fields.get("service").is_some_and(|value| is_service_value(value));
    let lengths = fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (*name, value.chars().count()))
        .collect();
    state.audit.record_contact(&ContactAuditEvent::new(ctx.locale, accepted, lengths));
    if !accepted {
        return html_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            ctx.locale,
            render_page(ctx, RouteKey::Contact, ContactNotice::Invalid),
        );
    }
    let target = state
        .router
        .navigate(ActiveLocale::new(ctx.locale), RouteKey::Contact, None)
        .with_query("sent=1");
    redirect_response(StatusCode::SEE_OTHER, target.location, false)
}

/// Extracts known contact fields from an urlencoded body; the first value wins.
pub(crate) fn parse_contact_form(body: &[u8]) -> BTreeMap<&'static str, String> {
    let mut fields = BTreeMap::new();
    for (name, value) in url::form_urlencoded::parse(body) {
        if let Some(field) = CONTACT_FIELDS.iter().find(|field| **field == name) {
            fields.entry(*field).or_insert_with(|| value.trim().to_string());
        }
    }
    fields
}

/// Returns true when the request body is declared as an urlencoded form.
fn is_form_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Builds a localized HTML response.
fn html_response(status: StatusCode, locale: Locale, body: String) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_LANGUAGE, locale.as_str()),
        ],
        body,
    )
        .into_response()
}

/// Builds a redirect; `vary` marks the target as header-dependent.
fn redirect_response(status: StatusCode, location: String, vary: bool) -> Response {
    let mut response = (status, [(header::LOCATION, location)]).into_response();
    if vary {
        response.headers_mut().insert(header::VARY, HeaderValue::from_static("accept-language"));
    }
    response
}

/// Builds a `405` response listing the allowed methods.
fn method_not_allowed(allow: &'static str) -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, allow)]).into_response()
}

/// Attaches the static security headers to a response.
async fn add_security_headers(mut response: Response) -> Response {
    apply_security_headers(response.headers_mut());
    response
}

/// Inserts the static security headers.
pub(crate) fn apply_security_headers(headers: &mut HeaderMap) {
    headers.insert(header::X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("on"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("origin-when-cross-origin"));
}

/// Returns true when `query` contains `name=1`.
fn has_query_flag(query: Option<&str>, name: &str) -> bool {
    query.is_some_and(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .any(|(key, value)| key == name && value == "1")
    })
}

/// Current UTC year for the footer.
fn current_year() -> i32 {
    time::OffsetDateTime::now_utc().year()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Site server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Catalog loading errors.
    #[error("catalog error: {0}")]
    Catalog(String),
    /// The default catalog lacks keys the pages render.
    #[error("default catalog is missing required keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),
    /// Audit sink initialization errors.
    #[error("audit error: {0}")]
    Audit(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
