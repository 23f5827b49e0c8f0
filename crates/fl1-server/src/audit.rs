// crates/fl1-server/src/audit.rs
// ============================================================================
// Module: Site Audit Logging
// Description: Structured audit events for page requests and form intake.
// Purpose: Emit redacted JSON-line audit records without hard dependencies.
// Dependencies: fl1-i18n, serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events are plain serializable structs written one JSON object per
//! line. Sinks decide where the lines go; the server only depends on the
//! [`SiteAuditSink`] trait.
//!
//! ## Invariants
//! - Contact submissions never carry field values, only lengths.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use fl1_i18n::CoverageReport;
use fl1_i18n::Locale;
use fl1_i18n::RedirectReason;
use fl1_i18n::RouteKey;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Page request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: String,
    /// Request path (query string excluded).
    pub path: String,
    /// Resolved locale.
    pub locale: Locale,
    /// Matched route, if any.
    pub route: Option<RouteKey>,
    /// Response status code.
    pub status: u16,
    /// Redirect reason when the path was not canonical.
    pub redirect: Option<RedirectReason>,
    /// Handling time in milliseconds.
    pub duration_ms: u128,
}

/// Inputs required to construct a request audit event.
pub struct RequestAuditParams {
    /// HTTP method.
    pub method: String,
    /// Request path (query string excluded).
    pub path: String,
    /// Resolved locale.
    pub locale: Locale,
    /// Matched route, if any.
    pub route: Option<RouteKey>,
    /// Response status code.
    pub status: u16,
    /// Redirect reason when the path was not canonical.
    pub redirect: Option<RedirectReason>,
    /// Handling time in milliseconds.
    pub duration_ms: u128,
}

/// Contact form audit event payload (lengths only).
#[derive(Debug, Clone, Serialize)]
pub struct ContactAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Locale the form was submitted from.
    pub locale: Locale,
    /// Whether all required fields were present.
    pub accepted: bool,
    /// Character count of every non-empty known field.
    pub field_lengths: BTreeMap<&'static str, usize>,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Catalog coverage audit event payload, emitted once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Directory the catalogs were loaded from.
    pub catalog_dir: String,
    /// Whether every locale covers every default-locale key.
    pub complete: bool,
    /// Per-locale coverage.
    pub coverage: CoverageReport,
}

/// Server lifecycle audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Lifecycle phase label.
    pub phase: &'static str,
    /// Bound listener address.
    pub bind: String,
    /// Whether static security headers are attached.
    pub security_headers: bool,
    /// Whether `Accept-Language` negotiation is enabled.
    pub locale_detection: bool,
}

impl RequestAuditEvent {
    /// Creates a new request audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RequestAuditParams) -> Self {
        Self {
            event: "request_audit",
            timestamp_ms: now_ms(),
            method: params.method,
            path: params.path,
            locale: params.locale,
            route: params.route,
            status: params.status,
            redirect: params.redirect,
            duration_ms: params.duration_ms,
        }
    }
}

impl ContactAuditEvent {
    /// Creates a contact audit event from field lengths.
    #[must_use]
    pub fn new(
        locale: Locale,
        accepted: bool,
        field_lengths: BTreeMap<&'static str, usize>,
    ) -> Self {
        Self {
            event: "contact_submission",
            timestamp_ms: now_ms(),
            locale,
            accepted,
            field_lengths,
            redaction: "lengths_only",
        }
    }
}

impl CatalogAuditEvent {
    /// Creates a catalog audit event from a coverage report.
    #[must_use]
    pub fn new(catalog_dir: &Path, coverage: CoverageReport) -> Self {
        Self {
            event: "catalog_audit",
            timestamp_ms: now_ms(),
            catalog_dir: catalog_dir.display().to_string(),
            complete: coverage.is_complete(),
            coverage,
        }
    }
}

impl LifecycleAuditEvent {
    /// Creates a lifecycle audit event.
    #[must_use]
    pub fn new(
        phase: &'static str,
        bind: String,
        security_headers: bool,
        locale_detection: bool,
    ) -> Self {
        Self {
            event: "server_lifecycle",
            timestamp_ms: now_ms(),
            phase,
            bind,
            security_headers,
            locale_detection,
        }
    }
}

/// Milliseconds since the Unix epoch (zero if the clock is before it).
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for site events.
pub trait SiteAuditSink: Send + Sync {
    /// Record a page request event.
    fn record_request(&self, event: &RequestAuditEvent);

    /// Record a contact form submission.
    fn record_contact(&self, _event: &ContactAuditEvent) {}

    /// Record the startup catalog coverage report.
    fn record_catalog(&self, _event: &CatalogAuditEvent) {}

    /// Record a server lifecycle transition.
    fn record_lifecycle(&self, _event: &LifecycleAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct SiteStderrAuditSink;

impl SiteAuditSink for SiteStderrAuditSink {
    fn record_request(&self, event: &RequestAuditEvent) {
        write_line(&mut io::stderr(), event);
    }

    fn record_contact(&self, event: &ContactAuditEvent) {
        write_line(&mut io::stderr(), event);
    }

    fn record_catalog(&self, event: &CatalogAuditEvent) {
        write_line(&mut io::stderr(), event);
    }

    fn record_lifecycle(&self, event: &LifecycleAuditEvent) {
        write_line(&mut io::stderr(), event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct SiteFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl SiteFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event under the file lock.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(mut file) = self.file.lock() {
            write_line(&mut *file, event);
            let _ = file.flush();
        }
    }
}

impl SiteAuditSink for SiteFileAuditSink {
    fn record_request(&self, event: &RequestAuditEvent) {
        self.append(event);
    }

    fn record_contact(&self, event: &ContactAuditEvent) {
        self.append(event);
    }

    fn record_catalog(&self, event: &CatalogAuditEvent) {
        self.append(event);
    }

    fn record_lifecycle(&self, event: &LifecycleAuditEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct SiteNoopAuditSink;

impl SiteAuditSink for SiteNoopAuditSink {
    fn record_request(&self, _event: &RequestAuditEvent) {}
}

/// Serializes `event` as one JSON line; serialization failures are dropped.
fn write_line<W: Write, T: Serialize>(writer: &mut W, event: &T) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(writer, "{payload}");
    }
}
