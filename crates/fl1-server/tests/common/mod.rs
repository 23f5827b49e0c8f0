// crates/fl1-server/tests/common/mod.rs
// =============================================================================
// Module: Server Test Helpers
// Description: Spawn a bound site server against the shipped catalogs.
// Purpose: Share server setup across HTTP integration suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use fl1_config::SiteConfig;
use fl1_server::SiteServer;
use serde_json::Value;
use tempfile::TempDir;

/// Running server plus the directory holding its audit log.
pub struct SpawnedSite {
    /// Bound listener address.
    pub addr: SocketAddr,
    /// Temporary directory kept alive for the audit log.
    pub dir: TempDir,
}

impl SpawnedSite {
    /// Returns an absolute URL for `path` on the spawned server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Returns the audit log path.
    pub fn audit_path(&self) -> PathBuf {
        self.dir.path().join("audit.jsonl")
    }

    /// Reads every audit line written so far.
    pub fn audit_events(&self) -> Result<Vec<Value>, String> {
        let text = fs::read_to_string(self.audit_path()).map_err(|err| err.to_string())?;
        text.lines()
            .map(|line| serde_json::from_str(line).map_err(|err| err.to_string()))
            .collect()
    }
}

/// Returns the directory holding the shipped message catalogs.
pub fn shipped_catalog_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../messages")
}

/// Builds a config bound to an ephemeral port; `extra_i18n` is appended to `[i18n]`.
pub fn site_config(
    dir: &TempDir,
    security_headers: bool,
    extra_i18n: &str,
) -> Result<SiteConfig, String> {
    let toml = format!(
        "[server]\nbind = \"127.0.0.1:0\"\nsecurity_headers = {security_headers}\n\n\
         [i18n]\ncatalog_dir = \"{}\"\n{extra_i18n}\n\n\
         [audit]\nenabled = true\npath = \"{}\"\n",
        shipped_catalog_dir().display(),
        dir.path().join("audit.jsonl").display(),
    );
    SiteConfig::from_toml_str(&toml).map_err(|err| err.to_string())
}

/// Binds a server for `config` and serves it on a background task.
pub async fn spawn_with(config: SiteConfig, dir: TempDir) -> Result<SpawnedSite, String> {
    let server = SiteServer::from_config(config).map_err(|err| err.to_string())?;
    let bound = server.bind().await.map_err(|err| err.to_string())?;
    let addr = bound.local_addr();
    tokio::spawn(bound.run());
    Ok(SpawnedSite {
        addr,
        dir,
    })
}

/// Spawns a server with default settings and security headers enabled.
pub async fn spawn_site() -> Result<SpawnedSite, String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let config = site_config(&dir, true, "")?;
    spawn_with(config, dir).await
}

/// Returns a client that reports redirects instead of following them.
pub fn client() -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|err| err.to_string())
}

/// Returns a header value as text, or an empty string when absent.
pub fn header_text(response: &reqwest::Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
