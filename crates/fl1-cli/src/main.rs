// crates/fl1-cli/src/main.rs
// ============================================================================
// Module: FL1 CLI Entry Point
// Description: Command dispatcher for serving and inspecting the FL1 site.
// Purpose: Run the localized site server and audit catalogs and routes.
// Dependencies: clap, fl1-config, fl1-i18n, fl1-server, serde, thiserror, tokio.
// ============================================================================

//! ## Overview
//! `fl1-site` serves the localized site and offers offline checks used before
//! a deploy: config validation, catalog coverage, single-key lookup and the
//! resolved route table. All operator-facing strings go through the CLI
//! message catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use fl1_cli::i18n::Locale;
use fl1_cli::i18n::set_locale;
use fl1_cli::t;
use fl1_config::DEFAULT_BIND;
use fl1_config::SiteConfig;
use fl1_i18n::ALL_ROUTES;
use fl1_i18n::CatalogSet;
use fl1_i18n::CoverageReport;
use fl1_i18n::DEFAULT_LOCALE;
use fl1_i18n::LocaleRouter;
use fl1_i18n::SUPPORTED_LOCALES;
use fl1_server::REQUIRED_KEYS;
use fl1_server::SiteServer;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "FL1_SITE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "fl1-site", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `FL1_SITE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the localized site.
    Serve(ServeCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Message catalog utilities.
    Catalog {
        /// Selected catalog subcommand.
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Route table utilities.
    Routes {
        /// Selected routes subcommand.
        #[command(subcommand)]
        command: RoutesCommand,
    },
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to fl1-site.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the listener address from the config file.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a site configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to fl1-site.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Compare every locale against the default catalog.
    Check(CatalogCheckCommand),
    /// Resolve one key the way the site renders it.
    Get(CatalogGetCommand),
}

/// Where catalogs are read from.
#[derive(Args, Debug)]
struct CatalogSourceArgs {
    /// Optional config file path supplying `i18n.catalog_dir`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Catalog directory (overrides the config file).
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

/// Arguments for `catalog check`.
#[derive(Args, Debug)]
struct CatalogCheckCommand {
    /// Catalog source settings.
    #[command(flatten)]
    source: CatalogSourceArgs,
    /// Succeed even when non-default locales miss keys.
    #[arg(long, action = ArgAction::SetTrue)]
    allow_missing: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `catalog get`.
#[derive(Args, Debug)]
struct CatalogGetCommand {
    /// Catalog source settings.
    #[command(flatten)]
    source: CatalogSourceArgs,
    /// Locale to resolve in (defaults to the site default, cs).
    #[arg(long, value_enum, value_name = "LOCALE")]
    locale: Option<LangArg>,
    /// Dotted catalog key, e.g. `common.nav.home`.
    #[arg(value_name = "KEY")]
    key: String,
}

/// Routes subcommands.
#[derive(Subcommand, Debug)]
enum RoutesCommand {
    /// Print every route's pathname in every locale.
    List(RoutesListCommand),
    /// Show how a request path would be routed.
    Resolve(RoutesResolveCommand),
}

/// Arguments for `routes list`.
#[derive(Args, Debug)]
struct RoutesListCommand {
    /// Optional config file path supplying pathname overrides.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `routes resolve`.
#[derive(Args, Debug)]
struct RoutesResolveCommand {
    /// Optional config file path supplying pathname overrides.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Request path, e.g. `/fr/contact`.
    #[arg(value_name = "REQUEST_PATH")]
    path: String,
}

/// Output formats for structured CLI commands.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Pretty-printed JSON output.
    Json,
    /// Human-readable text output.
    Text,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// Czech.
    Cs,
    /// English.
    En,
    /// Italian.
    It,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::Cs => Self::Cs,
            LangArg::En => Self::En,
            LangArg::It => Self::It,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command,
        } => command_config(&command),
        Commands::Catalog {
            command,
        } => command_catalog(&command),
        Commands::Routes {
            command,
        } => command_routes(&command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = load_config(command.config.as_deref())?;
    if let Some(bind) = command.bind {
        config.server.bind = Some(bind);
    }
    let server = tokio::task::spawn_blocking(move || SiteServer::from_config(config))
        .await
        .map_err(|err| {
            CliError::new(t!("serve.init_failed", error = format!("init join failed: {err}")))
        })?
        .map_err(|err| CliError::new(t!("serve.init_failed", error = err)))?;
    let bound =
        server.bind().await.map_err(|err| CliError::new(t!("serve.init_failed", error = err)))?;
    write_stderr_line(&t!("serve.listening", addr = bound.local_addr()))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    bound.run().await.map_err(|err| CliError::new(t!("serve.failed", error = err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = SiteConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let overrides: usize = config.i18n.pathnames.values().map(BTreeMap::len).sum();
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!(
        "config.validate.summary",
        bind = config.server.bind.as_deref().unwrap_or(DEFAULT_BIND),
        dir = config.i18n.catalog_dir().display(),
        detection = config.i18n.locale_detection,
        overrides = overrides
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Catalog Commands
// ============================================================================

/// Dispatches catalog subcommands.
fn command_catalog(command: &CatalogCommand) -> CliResult<ExitCode> {
    match command {
        CatalogCommand::Check(command) => command_catalog_check(command),
        CatalogCommand::Get(command) => command_catalog_get(command),
    }
}

/// Coverage report plus the page keys the default catalog lacks.
#[derive(Debug, Serialize)]
struct CatalogCheckReport {
    /// Per-locale coverage against the default catalog.
    coverage: CoverageReport,
    /// Page keys the default catalog cannot render.
    required_missing: Vec<String>,
    /// True when coverage is complete and no page key is missing.
    complete: bool,
}

impl CatalogCheckReport {
    /// Builds the report for `catalogs`.
    fn build(catalogs: &CatalogSet) -> Self {
        let coverage = catalogs.coverage();
        let required_missing = catalogs.missing_required(REQUIRED_KEYS);
        let complete = coverage.is_complete() && required_missing.is_empty();
        Self {
            coverage,
            required_missing,
            complete,
        }
    }

    /// Returns true when the check should exit successfully.
    fn passes(&self, allow_missing: bool) -> bool {
        self.required_missing.is_empty() && (allow_missing || self.coverage.is_complete())
    }

    /// Renders the report as text lines.
    fn text_lines(&self, allow_missing: bool) -> Vec<String> {
        let total = self.coverage.total_keys;
        let mut lines = vec![t!(
            "catalog.check.header",
            locale = self.coverage.reference_locale,
            total = total
        )];
        for locale in &self.coverage.locales {
            lines.push(t!(
                "catalog.check.locale",
                locale = locale.locale,
                present = locale.present,
                total = total,
                percent = format!("{:.1}", locale.coverage_percent)
            ));
            lines.extend(locale.missing.iter().map(|key| t!("catalog.check.missing", key = key)));
            lines.extend(
                locale.shape_mismatches.iter().map(|key| t!("catalog.check.mismatch", key = key)),
            );
            lines.extend(locale.extra.iter().map(|key| t!("catalog.check.extra", key = key)));
        }
        lines.extend(
            self.required_missing
                .iter()
                .map(|key| t!("catalog.check.required_missing", key = key)),
        );
        let missing = self.coverage.missing_total();
        if self.complete {
            lines.push(t!("catalog.check.ok"));
        } else if allow_missing && self.required_missing.is_empty() {
            lines.push(t!("catalog.check.incomplete_allowed", missing = missing));
        } else {
            lines.push(t!("catalog.check.incomplete", missing = missing));
        }
        lines
    }
}

/// Executes `catalog check`.
fn command_catalog_check(command: &CatalogCheckCommand) -> CliResult<ExitCode> {
    let catalogs = load_catalogs(&command.source)?;
    let report = CatalogCheckReport::build(&catalogs);
    match command.format {
        OutputFormat::Json => write_json(&report)?,
        OutputFormat::Text => {
            for line in report.text_lines(command.allow_missing) {
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
    }
    if report.passes(command.allow_missing) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Executes `catalog get`.
fn command_catalog_get(command: &CatalogGetCommand) -> CliResult<ExitCode> {
    let catalogs = load_catalogs(&command.source)?;
    let locale = command.locale.map_or(DEFAULT_LOCALE, Locale::from);
    let (lines, note) = lookup_lines(&catalogs, locale, &command.key)?;
    if let Some(note) = note {
        write_stderr_line(&note).map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    for line in lines {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Resolves `key` in `locale` into output lines plus an optional fallback note.
fn lookup_lines(
    catalogs: &CatalogSet,
    locale: Locale,
    key: &str,
) -> CliResult<(Vec<String>, Option<String>)> {
    let translator = catalogs.translator(locale);
    let Some(raw) = translator.t_raw(key) else {
        return Ok((vec![translator.t(key)], Some(t!("catalog.get.missing", key = key))));
    };
    let lines = match raw {
        Value::Array(_) => translator.t_list(key),
        Value::Object(_) => vec![
            serde_json::to_string_pretty(raw)
                .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?,
        ],
        _ => vec![translator.t(key)],
    };
    let note = (!raw.is_object() && !translator.has(key))
        .then(|| t!("catalog.get.fallback", key = key, locale = locale));
    Ok((lines, note))
}

// ============================================================================
// SECTION: Routes Commands
// ============================================================================

/// Dispatches routes subcommands.
fn command_routes(command: &RoutesCommand) -> CliResult<ExitCode> {
    match command {
        RoutesCommand::List(command) => command_routes_list(command),
        RoutesCommand::Resolve(command) => command_routes_resolve(command),
    }
}

/// One route with its canonical path per locale.
#[derive(Debug, Serialize)]
struct RouteEntry {
    /// Route identifier.
    route: &'static str,
    /// Canonical locale-prefixed path keyed by locale.
    paths: BTreeMap<&'static str, String>,
}

/// Builds the canonical path of every route in every locale.
fn route_entries(router: &LocaleRouter) -> Vec<RouteEntry> {
    ALL_ROUTES
        .iter()
        .map(|route| RouteEntry {
            route: route.as_str(),
            paths: SUPPORTED_LOCALES
                .iter()
                .map(|locale| (locale.as_str(), router.build_path(*route, *locale)))
                .collect(),
        })
        .collect()
}

/// Executes `routes list`.
fn command_routes_list(command: &RoutesListCommand) -> CliResult<ExitCode> {
    let router = load_router(command.config.as_deref())?;
    let entries = route_entries(&router);
    match command.format {
        OutputFormat::Json => write_json(&entries)?,
        OutputFormat::Text => {
            write_stdout_line(&t!("routes.header"))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            for entry in &entries {
                let paths: Vec<&str> = entry.paths.values().map(String::as_str).collect();
                write_stdout_line(&t!(
                    "routes.entry",
                    route = entry.route,
                    paths = paths.join(", ")
                ))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `routes resolve`.
fn command_routes_resolve(command: &RoutesResolveCommand) -> CliResult<ExitCode> {
    let router = load_router(command.config.as_deref())?;
    let line = describe_resolution(&router, &command.path)?;
    write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Describes how the site would answer a request for `path`.
fn describe_resolution(router: &LocaleRouter, path: &str) -> CliResult<String> {
    let path_only = path.split(['?', '#']).next().unwrap_or_default();
    if !path_only.starts_with('/') {
        return Err(CliError::new(t!("routes.path_invalid", path = path)));
    }
    let resolution = router.resolve_locale(path_only);
    if let Some(reason) = resolution.redirect {
        return Ok(t!(
            "routes.resolve.redirect",
            path = path_only,
            location = resolution.canonical_path(),
            reason = reason.as_str()
        ));
    }
    let line = match router.match_route(resolution.locale, &resolution.remainder) {
        Some(route) => t!(
            "routes.resolve.route",
            path = path_only,
            route = route,
            locale = resolution.locale
        ),
        None => t!("routes.resolve.not_found", path = path_only, locale = resolution.locale),
    };
    Ok(line)
}

// ============================================================================
// SECTION: Loading Helpers
// ============================================================================

/// Loads config, falling back to defaults when no config file is present.
fn load_config(path: Option<&Path>) -> CliResult<SiteConfig> {
    SiteConfig::load_or_default(path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Builds the router from the configured pathname overrides.
fn load_router(config_path: Option<&Path>) -> CliResult<LocaleRouter> {
    let config = load_config(config_path)?;
    let table = config
        .i18n
        .route_table()
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    Ok(LocaleRouter::new(table))
}

/// Loads catalogs from `--dir` or the configured catalog directory.
fn load_catalogs(source: &CatalogSourceArgs) -> CliResult<CatalogSet> {
    let dir = match &source.dir {
        Some(dir) => dir.clone(),
        None => load_config(source.config.as_deref())?.i18n.catalog_dir().to_path_buf(),
    };
    CatalogSet::load_dir(&dir).map_err(|err| {
        CliError::new(t!("catalog.load_failed", dir = dir.display(), error = err))
    })
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(fl1_cli::i18n::CLI_DEFAULT_LOCALE)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
