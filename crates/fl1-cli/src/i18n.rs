// crates/fl1-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Operator message catalog and translation macro for `fl1-site`.
// Purpose: Keep CLI output in the operator's language (cs, en or it).
// Dependencies: fl1-i18n
// ============================================================================

//! ## Overview
//! CLI strings live in small static tables, one per supported locale, and are
//! rendered through the [`t!`](crate::t) macro. The tables are separate from
//! the site catalogs under `messages/`; only the locale set and placeholder
//! syntax are shared.
//!
//! ## Invariants
//! - The locale is selected once per process and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

pub use fl1_i18n::Locale;
pub use fl1_i18n::MessageArg;
use fl1_i18n::format_message;

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Locale used when neither `--lang` nor the environment selects one.
pub const CLI_DEFAULT_LOCALE: Locale = Locale::En;

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(CLI_DEFAULT_LOCALE)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "fl1-site {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to serialize JSON output: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'cs', 'en' or 'it'."),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    (
        "config.validate.summary",
        "Bind {bind}, catalogs in {dir}, locale detection {detection}, {overrides} pathname \
         overrides.",
    ),
    ("serve.init_failed", "Failed to initialize site server: {error}"),
    ("serve.listening", "Serving the FL1 site on http://{addr}"),
    ("serve.failed", "Site server failed: {error}"),
    ("catalog.load_failed", "Failed to load catalogs from {dir}: {error}"),
    ("catalog.check.header", "Catalog coverage against {locale} ({total} keys):"),
    ("catalog.check.locale", "- {locale}: {present}/{total} ({percent}%)"),
    ("catalog.check.missing", "    missing: {key}"),
    ("catalog.check.extra", "    extra: {key}"),
    ("catalog.check.mismatch", "    shape mismatch: {key}"),
    ("catalog.check.required_missing", "Default catalog lacks page key: {key}"),
    ("catalog.check.ok", "All catalogs are complete."),
    ("catalog.check.incomplete", "Catalogs are incomplete: {missing} keys missing."),
    (
        "catalog.check.incomplete_allowed",
        "Catalogs are incomplete ({missing} keys missing); allowed.",
    ),
    ("catalog.get.fallback", "Note: {key} is not translated in {locale}; showing the fallback."),
    ("catalog.get.missing", "Note: {key} is not defined in any catalog."),
    ("routes.header", "Routes:"),
    ("routes.entry", "- {route}: {paths}"),
    ("routes.path_invalid", "Invalid request path: {path}"),
    ("routes.resolve.redirect", "{path} -> {location} ({reason})"),
    ("routes.resolve.route", "{path} -> {route} [{locale}]"),
    ("routes.resolve.not_found", "{path} -> not found [{locale}]"),
];

/// Czech catalog entries.
const CATALOG_CS: &[(&str, &str)] = &[
    ("main.version", "fl1-site {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "výstup"),
    ("output.write_failed", "Zápis do {stream} selhal: {error}"),
    ("output.json_failed", "Serializace výstupu JSON selhala: {error}"),
    (
        "i18n.lang.invalid_env",
        "Neplatná hodnota pro {env}: {value}. Očekáváno 'cs', 'en' nebo 'it'.",
    ),
    ("config.load_failed", "Načtení konfigurace selhalo: {error}"),
    ("config.validate.ok", "Konfigurace je platná."),
    (
        "config.validate.summary",
        "Adresa {bind}, katalogy v {dir}, detekce jazyka {detection}, přepsaných cest \
         {overrides}.",
    ),
    ("serve.init_failed", "Inicializace serveru selhala: {error}"),
    ("serve.listening", "Web FL1 běží na http://{addr}"),
    ("serve.failed", "Server selhal: {error}"),
    ("catalog.load_failed", "Načtení katalogů z {dir} selhalo: {error}"),
    ("catalog.check.header", "Pokrytí katalogů vůči {locale} ({total} klíčů):"),
    ("catalog.check.locale", "- {locale}: {present}/{total} ({percent} %)"),
    ("catalog.check.missing", "    chybí: {key}"),
    ("catalog.check.extra", "    navíc: {key}"),
    ("catalog.check.mismatch", "    jiný tvar: {key}"),
    ("catalog.check.required_missing", "Výchozímu katalogu chybí klíč stránky: {key}"),
    ("catalog.check.ok", "Všechny katalogy jsou úplné."),
    ("catalog.check.incomplete", "Katalogy nejsou úplné: chybí {missing} klíčů."),
    (
        "catalog.check.incomplete_allowed",
        "Katalogy nejsou úplné (chybí {missing} klíčů); povoleno.",
    ),
    ("catalog.get.fallback", "Pozn.: {key} není přeloženo do {locale}; zobrazuje se náhrada."),
    ("catalog.get.missing", "Pozn.: {key} není definováno v žádném katalogu."),
    ("routes.header", "Cesty:"),
    ("routes.entry", "- {route}: {paths}"),
    ("routes.path_invalid", "Neplatná cesta požadavku: {path}"),
    ("routes.resolve.redirect", "{path} -> {location} ({reason})"),
    ("routes.resolve.route", "{path} -> {route} [{locale}]"),
    ("routes.resolve.not_found", "{path} -> nenalezeno [{locale}]"),
];

/// Italian catalog entries.
const CATALOG_IT: &[(&str, &str)] = &[
    ("main.version", "fl1-site {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Scrittura su {stream} non riuscita: {error}"),
    ("output.json_failed", "Serializzazione dell'output JSON non riuscita: {error}"),
    (
        "i18n.lang.invalid_env",
        "Valore non valido per {env}: {value}. Attesi 'cs', 'en' o 'it'.",
    ),
    ("config.load_failed", "Caricamento della configurazione non riuscito: {error}"),
    ("config.validate.ok", "Configurazione valida."),
    (
        "config.validate.summary",
        "Indirizzo {bind}, cataloghi in {dir}, rilevamento lingua {detection}, {overrides} \
         percorsi personalizzati.",
    ),
    ("serve.init_failed", "Inizializzazione del server non riuscita: {error}"),
    ("serve.listening", "Sito FL1 in servizio su http://{addr}"),
    ("serve.failed", "Errore del server: {error}"),
    ("catalog.load_failed", "Caricamento dei cataloghi da {dir} non riuscito: {error}"),
    ("catalog.check.header", "Copertura dei cataloghi rispetto a {locale} ({total} chiavi):"),
    ("catalog.check.locale", "- {locale}: {present}/{total} ({percent}%)"),
    ("catalog.check.missing", "    mancante: {key}"),
    ("catalog.check.extra", "    in più: {key}"),
    ("catalog.check.mismatch", "    forma diversa: {key}"),
    ("catalog.check.required_missing", "Al catalogo predefinito manca la chiave: {key}"),
    ("catalog.check.ok", "Tutti i cataloghi sono completi."),
    ("catalog.check.incomplete", "Cataloghi incompleti: mancano {missing} chiavi."),
    (
        "catalog.check.incomplete_allowed",
        "Cataloghi incompleti (mancano {missing} chiavi); consentito.",
    ),
    ("catalog.get.fallback", "Nota: {key} non è tradotto in {locale}; viene mostrato il ripiego."),
    ("catalog.get.missing", "Nota: {key} non è definito in alcun catalogo."),
    ("routes.header", "Percorsi:"),
    ("routes.entry", "- {route}: {paths}"),
    ("routes.path_invalid", "Percorso di richiesta non valido: {path}"),
    ("routes.resolve.redirect", "{path} -> {location} ({reason})"),
    ("routes.resolve.route", "{path} -> {route} [{locale}]"),
    ("routes.resolve.not_found", "{path} -> non trovato [{locale}]"),
];

/// Returns the raw catalog entries for the requested locale.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Cs => CATALOG_CS,
        Locale::It => CATALOG_IT,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CS_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_IT_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| collect_catalog(locale)),
        Locale::Cs => CATALOG_CS_MAP.get_or_init(|| collect_catalog(locale)),
        Locale::It => CATALOG_IT_MAP.get_or_init(|| collect_catalog(locale)),
    }
}

/// Builds the lookup map for `locale`.
fn collect_catalog(locale: Locale) -> HashMap<&'static str, &'static str> {
    catalog_entries_for(locale).iter().copied().collect()
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_in(current_locale(), key, &args)
}

/// Translates `key` for an explicit `locale`.
#[must_use]
pub fn translate_in(locale: Locale, key: &str, args: &[MessageArg]) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(CLI_DEFAULT_LOCALE).get(key).copied())
        .unwrap_or(key);
    format_message(template, args)
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
