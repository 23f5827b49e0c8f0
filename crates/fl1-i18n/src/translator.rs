// crates/fl1-i18n/src/translator.rs
// ============================================================================
// Module: Translation Resolver
// Description: Key lookup with default-locale and raw-key fallback.
// Purpose: Return displayable text for every key without ever failing.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A [`Translator`] is a cheap view over a [`CatalogSet`] bound to one locale
//! and, optionally, a key namespace. Lookups never fail:
//!
//! 1. the active locale's value,
//! 2. then the default locale's value,
//! 3. then the fully qualified key itself, so gaps stay visible in review.
//!
//! Empty strings count as missing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::catalog::CatalogSet;
use crate::catalog::is_renderable;
use crate::locale::DEFAULT_LOCALE;
use crate::locale::Locale;

// ============================================================================
// SECTION: Message Arguments
// ============================================================================

/// A named placeholder value substituted into `{name}` positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageArg {
    /// The placeholder name without braces (e.g. `"year"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// Substitutes `{name}` placeholders in a single pass over `template`.
///
/// Unknown placeholders stay intact and substituted values are never scanned
/// again, so a value containing `{other}` is inserted verbatim.
#[must_use]
pub fn format_message(template: &str, args: &[MessageArg]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[.. open]);
        let after = &rest[open + 1 ..];
        match after.find('}') {
            Some(close) if !after[.. close].contains('{') => {
                let name = &after[.. close];
                match args.iter().find(|arg| arg.key == name) {
                    Some(arg) => result.push_str(&arg.value),
                    None => {
                        result.push('{');
                        result.push_str(name);
                        result.push('}');
                    }
                }
                rest = &after[close + 1 ..];
            }
            _ => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

// ============================================================================
// SECTION: Translator
// ============================================================================

/// Locale-bound view over a [`CatalogSet`].
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    /// Loaded catalogs.
    catalogs: &'a CatalogSet,
    /// Active locale.
    locale: Locale,
    /// Optional key prefix (without trailing dot).
    namespace: Option<String>,
}

impl<'a> Translator<'a> {
    /// Creates a translator for `locale` without a namespace.
    #[must_use]
    pub const fn new(catalogs: &'a CatalogSet, locale: Locale) -> Self {
        Self {
            catalogs,
            locale,
            namespace: None,
        }
    }

    /// Returns the active locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns a translator whose keys are relative to `namespace`.
    ///
    /// Namespaces nest: scoping `common` then `nav` resolves `home` as
    /// `common.nav.home`.
    #[must_use]
    pub fn scoped(&self, namespace: &str) -> Self {
        Self {
            catalogs: self.catalogs,
            locale: self.locale,
            namespace: Some(self.qualify(namespace)),
        }
    }

    /// Returns the localized string for `key`.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        let qualified = self.qualify(key);
        self.lookup(&qualified, text_of).unwrap_or(qualified)
    }

    /// Returns the localized string for `key` with placeholders substituted.
    #[must_use]
    pub fn t_with(&self, key: &str, args: &[MessageArg]) -> String {
        format_message(&self.t(key), args)
    }

    /// Returns the structured value for `key` (list or sub-object).
    #[must_use]
    pub fn t_raw(&self, key: &str) -> Option<&'a Value> {
        let qualified = self.qualify(key);
        self.lookup(&qualified, |value| {
            if is_renderable(value) || value.as_object().is_some_and(|map| !map.is_empty()) {
                Some(value)
            } else {
                None
            }
        })
    }

    /// Returns the localized string list for `key`.
    ///
    /// A missing list yields the qualified key as its only item.
    #[must_use]
    pub fn t_list(&self, key: &str) -> Vec<String> {
        let qualified = self.qualify(key);
        self.lookup(&qualified, |value| {
            let items: Vec<String> = value.as_array()?.iter().filter_map(text_of).collect();
            if items.is_empty() { None } else { Some(items) }
        })
        .unwrap_or_else(|| vec![qualified])
    }

    /// Returns true when the active locale itself defines `key` (no fallback).
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.catalogs.catalog(self.locale).get(&self.qualify(key)).is_some_and(is_renderable)
    }

    /// Prefixes `key` with the namespace.
    fn qualify(&self, key: &str) -> String {
        match &self.namespace {
            Some(namespace) if !key.is_empty() => format!("{namespace}.{key}"),
            Some(namespace) => namespace.clone(),
            None => key.to_string(),
        }
    }

    /// Applies `extract` to the active catalog, then the default catalog.
    fn lookup<T>(&self, key: &str, extract: impl Fn(&'a Value) -> Option<T>) -> Option<T> {
        let own = self.catalogs.catalog(self.locale).get(key).and_then(&extract);
        if own.is_some() || self.locale == DEFAULT_LOCALE {
            return own;
        }
        self.catalogs.catalog(DEFAULT_LOCALE).get(key).and_then(&extract)
    }
}

/// Renders a scalar leaf as display text.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
