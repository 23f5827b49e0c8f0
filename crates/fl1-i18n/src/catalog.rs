// crates/fl1-i18n/src/catalog.rs
// ============================================================================
// Module: Message Catalogs
// Description: Per-locale nested message trees loaded from JSON files.
// Purpose: Provide immutable, fully loaded catalogs for translation lookup.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Each locale has one [`MessageCatalog`]: a JSON object tree addressed by
//! dotted key paths (`home.hero.title.highlight`). A [`CatalogSet`] holds the
//! catalog of every supported locale and is built once at process start.
//!
//! ## Invariants
//! - A [`CatalogSet`] always contains a catalog for every supported locale.
//! - Catalogs are never mutated after construction.
//! - Loading fails closed: a missing, oversized or malformed file aborts the load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::coverage::CoverageReport;
use crate::locale::DEFAULT_LOCALE;
use crate::locale::Locale;
use crate::locale::SUPPORTED_LOCALES;
use crate::translator::Translator;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a single catalog file in bytes.
pub const MAX_CATALOG_BYTES: usize = 4 * 1024 * 1024;

/// Maximum nesting depth walked when addressing or enumerating keys.
pub const MAX_KEY_DEPTH: usize = 16;

// ============================================================================
// SECTION: Message Catalog
// ============================================================================

/// Shape of a catalog leaf.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LeafKind {
    /// String, number, boolean or null.
    Scalar,
    /// Array of values.
    List,
}

/// A catalog key the renderer reads, with the leaf shape it expects.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequiredKey {
    /// Fully qualified dotted key.
    pub key: &'static str,
    /// Expected leaf shape.
    pub kind: LeafKind,
}

impl RequiredKey {
    /// A key rendered as text.
    #[must_use]
    pub const fn text(key: &'static str) -> Self {
        Self {
            key,
            kind: LeafKind::Scalar,
        }
    }

    /// A key rendered as a list of items.
    #[must_use]
    pub const fn list(key: &'static str) -> Self {
        Self {
            key,
            kind: LeafKind::List,
        }
    }
}

/// Message tree for a single locale.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageCatalog {
    /// Locale the messages are written in.
    locale: Locale,
    /// Root object of the message tree.
    root: Map<String, Value>,
}

impl MessageCatalog {
    /// Wraps a parsed JSON value; the root must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotAnObject`] when the root is not an object.
    pub fn from_value(locale: Locale, value: Value) -> Result<Self, CatalogError> {
        match value {
            Value::Object(root) => Ok(Self {
                locale,
                root,
            }),
            _ => Err(CatalogError::NotAnObject {
                locale,
            }),
        }
    }

    /// Parses a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the text is not a JSON object.
    pub fn from_json_str(locale: Locale, text: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text).map_err(|err| CatalogError::Parse {
            locale,
            error: err.to_string(),
        })?;
        Self::from_value(locale, value)
    }

    /// Returns the catalog locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the value addressed by a dotted key path.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for (depth, segment) in segments.enumerate() {
            if depth >= MAX_KEY_DEPTH {
                return None;
            }
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns true when `key` holds a renderable value of the given shape.
    #[must_use]
    pub fn renders_as(&self, key: &str, kind: LeafKind) -> bool {
        self.get(key).is_some_and(|value| match kind {
            LeafKind::Scalar => !value.is_array() && is_renderable(value),
            LeafKind::List => value.is_array() && is_renderable(value),
        })
    }

    /// Returns every leaf key (dotted path) with its shape, sorted.
    #[must_use]
    pub fn leaf_keys(&self) -> BTreeMap<String, LeafKind> {
        let mut keys = BTreeMap::new();
        collect_leaves(&self.root, "", 0, &mut keys);
        keys
    }
}

/// Walks an object tree and records leaf paths.
fn collect_leaves(
    object: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    keys: &mut BTreeMap<String, LeafKind>,
) {
    if depth > MAX_KEY_DEPTH {
        return;
    }
    for (name, value) in object {
        let path = if prefix.is_empty() { name.clone() } else { format!("{prefix}.{name}") };
        match value {
            Value::Object(child) => collect_leaves(child, &path, depth + 1, keys),
            Value::Array(_) => {
                keys.insert(path, LeafKind::List);
            }
            _ => {
                keys.insert(path, LeafKind::Scalar);
            }
        }
    }
}

// ============================================================================
// SECTION: Catalog Set
// ============================================================================

/// Immutable catalogs for every supported locale.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSet {
    /// Czech catalog.
    cs: MessageCatalog,
    /// English catalog.
    en: MessageCatalog,
    /// Italian catalog.
    it: MessageCatalog,
}

impl CatalogSet {
    /// Builds a set from one catalog per supported locale.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when a locale is missing or supplied twice.
    pub fn from_catalogs<I>(catalogs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = MessageCatalog>,
    {
        let mut slots: BTreeMap<Locale, MessageCatalog> = BTreeMap::new();
        for catalog in catalogs {
            let locale = catalog.locale();
            if slots.insert(locale, catalog).is_some() {
                return Err(CatalogError::DuplicateLocale(locale));
            }
        }
        let mut take = |locale: Locale| {
            slots.remove(&locale).ok_or(CatalogError::MissingLocale(locale))
        };
        Ok(Self {
            cs: take(Locale::Cs)?,
            en: take(Locale::En)?,
            it: take(Locale::It)?,
        })
    }

    /// Loads `{dir}/{locale}.json` for every supported locale.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when any catalog cannot be read or parsed.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let catalogs = SUPPORTED_LOCALES
            .iter()
            .map(|locale| load_catalog_file(*locale, &catalog_path(dir, *locale)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_catalogs(catalogs)
    }

    /// Returns the catalog for `locale`.
    #[must_use]
    pub const fn catalog(&self, locale: Locale) -> &MessageCatalog {
        match locale {
            Locale::Cs => &self.cs,
            Locale::En => &self.en,
            Locale::It => &self.it,
        }
    }

    /// Returns the catalog of the default locale.
    #[must_use]
    pub const fn default_catalog(&self) -> &MessageCatalog {
        self.catalog(DEFAULT_LOCALE)
    }

    /// Returns a translator bound to `locale`.
    #[must_use]
    pub const fn translator(&self, locale: Locale) -> Translator<'_> {
        Translator::new(self, locale)
    }

    /// Returns the keys from `required` that the default catalog cannot render
    /// in the expected shape.
    #[must_use]
    pub fn missing_required(&self, required: &[RequiredKey]) -> Vec<String> {
        let default = self.default_catalog();
        required
            .iter()
            .filter(|required| !default.renders_as(required.key, required.kind))
            .map(|required| required.key.to_string())
            .collect()
    }

    /// Compares every locale against the default catalog's key set.
    #[must_use]
    pub fn coverage(&self) -> CoverageReport {
        CoverageReport::build(self)
    }
}

/// Returns true when a value can be shown to a reader.
pub(crate) fn is_renderable(value: &Value) -> bool {
    match value {
        Value::String(text) => !text.is_empty(),
        Value::Number(_) | Value::Bool(_) => true,
        Value::Array(items) => !items.is_empty(),
        Value::Null | Value::Object(_) => false,
    }
}

/// Returns the catalog file path for `locale` under `dir`.
#[must_use]
pub fn catalog_path(dir: &Path, locale: Locale) -> PathBuf {
    dir.join(format!("{}.json", locale.as_str()))
}

/// Reads and parses a single catalog file with size limits.
fn load_catalog_file(locale: Locale, path: &Path) -> Result<MessageCatalog, CatalogError> {
    let bytes = fs::read(path).map_err(|err| CatalogError::Io {
        locale,
        path: path.display().to_string(),
        error: err.to_string(),
    })?;
    if bytes.len() > MAX_CATALOG_BYTES {
        return Err(CatalogError::TooLarge {
            locale,
            size: bytes.len(),
            limit: MAX_CATALOG_BYTES,
        });
    }
    let text = std::str::from_utf8(&bytes).map_err(|_| CatalogError::Parse {
        locale,
        error: "catalog must be utf-8".to_string(),
    })?;
    MessageCatalog::from_json_str(locale, text)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog loading errors. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read {locale} catalog at {path}: {error}")]
    Io {
        /// Locale being loaded.
        locale: Locale,
        /// File path.
        path: String,
        /// Underlying I/O error.
        error: String,
    },
    /// The catalog file exceeds [`MAX_CATALOG_BYTES`].
    #[error("{locale} catalog is {size} bytes (limit {limit})")]
    TooLarge {
        /// Locale being loaded.
        locale: Locale,
        /// File size in bytes.
        size: usize,
        /// Size limit in bytes.
        limit: usize,
    },
    /// The catalog is not valid JSON.
    #[error("failed to parse {locale} catalog: {error}")]
    Parse {
        /// Locale being loaded.
        locale: Locale,
        /// Parser error.
        error: String,
    },
    /// The catalog root is not a JSON object.
    #[error("{locale} catalog root must be a json object")]
    NotAnObject {
        /// Locale being loaded.
        locale: Locale,
    },
    /// No catalog was supplied for a supported locale.
    #[error("missing catalog for locale {0}")]
    MissingLocale(Locale),
    /// Two catalogs were supplied for the same locale.
    #[error("duplicate catalog for locale {0}")]
    DuplicateLocale(Locale),
}
