// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This file contains the loading of translations used by the binary
//! `nsis-gettext`.
//!
//! Translations are read from a directory of PO files named after
//! their locale, e.g. `po/fr-FR.po` and `po/pt-BR.po`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context};
use polib::catalog::Catalog;
use polib::po_file;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::catalog::LabeledMessage;
use crate::error::Error;
use crate::escape::escape_nsis;
use crate::locale::{self, LocaleDescriptor};

/// Label holding the locale code of each language.
pub const LANGUAGE_CODE: &str = "LANGUAGE_CODE";
/// Label set to `1` for right-to-left languages.
pub const LANGUAGE_RTL: &str = "LANGUAGE_RTL";

/// Extension of translation files.
const PO_EXTENSION: &str = "po";

/// Escaped texts by label, in insertion order.
///
/// Inserting a label a second time replaces the text but keeps the
/// position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: &str, text: String) {
        match self.index.get(label) {
            Some(&idx) => self.entries[idx].1 = text,
            None => {
                self.index.insert(String::from(label), self.entries.len());
                self.entries.push((String::from(label), text));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.index
            .get(label)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(label, text)| (label.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The translations of a script into one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCatalog {
    pub locale: LocaleDescriptor,
    pub translations: Translations,
}

impl LocaleCatalog {
    /// Create a catalog holding only the [`LANGUAGE_CODE`] and, for
    /// right-to-left locales, [`LANGUAGE_RTL`] labels.
    pub fn new(locale: LocaleDescriptor) -> Self {
        let mut translations = Translations::new();
        translations.insert(LANGUAGE_CODE, String::from(locale.code));
        if locale.rtl {
            translations.insert(LANGUAGE_RTL, String::from("1"));
        }
        LocaleCatalog {
            locale,
            translations,
        }
    }

    /// The NSIS language name, e.g. `"French"`.
    pub fn language(&self) -> &str {
        self.locale.language
    }

    /// Add the texts of `messages` under each of their labels.
    ///
    /// Translated messages are added first. Untranslated messages are
    /// added afterwards with their source text, and a warning is
    /// logged for each of their labels.
    pub fn add_messages(&mut self, messages: &[LabeledMessage]) {
        let (translated, untranslated): (Vec<_>, Vec<_>) =
            messages.iter().partition(|msg| msg.is_translated());
        for message in translated {
            for label in &message.labels {
                self.translations.insert(label, escape_nsis(message.text()));
            }
        }
        for message in untranslated {
            for label in &message.labels {
                warn!(
                    "Label '{label}' for language {} remains untranslated",
                    self.language()
                );
                self.translations.insert(label, escape_nsis(message.text()));
            }
        }
    }

    /// Add the messages of a parsed PO file.
    pub fn add_catalog(&mut self, catalog: &Catalog) {
        let messages = catalog
            .messages()
            .map(LabeledMessage::from_message)
            .collect::<Vec<_>>();
        self.add_messages(&messages);
    }
}

/// Load the PO file at `path`.
///
/// Returns `None` when the file name is not a known locale code.
pub fn load_locale_catalog(path: &Path) -> anyhow::Result<Option<LocaleCatalog>> {
    let code = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("Invalid file name {}", path.display()))?;
    let locale = match locale::resolve(code) {
        Ok(locale) => locale,
        Err(err @ Error::UnknownLocale(_)) => {
            warn!("Skipping {}: {err}", path.display());
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    debug!(
        "Loading {} ({}{})",
        locale.language,
        locale.code,
        if locale.rtl { ", right-to-left" } else { "" }
    );

    let catalog = po_file::parse(path)
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("Could not parse {path:?} as PO file"))?;
    let mut locale_catalog = LocaleCatalog::new(locale);
    locale_catalog.add_catalog(&catalog);
    Ok(Some(locale_catalog))
}

/// Load all PO files found below `po_dir`.
///
/// The directory is searched recursively and files are loaded in
/// order of their file names. Files not named after a known locale
/// are skipped with a warning.
pub fn load_locale_catalogs(po_dir: &Path) -> anyhow::Result<Vec<LocaleCatalog>> {
    let mut catalogs = Vec::new();
    for entry in WalkDir::new(po_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Could not read {}", po_dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(PO_EXTENSION)
        {
            debug!("Ignoring {}", path.display());
            continue;
        }
        if let Some(catalog) = load_locale_catalog(path)? {
            catalogs.push(catalog);
        }
    }
    Ok(catalogs)
}
