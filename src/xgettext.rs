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

//! This file contains main logic used by the binary `nsis-xgettext`.

use std::fmt::Display;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, TimeZone};
use polib::catalog::Catalog;
use polib::metadata::CatalogMetadata;
use tracing::{debug, warn};

use crate::aggregate::{MessageAggregator, MessageEntry};
use crate::catalog::LabeledMessage;
use crate::scanner::extract_directives;

/// Settings for extracting a template from a script.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Project name written to the template header.
    pub project: String,
    /// Project version written to the template header.
    pub version: String,
    /// Default language of the script, e.g. `"English"`.
    pub language: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            project: String::new(),
            version: String::new(),
            language: String::from("English"),
        }
    }
}

/// Build the template header, created at `now`.
pub fn generate_catalog_metadata<Tz>(options: &ExtractOptions, now: &DateTime<Tz>) -> CatalogMetadata
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut metadata = CatalogMetadata::new();
    metadata.project_id_version = format!("{} {}", options.project, options.version)
        .trim()
        .to_string();
    metadata.pot_creation_date = now.format("%Y-%m-%d %H:%M%z").to_string();
    metadata.po_revision_date = String::from("YEAR-MO-DA HO:MI+ZONE");
    metadata.last_translator = String::from("FULL NAME <EMAIL@ADDRESS>");
    metadata.language_team = String::from("LANGUAGE <LL@li.org>");
    metadata.mime_version = String::from("1.0");
    metadata.content_type = String::from("text/plain; charset=UTF-8");
    metadata.content_transfer_encoding = String::from("8bit");
    metadata
}

/// Build a catalog with one message per entry, in order.
pub fn create_catalog(metadata: CatalogMetadata, entries: Vec<MessageEntry>) -> Catalog {
    let mut catalog = Catalog::new(metadata);
    for entry in entries {
        // An empty msgid is reserved for the catalog header.
        if entry.text.is_empty() {
            warn!(
                "Skipping empty message for label(s) {}",
                entry.labels.join(", ")
            );
            continue;
        }
        catalog.append_or_update(LabeledMessage::from(entry).to_message());
    }
    catalog
}

/// Extract a template from `script`, which was read from `path`.
pub fn extract_catalog(
    path: &str,
    script: &str,
    options: &ExtractOptions,
    metadata: CatalogMetadata,
) -> Catalog {
    let directives = extract_directives(script, &options.language);
    debug!(
        "Found {} {} directives in {path}",
        directives.len(),
        options.language
    );
    let mut aggregator = MessageAggregator::new();
    aggregator.extend(path, directives);
    create_catalog(metadata, aggregator.into_entries())
}

/// Read the script at `input` and extract a template from it.
pub fn create_template<Tz>(
    input: &Path,
    options: &ExtractOptions,
    now: &DateTime<Tz>,
) -> anyhow::Result<Catalog>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let script = std::fs::read_to_string(input)
        .with_context(|| format!("Could not read {}", input.display()))?;
    let metadata = generate_catalog_metadata(options, now);
    Ok(extract_catalog(
        &input.display().to_string(),
        &script,
        options,
        metadata,
    ))
}
