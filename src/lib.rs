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

//! Helpers for translating NSIS installer scripts.
//!
//! The workflow mirrors the usual Gettext one:
//!
//! 1. `nsis-xgettext` reads the `LangString` directives of the default
//!    language from a script and writes them to a `.pot` template.
//! 2. Translators turn the template into one PO file per locale, named
//!    after the locale code: `po/fr-FR.po`, `po/ar-SA.po`, ...
//! 3. `nsis-gettext` reads the PO files and writes a copy of the script
//!    where the line holding `;@INSERT_TRANSLATIONS@` is replaced by
//!    the `LangString` directives of every language.
//!
//! Messages are keyed by their text, so a text used by several labels
//! is translated once. The labels travel through the PO files in the
//! extracted comments of each message.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod escape;
pub mod gettext;
pub mod locale;
pub mod rewrite;
pub mod scanner;
pub mod xgettext;

pub use error::{Error, Result};
pub use rewrite::MARKER;
