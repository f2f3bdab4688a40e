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

//! Locale codes understood by the merge pipeline.
//!
//! A PO file is named after its locale code, e.g. `fr-FR.po`. The
//! code decides which NSIS language the strings are emitted under
//! and whether the installer should be laid out right-to-left.

use crate::error::{Error, Result};

/// Locale codes and their NSIS language names.
const LOCALES: &[(&str, &str)] = &[
    ("af-ZA", "Afrikaans"),
    ("ar-SA", "Arabic"),
    ("ca-ES", "Catalan"),
    ("cs-CZ", "Czech"),
    ("da-DK", "Danish"),
    ("nl-NL", "Dutch"),
    ("en", "English"),
    ("eo-UY", "Esperanto"),
    ("fi-FI", "Finnish"),
    ("fr-FR", "French"),
    ("de-DE", "German"),
    ("el-GR", "Greek"),
    ("he-IL", "Hebrew"),
    ("hi-IN", "Hindi"),
    ("hu-HU", "Hungarian"),
    ("id-ID", "Indonesian"),
    ("it-IT", "Italian"),
    ("ja-JP", "Japanese"),
    ("ko-KR", "Korean"),
    ("lv-LV", "Latvian"),
    ("no-NO", "Norwegian"),
    ("pl-PL", "Polish"),
    ("pt-PT", "Portuguese"),
    ("pt-BR", "PortugueseBR"),
    ("ro-RO", "Romanian"),
    ("ru-RU", "Russian"),
    ("sr-SP", "Serbian"),
    ("zh-CN", "SimpChinese"),
    ("es-ES", "Spanish"),
    ("sv-SE", "Swedish"),
    ("zh-TW", "TradChinese"),
    ("tr-TR", "Turkish"),
    ("uk-UA", "Ukrainian"),
    ("vi-VN", "Vietnamese"),
];

/// Locales written right-to-left.
const RTL_LOCALES: &[&str] = &["ar-SA", "he-IL"];

/// A known locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleDescriptor {
    /// The locale code, e.g. `"pt-BR"`.
    pub code: &'static str,
    /// The NSIS language name, e.g. `"PortugueseBR"`.
    pub language: &'static str,
    pub rtl: bool,
}

/// Look up `code` in the locale table.
///
/// The lookup is case-sensitive: `fr-FR` is known, `fr-fr` is not.
///
/// # Examples
///
/// ```
/// use nsis_i18n_helpers::locale::resolve;
///
/// let locale = resolve("he-IL").unwrap();
/// assert_eq!(locale.language, "Hebrew");
/// assert!(locale.rtl);
/// assert!(resolve("xx-ZZ").is_err());
/// ```
pub fn resolve(code: &str) -> Result<LocaleDescriptor> {
    LOCALES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|&(code, language)| LocaleDescriptor {
            code,
            language,
            rtl: RTL_LOCALES.contains(&code),
        })
        .ok_or_else(|| Error::UnknownLocale(code.to_string()))
}
