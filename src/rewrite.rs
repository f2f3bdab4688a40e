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

//! Insertion of translations into an NSIS script.
//!
//! The script marks the place for the translations with a line
//! containing [`MARKER`]. That line is replaced by one block per
//! language:
//!
//! ```text
//!
//!   !insertmacro MUI_LANGUAGE "French"
//!   LangString LANGUAGE_CODE ${LANG_French} "fr-FR"
//!   LangString YES ${LANG_French} "Oui"
//!
//! ```

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::gettext::{load_locale_catalogs, LocaleCatalog};
use crate::scanner::{language_token, LANG_STRING};

/// Token marking the line replaced by the translations.
pub const MARKER: &str = ";@INSERT_TRANSLATIONS@";

/// A script split around its marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptDocument<'a> {
    /// Everything up to the marker line, line endings included.
    pub before: &'a str,
    /// Everything after the marker line.
    pub after: &'a str,
    /// Line number of the marker, starting at 1.
    pub marker_lineno: usize,
}

impl<'a> ScriptDocument<'a> {
    /// Find the marker line in `script`.
    ///
    /// Fails unless exactly one line contains [`MARKER`].
    pub fn parse(script: &'a str) -> Result<Self> {
        let mut marker: Option<(usize, usize, usize)> = None;
        let mut offset = 0;
        for (idx, line) in script.split_inclusive('\n').enumerate() {
            if line.contains(MARKER) {
                if let Some((first, _, _)) = marker {
                    return Err(Error::DuplicateMarker {
                        first,
                        second: idx + 1,
                    });
                }
                marker = Some((idx + 1, offset, offset + line.len()));
            }
            offset += line.len();
        }
        let (marker_lineno, start, end) = marker.ok_or(Error::MissingMarker)?;
        Ok(ScriptDocument {
            before: &script[..start],
            after: &script[end..],
            marker_lineno,
        })
    }

    /// Render the script with `block` in place of the marker line.
    pub fn render(&self, block: &str) -> String {
        [self.before, block, self.after].concat()
    }
}

/// Render the lines inserted at the marker.
///
/// No `!insertmacro MUI_LANGUAGE` line is written for the language
/// matching `default_language`, compared without regard to case.
pub fn translation_block(catalogs: &[LocaleCatalog], default_language: &str) -> String {
    let mut block = String::from("\n");
    for catalog in catalogs {
        let language = catalog.language();
        if !language.eq_ignore_ascii_case(default_language) {
            block.push_str(&format!("  !insertmacro MUI_LANGUAGE \"{language}\"\n"));
        }
        let token = language_token(language);
        for (label, text) in catalog.translations.iter() {
            block.push_str(&format!("  {LANG_STRING} {label} {token} \"{text}\"\n"));
        }
        block.push('\n');
        info!(
            "{} translations merged for language {language}",
            catalog.translations.len()
        );
    }
    block
}

/// Replace the marker line of `script` with the translations of
/// `catalogs`, in order.
pub fn rewrite_script(
    script: &str,
    catalogs: &[LocaleCatalog],
    default_language: &str,
) -> Result<String> {
    let document = ScriptDocument::parse(script)?;
    debug!("Inserting translations at line {}", document.marker_lineno);
    Ok(document.render(&translation_block(catalogs, default_language)))
}

/// Localize the script at `input` with the PO files in `po_dir` and
/// write the result to `output`.
pub fn localize_script(
    input: &Path,
    po_dir: &Path,
    output: &Path,
    default_language: &str,
) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(input)
        .with_context(|| format!("Could not read {}", input.display()))?;
    let catalogs = load_locale_catalogs(po_dir)
        .with_context(|| format!("Could not load translations from {}", po_dir.display()))?;
    let localized = rewrite_script(&script, &catalogs, default_language)
        .with_context(|| format!("Could not localize {}", input.display()))?;
    std::fs::write(output, localized)
        .with_context(|| format!("Could not write {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LabeledMessage;
    use crate::locale;
    use pretty_assertions::assert_eq;

    fn catalog(code: &str, messages: &[(&str, Option<&str>, &str)]) -> LocaleCatalog {
        let mut catalog = LocaleCatalog::new(locale::resolve(code).unwrap());
        let messages = messages
            .iter()
            .map(|&(msgid, msgstr, label)| LabeledMessage {
                msgid: String::from(msgid),
                msgstr: msgstr.map(String::from),
                labels: vec![String::from(label)],
                occurrences: Vec::new(),
            })
            .collect::<Vec<_>>();
        catalog.add_messages(&messages);
        catalog
    }

    #[test]
    fn test_parse_document() {
        let document = ScriptDocument::parse("a\n  ;@INSERT_TRANSLATIONS@\nb\n").unwrap();
        assert_eq!(
            document,
            ScriptDocument {
                before: "a\n",
                after: "b\n",
                marker_lineno: 2,
            }
        );
    }

    #[test]
    fn test_parse_document_missing_marker() {
        assert!(matches!(
            ScriptDocument::parse("a\nb\n"),
            Err(Error::MissingMarker)
        ));
    }

    #[test]
    fn test_parse_document_duplicate_marker() {
        assert!(matches!(
            ScriptDocument::parse(";@INSERT_TRANSLATIONS@\na\n;@INSERT_TRANSLATIONS@\n"),
            Err(Error::DuplicateMarker {
                first: 1,
                second: 3
            })
        ));
    }

    #[test]
    fn test_rewrite_script() {
        let script = "Name \"Setup\"\n\
                      ;@INSERT_TRANSLATIONS@\n\
                      Section\n";
        let catalogs = [
            catalog("fr-FR", &[("Yes", Some("Oui"), "YES"), ("No", None, "NO")]),
            catalog("he-IL", &[("Yes", Some("כן"), "YES")]),
        ];
        assert_eq!(
            rewrite_script(script, &catalogs, "English").unwrap(),
            "Name \"Setup\"\n\
             \n  !insertmacro MUI_LANGUAGE \"French\"\n\
             \x20 LangString LANGUAGE_CODE ${LANG_French} \"fr-FR\"\n\
             \x20 LangString YES ${LANG_French} \"Oui\"\n\
             \x20 LangString NO ${LANG_French} \"No\"\n\
             \n  !insertmacro MUI_LANGUAGE \"Hebrew\"\n\
             \x20 LangString LANGUAGE_CODE ${LANG_Hebrew} \"he-IL\"\n\
             \x20 LangString LANGUAGE_RTL ${LANG_Hebrew} \"1\"\n\
             \x20 LangString YES ${LANG_Hebrew} \"כן\"\n\
             \n\
             Section\n"
        );
    }

    #[test]
    fn test_rewrite_script_default_language_has_no_macro() {
        let catalogs = [catalog("en", &[("Yes", None, "YES")])];
        assert_eq!(
            rewrite_script(";@INSERT_TRANSLATIONS@\n", &catalogs, "english").unwrap(),
            "\n\
             \x20 LangString LANGUAGE_CODE ${LANG_English} \"en\"\n\
             \x20 LangString YES ${LANG_English} \"Yes\"\n\
             \n"
        );
    }

    #[test]
    fn test_rewrite_script_without_catalogs() {
        assert_eq!(
            rewrite_script("a\n;@INSERT_TRANSLATIONS@\nb\n", &[], "English").unwrap(),
            "a\n\nb\n"
        );
    }

    #[test]
    fn test_rewrite_script_escapes_text() {
        let catalogs = [catalog(
            "de-DE",
            &[("Say \"hi\"", Some("Sag \"hallo\"\n"), "GREETING")],
        )];
        let script = rewrite_script(";@INSERT_TRANSLATIONS@", &catalogs, "English").unwrap();
        assert!(script.contains(r#"  LangString GREETING ${LANG_German} "Sag $\"hallo$\"\n""#));
    }

    #[test]
    fn test_rewrite_script_keeps_line_endings() {
        let script = "a\r\n;@INSERT_TRANSLATIONS@\r\nb\r\n";
        assert_eq!(rewrite_script(script, &[], "English").unwrap(), "a\r\n\nb\r\n");
    }

    #[test]
    fn test_localize_script() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let input = tmpdir.path().join("installer.nsi");
        let output = tmpdir.path().join("localized.nsi");
        let po_dir = tmpdir.path().join("po");
        std::fs::create_dir(&po_dir)?;
        std::fs::write(&input, "!include \"MUI2.nsh\"\n;@INSERT_TRANSLATIONS@\n")?;

        localize_script(&input, &po_dir, &output, "English")?;
        assert_eq!(std::fs::read_to_string(&output)?, "!include \"MUI2.nsh\"\n\n");
        Ok(())
    }

    #[test]
    fn test_localize_script_missing_marker() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let input = tmpdir.path().join("installer.nsi");
        let output = tmpdir.path().join("localized.nsi");
        std::fs::write(&input, "!include \"MUI2.nsh\"\n")?;

        let err = localize_script(&input, tmpdir.path(), &output, "English").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::MissingMarker)
        ));
        assert!(!output.exists());
        Ok(())
    }
}
