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

//! Scanner for `LangString` directives in NSIS scripts.
//!
//! A directive looks like
//!
//! ```text
//! LangString WELCOME_TITLE ${LANG_English} "Welcome to the installer"
//! ```
//!
//! The quoted value may continue over several lines when a line ends
//! with a backslash:
//!
//! ```text
//! LangString WELCOME_TEXT ${LANG_English} "This wizard will guide you \
//!     through the installation."
//! ```
//!
//! The scanner is lenient: a value which is never closed is kept as
//! far as it could be read, and nothing in the script is an error.

use std::borrow::Cow;

use tracing::warn;

use crate::escape::unescape;

/// The NSIS command declaring a localized string.
pub const LANG_STRING: &str = "LangString";

/// The language token used in directives, e.g. `${LANG_English}`.
pub fn language_token(language: &str) -> String {
    format!("${{LANG_{language}}}")
}

/// A `LangString` directive found in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub label: String,
    /// The decoded value.
    pub text: String,
    /// Line number (1-based) where the directive starts.
    pub lineno: usize,
}

/// Remove the continuation marker from `line`.
///
/// A line continues onto the next line when it ends with a backslash
/// (ignoring trailing whitespace). The backslash and the whitespace
/// after it are removed. Exactly one backslash is removed. A line
/// without the marker keeps its line break. A blank line contributes
/// nothing.
fn strip_continuation(line: &str) -> Cow<'_, str> {
    let trimmed = line.trim_end();
    match trimmed.strip_suffix('\\') {
        Some(stripped) => Cow::Borrowed(stripped),
        None if trimmed.is_empty() => Cow::Borrowed(""),
        None => Cow::Owned(format!("{line}\n")),
    }
}

/// Find the quote closing a value in `text`.
///
/// Only NSIS escapes are honored: `$\"` does not close the value,
/// `$\\` and `$$` are skipped whole. A plain backslash escapes
/// nothing, so `"C:\Temp\"` closes at its last quote.
fn find_closing_quote(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return Some(idx),
            '$' => match chars.peek() {
                Some((_, '$')) => {
                    chars.next();
                }
                Some((_, '\\')) => {
                    chars.next();
                    chars.next();
                }
                _ => {}
            },
            _ => {}
        }
    }
    None
}

/// The start of a value on a directive line.
enum Opening<'a> {
    /// There is no quote on the line.
    Missing,
    /// The value is quoted on a single line.
    SingleLine(&'a str),
    /// The value continues on the following lines.
    Multiline(String),
}

impl<'a> Opening<'a> {
    fn parse(line: &'a str) -> Self {
        let Some(quote) = line.find('"') else {
            return Opening::Missing;
        };
        let start = quote + 1;
        match find_closing_quote(&line[start..]) {
            Some(end) => Opening::SingleLine(&line[start..start + end]),
            None => {
                let line = strip_continuation(line);
                Opening::Multiline(line.get(start..).unwrap_or_default().to_string())
            }
        }
    }
}

#[derive(Debug)]
enum State {
    Scanning,
    InMultilineValue {
        label: String,
        lineno: usize,
        value: String,
    },
}

/// Line-by-line scanner for the directives of a single language.
///
/// Feed lines in order with [`DirectiveScanner::push_line`] and
/// collect the result with [`DirectiveScanner::finish`].
#[derive(Debug)]
pub struct DirectiveScanner {
    /// Upper-cased language token, e.g. `${LANG_ENGLISH}`.
    language_token: String,
    state: State,
    directives: Vec<Directive>,
}

impl DirectiveScanner {
    /// Create a scanner for directives in `language`, e.g. `"English"`.
    pub fn new(language: &str) -> Self {
        DirectiveScanner {
            language_token: language_token(language).to_uppercase(),
            state: State::Scanning,
            directives: Vec::new(),
        }
    }

    /// Process line number `lineno`, given without its line break.
    pub fn push_line(&mut self, lineno: usize, line: &str) {
        self.state = match std::mem::replace(&mut self.state, State::Scanning) {
            State::Scanning => self.scan(lineno, line),
            State::InMultilineValue {
                label,
                lineno,
                mut value,
            } => {
                let fragment = strip_continuation(line);
                match find_closing_quote(&fragment) {
                    Some(end) => {
                        value.push_str(fragment[..end].trim_start());
                        self.emit(label, lineno, &value);
                        State::Scanning
                    }
                    None => {
                        value.push_str(fragment.trim_start());
                        State::InMultilineValue {
                            label,
                            lineno,
                            value,
                        }
                    }
                }
            }
        };
    }

    /// Finish scanning and return the directives in script order.
    pub fn finish(mut self) -> Vec<Directive> {
        if let State::InMultilineValue {
            label,
            lineno,
            value,
        } = std::mem::replace(&mut self.state, State::Scanning)
        {
            warn!("Label '{label}' on line {lineno} is missing its closing quote");
            self.emit(label, lineno, &value);
        }
        self.directives
    }

    fn scan(&mut self, lineno: usize, line: &str) -> State {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        let label = match tokens[..] {
            [LANG_STRING, label, language, _, ..]
                if language.to_uppercase() == self.language_token =>
            {
                label.to_string()
            }
            _ => return State::Scanning,
        };

        match Opening::parse(line) {
            Opening::Missing => {
                warn!("Label '{label}' on line {lineno} has no quoted value");
                self.emit(label, lineno, "");
                State::Scanning
            }
            Opening::SingleLine(value) => {
                self.emit(label, lineno, value);
                State::Scanning
            }
            Opening::Multiline(value) => State::InMultilineValue {
                label,
                lineno,
                value,
            },
        }
    }

    fn emit(&mut self, label: String, lineno: usize, raw: &str) {
        let text = unescape(raw.trim_matches(|c| c == '\t' || c == '\n'));
        self.directives.push(Directive {
            label,
            text,
            lineno,
        });
    }
}

/// Extract the `language` directives from `script`.
///
/// # Examples
///
/// ```
/// use nsis_i18n_helpers::scanner::extract_directives;
///
/// let script = "LangString TITLE ${LANG_English} \"Setup\"\n\
///               LangString TITLE ${LANG_French} \"Installation\"\n";
/// let directives = extract_directives(script, "English");
/// assert_eq!(directives.len(), 1);
/// assert_eq!(directives[0].label, "TITLE");
/// assert_eq!(directives[0].text, "Setup");
/// assert_eq!(directives[0].lineno, 1);
/// ```
pub fn extract_directives(script: &str, language: &str) -> Vec<Directive> {
    let mut scanner = DirectiveScanner::new(language);
    for (idx, line) in script.lines().enumerate() {
        scanner.push_line(idx + 1, line);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Extract English directives in `script`, assert they match `expected`.
    #[track_caller]
    fn assert_extract_directives(script: &str, expected: Vec<(usize, &str, &str)>) {
        assert_eq!(
            extract_directives(script, "English")
                .iter()
                .map(|d| (d.lineno, &d.label[..], &d.text[..]))
                .collect::<Vec<_>>(),
            expected,
        );
    }

    #[test]
    fn test_strip_continuation() {
        assert_eq!(strip_continuation(r"Hello \"), "Hello ");
        assert_eq!(strip_continuation("Hello \\  \t"), "Hello ");
        assert_eq!(strip_continuation("Hello"), "Hello\n");
        assert_eq!(strip_continuation("   "), "");
    }

    #[test]
    fn test_strip_continuation_removes_one_backslash() {
        assert_eq!(strip_continuation(r"a\\"), r"a\");
    }

    #[test]
    fn test_extract_empty() {
        assert_extract_directives("", vec![]);
    }

    #[test]
    fn test_extract_single_line() {
        assert_extract_directives(
            "LangString TITLE ${LANG_English} \"Setup Wizard\"",
            vec![(1, "TITLE", "Setup Wizard")],
        );
    }

    #[test]
    fn test_extract_language_is_case_insensitive() {
        assert_extract_directives(
            "LangString A ${LANG_ENGLISH} \"one\"\n\
             LangString B ${lang_english} \"two\"\n",
            vec![(1, "A", "one"), (2, "B", "two")],
        );
    }

    #[test]
    fn test_extract_skips_other_languages() {
        assert_extract_directives(
            "LangString A ${LANG_French} \"un\"\n\
             LangString A ${LANG_English} \"one\"\n\
             LangString A ${LANG_German} \"eins\"\n",
            vec![(2, "A", "one")],
        );
    }

    #[test]
    fn test_extract_skips_other_commands() {
        assert_extract_directives(
            "!define NAME \"Setup\"\n\
             ; LangString A ${LANG_English} \"commented\"\n\
             Name \"${NAME}\"\n\
             LangString A ${LANG_English}\n\
             LangString B ${LANG_English} \"kept\"\n",
            vec![(5, "B", "kept")],
        );
    }

    #[test]
    fn test_extract_label_is_case_sensitive() {
        assert_extract_directives(
            "LangString Title ${LANG_English} \"a\"\n\
             LangString TITLE ${LANG_English} \"b\"\n",
            vec![(1, "Title", "a"), (2, "TITLE", "b")],
        );
    }

    #[test]
    fn test_extract_indented_directive() {
        assert_extract_directives(
            "  \tLangString A ${LANG_English} \"indented\"",
            vec![(1, "A", "indented")],
        );
    }

    #[test]
    fn test_extract_multiline() {
        assert_extract_directives(
            "LangString GREETING ${LANG_English} \"Hello \\\n\
             World\"\n\
             LangString NEXT ${LANG_English} \"Next\"\n",
            vec![(1, "GREETING", "Hello World"), (3, "NEXT", "Next")],
        );
    }

    #[test]
    fn test_extract_multiline_trims_indentation() {
        assert_extract_directives(
            "LangString TEXT ${LANG_English} \"This wizard will guide you \\\n\
             \x20   through the \\\n\
             \x20   installation.\"\n",
            vec![(1, "TEXT", "This wizard will guide you through the installation.")],
        );
    }

    #[test]
    fn test_extract_multiline_without_marker_keeps_line_break() {
        assert_extract_directives(
            "LangString TEXT ${LANG_English} \"first\\\n\
             second\n\
             third\"\n",
            vec![(1, "TEXT", "firstsecond\nthird")],
        );
    }

    #[test]
    fn test_extract_multiline_line_numbers() {
        assert_extract_directives(
            "; header\n\
             LangString A ${LANG_English} \"a \\\n\
             b \\\n\
             c\"\n\
             LangString B ${LANG_English} \"d\"\n",
            vec![(2, "A", "a b c"), (5, "B", "d")],
        );
    }

    #[test]
    fn test_extract_windows_line_endings() {
        assert_extract_directives(
            "LangString A ${LANG_English} \"one \\\r\n\
             two\"\r\n\
             LangString B ${LANG_English} \"three\"\r\n",
            vec![(1, "A", "one two"), (3, "B", "three")],
        );
    }

    #[test]
    fn test_extract_unescapes_value() {
        assert_extract_directives(
            r#"LangString A ${LANG_English} "Click $\"Next$\"\n""#,
            vec![(1, "A", "Click $\"Next$\"\n")],
        );
    }

    #[test]
    fn test_find_closing_quote() {
        assert_eq!(find_closing_quote(r#"abc" rest"#), Some(3));
        assert_eq!(find_closing_quote(r#"a$\"b$\"c""#), Some(9));
        assert_eq!(find_closing_quote(r#"C:$\\" rest"#), Some(5));
        assert_eq!(find_closing_quote(r#"C:\Temp\" rest"#), Some(8));
        assert_eq!(find_closing_quote(r#"$$\" rest"#), Some(3));
        assert_eq!(find_closing_quote("no quote"), None);
    }

    #[test]
    fn test_extract_value_ending_in_backslash() {
        assert_extract_directives(
            "LangString DIR ${LANG_English} \"C:\\Program Files\\\"\n\
             LangString NEXT ${LANG_English} \"Next\"\n",
            vec![(1, "DIR", r"C:\Program Files\"), (2, "NEXT", "Next")],
        );
    }

    #[test]
    fn test_extract_escaped_backslash_closes_multiline() {
        assert_extract_directives(
            "LangString DIR ${LANG_English} \"Install to \\\n\
             \x20   C:$\\\\\"\n\
             LangString NEXT ${LANG_English} \"Next\"\n",
            vec![(1, "DIR", r"Install to C:$\"), (3, "NEXT", "Next")],
        );
    }

    #[test]
    fn test_extract_escaped_quote_in_multiline() {
        assert_extract_directives(
            "LangString A ${LANG_English} \"Press $\\\"OK$\\\" \\\n\
             to finish\"\n",
            vec![(1, "A", "Press $\"OK$\" to finish")],
        );
    }

    #[test]
    fn test_extract_trims_tabs_and_newlines() {
        assert_extract_directives(
            "LangString A ${LANG_English} \"\tpadded\t\"",
            vec![(1, "A", "padded")],
        );
    }

    #[test]
    fn test_extract_missing_quote() {
        assert_extract_directives(
            "LangString A ${LANG_English} unquoted value\n\
             LangString B ${LANG_English} \"b\"\n",
            vec![(1, "A", ""), (2, "B", "b")],
        );
    }

    #[test]
    fn test_extract_unterminated_value() {
        assert_extract_directives(
            "LangString A ${LANG_English} \"never \\\n\
             closed \\\n\
             LangString B ${LANG_English}",
            vec![(1, "A", "never closed LangString B ${LANG_English}")],
        );
    }

    #[test]
    fn test_extract_duplicate_labels() {
        assert_extract_directives(
            "LangString A ${LANG_English} \"first\"\n\
             LangString A ${LANG_English} \"second\"\n",
            vec![(1, "A", "first"), (2, "A", "second")],
        );
    }

    #[test]
    fn test_scanner_push_line() {
        let mut scanner = DirectiveScanner::new("German");
        scanner.push_line(10, "LangString A ${LANG_German} \"Hallo \\");
        scanner.push_line(11, "Welt\"");
        assert_eq!(
            scanner.finish(),
            vec![Directive {
                label: String::from("A"),
                text: String::from("Hallo Welt"),
                lineno: 10,
            }]
        );
    }
}
