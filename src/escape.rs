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

//! Escaping between NSIS string literals and catalog text.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Resolve the Gettext backslash escapes in `text`.
///
/// Only `\\`, `\"`, `\n`, `\t` and `\r` are recognized. Any other
/// backslash is kept as-is.
///
/// # Examples
///
/// ```
/// use nsis_i18n_helpers::escape::unescape;
///
/// assert_eq!(unescape(r#"Say \"hi\"\n"#), "Say \"hi\"\n");
/// assert_eq!(unescape(r"C:\Program Files"), r"C:\Program Files");
/// ```
pub fn unescape(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"\\(\\|n|t|r|")"#).expect("well-formed regex"));
    re.replace_all(text, |captures: &Captures| match &captures[1] {
        "n" => "\n",
        "t" => "\t",
        "r" => "\r",
        "\\" => "\\",
        _ => "\"",
    })
    .into_owned()
}

/// Turn catalog text into the body of an NSIS string literal.
///
/// The replacements run in a fixed order. Backslashes go first so the
/// backslashes inserted by the later rules are left alone. Carriage
/// returns and newlines become `\r` and `\n` without the `$` prefix
/// the other escapes carry. The final pass folds `$$\` into `$\`, so
/// that NSIS escapes already present in the text (`$\"`, `$\t`, ...)
/// come out unchanged.
///
/// # Examples
///
/// ```
/// use nsis_i18n_helpers::escape::escape_nsis;
///
/// assert_eq!(escape_nsis("Click \"Next\"\n"), r#"Click $\"Next$\"\n"#);
/// ```
pub fn escape_nsis(text: &str) -> String {
    text.replace('\\', r"$\\")
        .replace('\t', r"$\t")
        .replace('\r', r"\r")
        .replace('\n', r"\n")
        .replace('"', r#"$\""#)
        .replace(r"$$\", r"$\")
}
