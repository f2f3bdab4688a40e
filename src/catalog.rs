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

//! Catalog messages which carry NSIS labels.
//!
//! Gettext has no field for the NSIS labels using a message, so they
//! are stored space-separated in the extracted comment (`#.`) of the
//! message:
//!
//! ```text
//! #. BUTTON_YES CONFIRM_YES
//! #: installer.nsi:12
//! #: installer.nsi:40
//! msgid "Yes"
//! msgstr ""
//! ```
//!
//! Everything else works with [`LabeledMessage`] and never looks at
//! the comment directly.

use polib::message::{Message, MessageView};

use crate::aggregate::{MessageEntry, Occurrence};

/// A catalog message together with the labels using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledMessage {
    pub msgid: String,
    /// The translation, `None` if the message is untranslated or fuzzy.
    pub msgstr: Option<String>,
    pub labels: Vec<String>,
    pub occurrences: Vec<Occurrence>,
}

fn build_source(occurrence: &Occurrence) -> String {
    format!("{}:{}", occurrence.path, occurrence.lineno)
}

fn parse_source(source: &str) -> Option<Occurrence> {
    let (path, lineno) = source.rsplit_once(':')?;
    Some(Occurrence {
        path: String::from(path),
        lineno: lineno.parse().ok()?,
    })
}

impl LabeledMessage {
    /// The translated text if there is one, the source text otherwise.
    pub fn text(&self) -> &str {
        self.msgstr.as_deref().unwrap_or(&self.msgid)
    }

    pub fn is_translated(&self) -> bool {
        self.msgstr.is_some()
    }

    /// Read a message from a catalog.
    pub fn from_message(message: &dyn MessageView) -> Self {
        let msgstr = Some(message)
            .filter(|msg| !msg.is_fuzzy())
            .and_then(|msg| msg.msgstr().ok())
            .filter(|msgstr| !msgstr.is_empty())
            .map(String::from);
        LabeledMessage {
            msgid: String::from(message.msgid()),
            msgstr,
            labels: message
                .comments()
                .split_whitespace()
                .map(String::from)
                .collect(),
            occurrences: message
                .source()
                .lines()
                .filter_map(parse_source)
                .collect(),
        }
    }

    /// Build a catalog message.
    pub fn to_message(&self) -> Message {
        let source = self
            .occurrences
            .iter()
            .map(build_source)
            .collect::<Vec<_>>()
            .join("\n");
        Message::build_singular()
            .with_source(source)
            .with_msgid(self.msgid.clone())
            .with_msgstr(self.msgstr.clone().unwrap_or_default())
            .with_comments(self.labels.join(" "))
            .done()
    }
}

impl From<MessageEntry> for LabeledMessage {
    fn from(entry: MessageEntry) -> Self {
        LabeledMessage {
            msgid: entry.text,
            msgstr: None,
            labels: entry.labels,
            occurrences: entry.occurrences,
        }
    }
}
