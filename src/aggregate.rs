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

//! Grouping of directives by their text.

use std::collections::HashMap;

use crate::scanner::Directive;

/// A place in a script where a message was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub path: String,
    pub lineno: usize,
}

/// All directives sharing the same text.
///
/// The same text can be used on several lines and under several
/// labels. Both lists keep the order in which the directives were
/// added, including repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    pub occurrences: Vec<Occurrence>,
    pub labels: Vec<String>,
}

/// Collects directives into one [`MessageEntry`] per distinct text.
///
/// # Examples
///
/// ```
/// use nsis_i18n_helpers::aggregate::MessageAggregator;
/// use nsis_i18n_helpers::scanner::extract_directives;
///
/// let script = "LangString YES ${LANG_English} \"Yes\"\n\
///               LangString CONFIRM ${LANG_English} \"Yes\"\n";
/// let mut aggregator = MessageAggregator::new();
/// aggregator.extend("setup.nsi", extract_directives(script, "English"));
///
/// let entries = aggregator.entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].labels, ["YES", "CONFIRM"]);
/// ```
#[derive(Debug, Default)]
pub struct MessageAggregator {
    entries: Vec<MessageEntry>,
    /// Index into `entries` by text.
    index: HashMap<String, usize>,
}

impl MessageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directive found in the script at `path`.
    pub fn add(&mut self, path: &str, directive: Directive) {
        let Directive {
            label,
            text,
            lineno,
        } = directive;
        let idx = match self.index.get(&text) {
            Some(&idx) => idx,
            None => {
                self.index.insert(text.clone(), self.entries.len());
                self.entries.push(MessageEntry {
                    text,
                    occurrences: Vec::new(),
                    labels: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[idx];
        entry.occurrences.push(Occurrence {
            path: String::from(path),
            lineno,
        });
        entry.labels.push(label);
    }

    /// Add all `directives` found in the script at `path`.
    pub fn extend<I>(&mut self, path: &str, directives: I)
    where
        I: IntoIterator<Item = Directive>,
    {
        for directive in directives {
            self.add(path, directive);
        }
    }

    /// The entries in the order their text was first seen.
    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<MessageEntry> {
        self.entries
    }
}
