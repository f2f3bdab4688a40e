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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown locale {0:?}, must be a xx-YY language code")]
    UnknownLocale(String),
    #[error("Could not find the ;@INSERT_TRANSLATIONS@ marker line")]
    MissingMarker,
    #[error("Found ;@INSERT_TRANSLATIONS@ on line {second}, but it was already found on line {first}")]
    DuplicateMarker { first: usize, second: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
