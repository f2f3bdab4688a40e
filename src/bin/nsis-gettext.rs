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

//! `gettext` for NSIS scripts
//!
//! This program merges the translations found in a directory of PO
//! files into your installer script. The line of the script holding
//! `;@INSERT_TRANSLATIONS@` is replaced by the `LangString` directives
//! of every language and the result is written to a new script.

use std::path::PathBuf;

use clap::Parser;
use nsis_i18n_helpers::rewrite::localize_script;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Parser)]
#[command(about)]
struct Args {
    /// The NSIS script to localize. It must contain exactly one line
    /// with `;@INSERT_TRANSLATIONS@`, which is replaced by the
    /// translations.
    #[arg(short, long)]
    input: PathBuf,
    /// The localized script to write.
    #[arg(short, long)]
    output: PathBuf,
    /// Directory containing the translation .po files.
    #[arg(short, long)]
    podir: PathBuf,
    /// Default language of the script.
    #[arg(short, long = "lang", default_value = "English")]
    language: String,
    /// Log debugging details.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    localize_script(&args.input, &args.podir, &args.output, &args.language)?;

    println!("{}: NSIS script successfully localized", args.output.display());
    Ok(())
}
