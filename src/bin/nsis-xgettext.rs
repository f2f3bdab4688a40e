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

//! `xgettext` for NSIS scripts
//!
//! This program works like `xgettext`, meaning it will extract the
//! translatable strings from your installer script. The strings of
//! the default language are saved in a GNU Gettext template, by
//! default `installer.pot`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use nsis_i18n_helpers::xgettext::{create_template, ExtractOptions};
use polib::po_file;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Parser)]
#[command(about, disable_version_flag = true)]
struct Args {
    /// The NSIS script to extract strings from.
    #[arg(short, long)]
    input: PathBuf,
    /// The template file to write.
    #[arg(short, long, default_value = "installer.pot")]
    output: PathBuf,
    /// Project name written to the template header.
    #[arg(short, long, default_value = "")]
    project: String,
    /// Project version written to the template header.
    #[arg(short = 'v', long = "version", default_value = "")]
    project_version: String,
    /// Default language of the script.
    #[arg(short, long = "lang", default_value = "English")]
    language: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let options = ExtractOptions {
        project: args.project,
        version: args.project_version,
        language: args.language,
    };
    let catalog = create_template(&args.input, &options, &chrono::Local::now())?;
    po_file::write(&catalog, &args.output)
        .with_context(|| format!("Could not write {}", args.output.display()))?;

    println!("{}: pot file generated", args.output.display());
    Ok(())
}
