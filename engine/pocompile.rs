//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! pocompile - compile message catalogs to binary format
//!
//! Reads .po files and writes the compiled .mo files a gettext runtime
//! loads.

use clap::Parser;
use potrans_engine::catalog_lib::workflow::{read_po_file, write_mo_file};
use std::path::{Path, PathBuf};
use std::process::exit;

/// pocompile - compile message catalogs to binary format
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Output file name (only valid with a single input file)
    #[arg(short = 'o', long = "output-file")]
    output: Option<PathBuf>,

    /// Append .mo to the input file name instead of replacing .po
    #[arg(short = 'S')]
    add_suffix: bool,

    /// Print warnings for entries whose plural translation count
    /// disagrees with the Plural-Forms header
    #[arg(short = 'v')]
    verbose: bool,

    /// Input .po files
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn output_path(input: &Path, args: &Args) -> PathBuf {
    if let Some(ref output) = args.output {
        return output.clone();
    }
    if args.add_suffix {
        let mut name = input.to_path_buf().into_os_string();
        name.push(".mo");
        return PathBuf::from(name);
    }
    input.with_extension("mo")
}

fn main() {
    let args = Args::parse();

    if args.output.is_some() && args.files.len() > 1 {
        eprintln!("pocompile: -o cannot be used with multiple input files");
        exit(1);
    }

    let mut exit_code = 0;
    for file in &args.files {
        let catalog = match read_po_file(file) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("pocompile: {}", e);
                exit_code = 1;
                continue;
            }
        };

        if args.verbose {
            let nplurals = catalog.nplurals();
            for entry in &catalog.entries {
                if entry.is_plural() && entry.plural_translations.len() != nplurals {
                    eprintln!(
                        "pocompile: {}: warning: msgid \"{}\" has {} plural translations, header declares {}",
                        file.display(),
                        entry.original,
                        entry.plural_translations.len(),
                        nplurals
                    );
                }
            }
        }

        let output = output_path(file, &args);
        if let Err(e) = write_mo_file(&output, &catalog) {
            eprintln!("pocompile: {}", e);
            exit_code = 1;
        }
    }

    exit(exit_code);
}
