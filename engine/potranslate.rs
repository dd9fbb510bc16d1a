//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! potranslate - translate a catalog offline and write .po + .mo
//!
//! Reads a .po or .pot file, pushes its untranslated strings through a
//! dictionary backend (a tab-separated original/translated pairs
//! file), stamps the bookkeeping headers, and writes the updated .po
//! alongside its compiled .mo.

use clap::Parser;
use potrans_engine::catalog_lib::translate::DictionaryTranslator;
use potrans_engine::catalog_lib::workflow::{
    read_po_file, translate_catalog, write_mo_file, write_po_file, EngineConfig,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::exit;

/// potranslate - translate a catalog offline and write .po + .mo
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Tab-separated original<TAB>translated pairs file
    #[arg(short = 'd', long = "dictionary")]
    dictionary: PathBuf,

    /// Target locale (xx or xx_YY, e.g. fa_IR)
    #[arg(short = 'l', long = "lang")]
    target_lang: String,

    /// Retranslate strings that already have a translation
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Output .po path; defaults to the input path (required when the
    /// input is a .pot template)
    #[arg(short = 'o', long = "output-file")]
    output: Option<PathBuf>,

    /// Output .mo path; defaults to the output .po with .mo extension
    #[arg(long = "mo")]
    mo_output: Option<PathBuf>,

    /// Name stamped into Last-Translator
    #[arg(long = "translator-name")]
    translator_name: Option<String>,

    /// Input .po or .pot file
    input: PathBuf,
}

/// Load a tab-separated pairs file into a dictionary backend
fn load_dictionary(path: &Path) -> Result<DictionaryTranslator, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let mut entries = HashMap::new();
    for (idx, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        match line.split_once('\t') {
            Some((original, translated)) => {
                entries.insert(original.to_string(), translated.to_string());
            }
            None => {
                return Err(format!(
                    "{}: line {}: expected original<TAB>translated",
                    path.display(),
                    idx + 1
                ));
            }
        }
    }
    Ok(DictionaryTranslator::new(entries))
}

fn is_pot(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("pot"))
}

fn run(args: &Args) -> Result<usize, String> {
    let template = is_pot(&args.input);
    let output = match args.output {
        Some(ref output) => output.clone(),
        None if template => {
            return Err("-o is required when the input is a .pot template".to_string());
        }
        None => args.input.clone(),
    };
    let mo_output = args
        .mo_output
        .clone()
        .unwrap_or_else(|| output.with_extension("mo"));

    let mut catalog = read_po_file(&args.input).map_err(|e| e.to_string())?;
    let translator = load_dictionary(&args.dictionary)?;

    let config = EngineConfig {
        last_translator: args.translator_name.clone(),
        ..Default::default()
    };

    // A template carries no translations, so everything is a candidate.
    let force = args.force || template;
    let updated = translate_catalog(
        &mut catalog,
        &translator,
        &args.target_lang,
        force,
        &config,
    )
    .map_err(|e| e.to_string())?;

    write_po_file(&output, &catalog).map_err(|e| e.to_string())?;
    write_mo_file(&mo_output, &catalog).map_err(|e| e.to_string())?;
    Ok(updated)
}

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok(updated) => {
            println!("potranslate: {} strings translated", updated);
        }
        Err(message) => {
            eprintln!("potranslate: {}", message);
            exit(1);
        }
    }
}
