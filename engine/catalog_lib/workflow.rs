//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! File I/O and the translate/save pipeline
//!
//! Ties the codec, compiler, merge engine and translation boundary
//! together: read a catalog from disk, push its untranslated strings
//! through a backend, merge the results, stamp the bookkeeping
//! headers, and write the .po and compiled .mo back out.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::catalog_lib::catalog::Catalog;
use crate::catalog_lib::merge::apply_translations;
use crate::catalog_lib::mo_file::{compile_mo, MoError};
use crate::catalog_lib::po_file::{parse_po, serialize_po, PoError};
use crate::catalog_lib::translate::{Translate, TranslateError};

/// Engine-wide configuration, passed explicitly to whatever needs it
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Value stamped into X-Generator
    pub generator: String,
    /// Value stamped into Last-Translator, when set
    pub last_translator: Option<String>,
    /// Plural-Forms stamped on translated catalogs; the engine carries
    /// no per-language plural rules
    pub plural_forms: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            generator: "potrans".to_string(),
            last_translator: None,
            plural_forms: "nplurals=2; plural=(n != 1);".to_string(),
        }
    }
}

/// Error type for pipeline operations
#[derive(Debug)]
pub enum WorkflowError {
    /// File missing, unreadable, or directory uncreatable
    Io { path: PathBuf, source: io::Error },
    /// Malformed .po text, with the failing path
    Parse { path: PathBuf, source: PoError },
    /// .mo layout invariant broken
    Compile(MoError),
    /// Translation backend failure, surfaced verbatim
    Translate(TranslateError),
    /// Backend returned a different number of results than requested
    BatchMismatch { expected: usize, got: usize },
}

impl std::fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            WorkflowError::Parse { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            WorkflowError::Compile(e) => write!(f, "compile: {}", e),
            WorkflowError::Translate(e) => write!(f, "translation failed: {}", e),
            WorkflowError::BatchMismatch { expected, got } => write!(
                f,
                "translation backend returned {} results for {} texts",
                got, expected
            ),
        }
    }
}

impl std::error::Error for WorkflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkflowError::Io { source, .. } => Some(source),
            WorkflowError::Parse { source, .. } => Some(source),
            WorkflowError::Compile(e) => Some(e),
            WorkflowError::Translate(e) => Some(e),
            WorkflowError::BatchMismatch { .. } => None,
        }
    }
}

impl From<MoError> for WorkflowError {
    fn from(e: MoError) -> Self {
        WorkflowError::Compile(e)
    }
}

impl From<TranslateError> for WorkflowError {
    fn from(e: TranslateError) -> Self {
        WorkflowError::Translate(e)
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> WorkflowError + '_ {
    move |source| WorkflowError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and parse a .po (or .pot) file
pub fn read_po_file(path: &Path) -> Result<Catalog, WorkflowError> {
    let text = fs::read_to_string(path).map_err(io_err(path))?;
    parse_po(&text).map_err(|source| WorkflowError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), WorkflowError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err(path))?;
        }
    }
    Ok(())
}

/// Serialize a catalog and write it to a .po file, creating parent
/// directories as needed
pub fn write_po_file(path: &Path, catalog: &Catalog) -> Result<(), WorkflowError> {
    ensure_parent_dir(path)?;
    fs::write(path, serialize_po(catalog)).map_err(io_err(path))
}

/// Compile a catalog and write it to a .mo file, creating parent
/// directories as needed
pub fn write_mo_file(path: &Path, catalog: &Catalog) -> Result<(), WorkflowError> {
    ensure_parent_dir(path)?;
    let data = compile_mo(catalog)?;
    fs::write(path, data).map_err(io_err(path))
}

/// Deterministic output paths for a translated catalog:
/// `<lang_dir>/<textdomain>-<locale with hyphens>.po` / `.mo`
pub fn output_paths(lang_dir: &Path, text_domain: &str, locale: &str) -> (PathBuf, PathBuf) {
    let base = format!("{}-{}", text_domain, locale.replace('_', "-"));
    (
        lang_dir.join(format!("{}.po", base)),
        lang_dir.join(format!("{}.mo", base)),
    )
}

/// Stamp the bookkeeping headers a freshly translated catalog carries
fn stamp_headers(catalog: &mut Catalog, target_locale: &str, config: &EngineConfig) {
    catalog.headers.set("Language", target_locale);
    catalog.headers.set("MIME-Version", "1.0");
    catalog
        .headers
        .set("Content-Type", "text/plain; charset=UTF-8");
    catalog.headers.set("Content-Transfer-Encoding", "8bit");
    catalog.headers.set("X-Generator", &config.generator);
    catalog.headers.set("Plural-Forms", &config.plural_forms);
    catalog.headers.set(
        "PO-Revision-Date",
        &Local::now().format("%Y-%m-%d %H:%M%z").to_string(),
    );
    if let Some(ref translator) = config.last_translator {
        catalog.headers.set("Last-Translator", translator);
    }
}

/// Translate a catalog's untranslated strings in one batch
///
/// With `force` set, every singular original is retranslated (the
/// template path, where nothing is translated yet, behaves the same
/// way). Returns the number of entries updated; a catalog with
/// nothing to translate is returned untouched.
pub fn translate_catalog(
    catalog: &mut Catalog,
    translator: &dyn Translate,
    target_locale: &str,
    force: bool,
    config: &EngineConfig,
) -> Result<usize, WorkflowError> {
    let originals = catalog.untranslated_originals(force);
    if originals.is_empty() {
        return Ok(0);
    }

    let translated = translator.translate(&originals, target_locale)?;
    if translated.len() != originals.len() {
        return Err(WorkflowError::BatchMismatch {
            expected: originals.len(),
            got: translated.len(),
        });
    }

    let pairs: HashMap<String, String> =
        originals.into_iter().zip(translated).collect();
    let updated = apply_translations(catalog, &pairs);

    stamp_headers(catalog, target_locale, config);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_lib::catalog::Entry;
    use crate::catalog_lib::translate::DictionaryTranslator;

    fn dictionary(items: &[(&str, &str)]) -> DictionaryTranslator {
        DictionaryTranslator::new(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_output_paths_hyphenate_locale() {
        let (po, mo) = output_paths(Path::new("/langs/plugins"), "akismet", "fa_IR");
        assert_eq!(po, PathBuf::from("/langs/plugins/akismet-fa-IR.po"));
        assert_eq!(mo, PathBuf::from("/langs/plugins/akismet-fa-IR.mo"));
    }

    #[test]
    fn test_translate_catalog_merges_and_stamps() {
        let mut catalog = Catalog::new();
        catalog.entries.push(Entry::new("Hello"));
        catalog.entries.push(Entry {
            original: "Bye".to_string(),
            translation: "Khoda hafez".to_string(),
            ..Default::default()
        });

        let translator = dictionary(&[("Hello", "Salam")]);
        let config = EngineConfig::default();
        let updated =
            translate_catalog(&mut catalog, &translator, "fa_IR", false, &config).unwrap();

        assert_eq!(updated, 1);
        assert_eq!(catalog.entries[0].translation, "Salam");
        assert_eq!(catalog.headers.get("Language"), Some("fa_IR"));
        assert_eq!(catalog.headers.get("X-Generator"), Some("potrans"));
        assert_eq!(
            catalog.headers.get("Plural-Forms"),
            Some("nplurals=2; plural=(n != 1);")
        );
        assert!(catalog.headers.get("PO-Revision-Date").is_some());
    }

    #[test]
    fn test_translate_catalog_nothing_to_do() {
        let mut catalog = Catalog::new();
        catalog.entries.push(Entry {
            original: "Bye".to_string(),
            translation: "Khoda hafez".to_string(),
            ..Default::default()
        });

        let translator = dictionary(&[]);
        let updated = translate_catalog(
            &mut catalog,
            &translator,
            "fa_IR",
            false,
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(updated, 0);
        // Headers untouched when there was nothing to translate
        assert!(catalog.headers.get("Language").is_none());
    }

    #[test]
    fn test_translate_catalog_force_retranslates() {
        let mut catalog = Catalog::new();
        catalog.entries.push(Entry {
            original: "Bye".to_string(),
            translation: "old".to_string(),
            ..Default::default()
        });

        let translator = dictionary(&[("Bye", "Khoda hafez")]);
        let updated = translate_catalog(
            &mut catalog,
            &translator,
            "fa_IR",
            true,
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(updated, 1);
        assert_eq!(catalog.entries[0].translation, "Khoda hafez");
    }

    #[test]
    fn test_translate_catalog_backend_failure() {
        let mut catalog = Catalog::new();
        catalog.entries.push(Entry::new("Hello"));

        let translator = dictionary(&[]);
        let err = translate_catalog(
            &mut catalog,
            &translator,
            "fa_IR",
            false,
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WorkflowError::Translate(_)));
        // The catalog is left untouched on failure
        assert_eq!(catalog.entries[0].translation, "");
    }

    #[test]
    fn test_read_po_file_missing() {
        let err = read_po_file(Path::new("/nonexistent/x.po")).unwrap_err();
        match err {
            WorkflowError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/x.po"));
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
