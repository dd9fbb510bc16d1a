//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Catalog discovery across theme/plugin roots and shared language
//! pools
//!
//! Discovery is a pure function over a list of root descriptors: the
//! caller enumerates installed themes/plugins and the global language
//! directories, and `discover` returns a deduplicated inventory of
//! catalog files with identity metadata parsed from the file names.
//! It never fails; unreadable directories are skipped and unparseable
//! file names degrade to the `unknown` locale.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use regex::Regex;
use sha2::{Digest, Sha256};

/// Who owns a discovered catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerType {
    /// Theme-local catalog (theme root or its languages/ dir)
    Theme,
    /// Plugin-local catalog
    Plugin,
    /// Catalog in the shared themes language pool
    GlobalTheme,
    /// Catalog in the shared plugins language pool
    GlobalPlugin,
}

impl OwnerType {
    /// Stable identifier token used in ref ids
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerType::Theme => "theme",
            OwnerType::Plugin => "plugin",
            OwnerType::GlobalTheme => "global_theme",
            OwnerType::GlobalPlugin => "global_plugin",
        }
    }
}

impl std::fmt::Display for OwnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One installed theme or plugin root, supplied by the caller
#[derive(Debug, Clone)]
pub struct PackageRoot {
    /// Root directory of the theme/plugin
    pub path: PathBuf,
    /// Theme or Plugin
    pub owner: OwnerType,
    /// Directory slug (e.g. "twentyfifteen")
    pub slug: String,
    /// Human-readable name
    pub display_name: String,
    /// Text domain; catalogs are named `<text_domain>-<locale>`
    pub text_domain: String,
}

/// A shared language directory plus the set of installed slugs used to
/// decide whether a catalog's owner still exists
#[derive(Debug, Clone)]
pub struct GlobalLangDir {
    /// The pool directory
    pub path: PathBuf,
    /// GlobalTheme or GlobalPlugin
    pub owner: OwnerType,
    /// Slugs of themes/plugins currently installed
    pub installed_slugs: Vec<String>,
}

/// Identity and location metadata for one discovered catalog file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFileRef {
    /// Stable handle: `<type>_<slug>_<locale>_<path hash>`
    pub id: String,
    /// Owner type
    pub owner: OwnerType,
    /// Display name of the owning theme/plugin (slug for pool files)
    pub owner_name: String,
    /// Text domain
    pub text_domain: String,
    /// Locale parsed from the file name, or "unknown"
    pub locale: String,
    /// Full path to the file (may not exist for templates)
    pub file_path: PathBuf,
    /// Base file name
    pub file_name: String,
    /// True for .pot templates
    pub is_template: bool,
    /// File present and readable, and (for pool files) owner installed
    pub exists: bool,
}

/// Structural locale pattern: xx or xx_YY
fn locale_re() -> Regex {
    Regex::new(r"^[a-z]{2}(_[A-Z]{2})?$").unwrap()
}

/// Pool file name pattern: <slug>-<locale>
fn pool_name_re() -> Regex {
    Regex::new(r"^(.+)-([a-z]{2}(_[A-Z]{2})?)$").unwrap()
}

/// Content-free path hash used in ref ids (first 16 hex chars)
fn path_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

fn ref_id(owner: OwnerType, slug: &str, locale: &str, path: &Path) -> String {
    format!("{}_{}_{}_{}", owner.as_str(), slug, locale, path_hash(path))
}

/// File present and readable
fn readable(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

/// List *.po / *.pot files in a directory, sorted by file name
///
/// An unreadable directory yields an empty list.
fn catalog_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return files,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        match path.extension().and_then(|e| e.to_str()) {
            Some("po") | Some("pot") => files.push(path),
            _ => {}
        }
    }
    files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    files
}

fn is_pot(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("pot"))
}

/// File stem without the .po/.pot extension
fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Locale parsed from a `<textdomain>-<locale>` stem, or "unknown"
fn locale_from_stem(stem: &str, locale_re: &Regex) -> String {
    match stem.rsplit_once('-') {
        Some((_, suffix)) if locale_re.is_match(suffix) => suffix.to_string(),
        _ => "unknown".to_string(),
    }
}

/// Discover catalog files across all roots
///
/// Order is deterministic for a given filesystem state: per root the
/// synthesized template first, then its languages/ files sorted by
/// name, then each global pool's files sorted by name. Duplicates by
/// path collapse to a single ref, preferring `exists = true`.
pub fn discover(roots: &[PackageRoot], globals: &[GlobalLangDir]) -> Vec<CatalogFileRef> {
    let locale_pattern = locale_re();
    let pool_pattern = pool_name_re();
    let mut refs: Vec<CatalogFileRef> = Vec::new();

    for root in roots {
        // Canonical template path, emitted even when the file is
        // missing so callers can offer "create new translation".
        let pot_path = root.path.join(format!("{}.pot", root.text_domain));
        push_ref(
            &mut refs,
            CatalogFileRef {
                id: ref_id(root.owner, &root.slug, "en_US", &pot_path),
                owner: root.owner,
                owner_name: root.display_name.clone(),
                text_domain: root.text_domain.clone(),
                locale: "en_US".to_string(),
                file_name: file_name(&pot_path),
                is_template: true,
                exists: readable(&pot_path),
                file_path: pot_path,
            },
        );

        let lang_dir = root.path.join("languages");
        for path in catalog_files(&lang_dir) {
            let locale = locale_from_stem(&stem(&path), &locale_pattern);
            let is_template = is_pot(&path);
            push_ref(
                &mut refs,
                CatalogFileRef {
                    id: ref_id(root.owner, &root.slug, &locale, &path),
                    owner: root.owner,
                    owner_name: root.display_name.clone(),
                    text_domain: root.text_domain.clone(),
                    locale,
                    file_name: file_name(&path),
                    is_template,
                    exists: readable(&path),
                    file_path: path,
                },
            );
        }
    }

    for pool in globals {
        for path in catalog_files(&pool.path) {
            if !readable(&path) {
                continue;
            }
            let stem = stem(&path);
            let (slug, locale) = match pool_pattern.captures(&stem) {
                Some(caps) => (caps[1].to_string(), caps[2].to_string()),
                None => (stem.clone(), "unknown".to_string()),
            };
            let installed = pool.installed_slugs.iter().any(|s| *s == slug);
            let is_template = is_pot(&path);
            push_ref(
                &mut refs,
                CatalogFileRef {
                    id: ref_id(pool.owner, &slug, &locale, &path),
                    owner: pool.owner,
                    owner_name: slug.clone(),
                    text_domain: slug,
                    locale,
                    file_name: file_name(&path),
                    is_template,
                    exists: installed,
                    file_path: path,
                },
            );
        }
    }

    refs
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Deduplicate by path in place: an existing ref keeps its position,
/// but a later ref with `exists = true` replaces a non-existing one
fn push_ref(refs: &mut Vec<CatalogFileRef>, new_ref: CatalogFileRef) {
    if let Some(existing) = refs.iter_mut().find(|r| r.file_path == new_ref.file_path) {
        if new_ref.exists && !existing.exists {
            *existing = new_ref;
        }
        return;
    }
    refs.push(new_ref);
}
