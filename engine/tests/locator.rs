//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Catalog discovery against real directory trees

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use potrans_engine::catalog_lib::locator::{
    discover, CatalogFileRef, GlobalLangDir, OwnerType, PackageRoot,
};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut file = File::create(path).unwrap();
    writeln!(file, "msgid \"\"\nmsgstr \"\"").unwrap();
}

fn theme_root(dir: &Path, slug: &str) -> PackageRoot {
    PackageRoot {
        path: dir.join(slug),
        owner: OwnerType::Theme,
        slug: slug.to_string(),
        display_name: slug.to_string(),
        text_domain: slug.to_string(),
    }
}

/// A theme with a template and two language files
fn build_theme(dir: &Path, slug: &str) {
    touch(&dir.join(slug).join(format!("{}.pot", slug)));
    touch(&dir.join(slug).join("languages").join(format!("{}-fa_IR.po", slug)));
    touch(&dir.join(slug).join("languages").join(format!("{}-de_DE.po", slug)));
}

#[test]
fn discovery_is_deterministic() {
    let tmp = TempDir::new().unwrap();
    build_theme(tmp.path(), "twentyfifteen");
    touch(&tmp.path().join("pool").join("akismet-fa_IR.po"));

    let roots = vec![theme_root(tmp.path(), "twentyfifteen")];
    let globals = vec![GlobalLangDir {
        path: tmp.path().join("pool"),
        owner: OwnerType::GlobalPlugin,
        installed_slugs: vec!["akismet".to_string()],
    }];

    let first = discover(&roots, &globals);
    let second = discover(&roots, &globals);
    assert_eq!(first, second);

    // template first, then language files sorted by name, then pool
    let names: Vec<&str> = first.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "twentyfifteen.pot",
            "twentyfifteen-de_DE.po",
            "twentyfifteen-fa_IR.po",
            "akismet-fa_IR.po",
        ]
    );
}

#[test]
fn template_emitted_even_when_missing() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("baretheme")).unwrap();

    let refs = discover(&[theme_root(tmp.path(), "baretheme")], &[]);
    assert_eq!(refs.len(), 1);
    assert!(refs[0].is_template);
    assert!(!refs[0].exists);
    assert_eq!(refs[0].file_name, "baretheme.pot");
}

#[test]
fn locale_parsed_from_filename_with_unknown_fallback() {
    let tmp = TempDir::new().unwrap();
    let lang_dir = tmp.path().join("demo").join("languages");
    touch(&lang_dir.join("demo-fa_IR.po"));
    touch(&lang_dir.join("demo-de.po"));
    touch(&lang_dir.join("demo.po"));

    let refs = discover(&[theme_root(tmp.path(), "demo")], &[]);
    let by_name = |name: &str| -> &CatalogFileRef {
        refs.iter().find(|r| r.file_name == name).unwrap()
    };

    assert_eq!(by_name("demo-fa_IR.po").locale, "fa_IR");
    assert_eq!(by_name("demo-de.po").locale, "de");
    assert_eq!(by_name("demo.po").locale, "unknown");
}

#[test]
fn pot_in_languages_dir_is_template() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("demo").join("languages").join("demo-fa_IR.pot"));

    let refs = discover(&[theme_root(tmp.path(), "demo")], &[]);
    let in_lang_dir = refs.iter().find(|r| r.file_name == "demo-fa_IR.pot").unwrap();
    assert!(in_lang_dir.is_template);
    assert_eq!(in_lang_dir.locale, "fa_IR");
}

#[test]
fn pool_orphans_marked_nonexistent() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("pool").join("akismet-fa_IR.po"));
    touch(&tmp.path().join("pool").join("ghostplugin-fa_IR.po"));
    touch(&tmp.path().join("pool").join("fa_IR.po"));

    let globals = vec![GlobalLangDir {
        path: tmp.path().join("pool"),
        owner: OwnerType::GlobalPlugin,
        installed_slugs: vec!["akismet".to_string()],
    }];
    let refs = discover(&[], &globals);

    let akismet = refs.iter().find(|r| r.text_domain == "akismet").unwrap();
    assert!(akismet.exists);
    assert_eq!(akismet.locale, "fa_IR");

    let ghost = refs.iter().find(|r| r.text_domain == "ghostplugin").unwrap();
    assert!(!ghost.exists);

    // Bare locale file name: slug falls back to the whole stem
    let bare = refs.iter().find(|r| r.file_name == "fa_IR.po").unwrap();
    assert_eq!(bare.text_domain, "fa_IR");
    assert_eq!(bare.locale, "unknown");
    assert!(!bare.exists);
}

#[test]
fn duplicate_path_dedups_preferring_exists() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("pool").join("akismet-fa_IR.po"));

    // The same pool reachable via two definitions: first sees the
    // owner as uninstalled, second as installed.
    let globals = vec![
        GlobalLangDir {
            path: tmp.path().join("pool"),
            owner: OwnerType::GlobalPlugin,
            installed_slugs: vec![],
        },
        GlobalLangDir {
            path: tmp.path().join("pool"),
            owner: OwnerType::GlobalPlugin,
            installed_slugs: vec!["akismet".to_string()],
        },
    ];

    let refs = discover(&[], &globals);
    assert_eq!(refs.len(), 1);
    assert!(refs[0].exists);
}

#[test]
fn duplicate_root_yields_single_template_ref() {
    let tmp = TempDir::new().unwrap();
    build_theme(tmp.path(), "demo");

    let roots = vec![theme_root(tmp.path(), "demo"), theme_root(tmp.path(), "demo")];
    let refs = discover(&roots, &[]);
    let templates = refs.iter().filter(|r| r.is_template).count();
    assert_eq!(templates, 1);
    assert_eq!(refs.len(), 3);
}

#[test]
fn ids_are_stable_across_runs() {
    let tmp = TempDir::new().unwrap();
    build_theme(tmp.path(), "demo");

    let roots = vec![theme_root(tmp.path(), "demo")];
    let first: Vec<String> = discover(&roots, &[]).into_iter().map(|r| r.id).collect();
    let second: Vec<String> = discover(&roots, &[]).into_iter().map(|r| r.id).collect();
    assert_eq!(first, second);
    assert!(first[0].starts_with("theme_demo_en_US_"));
}
