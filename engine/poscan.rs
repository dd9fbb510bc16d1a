//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! poscan - list discoverable translation catalogs
//!
//! Scans theme/plugin roots and shared language pools the way the
//! engine's locator does, and prints the resulting inventory one
//! catalog per line.

use clap::Parser;
use potrans_engine::catalog_lib::locator::{
    discover, GlobalLangDir, OwnerType, PackageRoot,
};
use std::path::{Path, PathBuf};

/// poscan - list discoverable translation catalogs
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Theme root directory (repeatable)
    #[arg(long = "theme-root", action = clap::ArgAction::Append)]
    theme_roots: Vec<PathBuf>,

    /// Plugin root directory (repeatable)
    #[arg(long = "plugin-root", action = clap::ArgAction::Append)]
    plugin_roots: Vec<PathBuf>,

    /// Shared language pool for themes
    #[arg(long = "global-themes")]
    global_themes: Option<PathBuf>,

    /// Shared language pool for plugins
    #[arg(long = "global-plugins")]
    global_plugins: Option<PathBuf>,

    /// Print ids as well
    #[arg(short = 'i', long = "ids")]
    show_ids: bool,
}

/// Slug of a root directory: its base name
fn dir_slug(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn package_root(path: &PathBuf, owner: OwnerType) -> PackageRoot {
    let slug = dir_slug(path);
    PackageRoot {
        path: path.clone(),
        owner,
        display_name: slug.clone(),
        text_domain: slug.clone(),
        slug,
    }
}

fn main() {
    let args = Args::parse();

    let mut roots: Vec<PackageRoot> = Vec::new();
    for path in &args.theme_roots {
        roots.push(package_root(path, OwnerType::Theme));
    }
    for path in &args.plugin_roots {
        roots.push(package_root(path, OwnerType::Plugin));
    }

    // Roots given on the command line are the installed set for the
    // global pools.
    let theme_slugs: Vec<String> = args.theme_roots.iter().map(|p| dir_slug(p)).collect();
    let plugin_slugs: Vec<String> = args.plugin_roots.iter().map(|p| dir_slug(p)).collect();

    let mut globals: Vec<GlobalLangDir> = Vec::new();
    if let Some(ref path) = args.global_themes {
        globals.push(GlobalLangDir {
            path: path.clone(),
            owner: OwnerType::GlobalTheme,
            installed_slugs: theme_slugs.clone(),
        });
    }
    if let Some(ref path) = args.global_plugins {
        globals.push(GlobalLangDir {
            path: path.clone(),
            owner: OwnerType::GlobalPlugin,
            installed_slugs: plugin_slugs.clone(),
        });
    }

    for catalog_ref in discover(&roots, &globals) {
        let kind = if catalog_ref.is_template {
            "template"
        } else {
            "catalog"
        };
        let state = if catalog_ref.exists { "exists" } else { "missing" };
        if args.show_ids {
            print!("{}\t", catalog_ref.id);
        }
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            catalog_ref.owner,
            kind,
            catalog_ref.locale,
            catalog_ref.text_domain,
            state,
            catalog_ref.file_path.display()
        );
    }
}
