//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Merging translated strings back into a catalog
//!
//! Given a map of original -> translated pairs, rewrite the matching
//! entries' translations and leave everything else untouched, in
//! order.

use std::collections::HashMap;

use crate::catalog_lib::catalog::Catalog;

/// Apply a batch of translations to a catalog, returning how many
/// entries were updated
///
/// Lookup is keyed on the original string alone: when the same source
/// string appears under two different contexts, both receive the same
/// replacement. That collision matches the reference behavior and
/// downstream consumers depend on it. Plural entries are never
/// updated here; plural translations are a manual-edit-only path.
pub fn apply_translations(catalog: &mut Catalog, pairs: &HashMap<String, String>) -> usize {
    let mut updated = 0;
    for entry in &mut catalog.entries {
        if entry.is_plural() {
            continue;
        }
        if let Some(translated) = pairs.get(&entry.original) {
            entry.translation = translated.clone();
            updated += 1;
        }
    }
    updated
}
