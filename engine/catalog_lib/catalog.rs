//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! In-memory representation of a translation catalog
//!
//! A `Catalog` is the unit of work for the whole engine: the .po codec
//! produces and consumes it, the .mo compiler flattens it, and the
//! merge engine rewrites translations inside it. Header order and
//! entry order are preserved so that rewriting a catalog does not
//! produce noisy diffs.

/// Ordered header mapping (name -> value)
///
/// Insertion order is preserved; setting an existing header updates
/// the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header set
    pub fn new() -> Self {
        Headers { fields: Vec::new() }
    }

    /// Get a header value by exact name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a header value, updating in place if the name exists
    pub fn set(&mut self, name: &str, value: &str) {
        for (k, v) in &mut self.fields {
            if k == name {
                *v = value.to_string();
                return;
            }
        }
        self.fields.push((name.to_string(), value.to_string()));
    }

    /// Remove a header by name, returning its value if present
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.fields.iter().position(|(k, _)| k == name)?;
        Some(self.fields.remove(pos).1)
    }

    /// Iterate over (name, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the header set is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single translatable unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Original string (msgid); never empty for a real entry
    pub original: String,
    /// Disambiguating context (msgctxt)
    pub context: Option<String>,
    /// Translation (msgstr); empty means untranslated
    pub translation: String,
    /// Plural original (msgid_plural)
    pub plural: Option<String>,
    /// Plural translations indexed by plural form; only meaningful
    /// when `plural` is set
    pub plural_translations: Vec<String>,
    /// Source-location references (#: file:line), one token each
    pub references: Vec<String>,
    /// Translator and extracted comments (# / #.)
    pub comments: Vec<String>,
    /// Flags (#, fuzzy, c-format, ...)
    pub flags: Vec<String>,
}

impl Entry {
    /// Create an entry with just an original string
    pub fn new(original: &str) -> Self {
        Entry {
            original: original.to_string(),
            ..Default::default()
        }
    }

    /// Check if this entry has a plural form
    pub fn is_plural(&self) -> bool {
        self.plural.is_some()
    }

    /// Check if this entry carries a translation
    pub fn is_translated(&self) -> bool {
        if self.is_plural() {
            self.plural_translations.iter().any(|s| !s.is_empty())
        } else {
            !self.translation.is_empty()
        }
    }

    /// Identity key: entries are unique by (original, context)
    pub fn key(&self) -> (&str, Option<&str>) {
        (self.original.as_str(), self.context.as_deref())
    }
}

/// A translation catalog: headers plus ordered entries
///
/// Duplicate (original, context) entries are permitted in the model;
/// they are collapsed (last translation wins) when the catalog is
/// serialized or compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Header fields in insertion order
    pub headers: Headers,
    /// Entries in original-file order
    pub entries: Vec<Entry>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Number of plural forms declared by the Plural-Forms header
    ///
    /// Defaults to 2 (the Germanic rule) when the header is missing or
    /// unparseable; the engine carries no per-language plural rules.
    pub fn nplurals(&self) -> usize {
        if let Some(value) = self.headers.get("Plural-Forms") {
            for part in value.split(';') {
                if let Some(n) = part.trim().strip_prefix("nplurals=") {
                    if let Ok(n) = n.trim().parse::<usize>() {
                        if n > 0 {
                            return n;
                        }
                    }
                }
            }
        }
        2
    }

    /// Originals that still need translation, in entry order
    ///
    /// Plural entries are excluded: the automated pipeline only merges
    /// singular translations. With `force` set, every singular
    /// original is returned (used for retranslation and for .pot
    /// templates, which carry no translations at all).
    pub fn untranslated_originals(&self, force: bool) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        let mut out = Vec::new();
        for entry in &self.entries {
            if entry.is_plural() {
                continue;
            }
            if !force && !entry.translation.is_empty() {
                continue;
            }
            if seen.contains(&entry.original.as_str()) {
                continue;
            }
            seen.push(&entry.original);
            out.push(entry.original.clone());
        }
        out
    }
}
