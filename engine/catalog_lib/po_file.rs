//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! .po (Portable Object) codec
//!
//! Parses .po text into a `Catalog` and serializes a `Catalog` back to
//! .po text.
//!
//! PO file format:
//! - blocks separated by blank lines; the leading block with an empty
//!   msgid is the header block
//! - msgctxt "context" - message context (optional)
//! - msgid "original" - original string
//! - msgid_plural "plural" - plural original (optional)
//! - msgstr "translation" - translation (singular)
//! - msgstr[N] "translation" - plural translations
//! - comments: # translator, #. extracted, #: reference, #, flags,
//!   #| previous msgid, #~ obsolete entry
//!
//! Adjacent quoted lines continue the preceding directive's value.
//! Obsolete (#~) blocks are dropped, matching the reference behavior.

use crate::catalog_lib::catalog::{Catalog, Entry};

/// Error type for .po parsing
#[derive(Debug)]
pub enum PoError {
    /// Parse error with line number
    Parse(usize, String),
    /// Unterminated quoted string
    UnterminatedString(usize),
}

impl std::fmt::Display for PoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoError::Parse(line, msg) => write!(f, "line {}: {}", line, msg),
            PoError::UnterminatedString(line) => write!(f, "line {}: unterminated string", line),
        }
    }
}

impl std::error::Error for PoError {}

/// Which directive a continuation line extends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Context,
    Original,
    Plural,
    Translation,
    PluralTranslation(usize),
}

/// Parse .po text into a catalog
pub fn parse_po(text: &str) -> Result<Catalog, PoError> {
    let mut catalog = Catalog::new();
    let mut saw_header = false;

    for block in blocks(text) {
        let parsed = parse_block(&block)?;
        let (entry, has_msgid) = match parsed {
            Some(p) => p,
            None => continue,
        };

        if entry.original.is_empty() && entry.context.is_none() {
            if !has_msgid {
                let line = block.first().map(|(n, _)| *n).unwrap_or(1);
                return Err(PoError::Parse(line, "missing msgid".to_string()));
            }
            // Header block: msgstr holds Key: Value lines
            if !saw_header {
                parse_header_lines(&entry.translation, &mut catalog);
                saw_header = true;
            }
            continue;
        }

        if !has_msgid {
            let line = block.first().map(|(n, _)| *n).unwrap_or(1);
            return Err(PoError::Parse(line, "missing msgid".to_string()));
        }

        catalog.entries.push(entry);
    }

    Ok(catalog)
}

/// Split text into blocks of consecutive non-empty lines
fn blocks(text: &str) -> Vec<Vec<(usize, String)>> {
    let mut out = Vec::new();
    let mut current: Vec<(usize, String)> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        if line.is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push((idx + 1, line.to_string()));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Parse one block into an entry
///
/// Returns None for obsolete blocks and blocks with no directives at
/// all (comment-only trailers). The bool reports whether a msgid
/// directive was present.
fn parse_block(block: &[(usize, String)]) -> Result<Option<(Entry, bool)>, PoError> {
    let mut entry = Entry::default();
    let mut target: Option<Target> = None;
    let mut has_msgid = false;
    let mut obsolete = false;

    for (lineno, line) in block {
        let lineno = *lineno;

        if line.starts_with("#~") {
            obsolete = true;
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            parse_comment(&mut entry, rest);
            continue;
        }

        if line.starts_with("domain ") {
            continue;
        }

        if line.starts_with('"') {
            let value = parse_quoted(line, lineno)?;
            match target {
                Some(t) => append_value(&mut entry, t, &value),
                None => {
                    return Err(PoError::Parse(
                        lineno,
                        "continuation line outside directive".to_string(),
                    ));
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("msgctxt") {
            entry.context = Some(parse_value(rest, lineno)?);
            target = Some(Target::Context);
        } else if let Some(rest) = line.strip_prefix("msgid_plural") {
            entry.plural = Some(parse_value(rest, lineno)?);
            target = Some(Target::Plural);
        } else if let Some(rest) = line.strip_prefix("msgid") {
            entry.original = parse_value(rest, lineno)?;
            has_msgid = true;
            target = Some(Target::Original);
        } else if let Some(rest) = line.strip_prefix("msgstr[") {
            let idx_end = rest.find(']').ok_or_else(|| {
                PoError::Parse(lineno, "unterminated msgstr index".to_string())
            })?;
            let idx: usize = rest[..idx_end]
                .parse()
                .map_err(|_| PoError::Parse(lineno, "invalid msgstr index".to_string()))?;
            let value = parse_value(&rest[idx_end + 1..], lineno)?;
            while entry.plural_translations.len() <= idx {
                entry.plural_translations.push(String::new());
            }
            entry.plural_translations[idx] = value;
            target = Some(Target::PluralTranslation(idx));
        } else if let Some(rest) = line.strip_prefix("msgstr") {
            entry.translation = parse_value(rest, lineno)?;
            target = Some(Target::Translation);
        } else {
            return Err(PoError::Parse(
                lineno,
                format!("unrecognized directive: {}", line),
            ));
        }
    }

    if obsolete {
        return Ok(None);
    }
    if !has_msgid
        && entry.context.is_none()
        && entry.translation.is_empty()
        && entry.plural_translations.is_empty()
    {
        // Comment-only block
        return Ok(None);
    }

    Ok(Some((entry, has_msgid)))
}

/// Route a comment line into the entry
fn parse_comment(entry: &mut Entry, rest: &str) {
    if let Some(content) = rest.strip_prefix('.') {
        entry.comments.push(content.trim().to_string());
    } else if let Some(content) = rest.strip_prefix(':') {
        for token in content.split_whitespace() {
            entry.references.push(token.to_string());
        }
    } else if let Some(content) = rest.strip_prefix(',') {
        for flag in content.split(',') {
            let flag = flag.trim();
            if !flag.is_empty() {
                entry.flags.push(flag.to_string());
            }
        }
    } else if rest.starts_with('|') {
        // Previous msgid - dropped
    } else {
        entry.comments.push(rest.trim().to_string());
    }
}

/// Append a continuation value to the directive it extends
fn append_value(entry: &mut Entry, target: Target, value: &str) {
    match target {
        Target::Context => {
            if let Some(ref mut ctxt) = entry.context {
                ctxt.push_str(value);
            }
        }
        Target::Original => entry.original.push_str(value),
        Target::Plural => {
            if let Some(ref mut plural) = entry.plural {
                plural.push_str(value);
            }
        }
        Target::Translation => entry.translation.push_str(value),
        Target::PluralTranslation(idx) => {
            if let Some(s) = entry.plural_translations.get_mut(idx) {
                s.push_str(value);
            }
        }
    }
}

/// Parse the quoted value after a directive keyword
fn parse_value(rest: &str, lineno: usize) -> Result<String, PoError> {
    let rest = rest.trim();
    if !rest.starts_with('"') {
        return Err(PoError::Parse(lineno, "expected quoted string".to_string()));
    }
    parse_quoted(rest, lineno)
}

/// Parse a quoted string, decoding escape sequences
fn parse_quoted(s: &str, lineno: usize) -> Result<String, PoError> {
    let s = s.trim();
    let s = match s.strip_prefix('"') {
        Some(s) => s,
        None => return Err(PoError::Parse(lineno, "expected quoted string".to_string())),
    };

    let mut result = String::new();
    let mut chars = s.chars();
    loop {
        match chars.next() {
            None => return Err(PoError::UnterminatedString(lineno)),
            Some('"') => break,
            Some('\\') => match chars.next() {
                None => return Err(PoError::UnterminatedString(lineno)),
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('0') => result.push('\0'),
                Some(c) => {
                    // Unknown escape - keep as-is
                    result.push('\\');
                    result.push(c);
                }
            },
            Some(c) => result.push(c),
        }
    }
    Ok(result)
}

/// Split a header msgstr into (name, value) fields on the catalog
fn parse_header_lines(msgstr: &str, catalog: &mut Catalog) {
    for line in msgstr.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            catalog.headers.set(name.trim(), value.trim());
        }
    }
}

/// Escape a string for emission inside a quoted .po value
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize a catalog to .po text
///
/// Total for any structurally valid catalog. Duplicate
/// (original, context) entries are collapsed, last translation wins.
/// Plural translation lists are sized to the header's nplurals.
pub fn serialize_po(catalog: &Catalog) -> String {
    let nplurals = catalog.nplurals();
    let mut out = String::new();

    // Header block
    out.push_str("msgid \"\"\nmsgstr \"\"\n");
    for (name, value) in catalog.headers.iter() {
        out.push_str(&format!("\"{}: {}\\n\"\n", escape(name), escape(value)));
    }

    for entry in dedup_entries(catalog) {
        out.push('\n');
        emit_entry(&mut out, &entry, nplurals);
    }

    out
}

/// Collapse duplicate (original, context) entries, last-wins on the
/// translation value, preserving first-seen order
pub(crate) fn dedup_entries(catalog: &Catalog) -> Vec<Entry> {
    let mut out: Vec<Entry> = Vec::new();
    for entry in &catalog.entries {
        if entry.original.is_empty() {
            continue;
        }
        if let Some(existing) = out.iter_mut().find(|e| e.key() == entry.key()) {
            existing.translation = entry.translation.clone();
            existing.plural_translations = entry.plural_translations.clone();
        } else {
            out.push(entry.clone());
        }
    }
    out
}

fn emit_entry(out: &mut String, entry: &Entry, nplurals: usize) {
    for comment in &entry.comments {
        out.push_str(&format!("# {}\n", comment));
    }
    if !entry.references.is_empty() {
        out.push_str(&format!("#: {}\n", entry.references.join(" ")));
    }
    if !entry.flags.is_empty() {
        out.push_str(&format!("#, {}\n", entry.flags.join(", ")));
    }
    if let Some(ref ctxt) = entry.context {
        out.push_str(&format!("msgctxt \"{}\"\n", escape(ctxt)));
    }
    out.push_str(&format!("msgid \"{}\"\n", escape(&entry.original)));

    match entry.plural {
        Some(ref plural) => {
            out.push_str(&format!("msgid_plural \"{}\"\n", escape(plural)));
            for i in 0..nplurals {
                let form = entry
                    .plural_translations
                    .get(i)
                    .map(|s| s.as_str())
                    .unwrap_or("");
                out.push_str(&format!("msgstr[{}] \"{}\"\n", i, escape(form)));
            }
        }
        None => {
            out.push_str(&format!("msgstr \"{}\"\n", escape(&entry.translation)));
        }
    }
}
