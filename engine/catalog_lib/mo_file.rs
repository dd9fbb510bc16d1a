//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! .mo (Machine Object) compiler
//!
//! Compiles a `Catalog` into the GNU gettext binary layout:
//! a fixed 28-byte header, two parallel (length, offset) tables for
//! original and translation strings, then the NUL-terminated string
//! data. Entries are sorted by original key in byte order, which the
//! runtime's binary search requires; the metadata entry (empty msgid
//! carrying the serialized headers) sorts first naturally.
//!
//! Context keys use the GNU separator (`msgctxt EOT msgid`) and plural
//! entries store `msgid NUL msgid_plural` against NUL-joined plural
//! translations.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::catalog_lib::catalog::Catalog;
use crate::catalog_lib::po_file::dedup_entries;

/// Magic number for little-endian .mo files
pub const MO_MAGIC_LE: u32 = 0x950412de;

/// Size of the .mo header in bytes
pub const MO_HEADER_SIZE: u32 = 28;

/// Separator between msgctxt and msgid in an original key
const CONTEXT_SEPARATOR: char = '\u{4}';

/// Error type for .mo compilation
#[derive(Debug)]
pub enum MoError {
    /// A string or table offset does not fit the 32-bit layout
    TooLarge,
    /// Invalid magic number (reader)
    InvalidMagic(u32),
    /// Structurally invalid file (reader)
    InvalidFormat(String),
    /// String data is not valid UTF-8 (reader)
    InvalidUtf8(std::string::FromUtf8Error),
    /// I/O error
    Io(io::Error),
}

impl std::fmt::Display for MoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoError::TooLarge => write!(f, "catalog exceeds 32-bit .mo layout"),
            MoError::InvalidMagic(magic) => write!(f, "invalid magic number: 0x{:08x}", magic),
            MoError::InvalidFormat(msg) => write!(f, "invalid format: {}", msg),
            MoError::InvalidUtf8(e) => write!(f, "invalid UTF-8: {}", e),
            MoError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for MoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoError::Io(e) => Some(e),
            MoError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MoError {
    fn from(e: io::Error) -> Self {
        MoError::Io(e)
    }
}

impl From<std::string::FromUtf8Error> for MoError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        MoError::InvalidUtf8(e)
    }
}

/// Serialize catalog headers as the metadata entry value
pub fn header_blob(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (name, value) in catalog.headers.iter() {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Flatten the catalog into sorted (original key, translation) pairs
fn message_pairs(catalog: &Catalog) -> Vec<(String, String)> {
    let nplurals = catalog.nplurals();
    let mut pairs: Vec<(String, String)> = Vec::new();

    // Metadata entry: empty msgid -> serialized headers
    pairs.push((String::new(), header_blob(catalog)));

    for entry in dedup_entries(catalog) {
        let mut key = match entry.context {
            Some(ref ctxt) => format!("{}{}{}", ctxt, CONTEXT_SEPARATOR, entry.original),
            None => entry.original.clone(),
        };
        let value = match entry.plural {
            Some(ref plural) => {
                key.push('\0');
                key.push_str(plural);
                let mut forms: Vec<&str> = entry
                    .plural_translations
                    .iter()
                    .map(|s| s.as_str())
                    .take(nplurals)
                    .collect();
                while forms.len() < nplurals {
                    forms.push("");
                }
                forms.join("\0")
            }
            None => entry.translation.clone(),
        };
        pairs.push((key, value));
    }

    // Byte order over the full key; the metadata entry's empty key
    // sorts first on its own.
    pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    pairs
}

/// Compile a catalog into .mo bytes
///
/// Untranslated entries still occupy a table slot; omitting them would
/// desynchronize plural lookups at runtime.
pub fn compile_mo(catalog: &Catalog) -> Result<Vec<u8>, MoError> {
    let pairs = message_pairs(catalog);
    let nstrings = pairs.len();

    let desc_size = 8u64;
    let orig_tab_offset = MO_HEADER_SIZE as u64;
    let trans_tab_offset = orig_tab_offset + nstrings as u64 * desc_size;
    let data_offset = trans_tab_offset + nstrings as u64 * desc_size;

    // Lay out the string data region: originals first, then
    // translations, each NUL-terminated.
    let mut blob: Vec<u8> = Vec::new();
    let mut orig_descs: Vec<(u64, u64)> = Vec::with_capacity(nstrings);
    let mut trans_descs: Vec<(u64, u64)> = Vec::with_capacity(nstrings);

    for (key, value) in &pairs {
        orig_descs.push((key.len() as u64, data_offset + blob.len() as u64));
        blob.extend_from_slice(key.as_bytes());
        blob.push(0);

        trans_descs.push((value.len() as u64, data_offset + blob.len() as u64));
        blob.extend_from_slice(value.as_bytes());
        blob.push(0);
    }

    if data_offset + blob.len() as u64 > u32::MAX as u64 {
        return Err(MoError::TooLarge);
    }

    let mut out: Vec<u8> = Vec::with_capacity(data_offset as usize + blob.len());
    out.write_u32::<LittleEndian>(MO_MAGIC_LE)?;
    out.write_u32::<LittleEndian>(0)?; // format revision
    out.write_u32::<LittleEndian>(nstrings as u32)?;
    out.write_u32::<LittleEndian>(orig_tab_offset as u32)?;
    out.write_u32::<LittleEndian>(trans_tab_offset as u32)?;
    out.write_u32::<LittleEndian>(0)?; // hash table disabled
    out.write_u32::<LittleEndian>(0)?; // hash table offset

    for (length, offset) in &orig_descs {
        out.write_u32::<LittleEndian>(*length as u32)?;
        out.write_u32::<LittleEndian>(*offset as u32)?;
    }
    for (length, offset) in &trans_descs {
        out.write_u32::<LittleEndian>(*length as u32)?;
        out.write_u32::<LittleEndian>(*offset as u32)?;
    }
    out.write_all(&blob)?;

    Ok(out)
}

fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, MoError> {
    let bytes: [u8; 4] = data
        .get(offset..offset + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| MoError::InvalidFormat("truncated file".to_string()))?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_string(data: &[u8], length: u32, offset: u32) -> Result<String, MoError> {
    let start = offset as usize;
    let end = start + length as usize;
    let bytes = data
        .get(start..end)
        .ok_or_else(|| MoError::InvalidFormat("string data out of bounds".to_string()))?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Read (original key, translation) pairs from .mo bytes, in table
/// order
///
/// Verification-grade reader: little-endian files only, used to check
/// compiled output. Runtime catalog loading is a consumer concern.
pub fn read_mo(data: &[u8]) -> Result<Vec<(String, String)>, MoError> {
    if data.len() < MO_HEADER_SIZE as usize {
        return Err(MoError::InvalidFormat("file too small".to_string()));
    }

    let magic = read_u32_le(data, 0)?;
    if magic != MO_MAGIC_LE {
        return Err(MoError::InvalidMagic(magic));
    }
    let revision = read_u32_le(data, 4)?;
    if revision > 1 {
        return Err(MoError::InvalidFormat(format!(
            "unsupported revision: {}",
            revision
        )));
    }

    let nstrings = read_u32_le(data, 8)? as usize;
    let orig_tab_offset = read_u32_le(data, 12)? as usize;
    let trans_tab_offset = read_u32_le(data, 16)? as usize;

    let mut pairs = Vec::with_capacity(nstrings);
    for i in 0..nstrings {
        let orig_len = read_u32_le(data, orig_tab_offset + i * 8)?;
        let orig_off = read_u32_le(data, orig_tab_offset + i * 8 + 4)?;
        let trans_len = read_u32_le(data, trans_tab_offset + i * 8)?;
        let trans_off = read_u32_le(data, trans_tab_offset + i * 8 + 4)?;

        pairs.push((
            read_string(data, orig_len, orig_off)?,
            read_string(data, trans_len, trans_off)?,
        ));
    }
    Ok(pairs)
}
