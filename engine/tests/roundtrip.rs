//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Round-trip properties of the .po codec

use pretty_assertions::assert_eq;

use potrans_engine::catalog_lib::po_file::{parse_po, serialize_po};

const FIXTURE: &str = r#"msgid ""
msgstr ""
"Project-Id-Version: demo 1.0\n"
"MIME-Version: 1.0\n"
"Content-Type: text/plain; charset=UTF-8\n"
"Content-Transfer-Encoding: 8bit\n"
"Language: fa_IR\n"
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

# A translator note
#: src/admin.c:12 src/admin.c:99
msgid "Settings"
msgstr "Tanzimat"

#, fuzzy
msgctxt "verb"
msgid "File"
msgstr "Bayegani kardan"

msgctxt "noun"
msgid "File"
msgstr "Parvandeh"

msgid "Multi\nline\ttext with \"quotes\""
msgstr ""

msgid "One comment"
msgid_plural "%d comments"
msgstr[0] "Yek didgah"
msgstr[1] "%d didgah"
"#;

#[test]
fn parse_serialize_parse_is_stable() {
    let catalog = parse_po(FIXTURE).expect("fixture parses");
    let text = serialize_po(&catalog);
    let reparsed = parse_po(&text).expect("serialized text parses");
    assert_eq!(catalog, reparsed);
}

#[test]
fn serialize_is_a_fixed_point_after_one_pass() {
    let catalog = parse_po(FIXTURE).expect("fixture parses");
    let once = serialize_po(&catalog);
    let twice = serialize_po(&parse_po(&once).expect("parses"));
    assert_eq!(once, twice);
}

#[test]
fn header_order_survives_round_trip() {
    let catalog = parse_po(FIXTURE).expect("fixture parses");
    let reparsed = parse_po(&serialize_po(&catalog)).expect("parses");
    let names: Vec<&str> = reparsed.headers.iter().map(|(k, _)| k).collect();
    assert_eq!(
        names,
        vec![
            "Project-Id-Version",
            "MIME-Version",
            "Content-Type",
            "Content-Transfer-Encoding",
            "Language",
            "Plural-Forms",
        ]
    );
}

#[test]
fn plural_entry_round_trips_in_index_order() {
    let input = r#"msgid ""
msgstr ""
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

msgid "One item"
msgid_plural "%d items"
msgstr[0] "Yek mored"
msgstr[1] "%d mored"
"#;
    let catalog = parse_po(input).expect("parses");
    assert_eq!(catalog.entries[0].plural_translations.len(), 2);
    assert_eq!(catalog.entries[0].plural_translations[0], "Yek mored");
    assert_eq!(catalog.entries[0].plural_translations[1], "%d mored");

    let text = serialize_po(&catalog);
    assert!(text.contains("msgstr[0] \"Yek mored\"\n"));
    assert!(text.contains("msgstr[1] \"%d mored\"\n"));
}

#[test]
fn context_distinguishes_entries() {
    let catalog = parse_po(FIXTURE).expect("parses");
    let files: Vec<_> = catalog
        .entries
        .iter()
        .filter(|e| e.original == "File")
        .collect();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].context.as_deref(), Some("verb"));
    assert_eq!(files[1].context.as_deref(), Some("noun"));

    // Both survive serialization as distinct entries
    let reparsed = parse_po(&serialize_po(&catalog)).expect("parses");
    let count = reparsed
        .entries
        .iter()
        .filter(|e| e.original == "File")
        .count();
    assert_eq!(count, 2);
}
