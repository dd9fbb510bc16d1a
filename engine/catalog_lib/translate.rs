//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Translation-backend boundary
//!
//! The engine sees translation providers through one capability:
//! translate a batch of texts into a target locale, preserving order
//! and count. Network-backed providers live outside this crate; the
//! dictionary backend below serves tests and offline pipelines.

use std::collections::HashMap;

/// Opaque error from a translation backend
///
/// A partial failure fails the whole batch; the message is surfaced
/// verbatim to the caller.
#[derive(Debug)]
pub struct TranslateError {
    message: String,
}

impl TranslateError {
    pub fn new(message: impl Into<String>) -> Self {
        TranslateError {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TranslateError {}

/// A translation backend
pub trait Translate {
    /// Translate `texts` into `target_locale`
    ///
    /// Must return one result per input, in input order.
    fn translate(
        &self,
        texts: &[String],
        target_locale: &str,
    ) -> Result<Vec<String>, TranslateError>;
}

/// Dictionary-backed translator
///
/// Looks every text up in a fixed original -> translated map; a text
/// missing from the map fails the batch, mirroring the abort-on-first-
/// error contract of the real backends.
#[derive(Debug, Default)]
pub struct DictionaryTranslator {
    entries: HashMap<String, String>,
}

impl DictionaryTranslator {
    pub fn new(entries: HashMap<String, String>) -> Self {
        DictionaryTranslator { entries }
    }
}

impl Translate for DictionaryTranslator {
    fn translate(
        &self,
        texts: &[String],
        _target_locale: &str,
    ) -> Result<Vec<String>, TranslateError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            match self.entries.get(text) {
                Some(translated) => out.push(translated.clone()),
                None => {
                    return Err(TranslateError::new(format!(
                        "no translation for: {}",
                        text
                    )));
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(items: &[(&str, &str)]) -> DictionaryTranslator {
        DictionaryTranslator::new(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_order_and_count_preserved() {
        let translator = dictionary(&[("Hello", "Salam"), ("Bye", "Khoda hafez")]);
        let texts = vec!["Bye".to_string(), "Hello".to_string()];
        let result = translator.translate(&texts, "fa_IR").unwrap();
        assert_eq!(result, vec!["Khoda hafez".to_string(), "Salam".to_string()]);
    }

    #[test]
    fn test_missing_text_fails_whole_batch() {
        let translator = dictionary(&[("Hello", "Salam")]);
        let texts = vec!["Hello".to_string(), "Missing".to_string()];
        let err = translator.translate(&texts, "fa_IR").unwrap_err();
        assert!(err.to_string().contains("Missing"));
    }
}
