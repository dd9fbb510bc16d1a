//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! potrans engine library
//!
//! This library implements the gettext translation-catalog engine:
//! - catalog: in-memory model of a message catalog
//! - po_file: .po text parsing and serialization
//! - mo_file: .mo binary compilation
//! - locator: catalog discovery across theme/plugin roots
//! - merge: applying translated strings back into a catalog
//! - translate: the translation-backend boundary
//! - workflow: file I/O and the translate/save pipeline

pub mod catalog_lib;
