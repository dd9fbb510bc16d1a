//
// Copyright (c) 2026 The potrans project authors
//
// This file is part of the potrans project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Translation-catalog engine
//!
//! This module provides the catalog model, the .po codec, the .mo
//! compiler, catalog discovery, and the merge/translate pipeline.

pub mod catalog;
pub mod locator;
pub mod merge;
pub mod mo_file;
pub mod po_file;
pub mod translate;
pub mod workflow;
