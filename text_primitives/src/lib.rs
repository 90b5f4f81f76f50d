// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font property vocabulary.
//!
//! This crate is a lightweight, `no_std` vocabulary layer for the leaf font concepts that
//! attributed string values carry: weights, slopes, stretches and OpenType tags.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_primitives::{FontStretch, FontWeight, Tag};
//!
//! let tag = Tag::parse("liga").unwrap();
//! assert_eq!(tag.to_bytes(), *b"liga");
//!
//! assert_eq!(FontWeight::parse("bold"), Some(FontWeight::BOLD));
//! assert_eq!(FontStretch::parse("condensed"), Some(FontStretch::Condensed));
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

mod font;
mod tag;

pub use font::{FontStretch, FontStyle, FontWeight};
pub use tag::Tag;
