// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributed String is a mutable rich text buffer for text layout backends.
//!
//! An [`AttributedString`] owns UTF-8 text and a set of typed formatting [`Attribute`]s
//! (font family, size, weight, slope, stretch, colors, underline, OpenType features) applied
//! to byte ranges. Alongside the UTF-8 text it keeps:
//!
//! - a UTF-16 copy, with offset tables in both directions, for layout backends that consume
//!   UTF-16;
//! - a grapheme cluster index, built on first use after each edit, for cursor movement.
//!
//! Runs of one [`AttributeKind`] never overlap and equal neighbours are merged; runs of
//! different kinds are independent. Attribute values handed to the string become
//! [`SharedAttribute`]s, which runs may share after a split.
//!
//! All public offsets are UTF-8 byte offsets. Invalid offsets are reported as [`Error`]s.
//!
//! ## Example
//!
//! ```
//! use attributed_string::{Attribute, AttributedString};
//! use text_primitives::{FontStyle, FontWeight};
//!
//! let mut text = AttributedString::new("0123456789");
//! text.set_attribute(Attribute::Weight(FontWeight::BOLD), 0..5).unwrap();
//! text.set_attribute(Attribute::Weight(FontWeight::BOLD), 5..10).unwrap();
//! text.set_attribute(Attribute::Italic(FontStyle::Italic), 3..6).unwrap();
//!
//! let runs: Vec<_> = text.attributes().map(|run| (run.kind(), run.range())).collect();
//! assert_eq!(runs.len(), 2);
//! assert_eq!(runs[0].1, 0..10);
//! assert_eq!(runs[1].1, 3..6);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
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

extern crate alloc;

mod attribute;
mod attributed_string;
mod error;
mod features;
mod graphemes;
mod runs;
mod text_buffer;
mod text_range;

pub use crate::attribute::{
    Attribute, AttributeKind, Color, SharedAttribute, Underline, UnderlineColor,
};
pub use crate::attributed_string::AttributedString;
pub use crate::error::{BoundaryInfo, Endpoint, Error, ErrorKind};
pub use crate::features::OpenTypeFeatures;
pub use crate::runs::{AttributeRun, InsertPolicy};
pub use crate::text_range::TextRange;
