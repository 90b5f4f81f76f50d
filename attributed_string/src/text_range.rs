// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Endpoint, Error};

/// A validated byte range into a UTF-8 text buffer.
///
/// This is a convenience wrapper around `Range<usize>` that carries the invariants every
/// editing and attribute operation relies on:
///
/// - `start <= end`
/// - `start` and `end` are within the text bounds
/// - `start` and `end` lie on UTF-8 codepoint boundaries
///
/// Public operations on [`AttributedString`] accept plain `Range<usize>` values and validate
/// them into a `TextRange` once; the buffer and run list below only ever see validated ranges.
///
/// ## Important
///
/// `TextRange` does not encode which specific text it was validated against. It is the
/// caller's responsibility to only reuse a `TextRange` with the same content it was validated
/// for; any edit may invalidate it.
///
/// ## Example
///
/// ```
/// use attributed_string::TextRange;
///
/// let range = TextRange::new("Hello!", 0..5).unwrap();
/// assert_eq!(range.len(), 5);
/// assert!(TextRange::new("éclair", 1..2).is_err());
/// ```
///
/// [`AttributedString`]: crate::AttributedString
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Returns a validated `TextRange` for the provided text.
    #[inline]
    pub fn new(text: &str, range: Range<usize>) -> Result<Self, Error> {
        validate_range(text, &range)?;
        Ok(Self {
            start: range.start,
            end: range.end,
        })
    }

    /// Returns a validated empty range at `offset`.
    #[inline]
    pub fn at(text: &str, offset: usize) -> Result<Self, Error> {
        Self::new(text, offset..offset)
    }

    /// Creates a `TextRange` without validation.
    ///
    /// This is intended for internal callers that already maintain range invariants.
    #[must_use]
    #[inline]
    pub const fn new_unchecked(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The start byte offset.
    #[must_use]
    #[inline]
    pub const fn start(self) -> usize {
        self.start
    }

    /// The end byte offset (exclusive).
    #[must_use]
    #[inline]
    pub const fn end(self) -> usize {
        self.end
    }

    /// The length of the range in bytes.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range covers no bytes.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns this range as a `Range<usize>`.
    #[must_use]
    #[inline]
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<TextRange> for Range<usize> {
    #[inline]
    fn from(value: TextRange) -> Self {
        value.as_range()
    }
}

#[inline]
pub(crate) fn validate_range(text: &str, range: &Range<usize>) -> Result<(), Error> {
    let text_len = text.len();
    if range.start > range.end {
        return Err(Error::invalid_range(range.start, range.end, text_len));
    }
    if range.end > text_len {
        return Err(Error::invalid_bounds(range.start, range.end, text_len));
    }
    if !text.is_char_boundary(range.start) {
        return Err(Error::not_on_char_boundary(
            text,
            range.start,
            range.end,
            Endpoint::Start,
            range.start,
        ));
    }
    if !text.is_char_boundary(range.end) {
        return Err(Error::not_on_char_boundary(
            text,
            range.start,
            range.end,
            Endpoint::End,
            range.end,
        ));
    }
    Ok(())
}
