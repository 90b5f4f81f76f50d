// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UTF-8 storage with a synchronized UTF-16 shadow.

use alloc::string::String;
use alloc::vec::Vec;
use core::iter;

use crate::TextRange;

/// Bidirectional offset conversion tables between UTF-8 and UTF-16.
///
/// `byte_to_unit` has one entry per byte plus a trailing sentinel, `unit_to_byte` one entry per
/// UTF-16 code unit plus a trailing sentinel. Both are monotonically non-decreasing, each sentinel
/// equals the length of the opposite encoding, and every slot inside a multi-unit codepoint holds
/// the offset of that codepoint's first unit in the other encoding.
#[derive(Clone, Debug)]
struct OffsetTables {
    byte_to_unit: Vec<usize>,
    unit_to_byte: Vec<usize>,
}

impl OffsetTables {
    fn new() -> Self {
        Self {
            byte_to_unit: alloc::vec![0],
            unit_to_byte: alloc::vec![0],
        }
    }

    /// Opens a gap at (`at`, `at16`) and fills it with the entries of freshly encoded text.
    ///
    /// Every entry from the insertion point onwards (sentinel included) is shifted by the
    /// length inserted into the *other* encoding before the gap is filled.
    fn insert(
        &mut self,
        at: usize,
        at16: usize,
        byte_entries: Vec<usize>,
        unit_entries: Vec<usize>,
    ) {
        let n8 = byte_entries.len();
        let n16 = unit_entries.len();
        for entry in &mut self.byte_to_unit[at..] {
            *entry += n16;
        }
        for entry in &mut self.unit_to_byte[at16..] {
            *entry += n8;
        }
        self.byte_to_unit.splice(at..at, byte_entries);
        self.unit_to_byte.splice(at16..at16, unit_entries);
    }

    /// Closes the gap `start..end` / `start16..end16` and pulls the suffix back.
    fn remove(&mut self, start: usize, end: usize, start16: usize, end16: usize) {
        let n8 = end - start;
        let n16 = end16 - start16;
        self.byte_to_unit.drain(start..end);
        self.unit_to_byte.drain(start16..end16);
        for entry in &mut self.byte_to_unit[start..] {
            *entry -= n16;
        }
        for entry in &mut self.unit_to_byte[start16..] {
            *entry -= n8;
        }
    }
}

/// A mutable UTF-8 string that keeps a UTF-16 copy of itself in sync.
///
/// Offsets passed in must be validated by the caller (see [`TextRange`]); the buffer only
/// `debug_assert!`s them.
#[derive(Clone, Debug)]
pub(crate) struct TextBuffer {
    text: String,
    utf16: Vec<u16>,
    offsets: OffsetTables,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            utf16: Vec::new(),
            offsets: OffsetTables::new(),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    pub(crate) fn utf16(&self) -> &[u16] {
        &self.utf16
    }

    pub(crate) fn len(&self) -> usize {
        self.text.len()
    }

    pub(crate) fn utf16_len(&self) -> usize {
        self.utf16.len()
    }

    /// Maps a byte offset to the UTF-16 offset of the same position.
    ///
    /// Offsets inside a codepoint map to the first unit of that codepoint.
    pub(crate) fn byte_to_utf16(&self, byte: usize) -> usize {
        self.offsets.byte_to_unit[byte]
    }

    /// Maps a UTF-16 offset to the byte offset of the same position.
    ///
    /// Offsets inside a surrogate pair map to the first byte of that codepoint.
    pub(crate) fn utf16_to_byte(&self, unit: usize) -> usize {
        self.offsets.unit_to_byte[unit]
    }

    /// Inserts `text` at the byte offset `at`.
    ///
    /// Returns the number of UTF-8 bytes and UTF-16 units inserted.
    pub(crate) fn insert(&mut self, at: usize, text: &str) -> (usize, usize) {
        debug_assert!(
            self.text.is_char_boundary(at),
            "insertion offset {at} must be a char boundary"
        );
        let at16 = self.byte_to_utf16(at);

        let mut units = Vec::with_capacity(text.len());
        let mut byte_entries = Vec::with_capacity(text.len());
        let mut unit_entries = Vec::with_capacity(text.len());
        let mut buf = [0_u16; 2];
        for ch in text.chars() {
            let first_unit = at16 + units.len();
            let first_byte = at + byte_entries.len();
            let encoded = ch.encode_utf16(&mut buf);
            unit_entries.extend(iter::repeat_n(first_byte, encoded.len()));
            units.extend_from_slice(encoded);
            byte_entries.extend(iter::repeat_n(first_unit, ch.len_utf8()));
        }
        let n8 = byte_entries.len();
        let n16 = units.len();

        self.text.insert_str(at, text);
        self.utf16.splice(at16..at16, units);
        self.offsets.insert(at, at16, byte_entries, unit_entries);
        log::trace!("inserted {n8} bytes / {n16} units at byte {at} (unit {at16})");
        (n8, n16)
    }

    /// Removes the bytes in `range`.
    ///
    /// Returns the number of UTF-16 units removed.
    pub(crate) fn delete(&mut self, range: TextRange) -> usize {
        let (start, end) = (range.start(), range.end());
        let start16 = self.byte_to_utf16(start);
        let end16 = self.byte_to_utf16(end);

        self.text.replace_range(start..end, "");
        self.utf16.drain(start16..end16);
        self.offsets.remove(start, end, start16, end16);
        log::trace!("deleted bytes {start}..{end} (units {start16}..{end16})");
        end16 - start16
    }

    /// Panics if the shadow encoding or either offset table disagrees with the text.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let expected: Vec<u16> = self.text.encode_utf16().collect();
        assert_eq!(self.utf16, expected, "UTF-16 shadow out of sync");

        let b2u = &self.offsets.byte_to_unit;
        let u2b = &self.offsets.unit_to_byte;
        assert_eq!(b2u.len(), self.text.len() + 1, "byte table length");
        assert_eq!(u2b.len(), self.utf16.len() + 1, "unit table length");
        assert_eq!(b2u.last().copied(), Some(self.utf16.len()), "byte sentinel");
        assert_eq!(u2b.last().copied(), Some(self.text.len()), "unit sentinel");
        assert!(b2u.windows(2).all(|w| w[0] <= w[1]), "byte table not monotonic");
        assert!(u2b.windows(2).all(|w| w[0] <= w[1]), "unit table not monotonic");

        let mut unit = 0;
        for (byte, ch) in self.text.char_indices() {
            for i in 0..ch.len_utf8() {
                assert_eq!(b2u[byte + i], unit, "byte {} maps to wrong unit", byte + i);
            }
            for i in 0..ch.len_utf16() {
                assert_eq!(u2b[unit + i], byte, "unit {} maps to wrong byte", unit + i);
            }
            unit += ch.len_utf16();
        }
    }
}
