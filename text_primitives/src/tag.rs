// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// A 4-byte OpenType tag (for example `liga`, `kern`).
///
/// Tags order by their byte content, so a sorted collection of tags is also sorted
/// lexicographically by the four ASCII bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct Tag(u32);

impl Tag {
    /// Creates a tag from 4 bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Creates a tag from four ASCII characters.
    ///
    /// ```
    /// use text_primitives::Tag;
    ///
    /// assert_eq!(Tag::new(b'k', b'e', b'r', b'n'), Tag::from_bytes(*b"kern"));
    /// ```
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self::from_bytes([a, b, c, d])
    }

    /// Returns this tag as 4 bytes.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Returns the big-endian packed form of the tag.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Creates a tag from its big-endian packed form.
    pub const fn from_u32(packed: u32) -> Self {
        Self(packed)
    }

    /// Parses a tag from a 4-character ASCII string.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 {
            return None;
        }
        if !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            return None;
        }
        Some(Self::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        let s = core::str::from_utf8(&bytes).unwrap_or("????");
        f.write_str(s)
    }
}
