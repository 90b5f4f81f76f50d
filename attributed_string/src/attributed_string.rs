// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::fmt;
use core::ops::{ControlFlow, Range};

use crate::graphemes::GraphemeIndex;
use crate::runs::AttributeRunList;
use crate::text_buffer::TextBuffer;
use crate::{Attribute, AttributeKind, AttributeRun, Error, InsertPolicy, TextRange};

/// A mutable UTF-8 string with formatting attributes applied to byte ranges.
///
/// All offsets are UTF-8 byte offsets and must fall on `char` boundaries; operations given a
/// bad offset return an [`Error`] and leave the string untouched.
///
/// Attributes of the same [`AttributeKind`] never overlap: applying one replaces whatever that
/// kind held over the range, and equal neighbours are merged. Attributes of different kinds
/// are independent.
///
/// ```
/// use attributed_string::{Attribute, AttributedString};
/// use text_primitives::FontWeight;
///
/// let mut text = AttributedString::new("Hello");
/// text.set_attribute(Attribute::Weight(FontWeight::BOLD), 0..5).unwrap();
/// text.delete(2..3).unwrap();
///
/// assert_eq!(text.as_str(), "Helo");
/// let runs: Vec<_> = text.attributes().map(|run| run.range()).collect();
/// assert_eq!(runs, [0..4]);
/// ```
#[derive(Debug, Default)]
pub struct AttributedString {
    buffer: TextBuffer,
    runs: AttributeRunList,
    graphemes: OnceCell<GraphemeIndex>,
}

impl AttributedString {
    /// Creates a string with no attributes.
    pub fn new(text: &str) -> Self {
        let mut buffer = TextBuffer::new();
        buffer.insert(0, text);
        Self {
            buffer,
            runs: AttributeRunList::default(),
            graphemes: OnceCell::new(),
        }
    }

    /// Borrows the text.
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    /// Returns the length of the text in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Appends `text` without applying any attributes to it.
    pub fn append(&mut self, text: &str) {
        let at = self.len();
        self.insert(at, text, InsertPolicy::Unattributed);
    }

    /// Inserts `text` at byte offset `at` without applying any attributes to it.
    ///
    /// A run containing `at` is split around the new text.
    pub fn insert_at(&mut self, text: &str, at: usize) -> Result<(), Error> {
        let at = TextRange::at(self.as_str(), at)?;
        self.insert(at.start(), text, InsertPolicy::Unattributed);
        Ok(())
    }

    /// Inserts `text` at byte offset `at`, extending any run that strictly contains `at` over
    /// the new text.
    ///
    /// ```
    /// use attributed_string::{Attribute, AttributedString};
    /// use text_primitives::FontStyle;
    ///
    /// let mut text = AttributedString::new("ac");
    /// text.set_attribute(Attribute::Italic(FontStyle::Italic), 0..2).unwrap();
    /// text.insert_at_extending("b", 1).unwrap();
    /// assert_eq!(text.attributes().next().unwrap().range(), 0..3);
    /// ```
    pub fn insert_at_extending(&mut self, text: &str, at: usize) -> Result<(), Error> {
        let at = TextRange::at(self.as_str(), at)?;
        self.insert(at.start(), text, InsertPolicy::ExtendRuns);
        Ok(())
    }

    fn insert(&mut self, at: usize, text: &str, policy: InsertPolicy) {
        let (inserted, _) = self.buffer.insert(at, text);
        self.runs.insert(at, inserted, policy);
        self.graphemes.take();
    }

    /// Deletes the bytes in `range`.
    ///
    /// Runs inside the range are dropped, runs overlapping it are truncated and runs after it
    /// move back.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), Error> {
        let range = TextRange::new(self.as_str(), range)?;
        self.buffer.delete(range);
        self.runs.remove_characters(range);
        self.graphemes.take();
        Ok(())
    }

    /// Applies `attribute` to `range`, taking ownership of it.
    ///
    /// Any attribute of the same kind in `range` is replaced. An empty range applies nothing.
    pub fn set_attribute(
        &mut self,
        attribute: Attribute,
        range: Range<usize>,
    ) -> Result<(), Error> {
        let range = TextRange::new(self.as_str(), range)?;
        self.runs.set(attribute, range);
        Ok(())
    }

    /// Removes attributes of `kind` from `range`.
    pub fn remove_attribute(
        &mut self,
        kind: AttributeKind,
        range: Range<usize>,
    ) -> Result<(), Error> {
        let range = TextRange::new(self.as_str(), range)?;
        log::trace!("remove {kind:?} over {range:?}");
        self.runs.remove_kind(kind, range);
        Ok(())
    }

    /// Removes attributes of every kind from `range`.
    pub fn remove_attributes(&mut self, range: Range<usize>) -> Result<(), Error> {
        let range = TextRange::new(self.as_str(), range)?;
        log::trace!("remove all attributes over {range:?}");
        self.runs.remove_all(range);
        Ok(())
    }

    /// Removes every attribute.
    pub fn clear_attributes(&mut self) {
        self.runs.clear();
    }

    /// Iterates over all runs in ascending start order.
    ///
    /// Runs that start at the same offset are yielded in [`AttributeKind`] order.
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = &AttributeRun> + '_ {
        self.runs.sorted().into_iter()
    }

    /// Calls `f` with every run in ascending start order until it returns
    /// [`ControlFlow::Break`].
    pub fn for_each_attribute<B>(
        &self,
        mut f: impl FnMut(&AttributeRun) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for run in self.runs.sorted() {
            f(run)?;
        }
        ControlFlow::Continue(())
    }

    /// Iterates over the runs covering the byte at `offset`, at most one per kind.
    pub fn attributes_at(&self, offset: usize) -> impl Iterator<Item = &AttributeRun> + '_ {
        self.runs.at(offset)
    }

    /// Returns the runs of one kind, sorted by start.
    pub fn attribute_runs(&self, kind: AttributeKind) -> &[AttributeRun] {
        self.runs.of_kind(kind)
    }

    /// Returns the number of runs.
    pub fn attributes_len(&self) -> usize {
        self.runs.len()
    }

    fn graphemes(&self) -> &GraphemeIndex {
        self.graphemes.get_or_init(|| GraphemeIndex::build(self.buffer.utf16()))
    }

    /// Returns the number of grapheme clusters.
    pub fn num_graphemes(&self) -> usize {
        self.graphemes().count()
    }

    /// Returns the index of the grapheme cluster containing byte `offset`.
    ///
    /// `offset == len()` maps to [`num_graphemes`](Self::num_graphemes).
    pub fn byte_to_grapheme(&self, offset: usize) -> Result<usize, Error> {
        let offset = TextRange::at(self.as_str(), offset)?;
        let unit = self.buffer.byte_to_utf16(offset.start());
        Ok(self.graphemes().unit_to_grapheme(unit))
    }

    /// Returns the byte offset where grapheme cluster `grapheme` starts.
    ///
    /// `grapheme == num_graphemes()` maps to [`len`](Self::len).
    pub fn grapheme_to_byte(&self, grapheme: usize) -> Result<usize, Error> {
        let index = self.graphemes();
        if grapheme > index.count() {
            return Err(Error::grapheme_out_of_bounds(grapheme, index.count()));
        }
        Ok(self.buffer.utf16_to_byte(index.grapheme_to_unit(grapheme)))
    }

    /// Borrows the UTF-16 encoding of the text, for layout backends that consume UTF-16.
    pub fn utf16(&self) -> &[u16] {
        self.buffer.utf16()
    }

    /// Converts a byte offset to the matching UTF-16 offset.
    pub fn byte_to_utf16(&self, offset: usize) -> Result<usize, Error> {
        let offset = TextRange::at(self.as_str(), offset)?;
        Ok(self.buffer.byte_to_utf16(offset.start()))
    }

    /// Converts a UTF-16 offset to the matching byte offset.
    ///
    /// An offset between the two halves of a surrogate pair maps to the start of the pair.
    pub fn utf16_to_byte(&self, offset: usize) -> Result<usize, Error> {
        let len = self.buffer.utf16_len();
        if offset > len {
            return Err(Error::invalid_bounds(offset, offset, len));
        }
        Ok(self.buffer.utf16_to_byte(offset))
    }

    /// Returns every run with its range converted to UTF-16 offsets, in ascending start order.
    pub fn utf16_runs(&self) -> Vec<(Range<usize>, &Attribute)> {
        self.runs
            .sorted()
            .into_iter()
            .map(|run| {
                let start = self.buffer.byte_to_utf16(run.start());
                let end = self.buffer.byte_to_utf16(run.end());
                (start..end, run.attribute())
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        self.buffer.check_invariants();
        self.runs.check_invariants(self.len());
    }
}

impl fmt::Display for AttributedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AttributedString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for AttributedString {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Attribute, AttributeKind, AttributedString, Color, Endpoint, ErrorKind};
    use alloc::format;
    use alloc::vec::Vec;
    use core::ops::{ControlFlow, Range};
    use text_primitives::{FontStyle, FontWeight};

    fn bold() -> Attribute {
        Attribute::Weight(FontWeight::BOLD)
    }

    fn runs(text: &AttributedString) -> Vec<(AttributeKind, Range<usize>)> {
        text.attributes().map(|run| (run.kind(), run.range())).collect()
    }

    #[test]
    fn emoji_insert_updates_all_index_spaces() {
        let mut text = AttributedString::new("ab");
        text.insert_at("🙂", 1).unwrap();
        text.check_invariants();
        assert_eq!(text.len(), 6);
        assert_eq!(text.utf16().len(), 4);
        assert_eq!(text.num_graphemes(), 3);
        assert_eq!(text.byte_to_grapheme(5), Ok(2));
        assert_eq!(text.grapheme_to_byte(2), Ok(5));
        assert_eq!(text.byte_to_utf16(5), Ok(3));
        assert_eq!(text.utf16_to_byte(2), Ok(1));
    }

    #[test]
    fn delete_truncates_enclosing_run() {
        let mut text = AttributedString::new("Hello");
        text.set_attribute(bold(), 0..5).unwrap();
        text.delete(2..3).unwrap();
        text.check_invariants();
        assert_eq!(text.as_str(), "Helo");
        assert_eq!(runs(&text), [(AttributeKind::Weight, 0..4)]);
    }

    #[test]
    fn empty_range_on_empty_string() {
        let mut text = AttributedString::new("");
        text.set_attribute(Attribute::family("Arial"), 0..0).unwrap();
        assert_eq!(text.attributes_len(), 0);
        assert_eq!(text.attributes().count(), 0);
    }

    #[test]
    fn insert_round_trip_restores_text_and_runs() {
        let original = "naïve café";
        let mut text = AttributedString::new(original);
        text.set_attribute(bold(), 0..6).unwrap();
        text.set_attribute(Attribute::Italic(FontStyle::Italic), 4..12).unwrap();
        let before = runs(&text);

        for at in [0, 2, 4, 6, 12] {
            let inserted = "e\u{301}𝄞";
            text.insert_at(inserted, at).unwrap();
            text.check_invariants();
            text.delete(at..at + inserted.len()).unwrap();
            text.check_invariants();
            assert_eq!(text.as_str(), original);
            assert_eq!(runs(&text), before, "runs changed after round trip at {at}");
        }
    }

    #[test]
    fn insert_at_splits_but_extending_does_not() {
        let mut text = AttributedString::new("abcd");
        text.set_attribute(bold(), 0..4).unwrap();
        text.insert_at("X", 2).unwrap();
        text.check_invariants();
        assert_eq!(
            runs(&text),
            [(AttributeKind::Weight, 0..2), (AttributeKind::Weight, 3..5)]
        );
        let weight = text.attribute_runs(AttributeKind::Weight);
        assert!(weight[0].shared().ptr_eq(weight[1].shared()));

        let mut text = AttributedString::new("abcd");
        text.set_attribute(bold(), 0..4).unwrap();
        text.insert_at_extending("X", 2).unwrap();
        text.check_invariants();
        assert_eq!(runs(&text), [(AttributeKind::Weight, 0..5)]);
    }

    #[test]
    fn append_stays_unattributed() {
        let mut text = AttributedString::new("bold");
        text.set_attribute(bold(), 0..4).unwrap();
        text.append(" plain");
        text.check_invariants();
        assert_eq!(text.as_str(), "bold plain");
        assert_eq!(runs(&text), [(AttributeKind::Weight, 0..4)]);
        assert_eq!(text.attributes_at(5).count(), 0);
    }

    #[test]
    fn graphemes_refresh_after_every_mutation() {
        let mut text = AttributedString::new("e");
        assert_eq!(text.num_graphemes(), 1);
        text.append("\u{301}");
        assert_eq!(text.num_graphemes(), 1);
        text.append("🇯🇵");
        assert_eq!(text.num_graphemes(), 2);
        text.insert_at("xy", 0).unwrap();
        assert_eq!(text.num_graphemes(), 4);
        text.delete(0..1).unwrap();
        assert_eq!(text.num_graphemes(), 3);
        assert_eq!(text.byte_to_grapheme(text.len()), Ok(text.num_graphemes()));
        // A byte inside a cluster maps to that cluster.
        assert_eq!(text.byte_to_grapheme(2), Ok(1));
        assert_eq!(text.grapheme_to_byte(2), Ok(4));
    }

    #[test]
    fn offset_errors_leave_string_untouched() {
        let mut text = AttributedString::new("éclair");
        text.set_attribute(bold(), 0..2).unwrap();

        let err = text.insert_at("x", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotOnCharBoundary);
        assert_eq!(err.boundary().map(|b| b.which), Some(Endpoint::Start));

        let err = text.delete(3..99).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert!(format!("{err}").contains("len 7"));

        #[expect(
            clippy::reversed_empty_ranges,
            reason = "We want an invalid range for testing."
        )]
        let err = text.set_attribute(bold(), 4..3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);

        let err = text.grapheme_to_byte(7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GraphemeOutOfBounds);
        assert_eq!(err.len(), 6);

        assert_eq!(
            text.utf16_to_byte(7).map_err(|e| e.kind()),
            Err(ErrorKind::InvalidBounds)
        );
        assert_eq!(text.as_str(), "éclair");
        assert_eq!(runs(&text), [(AttributeKind::Weight, 0..2)]);
        text.check_invariants();
    }

    #[test]
    fn for_each_attribute_stops_early() {
        let mut text = AttributedString::new("0123456789");
        text.set_attribute(Attribute::Size(12.0), 0..10).unwrap();
        text.set_attribute(bold(), 2..4).unwrap();
        text.set_attribute(Attribute::Color(Color::BLACK), 6..8).unwrap();

        let mut seen = Vec::new();
        let flow = text.for_each_attribute(|run| {
            seen.push(run.start());
            if run.kind() == AttributeKind::Weight {
                ControlFlow::Break(run.range())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(2..4));
        assert_eq!(seen, [0, 2]);
    }

    #[test]
    fn removing_attributes() {
        let mut text = AttributedString::new("0123456789");
        text.set_attribute(Attribute::Size(12.0), 0..10).unwrap();
        text.set_attribute(bold(), 0..10).unwrap();
        text.remove_attribute(AttributeKind::Size, 3..5).unwrap();
        text.check_invariants();
        assert_eq!(
            runs(&text),
            [
                (AttributeKind::Size, 0..3),
                (AttributeKind::Weight, 0..10),
                (AttributeKind::Size, 5..10),
            ]
        );
        text.remove_attributes(0..10).unwrap();
        assert_eq!(text.attributes_len(), 0);

        text.set_attribute(bold(), 1..2).unwrap();
        text.clear_attributes();
        assert_eq!(text.attributes_len(), 0);
    }

    #[test]
    fn deleted_runs_release_their_values() {
        let mut text = AttributedString::new("abcdef");
        text.set_attribute(bold(), 0..6).unwrap();
        text.set_attribute(Attribute::Weight(FontWeight::LIGHT), 2..4).unwrap();
        let weight = text.attribute_runs(AttributeKind::Weight);
        assert_eq!(weight[0].shared().retain_count(), 2);

        text.delete(0..2).unwrap();
        let weight = text.attribute_runs(AttributeKind::Weight);
        assert_eq!(weight.len(), 2);
        assert_eq!(weight[1].shared().retain_count(), 1);
    }

    #[test]
    fn utf16_runs_use_unit_offsets() {
        let mut text = AttributedString::new("🙂 hi");
        text.set_attribute(bold(), 4..7).unwrap();
        let runs = text.utf16_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, 2..5);
        assert_eq!(*runs[0].1, bold());
    }

    #[test]
    fn conversions_and_display() {
        let text = AttributedString::from("plain");
        assert_eq!(format!("{text}"), "plain");
        let text = AttributedString::from(alloc::string::String::from("owned"));
        assert_eq!(text.len(), 5);
        let text = AttributedString::default();
        assert!(text.is_empty());
        assert_eq!(text.num_graphemes(), 0);
        assert_eq!(text.byte_to_grapheme(0), Ok(0));
        assert_eq!(text.grapheme_to_byte(0), Ok(0));
    }
}
