// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind sorted attribute runs over byte offsets.

use alloc::vec::Vec;
use core::mem;
use core::ops::Range;

use crate::{Attribute, AttributeKind, SharedAttribute, TextRange};

/// How existing runs react to text inserted inside them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InsertPolicy {
    /// The inserted text lies outside every run. A run that strictly contains the insertion
    /// point is split around the new text, both halves sharing the same value.
    #[default]
    Unattributed,
    /// A run that strictly contains the insertion point grows to cover the inserted text, so
    /// the new text inherits its formatting. Runs that start or end at the insertion point are
    /// not extended.
    ExtendRuns,
}

/// A half-open byte range carrying one attribute value.
///
/// Runs are never empty.
#[derive(Debug)]
pub struct AttributeRun {
    start: usize,
    end: usize,
    value: SharedAttribute,
}

impl AttributeRun {
    /// The first byte covered by this run.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The byte just past the end of this run.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The byte range covered by this run.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The kind of the attribute applied by this run.
    pub fn kind(&self) -> AttributeKind {
        self.value.kind()
    }

    /// The attribute applied by this run.
    pub fn attribute(&self) -> &Attribute {
        &self.value
    }

    /// The retained value, which may be shared with other runs.
    pub fn shared(&self) -> &SharedAttribute {
        &self.value
    }

    fn piece(&self, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            value: self.value.retain(),
        }
    }
}

/// The attribute runs of one string, kept as one sorted, disjoint list per kind.
///
/// Runs of different kinds are independent and may overlap freely.
#[derive(Debug, Default)]
pub(crate) struct AttributeRunList {
    by_kind: [Vec<AttributeRun>; AttributeKind::COUNT],
}

impl AttributeRunList {
    pub(crate) fn len(&self) -> usize {
        self.by_kind.iter().map(Vec::len).sum()
    }

    pub(crate) fn of_kind(&self, kind: AttributeKind) -> &[AttributeRun] {
        &self.by_kind[kind.index()]
    }

    /// Every run, in ascending start order; runs starting together come in kind order.
    pub(crate) fn sorted(&self) -> Vec<&AttributeRun> {
        let mut runs: Vec<_> = self.by_kind.iter().flatten().collect();
        // Stable, so equal starts stay in kind order.
        runs.sort_by_key(|run| run.start);
        runs
    }

    /// Every run covering the byte at `offset`, in kind order.
    pub(crate) fn at(&self, offset: usize) -> impl Iterator<Item = &AttributeRun> + '_ {
        self.by_kind.iter().filter_map(move |runs| {
            // Runs are sorted and disjoint, so at most one per kind can match.
            let ix = runs.partition_point(|run| run.end <= offset);
            runs.get(ix).filter(|run| run.start <= offset)
        })
    }

    /// Makes room for `count` new bytes at `at`.
    pub(crate) fn insert(&mut self, at: usize, count: usize, policy: InsertPolicy) {
        if count == 0 {
            return;
        }
        for runs in &mut self.by_kind {
            let mut split = None;
            for (ix, run) in runs.iter_mut().enumerate() {
                if run.start >= at {
                    run.start += count;
                    run.end += count;
                } else if run.end > at {
                    match policy {
                        InsertPolicy::ExtendRuns => run.end += count,
                        InsertPolicy::Unattributed => {
                            split = Some((ix, run.piece(at + count, run.end + count)));
                            run.end = at;
                        }
                    }
                }
            }
            // At most one run per kind can contain `at`.
            if let Some((ix, tail)) = split {
                runs.insert(ix + 1, tail);
            }
        }
    }

    /// Removes the bytes in `range`, truncating, dropping and shifting runs to match.
    pub(crate) fn remove_characters(&mut self, range: TextRange) {
        let (start, end) = (range.start(), range.end());
        let removed = range.len();
        if removed == 0 {
            return;
        }
        for runs in &mut self.by_kind {
            runs.retain_mut(|run| {
                if run.end <= start {
                    return true;
                }
                if run.start >= end {
                    run.start -= removed;
                    run.end -= removed;
                    return true;
                }
                let new_start = run.start.min(start);
                let new_end = if run.end > end { run.end - removed } else { start };
                run.start = new_start;
                run.end = new_end;
                new_start < new_end
            });
            coalesce(runs);
        }
    }

    /// Applies `value` over `range`, replacing any runs of the same kind there.
    pub(crate) fn set(&mut self, value: Attribute, range: TextRange) {
        if range.is_empty() {
            // Nothing to attach to; the value is dropped here.
            return;
        }
        let kind = value.kind();
        let runs = &mut self.by_kind[kind.index()];
        clear_range(runs, range);

        let mut ix = runs.partition_point(|run| run.start < range.start());
        let mut run = AttributeRun {
            start: range.start(),
            end: range.end(),
            value: SharedAttribute::new(value),
        };
        if ix > 0 {
            let prev = &runs[ix - 1];
            if prev.end == run.start && *prev.value == *run.value {
                run.start = prev.start;
                ix -= 1;
                run.value = runs.remove(ix).value;
            }
        }
        if let Some(next) = runs.get(ix) {
            if next.start == run.end && *next.value == *run.value {
                run.end = next.end;
                runs.remove(ix);
            }
        }
        log::trace!("set {kind:?} over {}..{}", run.start, run.end);
        runs.insert(ix, run);
    }

    /// Removes runs of `kind` from `range`.
    pub(crate) fn remove_kind(&mut self, kind: AttributeKind, range: TextRange) {
        clear_range(&mut self.by_kind[kind.index()], range);
    }

    /// Removes runs of every kind from `range`.
    pub(crate) fn remove_all(&mut self, range: TextRange) {
        for runs in &mut self.by_kind {
            clear_range(runs, range);
        }
    }

    pub(crate) fn clear(&mut self) {
        for runs in &mut self.by_kind {
            runs.clear();
        }
    }

    /// Panics if any run list is unsorted, overlapping, uncoalesced or empty-ranged.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self, text_len: usize) {
        for (kind, runs) in AttributeKind::ALL.into_iter().zip(&self.by_kind) {
            for run in runs {
                assert!(run.start < run.end, "empty {kind:?} run at {}", run.start);
                assert!(run.end <= text_len, "{kind:?} run past end of text");
                assert_eq!(run.kind(), kind, "run stored under the wrong kind");
            }
            for pair in runs.windows(2) {
                assert!(pair[0].end <= pair[1].start, "overlapping {kind:?} runs");
                assert!(
                    pair[0].end < pair[1].start || *pair[0].value != *pair[1].value,
                    "uncoalesced {kind:?} runs at {}",
                    pair[0].end
                );
            }
        }
    }
}

/// Cuts `range` out of a sorted, disjoint run list without shifting anything.
fn clear_range(runs: &mut Vec<AttributeRun>, range: TextRange) {
    let (start, end) = (range.start(), range.end());
    if start == end {
        return;
    }
    let first = runs.partition_point(|run| run.end <= start);
    let last = runs.partition_point(|run| run.start < end);
    if first == last {
        return;
    }
    let mut kept = Vec::with_capacity(2);
    for run in runs.drain(first..last) {
        if run.start < start {
            kept.push(run.piece(run.start, start));
        }
        if run.end > end {
            kept.push(run.piece(end, run.end));
        }
    }
    runs.splice(first..first, kept);
}

/// Merges neighbouring runs that touch and carry equal values.
fn coalesce(runs: &mut Vec<AttributeRun>) {
    let mut merged: Vec<AttributeRun> = Vec::with_capacity(runs.len());
    for run in mem::take(runs) {
        match merged.last_mut() {
            Some(prev) if prev.end == run.start && *prev.value == *run.value => {
                prev.end = run.end;
            }
            _ => merged.push(run),
        }
    }
    *runs = merged;
}

#[cfg(test)]
mod tests {
    use super::{AttributeRunList, InsertPolicy};
    use crate::{Attribute, AttributeKind, Color, TextRange};
    use alloc::vec::Vec;
    use core::ops::Range;
    use text_primitives::{FontStyle, FontWeight};

    fn r(start: usize, end: usize) -> TextRange {
        TextRange::new_unchecked(start, end)
    }

    fn bold() -> Attribute {
        Attribute::Weight(FontWeight::BOLD)
    }

    fn ranges(list: &AttributeRunList, kind: AttributeKind) -> Vec<Range<usize>> {
        list.of_kind(kind).iter().map(|run| run.range()).collect()
    }

    #[test]
    fn adjacent_equal_values_coalesce() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 5));
        list.set(bold(), r(5, 10));
        list.check_invariants(10);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..10]);
        assert_eq!(list.of_kind(AttributeKind::Weight)[0].shared().retain_count(), 1);
    }

    #[test]
    fn coalesce_bridges_both_neighbours() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 3));
        list.set(bold(), r(6, 9));
        list.set(bold(), r(3, 6));
        list.check_invariants(9);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..9]);
    }

    #[test]
    fn different_values_do_not_coalesce() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 5));
        list.set(Attribute::Weight(FontWeight::LIGHT), r(5, 10));
        list.check_invariants(10);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..5, 5..10]);
    }

    #[test]
    fn other_kinds_are_untouched() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 10));
        list.set(Attribute::Italic(FontStyle::Italic), r(3, 6));
        list.check_invariants(10);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..10]);
        assert_eq!(ranges(&list, AttributeKind::Italic), [3..6]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn overwriting_the_middle_splits_and_shares() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 10));
        list.set(Attribute::Weight(FontWeight::LIGHT), r(3, 6));
        list.check_invariants(10);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..3, 3..6, 6..10]);
        let runs = list.of_kind(AttributeKind::Weight);
        assert!(runs[0].shared().ptr_eq(runs[2].shared()));
        assert_eq!(runs[0].shared().retain_count(), 2);
    }

    #[test]
    fn overwriting_with_same_value_keeps_one_run() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 10));
        list.set(bold(), r(2, 4));
        list.check_invariants(10);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..10]);
        assert_eq!(list.of_kind(AttributeKind::Weight)[0].shared().retain_count(), 1);
    }

    #[test]
    fn empty_range_is_a_no_op() {
        let mut list = AttributeRunList::default();
        list.set(Attribute::family("Arial"), r(0, 0));
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn unattributed_insert_splits_and_shifts() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 4));
        list.set(Attribute::Color(Color::BLACK), r(4, 6));
        list.insert(2, 3, InsertPolicy::Unattributed);
        list.check_invariants(9);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..2, 5..7]);
        assert_eq!(ranges(&list, AttributeKind::Color), [7..9]);
    }

    #[test]
    fn extending_insert_grows_enclosing_run_only() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 4));
        list.set(Attribute::Color(Color::BLACK), r(4, 6));
        list.insert(2, 3, InsertPolicy::ExtendRuns);
        list.insert(7, 1, InsertPolicy::ExtendRuns);
        list.check_invariants(10);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..7]);
        assert_eq!(ranges(&list, AttributeKind::Color), [8..10]);
    }

    #[test]
    fn remove_characters_truncates_drops_and_shifts() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 4));
        list.set(Attribute::Italic(FontStyle::Italic), r(4, 6));
        list.set(Attribute::Color(Color::BLACK), r(5, 10));
        list.set(Attribute::Size(9.0), r(8, 12));
        list.remove_characters(r(2, 7));
        list.check_invariants(7);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..2]);
        assert!(ranges(&list, AttributeKind::Italic).is_empty());
        assert_eq!(ranges(&list, AttributeKind::Color), [2..5]);
        assert_eq!(ranges(&list, AttributeKind::Size), [3..7]);
    }

    #[test]
    fn remove_characters_rejoins_equal_runs() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 3));
        list.set(bold(), r(5, 8));
        list.remove_characters(r(3, 5));
        list.check_invariants(6);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..6]);
    }

    #[test]
    fn remove_kind_and_remove_all() {
        let mut list = AttributeRunList::default();
        list.set(bold(), r(0, 10));
        list.set(Attribute::Size(12.0), r(0, 10));
        list.remove_kind(AttributeKind::Weight, r(4, 6));
        list.check_invariants(10);
        assert_eq!(ranges(&list, AttributeKind::Weight), [0..4, 6..10]);
        assert_eq!(ranges(&list, AttributeKind::Size), [0..10]);

        list.remove_all(r(0, 5));
        list.check_invariants(10);
        assert_eq!(ranges(&list, AttributeKind::Weight), [6..10]);
        assert_eq!(ranges(&list, AttributeKind::Size), [5..10]);

        list.clear();
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn sorted_and_at_queries() {
        let mut list = AttributeRunList::default();
        list.set(Attribute::Size(12.0), r(2, 8));
        list.set(bold(), r(0, 4));
        list.set(Attribute::family("Arial"), r(2, 3));
        let starts: Vec<_> = list
            .sorted()
            .iter()
            .map(|run| (run.start(), run.kind()))
            .collect();
        assert_eq!(
            starts,
            [
                (0, AttributeKind::Weight),
                (2, AttributeKind::Family),
                (2, AttributeKind::Size),
            ]
        );
        let at: Vec<_> = list.at(3).map(|run| run.kind()).collect();
        assert_eq!(at, [AttributeKind::Size, AttributeKind::Weight]);
        assert_eq!(list.at(8).count(), 0);
    }
}
