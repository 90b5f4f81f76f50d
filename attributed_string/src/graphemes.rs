// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use icu_segmenter::GraphemeClusterSegmenter;

/// Grapheme cluster boundaries of a UTF-16 buffer, mapped in both directions.
#[derive(Clone, Debug)]
pub(crate) struct GraphemeIndex {
    /// One entry per code unit plus a sentinel equal to the cluster count.
    unit_to_grapheme: Vec<usize>,
    /// One entry per cluster plus a sentinel equal to the unit count.
    grapheme_to_unit: Vec<usize>,
}

impl GraphemeIndex {
    pub(crate) fn build(units: &[u16]) -> Self {
        let segmenter = GraphemeClusterSegmenter::new();
        let mut grapheme_to_unit: Vec<usize> = segmenter.segment_utf16(units).collect();
        if grapheme_to_unit.first() != Some(&0) {
            grapheme_to_unit.insert(0, 0);
        }
        if grapheme_to_unit.last() != Some(&units.len()) {
            grapheme_to_unit.push(units.len());
        }

        let mut unit_to_grapheme = Vec::with_capacity(units.len() + 1);
        for (grapheme, bounds) in grapheme_to_unit.windows(2).enumerate() {
            unit_to_grapheme.extend(core::iter::repeat_n(grapheme, bounds[1] - bounds[0]));
        }
        unit_to_grapheme.push(grapheme_to_unit.len() - 1);

        log::debug!(
            "built grapheme index: {} clusters over {} units",
            grapheme_to_unit.len() - 1,
            units.len()
        );
        Self {
            unit_to_grapheme,
            grapheme_to_unit,
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.grapheme_to_unit.len() - 1
    }

    /// Returns the cluster containing `unit`, or the count for the end offset.
    pub(crate) fn unit_to_grapheme(&self, unit: usize) -> usize {
        self.unit_to_grapheme[unit]
    }

    /// Returns the first unit of cluster `grapheme`, or the unit count for `grapheme == count`.
    pub(crate) fn grapheme_to_unit(&self, grapheme: usize) -> usize {
        self.grapheme_to_unit[grapheme]
    }
}
