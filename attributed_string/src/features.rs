// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! OpenType feature sets.

use alloc::vec::Vec;
use core::ops::ControlFlow;

use text_primitives::Tag;

/// A set of OpenType feature settings, unique by tag.
///
/// Entries are kept sorted by tag so lookups are binary searches and two sets compare equal
/// exactly when they hold the same `(tag, value)` pairs.
///
/// A missing tag is distinct from a tag explicitly set to `0`:
///
/// ```
/// use attributed_string::OpenTypeFeatures;
/// use text_primitives::Tag;
///
/// let liga = Tag::from_bytes(*b"liga");
/// let mut features = OpenTypeFeatures::new();
/// assert_eq!(features.get(liga), None);
/// features.add(liga, 0);
/// assert_eq!(features.get(liga), Some(0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OpenTypeFeatures {
    features: Vec<(Tag, u32)>,
}

impl OpenTypeFeatures {
    /// Creates an empty feature set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma separated list of feature settings using the CSS
    /// `font-feature-settings` grammar, e.g. `"liga" off, "cv01" 3, "kern"`.
    ///
    /// Parsing stops at the first malformed entry; the entries before it are kept.
    /// Later entries replace earlier ones with the same tag.
    pub fn parse_css(s: &str) -> Self {
        let mut features = Self::new();
        for (tag, value) in ParseList::new(s) {
            let value = match value {
                "on" | "" => 1,
                "off" => 0,
                _ => match value.parse::<u32>() {
                    Ok(value) => value,
                    Err(_) => break,
                },
            };
            features.add(tag, value);
        }
        features
    }

    /// Sets `tag` to `value`, replacing any existing value for `tag`.
    pub fn add(&mut self, tag: Tag, value: u32) {
        match self.search(tag) {
            Ok(ix) => self.features[ix].1 = value,
            Err(ix) => self.features.insert(ix, (tag, value)),
        }
    }

    /// Removes `tag`, returning its previous value.
    pub fn remove(&mut self, tag: Tag) -> Option<u32> {
        let ix = self.search(tag).ok()?;
        Some(self.features.remove(ix).1)
    }

    /// Returns the value for `tag`, or `None` if the tag is not in the set.
    pub fn get(&self, tag: Tag) -> Option<u32> {
        self.search(tag).ok().map(|ix| self.features[ix].1)
    }

    /// Returns the number of features in the set.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the set has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterates over the features in tag order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Tag, u32)> + '_ {
        self.features.iter().copied()
    }

    /// Calls `f` with each feature in tag order until it returns [`ControlFlow::Break`].
    pub fn for_each<B>(&self, mut f: impl FnMut(Tag, u32) -> ControlFlow<B>) -> ControlFlow<B> {
        for &(tag, value) in &self.features {
            f(tag, value)?;
        }
        ControlFlow::Continue(())
    }

    fn search(&self, tag: Tag) -> Result<usize, usize> {
        self.features.binary_search_by_key(&tag, |&(t, _)| t)
    }
}

impl FromIterator<(Tag, u32)> for OpenTypeFeatures {
    fn from_iter<I: IntoIterator<Item = (Tag, u32)>>(iter: I) -> Self {
        let mut features = Self::new();
        for (tag, value) in iter {
            features.add(tag, value);
        }
        features
    }
}

#[derive(Clone)]
struct ParseList<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> ParseList<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
        }
    }
}

impl<'a> Iterator for ParseList<'a> {
    type Item = (Tag, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.source.len();
        let mut pos = self.pos;
        while pos < len && (self.source[pos].is_ascii_whitespace() || self.source[pos] == b',') {
            pos += 1;
        }
        self.pos = pos;
        if pos >= len {
            return None;
        }
        let quote = match self.source[pos] {
            q @ (b'"' | b'\'') => q,
            _ => return None,
        };
        pos += 1;
        let start = pos;
        let mut tag_str = None;
        while pos < len {
            if self.source[pos] == quote {
                tag_str = core::str::from_utf8(self.source.get(start..pos)?).ok();
                pos += 1;
                break;
            }
            pos += 1;
        }
        self.pos = pos;
        let tag = Tag::parse(tag_str?)?;
        let start = pos;
        while pos < len && self.source[pos] != b',' {
            pos += 1;
        }
        let value = core::str::from_utf8(self.source.get(start..pos)?)
            .ok()?
            .trim();
        self.pos = pos;
        Some((tag, value))
    }
}

#[cfg(test)]
mod tests {
    use super::OpenTypeFeatures;
    use alloc::vec::Vec;
    use core::ops::ControlFlow;
    use text_primitives::Tag;

    const LIGA: Tag = Tag::from_bytes(*b"liga");
    const KERN: Tag = Tag::from_bytes(*b"kern");
    const SMCP: Tag = Tag::from_bytes(*b"smcp");

    #[test]
    fn add_keeps_tags_sorted_and_unique() {
        let mut f = OpenTypeFeatures::new();
        f.add(SMCP, 1);
        f.add(LIGA, 0);
        f.add(KERN, 1);
        f.add(LIGA, 2);
        assert_eq!(f.len(), 3);
        let tags: Vec<_> = f.iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, [KERN, LIGA, SMCP]);
        assert_eq!(f.get(LIGA), Some(2));
    }

    #[test]
    fn remove_and_absent_lookup() {
        let mut f: OpenTypeFeatures = [(LIGA, 0), (KERN, 1)].into_iter().collect();
        assert_eq!(f.get(LIGA), Some(0));
        assert_eq!(f.remove(LIGA), Some(0));
        assert_eq!(f.get(LIGA), None);
        assert_eq!(f.remove(LIGA), None);
        assert_eq!(f.len(), 1);
        assert_eq!(f.remove(KERN), Some(1));
        assert!(f.is_empty());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: OpenTypeFeatures = [(LIGA, 1), (KERN, 0)].into_iter().collect();
        let b: OpenTypeFeatures = [(KERN, 0), (LIGA, 1)].into_iter().collect();
        let c: OpenTypeFeatures = [(KERN, 1), (LIGA, 1)].into_iter().collect();
        let d: OpenTypeFeatures = [(LIGA, 1)].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn for_each_stops_on_break() {
        let f: OpenTypeFeatures = [(LIGA, 1), (KERN, 0), (SMCP, 1)].into_iter().collect();
        let mut seen = Vec::new();
        let result = f.for_each(|tag, _| {
            seen.push(tag);
            if tag == LIGA {
                ControlFlow::Break(tag)
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(result, ControlFlow::Break(LIGA));
        assert_eq!(seen, [KERN, LIGA]);
    }

    #[test]
    fn parse_css_list() {
        let f = OpenTypeFeatures::parse_css(r#""liga" off, 'kern', "cv01" 3 , "smcp" on"#);
        assert_eq!(f.get(LIGA), Some(0));
        assert_eq!(f.get(KERN), Some(1));
        assert_eq!(f.get(Tag::from_bytes(*b"cv01")), Some(3));
        assert_eq!(f.get(SMCP), Some(1));
        assert_eq!(f.len(), 4);
    }

    #[test]
    fn parse_css_stops_at_malformed_entry() {
        let f = OpenTypeFeatures::parse_css(r#""liga" 1, "toolong" 1, "kern" 1"#);
        assert_eq!(f.len(), 1);
        let f = OpenTypeFeatures::parse_css(r#""liga" 1, "kern" banana, "smcp""#);
        assert_eq!(f.len(), 1);
        assert!(OpenTypeFeatures::parse_css("liga").is_empty());
        assert!(OpenTypeFeatures::parse_css("").is_empty());
    }
}
