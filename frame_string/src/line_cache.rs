use std::collections::HashMap;

use crate::{
    geometry::{Point, Segment},
    Float,
};

/// Rasterized pixels of every pin pair requested so far.
///
/// Pairs are unordered: `(a, b)` and `(b, a)` share one entry, keyed and
/// rasterized in the `(min, max)` direction. Entries are only added when a
/// pair is first requested and are never evicted.
pub struct LineCache<S> {
    positions: Vec<Point<S>>,
    lines: HashMap<(usize, usize), Box<[Point<isize>]>>,
}

impl<S: Float> LineCache<S> {
    /// `positions` are the pins already mapped into pixel space.
    pub fn new(positions: impl IntoIterator<Item = Point<S>>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
            lines: HashMap::new(),
        }
    }

    pub fn pin_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of distinct pairs rasterized so far.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn key(&self, a_idx: usize, b_idx: usize) -> Option<(usize, usize)> {
        let key = if a_idx < b_idx {
            (a_idx, b_idx)
        } else {
            (b_idx, a_idx)
        };
        (key.1 < self.positions.len()).then_some(key)
    }

    /// Cached pixels of a pair, without computing them.
    pub fn get(&self, a_idx: usize, b_idx: usize) -> Option<&[Point<isize>]> {
        let key = self.key(a_idx, b_idx)?;
        self.lines.get(&key).map(|pixels| &**pixels)
    }

    /// Pixels between two pins, rasterized at most once per pair.
    /// `None` only when a pin index is out of range.
    pub fn get_or_compute(&mut self, a_idx: usize, b_idx: usize) -> Option<&[Point<isize>]> {
        let (small, big) = self.key(a_idx, b_idx)?;
        let positions = &self.positions;
        let pixels = self.lines.entry((small, big)).or_insert_with(|| {
            Segment::new(positions[small], positions[big])
                .pixels()
                .into_boxed_slice()
        });
        Some(&**pixels)
    }
}
