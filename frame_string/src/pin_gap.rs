use num_traits::AsPrimitive;

use crate::Float;

/// Minimum circular distance, counted in pins, between the two ends of a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinGap {
    count: usize,
    min: usize,
}

impl PinGap {
    pub fn new(count: usize, min: usize) -> Self {
        Self { count, min }
    }

    /// `floor(count * fraction)` pins of gap.
    pub fn from_fraction<S: Float>(count: usize, fraction: S) -> Self
    where
        usize: AsPrimitive<S>,
    {
        let scaled: S = count.as_();
        let min = num_traits::ToPrimitive::to_usize(&(scaled * fraction).floor()).unwrap_or(0);
        Self::new(count, min)
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Steps between two pins going the short way around the frame.
    pub fn distance(&self, a_idx: usize, b_idx: usize) -> usize {
        let diff = a_idx.abs_diff(b_idx) % self.count.max(1);
        diff.min(self.count - diff)
    }

    pub fn is_valid(&self, a_idx: usize, b_idx: usize) -> bool {
        a_idx != b_idx && self.distance(a_idx, b_idx) >= self.min
    }

    /// Pins that can be linked from `from`, in ascending order.
    pub fn candidates(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).filter(move |&to| self.is_valid(from, to))
    }
}
