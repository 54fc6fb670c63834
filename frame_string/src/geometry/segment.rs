use std::ops::Mul;

use super::Point;
use crate::{raster, Float};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment<T> {
    pub start: Point<T>,
    pub end: Point<T>,
}

impl<T> Segment<T> {
    pub fn new(start: Point<T>, end: Point<T>) -> Self {
        Self { start, end }
    }
}

impl<T: Float> Segment<T> {
    /// Pixels covered by the segment, see [`raster::rasterize`].
    pub fn pixels(&self) -> Vec<Point<isize>> {
        raster::rasterize(self.start, self.end)
    }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Segment<T> {
    type Output = Self;

    fn mul(self, scale: T) -> Self {
        Self {
            start: self.start * scale,
            end: self.end * scale,
        }
    }
}
