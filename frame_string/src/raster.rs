//! Integer line walking between pins.
//!
//! The walk uses the classic error-term formulation: starting with
//! `err = dx - dy`, the x coordinate advances while `2 * err > -dy` and the y
//! coordinate while `2 * err < dx`, both tested against the error of the
//! previous pixel. Consecutive pixels are therefore always 8-connected and
//! never repeat.

use std::iter::FusedIterator;

use crate::{geometry::Point, Float};

/// Lazy pixel walk from `start` to `end`, both included.
#[derive(Clone, Debug)]
pub struct DigitalLine {
    point: Point<isize>,
    end: Point<isize>,
    delta: Point<isize>,
    step: Point<isize>,
    err: isize,
    done: bool,
}

impl DigitalLine {
    pub fn new(start: Point<isize>, end: Point<isize>) -> Self {
        let delta = Point {
            x: (end.x - start.x).abs(),
            y: (end.y - start.y).abs(),
        };
        Self {
            point: start,
            end,
            delta,
            step: Point {
                x: (end.x - start.x).signum(),
                y: (end.y - start.y).signum(),
            },
            err: delta.x - delta.y,
            done: false,
        }
    }
}

impl Iterator for DigitalLine {
    type Item = Point<isize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let point = self.point;
        if point == self.end {
            self.done = true;
        } else {
            let err2 = 2 * self.err;
            if err2 > -self.delta.y {
                self.err -= self.delta.y;
                self.point.x += self.step.x;
            }
            if err2 < self.delta.x {
                self.err += self.delta.x;
                self.point.y += self.step.y;
            }
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // Every step advances the major axis by one.
        let remaining = self
            .end
            .x
            .abs_diff(self.point.x)
            .max(self.end.y.abs_diff(self.point.y))
            + 1;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DigitalLine {}

impl FusedIterator for DigitalLine {}

/// Pixels of the straight line between two real positions.
///
/// Endpoints are rounded to the nearest pixel. The walk always runs from the
/// smaller rounded endpoint, so `rasterize(a, b)` is exactly the reverse of
/// `rasterize(b, a)`.
pub fn rasterize<S: Float>(start: Point<S>, end: Point<S>) -> Vec<Point<isize>> {
    let (start, end) = (start.round(), end.round());
    if start <= end {
        DigitalLine::new(start, end).collect()
    } else {
        let mut pixels: Vec<_> = DigitalLine::new(end, start).collect();
        pixels.reverse();
        pixels
    }
}
