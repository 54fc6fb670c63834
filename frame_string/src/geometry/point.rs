use std::ops::Mul;

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::Float;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Mul for Point<T>
where
    T: Mul<Output = T>,
{
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Point {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }
}

impl<T> Mul<T> for Point<T>
where
    T: Mul<Output = T> + Clone,
{
    type Output = Self;

    fn mul(self, scalar: T) -> Self {
        Point {
            x: self.x * scalar.clone(),
            y: self.y * scalar,
        }
    }
}

impl<T: Float> Point<T> {
    pub fn sq_distance(&self, other: &Self) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> T {
        num_traits::Float::sqrt(self.sq_distance(other))
    }

    /// Nearest pixel, halves rounded away from zero.
    pub fn round(&self) -> Point<isize> {
        Point {
            x: AsPrimitive::<isize>::as_(self.x.round()),
            y: AsPrimitive::<isize>::as_(self.y.round()),
        }
    }
}

impl<S: num_traits::NumCast> Point<S> {
    pub fn cast<I: num_traits::NumCast>(self) -> Option<Point<I>> {
        num_traits::cast(self.x).and_then(|x| num_traits::cast(self.y).map(|y| Point { x, y }))
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Point<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:2}, {:2})", self.x, self.y)
    }
}
