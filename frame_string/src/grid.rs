use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T = usize> {
    pub height: T,
    pub width: T,
}

impl<T> Grid<T> {
    pub fn new(height: T, width: T) -> Self {
        Self { height, width }
    }
}

impl Grid {
    pub fn len(&self) -> usize {
        self.height * self.width
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major index of a pixel, `None` outside the grid.
    pub fn index_of(&self, point: Point<isize>) -> Option<usize> {
        let point = point.cast::<usize>()?;
        if point.x < self.width && point.y < self.height {
            Some(point.y * self.width + point.x)
        } else {
            None
        }
    }

    pub fn indexes_of<'a>(
        &'a self,
        pixels: &'a [Point<isize>],
    ) -> impl Iterator<Item = usize> + 'a {
        pixels.iter().filter_map(|&point| self.index_of(point))
    }
}
