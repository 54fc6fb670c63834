use image::{DynamicImage, RgbImage};
use num_traits::AsPrimitive;

use crate::{darkness::Darkness, geometry::Point, Float, Grid};

/// Remaining ink demand per pixel, always within `[0, 255]`.
#[derive(Clone, Debug, PartialEq)]
pub struct DarknessField<S> {
    values: Vec<S>,
    grid: Grid,
}

impl<S: Float> DarknessField<S> {
    /// Copies `values` (row-major) into a new field, clamping each one.
    pub fn new(grid: Grid, values: impl IntoIterator<Item = S>) -> Result<Self, Error> {
        if grid.is_empty() {
            return Err(Error::EmptyGrid);
        }
        let values: Vec<S> = values.into_iter().map(clamp).collect();
        if values.len() != grid.len() {
            return Err(Error::Size {
                expected: grid.len(),
                found: values.len(),
            });
        }
        Ok(Self { values, grid })
    }

    pub fn from_fn(grid: Grid, mut f: impl FnMut(Point<usize>) -> S) -> Result<Self, Error> {
        let width = grid.width;
        Self::new(
            grid,
            (0..grid.len()).map(|idx| {
                f(Point {
                    x: idx % width,
                    y: idx / width,
                })
            }),
        )
    }

    pub fn filled(grid: Grid, value: S) -> Result<Self, Error> {
        Self::new(grid, std::iter::repeat(value).take(grid.len()))
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn values(&self) -> &[S] {
        &self.values
    }

    pub fn get(&self, point: Point<isize>) -> Option<S> {
        self.grid.index_of(point).map(|idx| self.values[idx])
    }

    /// Sum of the remaining demand over the whole field.
    pub fn total(&self) -> S {
        self.values.iter().fold(S::ZERO, |acc, &value| acc + value)
    }

    /// Mean value over the in-bounds pixels, zero when none is inside.
    pub fn score(&self, pixels: &[Point<isize>]) -> S
    where
        usize: AsPrimitive<S>,
    {
        let mut total = S::ZERO;
        let mut count = 0usize;
        for idx in self.grid.indexes_of(pixels) {
            total += self.values[idx];
            count += 1;
        }
        if count > 0 {
            total / AsPrimitive::<S>::as_(count)
        } else {
            S::ZERO
        }
    }

    pub fn subtract(&mut self, pixels: &[Point<isize>], amount: S) {
        for idx in self.grid.indexes_of(pixels) {
            let value = &mut self.values[idx];
            *value = clamp(*value - amount);
        }
    }

    pub fn apply(&mut self, pixels: &[Point<isize>], darkness: &impl Darkness<S>) {
        for idx in self.grid.indexes_of(pixels) {
            let value = &mut self.values[idx];
            *value = clamp(darkness.compute(*value));
        }
    }
}

fn clamp<S: Float>(value: S) -> S {
    if value.is_nan() {
        S::ZERO
    } else {
        value.max(S::ZERO).min(S::TWO_FIVE_FIVE)
    }
}

impl<S: Float> From<&RgbImage> for DarknessField<S>
where
    u16: AsPrimitive<S>,
{
    /// Darkness of each pixel is `255 - (r + g + b) / 3`.
    fn from(image: &RgbImage) -> Self {
        let three = S::TWO + S::ONE;
        Self {
            values: image
                .pixels()
                .map(|pixel| {
                    let sum = pixel.0[0] as u16 + pixel.0[1] as u16 + pixel.0[2] as u16;
                    clamp(S::TWO_FIVE_FIVE - AsPrimitive::<S>::as_(sum) / three)
                })
                .collect(),
            grid: Grid {
                height: image.height() as usize,
                width: image.width() as usize,
            },
        }
    }
}

impl<S: Float> From<&DynamicImage> for DarknessField<S>
where
    u16: AsPrimitive<S>,
{
    fn from(image: &DynamicImage) -> Self {
        Self::from(&image.to_rgb8())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("Darkness field needs {expected} values, got {found}")]
    Size { expected: usize, found: usize },
    #[error("Darkness field must have at least one pixel")]
    EmptyGrid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::darkness::{FlatDarkness, PercentageDarkness};
    use image::Rgb;

    fn row(values: &[f64]) -> DarknessField<f64> {
        DarknessField::new(Grid::new(1, values.len()), values.iter().copied()).unwrap()
    }

    #[test]
    fn new_clamps_values() {
        let field = row(&[-10.0, 12.5, 300.0, f64::NAN]);
        assert_eq!(field.values(), &[0.0, 12.5, 255.0, 0.0]);
    }

    #[test]
    fn new_checks_size() {
        assert_eq!(
            DarknessField::new(Grid::new(2, 2), [1.0f32, 2.0, 3.0]),
            Err(Error::Size {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            DarknessField::<f32>::new(Grid::new(0, 5), []),
            Err(Error::EmptyGrid)
        );
    }

    #[test]
    fn score_is_mean_of_inside_pixels() {
        let field = row(&[100.0, 150.0, 200.0, 50.0]);
        let pixels: Vec<_> = (0..4).map(|x| Point::new(x, 0)).collect();
        assert_eq!(field.score(&pixels), 125.0);

        let with_outside = [Point::new(-1, 0), Point::new(1, 0), Point::new(2, 0), Point::new(4, 0)];
        assert_eq!(field.score(&with_outside), 175.0);
    }

    #[test]
    fn score_is_zero_without_inside_pixels() {
        let field = row(&[100.0, 150.0]);
        assert_eq!(field.score(&[]), 0.0);
        assert_eq!(field.score(&[Point::new(2, 0), Point::new(0, 1), Point::new(-3, -3)]), 0.0);
    }

    #[test]
    fn subtract_floors_at_zero() {
        let mut field = row(&[30.0, 100.0]);
        let pixels = [Point::new(0, 0), Point::new(1, 0), Point::new(7, 0)];
        for _ in 0..10 {
            field.subtract(&pixels, 25.0);
            assert!(field.values().iter().all(|&value| value >= 0.0));
        }
        assert_eq!(field.values(), &[0.0, 0.0]);
    }

    #[test]
    fn subtract_only_touches_given_pixels() {
        let mut field = DarknessField::filled(Grid::new(2, 2), 200.0f32).unwrap();
        field.subtract(&[Point::new(1, 1)], 25.0);
        assert_eq!(field.values(), &[200.0, 200.0, 200.0, 175.0]);
        assert_eq!(field.get(Point::new(1, 1)), Some(175.0));
        assert_eq!(field.get(Point::new(2, 1)), None);
        assert_eq!(field.total(), 775.0);
    }

    #[test]
    fn apply_matches_subtract_for_flat_darkness() {
        let mut a = row(&[10.0, 40.0, 255.0]);
        let mut b = a.clone();
        let pixels = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        a.subtract(&pixels, 25.0);
        b.apply(&pixels, &FlatDarkness(25.0));
        assert_eq!(a, b);

        b.apply(&pixels, &PercentageDarkness(0.5));
        assert_eq!(b.values(), &[0.0, 7.5, 115.0]);
    }

    #[test]
    fn from_fn_is_row_major() {
        let field = DarknessField::from_fn(Grid::new(2, 3), |p| (p.y * 10 + p.x) as f32).unwrap();
        assert_eq!(field.values(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn converts_rgb_to_darkness() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([0, 0, 0]));
        image.put_pixel(1, 0, Rgb([255, 255, 0]));
        let field = DarknessField::<f64>::from(&image);
        assert_eq!(field.grid(), Grid::new(1, 2));
        assert_eq!(field.values(), &[255.0, 85.0]);
    }
}
