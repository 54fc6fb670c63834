use std::{
    collections::{hash_map::Entry, HashMap},
    ops::Deref,
};

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::{geometry::Point, Float, Grid};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pin<S> {
    pub index: usize,
    pub position: Point<S>,
}

/// Pins spread evenly by arc length around a `width × height` frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinLayout<S> {
    pins: Vec<Pin<S>>,
    frame: Grid<S>,
}

impl<S: Float> PinLayout<S>
where
    usize: AsPrimitive<S>,
{
    /// Pin 0 sits on the top-left corner and the rest follow clockwise: top
    /// edge, right edge, bottom edge right-to-left, left edge bottom-to-top.
    pub fn rectangle(width: S, height: S, count: usize) -> Result<Self, Error> {
        if !(width.is_finite() && width > S::ZERO) {
            return Err(Error::Width(AsPrimitive::<f64>::as_(width)));
        }
        if !(height.is_finite() && height > S::ZERO) {
            return Err(Error::Height(AsPrimitive::<f64>::as_(height)));
        }
        if count == 0 {
            return Err(Error::MinPinCount);
        }
        let perimeter = S::TWO * (width + height);
        let spacing = perimeter / AsPrimitive::<S>::as_(count);
        let pins = (0..count)
            .map(|index| Pin {
                index,
                position: Self::point_at(width, height, spacing * AsPrimitive::<S>::as_(index)),
            })
            .collect();
        Ok(Self {
            pins,
            frame: Grid { height, width },
        })
    }

    fn point_at(width: S, height: S, distance: S) -> Point<S> {
        if distance < width {
            Point {
                x: distance,
                y: S::ZERO,
            }
        } else if distance < width + height {
            Point {
                x: width,
                y: distance - width,
            }
        } else if distance < S::TWO * width + height {
            Point {
                x: width - (distance - width - height),
                y: height,
            }
        } else {
            Point {
                x: S::ZERO,
                y: height - (distance - S::TWO * width - height),
            }
        }
    }
}

impl<S: Float> PinLayout<S> {
    /// Pin count obtained by walking the perimeter with a fixed physical spacing.
    pub fn count_for_spacing(width: S, height: S, spacing: S) -> Result<usize, Error> {
        if !(spacing.is_finite() && spacing > S::ZERO) {
            return Err(Error::Spacing(AsPrimitive::<f64>::as_(spacing)));
        }
        let perimeter = S::TWO * (width + height);
        match num_traits::ToPrimitive::to_usize(&(perimeter / spacing).round()) {
            Some(count) => Ok(count.max(1)),
            None => Err(Error::Spacing(AsPrimitive::<f64>::as_(spacing))),
        }
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Point<S>> + '_ {
        self.pins.iter().map(|pin| pin.position)
    }

    /// Physical size of the frame the pins were laid on.
    pub fn frame(&self) -> Grid<S> {
        self.frame
    }
}

impl<S> Deref for PinLayout<S> {
    type Target = [Pin<S>];

    fn deref(&self) -> &Self::Target {
        &self.pins
    }
}

/// Memo of layouts keyed by the exact `(width, height, count)` triple.
#[derive(Default)]
pub struct LayoutCache<S> {
    layouts: HashMap<(u64, u64, usize), PinLayout<S>>,
}

impl<S: Float> LayoutCache<S>
where
    usize: AsPrimitive<S>,
{
    pub fn new() -> Self {
        Self {
            layouts: HashMap::new(),
        }
    }

    pub fn get_or_generate(
        &mut self,
        width: S,
        height: S,
        count: usize,
    ) -> Result<&PinLayout<S>, Error> {
        let key = (
            AsPrimitive::<f64>::as_(width).to_bits(),
            AsPrimitive::<f64>::as_(height).to_bits(),
            count,
        );
        match self.layouts.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(PinLayout::rectangle(width, height, count)?)),
        }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn clear(&mut self) {
        self.layouts.clear();
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("Frame width must be a positive number, got {0}")]
    Width(f64),
    #[error("Frame height must be a positive number, got {0}")]
    Height(f64),
    #[error("Pin spacing must be a positive number, got {0}")]
    Spacing(f64),
    #[error("Pin count must be greater or equal to 1")]
    MinPinCount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generates_requested_count_in_order() {
        for (width, height, count) in [(40.0, 40.0, 160), (30.0, 10.0, 7), (1.0, 2.0, 1), (5.0, 3.0, 64)] {
            let layout = PinLayout::<f64>::rectangle(width, height, count).unwrap();
            assert_eq!(layout.len(), count);
            assert_eq!(layout[0].position, Point::new(0.0, 0.0));
            for (idx, pin) in layout.iter().enumerate() {
                assert_eq!(pin.index, idx);
            }
        }
    }

    #[test]
    fn walks_perimeter_clockwise() {
        let layout = PinLayout::<f64>::rectangle(4.0, 2.0, 12).unwrap();
        let positions: Vec<_> = layout.positions().collect();
        assert_eq!(
            positions,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(3.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 1.0),
                Point::new(4.0, 2.0),
                Point::new(3.0, 2.0),
                Point::new(2.0, 2.0),
                Point::new(1.0, 2.0),
                Point::new(0.0, 2.0),
                Point::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn spacing_is_uniform_along_edges() {
        let layout = PinLayout::<f64>::rectangle(40.0, 40.0, 160).unwrap();
        let expected = 2.0 * (40.0 + 40.0) / 160.0;
        for pair in layout.windows(2) {
            let distance = pair[0].position.distance(&pair[1].position);
            assert!((distance - expected).abs() < 1e-9, "{} != {}", distance, expected);
        }
    }

    #[test]
    fn corner_crossing_is_shorter_than_arc() {
        // 14 perimeter units over 4 pins: arc step 3.5 crosses the corners.
        let layout = PinLayout::<f64>::rectangle(4.0, 3.0, 4).unwrap();
        let expected = 2.0 * (4.0 + 3.0) / 4.0;
        let distance = layout[0].position.distance(&layout[1].position);
        assert!(distance <= expected);
        assert_eq!(layout[1].position, Point::new(3.5, 0.0));
        assert_eq!(layout[2].position, Point::new(4.0, 3.0));
    }

    #[test]
    fn rejects_invalid_frames() {
        assert_eq!(PinLayout::<f32>::rectangle(0.0, 1.0, 4), Err(Error::Width(0.0)));
        assert_eq!(PinLayout::<f32>::rectangle(1.0, -2.0, 4), Err(Error::Height(-2.0)));
        assert!(matches!(
            PinLayout::<f64>::rectangle(f64::NAN, 1.0, 4),
            Err(Error::Width(_))
        ));
        assert_eq!(PinLayout::<f64>::rectangle(1.0, 1.0, 0), Err(Error::MinPinCount));
    }

    #[test]
    fn spacing_gives_pin_count() {
        assert_eq!(PinLayout::<f64>::count_for_spacing(40.0, 40.0, 1.0), Ok(160));
        assert_eq!(PinLayout::<f64>::count_for_spacing(1.0, 1.0, 100.0), Ok(1));
        assert_eq!(PinLayout::<f64>::count_for_spacing(1.0, 1.0, 0.0), Err(Error::Spacing(0.0)));
    }

    #[test]
    fn cache_reuses_layouts() {
        let mut cache = LayoutCache::<f32>::new();
        let first = cache.get_or_generate(10.0, 20.0, 30).unwrap().clone();
        let second = cache.get_or_generate(10.0, 20.0, 30).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        cache.get_or_generate(10.0, 20.0, 31).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.get_or_generate(10.0, 0.0, 31).is_err());
        assert_eq!(cache.len(), 2);
    }
}
