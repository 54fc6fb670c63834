pub mod geometry {
    pub mod point;
    pub mod segment;

    pub use point::Point;
    pub use segment::Segment;
}

mod algorithm;
pub mod darkness;
mod error;
pub mod field;
mod float;
pub mod grid;
pub mod line_cache;
pub mod path;
pub mod pin_gap;
pub mod pins;
pub mod raster;
pub mod settings;
pub mod verboser;

pub use algorithm::build_path;
pub use darkness::{Darkness, DarknessMode, FlatDarkness, PercentageDarkness};
pub use error::Error;
pub use field::DarknessField;
pub use float::Float;
pub use grid::Grid;
pub use line_cache::LineCache;
pub use path::{Connection, Path, Termination};
pub use pin_gap::PinGap;
pub use pins::{LayoutCache, Pin, PinLayout};
pub use settings::Settings;
