use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::{darkness::DarknessMode, Float};

/// Knobs of a single path building run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "S: Float + Deserialize<'de>"))]
pub struct Settings<S> {
    /// Strings to place.
    pub string_count: usize,
    /// Share of the pin count that linked pins must be apart, floored.
    pub min_pin_gap_fraction: S,
    /// Ink consumed by every string.
    pub darkness: DarknessMode<S>,
    /// Strings between two progress reports.
    pub report_interval: usize,
}

impl<S: Float> Settings<S> {
    pub fn new(string_count: usize) -> Self {
        Self {
            string_count,
            ..Default::default()
        }
    }

    pub fn with_min_pin_gap_fraction(mut self, fraction: S) -> Self {
        self.min_pin_gap_fraction = fraction;
        self
    }

    pub fn with_darkness(mut self, darkness: DarknessMode<S>) -> Self {
        self.darkness = darkness;
        self
    }

    pub fn with_report_interval(mut self, report_interval: usize) -> Self {
        self.report_interval = report_interval;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.string_count == 0 {
            return Err(Error::StringCount);
        }
        if self.report_interval == 0 {
            return Err(Error::ReportInterval);
        }
        let fraction = self.min_pin_gap_fraction;
        if !(fraction.is_finite() && fraction >= S::ZERO) {
            return Err(Error::PinGap(AsPrimitive::<f64>::as_(fraction)));
        }
        let value = self.darkness.value();
        if !(value.is_finite() && value >= S::ZERO) {
            return Err(Error::Darkness(AsPrimitive::<f64>::as_(value)));
        }
        Ok(())
    }
}

impl<S: Float> Default for Settings<S> {
    fn default() -> Self {
        Self {
            string_count: 4000,
            min_pin_gap_fraction: S::TENTH,
            darkness: DarknessMode::default(),
            report_interval: 100,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("String count must be greater or equal to 1")]
    StringCount,
    #[error("Report interval must be greater or equal to 1")]
    ReportInterval,
    #[error("Minimum pin gap fraction must be a non negative number, got {0}")]
    PinGap(f64),
    #[error("Darkness value must be a non negative number, got {0}")]
    Darkness(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::<f64>::new(50);
        assert_eq!(settings.string_count, 50);
        assert_eq!(settings.min_pin_gap_fraction, 0.1);
        assert_eq!(settings.darkness, DarknessMode::Flat(25.0));
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert_eq!(Settings::<f32>::new(0).validate(), Err(Error::StringCount));
        assert_eq!(
            Settings::<f32>::new(1).with_report_interval(0).validate(),
            Err(Error::ReportInterval)
        );
        assert_eq!(
            Settings::<f64>::new(1).with_min_pin_gap_fraction(-0.5).validate(),
            Err(Error::PinGap(-0.5))
        );
        assert_eq!(
            Settings::<f64>::new(1)
                .with_darkness(DarknessMode::Flat(f64::INFINITY))
                .validate(),
            Err(Error::Darkness(f64::INFINITY))
        );
    }
}
