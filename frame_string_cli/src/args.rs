use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use frame_string::{pins, DarknessMode, Float, Grid, PinLayout, Settings};
use num_traits::AsPrimitive;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input file path.
    #[arg()]
    pub input: PathBuf,

    /// Frame width, in the same unit as the pin spacing.
    #[arg(long, default_value_t = 40.0)]
    pub width: f64,

    /// Frame height, in the same unit as the pin spacing.
    #[arg(long, default_value_t = 40.0)]
    pub height: f64,

    /// Number of pins surrounding the frame.
    #[arg(short, long, conflicts_with = "pin_spacing")]
    pub pins: Option<usize>,

    /// Distance between consecutive pins along the frame. Defaults to one unit.
    #[arg(long)]
    pub pin_spacing: Option<f64>,

    /// Number of strings to place.
    #[arg(short, long)]
    pub strings: Option<usize>,

    /// Minimum gap between linked pins, as a share of the pin count.
    #[arg(long)]
    pub min_pin_gap: Option<f64>,

    /// Darkness mode of processing.
    #[arg(long, value_enum)]
    pub darkness_mode: Option<DarknessModeArg>,

    /// Darkness value modifier.
    #[arg(long)]
    pub darkness_value: Option<f64>,

    /// Size in pixels of the longest side of the darkness field.
    #[arg(short, long, default_value_t = 800)]
    pub resolution: u32,

    /// Precision of calculations (Single/Double).
    #[arg(long, value_enum, default_value_t = Precision::Single)]
    pub precision: Precision,

    /// Strings between two progress reports.
    #[arg(long)]
    pub report_interval: Option<usize>,

    /// JSON file with run settings. Flags take precedence over it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output folder. Defaults to `output` next to the input file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview pixels per frame unit.
    #[arg(long, default_value_t = 20.0)]
    pub preview_scale: f64,

    /// Stroke width of the svg lines, in frame units.
    #[arg(long, default_value_t = 0.1)]
    pub line_thickness: f32,

    /// More logging (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DarknessModeArg {
    #[value(alias = "Flat", alias = "flatten")]
    Flat,
    #[value(alias = "Percentage", alias = "per")]
    Percentage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Precision {
    #[value(alias = "Single", alias = "f32")]
    Single,
    #[value(alias = "Double", alias = "f64")]
    Double,
}

impl Args {
    /// Overrides `base` with whatever was given on the command line.
    pub fn settings<S: Float>(&self, base: Settings<S>) -> Settings<S>
    where
        f64: AsPrimitive<S>,
    {
        let mut settings = base;
        if let Some(strings) = self.strings {
            settings.string_count = strings;
        }
        if let Some(gap) = self.min_pin_gap {
            settings.min_pin_gap_fraction = gap.as_();
        }
        if let Some(interval) = self.report_interval {
            settings.report_interval = interval;
        }
        settings.darkness = match (self.darkness_mode, self.darkness_value) {
            (Some(DarknessModeArg::Flat), value) => {
                DarknessMode::Flat(value.map_or(S::TWENTY_FIVE, |value| value.as_()))
            }
            (Some(DarknessModeArg::Percentage), value) => {
                DarknessMode::Percentage(value.map_or(0.93_f64.as_(), |value| value.as_()))
            }
            (None, Some(value)) => match settings.darkness {
                DarknessMode::Flat(_) => DarknessMode::Flat(value.as_()),
                DarknessMode::Percentage(_) => DarknessMode::Percentage(value.as_()),
            },
            (None, None) => settings.darkness,
        };
        settings
    }

    pub fn pin_count<S: Float>(&self) -> Result<usize, pins::Error>
    where
        f64: AsPrimitive<S>,
    {
        match (self.pins, self.pin_spacing) {
            (Some(pins), _) => Ok(pins),
            (None, spacing) => PinLayout::<S>::count_for_spacing(
                self.width.as_(),
                self.height.as_(),
                spacing.map_or(S::ONE, |spacing| spacing.as_()),
            ),
        }
    }

    /// Pixel size of the darkness field: the frame's aspect ratio with its
    /// longest side at `resolution`.
    pub fn field_size(&self) -> Grid<u32> {
        let resolution = self.resolution.max(1) as f64;
        let (width, height) = if self.width >= self.height {
            (resolution, resolution * self.height / self.width)
        } else {
            (resolution * self.width / self.height, resolution)
        };
        Grid {
            width: (width.round() as u32).max(1),
            height: (height.round() as u32).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("frame-string").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_follow_library() {
        let args = parse(&["cat.png"]);
        let settings = args.settings(Settings::<f64>::default());
        assert_eq!(settings, Settings::default());
        assert_eq!(args.pin_count::<f64>(), Ok(160));
        assert_eq!(args.precision, Precision::Single);
    }

    #[test]
    fn flags_override_settings() {
        let args = parse(&[
            "cat.png",
            "--strings",
            "50",
            "--min-pin-gap",
            "0.2",
            "--darkness-mode",
            "per",
            "--report-interval",
            "5",
        ]);
        let settings = args.settings(Settings::<f64>::new(3000));
        assert_eq!(settings.string_count, 50);
        assert_eq!(settings.min_pin_gap_fraction, 0.2);
        assert_eq!(settings.darkness, DarknessMode::Percentage(0.93));
        assert_eq!(settings.report_interval, 5);
    }

    #[test]
    fn darkness_value_keeps_configured_mode() {
        let args = parse(&["cat.png", "--darkness-value", "0.5"]);
        let base = Settings::<f64>::new(10).with_darkness(DarknessMode::Percentage(0.9));
        assert_eq!(args.settings(base).darkness, DarknessMode::Percentage(0.5));
    }

    #[test]
    fn pins_or_spacing() {
        assert_eq!(parse(&["a.png", "--pins", "200"]).pin_count::<f32>(), Ok(200));
        assert_eq!(
            parse(&["a.png", "--width", "30", "--height", "10", "--pin-spacing", "2"]).pin_count::<f64>(),
            Ok(40)
        );
        assert!(Args::try_parse_from(["frame-string", "a.png", "--pins", "4", "--pin-spacing", "1"]).is_err());
    }

    #[test]
    fn field_keeps_frame_aspect() {
        let args = parse(&["a.png", "--width", "60", "--height", "30", "--resolution", "400"]);
        assert_eq!(args.field_size(), Grid { width: 400, height: 200 });
        let args = parse(&["a.png", "--width", "10", "--height", "40", "--resolution", "400"]);
        assert_eq!(args.field_size(), Grid { width: 100, height: 400 });
    }
}
