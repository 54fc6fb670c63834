mod args;
mod error;
mod export;
mod progress;

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use args::{Args, Precision};
use clap::Parser;
use error::CliError;
use frame_string::{build_path, DarknessField, Float, PinLayout, Settings};
use image::imageops::FilterType;
use log::{error, info};
use num_traits::AsPrimitive;
use progress::LogVerboser;
use serde::{de::DeserializeOwned, Serialize};

fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match args.precision {
        Precision::Single => run::<f32>(&args),
        Precision::Double => run::<f64>(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run<S: Float + Serialize + DeserializeOwned>(args: &Args) -> Result<(), CliError>
where
    f64: AsPrimitive<S>,
    u16: AsPrimitive<S>,
    usize: AsPrimitive<S>,
{
    let base = match &args.config {
        Some(config) => serde_json::from_reader(BufReader::new(File::open(config)?))?,
        None => Settings::<S>::default(),
    };
    let settings = args.settings(base);

    let layout = PinLayout::<S>::rectangle(
        args.width.as_(),
        args.height.as_(),
        args.pin_count::<S>()?,
    )?;

    let size = args.field_size();
    let image = image::open(&args.input)?.resize_exact(size.width, size.height, FilterType::Lanczos3);
    let mut field = DarknessField::<S>::from(&image);
    info!(
        "{} loaded as a {}x{} darkness field",
        args.input.display(),
        size.width,
        size.height
    );

    let path = build_path(&mut field, &layout, &settings, &mut LogVerboser::new())?;

    let file_name = args
        .input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or(CliError::FileName)?;
    let out_folder = output_folder(args);
    std::fs::create_dir_all(&out_folder)?;

    std::fs::write(
        out_folder.join(format!("{file_name}.txt")),
        export::build_instructions(&path, &layout),
    )?;
    svg::save(
        out_folder.join(format!("{file_name}.svg")),
        &export::build_svg(&path, &layout, args.line_thickness),
    )?;
    export::build_rgb(&path, &layout, args.preview_scale.as_())
        .ok_or(CliError::PreviewSize)?
        .save(out_folder.join(format!("{file_name}.png")))?;
    std::fs::write(
        out_folder.join(format!("{file_name}.json")),
        export::Report::new(&settings, &layout, &path).to_json()?,
    )?;
    info!("results written to {}", out_folder.display());
    Ok(())
}

fn output_folder(args: &Args) -> PathBuf {
    match &args.output {
        Some(output) => output.clone(),
        None => args
            .input
            .parent()
            .unwrap_or(Path::new("."))
            .join("output"),
    }
}
