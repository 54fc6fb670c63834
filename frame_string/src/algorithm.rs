use std::ops::Range;

use log::{debug, info, warn};
use num_traits::AsPrimitive;
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

use crate::{
    field::{self, DarknessField},
    geometry::Point,
    line_cache::LineCache,
    path::{Connection, Path, Termination},
    pin_gap::PinGap,
    pins::{self, PinLayout},
    settings::Settings,
    verboser::{Message, Verboser},
    Error, Float,
};

/// Greedily strings `settings.string_count` lines starting at pin 0.
///
/// Each step scores every pin far enough from the current one by the mean
/// darkness under its line, links the best one (lowest index on ties), and
/// removes ink along that line from `field`. Invalid input is rejected before
/// the field is touched; once running, a [`Path`] is always returned, possibly
/// shorter than requested when no pin is reachable or the run is cancelled.
pub fn build_path<S: Float>(
    field: &mut DarknessField<S>,
    layout: &PinLayout<S>,
    settings: &Settings<S>,
    verboser: &mut impl Verboser,
) -> Result<Path, Error>
where
    usize: AsPrimitive<S>,
{
    settings.validate()?;
    let frame = layout.frame();
    if !(frame.width.is_finite() && frame.width > S::ZERO) {
        return Err(pins::Error::Width(AsPrimitive::<f64>::as_(frame.width)).into());
    }
    if !(frame.height.is_finite() && frame.height > S::ZERO) {
        return Err(pins::Error::Height(AsPrimitive::<f64>::as_(frame.height)).into());
    }
    if layout.is_empty() {
        return Err(pins::Error::MinPinCount.into());
    }
    let grid = field.grid();
    if grid.is_empty() {
        return Err(field::Error::EmptyGrid.into());
    }

    let scale = Point {
        x: AsPrimitive::<S>::as_(grid.width) / frame.width,
        y: AsPrimitive::<S>::as_(grid.height) / frame.height,
    };
    verboser.verbose(Message::Mapping { pins: layout.len() });
    let cache = LineCache::new(layout.positions().map(|position| position * scale));
    let gap = PinGap::from_fraction(layout.len(), settings.min_pin_gap_fraction);
    info!(
        "Building {} strings over {} pins on a {}x{} field, minimum pin gap {}",
        settings.string_count,
        layout.len(),
        grid.width,
        grid.height,
        gap.min()
    );

    Ok(Algorithm::new(field, cache, gap).compute(settings, verboser))
}

struct Algorithm<'a, S> {
    field: &'a mut DarknessField<S>,
    cache: LineCache<S>,
    gap: PinGap,
    steps: Vec<Connection>,
    buffers: Vec<BatchBuffer<S>>,
}

impl<'a, S: Float> Algorithm<'a, S>
where
    usize: AsPrimitive<S>,
{
    fn new(field: &'a mut DarknessField<S>, cache: LineCache<S>, gap: PinGap) -> Self {
        Self {
            buffers: BatchBuffer::new(cache.pin_count()),
            field,
            cache,
            gap,
            steps: Vec::new(),
        }
    }

    fn compute(mut self, settings: &Settings<S>, verboser: &mut impl Verboser) -> Path {
        let total = settings.string_count;
        let mut current = 0;
        let mut reported = 0;
        let termination = loop {
            if self.steps.len() >= total {
                break Termination::Completed;
            }
            if verboser.is_cancelled() {
                info!("Cancelled after {} strings", self.steps.len());
                break Termination::Cancelled;
            }
            let Some(next) = self.get_best_line(current) else {
                warn!(
                    "No pin is at least {} pins away from pin {}, stopping after {} strings",
                    self.gap.min(),
                    current,
                    self.steps.len()
                );
                break Termination::NoCandidate;
            };

            if let Some(pixels) = self.cache.get(current, next.pin) {
                self.field.apply(pixels, &settings.darkness);
            }
            self.steps.push(Connection::new(current, next.pin));
            current = next.pin;

            if self.steps.len() % settings.report_interval == 0 {
                reported = self.steps.len();
                self.report(total, verboser);
            }
        };
        if reported != self.steps.len() {
            self.report(total, verboser);
        }
        Path::new(self.steps, termination)
    }

    fn report(&self, total: usize, verboser: &mut impl Verboser) {
        let message = Message::Computing {
            step: self.steps.len(),
            total,
            path: &self.steps,
        };
        debug!("Computing {}/{}, {}%", self.steps.len(), total, message.percent());
        verboser.verbose(message);
    }

    fn get_best_line(&mut self, from: usize) -> Option<Candidate<S>> {
        for to in self.gap.candidates(from) {
            self.cache.get_or_compute(from, to);
        }

        let cache = &self.cache;
        let field = &*self.field;
        let gap = self.gap;
        self.buffers.par_iter_mut().for_each(|buffer| {
            buffer.result = None;
            for to in buffer.range.clone() {
                if !gap.is_valid(from, to) {
                    continue;
                }
                if let Some(pixels) = cache.get(from, to) {
                    let weight = field.score(pixels);
                    if buffer.result.map_or(true, |best| weight > best.weight) {
                        buffer.result = Some(Candidate { pin: to, weight });
                    }
                }
            }
        });

        let mut best: Option<Candidate<S>> = None;
        for result in self.buffers.iter().filter_map(|buffer| buffer.result) {
            if best.map_or(true, |best| result.weight > best.weight) {
                best = Some(result);
            }
        }
        best
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate<S> {
    pin: usize,
    weight: S,
}

/// Contiguous, ascending slice of candidate pins scored by one worker.
struct BatchBuffer<S> {
    range: Range<usize>,
    result: Option<Candidate<S>>,
}

impl<S> BatchBuffer<S> {
    fn new(pin_count: usize) -> Vec<Self> {
        let buffer_count = num_cpus::get().clamp(1, pin_count.max(1));
        let chunk_size = pin_count.div_ceil(buffer_count).max(1);
        (0..pin_count)
            .step_by(chunk_size)
            .map(|start| BatchBuffer {
                range: start..pin_count.min(start + chunk_size),
                result: None,
            })
            .collect()
    }
}
