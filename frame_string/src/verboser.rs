use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::path::Connection;

pub enum Message<'a> {
    /// Pin layout mapped onto the darkness field.
    Mapping { pins: usize },
    /// `step` strings out of `total` placed so far.
    Computing {
        step: usize,
        total: usize,
        path: &'a [Connection],
    },
}

impl Message<'_> {
    /// Completion in `0..=100`, zero for messages without progress.
    pub fn percent(&self) -> usize {
        match *self {
            Message::Computing { step, total, .. } if total > 0 => (step.min(total) * 100) / total,
            _ => 0,
        }
    }
}

/// Progress channel between the path builder and its host.
pub trait Verboser {
    fn verbose(&mut self, message: Message<'_>);

    /// Polled before every string is chosen.
    fn is_cancelled(&self) -> bool {
        false
    }
}

pub struct Silent;

impl Verboser for Silent {
    fn verbose(&mut self, _: Message<'_>) {}
}

/// Shared stop flag, cloned into whichever thread may stop the run.
#[derive(Clone, Debug, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Verboser for Cancellation {
    fn verbose(&mut self, _: Message<'_>) {}

    fn is_cancelled(&self) -> bool {
        Cancellation::is_cancelled(self)
    }
}
