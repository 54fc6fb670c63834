use frame_string::verboser::{Message, Verboser};
use log::{debug, info};

/// Logs progress, keeping the last logged percentage so that a long run with
/// a small report interval does not flood the output.
#[derive(Debug, Default)]
pub struct LogVerboser {
    last_percent: Option<usize>,
}

impl LogVerboser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Verboser for LogVerboser {
    fn verbose(&mut self, message: Message<'_>) {
        let percent = message.percent();
        match message {
            Message::Mapping { pins } => info!("Mapping {pins} pins"),
            Message::Computing { step, total, path } => {
                if self.last_percent != Some(percent) {
                    info!("Computing {}/{}, {}%", step, total, percent);
                    self.last_percent = Some(percent);
                }
                if let Some(last) = path.last() {
                    debug!("last string {} -> {}", last.from, last.to);
                }
            }
        }
    }
}
