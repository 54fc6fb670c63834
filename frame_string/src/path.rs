use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// One string, stretched from pin `from` to pin `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
}

impl Connection {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Every requested string was placed.
    Completed,
    /// The pin gap left no pin to link to.
    NoCandidate,
    /// The host asked to stop.
    Cancelled,
}

/// Ordered stringing sequence. The first string always leaves pin 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    connections: Vec<Connection>,
    termination: Termination,
}

impl Path {
    pub fn new(connections: Vec<Connection>, termination: Termination) -> Self {
        Self {
            connections,
            termination,
        }
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Completed
    }

    /// Pins in visiting order, starting with pin 0.
    pub fn pins(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(0).chain(self.connections.iter().map(|connection| connection.to))
    }
}

impl Deref for Path {
    type Target = [Connection];

    fn deref(&self) -> &Self::Target {
        &self.connections
    }
}
