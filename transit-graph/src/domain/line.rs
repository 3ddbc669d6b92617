//! Lines: scheduled sequences of stops.

use super::{StopIndex, TransportMode};

/// Index of a line in the graph's line arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineIndex(pub usize);

/// One scheduled call on a line: which stop, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timepoint {
    pub stop: StopIndex,
    /// Scheduled time at the stop, in seconds.
    pub seconds: u32,
}

/// An ordered, scheduled sequence of stops.
///
/// Each consecutive pair of timepoints defines one directed transport edge
/// in traversal order. A line that runs both ways appears in the data as
/// two lines, one per direction.
#[derive(Debug, Clone)]
pub struct Line {
    id: String,
    mode: TransportMode,
    timepoints: Vec<Timepoint>,
}

impl Line {
    pub(crate) fn new(id: String, mode: TransportMode, timepoints: Vec<Timepoint>) -> Self {
        Self {
            id,
            mode,
            timepoints,
        }
    }

    /// The line id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The transport mode of every edge on this line.
    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// The scheduled calls, in traversal order.
    pub fn timepoints(&self) -> &[Timepoint] {
        &self.timepoints
    }
}
