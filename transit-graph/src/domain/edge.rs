//! Directed edges and transport modes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{LineIndex, StopIndex};

/// Index of an edge in the graph's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(pub usize);

/// The mode of transport an edge is travelled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Train,
    Walking,
    /// Any scheduled mode the network data doesn't name explicitly
    /// (ferries, cable cars).
    Other,
}

impl TransportMode {
    /// Typical cruising speed for the mode, in m/s.
    pub fn cruising_speed_mps(self) -> f64 {
        match self {
            TransportMode::Bus => 12.5,
            TransportMode::Train => 27.8,
            TransportMode::Walking => 1.4,
            TransportMode::Other => 16.7,
        }
    }

    /// Cruising speed of the fastest mode in the network, in m/s.
    ///
    /// The path finder's heuristic divides straight-line distance by this,
    /// so it must be at least the speed of every mode for the estimate to
    /// stay a lower bound.
    pub fn fastest_speed_mps() -> f64 {
        TransportMode::Train.cruising_speed_mps()
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Bus => write!(f, "bus"),
            TransportMode::Train => write!(f, "train"),
            TransportMode::Walking => write!(f, "walking"),
            TransportMode::Other => write!(f, "other"),
        }
    }
}

/// A directed connection between two stops.
///
/// Transport edges come from consecutive timepoints on a line and are fixed
/// for the life of the graph. Walking edges are derived from stop locations
/// and carry no line; they are rebuilt whenever the walking threshold
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    from: StopIndex,
    to: StopIndex,
    mode: TransportMode,
    line: Option<LineIndex>,
    travel_time_secs: u32,
}

impl Edge {
    pub(crate) fn new(
        from: StopIndex,
        to: StopIndex,
        mode: TransportMode,
        line: Option<LineIndex>,
        travel_time_secs: u32,
    ) -> Self {
        Self {
            from,
            to,
            mode,
            line,
            travel_time_secs,
        }
    }

    /// The stop this edge leaves from.
    pub fn from(&self) -> StopIndex {
        self.from
    }

    /// The stop this edge arrives at.
    pub fn to(&self) -> StopIndex {
        self.to
    }

    /// The transport mode of this edge.
    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// The line this edge belongs to; `None` for walking edges.
    pub fn line(&self) -> Option<LineIndex> {
        self.line
    }

    /// Travel time along this edge, in whole seconds.
    pub fn travel_time_secs(&self) -> u32 {
        self.travel_time_secs
    }

    /// True if this is a derived walking edge.
    pub fn is_walking(&self) -> bool {
        self.mode == TransportMode::Walking
    }
}
