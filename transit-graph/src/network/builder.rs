//! Input records for graph construction.
//!
//! These are the types an external loader fills in, from whatever source it
//! has, before handing them to [`super::Graph::build`]. They carry plain
//! strings and numbers; all cross-referencing and validation happens during
//! the build.

use serde::{Deserialize, Serialize};

use crate::domain::TransportMode;

/// A stop as declared by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl StopRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lon,
            lat,
        }
    }
}

/// One scheduled call on a line, by stop id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimepointRecord {
    pub stop_id: String,
    /// Scheduled time at the stop, in seconds.
    pub seconds: u32,
}

/// A line as declared by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: String,
    pub mode: TransportMode,
    pub timepoints: Vec<TimepointRecord>,
}

impl LineRecord {
    pub fn new(
        id: impl Into<String>,
        mode: TransportMode,
        timepoints: &[(&str, u32)],
    ) -> Self {
        Self {
            id: id.into(),
            mode,
            timepoints: timepoints
                .iter()
                .map(|(stop_id, seconds)| TimepointRecord {
                    stop_id: (*stop_id).to_string(),
                    seconds: *seconds,
                })
                .collect(),
        }
    }
}
