//! Stops: the nodes of the transit network.

use std::cmp::Ordering;
use std::fmt;

use crate::geo::GisPoint;

use super::{EdgeIndex, LineIndex};

/// Index of a stop in the graph's stop arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

/// A transit stop with a location and its adjacency lists.
///
/// A stop does not own its edges: `edges_out` and `edges_in` are indexes
/// into the graph's edge arena, kept in sync by the graph itself. The
/// incoming list exists so the transposed graph can be walked without
/// scanning every edge.
#[derive(Debug, Clone)]
pub struct Stop {
    id: String,
    name: String,
    location: GisPoint,
    lines: Vec<LineIndex>,
    edges_out: Vec<EdgeIndex>,
    edges_in: Vec<EdgeIndex>,
}

impl Stop {
    pub(crate) fn new(id: String, name: String, location: GisPoint) -> Self {
        Self {
            id,
            name,
            location,
            lines: Vec::new(),
            edges_out: Vec::new(),
            edges_in: Vec::new(),
        }
    }

    /// The unique stop id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display name of the stop.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the stop is.
    pub fn location(&self) -> &GisPoint {
        &self.location
    }

    /// The lines that pass through this stop.
    pub fn lines(&self) -> &[LineIndex] {
        &self.lines
    }

    /// Directed edges leaving this stop.
    pub fn edges_out(&self) -> &[EdgeIndex] {
        &self.edges_out
    }

    /// Directed edges arriving at this stop.
    pub fn edges_in(&self) -> &[EdgeIndex] {
        &self.edges_in
    }

    /// Straight-line distance to another stop, in metres.
    pub fn distance_to(&self, other: &Stop) -> f64 {
        self.location.distance(&other.location)
    }

    pub(crate) fn add_line(&mut self, line: LineIndex) {
        if !self.lines.contains(&line) {
            self.lines.push(line);
        }
    }

    pub(crate) fn add_edge_out(&mut self, edge: EdgeIndex) {
        self.edges_out.push(edge);
    }

    pub(crate) fn add_edge_in(&mut self, edge: EdgeIndex) {
        self.edges_in.push(edge);
    }

    /// Drop every edge index at or past the transport-edge boundary.
    pub(crate) fn retain_transport_edges(&mut self, transport_edge_count: usize) {
        self.edges_out.retain(|e| e.0 < transport_edge_count);
        self.edges_in.retain(|e| e.0 < transport_edge_count);
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} at ({}, {})",
            self.id,
            self.name,
            self.location.lon(),
            self.location.lat()
        )
    }
}

/// Stops order by name, then id, so listings and tie displays come out
/// alphabetical. Nothing in the analysis algorithms depends on this.
impl Ord for Stop {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Stop {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.id == other.id
    }
}

impl Eq for Stop {}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, name: &str) -> Stop {
        Stop::new(id.into(), name.into(), GisPoint::new(174.78, -41.29))
    }

    #[test]
    fn orders_by_name_then_id() {
        let a = stop("2", "Aro Street");
        let b = stop("1", "Brooklyn");
        let c = stop("3", "Brooklyn");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn display_format() {
        let s = stop("5000", "Courtenay Place");
        assert_eq!(s.to_string(), "5000: Courtenay Place at (174.78, -41.29)");
    }

    #[test]
    fn retain_transport_edges_strips_walking_indexes() {
        let mut s = stop("5000", "Courtenay Place");
        s.add_edge_out(EdgeIndex(0));
        s.add_edge_out(EdgeIndex(7));
        s.add_edge_in(EdgeIndex(3));
        s.add_edge_in(EdgeIndex(9));

        s.retain_transport_edges(5);

        assert_eq!(s.edges_out(), &[EdgeIndex(0)]);
        assert_eq!(s.edges_in(), &[EdgeIndex(3)]);
    }

    #[test]
    fn add_line_deduplicates() {
        let mut s = stop("5000", "Courtenay Place");
        s.add_line(LineIndex(2));
        s.add_line(LineIndex(2));
        assert_eq!(s.lines(), &[LineIndex(2)]);
    }
}
