//! The network graph: arena storage for stops, lines and edges.
//!
//! The graph owns every entity. Stops and transport edges are fixed once
//! [`Graph::build`] returns; the walking edges derived from stop locations
//! are the only mutable part, rebuilt through
//! [`Graph::recompute_walking_edges`]. Edges live in one arena with the
//! transport edges in the prefix, so clearing the walking edges is a
//! truncation plus a sweep of the per-stop index lists.

mod builder;

pub use builder::{LineRecord, StopRecord, TimepointRecord};

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{
    Edge, EdgeIndex, GraphError, Line, LineIndex, Stop, StopIndex, Timepoint, TransportMode,
};
use crate::geo::GisPoint;

/// A public-transit network: stops, lines, and the edges derived from them.
#[derive(Debug, Clone)]
pub struct Graph {
    stops: Vec<Stop>,
    lines: Vec<Line>,
    edges: Vec<Edge>,
    stop_ids: HashMap<String, StopIndex>,
    /// Edges below this index are transport edges; the rest are walking.
    transport_edge_count: usize,
}

impl Graph {
    /// Build a graph from stop and line records.
    ///
    /// Every stop id must be unique, every line must have at least one
    /// timepoint, every timepoint must name a declared stop, and scheduled
    /// times along a line must not decrease. Any violation aborts the build;
    /// a partially-built graph is never returned.
    pub fn build(
        stop_records: Vec<StopRecord>,
        line_records: Vec<LineRecord>,
    ) -> Result<Self, GraphError> {
        let mut stops = Vec::with_capacity(stop_records.len());
        let mut stop_ids = HashMap::with_capacity(stop_records.len());

        for rec in stop_records {
            if stop_ids.contains_key(&rec.id) {
                return Err(GraphError::DuplicateStop(rec.id));
            }
            stop_ids.insert(rec.id.clone(), StopIndex(stops.len()));
            stops.push(Stop::new(rec.id, rec.name, GisPoint::new(rec.lon, rec.lat)));
        }

        let mut lines = Vec::with_capacity(line_records.len());
        let mut edges = Vec::new();

        for rec in line_records {
            if rec.timepoints.is_empty() {
                return Err(GraphError::EmptyLine(rec.id));
            }

            let line_index = LineIndex(lines.len());
            let mut timepoints = Vec::with_capacity(rec.timepoints.len());
            for tp in &rec.timepoints {
                let stop = stop_ids.get(&tp.stop_id).copied().ok_or_else(|| {
                    GraphError::UnknownStop {
                        line: rec.id.clone(),
                        stop: tp.stop_id.clone(),
                    }
                })?;
                timepoints.push(Timepoint {
                    stop,
                    seconds: tp.seconds,
                });
            }

            for pair in timepoints.windows(2) {
                if pair[1].seconds < pair[0].seconds {
                    return Err(GraphError::TimesNotOrdered {
                        line: rec.id.clone(),
                        stop: stops[pair[1].stop.0].id().to_string(),
                    });
                }

                let edge_index = EdgeIndex(edges.len());
                edges.push(Edge::new(
                    pair[0].stop,
                    pair[1].stop,
                    rec.mode,
                    Some(line_index),
                    pair[1].seconds - pair[0].seconds,
                ));
                stops[pair[0].stop.0].add_edge_out(edge_index);
                stops[pair[1].stop.0].add_edge_in(edge_index);
            }

            for tp in &timepoints {
                stops[tp.stop.0].add_line(line_index);
            }
            lines.push(Line::new(rec.id, rec.mode, timepoints));
        }

        let transport_edge_count = edges.len();
        debug!(
            stops = stops.len(),
            lines = lines.len(),
            transport_edges = transport_edge_count,
            "built network graph"
        );

        Ok(Self {
            stops,
            lines,
            edges,
            stop_ids,
            transport_edge_count,
        })
    }

    /// All stops, in declaration order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All lines, in declaration order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All edges: transport edges first, then the current walking edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a stop by arena index.
    pub fn stop(&self, index: StopIndex) -> &Stop {
        &self.stops[index.0]
    }

    /// Look up an edge by arena index.
    pub fn edge(&self, index: EdgeIndex) -> &Edge {
        &self.edges[index.0]
    }

    /// Look up a line by arena index.
    pub fn line(&self, index: LineIndex) -> &Line {
        &self.lines[index.0]
    }

    /// Find a stop by its id.
    pub fn stop_index(&self, id: &str) -> Option<StopIndex> {
        self.stop_ids.get(id).copied()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of fixed transport edges.
    pub fn transport_edge_count(&self) -> usize {
        self.transport_edge_count
    }

    /// Number of walking edges currently derived.
    pub fn walking_edge_count(&self) -> usize {
        self.edges.len() - self.transport_edge_count
    }

    /// Remove every walking edge from the graph.
    pub fn remove_walking_edges(&mut self) {
        self.edges.truncate(self.transport_edge_count);
        let boundary = self.transport_edge_count;
        for stop in &mut self.stops {
            stop.retain_transport_edges(boundary);
        }
    }

    /// Rebuild the walking edges for the given distance threshold.
    ///
    /// Existing walking edges are removed first, then a directed pair of
    /// walking edges is added between every two distinct stops within
    /// `max_distance_m` metres of each other, with travel time derived from
    /// walking speed. The resulting edge set depends only on the threshold
    /// and the stop locations, so repeated calls with the same threshold
    /// are idempotent. Returns the number of edges added.
    pub fn recompute_walking_edges(&mut self, max_distance_m: f64) -> Result<usize, GraphError> {
        if max_distance_m < 0.0 {
            return Err(GraphError::NegativeWalkingDistance(max_distance_m));
        }

        self.remove_walking_edges();

        let walking_speed = TransportMode::Walking.cruising_speed_mps();
        let mut added = 0;
        for a in 0..self.stops.len() {
            for b in (a + 1)..self.stops.len() {
                let dist = self.stops[a].distance_to(&self.stops[b]);
                if dist <= max_distance_m {
                    let secs = (dist / walking_speed).round() as u32;
                    self.push_walking_edge(StopIndex(a), StopIndex(b), secs);
                    self.push_walking_edge(StopIndex(b), StopIndex(a), secs);
                    added += 2;
                }
            }
        }

        debug!(
            added,
            threshold_m = max_distance_m,
            "rebuilt walking edges"
        );
        Ok(added)
    }

    fn push_walking_edge(&mut self, from: StopIndex, to: StopIndex, secs: u32) {
        let index = EdgeIndex(self.edges.len());
        self.edges
            .push(Edge::new(from, to, TransportMode::Walking, None, secs));
        self.stops[from.0].add_edge_out(index);
        self.stops[to.0].add_edge_in(index);
    }

    /// The stops adjacent to `stop` when every edge is treated as
    /// undirected: endpoints of its outgoing and incoming edges, transport
    /// and walking alike. Sorted and deduplicated, so the result is
    /// deterministic.
    pub fn undirected_neighbours(&self, stop: StopIndex) -> Vec<StopIndex> {
        self.neighbours_by(stop, |_| true)
    }

    /// The stops reachable from `stop` by a transport edge in either
    /// direction.
    pub fn transport_neighbours(&self, stop: StopIndex) -> Vec<StopIndex> {
        self.neighbours_by(stop, |e| !e.is_walking())
    }

    /// The stops within walking range of `stop`. Symmetric by
    /// construction: walking edges always come in directed pairs.
    pub fn walking_neighbours(&self, stop: StopIndex) -> Vec<StopIndex> {
        self.neighbours_by(stop, Edge::is_walking)
    }

    fn neighbours_by(&self, stop: StopIndex, keep: impl Fn(&Edge) -> bool) -> Vec<StopIndex> {
        let s = &self.stops[stop.0];
        let mut neighbours: Vec<StopIndex> = s
            .edges_out()
            .iter()
            .filter(|&&e| keep(&self.edges[e.0]))
            .map(|&e| self.edges[e.0].to())
            .chain(
                s.edges_in()
                    .iter()
                    .filter(|&&e| keep(&self.edges[e.0]))
                    .map(|&e| self.edges[e.0].from()),
            )
            .collect();
        neighbours.sort_unstable();
        neighbours.dedup();
        neighbours
    }
}
