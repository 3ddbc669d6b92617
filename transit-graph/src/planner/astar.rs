//! A* search between two stops.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::Duration;
use tracing::{debug, trace};

use crate::domain::{Edge, EdgeIndex, StopIndex, TransportMode};
use crate::network::Graph;

use super::SearchConfig;

/// A found path: the edges to traverse, in order.
///
/// An empty path means start and goal were the same stop. "No path exists"
/// is `None` from the search, never an empty `Path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    edges: Vec<EdgeIndex>,
    total_time_secs: u32,
}

impl Path {
    /// The edges from start to goal.
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    /// Total elapsed time including transfer penalties, in seconds.
    pub fn total_time_secs(&self) -> u32 {
        self.total_time_secs
    }

    /// Total elapsed time as a Duration.
    pub fn total_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.total_time_secs))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// An open-set entry: a stop, how it was reached, and the costs so far.
///
/// The edge used to reach the stop travels with the entry because the
/// transfer penalty depends on it; the cost of leaving a stop is a property
/// of the route taken to it, not of the stop alone.
struct FringeItem {
    stop: StopIndex,
    from_edge: Option<EdgeIndex>,
    elapsed_secs: u32,
    estimated_total: f64,
    /// Insertion counter; equal estimates pop in insertion order.
    seq: u64,
}

impl PartialEq for FringeItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FringeItem {}

impl PartialOrd for FringeItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FringeItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops its greatest entry; reverse both keys so the
        // smallest estimate, then the earliest insertion, comes out first.
        other
            .estimated_total
            .total_cmp(&self.estimated_total)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Shortest-path planner over a network graph.
pub struct Planner<'a> {
    graph: &'a Graph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a planner over the given graph.
    pub fn new(graph: &'a Graph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Find the minimal-time path between two stops named by id.
    ///
    /// An id that names no stop in the graph means there is no path.
    pub fn find_shortest_path_between(&self, from_id: &str, to_id: &str) -> Option<Path> {
        let start = self.graph.stop_index(from_id)?;
        let goal = self.graph.stop_index(to_id)?;
        self.find_shortest_path(start, goal)
    }

    /// Find the minimal-time path from `start` to `goal`.
    ///
    /// Returns `None` when the goal is unreachable. When `start == goal`
    /// the path is empty with zero elapsed time.
    pub fn find_shortest_path(&self, start: StopIndex, goal: StopIndex) -> Option<Path> {
        if start == goal {
            return Some(Path {
                edges: Vec::new(),
                total_time_secs: 0,
            });
        }

        let n = self.graph.stop_count();
        let mut best_cost = vec![f64::INFINITY; n];
        let mut back_pointer: Vec<Option<EdgeIndex>> = vec![None; n];
        let mut closed = vec![false; n];
        let mut fringe = BinaryHeap::new();
        let mut seq = 0u64;

        best_cost[start.0] = 0.0;
        fringe.push(FringeItem {
            stop: start,
            from_edge: None,
            elapsed_secs: 0,
            estimated_total: self.estimated_time_secs(start, goal),
            seq,
        });

        let mut reached_goal = false;
        while let Some(item) = fringe.pop() {
            if closed[item.stop.0] {
                continue;
            }
            closed[item.stop.0] = true;

            if item.stop == goal {
                reached_goal = true;
                break;
            }

            let from_edge = item.from_edge.map(|e| self.graph.edge(e));
            let out = self.graph.stop(item.stop).edges_out();
            trace!(
                stop = self.graph.stop(item.stop).id(),
                elapsed = item.elapsed_secs,
                candidates = out.len(),
                "expanding stop"
            );

            for &edge_index in out {
                let edge = self.graph.edge(edge_index);
                let neighbour = edge.to();

                let penalty = if breaks_continuity(from_edge, edge) {
                    self.config.transfer_penalty_secs
                } else {
                    0
                };
                let elapsed = item.elapsed_secs + penalty + edge.travel_time_secs();
                let cost = f64::from(elapsed);

                if cost < best_cost[neighbour.0] {
                    best_cost[neighbour.0] = cost;
                    back_pointer[neighbour.0] = Some(edge_index);
                    seq += 1;
                    fringe.push(FringeItem {
                        stop: neighbour,
                        from_edge: Some(edge_index),
                        elapsed_secs: elapsed,
                        estimated_total: cost + self.estimated_time_secs(neighbour, goal),
                        seq,
                    });
                }
            }
        }

        if !reached_goal {
            return None;
        }
        self.reconstruct(start, goal, &back_pointer)
    }

    /// Walk the back-pointers from goal to start and total up the path.
    fn reconstruct(
        &self,
        start: StopIndex,
        goal: StopIndex,
        back_pointer: &[Option<EdgeIndex>],
    ) -> Option<Path> {
        let mut edges = Vec::new();
        let mut current = goal;
        while current != start {
            let edge_index = back_pointer[current.0]?;
            edges.push(edge_index);
            current = self.graph.edge(edge_index).from();
            if edges.len() > self.graph.edges().len() {
                // Costs only strictly improve, so the back-pointers form a
                // forest; a cycle here means the graph arena is corrupt.
                panic!("cycle while reconstructing path from {goal:?} back to {start:?}");
            }
        }
        edges.reverse();

        let mut total = 0u32;
        let mut previous: Option<&Edge> = None;
        for &edge_index in &edges {
            let edge = self.graph.edge(edge_index);
            if breaks_continuity(previous, edge) {
                total += self.config.transfer_penalty_secs;
            }
            total += edge.travel_time_secs();
            previous = Some(edge);
        }

        debug!(
            from = self.graph.stop(start).id(),
            to = self.graph.stop(goal).id(),
            edges = edges.len(),
            total_secs = total,
            "found path"
        );
        Some(Path {
            edges,
            total_time_secs: total,
        })
    }

    /// Lower-bound travel time between two stops, in seconds: straight-line
    /// distance at the fastest mode's cruising speed.
    fn estimated_time_secs(&self, from: StopIndex, goal: StopIndex) -> f64 {
        let distance = self
            .graph
            .stop(from)
            .location()
            .distance(self.graph.stop(goal).location());
        distance / TransportMode::fastest_speed_mps()
    }
}

/// Whether taking `next` after arriving by `previous` costs a transfer wait.
///
/// No penalty on the very first edge of a path, on staying aboard the same
/// line, or on continuing to walk. Everything else - stepping off a walk
/// onto transport, changing mode, or changing line within a mode - pays.
fn breaks_continuity(previous: Option<&Edge>, next: &Edge) -> bool {
    let Some(previous) = previous else {
        return false;
    };
    if previous.mode() == TransportMode::Walking && next.mode() != TransportMode::Walking {
        return true;
    }
    if previous.mode() != next.mode() {
        return true;
    }
    match (previous.line(), next.line()) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::{Graph, LineRecord, StopRecord, TimepointRecord};
    use proptest::prelude::*;

    /// Graphs whose stops sit inside a small box and whose timetable gives
    /// every edge at least 60 seconds, so no edge outruns the fastest-mode
    /// speed and the heuristic is genuinely a lower bound.
    fn arbitrary_network() -> impl Strategy<Value = Graph> {
        let coords = prop::collection::vec((0.0..0.01f64, 0.0..0.01f64), 2..7);
        let routes = prop::collection::vec(
            (
                prop::collection::vec(0..6usize, 2..5),
                prop_oneof![Just(TransportMode::Bus), Just(TransportMode::Train)],
            ),
            0..5,
        );

        (coords, routes).prop_map(|(coords, routes)| {
            let n = coords.len();
            let stops = coords
                .into_iter()
                .enumerate()
                .map(|(i, (dlon, dlat))| {
                    StopRecord::new(
                        format!("S{i}"),
                        format!("Stop {i}"),
                        174.78 + dlon,
                        -41.29 + dlat,
                    )
                })
                .collect();
            let lines = routes
                .into_iter()
                .enumerate()
                .map(|(k, (sequence, mode))| LineRecord {
                    id: format!("L{k}"),
                    mode,
                    timepoints: sequence
                        .into_iter()
                        .map(|s| s % n)
                        .enumerate()
                        .map(|(i, s)| TimepointRecord {
                            stop_id: format!("S{s}"),
                            seconds: (i as u32) * 60,
                        })
                        .collect(),
                })
                .collect();
            Graph::build(stops, lines).unwrap()
        })
    }

    proptest! {
        /// A found path is a connected chain from start to goal.
        #[test]
        fn paths_are_connected_chains(graph in arbitrary_network(), a in 0..6usize, b in 0..6usize) {
            let start = StopIndex(a % graph.stop_count());
            let goal = StopIndex(b % graph.stop_count());
            let config = SearchConfig::default();
            let planner = Planner::new(&graph, &config);

            if let Some(path) = planner.find_shortest_path(start, goal) {
                if start == goal {
                    prop_assert!(path.is_empty());
                } else {
                    prop_assert_eq!(graph.edge(path.edges()[0]).from(), start);
                    prop_assert_eq!(graph.edge(*path.edges().last().unwrap()).to(), goal);
                    for pair in path.edges().windows(2) {
                        prop_assert_eq!(graph.edge(pair[0]).to(), graph.edge(pair[1]).from());
                    }
                }
            }
        }

        /// Total time is never below the straight-line lower bound.
        #[test]
        fn total_time_respects_the_heuristic_bound(
            graph in arbitrary_network(),
            a in 0..6usize,
            b in 0..6usize,
        ) {
            let start = StopIndex(a % graph.stop_count());
            let goal = StopIndex(b % graph.stop_count());
            let config = SearchConfig::default();
            let planner = Planner::new(&graph, &config);

            if let Some(path) = planner.find_shortest_path(start, goal) {
                let bound = graph.stop(start).location().distance(graph.stop(goal).location())
                    / TransportMode::fastest_speed_mps();
                prop_assert!(f64::from(path.total_time_secs()) >= bound.floor());
            }
        }

        /// Reported total equals the edge times plus one penalty per broken
        /// continuity along the reconstructed path.
        #[test]
        fn total_time_matches_the_penalty_rule(
            graph in arbitrary_network(),
            a in 0..6usize,
            b in 0..6usize,
        ) {
            let start = StopIndex(a % graph.stop_count());
            let goal = StopIndex(b % graph.stop_count());
            let config = SearchConfig::default();
            let planner = Planner::new(&graph, &config);

            if let Some(path) = planner.find_shortest_path(start, goal) {
                let mut expected = 0u32;
                let mut previous: Option<&Edge> = None;
                for &e in path.edges() {
                    let edge = graph.edge(e);
                    if breaks_continuity(previous, edge) {
                        expected += config.transfer_penalty_secs;
                    }
                    expected += edge.travel_time_secs();
                    previous = Some(edge);
                }
                prop_assert_eq!(path.total_time_secs(), expected);
            }
        }
    }
}
