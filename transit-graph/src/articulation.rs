//! Articulation-point detection on the undirected neighbour view.
//!
//! Depth-first low-point search, run from every unvisited stop so graphs
//! that are already disconnected are handled: a DFS root is an articulation
//! point only if it spawns more than one subtree, and a non-root stop is one
//! if some child subtree cannot reach above it except through it. The walk
//! is iterative with an explicit frame stack for the same reason the
//! component passes are.

use std::collections::HashSet;

use crate::domain::StopIndex;
use crate::network::Graph;

const UNVISITED: u32 = u32::MAX;

struct Frame {
    stop: usize,
    parent: usize,
    depth: u32,
    /// Minimum depth reachable from this stop or its descendants via a
    /// non-parent edge.
    reach_back: u32,
    neighbours: Vec<StopIndex>,
    cursor: usize,
}

impl Frame {
    fn new(graph: &Graph, stop: usize, parent: usize, depth: u32) -> Self {
        Self {
            stop,
            parent,
            depth,
            reach_back: depth,
            neighbours: graph.undirected_neighbours(StopIndex(stop)),
            cursor: 0,
        }
    }
}

/// Find every stop whose removal would split a connected part of the
/// network.
///
/// Works on the undirected neighbour view: transport and walking edges,
/// both directions. The result is a set with no meaningful order.
pub fn find_articulation_points(graph: &Graph) -> HashSet<StopIndex> {
    let n = graph.stop_count();
    let mut depth = vec![UNVISITED; n];
    let mut points = HashSet::new();

    for root in 0..n {
        if depth[root] != UNVISITED {
            continue;
        }
        depth[root] = 0;
        let mut subtrees = 0;

        for first in graph.undirected_neighbours(StopIndex(root)) {
            if depth[first.0] != UNVISITED {
                continue;
            }
            subtrees += 1;
            depth[first.0] = 1;
            let mut stack = vec![Frame::new(graph, first.0, root, 1)];

            while let Some(frame) = stack.last_mut() {
                if frame.cursor < frame.neighbours.len() {
                    let neighbour = frame.neighbours[frame.cursor].0;
                    frame.cursor += 1;

                    if neighbour == frame.parent {
                        // The tree edge we arrived by is not a back-edge.
                        continue;
                    }
                    if depth[neighbour] != UNVISITED {
                        frame.reach_back = frame.reach_back.min(depth[neighbour]);
                    } else {
                        let child_depth = frame.depth + 1;
                        let parent = frame.stop;
                        depth[neighbour] = child_depth;
                        stack.push(Frame::new(graph, neighbour, parent, child_depth));
                    }
                } else {
                    let finished = stack.pop().expect("frame stack non-empty");
                    if let Some(parent_frame) = stack.last_mut() {
                        if finished.reach_back >= parent_frame.depth {
                            // The subtree under `finished` only reaches the
                            // rest of the graph through its parent.
                            points.insert(StopIndex(parent_frame.stop));
                        }
                        parent_frame.reach_back = parent_frame.reach_back.min(finished.reach_back);
                    }
                }
            }
        }

        if subtrees > 1 {
            points.insert(StopIndex(root));
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportMode;
    use crate::network::{LineRecord, StopRecord, TimepointRecord};

    /// Build a graph whose undirected view has the given edges.
    fn undirected(n: usize, edges: &[(usize, usize)]) -> Graph {
        let stops = (0..n)
            .map(|i| {
                StopRecord::new(
                    format!("S{i}"),
                    format!("Stop {i}"),
                    174.0 + i as f64,
                    -41.0,
                )
            })
            .collect();
        let lines = edges
            .iter()
            .enumerate()
            .map(|(k, &(a, b))| LineRecord {
                id: format!("L{k}"),
                mode: TransportMode::Bus,
                timepoints: vec![
                    TimepointRecord {
                        stop_id: format!("S{a}"),
                        seconds: 0,
                    },
                    TimepointRecord {
                        stop_id: format!("S{b}"),
                        seconds: 60,
                    },
                ],
            })
            .collect();
        Graph::build(stops, lines).unwrap()
    }

    fn indexes(stops: &[usize]) -> HashSet<StopIndex> {
        stops.iter().map(|&i| StopIndex(i)).collect()
    }

    #[test]
    fn empty_graph_has_none() {
        let graph = undirected(0, &[]);
        assert!(find_articulation_points(&graph).is_empty());
    }

    #[test]
    fn middle_of_a_path_is_a_cut_vertex() {
        let graph = undirected(3, &[(0, 1), (1, 2)]);
        assert_eq!(find_articulation_points(&graph), indexes(&[1]));
    }

    #[test]
    fn triangle_has_none() {
        let graph = undirected(3, &[(0, 1), (1, 2), (2, 0)]);
        assert!(find_articulation_points(&graph).is_empty());
    }

    #[test]
    fn two_disjoint_triangles_have_none() {
        let graph = undirected(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        assert!(find_articulation_points(&graph).is_empty());
    }

    #[test]
    fn bridged_triangles_cut_at_both_ends() {
        let graph = undirected(
            6,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
        );
        assert_eq!(find_articulation_points(&graph), indexes(&[2, 3]));
    }

    #[test]
    fn hub_of_a_star_is_a_cut_vertex() {
        let graph = undirected(4, &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(find_articulation_points(&graph), indexes(&[0]));
    }

    #[test]
    fn lone_component_entry_is_not_a_cut_vertex() {
        // 0-1 pair plus an isolated stop: no removal disconnects anything
        // further, even though 0 and 2 both become DFS roots.
        let graph = undirected(3, &[(0, 1)]);
        assert!(find_articulation_points(&graph).is_empty());
    }

    #[test]
    fn chain_of_four_cuts_at_both_inner_stops() {
        let graph = undirected(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(find_articulation_points(&graph), indexes(&[1, 2]));
    }

    #[test]
    fn two_cycle_is_not_mistaken_for_a_bridge() {
        // A pair of opposing directed edges gives the same undirected
        // neighbourhood twice; the parent-edge exclusion must not let the
        // second edge count as a back-edge.
        let graph = undirected(3, &[(0, 1), (1, 0), (1, 2)]);
        assert_eq!(find_articulation_points(&graph), indexes(&[1]));
    }
}
