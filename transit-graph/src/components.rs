//! Strongly-connected-component labelling.
//!
//! Kosaraju's algorithm over the directed graph: one depth-first pass over
//! outgoing edges to collect a post-order, then a pass in reverse post-order
//! over incoming edges (the transposed graph), giving every stop reached the
//! same fresh component id. Walking edges are stored as directed pairs, so
//! they behave as bidirectional here without special casing.
//!
//! Both passes are iterative with explicit stacks; transit graphs can be
//! near-linear chains, which would overflow the call stack in a recursive
//! formulation.

use tracing::debug;

use crate::domain::StopIndex;
use crate::network::Graph;

const UNASSIGNED: u32 = u32::MAX;

/// The result of component labelling: one id per stop.
///
/// Two stops share an id exactly when each can reach the other along
/// directed edges. Ids are dense from zero but otherwise arbitrary, and not
/// comparable across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMap {
    ids: Vec<u32>,
    count: u32,
}

impl ComponentMap {
    /// The component id assigned to a stop.
    pub fn id_of(&self, stop: StopIndex) -> u32 {
        self.ids[stop.0]
    }

    /// How many components were found.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// How many stops were labelled.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Label every stop in the graph with its strongly-connected-component id.
pub fn find_components(graph: &Graph) -> ComponentMap {
    let n = graph.stop_count();
    let mut visited = vec![false; n];
    let mut post_order = Vec::with_capacity(n);

    // First pass: post-order over outgoing edges, from every unvisited stop
    // so disconnected parts of the network are covered.
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let stop = frame.0;
            let out = graph.stop(StopIndex(stop)).edges_out();
            if frame.1 < out.len() {
                let edge = out[frame.1];
                frame.1 += 1;
                let next = graph.edge(edge).to().0;
                if !visited[next] {
                    visited[next] = true;
                    stack.push((next, 0));
                }
            } else {
                // Subtree exhausted.
                post_order.push(stop);
                stack.pop();
            }
        }
    }

    // Second pass: reverse post-order over incoming edges; everything
    // reached from an unassigned stop shares its component.
    let mut ids = vec![UNASSIGNED; n];
    let mut count = 0u32;
    let mut stack: Vec<usize> = Vec::new();
    for &root in post_order.iter().rev() {
        if ids[root] != UNASSIGNED {
            continue;
        }
        ids[root] = count;
        stack.push(root);

        while let Some(stop) = stack.pop() {
            for &edge in graph.stop(StopIndex(stop)).edges_in() {
                let prev = graph.edge(edge).from().0;
                if ids[prev] == UNASSIGNED {
                    ids[prev] = count;
                    stack.push(prev);
                }
            }
        }
        count += 1;
    }

    debug!(stops = n, components = count, "labelled components");
    ComponentMap { ids, count }
}
