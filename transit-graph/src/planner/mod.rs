//! Shortest-path search over the network.
//!
//! A* over the directed edges with travel time as the cost, a fixed
//! penalty for breaking continuity (changing line or mode, or stepping off
//! a walk onto transport), and a straight-line-distance heuristic.

mod astar;
mod config;

pub use astar::{Path, Planner};
pub use config::SearchConfig;
