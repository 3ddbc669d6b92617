//! Domain types for the transit network.
//!
//! The network is stored arena-style: the [`crate::network::Graph`] owns
//! flat vectors of stops, lines and edges, and the types here refer to each
//! other through copyable index newtypes rather than shared references.
//! Code holding an index can trust it came from the owning graph.

mod edge;
mod error;
mod line;
mod stop;

pub use edge::{Edge, EdgeIndex, TransportMode};
pub use error::GraphError;
pub use line::{Line, LineIndex, Timepoint};
pub use stop::{Stop, StopIndex};
