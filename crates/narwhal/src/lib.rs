#![forbid(unsafe_code)]

//! Constrained layered graph layout.
//!
//! `narwhal` lays out directed graphs in ranks and routes their edges, honouring constraints a
//! plain layered layout does not know about: nodes whose size must not change, border nodes
//! pinned to the perimeter of their parent, a minimum spacing between the end points of edges
//! leaving or entering a node, and per-edge routing styles with pre-seeded stub polylines.
//!
//! ```
//! use narwhal::{LayoutGraph, LayoutSnapshot};
//!
//! let mut g = LayoutGraph::new();
//! let a = g.add_constant_size_node(100.0, 40.0);
//! let b = g.add_node(60.0, 30.0);
//! let e = g.add_edge(a, b).unwrap();
//! narwhal::layout(&mut g).unwrap();
//!
//! assert_eq!(g[a].width, 100.0);
//! assert!(g[e].points.len() >= 2);
//! let json = LayoutSnapshot::capture(&g).to_json().unwrap();
//! assert!(json.contains("\"points\""));
//! ```

pub use narwhal_router as router;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod base;
pub mod border;
pub mod coordinate_system;
pub mod endpoints;
pub mod error;
pub mod graph;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod route;
pub mod sizes;
pub mod snapshot;
pub mod util;

pub use base::{BaseLayout, LayeredLayout};
pub use error::{Error, Result};
pub use graph::{
    BorderNode, ConstantSize, Constraint, Edge, EdgeId, EdgeKind, JointEdges, LayoutGraph, Node,
    NodeId, NodeKind, VirtualNode,
};
pub use model::{Direction, EdgeSpacing, Flow, RoutingStyle, Side};
pub use options::LayoutOptions;
pub use router::{Insets, Point, Rect, Size};
pub use snapshot::LayoutSnapshot;

/// Lays out `graph` in place with the built-in [`LayeredLayout`].
pub fn layout(graph: &mut LayoutGraph) -> Result<()> {
    pipeline::layout(graph, &mut LayeredLayout::default())
}
