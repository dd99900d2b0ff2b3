#![forbid(unsafe_code)]

//! Geometry primitives and an obstacle-avoiding shortest-path router.
//!
//! `narwhal` uses this crate to route oblique edges between ranks: the layout engine describes
//! the space an edge must stay out of as axis-aligned rectangles and asks for the shortest
//! polyline between the edge's end points.

pub mod geom;
pub mod router;

pub use geom::{Insets, Point, Rect, Size};
pub use router::ShortestPathRouter;
