//! The base layered layout.
//!
//! The constrained passes only need a graph whose layout nodes are ranked, ordered and placed,
//! with a bend node per crossed rank on every long edge. [`BaseLayout`] is that seam:
//! [`LayeredLayout`] is the built-in implementation, and any closure over the graph can stand in
//! for it.

use narwhal_router::Insets;
use rustc_hash::FxHashMap as HashMap;

use crate::error::{Error, Result};
use crate::graph::{LayoutGraph, NodeId};

pub mod order;
pub mod position;
pub mod rank;

/// Ranks, orders and positions the layout nodes of a graph.
///
/// Implementations must leave every layout node in a rank (see [`LayoutGraph::set_ranks`]),
/// give each edge one bend node per rank it crosses (see [`LayoutGraph::add_virtual_node`]),
/// flag the edges they treated as reversed as `feedback`, and set the layout size.
pub trait BaseLayout {
    fn layout(&mut self, graph: &mut LayoutGraph) -> Result<()>;
}

impl<F> BaseLayout for F
where
    F: FnMut(&mut LayoutGraph) -> Result<()>,
{
    fn layout(&mut self, graph: &mut LayoutGraph) -> Result<()> {
        self(graph)
    }
}

/// Longest-path ranking, barycenter ordering and averaged alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayeredLayout {
    pub order_iterations: usize,
    pub alignment_iterations: usize,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self {
            order_iterations: 8,
            alignment_iterations: 8,
        }
    }
}

impl BaseLayout for LayeredLayout {
    fn layout(&mut self, g: &mut LayoutGraph) -> Result<()> {
        g.clear_base_layout();
        let nodes = g.layout_nodes();
        let feedback = rank::mark_feedback_edges(g, &nodes);
        let mut ranks = rank::longest_path(g, &nodes);
        insert_virtual_nodes(g, &mut ranks)?;

        let links = order::Links::new(g);
        let mut layers = order::init_order(&ranks, &links);
        order::reduce_crossings(&mut layers, &links, self.order_iterations);
        let crossings = order::crossings(&layers, &links);
        position::position(g, &layers, &links, self.alignment_iterations);

        tracing::debug!(
            nodes = nodes.len(),
            ranks = layers.len(),
            feedback,
            crossings,
            "base layout done"
        );
        g.set_ranks(layers)
    }
}

/// Splits every edge spanning more than one rank with a chain of bend nodes.
fn insert_virtual_nodes(g: &mut LayoutGraph, ranks: &mut HashMap<NodeId, usize>) -> Result<()> {
    for e in g.edge_ids() {
        let edge = &g[e];
        let (Some(&from), Some(&to)) = (ranks.get(&edge.source), ranks.get(&edge.target)) else {
            return Err(Error::BaseLayout {
                message: format!("edge {e} connects a node that is not laid out"),
            });
        };
        let pad = g.edge_padding(e);
        let between: Vec<usize> = if from < to {
            (from + 1..to).collect()
        } else {
            (to + 1..from).rev().collect()
        };
        for r in between {
            let vn = g.add_virtual_node(e, r)?;
            g[vn].padding = Some(Insets::new(0.0, pad, 0.0, pad));
            ranks.insert(vn, r);
        }
    }
    Ok(())
}
