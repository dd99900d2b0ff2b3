//! Feedback edge inversion.
//!
//! The base layout flags edges that point against the rank order. The engine flips them so
//! every pass sees edges running downwards, then flips them back once routing is done.

use crate::graph::{EdgeId, LayoutGraph, NodeId};
use crate::model::Flow;

pub fn invert_feedback_edges(g: &mut LayoutGraph) {
    let feedback: Vec<EdgeId> = g.edges().filter(|(_, e)| e.feedback).map(|(id, _)| id).collect();
    for &e in &feedback {
        invert_edge(g, e);
    }
    tracing::debug!(count = feedback.len(), "inverted feedback edges");
}

/// Reverses `e` in place: endpoints, end points, polyline, bend nodes, stubs and border node
/// constraints. Node edge lists and joint bundles follow. Applying it twice restores the edge.
pub fn invert_edge(g: &mut LayoutGraph, e: EdgeId) {
    let (source, target) = (g[e].source, g[e].target);
    detach(&mut g[source].outgoing, e);
    detach(&mut g[target].incoming, e);

    let edge = &mut g[e];
    std::mem::swap(&mut edge.source, &mut edge.target);
    std::mem::swap(&mut edge.start, &mut edge.end);
    edge.points.reverse();
    edge.vnodes.reverse();
    let (source_border, target_border) = match edge.constraint_mut() {
        Some(c) => {
            let old = (c.source, c.target);
            std::mem::swap(&mut c.source, &mut c.target);
            std::mem::swap(&mut c.starting_routed_points, &mut c.ending_routed_points);
            c.starting_routed_points.reverse();
            c.ending_routed_points.reverse();
            old
        }
        None => (None, None),
    };

    attach(&mut g[target].outgoing, e);
    attach(&mut g[source].incoming, e);
    if let Some(b) = source_border {
        move_between_bundles(g, b, e, Flow::Outgoing, Flow::Incoming);
    }
    if let Some(b) = target_border {
        move_between_bundles(g, b, e, Flow::Incoming, Flow::Outgoing);
    }
    tracing::trace!(edge = %e, "inverted edge");
}

fn move_between_bundles(g: &mut LayoutGraph, border: NodeId, e: EdgeId, from: Flow, to: Flow) {
    if let Some(b) = g[border].border_mut() {
        detach(&mut b.bundle_mut(from).edges, e);
        attach(&mut b.bundle_mut(to).edges, e);
    }
}

pub(crate) fn detach(list: &mut Vec<EdgeId>, e: EdgeId) {
    list.retain(|x| *x != e);
}

/// Inserts keeping creation order where the list is still in creation order.
pub(crate) fn attach(list: &mut Vec<EdgeId>, e: EdgeId) {
    let pos = list.partition_point(|x| *x < e);
    list.insert(pos, e);
}
