//! The layout pipeline.
//!
//! `layout` is the ordered sequence of stages below. Each stage is public and takes the graph
//! by `&mut`, so callers can run or test them individually.

use narwhal_router::Size;

use crate::acyclic::{self, attach, detach};
use crate::base::BaseLayout;
use crate::error::Result;
use crate::graph::LayoutGraph;
use crate::{border, coordinate_system, endpoints, route, sizes};

pub fn layout<B: BaseLayout + ?Sized>(g: &mut LayoutGraph, base: &mut B) -> Result<()> {
    g.validate()?;
    resolve_constraints(g);
    coordinate_system::normalize(g);
    sizes::store(g);
    if let Err(err) = base.layout(g) {
        tracing::debug!(%err, "base layout failed");
        sizes::recall(g);
        coordinate_system::denormalize(g);
        cleanup(g);
        return Err(err);
    }
    sizes::recall(g);
    refresh_layout_size(g);

    acyclic::invert_feedback_edges(g);
    endpoints::assign_endpoints(g);
    border::pre_route(g);
    route::route_edges(g);
    acyclic::invert_feedback_edges(g);

    coordinate_system::denormalize(g);
    let origin = g.options().origin;
    coordinate_system::translate(g, origin.x, origin.y);
    cleanup(g);
    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        width = g.layout_size().width,
        height = g.layout_size().height,
        "layout done"
    );
    Ok(())
}

/// Re-attaches every edge that starts or ends at a border node to the border node's parent,
/// which is what the base layout ranks and routing leaves from.
pub fn resolve_constraints(g: &mut LayoutGraph) {
    let mut moved = 0usize;
    for e in g.edge_ids() {
        let (source, target) = (g[e].source, g[e].target);
        if let Some(b) = g[e].source_constraint().filter(|b| *b == source) {
            if let Some(parent) = g[b].parent() {
                detach(&mut g[b].outgoing, e);
                attach(&mut g[parent].outgoing, e);
                g[e].source = parent;
                moved += 1;
            }
        }
        if let Some(b) = g[e].target_constraint().filter(|b| *b == target) {
            if let Some(parent) = g[b].parent() {
                detach(&mut g[b].incoming, e);
                attach(&mut g[parent].incoming, e);
                g[e].target = parent;
                moved += 1;
            }
        }
    }
    tracing::debug!(moved, "resolved border node constraints");
}

/// Undoes [`resolve_constraints`]: edges configured against a border node report it as their
/// source or target again.
pub fn cleanup(g: &mut LayoutGraph) {
    for e in g.edge_ids() {
        let (source, target) = (g[e].source, g[e].target);
        if let Some(b) = g[e].source_constraint().filter(|b| *b != source) {
            detach(&mut g[source].outgoing, e);
            attach(&mut g[b].outgoing, e);
            g[e].source = b;
        }
        if let Some(b) = g[e].target_constraint().filter(|b| *b != target) {
            detach(&mut g[target].incoming, e);
            attach(&mut g[b].incoming, e);
            g[e].target = b;
        }
    }
}

/// Sets the layout size to the padded extent of the ranked nodes.
pub fn refresh_layout_size(g: &mut LayoutGraph) {
    let mut size = Size::default();
    for n in g.ranked_nodes() {
        let pad = g.padding(n);
        size.width = size.width.max(g[n].right_x() + pad.right);
        size.height = size.height.max(g[n].bottom_y() + pad.bottom);
    }
    g.set_layout_size(size);
}
