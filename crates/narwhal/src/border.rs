//! Border node placement and the stubs that lead their edges around the parent.

use narwhal_router::Point;

use crate::graph::{EdgeId, LayoutGraph, Node, NodeId};
use crate::model::Side;

/// Moves border node `b` so that its reference point is `p`.
///
/// The side is re-derived from the parent edge closest to `p` (ties keep the current side),
/// and the node is offset so that `outside_ratio` of its extent across that side lies outside
/// the parent.
pub fn set_point(g: &mut LayoutGraph, b: NodeId, p: Point) {
    let Some(parent) = g[b].parent() else {
        return;
    };
    let parent_bounds = g[parent].bounds();
    let n = &mut g[b];
    let (w, h) = (n.width, n.height);
    let Some(border) = n.border_mut() else {
        return;
    };
    border.side = Side::locate(&parent_bounds, p, border.side);
    let (side, r) = (border.side, border.outside_ratio);
    let (x, y) = match side {
        Side::North => (p.x - w / 2.0, p.y - h * r),
        Side::South => (p.x - w / 2.0, p.y - h * (1.0 - r)),
        Side::West => (p.x - w * r, p.y - h / 2.0),
        Side::East => (p.x - w * (1.0 - r), p.y - h / 2.0),
    };
    n.x = x;
    n.y = y;
    tracing::trace!(node = %b, ?side, x, y, "placed border node");
}

/// The point on the parent's perimeter a border node is attached at.
pub fn anchor(node: &Node) -> Option<Point> {
    let b = node.border()?;
    let (w, h, r) = (node.width, node.height, b.outside_ratio);
    Some(match b.side {
        Side::North => Point::new(node.x + w / 2.0, node.y + h * r),
        Side::South => Point::new(node.x + w / 2.0, node.y + h * (1.0 - r)),
        Side::West => Point::new(node.x + w * r, node.y + h / 2.0),
        Side::East => Point::new(node.x + w * (1.0 - r), node.y + h / 2.0),
    })
}

/// Where edges of a border node without end point spacing attach: the middle of its outer face.
pub fn default_endpoint(node: &Node) -> Option<Point> {
    let b = node.border()?;
    let (x, y, w, h) = (node.x, node.y, node.width, node.height);
    Some(match b.side {
        Side::North => Point::new(x + w / 2.0, y),
        Side::South => Point::new(x + w / 2.0, y + h),
        Side::West => Point::new(x, y + h / 2.0),
        Side::East => Point::new(x + w, y + h / 2.0),
    })
}

/// Gives edges of border nodes on a west or east flank a stub that leads them out of the flank
/// and along the parent to its bottom (outgoing) or from its top (incoming), where routing
/// takes over.
///
/// The stubs of one flank nest: each further edge steps out by its edge padding. Outgoing
/// stubs starting lower sit further in; incoming stubs ending higher sit further in.
pub fn pre_route(g: &mut LayoutGraph) {
    let mut stubs = 0usize;
    for parent in g.layout_nodes() {
        for side in [Side::West, Side::East] {
            let on_flank: Vec<NodeId> = g
                .border_nodes(parent)
                .iter()
                .copied()
                .filter(|b| g[*b].border().is_some_and(|bn| bn.side == side))
                .collect();
            if on_flank.is_empty() {
                continue;
            }
            stubs += route_outgoing_stubs(g, parent, &on_flank, side);
            stubs += route_incoming_stubs(g, parent, &on_flank, side);
        }
    }
    tracing::debug!(stubs, "pre-routed border stubs");
}

fn route_outgoing_stubs(
    g: &mut LayoutGraph,
    parent: NodeId,
    flank: &[NodeId],
    side: Side,
) -> usize {
    let mut edges: Vec<(EdgeId, Point)> = flank
        .iter()
        .filter_map(|b| g[*b].border())
        .flat_map(|b| b.outgoing.edges.iter().copied())
        .filter_map(|e| g[e].start.map(|p| (e, p)))
        .collect();
    edges.sort_by(|a, b| b.1.y.total_cmp(&a.1.y));

    let dir = outward(side);
    let bottom = g[parent].bottom_y();
    let mut gap = 0.0;
    for &(e, start) in &edges {
        gap += g.edge_padding(e);
        let x = start.x + dir * gap;
        if let Some(c) = g[e].constraint_mut() {
            c.starting_routed_points = vec![start, Point::new(x, start.y), Point::new(x, bottom)];
        }
    }
    edges.len()
}

fn route_incoming_stubs(
    g: &mut LayoutGraph,
    parent: NodeId,
    flank: &[NodeId],
    side: Side,
) -> usize {
    let mut edges: Vec<(EdgeId, Point)> = flank
        .iter()
        .filter_map(|b| g[*b].border())
        .flat_map(|b| b.incoming.edges.iter().copied())
        .filter_map(|e| g[e].end.map(|p| (e, p)))
        .collect();
    edges.sort_by(|a, b| a.1.y.total_cmp(&b.1.y));

    let dir = outward(side);
    let top = g[parent].y;
    let mut gap = 0.0;
    for &(e, end) in &edges {
        gap += g.edge_padding(e);
        let x = end.x + dir * gap;
        if let Some(c) = g[e].constraint_mut() {
            c.ending_routed_points = vec![Point::new(x, top), Point::new(x, end.y), end];
        }
    }
    edges.len()
}

fn outward(side: Side) -> f64 {
    match side {
        Side::West => -1.0,
        _ => 1.0,
    }
}
