//! Geometric queries shared by endpoint assignment and routing.

use crate::graph::{EdgeId, LayoutGraph, NodeId};
use crate::model::Flow;

/// Natural x of an edge on the boundary given by `flow`: where it would attach if nothing
/// else competed for space there.
pub fn bend_x(g: &LayoutGraph, e: EdgeId, flow: Flow) -> f64 {
    match flow {
        Flow::Outgoing => outgoing_bend_x(g, e),
        Flow::Incoming => incoming_bend_x(g, e),
    }
}

/// Natural x at which `e` leaves its source: the x of the straightest line through the gaps
/// its bend nodes occupy, or the target attachment when it spans a single rank.
pub fn outgoing_bend_x(g: &LayoutGraph, e: EdgeId) -> f64 {
    let edge = &g[e];
    let Some(&first) = edge.vnodes.first() else {
        if let Some(end) = edge.end {
            return end.x;
        }
        let source = &g[edge.source];
        let target = &g[edge.target];
        let source_x = source.x + source.outgoing_offset();
        if target.spacing().min_incoming > 0.0 && target.x < source_x && source_x < target.right_x()
        {
            return source_x;
        }
        return target.x + target.incoming_offset();
    };
    if edge.is_orthogonal() {
        let vn = &g[first];
        return vn.x + vn.incoming_offset();
    }
    let target_x = match edge.end {
        Some(end) => end.x,
        None => {
            let t = &g[edge.target];
            t.x + t.incoming_offset()
        }
    };
    clamp_to_corridor(g, e, target_x)
}

/// Natural x at which `e` enters its target. Mirror image of [`outgoing_bend_x`].
pub fn incoming_bend_x(g: &LayoutGraph, e: EdgeId) -> f64 {
    let edge = &g[e];
    let Some(&last) = edge.vnodes.last() else {
        if let Some(start) = edge.start {
            return start.x;
        }
        let source = &g[edge.source];
        let target = &g[edge.target];
        let target_x = target.x + target.incoming_offset();
        if source.spacing().min_outgoing > 0.0 && source.x < target_x && target_x < source.right_x()
        {
            return target_x;
        }
        return source.x + source.outgoing_offset();
    };
    if edge.is_orthogonal() {
        let vn = &g[last];
        return vn.x + vn.outgoing_offset();
    }
    let source_x = match edge.start {
        Some(start) => start.x,
        None => {
            let s = &g[edge.source];
            s.x + s.outgoing_offset()
        }
    };
    clamp_to_corridor(g, e, source_x)
}

/// Clamps `x` into the intersection of the gaps between each bend node's neighbours. When the
/// gaps do not overlap the bound of the last consistent intersection wins.
fn clamp_to_corridor(g: &LayoutGraph, e: EdgeId, x: f64) -> f64 {
    let mut left = f64::NEG_INFINITY;
    let mut right = f64::INFINITY;
    for &vn in g[e].vnodes.iter().rev() {
        let (gap_left, gap_right) = gap(g, vn, e);
        if gap_left > right {
            return right;
        }
        if gap_right < left {
            return left;
        }
        left = left.max(gap_left);
        right = right.min(gap_right);
    }
    if x > right {
        right
    } else if x < left {
        left
    } else {
        x
    }
}

/// Horizontal room an edge has at one of its bend nodes.
fn gap(g: &LayoutGraph, vn: NodeId, e: EdgeId) -> (f64, f64) {
    let pad = g.edge_padding(e);
    let node = &g[vn];
    let left = match node.left {
        Some(l) => g[l].right_x() + g.padding(l).right + pad - 1.0,
        None => 0.0,
    };
    let right = match node.right {
        Some(r) => g[r].x - g.padding(r).left - pad + 1.0,
        None => g.layout_size().width,
    };
    (left, right)
}

/// Height of the tallest node in `n`'s rank, or `n`'s own height when it is not ranked.
pub fn rank_height(g: &LayoutGraph, n: NodeId) -> f64 {
    match g.rank_of(n) {
        Some(rank) if !rank.is_empty() => rank
            .iter()
            .map(|id| g[*id].height)
            .fold(f64::NEG_INFINITY, f64::max),
        _ => g[n].height,
    }
}
