//! Edge routing.
//!
//! Oblique edges are routed with the shortest-path router. Obstacles are the same-rank
//! neighbours of every bend node (and of a source shorter than its rank), stretched by
//! `obstacle_extent` away from the edge so the path cannot leave the gap it was given. Edges
//! that leave a node towards a neighbour's side are routed in a fan: each one gets an obstacle
//! that grows from the neighbour towards the node, so consecutive edges nest instead of
//! crossing.
//!
//! Orthogonal edges jog halfway between ranks wherever the next bend is at a different x.

use narwhal_router::{Point, Rect, ShortestPathRouter};

use crate::graph::{EdgeId, LayoutGraph, NodeId};
use crate::util;

pub fn route_edges(g: &mut LayoutGraph) {
    let nodes = g.ranked_nodes();
    for &n in &nodes {
        route_from_node(g, n);
    }
    tracing::debug!(nodes = nodes.len(), edges = g.edge_count(), "routed edges");
}

fn route_from_node(g: &mut LayoutGraph, n: NodeId) {
    let rank_height = util::rank_height(g, n);
    let node = &g[n];
    let median = node.x + node.outgoing_offset();
    let (has_left, has_right) = (node.left.is_some(), node.right.is_some());

    let mut left_edges: Vec<(f64, EdgeId)> = Vec::new();
    let mut right_edges: Vec<(f64, EdgeId)> = Vec::new();
    let mut straight: Vec<EdgeId> = Vec::new();
    for &e in &node.outgoing {
        let edge = &g[e];
        // Only a node shorter than its rank has room below it where the edge could cut across a
        // neighbour's column; stubbed edges already left the node.
        if rank_height != node.height && edge.starting_routed_points().is_empty() {
            // The first bend node, or the assigned end point of a single-rank edge.
            let guide_x = match edge.vnodes.first() {
                Some(&vn) => g[vn].x + g[vn].incoming_offset(),
                None => edge.end.map_or_else(|| default_end(g, e).x, |end| end.x),
            };
            if has_left && guide_x < median {
                left_edges.push((guide_x, e));
                continue;
            }
            if has_right && guide_x > median {
                right_edges.push((guide_x, e));
                continue;
            }
        }
        straight.push(e);
    }

    for e in straight {
        route_edge(g, e, None);
    }
    left_edges.sort_by(|a, b| a.0.total_cmp(&b.0));
    right_edges.sort_by(|a, b| b.0.total_cmp(&a.0));
    route_left_edges(g, n, &left_edges, rank_height);
    route_right_edges(g, n, &right_edges, rank_height);
}

/// Routes edges heading to the left of `n`, farthest first.
fn route_left_edges(g: &mut LayoutGraph, n: NodeId, edges: &[(f64, EdgeId)], rank_height: f64) {
    let Some(left) = g[n].left else {
        return;
    };
    let (extent, min_extent) = obstacle_extents(g);
    let median = g[n].x + g[n].outgoing_offset();
    let top = g[left].y;
    let mut obstacle_x = g[left].right_x() + g.padding(left).right;
    let count = edges.len();
    for (i, &(_, e)) in edges.iter().enumerate() {
        let (start, _) = ensure_endpoints(g, e);
        if g[e].is_orthogonal() {
            route_edge(g, e, None);
            obstacle_x = start.x;
            continue;
        }
        let offset = g
            .edge_padding(e)
            .min((obstacle_x - median).abs() / (count + 1 - i) as f64);
        obstacle_x = (obstacle_x + offset).min(start.x - 1.0);
        let width = obstacle_x.max(extent);
        let height = rank_height.max(min_extent);
        route_edge(g, e, Some(Rect::new(obstacle_x - width, top, width, height)));
    }
}

/// Routes edges heading to the right of `n`, farthest first.
fn route_right_edges(g: &mut LayoutGraph, n: NodeId, edges: &[(f64, EdgeId)], rank_height: f64) {
    let Some(right) = g[n].right else {
        return;
    };
    let (extent, min_extent) = obstacle_extents(g);
    let median = g[n].x + g[n].outgoing_offset();
    let top = g[right].y;
    let layout_width = g.layout_size().width;
    let mut obstacle_x = g[right].x - g.padding(right).left;
    let count = edges.len();
    for (i, &(_, e)) in edges.iter().enumerate() {
        let (start, _) = ensure_endpoints(g, e);
        if g[e].is_orthogonal() {
            route_edge(g, e, None);
            obstacle_x = start.x;
            continue;
        }
        let offset = g
            .edge_padding(e)
            .min((obstacle_x - median).abs() / (count + 1 - i) as f64);
        obstacle_x = (obstacle_x - offset).max(start.x + 1.0);
        let width = (layout_width - obstacle_x).max(extent);
        let height = rank_height.max(min_extent);
        route_edge(g, e, Some(Rect::new(obstacle_x, top, width, height)));
    }
}

/// Routes a single edge, replacing its polyline.
pub fn route_edge(g: &mut LayoutGraph, e: EdgeId, extra_obstacle: Option<Rect>) {
    ensure_endpoints(g, e);
    let mut points = if g[e].is_orthogonal() {
        orthogonal_path(g, e)
    } else {
        oblique_path(g, e, extra_obstacle)
    };
    points.dedup();
    tracing::trace!(edge = %e, points = points.len(), "routed edge");
    g[e].points = points;
}

fn oblique_path(g: &LayoutGraph, e: EdgeId, extra_obstacle: Option<Rect>) -> Vec<Point> {
    let edge = &g[e];
    let starting = edge.starting_routed_points();
    let ending = edge.ending_routed_points();
    let (start, end) = path_ends(g, e);
    let padding = g.edge_padding(e);

    let mut router = ShortestPathRouter::new();
    if let Some(r) = extra_obstacle {
        router.add_obstacle(r);
    }
    let source = &g[edge.source];
    if starting.is_empty() && util::rank_height(g, edge.source) > source.height {
        // The part of the source's rank below it belongs to its neighbours.
        let left = source
            .left
            .map(|l| (l, (g[l].right_x() + g.padding(l).right).min(start.x)));
        let right = source
            .right
            .map(|r| (r, (g[r].x - g.padding(r).left).max(start.x)));
        add_rank_obstacles(&mut router, g, edge.source, left, right);
    }
    for &vn in &edge.vnodes {
        let left = g[vn]
            .left
            .map(|l| (l, g[l].right_x() + g.padding(l).right + padding));
        let right = g[vn]
            .right
            .map(|r| (r, g[r].x - g.padding(r).left - padding));
        // Neighbours packed tighter than the padding still leave a line through the bend node.
        let (left, right) = match (left, right) {
            (Some((l, inner_l)), Some((r, inner_r))) if inner_l > inner_r => {
                let center = g[vn].x + g[vn].width / 2.0;
                (Some((l, center)), Some((r, center)))
            }
            bounds => bounds,
        };
        add_rank_obstacles(&mut router, g, vn, left, right);
    }

    let mut points = Vec::new();
    if let Some((_, head)) = starting.split_last() {
        points.extend_from_slice(head);
    }
    points.extend(router.route(start, end));
    if let Some((_, tail)) = ending.split_first() {
        points.extend_from_slice(tail);
    }
    points
}

/// Blocks `n`'s rank slice left of the left inner edge and right of the right inner edge.
/// Each obstacle reaches at least `obstacle_extent` away from the corridor.
fn add_rank_obstacles(
    router: &mut ShortestPathRouter,
    g: &LayoutGraph,
    n: NodeId,
    left: Option<(NodeId, f64)>,
    right: Option<(NodeId, f64)>,
) {
    let (extent, min_extent) = obstacle_extents(g);
    let height = util::rank_height(g, n).max(min_extent);
    if let Some((l, inner)) = left {
        let width = inner.max(extent);
        router.add_obstacle(Rect::new(inner - width, g[l].y, width, height));
    }
    if let Some((r, inner)) = right {
        let width = (g.layout_size().width - inner).max(extent);
        router.add_obstacle(Rect::new(inner, g[r].y, width, height));
    }
}

fn orthogonal_path(g: &LayoutGraph, e: EdgeId) -> Vec<Point> {
    let edge = &g[e];
    let starting = edge.starting_routed_points();
    let ending = edge.ending_routed_points();
    let (start, end) = path_ends(g, e);

    let mut points: Vec<Point> = if starting.is_empty() {
        vec![start]
    } else {
        starting.to_vec()
    };
    let mut cursor = start;
    let mut previous = edge.source;
    for &vn in &edge.vnodes {
        let v = &g[vn];
        let next_x = v.x + v.width / 2.0;
        if cursor.x != next_x {
            let mid_y = mid_y(g, previous, v.y);
            points.push(Point::new(cursor.x, mid_y));
            points.push(Point::new(next_x, mid_y));
            cursor = Point::new(next_x, mid_y);
        }
        previous = vn;
    }
    if cursor.x != end.x {
        let mid_y = mid_y(g, previous, end.y);
        points.push(Point::new(cursor.x, mid_y));
        points.push(Point::new(end.x, mid_y));
    }
    if ending.is_empty() {
        points.push(end);
    } else {
        points.extend_from_slice(ending);
    }
    points
}

/// Halfway between the bottom of `above`'s rank and `y`.
fn mid_y(g: &LayoutGraph, above: NodeId, y: f64) -> f64 {
    let rank_bottom = g[above].y + util::rank_height(g, above);
    rank_bottom + (y - rank_bottom) / 2.0
}

/// Where routing starts and ends: the inner ends of the stubs, or the end points themselves.
fn path_ends(g: &LayoutGraph, e: EdgeId) -> (Point, Point) {
    let edge = &g[e];
    let start = edge
        .starting_routed_points()
        .last()
        .copied()
        .or(edge.start)
        .unwrap_or_else(|| default_start(g, e));
    let end = edge
        .ending_routed_points()
        .first()
        .copied()
        .or(edge.end)
        .unwrap_or_else(|| default_end(g, e));
    (start, end)
}

/// Fills in `start`/`end` with the default attachment points when they are missing.
fn ensure_endpoints(g: &mut LayoutGraph, e: EdgeId) -> (Point, Point) {
    let (start, end) = (g[e].start, g[e].end);
    let start = start.unwrap_or_else(|| default_start(g, e));
    let end = end.unwrap_or_else(|| default_end(g, e));
    g[e].start = Some(start);
    g[e].end = Some(end);
    (start, end)
}

fn default_start(g: &LayoutGraph, e: EdgeId) -> Point {
    let s = &g[g[e].source];
    Point::new(s.x + s.outgoing_offset(), s.bottom_y())
}

fn default_end(g: &LayoutGraph, e: EdgeId) -> Point {
    let t = &g[g[e].target];
    Point::new(t.x + t.incoming_offset(), t.y)
}

fn obstacle_extents(g: &LayoutGraph) -> (f64, f64) {
    let opts = g.options();
    (opts.obstacle_extent, opts.min_obstacle_extent)
}
