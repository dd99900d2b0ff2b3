//! Coordinate frame helpers.
//!
//! Every pass of the engine assumes ranks stacked top to bottom. Other directions are handled
//! by transposing and/or mirroring the whole graph before the passes and undoing it after.
//! Both transforms are involutions.

use narwhal_router::Point;

use crate::graph::{Edge, LayoutGraph, NodeKind};

/// Brings the graph from the caller's frame into the downward frame.
pub fn normalize(g: &mut LayoutGraph) {
    let direction = g.options().direction;
    if direction.is_transposed() {
        transpose(g);
    }
    if direction.is_mirrored() {
        mirror(g);
    }
}

/// Inverse of [`normalize`].
pub fn denormalize(g: &mut LayoutGraph) {
    let direction = g.options().direction;
    if direction.is_mirrored() {
        mirror(g);
    }
    if direction.is_transposed() {
        transpose(g);
    }
    tracing::debug!(?direction, "restored caller coordinate frame");
}

/// Swaps the axes of every node, border node, bend node and edge point.
pub fn transpose(g: &mut LayoutGraph) {
    for id in g.node_ids() {
        let n = &mut g[id];
        (n.x, n.y) = (n.y, n.x);
        (n.width, n.height) = (n.height, n.width);
        n.padding = n.padding.map(|p| p.transposed());
        match &mut n.kind {
            NodeKind::ConstantSize(c) => {
                (c.constant_width, c.constant_height) = (c.constant_height, c.constant_width);
            }
            NodeKind::Border(b) => {
                (b.constant_width, b.constant_height) = (b.constant_height, b.constant_width);
                b.side = b.side.transposed();
            }
            NodeKind::Plain | NodeKind::Virtual(_) => {}
        }
    }
    for id in g.edge_ids() {
        map_points(&mut g[id], Point::transposed);
    }
    let size = g.layout_size().transposed();
    g.set_layout_size(size);
    let options = g.options_mut();
    options.default_padding = options.default_padding.transposed();
}

/// Reflects the graph across the horizontal middle line of the layout area.
pub fn mirror(g: &mut LayoutGraph) {
    let height = g.layout_size().height;
    for id in g.node_ids() {
        let n = &mut g[id];
        n.y = height - n.y - n.height;
        n.padding = n.padding.map(|p| p.flipped_vertically());
        if let NodeKind::Border(b) = &mut n.kind {
            b.side = b.side.flipped_vertically();
        }
    }
    for id in g.edge_ids() {
        map_points(&mut g[id], |p| Point::new(p.x, height - p.y));
    }
    let options = g.options_mut();
    options.default_padding = options.default_padding.flipped_vertically();
}

/// Shifts every node and edge point by `(dx, dy)`.
pub fn translate(g: &mut LayoutGraph, dx: f64, dy: f64) {
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    for id in g.node_ids() {
        let n = &mut g[id];
        n.x += dx;
        n.y += dy;
    }
    for id in g.edge_ids() {
        map_points(&mut g[id], |p| p.translated(dx, dy));
    }
}

fn map_points(e: &mut Edge, f: impl Fn(Point) -> Point) {
    e.start = e.start.map(&f);
    e.end = e.end.map(&f);
    for p in &mut e.points {
        *p = f(*p);
    }
    if let Some(c) = e.constraint_mut() {
        for p in c
            .starting_routed_points
            .iter_mut()
            .chain(c.ending_routed_points.iter_mut())
        {
            *p = f(*p);
        }
    }
}
