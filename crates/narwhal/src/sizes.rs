//! Keeps constant-size nodes at the size the caller gave them while the base layout runs.

use crate::graph::{LayoutGraph, NodeKind};

/// Snapshots the size of every constant-size node and border node.
pub fn store(g: &mut LayoutGraph) {
    for id in g.node_ids() {
        let n = &mut g[id];
        let (width, height) = (n.width, n.height);
        match &mut n.kind {
            NodeKind::ConstantSize(c) => {
                c.constant_width = width;
                c.constant_height = height;
            }
            NodeKind::Border(b) => {
                b.constant_width = width;
                b.constant_height = height;
            }
            NodeKind::Plain | NodeKind::Virtual(_) => {}
        }
    }
}

/// Writes the snapshot taken by [`store`] back.
pub fn recall(g: &mut LayoutGraph) {
    for id in g.node_ids() {
        let n = &mut g[id];
        let size = match &n.kind {
            NodeKind::ConstantSize(c) => Some((c.constant_width, c.constant_height)),
            NodeKind::Border(b) => Some((b.constant_width, b.constant_height)),
            NodeKind::Plain | NodeKind::Virtual(_) => None,
        };
        if let Some((width, height)) = size {
            n.width = width;
            n.height = height;
        }
    }
}
