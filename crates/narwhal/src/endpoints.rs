//! Edge end point assignment.
//!
//! Incoming edges end on a node's north boundary and outgoing edges start on its south
//! boundary. Nodes without end point spacing attach every edge at their incoming/outgoing
//! offset. Nodes with spacing keep each edge at its natural x where there is room and spread
//! the rest evenly towards the corners.
//!
//! A border node whose edges all run one way is a single entry (its joint bundle) on its
//! parent's boundary; placing the entry places the border node and then its own edges. Border
//! nodes with edges both ways, without edges, or configured on a west/east flank are spread
//! along the parent's flanks instead.

use narwhal_router::Point;

use crate::border;
use crate::graph::{EdgeId, LayoutGraph, NodeId};
use crate::model::{Flow, Side};
use crate::util;

/// One slot on a node boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Edge(EdgeId),
    /// The bundle of the border node, in the flow of the list it sits in.
    Bundle(NodeId),
}

/// Assigns `start` and `end` of every edge. Nodes are visited narrowest first; ties keep
/// creation order.
pub fn assign_endpoints(g: &mut LayoutGraph) {
    for e in g.edge_ids() {
        g[e].start = None;
        g[e].end = None;
    }
    let mut order = g.ranked_nodes();
    order.sort_by(|a, b| g[*a].width.total_cmp(&g[*b].width));
    for &n in &order {
        assign_node(g, n);
    }
    tracing::debug!(nodes = order.len(), edges = g.edge_count(), "assigned edge end points");
}

fn assign_node(g: &mut LayoutGraph, n: NodeId) {
    let (incoming, outgoing, flank) = if g[n].constant_size().is_some() {
        partition(g, n)
    } else {
        let node = &g[n];
        (
            node.incoming.iter().copied().map(Entry::Edge).collect(),
            node.outgoing.iter().copied().map(Entry::Edge).collect(),
            Vec::new(),
        )
    };

    let node = &g[n];
    let spacing = node.spacing();
    let incoming_default = Point::new(node.x + node.incoming_offset(), node.y);
    let outgoing_default = Point::new(node.x + node.outgoing_offset(), node.bottom_y());

    if spacing.min_incoming > 0.0 {
        pad_entries(g, &incoming, n, Flow::Incoming);
    } else {
        for &entry in &incoming {
            set_entry_point(g, entry, Flow::Incoming, incoming_default);
        }
    }
    if spacing.min_outgoing > 0.0 {
        pad_entries(g, &outgoing, n, Flow::Outgoing);
    } else {
        for &entry in &outgoing {
            set_entry_point(g, entry, Flow::Outgoing, outgoing_default);
        }
    }
    if !flank.is_empty() {
        place_on_flanks(g, n, flank);
    }
}

/// Splits the edges of a constant-size node into boundary entries sorted by natural x, plus the
/// border nodes that go on its flanks.
fn partition(g: &LayoutGraph, n: NodeId) -> (Vec<Entry>, Vec<Entry>, Vec<NodeId>) {
    let node = &g[n];
    let mut incoming: Vec<Entry> = node
        .incoming
        .iter()
        .copied()
        .filter(|e| g[*e].target_constraint().is_none())
        .map(Entry::Edge)
        .collect();
    let mut outgoing: Vec<Entry> = node
        .outgoing
        .iter()
        .copied()
        .filter(|e| g[*e].source_constraint().is_none())
        .map(Entry::Edge)
        .collect();
    let mut flank = Vec::new();

    for &b in g.border_nodes(n) {
        let Some(border) = g[b].border() else {
            continue;
        };
        let one_way = !border.side.is_flank();
        match (border.incoming.is_empty(), border.outgoing.is_empty()) {
            (false, true) if one_way => incoming.push(Entry::Bundle(b)),
            (true, false) if one_way => outgoing.push(Entry::Bundle(b)),
            _ => flank.push(b),
        }
    }

    sort_entries(g, &mut incoming, Flow::Incoming);
    sort_entries(g, &mut outgoing, Flow::Outgoing);
    (incoming, outgoing, flank)
}

fn entry_x(g: &LayoutGraph, entry: Entry, flow: Flow) -> f64 {
    match entry {
        Entry::Edge(e) => util::bend_x(g, e, flow),
        Entry::Bundle(b) => {
            let leading = g[b].border().and_then(|bn| bn.bundle(flow).leading_edge(g));
            match leading {
                Some(e) => util::bend_x(g, e, flow),
                None => g[b].x + g[b].width / 2.0,
            }
        }
    }
}

/// Stable sort by natural x: equal positions keep their list order.
fn sort_entries(g: &LayoutGraph, entries: &mut Vec<Entry>, flow: Flow) {
    let mut keyed: Vec<(f64, Entry)> = entries
        .iter()
        .map(|en| (entry_x(g, *en, flow), *en))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    *entries = keyed.into_iter().map(|(_, en)| en).collect();
}

fn sort_edges(g: &LayoutGraph, edges: &mut Vec<EdgeId>, flow: Flow) {
    let mut keyed: Vec<(f64, EdgeId)> = edges
        .iter()
        .map(|e| (util::bend_x(g, *e, flow), *e))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    *edges = keyed.into_iter().map(|(_, e)| e).collect();
}

/// Distributes `entries` (sorted by natural x) along the `flow` boundary of node `n`, keeping
/// at least the node's minimum padding between neighbours.
///
/// From the left, the first entry whose natural x leaves at least the padding per entry up to
/// the corner is the first one kept at its natural x; symmetrically from the right. Entries
/// between the two stay straight, the others are spread evenly between the corner and the
/// nearest kept entry. When no entry can stay straight all of them are spread across the
/// whole boundary.
fn pad_entries(g: &mut LayoutGraph, entries: &[Entry], n: NodeId, flow: Flow) {
    if entries.is_empty() {
        return;
    }
    let node = &g[n];
    let (left_x, right_x) = (node.x, node.right_x());
    let (y, padding) = match flow {
        Flow::Incoming => (node.y, node.spacing().min_incoming),
        Flow::Outgoing => (node.bottom_y(), node.spacing().min_outgoing),
    };
    let xs: Vec<f64> = entries.iter().map(|en| entry_x(g, *en, flow)).collect();
    let count = entries.len();
    let inside = |x: f64| left_x < x && x < right_x;

    let left = (0..count)
        .find(|&i| inside(xs[i]) && (xs[i] - left_x) / (i + 1) as f64 >= padding)
        .unwrap_or(count);
    let right = (left..count)
        .rev()
        .find(|&i| inside(xs[i]) && (right_x - xs[i]) / (count - i) as f64 >= padding);

    match right {
        Some(right) => {
            tracing::trace!(node = %n, ?flow, left, right, count, "kept edges straight");
            spread(
                g,
                &entries[..left],
                Point::new(left_x, y),
                Point::new(xs[left], y),
                flow,
            );
            spread(
                g,
                &entries[right + 1..],
                Point::new(xs[right], y),
                Point::new(right_x, y),
                flow,
            );
            for (&entry, &x) in entries[left..=right].iter().zip(&xs[left..=right]) {
                set_entry_point(g, entry, flow, Point::new(x, y));
            }
        }
        None => {
            tracing::trace!(node = %n, ?flow, count, "spread all edges");
            spread(g, entries, Point::new(left_x, y), Point::new(right_x, y), flow);
        }
    }
}

/// Places `entries` at equal intervals strictly between `from` and `to`.
fn spread(g: &mut LayoutGraph, entries: &[Entry], from: Point, to: Point, flow: Flow) {
    let pieces = (entries.len() + 1) as f64;
    for (i, &entry) in entries.iter().enumerate() {
        let p = from.lerp(to, (i + 1) as f64 / pieces);
        set_entry_point(g, entry, flow, p);
    }
}

fn set_entry_point(g: &mut LayoutGraph, entry: Entry, flow: Flow, p: Point) {
    match (entry, flow) {
        (Entry::Edge(e), Flow::Incoming) => g[e].end = Some(p),
        (Entry::Edge(e), Flow::Outgoing) => g[e].start = Some(p),
        (Entry::Bundle(b), _) => {
            border::set_point(g, b, p);
            assign_border_node(g, b);
        }
    }
}

/// Spreads border nodes along the west and east flanks of `n` and assigns their edges.
///
/// Nodes with fewer edges come first. West- and east-configured nodes keep their flank, the
/// others alternate west, east. Within a flank nodes are ordered by outgoing minus incoming
/// edge count, top to bottom.
fn place_on_flanks(g: &mut LayoutGraph, n: NodeId, mut border_nodes: Vec<NodeId>) {
    border_nodes.sort_by_key(|b| {
        let (i, o) = edge_counts(g, *b);
        i + o
    });

    let mut west = Vec::new();
    let mut east = Vec::new();
    let mut next_west = true;
    for b in border_nodes {
        match g[b].border().map(|bn| bn.side) {
            Some(Side::West) => west.push(b),
            Some(Side::East) => east.push(b),
            _ => {
                if next_west {
                    west.push(b);
                } else {
                    east.push(b);
                }
                next_west = !next_west;
            }
        }
    }

    let bounds = g[n].bounds();
    for (flank, x) in [(west, bounds.x), (east, bounds.right())] {
        let mut flank = flank;
        flank.sort_by_key(|b| {
            let (i, o) = edge_counts(g, *b);
            o - i
        });
        let pieces = (flank.len() + 1) as f64;
        for (i, &b) in flank.iter().enumerate() {
            let y = bounds.y + bounds.height * (i + 1) as f64 / pieces;
            border::set_point(g, b, Point::new(x, y));
        }
        for &b in &flank {
            if g[b].border().is_some_and(|bn| bn.edge_count() > 0) {
                assign_border_node(g, b);
            }
        }
    }
}

fn edge_counts(g: &LayoutGraph, b: NodeId) -> (i64, i64) {
    g[b].border()
        .map(|bn| (bn.incoming.len() as i64, bn.outgoing.len() as i64))
        .unwrap_or((0, 0))
}

/// Assigns end points of the edges of border node `b`, which must already be placed.
fn assign_border_node(g: &mut LayoutGraph, b: NodeId) {
    for flow in [Flow::Incoming, Flow::Outgoing] {
        let Some(mut edges) = g[b].border().map(|bn| bn.bundle(flow).edges.clone()) else {
            return;
        };
        sort_edges(g, &mut edges, flow);
        if let Some(bn) = g[b].border_mut() {
            bn.bundle_mut(flow).edges = edges;
        }
    }

    let node = &g[b];
    let Some(bn) = node.border() else {
        return;
    };
    let incoming: Vec<Entry> = bn.incoming.edges.iter().copied().map(Entry::Edge).collect();
    let outgoing: Vec<Entry> = bn.outgoing.edges.iter().copied().map(Entry::Edge).collect();
    let default = border::default_endpoint(node).unwrap_or(Point::new(node.x, node.y));
    let side = bn.side;
    let rect = node.bounds();

    if !bn.spacing.any() {
        assign_all(g, &incoming, &outgoing, default);
        return;
    }
    match side {
        Side::North => {
            pad_entries(g, &incoming, b, Flow::Incoming);
            assign_all(g, &[], &outgoing, default);
        }
        Side::South => {
            pad_entries(g, &outgoing, b, Flow::Outgoing);
            assign_all(g, &incoming, &[], default);
        }
        Side::West | Side::East => {
            // Incoming edges take the upper share of the flank, outgoing edges the lower one.
            let n_in = incoming.len() as f64;
            let total = n_in + outgoing.len() as f64 + 1.0;
            let incoming_low = rect.y + (n_in + 1.0) * rect.height / total;
            let outgoing_high = rect.y + n_in * rect.height / total;
            let (incoming_from, incoming_to, outgoing_from, outgoing_to) = if side == Side::West {
                (
                    Point::new(rect.x, incoming_low),
                    Point::new(rect.x, rect.y),
                    Point::new(rect.x, outgoing_high),
                    Point::new(rect.x, rect.bottom()),
                )
            } else {
                (
                    Point::new(rect.right(), rect.y),
                    Point::new(rect.right(), incoming_low),
                    Point::new(rect.right(), rect.bottom()),
                    Point::new(rect.right(), outgoing_high),
                )
            };
            spread(g, &incoming, incoming_from, incoming_to, Flow::Incoming);
            spread(g, &outgoing, outgoing_from, outgoing_to, Flow::Outgoing);
        }
    }
    tracing::trace!(node = %b, ?side, "assigned border node edges");
}

fn assign_all(g: &mut LayoutGraph, incoming: &[Entry], outgoing: &[Entry], p: Point) {
    for &entry in incoming {
        set_entry_point(g, entry, Flow::Incoming, p);
    }
    for &entry in outgoing {
        set_entry_point(g, entry, Flow::Outgoing, p);
    }
}
