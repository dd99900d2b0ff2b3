//! Coordinate assignment for an ordered layering.
//!
//! Ranks are top-aligned and stacked so that the paddings of consecutive ranks do not overlap.
//! Within a rank nodes are packed by their paddings and then pulled towards the average x of
//! their neighbours in the adjacent rank, alternating downward and upward sweeps.

use narwhal_router::Size;
use rustc_hash::FxHashMap as HashMap;

use super::order::Links;
use crate::graph::{LayoutGraph, NodeId};

pub fn position(g: &mut LayoutGraph, layers: &[Vec<NodeId>], links: &Links, iterations: usize) {
    assign_y(g, layers);

    let mut xs: HashMap<NodeId, f64> = HashMap::default();
    for layer in layers {
        let mut cursor = 0.0;
        for &v in layer {
            let x = cursor + g.padding(v).left;
            xs.insert(v, x);
            cursor = x + g[v].width + g.padding(v).right;
        }
    }

    for i in 0..iterations {
        let downward = i % 2 == 0;
        let order: Vec<usize> = if downward {
            (1..layers.len()).collect()
        } else {
            (0..layers.len().saturating_sub(1)).rev().collect()
        };
        for r in order {
            align_layer(g, &layers[r], links, downward, &mut xs);
        }
    }

    let min_x = layers
        .iter()
        .flatten()
        .map(|v| xs[v] - g.padding(*v).left)
        .fold(f64::INFINITY, f64::min);
    let shift = if min_x.is_finite() { -min_x } else { 0.0 };
    let mut width: f64 = 0.0;
    for &v in layers.iter().flatten() {
        let x = xs[&v] + shift;
        g[v].x = x;
        width = width.max(x + g[v].width + g.padding(v).right);
    }

    let height = layers
        .iter()
        .filter_map(|layer| {
            layer
                .iter()
                .map(|v| g[*v].bottom_y() + g.padding(*v).bottom)
                .reduce(f64::max)
        })
        .fold(0.0, f64::max);
    g.set_layout_size(Size::new(width, height));
}

fn assign_y(g: &mut LayoutGraph, layers: &[Vec<NodeId>]) {
    let mut y = 0.0;
    let mut previous_extent = 0.0;
    for layer in layers {
        let top = layer
            .iter()
            .map(|v| g.padding(*v).top)
            .fold(0.0, f64::max);
        y += previous_extent + top;
        let height = layer.iter().map(|v| g[*v].height).fold(0.0, f64::max);
        let bottom = layer
            .iter()
            .map(|v| g.padding(*v).bottom)
            .fold(0.0, f64::max);
        for &v in layer {
            g[v].y = y;
        }
        previous_extent = height + bottom;
    }
}

/// Minimum distance between the x of `a` and the x of `b` when `b` directly follows `a`.
fn separation(g: &LayoutGraph, a: NodeId, b: NodeId) -> f64 {
    g[a].width + g.padding(a).right + g.padding(b).left
}

fn align_layer(
    g: &LayoutGraph,
    layer: &[NodeId],
    links: &Links,
    downward: bool,
    xs: &mut HashMap<NodeId, f64>,
) {
    if layer.is_empty() {
        return;
    }
    let desired: Vec<f64> = layer
        .iter()
        .map(|&v| {
            let neighbours = if downward {
                links.up.get(&v)
            } else {
                links.down.get(&v)
            };
            let centers: Vec<f64> = neighbours
                .map(Vec::as_slice)
                .unwrap_or(&[])
                .iter()
                .filter_map(|u| xs.get(u).map(|x| x + g[*u].width / 2.0))
                .collect();
            if centers.is_empty() {
                xs[&v]
            } else {
                centers.iter().sum::<f64>() / centers.len() as f64 - g[v].width / 2.0
            }
        })
        .collect();

    let n = layer.len();
    let mut forward = desired.clone();
    for i in 1..n {
        let min = forward[i - 1] + separation(g, layer[i - 1], layer[i]);
        forward[i] = forward[i].max(min);
    }
    let mut backward = desired;
    for i in (0..n - 1).rev() {
        let max = backward[i + 1] - separation(g, layer[i], layer[i + 1]);
        backward[i] = backward[i].min(max);
    }
    for (i, &v) in layer.iter().enumerate() {
        xs.insert(v, (forward[i] + backward[i]) / 2.0);
    }
}
