//! Ordering within ranks: depth-first initial order refined by barycenter sweeps.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::graph::{LayoutGraph, NodeId};

/// Adjacency between consecutive ranks. Every edge contributes its chain of bend nodes, oriented
/// downwards.
#[derive(Debug, Default)]
pub struct Links {
    pub up: HashMap<NodeId, Vec<NodeId>>,
    pub down: HashMap<NodeId, Vec<NodeId>>,
}

impl Links {
    pub fn new(g: &LayoutGraph) -> Self {
        let mut links = Self::default();
        for (_, e) in g.edges() {
            let mut chain = Vec::with_capacity(e.vnodes.len() + 2);
            chain.push(e.source);
            chain.extend(e.vnodes.iter().copied());
            chain.push(e.target);
            if e.feedback {
                chain.reverse();
            }
            for pair in chain.windows(2) {
                links.down.entry(pair[0]).or_default().push(pair[1]);
                links.up.entry(pair[1]).or_default().push(pair[0]);
            }
        }
        links
    }

    fn neighbors(&self, v: NodeId, downward: bool) -> &[NodeId] {
        let map = if downward { &self.up } else { &self.down };
        map.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub fn init_order(ranks: &HashMap<NodeId, usize>, links: &Links) -> Vec<Vec<NodeId>> {
    fn dfs(
        v: NodeId,
        ranks: &HashMap<NodeId, usize>,
        links: &Links,
        visited: &mut HashSet<NodeId>,
        layers: &mut [Vec<NodeId>],
    ) {
        if !visited.insert(v) {
            return;
        }
        let Some(&rank) = ranks.get(&v) else {
            return;
        };
        if let Some(layer) = layers.get_mut(rank) {
            layer.push(v);
        }
        for &w in links.down.get(&v).map(Vec::as_slice).unwrap_or(&[]) {
            dfs(w, ranks, links, visited, layers);
        }
    }

    let Some(max_rank) = ranks.values().copied().max() else {
        return Vec::new();
    };
    let mut layers = vec![Vec::new(); max_rank + 1];
    let mut ordered: Vec<NodeId> = ranks.keys().copied().collect();
    ordered.sort_by_key(|v| (ranks[v], *v));
    let mut visited = HashSet::default();
    for v in ordered {
        dfs(v, ranks, links, &mut visited, &mut layers);
    }
    layers
}

/// Alternates downward and upward barycenter sweeps, keeping the order with the fewest
/// crossings seen.
pub fn reduce_crossings(layers: &mut Vec<Vec<NodeId>>, links: &Links, iterations: usize) {
    let mut best = layers.clone();
    let mut best_crossings = crossings(layers, links);
    for i in 0..iterations {
        if best_crossings == 0 {
            break;
        }
        sweep(layers, links, i % 2 == 0);
        let c = crossings(layers, links);
        if c < best_crossings {
            best_crossings = c;
            best = layers.clone();
        }
    }
    *layers = best;
}

fn sweep(layers: &mut [Vec<NodeId>], links: &Links, downward: bool) {
    let len = layers.len();
    if len < 2 {
        return;
    }
    let order: Vec<usize> = if downward {
        (1..len).collect()
    } else {
        (0..len - 1).rev().collect()
    };
    for r in order {
        let fixed = if downward { r - 1 } else { r + 1 };
        let position: HashMap<NodeId, usize> = layers[fixed]
            .iter()
            .enumerate()
            .map(|(i, v)| (*v, i))
            .collect();
        let mut keyed: Vec<(f64, NodeId)> = layers[r]
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let ps: Vec<usize> = links
                    .neighbors(v, downward)
                    .iter()
                    .filter_map(|u| position.get(u).copied())
                    .collect();
                if ps.is_empty() {
                    (i as f64, v)
                } else {
                    (ps.iter().sum::<usize>() as f64 / ps.len() as f64, v)
                }
            })
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        layers[r] = keyed.into_iter().map(|(_, v)| v).collect();
    }
}

/// Number of pairwise crossings between the links of every two consecutive ranks.
pub fn crossings(layers: &[Vec<NodeId>], links: &Links) -> usize {
    let mut total = 0;
    for pair in layers.windows(2) {
        let lower: HashMap<NodeId, usize> =
            pair[1].iter().enumerate().map(|(i, v)| (*v, i)).collect();
        let mut segments: Vec<(usize, usize)> = Vec::new();
        for (i, v) in pair[0].iter().enumerate() {
            for w in links.down.get(v).map(Vec::as_slice).unwrap_or(&[]) {
                if let Some(&j) = lower.get(w) {
                    segments.push((i, j));
                }
            }
        }
        for (a, &(ai, aj)) in segments.iter().enumerate() {
            for &(bi, bj) in &segments[a + 1..] {
                if (ai < bi && aj > bj) || (ai > bi && aj < bj) {
                    total += 1;
                }
            }
        }
    }
    total
}
