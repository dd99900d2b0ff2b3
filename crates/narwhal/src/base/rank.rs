//! Feedback edge detection and longest-path ranking.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::graph::{EdgeId, LayoutGraph, NodeId};

/// Flags the edges that close a cycle during a depth-first walk from `nodes` in order. Every
/// other edge is unflagged.
pub fn mark_feedback_edges(g: &mut LayoutGraph, nodes: &[NodeId]) -> usize {
    fn dfs(
        g: &LayoutGraph,
        v: NodeId,
        visited: &mut HashSet<NodeId>,
        on_stack: &mut HashSet<NodeId>,
        feedback: &mut Vec<EdgeId>,
    ) {
        if !visited.insert(v) {
            return;
        }
        on_stack.insert(v);
        for &e in &g[v].outgoing {
            let w = g[e].target;
            if on_stack.contains(&w) {
                feedback.push(e);
            } else {
                dfs(g, w, visited, on_stack, feedback);
            }
        }
        on_stack.remove(&v);
    }

    let mut visited = HashSet::default();
    let mut on_stack = HashSet::default();
    let mut feedback = Vec::new();
    for &v in nodes {
        dfs(g, v, &mut visited, &mut on_stack, &mut feedback);
    }

    for e in g.edge_ids() {
        g[e].feedback = false;
    }
    for &e in &feedback {
        g[e].feedback = true;
    }
    feedback.len()
}

/// Ranks `nodes` so that every edge (feedback edges reversed) points at least one rank down
/// and every node sits right below its lowest predecessor. Sources get rank 0.
pub fn longest_path(g: &LayoutGraph, nodes: &[NodeId]) -> HashMap<NodeId, usize> {
    let mut in_degree: HashMap<NodeId, usize> = nodes.iter().map(|v| (*v, 0)).collect();
    let mut successors: HashMap<NodeId, Vec<NodeId>> = HashMap::default();
    for (_, e) in g.edges() {
        let (u, w) = if e.feedback {
            (e.target, e.source)
        } else {
            (e.source, e.target)
        };
        if !in_degree.contains_key(&u) {
            continue;
        }
        let Some(d) = in_degree.get_mut(&w) else {
            continue;
        };
        *d += 1;
        successors.entry(u).or_default().push(w);
    }

    let mut rank: HashMap<NodeId, usize> = HashMap::default();
    let mut queue: VecDeque<NodeId> = nodes
        .iter()
        .copied()
        .filter(|v| in_degree.get(v) == Some(&0))
        .collect();
    while let Some(u) = queue.pop_front() {
        let ru = *rank.entry(u).or_insert(0);
        for &w in successors.get(&u).map(Vec::as_slice).unwrap_or(&[]) {
            let rw = rank.entry(w).or_insert(0);
            *rw = (*rw).max(ru + 1);
            if let Some(d) = in_degree.get_mut(&w) {
                *d -= 1;
                if *d == 0 {
                    queue.push_back(w);
                }
            }
        }
    }
    // Only reachable if the feedback flags left a cycle behind.
    for &v in nodes {
        rank.entry(v).or_insert(0);
    }
    rank
}
