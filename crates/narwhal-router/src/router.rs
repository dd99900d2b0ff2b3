//! Obstacle-avoiding shortest paths.
//!
//! The router builds a visibility graph whose vertices are the path end points plus the
//! corners of every obstacle (pushed outwards by `spacing`), connects every pair of vertices
//! that can see each other, and runs Dijkstra over it. With rectangular obstacles the shortest
//! Euclidean path always bends at obstacle corners, so this is exact.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::geom::{Point, Rect};

/// Obstacles are shrunk by this much before blocking tests, so obstacles that overlap by a
/// rounding error still leave a corridor between them.
const TOUCH_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Default)]
pub struct ShortestPathRouter {
    obstacles: Vec<Rect>,
    spacing: f64,
}

impl ShortestPathRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance kept between a routed path and the obstacles it bends around.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    pub fn add_obstacle(&mut self, obstacle: Rect) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    /// Routes from `start` to `end`, returning the polyline including both end points.
    ///
    /// Obstacles that strictly contain either end point are ignored for this path. When the
    /// end points cannot be connected the straight segment is returned.
    pub fn route(&self, start: Point, end: Point) -> Vec<Point> {
        let active: Vec<(Rect, Rect)> = self
            .obstacles
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| (*r, r.expanded(-TOUCH_TOLERANCE)))
            .filter(|(_, solid)| !solid.contains_strictly(start) && !solid.contains_strictly(end))
            .collect();
        let solids: Vec<Rect> = active.iter().map(|(_, solid)| *solid).collect();

        if start == end {
            return vec![start, end];
        }
        if is_visible(&solids, start, end) {
            return vec![start, end];
        }

        let mut vertices: Vec<Point> = vec![start, end];
        for (r, _) in &active {
            for corner in r.expanded(self.spacing).corners() {
                if solids.iter().any(|o| o.contains_strictly(corner)) {
                    continue;
                }
                vertices.push(corner);
            }
        }

        match dijkstra(&solids, &vertices) {
            Some(path) => path,
            None => vec![start, end],
        }
    }
}

fn is_visible(obstacles: &[Rect], a: Point, b: Point) -> bool {
    !obstacles.iter().any(|r| r.blocks_segment(a, b))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    cost: f64,
    vertex: usize,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Vertex 0 is the start and vertex 1 the goal.
fn dijkstra(obstacles: &[Rect], vertices: &[Point]) -> Option<Vec<Point>> {
    let n = vertices.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[0] = 0.0;
    heap.push(QueueEntry {
        cost: 0.0,
        vertex: 0,
    });

    while let Some(QueueEntry { cost, vertex }) = heap.pop() {
        if done[vertex] {
            continue;
        }
        done[vertex] = true;
        if vertex == 1 {
            break;
        }
        for next in 0..n {
            if done[next] || next == vertex {
                continue;
            }
            let a = vertices[vertex];
            let b = vertices[next];
            let candidate = cost + a.distance(b);
            if candidate >= dist[next] {
                continue;
            }
            if !is_visible(obstacles, a, b) {
                continue;
            }
            dist[next] = candidate;
            prev[next] = Some(vertex);
            heap.push(QueueEntry {
                cost: candidate,
                vertex: next,
            });
        }
    }

    if !done[1] {
        return None;
    }

    let mut path = vec![vertices[1]];
    let mut cur = 1;
    while let Some(p) = prev[cur] {
        path.push(vertices[p]);
        cur = p;
    }
    path.reverse();
    Some(path)
}
