//! Small value types shared across the layout passes.

use narwhal_router::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Direction in which ranks follow each other.
///
/// Every pass runs in the `Down` frame; the other directions are reached by transposing and/or
/// mirroring the graph around the passes (see `coordinate_system`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    pub fn is_transposed(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }

    pub fn is_mirrored(self) -> bool {
        matches!(self, Direction::Up | Direction::Left)
    }
}

/// Side of a parent rectangle a border node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    North,
    #[default]
    South,
    West,
    East,
}

impl Side {
    pub fn transposed(self) -> Self {
        match self {
            Side::North => Side::West,
            Side::West => Side::North,
            Side::South => Side::East,
            Side::East => Side::South,
        }
    }

    pub fn flipped_vertically(self) -> Self {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
            other => other,
        }
    }

    pub fn is_flank(self) -> bool {
        matches!(self, Side::West | Side::East)
    }

    /// The side of `rect` nearest to `p`. Ties keep `current` when it is one of the candidates,
    /// otherwise north, south, west, east in that order.
    pub fn locate(rect: &Rect, p: Point, current: Side) -> Side {
        let distances = [
            (Side::North, (p.y - rect.y).abs()),
            (Side::South, (p.y - rect.bottom()).abs()),
            (Side::West, (p.x - rect.x).abs()),
            (Side::East, (p.x - rect.right()).abs()),
        ];
        let best = distances
            .iter()
            .map(|(_, d)| *d)
            .fold(f64::INFINITY, f64::min);
        if distances
            .iter()
            .any(|(side, d)| *side == current && *d == best)
        {
            return current;
        }
        distances
            .iter()
            .find(|(_, d)| *d == best)
            .map(|(side, _)| *side)
            .unwrap_or(current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoutingStyle {
    /// Free-angle shortest path around same-rank neighbours.
    #[default]
    Oblique,
    /// Alternating horizontal and vertical segments, jogging between ranks.
    Orthogonal,
}

/// Minimum distance between adjacent edge end points on a node's north (incoming) and south
/// (outgoing) boundary. Zero disables padding for that side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeSpacing {
    pub min_incoming: f64,
    pub min_outgoing: f64,
}

impl EdgeSpacing {
    pub fn any(&self) -> bool {
        self.min_incoming > 0.0 || self.min_outgoing > 0.0
    }
}

/// Which boundary of a node an edge attaches to: incoming edges end on the north boundary,
/// outgoing edges start on the south boundary (in the downward frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Incoming,
    Outgoing,
}
