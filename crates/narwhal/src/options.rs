use narwhal_router::{Insets, Point};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Direction;

/// Graph-wide layout settings.
///
/// Deserializes from camelCase JSON; every key is optional:
///
/// ```
/// let opts = narwhal::LayoutOptions::from_json(r#"{ "direction": "right", "edgePadding": 12 }"#)
///     .unwrap();
/// assert_eq!(opts.direction, narwhal::Direction::Right);
/// assert_eq!(opts.obstacle_extent, 10_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub direction: Direction,
    /// Padding of nodes that do not declare their own.
    pub default_padding: Insets,
    /// Padding of edges that do not declare their own.
    pub edge_padding: f64,
    /// The finished layout is translated by this amount.
    pub origin: Point,
    /// Width of the obstacles that keep a routed edge inside its rank slice.
    pub obstacle_extent: f64,
    /// Lower bound for routing obstacle heights, so zero-height ranks still block.
    pub min_obstacle_extent: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Down,
            default_padding: Insets::uniform(16.0),
            edge_padding: 8.0,
            origin: Point::default(),
            obstacle_extent: 10_000.0,
            min_obstacle_extent: 2.0,
        }
    }
}

impl LayoutOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}
