//! Serializable read-back of a finished layout.

use narwhal_router::Point;
use serde::Serialize;

use crate::border;
use crate::error::{Error, Result};
use crate::graph::{EdgeId, LayoutGraph, NodeId, NodeKind};
use crate::model::Side;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    /// Where a border node meets its parent's perimeter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSnapshot {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub points: Vec<Point>,
}

impl LayoutSnapshot {
    /// Captures every node except bend nodes, and every edge.
    pub fn capture(g: &LayoutGraph) -> Self {
        let nodes = g
            .nodes()
            .filter(|(_, n)| !n.is_virtual())
            .map(|(id, n)| NodeSnapshot {
                id,
                name: n.name.clone(),
                kind: match n.kind {
                    NodeKind::Plain => "plain",
                    NodeKind::ConstantSize(_) => "constantSize",
                    NodeKind::Border(_) => "border",
                    NodeKind::Virtual(_) => "virtual",
                },
                x: n.x,
                y: n.y,
                width: n.width,
                height: n.height,
                parent: n.parent(),
                side: n.border().map(|b| b.side),
                anchor: border::anchor(n),
            })
            .collect();
        let edges = g
            .edges()
            .map(|(id, e)| EdgeSnapshot {
                id,
                source: e.source,
                target: e.target,
                start: e.start,
                end: e.end,
                points: e.points.clone(),
            })
            .collect();
        let size = g.layout_size();
        Self {
            width: size.width,
            height: size.height,
            nodes,
            edges,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Serialize)
    }
}
