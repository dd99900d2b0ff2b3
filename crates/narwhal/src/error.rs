use crate::graph::{EdgeId, NodeId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("unknown edge: {0}")]
    UnknownEdge(EdgeId),

    #[error("edge would connect {node} to itself")]
    SelfLoop { node: NodeId },

    #[error("edge would connect border nodes {a} and {b} of the same parent {parent}")]
    SiblingBorderNodes {
        a: NodeId,
        b: NodeId,
        parent: NodeId,
    },

    #[error("edge would connect border node {border} to its own parent {parent}")]
    BorderNodeToOwnParent { border: NodeId, parent: NodeId },

    #[error("node {0} is not a constant-size node and cannot own border nodes")]
    NotConstantSize(NodeId),

    #[error("node {0} is a border node; use a constrained edge to attach to it")]
    BorderEndpoint(NodeId),

    #[error("edge {0} is not a constrained edge")]
    NotConstrained(EdgeId),

    #[error("node {0} is not a border node")]
    NotBorderNode(NodeId),

    #[error("node {0} has no edge spacing to configure")]
    NoEdgeSpacing(NodeId),

    #[error("outside ratio {ratio} of border node {node} is outside [0, 1]")]
    InvalidOutsideRatio { node: NodeId, ratio: f64 },

    #[error("invalid layout options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("failed to serialize layout: {0}")]
    Serialize(serde_json::Error),

    #[error("base layout failed: {message}")]
    BaseLayout { message: String },
}
