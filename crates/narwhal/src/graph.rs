//! Arena-backed graph model.
//!
//! Nodes and edges live in two vectors owned by [`LayoutGraph`] and refer to each other through
//! [`NodeId`] / [`EdgeId`] handles. Constant-size nodes, border nodes and the virtual bend nodes
//! inserted by the base layout are ordinary arena entries told apart by [`NodeKind`]; constrained
//! edges are told apart by [`EdgeKind`].
//!
//! A constrained edge attached to a border node is reported with the border node as its
//! `source`/`target`. While a layout runs the edge is temporarily re-attached to the border
//! node's parent (see `pipeline::resolve_constraints`) and restored by `pipeline::cleanup`.

use std::fmt;
use std::ops::{Index, IndexMut};

use narwhal_router::{Insets, Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{EdgeSpacing, Flow, RoutingStyle, Side};
use crate::options::LayoutOptions;
use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Falls back to `LayoutOptions::default_padding`.
    pub padding: Option<Insets>,
    /// Attachment x of incoming edges relative to `x`. Defaults to the middle of the node.
    pub incoming_offset: Option<f64>,
    /// Attachment x of outgoing edges relative to `x`. Defaults to the middle of the node.
    pub outgoing_offset: Option<f64>,
    pub incoming: Vec<EdgeId>,
    pub outgoing: Vec<EdgeId>,
    /// Same-rank neighbours, populated by `LayoutGraph::set_ranks`.
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub rank: Option<usize>,
    pub kind: NodeKind,
}

impl Node {
    fn new(width: f64, height: f64, kind: NodeKind) -> Self {
        Self {
            name: None,
            x: 0.0,
            y: 0.0,
            width,
            height,
            padding: None,
            incoming_offset: None,
            outgoing_offset: None,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            left: None,
            right: None,
            rank: None,
            kind,
        }
    }

    pub fn incoming_offset(&self) -> f64 {
        self.incoming_offset.unwrap_or(self.width / 2.0)
    }

    pub fn outgoing_offset(&self) -> f64 {
        self.outgoing_offset.unwrap_or(self.width / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn right_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_border(&self) -> bool {
        matches!(self.kind, NodeKind::Border(_))
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.kind, NodeKind::Virtual(_))
    }

    pub fn border(&self) -> Option<&BorderNode> {
        match &self.kind {
            NodeKind::Border(b) => Some(b),
            _ => None,
        }
    }

    pub fn border_mut(&mut self) -> Option<&mut BorderNode> {
        match &mut self.kind {
            NodeKind::Border(b) => Some(b),
            _ => None,
        }
    }

    pub fn constant_size(&self) -> Option<&ConstantSize> {
        match &self.kind {
            NodeKind::ConstantSize(c) => Some(c),
            _ => None,
        }
    }

    pub fn constant_size_mut(&mut self) -> Option<&mut ConstantSize> {
        match &mut self.kind {
            NodeKind::ConstantSize(c) => Some(c),
            _ => None,
        }
    }

    /// Minimum end point spacing; zero for nodes that cannot declare one.
    pub fn spacing(&self) -> EdgeSpacing {
        match &self.kind {
            NodeKind::ConstantSize(c) => c.spacing,
            NodeKind::Border(b) => b.spacing,
            NodeKind::Plain | NodeKind::Virtual(_) => EdgeSpacing::default(),
        }
    }

    /// The parent of a border node.
    pub fn parent(&self) -> Option<NodeId> {
        self.border().map(|b| b.parent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Plain,
    /// A node whose size the base layout may not change.
    ConstantSize(ConstantSize),
    /// A node living on the perimeter of a constant-size parent.
    Border(BorderNode),
    /// A bend node inserted by the base layout where an edge crosses a rank.
    Virtual(VirtualNode),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantSize {
    pub constant_width: f64,
    pub constant_height: f64,
    pub spacing: EdgeSpacing,
    pub border_nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorderNode {
    pub parent: NodeId,
    pub side: Side,
    /// Fraction of the node's extent, perpendicular to `side`, that lies outside the parent.
    pub outside_ratio: f64,
    pub spacing: EdgeSpacing,
    pub constant_width: f64,
    pub constant_height: f64,
    pub incoming: JointEdges,
    pub outgoing: JointEdges,
}

impl BorderNode {
    pub fn bundle(&self, flow: Flow) -> &JointEdges {
        match flow {
            Flow::Incoming => &self.incoming,
            Flow::Outgoing => &self.outgoing,
        }
    }

    pub fn bundle_mut(&mut self, flow: Flow) -> &mut JointEdges {
        match flow {
            Flow::Incoming => &mut self.incoming,
            Flow::Outgoing => &mut self.outgoing,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.incoming.edges.len() + self.outgoing.edges.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualNode {
    pub edge: EdgeId,
}

/// All incoming (or all outgoing) edges of one border node, treated as a single entry on the
/// parent's boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct JointEdges {
    pub joint: NodeId,
    pub flow: Flow,
    pub edges: Vec<EdgeId>,
}

impl JointEdges {
    fn new(joint: NodeId, flow: Flow) -> Self {
        Self {
            joint,
            flow,
            edges: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// The member whose natural bend x is closest to the parent's attachment x. Ties go to the
    /// earlier member.
    pub fn leading_edge(&self, graph: &LayoutGraph) -> Option<EdgeId> {
        let parent = graph.node(self.joint)?.parent()?;
        let p = graph.node(parent)?;
        let reference = match self.flow {
            Flow::Incoming => p.x + p.incoming_offset(),
            Flow::Outgoing => p.x + p.outgoing_offset(),
        };
        let mut best: Option<(EdgeId, f64)> = None;
        for &e in &self.edges {
            let d = (util::bend_x(graph, e, self.flow) - reference).abs();
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((e, d));
            }
        }
        best.map(|(e, _)| e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Bend nodes from `source` to `target`, one per intermediate rank.
    pub vnodes: Vec<NodeId>,
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub points: Vec<Point>,
    pub feedback: bool,
    /// Falls back to `LayoutOptions::edge_padding`.
    pub padding: Option<f64>,
    pub kind: EdgeKind,
}

impl Edge {
    fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Self {
            source,
            target,
            vnodes: Vec::new(),
            start: None,
            end: None,
            points: Vec::new(),
            feedback: false,
            padding: None,
            kind,
        }
    }

    pub fn constraint(&self) -> Option<&Constraint> {
        match &self.kind {
            EdgeKind::Constrained(c) => Some(c),
            EdgeKind::Plain => None,
        }
    }

    pub fn constraint_mut(&mut self) -> Option<&mut Constraint> {
        match &mut self.kind {
            EdgeKind::Constrained(c) => Some(c),
            EdgeKind::Plain => None,
        }
    }

    pub fn source_constraint(&self) -> Option<NodeId> {
        self.constraint().and_then(|c| c.source)
    }

    pub fn target_constraint(&self) -> Option<NodeId> {
        self.constraint().and_then(|c| c.target)
    }

    pub fn style(&self) -> RoutingStyle {
        self.constraint().map(|c| c.style).unwrap_or_default()
    }

    pub fn is_orthogonal(&self) -> bool {
        self.style() == RoutingStyle::Orthogonal
    }

    pub fn starting_routed_points(&self) -> &[Point] {
        self.constraint()
            .map(|c| c.starting_routed_points.as_slice())
            .unwrap_or(&[])
    }

    pub fn ending_routed_points(&self) -> &[Point] {
        self.constraint()
            .map(|c| c.ending_routed_points.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    Plain,
    Constrained(Constraint),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraint {
    /// The border node this edge really starts at.
    pub source: Option<NodeId>,
    /// The border node this edge really ends at.
    pub target: Option<NodeId>,
    pub style: RoutingStyle,
    /// Polyline from the exact start point out to where routing begins.
    pub starting_routed_points: Vec<Point>,
    /// Polyline from where routing ends to the exact end point.
    pub ending_routed_points: Vec<Point>,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    ranks: Vec<Vec<NodeId>>,
    layout_size: Size,
    options: LayoutOptions,
}

impl LayoutGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut LayoutOptions {
        &mut self.options
    }

    pub fn add_node(&mut self, width: f64, height: f64) -> NodeId {
        self.push_node(Node::new(width, height, NodeKind::Plain))
    }

    pub fn add_constant_size_node(&mut self, width: f64, height: f64) -> NodeId {
        self.push_node(Node::new(
            width,
            height,
            NodeKind::ConstantSize(ConstantSize {
                constant_width: width,
                constant_height: height,
                ..Default::default()
            }),
        ))
    }

    /// Adds a border node on `side` of `parent`, which must be a constant-size node. The outside
    /// ratio starts at one half.
    pub fn add_border_node(
        &mut self,
        parent: NodeId,
        width: f64,
        height: f64,
        side: Side,
    ) -> Result<NodeId> {
        let p = self.node(parent).ok_or(Error::UnknownNode(parent))?;
        if p.constant_size().is_none() {
            return Err(Error::NotConstantSize(parent));
        }
        let id = NodeId(self.nodes.len());
        let node = Node::new(
            width,
            height,
            NodeKind::Border(BorderNode {
                parent,
                side,
                outside_ratio: 0.5,
                spacing: EdgeSpacing::default(),
                constant_width: width,
                constant_height: height,
                incoming: JointEdges::new(id, Flow::Incoming),
                outgoing: JointEdges::new(id, Flow::Outgoing),
            }),
        );
        self.nodes.push(node);
        if let Some(c) = self.nodes[parent.0].constant_size_mut() {
            c.border_nodes.push(id);
        }
        Ok(id)
    }

    /// Adds an edge between two nodes that are not border nodes.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId> {
        for id in [source, target] {
            if self.node(id).ok_or(Error::UnknownNode(id))?.is_border() {
                return Err(Error::BorderEndpoint(id));
            }
        }
        self.check_endpoints(source, target)?;
        Ok(self.push_edge(Edge::new(source, target, EdgeKind::Plain)))
    }

    /// Adds an edge that may start or end at border nodes.
    pub fn add_constrained_edge(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId> {
        for id in [source, target] {
            self.node(id).ok_or(Error::UnknownNode(id))?;
        }
        self.check_endpoints(source, target)?;
        let constraint = Constraint {
            source: self.nodes[source.0].is_border().then_some(source),
            target: self.nodes[target.0].is_border().then_some(target),
            ..Default::default()
        };
        let id = self.push_edge(Edge::new(
            source,
            target,
            EdgeKind::Constrained(constraint.clone()),
        ));
        if let Some(b) = constraint.source.and_then(|s| self.nodes[s.0].border_mut()) {
            b.outgoing.edges.push(id);
        }
        if let Some(b) = constraint.target.and_then(|t| self.nodes[t.0].border_mut()) {
            b.incoming.edges.push(id);
        }
        Ok(id)
    }

    pub fn set_outside_ratio(&mut self, node: NodeId, ratio: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(Error::InvalidOutsideRatio { node, ratio });
        }
        let b = self
            .node_mut(node)
            .ok_or(Error::UnknownNode(node))?
            .border_mut()
            .ok_or(Error::NotBorderNode(node))?;
        b.outside_ratio = ratio;
        Ok(())
    }

    pub fn set_edge_style(&mut self, edge: EdgeId, style: RoutingStyle) -> Result<()> {
        self.constraint_mut(edge)?.style = style;
        Ok(())
    }

    pub fn set_starting_routed_points(&mut self, edge: EdgeId, points: Vec<Point>) -> Result<()> {
        self.constraint_mut(edge)?.starting_routed_points = points;
        Ok(())
    }

    pub fn set_ending_routed_points(&mut self, edge: EdgeId, points: Vec<Point>) -> Result<()> {
        self.constraint_mut(edge)?.ending_routed_points = points;
        Ok(())
    }

    pub fn set_min_incoming_padding(&mut self, node: NodeId, padding: f64) -> Result<()> {
        self.spacing_mut(node)?.min_incoming = padding.max(0.0);
        Ok(())
    }

    pub fn set_min_outgoing_padding(&mut self, node: NodeId, padding: f64) -> Result<()> {
        self.spacing_mut(node)?.min_outgoing = padding.max(0.0);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + use<> {
        (0..self.edges.len()).map(EdgeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Nodes the base layout places: everything except border nodes and bend nodes.
    pub fn layout_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Plain | NodeKind::ConstantSize(_)))
            .map(|(id, _)| id)
            .collect()
    }

    /// Nodes that currently belong to a rank, bend nodes included, in creation order.
    pub fn ranked_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, n)| n.rank.is_some() && !n.is_border())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn border_nodes(&self, parent: NodeId) -> &[NodeId] {
        self.node(parent)
            .and_then(Node::constant_size)
            .map(|c| c.border_nodes.as_slice())
            .unwrap_or(&[])
    }

    /// Every border node of the graph, grouped by parent in parent creation order.
    pub fn all_border_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter_map(Node::constant_size)
            .flat_map(|c| c.border_nodes.iter().copied())
            .collect()
    }

    /// Appends a bend node for `edge` on `rank`. Bend nodes are appended in order from the
    /// edge's source to its target.
    pub fn add_virtual_node(&mut self, edge: EdgeId, rank: usize) -> Result<NodeId> {
        if edge.0 >= self.edges.len() {
            return Err(Error::UnknownEdge(edge));
        }
        let mut node = Node::new(0.0, 0.0, NodeKind::Virtual(VirtualNode { edge }));
        node.rank = Some(rank);
        let id = self.push_node(node);
        self.edges[edge.0].vnodes.push(id);
        Ok(id)
    }

    /// Replaces the rank structure, assigning every listed node its rank index and same-rank
    /// neighbours.
    pub fn set_ranks(&mut self, ranks: Vec<Vec<NodeId>>) -> Result<()> {
        for id in ranks.iter().flatten() {
            if id.0 >= self.nodes.len() {
                return Err(Error::UnknownNode(*id));
            }
        }
        for n in &mut self.nodes {
            n.rank = None;
            n.left = None;
            n.right = None;
        }
        for (r, rank) in ranks.iter().enumerate() {
            for (i, id) in rank.iter().enumerate() {
                let n = &mut self.nodes[id.0];
                n.rank = Some(r);
                n.left = i.checked_sub(1).map(|j| rank[j]);
                n.right = rank.get(i + 1).copied();
            }
        }
        self.ranks = ranks;
        Ok(())
    }

    pub fn ranks(&self) -> &[Vec<NodeId>] {
        &self.ranks
    }

    pub fn rank_of(&self, node: NodeId) -> Option<&[NodeId]> {
        let r = self.node(node)?.rank?;
        self.ranks.get(r).map(Vec::as_slice)
    }

    /// Forgets everything a previous base layout run produced: ranks, neighbours, feedback flags
    /// and bend nodes. Bend nodes at the end of the arena are dropped; earlier ones stay as
    /// unranked, unreferenced entries so that ids remain stable.
    pub fn clear_base_layout(&mut self) {
        for e in &mut self.edges {
            e.vnodes.clear();
            e.feedback = false;
        }
        for n in &mut self.nodes {
            n.rank = None;
            n.left = None;
            n.right = None;
        }
        while self.nodes.last().is_some_and(Node::is_virtual) {
            self.nodes.pop();
        }
        self.ranks.clear();
    }

    pub fn layout_size(&self) -> Size {
        self.layout_size
    }

    pub fn set_layout_size(&mut self, size: Size) {
        self.layout_size = size;
    }

    pub fn padding(&self, node: NodeId) -> Insets {
        self.node(node)
            .and_then(|n| n.padding)
            .unwrap_or(self.options.default_padding)
    }

    pub fn edge_padding(&self, edge: EdgeId) -> f64 {
        self.edge(edge)
            .and_then(|e| e.padding)
            .unwrap_or(self.options.edge_padding)
    }

    /// Re-checks the edge invariants that construction enforces. Useful after callers mutate
    /// nodes or edges directly.
    pub fn validate(&self) -> Result<()> {
        for (id, n) in self.nodes() {
            if let Some(b) = n.border() {
                if !(0.0..=1.0).contains(&b.outside_ratio) {
                    return Err(Error::InvalidOutsideRatio {
                        node: id,
                        ratio: b.outside_ratio,
                    });
                }
                let parent = self.node(b.parent).ok_or(Error::UnknownNode(b.parent))?;
                if !parent
                    .constant_size()
                    .is_some_and(|c| c.border_nodes.contains(&id))
                {
                    return Err(Error::NotConstantSize(b.parent));
                }
            }
        }
        for (_, e) in self.edges() {
            let source = e.source_constraint().unwrap_or(e.source);
            let target = e.target_constraint().unwrap_or(e.target);
            for id in [e.source, e.target, source, target] {
                self.node(id).ok_or(Error::UnknownNode(id))?;
            }
            if e.constraint().is_none() {
                for id in [source, target] {
                    if self.nodes[id.0].is_border() {
                        return Err(Error::BorderEndpoint(id));
                    }
                }
            }
            self.check_endpoints(source, target)?;
            if e.source == e.target {
                return Err(Error::SelfLoop { node: e.source });
            }
        }
        Ok(())
    }

    fn check_endpoints(&self, source: NodeId, target: NodeId) -> Result<()> {
        if source == target {
            return Err(Error::SelfLoop { node: source });
        }
        let source_parent = self.node(source).and_then(Node::parent);
        let target_parent = self.node(target).and_then(Node::parent);
        if let (Some(a), Some(b)) = (source_parent, target_parent) {
            if a == b {
                return Err(Error::SiblingBorderNodes {
                    a: source,
                    b: target,
                    parent: a,
                });
            }
        }
        if source_parent == Some(target) {
            return Err(Error::BorderNodeToOwnParent {
                border: source,
                parent: target,
            });
        }
        if target_parent == Some(source) {
            return Err(Error::BorderNodeToOwnParent {
                border: target,
                parent: source,
            });
        }
        Ok(())
    }

    fn constraint_mut(&mut self, edge: EdgeId) -> Result<&mut Constraint> {
        self.edge_mut(edge)
            .ok_or(Error::UnknownEdge(edge))?
            .constraint_mut()
            .ok_or(Error::NotConstrained(edge))
    }

    fn spacing_mut(&mut self, node: NodeId) -> Result<&mut EdgeSpacing> {
        match &mut self.node_mut(node).ok_or(Error::UnknownNode(node))?.kind {
            NodeKind::ConstantSize(c) => Ok(&mut c.spacing),
            NodeKind::Border(b) => Ok(&mut b.spacing),
            NodeKind::Plain | NodeKind::Virtual(_) => Err(Error::NoEdgeSpacing(node)),
        }
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.nodes[edge.source.0].outgoing.push(id);
        self.nodes[edge.target.0].incoming.push(id);
        self.edges.push(edge);
        id
    }
}

impl Index<NodeId> for LayoutGraph {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for LayoutGraph {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

impl Index<EdgeId> for LayoutGraph {
    type Output = Edge;

    fn index(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }
}

impl IndexMut<EdgeId> for LayoutGraph {
    fn index_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }
}
