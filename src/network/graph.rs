use geo::{Distance, Haversine, Line, Point};
use log::debug;
use petgraph::prelude::DiGraphMap;
use rstar::{RTree, AABB};
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Formatter};

use crate::network::error::NetworkError;

pub type NodeId = i64;
pub type Metres = f64;

pub type GraphStructure = DiGraphMap<NodeId, Metres>;

/// Identifies a directed edge by its `(source, target)` node pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct EdgeId {
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeId {
    pub const fn new(source: NodeId, target: NodeId) -> Self {
        EdgeId { source, target }
    }

    /// The undirected key for this edge. Both directions of the same
    /// carriageway collapse onto a single id, so aggregation and attribute
    /// lookup see one road.
    pub fn canonical(&self) -> EdgeId {
        if self.source <= self.target {
            *self
        } else {
            EdgeId::new(self.target, self.source)
        }
    }
}

impl Debug for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// A positioned node of the road network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
}

impl Node {
    pub const fn new(id: NodeId, position: Point) -> Self {
        Node { id, position }
    }
}

/// An edge with its endpoint geometry attached, as held by the spatial
/// index. Queries against the index return these directly, avoiding a
/// node-table lookup per hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub source: Node,
    pub target: Node,
    pub id: EdgeId,
}

impl Segment {
    pub fn new(source: Node, target: Node) -> Self {
        Segment {
            id: EdgeId::new(source.id, target.id),
            source,
            target,
        }
    }

    #[inline]
    pub fn line(&self) -> Line {
        Line::new(self.source.position, self.target.position)
    }

    pub fn length(&self) -> Metres {
        Haversine.distance(self.source.position, self.target.position)
    }
}

impl rstar::RTreeObject for Segment {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.source.position, self.target.position)
    }
}

/// In-memory road network: a directed graph of node ids weighted by segment
/// length, a spatial index over edge geometry, and an attribute table keyed
/// by undirected edge.
pub struct RoadNetwork {
    pub(crate) graph: GraphStructure,
    pub(crate) index: RTree<Segment>,
    pub(crate) nodes: FxHashMap<NodeId, Point>,
    attributes: FxHashMap<EdgeId, FxHashMap<String, String>>,
}

impl Debug for RoadNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RoadNetwork with {} nodes and {} edges",
            self.nodes.len(),
            self.graph.edge_count()
        )
    }
}

impl RoadNetwork {
    /// Builds a network from `(source, target)` node pairs with their
    /// positions. Degenerate entries (self-loops, out-of-range or non-finite
    /// coordinates, repeated pairs) are skipped, not errors.
    pub fn from_edges(
        edges: impl IntoIterator<Item = ((NodeId, Point), (NodeId, Point))>,
    ) -> Result<RoadNetwork, NetworkError> {
        let mut graph = GraphStructure::new();
        let mut nodes = FxHashMap::default();
        let mut segments = Vec::new();
        let mut skipped = 0usize;

        for ((source, source_position), (target, target_position)) in edges {
            if source == target
                || !valid_position(&source_position)
                || !valid_position(&target_position)
            {
                debug!("Skipping degenerate edge entry: {}->{}", source, target);
                skipped += 1;
                continue;
            }

            if graph.contains_edge(source, target) {
                debug!("Skipping repeated edge entry: {}->{}", source, target);
                skipped += 1;
                continue;
            }

            let source = Node::new(source, source_position);
            let target = Node::new(target, target_position);
            let segment = Segment::new(source, target);

            graph.add_edge(source.id, target.id, segment.length());
            nodes.insert(source.id, source.position);
            nodes.insert(target.id, target.position);
            segments.push(segment);
        }

        if skipped > 0 {
            debug!("Skipped {} degenerate edge entries", skipped);
        }

        if segments.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }

        Ok(RoadNetwork {
            graph,
            index: RTree::bulk_load(segments),
            nodes,
            attributes: FxHashMap::default(),
        })
    }

    pub fn index(&self) -> &RTree<Segment> {
        &self.index
    }

    /// Number of directed edges.
    pub fn size(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn get_position(&self, node: &NodeId) -> Option<Point> {
        self.nodes.get(node).copied()
    }

    /// Whether the edge exists in either direction.
    pub fn contains_edge(&self, edge: &EdgeId) -> bool {
        self.graph.contains_edge(edge.source, edge.target)
            || self.graph.contains_edge(edge.target, edge.source)
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.graph
            .all_edges()
            .map(|(source, target, _)| EdgeId::new(source, target))
    }

    /// Attaches a named attribute (road class, name, ...) to an edge,
    /// keyed on the undirected id.
    pub fn set_attribute(
        &mut self,
        edge: &EdgeId,
        key: &str,
        value: &str,
    ) -> Result<(), NetworkError> {
        if !self.contains_edge(edge) {
            return Err(NetworkError::UnknownEdge(*edge));
        }

        self.attributes
            .entry(edge.canonical())
            .or_default()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    /// Looks up an edge attribute, falling back to `default` when the edge
    /// carries no value for `key`.
    pub fn attribute<'a>(&'a self, edge: &EdgeId, key: &str, default: &'a str) -> &'a str {
        self.attributes
            .get(&edge.canonical())
            .and_then(|attributes| attributes.get(key))
            .map(String::as_str)
            .unwrap_or(default)
    }

    /// Maps each given edge to its value of the attribute, with `default`
    /// standing in wherever the attribute is missing.
    pub fn attribute_table(
        &self,
        edges: impl IntoIterator<Item = EdgeId>,
        key: &str,
        default: &str,
    ) -> FxHashMap<EdgeId, String> {
        edges
            .into_iter()
            .map(|edge| {
                let value = self.attribute(&edge, key, default).to_string();
                (edge.canonical(), value)
            })
            .collect()
    }
}

#[inline]
pub(crate) fn valid_position(position: &Point) -> bool {
    let (lng, lat) = position.x_y();
    lat.is_finite() && lng.is_finite() && lat > -90f64 && lat < 90f64 && lng > -180f64 && lng < 180f64
}
