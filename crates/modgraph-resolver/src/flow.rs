//! Flattening the dependency tree into a deduplicated node/edge graph.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;

use crate::tree::DependencyNode;

const HORIZONTAL_SPACING: f32 = 300.0;
const VERTICAL_SPACING: f32 = 150.0;

/// A graph node handed to the rendering layer.
///
/// `x`/`y` are coarse placement seeds derived from walk depth and a rotating
/// offset; a layout collaborator assigns final coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub id: String,
    pub path: String,
    pub release: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub x: f32,
    pub y: f32,
}

/// A directed requirement edge, keyed `"sourceId-targetId"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The flattened dependency graph: one node per `path@release` id, one edge
/// per distinct parent/child id pair.
pub struct ModuleGraph {
    graph: DiGraph<FlowNode, FlowEdge>,
    /// Lookup from node id to its index.
    index: HashMap<String, NodeIndex>,
    edge_keys: HashSet<String>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            edge_keys: HashSet::new(),
        }
    }

    /// Add or retrieve a node. An id already present keeps its first
    /// inserted data and returns the existing index.
    pub fn add_node(&mut self, node: FlowNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.id) {
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    /// Add the edge `source_id -> target_id` unless that exact pair exists.
    /// Both endpoints must already be nodes; an unknown endpoint is skipped.
    pub fn add_edge(&mut self, source_id: &str, target_id: &str) {
        let key = format!("{source_id}-{target_id}");
        if self.edge_keys.contains(&key) {
            return;
        }
        let (Some(&source), Some(&target)) =
            (self.index.get(source_id), self.index.get(target_id))
        else {
            return;
        };
        self.graph.add_edge(
            source,
            target,
            FlowEdge {
                id: key.clone(),
                source: source_id.to_string(),
                target: target_id.to_string(),
            },
        );
        self.edge_keys.insert(key);
    }

    /// Look up a node index by id.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Get the node data for an index.
    pub fn node(&self, idx: NodeIndex) -> &FlowNode {
        &self.graph[idx]
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.graph.edge_indices().map(|idx| &self.graph[idx])
    }

    /// Direct requirements of a node.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect()
    }

    /// Reverse edges: who requires this node.
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for ModuleGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a dependency tree into nodes and edges.
///
/// Depth-first with its own visited set (distinct from the tree builder's):
/// a node id is materialized once, but every parent/child pair contributes
/// an edge, so fan-in from multiple parents survives flattening. The walk
/// enters every child; repeats return at the visited check after their
/// incoming edge is recorded.
pub fn flatten(root: &DependencyNode) -> ModuleGraph {
    let mut graph = ModuleGraph::new();
    let mut edges: Vec<(String, String)> = Vec::new();
    let mut edge_seen = HashSet::new();
    let mut visited = HashSet::new();

    walk(root, &mut graph, &mut edges, &mut edge_seen, &mut visited, 0, 0);

    // Every edge endpoint was materialized during the walk; wire them up.
    for (source, target) in edges {
        graph.add_edge(&source, &target);
    }

    graph
}

fn walk(
    node: &DependencyNode,
    graph: &mut ModuleGraph,
    edges: &mut Vec<(String, String)>,
    edge_seen: &mut HashSet<String>,
    visited: &mut HashSet<String>,
    level: usize,
    horizontal_offset: usize,
) {
    if !visited.insert(node.id.clone()) {
        return;
    }

    graph.add_node(FlowNode {
        id: node.id.clone(),
        path: node.path.clone(),
        release: node.release.clone(),
        size: node.size,
        x: horizontal_offset as f32 * HORIZONTAL_SPACING,
        y: level as f32 * VERTICAL_SPACING,
    });

    for child in &node.children {
        if edge_seen.insert(format!("{}-{}", node.id, child.id)) {
            edges.push((node.id.clone(), child.id.clone()));
        }
        walk(
            child,
            graph,
            edges,
            edge_seen,
            visited,
            level + 1,
            horizontal_offset + graph.len() % 3,
        );
    }
}
