//! Node/edge container shared by the dataset loader, the layouts and the scene.

use std::collections::{HashMap, HashSet};
use std::fmt;

use glam::DVec3;

/// Index of a node inside a [`Graph`].
pub type NodeIdx = usize;

/// Position in layout space. 2D layouts keep `z` at zero.
pub type Point3 = DVec3;

/// Which family a node belongs to. Also provides the one-letter id prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeGroup {
	Tracks,
	Tags,
	/// Generic nodes of the random demo graph.
	Nodes,
}

impl NodeGroup {
	pub fn prefix(self) -> char {
		match self {
			Self::Tracks => 't',
			Self::Tags => 'g',
			Self::Nodes => 'n',
		}
	}

	/// Builds the unique node id for an underlying track id or tag string.
	pub fn node_id(self, key: impl fmt::Display) -> String {
		format!("{}{}", self.prefix(), key)
	}
}

impl fmt::Display for NodeGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Tracks => "tracks",
			Self::Tags => "tags",
			Self::Nodes => "nodes",
		})
	}
}

#[derive(Clone, Debug)]
pub struct Node {
	pub id: String,
	pub group: NodeGroup,
	pub label: Option<String>,
	pub position: Point3,
}

impl Node {
	pub fn new(id: impl Into<String>, group: NodeGroup, label: Option<String>) -> Self {
		Self {
			id: id.into(),
			group,
			label,
			position: Point3::ZERO,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub source: NodeIdx,
	pub target: NodeIdx,
}

impl Edge {
	fn key(self) -> (NodeIdx, NodeIdx) {
		(self.source.min(self.target), self.source.max(self.target))
	}
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	by_id: HashMap<String, NodeIdx>,
	edge_keys: HashSet<(NodeIdx, NodeIdx)>,
	limit: Option<usize>,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	/// A graph that refuses new nodes once it holds `limit` of them.
	pub fn with_limit(limit: usize) -> Self {
		Self {
			limit: Some(limit),
			..Self::default()
		}
	}

	/// Inserts `node`, returning its index. `None` when the id is taken or
	/// the node limit has been reached.
	pub fn add_node(&mut self, node: Node) -> Option<NodeIdx> {
		if self.reached_limit() || self.by_id.contains_key(&node.id) {
			return None;
		}
		let idx = self.nodes.len();
		self.by_id.insert(node.id.clone(), idx);
		self.nodes.push(node);
		Some(idx)
	}

	/// Connects two existing nodes. Self-loops and duplicates in either
	/// direction are rejected.
	pub fn add_edge(&mut self, source: NodeIdx, target: NodeIdx) -> bool {
		if source == target || source >= self.nodes.len() || target >= self.nodes.len() {
			return false;
		}
		let edge = Edge { source, target };
		if !self.edge_keys.insert(edge.key()) {
			return false;
		}
		self.edges.push(edge);
		true
	}

	pub fn reached_limit(&self) -> bool {
		self.limit.is_some_and(|limit| self.nodes.len() >= limit)
	}

	pub fn node_by_id(&self, id: &str) -> Option<NodeIdx> {
		self.by_id.get(id).copied()
	}

	pub fn node(&self, idx: NodeIdx) -> Option<&Node> {
		self.nodes.get(idx)
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn neighbors(&self, idx: NodeIdx) -> HashSet<NodeIdx> {
		self.edges
			.iter()
			.filter_map(|e| {
				if e.source == idx {
					Some(e.target)
				} else if e.target == idx {
					Some(e.source)
				} else {
					None
				}
			})
			.collect()
	}

	/// Center and radius of the sphere enclosing every node position.
	pub fn bounds(&self) -> (Point3, f64) {
		if self.nodes.is_empty() {
			return (Point3::ZERO, 0.0);
		}
		let sum = self
			.nodes
			.iter()
			.fold(Point3::ZERO, |acc, n| acc + n.position);
		let center = sum * (1.0 / self.nodes.len() as f64);
		let radius = self
			.nodes
			.iter()
			.map(|n| (n.position - center).length())
			.fold(0.0, f64::max);
		(center, radius)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn track(id: u64) -> Node {
		Node::new(NodeGroup::Tracks.node_id(id), NodeGroup::Tracks, None)
	}

	#[test]
	fn node_ids_carry_group_prefix() {
		assert_eq!(NodeGroup::Tracks.node_id(42), "t42");
		assert_eq!(NodeGroup::Tags.node_id("rock"), "grock");
	}

	#[test]
	fn duplicate_node_is_rejected() {
		let mut graph = Graph::new();
		assert_eq!(graph.add_node(track(1)), Some(0));
		assert_eq!(graph.add_node(track(1)), None);
		assert_eq!(graph.node_count(), 1);
		assert_eq!(graph.node_by_id("t1"), Some(0));
	}

	#[test]
	fn limit_caps_node_count() {
		let mut graph = Graph::with_limit(2);
		assert!(graph.add_node(track(1)).is_some());
		assert!(!graph.reached_limit());
		assert!(graph.add_node(track(2)).is_some());
		assert!(graph.reached_limit());
		assert!(graph.add_node(track(3)).is_none());
		assert_eq!(graph.node_count(), 2);
	}

	#[test]
	fn edges_are_unordered_and_unique() {
		let mut graph = Graph::new();
		let a = graph.add_node(track(1)).unwrap();
		let b = graph.add_node(track(2)).unwrap();
		assert!(graph.add_edge(a, b));
		assert!(!graph.add_edge(b, a));
		assert!(!graph.add_edge(a, a));
		assert!(!graph.add_edge(a, 7));
		assert_eq!(graph.edge_count(), 1);
		assert_eq!(graph.neighbors(b), HashSet::from([a]));
	}

	#[test]
	fn bounds_enclose_all_nodes() {
		let mut graph = Graph::new();
		for (i, x) in [-10.0, 10.0].into_iter().enumerate() {
			let idx = graph.add_node(track(i as u64)).unwrap();
			graph.nodes_mut()[idx].position = Point3::new(x, 0.0, 0.0);
		}
		let (center, radius) = graph.bounds();
		assert_eq!(center, Point3::ZERO);
		assert!((radius - 10.0).abs() < 1e-9);
	}
}
