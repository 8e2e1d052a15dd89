use std::collections::HashSet;

use crate::graph::{Graph, NodeIdx};

use super::camera::Projected;

/// Hovered and clicked nodes.
#[derive(Clone, Debug, Default)]
pub struct Selection {
	pub hovered: Option<NodeIdx>,
	pub neighbors: HashSet<NodeIdx>,
	pub selected: Option<NodeIdx>,
}

impl Selection {
	pub fn set_hover(&mut self, graph: &Graph, node: Option<NodeIdx>) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.neighbors = node.map(|idx| graph.neighbors(idx)).unwrap_or_default();
	}

	/// Selects `node`, or clears the selection for `None`. Returns whether
	/// the selection changed.
	pub fn select(&mut self, node: Option<NodeIdx>) -> bool {
		let changed = self.selected != node;
		self.selected = node;
		changed
	}

	pub fn is_highlighted(&self, idx: NodeIdx) -> bool {
		self.hovered == Some(idx) || self.selected == Some(idx) || self.neighbors.contains(&idx)
	}

	pub fn has_highlight(&self) -> bool {
		self.hovered.is_some() || self.selected.is_some()
	}
}

/// Front-most node whose projected disc of `radius` pixels contains `(x, y)`.
pub fn pick(
	projected: &[Option<Projected>],
	radius: impl Fn(&Projected) -> f64,
	x: f64,
	y: f64,
) -> Option<NodeIdx> {
	projected
		.iter()
		.enumerate()
		.filter_map(|(idx, p)| p.map(|p| (idx, p)))
		.filter(|(_, p)| {
			let (dx, dy) = (p.x - x, p.y - y);
			let r = radius(p);
			dx * dx + dy * dy <= r * r
		})
		.min_by(|(_, a), (_, b)| a.depth.total_cmp(&b.depth))
		.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Node, NodeGroup};

	fn at(x: f64, y: f64, depth: f64) -> Option<Projected> {
		Some(Projected { x, y, depth })
	}

	#[test]
	fn pick_prefers_nearest_depth() {
		let projected = [at(10.0, 10.0, 500.0), at(12.0, 11.0, 200.0), None];
		assert_eq!(pick(&projected, |_| 5.0, 11.0, 10.0), Some(1));
	}

	#[test]
	fn pick_misses_outside_radius() {
		let projected = [at(10.0, 10.0, 500.0)];
		assert_eq!(pick(&projected, |_| 5.0, 30.0, 10.0), None);
	}

	#[test]
	fn hover_tracks_neighbors() {
		let mut graph = Graph::new();
		for i in 0..3 {
			graph.add_node(Node::new(NodeGroup::Tags.node_id(i), NodeGroup::Tags, None));
		}
		graph.add_edge(0, 1);

		let mut selection = Selection::default();
		selection.set_hover(&graph, Some(0));
		assert!(selection.is_highlighted(1));
		assert!(!selection.is_highlighted(2));

		selection.set_hover(&graph, None);
		assert!(!selection.has_highlight());
		assert!(selection.select(Some(2)));
		assert!(!selection.select(Some(2)));
		assert!(selection.is_highlighted(2));
	}
}
