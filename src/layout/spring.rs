use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::{Layout, LayoutOptions};
use crate::graph::{Graph, NodeIdx, Point3};

const STEP: f32 = 0.016;
/// Largest per-step node movement still counted as "at rest".
const SETTLE_DISTANCE: f64 = 0.05;
/// Consecutive resting steps before the layout reports convergence.
const SETTLE_STEPS: usize = 30;

/// Planar charge/spring simulation.
pub struct SpringLayout {
	options: LayoutOptions,
	sim: ForceGraph<NodeIdx, ()>,
	iteration: usize,
	resting: usize,
	finished: bool,
}

const BASE_CHARGE: f64 = 150.0;
const BASE_SPRING: f64 = 0.05;

/// Charge and spring strengths, scaled by how far `repulsion` and
/// `attraction` sit from their defaults.
fn forces(options: &LayoutOptions) -> (f32, f32) {
	let defaults = LayoutOptions::default();
	(
		(BASE_CHARGE * options.repulsion / defaults.repulsion) as f32,
		(BASE_SPRING * options.attraction / defaults.attraction) as f32,
	)
}

fn simulation(options: &LayoutOptions) -> ForceGraph<NodeIdx, ()> {
	let (force_charge, force_spring) = forces(options);
	ForceGraph::new(SimulationParameters {
		force_charge,
		force_spring,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl SpringLayout {
	pub fn new(options: LayoutOptions) -> Self {
		Self {
			sim: simulation(&options),
			options,
			iteration: 0,
			resting: 0,
			finished: false,
		}
	}
}

impl Layout for SpringLayout {
	fn init(&mut self, graph: &mut Graph) {
		self.sim = simulation(&self.options);
		self.iteration = 0;
		self.resting = 0;
		self.finished = false;

		let count = graph.node_count();
		let radius = self.options.width.min(self.options.height) / 20.0;
		let mut handles: Vec<DefaultNodeIdx> = Vec::with_capacity(count);
		for (i, node) in graph.nodes_mut().iter_mut().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count as f64;
			node.position = Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
			handles.push(self.sim.add_node(NodeData {
				x: node.position.x as f32,
				y: node.position.y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: i,
			}));
		}
		for edge in graph.edges() {
			self.sim.add_edge(
				handles[edge.source],
				handles[edge.target],
				EdgeData::default(),
			);
		}
	}

	fn generate(&mut self, graph: &mut Graph) -> bool {
		if self.finished {
			return false;
		}

		self.sim.update(STEP);
		self.iteration += 1;

		let nodes = graph.nodes_mut();
		let mut max_step: f64 = 0.0;
		self.sim.visit_nodes(|node| {
			let Some(target) = nodes.get_mut(node.data.user_data) else {
				return;
			};
			let next = Point3::new(node.x() as f64, node.y() as f64, 0.0);
			max_step = max_step.max((next - target.position).length());
			target.position = next;
		});

		if max_step < SETTLE_DISTANCE {
			self.resting += 1;
		} else {
			self.resting = 0;
		}
		if self.resting >= SETTLE_STEPS || self.iteration >= self.options.iterations {
			debug!("spring layout settled after {} iterations", self.iteration);
			self.finished = true;
		}
		true
	}

	fn finished(&self) -> bool {
		self.finished
	}

	fn stop_calculating(&mut self) {
		self.finished = true;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Node, NodeGroup};

	fn triangle() -> Graph {
		let mut graph = Graph::new();
		for i in 0..3 {
			graph.add_node(Node::new(NodeGroup::Tracks.node_id(i), NodeGroup::Tracks, None));
		}
		graph.add_edge(0, 1);
		graph.add_edge(1, 2);
		graph.add_edge(2, 0);
		graph
	}

	#[test]
	fn forces_follow_layout_options() {
		let (charge, spring) = forces(&LayoutOptions::default());
		assert!((charge - 150.0).abs() < 1e-3);
		assert!((spring - 0.05).abs() < 1e-6);

		let tuned = LayoutOptions {
			attraction: 10.0,
			repulsion: 1.5,
			..LayoutOptions::default()
		};
		let (charge, spring) = forces(&tuned);
		assert!((charge - 300.0).abs() < 1e-3);
		assert!((spring - 0.1).abs() < 1e-6);
	}

	#[test]
	fn init_seeds_a_circle() {
		let mut graph = triangle();
		let mut layout = SpringLayout::new(LayoutOptions::default());
		layout.init(&mut graph);

		let radius = LayoutOptions::default().width / 20.0;
		for node in graph.nodes() {
			assert!((node.position.length() - radius).abs() < 1e-6);
			assert_eq!(node.position.z, 0.0);
		}
	}

	#[test]
	fn iteration_cap_finishes_layout() {
		let mut graph = triangle();
		let mut layout = SpringLayout::new(LayoutOptions {
			iterations: 25,
			..LayoutOptions::default()
		});
		layout.init(&mut graph);

		let mut steps = 0;
		while layout.generate(&mut graph) {
			steps += 1;
		}
		assert!(steps <= 25);
		assert!(layout.finished());
		assert!(graph.nodes().iter().all(|n| n.position.x.is_finite()));
	}

	#[test]
	fn stop_is_respected() {
		let mut graph = triangle();
		let mut layout = SpringLayout::new(LayoutOptions::default());
		layout.init(&mut graph);
		layout.stop_calculating();
		assert!(!layout.generate(&mut graph));
	}
}
