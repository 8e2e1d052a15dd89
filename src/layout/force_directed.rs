use log::debug;

use super::{Layout, LayoutMode, LayoutOptions};
use crate::graph::{Graph, Point3};

const EPSILON: f64 = 1e-6;

/// Fruchterman-Reingold placement with a cooling schedule.
pub struct ForceDirectedLayout {
	mode: LayoutMode,
	options: LayoutOptions,
	attraction_constant: f64,
	repulsion_constant: f64,
	temperature: f64,
	iteration: usize,
	finished: bool,
	displacement: Vec<Point3>,
}

impl ForceDirectedLayout {
	pub fn new(mode: LayoutMode, options: LayoutOptions) -> Self {
		Self {
			mode,
			options,
			attraction_constant: 0.0,
			repulsion_constant: 0.0,
			temperature: 0.0,
			iteration: 0,
			finished: false,
			displacement: Vec::new(),
		}
	}

	fn seed_positions(&self, graph: &mut Graph) {
		let (w, h) = (self.options.width, self.options.height);
		let is_3d = self.mode.is_3d();
		for (i, node) in graph.nodes_mut().iter_mut().enumerate() {
			let seed = i as u64 * 3;
			node.position = Point3::new(
				(unit_noise(seed) - 0.5) * w,
				(unit_noise(seed + 1) - 0.5) * h,
				if is_3d {
					(unit_noise(seed + 2) - 0.5) * w
				} else {
					0.0
				},
			);
		}
	}
}

impl Layout for ForceDirectedLayout {
	fn init(&mut self, graph: &mut Graph) {
		self.seed_positions(graph);
		let n = graph.node_count().max(1) as f64;
		let force_constant = (self.options.width * self.options.height / n).sqrt();
		self.attraction_constant = self.options.attraction * force_constant;
		self.repulsion_constant = self.options.repulsion * force_constant;
		self.temperature = self.options.width / 10.0;
		self.iteration = 0;
		self.finished = false;
		self.displacement = vec![Point3::ZERO; graph.node_count()];
	}

	fn generate(&mut self, graph: &mut Graph) -> bool {
		if self.finished {
			return false;
		}
		if self.iteration >= self.options.iterations || self.temperature <= EPSILON {
			debug!("force-directed layout settled after {} iterations", self.iteration);
			self.finished = true;
			return false;
		}

		let count = graph.node_count();
		self.displacement.clear();
		self.displacement.resize(count, Point3::ZERO);

		let repulsion_sq = self.repulsion_constant * self.repulsion_constant;
		{
			let nodes = graph.nodes();
			for i in 0..count {
				for j in (i + 1)..count {
					let delta = nodes[i].position - nodes[j].position;
					let distance = delta.length().max(EPSILON);
					let push = delta * (repulsion_sq / distance / distance);
					self.displacement[i] += push;
					self.displacement[j] -= push;
				}
			}

			for edge in graph.edges() {
				let delta = nodes[edge.source].position - nodes[edge.target].position;
				let distance = delta.length().max(EPSILON);
				// |delta| / distance * distance² / c
				let pull = delta * (distance / self.attraction_constant);
				self.displacement[edge.source] -= pull;
				self.displacement[edge.target] += pull;
			}
		}

		let is_3d = self.mode.is_3d();
		for (node, disp) in graph.nodes_mut().iter_mut().zip(&self.displacement) {
			let length = disp.length();
			if length <= EPSILON {
				continue;
			}
			node.position += *disp * (length.min(self.temperature) / length);
			if !is_3d {
				node.position.z = 0.0;
			}
		}

		self.temperature *= 1.0 - self.iteration as f64 / self.options.iterations as f64;
		self.iteration += 1;
		true
	}

	fn finished(&self) -> bool {
		self.finished
	}

	fn stop_calculating(&mut self) {
		self.finished = true;
	}
}

/// Hash-style value in `[0, 1)`, stable across runs.
fn unit_noise(seed: u64) -> f64 {
	let mut x = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
	x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
	x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
	x ^= x >> 31;
	(x >> 11) as f64 / (1u64 << 53) as f64
}
