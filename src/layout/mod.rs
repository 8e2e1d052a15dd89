//! Layout algorithms that place graph nodes in space.
//!
//! A layout is driven cooperatively: the render loop calls
//! [`Layout::generate`] once per frame until [`Layout::finished`] reports
//! convergence or someone calls [`Layout::stop_calculating`].

mod force_directed;
mod spring;

pub use force_directed::ForceDirectedLayout;
pub use spring::SpringLayout;

use crate::graph::Graph;

/// Space the layout works in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
	TwoD,
	#[default]
	ThreeD,
}

impl LayoutMode {
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"2d" => Some(Self::TwoD),
			"3d" => Some(Self::ThreeD),
			_ => None,
		}
	}

	pub fn is_3d(self) -> bool {
		self == Self::ThreeD
	}
}

/// Algorithm backing a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutEngine {
	/// Fruchterman-Reingold with simulated cooling.
	ForceDirected,
	/// Spring/charge simulation from the `force_graph` crate, planar only.
	Spring,
}

impl LayoutEngine {
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"force" | "force-directed" | "fr" => Some(Self::ForceDirected),
			"spring" => Some(Self::Spring),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
	pub width: f64,
	pub height: f64,
	pub attraction: f64,
	pub repulsion: f64,
	pub iterations: usize,
	/// Overrides the engine picked for the mode. Spring in 3D falls back to
	/// force-directed.
	pub engine: Option<LayoutEngine>,
}

impl Default for LayoutOptions {
	fn default() -> Self {
		Self {
			width: 2000.0,
			height: 2000.0,
			attraction: 5.0,
			repulsion: 0.75,
			iterations: 100_000,
			engine: None,
		}
	}
}

pub trait Layout {
	/// Seeds node positions and resets convergence state.
	fn init(&mut self, graph: &mut Graph);

	/// Runs one iteration. Returns `false` once nothing more was done.
	fn generate(&mut self, graph: &mut Graph) -> bool;

	fn finished(&self) -> bool;

	/// Halts further iteration; `finished` reports `true` afterwards.
	fn stop_calculating(&mut self);
}

/// Picks the layout engine for `mode`.
pub fn build(mode: LayoutMode, options: &LayoutOptions) -> Box<dyn Layout> {
	let engine = match (mode, options.engine) {
		(LayoutMode::ThreeD, _) => LayoutEngine::ForceDirected,
		(LayoutMode::TwoD, Some(engine)) => engine,
		(LayoutMode::TwoD, None) => LayoutEngine::Spring,
	};
	match engine {
		LayoutEngine::ForceDirected => Box::new(ForceDirectedLayout::new(mode, options.clone())),
		LayoutEngine::Spring => Box::new(SpringLayout::new(options.clone())),
	}
}
