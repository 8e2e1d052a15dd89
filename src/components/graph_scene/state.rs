use log::info;

use crate::graph::{Graph, NodeGroup, NodeIdx};
use crate::layout::{self, Layout};
use crate::options::GraphOptions;

use super::camera::{OrbitCamera, Projected};
use super::info::InfoText;
use super::selection::{self, Selection};
use super::stats::FrameStats;

/// Pixel radius of a node sitting at the camera's target depth.
pub const NODE_RADIUS: f64 = 6.0;
const MIN_SCREEN_RADIUS: f64 = 2.5;
const MAX_SCREEN_RADIUS: f64 = 24.0;
pub const HIT_SLOP: f64 = 4.0;

const TRACK_COLOR: &str = "#1f77b4";
const TAG_COLOR: &str = "#ff7f0e";
const PLAIN_COLOR: &str = "#2ca02c";

pub fn node_color(group: NodeGroup) -> &'static str {
	match group {
		NodeGroup::Tracks => TRACK_COLOR,
		NodeGroup::Tags => TAG_COLOR,
		NodeGroup::Nodes => PLAIN_COLOR,
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub pan: bool,
	pub moved: bool,
	pub last_x: f64,
	pub last_y: f64,
}

/// Changes from one frame that the overlays need to pick up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameUpdate {
	pub info: Option<String>,
	pub stats: Option<String>,
	pub layout_finished: bool,
}

pub struct SceneState {
	pub graph: Graph,
	pub layout: Box<dyn Layout>,
	pub camera: OrbitCamera,
	pub selection: Selection,
	pub drag: DragState,
	pub show_labels: bool,
	pub selection_enabled: bool,
	pub show_stats: bool,
	pub show_info: bool,
	pub width: f64,
	pub height: f64,
	/// Camera re-frames the graph every frame until the user takes over.
	pub follow: bool,
	/// Screen positions from the last frame, indexed like the graph.
	pub projected: Vec<Option<Projected>>,
	stats: FrameStats,
	info: InfoText,
	announced_finish: bool,
}

impl SceneState {
	pub fn new(mut graph: Graph, options: &GraphOptions, width: f64, height: f64) -> Self {
		let mut layout = layout::build(options.layout, &options.layout_options);
		layout.init(&mut graph);
		let mut camera = OrbitCamera::new(options.layout.is_3d());
		camera.fit(&graph);
		let info = InfoText::new(graph.node_count(), graph.edge_count());

		let mut state = Self {
			graph,
			layout,
			camera,
			selection: Selection::default(),
			drag: DragState::default(),
			show_labels: options.show_labels,
			selection_enabled: options.selection,
			show_stats: options.show_stats,
			show_info: options.show_info,
			width,
			height,
			follow: true,
			projected: Vec::new(),
			stats: FrameStats::default(),
			info,
			announced_finish: false,
		};
		state.project();
		state
	}

	pub fn info_text(&self) -> String {
		self.info.to_string()
	}

	/// One step of the render loop, minus drawing.
	pub fn frame(&mut self, now_ms: f64) -> FrameUpdate {
		let mut update = FrameUpdate::default();

		let running = !self.layout.finished() && self.layout.generate(&mut self.graph);
		if self.follow && running {
			self.camera.fit(&self.graph);
		}
		if !running && !self.announced_finish {
			self.announced_finish = true;
			update.layout_finished = true;
			info!(
				"layout finished: {} nodes, {} edges",
				self.graph.node_count(),
				self.graph.edge_count()
			);
		}

		if self.show_info && self.info.set_calculating(running) {
			update.info = Some(self.info.to_string());
		}
		if self.show_stats {
			update.stats = self.stats.update(now_ms).map(str::to_owned);
		}

		self.project();
		update
	}

	pub fn stop_layout(&mut self) {
		self.layout.stop_calculating();
	}

	pub fn project(&mut self) {
		let (camera, w, h) = (&self.camera, self.width, self.height);
		self.projected.clear();
		self.projected.extend(
			self.graph
				.nodes()
				.iter()
				.map(|node| camera.project(node.position, w, h)),
		);
	}

	/// Nodes shrink with depth relative to the camera target.
	pub fn screen_radius(&self, p: &Projected) -> f64 {
		(NODE_RADIUS * self.camera.distance / p.depth).clamp(MIN_SCREEN_RADIUS, MAX_SCREEN_RADIUS)
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<NodeIdx> {
		selection::pick(&self.projected, |p| self.screen_radius(p) + HIT_SLOP, x, y)
	}

	pub fn begin_drag(&mut self, x: f64, y: f64, pan: bool) {
		self.drag = DragState {
			active: true,
			pan,
			moved: false,
			last_x: x,
			last_y: y,
		};
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		let (dx, dy) = (x - self.drag.last_x, y - self.drag.last_y);
		if dx == 0.0 && dy == 0.0 {
			return;
		}
		self.drag.moved = true;
		self.follow = false;
		// planar camera cannot orbit, so a plain drag pans instead
		if self.drag.pan || !self.camera.can_orbit() {
			self.camera.pan(dx, dy, self.height);
		} else {
			self.camera.orbit(dx, dy);
		}
		self.drag.last_x = x;
		self.drag.last_y = y;
		self.project();
	}

	/// Ends a drag. A press that never moved counts as a click and returns
	/// the node under the pointer, if any.
	pub fn end_drag(&mut self, x: f64, y: f64) -> Option<Option<NodeIdx>> {
		let was_click = self.drag.active && !self.drag.moved;
		self.drag = DragState::default();
		was_click.then(|| self.node_at_position(x, y))
	}

	/// Pointer left the canvas: drop the drag and the hover highlight.
	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.selection.set_hover(&self.graph, None);
	}

	pub fn zoom_at(&mut self, delta_y: f64) {
		self.follow = false;
		self.camera.zoom(if delta_y > 0.0 { 1.1 } else { 0.9 });
		self.project();
	}

	pub fn hover(&mut self, x: f64, y: f64) {
		if !self.selection_enabled || self.drag.active {
			return;
		}
		let hovered = self.node_at_position(x, y);
		self.selection.set_hover(&self.graph, hovered);
	}

	/// Applies a click; returns the overlay text for the new selection.
	pub fn click(&mut self, node: Option<NodeIdx>) -> Option<Option<String>> {
		if !self.selection_enabled || !self.selection.select(node) {
			return None;
		}
		Some(node.and_then(|idx| self.describe(idx)))
	}

	pub fn describe(&self, idx: NodeIdx) -> Option<String> {
		let node = self.graph.node(idx)?;
		let name = node.label.as_deref().unwrap_or(&node.id);
		let links = self.graph.neighbors(idx).len();
		Some(format!("{name} ({}, {links} connections)", node.group))
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.project();
	}
}
