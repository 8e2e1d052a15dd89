//! Orbit camera and the perspective projection onto the canvas.

use crate::graph::{Graph, Point3};

const NEAR: f64 = 1.0;
const MIN_DISTANCE: f64 = 10.0;
const MAX_DISTANCE: f64 = 100_000.0;
const ORBIT_SPEED: f64 = 0.01;

/// A point after projection: canvas pixels plus the camera-space depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	pub depth: f64,
}

#[derive(Clone, Debug)]
pub struct OrbitCamera {
	pub target: Point3,
	pub distance: f64,
	pub yaw: f64,
	pub pitch: f64,
	/// Vertical field of view in radians.
	pub fov: f64,
	locked: bool,
}

impl OrbitCamera {
	/// `orbit` is a no-op when `can_orbit` is false (planar layouts).
	pub fn new(can_orbit: bool) -> Self {
		Self {
			target: Point3::ZERO,
			distance: 5000.0,
			yaw: 0.0,
			pitch: 0.0,
			fov: 40f64.to_radians(),
			locked: !can_orbit,
		}
	}

	pub fn can_orbit(&self) -> bool {
		!self.locked
	}

	pub fn eye(&self) -> Point3 {
		let offset = Point3::new(
			self.distance * self.pitch.cos() * self.yaw.sin(),
			self.distance * self.pitch.sin(),
			self.distance * self.pitch.cos() * self.yaw.cos(),
		);
		self.target + offset
	}

	/// Forward, right and up unit vectors.
	fn basis(&self) -> (Point3, Point3, Point3) {
		let forward = Point3::new(
			-self.pitch.cos() * self.yaw.sin(),
			-self.pitch.sin(),
			-self.pitch.cos() * self.yaw.cos(),
		);
		let right = Point3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
		(forward, right, right.cross(forward))
	}

	fn focal_length(&self, height: f64) -> f64 {
		(height / 2.0) / (self.fov / 2.0).tan()
	}

	pub fn project(&self, point: Point3, width: f64, height: f64) -> Option<Projected> {
		let (forward, right, up) = self.basis();
		let rel = point - self.eye();
		let depth = rel.dot(forward);
		if depth < NEAR {
			return None;
		}
		let scale = self.focal_length(height) / depth;
		Some(Projected {
			x: width / 2.0 + rel.dot(right) * scale,
			y: height / 2.0 - rel.dot(up) * scale,
			depth,
		})
	}

	pub fn orbit(&mut self, dx: f64, dy: f64) {
		if self.locked {
			return;
		}
		self.yaw -= dx * ORBIT_SPEED;
		self.pitch = (self.pitch + dy * ORBIT_SPEED).clamp(-1.5, 1.5);
	}

	/// Moves the target so the scene follows a drag of `dx`, `dy` pixels.
	pub fn pan(&mut self, dx: f64, dy: f64, height: f64) {
		let (_, right, up) = self.basis();
		let units_per_pixel = self.distance / self.focal_length(height);
		self.target = self.target - right * (dx * units_per_pixel) + up * (dy * units_per_pixel);
	}

	pub fn zoom(&mut self, factor: f64) {
		self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
	}

	/// Frames every node of `graph`.
	pub fn fit(&mut self, graph: &Graph) {
		let (center, radius) = graph.bounds();
		self.target = center;
		self.distance =
			(radius.max(50.0) * 1.1 / (self.fov / 2.0).sin()).clamp(MIN_DISTANCE, MAX_DISTANCE);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Node, NodeGroup};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	#[test]
	fn target_projects_to_canvas_center() {
		let mut camera = OrbitCamera::new(true);
		camera.orbit(120.0, -40.0);
		let p = camera.project(camera.target, W, H).unwrap();
		assert!((p.x - W / 2.0).abs() < 1e-6);
		assert!((p.y - H / 2.0).abs() < 1e-6);
		assert!((p.depth - camera.distance).abs() < 1e-6);
	}

	#[test]
	fn screen_axes_follow_world_axes_head_on() {
		let camera = OrbitCamera::new(false);
		let right = camera.project(Point3::new(100.0, 0.0, 0.0), W, H).unwrap();
		let up = camera.project(Point3::new(0.0, 100.0, 0.0), W, H).unwrap();
		assert!(right.x > W / 2.0);
		assert!(up.y < H / 2.0);
	}

	#[test]
	fn basis_stays_orthonormal_while_orbiting() {
		let mut camera = OrbitCamera::new(true);
		for _ in 0..5 {
			camera.orbit(37.0, -21.0);
			let (forward, right, up) = camera.basis();
			for axis in [forward, right, up] {
				assert!((axis.length() - 1.0).abs() < 1e-9);
			}
			assert!(forward.dot(right).abs() < 1e-9);
			assert!(forward.dot(up).abs() < 1e-9);
			assert!(right.dot(up).abs() < 1e-9);
			assert!(up.y > 0.0);
		}
	}

	#[test]
	fn points_behind_camera_are_culled() {
		let camera = OrbitCamera::new(true);
		let behind = camera.eye() + Point3::new(0.0, 0.0, 10.0);
		assert!(camera.project(behind, W, H).is_none());
	}

	#[test]
	fn locked_camera_ignores_orbit() {
		let mut camera = OrbitCamera::new(false);
		camera.orbit(50.0, 50.0);
		assert_eq!(camera.yaw, 0.0);
		assert_eq!(camera.pitch, 0.0);
	}

	#[test]
	fn pitch_is_clamped() {
		let mut camera = OrbitCamera::new(true);
		camera.orbit(0.0, 10_000.0);
		assert_eq!(camera.pitch, 1.5);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut camera = OrbitCamera::new(true);
		for _ in 0..200 {
			camera.zoom(0.5);
		}
		assert_eq!(camera.distance, MIN_DISTANCE);
	}

	#[test]
	fn pan_drags_scene_with_pointer() {
		let mut camera = OrbitCamera::new(false);
		let origin = Point3::ZERO;
		let before = camera.project(origin, W, H).unwrap();
		camera.pan(25.0, 10.0, H);
		let after = camera.project(origin, W, H).unwrap();
		assert!((after.x - before.x - 25.0).abs() < 1e-6);
		assert!((after.y - before.y - 10.0).abs() < 1e-6);
	}

	#[test]
	fn fit_keeps_nodes_on_screen() {
		let mut graph = Graph::new();
		for (i, pos) in [(-900.0, 400.0), (700.0, -800.0), (100.0, 950.0)]
			.into_iter()
			.enumerate()
		{
			let idx = graph
				.add_node(Node::new(NodeGroup::Tags.node_id(i), NodeGroup::Tags, None))
				.unwrap();
			graph.nodes_mut()[idx].position = Point3::new(pos.0, pos.1, 0.0);
		}
		let mut camera = OrbitCamera::new(false);
		camera.fit(&graph);
		for node in graph.nodes() {
			let p = camera.project(node.position, W, H).unwrap();
			assert!((0.0..=W).contains(&p.x) && (0.0..=H).contains(&p.y));
		}
	}
}
