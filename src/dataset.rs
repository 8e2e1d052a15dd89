//! Sample data and the transforms that turn it into a [`Graph`].

use serde::Deserialize;

use crate::graph::{Graph, Node, NodeGroup};

const SAMPLE_TRACKS: &str = include_str!("../data/tracks.json");

/// A music track and the tags attached to it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Track {
	pub id: u64,
	#[serde(default)]
	pub artist: Option<String>,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub tags: Vec<String>,
}

impl Track {
	fn label(&self) -> Option<String> {
		match (&self.artist, &self.title) {
			(Some(artist), Some(title)) => Some(format!("{artist} - {title}")),
			(Some(only), None) | (None, Some(only)) => Some(only.clone()),
			(None, None) => None,
		}
	}
}

/// What [`populate`] actually inserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
	pub tracks: usize,
	pub tags: usize,
	pub edges: usize,
}

/// The bundled track list.
pub fn sample_tracks() -> Result<Vec<Track>, serde_json::Error> {
	serde_json::from_str(SAMPLE_TRACKS)
}

/// Adds one node per tagged track, one node per distinct tag and one edge
/// per (track, tag) association. Untagged tracks are skipped.
pub fn populate(graph: &mut Graph, tracks: &[Track]) -> BuildSummary {
	let mut summary = BuildSummary::default();

	for track in tracks {
		if track.tags.is_empty() {
			continue;
		}
		let track_node = Node::new(
			NodeGroup::Tracks.node_id(track.id),
			NodeGroup::Tracks,
			track.label(),
		);
		let Some(track_idx) = graph.add_node(track_node) else {
			continue;
		};
		summary.tracks += 1;

		for tag in &track.tags {
			let tag_id = NodeGroup::Tags.node_id(tag);
			let tag_idx = match graph.node_by_id(&tag_id) {
				Some(idx) => idx,
				None => {
					let node = Node::new(tag_id, NodeGroup::Tags, Some(tag.clone()));
					let Some(idx) = graph.add_node(node) else {
						continue;
					};
					summary.tags += 1;
					idx
				}
			};
			if graph.add_edge(track_idx, tag_idx) {
				summary.edges += 1;
			}
		}
	}

	summary
}

/// Deterministic random tree with a few extra cross links. Node `i > 0`
/// links to between one and `edges_count` earlier nodes.
pub fn random_tree(graph: &mut Graph, nodes_count: usize, edges_count: usize) {
	for i in 0..nodes_count {
		let node = Node::new(
			NodeGroup::Nodes.node_id(i),
			NodeGroup::Nodes,
			(i < 10).then(|| format!("Node {i}")),
		);
		let Some(idx) = graph.add_node(node) else {
			break;
		};
		if idx == 0 {
			continue;
		}

		let wanted = 1 + (rand_simple(idx as u64) * edges_count.max(1) as f64) as usize;
		for j in 0..wanted.min(edges_count.max(1)) {
			let seed = (idx as u64) * 31 + j as u64;
			let target = (rand_simple(seed) * idx as f64) as usize;
			graph.add_edge(idx, target);
		}
	}
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: u64) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	fn track(id: u64, tags: &[&str]) -> Track {
		Track {
			id,
			tags: tags.iter().map(|t| t.to_string()).collect(),
			..Track::default()
		}
	}

	#[test]
	fn tagged_tracks_get_one_node_and_one_edge_per_tag() {
		let tracks = [track(1, &["rock", "90s"]), track(2, &["rock", "jazz", "90s"])];
		let mut graph = Graph::new();
		let summary = populate(&mut graph, &tracks);

		assert_eq!(summary, BuildSummary { tracks: 2, tags: 3, edges: 5 });
		assert_eq!(graph.node_count(), 5);
		assert_eq!(graph.edge_count(), 5);

		let t2 = graph.node_by_id("t2").unwrap();
		let neighbours: HashSet<_> = graph
			.neighbors(t2)
			.into_iter()
			.map(|i| graph.node(i).unwrap().id.clone())
			.collect();
		assert_eq!(
			neighbours,
			HashSet::from(["grock".into(), "gjazz".into(), "g90s".into()])
		);
	}

	#[test]
	fn untagged_tracks_produce_nothing() {
		let tracks = [track(1, &[]), track(2, &["ambient"])];
		let mut graph = Graph::new();
		populate(&mut graph, &tracks);

		assert!(graph.node_by_id("t1").is_none());
		assert!(graph.node_by_id("t2").is_some());
		assert_eq!(graph.edge_count(), 1);
	}

	#[test]
	fn tag_nodes_are_shared_and_labelled() {
		let tracks: Vec<_> = (0..5).map(|i| track(i, &["shoegaze"])).collect();
		let mut graph = Graph::new();
		populate(&mut graph, &tracks);

		let tags: Vec<_> = graph
			.nodes()
			.iter()
			.filter(|n| n.group == NodeGroup::Tags)
			.collect();
		assert_eq!(tags.len(), 1);
		assert_eq!(tags[0].label.as_deref(), Some("shoegaze"));
		assert_eq!(graph.edge_count(), 5);
	}

	#[test]
	fn repeated_tag_on_one_track_links_once() {
		let mut graph = Graph::new();
		let summary = populate(&mut graph, &[track(9, &["ambient", "ambient"])]);
		assert_eq!(summary.edges, 1);
	}

	#[test]
	fn limit_drops_overflowing_tracks_and_tags() {
		let tracks = [track(1, &["a", "b"]), track(2, &["a"])];
		let mut graph = Graph::with_limit(2);
		let summary = populate(&mut graph, &tracks);

		assert_eq!(summary, BuildSummary { tracks: 1, tags: 1, edges: 1 });
		assert!(graph.node_by_id("gb").is_none());
		assert!(graph.node_by_id("t2").is_none());
	}

	#[test]
	fn bundled_sample_parses() {
		let tracks = sample_tracks().unwrap();
		assert!(tracks.len() > 20);
		assert!(tracks.iter().any(|t| t.tags.is_empty()));

		let mut graph = Graph::new();
		let summary = populate(&mut graph, &tracks);
		let tagged = tracks.iter().filter(|t| !t.tags.is_empty()).count();
		assert_eq!(summary.tracks, tagged);
	}

	#[test]
	fn track_label_uses_available_fields() {
		let mut t = track(1, &["x"]);
		assert_eq!(t.label(), None);
		t.title = Some("Alison".into());
		assert_eq!(t.label().as_deref(), Some("Alison"));
		t.artist = Some("Slowdive".into());
		assert_eq!(t.label().as_deref(), Some("Slowdive - Alison"));
	}

	#[test]
	fn random_tree_is_connected() {
		let mut graph = Graph::new();
		random_tree(&mut graph, 50, 3);

		assert_eq!(graph.node_count(), 50);
		assert!(graph.edge_count() >= 49);
		assert!(graph.nodes().iter().all(|n| n.group == NodeGroup::Nodes));
		assert_eq!(graph.node_by_id("n0"), Some(0));
		for idx in 1..50 {
			assert!(graph.neighbors(idx).iter().any(|&n| n < idx));
		}
	}

	#[test]
	fn random_tree_respects_limit() {
		let mut graph = Graph::with_limit(10);
		random_tree(&mut graph, 50, 2);
		assert_eq!(graph.node_count(), 10);
	}
}
