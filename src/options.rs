//! Construction options, read from the page's query string.

use std::str::FromStr;

use log::warn;

use crate::graph::Graph;
use crate::layout::{LayoutEngine, LayoutMode, LayoutOptions};

#[derive(Clone, Debug, PartialEq)]
pub struct GraphOptions {
	pub layout: LayoutMode,
	pub layout_options: LayoutOptions,
	pub show_stats: bool,
	pub show_info: bool,
	pub show_labels: bool,
	pub selection: bool,
	pub limit: usize,
	/// Node count for the random graph page.
	pub nodes_count: usize,
	/// Upper bound of links per node on the random graph page.
	pub edges_count: usize,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			layout: LayoutMode::default(),
			layout_options: LayoutOptions::default(),
			show_stats: false,
			show_info: false,
			show_labels: false,
			selection: false,
			limit: 100,
			nodes_count: 20,
			edges_count: 10,
		}
	}
}

impl GraphOptions {
	/// Overlays every recognised key found by `lookup` on the defaults.
	/// Values that fail to parse are logged and ignored.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut options = Self::default();

		if let Some(raw) = lookup("layout") {
			match LayoutMode::parse(&raw) {
				Some(mode) => options.layout = mode,
				None => warn!("ignoring layout={raw:?}: expected 2d or 3d"),
			}
		}
		if let Some(raw) = lookup("engine") {
			match LayoutEngine::parse(&raw) {
				Some(engine) => options.layout_options.engine = Some(engine),
				None => warn!("ignoring engine={raw:?}: expected force or spring"),
			}
		}

		read_flag(&lookup, "stats", &mut options.show_stats);
		read_flag(&lookup, "info", &mut options.show_info);
		read_flag(&lookup, "labels", &mut options.show_labels);
		read_flag(&lookup, "selection", &mut options.selection);

		read_value(&lookup, "limit", &mut options.limit);
		read_value(&lookup, "nodes", &mut options.nodes_count);
		read_value(&lookup, "edges", &mut options.edges_count);

		let layout = &mut options.layout_options;
		read_positive(&lookup, "attraction", &mut layout.attraction);
		read_positive(&lookup, "repulsion", &mut layout.repulsion);
		read_value(&lookup, "iterations", &mut layout.iterations);
		read_positive(&lookup, "width", &mut layout.width);
		read_positive(&lookup, "height", &mut layout.height);

		options
	}

	/// Empty graph honouring `limit`; zero means uncapped.
	pub fn new_graph(&self) -> Graph {
		match self.limit {
			0 => Graph::new(),
			limit => Graph::with_limit(limit),
		}
	}
}

fn parse_flag(raw: &str) -> Option<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"" | "1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}

fn read_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut bool) {
	let Some(raw) = lookup(key) else {
		return;
	};
	match parse_flag(&raw) {
		Some(value) => *slot = value,
		None => warn!("ignoring {key}={raw:?}: expected a boolean"),
	}
}

fn read_value<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
	let Some(raw) = lookup(key) else {
		return;
	};
	match raw.trim().parse() {
		Ok(value) => *slot = value,
		Err(_) => warn!("ignoring {key}={raw:?}: not a valid number"),
	}
}

/// Like [`read_value`], but rejects zero, negative and non-finite numbers.
fn read_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut f64) {
	let mut value = *slot;
	read_value(lookup, key, &mut value);
	if value.is_finite() && value > 0.0 {
		*slot = value;
	} else {
		warn!("ignoring {key}={value}: expected a positive finite number");
	}
}
