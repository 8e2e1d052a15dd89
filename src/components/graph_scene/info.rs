use std::fmt;

pub const CALCULATING: &str = "Calculating layout...";

/// Status line shown in the `graph-info` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfoText {
	pub nodes: String,
	pub edges: String,
	pub calc: String,
}

impl InfoText {
	pub fn new(nodes: usize, edges: usize) -> Self {
		Self {
			nodes: format!("Nodes {nodes}"),
			edges: format!("Edges {edges}"),
			calc: String::new(),
		}
	}

	/// Updates the layout status. Returns whether the text changed.
	pub fn set_calculating(&mut self, running: bool) -> bool {
		let calc = if running { CALCULATING } else { "" };
		if self.calc == calc {
			return false;
		}
		self.calc = calc.to_owned();
		true
	}
}

impl fmt::Display for InfoText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts: Vec<&str> = [&self.nodes, &self.edges, &self.calc]
			.into_iter()
			.map(String::as_str)
			.filter(|s| !s.is_empty())
			.collect();
		f.write_str(&parts.join(" - "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn joins_non_empty_parts() {
		let mut info = InfoText::new(12, 30);
		assert!(info.set_calculating(true));
		assert_eq!(info.to_string(), "Nodes 12 - Edges 30 - Calculating layout...");
		assert!(!info.set_calculating(true));
		assert!(info.set_calculating(false));
		assert_eq!(info.to_string(), "Nodes 12 - Edges 30");
	}
}
