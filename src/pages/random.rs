use leptos::prelude::*;
use log::info;

use crate::components::graph_scene::GraphScene;
use crate::dataset;

/// Randomly connected nodes, sized by the `nodes` and `edges` options.
#[component]
pub fn RandomGraph() -> impl IntoView {
	let options = super::query_options();
	let (nodes_count, edges_count) = (options.nodes_count, options.edges_count);
	let graph_options = options.clone();
	let graph = Signal::derive(move || {
		let mut graph = graph_options.new_graph();
		dataset::random_tree(&mut graph, nodes_count, edges_count);
		info!(
			"random graph: {} nodes, {} edges",
			graph.node_count(),
			graph.edge_count()
		);
		graph
	});

	view! {
		<div class="fullscreen-graph">
			<GraphScene graph=graph options=options fullscreen=true />
			<div class="graph-overlay">
				<h1>"Random Graph"</h1>
				<p class="subtitle">{format!("{nodes_count} nodes, up to {edges_count} links each")}</p>
			</div>
		</div>
	}
}
