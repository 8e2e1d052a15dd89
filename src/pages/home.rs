use leptos::prelude::*;
use log::{error, info};

use crate::components::graph_scene::GraphScene;
use crate::dataset;
use crate::graph::Graph;
use crate::options::GraphOptions;

/// Builds the track/tag graph from the bundled sample, capped by `options.limit`.
fn tracks_graph(options: &GraphOptions) -> Graph {
	let mut graph = options.new_graph();
	match dataset::sample_tracks() {
		Ok(tracks) => {
			let summary = dataset::populate(&mut graph, &tracks);
			info!(
				"built graph from {} tracks: {} track nodes, {} tag nodes, {} edges",
				tracks.len(),
				summary.tracks,
				summary.tags,
				summary.edges
			);
		}
		Err(err) => error!("bundled track list is malformed: {err}"),
	}
	graph
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let options = super::query_options();
	let graph_options = options.clone();
	let graph = Signal::derive(move || tracks_graph(&graph_options));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<GraphScene graph=graph options=options fullscreen=true />
				<div class="graph-overlay">
					<h1>"Tracks & Tags"</h1>
					<p class="subtitle">
						"Drag to rotate. Right-drag or shift-drag to pan. Scroll to zoom."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
