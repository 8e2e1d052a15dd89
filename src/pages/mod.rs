pub mod home;
pub mod not_found;
pub mod random;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::options::GraphOptions;

/// Options for the current page, taken from its query string.
fn query_options() -> GraphOptions {
	let query = use_query_map();
	query.with_untracked(|params| GraphOptions::from_lookup(|key| params.get(key)))
}
