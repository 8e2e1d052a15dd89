use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{SceneState, node_color};

const BACKGROUND: &str = "#1a1a2e";

pub fn render(state: &SceneState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	if state.show_labels {
		draw_labels(state, ctx);
	}
	if state.selection_enabled && state.selection.has_highlight() {
		draw_selection(state, ctx);
	}
}

fn draw_edges(state: &SceneState, ctx: &CanvasRenderingContext2d) {
	let dimmed = state.selection_enabled && state.selection.has_highlight();

	for edge in state.graph.edges() {
		let (Some(a), Some(b)) = (state.projected[edge.source], state.projected[edge.target])
		else {
			continue;
		};
		let lit = dimmed
			&& state.selection.is_highlighted(edge.source)
			&& state.selection.is_highlighted(edge.target);
		let alpha = match (dimmed, lit) {
			(false, _) => 0.5,
			(true, true) => 0.9,
			(true, false) => 0.12,
		};

		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {alpha})"));
		ctx.set_line_width(if lit { 2.0 } else { 1.0 });
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

/// Node indices sorted far to near, so closer nodes paint over farther ones.
fn depth_order(state: &SceneState) -> Vec<usize> {
	let mut order: Vec<usize> = (0..state.projected.len())
		.filter(|&i| state.projected[i].is_some())
		.collect();
	order.sort_by(|&a, &b| {
		let depth = |i: usize| state.projected[i].map_or(0.0, |p| p.depth);
		depth(b).total_cmp(&depth(a))
	});
	order
}

fn draw_nodes(state: &SceneState, ctx: &CanvasRenderingContext2d) {
	let dimmed = state.selection_enabled && state.selection.has_highlight();

	for idx in depth_order(state) {
		let (Some(p), Some(node)) = (state.projected[idx], state.graph.node(idx)) else {
			continue;
		};
		let faded = dimmed && !state.selection.is_highlighted(idx);
		ctx.set_global_alpha(if faded { 0.3 } else { 1.0 });
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, state.screen_radius(&p), 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_color(node.group));
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_labels(state: &SceneState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("11px sans-serif");
	for (idx, node) in state.graph.nodes().iter().enumerate() {
		let (Some(p), Some(label)) = (state.projected[idx], node.label.as_deref()) else {
			continue;
		};
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		let _ = ctx.fill_text(label, p.x + state.screen_radius(&p) + 3.0, p.y + 3.0);
	}
}

fn draw_selection(state: &SceneState, ctx: &CanvasRenderingContext2d) {
	let selection = &state.selection;
	let focused = selection.hovered.into_iter().chain(selection.selected);

	for idx in focused {
		let (Some(p), Some(node)) = (state.projected[idx], state.graph.node(idx)) else {
			continue;
		};
		let radius = state.screen_radius(&p) + 4.0;
		let dashed = selection.selected == Some(idx);

		if dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(4.0),
				&JsValue::from_f64(3.0),
			));
		}
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.85)");
		ctx.set_line_width(1.5);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		// the focused node keeps its name even when labels are off
		if !state.show_labels {
			if let Some(label) = node.label.as_deref() {
				ctx.set_font("12px sans-serif");
				ctx.set_fill_style_str("white");
				let _ = ctx.fill_text(label, p.x + radius + 3.0, p.y + 4.0);
			}
		}
	}
}
