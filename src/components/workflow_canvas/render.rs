use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::workflow::{BranchKey, EdgePath, Graph, NODE_SIZE, WorkflowEditor};

use super::state::CanvasState;

const BACKGROUND: &str = "#0f172a";
const GRID: &str = "rgba(148, 163, 184, 0.08)";
const EDGE: &str = "#94a3b8";
const EDGE_LABEL: &str = "#f59e0b";
const SELECTED: &str = "#f8fafc";
const GRID_STEP: f64 = 50.0;
const ARROW: f64 = 12.0;

pub fn render(state: &CanvasState, editor: &WorkflowEditor, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(editor.graph(), ctx);
	draw_nodes(editor, ctx);
	ctx.restore();
}

fn draw_grid(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let step = GRID_STEP * state.transform.k;
	if step < 8.0 {
		return;
	}
	ctx.set_stroke_style_str(GRID);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	let origin = state.graph_to_screen(0.0, 0.0);
	let mut x = origin.x.rem_euclid(step);
	while x < state.width {
		ctx.move_to(x, 0.0);
		ctx.line_to(x, state.height);
		x += step;
	}
	let mut y = origin.y.rem_euclid(step);
	while y < state.height {
		ctx.move_to(0.0, y);
		ctx.line_to(state.width, y);
		y += step;
	}
	ctx.stroke();
}

fn draw_edges(graph: &Graph, ctx: &CanvasRenderingContext2d) {
	for edge in crate::workflow::derive_edges(graph) {
		let (Some(from), Some(to)) = (graph.find_node(&edge.from), graph.find_node(&edge.to)) else {
			continue;
		};
		let path = EdgePath::between(from, to, NODE_SIZE);
		let ((fx, fy), (tx, ty), cx) = (path.from, path.to, path.control_x);

		ctx.set_stroke_style_str(EDGE);
		ctx.set_line_width(3.0);
		ctx.begin_path();
		ctx.move_to(fx, fy);
		ctx.bezier_curve_to(cx, fy, cx, ty, tx, ty);
		ctx.stroke();

		let (mx, my) = path.mid;
		let (ux, uy) = path.mid_direction();
		let (back_x, back_y) = (mx - ux * ARROW, my - uy * ARROW);
		let (px, py) = (-uy * ARROW * 0.5, ux * ARROW * 0.5);
		ctx.set_fill_style_str(EDGE);
		ctx.begin_path();
		ctx.move_to(mx + ux * ARROW * 0.5, my + uy * ARROW * 0.5);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let Some(key) = edge.label {
			ctx.set_fill_style_str(EDGE_LABEL);
			ctx.set_font("700 14px sans-serif");
			ctx.set_text_align("center");
			let offset = match key {
				BranchKey::True => -10.0,
				BranchKey::False => 22.0,
			};
			let _ = ctx.fill_text(key.as_str(), mx, my + offset);
		}
	}
}

fn draw_nodes(editor: &WorkflowEditor, ctx: &CanvasRenderingContext2d) {
	let selected = editor.selected_id();
	for node in editor.graph().nodes() {
		let (x, y) = (node.x, node.y);

		ctx.set_fill_style_str(&node.color);
		ctx.fill_rect(x, y, NODE_SIZE, NODE_SIZE);

		if selected == Some(node.id.as_str()) {
			ctx.set_stroke_style_str(SELECTED);
			ctx.set_line_width(3.0);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(8.0),
				&JsValue::from_f64(4.0),
			));
			ctx.stroke_rect(x - 4.0, y - 4.0, NODE_SIZE + 8.0, NODE_SIZE + 8.0);
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		ctx.set_fill_style_str("white");
		ctx.set_text_align("center");
		ctx.set_font("28px sans-serif");
		let _ = ctx.fill_text(node.node_type().icon(), x + NODE_SIZE / 2.0, y + 48.0);
		ctx.set_font("600 14px sans-serif");
		let _ = ctx.fill_text_with_max_width(
			&node.label,
			x + NODE_SIZE / 2.0,
			y + 84.0,
			NODE_SIZE - 12.0,
		);

		if node.is_protected() {
			ctx.set_font("14px sans-serif");
			let _ = ctx.fill_text("🔒", x + NODE_SIZE - 12.0, y + 18.0);
		}
	}
}
