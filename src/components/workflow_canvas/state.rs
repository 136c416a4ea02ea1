use crate::workflow::{IdGenerator, NODE_SIZE, Node, WorkflowEditor, ZoomConfig};

use super::types::Point;

/// Screen position of graph point `p` is `p * k + (x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragState {
	pub node_id: Option<String>,
	/// Pointer position relative to the node origin, in graph units.
	pub grab: Point,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanState {
	pub active: bool,
	pub start: Point,
	pub transform_start: Point,
}

/// View and pointer state of the canvas. Screen coordinates are relative to
/// the canvas element.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasState {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	zoom: ZoomConfig,
}

impl CanvasState {
	pub fn new(zoom: ZoomConfig, width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			zoom,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> Point {
		Point::new(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// Topmost node whose box contains the screen point.
	pub fn node_at_position<'g>(&self, nodes: &'g [Node], sx: f64, sy: f64) -> Option<&'g Node> {
		let p = self.screen_to_graph(sx, sy);
		nodes.iter().rev().find(|n| {
			p.x >= n.x && p.x <= n.x + NODE_SIZE && p.y >= n.y && p.y <= n.y + NODE_SIZE
		})
	}

	pub fn zoom_in(&mut self) {
		self.transform.k = self.zoom.clamp(self.transform.k + self.zoom.step);
	}

	pub fn zoom_out(&mut self) {
		self.transform.k = self.zoom.clamp(self.transform.k - self.zoom.step);
	}

	pub fn reset_view(&mut self) {
		self.transform = ViewTransform::default();
	}

	/// Zoom one wheel notch about the screen point, keeping the graph point
	/// under it fixed.
	pub fn wheel_zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			self.zoom.wheel_out
		} else {
			self.zoom.wheel_in
		};
		let new_k = self.zoom.clamp(self.transform.k * factor);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Zoom level as a whole percentage.
	pub fn zoom_percent(&self) -> u32 {
		(self.transform.k * 100.0).round() as u32
	}

	/// Press on a node selects it and starts a drag; press on empty canvas
	/// clears the selection and starts a pan.
	pub fn pointer_down<G: IdGenerator>(&mut self, editor: &mut WorkflowEditor<G>, sx: f64, sy: f64) {
		let hit = self
			.node_at_position(editor.graph().nodes(), sx, sy)
			.map(|n| (n.id.clone(), Point::new(n.x, n.y)));

		match hit {
			Some((id, origin)) => {
				let p = self.screen_to_graph(sx, sy);
				editor.select(&id);
				if editor.begin_drag(&id).is_ok() {
					self.drag = DragState {
						node_id: Some(id),
						grab: Point::new(p.x - origin.x, p.y - origin.y),
					};
				}
			}
			None => {
				editor.clear_selection();
				self.pan = PanState {
					active: true,
					start: Point::new(sx, sy),
					transform_start: Point::new(self.transform.x, self.transform.y),
				};
			}
		}
	}

	pub fn pointer_move<G: IdGenerator>(&mut self, editor: &mut WorkflowEditor<G>, sx: f64, sy: f64) {
		if self.drag.node_id.is_some() {
			let p = self.screen_to_graph(sx, sy);
			if editor
				.drag_to(p.x - self.drag.grab.x, p.y - self.drag.grab.y)
				.is_err()
			{
				self.drag = DragState::default();
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start.x + (sx - self.pan.start.x);
			self.transform.y = self.pan.transform_start.y + (sy - self.pan.start.y);
		}
	}

	/// Release ends any drag (one history entry) and any pan.
	pub fn pointer_up<G: IdGenerator>(&mut self, editor: &mut WorkflowEditor<G>) {
		if self.drag.node_id.take().is_some() {
			editor.end_drag();
		}
		self.pan.active = false;
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.node_id.is_some()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::workflow::{EditorConfig, NodeType, START_NODE_ID};

	fn canvas() -> CanvasState {
		CanvasState::new(ZoomConfig::default(), 800.0, 600.0)
	}

	#[test]
	fn screen_and_graph_coordinates_round_trip() {
		let mut s = canvas();
		s.transform = ViewTransform {
			x: 40.0,
			y: -20.0,
			k: 2.0,
		};
		assert_eq!(s.screen_to_graph(140.0, 80.0), Point::new(50.0, 50.0));
		assert_eq!(s.graph_to_screen(50.0, 50.0), Point::new(140.0, 80.0));
	}

	#[test]
	fn zoom_buttons_step_within_bounds() {
		let mut s = canvas();
		for _ in 0..20 {
			s.zoom_in();
		}
		assert_eq!(s.transform.k, 2.0);
		for _ in 0..20 {
			s.zoom_out();
		}
		assert_eq!(s.transform.k, 0.5);
		s.reset_view();
		assert_eq!(s.transform, ViewTransform::default());
		assert_eq!(s.zoom_percent(), 100);
	}

	#[test]
	fn wheel_zoom_keeps_cursor_point_fixed() {
		let mut s = canvas();
		let before = s.screen_to_graph(300.0, 200.0);
		s.wheel_zoom(300.0, 200.0, -1.0);
		let after = s.screen_to_graph(300.0, 200.0);
		assert!((s.transform.k - 1.1).abs() < 1e-9);
		assert!((before.x - after.x).abs() < 1e-9);
		assert!((before.y - after.y).abs() < 1e-9);
	}

	#[test]
	fn wheel_down_zooms_out_by_a_tenth() {
		let mut s = canvas();
		s.wheel_zoom(300.0, 200.0, 1.0);
		assert!((s.transform.k - 0.9).abs() < 1e-9);
		s.wheel_zoom(300.0, 200.0, -1.0);
		assert!((s.transform.k - 0.99).abs() < 1e-9);
		for _ in 0..20 {
			s.wheel_zoom(300.0, 200.0, 1.0);
		}
		assert_eq!(s.transform.k, 0.5);
	}

	#[test]
	fn hit_test_uses_node_boxes_and_prefers_topmost() {
		let s = canvas();
		let nodes = vec![
			Node::new("under", NodeType::Action, 0.0, 0.0),
			Node::new("over", NodeType::Action, 60.0, 60.0),
		];
		assert_eq!(s.node_at_position(&nodes, 10.0, 10.0).unwrap().id, "under");
		assert_eq!(s.node_at_position(&nodes, 100.0, 100.0).unwrap().id, "over");
		assert!(s.node_at_position(&nodes, 500.0, 500.0).is_none());
	}

	#[test]
	fn dragging_a_node_moves_it_and_commits_once() {
		let mut editor = WorkflowEditor::new(EditorConfig::default());
		let mut s = canvas();

		// start node occupies (150, 300) .. (270, 420)
		s.pointer_down(&mut editor, 160.0, 310.0);
		assert_eq!(editor.selected_id(), Some(START_NODE_ID));
		assert!(s.is_dragging());

		s.pointer_move(&mut editor, 200.0, 350.0);
		s.pointer_move(&mut editor, 260.0, 410.0);
		s.pointer_up(&mut editor);

		let start = editor.graph().find_node(START_NODE_ID).unwrap();
		assert_eq!((start.x, start.y), (250.0, 400.0));
		assert_eq!(editor.history().len(), 2);
		assert!(!s.is_dragging());
	}

	#[test]
	fn drag_accounts_for_zoom() {
		let mut editor = WorkflowEditor::new(EditorConfig::default());
		let mut s = canvas();
		s.transform.k = 2.0;

		s.pointer_down(&mut editor, 310.0, 610.0);
		s.pointer_move(&mut editor, 330.0, 610.0);
		s.pointer_up(&mut editor);

		let start = editor.graph().find_node(START_NODE_ID).unwrap();
		assert_eq!((start.x, start.y), (160.0, 300.0));
	}

	#[test]
	fn pressing_empty_canvas_pans_and_deselects() {
		let mut editor = WorkflowEditor::new(EditorConfig::default());
		editor.select(START_NODE_ID);
		let mut s = canvas();

		s.pointer_down(&mut editor, 10.0, 10.0);
		assert_eq!(editor.selected_id(), None);
		s.pointer_move(&mut editor, 30.0, 5.0);
		assert_eq!((s.transform.x, s.transform.y), (20.0, -5.0));

		s.pointer_up(&mut editor);
		s.pointer_move(&mut editor, 100.0, 100.0);
		assert_eq!((s.transform.x, s.transform.y), (20.0, -5.0));
		assert_eq!(editor.history().len(), 1);
	}
}
