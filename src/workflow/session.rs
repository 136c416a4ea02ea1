//! The editing session behind the canvas and panels.
//!
//! Owns the working graph, the committed history, id generation and the
//! current selection. Structural edits are applied, relaid out when the node
//! count changed, then committed. Drags only touch the working graph until
//! they end.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::config::{EditorConfig, HistoryMode};
use super::edges::{Edge, derive_edges};
use super::editor;
use super::error::EditError;
use super::export::WorkflowExport;
use super::history::History;
use super::ids::{IdGenerator, SequentialIds};
use super::layout::compute_layout;
use super::model::{BranchKey, Graph, Node, NodeType};
use super::validate::validate;

/// Node and connection counts for the statistics panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphStats {
	/// Number of nodes.
	pub nodes: usize,
	/// Number of filled successor slots.
	pub connections: usize,
}

#[derive(Clone, Debug, PartialEq)]
struct Drag {
	node_id: String,
	origin: (f64, f64),
}

/// An open workflow and everything needed to edit it.
#[derive(Clone, Debug)]
pub struct WorkflowEditor<G = SequentialIds> {
	graph: Graph,
	history: History<Graph>,
	ids: G,
	config: EditorConfig,
	selected: Option<String>,
	drag: Option<Drag>,
}

impl Default for WorkflowEditor {
	fn default() -> Self {
		Self::new(EditorConfig::default())
	}
}

impl WorkflowEditor {
	/// A session on the initial, start-only workflow.
	pub fn new(config: EditorConfig) -> Self {
		Self::with_ids(config, SequentialIds::default())
	}
}

impl<G: IdGenerator> WorkflowEditor<G> {
	/// A session on the initial workflow, drawing node ids from `ids`.
	pub fn with_ids(config: EditorConfig, ids: G) -> Self {
		Self::open(Graph::default(), config, ids)
	}

	/// A session on an existing graph. The graph is laid out and becomes the
	/// first history entry.
	pub fn open(graph: Graph, config: EditorConfig, ids: G) -> Self {
		for violation in validate(&graph) {
			warn!("opened workflow is malformed: {violation}");
		}
		let graph = compute_layout(&graph, &config.layout);
		let history = History::with_limit(graph.clone(), config.history_limit);
		Self {
			graph,
			history,
			ids,
			config,
			selected: None,
			drag: None,
		}
	}

	/// The working graph, including an in-flight drag.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Committed snapshots.
	pub fn history(&self) -> &History<Graph> {
		&self.history
	}

	/// Settings the editor was opened with.
	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	/// Edges of the working graph.
	pub fn edges(&self) -> Vec<Edge> {
		derive_edges(&self.graph)
	}

	/// Counts for the statistics panel.
	pub fn stats(&self) -> GraphStats {
		GraphStats {
			nodes: self.graph.len(),
			connections: self.graph.link_count(),
		}
	}

	// ── selection ──────────────────────────────────────────────────────

	/// Id of the selected node.
	pub fn selected_id(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// The selected node, if it still exists.
	pub fn selected_node(&self) -> Option<&Node> {
		self.selected.as_deref().and_then(|id| self.graph.find_node(id))
	}

	/// Select `id`. Unknown ids leave the selection unchanged.
	pub fn select(&mut self, id: &str) -> bool {
		if !self.graph.contains(id) {
			return false;
		}
		self.selected = Some(id.to_owned());
		true
	}

	/// Deselect.
	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	/// `Editing: {label}` while a node is selected, `Ready` otherwise.
	pub fn status(&self) -> String {
		match self.selected_node() {
			Some(node) => format!("Editing: {}", node.label),
			None => "Ready".to_owned(),
		}
	}

	/// Whether nodes can be inserted after `id`.
	pub fn can_add_after(&self, id: &str) -> bool {
		self.graph
			.find_node(id)
			.is_some_and(|n| n.node_type() != NodeType::End)
	}

	// ── structural edits ───────────────────────────────────────────────

	/// Insert a `node_type` node after `parent_id`. See
	/// [`editor::insert_after`].
	pub fn insert_after(
		&mut self,
		parent_id: &str,
		node_type: NodeType,
		branch: Option<BranchKey>,
	) -> Result<(), EditError> {
		let next = editor::insert_after(&self.graph, parent_id, node_type, branch, &mut self.ids)
			.inspect_err(|e| warn!("insert after {parent_id} declined: {e}"))?;
		info!("inserted {node_type} after {parent_id}");
		self.commit(next);
		Ok(())
	}

	/// Delete `node_id`, reconnecting its parent. Clears the selection.
	pub fn delete_node(&mut self, node_id: &str) -> Result<(), EditError> {
		let next = editor::delete_node(&self.graph, node_id)
			.inspect_err(|e| warn!("delete of {node_id} declined: {e}"))?;
		info!("deleted {node_id}");
		self.selected = None;
		self.commit(next);
		Ok(())
	}

	/// Relabel `node_id`, recorded per [`HistoryMode`].
	pub fn update_label(&mut self, node_id: &str, label: &str) -> Result<(), EditError> {
		let next = editor::update_label(&self.graph, node_id, label)
			.inspect_err(|e| warn!("relabel of {node_id} declined: {e}"))?;
		info!("relabelled {node_id}");
		self.cancel_drag();
		self.graph = next;
		match self.config.label_history {
			HistoryMode::PerEdit => self.history.push(self.graph.clone()),
			HistoryMode::Coalesce => self
				.history
				.push_coalesced(self.graph.clone(), &format!("label:{node_id}")),
		}
		Ok(())
	}

	fn commit(&mut self, next: Graph) {
		self.cancel_drag();
		self.graph = if next.len() != self.graph.len() {
			compute_layout(&next, &self.config.layout)
		} else {
			next
		};
		if cfg!(debug_assertions) {
			for violation in validate(&self.graph) {
				warn!("edit broke an invariant: {violation}");
			}
		}
		self.history.push(self.graph.clone());
	}

	// ── dragging ───────────────────────────────────────────────────────

	/// Start moving `node_id`. Moves stay out of history until
	/// [`end_drag`](Self::end_drag).
	pub fn begin_drag(&mut self, node_id: &str) -> Result<(), EditError> {
		let node = self
			.graph
			.find_node(node_id)
			.ok_or_else(|| EditError::not_found(node_id))?;
		self.drag = Some(Drag {
			node_id: node_id.to_owned(),
			origin: (node.x, node.y),
		});
		Ok(())
	}

	/// Move the dragged node to `(x, y)`. Does nothing without a drag.
	pub fn drag_to(&mut self, x: f64, y: f64) -> Result<(), EditError> {
		let Some(drag) = &self.drag else {
			return Ok(());
		};
		self.graph = editor::move_node(&self.graph, &drag.node_id, x, y)?;
		Ok(())
	}

	/// Finish the drag, committing one history entry if the node moved.
	pub fn end_drag(&mut self) -> bool {
		let Some(drag) = self.drag.take() else {
			return false;
		};
		let moved = self
			.graph
			.find_node(&drag.node_id)
			.is_some_and(|n| (n.x, n.y) != drag.origin);
		if moved {
			debug!("committed drag of {}", drag.node_id);
			self.history.push(self.graph.clone());
		}
		moved
	}

	/// Whether a node drag is in flight.
	pub fn is_dragging(&self) -> bool {
		self.drag.is_some()
	}

	// an interrupted drag keeps its current position in the working graph
	fn cancel_drag(&mut self) {
		self.drag = None;
	}

	// ── history ────────────────────────────────────────────────────────

	/// Whether [`undo`](Self::undo) would change anything.
	pub fn can_undo(&self) -> bool {
		self.history.can_undo()
	}

	/// Whether [`redo`](Self::redo) would change anything.
	pub fn can_redo(&self) -> bool {
		self.history.can_redo()
	}

	/// Restore the previous snapshot. Returns whether anything changed.
	pub fn undo(&mut self) -> bool {
		let moved = self.history.undo();
		if moved {
			self.restore();
		}
		moved
	}

	/// Restore the next snapshot. Returns whether anything changed.
	pub fn redo(&mut self) -> bool {
		let moved = self.history.redo();
		if moved {
			self.restore();
		}
		moved
	}

	fn restore(&mut self) {
		self.drag = None;
		self.graph = self.history.current().clone();
		if self
			.selected
			.as_deref()
			.is_some_and(|id| !self.graph.contains(id))
		{
			self.selected = None;
		}
		debug!(
			"history at {} of {}",
			self.history.index() + 1,
			self.history.len()
		);
	}

	// ── saving ─────────────────────────────────────────────────────────

	/// The working graph in its saved shape.
	pub fn export(&self, timestamp: DateTime<Utc>) -> WorkflowExport {
		WorkflowExport::new(&self.graph, timestamp)
	}

	/// Serialize the workflow and write it to the log. Returns the JSON.
	pub fn save(&self, timestamp: DateTime<Utc>) -> Result<String, EditError> {
		let json = self.export(timestamp).to_json_pretty()?;
		info!("workflow data: {json}");
		Ok(json)
	}
}
