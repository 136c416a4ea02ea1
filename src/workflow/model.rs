//! Workflow nodes, their successor slots, and the graph that owns them.
//!
//! Nodes reference their successors by id only. A node never knows its
//! parent; [`Graph::parent_of`] recovers it by scanning the slots.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Id of the single entry node. It can be neither deleted nor relabelled.
pub const START_NODE_ID: &str = "start-node";

/// Position the start node occupies before any layout pass.
pub const START_POSITION: (f64, f64) = (150.0, 300.0);

/// Which of a branch node's two outgoing slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchKey {
	/// The upper slot.
	True,
	/// The lower slot.
	False,
}

impl BranchKey {
	/// Both keys, in the order their edges are emitted.
	pub const ALL: [BranchKey; 2] = [BranchKey::True, BranchKey::False];

	/// The key as it appears in edge ids and labels.
	pub fn as_str(self) -> &'static str {
		match self {
			BranchKey::True => "True",
			BranchKey::False => "False",
		}
	}
}

impl fmt::Display for BranchKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The two labelled successors of a branch node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branches {
	/// Target of the `True` slot.
	#[serde(rename = "True")]
	pub on_true: Option<String>,
	/// Target of the `False` slot.
	#[serde(rename = "False")]
	pub on_false: Option<String>,
}

impl Branches {
	/// Target of the slot named by `key`.
	pub fn get(&self, key: BranchKey) -> Option<&str> {
		match key {
			BranchKey::True => self.on_true.as_deref(),
			BranchKey::False => self.on_false.as_deref(),
		}
	}

	fn slot_mut(&mut self, key: BranchKey) -> &mut Option<String> {
		match key {
			BranchKey::True => &mut self.on_true,
			BranchKey::False => &mut self.on_false,
		}
	}
}

/// The four node kinds, without their successor data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
	/// Entry point, one successor.
	Start,
	/// A single task, one successor.
	Action,
	/// A decision with `True` and `False` successors.
	Branch,
	/// Terminal, no successors.
	End,
}

impl NodeType {
	/// Kinds a user may insert. There is only ever one start node.
	pub const INSERTABLE: [NodeType; 3] = [NodeType::Action, NodeType::Branch, NodeType::End];

	/// Label given to a freshly created node.
	pub fn default_label(self) -> &'static str {
		match self {
			NodeType::Start => "Start",
			NodeType::Action => "New Action",
			NodeType::Branch => "New Branch",
			NodeType::End => "End",
		}
	}

	/// Fill color given to a freshly created node.
	pub fn color(self) -> &'static str {
		match self {
			NodeType::Start => "#10b981",
			NodeType::Action => "#3b82f6",
			NodeType::Branch => "#f59e0b",
			NodeType::End => "#ef4444",
		}
	}

	/// Glyph drawn on the node.
	pub fn icon(self) -> &'static str {
		match self {
			NodeType::Start => "▶",
			NodeType::Action => "⚡",
			NodeType::Branch => "◆",
			NodeType::End => "⏹",
		}
	}

	/// Capitalised name for panels.
	pub fn title(self) -> &'static str {
		match self {
			NodeType::Start => "Start",
			NodeType::Action => "Action",
			NodeType::Branch => "Branch",
			NodeType::End => "End",
		}
	}
}

impl fmt::Display for NodeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			NodeType::Start => "start",
			NodeType::Action => "action",
			NodeType::Branch => "branch",
			NodeType::End => "end",
		})
	}
}

/// A node's kind together with the successor slots that kind carries.
///
/// End nodes have no slot at all, so they cannot acquire an outgoing
/// reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// Entry node and its single child.
	Start {
		/// Id of the first step.
		child: Option<String>,
	},
	/// Task node and its single child.
	Action {
		/// Id of the next step.
		child: Option<String>,
	},
	/// Decision node and its two labelled children.
	Branch {
		/// Targets of the `True` and `False` slots.
		branches: Branches,
	},
	/// Terminal node.
	End,
}

impl NodeKind {
	/// A kind of the given type with every slot empty.
	pub fn empty(node_type: NodeType) -> Self {
		match node_type {
			NodeType::Start => NodeKind::Start { child: None },
			NodeType::Action => NodeKind::Action { child: None },
			NodeType::Branch => NodeKind::Branch {
				branches: Branches::default(),
			},
			NodeType::End => NodeKind::End,
		}
	}

	/// The kind without its slots.
	pub fn node_type(&self) -> NodeType {
		match self {
			NodeKind::Start { .. } => NodeType::Start,
			NodeKind::Action { .. } => NodeType::Action,
			NodeKind::Branch { .. } => NodeType::Branch,
			NodeKind::End => NodeType::End,
		}
	}
}

/// Names one successor slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
	/// The single child of a start or action node.
	Child,
	/// One side of a branch node.
	Branch(BranchKey),
}

impl Slot {
	/// The branch key, if this is a branch slot.
	pub fn branch_key(self) -> Option<BranchKey> {
		match self {
			Slot::Child => None,
			Slot::Branch(key) => Some(key),
		}
	}
}

/// One node of the workflow.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique, stable id.
	pub id: String,
	/// User-editable display text.
	pub label: String,
	/// Layout-assigned horizontal position.
	pub x: f64,
	/// Layout-assigned vertical position.
	pub y: f64,
	/// Display color, assigned by type at creation.
	pub color: String,
	/// Kind and successor slots.
	pub kind: NodeKind,
}

impl Node {
	/// A node of `node_type` with default label and color and no successors.
	pub fn new(id: impl Into<String>, node_type: NodeType, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			label: node_type.default_label().to_owned(),
			x,
			y,
			color: node_type.color().to_owned(),
			kind: NodeKind::empty(node_type),
		}
	}

	/// The protected entry node at its initial position.
	pub fn start() -> Self {
		let (x, y) = START_POSITION;
		Self::new(START_NODE_ID, NodeType::Start, x, y)
	}

	/// Type implied by the node's kind.
	pub fn node_type(&self) -> NodeType {
		self.kind.node_type()
	}

	/// Whether this is the protected entry node.
	pub fn is_protected(&self) -> bool {
		self.id == START_NODE_ID
	}

	/// Target of `slot`, or `None` when the slot is empty or the node has
	/// no such slot.
	pub fn successor(&self, slot: Slot) -> Option<&str> {
		match (&self.kind, slot) {
			(NodeKind::Start { child } | NodeKind::Action { child }, Slot::Child) => {
				child.as_deref()
			}
			(NodeKind::Branch { branches }, Slot::Branch(key)) => branches.get(key),
			_ => None,
		}
	}

	/// Mutable access to `slot`; `None` when the node has no such slot.
	pub fn successor_mut(&mut self, slot: Slot) -> Option<&mut Option<String>> {
		match (&mut self.kind, slot) {
			(NodeKind::Start { child } | NodeKind::Action { child }, Slot::Child) => Some(child),
			(NodeKind::Branch { branches }, Slot::Branch(key)) => Some(branches.slot_mut(key)),
			_ => None,
		}
	}

	/// Every slot this node has, filled or not, in emission order.
	pub fn slots(&self) -> Vec<Slot> {
		match self.kind {
			NodeKind::Start { .. } | NodeKind::Action { .. } => vec![Slot::Child],
			NodeKind::Branch { .. } => BranchKey::ALL.into_iter().map(Slot::Branch).collect(),
			NodeKind::End => Vec::new(),
		}
	}

	/// Filled slots with their targets, `True` before `False`.
	pub fn links(&self) -> Vec<(Slot, &str)> {
		self.slots()
			.into_iter()
			.filter_map(|slot| self.successor(slot).map(|target| (slot, target)))
			.collect()
	}

	/// Ids of the direct successors, `True` before `False`.
	pub fn successors(&self) -> Vec<&str> {
		self.links().into_iter().map(|(_, target)| target).collect()
	}

	/// Slot that receives an existing subtree when this node is spliced in
	/// above it: the child slot, or `True` for a branch. End nodes have none.
	pub fn entry_slot(&self) -> Option<Slot> {
		self.slots().into_iter().next()
	}
}

/// The workflow: nodes in insertion order.
///
/// Edges are not stored; see [`derive_edges`](super::edges::derive_edges).
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
	pub(crate) nodes: Vec<Node>,
}

impl Default for Graph {
	/// The initial workflow, a lone start node.
	fn default() -> Self {
		Self {
			nodes: vec![Node::start()],
		}
	}
}

impl Graph {
	/// Build a graph from an explicit node list. No invariants are checked;
	/// see [`validate`](super::validate::validate).
	pub fn from_nodes(nodes: Vec<Node>) -> Self {
		Self { nodes }
	}

	/// Every node, in insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the graph has no nodes at all.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Look up a node by id.
	pub fn find_node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub(crate) fn find_node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	/// Whether a node has this id.
	pub fn contains(&self, id: &str) -> bool {
		self.find_node(id).is_some()
	}

	/// The first node naming `id` in one of its slots, with that slot.
	pub fn parent_of(&self, id: &str) -> Option<(&Node, Slot)> {
		self.nodes.iter().find_map(|node| {
			node.links()
				.into_iter()
				.find(|(_, target)| *target == id)
				.map(|(slot, _)| (node, slot))
		})
	}

	/// Number of filled successor slots across all nodes.
	pub fn link_count(&self) -> usize {
		self.nodes.iter().map(|n| n.links().len()).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn action(id: &str, child: Option<&str>) -> Node {
		let mut node = Node::new(id, NodeType::Action, 0.0, 0.0);
		node.kind = NodeKind::Action {
			child: child.map(str::to_owned),
		};
		node
	}

	#[test]
	fn default_graph_is_a_lone_start_node() {
		let graph = Graph::default();
		assert_eq!(graph.len(), 1);
		let start = graph.find_node(START_NODE_ID).unwrap();
		assert_eq!(start.node_type(), NodeType::Start);
		assert_eq!(start.label, "Start");
		assert_eq!(start.color, "#10b981");
		assert_eq!((start.x, start.y), START_POSITION);
		assert!(start.successors().is_empty());
		assert!(start.is_protected());
	}

	#[test]
	fn find_node_misses_unknown_ids() {
		assert!(Graph::default().find_node("node-9").is_none());
	}

	#[test]
	fn branch_links_list_true_before_false() {
		let mut node = Node::new("b", NodeType::Branch, 0.0, 0.0);
		*node.successor_mut(Slot::Branch(BranchKey::False)).unwrap() = Some("f".into());
		*node.successor_mut(Slot::Branch(BranchKey::True)).unwrap() = Some("t".into());
		assert_eq!(node.successors(), vec!["t", "f"]);
		assert_eq!(node.entry_slot(), Some(Slot::Branch(BranchKey::True)));
	}

	#[test]
	fn end_nodes_have_no_slots() {
		let mut node = Node::new("e", NodeType::End, 0.0, 0.0);
		assert!(node.slots().is_empty());
		assert!(node.successor_mut(Slot::Child).is_none());
		assert!(node.entry_slot().is_none());
	}

	#[test]
	fn action_nodes_reject_branch_slots() {
		let mut node = action("a", Some("b"));
		assert_eq!(node.successor(Slot::Child), Some("b"));
		assert_eq!(node.successor(Slot::Branch(BranchKey::True)), None);
		assert!(node.successor_mut(Slot::Branch(BranchKey::True)).is_none());
	}

	#[test]
	fn parent_of_reports_the_referencing_slot() {
		let mut branch = Node::new("b", NodeType::Branch, 0.0, 0.0);
		*branch.successor_mut(Slot::Branch(BranchKey::False)).unwrap() = Some("a".into());
		let graph = Graph::from_nodes(vec![branch, action("a", None)]);

		let (parent, slot) = graph.parent_of("a").unwrap();
		assert_eq!(parent.id, "b");
		assert_eq!(slot, Slot::Branch(BranchKey::False));
		assert!(graph.parent_of("b").is_none());
		assert_eq!(graph.link_count(), 1);
	}
}
