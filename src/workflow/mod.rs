//! The workflow graph engine: model, layout, derived edges, structural
//! edits and undo history. Nothing in here touches the browser.

pub mod config;
pub mod edges;
pub mod editor;
pub mod error;
pub mod export;
pub mod history;
pub mod ids;
pub mod layout;
pub mod model;
pub mod session;
pub mod validate;

pub use config::{EditorConfig, HistoryMode, ZoomConfig};
pub use edges::{Edge, EdgePath, derive_edges};
pub use editor::{delete_node, insert_after, move_node, update_label};
pub use error::EditError;
pub use export::{ExportedNode, WorkflowExport};
pub use history::History;
pub use ids::{IdGenerator, SequentialIds};
pub use layout::{LayoutConfig, NODE_SIZE, compute_layout};
pub use model::{BranchKey, Branches, Graph, Node, NodeKind, NodeType, START_NODE_ID, Slot};
pub use session::{GraphStats, WorkflowEditor};
pub use validate::{Violation, validate};

#[cfg(test)]
mod proptests {
	use std::collections::HashSet;

	use proptest::prelude::*;

	use super::*;

	#[derive(Clone, Debug)]
	enum Op {
		Insert {
			parent: usize,
			node_type: NodeType,
			branch: BranchKey,
		},
		Delete {
			node: usize,
		},
	}

	fn arb_node_type() -> impl Strategy<Value = NodeType> {
		prop_oneof![
			Just(NodeType::Action),
			Just(NodeType::Branch),
			Just(NodeType::End),
		]
	}

	fn arb_branch() -> impl Strategy<Value = BranchKey> {
		prop_oneof![Just(BranchKey::True), Just(BranchKey::False)]
	}

	fn arb_op() -> impl Strategy<Value = Op> {
		prop_oneof![
			3 => (any::<usize>(), arb_node_type(), arb_branch()).prop_map(
				|(parent, node_type, branch)| Op::Insert {
					parent,
					node_type,
					branch,
				}
			),
			1 => any::<usize>().prop_map(|node| Op::Delete { node }),
		]
	}

	fn apply(graph: &Graph, op: &Op, ids: &mut SequentialIds) -> Result<Graph, EditError> {
		let pick = |n: usize| graph.nodes()[n % graph.len()].id.clone();
		match op {
			Op::Insert {
				parent,
				node_type,
				branch,
			} => insert_after(graph, &pick(*parent), *node_type, Some(*branch), ids),
			Op::Delete { node } => delete_node(graph, &pick(*node)),
		}
	}

	fn reachable(graph: &Graph) -> HashSet<String> {
		let mut seen = HashSet::new();
		let mut stack = vec![START_NODE_ID];
		while let Some(id) = stack.pop() {
			if !seen.insert(id.to_owned()) {
				continue;
			}
			if let Some(node) = graph.find_node(id) {
				stack.extend(node.successors());
			}
		}
		seen
	}

	proptest! {
		/// Random edit sequences never break the structural invariants.
		#[test]
		fn edits_preserve_invariants(ops in prop::collection::vec(arb_op(), 0..40)) {
			let mut ids = SequentialIds::default();
			let mut graph = Graph::default();
			for op in &ops {
				if let Ok(next) = apply(&graph, op, &mut ids) {
					graph = next;
				}
				prop_assert_eq!(validate(&graph), Vec::<Violation>::new());
				prop_assert_eq!(derive_edges(&graph).len(), graph.link_count());
			}
		}

		/// Layout of an edited graph is a fixed point.
		#[test]
		fn layout_is_idempotent(ops in prop::collection::vec(arb_op(), 0..40)) {
			let mut ids = SequentialIds::default();
			let mut graph = Graph::default();
			for op in &ops {
				if let Ok(next) = apply(&graph, op, &mut ids) {
					graph = next;
				}
			}
			let config = LayoutConfig::default();
			let once = compute_layout(&graph, &config);
			prop_assert_eq!(compute_layout(&once, &config), once);
		}

		/// A declined edit is reported, never applied halfway.
		#[test]
		fn declined_edits_are_typed(ops in prop::collection::vec(arb_op(), 0..40)) {
			let mut ids = SequentialIds::default();
			let mut graph = Graph::default();
			for op in &ops {
				match apply(&graph, op, &mut ids) {
					Ok(next) => graph = next,
					Err(err) => {
						let expected = matches!(
							err,
							EditError::ParentIsTerminal { .. } | EditError::ProtectedNode { .. }
						);
						prop_assert!(expected, "unexpected decline: {:?}", err);
					}
				}
			}
		}

		/// Splicing an action or branch, or deleting a node with at most one
		/// successor, never strands a reachable node.
		#[test]
		fn edits_keep_reachable_nodes(ops in prop::collection::vec(arb_op(), 0..40)) {
			let mut ids = SequentialIds::default();
			let mut graph = Graph::default();
			for op in &ops {
				let mut before = reachable(&graph);
				let picked = match op {
					Op::Insert { parent, .. } => graph.nodes()[parent % graph.len()].id.clone(),
					Op::Delete { node } => graph.nodes()[node % graph.len()].id.clone(),
				};
				let keeps_subtree = match op {
					Op::Insert { node_type, .. } => *node_type != NodeType::End,
					Op::Delete { .. } => graph
						.find_node(&picked)
						.is_some_and(|n| n.successors().len() <= 1),
				};
				let Ok(next) = apply(&graph, op, &mut ids) else {
					continue;
				};
				if keeps_subtree {
					if let Op::Delete { .. } = op {
						before.remove(&picked);
					}
					let after = reachable(&next);
					for id in &before {
						prop_assert!(after.contains(id), "{} became unreachable", id);
					}
				}
				graph = next;
			}
		}
	}
}
