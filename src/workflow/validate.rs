//! Structural checks over a whole graph.
//!
//! Checks:
//! - exactly one start node, with the reserved id
//! - node ids are unique
//! - every filled slot names an existing node
//! - no node is named by more than one slot
//!
//! End nodes cannot carry successors at the type level, so they need no
//! check here.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::model::{Graph, NodeType, START_NODE_ID};

/// One broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
	/// No node has the reserved start id.
	#[error("No start node with id 'start-node'")]
	MissingStart,

	/// A start-typed node other than the reserved one.
	#[error("Extra start node '{id}'")]
	DuplicateStart {
		/// The extra start node.
		id: String,
	},

	/// Two nodes share an id.
	#[error("Duplicate node id '{id}'")]
	DuplicateId {
		/// The shared id.
		id: String,
	},

	/// A slot names a node that does not exist.
	#[error("Node '{from}' points at missing node '{to}'")]
	DanglingReference {
		/// Owner of the slot.
		from: String,
		/// The missing target.
		to: String,
	},

	/// A node is the target of more than one slot.
	#[error("Node '{id}' is referenced by {count} slots")]
	MultipleParents {
		/// The shared target.
		id: String,
		/// Number of slots naming it.
		count: usize,
	},
}

/// Every violation in `graph`; empty when the graph is well formed.
pub fn validate(graph: &Graph) -> Vec<Violation> {
	let mut violations = Vec::new();

	let mut seen: HashSet<&str> = HashSet::with_capacity(graph.len());
	for node in graph.nodes() {
		if !seen.insert(node.id.as_str()) {
			violations.push(Violation::DuplicateId {
				id: node.id.clone(),
			});
		}
	}

	let mut has_start = false;
	for node in graph.nodes().iter().filter(|n| n.node_type() == NodeType::Start) {
		if node.id == START_NODE_ID && !has_start {
			has_start = true;
		} else {
			violations.push(Violation::DuplicateStart {
				id: node.id.clone(),
			});
		}
	}
	if !has_start {
		violations.push(Violation::MissingStart);
	}

	let mut incoming: HashMap<&str, usize> = HashMap::new();
	for node in graph.nodes() {
		for target in node.successors() {
			if !seen.contains(target) {
				violations.push(Violation::DanglingReference {
					from: node.id.clone(),
					to: target.to_owned(),
				});
			}
			*incoming.entry(target).or_default() += 1;
		}
	}

	// node order keeps the report stable
	for node in graph.nodes() {
		if let Some(&count) = incoming.get(node.id.as_str()) {
			if count > 1 {
				violations.push(Violation::MultipleParents {
					id: node.id.clone(),
					count,
				});
			}
		}
	}

	violations
}
