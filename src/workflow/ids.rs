//! Fresh node ids.

use super::model::Graph;

const PREFIX: &str = "node-";

/// Source of ids for newly inserted nodes.
///
/// Implementations must not hand out the same id twice. The editor skips
/// ids already present in the graph it is editing, but gives up with
/// [`EditError::IdsExhausted`](super::EditError::IdsExhausted) after one
/// draw more than the graph has nodes.
pub trait IdGenerator {
	/// The next unused id.
	fn next_id(&mut self) -> String;
}

/// Monotonic `node-1`, `node-2`, ... ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequentialIds {
	next: u64,
}

impl Default for SequentialIds {
	fn default() -> Self {
		Self { next: 1 }
	}
}

impl SequentialIds {
	/// Counter whose first id is `node-{next}`.
	pub fn starting_at(next: u64) -> Self {
		Self { next }
	}

	/// A generator that continues past every `node-N` id already in `graph`.
	pub fn after(graph: &Graph) -> Self {
		let highest = graph
			.nodes()
			.iter()
			.filter_map(|n| n.id.strip_prefix(PREFIX)?.parse::<u64>().ok())
			.max()
			.unwrap_or(0);
		Self { next: highest + 1 }
	}
}

impl IdGenerator for SequentialIds {
	fn next_id(&mut self) -> String {
		let id = format!("{PREFIX}{}", self.next);
		self.next += 1;
		id
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::workflow::model::{Node, NodeType};

	#[test]
	fn sequential_ids_count_up_from_one() {
		let mut ids = SequentialIds::default();
		assert_eq!(ids.next_id(), "node-1");
		assert_eq!(ids.next_id(), "node-2");
	}

	#[test]
	fn after_skips_existing_ids() {
		let graph = Graph::from_nodes(vec![
			Node::start(),
			Node::new("node-7", NodeType::Action, 0.0, 0.0),
			Node::new("custom", NodeType::End, 0.0, 0.0),
		]);
		assert_eq!(SequentialIds::after(&graph).next_id(), "node-8");
	}
}
