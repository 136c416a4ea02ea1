//! Structural edits. Each takes the current graph by reference and returns
//! the next one; the argument is never modified.

use log::debug;

use super::error::EditError;
use super::ids::IdGenerator;
use super::layout::DEFAULT_H_SPACING;
use super::model::{BranchKey, Graph, Node, NodeKind, NodeType, START_NODE_ID, Slot};

/// Insert a new `node_type` node after `parent_id`, splicing it in front of
/// whatever the parent's slot pointed to.
///
/// Branch parents need `branch` to pick the slot; other parents ignore it.
/// The parent's old successor moves into the new node's child slot (its
/// `True` slot for a branch). An end node cannot take it, so inserting an end
/// over an existing child cuts that subtree off.
///
/// The new node is appended to the node list.
pub fn insert_after(
	graph: &Graph,
	parent_id: &str,
	node_type: NodeType,
	branch: Option<BranchKey>,
	ids: &mut impl IdGenerator,
) -> Result<Graph, EditError> {
	let parent = graph
		.find_node(parent_id)
		.ok_or_else(|| EditError::not_found(parent_id))?;

	let slot = match parent.kind {
		NodeKind::End => {
			return Err(EditError::ParentIsTerminal {
				id: parent_id.to_owned(),
			});
		}
		NodeKind::Branch { .. } => {
			let key = branch.ok_or_else(|| EditError::MissingBranchKey {
				id: parent_id.to_owned(),
			})?;
			Slot::Branch(key)
		}
		NodeKind::Start { .. } | NodeKind::Action { .. } => Slot::Child,
	};
	if node_type == NodeType::Start {
		return Err(EditError::StartNotInsertable);
	}

	let id = fresh_id(graph, ids)?;
	let old_child = parent.successor(slot).map(str::to_owned);
	let mut node = Node::new(
		id.clone(),
		node_type,
		parent.x + DEFAULT_H_SPACING,
		parent.y,
	);

	if let Some(old_child) = old_child {
		match node.entry_slot().and_then(|entry| node.successor_mut(entry)) {
			Some(entry) => *entry = Some(old_child),
			None => debug!("end node {id} cuts off subtree at {old_child}"),
		}
	}

	let mut next = graph.clone();
	if let Some(target) = next
		.find_node_mut(parent_id)
		.and_then(|p| p.successor_mut(slot))
	{
		*target = Some(id);
	}
	next.nodes.push(node);
	Ok(next)
}

/// Remove `node_id` and reconnect its parent to the node's first successor.
///
/// Only one successor can take the parent's slot. When a branch with both
/// slots filled is deleted, the `True` child is kept and the `False` subtree
/// stays in the graph unreferenced.
pub fn delete_node(graph: &Graph, node_id: &str) -> Result<Graph, EditError> {
	if node_id == START_NODE_ID {
		return Err(EditError::ProtectedNode {
			id: node_id.to_owned(),
		});
	}
	let node = graph
		.find_node(node_id)
		.ok_or_else(|| EditError::not_found(node_id))?;

	let children: Vec<String> = node.successors().into_iter().map(str::to_owned).collect();
	let parent = graph
		.parent_of(node_id)
		.map(|(parent, slot)| (parent.id.clone(), slot));

	let mut next = graph.clone();
	next.nodes.retain(|n| n.id != node_id);

	match parent {
		Some((parent_id, slot)) => {
			if let Some(target) = next
				.find_node_mut(&parent_id)
				.and_then(|p| p.successor_mut(slot))
			{
				*target = children.first().cloned();
			}
		}
		None => debug!("deleted node {node_id} had no parent"),
	}
	if children.len() > 1 {
		debug!(
			"deleting {node_id} left {} unreferenced",
			children[1..].join(", ")
		);
	}

	// no slot may keep pointing at the removed node
	for other in &mut next.nodes {
		for slot in other.slots() {
			if let Some(target) = other.successor_mut(slot) {
				if target.as_deref() == Some(node_id) {
					*target = None;
				}
			}
		}
	}

	Ok(next)
}

/// Replace a node's label. The start node's label is fixed.
pub fn update_label(graph: &Graph, node_id: &str, label: &str) -> Result<Graph, EditError> {
	if node_id == START_NODE_ID {
		return Err(EditError::ProtectedNode {
			id: node_id.to_owned(),
		});
	}
	let mut next = graph.clone();
	let node = next
		.find_node_mut(node_id)
		.ok_or_else(|| EditError::not_found(node_id))?;
	node.label = label.to_owned();
	Ok(next)
}

/// Overwrite a node's position. Positions are not structural, so this
/// applies to any node, the start node included.
pub fn move_node(graph: &Graph, node_id: &str, x: f64, y: f64) -> Result<Graph, EditError> {
	let mut next = graph.clone();
	let node = next
		.find_node_mut(node_id)
		.ok_or_else(|| EditError::not_found(node_id))?;
	node.x = x;
	node.y = y;
	Ok(next)
}

// a generator that never repeats itself finds a free id within len + 1 draws
fn fresh_id(graph: &Graph, ids: &mut impl IdGenerator) -> Result<String, EditError> {
	let attempts = graph.len() + 1;
	(0..attempts)
		.map(|_| ids.next_id())
		.find(|id| !graph.contains(id))
		.ok_or(EditError::IdsExhausted { attempts })
}
