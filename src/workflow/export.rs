//! The saved shape of a workflow: structure and labels, no positions or
//! colors.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::EditError;
use super::model::{Branches, Graph, Node, NodeKind, NodeType};

/// A saved workflow.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkflowExport {
	/// Every node, in graph order.
	pub nodes: Vec<ExportedNode>,
	/// When the workflow was saved.
	pub timestamp: DateTime<Utc>,
}

/// One node as saved. Branch nodes carry `branches`, start and action nodes
/// carry `childId` (possibly `null`), end nodes carry neither.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedNode {
	/// Node id.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Saved as `type`.
	#[serde(rename = "type")]
	pub node_type: NodeType,
	/// Branch targets, for branch nodes only.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub branches: Option<Branches>,
	/// Child slot, for start and action nodes only.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub child_id: Option<Option<String>>,
}

impl From<&Node> for ExportedNode {
	fn from(node: &Node) -> Self {
		let (branches, child_id) = match &node.kind {
			NodeKind::Branch { branches } => (Some(branches.clone()), None),
			NodeKind::Start { child } | NodeKind::Action { child } => (None, Some(child.clone())),
			NodeKind::End => (None, None),
		};
		Self {
			id: node.id.clone(),
			label: node.label.clone(),
			node_type: node.node_type(),
			branches,
			child_id,
		}
	}
}

impl WorkflowExport {
	/// Snapshot of `graph` stamped with `timestamp`.
	pub fn new(graph: &Graph, timestamp: DateTime<Utc>) -> Self {
		Self {
			nodes: graph.nodes().iter().map(ExportedNode::from).collect(),
			timestamp,
		}
	}

	/// Indented JSON, as written to the log on save.
	pub fn to_json_pretty(&self) -> Result<String, EditError> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;
	use serde_json::json;

	use super::*;
	use crate::workflow::editor::insert_after;
	use crate::workflow::ids::SequentialIds;
	use crate::workflow::model::{BranchKey, START_NODE_ID};

	#[test]
	fn export_matches_saved_shape() {
		let mut ids = SequentialIds::default();
		let g = insert_after(&Graph::default(), START_NODE_ID, NodeType::Branch, None, &mut ids).unwrap();
		let g = insert_after(&g, "node-1", NodeType::End, Some(BranchKey::False), &mut ids).unwrap();
		let g = insert_after(&g, "node-1", NodeType::Action, Some(BranchKey::True), &mut ids).unwrap();
		let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

		let value = serde_json::to_value(WorkflowExport::new(&g, timestamp)).unwrap();
		assert_eq!(
			value,
			json!({
				"nodes": [
					{ "id": "start-node", "label": "Start", "type": "start", "childId": "node-1" },
					{
						"id": "node-1",
						"label": "New Branch",
						"type": "branch",
						"branches": { "True": "node-3", "False": "node-2" }
					},
					{ "id": "node-2", "label": "End", "type": "end" },
					{ "id": "node-3", "label": "New Action", "type": "action", "childId": null }
				],
				"timestamp": "2024-05-01T12:00:00Z"
			})
		);
	}

	#[test]
	fn pretty_json_is_indented() {
		let export = WorkflowExport::new(&Graph::default(), Utc.timestamp_opt(0, 0).unwrap());
		let text = export.to_json_pretty().unwrap();
		assert!(text.starts_with("{\n  \"nodes\": ["));
		assert!(text.contains("\"childId\": null"));
	}
}
