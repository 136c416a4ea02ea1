//! Reasons an edit can be declined.

use thiserror::Error;

/// Why an edit was declined. The graph is always left unchanged.
#[derive(Debug, Error)]
pub enum EditError {
	/// The start node cannot be deleted or relabelled.
	#[error("Node '{id}' is protected and cannot be changed")]
	ProtectedNode {
		/// The protected node.
		id: String,
	},

	/// End nodes have no successor slot.
	#[error("Cannot add nodes after end node '{id}'")]
	ParentIsTerminal {
		/// The end node.
		id: String,
	},

	/// No node has this id, usually a stale selection.
	#[error("Node '{id}' not found")]
	NotFound {
		/// The missing id.
		id: String,
	},

	/// Start nodes cannot be inserted.
	#[error("A workflow has exactly one start node")]
	StartNotInsertable,

	/// Inserting after a branch needs to name the slot.
	#[error("Branch node '{id}' needs a True or False slot")]
	MissingBranchKey {
		/// The branch node.
		id: String,
	},

	/// The id generator kept returning ids already in the graph.
	#[error("No fresh node id after {attempts} attempts")]
	IdsExhausted {
		/// Ids drawn before giving up.
		attempts: usize,
	},

	/// Export could not be written as JSON.
	#[error("Failed to serialize workflow: {0}")]
	Serialize(#[from] serde_json::Error),
}

impl EditError {
	pub(crate) fn not_found(id: &str) -> Self {
		EditError::NotFound { id: id.to_owned() }
	}

	/// Whether the user should see this as a notice. The rest only reach the
	/// log.
	pub fn is_user_facing(&self) -> bool {
		matches!(
			self,
			EditError::ProtectedNode { .. }
				| EditError::ParentIsTerminal { .. }
				| EditError::StartNotInsertable
				| EditError::MissingBranchKey { .. }
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn not_found_is_log_only() {
		assert!(!EditError::not_found("x").is_user_facing());
		assert!(EditError::ParentIsTerminal { id: "e".into() }.is_user_facing());
	}

	#[test]
	fn messages_name_the_node() {
		let err = EditError::ProtectedNode {
			id: "start-node".into(),
		};
		assert_eq!(
			err.to_string(),
			"Node 'start-node' is protected and cannot be changed"
		);
	}
}
