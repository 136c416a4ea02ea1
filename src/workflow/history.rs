//! Linear undo/redo over whole snapshots.

use log::debug;

/// Snapshots plus a cursor. The snapshot under the cursor is current.
///
/// Pushing after an undo discards the redo branch; there is no history tree.
#[derive(Clone, Debug, PartialEq)]
pub struct History<T> {
	snapshots: Vec<T>,
	index: usize,
	limit: Option<usize>,
	// key of the last coalescable push, cleared by anything else
	coalesce_key: Option<String>,
}

impl<T> History<T> {
	/// A history holding only `initial`.
	pub fn new(initial: T) -> Self {
		Self {
			snapshots: vec![initial],
			index: 0,
			limit: None,
			coalesce_key: None,
		}
	}

	/// Like [`History::new`], keeping at most `limit` snapshots (at least
	/// one). `None` keeps everything.
	pub fn with_limit(initial: T, limit: Option<usize>) -> Self {
		Self {
			limit: limit.map(|l| l.max(1)),
			..Self::new(initial)
		}
	}

	/// Record `snapshot` as the new current state.
	pub fn push(&mut self, snapshot: T) {
		self.coalesce_key = None;
		self.append(snapshot);
	}

	/// Record `snapshot`, replacing the current one instead when the previous
	/// push used the same `key` and nothing moved the cursor since.
	///
	/// Never replaces the initial snapshot.
	pub fn push_coalesced(&mut self, snapshot: T, key: &str) {
		let same_run = self.coalesce_key.as_deref() == Some(key)
			&& self.index > 0
			&& self.index + 1 == self.snapshots.len();
		if same_run {
			self.snapshots[self.index] = snapshot;
		} else {
			self.append(snapshot);
			self.coalesce_key = Some(key.to_owned());
		}
	}

	fn append(&mut self, snapshot: T) {
		self.snapshots.truncate(self.index + 1);
		self.snapshots.push(snapshot);
		if let Some(limit) = self.limit {
			let excess = self.snapshots.len().saturating_sub(limit);
			if excess > 0 {
				self.snapshots.drain(..excess);
				debug!("history dropped {excess} oldest snapshots");
			}
		}
		self.index = self.snapshots.len() - 1;
	}

	/// Step back one snapshot. Returns whether the cursor moved.
	pub fn undo(&mut self) -> bool {
		if !self.can_undo() {
			return false;
		}
		self.index -= 1;
		self.coalesce_key = None;
		true
	}

	/// Step forward one snapshot. Returns whether the cursor moved.
	pub fn redo(&mut self) -> bool {
		if !self.can_redo() {
			return false;
		}
		self.index += 1;
		self.coalesce_key = None;
		true
	}

	/// Whether an older snapshot exists.
	pub fn can_undo(&self) -> bool {
		self.index > 0
	}

	/// Whether a newer snapshot exists.
	pub fn can_redo(&self) -> bool {
		self.index + 1 < self.snapshots.len()
	}

	/// The snapshot at the cursor.
	pub fn current(&self) -> &T {
		&self.snapshots[self.index]
	}

	/// Position of the cursor.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Number of snapshots kept.
	pub fn len(&self) -> usize {
		self.snapshots.len()
	}

	/// Always false; a history holds at least its initial snapshot.
	pub fn is_empty(&self) -> bool {
		self.snapshots.is_empty()
	}

	/// All retained snapshots, oldest first, including the redo branch.
	pub fn snapshots(&self) -> &[T] {
		&self.snapshots
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn push_after_undo_discards_redo_branch() {
		let mut history = History::new("s0");
		history.push("s1");
		history.push("s2");
		assert!(history.undo());
		history.push("s3");

		assert!(!history.redo());
		assert_eq!(history.snapshots(), &["s0", "s1", "s3"]);
		assert_eq!(*history.current(), "s3");
	}

	#[test]
	fn undo_and_redo_stop_at_the_ends() {
		let mut history = History::new(0);
		assert!(!history.undo());
		history.push(1);
		assert!(history.undo());
		assert_eq!(*history.current(), 0);
		assert!(!history.undo());
		assert!(history.redo());
		assert!(!history.redo());
		assert_eq!(*history.current(), 1);
		assert_eq!(history.index(), history.len() - 1);
	}

	#[test]
	fn coalesced_pushes_share_one_entry() {
		let mut history = History::new("start");
		history.push_coalesced("a", "label:n1");
		history.push_coalesced("ab", "label:n1");
		history.push_coalesced("abc", "label:n1");
		assert_eq!(history.snapshots(), &["start", "abc"]);

		history.push_coalesced("x", "label:n2");
		assert_eq!(history.snapshots(), &["start", "abc", "x"]);
	}

	#[test]
	fn undo_breaks_a_coalesced_run() {
		let mut history = History::new("start");
		history.push_coalesced("a", "k");
		history.undo();
		history.redo();
		history.push_coalesced("ab", "k");
		assert_eq!(history.snapshots(), &["start", "a", "ab"]);
	}

	#[test]
	fn plain_push_breaks_a_coalesced_run() {
		let mut history = History::new(0);
		history.push_coalesced(1, "k");
		history.push(2);
		history.push_coalesced(3, "k");
		assert_eq!(history.snapshots(), &[0, 1, 2, 3]);
	}

	#[test]
	fn limit_drops_oldest_snapshots() {
		let mut history = History::with_limit(0, Some(3));
		for n in 1..=5 {
			history.push(n);
		}
		assert_eq!(history.snapshots(), &[3, 4, 5]);
		assert_eq!(history.index(), 2);
		assert!(history.undo());
		assert!(history.undo());
		assert!(!history.undo());
		assert_eq!(*history.current(), 3);
	}
}
