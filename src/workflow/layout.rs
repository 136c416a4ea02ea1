//! Left-to-right tree layout rooted at the start node.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use super::model::{BranchKey, Graph, NodeKind, START_NODE_ID, START_POSITION};

/// Width and height of a drawn node, in graph units.
pub const NODE_SIZE: f64 = 120.0;

/// Horizontal distance between a parent and its children.
pub const DEFAULT_H_SPACING: f64 = 250.0;

/// Vertical offset of a branch's `True` (up) and `False` (down) children.
pub const DEFAULT_V_SPACING: f64 = 200.0;

/// Origin and spacing of the layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Horizontal position of the start node.
	pub start_x: f64,
	/// Vertical position of the start node.
	pub start_y: f64,
	/// Column width.
	pub h_spacing: f64,
	/// Row offset per branch level.
	pub v_spacing: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			start_x: START_POSITION.0,
			start_y: START_POSITION.1,
			h_spacing: DEFAULT_H_SPACING,
			v_spacing: DEFAULT_V_SPACING,
		}
	}
}

/// Reposition every node reachable from the start node.
///
/// Pre-order depth-first walk: a single child goes one column right on the
/// same row, a branch's `True` child one column right and one row up, its
/// `False` child one row down. A node reachable twice keeps the position of
/// its first visit. Unreachable nodes keep whatever position they had.
///
/// Rows are not compacted, so deep unbalanced branches may overlap.
pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> Graph {
	let index: HashMap<&str, usize> = graph
		.nodes()
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();

	let mut result = graph.clone();
	let mut visited: HashSet<&str> = HashSet::with_capacity(graph.len());
	let mut stack = vec![(START_NODE_ID, config.start_x, config.start_y)];

	while let Some((id, x, y)) = stack.pop() {
		let Some(&i) = index.get(id) else {
			continue;
		};
		if !visited.insert(id) {
			continue;
		}

		result.nodes[i].x = x;
		result.nodes[i].y = y;

		let next_x = x + config.h_spacing;
		match &graph.nodes()[i].kind {
			NodeKind::Branch { branches } => {
				// pushed in reverse so True is walked first
				if let Some(target) = branches.get(BranchKey::False) {
					stack.push((target, next_x, y + config.v_spacing));
				}
				if let Some(target) = branches.get(BranchKey::True) {
					stack.push((target, next_x, y - config.v_spacing));
				}
			}
			NodeKind::Start { child } | NodeKind::Action { child } => {
				if let Some(target) = child.as_deref() {
					stack.push((target, next_x, y));
				}
			}
			NodeKind::End => {}
		}
	}

	debug!(
		"layout positioned {} of {} nodes",
		visited.len(),
		graph.len()
	);
	result
}
