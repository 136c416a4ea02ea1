//! Edges derived from node successor slots, and their drawn geometry.

use serde::Serialize;

use super::model::{BranchKey, Graph, Node};

/// A derived connection between two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
	/// `"{from}-{to}"`, or `"{from}-{key}-{to}"` for branch edges.
	pub id: String,
	/// Owner of the slot.
	pub from: String,
	/// Target of the slot.
	pub to: String,
	/// Branch key of the originating slot, if any.
	pub label: Option<BranchKey>,
}

/// Every edge of `graph`, in node order, `True` before `False`.
///
/// Empty slots produce nothing, so the result has exactly one edge per
/// filled successor slot.
pub fn derive_edges(graph: &Graph) -> Vec<Edge> {
	let mut edges = Vec::with_capacity(graph.len());
	for node in graph.nodes() {
		for (slot, target) in node.links() {
			let label = slot.branch_key();
			let id = match label {
				Some(key) => format!("{}-{}-{}", node.id, key, target),
				None => format!("{}-{}", node.id, target),
			};
			edges.push(Edge {
				id,
				from: node.id.clone(),
				to: target.to_owned(),
				label,
			});
		}
	}
	edges
}

/// Cubic curve from one node's centre to another's, bending horizontally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePath {
	/// Centre of the source node.
	pub from: (f64, f64),
	/// Centre of the target node.
	pub to: (f64, f64),
	/// Both control points sit on this vertical line.
	pub control_x: f64,
	/// Point halfway along the curve; edge labels are anchored here.
	pub mid: (f64, f64),
}

impl EdgePath {
	/// Path between the centres of two `node_size` boxes.
	pub fn between(from: &Node, to: &Node, node_size: f64) -> Self {
		let half = node_size / 2.0;
		let (fx, fy) = (from.x + half, from.y + half);
		let (tx, ty) = (to.x + half, to.y + half);
		let control_x = (fx + tx) / 2.0;
		Self {
			from: (fx, fy),
			to: (tx, ty),
			control_x,
			mid: ((fx + tx) / 2.0, (fy + ty) / 2.0),
		}
	}

	/// Unit direction of the curve at its midpoint.
	pub fn mid_direction(&self) -> (f64, f64) {
		let (dx, dy) = (
			0.75 * (self.to.0 - self.from.0),
			1.5 * (self.to.1 - self.from.1),
		);
		let len = (dx * dx + dy * dy).sqrt();
		if len < f64::EPSILON {
			(1.0, 0.0)
		} else {
			(dx / len, dy / len)
		}
	}

	/// SVG path data for the curve.
	pub fn to_svg(&self) -> String {
		let ((fx, fy), (tx, ty), cx) = (self.from, self.to, self.control_x);
		format!("M {fx} {fy} C {cx} {fy}, {cx} {ty}, {tx} {ty}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::workflow::model::{NodeType, Slot, START_NODE_ID};

	fn sample() -> Graph {
		let mut start = Node::start();
		*start.successor_mut(Slot::Child).unwrap() = Some("b".into());
		let mut b = Node::new("b", NodeType::Branch, 0.0, 0.0);
		*b.successor_mut(Slot::Branch(BranchKey::True)).unwrap() = Some("t".into());
		*b.successor_mut(Slot::Branch(BranchKey::False)).unwrap() = Some("f".into());
		let t = Node::new("t", NodeType::Action, 0.0, 0.0);
		let f = Node::new("f", NodeType::End, 0.0, 0.0);
		Graph::from_nodes(vec![start, b, t, f])
	}

	#[test]
	fn edges_follow_node_order() {
		let edges = derive_edges(&sample());
		let ids: Vec<&str> = edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, vec!["start-node-b", "b-True-t", "b-False-f"]);
		assert_eq!(edges[0].from, START_NODE_ID);
		assert_eq!(edges[0].label, None);
		assert_eq!(edges[2].label, Some(BranchKey::False));
	}

	#[test]
	fn derivation_is_deterministic_and_counts_filled_slots() {
		let graph = sample();
		assert_eq!(derive_edges(&graph), derive_edges(&graph));
		assert_eq!(derive_edges(&graph).len(), graph.link_count());
	}

	#[test]
	fn empty_slots_produce_no_edges() {
		let graph = Graph::from_nodes(vec![
			Node::start(),
			Node::new("b", NodeType::Branch, 0.0, 0.0),
		]);
		assert!(derive_edges(&graph).is_empty());
	}

	#[test]
	fn path_joins_node_centres() {
		let a = Node::new("a", NodeType::Action, 0.0, 0.0);
		let b = Node::new("b", NodeType::Action, 250.0, 200.0);
		let path = EdgePath::between(&a, &b, 120.0);
		assert_eq!(path.from, (60.0, 60.0));
		assert_eq!(path.to, (310.0, 260.0));
		assert_eq!(path.mid, (185.0, 160.0));
		assert_eq!(path.to_svg(), "M 60 60 C 185 60, 185 260, 310 260");
	}

	#[test]
	fn straight_path_points_right() {
		let a = Node::new("a", NodeType::Action, 0.0, 0.0);
		let b = Node::new("b", NodeType::Action, 250.0, 0.0);
		assert_eq!(EdgePath::between(&a, &b, 120.0).mid_direction(), (1.0, 0.0));
	}
}
