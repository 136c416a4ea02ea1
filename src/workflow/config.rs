//! Editor settings, loadable from JSON.

use serde::{Deserialize, Serialize};

use super::layout::LayoutConfig;

/// How label edits are recorded in the undo history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
	/// Every keystroke is its own undo step.
	PerEdit,
	/// Consecutive edits of the same node's label share one undo step.
	#[default]
	Coalesce,
}

/// Zoom bounds for the canvas view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
	/// Smallest scale.
	pub min: f64,
	/// Largest scale.
	pub max: f64,
	/// Increment of the zoom buttons.
	pub step: f64,
	/// Scale factor of one wheel notch up.
	pub wheel_in: f64,
	/// Scale factor of one wheel notch down.
	pub wheel_out: f64,
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min: 0.5,
			max: 2.0,
			step: 0.1,
			wheel_in: 1.1,
			wheel_out: 0.9,
		}
	}
}

impl ZoomConfig {
	/// `k` limited to `[min, max]`.
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}
}

/// Editor settings. Every field has a default, so a partial JSON object is
/// enough to override one of them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	/// Origin and spacing of the automatic layout.
	pub layout: LayoutConfig,
	/// Canvas zoom bounds and steps.
	pub zoom: ZoomConfig,
	/// Undo granularity of label edits.
	pub label_history: HistoryMode,
	/// Most snapshots kept for undo; unbounded when absent.
	pub history_limit: Option<usize>,
}

impl EditorConfig {
	/// Parse a JSON config, falling back to defaults for missing fields.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}
