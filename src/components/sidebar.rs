use leptos::prelude::*;

use super::report;
use super::workflow_canvas::CanvasState;
use crate::workflow::{BranchKey, NodeType, WorkflowEditor};

const NODE_TYPES: [NodeType; 4] = [
	NodeType::Start,
	NodeType::Action,
	NodeType::Branch,
	NodeType::End,
];

fn summary(node_type: NodeType) -> &'static str {
	match node_type {
		NodeType::Start => "Entry point (1 child)",
		NodeType::Action => "Single task (1 child)",
		NodeType::Branch => "Decision (True/False)",
		NodeType::End => "Terminal (0 children)",
	}
}

/// Node palette, view controls, properties of the selected node and
/// statistics.
#[component]
pub fn Sidebar(
	editor: RwSignal<WorkflowEditor>,
	viewport: RwSignal<CanvasState>,
	notice: RwSignal<Option<String>>,
) -> impl IntoView {
	// the panel is rebuilt only when the selection changes, so the label
	// input keeps focus while typing
	let selected = Memo::new(move |_| editor.with(|e| e.selected_id().map(str::to_owned)));

	view! {
		<aside class="sidebar">
			<div class="sidebar-header">
				<h2>"⚡ Workflow Builder"</h2>
				<p>"Visual Flow Editor"</p>
			</div>

			<div class="sidebar-section">
				<h3>"Node Types"</h3>
				<div class="node-info-list">
					{NODE_TYPES
						.into_iter()
						.map(|node_type| {
							view! {
								<div class="node-info">
									<div class=format!("info-icon {node_type}")>{node_type.icon()}</div>
									<div>
										<strong>{node_type.title()}</strong>
										<p>{summary(node_type)}</p>
									</div>
								</div>
							}
						})
						.collect_view()}
				</div>
			</div>

			<div class="sidebar-section">
				<h3>"Controls"</h3>
				<div class="control-group">
					<button class="control-btn" on:click=move |_| viewport.update(|s| s.zoom_in())>
						"🔍+ Zoom In"
					</button>
					<button class="control-btn" on:click=move |_| viewport.update(|s| s.zoom_out())>
						"🔍− Zoom Out"
					</button>
					<button class="control-btn" on:click=move |_| viewport.update(|s| s.reset_view())>
						"🎯 Reset View"
					</button>
					<button
						class="control-btn"
						on:click=move |_| editor.update(|e| {
							e.undo();
						})
						disabled=move || !editor.with(|e| e.can_undo())
					>
						"↶ Undo"
					</button>
					<button
						class="control-btn"
						on:click=move |_| editor.update(|e| {
							e.redo();
						})
						disabled=move || !editor.with(|e| e.can_redo())
					>
						"↷ Redo"
					</button>
				</div>
				<div class="zoom-indicator">
					"Zoom: " {move || viewport.with(|s| s.zoom_percent())} "%"
				</div>
			</div>

			{move || {
				selected
					.get()
					.map(|node_id| view! { <NodePanel editor=editor notice=notice node_id=node_id /> })
			}}

			<div class="sidebar-section">
				<h3>"Statistics"</h3>
				<div class="stats">
					<div class="stat-item">
						<span class="stat-label">"Total Nodes:"</span>
						<span class="stat-value">{move || editor.with(|e| e.stats().nodes)}</span>
					</div>
					<div class="stat-item">
						<span class="stat-label">"Connections:"</span>
						<span class="stat-value">{move || editor.with(|e| e.stats().connections)}</span>
					</div>
				</div>
			</div>
		</aside>
	}
}

#[component]
fn NodePanel(
	editor: RwSignal<WorkflowEditor>,
	notice: RwSignal<Option<String>>,
	node_id: String,
) -> impl IntoView {
	let Some((node_type, protected)) = editor.with_untracked(|e| {
		e.graph()
			.find_node(&node_id)
			.map(|n| (n.node_type(), n.is_protected()))
	}) else {
		return ().into_any();
	};

	let label_id = node_id.clone();
	let label = move || {
		editor.with(|e| {
			e.graph()
				.find_node(&label_id)
				.map(|n| n.label.clone())
				.unwrap_or_default()
		})
	};
	let input_id = node_id.clone();

	let add_buttons = (node_type != NodeType::End).then(|| {
		let targets: Vec<(NodeType, Option<BranchKey>)> = if node_type == NodeType::Branch {
			BranchKey::ALL
				.into_iter()
				.flat_map(|key| NodeType::INSERTABLE.map(|t| (t, Some(key))))
				.collect()
		} else {
			NodeType::INSERTABLE.into_iter().map(|t| (t, None)).collect()
		};
		view! {
			<div class="property-group">
				<label>"Add Node After"</label>
				<div class="add-buttons">
					{targets
						.into_iter()
						.map(|(t, key)| {
							view! {
								<AddNodeButton
									editor=editor
									notice=notice
									parent_id=node_id.clone()
									node_type=t
									branch=key
								/>
							}
						})
						.collect_view()}
				</div>
			</div>
		}
	});

	let delete_button = (!protected).then(|| {
		let delete_id = node_id.clone();
		view! {
			<button
				class="delete-btn"
				on:click=move |_| report(notice, editor.try_update(|e| e.delete_node(&delete_id)))
			>
				"🗑 Delete Node"
			</button>
		}
	});

	view! {
		<div class="sidebar-section selected-node-panel">
			<h3>"Node Properties"</h3>
			{protected.then(|| view! { <div class="info-banner">"🔒 Start node is protected"</div> })}

			<div class="property-group">
				<label>"Type"</label>
				<div class="type-badge">{node_type.to_string().to_uppercase()}</div>
			</div>

			<div class="property-group">
				<label>"Label"</label>
				<input
					type="text"
					class="property-input"
					prop:value=label
					disabled=protected
					placeholder=if protected { "Cannot edit Start" } else { "Enter label..." }
					on:input=move |ev| {
						let value = event_target_value(&ev);
						report(notice, editor.try_update(|e| e.update_label(&input_id, &value)));
					}
				/>
			</div>

			{add_buttons}
			{delete_button}
		</div>
	}
	.into_any()
}

#[component]
fn AddNodeButton(
	editor: RwSignal<WorkflowEditor>,
	notice: RwSignal<Option<String>>,
	parent_id: String,
	node_type: NodeType,
	branch: Option<BranchKey>,
) -> impl IntoView {
	let text = match branch {
		Some(key) => format!("+ {} to {key}", node_type.title()),
		None => format!("{} Add {}", node_type.icon(), node_type.title()),
	};
	let class = format!("add-btn {node_type}");

	view! {
		<button
			class=class
			on:click=move |_| {
				report(notice, editor.try_update(|e| e.insert_after(&parent_id, node_type, branch)))
			}
		>
			{text}
		</button>
	}
}
