use chrono::Utc;
use leptos::prelude::*;
use log::error;

use crate::workflow::WorkflowEditor;

/// Status line, notices and the save button.
#[component]
pub fn Toolbar(editor: RwSignal<WorkflowEditor>, notice: RwSignal<Option<String>>) -> impl IntoView {
	let on_save = move |_| match editor.with_untracked(|e| e.save(Utc::now())) {
		Ok(_) => notice.set(Some("✅ Workflow saved to console!".to_owned())),
		Err(err) => {
			error!("save failed: {err}");
			notice.set(Some(format!("⚠️ {err}")));
		}
	};

	let status = move || {
		editor.with(|e| {
			let icon = if e.selected_id().is_some() { "📝" } else { "✓" };
			format!("{icon} {}", e.status())
		})
	};

	view! {
		<div class="toolbar">
			<div class="toolbar-left">
				<span class="status-badge">{status}</span>
				{move || notice.get().map(|text| view! { <span class="notice">{text}</span> })}
			</div>
			<div class="toolbar-right">
				<button class="toolbar-btn" on:click=on_save>
					"💾 Save Workflow"
				</button>
			</div>
		</div>
	}
}
