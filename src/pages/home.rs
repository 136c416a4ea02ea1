use leptos::prelude::*;
use log::{info, warn};

use crate::components::sidebar::Sidebar;
use crate::components::toolbar::Toolbar;
use crate::components::workflow_canvas::{CanvasState, WorkflowCanvas};
use crate::workflow::{EditorConfig, WorkflowEditor};

/// Id of an optional `<script type="application/json">` holding an
/// [`EditorConfig`].
const CONFIG_ELEMENT_ID: &str = "workflow-config";

/// Read the editor config embedded in the page, or fall back to defaults.
fn load_config() -> EditorConfig {
	let text = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|el| el.text_content());
	let Some(text) = text else {
		return EditorConfig::default();
	};
	match EditorConfig::from_json(&text) {
		Ok(config) => {
			info!("loaded editor config from #{CONFIG_ELEMENT_ID}");
			config
		}
		Err(err) => {
			warn!("ignoring invalid editor config: {err}");
			EditorConfig::default()
		}
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = load_config();
	let viewport = RwSignal::new(CanvasState::new(config.zoom.clone(), 800.0, 600.0));
	let editor = RwSignal::new(WorkflowEditor::new(config));
	let notice = RwSignal::new(None::<String>);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="app">
				<Sidebar editor=editor viewport=viewport notice=notice />
				<main class="main-content">
					<Toolbar editor=editor notice=notice />
					<div class="canvas-wrapper">
						<WorkflowCanvas editor=editor viewport=viewport />
					</div>
				</main>
			</div>
		</ErrorBoundary>
	}
}
