use leptos::prelude::*;

use crate::workflow::EditError;

pub mod sidebar;
pub mod toolbar;
pub mod workflow_canvas;

/// Show a declined edit as a notice; a successful one clears it. Log-only
/// errors were already written by the editor.
pub fn report(notice: RwSignal<Option<String>>, result: Option<Result<(), EditError>>) {
	match result {
		Some(Ok(())) => notice.set(None),
		Some(Err(err)) if err.is_user_facing() => notice.set(Some(format!("⚠️ {err}"))),
		_ => {}
	}
}
