use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::CanvasState;
use crate::workflow::WorkflowEditor;

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// The drawing surface. Redraws every animation frame from the editor and
/// viewport signals, and turns mouse input into drag, pan and zoom.
#[component]
pub fn WorkflowCanvas(
	editor: RwSignal<WorkflowEditor>,
	viewport: RwSignal<CanvasState>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (animate_init, resize_cb_init) = (animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		viewport.update_untracked(|s| s.resize(w, h));

		let Some(ctx) = context_2d(&canvas) else {
			warn!("canvas has no 2d context");
			return;
		};

		let canvas_resize = canvas.clone();
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			viewport.update_untracked(|s| s.resize(nw, nh));
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let animate_inner = animate_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let _ = viewport.try_with_untracked(|s| {
				editor.try_with_untracked(|e| render::render(s, e, &ctx))
			});
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let pointer = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		viewport.update(|s| editor.update(|e| s.pointer_down(e, x, y)));
	};

	// moves only touch positions, which the frame loop reads untracked
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		viewport.update_untracked(|s| editor.update_untracked(|e| s.pointer_move(e, x, y)));
	};

	let on_mouseup = move |_: MouseEvent| {
		viewport.update(|s| editor.update(|e| s.pointer_up(e)));
	};

	let on_mouseleave = move |_: MouseEvent| {
		viewport.update(|s| editor.update(|e| s.pointer_up(e)));
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		let Some((x, y)) = pointer(mouse) else {
			return;
		};
		viewport.update(|s| s.wheel_zoom(x, y, ev.delta_y()));
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="workflow-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style=move || {
				let grabbing = viewport.with(|s| s.is_dragging() || s.pan.active);
				format!("display: block; cursor: {};", if grabbing { "grabbing" } else { "grab" })
			}
		/>
	}
}
