//! Leptos component wrapping the course graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, clicking, panning, and zooming. An animation
//! loop runs via `requestAnimationFrame`, stepping the simulation and
//! repainting each frame.
//!
//! The simulation only exists once the canvas is mounted in a browser window;
//! until then a loading placeholder is shown.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::interaction::{ZoomBounds, toggle_selection};
use super::layout::LayoutController;
use super::render;
use super::scale::ScaleConfig;
use super::state::{CourseGraphState, Release};
use super::theme::Theme;
use super::types::GraphData;

/// Frame step handed to the simulation.
const FRAME_DT: f32 = 0.016;

/// Bundles simulation state with visual configuration and the snapshot it
/// was last synced to.
struct GraphContext {
	state: CourseGraphState,
	data: GraphData,
	scale: ScaleConfig,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn set_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, cursor: &str) {
	if let Some(canvas) = canvas_ref.get() {
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

/// Renders the course graph on a canvas element.
///
/// `data` is the current snapshot from the graph builder and `selected` the
/// host's selection; clicks report the next selection through `on_select`
/// and never mutate `selected` directly. Set `fullscreen = true` to fill the
/// viewport and resize with the window; explicit `width`/`height` override
/// sizing to the parent container.
#[component]
pub fn CourseGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] selected: Signal<Option<String>>,
	#[prop(into)] on_select: Callback<Option<String>>,
	#[prop(default = 2000.0)] warmup_ms: f64,
	#[prop(default = ZoomBounds::default())] zoom: ZoomBounds,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let (ready, set_ready) = signal(false);
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("course-map: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("course-map: canvas 2d context unavailable");
				return;
			}
		};

		let snapshot = data.get_untracked();
		let mut state = CourseGraphState::new(
			&snapshot,
			w,
			h,
			LayoutController::new(warmup_ms / 1000.0),
			zoom,
		);
		state.set_selected(selected.get_untracked());
		debug!(
			"course-map: graph mounted with {} nodes at {}x{}",
			state.node_count(),
			w,
			h
		);
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			data: snapshot,
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(FRAME_DT);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
		set_ready.set(true);
	});

	// Re-sync the simulation whenever the builder produces a new snapshot.
	let context_sync = context.clone();
	Effect::new(move |_| {
		let snapshot = data.get();
		if let Some(ref mut c) = *context_sync.borrow_mut() {
			if c.data != snapshot {
				c.state.sync(&snapshot);
				c.data = snapshot;
			}
		}
	});

	let context_sel = context.clone();
	Effect::new(move |_| {
		let current = selected.get();
		if let Some(ref mut c) = *context_sel.borrow_mut() {
			c.state.set_selected(current);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			match c.state.node_at_position(x, y, &c.scale) {
				Some(idx) => c.state.begin_drag(idx, x, y),
				None => c.state.begin_pan(x, y),
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let mut cursor = None;
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.active {
				c.state.drag_to(x, y);
			} else {
				let hovered = c.state.node_at_position(x, y, &c.scale);
				if c.state.set_hover(hovered) {
					cursor = Some(c.state.hover.cursor());
				}
				c.state.pan_to(x, y);
			}
		}
		if let Some(cursor) = cursor {
			set_cursor(canvas_ref, cursor);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		// Resolve the click with the borrow released before notifying the host.
		let next = {
			let mut guard = context_mu.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			c.state.pan.active = false;
			match c.state.end_drag() {
				Release::Click(id) => c
					.data
					.node(&id)
					.map(|node| toggle_selection(selected.get_untracked().as_deref(), node)),
				Release::Pinned(id) => {
					debug!("course-map: pinned {id}");
					None
				}
				Release::None => None,
			}
		};
		if let Some(next) = next {
			on_select.run(next);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.cancel_pointer();
			c.state.set_hover(None);
		}
		set_cursor(canvas_ref, "grab");
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<div class="course-graph">
			<Show when=move || !ready.get()>
				<div class="graph-loading">"Loading course map…"</div>
			</Show>
			<canvas
				node_ref=canvas_ref
				class="course-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}
