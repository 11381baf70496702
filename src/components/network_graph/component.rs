//! Leptos component wrapping the network graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for hover focus, node dragging, panning, and zooming. An animation
//! loop runs via `requestAnimationFrame`, ticking the layout and repainting
//! only when something changed.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::layout::LayoutConfig;
use super::legend::{Legend, LoadingOverlay, NodeTooltip, TooltipInfo, summary_line};
use super::payload::AnalysisPayload;
use super::render;
use super::scale::ScaleConfig;
use super::state::{DragState, NetworkGraphState};
use super::synthesis::SynthesisConfig;
use super::theme::Theme;
use super::types::GraphNode;

/// Bundles graph state with visual configuration and the RNG used for synthesis.
struct GraphContext {
	state: NetworkGraphState,
	scale: ScaleConfig,
	theme: Theme,
	synthesis: SynthesisConfig,
	rng: StdRng,
	last_frame: Option<f64>,
}

/// Signals the overlays read from; written by event handlers and the animation loop.
#[derive(Clone, Copy)]
struct Overlays {
	tooltip: RwSignal<Option<TooltipInfo>>,
	ready: RwSignal<bool>,
	summary: RwSignal<String>,
}

impl GraphContext {
	fn load(&mut self, payload: &AnalysisPayload, overlays: Overlays) -> u64 {
		let generation = self.state.load(payload, &self.synthesis, &mut self.rng);
		overlays.tooltip.set(None);
		overlays.ready.set(self.state.layout.is_ready());
		overlays.summary.set(summary_line(self.state.layout.data()));
		generation
	}

	fn publish_focus(&self, overlays: Overlays) {
		overlays.tooltip.set(self.state.tooltip(&self.theme));
	}
}

/// Arm the fixed-delay readiness fallback for one layout generation.
fn arm_fallback(
	window: &Window,
	context: &Rc<RefCell<Option<GraphContext>>>,
	generation: u64,
	overlays: Overlays,
) {
	let Some(delay) = context
		.borrow()
		.as_ref()
		.map(|c| c.state.layout.config().fallback_delay)
	else {
		return;
	};
	let context = context.clone();
	let callback = Closure::once_into_js(move || {
		if let Some(ref mut c) = *context.borrow_mut() {
			c.state.layout.on_fallback_elapsed(generation);
			overlays.ready.set(c.state.layout.is_ready());
		}
	});
	if window
		.set_timeout_with_callback_and_timeout_and_arguments_0(
			callback.unchecked_ref(),
			(delay * 1000.0) as i32,
		)
		.is_err()
	{
		warn!("influence-graph: could not arm readiness fallback");
	}
}

fn viewport(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn event_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive network graph of an analysis result on a canvas.
///
/// Each new `payload` value is synthesized into a fresh graph and replaces the
/// previous one. The component sizes itself to its parent container by
/// default; set `fullscreen = true` to fill the viewport and follow window
/// resizes. Set `seed` to make link synthesis reproducible.
#[component]
pub fn NetworkGraphCanvas(
	#[prop(into)] payload: Signal<AnalysisPayload>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = None)] seed: Option<u64>,
	#[prop(optional)] on_node_click: Option<Callback<GraphNode>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	let overlays = Overlays {
		tooltip: RwSignal::new(None),
		ready: RwSignal::new(false),
		summary: RwSignal::new(String::new()),
	};
	let theme = Theme::default();
	let legend_theme = theme.clone();

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
			viewport(&window).unwrap_or((800.0, 600.0))
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

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("influence-graph: canvas has no 2d context");
			return;
		};

		// Unseeded runs draw from the browser's RNG, so each query gets fresh links.
		let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
		let mut graph = GraphContext {
			state: NetworkGraphState::new(w, h, LayoutConfig::default()),
			scale: ScaleConfig::default(),
			theme: theme.clone(),
			synthesis: SynthesisConfig::default(),
			rng: StdRng::seed_from_u64(seed),
			last_frame: None,
		};
		let generation = graph.load(&payload.get_untracked(), overlays);
		*context_init.borrow_mut() = Some(graph);
		arm_fallback(&window, &context_init, generation, overlays);
		info!("influence-graph: canvas mounted at {w}x{h}");

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport) else {
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
				let now = js_sys::Date::now();
				let dt = c.last_frame.map_or(0.016, |last| (now - last) / 1000.0);
				c.last_frame = Some(now);

				if c.state.tick(dt) {
					render::render(&c.state, &ctx, &c.scale, &c.theme);
				}
				if c.state.layout.is_ready() && !overlays.ready.get_untracked() {
					overlays.ready.set(true);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(window) = web_sys::window() {
					let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Later payloads replace the graph; the first one is consumed at mount.
	let context_payload = context.clone();
	Effect::new(move |previous: Option<()>| {
		let next = payload.get();
		if previous.is_none() {
			return;
		}
		let generation = match *context_payload.borrow_mut() {
			Some(ref mut c) => c.load(&next, overlays),
			None => return,
		};
		if let Some(window) = web_sys::window() {
			arm_fallback(&window, &context_payload, generation, overlays);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(idx) = c.state.node_at_position(x, y, &c.scale) {
				let (nx, ny) = c.state.layout.position(idx).unwrap_or_default();
				c.state.drag = DragState {
					active: true,
					node_idx: Some(idx),
					start_x: x,
					start_y: y,
					node_start_x: nx,
					node_start_y: ny,
					moved: false,
				};
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			// Update hover focus when not dragging
			if !c.state.drag.active {
				let hovered = c.state.node_at_position(x, y, &c.scale);
				if c.state.set_focus(hovered) {
					c.publish_focus(overlays);
				}
			}

			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node_idx {
					let (dx, dy) = (
						(x - c.state.drag.start_x) / c.state.transform.k,
						(y - c.state.drag.start_y) / c.state.transform.k,
					);
					if dx != 0.0 || dy != 0.0 {
						c.state.drag.moved = true;
					}
					let (nx, ny) = (
						c.state.drag.node_start_x + dx as f32,
						c.state.drag.node_start_y + dy as f32,
					);
					c.state.layout.pin(idx, nx, ny);
					c.state.layout.reheat();
				}
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
				c.state.layout.refresh();
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = match *context_mu.borrow_mut() {
			Some(ref mut c) => {
				let clicked = (c.state.drag.active && !c.state.drag.moved)
					.then_some(c.state.drag.node_idx)
					.flatten()
					.and_then(|idx| c.state.node(idx).cloned());
				c.state.drag = Default::default();
				c.state.pan.active = false;
				clicked
			}
			None => None,
		};
		// Run the callback outside the borrow; it may touch the graph again.
		if let (Some(node), Some(callback)) = (clicked, on_node_click) {
			callback.run(node);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag = Default::default();
			c.state.pan.active = false;
			if c.state.set_focus(None) {
				c.publish_focus(overlays);
			}
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let new_k = c.scale.zoom.step_from(c.state.transform.k, ev.delta_y() < 0.0);
			c.state.zoom_at(x, y, new_k);
		}
	};

	view! {
		<div class="network-graph">
			<canvas
				node_ref=canvas_ref
				class="network-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-summary">{move || overlays.summary.get()}</div>
			<NodeTooltip info=overlays.tooltip />
			<Legend theme=legend_theme />
			<LoadingOverlay ready=overlays.ready />
		</div>
	}
}
