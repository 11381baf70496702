//! influence-graph: Interactive network visualization of account communities.
//!
//! This crate provides a WASM-based component that turns a sparse analysis
//! result (communities and influential accounts, no edges) into a connected
//! force-directed graph with hover neighborhoods, pan/zoom, and node dragging.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::network_graph::{
	AnalysisPayload, CommunityRanking, GraphData, GraphLink, GraphNode, LinkType,
	NetworkGraphCanvas, SynthesisConfig, synthesize,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("influence-graph: logging initialized");
}

/// Load the analysis result from a script element with id="analysis-data".
/// Expected format: JSON with { query, communities, most_influential, metrics }
pub fn load_analysis_payload() -> Option<AnalysisPayload> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("analysis-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match AnalysisPayload::from_json(&json_text) {
		Ok(payload) => {
			info!(
				"influence-graph: loaded {} communities, {} influential accounts",
				payload.communities.len(),
				payload.most_influential.len()
			);
			Some(payload)
		}
		Err(e) => {
			warn!("influence-graph: failed to parse analysis data: {}", e);
			None
		}
	}
}

/// Open the account's profile in a new tab.
fn open_profile(node: GraphNode) {
	let url = format!("https://twitter.com/{}", node.name);
	let opened = web_sys::window().map(|window| window.open_with_url_and_target(&url, "_blank"));
	if !matches!(opened, Some(Ok(_))) {
		warn!("influence-graph: could not open {}", url);
	}
}

/// Main application component.
/// Loads the analysis result from DOM and renders the network visualization.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let payload = load_analysis_payload().unwrap_or_default();
	let title = if payload.query.is_empty() {
		"Influence Network".to_string()
	} else {
		format!("Influence Network: {}", payload.query)
	};
	let payload_signal = Signal::derive(move || payload.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=title.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<NetworkGraphCanvas
				payload=payload_signal
				fullscreen=true
				on_node_click=Callback::new(open_profile)
			/>
			<div class="graph-overlay">
				<h1>{title}</h1>
				<p class="subtitle">"Hover to see connections. Click to open a profile. Scroll to zoom."</p>
			</div>
		</div>
	}
}
