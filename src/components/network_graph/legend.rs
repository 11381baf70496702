//! Overlays drawn on top of the canvas: focused-node tooltip, legend, loading
//! indicator, and the summary line.

use leptos::prelude::*;

use super::ranking::CommunityRanking;
use super::theme::Theme;
use super::types::{GraphData, GraphNode};

/// Everything the tooltip shows for the focused node.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipInfo {
	/// `@name` handle.
	pub handle: String,
	/// Size rank label such as `#1`, never the raw community id.
	pub rank_label: Option<String>,
	/// CSS color of the node's community swatch.
	pub community_color: Option<String>,
	/// Centrality to four decimals.
	pub centrality: String,
}

impl TooltipInfo {
	/// Tooltip contents for one node.
	pub fn for_node(node: &GraphNode, ranking: &CommunityRanking, theme: &Theme) -> Self {
		Self {
			handle: format!("@{}", node.name),
			rank_label: node
				.community
				.and_then(|community| ranking.ordinal_label(community)),
			community_color: node
				.community
				.and_then(|community| theme.palette.for_community(community))
				.map(|color| color.to_css()),
			centrality: format!("{:.4}", node.centrality),
		}
	}
}

/// One-line size summary, e.g. `12 accounts • 30 connections`.
pub fn summary_line(data: &GraphData) -> String {
	format!(
		"{} accounts • {} connections",
		data.nodes.len(),
		data.links.len()
	)
}

/// Card describing the focused node; hidden when nothing is focused.
#[component]
pub fn NodeTooltip(#[prop(into)] info: Signal<Option<TooltipInfo>>) -> impl IntoView {
	move || {
		info.get().map(|info| {
			let rank = info.rank_label.map(|label| {
				let swatch = format!(
					"background-color: {};",
					info.community_color.unwrap_or_default()
				);
				view! {
					<div class="tooltip-community">
						<span>"Community"</span>
						<span class="swatch" style=swatch></span>
						<span class="rank">{label}</span>
					</div>
				}
			});
			view! {
				<div class="graph-tooltip">
					<div class="tooltip-handle">{info.handle}</div>
					{rank}
					<div class="tooltip-centrality">
						<span>"Centrality"</span>
						<span class="value">{info.centrality}</span>
					</div>
				</div>
			}
		})
	}
}

/// Link-type colors and the node encodings.
#[component]
pub fn Legend(theme: Theme) -> impl IntoView {
	let swatch = |css: String| format!("background-color: {css};");
	let link_rows = theme
		.links
		.legend()
		.into_iter()
		.map(|(kind, color)| {
			view! {
				<li>
					<span class="swatch" style=swatch(color.to_css())></span>
					<span>{kind.to_string()}</span>
				</li>
			}
		})
		.collect_view();
	let community_swatches = theme
		.palette
		.colors
		.iter()
		.take(3)
		.map(|color| view! { <span class="swatch" style=swatch(color.to_css())></span> })
		.collect_view();

	view! {
		<div class="graph-legend">
			<div class="legend-title">"Legend"</div>
			<ul class="legend-links">{link_rows}</ul>
			<ul class="legend-nodes">
				<li>
					<span class="swatch" style=swatch(theme.neutral_node.to_css())></span>
					<span>"Size = centrality"</span>
				</li>
				<li>{community_swatches}<span>"Color = community"</span></li>
				<li>
					<span class="swatch" style=swatch(theme.highlight.to_css())></span>
					<span>"Highlighted on hover"</span>
				</li>
			</ul>
		</div>
	}
}

/// Spinner shown until the layout is ready.
#[component]
pub fn LoadingOverlay(#[prop(into)] ready: Signal<bool>) -> impl IntoView {
	move || {
		(!ready.get()).then(|| {
			view! {
				<div class="graph-loading">
					<div class="spinner"></div>
					<div>"Building visualization..."</div>
				</div>
			}
		})
	}
}
