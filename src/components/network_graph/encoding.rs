//! Mapping from graph attributes and highlight membership to visual encoding.
//!
//! Everything here is pure and cheap; the renderer calls it for every node and
//! link on every frame.

use super::highlight::HighlightSnapshot;
use super::theme::{Color, Theme};
use super::types::{GraphLink, GraphNode};

/// Node radius as a function of centrality.
#[derive(Clone, Debug)]
pub struct SizeScale {
	/// Radius of a node with zero centrality.
	pub base: f64,
	/// Radius added per unit of centrality.
	pub scale_factor: f64,
	/// Upper bound on the centrality contribution.
	pub cap: f64,
}

impl Default for SizeScale {
	fn default() -> Self {
		Self {
			base: 4.0,
			scale_factor: 15.0,
			cap: 12.0,
		}
	}
}

impl SizeScale {
	/// Largest radius any node can get.
	pub fn max(&self) -> f64 {
		self.base + self.cap
	}
}

/// Highlight color inside the neighborhood, otherwise the community color.
pub fn node_color(node: &GraphNode, highlight: &HighlightSnapshot, theme: &Theme) -> Color {
	if highlight.contains_node(&node.id) {
		return theme.highlight;
	}
	node.community
		.and_then(|community| theme.palette.for_community(community))
		.unwrap_or(theme.neutral_node)
}

/// Highlighted links are opaque; the rest are drawn translucent in their type color.
pub fn link_color(link: &GraphLink, highlight: &HighlightSnapshot, theme: &Theme) -> Color {
	if highlight.contains_link(&link.key()) {
		return theme.highlight;
	}
	theme.links.color(&link.kind).with_alpha(theme.links.opacity)
}

/// Non-decreasing in `centrality` and never above `scale.max()`.
pub fn node_size(centrality: f64, scale: &SizeScale) -> f64 {
	// NaN and negative scores contribute nothing.
	let centrality = if centrality.is_nan() {
		0.0
	} else {
		centrality.max(0.0)
	};
	scale.base + (centrality * scale.scale_factor).min(scale.cap)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::highlight::neighborhood;
	use crate::components::network_graph::types::LinkType;

	fn node(id: &str, community: Option<i64>) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: id.into(),
			community,
			centrality: 0.01,
		}
	}

	fn link(kind: LinkType) -> GraphLink {
		GraphLink {
			source: "a".into(),
			target: "b".into(),
			kind,
		}
	}

	#[test]
	fn highlighted_node_uses_highlight_color() {
		let theme = Theme::default();
		let links = [link(LinkType::Quote)];
		let snapshot = neighborhood(&links, Some("a"));
		assert_eq!(node_color(&node("b", Some(1)), &snapshot, &theme), theme.highlight);
		assert_eq!(
			node_color(&node("c", Some(1)), &snapshot, &theme),
			theme.palette.colors[1]
		);
	}

	#[test]
	fn community_color_wraps_palette() {
		let theme = Theme::default();
		let none = HighlightSnapshot::default();
		let len = theme.palette.len() as i64;
		assert_eq!(
			node_color(&node("a", Some(len + 3)), &none, &theme),
			theme.palette.colors[3]
		);
		assert_eq!(node_color(&node("a", None), &none, &theme), theme.neutral_node);
	}

	#[test]
	fn link_colors_by_type_with_reduced_opacity() {
		let theme = Theme::default();
		let none = HighlightSnapshot::default();
		let color = link_color(&link(LinkType::Retweet), &none, &theme);
		assert_eq!(color, theme.links.retweet.with_alpha(theme.links.opacity));

		let unknown = link_color(&link(LinkType::Other("like".into())), &none, &theme);
		assert_eq!(unknown, theme.links.default.with_alpha(theme.links.opacity));
	}

	#[test]
	fn highlighted_link_is_opaque_highlight() {
		let theme = Theme::default();
		let links = [link(LinkType::Mention)];
		let snapshot = neighborhood(&links, Some("b"));
		assert_eq!(link_color(&links[0], &snapshot, &theme), theme.highlight);
	}

	#[test]
	fn size_is_monotonic_and_bounded() {
		let scale = SizeScale::default();
		let mut previous = node_size(0.0, &scale);
		for step in 1..=200 {
			let size = node_size(step as f64 * 0.01, &scale);
			assert!(size >= previous);
			assert!(size <= scale.max());
			previous = size;
		}
		assert_eq!(node_size(100.0, &scale), scale.max());
		assert_eq!(node_size(-1.0, &scale), scale.base);
		assert_eq!(node_size(f64::NAN, &scale), scale.base);
	}
}
