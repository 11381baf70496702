//! Graph view state and interaction tracking.
//!
//! Combines the layout controller with the community ranking, the highlight
//! engine, and pan/zoom/drag bookkeeping. All transitions happen synchronously
//! inside one event handler or animation frame.

use force_graph::DefaultNodeIdx;
use rand::Rng;

use super::encoding::node_size;
use super::highlight::HighlightEngine;
use super::layout::{LayoutConfig, LayoutController};
use super::legend::TooltipInfo;
use super::particles::ParticleClock;
use super::payload::AnalysisPayload;
use super::ranking::CommunityRanking;
use super::scale::ScaleConfig;
use super::synthesis::{SynthesisConfig, synthesize};
use super::theme::Theme;
use super::types::GraphNode;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal offset in screen pixels.
	pub x: f64,
	/// Vertical offset in screen pixels.
	pub y: f64,
	/// Zoom factor, clamped to the configured zoom range.
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A node is being dragged.
	pub active: bool,
	/// The dragged node.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer position at drag start, in screen pixels.
	pub start_x: f64,
	pub start_y: f64,
	/// Node position at drag start, in world units.
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Set once the pointer moves; a release without movement is a click.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// The background is being dragged.
	pub active: bool,
	/// Pointer position at pan start, in screen pixels.
	pub start_x: f64,
	pub start_y: f64,
	/// Transform offset at pan start.
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Core view state: one analysis result, its layout, and the current focus.
pub struct NetworkGraphState {
	/// Physics and the current snapshot.
	pub layout: LayoutController,
	/// Hover neighborhood.
	pub highlight: HighlightEngine,
	/// Size ranks of the loaded communities.
	pub ranking: CommunityRanking,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub particles: ParticleClock,
	/// Canvas size in pixels.
	pub width: f64,
	pub height: f64,
}

impl NetworkGraphState {
	/// Empty view centred on a canvas of the given size.
	pub fn new(width: f64, height: f64, layout: LayoutConfig) -> Self {
		Self {
			layout: LayoutController::new(layout),
			highlight: HighlightEngine::default(),
			ranking: CommunityRanking::default(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			particles: ParticleClock::default(),
			width,
			height,
		}
	}

	/// Replace the displayed analysis result. Returns the layout generation.
	pub fn load<R: Rng + ?Sized>(
		&mut self,
		payload: &AnalysisPayload,
		config: &SynthesisConfig,
		rng: &mut R,
	) -> u64 {
		self.ranking = CommunityRanking::from_communities(&payload.communities);
		self.highlight.blur();
		self.drag = DragState::default();
		self.layout.submit(synthesize(payload, config, rng))
	}

	/// Convert canvas pixels to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Snapshot node behind a simulated node.
	pub fn node(&self, idx: DefaultNodeIdx) -> Option<&GraphNode> {
		let mut index = None;
		self.layout.graph().visit_nodes(|node| {
			if node.index() == idx {
				index = Some(node.data.user_data.index);
			}
		});
		index.and_then(|i| self.layout.data().nodes.get(i))
	}

	/// Topmost node under a canvas position.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let padding = config.node.hit_padding / self.transform.k;
		let nodes = &self.layout.data().nodes;
		let mut found = None;
		self.layout.graph().visit_nodes(|node| {
			let Some(info) = nodes.get(node.data.user_data.index) else {
				return;
			};
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit_radius = node_size(info.centrality, &config.node.size) + padding;
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Focus a node (or blur with `None`). A changed neighborhood requests a
	/// repaint; the simulation keeps its state either way.
	pub fn set_focus(&mut self, idx: Option<DefaultNodeIdx>) -> bool {
		let id = idx.and_then(|idx| self.node(idx)).map(|node| node.id.clone());
		let changed = self
			.highlight
			.focus(id.as_deref(), &self.layout.data().links);
		if changed {
			self.layout.refresh();
		}
		changed
	}

	/// Tooltip contents for the focused node.
	pub fn tooltip(&self, theme: &Theme) -> Option<TooltipInfo> {
		let focus = self.highlight.snapshot().focus()?;
		let node = self.layout.data().node(focus)?;
		Some(TooltipInfo::for_node(node, &self.ranking, theme))
	}

	/// Advance physics and particles. Returns whether the frame must be repainted.
	pub fn tick(&mut self, dt: f64) -> bool {
		let moved = self.layout.tick(dt);
		self.particles.advance(dt);
		let animating = !self.highlight.snapshot().link_keys().is_empty();
		self.layout.take_repaint() || moved || animating || self.drag.active
	}

	/// Zoom to `new_k`, keeping the point under the cursor fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, new_k: f64) {
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
		self.layout.refresh();
	}

	/// Track a new canvas size; the layout is untouched.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.layout.refresh();
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::network_graph::payload::{Account, Community};

	fn payload() -> AnalysisPayload {
		let accounts = |ids: &[&str]| {
			ids.iter()
				.map(|id| Account {
					id: id.to_string(),
					name: id.to_string(),
				})
				.collect()
		};
		AnalysisPayload {
			communities: vec![
				Community {
					id: 5,
					size: Some(3),
					nodes: accounts(&["a", "b", "c"]),
					..Default::default()
				},
				Community {
					id: 2,
					size: Some(5),
					nodes: accounts(&["d", "e"]),
					..Default::default()
				},
			],
			..Default::default()
		}
	}

	fn loaded() -> NetworkGraphState {
		let mut state = NetworkGraphState::new(800.0, 600.0, LayoutConfig::default());
		state.load(
			&payload(),
			&SynthesisConfig::default(),
			&mut StdRng::seed_from_u64(7),
		);
		state
	}

	fn index_of(state: &NetworkGraphState, id: &str) -> DefaultNodeIdx {
		let target = state
			.layout
			.data()
			.nodes
			.iter()
			.position(|n| n.id == id)
			.unwrap();
		let mut found = None;
		state.layout.graph().visit_nodes(|node| {
			if node.data.user_data.index == target {
				found = Some(node.index());
			}
		});
		found.unwrap()
	}

	#[test]
	fn load_ranks_communities_and_lays_out() {
		let state = loaded();
		assert_eq!(state.ranking.rank(2), Some(1));
		assert_eq!(state.ranking.rank(5), Some(2));
		assert_eq!(state.layout.data().nodes.len(), 5);
	}

	#[test]
	fn focus_highlights_neighbors_and_requests_repaint() {
		let mut state = loaded();
		state.layout.take_repaint();
		let idx = index_of(&state, "a");

		assert!(state.set_focus(Some(idx)));
		assert!(state.layout.take_repaint());
		let snapshot = state.highlight.snapshot();
		assert!(snapshot.contains_node("a"));
		assert!(snapshot.node_ids().len() > 1);

		let tooltip = state.tooltip(&Theme::default()).unwrap();
		assert_eq!(tooltip.handle, "@a");
		assert_eq!(tooltip.rank_label.as_deref(), Some("#2"));

		state.set_focus(None);
		assert!(state.highlight.snapshot().is_empty());
		assert!(state.tooltip(&Theme::default()).is_none());
	}

	#[test]
	fn reload_clears_focus() {
		let mut state = loaded();
		let idx = index_of(&state, "d");
		state.set_focus(Some(idx));
		let generation = state.load(
			&AnalysisPayload::default(),
			&SynthesisConfig::default(),
			&mut StdRng::seed_from_u64(1),
		);
		assert_eq!(generation, 2);
		assert!(state.highlight.snapshot().is_empty());
		assert!(state.layout.data().nodes.is_empty());
	}

	#[test]
	fn hit_test_finds_node_under_cursor() {
		let state = loaded();
		let idx = index_of(&state, "e");
		let (x, y) = state.layout.position(idx).unwrap();
		let sx = x as f64 * state.transform.k + state.transform.x;
		let sy = y as f64 * state.transform.k + state.transform.y;
		let hit = state.node_at_position(sx, sy, &ScaleConfig::default()).unwrap();
		let (hx, hy) = state.layout.position(hit).unwrap();
		let distance = ((hx - x).powi(2) + (hy - y).powi(2)).sqrt() as f64;
		assert!(distance < 2.0 * ScaleConfig::default().node.size.max());
		assert!(state.node_at_position(-1.0e6, -1.0e6, &ScaleConfig::default()).is_none());
	}

	#[test]
	fn zoom_keeps_cursor_anchor() {
		let mut state = loaded();
		let before = state.screen_to_graph(300.0, 200.0);
		state.zoom_at(300.0, 200.0, 2.0);
		let after = state.screen_to_graph(300.0, 200.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}
}
