//! Zoom-dependent scaling configuration for graph visuals.
//!
//! Node radii come from centrality (see [`super::encoding::node_size`]) and
//! live in world space. Everything else here decides how strokes, arrows,
//! labels, and hit areas react to the zoom level `k`.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the layout. Values in world-space
//!   scale proportionally with zoom (appear larger when zoomed in).
//! - **Screen-space**: Pixel coordinates on the canvas. Values in screen-space
//!   remain constant regardless of zoom level.

use super::encoding::SizeScale;

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World/Screen variants complete the API for callers customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Configuration for node labels and hit detection.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Centrality-driven radius.
	pub size: SizeScale,
	/// Extra hit radius around a node, in screen pixels.
	pub hit_padding: f64,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Zoom above which every label is drawn, not just highlighted ones.
	pub label_zoom: f64,
}

/// Configuration for link strokes.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width in screen pixels.
	pub line_width: f64,
	/// Line width of highlighted links in screen pixels.
	pub highlight_width: f64,
	/// Particle radius in screen pixels.
	pub particle_radius: f64,
}

/// Configuration for directional arrows.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Base arrow length in world units.
	pub size: f64,
	/// How arrow size scales with zoom.
	pub size_behavior: ScaleBehavior,
}

/// Allowed zoom range.
#[derive(Clone, Debug)]
pub struct ZoomConfig {
	/// Most zoomed-out level.
	pub min: f64,
	/// Most zoomed-in level.
	pub max: f64,
	/// Multiplier per wheel notch.
	pub step: f64,
}

impl ZoomConfig {
	/// Zoom level after one wheel notch in the given direction.
	pub fn step_from(&self, k: f64, zoom_in: bool) -> f64 {
		let factor = if zoom_in { self.step } else { 1.0 / self.step };
		(k * factor).clamp(self.min, self.max)
	}
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node hit areas and labels.
	pub node: NodeScaleConfig,
	/// Link strokes and particles.
	pub edge: EdgeScaleConfig,
	/// Directional arrows.
	pub arrow: ArrowScaleConfig,
	/// Zoom bounds and wheel step.
	pub zoom: ZoomConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				size: SizeScale::default(),
				hit_padding: 4.0,
				label_size: 12.0,
				label_zoom: 1.5,
			},
			edge: EdgeScaleConfig {
				line_width: 0.8,
				highlight_width: 2.0,
				particle_radius: 2.0,
			},
			arrow: ArrowScaleConfig {
				size: 3.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 2.0,
					max_screen: 12.0,
				},
			},
			zoom: ZoomConfig {
				min: 0.5,
				max: 5.0,
				step: 1.1,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Extra hit radius around nodes.
	pub hit_padding: f64,
	/// CSS font for labels of non-highlighted nodes.
	pub label_font: String,
	/// CSS font for labels of highlighted nodes.
	pub label_bold_font: String,
	/// Whether labels of non-highlighted nodes are drawn.
	pub all_labels: bool,
	/// Stroke width of plain links.
	pub edge_line_width: f64,
	/// Stroke width of highlighted links.
	pub edge_highlight_width: f64,
	/// Radius of link particles.
	pub particle_radius: f64,
	/// Arrow length.
	pub arrow_size: f64,
	/// Stroke width of the label outline.
	pub outline_width: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let font_size = config.node.label_size / k;
		Self {
			k,
			hit_padding: config.node.hit_padding / k,
			label_font: format!("{font_size}px sans-serif"),
			label_bold_font: format!("bold {font_size}px sans-serif"),
			all_labels: k > config.node.label_zoom,
			edge_line_width: config.edge.line_width / k,
			edge_highlight_width: config.edge.highlight_width / k,
			particle_radius: config.edge.particle_radius / k,
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			outline_width: 2.0 / k,
		}
	}
}
