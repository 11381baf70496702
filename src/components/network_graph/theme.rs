//! Visual theming for the network graph.
//!
//! Provides the community palette, link-type colors, and background/node/edge
//! style configuration.

use super::types::LinkType;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with another alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS `rgba(...)` string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors assigned to communities, indexed by community id modulo length.
#[derive(Clone, Debug)]
pub struct CommunityPalette {
	/// Colors indexed by community id modulo length.
	pub colors: Vec<Color>,
}

impl CommunityPalette {
	/// Saturated, well-separated hues (default)
	pub fn vivid() -> Self {
		Self {
			colors: vec![
				Color::rgb(59, 130, 246),  // Blue
				Color::rgb(16, 185, 129),  // Green
				Color::rgb(245, 158, 11),  // Amber
				Color::rgb(139, 92, 246),  // Violet
				Color::rgb(236, 72, 153),  // Pink
				Color::rgb(249, 115, 22),  // Orange
				Color::rgb(20, 184, 166),  // Teal
				Color::rgb(99, 102, 241),  // Indigo
				Color::rgb(239, 68, 68),   // Red
				Color::rgb(132, 204, 22),  // Lime
			],
		}
	}

	/// Number of colors.
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// True when the palette has no colors.
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Color for a raw community id. Negative ids wrap like positive ones.
	pub fn for_community(&self, community: i64) -> Option<Color> {
		if self.colors.is_empty() {
			return None;
		}
		let index = community.rem_euclid(self.colors.len() as i64) as usize;
		self.colors.get(index).copied()
	}
}

/// Colors per interaction kind.
#[derive(Clone, Debug)]
pub struct LinkPalette {
	/// Retweet links.
	pub retweet: Color,
	/// Mention links.
	pub mention: Color,
	/// Reply links.
	pub reply: Color,
	/// Quote links.
	pub quote: Color,
	/// Used for `auto` links and any unrecognized label.
	pub default: Color,
	/// Opacity applied to non-highlighted links.
	pub opacity: f64,
}

impl LinkPalette {
	/// Color for a link type, ignoring opacity.
	pub fn color(&self, kind: &LinkType) -> Color {
		match kind {
			LinkType::Retweet => self.retweet,
			LinkType::Mention => self.mention,
			LinkType::Reply => self.reply,
			LinkType::Quote => self.quote,
			LinkType::Auto | LinkType::Other(_) => self.default,
		}
	}

	/// Legend rows: label and swatch for every dedicated link type.
	pub fn legend(&self) -> [(LinkType, Color); 4] {
		[
			(LinkType::Retweet, self.retweet),
			(LinkType::Mention, self.mention),
			(LinkType::Reply, self.reply),
			(LinkType::Quote, self.quote),
		]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Curvature as a fraction of link length (0.0 = straight)
	pub curvature: f64,
	/// Directional particles drawn on each highlighted link
	pub particle_count: usize,
	/// Particle travel per second, as a fraction of link length
	pub particle_speed: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border color
	pub border_color: Color,
	/// Label text color
	pub label_color: Color,
	/// Outline drawn behind labels for legibility
	pub label_outline: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Link curvature and particles.
	pub edge: EdgeStyle,
	/// Node fill, border and labels.
	pub node: NodeStyle,
	/// Community colors.
	pub palette: CommunityPalette,
	/// Link type colors.
	pub links: LinkPalette,
	/// Focused node, its neighbors, and the links between them.
	pub highlight: Color,
	/// Nodes without a community.
	pub neutral_node: Color,
}

impl Theme {
	/// Dark theme with vivid community colors (default)
	pub fn default_theme() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(17, 24, 39),
				color_secondary: Color::rgb(31, 41, 55),
				use_gradient: true,
			},
			edge: EdgeStyle {
				curvature: 0.1,
				particle_count: 4,
				particle_speed: 0.3,
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				label_color: Color::rgba(255, 255, 255, 0.9),
				label_outline: Color::rgba(0, 0, 0, 0.8),
			},
			palette: CommunityPalette::vivid(),
			links: LinkPalette {
				retweet: Color::rgb(59, 130, 246),
				mention: Color::rgb(16, 185, 129),
				reply: Color::rgb(245, 158, 11),
				quote: Color::rgb(139, 92, 246),
				default: Color::rgb(156, 163, 175),
				opacity: 0.7,
			},
			highlight: Color::rgb(255, 119, 0),
			neutral_node: Color::rgb(170, 170, 170),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
