//! Canvas rendering for the network graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Links, then particles on highlighted links (world space)
//! 3. Nodes, then labels on top

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::encoding::{link_color, node_color, node_size};
use super::scale::{ScaleConfig, ScaledValues};
use super::state::NetworkGraphState;
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &NetworkGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_links(state, ctx, config, &scale, theme);
	draw_nodes(state, ctx, config, &scale, theme);

	ctx.restore();
}

fn draw_background(state: &NetworkGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let background = &theme.background;
	let gradient = background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_links(
	state: &NetworkGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let data = state.layout.data();
	let highlight = state.highlight.snapshot();

	state.layout.graph().visit_edges(|n1, n2, edge| {
		let Some(link) = data.links.get(edge.user_data.index) else {
			return;
		};
		let (Some(source), Some(target)) = (
			data.nodes.get(n1.data.user_data.index),
			data.nodes.get(n2.data.user_data.index),
		) else {
			return;
		};
		// Edges are undirected in the engine; orient them as the link does.
		let (from, to, from_size, to_size) = if source.id == link.source {
			(n1, n2, source.centrality, target.centrality)
		} else {
			(n2, n1, target.centrality, source.centrality)
		};

		let (x1, y1, x2, y2) = (from.x() as f64, from.y() as f64, to.x() as f64, to.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let highlighted = highlight.contains_link(&link.key());
		let color = link_color(link, highlight, theme).to_css();
		let width = if highlighted {
			scale.edge_highlight_width
		} else {
			scale.edge_line_width
		};

		let (ux, uy) = (dx / dist, dy / dist);
		let start_r = node_size(from_size, &config.node.size);
		let end_r = node_size(to_size, &config.node.size);
		let curve = Curve::new(x1, y1, x2, y2, theme.edge.curvature);

		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * start_r, y1 + uy * start_r);
		let _ = ctx.quadratic_curve_to(curve.cx, curve.cy, x2 - ux * end_r, y2 - uy * end_r);
		ctx.stroke();

		draw_arrow(ctx, &curve, end_r, scale.arrow_size, &color);

		if highlighted {
			ctx.set_fill_style_str(&theme.highlight.to_css());
			for t in state.particles.offsets(&theme.edge) {
				let (px, py) = curve.point(t);
				ctx.begin_path();
				let _ = ctx.arc(px, py, scale.particle_radius, 0.0, 2.0 * PI);
				ctx.fill();
			}
		}
	});
}

/// Quadratic curve bending to the right of the link direction.
struct Curve {
	x1: f64,
	y1: f64,
	cx: f64,
	cy: f64,
	x2: f64,
	y2: f64,
}

impl Curve {
	fn new(x1: f64, y1: f64, x2: f64, y2: f64, curvature: f64) -> Self {
		let (dx, dy) = (x2 - x1, y2 - y1);
		Self {
			x1,
			y1,
			cx: (x1 + x2) / 2.0 - dy * curvature,
			cy: (y1 + y2) / 2.0 + dx * curvature,
			x2,
			y2,
		}
	}

	fn point(&self, t: f64) -> (f64, f64) {
		let u = 1.0 - t;
		(
			u * u * self.x1 + 2.0 * u * t * self.cx + t * t * self.x2,
			u * u * self.y1 + 2.0 * u * t * self.cy + t * t * self.y2,
		)
	}
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, curve: &Curve, end_r: f64, size: f64, color: &str) {
	// Arrow follows the curve tangent at the target end.
	let (tx, ty) = (curve.x2 - curve.cx, curve.y2 - curve.cy);
	let len = (tx * tx + ty * ty).sqrt();
	if len < 0.001 {
		return;
	}
	let (ux, uy) = (tx / len, ty / len);
	let (tip_x, tip_y) = (curve.x2 - ux * end_r, curve.y2 - uy * end_r);
	let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	ctx.set_fill_style_str(color);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &NetworkGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let data = state.layout.data();
	let highlight = state.highlight.snapshot();

	// Pass 1: discs, highlighted ones last so they sit on top
	for on_top in [false, true] {
		state.layout.graph().visit_nodes(|node| {
			let Some(info) = data.nodes.get(node.data.user_data.index) else {
				return;
			};
			if highlight.contains_node(&info.id) != on_top {
				return;
			}
			let (x, y) = (node.x() as f64, node.y() as f64);
			let radius = node_size(info.centrality, &config.node.size);
			let color = node_color(info, highlight, theme);

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			match theme
				.node
				.use_gradient
				.then(|| {
					ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
						.ok()
				})
				.flatten()
			{
				Some(gradient) => {
					let _ = gradient.add_color_stop(0.0, &color.lighten(0.3).to_css());
					let _ = gradient.add_color_stop(0.7, &color.to_css());
					let _ = gradient.add_color_stop(1.0, &color.darken(0.2).to_css());
					#[allow(deprecated)]
					ctx.set_fill_style(&gradient);
				}
				None => ctx.set_fill_style_str(&color.to_css()),
			}
			ctx.fill();

			if theme.node.border_width > 0.0 {
				ctx.set_stroke_style_str(&theme.node.border_color.to_css());
				ctx.set_line_width(theme.node.border_width / scale.k);
				ctx.stroke();
			}
		});
	}

	// Pass 2: labels for highlighted nodes, or all of them when zoomed in
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_line_width(scale.outline_width);
	ctx.set_stroke_style_str(&theme.node.label_outline.to_css());
	state.layout.graph().visit_nodes(|node| {
		let Some(info) = data.nodes.get(node.data.user_data.index) else {
			return;
		};
		let highlighted = highlight.contains_node(&info.id);
		if !highlighted && !scale.all_labels {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let label = format!("@{}", info.name);
		let offset = node_size(info.centrality, &config.node.size) + scale.hit_padding * 2.0;
		let label_color = if highlighted {
			theme.node.label_color.with_alpha(1.0)
		} else {
			theme.node.label_color
		};

		ctx.set_font(if highlighted {
			&scale.label_bold_font
		} else {
			&scale.label_font
		});
		let _ = ctx.stroke_text(&label, x, y + offset);
		ctx.set_fill_style_str(&label_color.to_css());
		let _ = ctx.fill_text(&label, x, y + offset);
	});
}
