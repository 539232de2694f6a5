//! Canvas rendering for the course graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges (world space)
//! 3. Dimmed nodes, then highlighted and selected nodes on top

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::interaction::NodeVisualState;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{CourseGraphState, EdgeInfo, NodeInfo, resolved_position};
use super::theme::{Color, Theme};

/// Attempt to smooth values that would otherwise cause abrupt visual changes.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &CourseGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_background(state: &CourseGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = theme
		.background
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
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(state: &CourseGraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues) {
	let max_t = smooth_step(state.highlight.max_intensity());

	state.graph.visit_edges(|n1, n2, edge| {
		// The engine has not placed one of the endpoints yet.
		let (Some((x1, y1)), Some((x2, y2))) = (resolved_position(n1), resolved_position(n2))
		else {
			return;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let (a, b) = (&n1.data.user_data, &n2.data.user_data);
		let edge_t = smooth_step(state.highlight.edge_intensity(&a.id, &b.id));
		let (alpha, width_mult) = if edge_t > 0.01 {
			(0.7 + 0.3 * edge_t, 1.0 + 0.5 * edge_t)
		} else if max_t > 0.01 {
			(0.7 - 0.5 * max_t, 1.0 - 0.3 * max_t)
		} else {
			(0.7, 1.0)
		};

		let r1 = scale.node_radius(&a.kind, a.size);
		let r2 = scale.node_radius(&b.kind, b.size);
		let color = Color::parse(&edge.user_data.color);
		ctx.set_stroke_style_str(&color.with_alpha(color.a * alpha).to_css());
		ctx.set_line_width(scale.edge_width(edge.user_data.width) * width_mult);

		let (ux, uy) = (dx / dist, dy / dist);
		let (sx, sy) = (x1 + ux * r1, y1 + uy * r1);
		let (ex, ey) = (x2 - ux * r2, y2 - uy * r2);

		ctx.begin_path();
		ctx.move_to(sx, sy);
		match curve_control(&edge.user_data, (x1, y1), (x2, y2), (ux, uy), dist) {
			Some((cx, cy)) => ctx.quadratic_curve_to(cx, cy, ex, ey),
			None => ctx.line_to(ex, ey),
		}
		ctx.stroke();
	});
}

/// Control point for a curved edge, bent perpendicular to its direction.
fn curve_control(
	edge: &EdgeInfo,
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	(ux, uy): (f64, f64),
	dist: f64,
) -> Option<(f64, f64)> {
	let curvature = edge.curvature.filter(|c| c.abs() > f64::EPSILON)?;
	let offset = dist * curvature;
	Some(((x1 + x2) / 2.0 - uy * offset, (y1 + y2) / 2.0 + ux * offset))
}

fn draw_nodes(
	state: &CourseGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let has_highlight = max_t > 0.01;
	let hovered = state.hover.current();
	let selected = state.selected.as_deref();

	// Pass 1: nodes outside the highlight, dimmed while something is hovered
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let visual = NodeVisualState::of(&info.id, hovered, selected);
		if state.highlight.node_intensity(&info.id) > 0.001 || visual != NodeVisualState::Default {
			return;
		}
		let Some(pos) = resolved_position(node) else {
			return;
		};
		let alpha = if has_highlight { 1.0 - 0.7 * max_t } else { 1.0 };
		draw_node(ctx, info, pos, scale, theme, alpha, 1.0);
		draw_label(ctx, info, pos, scale, theme, alpha, 1.0);
	});

	// Pass 2: highlighted, hovered and selected nodes on top
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let visual = NodeVisualState::of(&info.id, hovered, selected);
		let node_t = state.highlight.node_intensity(&info.id);
		if node_t <= 0.001 && visual == NodeVisualState::Default {
			return;
		}
		let Some(pos) = resolved_position(node) else {
			return;
		};

		let eased_t = smooth_step(node_t);
		let dim_alpha = if has_highlight { 1.0 - 0.7 * max_t } else { 1.0 };
		let mut alpha = dim_alpha + (1.0 - dim_alpha) * eased_t;
		let mut radius_mult = 1.0 + 0.25 * eased_t;
		if visual == NodeVisualState::Selected {
			alpha = 1.0;
			radius_mult = radius_mult.max(1.2);
		}

		let ring_t = smooth_step(state.highlight.ring_intensity(&info.id));
		if ring_t > 0.01 {
			draw_halo(ctx, info, pos, scale, radius_mult, ring_t);
		}
		draw_node(ctx, info, pos, scale, theme, alpha, radius_mult);

		let radius = scale.node_radius(&info.kind, info.size) * radius_mult;
		if visual == NodeVisualState::Selected {
			ctx.begin_path();
			let _ = ctx.arc(pos.0, pos.1, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&theme.node.selected_ring.to_css());
			ctx.set_line_width(scale.ring_width * 1.5);
			ctx.stroke();
		}
		if ring_t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(pos.0, pos.1, radius + scale.ring_offset * 2.5, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.6 * ring_t));
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}

		draw_label(ctx, info, pos, scale, theme, alpha, radius_mult);
	});
}

/// Soft outer glow drawn behind a hovered node.
fn draw_halo(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	(x, y): (f64, f64),
	scale: &ScaledValues,
	radius_mult: f64,
	t: f64,
) {
	let radius = scale.node_radius(&info.kind, info.size) * radius_mult;
	let halo_radius = radius * scale.halo();
	let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.5, x, y, halo_radius) else {
		return;
	};
	let color = Color::parse(&info.color);
	let _ = gradient.add_color_stop(0.0, &color.with_alpha(0.45 * t).to_css());
	let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
	ctx.begin_path();
	let _ = ctx.arc(x, y, halo_radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	(x, y): (f64, f64),
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) {
	let radius = scale.node_radius(&info.kind, info.size) * radius_mult;
	ctx.set_global_alpha(alpha);

	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let base = Color::parse(&info.color);
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base.to_css());
			let _ = gradient.add_color_stop(1.0, &base.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&info.color),
	}
	ctx.fill();
	ctx.set_global_alpha(1.0);
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	(x, y): (f64, f64),
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) {
	let alpha = alpha * scale.label_alpha(&info.kind);
	if alpha < 0.05 {
		return;
	}
	let radius = scale.node_radius(&info.kind, info.size) * radius_mult;
	ctx.set_font(&scale.label_font(&info.kind));
	ctx.set_text_align("center");
	ctx.set_fill_style_str(&theme.node.label.with_alpha(0.9 * alpha).to_css());
	let label_y = if scale.label_inside(&info.kind) {
		ctx.set_text_baseline("middle");
		y
	} else {
		ctx.set_text_baseline("bottom");
		y - radius - scale.ring_offset
	};
	let _ = ctx.fill_text(&info.label, x, label_y);
}
