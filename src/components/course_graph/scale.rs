//! Zoom-dependent scaling configuration for graph visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the coordinate system of the simulation. Values in
//!   world-space scale with zoom.
//! - **Screen-space**: pixel coordinates on the canvas. Values in screen-space
//!   stay constant regardless of zoom level.
//!
//! Everything returned by [`ScaledValues`] is in world-space, ready to use
//! after the canvas transform has been applied.

use super::types::NodeKind;

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Fully visible at `full_alpha_k`, fades to zero at `zero_alpha_k`.
	Fade {
		zero_alpha_k: f64,
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Compute alpha multiplier for a given zoom level.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				let t = (k - zero_alpha_k) / (full_alpha_k - zero_alpha_k);
				t.clamp(0.0, 1.0)
			}
		}
	}
}

/// Label styling for one node kind.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Font size in screen pixels.
	pub size: f64,
	/// CSS font weight.
	pub weight: u16,
	/// Whether the label is drawn inside the circle instead of above it.
	pub inside: bool,
	pub alpha: AlphaBehavior,
}

/// Per-kind node sizing.
#[derive(Clone, Debug)]
pub struct KindScale {
	/// Base radius in world units, before the node's own size multiplier.
	pub radius: f64,
	pub label: LabelStyle,
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	pub course: KindScale,
	pub topic: KindScale,
	pub section: KindScale,
	pub material: KindScale,
	/// How radii scale with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Extra hit slack around each node, in screen pixels.
	pub hit_slack: f64,
	/// Zoom below which label fonts stop shrinking.
	pub label_min_k: f64,
}

impl NodeScaleConfig {
	pub fn kind(&self, kind: &NodeKind) -> &KindScale {
		match kind {
			NodeKind::Course => &self.course,
			NodeKind::Topic { .. } => &self.topic,
			NodeKind::Section { .. } => &self.section,
			NodeKind::Material { .. } => &self.material,
		}
	}
}

/// Configuration for hover and selection rings.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Stroke width in screen pixels.
	pub width: f64,
	/// Offset from node edge in screen pixels.
	pub offset: f64,
	/// Outer soft halo radius as a multiple of the node radius.
	pub halo: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		let fading = AlphaBehavior::Fade {
			zero_alpha_k: 0.35,
			full_alpha_k: 0.8,
		};
		Self {
			node: NodeScaleConfig {
				course: KindScale {
					radius: 8.0,
					label: LabelStyle {
						size: 12.0,
						weight: 700,
						inside: false,
						alpha: AlphaBehavior::Constant,
					},
				},
				topic: KindScale {
					radius: 5.0,
					label: LabelStyle {
						size: 10.0,
						weight: 400,
						inside: false,
						alpha: fading.clone(),
					},
				},
				section: KindScale {
					radius: 6.0,
					label: LabelStyle {
						size: 11.0,
						weight: 600,
						inside: false,
						alpha: AlphaBehavior::Constant,
					},
				},
				material: KindScale {
					radius: 4.0,
					label: LabelStyle {
						size: 9.0,
						weight: 400,
						inside: false,
						alpha: fading,
					},
				},
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: f64::INFINITY,
				},
				hit_slack: 4.0,
				label_min_k: 0.5,
			},
			ring: RingScaleConfig {
				width: 1.5,
				offset: 2.0,
				halo: 2.2,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering and hit testing.
#[derive(Clone, Debug)]
pub struct ScaledValues<'a> {
	config: &'a ScaleConfig,
	/// Current zoom level.
	pub k: f64,
	/// Ring stroke width in world-space.
	pub ring_width: f64,
	/// Ring offset in world-space.
	pub ring_offset: f64,
	/// Hit slack in world-space.
	pub hit_slack: f64,
}

impl<'a> ScaledValues<'a> {
	pub fn new(config: &'a ScaleConfig, k: f64) -> Self {
		Self {
			config,
			k,
			ring_width: config.ring.width / k,
			ring_offset: config.ring.offset / k,
			hit_slack: config.node.hit_slack / k,
		}
	}

	/// World-space radius of a node of `kind` with size multiplier `size`.
	pub fn node_radius(&self, kind: &NodeKind, size: f64) -> f64 {
		let base = self.config.node.kind(kind).radius * size;
		self.config.node.radius_behavior.apply(base, self.k)
	}

	/// Hit-test radius, slightly larger than the painted circle.
	pub fn hit_radius(&self, kind: &NodeKind, size: f64) -> f64 {
		self.node_radius(kind, size) + self.hit_slack
	}

	/// Edge width in world-space for a screen-space `width`; constant on screen.
	pub fn edge_width(&self, width: f64) -> f64 {
		ScaleBehavior::Screen.apply(width, self.k)
	}

	/// CSS font for the label of a node of `kind`.
	pub fn label_font(&self, kind: &NodeKind) -> String {
		let style = &self.config.node.kind(kind).label;
		let size = style.size / self.k.max(self.config.node.label_min_k);
		format!("{} {}px sans-serif", style.weight, size)
	}

	/// Label opacity multiplier at the current zoom.
	pub fn label_alpha(&self, kind: &NodeKind) -> f64 {
		self.config.node.kind(kind).label.alpha.apply(self.k)
	}

	pub fn label_inside(&self, kind: &NodeKind) -> bool {
		self.config.node.kind(kind).label.inside
	}

	pub fn halo(&self) -> f64 {
		self.config.ring.halo
	}
}
