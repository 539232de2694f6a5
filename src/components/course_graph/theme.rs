//! Visual theming for the course graph.
//!
//! Provides the color type, course palettes and per-kind styling.

use super::types::{EdgeKind, NodeKind};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

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

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string. Supports hex (`#RRGGBB`) and
	/// `rgb()`/`rgba()` functional notation; anything else is mid gray.
	pub fn parse(color_str: &str) -> Color {
		let color_str = color_str.trim();
		if let Some(hex) = color_str.strip_prefix('#') {
			let channel = |range: std::ops::Range<usize>| {
				hex.get(range)
					.and_then(|s| u8::from_str_radix(s, 16).ok())
					.unwrap_or(128)
			};
			if hex.len() == 6 && hex.is_ascii() {
				Color::rgb(channel(0..2), channel(2..4), channel(4..6))
			} else {
				Color::rgb(128, 128, 128)
			}
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let channel = |i: usize| {
				nums.get(i)
					.and_then(|s| s.trim().parse().ok())
					.unwrap_or(128)
			};
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color::rgba(channel(0), channel(1), channel(2), a)
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

/// A curated color palette for courses.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Distinct but muted hues, one per course.
	pub fn campus() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(191, 97, 106),  // Brick
				Color::rgb(163, 190, 140), // Sage
				Color::rgb(208, 135, 112), // Terracotta
				Color::rgb(180, 142, 173), // Mauve
				Color::rgb(235, 203, 139), // Wheat
				Color::rgb(136, 192, 208), // Frost
				Color::rgb(143, 188, 187), // Teal gray
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for the radial gradient center
	pub color_secondary: Color,
	pub use_gradient: bool,
}

/// Edge colors per relationship.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub topic: Color,
	pub prerequisite: Color,
	pub section: Color,
	pub material: Color,
	/// Curve tension for prerequisite edges (0.0 = straight)
	pub prerequisite_curve: f64,
}

impl EdgeStyle {
	pub fn color(&self, kind: EdgeKind) -> Color {
		match kind {
			EdgeKind::Topic => self.topic,
			EdgeKind::Prerequisite => self.prerequisite,
			EdgeKind::Section => self.section,
			EdgeKind::Material => self.material,
		}
	}
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// How much topic nodes are lightened from their course color
	pub topic_lighten: f64,
	pub section_color: Color,
	pub material_color: Color,
	/// Ring drawn around the selected course
	pub selected_ring: Color,
	/// Label color
	pub label: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub palette: NodePalette,
}

impl Theme {
	/// Dark campus theme (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			edge: EdgeStyle {
				topic: Color::rgba(140, 160, 180, 0.45),
				prerequisite: Color::rgba(235, 203, 139, 0.7),
				section: Color::rgba(136, 192, 208, 0.6),
				material: Color::rgba(136, 192, 208, 0.4),
				prerequisite_curve: 0.25,
			},
			node: NodeStyle {
				use_gradient: true,
				topic_lighten: 0.35,
				section_color: Color::rgb(136, 192, 208),
				material_color: Color::rgb(216, 222, 233),
				selected_ring: Color::rgba(255, 255, 255, 0.9),
				label: Color::rgb(236, 239, 244),
			},
			palette: NodePalette::campus(),
		}
	}

	/// Fill color for a node of `kind` whose course has `course_color`.
	pub fn node_color(&self, kind: &NodeKind, course_color: Color) -> Color {
		match kind {
			NodeKind::Course => course_color,
			NodeKind::Topic { .. } => course_color.lighten(self.node.topic_lighten),
			NodeKind::Section { .. } => self.node.section_color,
			NodeKind::Material { .. } => self.node.material_color,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
