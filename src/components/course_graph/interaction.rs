//! Pointer semantics independent of the canvas: selection toggling, hover
//! tracking, click detection and bounded zoom.

use super::types::GraphNode;

/// Pointer travel (screen pixels) below which a press counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

/// Selection after clicking `clicked` while `current` is selected.
///
/// Courses toggle themselves; every other node toggles its parent course.
/// Nodes without a course to route to leave the selection untouched.
pub fn toggle_selection(current: Option<&str>, clicked: &GraphNode) -> Option<String> {
	let Some(target) = clicked.click_target() else {
		return current.map(str::to_string);
	};
	if current == Some(target) {
		None
	} else {
		Some(target.to_string())
	}
}

/// True when a press released at `end` did not travel far enough to be a drag.
pub fn is_click(start: (f64, f64), end: (f64, f64)) -> bool {
	let (dx, dy) = (end.0 - start.0, end.1 - start.1);
	(dx * dx + dy * dy).sqrt() <= CLICK_SLOP
}

/// How a node is painted this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeVisualState {
	Default,
	Hovered,
	Selected,
}

impl NodeVisualState {
	pub fn of(node_id: &str, hovered: Option<&str>, selected: Option<&str>) -> Self {
		if selected == Some(node_id) {
			NodeVisualState::Selected
		} else if hovered == Some(node_id) {
			NodeVisualState::Hovered
		} else {
			NodeVisualState::Default
		}
	}
}

/// The single hovered node, by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker {
	id: Option<String>,
}

impl HoverTracker {
	pub fn current(&self) -> Option<&str> {
		self.id.as_deref()
	}

	/// Replaces the hovered node. Returns true if it changed.
	pub fn set(&mut self, id: Option<&str>) -> bool {
		if self.id.as_deref() == id {
			return false;
		}
		self.id = id.map(str::to_string);
		true
	}

	/// CSS cursor for the canvas.
	pub fn cursor(&self) -> &'static str {
		if self.id.is_some() { "pointer" } else { "grab" }
	}
}

/// Allowed zoom range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBounds {
	pub min: f64,
	pub max: f64,
}

impl Default for ZoomBounds {
	fn default() -> Self {
		Self { min: 0.2, max: 8.0 }
	}
}

impl ZoomBounds {
	/// Builds bounds, swapping the ends if given in the wrong order.
	pub fn new(min: f64, max: f64) -> Self {
		let (min, max) = if min <= max { (min, max) } else { (max, min) };
		Self {
			min: min.max(f64::EPSILON),
			max,
		}
	}

	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Zooms by `factor` keeping the graph point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, bounds: &ZoomBounds) {
		let new_k = bounds.clamp(self.k * factor);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::course_graph::types::NodeKind;
	use proptest::prelude::*;

	fn node(id: &str, kind: NodeKind) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: id.into(),
			size: 1.0,
			color: "#ffffff".into(),
			kind,
		}
	}

	fn course(id: &str) -> GraphNode {
		node(id, NodeKind::Course)
	}

	fn topic(id: &str, course: &str) -> GraphNode {
		node(
			id,
			NodeKind::Topic {
				course: course.into(),
			},
		)
	}

	#[test]
	fn clicking_a_course_twice_deselects() {
		let c = course("213");
		let first = toggle_selection(None, &c);
		assert_eq!(first.as_deref(), Some("213"));
		let second = toggle_selection(first.as_deref(), &c);
		assert_eq!(second, None);
	}

	#[test]
	fn clicking_a_child_of_the_selection_deselects() {
		let material = node(
			"213-material-labs-cache-lab",
			NodeKind::Material {
				course: "213".into(),
				category: "labs".into(),
				document: None,
			},
		);
		assert_eq!(toggle_selection(Some("213"), &material), None);
		assert_eq!(
			toggle_selection(Some("122"), &material).as_deref(),
			Some("213")
		);
	}

	#[test]
	fn topic_click_selects_parent() {
		let t = topic("213-topic-Cache", "213");
		assert_eq!(toggle_selection(None, &t).as_deref(), Some("213"));
	}

	#[test]
	fn switching_courses_selects_the_new_one() {
		assert_eq!(
			toggle_selection(Some("122"), &course("213")).as_deref(),
			Some("213")
		);
	}

	#[test]
	fn hover_holds_a_single_node() {
		let mut hover = HoverTracker::default();
		assert_eq!(hover.cursor(), "grab");
		assert!(hover.set(Some("a")));
		assert!(!hover.set(Some("a")));
		assert!(hover.set(Some("b")));
		assert_eq!(hover.current(), Some("b"));
		assert_eq!(hover.cursor(), "pointer");
		assert!(hover.set(None));
		assert_eq!(hover.current(), None);
	}

	#[test]
	fn visual_state_prefers_selection() {
		assert_eq!(
			NodeVisualState::of("a", Some("a"), Some("a")),
			NodeVisualState::Selected
		);
		assert_eq!(
			NodeVisualState::of("a", Some("a"), None),
			NodeVisualState::Hovered
		);
		assert_eq!(
			NodeVisualState::of("a", Some("b"), Some("c")),
			NodeVisualState::Default
		);
	}

	#[test]
	fn short_moves_are_clicks() {
		assert!(is_click((10.0, 10.0), (12.0, 12.0)));
		assert!(!is_click((10.0, 10.0), (20.0, 10.0)));
	}

	#[test]
	fn zoom_is_bounded_and_anchored() {
		let bounds = ZoomBounds::default();
		let mut t = ViewTransform {
			x: 100.0,
			y: 50.0,
			k: 1.0,
		};
		let anchor = t.screen_to_graph(300.0, 200.0);
		t.zoom_at(300.0, 200.0, 1.1, &bounds);
		let (sx, sy) = t.graph_to_screen(anchor.0, anchor.1);
		assert!((sx - 300.0).abs() < 1e-9 && (sy - 200.0).abs() < 1e-9);

		for _ in 0..200 {
			t.zoom_at(0.0, 0.0, 1.1, &bounds);
		}
		assert_eq!(t.k, 8.0);
		for _ in 0..400 {
			t.zoom_at(0.0, 0.0, 0.9, &bounds);
		}
		assert_eq!(t.k, 0.2);
	}

	#[test]
	fn zoom_bounds_normalize_order() {
		let b = ZoomBounds::new(8.0, 0.2);
		assert_eq!(b, ZoomBounds { min: 0.2, max: 8.0 });
	}

	proptest! {
		#[test]
		fn double_click_restores_selection(
			current in prop::option::of("[0-9]{3}"),
			id in "[0-9]{3}",
			as_topic in any::<bool>(),
		) {
			let clicked = if as_topic { topic("t", &id) } else { course(&id) };
			let once = toggle_selection(current.as_deref(), &clicked);
			let twice = toggle_selection(once.as_deref(), &clicked);
			prop_assert_eq!(once.as_deref() == Some(id.as_str()), current.as_deref() != Some(id.as_str()));
			if current.as_deref() == Some(id.as_str()) {
				prop_assert_eq!(twice.as_deref(), Some(id.as_str()));
			} else {
				prop_assert_eq!(twice, None);
			}
		}
	}
}
