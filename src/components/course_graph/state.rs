//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, the
//! layout controller, view transforms for pan/zoom, drag pinning and
//! highlight state for hover effects with smooth intensity transitions.
//!
//! Node positions belong to the simulation. Everything outside this module
//! reads them; only dragging writes them back (and pins them on release).

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, Node, NodeData};
use log::debug;

use super::interaction::{HoverTracker, ViewTransform, ZoomBounds, is_click};
use super::layout::LayoutController;
use super::scale::{ScaleConfig, ScaledValues};
use super::types::{GraphData, NodeKind};

/// Radius of the ring new root nodes are seeded on.
const SEED_RING: f64 = 100.0;
/// Distance from the parent at which derived nodes are seeded.
const CHILD_OFFSET: f64 = 30.0;
/// Alpha after a data change; enough to settle new nodes without a reshuffle.
const SYNC_REHEAT_ALPHA: f64 = 0.3;
const DRAG_REHEAT_ALPHA: f64 = 0.2;
const NODE_MASS: f32 = 10.0;

/// Per-node metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	/// Size multiplier (1.0 = normal, >1.0 = larger/more important)
	pub size: f64,
	pub kind: NodeKind,
}

/// Per-edge display metadata.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub color: String,
	/// Screen-space width.
	pub width: f64,
	pub curvature: Option<f64>,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	/// Set once the pointer leaves the click slop; the press is a drag from then on.
	pub moved: bool,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Outcome of releasing the pointer after a press on a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Release {
	/// The press barely moved: treat it as a click on this node id.
	Click(String),
	/// The node was dragged and is now pinned.
	Pinned(String),
	/// Nothing was being dragged.
	None,
}

/// Smooth highlight transitions with per-node intensity tracking.
///
/// Each node id has an intensity in `0.0..=1.0` that eases towards 1 while
/// the node is in the hovered neighbourhood and decays back afterwards. A
/// short hold time keeps the highlight from flashing when the pointer skims
/// the edge of a node.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	target_set: HashSet<String>,
	hovered: Option<String>,
	node_intensity: HashMap<String, f64>,
	ring_intensity: HashMap<String, f64>,
	hold_timer: HashMap<String, f64>,
	cached_max: f64,
}

/// Minimum time (seconds) a highlight must be held before it can fade out.
const MIN_HOLD_TIME: f64 = 0.12;
const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;

impl HighlightState {
	/// Highlights `hovered` and its neighbours.
	pub fn set_hover(&mut self, hovered: Option<&str>, edges: &[(String, String)]) {
		if self.hovered.as_deref() == hovered {
			return;
		}
		self.hovered = hovered.map(str::to_string);
		self.target_set.clear();

		let Some(id) = hovered else {
			return;
		};
		self.target_set.insert(id.to_string());
		for (src, tgt) in edges {
			if src == id {
				self.target_set.insert(tgt.clone());
			} else if tgt == id {
				self.target_set.insert(src.clone());
			}
		}
		for id in &self.target_set {
			self.hold_timer.insert(id.clone(), MIN_HOLD_TIME);
		}
	}

	/// Exponential smoothing: `value += (target - value) * (1 - e^(-speed * dt))`.
	pub fn tick(&mut self, dt: f64) {
		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for id in &self.target_set {
			let v = self.node_intensity.entry(id.clone()).or_insert(0.0);
			*v += (1.0 - *v) * fade_in;
		}
		if let Some(id) = &self.hovered {
			let v = self.ring_intensity.entry(id.clone()).or_insert(0.0);
			*v += (1.0 - *v) * fade_in;
		}

		let targets = &self.target_set;
		self.hold_timer.retain(|id, timer| {
			if targets.contains(id) {
				return true;
			}
			*timer -= dt;
			*timer > 0.0
		});

		let holds = &self.hold_timer;
		let mut new_max: f64 = 0.0;
		self.node_intensity.retain(|id, v| {
			if !targets.contains(id) && holds.get(id).copied().unwrap_or(0.0) <= 0.0 {
				*v *= fade_out;
			}
			new_max = new_max.max(*v);
			targets.contains(id) || *v > 0.005
		});

		let hovered = &self.hovered;
		self.ring_intensity.retain(|id, v| {
			if hovered.as_ref() == Some(id) {
				return true;
			}
			if holds.get(id).copied().unwrap_or(0.0) <= 0.0 {
				*v *= fade_out;
			}
			*v > 0.005
		});

		self.cached_max = new_max;
	}

	pub fn node_intensity(&self, id: &str) -> f64 {
		self.node_intensity.get(id).copied().unwrap_or(0.0)
	}

	pub fn ring_intensity(&self, id: &str) -> f64 {
		self.ring_intensity.get(id).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, a: &str, b: &str) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}

	/// Drops state for ids that no longer exist.
	fn retain_ids(&mut self, ids: &HashMap<String, DefaultNodeIdx>) {
		self.target_set.retain(|id| ids.contains_key(id));
		self.node_intensity.retain(|id, _| ids.contains_key(id));
		self.ring_intensity.retain(|id, _| ids.contains_key(id));
		self.hold_timer.retain(|id, _| ids.contains_key(id));
		if self.hovered.as_ref().is_some_and(|h| !ids.contains_key(h)) {
			self.hovered = None;
		}
	}
}

/// The simulation plus everything the canvas needs to interact with it.
///
/// Created once when the canvas mounts, then mutated each frame by the
/// animation loop and by pointer handlers.
pub struct CourseGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub layout: LayoutController,
	pub transform: ViewTransform,
	pub zoom: ZoomBounds,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverTracker,
	pub highlight: HighlightState,
	/// Selected course id, mirrored from the host page.
	pub selected: Option<String>,
	pub width: f64,
	pub height: f64,
	index: HashMap<String, DefaultNodeIdx>,
	edges: Vec<(String, String)>,
	/// Ids whose position the user fixed by dragging.
	pinned: HashSet<String>,
}

/// A node's position if the simulation has resolved it to finite coordinates.
pub fn resolved_position(node: &Node<NodeInfo>) -> Option<(f64, f64)> {
	let (x, y) = (node.x() as f64, node.y() as f64);
	(x.is_finite() && y.is_finite()).then_some((x, y))
}

impl CourseGraphState {
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		layout: LayoutController,
		zoom: ZoomBounds,
	) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(layout.params().simulation_parameters()),
			layout,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			zoom,
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverTracker::default(),
			highlight: HighlightState::default(),
			selected: None,
			width,
			height,
			index: HashMap::new(),
			edges: Vec::new(),
			pinned: HashSet::new(),
		};
		state.rebuild(data, &HashMap::new());

		let warmup_ticks = state.layout.params().warmup_ticks;
		for _ in 0..warmup_ticks {
			let step = state.layout.pre_paint_step(0.016);
			state.integrate(step);
		}
		state
	}

	/// Replaces the snapshot, keeping the positions of surviving nodes.
	pub fn sync(&mut self, data: &GraphData) {
		let mut previous = HashMap::new();
		self.graph.visit_nodes(|node| {
			if let Some((x, y)) = resolved_position(node) {
				previous.insert(node.data.user_data.id.clone(), (x as f32, y as f32));
			}
		});
		self.drag = DragState::default();
		self.rebuild(data, &previous);
		self.pinned.retain(|id| self.index.contains_key(id));
		self.highlight.retain_ids(&self.index);
		if self.hover.current().is_some_and(|id| !self.index.contains_key(id)) {
			self.hover.set(None);
		}
		self.layout.reheat(SYNC_REHEAT_ALPHA);
		debug!(
			"course-map: synced graph to {} nodes, {} edges",
			self.index.len(),
			self.edges.len()
		);
	}

	fn rebuild(&mut self, data: &GraphData, previous: &HashMap<String, (f32, f32)>) {
		let mut graph = ForceGraph::new(self.layout.params().simulation_parameters());
		let mut index = HashMap::new();
		let mut placed: HashMap<&str, (f32, f32)> = HashMap::new();
		let mut children_seeded: HashMap<&str, usize> = HashMap::new();
		let roots = data.nodes.iter().filter(|n| n.is_course()).count().max(1);
		let mut root_i = 0usize;

		for node in &data.nodes {
			let (x, y, known) = if let Some(&(x, y)) = previous.get(&node.id) {
				(x, y, true)
			} else if let Some(&(px, py)) = node.parent_course().and_then(|p| placed.get(p)) {
				let parent = node.parent_course().unwrap_or_default();
				let n = children_seeded.entry(parent).or_insert(0);
				*n += 1;
				let angle = *n as f64 * 2.399_963; // golden angle
				(
					px + (CHILD_OFFSET * angle.cos()) as f32,
					py + (CHILD_OFFSET * angle.sin()) as f32,
					false,
				)
			} else {
				let angle = root_i as f64 * 2.0 * PI / roots as f64;
				root_i += 1;
				(
					(SEED_RING * angle.cos()) as f32,
					(SEED_RING * angle.sin()) as f32,
					false,
				)
			};
			placed.insert(&node.id, (x, y));

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: NODE_MASS,
				is_anchor: known && self.pinned.contains(&node.id),
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.color.clone(),
					size: node.size,
					kind: node.kind.clone(),
				},
			});
			index.insert(node.id.clone(), idx);
		}

		let mut edges = Vec::with_capacity(data.edges.len());
		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) = (index.get(&edge.source), index.get(&edge.target)) {
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							color: edge.color.clone(),
							width: edge.width,
							curvature: edge.curvature,
						},
					},
				);
				edges.push((edge.source.clone(), edge.target.clone()));
			}
		}

		self.graph = graph;
		self.index = index;
		self.edges = edges;
	}

	pub fn node_count(&self) -> usize {
		self.index.len()
	}

	#[cfg(test)]
	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	#[cfg(test)]
	pub fn is_pinned(&self, id: &str) -> bool {
		self.pinned.contains(id)
	}

	#[cfg(test)]
	/// Resolved position of node `id`.
	pub fn position(&self, id: &str) -> Option<(f64, f64)> {
		let idx = *self.index.get(id)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = resolved_position(node);
			}
		});
		found
	}

	/// Id of the node behind a simulation index.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	/// Topmost node under the screen point, if any.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let Some((x, y)) = resolved_position(node) else {
				return;
			};
			let (dx, dy) = (x - gx, y - gy);
			let info = &node.data.user_data;
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius(&info.kind, info.size) {
				found = Some(node.index());
			}
		});
		found
	}

	/// Updates hover tracking. Returns true if the hovered node changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		let id = node.and_then(|idx| self.node_id(idx));
		self.highlight.set_hover(id.as_deref(), &self.edges);
		self.hover.set(id.as_deref())
	}

	/// Mirrors the host's selection and retunes the layout.
	pub fn set_selected(&mut self, selected: Option<String>) {
		if self.selected == selected {
			return;
		}
		self.layout.set_focus(selected.is_some());
		self.selected = selected;
	}

	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			..DragState::default()
		};
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				self.drag.node_start_x = node.x();
				self.drag.node_start_y = node.y();
			}
		});
	}

	/// Moves the dragged node with the pointer once it leaves the click slop.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) else {
			return;
		};
		if !self.drag.moved && is_click((self.drag.start_x, self.drag.start_y), (sx, sy)) {
			return;
		}
		self.drag.moved = true;
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
		self.layout.reheat(DRAG_REHEAT_ALPHA);
	}

	/// Ends a drag. A real drag pins the node where it was dropped.
	pub fn end_drag(&mut self) -> Release {
		let drag = std::mem::take(&mut self.drag);
		let Some(idx) = drag.node_idx.filter(|_| drag.active) else {
			return Release::None;
		};
		let Some(id) = self.node_id(idx) else {
			return Release::None;
		};
		if !drag.moved {
			return Release::Click(id);
		}
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = true;
			}
		});
		self.pinned.insert(id.clone());
		Release::Pinned(id)
	}

	/// Aborts a drag or pan without treating it as a click.
	pub fn cancel_pointer(&mut self) {
		if let Release::Pinned(id) = self.end_drag() {
			debug!("course-map: pinned {id} on pointer leave");
		}
		self.pan.active = false;
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Wheel zoom anchored at the pointer. Never touches the simulation.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let zoom = self.zoom;
		self.transform.zoom_at(sx, sy, factor, &zoom);
	}

	/// One physics step of `dt` seconds, if the layout is still running.
	fn step(&mut self, dt: f64) {
		let step = self.layout.advance(dt);
		self.integrate(step);
	}

	/// Hands a cooled step to the engine and applies centering.
	fn integrate(&mut self, step: Option<f64>) {
		if let Some(parameters) = self.layout.take_changed_parameters() {
			self.graph.parameters = parameters;
		}
		let Some(step) = step else {
			return;
		};
		self.graph.update(step as f32);
		let layout = &self.layout;
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			let (cx, cy) = layout.centering(node.data.x as f64, node.data.y as f64);
			node.data.x += cx as f32;
			node.data.y += cy as f32;
		});
	}

	/// Advances physics and highlight animations by one frame.
	pub fn tick(&mut self, dt: f32) {
		self.step(dt as f64);
		self.highlight.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::course_graph::builder::GraphBuilder;
	use crate::components::course_graph::layout::{LayoutParams, LayoutPhase};
	use crate::fallback::fallback_courses;
	use crate::model::{CourseMaterials, MaterialItem, MaterialMap};

	fn state_for(data: &GraphData) -> CourseGraphState {
		CourseGraphState::new(
			data,
			800.0,
			600.0,
			LayoutController::new(2.0),
			ZoomBounds::default(),
		)
	}

	fn labs() -> CourseMaterials {
		let mut map = MaterialMap::default();
		map.insert(
			"labs",
			vec![MaterialItem::named("cache-lab"), MaterialItem::named("malloc-lab")],
		);
		CourseMaterials {
			course_id: "213".into(),
			documents: Vec::new(),
			materials: map,
		}
	}

	#[test]
	fn warm_up_ticks_run_before_first_paint() {
		let data = GraphBuilder::default().build(&fallback_courses(), None, None);
		let state = state_for(&data);
		assert_eq!(state.node_count(), data.nodes.len());
		assert!(state.layout.alpha() < 1.0);
		assert_eq!(state.layout.phase(), LayoutPhase::WarmingUp { elapsed: 0.0 });
		for node in &data.nodes {
			assert!(state.position(&node.id).is_some(), "{} unplaced", node.id);
		}
	}

	#[test]
	fn sync_keeps_surviving_positions_and_drops_derived_nodes() {
		let builder = GraphBuilder::default();
		let courses = fallback_courses();
		let plain = builder.build(&courses, None, None);
		let mut state = state_for(&plain);
		let before = state.position("213").unwrap();

		let materials = labs();
		state.sync(&builder.build(&courses, Some("213"), Some(&materials)));
		assert_eq!(state.position("213"), Some(before));
		assert!(state.contains("213-section-labs"));
		let section = state.position("213-section-labs").unwrap();
		let d = ((section.0 - before.0).powi(2) + (section.1 - before.1).powi(2)).sqrt();
		assert!(d <= CHILD_OFFSET + 1.0, "section seeded {d} away from its course");

		state.sync(&plain);
		assert!(!state.contains("213-section-labs"));
		assert!(!state.contains("213-material-labs-cache-lab"));
		assert_eq!(state.node_count(), plain.nodes.len());
	}

	#[test]
	fn drag_release_pins_node() {
		let data = GraphBuilder::default().build(&fallback_courses(), None, None);
		let mut state = state_for(&data);
		let (x, y) = state.position("122").unwrap();
		let (sx, sy) = state.transform.graph_to_screen(x, y);
		let idx = state.index["122"];

		state.begin_drag(idx, sx, sy);
		state.drag_to(sx + 40.0, sy + 10.0);
		let release = state.end_drag();
		assert_eq!(release, Release::Pinned("122".into()));
		assert!(state.is_pinned("122"));

		let pinned_at = state.position("122").unwrap();
		for _ in 0..30 {
			state.tick(0.016);
		}
		assert_eq!(state.position("122"), Some(pinned_at));

		state.sync(&data);
		assert!(state.is_pinned("122"));
		assert_eq!(state.position("122"), Some(pinned_at));
	}

	#[test]
	fn small_press_is_a_click_not_a_pin() {
		let data = GraphBuilder::default().build(&fallback_courses(), None, None);
		let mut state = state_for(&data);
		let (x, y) = state.position("213").unwrap();
		let (sx, sy) = state.transform.graph_to_screen(x, y);
		let idx = state.index["213"];

		state.begin_drag(idx, sx, sy);
		state.drag_to(sx + 1.0, sy);
		assert_eq!(state.end_drag(), Release::Click("213".into()));
		assert!(!state.is_pinned("213"));
		assert_eq!(state.end_drag(), Release::None);
	}

	#[test]
	fn drag_that_returns_to_its_start_still_pins() {
		let data = GraphBuilder::default().build(&fallback_courses(), None, None);
		let mut state = state_for(&data);
		let (x, y) = state.position("251").unwrap();
		let (sx, sy) = state.transform.graph_to_screen(x, y);
		let idx = state.index["251"];

		state.begin_drag(idx, sx, sy);
		state.drag_to(sx + 40.0, sy);
		state.drag_to(sx + 1.0, sy);
		assert_eq!(state.end_drag(), Release::Pinned("251".into()));
		assert!(state.is_pinned("251"));

		let (px, _) = state.position("251").unwrap();
		assert!((px - (x + 1.0)).abs() < 1e-3);
	}

	#[test]
	fn hover_is_exclusive_and_cleared_when_node_disappears() {
		let builder = GraphBuilder::default();
		let courses = fallback_courses();
		let materials = labs();
		let mut state = state_for(&builder.build(&courses, Some("213"), Some(&materials)));

		let idx = state.index["213-section-labs"];
		assert!(state.set_hover(Some(idx)));
		assert!(!state.set_hover(Some(idx)));
		assert_eq!(state.hover.current(), Some("213-section-labs"));

		let course = state.index["213"];
		assert!(state.set_hover(Some(course)));
		assert_eq!(state.hover.current(), Some("213"));

		assert!(state.set_hover(Some(idx)));
		state.sync(&builder.build(&courses, None, None));
		assert_eq!(state.hover.current(), None);
	}

	#[test]
	fn hit_testing_finds_a_node_under_its_center() {
		let data = GraphBuilder::default().build(&fallback_courses(), None, None);
		let state = state_for(&data);
		let (x, y) = state.position("251").unwrap();
		let (sx, sy) = state.transform.graph_to_screen(x, y);
		assert!(state.node_at_position(sx, sy, &ScaleConfig::default()).is_some());
		assert!(
			state
				.node_at_position(sx + 5000.0, sy, &ScaleConfig::default())
				.is_none()
		);
	}

	#[test]
	fn selection_focuses_layout() {
		let data = GraphBuilder::default().build(&fallback_courses(), None, None);
		let mut state = state_for(&data);
		state.set_selected(Some("213".into()));
		assert_eq!(state.layout.phase(), LayoutPhase::Focused);
		state.tick(0.016);
		assert_eq!(
			state.graph.parameters.force_charge,
			LayoutParams::focused().charge_strength as f32
		);
		state.set_selected(None);
		assert_eq!(state.layout.phase(), LayoutPhase::Stable);
	}

	#[test]
	fn pan_and_zoom_leave_positions_alone() {
		let data = GraphBuilder::default().build(&fallback_courses(), None, None);
		let mut state = state_for(&data);
		let before = state.position("251");
		state.begin_pan(10.0, 10.0);
		state.pan_to(60.0, 40.0);
		state.zoom_at(100.0, 100.0, 1.1);
		assert_eq!(state.position("251"), before);
		// pan moves the origin to (450, 330); zooming by 1.1 at x = 100 keeps
		// that screen point fixed.
		assert!((state.transform.x - 485.0).abs() < 1e-9);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
	}

	#[test]
	fn highlight_fades_in_and_out() {
		let mut h = HighlightState::default();
		let edges = vec![("a".to_string(), "b".to_string())];
		h.set_hover(Some("a"), &edges);
		for _ in 0..30 {
			h.tick(0.016);
		}
		assert!(h.node_intensity("a") > 0.9);
		assert!(h.node_intensity("b") > 0.9);
		assert!(h.ring_intensity("a") > 0.9);
		assert_eq!(h.ring_intensity("b"), 0.0);

		h.set_hover(None, &edges);
		for _ in 0..200 {
			h.tick(0.016);
		}
		assert_eq!(h.node_intensity("a"), 0.0);
		assert_eq!(h.max_intensity(), 0.0);
	}
}
