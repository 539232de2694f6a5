//! Derives the node/edge snapshot from courses and the current selection.
//!
//! The output is a pure function of the inputs: nothing is carried over from a
//! previous snapshot, so section and material nodes vanish as soon as the
//! selection they were derived from goes away.

use std::collections::HashSet;

use log::debug;

use super::theme::{Color, Theme};
use super::types::{EdgeKind, GraphData, GraphEdge, GraphNode, NodeKind};
use crate::model::{Course, CourseMaterials};

/// Size multipliers per node kind.
const COURSE_SIZE: f64 = 1.8;
const TOPIC_SIZE: f64 = 1.0;
const SECTION_SIZE: f64 = 1.3;
const MATERIAL_SIZE: f64 = 0.8;

pub fn course_node_id(course: &Course) -> String {
	course.id.clone()
}

pub fn topic_node_id(course_id: &str, topic: &str) -> String {
	format!("{course_id}-topic-{topic}")
}

pub fn section_node_id(course_id: &str, category: &str) -> String {
	format!("{course_id}-section-{category}")
}

pub fn material_node_id(course_id: &str, category: &str, item_id: &str) -> String {
	format!("{course_id}-material-{category}-{item_id}")
}

/// Builds graph snapshots with a fixed theme.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
	theme: Theme,
}

/// Accumulates nodes and edges while enforcing id uniqueness.
struct Snapshot {
	data: GraphData,
	ids: HashSet<String>,
}

impl Snapshot {
	fn new() -> Self {
		Self {
			data: GraphData::default(),
			ids: HashSet::new(),
		}
	}

	fn push_node(&mut self, node: GraphNode) -> bool {
		if !self.ids.insert(node.id.clone()) {
			debug!("course-map: dropping duplicate node id {}", node.id);
			return false;
		}
		self.data.nodes.push(node);
		true
	}

	fn push_edge(&mut self, edge: GraphEdge) {
		if self.ids.contains(&edge.source) && self.ids.contains(&edge.target) {
			self.data.edges.push(edge);
		}
	}
}

impl GraphBuilder {
	pub fn new(theme: Theme) -> Self {
		Self { theme }
	}

	fn course_color(&self, course: &Course, index: usize) -> Color {
		course
			.color
			.as_deref()
			.map(Color::parse)
			.unwrap_or_else(|| self.theme.palette.get(index))
	}

	fn edge(&self, source: String, target: String, kind: EdgeKind) -> GraphEdge {
		let (width, curvature) = match kind {
			EdgeKind::Topic => (1.0, None),
			EdgeKind::Prerequisite => (1.8, Some(self.theme.edge.prerequisite_curve)),
			EdgeKind::Section => (1.4, None),
			EdgeKind::Material => (1.0, None),
		};
		GraphEdge {
			source,
			target,
			kind,
			color: self.theme.edge.color(kind).to_css(),
			width,
			curvature,
		}
	}

	/// Builds the snapshot for `courses` with `selected` expanded.
	///
	/// `materials` is only used when it belongs to the selected course; a map
	/// left over from an earlier selection is ignored.
	pub fn build(
		&self,
		courses: &[Course],
		selected: Option<&str>,
		materials: Option<&CourseMaterials>,
	) -> GraphData {
		let mut out = Snapshot::new();

		for (index, course) in courses.iter().enumerate() {
			let course_id = course_node_id(course);
			let color = self.course_color(course, index);
			if !out.push_node(GraphNode {
				id: course_id.clone(),
				label: course.code.clone(),
				size: COURSE_SIZE,
				color: color.to_css(),
				kind: NodeKind::Course,
			}) {
				continue;
			}

			let mut seen_topics = HashSet::new();
			for topic in &course.topics {
				let topic = topic.trim();
				if topic.is_empty() || !seen_topics.insert(topic) {
					continue;
				}
				let kind = NodeKind::Topic {
					course: course.id.clone(),
				};
				let id = topic_node_id(&course.id, topic);
				let node_color = self.theme.node_color(&kind, color);
				if out.push_node(GraphNode {
					id: id.clone(),
					label: topic.to_string(),
					size: TOPIC_SIZE,
					color: node_color.to_css(),
					kind,
				}) {
					out.push_edge(self.edge(course_id.clone(), id, EdgeKind::Topic));
				}
			}
		}

		self.push_prerequisites(&mut out, courses);

		let selected_course = selected.and_then(|id| courses.iter().find(|c| c.id == id));
		match (selected_course, materials) {
			(Some(course), Some(materials)) if materials.course_id == course.id => {
				self.push_materials(&mut out, course, materials);
			}
			(Some(course), Some(materials)) => {
				debug!(
					"course-map: ignoring materials of {} while {} is selected",
					materials.course_id, course.id
				);
			}
			_ => {}
		}

		out.data
	}

	/// One edge per unordered course pair, pointing prerequisite -> course.
	fn push_prerequisites(&self, out: &mut Snapshot, courses: &[Course]) {
		let mut pairs: HashSet<(String, String)> = HashSet::new();
		for course in courses {
			for reference in &course.prerequisites {
				let Some(prereq) = courses.iter().find(|c| c.is_referenced_by(reference)) else {
					continue;
				};
				if prereq.id == course.id {
					continue;
				}
				let key = if prereq.id < course.id {
					(prereq.id.clone(), course.id.clone())
				} else {
					(course.id.clone(), prereq.id.clone())
				};
				if pairs.insert(key) {
					out.push_edge(self.edge(
						course_node_id(prereq),
						course_node_id(course),
						EdgeKind::Prerequisite,
					));
				}
			}
		}
	}

	fn push_materials(&self, out: &mut Snapshot, course: &Course, materials: &CourseMaterials) {
		let course_id = course_node_id(course);
		for (category, items) in &materials.materials.categories {
			let section_kind = NodeKind::Section {
				course: course.id.clone(),
				category: category.clone(),
			};
			let section_id = section_node_id(&course.id, category);
			if !out.push_node(GraphNode {
				id: section_id.clone(),
				label: category.clone(),
				size: SECTION_SIZE,
				color: self.theme.node.section_color.to_css(),
				kind: section_kind,
			}) {
				continue;
			}
			out.push_edge(self.edge(course_id.clone(), section_id.clone(), EdgeKind::Section));

			for item in items {
				let id = material_node_id(&course.id, category, &item.id);
				if out.push_node(GraphNode {
					id: id.clone(),
					label: item.title.clone(),
					size: MATERIAL_SIZE,
					color: self.theme.node.material_color.to_css(),
					kind: NodeKind::Material {
						course: course.id.clone(),
						category: category.clone(),
						document: item.document_id.clone(),
					},
				}) {
					out.push_edge(self.edge(section_id.clone(), id, EdgeKind::Material));
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fallback::fallback_courses;
	use crate::model::{MaterialItem, MaterialMap};
	use proptest::prelude::*;

	fn course(id: &str, code: &str, topics: &[&str], prerequisites: &[&str]) -> Course {
		Course {
			id: id.into(),
			code: code.into(),
			name: format!("Course {code}"),
			description: None,
			topics: topics.iter().map(|t| t.to_string()).collect(),
			prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
			color: None,
		}
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

	fn ids(data: &GraphData) -> Vec<&str> {
		data.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	fn edge_pairs(data: &GraphData) -> Vec<(&str, &str)> {
		data.edges
			.iter()
			.map(|e| (e.source.as_str(), e.target.as_str()))
			.collect()
	}

	#[test]
	fn course_with_topics() {
		let courses = vec![course("213", "15-213", &["Cache", "Memory"], &[])];
		let data = GraphBuilder::default().build(&courses, None, None);

		assert_eq!(ids(&data), vec!["213", "213-topic-Cache", "213-topic-Memory"]);
		assert_eq!(
			edge_pairs(&data),
			vec![("213", "213-topic-Cache"), ("213", "213-topic-Memory")]
		);
		assert!(data.nodes[0].is_course());
		assert_eq!(data.nodes[1].parent_course(), Some("213"));
		assert!(data.edges.iter().all(|e| e.kind == EdgeKind::Topic));
	}

	#[test]
	fn selection_adds_sections_and_materials() {
		let courses = vec![course("213", "15-213", &["Cache", "Memory"], &[])];
		let builder = GraphBuilder::default();
		let materials = labs();
		let data = builder.build(&courses, Some("213"), Some(&materials));

		let sections: Vec<&GraphNode> = data
			.nodes
			.iter()
			.filter(|n| matches!(n.kind, NodeKind::Section { .. }))
			.collect();
		assert_eq!(sections.len(), 1);
		assert_eq!(sections[0].id, "213-section-labs");
		assert_eq!(sections[0].label, "labs");

		let material_ids: Vec<&str> = data
			.nodes
			.iter()
			.filter(|n| matches!(n.kind, NodeKind::Material { .. }))
			.map(|n| n.id.as_str())
			.collect();
		assert_eq!(
			material_ids,
			vec!["213-material-labs-cache-lab", "213-material-labs-malloc-lab"]
		);

		let pairs = edge_pairs(&data);
		assert!(pairs.contains(&("213", "213-section-labs")));
		assert!(pairs.contains(&("213-section-labs", "213-material-labs-cache-lab")));
		assert!(pairs.contains(&("213-section-labs", "213-material-labs-malloc-lab")));
		assert_eq!(data.nodes.len(), 3 + 1 + 2);
		assert_eq!(data.edges.len(), 2 + 1 + 2);
	}

	#[test]
	fn deselect_removes_derived_nodes() {
		let courses = vec![course("213", "15-213", &["Cache"], &[])];
		let builder = GraphBuilder::default();
		let before = builder.build(&courses, None, None);
		let materials = labs();
		let during = builder.build(&courses, Some("213"), Some(&materials));
		let after = builder.build(&courses, None, Some(&materials));

		assert_ne!(before, during);
		assert_eq!(before, after);
	}

	#[test]
	fn bare_course_is_a_single_node() {
		let courses = vec![course("999", "15-999", &[], &[])];
		let empty = CourseMaterials {
			course_id: "999".into(),
			..Default::default()
		};
		let data = GraphBuilder::default().build(&courses, Some("999"), Some(&empty));
		assert_eq!(ids(&data), vec!["999"]);
		assert!(data.edges.is_empty());
	}

	#[test]
	fn non_ascii_course_color_is_painted_gray() {
		let mut c = course("213", "15-213", &["Cache"], &[]);
		c.color = Some("#ab€c".into());
		let data = GraphBuilder::default().build(&[c], None, None);
		assert_eq!(data.nodes[0].color, Color::rgb(128, 128, 128).to_css());
		assert_eq!(data.nodes.len(), 2);
	}

	#[test]
	fn prerequisite_edges_are_not_duplicated() {
		let courses = vec![
			course("122", "15-122", &[], &[]),
			course("213", "15-213", &[], &["15-122", "122", "15-122"]),
		];
		let data = GraphBuilder::default().build(&courses, None, None);
		assert_eq!(edge_pairs(&data), vec![("122", "213")]);
		assert_eq!(data.edges[0].kind, EdgeKind::Prerequisite);
		assert!(data.edges[0].curvature.is_some());
	}

	#[test]
	fn mutual_prerequisites_yield_one_edge() {
		let courses = vec![
			course("a", "A", &[], &["B"]),
			course("b", "B", &[], &["A"]),
		];
		let data = GraphBuilder::default().build(&courses, None, None);
		assert_eq!(data.edges.len(), 1);
	}

	#[test]
	fn unknown_and_self_prerequisites_are_skipped() {
		let courses = vec![course("213", "15-213", &[], &["15-213", "21-127"])];
		let data = GraphBuilder::default().build(&courses, None, None);
		assert!(data.edges.is_empty());
	}

	#[test]
	fn stale_materials_are_ignored() {
		let courses = fallback_courses();
		let materials = labs();
		let builder = GraphBuilder::default();
		let with_stale = builder.build(&courses, Some("122"), Some(&materials));
		let plain = builder.build(&courses, Some("122"), None);
		assert_eq!(with_stale, plain);
	}

	#[test]
	fn unknown_selection_adds_nothing() {
		let courses = fallback_courses();
		let builder = GraphBuilder::default();
		let materials = labs();
		assert_eq!(
			builder.build(&courses, Some("nope"), Some(&materials)),
			builder.build(&courses, None, None)
		);
	}

	#[test]
	fn duplicate_topics_collapse() {
		let courses = vec![course("213", "15-213", &["Cache", "Cache", " ", "Memory"], &[])];
		let data = GraphBuilder::default().build(&courses, None, None);
		assert_eq!(data.nodes.len(), 3);
		assert_eq!(data.edges.len(), 2);
	}

	fn assert_well_formed(data: &GraphData) {
		let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids.len(), data.nodes.len(), "node ids must be unique");
		for e in &data.edges {
			assert!(ids.contains(e.source.as_str()), "dangling source {}", e.source);
			assert!(ids.contains(e.target.as_str()), "dangling target {}", e.target);
		}
	}

	fn arb_courses() -> impl Strategy<Value = Vec<Course>> {
		prop::collection::vec(
			(
				0u8..6,
				prop::collection::vec("[a-c]{1,2}", 0..4),
				prop::collection::vec(0u8..6, 0..3),
			),
			0..6,
		)
		.prop_map(|raw| {
			raw.into_iter()
				.map(|(id, topics, prereqs)| Course {
					id: id.to_string(),
					code: format!("15-{id}"),
					name: String::new(),
					description: None,
					topics,
					prerequisites: prereqs.iter().map(|p| format!("15-{p}")).collect(),
					color: None,
				})
				.collect()
		})
	}

	fn arb_materials() -> impl Strategy<Value = MaterialMap> {
		prop::collection::btree_map(
			"[a-z]{1,4}",
			prop::collection::vec("[a-z]{1,3}", 0..4),
			0..4,
		)
		.prop_map(|raw| MaterialMap {
			categories: raw
				.into_iter()
				.map(|(k, v)| (k, v.into_iter().map(MaterialItem::named).collect()))
				.collect(),
		})
	}

	proptest! {
		#[test]
		fn select_then_deselect_restores_graph(
			courses in arb_courses(),
			pick in any::<prop::sample::Index>(),
			materials in arb_materials(),
		) {
			let builder = GraphBuilder::default();
			let before = builder.build(&courses, None, None);
			assert_well_formed(&before);
			if courses.is_empty() {
				return Ok(());
			}
			let selected = courses[pick.index(courses.len())].id.clone();
			let materials = CourseMaterials {
				course_id: selected.clone(),
				documents: Vec::new(),
				materials,
			};
			let during = builder.build(&courses, Some(&selected), Some(&materials));
			assert_well_formed(&during);
			let after = builder.build(&courses, None, Some(&materials));
			prop_assert_eq!(before, after);
		}
	}
}
