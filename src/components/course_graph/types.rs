//! Graph snapshot fed to the course graph component.

/// What a node stands for. Non-course variants carry the id of the course
/// they were derived from; it is a back-reference for click routing only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Course,
	Topic {
		course: String,
	},
	/// A material category of the selected course.
	Section {
		course: String,
		category: String,
	},
	/// One item under a section.
	Material {
		course: String,
		category: String,
		document: Option<String>,
	},
}

impl NodeKind {
	/// Short stable name, handy for logs and CSS classes.
	pub fn name(&self) -> &'static str {
		match self {
			NodeKind::Course => "course",
			NodeKind::Topic { .. } => "topic",
			NodeKind::Section { .. } => "section",
			NodeKind::Material { .. } => "material",
		}
	}
}

/// A node in the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique identifier within one snapshot.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Size multiplier applied to the kind's base radius.
	pub size: f64,
	/// CSS color (e.g. `"#5e81ac"`).
	pub color: String,
	pub kind: NodeKind,
}

impl GraphNode {
	/// The course this node routes clicks to, if it is not a course itself.
	pub fn parent_course(&self) -> Option<&str> {
		match &self.kind {
			NodeKind::Course => None,
			NodeKind::Topic { course }
			| NodeKind::Section { course, .. }
			| NodeKind::Material { course, .. } => Some(course),
		}
	}

	/// The course a click on this node selects: itself for courses, the
	/// parent otherwise.
	pub fn click_target(&self) -> Option<&str> {
		match self.kind {
			NodeKind::Course => Some(&self.id),
			_ => self.parent_course(),
		}
	}

	pub fn is_course(&self) -> bool {
		matches!(self.kind, NodeKind::Course)
	}
}

/// Relationship an edge encodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
	/// Course to one of its topics.
	Topic,
	/// Prerequisite course to the course that requires it.
	Prerequisite,
	/// Selected course to a material category.
	Section,
	/// Material category to an item.
	Material,
}

/// An edge between two nodes of the same snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub source: String,
	pub target: String,
	pub kind: EdgeKind,
	pub color: String,
	/// Line width in screen pixels.
	pub width: f64,
	/// Bend as a fraction of edge length; `None` draws a straight line.
	pub curvature: Option<f64>,
}

/// Complete graph snapshot: nodes and edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Edges touching `id`, in either direction.
	pub fn edges_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
		self.edges
			.iter()
			.filter(move |e| e.source == id || e.target == id)
	}
}
