//! Domain records exchanged with the course backend.
//!
//! These types double as the JSON payloads returned by the REST API, so every
//! optional field defaults when the backend omits it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category used for documents the backend returns without one.
pub const DEFAULT_CATEGORY: &str = "materials";

/// A university course as listed by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
	/// Stable identifier, e.g. `"213"`.
	pub id: String,
	/// Display code, e.g. `"15-213"`.
	pub code: String,
	/// Display name.
	pub name: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub topics: Vec<String>,
	/// Prerequisite course codes (or ids).
	#[serde(default)]
	pub prerequisites: Vec<String>,
	/// Optional CSS color assigned by the backend.
	#[serde(default)]
	pub color: Option<String>,
}

impl Course {
	/// True when `reference` names this course by code or id.
	pub fn is_referenced_by(&self, reference: &str) -> bool {
		self.code == reference || self.id == reference
	}
}

/// A course document (notes, recitation handout, homework, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
	pub id: String,
	pub course_id: String,
	pub title: String,
	#[serde(default)]
	pub content: Option<String>,
	#[serde(default)]
	pub topic: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub category: Option<String>,
}

impl Document {
	pub fn category(&self) -> &str {
		self.category
			.as_deref()
			.filter(|c| !c.trim().is_empty())
			.unwrap_or(DEFAULT_CATEGORY)
	}
}

/// One entry under a material category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialItem {
	pub id: String,
	pub title: String,
	/// Backing document, when the item came from the document listing.
	pub document_id: Option<String>,
}

impl MaterialItem {
	/// An item with no backing document; the title doubles as the id.
	pub fn named(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			id: name.clone(),
			title: name,
			document_id: None,
		}
	}
}

/// Materials of a single course grouped by category, in stable order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterialMap {
	pub categories: BTreeMap<String, Vec<MaterialItem>>,
}

impl MaterialMap {
	/// Groups a document listing by category.
	pub fn from_documents(documents: &[Document]) -> Self {
		let mut categories: BTreeMap<String, Vec<MaterialItem>> = BTreeMap::new();
		for doc in documents {
			categories
				.entry(doc.category().to_string())
				.or_default()
				.push(MaterialItem {
					id: doc.id.clone(),
					title: doc.title.clone(),
					document_id: Some(doc.id.clone()),
				});
		}
		Self { categories }
	}

	pub fn insert(&mut self, category: impl Into<String>, items: Vec<MaterialItem>) {
		self.categories.insert(category.into(), items);
	}

	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}
}

/// Materials loaded for one course. Tagged with the course so a stale map is
/// never attached to a different selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseMaterials {
	pub course_id: String,
	pub documents: Vec<Document>,
	pub materials: MaterialMap,
}

impl CourseMaterials {
	pub fn new(course_id: impl Into<String>, documents: Vec<Document>) -> Self {
		let materials = MaterialMap::from_documents(&documents);
		Self {
			course_id: course_id.into(),
			documents,
			materials,
		}
	}

	pub fn document(&self, id: &str) -> Option<&Document> {
		self.documents.iter().find(|d| d.id == id)
	}

	/// Documents in material-map order, one group per category.
	pub fn grouped_documents(&self) -> Vec<(&str, Vec<&Document>)> {
		self.materials
			.categories
			.iter()
			.map(|(category, items)| {
				let docs = items
					.iter()
					.filter_map(|item| item.document_id.as_deref())
					.filter_map(|id| self.document(id))
					.collect();
				(category.as_str(), docs)
			})
			.collect()
	}
}

/// Chat request body.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
	pub message: String,
	pub session_id: Option<String>,
}

/// Chat reply. `course_id`, when set, asks the UI to navigate to that course.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatReply {
	pub response: String,
	#[serde(default)]
	pub session_id: Option<String>,
	#[serde(default)]
	pub course_id: Option<String>,
	#[serde(default)]
	pub tool_calls: Option<u32>,
}

/// Output format requested from the summary generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
	#[default]
	Markdown,
	Pdf,
}

/// Summary generation request body. At least one of the three sources
/// should be set; the backend prefers course, then topic, then content.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SummaryRequest {
	pub course_id: Option<String>,
	pub topic: Option<String>,
	pub content: Option<String>,
	pub format: SummaryFormat,
}

/// What the summary generator produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Summary {
	/// Inline text (markdown).
	Text(String),
	/// Opaque bytes for download, e.g. a PDF.
	Binary { bytes: Vec<u8>, content_type: String },
}
