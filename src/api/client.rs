//! Typed async client for the course backend.
//!
//! Plain JSON over HTTP; generated documents and file downloads come back as
//! opaque bytes. On wasm32 `reqwest` goes through the browser's `fetch`.

use log::debug;
use reqwest::{Client as HttpClient, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, Result};
use crate::model::{
	ChatReply, ChatRequest, Course, Document, Summary, SummaryFormat, SummaryRequest,
};

#[derive(Deserialize)]
struct CourseList {
	courses: Vec<Course>,
}

#[derive(Deserialize)]
struct DocumentList {
	documents: Vec<Document>,
}

/// A course with the reference documents the detail endpoint attaches.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CourseDetail {
	#[serde(flatten)]
	pub course: Course,
	#[serde(default)]
	pub documents: Vec<Document>,
}

#[derive(Deserialize)]
struct SummaryBody {
	#[serde(default)]
	content: Option<String>,
	#[serde(default)]
	error: Option<String>,
}

/// Client for the course backend rooted at `base_url`.
#[derive(Clone, Debug)]
pub struct ApiClient {
	base_url: String,
	http: HttpClient,
}

impl ApiClient {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			http: HttpClient::new(),
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Absolute URL for an API path (which must start with `/`).
	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	async fn checked(response: Response) -> Result<Response> {
		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}
		let body = response.text().await.unwrap_or_default();
		Err(ApiError::Status {
			status: status.as_u16(),
			body,
		})
	}

	async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
		let text = Self::checked(response).await?.text().await?;
		Ok(serde_json::from_str(&text)?)
	}

	/// Courses whose code or name contains `query`; an empty query lists all.
	pub async fn search_courses(&self, query: &str) -> Result<Vec<Course>> {
		debug!("course-map: searching courses for {query:?}");
		let response = self
			.http
			.get(self.url("/api/courses/search"))
			.query(&[("q", query)])
			.send()
			.await?;
		Ok(Self::json::<CourseList>(response).await?.courses)
	}

	pub async fn list_courses(&self) -> Result<Vec<Course>> {
		self.search_courses("").await
	}

	pub async fn course_detail(&self, course_id: &str) -> Result<CourseDetail> {
		let response = self
			.http
			.get(self.url(&format!("/api/courses/{course_id}")))
			.send()
			.await?;
		Self::json(response).await
	}

	/// Documents of a course, optionally narrowed to one topic.
	pub async fn documents(&self, course_id: &str, topic: Option<&str>) -> Result<Vec<Document>> {
		let mut request = self
			.http
			.get(self.url(&format!("/api/courses/{course_id}/documents")));
		if let Some(topic) = topic {
			request = request.query(&[("topic", topic)]);
		}
		let response = request.send().await?;
		Ok(Self::json::<DocumentList>(response).await?.documents)
	}

	pub async fn upload_document(
		&self,
		course_id: &str,
		category: &str,
		file_name: &str,
		bytes: Vec<u8>,
	) -> Result<Document> {
		let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
		let form = reqwest::multipart::Form::new()
			.text("course_id", course_id.to_string())
			.text("category", category.to_string())
			.part("file", part);
		let response = self
			.http
			.post(self.url("/api/documents"))
			.multipart(form)
			.send()
			.await?;
		Self::json(response).await
	}

	pub async fn delete_document(&self, document_id: &str) -> Result<()> {
		let response = self
			.http
			.delete(self.url(&format!("/api/documents/{document_id}")))
			.send()
			.await?;
		Self::checked(response).await?;
		Ok(())
	}

	pub async fn chat(&self, message: &str, session_id: Option<&str>) -> Result<ChatReply> {
		let body = ChatRequest {
			message: message.to_string(),
			session_id: session_id.map(str::to_string),
		};
		let response = self
			.http
			.post(self.url("/api/chat"))
			.json(&body)
			.send()
			.await?;
		Self::json(response).await
	}

	/// Generates a summary. Markdown comes back inline; PDF as bytes.
	pub async fn generate_summary(&self, request: &SummaryRequest) -> Result<Summary> {
		let response = self
			.http
			.post(self.url("/api/generate-summary"))
			.json(request)
			.send()
			.await?;
		let response = Self::checked(response).await?;
		let content_type = response
			.headers()
			.get(header::CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
			.unwrap_or_default()
			.to_string();

		if request.format == SummaryFormat::Pdf && !content_type.contains("json") {
			let bytes = response.bytes().await?.to_vec();
			return Ok(Summary::Binary {
				bytes,
				content_type: if content_type.is_empty() {
					"application/pdf".to_string()
				} else {
					content_type
				},
			});
		}

		let body: SummaryBody = serde_json::from_str(&response.text().await?)?;
		parse_summary_body(body)
	}
}

fn parse_summary_body(body: SummaryBody) -> Result<Summary> {
	match (body.content, body.error) {
		(Some(content), _) => Ok(Summary::Text(content)),
		(None, Some(error)) => Err(ApiError::Backend(error)),
		(None, None) => Err(ApiError::Backend("empty summary".to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_is_normalized() {
		let client = ApiClient::new("http://localhost:8000/");
		assert_eq!(client.base_url(), "http://localhost:8000");
		assert_eq!(client.url("/api/chat"), "http://localhost:8000/api/chat");
	}

	#[test]
	fn course_detail_flattens_course_fields() {
		let detail: CourseDetail = serde_json::from_str(
			r#"{"id":"213","code":"15-213","name":"Systems","prerequisites":["15-122"],
			"documents":[{"id":"doc1","course_id":"213","title":"Cache notes","topic":"Cache"}]}"#,
		)
		.unwrap();
		assert_eq!(detail.course.prerequisites, vec!["15-122"]);
		assert_eq!(detail.documents.len(), 1);
		assert_eq!(detail.documents[0].category(), "materials");
	}

	#[test]
	fn summary_body_with_error_is_a_failure() {
		let body: SummaryBody =
			serde_json::from_str(r#"{"error":"AI capabilities not available","content":null}"#)
				.unwrap();
		assert!(matches!(parse_summary_body(body), Err(ApiError::Backend(_))));

		let body: SummaryBody =
			serde_json::from_str(r##"{"content":"# 15-213","format":"markdown"}"##).unwrap();
		assert_eq!(
			parse_summary_body(body).unwrap(),
			Summary::Text("# 15-213".into())
		);
	}

	#[test]
	fn list_payloads_decode() {
		let list: CourseList =
			serde_json::from_str(r#"{"courses":[{"id":"122","code":"15-122","name":"Imperative"}]}"#)
				.unwrap();
		assert_eq!(list.courses[0].id, "122");
		let docs: DocumentList = serde_json::from_str(r#"{"documents":[]}"#).unwrap();
		assert!(docs.documents.is_empty());
	}
}
