//! Error types for backend calls.

use thiserror::Error;

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised while talking to the course backend.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
	/// Transport failure (unreachable host, CORS, aborted fetch).
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// The backend answered with a non-success status.
	#[error("backend returned {status}: {body}")]
	Status { status: u16, body: String },

	/// The body did not match the expected shape.
	#[error("unexpected response body: {0}")]
	Decode(#[from] serde_json::Error),

	/// The backend reported a failure inside a successful response.
	#[error("backend error: {0}")]
	Backend(String),
}

/// User gestures that reach the backend. Each maps to a short message shown
/// inline when the gesture fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
	LoadCourses,
	SearchCourses,
	LoadCourse,
	LoadDocuments,
	UploadDocument,
	DeleteDocument,
	SendMessage,
	GenerateSummary,
}

impl Action {
	pub fn failure_message(self) -> &'static str {
		match self {
			Action::LoadCourses => "Failed to load courses",
			Action::SearchCourses => "Failed to search courses",
			Action::LoadCourse => "Failed to load course details",
			Action::LoadDocuments => "Failed to load documents",
			Action::UploadDocument => "Failed to upload document",
			Action::DeleteDocument => "Failed to delete document",
			Action::SendMessage => "Failed to send message",
			Action::GenerateSummary => "Failed to generate summary",
		}
	}
}
