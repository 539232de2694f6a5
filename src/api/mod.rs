//! Client side of the course backend: typed requests, errors, and request
//! ordering.

mod client;
mod error;
pub mod latest;

pub use client::{ApiClient, CourseDetail};
pub use error::{Action, ApiError, Result};
pub use latest::{LatestRequest, Ticket};
