//! Runtime configuration embedded in the host page.
//!
//! The page may carry a `<script id="app-config" type="application/json">`
//! element; absent or malformed config falls back to the defaults.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::components::course_graph::ZoomBounds;

/// Id of the script element holding the JSON config.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Root of the course backend, without a trailing slash.
	pub api_base_url: String,
	/// How long the layout runs with the warm-up parameters.
	pub warmup_ms: f64,
	pub zoom_min: f64,
	pub zoom_max: f64,
	/// Show the built-in catalogue when the course fetch fails.
	pub use_fallback_courses: bool,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: "http://localhost:8000".to_string(),
			warmup_ms: 2000.0,
			zoom_min: 0.2,
			zoom_max: 8.0,
			use_fallback_courses: true,
		}
	}
}

impl AppConfig {
	pub fn zoom_bounds(&self) -> ZoomBounds {
		ZoomBounds::new(self.zoom_min, self.zoom_max)
	}

	/// Decodes config JSON, ignoring unknown keys.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		let config: Self = serde_json::from_str(text)?;
		Ok(config.normalized())
	}

	fn normalized(mut self) -> Self {
		self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
		if !self.warmup_ms.is_finite() || self.warmup_ms < 0.0 {
			self.warmup_ms = Self::default().warmup_ms;
		}
		self
	}

	/// Reads the config from the DOM, falling back to defaults.
	pub fn load() -> Self {
		match read_config_text() {
			Some(text) => match Self::from_json(&text) {
				Ok(config) => {
					info!("course-map: using backend at {}", config.api_base_url);
					config
				}
				Err(e) => {
					warn!("course-map: failed to parse app config: {}", e);
					Self::default()
				}
			},
			None => Self::default(),
		}
	}
}

fn read_config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_config_keeps_defaults() {
		let config = AppConfig::from_json(r#"{"api_base_url":"https://courses.example.edu/"}"#)
			.unwrap();
		assert_eq!(config.api_base_url, "https://courses.example.edu");
		assert_eq!(config.warmup_ms, 2000.0);
		assert!(config.use_fallback_courses);
	}

	#[test]
	fn negative_warmup_is_rejected() {
		let config = AppConfig::from_json(r#"{"warmup_ms":-5}"#).unwrap();
		assert_eq!(config.warmup_ms, 2000.0);
	}

	#[test]
	fn zoom_bounds_are_ordered() {
		let config = AppConfig::from_json(r#"{"zoom_min":4.0,"zoom_max":0.5}"#).unwrap();
		let bounds = config.zoom_bounds();
		assert_eq!(bounds.clamp(10.0), 4.0);
		assert_eq!(bounds.clamp(0.1), 0.5);
	}

	#[test]
	fn malformed_config_is_an_error() {
		assert!(AppConfig::from_json("{not json").is_err());
	}
}
