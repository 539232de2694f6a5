//! course-map: interactive course browser.
//!
//! Courses and their topics are shown as a force-directed graph on a canvas.
//! Selecting a course expands its material sections, opens a side panel with
//! its documents, and a chat assistant can answer questions and navigate the
//! graph. All data comes from an external REST backend.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info, warn};

pub mod api;
pub mod components;
pub mod config;
pub mod fallback;
pub mod model;

use api::{Action, ApiClient, LatestRequest};
use components::chat::ChatPanel;
use components::course_panel::CoursePanel;
use config::AppConfig;
use model::{Course, CourseMaterials};

pub use components::course_graph::{CourseGraphCanvas, GraphBuilder, GraphData};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("course-map: logging initialized");
}

/// Finds the course a reference (id or code) points at.
pub fn resolve_course<'a>(courses: &'a [Course], reference: &str) -> Option<&'a Course> {
	let reference = reference.trim();
	courses.iter().find(|c| c.is_referenced_by(reference))
}

/// Main application component.
///
/// Owns the course list, the selection and the selected course's documents;
/// everything else derives from those three.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	let client = ApiClient::new(config.api_base_url.clone());

	let courses = RwSignal::new(Vec::<Course>::new());
	let courses_error = RwSignal::new(Option::<String>::None);
	let selected = RwSignal::new(Option::<String>::None);
	let materials = RwSignal::new(Option::<CourseMaterials>::None);
	let documents_loading = RwSignal::new(false);
	let documents_error = RwSignal::new(Option::<String>::None);
	let reload = RwSignal::new(0_u64);

	// Course list, with the built-in catalogue as a fallback.
	{
		let client = client.clone();
		let use_fallback = config.use_fallback_courses;
		spawn_local(async move {
			match client.list_courses().await {
				Ok(list) => {
					info!("course-map: loaded {} courses", list.len());
					courses.set(list);
				}
				Err(e) => {
					warn!("course-map: failed to load courses: {}", e);
					if use_fallback {
						courses.set(fallback::fallback_courses());
					} else {
						courses_error.set(Some(Action::LoadCourses.failure_message().to_string()));
					}
				}
			}
		});
	}

	// Documents of the selected course. Only the newest response is applied.
	let documents_client = client.clone();
	let documents_request = LatestRequest::new();
	Effect::new(move |_| {
		reload.track();
		let Some(course_id) = selected.get() else {
			documents_request.invalidate();
			documents_loading.set(false);
			documents_error.set(None);
			return;
		};
		let ticket = documents_request.begin();
		if materials.with_untracked(|m| m.as_ref().is_some_and(|m| m.course_id != course_id)) {
			materials.set(None);
		}
		documents_loading.set(true);
		documents_error.set(None);
		let (client, latest) = (documents_client.clone(), documents_request.clone());
		spawn_local(async move {
			let result = client.documents(&course_id, None).await;
			if !latest.is_current(ticket) {
				return;
			}
			match result {
				Ok(docs) => materials.set(Some(CourseMaterials::new(course_id, docs))),
				Err(e) => {
					warn!("course-map: failed to load documents for {course_id}: {}", e);
					documents_error.set(Some(Action::LoadDocuments.failure_message().to_string()));
				}
			}
			documents_loading.set(false);
		});
	});

	let builder = GraphBuilder::default();
	let graph = Memo::new(move |_| {
		courses.with(|list| {
			selected.with(|sel| materials.with(|m| builder.build(list, sel.as_deref(), m.as_ref())))
		})
	});

	let selected_course = Signal::derive(move || {
		let id = selected.get()?;
		courses.with(|list| list.iter().find(|c| c.id == id).cloned())
	});

	// Course search; results are a shortcut to selecting a course.
	let search_results = RwSignal::new(Vec::<Course>::new());
	let search_error = RwSignal::new(Option::<String>::None);
	let search_client = client.clone();
	let search_request = LatestRequest::new();
	let on_search = move |ev: leptos::ev::Event| {
		let query = event_target_value(&ev).trim().to_string();
		if query.is_empty() {
			search_request.invalidate();
			search_results.set(Vec::new());
			search_error.set(None);
			return;
		}
		let ticket = search_request.begin();
		let (client, latest) = (search_client.clone(), search_request.clone());
		spawn_local(async move {
			let result = client.search_courses(&query).await;
			if !latest.is_current(ticket) {
				return;
			}
			match result {
				Ok(found) => {
					search_error.set(None);
					search_results.set(found);
				}
				Err(e) => {
					warn!("course-map: search for {query:?} failed: {}", e);
					search_error.set(Some(Action::SearchCourses.failure_message().to_string()));
				}
			}
		});
	};

	let navigate = move |reference: String| {
		let target = courses.with_untracked(|list| resolve_course(list, &reference).map(|c| c.id.clone()));
		match target {
			Some(id) => selected.set(Some(id)),
			None => warn!("course-map: chat referenced unknown course {reference}"),
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Course Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<CourseGraphCanvas
				data=graph
				selected=selected
				on_select={move |next: Option<String>| selected.set(next)}
				warmup_ms=config.warmup_ms
				zoom=config.zoom_bounds()
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Course Map"</h1>
				<p class="subtitle">"Click a course to expand it. Drag nodes to reposition. Scroll to zoom."</p>
				<input
					class="course-search"
					type="search"
					placeholder="Search courses…"
					on:input=on_search
				/>
				{move || search_error.get().map(|e| view! { <div class="inline-error">{e}</div> })}
				<ul class="search-results">
					{move || {
						search_results
							.get()
							.into_iter()
							.map(|c| {
								let id = c.id.clone();
								view! {
									<li>
										<button on:click=move |_| selected.set(Some(id.clone()))>
											{format!("{} {}", c.code, c.name)}
										</button>
									</li>
								}
							})
							.collect_view()
					}}
				</ul>
				{move || courses_error.get().map(|e| view! { <div class="inline-error">{e}</div> })}
			</div>
			<CoursePanel
				client=client.clone()
				course=selected_course
				materials=materials
				loading=documents_loading
				load_error=documents_error
				on_changed={move |_: ()| reload.update(|n| *n += 1)}
				on_close={move |_: ()| selected.set(None)}
			/>
			<ChatPanel client=client on_navigate=navigate />
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn chat_references_resolve_by_id_or_code() {
		let courses = fallback::fallback_courses();
		assert_eq!(resolve_course(&courses, "213").map(|c| c.code.as_str()), Some("15-213"));
		assert_eq!(resolve_course(&courses, " 15-122 ").map(|c| c.id.as_str()), Some("122"));
		assert!(resolve_course(&courses, "15-999").is_none());
	}
}
