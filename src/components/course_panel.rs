//! Side panel for the selected course: details, documents grouped by
//! category, document preview, upload/delete and summary generation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlInputElement, Url};

use crate::api::{Action, ApiClient, LatestRequest};
use crate::model::{
	Course, CourseMaterials, DEFAULT_CATEGORY, Document, Summary, SummaryFormat, SummaryRequest,
};

/// Listing to show for `course`: the topic-filtered one when present, else
/// the host's. A listing that belongs to another course is never shown.
pub fn visible_materials<'a>(
	course: Option<&Course>,
	loaded: Option<&'a CourseMaterials>,
	filtered: Option<&'a CourseMaterials>,
) -> Option<&'a CourseMaterials> {
	let course = course?;
	let belongs = |m: &&CourseMaterials| m.course_id == course.id;
	filtered.filter(belongs).or_else(|| loaded.filter(belongs))
}

/// File name offered for a downloaded summary.
pub fn summary_file_name(course: &Course, format: SummaryFormat) -> String {
	let ext = match format {
		SummaryFormat::Markdown => "md",
		SummaryFormat::Pdf => "pdf",
	};
	format!("{}-summary.{ext}", course.code)
}

fn parse_format(value: &str) -> SummaryFormat {
	match value {
		"pdf" => SummaryFormat::Pdf,
		_ => SummaryFormat::Markdown,
	}
}

/// Offers `bytes` to the user as a file download.
fn download_bytes(bytes: &[u8], content_type: &str, file_name: &str) -> Result<(), JsValue> {
	let array = js_sys::Uint8Array::from(bytes);
	let parts = js_sys::Array::of1(&array);
	let options = BlobPropertyBag::new();
	options.set_type(content_type);
	let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	Url::revoke_object_url(&url)
}

async fn read_file(input: &HtmlInputElement) -> Option<(String, Vec<u8>)> {
	let file = input.files()?.get(0)?;
	let buffer = JsFuture::from(file.array_buffer()).await.ok()?;
	Some((file.name(), js_sys::Uint8Array::new(&buffer).to_vec()))
}

/// Embedded preview of a document. Falls back to a link when the browser
/// cannot render the file inline.
#[component]
fn DocumentPreview(document: Document, on_close: Callback<()>) -> impl IntoView {
	let body = match (document.url.clone(), document.content.clone()) {
		(Some(url), _) => {
			let data = url.clone();
			view! {
			<object class="preview-frame" data=data>
				<p>
					"Preview unavailable. "
					<a href=url target="_blank" rel="noopener">"Open in new tab"</a>
				</p>
			</object>
			}
			.into_any()
		}
		(None, Some(content)) => view! { <pre class="preview-text">{content}</pre> }.into_any(),
		(None, None) => view! { <p class="preview-empty">"No preview available."</p> }.into_any(),
	};

	view! {
		<div class="document-preview">
			<header>
				<h3>{document.title}</h3>
				<button on:click=move |_| on_close.run(())>"Close"</button>
			</header>
			{body}
		</div>
	}
}

/// Course detail panel.
///
/// `materials` is the document listing the host loaded for the selection;
/// `on_changed` asks the host to reload it after an upload or delete.
#[component]
pub fn CoursePanel(
	client: ApiClient,
	#[prop(into)] course: Signal<Option<Course>>,
	#[prop(into)] materials: Signal<Option<CourseMaterials>>,
	#[prop(into)] loading: Signal<bool>,
	#[prop(into)] load_error: Signal<Option<String>>,
	#[prop(into)] on_changed: Callback<()>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	let error = RwSignal::new(Option::<String>::None);
	let busy = RwSignal::new(false);
	let preview = RwSignal::new(Option::<Document>::None);
	let description = RwSignal::new(Option::<String>::None);

	let topic = RwSignal::new(Option::<String>::None);
	let filtered = RwSignal::new(Option::<CourseMaterials>::None);
	// Bumped after an upload or delete so the filtered listing is refetched.
	let filter_refresh = RwSignal::new(0_u64);

	let category = RwSignal::new(DEFAULT_CATEGORY.to_string());
	let summary_format = RwSignal::new(SummaryFormat::Markdown);
	let summary_text = RwSignal::new(Option::<String>::None);

	// Reset per-course state and fetch the detail record on selection change.
	let detail_client = client.clone();
	let detail_request = LatestRequest::new();
	Effect::new(move |_| {
		let current = course.get();
		preview.set(None);
		topic.set(None);
		filtered.set(None);
		summary_text.set(None);
		error.set(None);
		description.set(current.as_ref().and_then(|c| c.description.clone()));
		let Some(current) = current else {
			detail_request.invalidate();
			return;
		};
		let ticket = detail_request.begin();
		let (client, latest) = (detail_client.clone(), detail_request.clone());
		spawn_local(async move {
			let result = client.course_detail(&current.id).await;
			if !latest.is_current(ticket) {
				return;
			}
			match result {
				Ok(detail) => {
					if detail.course.description.is_some() {
						description.set(detail.course.description);
					}
				}
				Err(e) => {
					warn!("course-map: course detail for {} failed: {}", current.id, e);
					error.set(Some(Action::LoadCourse.failure_message().to_string()));
				}
			}
		});
	});

	let topic_client = client.clone();
	let topic_request = LatestRequest::new();
	Effect::new(move |_| {
		filter_refresh.track();
		let Some(value) = topic.get() else {
			topic_request.invalidate();
			filtered.set(None);
			return;
		};
		let Some(current) = course.get_untracked() else {
			return;
		};
		let ticket = topic_request.begin();
		let (client, latest) = (topic_client.clone(), topic_request.clone());
		spawn_local(async move {
			let result = client.documents(&current.id, Some(&value)).await;
			if !latest.is_current(ticket) {
				return;
			}
			match result {
				Ok(docs) => filtered.set(Some(CourseMaterials::new(current.id, docs))),
				Err(e) => {
					warn!("course-map: topic filter failed: {}", e);
					error.set(Some(Action::LoadDocuments.failure_message().to_string()));
				}
			}
		});
	});
	let on_topic_change = move |ev: leptos::ev::Event| {
		let value = event_target_value(&ev);
		topic.set((!value.is_empty()).then_some(value));
	};

	let upload_client = client.clone();
	let on_upload = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(current) = course.get_untracked() else {
			return;
		};
		let client = upload_client.clone();
		let category = category.get_untracked();
		busy.set(true);
		error.set(None);
		spawn_local(async move {
			match read_file(&input).await {
				Some((name, bytes)) => {
					match client
						.upload_document(&current.id, &category, &name, bytes)
						.await
					{
						Ok(doc) => {
							info!("course-map: uploaded {} to {}", doc.title, current.code);
							on_changed.run(());
							filter_refresh.update(|n| *n += 1);
						}
						Err(e) => {
							warn!("course-map: upload failed: {}", e);
							error.set(Some(Action::UploadDocument.failure_message().to_string()));
						}
					}
				}
				None => warn!("course-map: no readable file selected"),
			}
			input.set_value("");
			busy.set(false);
		});
	};

	// Delete requests from the document list.
	let pending_delete = RwSignal::new(Option::<String>::None);
	let delete_client = client.clone();
	Effect::new(move |_| {
		let Some(doc_id) = pending_delete.get() else {
			return;
		};
		pending_delete.set(None);
		let client = delete_client.clone();
		busy.set(true);
		error.set(None);
		spawn_local(async move {
			match client.delete_document(&doc_id).await {
				Ok(()) => {
					if preview.with_untracked(|p| p.as_ref().is_some_and(|d| d.id == doc_id)) {
						preview.set(None);
					}
					on_changed.run(());
					filter_refresh.update(|n| *n += 1);
				}
				Err(e) => {
					warn!("course-map: delete of {doc_id} failed: {}", e);
					error.set(Some(Action::DeleteDocument.failure_message().to_string()));
				}
			}
			busy.set(false);
		});
	});

	let summary_client = client.clone();
	let generate = move |_| {
		let Some(current) = course.get_untracked() else {
			return;
		};
		let format = summary_format.get_untracked();
		let request = SummaryRequest {
			course_id: Some(current.id.clone()),
			topic: topic.get_untracked(),
			format,
			..SummaryRequest::default()
		};
		let client = summary_client.clone();
		busy.set(true);
		error.set(None);
		summary_text.set(None);
		spawn_local(async move {
			match client.generate_summary(&request).await {
				Ok(Summary::Text(text)) => summary_text.set(Some(text)),
				Ok(Summary::Binary {
					bytes,
					content_type,
				}) => {
					let name = summary_file_name(&current, format);
					if let Err(e) = download_bytes(&bytes, &content_type, &name) {
						warn!("course-map: summary download failed: {:?}", e);
						error.set(Some(Action::GenerateSummary.failure_message().to_string()));
					}
				}
				Err(e) => {
					warn!("course-map: summary generation failed: {}", e);
					error.set(Some(Action::GenerateSummary.failure_message().to_string()));
				}
			}
			busy.set(false);
		});
	};

	let groups = move || -> Vec<(String, Vec<Document>)> {
		course.with(|c| {
			materials.with(|loaded| {
				filtered.with(|f| {
					visible_materials(c.as_ref(), loaded.as_ref(), f.as_ref())
						.map(|m| {
							m.grouped_documents()
								.into_iter()
								.map(|(category, docs)| {
									(category.to_string(), docs.into_iter().cloned().collect())
								})
								.collect()
						})
						.unwrap_or_default()
				})
			})
		})
	};

	let close_preview = Callback::new(move |_: ()| preview.set(None));

	view! {
		<aside class="course-panel" class:hidden=move || course.with(Option::is_none)>
			<header>
				<h2>{move || course.get().map(|c| format!("{} {}", c.code, c.name))}</h2>
				<button on:click=move |_| on_close.run(())>"×"</button>
			</header>
			{move || description.get().map(|d| view! { <p class="description">{d}</p> })}
			{move || {
				course
					.get()
					.filter(|c| !c.prerequisites.is_empty())
					.map(|c| view! {
						<p class="prerequisites">
							{format!("Prerequisites: {}", c.prerequisites.join(", "))}
						</p>
					})
			}}
			<label class="topic-filter">
				"Topic "
				<select
					prop:value=move || topic.get().unwrap_or_default()
					on:change=on_topic_change
				>
					<option value="">"All topics"</option>
					{move || {
						course
							.get()
							.map(|c| c.topics)
							.unwrap_or_default()
							.into_iter()
							.map(|t| {
								let value = t.clone();
								view! { <option value=value>{t}</option> }
							})
							.collect_view()
					}}
				</select>
			</label>

			{move || load_error.get().map(|e| view! { <div class="inline-error">{e}</div> })}
			{move || error.get().map(|e| view! { <div class="inline-error">{e}</div> })}

			<section class="documents">
				<Show
					when=move || !loading.get()
					fallback=|| view! { <p class="loading">"Loading documents…"</p> }
				>
					{move || {
						let listed = groups();
						if listed.is_empty() {
							return view! { <p class="empty">"No documents yet."</p> }.into_any();
						}
						listed
							.into_iter()
							.map(|(name, docs)| {
								view! {
									<div class="document-group">
										<h3>{name}</h3>
										<ul>
											{docs
												.into_iter()
												.map(|doc| {
													let id = doc.id.clone();
													let shown = doc.clone();
													view! {
														<li>
															<a href="#" on:click=move |ev| {
																ev.prevent_default();
																preview.set(Some(shown.clone()));
															}>{doc.title}</a>
															<button
																class="delete"
																prop:disabled=move || busy.get()
																on:click=move |_| pending_delete.set(Some(id.clone()))
															>
																"Delete"
															</button>
														</li>
													}
												})
												.collect_view()}
										</ul>
									</div>
								}
							})
							.collect_view()
							.into_any()
					}}
				</Show>
			</section>

			{move || preview.get().map(|doc| view! { <DocumentPreview document=doc on_close=close_preview /> })}

			<section class="upload">
				<h3>"Upload document"</h3>
				<input
					type="text"
					placeholder="Category"
					prop:value=move || category.get()
					on:input=move |ev| category.set(event_target_value(&ev))
				/>
				<input type="file" prop:disabled=move || busy.get() on:change=on_upload />
			</section>

			<section class="summary">
				<h3>"Summary"</h3>
				<select on:change=move |ev| summary_format.set(parse_format(&event_target_value(&ev)))>
					<option value="markdown">"Markdown"</option>
					<option value="pdf">"PDF"</option>
				</select>
				<button prop:disabled=move || busy.get() on:click=generate>
					"Generate"
				</button>
				{move || summary_text.get().map(|s| view! { <pre class="summary-text">{s}</pre> })}
			</section>
		</aside>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn doc(id: &str, category: Option<&str>) -> Document {
		Document {
			id: id.into(),
			course_id: "213".into(),
			title: id.into(),
			content: None,
			topic: None,
			url: None,
			category: category.map(Into::into),
		}
	}

	fn course(id: &str) -> Course {
		Course {
			id: id.into(),
			code: format!("15-{id}"),
			name: "Course".into(),
			description: None,
			topics: vec![],
			prerequisites: vec![],
			color: None,
		}
	}

	#[test]
	fn listing_of_another_course_is_not_shown() {
		let a = CourseMaterials::new("213", vec![doc("cache-lab", Some("labs"))]);
		let b = course("122");
		// 122's fetch failed; 213's listing is still loaded
		assert!(visible_materials(Some(&b), Some(&a), None).is_none());
		assert!(visible_materials(None, Some(&a), None).is_none());
		assert_eq!(
			visible_materials(Some(&course("213")), Some(&a), None),
			Some(&a)
		);
	}

	#[test]
	fn topic_filtered_listing_wins_for_its_course() {
		let all = CourseMaterials::new("213", vec![doc("notes", None), doc("cache-lab", Some("labs"))]);
		let cache = CourseMaterials::new("213", vec![doc("cache-lab", Some("labs"))]);
		let stale = CourseMaterials::new("122", vec![doc("c0", None)]);
		let c = course("213");
		assert_eq!(visible_materials(Some(&c), Some(&all), Some(&cache)), Some(&cache));
		assert_eq!(visible_materials(Some(&c), Some(&all), Some(&stale)), Some(&all));
	}

	#[test]
	fn summary_file_name_uses_course_code() {
		assert_eq!(
			summary_file_name(&course("213"), SummaryFormat::Pdf),
			"15-213-summary.pdf"
		);
	}

	#[test]
	fn unknown_format_defaults_to_markdown() {
		assert_eq!(parse_format("pdf"), SummaryFormat::Pdf);
		assert_eq!(parse_format("docx"), SummaryFormat::Markdown);
	}
}
