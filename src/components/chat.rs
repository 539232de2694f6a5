//! Chat assistant panel.
//!
//! Messages go to the backend's chat endpoint. The session id from each reply
//! is sent with the next message, and a reply naming a course navigates the
//! graph to it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::api::{Action, ApiClient};
use crate::model::ChatReply;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
	User,
	Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
	pub role: Role,
	pub text: String,
	/// Backend tool invocations behind an assistant reply.
	pub tool_calls: Option<u32>,
}

/// Conversation state independent of the view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript {
	pub messages: Vec<ChatMessage>,
	pub session_id: Option<String>,
}

impl Transcript {
	/// Records a user message. Blank input is ignored and yields `None`.
	pub fn push_user(&mut self, input: &str) -> Option<String> {
		let text = input.trim();
		if text.is_empty() {
			return None;
		}
		self.messages.push(ChatMessage {
			role: Role::User,
			text: text.to_string(),
			tool_calls: None,
		});
		Some(text.to_string())
	}

	/// Records a reply and returns the course it asks to navigate to.
	pub fn apply_reply(&mut self, reply: ChatReply) -> Option<String> {
		if reply.session_id.is_some() {
			self.session_id = reply.session_id;
		}
		self.messages.push(ChatMessage {
			role: Role::Assistant,
			text: reply.response,
			tool_calls: reply.tool_calls.filter(|&n| n > 0),
		});
		reply.course_id.filter(|id| !id.is_empty())
	}
}

/// Chat panel. `on_navigate` receives a course id when a reply points at one.
#[component]
pub fn ChatPanel(client: ApiClient, #[prop(into)] on_navigate: Callback<String>) -> impl IntoView {
	let transcript = RwSignal::new(Transcript::default());
	let input = RwSignal::new(String::new());
	let is_loading = RwSignal::new(false);
	let error = RwSignal::new(Option::<String>::None);

	let send = move || {
		if is_loading.get_untracked() {
			return;
		}
		let mut message = None;
		transcript.update(|t| message = t.push_user(&input.get_untracked()));
		let Some(message) = message else {
			return;
		};
		input.set(String::new());
		error.set(None);
		is_loading.set(true);

		let client = client.clone();
		let session = transcript.with_untracked(|t| t.session_id.clone());
		spawn_local(async move {
			match client.chat(&message, session.as_deref()).await {
				Ok(reply) => {
					let mut target = None;
					transcript.update(|t| target = t.apply_reply(reply));
					if let Some(course_id) = target {
						on_navigate.run(course_id);
					}
				}
				Err(e) => {
					warn!("course-map: chat request failed: {}", e);
					error.set(Some(Action::SendMessage.failure_message().to_string()));
				}
			}
			is_loading.set(false);
		});
	};

	view! {
		<aside class="chat-panel">
			<h2>"Course assistant"</h2>
			<div class="chat-messages">
				{move || {
					transcript
						.with(|t| t.messages.clone())
						.into_iter()
						.map(|msg| {
							let class = match msg.role {
								Role::User => "chat-message user",
								Role::Assistant => "chat-message assistant",
							};
							view! {
								<div class=class>
									<p>{msg.text}</p>
									{msg.tool_calls.map(|n| view! {
										<span class="tool-calls">{format!("{n} tool call(s)")}</span>
									})}
								</div>
							}
						})
						.collect_view()
				}}
				<Show when=move || is_loading.get()>
					<div class="chat-message assistant pending">"Thinking…"</div>
				</Show>
			</div>
			{move || error.get().map(|e| view! { <div class="inline-error">{e}</div> })}
			<form
				class="chat-input"
				on:submit=move |ev| {
					ev.prevent_default();
					send();
				}
			>
				<input
					type="text"
					placeholder="Ask about a course…"
					prop:value=move || input.get()
					on:input=move |ev| input.set(event_target_value(&ev))
					prop:disabled=move || is_loading.get()
				/>
				<button type="submit" prop:disabled=move || is_loading.get()>
					"Send"
				</button>
			</form>
		</aside>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn reply(text: &str, session: Option<&str>, course: Option<&str>) -> ChatReply {
		ChatReply {
			response: text.into(),
			session_id: session.map(Into::into),
			course_id: course.map(Into::into),
			tool_calls: None,
		}
	}

	#[test]
	fn blank_input_is_not_sent() {
		let mut t = Transcript::default();
		assert_eq!(t.push_user("   "), None);
		assert!(t.messages.is_empty());
		assert_eq!(t.push_user("  what is 15-213? "), Some("what is 15-213?".into()));
	}

	#[test]
	fn session_id_is_kept_across_replies() {
		let mut t = Transcript::default();
		t.apply_reply(reply("hi", Some("s1"), None));
		assert_eq!(t.session_id.as_deref(), Some("s1"));
		t.apply_reply(reply("again", None, None));
		assert_eq!(t.session_id.as_deref(), Some("s1"));
	}

	#[test]
	fn reply_with_course_requests_navigation() {
		let mut t = Transcript::default();
		assert_eq!(
			t.apply_reply(reply("See 15-213", Some("s1"), Some("213"))),
			Some("213".into())
		);
		assert_eq!(t.apply_reply(reply("ok", None, Some(""))), None);
	}

	#[test]
	fn zero_tool_calls_are_hidden() {
		let mut t = Transcript::default();
		t.apply_reply(ChatReply {
			tool_calls: Some(0),
			..reply("plain", None, None)
		});
		t.apply_reply(ChatReply {
			tool_calls: Some(2),
			..reply("looked it up", None, None)
		});
		assert_eq!(t.messages[0].tool_calls, None);
		assert_eq!(t.messages[1].tool_calls, Some(2));
	}
}
