//! UI components for the course browser.

pub mod chat;
pub mod course_graph;
pub mod course_panel;
