//! Course graph visualization.
//!
//! Courses, their topics and (for the selected course) material sections are
//! laid out as a force-directed graph on an HTML canvas:
//! - [`GraphBuilder`] turns the course list and selection into a snapshot
//! - the layout controller drives the physics through warm-up and cooldown
//! - the canvas component handles pan, zoom, drag and click-to-select
//!
//! # Example
//!
//! ```ignore
//! let data = Memo::new(move |_| builder.build(&courses.get(), selected.get().as_deref(), None));
//!
//! view! {
//!     <CourseGraphCanvas
//!         data=data
//!         selected=selected
//!         on_select=move |next| set_selected.set(next)
//!         fullscreen=true
//!     />
//! }
//! ```

pub mod builder;
mod component;
pub mod interaction;
pub mod layout;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use builder::GraphBuilder;
pub use component::CourseGraphCanvas;
pub use interaction::{ZoomBounds, toggle_selection};
pub use theme::Theme;
pub use types::{EdgeKind, GraphData, GraphEdge, GraphNode, NodeKind};
