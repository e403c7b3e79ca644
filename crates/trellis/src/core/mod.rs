//! The node arena and the engine that sizes, lays out, paints and routes
//! events through it.

/// Terminal backends and input sources.
pub mod backend;
/// Per-call contexts handed to widgets.
pub mod context;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Input event types.
pub mod event;
/// Focus traversal, event routing and keep-visible requests.
mod focus;
/// Node ID types.
pub mod id;
/// Node data stored in the arena.
pub mod node;
/// Rendering interfaces.
pub mod render;
/// The terminal driver.
pub mod root;
/// Scroll state and indicator bindings.
pub mod scroll;
/// Styling and color helpers.
pub mod style;
/// Terminal buffer types.
pub mod termbuf;
/// The node tree.
pub mod tree;

pub use context::{Context, DrawCx, LayoutCx, SizeCx};
pub use id::{NodeId, TypedId};
pub use root::Root;
pub use tree::Tree;
