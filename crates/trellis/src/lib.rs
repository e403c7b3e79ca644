//! Trellis: a terminal UI toolkit.
//!
//! Widgets live in a [`Tree`] and negotiate their size with their parents:
//! each reports a minimum and a preferred size, and containers distribute
//! the space they are given according to a layout policy. Redraw and
//! relayout are incremental, tracked by validity flags that bubble up the
//! tree. Focus moves through the tree with Tab and Shift-Tab, events follow
//! the focus path, and viewports scroll oversized content, keeping any
//! rectangle a descendant asks for in view.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Tree`] - The node arena and layout engine
//! - [`Root`] - Binds a tree to a terminal and runs it
//! - [`Widget`] - The trait implemented by all widgets
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives and space distribution
//! - [`layout`] - Container layout policies
//! - [`widgets`] - Built-in leaf widgets

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod geom;
pub mod layout;
pub mod widget;
pub mod widgets;

pub use core::termbuf::TermBuf;
pub use core::{Context, DrawCx, LayoutCx, NodeId, Root, SizeCx, Tree, TypedId};
pub use core::{backend, dump, error, event, node, render, scroll, style, tree};

pub use error::{Error, Result};
pub use widget::{EventOutcome, Widget};
