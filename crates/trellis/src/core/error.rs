use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::{core::id::NodeId, geom};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("configuration: {0}")]
    /// Malformed configuration: a bad shorthand, a slot the container does
    /// not accept, or a binding to the wrong kind of widget.
    Config(String),
    #[error("invariant: {0}")]
    /// A caller broke a precondition.
    Invariant(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("node not found: {0:?}")]
    /// The node does not exist in the tree.
    NodeNotFound(NodeId),
    #[error("widget busy: {0:?}")]
    /// The node's widget is already borrowed higher up the call stack.
    WidgetBusy(NodeId),
    #[error("widget type mismatch: {0:?}")]
    /// The node's widget is not of the requested type.
    WidgetType(NodeId),
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    /// A node cannot be inserted beneath itself.
    WouldCreateCycle {
        /// Proposed parent.
        parent: NodeId,
        /// Proposed child.
        child: NodeId,
    },
    #[error("backend: {0}")]
    /// Terminal backend failure.
    Backend(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        match e {
            geom::Error::Geometry(s) => Self::Geometry(s),
            geom::Error::Invariant(s) => Self::Invariant(s),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Backend(e.to_string())
    }
}
