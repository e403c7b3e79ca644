//! Geometry primitives and space distribution used across trellis.

/// Splitting a run of space across sibling items.
mod distribute;
/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Line segment operations.
mod linesegment;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use distribute::{Mode, distribute, even_split, weighted_split};
pub use error::{Error, Result};
pub use expanse::Expanse;
pub use linesegment::LineSegment;
pub use point::Point;
pub use rect::Rect;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// The x axis: columns.
    Horizontal,
    /// The y axis: rows.
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// The other axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}
