//! Layout policies and the per-child configuration they attach to children.

/// Alignment and scaling of a single child.
mod align;
/// Margin, border and padding around a single child.
mod boxed;
/// Row and column grids.
mod grid;
/// N-ary linear layout.
mod linear;
/// Nine-region margin layout.
mod margin;
/// Explicit placement.
mod placer;
/// Single-child helpers shared by the one-child containers.
mod single;
/// Layered stacking.
mod stack;
/// Scrolling viewport.
mod viewport;

pub use align::{Align, AlignConfig, AlignContainer, Scale};
pub use boxed::{BoxConfig, BoxContainer};
pub use grid::{GridConfig, GridContainer, MAX_TRACKS, Track};
pub use linear::{LinearConfig, LinearContainer, LinearSlot, Rule};
pub use margin::{MarginConfig, MarginContainer, Region};
pub use placer::{Placement, PlacerContainer};
pub use single::{SingleConfig, Visibility};
pub use stack::StackContainer;
pub use viewport::{Viewport, ViewportConfig};

pub use crate::geom::Mode;
use crate::{
    NodeId,
    error::{Error, Result},
    geom::Axis,
};

/// Four per-side values, in CSS order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Quad<T> {
    /// Top side.
    pub top: T,
    /// Right side.
    pub right: T,
    /// Bottom side.
    pub bottom: T,
    /// Left side.
    pub left: T,
}

/// Which sides of a box carry a border.
pub type Sides = Quad<bool>;

/// Per-side insets. `None` is flexible: it absorbs slack.
pub type Insets = Quad<Option<u32>>;

impl<T: Copy> Quad<T> {
    /// Construct from explicit sides.
    pub fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same value on every side.
    pub fn all(v: T) -> Self {
        Self::new(v, v, v, v)
    }

    /// Expand CSS-style shorthand: one value for all sides, two for
    /// vertical/horizontal, three for top/horizontal/bottom, four for
    /// top/right/bottom/left.
    pub fn parse(values: &[T]) -> Result<Self> {
        match *values {
            [a] => Ok(Self::all(a)),
            [v, h] => Ok(Self::new(v, h, v, h)),
            [t, h, b] => Ok(Self::new(t, h, b, h)),
            [t, r, b, l] => Ok(Self::new(t, r, b, l)),
            _ => Err(Error::Config(format!(
                "expected 1 to 4 side values, got {}",
                values.len()
            ))),
        }
    }

    /// The (leading, trailing) pair along an axis: left/right or top/bottom.
    pub fn axis(&self, axis: Axis) -> (T, T) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.top, self.bottom),
        }
    }
}

/// Per-child layout configuration, attached when the child is inserted and
/// owned by the parent's child record.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// No policy-specific configuration.
    Plain,
    /// Linear layout weights and advance rule.
    Linear(LinearSlot),
    /// A grid cell.
    Cell {
        /// Column index.
        col: usize,
        /// Row index.
        row: usize,
    },
    /// One of the nine margin regions.
    Region(Region),
    /// A stacking layer; higher layers draw later.
    Layer(i32),
    /// An explicit placement.
    Place(Placement),
}

impl From<LinearSlot> for Slot {
    fn from(s: LinearSlot) -> Self {
        Self::Linear(s)
    }
}

impl From<Region> for Slot {
    fn from(r: Region) -> Self {
        Self::Region(r)
    }
}

impl From<Placement> for Slot {
    fn from(p: Placement) -> Self {
        Self::Place(p)
    }
}

/// A child record: the owned child and its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    /// The child node.
    pub id: NodeId,
    /// Its layout configuration.
    pub slot: Slot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_shorthand() -> Result<()> {
        assert_eq!(Quad::parse(&[1])?, Quad::all(1));
        assert_eq!(Quad::parse(&[1, 2])?, Quad::new(1, 2, 1, 2));
        assert_eq!(Quad::parse(&[1, 2, 3])?, Quad::new(1, 2, 3, 2));
        assert_eq!(Quad::parse(&[1, 2, 3, 4])?, Quad::new(1, 2, 3, 4));
        assert!(matches!(Quad::<u32>::parse(&[]), Err(Error::Config(_))));
        assert!(matches!(
            Quad::parse(&[1, 2, 3, 4, 5]),
            Err(Error::Config(_))
        ));
        assert_eq!(Quad::new(1, 2, 3, 4).axis(Axis::Horizontal), (4, 2));
        Ok(())
    }
}
