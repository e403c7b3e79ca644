use crate::{Axis, Expanse, LineSegment, Point};

/// A rectangle on the character grid.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner
    pub tl: Point,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from its top-left corner and dimensions.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// Construct a rectangle from a location and a size.
    pub fn at(tl: Point, size: Expanse) -> Self {
        Self {
            tl,
            w: size.w,
            h: size.h,
        }
    }

    /// Build a rectangle from horizontal and vertical extents.
    pub fn from_segments(h: LineSegment, v: LineSegment) -> Self {
        Self::new(h.off, v.off, h.len, v.len)
    }

    /// The size of the rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Is the area zero?
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// The extent of the rectangle along an axis.
    pub fn segment(&self, axis: Axis) -> LineSegment {
        match axis {
            Axis::Horizontal => LineSegment {
                off: self.tl.x,
                len: self.w,
            },
            Axis::Vertical => LineSegment {
                off: self.tl.y,
                len: self.h,
            },
        }
    }

    /// Does this rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        self.segment(Axis::Horizontal).contains_point(p.x)
            && self.segment(Axis::Vertical).contains_point(p.y)
    }

    /// Does this rectangle completely enclose the other?
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.segment(Axis::Horizontal)
            .contains(&other.segment(Axis::Horizontal))
            && self
                .segment(Axis::Vertical)
                .contains(&other.segment(Axis::Vertical))
    }

    /// A safe function for shifting the rectangle by an offset, which won't
    /// under- or overflow.
    pub fn shift(&self, x: i64, y: i64) -> Self {
        Self {
            tl: self.tl.scroll(x, y),
            w: self.w,
            h: self.h,
        }
    }

    /// The overlapping area of two rectangles, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let h = self
            .segment(Axis::Horizontal)
            .intersection(&other.segment(Axis::Horizontal))?;
        let v = self
            .segment(Axis::Vertical)
            .intersection(&other.segment(Axis::Vertical))?;
        Some(Self::from_segments(h, v))
    }

    /// Extracts an inner rectangle, shrinking each side by the given amounts.
    /// Dimensions floor at zero.
    pub fn inset(&self, top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            tl: Point {
                x: self.tl.x.saturating_add(left),
                y: self.tl.y.saturating_add(top),
            },
            w: self.w.saturating_sub(left.saturating_add(right)),
            h: self.h.saturating_sub(top.saturating_add(bottom)),
        }
    }
}

impl From<Expanse> for Rect {
    fn from(e: Expanse) -> Self {
        e.rect()
    }
}
