use std::ops::Add;

use crate::{Axis, Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// Node sizes, preferred sizes and buffer dimensions are all expanses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl Expanse {
    /// Construct an expanse.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The zero expanse.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The area of this expanse.
    pub fn area(&self) -> u32 {
        self.w * self.h
    }

    /// Is either dimension zero?
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, but a location at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::default(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this Size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// The dimension along an axis.
    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Return a copy with the dimension along `axis` replaced.
    pub fn with(&self, axis: Axis, v: u32) -> Self {
        match axis {
            Axis::Horizontal => Self { w: v, h: self.h },
            Axis::Vertical => Self { w: self.w, h: v },
        }
    }

    /// Build an expanse from per-axis values.
    pub fn from_axes(f: impl Fn(Axis) -> u32) -> Self {
        Self {
            w: f(Axis::Horizontal),
            h: f(Axis::Vertical),
        }
    }

    /// Componentwise maximum.
    pub fn max(&self, other: Self) -> Self {
        Self {
            w: self.w.max(other.w),
            h: self.h.max(other.h),
        }
    }

    /// Componentwise minimum.
    pub fn min(&self, other: Self) -> Self {
        Self {
            w: self.w.min(other.w),
            h: self.h.min(other.h),
        }
    }

    /// Subtract componentwise, flooring at zero.
    pub fn saturating_sub(&self, other: Self) -> Self {
        Self {
            w: self.w.saturating_sub(other.w),
            h: self.h.saturating_sub(other.h),
        }
    }
}

impl Add for Expanse {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            w: self.w.saturating_add(other.w),
            h: self.h.saturating_add(other.h),
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn componentwise() {
        let a = Expanse::new(3, 9);
        let b = Expanse::new(5, 2);
        assert_eq!(a.max(b), Expanse::new(5, 9));
        assert_eq!(a.min(b), Expanse::new(3, 2));
        assert_eq!(a.saturating_sub(b), Expanse::new(0, 7));
        assert_eq!(a + b, Expanse::new(8, 11));
        assert!(Expanse::new(0, 4).is_empty());
    }
}
