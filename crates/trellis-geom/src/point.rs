use std::ops::Add;

use crate::{Axis, Expanse, Rect};

/// A location on a character grid, counted from the top-left corner.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Point {
    /// Construct a point.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        (0, 0).into()
    }

    /// Is this the origin?
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// The coordinate along an axis.
    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Return a copy with the coordinate along `axis` replaced.
    pub fn with(&self, axis: Axis, v: u32) -> Self {
        match axis {
            Axis::Horizontal => Self { x: v, y: self.y },
            Axis::Vertical => Self { x: self.x, y: v },
        }
    }

    /// Shift the point by an offset, avoiding under- or overflow.
    pub fn scroll(&self, x: i64, y: i64) -> Self {
        Self {
            x: shift(self.x, x),
            y: shift(self.y, y),
        }
    }

    /// Componentwise minimum.
    pub fn min(&self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Componentwise maximum.
    pub fn max(&self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Clamp a point, constraining it to fall within `rect`.
    pub fn clamp(&self, rect: Rect) -> Self {
        Self {
            x: self.x.clamp(rect.tl.x, rect.tl.x + rect.w),
            y: self.y.clamp(rect.tl.y, rect.tl.y + rect.h),
        }
    }

    /// Subtract `other` componentwise, flooring at zero.
    pub fn saturating_sub(&self, other: Self) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }

    /// Add an expanse, giving the far corner of a box anchored here.
    pub fn extend(&self, e: Expanse) -> Self {
        Self {
            x: self.x.saturating_add(e.w),
            y: self.y.saturating_add(e.h),
        }
    }
}

/// Shift a coordinate by a signed amount, saturating at the bounds of u32.
fn shift(v: u32, d: i64) -> u32 {
    let r = i64::from(v).saturating_add(d);
    r.clamp(0, i64::from(u32::MAX)) as u32
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

impl From<(u32, u32)> for Point {
    #[inline]
    fn from(v: (u32, u32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn add() -> Result<()> {
        assert_eq!(Point::zero() + (1u32, 1u32).into(), (1u32, 1u32).into());
        assert_eq!(Point::zero() + (1u32, 0u32).into(), (1u32, 0u32).into());
        assert_eq!(Point::zero() + (0u32, 1u32).into(), (0u32, 1u32).into());
        Ok(())
    }

    #[test]
    fn scroll_saturates() -> Result<()> {
        let p = Point::new(2, 3);
        assert_eq!(p.scroll(-5, 1), Point::new(0, 4));
        assert_eq!(p.scroll(3, -3), Point::new(5, 0));
        assert_eq!(Point::new(u32::MAX, 0).scroll(1, 0).x, u32::MAX);
        Ok(())
    }

    #[test]
    fn axis_access() -> Result<()> {
        let p = Point::new(2, 3);
        assert_eq!(p.get(Axis::Horizontal), 2);
        assert_eq!(p.get(Axis::Vertical), 3);
        assert_eq!(p.with(Axis::Vertical, 9), Point::new(2, 9));
        Ok(())
    }
}
