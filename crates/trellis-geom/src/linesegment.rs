use crate::{Error, Result};

/// A directionless one-dimensional extent: one axis of a rectangle.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct LineSegment {
    /// The offset of this extent.
    pub off: u32,
    /// The length of this extent.
    pub len: u32,
}

impl LineSegment {
    /// Construct a segment.
    pub fn new(off: u32, len: u32) -> Self {
        Self { off, len }
    }

    /// The far limit of the extent.
    pub fn far(&self) -> u32 {
        self.off.saturating_add(self.len)
    }

    /// Does other lie completely within this extent.
    pub fn contains(&self, other: &Self) -> bool {
        self.off <= other.off && self.far() >= other.far()
    }

    /// Does the coordinate fall inside the extent?
    pub fn contains_point(&self, v: u32) -> bool {
        v >= self.off && v < self.far()
    }

    /// Return the intersection between this line segment and other. The line
    /// segment returned will always have a non-zero length.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let off = self.off.max(other.off);
        let far = self.far().min(other.far());
        if self.len == 0 || other.len == 0 || far <= off {
            None
        } else {
            Some(Self {
                off,
                len: far - off,
            })
        }
    }

    /// Treating this segment as a window onto a longer run, return the
    /// smallest movement of the window's offset that brings `target` into
    /// view. A target longer than the window aligns to its leading edge. The
    /// result is not clamped to any scroll limit.
    pub fn reveal(&self, target: &Self) -> u32 {
        if target.len >= self.len || target.off < self.off {
            target.off
        } else if target.far() > self.far() {
            target.far() - self.len
        } else {
            self.off
        }
    }

    /// Split this extent into (pre, active, post) extents, based on the
    /// position of a window within a view. The main use for this funtion is
    /// computation of the active indicator size and position in a scrollbar.
    pub fn split_active(&self, window: Self, view: Self) -> Result<(Self, Self, Self)> {
        if window.len == 0 {
            Err(Error::Geometry("window cannot be zero length".into()))
        } else if !view.contains(&window) {
            Err(Error::Geometry(format!(
                "view {view:?} does not contain window {window:?}",
            )))
        } else {
            // Compute the fraction each section occupies of the view.
            let pref = f64::from(window.off - view.off) / f64::from(view.len);
            let postf = f64::from(view.far() - window.far()) / f64::from(view.len);
            let lenf = f64::from(self.len);

            // The active portion keeps a constant length regardless of
            // position, so it is computed first and the rest derived from it.
            let active = (lenf - (pref * lenf) - (postf * lenf)).ceil();
            let pre = (pref * lenf).floor();
            let post = (lenf - active - pre).max(0.0);

            Ok((
                Self {
                    off: self.off,
                    len: pre as u32,
                },
                Self {
                    off: self.off + pre as u32,
                    len: active as u32,
                },
                Self {
                    off: self.off + pre as u32 + active as u32,
                    len: post as u32,
                },
            ))
        }
    }
}
