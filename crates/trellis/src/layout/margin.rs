use crate::{
    DrawCx, LayoutCx, NodeId, SizeCx,
    error::{Error, Result},
    geom::{Axis, Expanse, Mode, Point, distribute},
    layout::{Child, Slot},
    style::Style,
    widget::Widget,
};

/// One of the nine cells of a margin layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Top-left corner.
    TopLeft,
    /// Top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Left edge.
    Left,
    /// The center.
    Center,
    /// Right edge.
    Right,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge.
    Bottom,
    /// Bottom-right corner.
    BottomRight,
}

impl Region {
    /// Every region, row by row.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Center,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    /// The band this region falls in along an axis: 0, 1 or 2.
    pub fn band(self, axis: Axis) -> usize {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(4);
        match axis {
            Axis::Horizontal => idx % 3,
            Axis::Vertical => idx / 3,
        }
    }
}

/// Configuration for a [`MarginContainer`].
///
/// Defaults: the center band takes all slack, default background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginConfig {
    /// Give surplus space to the center band. Otherwise bands stay at their
    /// preferred size and slack is left unused past the last band.
    pub stretch_center: bool,
    /// Fill for areas no child covers.
    pub background: Style,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            stretch_center: true,
            background: Style::default(),
        }
    }
}

/// A container with nine cells: corners, edges and center. Each cell holds
/// at most one child; inserting into an occupied cell evicts its occupant.
#[derive(Debug, Default)]
pub struct MarginContainer {
    /// Configuration.
    config: MarginConfig,
}

/// Band sizes along one axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Bands {
    /// Minimum per band.
    min: [u32; 3],
    /// Preferred per band.
    pref: [u32; 3],
}

impl MarginContainer {
    /// Construct with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with an explicit configuration.
    pub fn with_config(config: MarginConfig) -> Self {
        Self { config }
    }

    /// The region of a child record.
    fn region(child: &Child) -> Region {
        match child.slot {
            Slot::Region(r) => r,
            _ => Region::Center,
        }
    }

    /// Measure the bands along an axis.
    fn bands(
        children: &[Child],
        axis: Axis,
        min: impl Fn(NodeId) -> Expanse,
        pref: impl Fn(NodeId) -> Expanse,
    ) -> Bands {
        let mut b = Bands::default();
        for c in children {
            let band = Self::region(c).band(axis);
            b.min[band] = b.min[band].max(min(c.id).get(axis));
            b.pref[band] = b.pref[band].max(pref(c.id).get(axis));
        }
        b
    }

    /// Split `full` across the three bands of an axis.
    fn split(&self, full: u32, bands: &Bands) -> Result<Vec<u32>> {
        let grow = if self.config.stretch_center {
            [0.0, 1.0, 0.0]
        } else {
            [0.0; 3]
        };
        let shrink: Vec<f64> = bands
            .pref
            .iter()
            .zip(&bands.min)
            .map(|(p, m)| f64::from(p.saturating_sub(*m)))
            .collect();
        Ok(distribute(
            full,
            &bands.pref,
            &bands.min,
            &[true; 3],
            &grow,
            &shrink,
            Mode::Normal,
        )?)
    }
}

impl Widget for MarginContainer {
    fn min_size(&self, cx: &SizeCx<'_>) -> Expanse {
        Expanse::from_axes(|a| {
            Self::bands(cx.child_slots(), a, |c| cx.min_size(c), |c| cx.pref_size(c))
                .min
                .iter()
                .sum()
        })
    }

    fn pref_size(&self, cx: &SizeCx<'_>) -> Expanse {
        Expanse::from_axes(|a| {
            Self::bands(cx.child_slots(), a, |c| cx.min_size(c), |c| cx.pref_size(c))
                .pref
                .iter()
                .sum()
        })
    }

    fn relayout(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let rect = cx.rect();
        let children = cx.child_slots();
        let mut sizes = Vec::with_capacity(2);
        for axis in Axis::BOTH {
            let bands = Self::bands(&children, axis, |c| cx.min_size(c), |c| cx.pref_size(c));
            sizes.push(self.split(rect.expanse().get(axis), &bands)?);
        }
        let (w, h) = (&sizes[0], &sizes[1]);
        for c in &children {
            let r = Self::region(c);
            let (col, row) = (r.band(Axis::Horizontal), r.band(Axis::Vertical));
            let off = Point::new(w[..col].iter().sum(), h[..row].iter().sum());
            cx.assign(c.id, rect.tl + off, Expanse::new(w[col], h[row]))?;
        }
        Ok(())
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        let rect = cx.rect();
        cx.surface().fill_rect(rect, self.config.background, ' ');
        Ok(())
    }

    fn admit(&self, slot: &Slot, children: &[Child]) -> Result<Vec<NodeId>> {
        match slot {
            Slot::Region(r) => Ok(children
                .iter()
                .filter(|c| c.slot == Slot::Region(*r))
                .map(|c| c.id)
                .collect()),
            other => Err(Error::Config(format!(
                "{} needs a region slot, got {other:?}",
                self.name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands() {
        assert_eq!(Region::TopLeft.band(Axis::Horizontal), 0);
        assert_eq!(Region::Right.band(Axis::Horizontal), 2);
        assert_eq!(Region::Right.band(Axis::Vertical), 1);
        assert_eq!(Region::Bottom.band(Axis::Vertical), 2);
    }

    #[test]
    fn center_takes_slack_and_edges_yield() -> Result<()> {
        let m = MarginContainer::new();
        let b = Bands {
            min: [1, 0, 1],
            pref: [3, 2, 3],
        };
        assert_eq!(m.split(20, &b)?, vec![3, 14, 3]);
        // Short by 4: each band yields in proportion to its pref - min.
        assert_eq!(m.split(4, &b)?.iter().sum::<u32>(), 4);
        let s = m.split(5, &b)?;
        assert!(s[0] >= 1 && s[2] >= 1);
        assert_eq!(s.iter().sum::<u32>(), 5);
        Ok(())
    }
}
