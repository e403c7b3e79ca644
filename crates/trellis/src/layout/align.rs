use crate::{
    Context, DrawCx, LayoutCx, NodeId, SizeCx,
    error::Result,
    geom::{Axis, Expanse, Point},
    layout::{
        Child, Slot,
        single::{self, SingleConfig, Visibility},
    },
    style::Style,
    widget::Widget,
};

/// How a child's size relates to the space available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    /// Always the preferred size.
    Preferred,
    /// The preferred size, but no larger than the space.
    Compress,
    /// The preferred size, but no smaller than the space.
    Stretch,
    /// Exactly the space.
    #[default]
    Fit,
}

impl Scale {
    /// The child's length given its preferred length and the space.
    pub fn size(self, pref: u32, avail: u32) -> u32 {
        match self {
            Self::Preferred => pref,
            Self::Compress => pref.min(avail),
            Self::Stretch => pref.max(avail),
            Self::Fit => avail,
        }
    }
}

/// Where a child sits within leftover space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Align {
    /// Flush with the leading edge.
    Start,
    /// Centered.
    #[default]
    Center,
    /// Flush with the trailing edge.
    End,
    /// An arbitrary fraction of the slack, clamped to `[0, 1]`.
    Fraction(f64),
}

impl Align {
    /// The fraction of the slack placed before the child.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
            Self::Fraction(f) if f.is_nan() => 0.0,
            Self::Fraction(f) => f.clamp(0.0, 1.0),
        }
    }

    /// Offset of a child of length `size` within `avail`.
    pub fn offset(self, size: u32, avail: u32) -> u32 {
        let slack = avail.saturating_sub(size);
        (f64::from(slack) * self.fraction()) as u32
    }
}

/// Configuration for an [`AlignContainer`].
///
/// Defaults: fit on both axes, centered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignConfig {
    /// Shared single-child settings.
    pub single: SingleConfig,
    /// Horizontal and vertical scale.
    pub scale: (Scale, Scale),
    /// Horizontal and vertical alignment.
    pub align: (Align, Align),
}

impl AlignConfig {
    /// Set the scale on both axes.
    pub fn with_scale(mut self, h: Scale, v: Scale) -> Self {
        self.scale = (h, v);
        self
    }

    /// Set the alignment on both axes.
    pub fn with_align(mut self, h: Align, v: Align) -> Self {
        self.align = (h, v);
        self
    }

    /// Set the shared single-child settings.
    pub fn with_single(mut self, single: SingleConfig) -> Self {
        self.single = single;
        self
    }

    /// The scale along an axis.
    fn scale(&self, axis: Axis) -> Scale {
        match axis {
            Axis::Horizontal => self.scale.0,
            Axis::Vertical => self.scale.1,
        }
    }

    /// The alignment along an axis.
    fn align(&self, axis: Axis) -> Align {
        match axis {
            Axis::Horizontal => self.align.0,
            Axis::Vertical => self.align.1,
        }
    }
}

/// A single-child container that sizes its child by a scale policy and
/// places it by an alignment fraction.
#[derive(Debug, Default)]
pub struct AlignContainer {
    /// Configuration.
    config: AlignConfig,
}

impl AlignContainer {
    /// Construct with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with an explicit configuration.
    pub fn with_config(config: AlignConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Switch visibility.
    pub fn set_visibility(&mut self, visibility: Visibility, cx: &mut Context<'_>) -> Result<()> {
        single::set_visibility(&mut self.config.single, visibility, cx)
    }
}

impl Widget for AlignContainer {
    fn min_size(&self, cx: &SizeCx<'_>) -> Expanse {
        if self.config.single.collapsed() {
            return Expanse::zero();
        }
        self.config.single.child_min(cx)
    }

    fn pref_size(&self, cx: &SizeCx<'_>) -> Expanse {
        if self.config.single.collapsed() {
            return Expanse::zero();
        }
        self.config.single.child_pref(cx)
    }

    fn relayout(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let Some(child) = cx.child_ids().first().copied() else {
            return Ok(());
        };
        let rect = cx.rect();
        let pref = self.config.single.cap(cx.pref_size(child));
        let size = Expanse::from_axes(|a| self.config.scale(a).size(pref.get(a), rect.expanse().get(a)));
        let off = Point::new(
            self.config.align(Axis::Horizontal).offset(size.w, rect.w),
            self.config.align(Axis::Vertical).offset(size.h, rect.h),
        );
        cx.assign(child, rect.tl + off, size)
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        if self.config.single.visibility != Visibility::Collapse {
            let rect = cx.rect();
            cx.surface().fill_rect(rect, Style::default(), ' ');
        }
        Ok(())
    }

    fn draw_children(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        if self.config.single.visible() {
            cx.draw_children()?;
        }
        Ok(())
    }

    fn focus(&mut self, reverse: bool, cx: &mut Context<'_>) -> Result<bool> {
        if !self.config.single.visible() {
            return Ok(false);
        }
        cx.focus_children(reverse)
    }

    fn admit(&self, slot: &Slot, children: &[Child]) -> Result<Vec<NodeId>> {
        single::admit_single(self.name(), slot, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_policies() {
        assert_eq!(Scale::Preferred.size(5, 10), 5);
        assert_eq!(Scale::Preferred.size(15, 10), 15);
        assert_eq!(Scale::Compress.size(15, 10), 10);
        assert_eq!(Scale::Compress.size(5, 10), 5);
        assert_eq!(Scale::Stretch.size(5, 10), 10);
        assert_eq!(Scale::Stretch.size(15, 10), 15);
        assert_eq!(Scale::Fit.size(15, 10), 10);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(Align::Start.offset(4, 10), 0);
        assert_eq!(Align::Center.offset(4, 10), 3);
        assert_eq!(Align::End.offset(4, 10), 6);
        assert_eq!(Align::Fraction(0.25).offset(2, 10), 2);
        assert_eq!(Align::Fraction(7.0).offset(4, 10), 6);
        // No slack, no offset.
        assert_eq!(Align::End.offset(12, 10), 0);
    }
}
