use crate::{
    DrawCx, SizeCx,
    error::Result,
    geom::{Axis, Expanse, LineSegment, Rect},
    scroll::Indicator,
    style::{Attr, Style},
    widget::Widget,
};

/// Configuration for a [`Scrollbar`].
///
/// Defaults: default track style, reversed thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarConfig {
    /// Style of the track.
    pub track: Style,
    /// Style of the thumb.
    pub thumb: Style,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            track: Style::default(),
            thumb: Style::default().with(Attr::Reverse),
        }
    }
}

/// A scroll indicator. Once bound to a scrollable with
/// [`Tree::bind_indicator`](crate::Tree::bind_indicator), it draws a thumb
/// showing which part of the content is in view, and repaints whenever the
/// scrollable moves.
#[derive(Debug)]
pub struct Scrollbar {
    /// Binding to the scrollable.
    indicator: Indicator,
    /// Configuration.
    config: ScrollbarConfig,
}

impl Scrollbar {
    /// An unbound indicator for an axis.
    pub fn new(axis: Axis) -> Self {
        Self {
            indicator: Indicator::new(axis),
            config: ScrollbarConfig::default(),
        }
    }

    /// A vertical indicator.
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// A horizontal indicator.
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ScrollbarConfig) -> Self {
        self.config = config;
        self
    }

    /// The track glyph.
    fn track_char(&self) -> char {
        match self.indicator.axis() {
            Axis::Horizontal => '─',
            Axis::Vertical => '│',
        }
    }
}

/// The part of `rect` covered by a segment on `axis`.
fn span(rect: Rect, axis: Axis, seg: LineSegment) -> Rect {
    match axis {
        Axis::Horizontal => Rect::new(seg.off, rect.tl.y, seg.len, rect.h),
        Axis::Vertical => Rect::new(rect.tl.x, seg.off, rect.w, seg.len),
    }
}

impl Widget for Scrollbar {
    fn min_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::zero().with(self.indicator.axis().cross(), 1)
    }

    fn pref_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::new(1, 1)
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        let rect = cx.rect();
        let axis = self.indicator.axis();
        let track = self.track_char();
        cx.surface().fill_rect(rect, self.config.track, track);

        let Some(state) = self.indicator.target().and_then(|t| cx.scroll_state_of(t)) else {
            return Ok(());
        };
        let view = state.view().get(axis);
        let content = state.content().get(axis).max(view);
        if content <= view {
            return Ok(());
        }
        let window = LineSegment::new(state.position().get(axis), view);
        let Ok((_, thumb, _)) =
            rect.segment(axis)
                .split_active(window, LineSegment::new(0, content))
        else {
            return Ok(());
        };
        cx.surface()
            .fill_rect(span(rect, axis, thumb), self.config.thumb, '█');
        Ok(())
    }

    fn indicator(&self) -> Option<&Indicator> {
        Some(&self.indicator)
    }

    fn indicator_mut(&mut self) -> Option<&mut Indicator> {
        Some(&mut self.indicator)
    }
}
