use tracing::debug;

use crate::{
    core::{id::NodeId, tree::Invalidate, tree::Tree},
    error::{Error, Result},
    geom::{Axis, Expanse, LineSegment, Point, Rect},
};

/// A scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    /// Move by a relative offset.
    By {
        /// Columns; negative scrolls left.
        x: i64,
        /// Rows; negative scrolls up.
        y: i64,
    },
    /// Move to an absolute position.
    To(Point),
}

/// Scroll state that a scrollable widget embeds and delegates to.
///
/// The position always lies within `[0, max]`, where `max` is how far the
/// content overhangs the view on each axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Offset of the view into the content.
    position: Point,
    /// Size of the scrolled content.
    content: Expanse,
    /// Size of the visible window.
    view: Expanse,
    /// Bound indicators, horizontal then vertical.
    indicators: [Option<NodeId>; 2],
}

/// Index into the indicator array for an axis.
fn slot(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

impl ScrollState {
    /// Current scroll position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Largest valid scroll position.
    pub fn max(&self) -> Point {
        let d = self.content.saturating_sub(self.view);
        Point::new(d.w, d.h)
    }

    /// Size of the scrolled content.
    pub fn content(&self) -> Expanse {
        self.content
    }

    /// Size of the visible window.
    pub fn view(&self) -> Expanse {
        self.view
    }

    /// The visible window, in content coordinates.
    pub fn visible(&self) -> Rect {
        Rect::at(self.position, self.view)
    }

    /// The indicator bound on an axis.
    pub fn indicator(&self, axis: Axis) -> Option<NodeId> {
        self.indicators[slot(axis)]
    }

    /// All bound indicators.
    pub fn indicators(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.indicators.iter().flatten().copied()
    }

    /// Bind or unbind the indicator on an axis.
    pub(crate) fn set_indicator(&mut self, axis: Axis, indicator: Option<NodeId>) {
        self.indicators[slot(axis)] = indicator;
    }

    /// Update content and view sizes, re-clamping the position. Returns true
    /// if anything changed.
    pub fn set_bounds(&mut self, content: Expanse, view: Expanse) -> bool {
        if self.content == content && self.view == view {
            return false;
        }
        self.content = content;
        self.view = view;
        self.position = self.position.min(self.max());
        true
    }

    /// Move to a position, clamped into range. Returns true if the position
    /// changed.
    pub fn scroll_to(&mut self, target: Point) -> bool {
        let next = target.min(self.max());
        if next == self.position {
            return false;
        }
        self.position = next;
        true
    }

    /// Apply a scroll request. Returns true if the position changed.
    pub fn apply(&mut self, amount: Scroll) -> bool {
        match amount {
            Scroll::By { x, y } => self.scroll_to(self.position.scroll(x, y)),
            Scroll::To(p) => self.scroll_to(p),
        }
    }

    /// Scroll the minimum amount needed to bring `target` into view. A target
    /// larger than the view aligns to its leading edge. Returns true if the
    /// position changed.
    pub fn reveal(&mut self, target: Rect) -> bool {
        let next = Point::new(
            self.reveal_axis(Axis::Horizontal, target),
            self.reveal_axis(Axis::Vertical, target),
        );
        self.scroll_to(next)
    }

    /// One axis of `reveal`.
    fn reveal_axis(&self, axis: Axis, target: Rect) -> u32 {
        let window = LineSegment::new(self.position.get(axis), self.view.get(axis));
        window.reveal(&target.segment(axis))
    }
}

/// The binding a scroll indicator keeps to the scrollable it reflects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    /// The axis the indicator reflects.
    axis: Axis,
    /// The bound scrollable.
    target: Option<NodeId>,
}

impl Indicator {
    /// An unbound indicator for an axis.
    pub fn new(axis: Axis) -> Self {
        Self { axis, target: None }
    }

    /// The axis the indicator reflects.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The bound scrollable.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }
}

impl Tree {
    /// Scroll a scrollable node. On an actual change the node repaints and
    /// its bound indicators are refreshed.
    pub fn scroll(&mut self, id: impl Into<NodeId>, amount: Scroll) -> Result<bool> {
        let id = id.into();
        let state = self.with_widget_mut(id, |w, _| {
            let name = w.name();
            let s = w
                .scroll_state_mut()
                .ok_or_else(|| Error::Config(format!("{name} is not scrollable")))?;
            let changed = s.apply(amount);
            Ok::<_, Error>(changed.then(|| s.clone()))
        })??;
        match state {
            Some(s) => {
                self.scrolled(id, &s)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Note that a node's scroll state changed: repaint it and its
    /// indicators.
    pub(crate) fn scrolled(&mut self, id: NodeId, state: &ScrollState) -> Result<()> {
        debug!(node = ?id, position = ?state.position(), "scroll");
        self.invalidate(id, Invalidate::Own)?;
        self.refresh_indicators(state)
    }

    /// Repaint every indicator bound to a scroll state.
    pub(crate) fn refresh_indicators(&mut self, state: &ScrollState) -> Result<()> {
        for ind in state.indicators() {
            if self.contains(ind) {
                self.invalidate(ind, Invalidate::Own)?;
            }
        }
        Ok(())
    }

    /// Read a node's scroll state.
    pub fn scroll_state(&self, id: impl Into<NodeId>) -> Option<&ScrollState> {
        self.widget_dyn(id.into()).and_then(|w| w.scroll_state())
    }

    /// Bind an indicator to a scrollable on the indicator's axis. Bindings are
    /// exclusive: the scrollable's previous indicator on that axis and the
    /// indicator's previous scrollable are both released.
    pub fn bind_indicator(
        &mut self,
        scrollable: impl Into<NodeId>,
        indicator: impl Into<NodeId>,
    ) -> Result<()> {
        let (scrollable, indicator) = (scrollable.into(), indicator.into());
        let (axis, old_target) = self.with_widget_mut(indicator, |w, _| {
            w.indicator()
                .map(|i| (i.axis(), i.target()))
                .ok_or_else(|| Error::Config(format!("{} is not a scroll indicator", w.name())))
        })??;
        let old_indicator = self.with_widget_mut(scrollable, |w, _| {
            w.scroll_state()
                .map(|s| s.indicator(axis))
                .ok_or_else(|| Error::Config(format!("{} is not scrollable", w.name())))
        })??;

        if let Some(t) = old_target
            && t != scrollable
        {
            self.clear_scroll_binding(t, axis, indicator)?;
        }
        if let Some(i) = old_indicator
            && i != indicator
        {
            self.clear_indicator_binding(i)?;
        }

        self.with_widget_mut(scrollable, |w, _| {
            if let Some(s) = w.scroll_state_mut() {
                s.set_indicator(axis, Some(indicator));
            }
        })?;
        self.with_widget_mut(indicator, |w, _| {
            if let Some(i) = w.indicator_mut() {
                i.target = Some(scrollable);
            }
        })?;
        debug!(?scrollable, ?indicator, ?axis, "bind indicator");
        self.invalidate(indicator, Invalidate::Own)
    }

    /// Release an indicator from whatever it is bound to.
    pub fn unbind_indicator(&mut self, indicator: impl Into<NodeId>) -> Result<()> {
        let indicator = indicator.into();
        let bound = self
            .widget_dyn(indicator)
            .and_then(|w| w.indicator())
            .and_then(|i| i.target().map(|t| (t, i.axis())));
        if let Some((t, axis)) = bound {
            self.clear_scroll_binding(t, axis, indicator)?;
        }
        self.clear_indicator_binding(indicator)
    }

    /// Drop a scrollable's binding on an axis, if it names `indicator`.
    fn clear_scroll_binding(&mut self, scrollable: NodeId, axis: Axis, indicator: NodeId) -> Result<()> {
        if !self.contains(scrollable) {
            return Ok(());
        }
        self.with_widget_mut(scrollable, |w, _| {
            if let Some(s) = w.scroll_state_mut()
                && s.indicator(axis) == Some(indicator)
            {
                s.set_indicator(axis, None);
            }
        })
    }

    /// Drop an indicator's target.
    fn clear_indicator_binding(&mut self, indicator: NodeId) -> Result<()> {
        if !self.contains(indicator) {
            return Ok(());
        }
        self.with_widget_mut(indicator, |w, _| {
            if let Some(i) = w.indicator_mut() {
                i.target = None;
            }
        })?;
        self.invalidate(indicator, Invalidate::Own)
    }

    /// Release every binding that involves a node about to be destroyed.
    pub(crate) fn unbind_all(&mut self, id: NodeId) -> Result<()> {
        let Some(w) = self.widget_dyn(id) else {
            return Ok(());
        };
        let bound: Vec<NodeId> = w
            .scroll_state()
            .map(|s| s.indicators().collect())
            .unwrap_or_default();
        let is_indicator = w.indicator().is_some();
        for ind in bound {
            self.clear_indicator_binding(ind)?;
        }
        if is_indicator {
            self.unbind_indicator(id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_range() {
        let mut s = ScrollState::default();
        s.set_bounds(Expanse::new(100, 10), Expanse::new(20, 10));
        assert_eq!(s.max(), Point::new(80, 0));
        assert!(s.scroll_to(Point::new(500, 7)));
        assert_eq!(s.position(), Point::new(80, 0));
        assert!(s.apply(Scroll::By { x: -90, y: -3 }));
        assert_eq!(s.position(), Point::zero());
        assert!(!s.apply(Scroll::By { x: -1, y: 0 }));
    }

    #[test]
    fn shrinking_content_pulls_position_back() {
        let mut s = ScrollState::default();
        s.set_bounds(Expanse::new(10, 100), Expanse::new(10, 10));
        s.scroll_to(Point::new(0, 90));
        s.set_bounds(Expanse::new(10, 50), Expanse::new(10, 10));
        assert_eq!(s.position(), Point::new(0, 40));
        s.set_bounds(Expanse::new(10, 5), Expanse::new(10, 10));
        assert_eq!(s.position(), Point::zero());
    }

    #[test]
    fn reveal_is_minimal() {
        let mut s = ScrollState::default();
        s.set_bounds(Expanse::new(10, 100), Expanse::new(10, 10));
        s.scroll_to(Point::new(0, 20));
        // Already visible: nothing moves.
        assert!(!s.reveal(Rect::new(0, 22, 1, 1)));
        // Below: the bottom edges align.
        assert!(s.reveal(Rect::new(0, 40, 1, 2)));
        assert_eq!(s.position().y, 32);
        // Above: the top edges align.
        assert!(s.reveal(Rect::new(0, 5, 1, 1)));
        assert_eq!(s.position().y, 5);
        // Past the end: clamped.
        s.reveal(Rect::new(0, 99, 1, 5));
        assert_eq!(s.position().y, 90);
    }
}
