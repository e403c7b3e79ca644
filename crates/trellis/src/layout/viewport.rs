use tracing::trace;

use crate::{
    Context, DrawCx, LayoutCx, NodeId, SizeCx, TermBuf,
    error::Result,
    event::{Event, KeyCode},
    geom::{Expanse, Point, Rect},
    layout::{Child, Slot, single},
    scroll::{Scroll, ScrollState},
    style::Style,
    tree::Grab,
    widget::{EventOutcome, Widget},
};

/// Configuration for a [`Viewport`].
///
/// Defaults: no cap on the child's size, default background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportConfig {
    /// Upper bound on the child's width and height. The child is never
    /// smaller than the viewport itself.
    pub max_child_size: (Option<u32>, Option<u32>),
    /// Fill for the off-screen buffer.
    pub background: Style,
}

impl ViewportConfig {
    /// Cap the child's size.
    pub fn with_max_child_size(mut self, w: Option<u32>, h: Option<u32>) -> Self {
        self.max_child_size = (w, h);
        self
    }

    /// Set the background.
    pub fn with_background(mut self, style: Style) -> Self {
        self.background = style;
        self
    }
}

/// A single-child scrolling window.
///
/// The child is laid out at `max(preferred, viewport size)` and drawn into an
/// off-screen buffer of that size; the viewport shows the part of the buffer
/// at its scroll position. Since the child draws into its own buffer,
/// scrolling repaints the viewport without repainting the child.
#[derive(Debug, Default)]
pub struct Viewport {
    /// Configuration.
    config: ViewportConfig,
    /// Scroll position and bounds.
    scroll: ScrollState,
    /// The child's drawing target.
    buffer: Option<TermBuf>,
}

impl Viewport {
    /// Construct with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with an explicit configuration.
    pub fn with_config(config: ViewportConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration.
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Apply the size cap.
    fn cap(&self, size: Expanse) -> Expanse {
        let (w, h) = self.config.max_child_size;
        Expanse::new(
            w.map_or(size.w, |m| size.w.min(m)),
            h.map_or(size.h, |m| size.h.min(m)),
        )
    }

    /// Scroll by a page in response to an unhandled key.
    fn page(&self, event: &Event) -> Option<Scroll> {
        let page = i64::from(self.scroll.view().h.max(1));
        if event.is_key(KeyCode::PageDown) {
            Some(Scroll::By { x: 0, y: page })
        } else if event.is_key(KeyCode::PageUp) {
            Some(Scroll::By { x: 0, y: -page })
        } else {
            None
        }
    }
}

impl Widget for Viewport {
    fn min_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::zero()
    }

    fn pref_size(&self, cx: &SizeCx<'_>) -> Expanse {
        cx.children()
            .next()
            .map_or(Expanse::zero(), |c| self.cap(cx.pref_size(c)))
    }

    fn relayout(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let view = cx.size();
        let content = match cx.child_ids().first().copied() {
            Some(child) => {
                let content = self.cap(cx.pref_size(child)).max(view);
                cx.assign(child, Point::zero(), content)?;
                content
            }
            None => view,
        };
        if self.scroll.set_bounds(content, view) {
            trace!(?content, ?view, "viewport bounds");
            cx.refresh_indicators(&self.scroll)?;
        }
        Ok(())
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        let rect = cx.rect();
        cx.surface().fill_rect(rect, self.config.background, ' ');
        Ok(())
    }

    fn draw_children(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        let Some(child) = cx.child_ids().first().copied() else {
            return Ok(());
        };
        let size = self.scroll.content();
        let bg = self.config.background;
        if !self.buffer.as_ref().is_some_and(|b| b.size() == size) {
            self.buffer
                .get_or_insert_with(|| TermBuf::new(size, ' ', bg))
                .resize(size, ' ', bg);
            cx.invalidate_child(child)?;
        }
        let buf = self.buffer.get_or_insert_with(|| TermBuf::new(size, ' ', bg));
        cx.draw_child_into(child, buf)?;
        let dest = cx.rect().tl;
        cx.surface().blit(buf, self.scroll.visible(), dest);
        Ok(())
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_>) -> Result<EventOutcome> {
        let outcome = cx.route_event(event)?;
        if outcome.is_handled() {
            return Ok(outcome);
        }
        match self.page(event) {
            Some(amount) => {
                if self.scroll.apply(amount) {
                    cx.scrolled(&self.scroll)?;
                }
                Ok(EventOutcome::Handle)
            }
            None => Ok(outcome),
        }
    }

    fn admit(&self, slot: &Slot, children: &[Child]) -> Result<Vec<NodeId>> {
        single::admit_single(self.name(), slot, children)
    }

    fn isolates_children(&self) -> bool {
        true
    }

    fn intercept_grab(
        &mut self,
        grab: Grab,
        _child: NodeId,
        cx: &mut Context<'_>,
    ) -> Result<Option<Grab>> {
        if self.scroll.reveal(grab.rect) {
            cx.scrolled(&self.scroll)?;
        }
        let visible = self.scroll.visible();
        let origin = cx.rect().tl;
        let (dx, dy) = (
            i64::from(origin.x) - i64::from(visible.tl.x),
            i64::from(origin.y) - i64::from(visible.tl.y),
        );
        let rect = grab
            .rect
            .intersect(&visible)
            .map_or(Rect::at(origin, Expanse::zero()), |r| r.shift(dx, dy));
        let cursor = grab
            .cursor
            .filter(|c| visible.contains_point(*c))
            .map(|c| c.scroll(dx, dy));
        Ok(Some(Grab::new(rect, cursor, grab.exclusive)))
    }

    fn scroll_state(&self) -> Option<&ScrollState> {
        Some(&self.scroll)
    }

    fn scroll_state_mut(&mut self) -> Option<&mut ScrollState> {
        Some(&mut self.scroll)
    }
}
