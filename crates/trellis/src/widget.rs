//! Widget trait and event outcome types.

use std::any::{Any, type_name};

use crate::{
    NodeId,
    core::{
        context::{Context, DrawCx, LayoutCx, SizeCx},
        scroll::{Indicator, ScrollState},
        tree::Grab,
    },
    error::{Error, Result},
    event::Event,
    geom::Expanse,
    layout::{Child, Slot},
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was consumed.
    Handle,
    /// The event was declined.
    Ignore,
}

impl EventOutcome {
    /// Was the event consumed?
    pub fn is_handled(self) -> bool {
        self == Self::Handle
    }
}

impl From<bool> for EventOutcome {
    fn from(handled: bool) -> Self {
        if handled { Self::Handle } else { Self::Ignore }
    }
}

/// Which siblings repaint when a child's drawing changes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Repaint {
    /// Only the child repaints; siblings never overlap it.
    Subtree,
    /// Every later sibling repaints too, since it may be drawn over the child.
    Following,
}

/// Widgets are the behavior attached to nodes in the tree.
///
/// A widget with no children is a leaf. Every default method implements the
/// generic composite behavior, so a container only overrides the parts its
/// layout policy changes.
pub trait Widget: Any {
    /// Minimum size. Defaults to the componentwise max over children.
    fn min_size(&self, cx: &SizeCx<'_>) -> Expanse {
        cx.children()
            .fold(Expanse::zero(), |acc, c| acc.max(cx.min_size(c)))
    }

    /// Preferred size. Defaults to the componentwise max over children.
    fn pref_size(&self, cx: &SizeCx<'_>) -> Expanse {
        cx.children()
            .fold(Expanse::zero(), |acc, c| acc.max(cx.pref_size(c)))
    }

    /// Place children inside the node's assigned rectangle. The default gives
    /// every child the full rectangle.
    fn relayout(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let rect = cx.rect();
        for child in cx.child_ids() {
            cx.assign(child, rect.tl, rect.expanse())?;
        }
        Ok(())
    }

    /// Paint this node's own decoration. Runs before children are drawn, and
    /// only when the node's own drawing is stale.
    fn draw(&mut self, _cx: &mut DrawCx<'_>) -> Result<()> {
        Ok(())
    }

    /// Draw children onto the surface, in paint order.
    fn draw_children(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        cx.draw_children()
    }

    /// Handle an event. The default routes it down the focus path.
    fn on_event(&mut self, event: &Event, cx: &mut Context<'_>) -> Result<EventOutcome> {
        cx.route_event(event)
    }

    /// Advance focus within this subtree, returning true if focus landed
    /// here. The default cycles through children.
    fn focus(&mut self, reverse: bool, cx: &mut Context<'_>) -> Result<bool> {
        cx.focus_children(reverse)
    }

    /// Validate the slot for a new child, returning the children it evicts.
    fn admit(&self, slot: &Slot, _children: &[Child]) -> Result<Vec<NodeId>> {
        match slot {
            Slot::Plain => Ok(Vec::new()),
            other => Err(Error::Config(format!(
                "{} does not accept slot {other:?}",
                self.name()
            ))),
        }
    }

    /// Where a newly admitted child goes in the child list.
    fn insertion_index(&self, _slot: &Slot, children: &[Child]) -> usize {
        children.len()
    }

    /// How a child's drawing change spreads to its siblings.
    fn child_repaint(&self) -> Repaint {
        Repaint::Subtree
    }

    /// Children draw into a buffer this widget owns, so repainting the
    /// widget itself never requires repainting them.
    fn isolates_children(&self) -> bool {
        false
    }

    /// Rewrite a keep-visible request from a child before it continues
    /// upward. Returning `None` stops the request here.
    fn intercept_grab(
        &mut self,
        grab: Grab,
        _child: NodeId,
        _cx: &mut Context<'_>,
    ) -> Result<Option<Grab>> {
        Ok(Some(grab))
    }

    /// Scroll state, for scrollable widgets.
    fn scroll_state(&self) -> Option<&ScrollState> {
        None
    }

    /// Mutable scroll state, for scrollable widgets.
    fn scroll_state_mut(&mut self) -> Option<&mut ScrollState> {
        None
    }

    /// Indicator binding, for scroll indicators.
    fn indicator(&self) -> Option<&Indicator> {
        None
    }

    /// Mutable indicator binding, for scroll indicators.
    fn indicator_mut(&mut self) -> Option<&mut Indicator> {
        None
    }

    /// Name used in diagnostics and tree dumps.
    fn name(&self) -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}

/// Downcast a widget reference to its concrete type.
pub(crate) fn downcast_ref<W: Widget>(w: &dyn Widget) -> Option<&W> {
    let any = w as &dyn Any;
    any.downcast_ref::<W>()
}

/// Downcast a mutable widget reference to its concrete type.
pub(crate) fn downcast_mut<W: Widget>(w: &mut dyn Widget) -> Option<&mut W> {
    let any = w as &mut dyn Any;
    any.downcast_mut::<W>()
}
