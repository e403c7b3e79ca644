//! Per-call views onto the tree, handed to widget methods.
//!
//! Each phase gets its own context type so that a widget can only do what
//! the phase allows: size queries are read-only, layout may place children,
//! drawing owns a surface, and event handling may mutate the tree freely.

use crate::{
    core::{
        id::NodeId,
        render::Surface,
        scroll::{Scroll, ScrollState},
        tree::{Grab, Invalidate, Tree},
    },
    error::{Error, Result},
    event::Event,
    geom::{Expanse, Point, Rect},
    layout::Child,
    widget::{self, EventOutcome, Widget},
};

/// Read-only context for size queries.
pub struct SizeCx<'a> {
    /// The tree.
    tree: &'a Tree,
    /// The node being sized.
    id: NodeId,
}

impl<'a> SizeCx<'a> {
    /// Construct a size context for a node.
    pub(crate) fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The node being sized.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Child ids, in order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.child_slots().iter().map(|c| c.id)
    }

    /// Child records, with their slots.
    pub fn child_slots(&self) -> &[Child] {
        self.tree
            .node(self.id)
            .map(|n| n.children())
            .unwrap_or_default()
    }

    /// A child's minimum size.
    pub fn min_size(&self, child: NodeId) -> Expanse {
        self.tree.min_size(child)
    }

    /// A child's preferred size.
    pub fn pref_size(&self, child: NodeId) -> Expanse {
        self.tree.pref_size(child)
    }
}

/// Context for placing children during layout.
pub struct LayoutCx<'a> {
    /// The tree.
    tree: &'a mut Tree,
    /// The node being laid out.
    id: NodeId,
}

impl<'a> LayoutCx<'a> {
    /// Construct a layout context for a node.
    pub(crate) fn new(tree: &'a mut Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The node being laid out.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's assigned rectangle.
    pub fn rect(&self) -> Rect {
        self.tree.node(self.id).map(|n| n.rect()).unwrap_or_default()
    }

    /// The node's assigned size.
    pub fn size(&self) -> Expanse {
        self.rect().expanse()
    }

    /// Child ids, in order.
    pub fn child_ids(&self) -> Vec<NodeId> {
        self.tree.children(self.id)
    }

    /// Child records, with their slots.
    pub fn child_slots(&self) -> Vec<Child> {
        self.tree
            .node(self.id)
            .map(|n| n.children().to_vec())
            .unwrap_or_default()
    }

    /// A child's minimum size.
    pub fn min_size(&self, child: NodeId) -> Expanse {
        self.tree.min_size(child)
    }

    /// A child's preferred size.
    pub fn pref_size(&self, child: NodeId) -> Expanse {
        self.tree.pref_size(child)
    }

    /// Place a direct child.
    pub fn assign(&mut self, child: NodeId, position: Point, size: Expanse) -> Result<()> {
        if self.tree.parent(child) != Some(self.id) {
            return Err(Error::Invariant(format!(
                "{child:?} is not a child of {:?}",
                self.id
            )));
        }
        self.tree.assign(child, position, size)
    }

    /// Force a child subtree to repaint in full.
    pub fn invalidate_child(&mut self, child: NodeId) -> Result<()> {
        self.tree.invalidate(child, Invalidate::Recursive)
    }

    /// Repaint the indicators bound to a scroll state.
    pub fn refresh_indicators(&mut self, state: &ScrollState) -> Result<()> {
        self.tree.refresh_indicators(state)
    }
}

/// Context for painting.
pub struct DrawCx<'a> {
    /// The tree.
    tree: &'a mut Tree,
    /// The node being drawn.
    id: NodeId,
    /// The target surface.
    surface: &'a mut dyn Surface,
}

impl<'a> DrawCx<'a> {
    /// Construct a draw context for a node.
    pub(crate) fn new(tree: &'a mut Tree, id: NodeId, surface: &'a mut dyn Surface) -> Self {
        Self { tree, id, surface }
    }

    /// The node being drawn.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's rectangle, in surface coordinates.
    pub fn rect(&self) -> Rect {
        self.tree.node(self.id).map(|n| n.rect()).unwrap_or_default()
    }

    /// The target surface.
    pub fn surface(&mut self) -> &mut dyn Surface {
        self.surface
    }

    /// Child ids, in order.
    pub fn child_ids(&self) -> Vec<NodeId> {
        self.tree.children(self.id)
    }

    /// Is this node on the focus path?
    pub fn is_focused(&self) -> bool {
        let Some(root) = self.tree.root() else {
            return false;
        };
        self.tree.focus_path_from(root).contains(&self.id)
    }

    /// Draw every child, in child order.
    pub fn draw_children(&mut self) -> Result<()> {
        for c in self.child_ids() {
            self.draw_child(c)?;
        }
        Ok(())
    }

    /// Draw one child onto this node's surface.
    pub fn draw_child(&mut self, child: NodeId) -> Result<()> {
        self.tree.draw(child, &mut *self.surface)
    }

    /// Draw one child onto another surface, such as an off-screen buffer.
    pub fn draw_child_into(&mut self, child: NodeId, surface: &mut dyn Surface) -> Result<()> {
        self.tree.draw(child, surface)
    }

    /// Force a child subtree to repaint in full, as when its target surface
    /// was replaced.
    pub fn invalidate_child(&mut self, child: NodeId) -> Result<()> {
        self.tree.invalidate(child, Invalidate::Recursive)
    }

    /// Read another node's scroll state.
    pub fn scroll_state_of(&self, node: NodeId) -> Option<ScrollState> {
        self.tree.scroll_state(node).cloned()
    }
}

/// Context for event handling and other mutation of the tree on behalf of a
/// node.
pub struct Context<'a> {
    /// The tree.
    tree: &'a mut Tree,
    /// The node the call is for.
    id: NodeId,
}

impl<'a> Context<'a> {
    /// Construct a context for a node.
    pub(crate) fn new(tree: &'a mut Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The node the call is for.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree.
    pub fn tree(&self) -> &Tree {
        self.tree
    }

    /// The tree, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        self.tree
    }

    /// The node's assigned rectangle.
    pub fn rect(&self) -> Rect {
        self.tree.node(self.id).map(|n| n.rect()).unwrap_or_default()
    }

    /// The node's assigned size.
    pub fn size(&self) -> Expanse {
        self.rect().expanse()
    }

    /// Child ids, in order.
    pub fn children(&self) -> Vec<NodeId> {
        self.tree.children(self.id)
    }

    /// The focused child.
    pub fn focused_child(&self) -> Option<NodeId> {
        self.tree.node(self.id).and_then(|n| n.focused())
    }

    /// Repaint this node's own drawing.
    pub fn invalidate(&mut self) -> Result<()> {
        self.tree.invalidate(self.id, Invalidate::Own)
    }

    /// Repaint this node and its subtree.
    pub fn invalidate_recursive(&mut self) -> Result<()> {
        self.tree.invalidate(self.id, Invalidate::Recursive)
    }

    /// Re-measure and re-place this node.
    pub fn invalidate_layout(&mut self) -> Result<()> {
        self.tree.invalidate_layout(self.id)
    }

    /// The composite default for focus.
    pub fn focus_children(&mut self, reverse: bool) -> Result<bool> {
        self.tree.focus_children(self.id, reverse)
    }

    /// Point this node's focus record at a child, or clear it.
    pub fn refocus(&mut self, child: Option<NodeId>) -> Result<()> {
        self.tree.refocus(self.id, child)
    }

    /// The composite default for events.
    pub fn route_event(&mut self, event: &Event) -> Result<EventOutcome> {
        self.tree.route_event(self.id, event)
    }

    /// Deliver an event to another node.
    pub fn event(&mut self, node: NodeId, event: &Event) -> Result<EventOutcome> {
        self.tree.event(node, event)
    }

    /// Ask that a rectangle of this node, in its own coordinates, stay
    /// visible. An exclusive grab also places the terminal cursor.
    pub fn grab_input(&mut self, rect: Rect, cursor: Option<Point>, exclusive: bool) -> Result<()> {
        self.tree
            .grab_input(self.id, Some(Grab::new(rect, cursor, exclusive)))
    }

    /// Drop this node's keep-visible request.
    pub fn release_input(&mut self) -> Result<()> {
        self.tree.grab_input(self.id, None)
    }

    /// Scroll another node.
    pub fn scroll(&mut self, node: NodeId, amount: Scroll) -> Result<bool> {
        self.tree.scroll(node, amount)
    }

    /// Report that this node's own scroll state changed.
    pub fn scrolled(&mut self, state: &ScrollState) -> Result<()> {
        self.tree.scrolled(self.id, state)
    }

    /// Ask the run loop to stop.
    pub fn request_exit(&mut self, code: i32) {
        self.tree.request_exit(code);
    }

    /// Run a closure against another widget as its concrete type.
    pub fn with_widget<W: Widget, R>(
        &mut self,
        node: impl Into<NodeId>,
        f: impl FnOnce(&mut W, &mut Context<'_>) -> R,
    ) -> Result<R> {
        self.tree.with_widget(node, f)
    }

    /// Borrow another widget as its concrete type.
    pub fn widget<W: Widget>(&self, node: impl Into<NodeId>) -> Option<&W> {
        let node = node.into();
        self.tree
            .node(node)
            .and_then(|n| n.widget.as_deref())
            .and_then(widget::downcast_ref::<W>)
    }
}
