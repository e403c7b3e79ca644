use std::fmt;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::{
    core::{
        context::{DrawCx, LayoutCx, SizeCx},
        id::{NodeId, TypedId},
        node::Node,
        render::Surface,
    },
    error::{Error, Result},
    event::Event,
    geom::{Expanse, Point, Rect},
    layout::{Child, Slot},
    widget::{self, Repaint, Widget},
};

/// How far a redraw request reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidate {
    /// The node and its entire subtree repaint.
    Recursive,
    /// The node's own drawing is stale.
    Own,
    /// A direct child's drawing is stale; only the display flag is cleared,
    /// plus whatever siblings the policy says overlap the child.
    Child(NodeId),
}

/// A request to keep a rectangle visible, and optionally to own the terminal
/// cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grab {
    /// The rectangle to keep visible.
    pub rect: Rect,
    /// Where the terminal cursor should sit.
    pub cursor: Option<Point>,
    /// Whether this request claims the terminal cursor.
    pub exclusive: bool,
}

impl Grab {
    /// Construct a grab.
    pub fn new(rect: Rect, cursor: Option<Point>, exclusive: bool) -> Self {
        Self {
            rect,
            cursor,
            exclusive,
        }
    }

    /// Translate both the rectangle and the cursor.
    pub fn shift(&self, x: i64, y: i64) -> Self {
        Self {
            rect: self.rect.shift(x, y),
            cursor: self.cursor.map(|c| c.scroll(x, y)),
            exclusive: self.exclusive,
        }
    }
}

/// The node arena and the engine that lays out, paints and routes through it.
///
/// The tree owns every node. Parent links are plain ids; children are owned
/// through their parent's child records. A single node may be installed as
/// the root, which the [`Root`](crate::Root) driver binds to the terminal.
pub struct Tree {
    /// Node storage.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// The node bound to the screen.
    pub(crate) root: Option<NodeId>,
    /// The root needs a fresh layout pass.
    pub(crate) root_layout_valid: bool,
    /// The screen needs repainting.
    pub(crate) root_display_valid: bool,
    /// Terminal cursor location, claimed by an exclusive grab.
    pub(crate) cursor: Option<Point>,
    /// The node whose grab placed the cursor.
    pub(crate) cursor_owner: Option<NodeId>,
    /// Exit code requested by a widget.
    pub(crate) exit: Option<i32>,
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .finish()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            root_layout_valid: false,
            root_display_valid: false,
            cursor: None,
            cursor_owner: None,
            exit: None,
        }
    }

    /// Look up a node.
    pub fn node(&self, id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(id.into())
    }

    /// Look up a node, failing if it is missing.
    pub(crate) fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Look up a node mutably, failing if it is missing.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Does the node exist?
    pub fn contains(&self, id: impl Into<NodeId>) -> bool {
        self.nodes.contains_key(id.into())
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the tree empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node bound to the screen.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The terminal cursor location, if an exclusive grab claimed it.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Does the root need a layout pass?
    pub fn needs_layout(&self) -> bool {
        !self.root_layout_valid
    }

    /// Does the screen need repainting?
    pub fn needs_redraw(&self) -> bool {
        !self.root_display_valid
    }

    /// Ask the run loop to stop with the given code.
    pub fn request_exit(&mut self, code: i32) {
        self.exit = Some(code);
    }

    /// Take a pending exit request.
    pub fn take_exit(&mut self) -> Option<i32> {
        self.exit.take()
    }

    /// Every live node, in no particular order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().collect()
    }

    /// The ids of a node's children, in order.
    pub fn children(&self, id: impl Into<NodeId>) -> Vec<NodeId> {
        self.nodes
            .get(id.into())
            .map(|n| n.children.iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }

    /// A node's parent.
    pub fn parent(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        self.nodes.get(id.into()).and_then(|n| n.parent)
    }

    /// Is `ancestor` on the path from `id` to the top of its tree? A node
    /// counts as its own ancestor.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    /// Create a detached node.
    pub fn create<W: Widget>(&mut self, widget: W) -> TypedId<W> {
        TypedId::new(self.create_boxed(Box::new(widget)))
    }

    /// Create a detached node from a boxed widget.
    pub fn create_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        let id = self.nodes.insert(Node::new(widget));
        trace!(node = ?id, "create");
        id
    }

    /// Create a node and insert it into `parent`.
    pub fn add<W: Widget>(
        &mut self,
        parent: impl Into<NodeId>,
        widget: W,
        slot: impl Into<Slot>,
    ) -> Result<TypedId<W>> {
        let id = self.create(widget);
        self.insert(parent, id, slot)?;
        Ok(id)
    }

    /// Bind a node to the screen, displacing any previous root.
    pub fn set_root(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        self.get(id)?;
        self.detach(id)?;
        if let Some(old) = self.root.take() {
            self.detach_focus_of(old)?;
        }
        self.root = Some(id);
        self.invalidate_layout(id)?;
        self.invalidate(id, Invalidate::Recursive)?;
        Ok(())
    }

    /// Insert `child` into `parent` with the given slot. The child is first
    /// removed from any previous owner; the parent's policy may evict
    /// existing children that conflict with the slot.
    pub fn insert(
        &mut self,
        parent: impl Into<NodeId>,
        child: impl Into<NodeId>,
        slot: impl Into<Slot>,
    ) -> Result<()> {
        let (parent, child, slot) = (parent.into(), child.into(), slot.into());
        self.get(parent)?;
        self.get(child)?;
        if self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }

        let evicted = {
            let pnode = self.get(parent)?;
            let w = pnode.widget.as_deref().ok_or(Error::WidgetBusy(parent))?;
            w.admit(&slot, &pnode.children)?
        };
        self.detach(child)?;
        for e in evicted {
            debug!(parent = ?parent, evicted = ?e, "evict");
            self.detach(e)?;
        }

        let pnode = self.get(parent)?;
        let w = pnode.widget.as_deref().ok_or(Error::WidgetBusy(parent))?;
        let idx = w.insertion_index(&slot, &pnode.children);
        let pnode = self.get_mut(parent)?;
        let idx = idx.min(pnode.children.len());
        pnode.children.insert(idx, Child { id: child, slot });
        self.get_mut(child)?.parent = Some(parent);
        trace!(parent = ?parent, child = ?child, idx, "insert");

        self.invalidate_layout(parent)?;
        self.invalidate(child, Invalidate::Recursive)?;
        Ok(())
    }

    /// Replace the slot of an attached child, re-applying the parent's
    /// admission and ordering rules.
    pub fn set_slot(&mut self, child: impl Into<NodeId>, slot: impl Into<Slot>) -> Result<()> {
        let (child, slot) = (child.into(), slot.into());
        let parent = self
            .parent(child)
            .ok_or_else(|| Error::Invariant(format!("{child:?} has no parent")))?;
        let evicted = {
            let pnode = self.get(parent)?;
            let others: Vec<Child> = pnode
                .children
                .iter()
                .filter(|c| c.id != child)
                .cloned()
                .collect();
            let w = pnode.widget.as_deref().ok_or(Error::WidgetBusy(parent))?;
            w.admit(&slot, &others)?
        };
        for e in evicted.into_iter().filter(|e| *e != child) {
            self.detach(e)?;
        }
        let pnode = self.get_mut(parent)?;
        pnode.children.retain(|c| c.id != child);
        let pnode = self.get(parent)?;
        let w = pnode.widget.as_deref().ok_or(Error::WidgetBusy(parent))?;
        let idx = w.insertion_index(&slot, &pnode.children);
        let pnode = self.get_mut(parent)?;
        let idx = idx.min(pnode.children.len());
        pnode.children.insert(idx, Child { id: child, slot });

        self.invalidate_layout(parent)?;
        self.invalidate(parent, Invalidate::Recursive)
    }

    /// Remove a node from its parent (or from the root binding). The node and
    /// its subtree stay alive, and any focus held on it is dropped.
    pub fn detach(&mut self, child: impl Into<NodeId>) -> Result<()> {
        let child = child.into();
        let parent = self.get(child)?.parent;
        match parent {
            Some(p) => {
                if self.get(p)?.focused == Some(child) {
                    self.detach_focus_of(child)?;
                    self.get_mut(p)?.focused = None;
                }
                self.get_mut(p)?.children.retain(|c| c.id != child);
                self.get_mut(child)?.parent = None;
                trace!(parent = ?p, child = ?child, "detach");
                self.invalidate_layout(p)?;
                self.invalidate(p, Invalidate::Recursive)?;
            }
            None if self.root == Some(child) => {
                self.detach_focus_of(child)?;
                self.root = None;
                self.cursor = None;
                self.cursor_owner = None;
                self.root_layout_valid = false;
                self.root_display_valid = false;
            }
            None => {}
        }
        Ok(())
    }

    /// Tell a subtree that focus has left it. A widget that is detaching
    /// itself is busy and cannot be told.
    fn detach_focus_of(&mut self, id: NodeId) -> Result<()> {
        match self.event(id, &Event::Focus(false)) {
            Ok(_) | Err(Error::WidgetBusy(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Destroy a node and its entire subtree.
    pub fn remove(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        self.detach(id)?;
        let mut stack = vec![id];
        let mut doomed = Vec::new();
        while let Some(n) = stack.pop() {
            doomed.push(n);
            stack.extend(self.children(n));
        }
        for n in &doomed {
            self.unbind_all(*n)?;
        }
        for n in doomed {
            self.nodes.remove(n);
        }
        debug!(node = ?id, "remove");
        Ok(())
    }

    /// Destroy every child of a node.
    pub fn clear(&mut self, parent: impl Into<NodeId>) -> Result<()> {
        for c in self.children(parent) {
            self.remove(c)?;
        }
        Ok(())
    }

    /// Take a mutable reference to a widget for a single call. The widget is
    /// moved out of its slot for the duration, so the callback may freely
    /// mutate the rest of the tree.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let mut w = self
            .get_mut(id)?
            .widget
            .take()
            .ok_or(Error::WidgetBusy(id))?;
        let r = f(w.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(w);
        }
        Ok(r)
    }

    /// Borrow a widget immutably, if it is not currently in use.
    pub(crate) fn widget_dyn(&self, id: NodeId) -> Option<&dyn Widget> {
        self.nodes.get(id).and_then(|n| n.widget.as_deref())
    }

    /// Borrow a widget as its concrete type.
    pub fn widget<W: Widget>(&self, id: impl Into<NodeId>) -> Result<&W> {
        let id = id.into();
        let w = self
            .get(id)?
            .widget
            .as_deref()
            .ok_or(Error::WidgetBusy(id))?;
        widget::downcast_ref::<W>(w).ok_or(Error::WidgetType(id))
    }

    /// Run a closure against a widget as its concrete type, with a context
    /// for the node.
    pub fn with_widget<W: Widget, R>(
        &mut self,
        id: impl Into<NodeId>,
        f: impl FnOnce(&mut W, &mut crate::Context<'_>) -> R,
    ) -> Result<R> {
        let id = id.into();
        self.with_widget_mut(id, |w, tree| {
            let w = widget::downcast_mut::<W>(w).ok_or(Error::WidgetType(id))?;
            let mut cx = crate::Context::new(tree, id);
            Ok(f(w, &mut cx))
        })?
    }

    /// Set a floor on a node's reported sizes.
    pub fn set_custom_min_size(&mut self, id: impl Into<NodeId>, size: Expanse) -> Result<()> {
        let id = id.into();
        self.get_mut(id)?.custom_min_size = size;
        self.invalidate_layout(id)
    }

    /// A node's minimum size: what the widget reports, raised to the custom
    /// minimum. Memoized until the next layout invalidation.
    pub fn min_size(&self, id: impl Into<NodeId>) -> Expanse {
        let id = id.into();
        let Some(node) = self.nodes.get(id) else {
            return Expanse::zero();
        };
        if let Some(v) = node.min_size.get() {
            return v;
        }
        let Some(w) = node.widget.as_deref() else {
            return node.custom_min_size;
        };
        let v = w
            .min_size(&SizeCx::new(self, id))
            .max(node.custom_min_size);
        node.min_size.set(Some(v));
        v
    }

    /// A node's preferred size, never below its minimum. Memoized with the
    /// minimum.
    pub fn pref_size(&self, id: impl Into<NodeId>) -> Expanse {
        let id = id.into();
        let Some(node) = self.nodes.get(id) else {
            return Expanse::zero();
        };
        if let Some(v) = node.pref_size.get() {
            return v;
        }
        let min = self.min_size(id);
        let Some(w) = node.widget.as_deref() else {
            return min;
        };
        let v = w.pref_size(&SizeCx::new(self, id)).max(min);
        node.pref_size.set(Some(v));
        v
    }

    /// Give a node its position and size. A change marks the node's layout
    /// stale and its whole subtree for repaint.
    pub fn assign(&mut self, id: impl Into<NodeId>, position: Point, size: Expanse) -> Result<()> {
        let id = id.into();
        let node = self.get_mut(id)?;
        if node.position == position && node.size == size {
            return Ok(());
        }
        trace!(node = ?id, ?position, ?size, "assign");
        node.position = position;
        node.size = size;
        node.layout_valid = false;
        self.invalidate(id, Invalidate::Recursive)
    }

    /// Lay out a node whose rectangle has been assigned: run its policy when
    /// stale, then recurse into children. If the policy moved any child, the
    /// node's own decoration is repainted too.
    pub fn layout(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        if self.get(id)?.layout_valid {
            return Ok(());
        }
        let before: Vec<Rect> = self.child_rects(id);
        trace!(node = ?id, name = self.get(id)?.name, "relayout");
        self.with_widget_mut(id, |w, tree| w.relayout(&mut LayoutCx::new(tree, id)))??;
        let moved = before != self.child_rects(id);
        for child in self.children(id) {
            self.layout(child)?;
        }
        self.get_mut(id)?.layout_valid = true;
        if moved {
            self.invalidate(id, Invalidate::Own)?;
        }
        Ok(())
    }

    /// The rectangles of a node's children.
    fn child_rects(&self, id: NodeId) -> Vec<Rect> {
        self.children(id)
            .into_iter()
            .filter_map(|c| self.nodes.get(c).map(Node::rect))
            .collect()
    }

    /// Paint a node onto a surface.
    ///
    /// A node with a valid display is skipped entirely. Otherwise its own
    /// decoration is painted if stale, which also forces its children to
    /// repaint over it unless the widget isolates them, and then its
    /// children are drawn in the policy's order.
    pub fn draw(&mut self, id: impl Into<NodeId>, surface: &mut dyn Surface) -> Result<()> {
        let id = id.into();
        let node = self.get(id)?;
        if node.display_valid {
            return Ok(());
        }
        let own = !node.self_valid;
        self.with_widget_mut(id, |w, tree| -> Result<()> {
            if own {
                w.draw(&mut DrawCx::new(tree, id, surface))?;
                if !w.isolates_children() {
                    for c in tree.children(id) {
                        tree.invalidate(c, Invalidate::Recursive)?;
                    }
                }
            }
            w.draw_children(&mut DrawCx::new(tree, id, surface))
        })??;
        let node = self.get_mut(id)?;
        node.self_valid = true;
        node.display_valid = true;
        Ok(())
    }

    /// Mark drawing stale. Bubbling towards the root stops at the first
    /// ancestor that is already dirty.
    pub fn invalidate(&mut self, id: impl Into<NodeId>, mode: Invalidate) -> Result<()> {
        let id = id.into();
        self.get(id)?;
        match mode {
            Invalidate::Recursive => self.invalidate_recursive(id),
            Invalidate::Own => {
                let node = self.get_mut(id)?;
                node.self_valid = false;
                if node.display_valid {
                    node.display_valid = false;
                    self.bubble(id);
                }
            }
            Invalidate::Child(child) => self.invalidate_from_child(id, child),
        }
        Ok(())
    }

    /// Invalidate a whole subtree, bubbling once from its top.
    fn invalidate_recursive(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let was_clean = node.display_valid;
        node.self_valid = false;
        node.display_valid = false;
        let isolated = self.widget_dyn(id).is_some_and(|w| w.isolates_children());
        if !isolated {
            let mut stack = self.children(id);
            while let Some(c) = stack.pop() {
                if let Some(n) = self.nodes.get_mut(c) {
                    n.self_valid = false;
                    n.display_valid = false;
                }
                if !self.widget_dyn(c).is_some_and(|w| w.isolates_children()) {
                    stack.extend(self.children(c));
                }
            }
        }
        if was_clean {
            self.bubble(id);
        }
    }

    /// Notify the parent of `id` that its display went stale.
    fn bubble(&mut self, id: NodeId) {
        match self.parent(id) {
            Some(p) => self.invalidate_from_child(p, id),
            None if self.root == Some(id) => self.root_display_valid = false,
            None => {}
        }
    }

    /// Handle a child's display going stale.
    fn invalidate_from_child(&mut self, id: NodeId, child: NodeId) {
        let repaint = self
            .widget_dyn(id)
            .map_or(Repaint::Subtree, |w| w.child_repaint());
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let was_clean = node.display_valid;
        node.display_valid = false;
        if repaint == Repaint::Following {
            let later: Vec<NodeId> = node
                .children
                .iter()
                .skip_while(|c| c.id != child)
                .skip(1)
                .map(|c| c.id)
                .collect();
            for s in later {
                self.invalidate_recursive(s);
            }
        }
        if was_clean {
            self.bubble(id);
        }
    }

    /// Mark layout stale: drop memoized sizes here and throughout the
    /// subtree, and up the ancestor chain until an ancestor that is already
    /// stale.
    pub fn invalidate_layout(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        let node = self.get_mut(id)?;
        let was_clean = node.layout_valid || node.has_size_cache();
        node.layout_valid = false;
        node.clear_size_cache();

        let mut stack = self.children(id);
        while let Some(c) = stack.pop() {
            if let Some(n) = self.nodes.get_mut(c) {
                n.layout_valid = false;
                n.clear_size_cache();
            }
            stack.extend(self.children(c));
        }

        if was_clean {
            let mut cur = id;
            loop {
                match self.parent(cur) {
                    Some(p) => {
                        let Some(pn) = self.nodes.get_mut(p) else {
                            break;
                        };
                        let clean = pn.layout_valid || pn.has_size_cache();
                        pn.layout_valid = false;
                        pn.clear_size_cache();
                        if !clean {
                            break;
                        }
                        cur = p;
                    }
                    None => {
                        if self.root == Some(cur) {
                            self.root_layout_valid = false;
                        }
                        break;
                    }
                }
            }
        }
        if self.root == Some(id) {
            self.root_layout_valid = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::termbuf::TermBuf, layout::StackContainer, widgets::Spacer};

    /// A parent with three spacer children.
    fn family(tree: &mut Tree) -> Result<(NodeId, Vec<NodeId>)> {
        let p = tree.create(StackContainer::new()).id();
        let mut kids = Vec::new();
        for _ in 0..3 {
            kids.push(tree.add(p, Spacer::new(Expanse::new(1, 1)), Slot::Plain)?.id());
        }
        Ok((p, kids))
    }

    #[test]
    fn insert_moves_between_parents() -> Result<()> {
        let mut tree = Tree::new();
        let (a, kids) = family(&mut tree)?;
        let b = tree.create(StackContainer::new()).id();
        tree.insert(b, kids[1], Slot::Plain)?;
        assert_eq!(tree.children(a), vec![kids[0], kids[2]]);
        assert_eq!(tree.children(b), vec![kids[1]]);
        assert_eq!(tree.parent(kids[1]), Some(b));
        Ok(())
    }

    #[test]
    fn cycles_rejected() -> Result<()> {
        let mut tree = Tree::new();
        let (a, _) = family(&mut tree)?;
        let b = tree.add(a, StackContainer::new(), Slot::Plain)?;
        assert!(matches!(
            tree.insert(b, a, Slot::Plain),
            Err(Error::WouldCreateCycle { .. })
        ));
        assert!(matches!(
            tree.insert(a, a, Slot::Plain),
            Err(Error::WouldCreateCycle { .. })
        ));
        Ok(())
    }

    #[test]
    fn remove_frees_subtree() -> Result<()> {
        let mut tree = Tree::new();
        let (a, kids) = family(&mut tree)?;
        let outer = tree.create(StackContainer::new());
        tree.insert(outer, a, Slot::Plain)?;
        tree.remove(a)?;
        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(kids[0]));
        assert!(tree.children(outer).is_empty());
        Ok(())
    }

    #[test]
    fn size_cache() -> Result<()> {
        let mut tree = Tree::new();
        let (p, kids) = family(&mut tree)?;
        assert_eq!(tree.pref_size(p), Expanse::new(1, 1));
        tree.set_custom_min_size(kids[2], Expanse::new(4, 2))?;
        assert_eq!(tree.min_size(p), Expanse::new(4, 2));
        assert_eq!(tree.pref_size(p), Expanse::new(4, 2));
        Ok(())
    }

    #[test]
    fn invalidation_stops_at_dirty_ancestor() -> Result<()> {
        let mut tree = Tree::new();
        let (p, kids) = family(&mut tree)?;
        tree.set_root(p)?;
        tree.assign(p, Point::zero(), Expanse::new(4, 4))?;
        tree.layout(p)?;
        let mut buf = TermBuf::blank((4, 4));
        tree.draw(p, &mut buf)?;
        tree.root_display_valid = true;

        tree.invalidate(kids[0], Invalidate::Own)?;
        assert!(!tree.get(p)?.display_valid);
        assert!(tree.get(p)?.self_valid);
        assert!(tree.needs_redraw());

        // A second request finds the parent already dirty and changes nothing.
        tree.root_display_valid = true;
        tree.invalidate(kids[0], Invalidate::Own)?;
        assert!(!tree.needs_redraw());
        Ok(())
    }

    #[test]
    fn layout_invalidation_spans_chain_and_subtree() -> Result<()> {
        let mut tree = Tree::new();
        let top = tree.create(StackContainer::new()).id();
        let mid = tree.add(top, StackContainer::new(), Slot::Plain)?.id();
        let (p, kids) = family(&mut tree)?;
        tree.insert(mid, p, Slot::Plain)?;
        tree.set_root(top)?;
        tree.assign(top, Point::zero(), Expanse::new(4, 4))?;
        tree.layout(top)?;
        tree.root_layout_valid = true;

        tree.invalidate_layout(p)?;
        for id in [top, mid, p, kids[0], kids[2]] {
            assert!(!tree.get(id)?.layout_valid, "{id:?}");
        }
        assert!(tree.needs_layout());
        Ok(())
    }
}

