use std::cell::Cell;

use crate::{
    core::{id::NodeId, tree::Grab},
    geom::{Expanse, Point, Rect},
    layout::{Child, Slot},
    widget::Widget,
};

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Empty while the widget is being called.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Widget name, captured at creation for diagnostics.
    pub(crate) name: &'static str,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Owned children, in the order the parent's policy keeps them.
    pub(crate) children: Vec<Child>,
    /// The direct child on the focus path, if any.
    pub(crate) focused: Option<NodeId>,

    /// Position assigned by the parent, in surface coordinates.
    pub(crate) position: Point,
    /// Size assigned by the parent.
    pub(crate) size: Expanse,
    /// Floor applied to both reported sizes.
    pub(crate) custom_min_size: Expanse,
    /// Memoized minimum size.
    pub(crate) min_size: Cell<Option<Expanse>>,
    /// Memoized preferred size.
    pub(crate) pref_size: Cell<Option<Expanse>>,

    /// Children have been placed for the current size.
    pub(crate) layout_valid: bool,
    /// Nothing in this subtree needs repainting.
    pub(crate) display_valid: bool,
    /// This node's own drawing is current.
    pub(crate) self_valid: bool,

    /// The last keep-visible request, relative to the node's own origin.
    pub(crate) grab: Option<Grab>,
}

impl Node {
    /// Construct a detached node around a widget.
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        Self {
            name: widget.name(),
            widget: Some(widget),
            parent: None,
            children: Vec::new(),
            focused: None,
            position: Point::zero(),
            size: Expanse::zero(),
            custom_min_size: Expanse::zero(),
            min_size: Cell::new(None),
            pref_size: Cell::new(None),
            layout_valid: false,
            display_valid: false,
            self_valid: false,
            grab: None,
        }
    }

    /// Return the node's widget name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's child records.
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Return the slot of a direct child.
    pub fn slot_of(&self, child: NodeId) -> Option<&Slot> {
        self.children
            .iter()
            .find(|c| c.id == child)
            .map(|c| &c.slot)
    }

    /// Return the focused direct child.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Return the assigned position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Return the assigned size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Return the assigned rectangle.
    pub fn rect(&self) -> Rect {
        Rect::at(self.position, self.size)
    }

    /// Return the custom minimum size.
    pub fn custom_min_size(&self) -> Expanse {
        self.custom_min_size
    }

    /// Is the layout current?
    pub fn layout_valid(&self) -> bool {
        self.layout_valid
    }

    /// Is the whole subtree painted?
    pub fn display_valid(&self) -> bool {
        self.display_valid
    }

    /// Is this node's own drawing current?
    pub fn self_valid(&self) -> bool {
        self.self_valid
    }

    /// Drop memoized sizes.
    pub(crate) fn clear_size_cache(&self) {
        self.min_size.set(None);
        self.pref_size.set(None);
    }

    /// Are any sizes memoized?
    pub(crate) fn has_size_cache(&self) -> bool {
        self.min_size.get().is_some() || self.pref_size.get().is_some()
    }
}
