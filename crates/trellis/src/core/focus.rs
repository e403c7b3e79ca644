use tracing::{debug, trace};

use crate::{
    core::{
        context::Context,
        id::NodeId,
        tree::{Grab, Tree},
    },
    error::{Error, Result},
    event::Event,
    widget::EventOutcome,
};

impl Tree {
    /// Deliver an event to a node.
    pub fn event(&mut self, id: impl Into<NodeId>, event: &Event) -> Result<EventOutcome> {
        let id = id.into();
        self.with_widget_mut(id, |w, tree| w.on_event(event, &mut Context::new(tree, id)))?
    }

    /// The composite default for events: focus notifications update the
    /// focus record, the cycling keys move focus, and everything else goes
    /// to the focused child.
    pub(crate) fn route_event(&mut self, id: NodeId, event: &Event) -> Result<EventOutcome> {
        match event {
            Event::Focus(false) => {
                self.refocus(id, None)?;
                Ok(EventOutcome::Handle)
            }
            Event::Focus(true) => Ok(EventOutcome::Handle),
            e if e.is_tab() => Ok(self.focus_children(id, false)?.into()),
            e if e.is_backtab() => Ok(self.focus_children(id, true)?.into()),
            _ => match self.get(id)?.focused {
                Some(child) => self.event(child, event),
                None => Ok(EventOutcome::Ignore),
            },
        }
    }

    /// Advance focus within a node's subtree. Returns true if focus landed
    /// somewhere inside it, false when the subtree is exhausted.
    pub fn focus(&mut self, id: impl Into<NodeId>, reverse: bool) -> Result<bool> {
        let id = id.into();
        self.with_widget_mut(id, |w, tree| w.focus(reverse, &mut Context::new(tree, id)))?
    }

    /// The composite default for focus: resume at the focused child (or the
    /// first, or last when reversing), and offer focus to each child in turn
    /// until one accepts.
    pub(crate) fn focus_children(&mut self, id: NodeId, reverse: bool) -> Result<bool> {
        let children = self.children(id);
        if children.is_empty() {
            return Ok(false);
        }
        let current = self
            .get(id)?
            .focused
            .and_then(|f| children.iter().position(|c| *c == f));
        let start = current.unwrap_or(if reverse { children.len() - 1 } else { 0 });

        let order: Box<dyn Iterator<Item = usize>> = if reverse {
            Box::new((0..=start).rev())
        } else {
            Box::new(start..children.len())
        };
        for idx in order {
            let child = children[idx];
            if self.focus(child, reverse)? {
                self.refocus(id, Some(child))?;
                return Ok(true);
            }
        }
        self.refocus(id, None)?;
        Ok(false)
    }

    /// Switch a node's focus record, telling the old child it lost focus and
    /// the new child it gained it.
    pub(crate) fn refocus(&mut self, id: NodeId, new: Option<NodeId>) -> Result<()> {
        let old = self.get(id)?.focused;
        if old == new {
            return Ok(());
        }
        if let Some(o) = old
            && self.contains(o)
        {
            self.event(o, &Event::Focus(false))?;
        }
        self.get_mut(id)?.focused = new;
        if let Some(n) = new {
            debug!(parent = ?id, child = ?n, "focus");
            self.event(n, &Event::Focus(true))?;
        }
        Ok(())
    }

    /// The focus path from `id` down, following focus records.
    pub fn focus_path_from(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut cur = id;
        while let Some(next) = self.nodes.get(cur).and_then(|n| n.focused) {
            path.push(next);
            cur = next;
        }
        path
    }

    /// The deepest node on the focus path from the root, or `None` if the
    /// root has no focused child.
    pub fn focused_leaf(&self) -> Option<NodeId> {
        let path = self.focus_path_from(self.root?);
        if path.len() > 1 { path.last().copied() } else { None }
    }

    /// Ask that a rectangle of a node stay visible. The grab is given in the
    /// node's own coordinates and stored, then bubbles up through every
    /// ancestor, each of which may rewrite it. An exclusive grab that reaches
    /// the root places the terminal cursor. `None` releases the node's grab.
    pub fn grab_input(&mut self, id: impl Into<NodeId>, grab: Option<Grab>) -> Result<()> {
        let id = id.into();
        let node = self.get_mut(id)?;
        node.grab = grab;
        let origin = node.position;
        match grab {
            Some(g) => {
                let g = g.shift(i64::from(origin.x), i64::from(origin.y));
                self.bubble_grab(id, id, g)
            }
            None => {
                if self.cursor_owner == Some(id) {
                    self.cursor = None;
                    self.cursor_owner = None;
                }
                Ok(())
            }
        }
    }

    /// Carry a grab, in surface coordinates, from `from` to the root.
    fn bubble_grab(&mut self, owner: NodeId, from: NodeId, grab: Grab) -> Result<()> {
        let mut grab = grab;
        let mut cur = from;
        loop {
            match self.parent(cur) {
                Some(p) => {
                    let next = self.with_widget_mut(p, |w, tree| {
                        w.intercept_grab(grab, cur, &mut Context::new(tree, p))
                    });
                    match next {
                        Ok(r) => match r? {
                            Some(g) => grab = g,
                            None => return Ok(()),
                        },
                        // An ancestor mid-call cannot rewrite; pass through.
                        Err(Error::WidgetBusy(_)) => {
                            trace!(node = ?p, "grab passes busy ancestor");
                        }
                        Err(e) => return Err(e),
                    }
                    cur = p;
                }
                None => {
                    if self.root == Some(cur) && grab.exclusive {
                        self.cursor = grab.cursor;
                        self.cursor_owner = Some(owner);
                    }
                    return Ok(());
                }
            }
        }
    }

    /// Re-issue the focused leaf's stored grab, so that it reflects the
    /// current layout.
    pub fn regrab_focus(&mut self) -> Result<()> {
        let Some(leaf) = self.focused_leaf() else {
            return Ok(());
        };
        match self.get(leaf)?.grab {
            Some(g) => self.grab_input(leaf, Some(g)),
            None => Ok(()),
        }
    }
}
