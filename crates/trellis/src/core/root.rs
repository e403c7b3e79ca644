use tracing::{debug, trace};

use crate::{
    backend::{Backend, InputSource},
    core::{
        id::NodeId,
        render::{RenderBackend, Surface},
        termbuf::TermBuf,
        tree::{Invalidate, Tree},
    },
    error::Result,
    event::{Event, Input},
    geom::{Expanse, Point},
    style::Style,
    widget::EventOutcome,
};

/// Binds a tree to a terminal and drives the make, draw and event cycle.
///
/// The root stands in the same relation to the tree's top node that a
/// container stands to its children: it assigns the whole screen, lays the
/// node out, draws it, and feeds it events, with focus cycling wrapping
/// around at the top.
#[derive(Debug)]
pub struct Root<B: Backend> {
    /// The node tree.
    tree: Tree,
    /// The terminal.
    backend: B,
    /// What the tree draws into.
    screen: TermBuf,
    /// What is currently on the terminal, if known.
    previous: Option<TermBuf>,
    /// Style for areas no widget covers.
    background: Style,
}

impl<B: Backend> Root<B> {
    /// Construct a driver around a backend, with an empty tree.
    pub fn new(backend: B) -> Self {
        Self::with_tree(backend, Tree::new())
    }

    /// Construct a driver around an existing tree.
    pub fn with_tree(backend: B, tree: Tree) -> Self {
        Self {
            tree,
            backend,
            screen: TermBuf::blank(Expanse::zero()),
            previous: None,
            background: Style::default(),
        }
    }

    /// Set the style used for uncovered screen areas.
    pub fn with_background(mut self, style: Style) -> Self {
        self.background = style;
        self
    }

    /// The node tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The node tree, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The most recently drawn screen contents.
    pub fn screen(&self) -> &TermBuf {
        &self.screen
    }

    /// Bind a node to the screen.
    pub fn set_root(&mut self, id: impl Into<NodeId>) -> Result<()> {
        self.tree.set_root(id)
    }

    /// Size the screen to the terminal, assign the top node the whole of it,
    /// and lay the tree out.
    pub fn make(&mut self) -> Result<()> {
        let size = self.backend.size()?;
        if size != self.screen.size() {
            debug!(?size, "screen resize");
            self.screen.resize(size, ' ', self.background);
            self.previous = None;
        }
        let Some(top) = self.tree.root() else {
            self.tree.root_layout_valid = true;
            return Ok(());
        };
        self.tree.assign(top, Point::zero(), size)?;
        self.tree.layout(top)?;
        self.tree.root_layout_valid = true;
        self.tree.regrab_focus()?;
        trace!("make");
        Ok(())
    }

    /// Draw whatever is stale and push the changes to the terminal.
    pub fn redraw(&mut self) -> Result<()> {
        if let Some(top) = self.tree.root() {
            if self.tree.node(top).is_some_and(|n| !n.self_valid()) {
                let bounds = self.screen.bounds();
                self.screen.fill_rect(bounds, self.background, ' ');
            }
            self.tree.draw(top, &mut self.screen)?;
        } else {
            let bounds = self.screen.bounds();
            self.screen.fill_rect(bounds, self.background, ' ');
        }
        self.tree.root_display_valid = true;

        match &self.previous {
            Some(prev) => self.screen.diff(prev, &mut self.backend)?,
            None => self.screen.render(&mut self.backend)?,
        }
        self.backend.cursor(self.tree.cursor())?;
        self.backend.flush()?;
        self.previous = Some(self.screen.clone());
        trace!("redraw");
        Ok(())
    }

    /// Make and redraw as needed.
    pub fn render(&mut self) -> Result<()> {
        if self.tree.needs_layout() {
            self.make()?;
        }
        if self.tree.needs_redraw() {
            self.redraw()?;
        }
        Ok(())
    }

    /// Deliver an event to the top node. The focus cycling keys are handled
    /// here so that focus wraps around.
    pub fn event(&mut self, event: &Event) -> Result<EventOutcome> {
        let Some(top) = self.tree.root() else {
            return Ok(EventOutcome::Ignore);
        };
        let outcome = if event.is_tab() {
            self.focus(false)?.into()
        } else if event.is_backtab() {
            self.focus(true)?.into()
        } else {
            self.tree.event(top, event)?
        };
        self.tree.regrab_focus()?;
        Ok(outcome)
    }

    /// Advance focus through the whole tree, wrapping from the last
    /// focusable node back to the first.
    pub fn focus(&mut self, reverse: bool) -> Result<bool> {
        let Some(top) = self.tree.root() else {
            return Ok(false);
        };
        if self.tree.focus(top, reverse)? {
            return Ok(true);
        }
        // The first pass exhausted the tree and cleared its focus, so a
        // second starts over from the other end.
        self.tree.focus(top, reverse)
    }

    /// Re-read the terminal size and relayout.
    pub fn resize(&mut self) -> Result<()> {
        self.previous = None;
        match self.tree.root() {
            Some(top) => {
                self.tree.invalidate_layout(top)?;
                self.tree.invalidate(top, Invalidate::Recursive)
            }
            None => {
                self.tree.root_layout_valid = false;
                Ok(())
            }
        }
    }

    /// Run until the input source is exhausted or a widget requests exit,
    /// returning the exit code. The backend is started for the duration.
    pub fn run(&mut self, input: &mut dyn InputSource) -> Result<i32> {
        self.backend.start()?;
        let ret = self.run_inner(input);
        let stopped = self.backend.stop();
        let code = ret?;
        stopped?;
        Ok(code)
    }

    /// The body of the run loop.
    fn run_inner(&mut self, input: &mut dyn InputSource) -> Result<i32> {
        self.render()?;
        loop {
            match input.next()? {
                None => return Ok(0),
                Some(Input::Resize) => self.resize()?,
                Some(Input::Event(e)) => {
                    self.event(&e)?;
                }
            }
            if let Some(code) = self.tree.take_exit() {
                debug!(code, "exit requested");
                return Ok(code);
            }
            self.render()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::test::{ScriptedInput, TestRender},
        event::KeyCode,
        layout::{LinearContainer, LinearSlot},
        widgets::{Button, Label},
    };

    #[test]
    fn renders_and_diffs() -> Result<()> {
        let (buf, be) = TestRender::create((10, 2));
        let mut root = Root::new(be);
        let col = root.tree_mut().create(LinearContainer::vertical());
        let a = root.tree_mut().add(col, Label::new("alpha"), LinearSlot::default())?;
        root.tree_mut().add(col, Label::new("beta"), LinearSlot::default())?;
        root.set_root(col)?;
        root.render()?;
        assert_eq!(root.screen().line(0), "alpha     ");
        assert_eq!(root.screen().line(1), "beta      ");
        assert!(buf.lock().is_ok_and(|b| b.contains("alpha")));

        // Only the changed row goes out on the second pass.
        if let Ok(mut b) = buf.lock() {
            b.text.clear();
        }
        root.tree_mut()
            .with_widget(a, |l: &mut Label, cx| l.set_text("gamma", cx))??;
        root.render()?;
        assert_eq!(root.screen().line(0), "gamma     ");
        let b = buf.lock().map_err(|e| crate::Error::Backend(e.to_string()))?;
        assert!(b.contains("gamma"));
        assert!(!b.contains("beta"));
        Ok(())
    }

    #[test]
    fn tab_wraps_and_exit() -> Result<()> {
        let (_, be) = TestRender::create((20, 2));
        let mut root = Root::new(be);
        let col = root.tree_mut().create(LinearContainer::vertical());
        let one = root.tree_mut().add(col, Button::new("one"), LinearSlot::default())?;
        let two = root.tree_mut().add(
            col,
            Button::new("two").on_activate(|cx| {
                cx.request_exit(3);
                Ok(())
            }),
            LinearSlot::default(),
        )?;
        root.set_root(col)?;

        let mut input = ScriptedInput::new()
            .event(KeyCode::Tab)
            .event(KeyCode::Tab)
            .event(KeyCode::Tab)
            .event(KeyCode::Tab)
            .event(KeyCode::Enter);
        let code = root.run(&mut input)?;
        assert_eq!(code, 3);
        assert_eq!(root.tree().focused_leaf(), Some(two.id()));
        assert!(!root.tree().widget::<Button>(one)?.is_focused());
        Ok(())
    }
}
