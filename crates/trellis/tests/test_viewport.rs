//! Viewport scrolling, clamping and keep-visible requests.

#[cfg(test)]
mod tests {
    use trellis::{
        NodeId, Result, Root,
        backend::test::TestRender,
        event::{Event, KeyCode},
        geom::{Expanse, Point},
        layout::{LinearContainer, LinearSlot, Slot, Viewport, ViewportConfig},
        scroll::Scroll,
        widgets::{Button, Label},
    };

    /// Numbered lines, one per row.
    fn numbered(n: u32) -> String {
        (0..n).map(|i| i.to_string()).collect::<Vec<_>>().join("\n")
    }

    /// A 4x3 screen showing a viewport over a label of `n` lines.
    fn label_view(n: u32) -> Result<(Root<TestRender>, NodeId, NodeId)> {
        let (_, be) = TestRender::create((4, 3));
        let mut root = Root::new(be);
        let vp = root.tree_mut().create(Viewport::new());
        let label = root.tree_mut().add(vp, Label::new(&numbered(n)), Slot::Plain)?;
        root.set_root(vp)?;
        root.render()?;
        Ok((root, vp.id(), label.id()))
    }

    /// Where the viewport is scrolled to.
    fn position(root: &Root<TestRender>, vp: NodeId) -> Option<Point> {
        root.tree().scroll_state(vp).map(|s| s.position())
    }

    #[test]
    fn scrolls_and_clamps() -> Result<()> {
        let (mut root, vp, _) = label_view(10)?;
        assert_eq!(root.screen().lines(), vec!["0   ", "1   ", "2   "]);

        root.tree_mut().scroll(vp, Scroll::To(Point::new(0, 7)))?;
        root.render()?;
        assert_eq!(root.screen().lines(), vec!["7   ", "8   ", "9   "]);

        // Past the end clamps; a no-op scroll reports no change.
        assert!(!root.tree_mut().scroll(vp, Scroll::To(Point::new(9, 50)))?);
        assert_eq!(position(&root, vp), Some(Point::new(0, 7)));
        assert!(root.tree_mut().scroll(vp, Scroll::By { x: 0, y: -100 })?);
        assert_eq!(position(&root, vp), Some(Point::zero()));
        Ok(())
    }

    #[test]
    fn shrinking_content_pulls_back() -> Result<()> {
        let (mut root, vp, label) = label_view(10)?;
        root.tree_mut().scroll(vp, Scroll::To(Point::new(0, 7)))?;
        root.render()?;

        root.tree_mut()
            .with_widget(label, |l: &mut Label, cx| l.set_text(&numbered(4), cx))??;
        root.render()?;
        assert_eq!(position(&root, vp), Some(Point::new(0, 1)));
        assert_eq!(root.screen().lines(), vec!["1   ", "2   ", "3   "]);

        // Content smaller than the view: nothing to scroll.
        root.tree_mut()
            .with_widget(label, |l: &mut Label, cx| l.set_text("x", cx))??;
        root.render()?;
        assert_eq!(position(&root, vp), Some(Point::zero()));
        assert_eq!(root.screen().lines(), vec!["x   ", "    ", "    "]);
        Ok(())
    }

    #[test]
    fn page_keys() -> Result<()> {
        let (mut root, vp, _) = label_view(10)?;
        root.event(&Event::from(KeyCode::PageDown))?;
        assert_eq!(position(&root, vp), Some(Point::new(0, 3)));
        root.render()?;
        assert_eq!(root.screen().line(0), "3   ");
        root.event(&Event::from(KeyCode::PageUp))?;
        assert_eq!(position(&root, vp), Some(Point::zero()));
        Ok(())
    }

    #[test]
    fn child_size_cap() -> Result<()> {
        let (_, be) = TestRender::create((4, 3));
        let mut root = Root::new(be);
        let vp = root.tree_mut().create(Viewport::with_config(
            ViewportConfig::default().with_max_child_size(None, Some(5)),
        ));
        root.tree_mut().add(vp, Label::new(&numbered(10)), Slot::Plain)?;
        root.set_root(vp)?;
        root.render()?;
        let state = root.tree().scroll_state(vp).cloned().unwrap_or_default();
        assert_eq!(state.content(), Expanse::new(4, 5));
        assert_eq!(state.max(), Point::new(0, 2));
        Ok(())
    }

    #[test]
    fn focus_scrolls_minimally() -> Result<()> {
        let (_, be) = TestRender::create((10, 3));
        let mut root = Root::new(be);
        let tree = root.tree_mut();
        let vp = tree.create(Viewport::new());
        let col = tree.add(vp, LinearContainer::vertical(), Slot::Plain)?;
        for i in 0..10 {
            tree.add(col, Button::new(&format!("b{i}")), LinearSlot::new())?;
        }
        root.set_root(vp)?;
        root.render()?;

        let tab = Event::from(KeyCode::Tab);
        let backtab = Event::from(KeyCode::BackTab);
        for _ in 0..3 {
            root.event(&tab)?;
        }
        // b2 is the last visible row: no scrolling yet.
        assert_eq!(position(&root, vp.id()), Some(Point::zero()));
        assert_eq!(root.tree().cursor(), Some(Point::new(0, 2)));

        root.event(&tab)?;
        assert_eq!(position(&root, vp.id()), Some(Point::new(0, 1)));
        assert_eq!(root.tree().cursor(), Some(Point::new(0, 2)));
        root.render()?;
        assert!(root.screen().line(2).contains("b3"));

        // Moving back within the window leaves it alone.
        root.event(&backtab)?;
        root.event(&backtab)?;
        assert_eq!(position(&root, vp.id()), Some(Point::new(0, 1)));
        assert_eq!(root.tree().cursor(), Some(Point::new(0, 0)));

        root.event(&backtab)?;
        assert_eq!(position(&root, vp.id()), Some(Point::zero()));
        assert_eq!(root.tree().cursor(), Some(Point::new(0, 0)));
        Ok(())
    }
}
