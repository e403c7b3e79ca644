//! Redraw locality: only what was invalidated gets painted again.

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use proptest::prelude::*;
    use trellis::{
        DrawCx, NodeId, Result, SizeCx, TermBuf, Tree, Widget,
        geom::{Expanse, Point},
        layout::{LinearContainer, Slot, StackContainer},
        style::Style,
        tree::Invalidate,
    };

    /// A leaf that counts how often it is drawn.
    #[derive(Debug)]
    struct Probe {
        /// Shared draw counter.
        draws: Rc<Cell<usize>>,
    }

    impl Widget for Probe {
        fn pref_size(&self, _cx: &SizeCx<'_>) -> Expanse {
            Expanse::new(4, 1)
        }

        fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
            self.draws.set(self.draws.get() + 1);
            let rect = cx.rect();
            cx.surface().draw_text(rect.tl, "x", Style::default());
            Ok(())
        }
    }

    /// A laid out and drawn tree with three probes under one container.
    struct Fixture {
        /// The tree.
        tree: Tree,
        /// The container.
        root: NodeId,
        /// The probes.
        ids: Vec<NodeId>,
        /// Probe draw counters.
        counts: Vec<Rc<Cell<usize>>>,
        /// The drawing target.
        buf: TermBuf,
    }

    impl Fixture {
        /// Build the tree, giving the nth probe `slot(n)`.
        fn new(container: impl Widget, slot: fn(i32) -> Slot) -> Result<Self> {
            let mut tree = Tree::new();
            let root = tree.create(container).id();
            let mut ids = Vec::new();
            let mut counts = Vec::new();
            for i in 0..3 {
                let draws = Rc::new(Cell::new(0));
                ids.push(tree.add(root, Probe { draws: draws.clone() }, slot(i))?.id());
                counts.push(draws);
            }
            tree.set_root(root)?;
            tree.assign(root, Point::zero(), Expanse::new(4, 3))?;
            tree.layout(root)?;
            let mut buf = TermBuf::blank((4, 3));
            tree.draw(root, &mut buf)?;
            Ok(Self {
                tree,
                root,
                ids,
                counts,
                buf,
            })
        }

        /// A vertical list.
        fn column() -> Result<Self> {
            Self::new(LinearContainer::vertical(), |_| Slot::Plain)
        }

        /// Draw whatever is stale.
        fn draw(&mut self) -> Result<()> {
            self.tree.draw(self.root, &mut self.buf)
        }

        /// Current draw counts.
        fn counts(&self) -> Vec<usize> {
            self.counts.iter().map(|c| c.get()).collect()
        }
    }

    #[test]
    fn own_invalidation_is_local() -> Result<()> {
        let mut f = Fixture::column()?;
        assert_eq!(f.counts(), vec![1, 1, 1]);

        f.tree.invalidate(f.ids[1], Invalidate::Own)?;
        f.draw()?;
        assert_eq!(f.counts(), vec![1, 2, 1]);

        // A clean tree draws nothing.
        f.draw()?;
        assert_eq!(f.counts(), vec![1, 2, 1]);
        Ok(())
    }

    #[test]
    fn invalidation_is_idempotent() -> Result<()> {
        let mut f = Fixture::column()?;
        for _ in 0..3 {
            f.tree.invalidate(f.ids[0], Invalidate::Own)?;
        }
        f.draw()?;
        assert_eq!(f.counts(), vec![2, 1, 1]);

        f.tree.invalidate_layout(f.ids[2])?;
        f.tree.invalidate_layout(f.ids[2])?;
        assert!(!f.tree.node(f.root).is_some_and(|n| n.layout_valid()));
        f.tree.layout(f.root)?;
        assert!(f.tree.node(f.root).is_some_and(|n| n.layout_valid()));
        // Same geometry: nothing to repaint.
        f.draw()?;
        assert_eq!(f.counts(), vec![2, 1, 1]);
        Ok(())
    }

    #[test]
    fn recursive_reaches_everything() -> Result<()> {
        let mut f = Fixture::column()?;
        f.tree.invalidate(f.root, Invalidate::Recursive)?;
        f.draw()?;
        assert_eq!(f.counts(), vec![2, 2, 2]);
        Ok(())
    }

    #[test]
    fn parent_repaint_redraws_children() -> Result<()> {
        let mut f = Fixture::column()?;
        f.tree.invalidate(f.root, Invalidate::Own)?;
        f.draw()?;
        assert_eq!(f.counts(), vec![2, 2, 2]);
        Ok(())
    }

    #[test]
    fn overlapping_layers_repaint_upwards() -> Result<()> {
        let mut f = Fixture::new(StackContainer::new(), Slot::Layer)?;
        f.tree.invalidate(f.ids[1], Invalidate::Own)?;
        f.draw()?;
        assert_eq!(f.counts(), vec![1, 2, 2]);

        f.tree.invalidate(f.ids[2], Invalidate::Own)?;
        f.draw()?;
        assert_eq!(f.counts(), vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn reassignment_repaints_subtree() -> Result<()> {
        let mut f = Fixture::column()?;
        f.tree.assign(f.root, Point::zero(), Expanse::new(6, 3))?;
        f.tree.layout(f.root)?;
        f.buf = TermBuf::blank((6, 3));
        f.draw()?;
        assert_eq!(f.counts(), vec![2, 2, 2]);
        assert_eq!(f.buf.line(0), "x     ");
        Ok(())
    }

    /// A tree of `1 + parents.len()` vertical lists, where node `i + 1`
    /// hangs off node `parents[i] % (i + 1)`. Laid out and fully drawn.
    fn random_tree(parents: &[usize]) -> Result<(Tree, Vec<NodeId>, TermBuf)> {
        let mut tree = Tree::new();
        let mut ids = vec![tree.create(LinearContainer::vertical()).id()];
        for (i, p) in parents.iter().enumerate() {
            let parent = ids[p % (i + 1)];
            ids.push(tree.add(parent, LinearContainer::vertical(), Slot::Plain)?.id());
        }
        tree.set_root(ids[0])?;
        tree.assign(ids[0], Point::zero(), Expanse::new(8, 8))?;
        tree.layout(ids[0])?;
        let mut buf = TermBuf::blank((8, 8));
        tree.draw(ids[0], &mut buf)?;
        Ok((tree, ids, buf))
    }

    proptest! {
        #[test]
        fn own_invalidation_marks_only_the_ancestor_chain(
            parents in prop::collection::vec(any::<usize>(), 0..24),
            pick in any::<usize>(),
        ) {
            let (mut tree, ids, mut buf) = random_tree(&parents)?;
            let target = ids[pick % ids.len()];
            tree.invalidate(target, Invalidate::Own)?;

            let mut chain = vec![target];
            while let Some(p) = tree.parent(chain[chain.len() - 1]) {
                chain.push(p);
            }
            for id in &ids {
                let node = tree.node(*id).ok_or(TestCaseError::fail("missing node"))?;
                prop_assert_eq!(node.display_valid(), !chain.contains(id));
                prop_assert_eq!(node.self_valid(), *id != target);
            }

            tree.draw(ids[0], &mut buf)?;
            for id in &ids {
                let node = tree.node(*id).ok_or(TestCaseError::fail("missing node"))?;
                prop_assert!(node.display_valid() && node.self_valid());
            }
        }
    }
}
