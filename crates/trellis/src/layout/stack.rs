use crate::{
    NodeId,
    error::{Error, Result},
    layout::{Child, Slot},
    widget::{Repaint, Widget},
};

/// The stacking layer of a child record. Unlayered children sit on layer 0.
pub(crate) fn layer_of(slot: &Slot) -> i32 {
    match slot {
        Slot::Layer(l) => *l,
        Slot::Place(p) => p.layer,
        _ => 0,
    }
}

/// Where a child on `layer` goes: after every child on the same or a lower
/// layer, so children stay sorted by layer and in insertion order within
/// one.
pub(crate) fn layer_index(layer: i32, children: &[Child]) -> usize {
    children
        .iter()
        .rposition(|c| layer_of(&c.slot) <= layer)
        .map_or(0, |i| i + 1)
}

/// A container that gives every child its full area and draws them in layer
/// order, lowest first. Repainting a child repaints everything layered
/// above it.
#[derive(Debug, Default)]
pub struct StackContainer;

impl StackContainer {
    /// Construct an empty stack.
    pub fn new() -> Self {
        Self
    }
}

impl Widget for StackContainer {
    fn admit(&self, slot: &Slot, _children: &[Child]) -> Result<Vec<NodeId>> {
        match slot {
            Slot::Plain | Slot::Layer(_) => Ok(Vec::new()),
            other => Err(Error::Config(format!(
                "{} does not accept slot {other:?}",
                self.name()
            ))),
        }
    }

    fn insertion_index(&self, slot: &Slot, children: &[Child]) -> usize {
        layer_index(layer_of(slot), children)
    }

    fn child_repaint(&self) -> Repaint {
        Repaint::Following
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Tree,
        geom::{Expanse, Point},
        tree::Invalidate,
        widgets::Spacer,
    };

    #[test]
    fn layers_sort_stably() -> Result<()> {
        let mut tree = Tree::new();
        let s = tree.create(StackContainer::new());
        let a = tree.add(s, Spacer::new(Expanse::new(1, 1)), Slot::Layer(1))?.id();
        let b = tree.add(s, Spacer::new(Expanse::new(1, 1)), Slot::Plain)?.id();
        let c = tree.add(s, Spacer::new(Expanse::new(1, 1)), Slot::Layer(1))?.id();
        let d = tree.add(s, Spacer::new(Expanse::new(1, 1)), Slot::Layer(-2))?.id();
        assert_eq!(tree.children(s), vec![d, b, a, c]);

        tree.set_slot(d, Slot::Layer(5))?;
        assert_eq!(tree.children(s), vec![b, a, c, d]);
        assert!(matches!(
            tree.add(s, Spacer::new(Expanse::new(1, 1)), Slot::Cell { col: 0, row: 0 }),
            Err(Error::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn repaint_reaches_upper_layers() -> Result<()> {
        let mut tree = Tree::new();
        let s = tree.create(StackContainer::new());
        let low = tree.add(s, Spacer::new(Expanse::new(2, 2)), Slot::Layer(0))?.id();
        let high = tree.add(s, Spacer::new(Expanse::new(2, 2)), Slot::Layer(1))?.id();
        tree.set_root(s)?;
        tree.assign(s, Point::zero(), Expanse::new(2, 2))?;
        tree.layout(s)?;
        let mut buf = crate::TermBuf::blank((2, 2));
        tree.draw(s, &mut buf)?;
        assert!(tree.node(high).is_some_and(|n| n.display_valid()));

        tree.invalidate(low, Invalidate::Own)?;
        assert!(tree.node(high).is_some_and(|n| !n.self_valid()));
        // Nothing sits above the top layer.
        tree.draw(s, &mut buf)?;
        tree.invalidate(high, Invalidate::Own)?;
        assert!(tree.node(low).is_some_and(|n| n.self_valid()));
        Ok(())
    }
}
