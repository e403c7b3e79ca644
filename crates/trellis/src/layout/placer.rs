use crate::{
    LayoutCx, NodeId, SizeCx,
    error::{Error, Result},
    geom::{Expanse, Point},
    layout::{
        Child, Slot,
        stack::{layer_index, layer_of},
    },
    widget::{Repaint, Widget},
};

/// Where a child of a [`PlacerContainer`] goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    /// Offset from the container's top-left.
    pub offset: Point,
    /// Explicit size; `None` uses the child's preferred size.
    pub size: Option<Expanse>,
    /// Stacking layer, as for a stack.
    pub layer: i32,
}

impl Placement {
    /// Place at an offset, at the child's preferred size.
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            offset: Point::new(x, y),
            ..Self::default()
        }
    }

    /// Give the child an explicit size.
    pub fn with_size(mut self, size: impl Into<Expanse>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Put the child on a layer.
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }
}

/// A container that places each child at a caller-chosen offset. Children
/// may overlap, so they draw in layer order like a stack.
#[derive(Debug, Default)]
pub struct PlacerContainer;

impl PlacerContainer {
    /// Construct an empty placer.
    pub fn new() -> Self {
        Self
    }

    /// The placement of a child record.
    fn placement(child: &Child) -> Placement {
        match child.slot {
            Slot::Place(p) => p,
            _ => Placement::default(),
        }
    }

    /// The bounding extent of every placed child, sized with `size` where no
    /// explicit size is given.
    fn extent(cx: &SizeCx<'_>, size: impl Fn(NodeId) -> Expanse) -> Expanse {
        cx.child_slots().iter().fold(Expanse::zero(), |acc, c| {
            let p = Self::placement(c);
            let s = p.size.unwrap_or_else(|| size(c.id));
            let far = p.offset.extend(s);
            acc.max(Expanse::new(far.x, far.y))
        })
    }
}

impl Widget for PlacerContainer {
    fn min_size(&self, cx: &SizeCx<'_>) -> Expanse {
        Self::extent(cx, |c| cx.min_size(c))
    }

    fn pref_size(&self, cx: &SizeCx<'_>) -> Expanse {
        Self::extent(cx, |c| cx.pref_size(c))
    }

    fn relayout(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let tl = cx.rect().tl;
        for c in cx.child_slots() {
            let p = Self::placement(&c);
            let size = p.size.unwrap_or_else(|| cx.pref_size(c.id));
            cx.assign(c.id, tl + p.offset, size)?;
        }
        Ok(())
    }

    fn admit(&self, slot: &Slot, _children: &[Child]) -> Result<Vec<NodeId>> {
        match slot {
            Slot::Place(_) => Ok(Vec::new()),
            other => Err(Error::Config(format!(
                "{} needs a placement slot, got {other:?}",
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
    use crate::{Tree, geom::Rect, widgets::Spacer};

    #[test]
    fn places_and_measures() -> Result<()> {
        let mut tree = Tree::new();
        let p = tree.create(PlacerContainer::new());
        let a = tree.add(p, Spacer::new(Expanse::new(3, 2)), Placement::at(1, 1))?;
        let b = tree.add(
            p,
            Spacer::new(Expanse::new(3, 2)),
            Placement::at(4, 0).with_size((10, 1)),
        )?;
        assert_eq!(tree.pref_size(p), Expanse::new(14, 3));

        tree.assign(p, Point::new(2, 2), Expanse::new(20, 5))?;
        tree.layout(p)?;
        assert_eq!(tree.node(a).map(|n| n.rect()), Some(Rect::new(3, 3, 3, 2)));
        assert_eq!(tree.node(b).map(|n| n.rect()), Some(Rect::new(6, 2, 10, 1)));
        assert!(matches!(
            tree.add(p, Spacer::new(Expanse::new(1, 1)), Slot::Plain),
            Err(Error::Config(_))
        ));
        Ok(())
    }
}
