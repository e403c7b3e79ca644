use crate::{
    Context, DrawCx, LayoutCx, NodeId, SizeCx,
    error::Result,
    geom::{Axis, Expanse, Point, Rect},
    layout::{
        Child, Insets, Quad, Sides, Slot,
        single::{self, SingleConfig, Visibility},
    },
    style::Style,
    widget::Widget,
};

/// Configuration for a [`BoxContainer`].
///
/// Defaults: zero margin and padding, no border, no fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConfig {
    /// Shared single-child settings.
    pub single: SingleConfig,
    /// Space outside the border. `None` sides absorb slack.
    pub margin: Insets,
    /// Which sides carry a one-cell border.
    pub border: Sides,
    /// Space between border and child. `None` sides absorb slack.
    pub padding: Insets,
    /// Fill for the whole rectangle, margin included.
    pub margin_style: Option<Style>,
    /// Fill for the bordered box.
    pub box_style: Option<Style>,
    /// Style of the border glyphs.
    pub border_style: Style,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            single: SingleConfig::default(),
            margin: Quad::all(Some(0)),
            border: Quad::all(false),
            padding: Quad::all(Some(0)),
            margin_style: None,
            box_style: None,
            border_style: Style::default(),
        }
    }
}

impl BoxConfig {
    /// Set the margin from CSS-style shorthand.
    pub fn with_margin(mut self, values: &[Option<u32>]) -> Result<Self> {
        self.margin = Quad::parse(values)?;
        Ok(self)
    }

    /// Set the border from CSS-style shorthand.
    pub fn with_border(mut self, values: &[bool]) -> Result<Self> {
        self.border = Quad::parse(values)?;
        Ok(self)
    }

    /// Set the padding from CSS-style shorthand.
    pub fn with_padding(mut self, values: &[Option<u32>]) -> Result<Self> {
        self.padding = Quad::parse(values)?;
        Ok(self)
    }

    /// Fill the margin area.
    pub fn with_margin_style(mut self, style: Style) -> Self {
        self.margin_style = Some(style);
        self
    }

    /// Fill the bordered box.
    pub fn with_box_style(mut self, style: Style) -> Self {
        self.box_style = Some(style);
        self
    }

    /// Style the border.
    pub fn with_border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Set the shared single-child settings.
    pub fn with_single(mut self, single: SingleConfig) -> Self {
        self.single = single;
        self
    }

    /// Total fixed inset along an axis: margins, border and padding, with
    /// flexible sides counted as zero.
    fn fixed_insets(&self, axis: Axis) -> u32 {
        let (m0, m1) = self.margin.axis(axis);
        let (b0, b1) = self.border.axis(axis);
        let (p0, p1) = self.padding.axis(axis);
        [m0, m1, p0, p1].iter().map(|v| v.unwrap_or(0)).sum::<u32>()
            + u32::from(b0)
            + u32::from(b1)
    }

    /// A child size inflated by the fixed insets.
    fn inflate(&self, child: Expanse) -> Expanse {
        Expanse::from_axes(|a| child.get(a) + self.fixed_insets(a))
    }
}

/// One axis of a solved box, relative to the start of the outer extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisBox {
    /// Offset of the bordered box.
    box_off: u32,
    /// Length of the bordered box.
    box_len: u32,
    /// Offset of the child.
    child_off: u32,
    /// Length of the child.
    child_len: u32,
    /// Whether each border survived shrinking.
    border: (bool, bool),
}

/// Place `content` within `avail` cells starting at `off`, between two
/// insets. Flexible (`None`) insets absorb the slack, split evenly when both
/// are flexible. With both insets fixed the content stretches to fill.
fn inset(off: u32, avail: u32, pad: (Option<u32>, Option<u32>), content: u32) -> (u32, u32) {
    match pad {
        (None, None) => {
            let free = avail.saturating_sub(content);
            (off + free / 2, content.min(avail))
        }
        (None, Some(r)) => {
            let room = avail.saturating_sub(r);
            (off + room.saturating_sub(content), content.min(room))
        }
        (Some(l), None) => {
            let l = l.min(avail);
            (off + l, content.min(avail - l))
        }
        (Some(l), Some(r)) => {
            let l = l.min(avail);
            (off + l, (avail - l).saturating_sub(r))
        }
    }
}

/// Take `deficit` cells from a pair of insets, trailing side first,
/// alternating. Returns what could not be taken.
fn shave(vals: &mut [u32; 2], mut deficit: u32) -> u32 {
    while deficit > 0 && vals.iter().any(|v| *v > 0) {
        for v in vals.iter_mut().rev() {
            if deficit > 0 && *v > 0 {
                *v -= 1;
                deficit -= 1;
            }
        }
    }
    deficit
}

/// Solve one axis of the box model. When the outer extent is too small the
/// child shrinks toward its minimum first, then margins, padding and
/// borders give way, and finally the child goes below its minimum.
fn solve_axis(
    outer: u32,
    margin: (Option<u32>, Option<u32>),
    border: (bool, bool),
    padding: (Option<u32>, Option<u32>),
    pref: u32,
    min: u32,
) -> AxisBox {
    let mut m = [margin.0.unwrap_or(0), margin.1.unwrap_or(0)];
    let mut p = [padding.0.unwrap_or(0), padding.1.unwrap_or(0)];
    let mut b = [u32::from(border.0), u32::from(border.1)];
    let mut child = pref;

    let need = m.iter().chain(&p).chain(&b).sum::<u32>() + child;
    if need > outer {
        let mut deficit = need - outer;
        let give = deficit.min(child.saturating_sub(min));
        child -= give;
        deficit -= give;
        deficit = shave(&mut m, deficit);
        deficit = shave(&mut p, deficit);
        deficit = shave(&mut b, deficit);
        child -= deficit.min(child);
    }

    let margin = (margin.0.map(|_| m[0]), margin.1.map(|_| m[1]));
    let padding = (padding.0.map(|_| p[0]), padding.1.map(|_| p[1]));
    let inner = b[0] + p[0] + child + p[1] + b[1];
    let (box_off, box_len) = inset(0, outer, margin, inner);
    let avail = box_len.saturating_sub(b[0] + b[1]);
    let (child_off, child_len) = inset(box_off + b[0], avail, padding, child);
    AxisBox {
        box_off,
        box_len,
        child_off,
        child_len,
        border: (b[0] > 0, b[1] > 0),
    }
}

/// A single-child container with CSS-style margin, border and padding.
#[derive(Debug, Default)]
pub struct BoxContainer {
    /// Configuration.
    config: BoxConfig,
    /// The bordered box from the last layout, in surface coordinates.
    box_rect: Rect,
    /// Borders that survived the last layout.
    sides: Sides,
}

impl BoxContainer {
    /// Construct with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with an explicit configuration.
    pub fn with_config(config: BoxConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration.
    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    /// Switch visibility.
    pub fn set_visibility(&mut self, visibility: Visibility, cx: &mut Context<'_>) -> Result<()> {
        single::set_visibility(&mut self.config.single, visibility, cx)
    }

    /// The bordered box from the last layout.
    pub fn box_rect(&self) -> Rect {
        self.box_rect
    }
}

impl Widget for BoxContainer {
    fn min_size(&self, cx: &SizeCx<'_>) -> Expanse {
        if self.config.single.collapsed() {
            return Expanse::zero();
        }
        self.config.inflate(self.config.single.child_min(cx))
    }

    fn pref_size(&self, cx: &SizeCx<'_>) -> Expanse {
        if self.config.single.collapsed() {
            return Expanse::zero();
        }
        self.config.inflate(self.config.single.child_pref(cx))
    }

    fn relayout(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let rect = cx.rect();
        let child = cx.child_ids().first().copied();
        let (pref, min) = match child {
            Some(c) => (
                self.config.single.cap(cx.pref_size(c)),
                self.config.single.cap(cx.min_size(c)),
            ),
            None => (Expanse::zero(), Expanse::zero()),
        };
        let c = &self.config;
        let [h, v] = Axis::BOTH.map(|a| {
            solve_axis(
                rect.expanse().get(a),
                c.margin.axis(a),
                c.border.axis(a),
                c.padding.axis(a),
                pref.get(a),
                min.get(a),
            )
        });
        self.box_rect = Rect::new(
            rect.tl.x + h.box_off,
            rect.tl.y + v.box_off,
            h.box_len,
            v.box_len,
        );
        self.sides = Sides::new(
            c.border.top && v.border.0,
            c.border.right && h.border.1,
            c.border.bottom && v.border.1,
            c.border.left && h.border.0,
        );
        if let Some(child) = child {
            cx.assign(
                child,
                Point::new(rect.tl.x + h.child_off, rect.tl.y + v.child_off),
                Expanse::new(h.child_len, v.child_len),
            )?;
        }
        Ok(())
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        let rect = cx.rect();
        match self.config.single.visibility {
            Visibility::Collapse => {}
            Visibility::Hidden => cx.surface().fill_rect(rect, Style::default(), ' '),
            Visibility::Visible => {
                if let Some(s) = self.config.margin_style {
                    cx.surface().fill_rect(rect, s, ' ');
                }
                if let Some(s) = self.config.box_style {
                    cx.surface().fill_rect(self.box_rect, s, ' ');
                }
                cx.surface()
                    .draw_border(self.box_rect, self.sides, self.config.border_style);
            }
        }
        Ok(())
    }

    fn draw_children(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        if self.config.single.visible() {
            cx.draw_children()?;
        }
        Ok(())
    }

    fn focus(&mut self, reverse: bool, cx: &mut Context<'_>) -> Result<bool> {
        if !self.config.single.visible() {
            return Ok(false);
        }
        cx.focus_children(reverse)
    }

    fn admit(&self, slot: &Slot, children: &[Child]) -> Result<Vec<NodeId>> {
        single::admit_single(self.name(), slot, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Root,
        backend::test::TestRender,
        layout::{LinearContainer, LinearSlot},
        widgets::Label,
    };

    #[test]
    fn fixed_insets_stretch_child() {
        let b = solve_axis(10, (Some(1), Some(1)), (true, true), (Some(0), Some(0)), 3, 1);
        assert_eq!((b.box_off, b.box_len), (1, 8));
        assert_eq!((b.child_off, b.child_len), (2, 6));
    }

    #[test]
    fn flexible_insets_absorb_slack() {
        // Flexible padding on both sides centers the child.
        let b = solve_axis(10, (Some(0), Some(0)), (false, false), (None, None), 4, 0);
        assert_eq!((b.child_off, b.child_len), (3, 4));
        // A flexible leading margin pushes the box to the far edge.
        let b = solve_axis(10, (None, Some(1)), (true, true), (Some(0), Some(0)), 4, 0);
        assert_eq!((b.box_off, b.box_len), (3, 6));
        assert_eq!((b.child_off, b.child_len), (4, 4));
    }

    #[test]
    fn shrinks_child_before_insets() {
        // Needs 2 + 2 + 6 = 10 in 8: the child gives up 2 and stays at min.
        let b = solve_axis(8, (Some(1), Some(1)), (true, true), (Some(0), Some(0)), 6, 4);
        assert_eq!(b.child_len, 4);
        assert_eq!(b.border, (true, true));
        // In 5 the child is pinned at min, the margins go, then one border.
        let b = solve_axis(5, (Some(1), Some(1)), (true, true), (Some(0), Some(0)), 6, 4);
        assert_eq!(b.child_len, 4);
        assert_eq!(b.box_len, 5);
        assert_eq!(b.border, (true, false));
    }

    #[test]
    fn shorthand_errors() {
        assert!(BoxConfig::default().with_margin(&[]).is_err());
        assert!(
            BoxConfig::default()
                .with_border(&[true, false, true, false, true])
                .is_err()
        );
    }

    #[test]
    fn visibility() -> Result<()> {
        let (_, be) = TestRender::create((4, 4));
        let mut root = Root::new(be);
        let tree = root.tree_mut();
        let col = tree.create(LinearContainer::vertical());
        let b = tree.add(
            col,
            BoxContainer::with_config(BoxConfig::default().with_border(&[true])?),
            LinearSlot::new(),
        )?;
        tree.add(b, Label::new("hi"), Slot::Plain)?;
        tree.add(col, Label::new("z"), LinearSlot::new())?;
        root.set_root(col)?;
        root.render()?;
        assert_eq!(root.screen().lines(), ["┌──┐", "│hi│", "└──┘", "z   "]);

        root.tree_mut()
            .with_widget(b, |w: &mut BoxContainer, cx| w.set_visibility(Visibility::Hidden, cx))??;
        root.render()?;
        assert_eq!(root.screen().lines(), ["    ", "    ", "    ", "z   "]);

        root.tree_mut()
            .with_widget(b, |w: &mut BoxContainer, cx| w.set_visibility(Visibility::Collapse, cx))??;
        root.render()?;
        assert_eq!(root.screen().line(0), "z   ");
        Ok(())
    }
}
