use crate::{
    Context, DrawCx, LayoutCx, NodeId, SizeCx,
    error::{Error, Result},
    geom::{Axis, Expanse, Mode, Point, distribute},
    layout::{Child, Slot},
    style::Style,
    widget::Widget,
};

/// How the layout cursor moves after a child is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rule {
    /// The next child lands at the same position.
    #[default]
    Stay,
    /// The next child lands to the right.
    Right,
    /// The next child lands below.
    Down,
    /// The next child lands below and to the right.
    Diagonal,
}

impl Rule {
    /// Whether the cursor advances horizontally and vertically.
    pub fn advances(self) -> (bool, bool) {
        match self {
            Self::Stay => (false, false),
            Self::Right => (true, false),
            Self::Down => (false, true),
            Self::Diagonal => (true, true),
        }
    }

    /// Whether the cursor advances along an axis.
    pub fn advances_on(self, axis: Axis) -> bool {
        let (x, y) = self.advances();
        match axis {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }
}

/// Per-child configuration for a [`LinearContainer`].
///
/// Defaults: the container's advance rule, no growth, unit shrink weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSlot {
    /// Advance rule; `None` uses the container default.
    pub rule: Option<Rule>,
    /// Horizontal and vertical growth weights.
    pub grow: (f64, f64),
    /// Horizontal and vertical shrink weights.
    pub shrink: (f64, f64),
}

impl Default for LinearSlot {
    fn default() -> Self {
        Self {
            rule: None,
            grow: (0.0, 0.0),
            shrink: (1.0, 1.0),
        }
    }
}

impl LinearSlot {
    /// A slot with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the advance rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Set the same growth weight on both axes.
    pub fn with_grow(mut self, weight: f64) -> Self {
        self.grow = (weight, weight);
        self
    }

    /// Set growth weights per axis.
    pub fn with_grow_axes(mut self, x: f64, y: f64) -> Self {
        self.grow = (x, y);
        self
    }

    /// Set the same shrink weight on both axes.
    pub fn with_shrink(mut self, weight: f64) -> Self {
        self.shrink = (weight, weight);
        self
    }

    /// Growth weight along an axis.
    fn grow(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.grow.0,
            Axis::Vertical => self.grow.1,
        }
    }

    /// Shrink weight along an axis.
    fn shrink(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.shrink.0,
            Axis::Vertical => self.shrink.1,
        }
    }
}

/// Configuration for a [`LinearContainer`].
///
/// Defaults: stretch on both axes, children stay in place unless their slot
/// says otherwise, default background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearConfig {
    /// Horizontal and vertical distribution modes.
    pub mode: (Mode, Mode),
    /// Rule for children whose slot names none.
    pub default_rule: Rule,
    /// Fill for gaps between children.
    pub background: Style,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            mode: (Mode::Stretch, Mode::Stretch),
            default_rule: Rule::Stay,
            background: Style::default(),
        }
    }
}

impl LinearConfig {
    /// Set the distribution mode on both axes.
    pub fn with_mode(mut self, h: Mode, v: Mode) -> Self {
        self.mode = (h, v);
        self
    }

    /// Set the default advance rule.
    pub fn with_default_rule(mut self, rule: Rule) -> Self {
        self.default_rule = rule;
        self
    }

    /// Set the background.
    pub fn with_background(mut self, style: Style) -> Self {
        self.background = style;
        self
    }

    /// The mode along an axis.
    fn mode(&self, axis: Axis) -> Mode {
        match axis {
            Axis::Horizontal => self.mode.0,
            Axis::Vertical => self.mode.1,
        }
    }
}

/// An N-ary container that walks a cursor through its children, moving it
/// by each child's advance rule, and splits space along each axis with the
/// shared distribution engine. Children that do not advance the cursor on an
/// axis share one allotment there.
#[derive(Debug, Default)]
pub struct LinearContainer {
    /// Configuration.
    config: LinearConfig,
}

impl LinearContainer {
    /// A container whose children stay in place unless their slot says
    /// otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    /// A row: children advance to the right.
    pub fn horizontal() -> Self {
        Self::with_config(LinearConfig::default().with_default_rule(Rule::Right))
    }

    /// A column: children advance downwards.
    pub fn vertical() -> Self {
        Self::with_config(LinearConfig::default().with_default_rule(Rule::Down))
    }

    /// Construct with an explicit configuration.
    pub fn with_config(config: LinearConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &LinearConfig {
        &self.config
    }

    /// Change the distribution modes.
    pub fn set_mode(&mut self, h: Mode, v: Mode, cx: &mut Context<'_>) -> Result<()> {
        self.config.mode = (h, v);
        cx.invalidate_layout()
    }

    /// The effective rule and slot of a child record.
    fn entry(&self, child: &Child) -> (Rule, LinearSlot) {
        let slot = match &child.slot {
            Slot::Linear(s) => *s,
            _ => LinearSlot::default(),
        };
        (slot.rule.unwrap_or(self.config.default_rule), slot)
    }

    /// The extent covered by walking the cursor over children of the given
    /// sizes. In the equal modes every advancing child is as long as the
    /// longest.
    fn extent(&self, items: &[(Rule, Expanse)]) -> Expanse {
        let mut cursor = Point::zero();
        let mut covered = Expanse::zero();
        let mut longest = Expanse::zero();
        let mut steps = (0u32, 0u32);
        for (rule, size) in items {
            longest = longest.max(*size);
            covered = covered.max(Expanse::new(
                cursor.x.saturating_add(size.w),
                cursor.y.saturating_add(size.h),
            ));
            let (ax, ay) = rule.advances();
            if ax {
                cursor.x = cursor.x.saturating_add(size.w);
                steps.0 += 1;
            }
            if ay {
                cursor.y = cursor.y.saturating_add(size.h);
                steps.1 += 1;
            }
        }
        Expanse::from_axes(|a| match self.config.mode(a) {
            Mode::Equal | Mode::EqualForce if !items.is_empty() => {
                let n = match a {
                    Axis::Horizontal => steps.0,
                    Axis::Vertical => steps.1,
                };
                longest.get(a).saturating_mul(n.max(1))
            }
            _ => covered.get(a),
        })
    }

    /// Measure children with a size function.
    fn measure(&self, cx: &SizeCx<'_>, size: impl Fn(NodeId) -> Expanse) -> Expanse {
        let items: Vec<(Rule, Expanse)> = cx
            .child_slots()
            .iter()
            .map(|c| (self.entry(c).0, size(c.id)))
            .collect();
        self.extent(&items)
    }
}

impl Widget for LinearContainer {
    fn min_size(&self, cx: &SizeCx<'_>) -> Expanse {
        self.measure(cx, |c| cx.min_size(c))
    }

    fn pref_size(&self, cx: &SizeCx<'_>) -> Expanse {
        self.measure(cx, |c| cx.pref_size(c))
    }

    fn relayout(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let rect = cx.rect();
        let children = cx.child_slots();
        if children.is_empty() {
            return Ok(());
        }
        let entries: Vec<(Rule, LinearSlot)> = children.iter().map(|c| self.entry(c)).collect();
        let prefs: Vec<Expanse> = children.iter().map(|c| cx.pref_size(c.id)).collect();
        let mins: Vec<Expanse> = children.iter().map(|c| cx.min_size(c.id)).collect();

        let mut lengths = Vec::with_capacity(2);
        for axis in Axis::BOTH {
            let sizes: Vec<u32> = prefs.iter().map(|p| p.get(axis)).collect();
            let floors: Vec<u32> = mins.iter().map(|m| m.get(axis)).collect();
            let advances: Vec<bool> = entries.iter().map(|(r, _)| r.advances_on(axis)).collect();
            let grow: Vec<f64> = entries.iter().map(|(_, s)| s.grow(axis)).collect();
            let shrink: Vec<f64> = entries.iter().map(|(_, s)| s.shrink(axis)).collect();
            lengths.push(distribute(
                rect.expanse().get(axis),
                &sizes,
                &floors,
                &advances,
                &grow,
                &shrink,
                self.config.mode(axis),
            )?);
        }

        let mut cursor = Point::zero();
        for (i, (c, (rule, _))) in children.iter().zip(&entries).enumerate() {
            let size = Expanse::new(lengths[0][i], lengths[1][i]);
            cx.assign(c.id, rect.tl + cursor, size)?;
            let (ax, ay) = rule.advances();
            if ax {
                cursor.x = cursor.x.saturating_add(size.w);
            }
            if ay {
                cursor.y = cursor.y.saturating_add(size.h);
            }
        }
        Ok(())
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        let rect = cx.rect();
        cx.surface().fill_rect(rect, self.config.background, ' ');
        Ok(())
    }

    fn admit(&self, slot: &Slot, _children: &[Child]) -> Result<Vec<NodeId>> {
        match slot {
            Slot::Plain | Slot::Linear(_) => Ok(Vec::new()),
            other => Err(Error::Config(format!(
                "{} does not accept slot {other:?}",
                self.name()
            ))),
        }
    }
}
