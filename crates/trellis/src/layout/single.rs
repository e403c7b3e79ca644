use crate::{
    Context, NodeId, SizeCx,
    error::{Error, Result},
    geom::Expanse,
    layout::{Child, Slot},
};

/// Whether a single-child container shows its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Drawn normally.
    #[default]
    Visible,
    /// Takes up space but draws nothing.
    Hidden,
    /// Reports a zero size and draws nothing.
    Collapse,
}

/// Configuration shared by the single-child containers.
///
/// Defaults: no cap on the child's size, visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SingleConfig {
    /// Upper bound on the child's reported width and height.
    pub max_child_size: (Option<u32>, Option<u32>),
    /// Whether the content is shown.
    pub visibility: Visibility,
}

impl SingleConfig {
    /// Cap the child's reported size.
    pub fn with_max_child_size(mut self, w: Option<u32>, h: Option<u32>) -> Self {
        self.max_child_size = (w, h);
        self
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Apply the size cap.
    pub(crate) fn cap(&self, size: Expanse) -> Expanse {
        let (w, h) = self.max_child_size;
        Expanse::new(
            w.map_or(size.w, |m| size.w.min(m)),
            h.map_or(size.h, |m| size.h.min(m)),
        )
    }

    /// The child's minimum size, capped. Zero without a child.
    pub(crate) fn child_min(&self, cx: &SizeCx<'_>) -> Expanse {
        cx.children()
            .next()
            .map_or(Expanse::zero(), |c| self.cap(cx.min_size(c)))
    }

    /// The child's preferred size, capped. Zero without a child.
    pub(crate) fn child_pref(&self, cx: &SizeCx<'_>) -> Expanse {
        cx.children()
            .next()
            .map_or(Expanse::zero(), |c| self.cap(cx.pref_size(c)))
    }

    /// Does the container report a zero size?
    pub(crate) fn collapsed(&self) -> bool {
        self.visibility == Visibility::Collapse
    }

    /// Is the content drawn?
    pub(crate) fn visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// Admission for single-child containers: only plain slots, and a new child
/// displaces the current one.
pub(crate) fn admit_single(name: &str, slot: &Slot, children: &[Child]) -> Result<Vec<NodeId>> {
    match slot {
        Slot::Plain => Ok(children.iter().map(|c| c.id).collect()),
        other => Err(Error::Config(format!(
            "{name} does not accept slot {other:?}"
        ))),
    }
}

/// Switch visibility, re-measuring and repainting as needed.
pub(crate) fn set_visibility(
    config: &mut SingleConfig,
    visibility: Visibility,
    cx: &mut Context<'_>,
) -> Result<()> {
    if config.visibility == visibility {
        return Ok(());
    }
    let was_collapsed = config.collapsed();
    config.visibility = visibility;
    if was_collapsed || config.collapsed() {
        cx.invalidate_layout()?;
    }
    cx.invalidate_recursive()
}
