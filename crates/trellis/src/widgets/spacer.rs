use crate::{SizeCx, geom::Expanse, widget::Widget};

/// Empty glue with a preferred size. It yields all of it under pressure and
/// draws nothing, so its parent's background shows through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacer {
    /// The preferred size.
    size: Expanse,
}

impl Spacer {
    /// A spacer that would like to be `size`.
    pub fn new(size: impl Into<Expanse>) -> Self {
        Self { size: size.into() }
    }
}

impl Widget for Spacer {
    fn min_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::zero()
    }

    fn pref_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        self.size
    }
}
