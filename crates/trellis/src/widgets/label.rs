use crate::{
    Context, DrawCx, SizeCx,
    error::Result,
    geom::Expanse,
    layout::Align,
    style::Style,
    widget::Widget,
    widgets::text::TextBlock,
};

/// Configuration for a [`Label`].
///
/// Defaults: top-left aligned, default style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelConfig {
    /// Horizontal and vertical text alignment.
    pub align: (Align, Align),
    /// Text and fill style.
    pub style: Style,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            align: (Align::Start, Align::Start),
            style: Style::default(),
        }
    }
}

impl LabelConfig {
    /// Set the alignment.
    pub fn with_align(mut self, h: Align, v: Align) -> Self {
        self.align = (h, v);
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Static multi-line text.
#[derive(Debug)]
pub struct Label {
    /// The text.
    text: TextBlock,
    /// Configuration.
    config: LabelConfig,
}

impl Label {
    /// A top-left aligned label.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, LabelConfig::default())
    }

    /// A label with an explicit configuration.
    pub fn with_config(text: &str, config: LabelConfig) -> Self {
        Self {
            text: TextBlock::new(text),
            config,
        }
    }

    /// The text.
    pub fn text(&self) -> &str {
        self.text.raw()
    }

    /// Replace the text, re-measuring if it changed.
    pub fn set_text(&mut self, text: &str, cx: &mut Context<'_>) -> Result<()> {
        if self.text.set(text) {
            cx.invalidate_layout()?;
            cx.invalidate()?;
        }
        Ok(())
    }
}

impl Widget for Label {
    fn min_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::zero()
    }

    fn pref_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        self.text.size()
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        let rect = cx.rect();
        let surface = cx.surface();
        surface.fill_rect(rect, self.config.style, ' ');
        self.text
            .draw(surface, rect, self.config.align, self.config.style);
        Ok(())
    }
}
