use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    geom::{Expanse, Point, Rect},
    layout::Align,
    render::Surface,
    style::Style,
};

/// Display width of a string, in columns.
pub(crate) fn width(s: &str) -> u32 {
    s.width() as u32
}

/// The longest prefix of `s` that fits in `columns`.
pub(crate) fn clip(s: &str, columns: u32) -> &str {
    let mut used = 0u32;
    for (i, ch) in s.char_indices() {
        used += ch.width().unwrap_or(0) as u32;
        if used > columns {
            return &s[..i];
        }
    }
    s
}

/// A block of lines, measured once when set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct TextBlock {
    /// The raw text.
    raw: String,
    /// The text split into lines.
    lines: Vec<String>,
    /// Widest line and line count.
    size: Expanse,
}

impl TextBlock {
    /// Construct from text; `\n` separates lines.
    pub(crate) fn new(text: &str) -> Self {
        let mut t = Self::default();
        t.set(text);
        t
    }

    /// Replace the text. Returns false if it was unchanged.
    pub(crate) fn set(&mut self, text: &str) -> bool {
        if text == self.raw && !self.lines.is_empty() {
            return false;
        }
        self.raw = text.to_string();
        self.lines = text.split('\n').map(str::to_string).collect();
        self.size = Expanse::new(
            self.lines.iter().map(|l| width(l)).max().unwrap_or(0),
            self.lines.len() as u32,
        );
        true
    }

    /// The raw text.
    pub(crate) fn raw(&self) -> &str {
        &self.raw
    }

    /// Widest line and line count.
    pub(crate) fn size(&self) -> Expanse {
        self.size
    }

    /// Draw the lines inside `rect`, placed by alignment and clipped.
    pub(crate) fn draw(&self, surface: &mut dyn Surface, rect: Rect, align: (Align, Align), style: Style) {
        let top = align.1.offset(self.size.h, rect.h);
        for (i, line) in self.lines.iter().enumerate().take(rect.h as usize) {
            let y = top + i as u32;
            if y >= rect.h {
                break;
            }
            let shown = clip(line, rect.w);
            let left = align.0.offset(width(shown), rect.w);
            surface.draw_text(Point::new(rect.tl.x + left, rect.tl.y + y), shown, style);
        }
    }
}
