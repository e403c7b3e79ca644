use crate::{
    core::{style::Style, termbuf::TermBuf},
    geom::{Point, Rect},
    layout::Sides,
};

/// A character-cell drawing target.
///
/// Every operation clips to the surface bounds. Nodes draw in the coordinate
/// space of the surface they were handed: the screen, or the off-screen
/// buffer of the nearest enclosing viewport.
pub trait Surface {
    /// Bounds of the drawable area, anchored at the origin.
    fn bounds(&self) -> Rect;

    /// Fill a rectangle with a character.
    fn fill_rect(&mut self, rect: Rect, style: Style, ch: char);

    /// Draw a single line of text starting at `pos`. Text is truncated at the
    /// surface edge.
    fn draw_text(&mut self, pos: Point, text: &str, style: Style);

    /// Draw line-art borders along the selected sides of `rect`.
    fn draw_border(&mut self, rect: Rect, sides: Sides, style: Style);

    /// Copy the `src_rect` region of `src` so that its top-left lands on
    /// `dest`.
    fn blit(&mut self, src: &TermBuf, src_rect: Rect, dest: Point);
}

/// The output half of a terminal backend.
pub trait RenderBackend {
    /// Apply a style to the following text output.
    fn style(&mut self, style: &Style) -> crate::Result<()>;
    /// Output text at a location.
    fn text(&mut self, loc: Point, txt: &str) -> crate::Result<()>;
    /// Show the hardware cursor at a location, or hide it.
    fn cursor(&mut self, loc: Option<Point>) -> crate::Result<()>;
    /// Flush output to the terminal.
    fn flush(&mut self) -> crate::Result<()>;
}
