use unicode_width::UnicodeWidthChar;

use crate::{
    core::{
        render::{RenderBackend, Surface},
        style::Style,
    },
    error::Result,
    geom::{Expanse, Point, Rect},
    layout::Sides,
};

/// A terminal cell with glyph and style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Glyph character.
    pub ch: char,
    /// Style applied to the cell.
    pub style: Style,
    /// True when this cell continues a wide glyph from the previous column.
    pub continuation: bool,
}

impl Cell {
    /// Construct a cell containing a single glyph.
    fn new(ch: char, style: Style) -> Self {
        Self {
            ch,
            style,
            continuation: false,
        }
    }

    /// Construct a continuation cell for a wide glyph.
    fn continuation(style: Style) -> Self {
        Self {
            ch: ' ',
            style,
            continuation: true,
        }
    }
}

/// An in-memory grid of cells. The root draws into one of these before
/// flushing to the terminal, and viewports use them as off-screen buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermBuf {
    /// Buffer dimensions.
    size: Expanse,
    /// Backing cell storage, row-major.
    cells: Vec<Cell>,
}

impl TermBuf {
    /// Construct a buffer filled with the given character and style.
    pub fn new(size: impl Into<Expanse>, ch: char, style: Style) -> Self {
        let size = size.into();
        Self {
            size,
            cells: vec![Cell::new(ch, style); size.area() as usize],
        }
    }

    /// Construct a buffer of blanks in the default style.
    pub fn blank(size: impl Into<Expanse>) -> Self {
        Self::new(size, ' ', Style::default())
    }

    /// Return the buffer size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Return the buffer bounds as a rectangle.
    pub fn rect(&self) -> Rect {
        self.size.rect()
    }

    /// Change the dimensions of the buffer in place. Content in the
    /// overlapping region is kept; new cells are filled with `ch`.
    pub fn resize(&mut self, size: Expanse, ch: char, style: Style) {
        if size == self.size {
            return;
        }
        let mut cells = vec![Cell::new(ch, style); size.area() as usize];
        let keep = self.size.min(size);
        for y in 0..keep.h {
            for x in 0..keep.w {
                let src = y as usize * self.size.w as usize + x as usize;
                let dst = y as usize * size.w as usize + x as usize;
                cells[dst] = self.cells[src].clone();
            }
        }
        self.size = size;
        self.cells = cells;
    }

    /// Convert a point into a cell index.
    fn idx(&self, p: Point) -> Option<usize> {
        if self.rect().contains_point(p) {
            Some(p.y as usize * self.size.w as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Write a cell at a specific point.
    fn put(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = cell;
        }
    }

    /// Get a cell by position.
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// The text of one row, with wide-glyph continuations omitted.
    pub fn line(&self, y: u32) -> String {
        if y >= self.size.h {
            return String::new();
        }
        let start = y as usize * self.size.w as usize;
        self.cells[start..start + self.size.w as usize]
            .iter()
            .filter(|c| !c.continuation)
            .map(|c| c.ch)
            .collect()
    }

    /// The text of every row.
    pub fn lines(&self) -> Vec<String> {
        (0..self.size.h).map(|y| self.line(y)).collect()
    }

    /// Does any row contain the given text?
    pub fn contains_text(&self, txt: &str) -> bool {
        self.lines().iter().any(|l| l.contains(txt))
    }

    /// Render the rows in `rows` using the provided backend, batching runs
    /// of text with the same style.
    fn render_rows<R: RenderBackend>(
        &self,
        rows: impl Iterator<Item = u32>,
        backend: &mut R,
    ) -> Result<bool> {
        let mut wrote = false;
        for y in rows {
            let mut x = 0;
            while x < self.size.w {
                let idx = y as usize * self.size.w as usize + x as usize;
                let style = self.cells[idx].style;
                let start_x = x;
                let mut text = String::new();
                while x < self.size.w {
                    let cell = &self.cells[y as usize * self.size.w as usize + x as usize];
                    if cell.style != style {
                        break;
                    }
                    if !cell.continuation {
                        text.push(cell.ch);
                    }
                    x += 1;
                }
                backend.style(&style)?;
                backend.text(Point { x: start_x, y }, &text)?;
                wrote = true;
            }
        }
        Ok(wrote)
    }

    /// Render this terminal buffer in full.
    pub fn render<R: RenderBackend>(&self, backend: &mut R) -> Result<()> {
        if self.render_rows(0..self.size.h, backend)? {
            backend.flush()?;
        }
        Ok(())
    }

    /// Diff this terminal buffer against a previous state, re-rendering only
    /// the rows that changed.
    pub fn diff<R: RenderBackend>(&self, prev: &Self, backend: &mut R) -> Result<()> {
        if self.size != prev.size {
            return self.render(backend);
        }
        let w = self.size.w as usize;
        let changed = (0..self.size.h).filter(|y| {
            let s = *y as usize * w;
            self.cells[s..s + w] != prev.cells[s..s + w]
        });
        if self.render_rows(changed, backend)? {
            backend.flush()?;
        }
        Ok(())
    }
}

/// Box-drawing glyphs for borders.
mod glyph {
    /// Horizontal line.
    pub(super) const HORIZONTAL: char = '─';
    /// Vertical line.
    pub(super) const VERTICAL: char = '│';
    /// Top-left corner.
    pub(super) const TOP_LEFT: char = '┌';
    /// Top-right corner.
    pub(super) const TOP_RIGHT: char = '┐';
    /// Bottom-left corner.
    pub(super) const BOTTOM_LEFT: char = '└';
    /// Bottom-right corner.
    pub(super) const BOTTOM_RIGHT: char = '┘';
}

impl Surface for TermBuf {
    fn bounds(&self) -> Rect {
        self.rect()
    }

    fn fill_rect(&mut self, rect: Rect, style: Style, ch: char) {
        if let Some(isec) = self.rect().intersect(&rect) {
            for y in isec.tl.y..isec.tl.y + isec.h {
                for x in isec.tl.x..isec.tl.x + isec.w {
                    self.put(Point { x, y }, Cell::new(ch, style));
                }
            }
        }
    }

    fn draw_text(&mut self, pos: Point, text: &str, style: Style) {
        if pos.y >= self.size.h {
            return;
        }
        let mut x = pos.x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as u32;
            if width == 0 {
                continue;
            }
            if x.saturating_add(width) > self.size.w {
                break;
            }
            self.put(Point { x, y: pos.y }, Cell::new(ch, style));
            for i in 1..width {
                self.put(Point { x: x + i, y: pos.y }, Cell::continuation(style));
            }
            x += width;
        }
    }

    fn draw_border(&mut self, rect: Rect, sides: Sides, style: Style) {
        if rect.is_empty() {
            return;
        }
        let right = rect.tl.x + rect.w - 1;
        let bottom = rect.tl.y + rect.h - 1;
        if sides.top {
            self.fill_rect(Rect::new(rect.tl.x, rect.tl.y, rect.w, 1), style, glyph::HORIZONTAL);
        }
        if sides.bottom {
            self.fill_rect(Rect::new(rect.tl.x, bottom, rect.w, 1), style, glyph::HORIZONTAL);
        }
        if sides.left {
            self.fill_rect(Rect::new(rect.tl.x, rect.tl.y, 1, rect.h), style, glyph::VERTICAL);
        }
        if sides.right {
            self.fill_rect(Rect::new(right, rect.tl.y, 1, rect.h), style, glyph::VERTICAL);
        }
        let corners = [
            (sides.top && sides.left, rect.tl.x, rect.tl.y, glyph::TOP_LEFT),
            (sides.top && sides.right, right, rect.tl.y, glyph::TOP_RIGHT),
            (sides.bottom && sides.left, rect.tl.x, bottom, glyph::BOTTOM_LEFT),
            (sides.bottom && sides.right, right, bottom, glyph::BOTTOM_RIGHT),
        ];
        for (on, x, y, ch) in corners {
            if on {
                self.put(Point { x, y }, Cell::new(ch, style));
            }
        }
    }

    fn blit(&mut self, src: &TermBuf, src_rect: Rect, dest: Point) {
        let Some(src_rect) = src.rect().intersect(&src_rect) else {
            return;
        };
        for dy in 0..src_rect.h {
            for dx in 0..src_rect.w {
                let from = Point {
                    x: src_rect.tl.x + dx,
                    y: src_rect.tl.y + dy,
                };
                if let Some(cell) = src.get(from) {
                    let to = Point {
                        x: dest.x.saturating_add(dx),
                        y: dest.y.saturating_add(dy),
                    };
                    self.put(to, cell.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_clips() {
        let mut tb = TermBuf::blank((5, 2));
        tb.draw_text(Point::new(2, 0), "hello", Style::default());
        tb.draw_text(Point::new(0, 5), "nope", Style::default());
        assert_eq!(tb.lines(), vec!["  hel", "     "]);
    }

    #[test]
    fn border() {
        let mut tb = TermBuf::blank((4, 3));
        tb.draw_border(tb.rect(), Sides::all(true), Style::default());
        assert_eq!(tb.lines(), vec!["┌──┐", "│  │", "└──┘"]);

        let mut tb = TermBuf::blank((4, 2));
        tb.draw_border(
            tb.rect(),
            Sides {
                top: true,
                ..Sides::all(false)
            },
            Style::default(),
        );
        assert_eq!(tb.lines(), vec!["────", "    "]);
    }

    #[test]
    fn blit_offsets() {
        let mut src = TermBuf::blank((4, 4));
        src.draw_text(Point::new(0, 2), "abcd", Style::default());
        let mut dst = TermBuf::new((3, 2), '.', Style::default());
        dst.blit(&src, Rect::new(1, 2, 3, 2), Point::new(1, 0));
        assert_eq!(dst.lines(), vec![".bc", ".  "]);
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut tb = TermBuf::blank((3, 1));
        tb.draw_text(Point::zero(), "abc", Style::default());
        tb.resize(Expanse::new(2, 2), '.', Style::default());
        assert_eq!(tb.lines(), vec!["ab", ".."]);
    }
}
