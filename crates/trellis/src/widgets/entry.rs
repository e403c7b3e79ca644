use tracing::trace;

use crate::{
    Context, DrawCx, LayoutCx, SizeCx,
    error::Result,
    event::{Event, KeyCode, Mods},
    geom::{Expanse, Point, Rect},
    scroll::ScrollState,
    style::Style,
    widget::{EventOutcome, Widget},
    widgets::text::clip,
};

/// Configuration for an [`Entry`].
///
/// Defaults: single line, 20 columns wide, default style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryConfig {
    /// Preferred width in columns.
    pub width: u32,
    /// Preferred height in rows.
    pub height: u32,
    /// Does Enter split the line?
    pub multiline: bool,
    /// Text and fill style.
    pub style: Style,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 1,
            multiline: false,
            style: Style::default(),
        }
    }
}

impl EntryConfig {
    /// Set the preferred size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Allow or forbid line breaks.
    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// An editable text field.
///
/// The entry scrolls its own content: it is scrollable, so indicators can be
/// bound to it, and it always keeps the cursor in view. While focused it
/// claims the terminal cursor, which also keeps the cursor visible inside
/// any enclosing viewport. Cursor columns count characters.
#[derive(Debug)]
pub struct Entry {
    /// The text, one entry per line. Never empty.
    lines: Vec<Vec<char>>,
    /// Cursor column and row.
    cursor: Point,
    /// Does the entry hold focus?
    focused: bool,
    /// Scroll position over the content.
    scroll: ScrollState,
    /// Configuration.
    config: EntryConfig,
}

impl Default for Entry {
    fn default() -> Self {
        Self::with_config(EntryConfig::default())
    }
}

impl Entry {
    /// An empty single-line entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty multi-line entry, five rows tall.
    pub fn multiline() -> Self {
        Self::with_config(EntryConfig::default().with_size(20, 5).with_multiline(true))
    }

    /// An empty entry with an explicit configuration.
    pub fn with_config(config: EntryConfig) -> Self {
        Self {
            lines: vec![Vec::new()],
            cursor: Point::zero(),
            focused: false,
            scroll: ScrollState::default(),
            config,
        }
    }

    /// Set the initial text, with the cursor at its end.
    pub fn with_text(mut self, text: &str) -> Self {
        self.load(text);
        self
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the text, moving the cursor to its end.
    pub fn set_text(&mut self, text: &str, cx: &mut Context<'_>) -> Result<()> {
        self.load(text);
        self.settle(cx)
    }

    /// The cursor column and row.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Does the entry hold focus?
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Split text into lines, dropping breaks a single-line entry cannot
    /// hold.
    fn load(&mut self, text: &str) {
        self.lines = if self.config.multiline {
            text.split('\n').map(|l| l.chars().collect()).collect()
        } else {
            vec![text.chars().filter(|c| *c != '\n').collect()]
        };
        let row = self.lines.len() - 1;
        self.cursor = Point::new(self.lines[row].len() as u32, row as u32);
    }

    /// The line under the cursor.
    fn line(&mut self) -> &mut Vec<char> {
        let row = self.cursor.y as usize;
        &mut self.lines[row]
    }

    /// Length of a line, in characters.
    fn len_of(&self, row: u32) -> u32 {
        self.lines.get(row as usize).map_or(0, |l| l.len() as u32)
    }

    /// Content size: the longest line plus a cell for the cursor after it.
    fn content(&self) -> Expanse {
        let w = self.lines.iter().map(Vec::len).max().unwrap_or(0) as u32;
        Expanse::new(w + 1, self.lines.len() as u32)
    }

    /// The cell under the cursor, in content coordinates.
    fn cursor_rect(&self) -> Rect {
        Rect::at(self.cursor, Expanse::new(1, 1))
    }

    /// Insert typed text at the cursor.
    fn insert(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                if self.config.multiline {
                    self.split();
                }
                continue;
            }
            let col = self.cursor.x as usize;
            self.line().insert(col, ch);
            self.cursor.x += 1;
        }
    }

    /// Break the line at the cursor.
    fn split(&mut self) {
        let col = self.cursor.x as usize;
        let rest = self.line().split_off(col);
        let row = self.cursor.y as usize + 1;
        self.lines.insert(row, rest);
        self.cursor = Point::new(0, row as u32);
    }

    /// Delete before the cursor, joining with the previous line at a line
    /// start. Returns false if there was nothing to delete.
    fn backspace(&mut self) -> bool {
        if self.cursor.x > 0 {
            self.cursor.x -= 1;
            let col = self.cursor.x as usize;
            self.line().remove(col);
            true
        } else if self.cursor.y > 0 {
            let tail = self.lines.remove(self.cursor.y as usize);
            self.cursor.y -= 1;
            self.cursor.x = self.len_of(self.cursor.y);
            self.line().extend(tail);
            true
        } else {
            false
        }
    }

    /// Delete under the cursor, joining with the next line at a line end.
    /// Returns false if there was nothing to delete.
    fn delete(&mut self) -> bool {
        let col = self.cursor.x as usize;
        let next = self.cursor.y as usize + 1;
        if col < self.line().len() {
            self.line().remove(col);
            true
        } else if next < self.lines.len() {
            let tail = self.lines.remove(next);
            self.line().extend(tail);
            true
        } else {
            false
        }
    }

    /// Move the cursor. Vertical moves keep the column where the target
    /// line allows.
    fn navigate(&mut self, code: KeyCode) -> bool {
        let before = self.cursor;
        let last = self.lines.len() as u32 - 1;
        match code {
            KeyCode::Left if self.cursor.x > 0 => self.cursor.x -= 1,
            KeyCode::Left if self.cursor.y > 0 => {
                self.cursor.y -= 1;
                self.cursor.x = self.len_of(self.cursor.y);
            }
            KeyCode::Right if self.cursor.x < self.len_of(self.cursor.y) => self.cursor.x += 1,
            KeyCode::Right if self.cursor.y < last => self.cursor = Point::new(0, self.cursor.y + 1),
            KeyCode::Up if self.cursor.y > 0 => self.cursor.y -= 1,
            KeyCode::Down if self.cursor.y < last => self.cursor.y += 1,
            KeyCode::Home => self.cursor.x = 0,
            KeyCode::End => self.cursor.x = self.len_of(self.cursor.y),
            _ => {}
        }
        self.cursor.x = self.cursor.x.min(self.len_of(self.cursor.y));
        self.cursor != before
    }

    /// Bring scroll state, repaint and cursor claim up to date after the
    /// text or cursor changed.
    fn settle(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let mut moved = self.scroll.set_bounds(self.content(), cx.size());
        moved |= self.scroll.reveal(self.cursor_rect());
        if moved {
            trace!(position = ?self.scroll.position(), "entry scroll");
            cx.scrolled(&self.scroll)?;
        }
        cx.invalidate()?;
        if self.focused {
            self.claim_cursor(cx)?;
        }
        Ok(())
    }

    /// Claim the terminal cursor at its on-screen position.
    fn claim_cursor(&self, cx: &mut Context<'_>) -> Result<()> {
        let at = self.cursor.saturating_sub(self.scroll.position());
        cx.grab_input(Rect::at(at, Expanse::new(1, 1)), Some(at), true)
    }
}

impl Widget for Entry {
    fn min_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::new(1, 1)
    }

    fn pref_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::new(self.config.width, self.config.height)
    }

    fn relayout(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let mut changed = self.scroll.set_bounds(self.content(), cx.size());
        changed |= self.scroll.reveal(self.cursor_rect());
        if changed {
            cx.refresh_indicators(&self.scroll)?;
        }
        Ok(())
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        let rect = cx.rect();
        let style = self.config.style;
        let pos = self.scroll.position();
        let surface = cx.surface();
        surface.fill_rect(rect, style, ' ');
        let rows = self.lines.iter().skip(pos.y as usize).take(rect.h as usize);
        for (i, line) in rows.enumerate() {
            let shown: String = line.iter().skip(pos.x as usize).collect();
            let at = Point::new(rect.tl.x, rect.tl.y + i as u32);
            surface.draw_text(at, clip(&shown, rect.w), style);
        }
        Ok(())
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_>) -> Result<EventOutcome> {
        // None: not ours. Some(changed): consumed, and whether anything moved.
        let outcome = match event {
            Event::Focus(on) => {
                self.focused = *on;
                if !*on {
                    cx.release_input()?;
                }
                Some(true)
            }
            Event::Text(t) => {
                self.insert(t);
                Some(true)
            }
            Event::Key(_) if event.is_key(KeyCode::Enter) && self.config.multiline => {
                self.split();
                Some(true)
            }
            Event::Key(_) if event.is_key(KeyCode::Backspace) => Some(self.backspace()),
            Event::Key(_) if event.is_key(KeyCode::Delete) => Some(self.delete()),
            Event::Key(k) if k.mods == Mods::default() => match k.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => {
                    Some(self.navigate(k.code))
                }
                KeyCode::Up | KeyCode::Down if self.config.multiline => {
                    Some(self.navigate(k.code))
                }
                _ => None,
            },
            _ => None,
        };
        match outcome {
            Some(changed) => {
                if changed {
                    self.settle(cx)?;
                }
                Ok(EventOutcome::Handle)
            }
            None => Ok(EventOutcome::Ignore),
        }
    }

    fn focus(&mut self, _reverse: bool, _cx: &mut Context<'_>) -> Result<bool> {
        Ok(!self.focused)
    }

    fn scroll_state(&self) -> Option<&ScrollState> {
        Some(&self.scroll)
    }

    fn scroll_state_mut(&mut self) -> Option<&mut ScrollState> {
        Some(&mut self.scroll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TermBuf, Tree, TypedId};

    /// A focused entry of the given size, installed as the root.
    fn setup(entry: Entry, size: Expanse) -> Result<(Tree, TypedId<Entry>)> {
        let mut tree = Tree::new();
        let e = tree.create(entry);
        tree.set_root(e)?;
        tree.assign(e, Point::zero(), size)?;
        tree.layout(e)?;
        tree.event(e, &Event::Focus(true))?;
        Ok((tree, e))
    }

    #[test]
    fn scrolls_to_cursor() -> Result<()> {
        let (mut tree, e) = setup(Entry::new(), Expanse::new(5, 1))?;
        assert_eq!(tree.cursor(), Some(Point::zero()));
        tree.event(e, &Event::from("abcdefg"))?;
        assert_eq!(
            tree.scroll_state(e).map(|s| s.position()),
            Some(Point::new(3, 0))
        );
        assert_eq!(tree.cursor(), Some(Point::new(4, 0)));

        let mut buf = TermBuf::blank((5, 1));
        tree.draw(e, &mut buf)?;
        assert_eq!(buf.lines(), vec!["defg "]);

        tree.event(e, &Event::from(KeyCode::Home))?;
        assert_eq!(tree.cursor(), Some(Point::zero()));
        tree.draw(e, &mut buf)?;
        assert_eq!(buf.lines(), vec!["abcde"]);

        // Single-line entries leave Enter to their ancestors.
        assert_eq!(
            tree.event(e, &Event::from(KeyCode::Enter))?,
            EventOutcome::Ignore
        );
        Ok(())
    }

    #[test]
    fn edits_across_lines() -> Result<()> {
        let (mut tree, e) = setup(Entry::multiline(), Expanse::new(10, 3))?;
        for ev in [
            Event::from("ab"),
            Event::from(KeyCode::Enter),
            Event::from("cd"),
            Event::from(KeyCode::Left),
            Event::from(KeyCode::Left),
        ] {
            tree.event(e, &ev)?;
        }
        assert_eq!(tree.widget::<Entry>(e)?.text(), "ab\ncd");
        assert_eq!(tree.widget::<Entry>(e)?.cursor(), Point::new(0, 1));

        tree.event(e, &Event::from(KeyCode::Backspace))?;
        assert_eq!(tree.widget::<Entry>(e)?.text(), "abcd");
        assert_eq!(tree.widget::<Entry>(e)?.cursor(), Point::new(2, 0));

        tree.event(e, &Event::from(KeyCode::Enter))?;
        tree.event(e, &Event::from(KeyCode::Up))?;
        tree.event(e, &Event::from(KeyCode::End))?;
        tree.event(e, &Event::from(KeyCode::Delete))?;
        assert_eq!(tree.widget::<Entry>(e)?.text(), "abcd");

        let mut buf = TermBuf::blank((10, 3));
        tree.draw(e, &mut buf)?;
        assert_eq!(buf.lines(), vec!["abcd      ", "          ", "          "]);
        assert_eq!(tree.cursor(), Some(Point::new(2, 0)));
        Ok(())
    }
}
