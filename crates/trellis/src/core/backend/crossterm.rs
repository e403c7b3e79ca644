use std::{
    io::{self, Stderr, Write},
    panic,
};

use color_backtrace::{BacktracePrinter, default_output_stream};
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor as ccursor, event as cevent, style, terminal,
};
use scopeguard::defer;
use tracing::{debug, warn};

use crate::{
    Root,
    backend::{Backend, InputSource},
    error::Result,
    event::{Event, Input, Key, KeyCode, Mods},
    geom::{Expanse, Point},
    render::RenderBackend,
    style::{Color, Style},
};

/// Translate a trellis color into a crossterm color.
fn translate_color(c: Color) -> style::Color {
    match c {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::DarkGrey => style::Color::DarkGrey,
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Yellow => style::Color::Yellow,
        Color::Blue => style::Color::Blue,
        Color::Magenta => style::Color::Magenta,
        Color::Cyan => style::Color::Cyan,
        Color::White => style::Color::White,
        Color::Grey => style::Color::Grey,
        Color::Rgb { r, g, b } => style::Color::Rgb { r, g, b },
        Color::AnsiValue(a) => style::Color::AnsiValue(a),
    }
}

/// Restore the terminal to cooked mode, ignoring failures.
fn restore_terminal() {
    let mut stderr = io::stderr();
    #[allow(unused_must_use)]
    {
        crossterm::execute!(stderr, terminal::LeaveAlternateScreen, ccursor::Show);
        terminal::disable_raw_mode();
    }
}

/// A backend that drives a real terminal through crossterm, writing to
/// stderr.
#[derive(Debug)]
pub struct CrosstermBackend {
    /// Output stream.
    fp: Stderr,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self { fp: io::stderr() }
    }
}

impl CrosstermBackend {
    /// Queue style changes.
    fn queue_style(&mut self, s: &Style) -> io::Result<()> {
        // Reset first: attributes set after a color reset survive, colors set
        // before it do not.
        self.fp
            .queue(style::SetAttribute(style::Attribute::Reset))?;
        if s.attrs.bold {
            self.fp.queue(style::SetAttribute(style::Attribute::Bold))?;
        }
        if s.attrs.dim {
            self.fp.queue(style::SetAttribute(style::Attribute::Dim))?;
        }
        if s.attrs.reverse {
            self.fp
                .queue(style::SetAttribute(style::Attribute::Reverse))?;
        }
        if s.attrs.underline {
            self.fp
                .queue(style::SetAttribute(style::Attribute::Underlined))?;
        }
        self.fp
            .queue(style::SetForegroundColor(translate_color(s.fg)))?;
        self.fp
            .queue(style::SetBackgroundColor(translate_color(s.bg)))?;
        Ok(())
    }

    /// Queue a text write at a location.
    fn queue_text(&mut self, loc: Point, txt: &str) -> io::Result<()> {
        self.fp.queue(ccursor::MoveTo(clamp16(loc.x), clamp16(loc.y)))?;
        self.fp.queue(style::Print(txt))?;
        Ok(())
    }

    /// Queue a cursor placement.
    fn queue_cursor(&mut self, loc: Option<Point>) -> io::Result<()> {
        match loc {
            Some(p) => {
                self.fp.queue(ccursor::MoveTo(clamp16(p.x), clamp16(p.y)))?;
                self.fp.queue(ccursor::Show)?;
            }
            None => {
                self.fp.queue(ccursor::Hide)?;
            }
        }
        Ok(())
    }

    /// Enter raw mode on the alternate screen.
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.fp.execute(terminal::EnterAlternateScreen)?;
        self.fp.execute(ccursor::Hide)?;
        Ok(())
    }

    /// Leave the alternate screen and restore cooked mode.
    fn exit(&mut self) -> io::Result<()> {
        self.fp.execute(terminal::LeaveAlternateScreen)?;
        self.fp.execute(ccursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

/// Terminal coordinates are 16-bit.
fn clamp16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

impl RenderBackend for CrosstermBackend {
    fn style(&mut self, style: &Style) -> Result<()> {
        Ok(self.queue_style(style)?)
    }

    fn text(&mut self, loc: Point, txt: &str) -> Result<()> {
        Ok(self.queue_text(loc, txt)?)
    }

    fn cursor(&mut self, loc: Option<Point>) -> Result<()> {
        Ok(self.queue_cursor(loc)?)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.fp.flush()?)
    }
}

impl Backend for CrosstermBackend {
    fn size(&self) -> Result<Expanse> {
        let (w, h) = terminal::size()?;
        Ok(Expanse::new(u32::from(w), u32::from(h)))
    }

    fn start(&mut self) -> Result<()> {
        Ok(self.enter()?)
    }

    fn stop(&mut self) -> Result<()> {
        Ok(self.exit()?)
    }
}

/// Translate crossterm modifiers.
fn translate_key_modifiers(mods: cevent::KeyModifiers) -> Mods {
    Mods {
        shift: mods.contains(cevent::KeyModifiers::SHIFT),
        ctrl: mods.contains(cevent::KeyModifiers::CONTROL),
        alt: mods.contains(cevent::KeyModifiers::ALT),
    }
}

/// Translate a crossterm key press. Characters typed without control or alt
/// become text; keys with no trellis equivalent are dropped.
fn translate_key(k: cevent::KeyEvent) -> Option<Event> {
    let mods = translate_key_modifiers(k.modifiers);
    let code = match k.code {
        cevent::KeyCode::Char(c) if !mods.ctrl && !mods.alt => {
            return Some(Event::Text(c.to_string()));
        }
        cevent::KeyCode::Char(c) => KeyCode::Char(c),
        cevent::KeyCode::Backspace => KeyCode::Backspace,
        cevent::KeyCode::Enter => KeyCode::Enter,
        cevent::KeyCode::Left => KeyCode::Left,
        cevent::KeyCode::Right => KeyCode::Right,
        cevent::KeyCode::Up => KeyCode::Up,
        cevent::KeyCode::Down => KeyCode::Down,
        cevent::KeyCode::Home => KeyCode::Home,
        cevent::KeyCode::End => KeyCode::End,
        cevent::KeyCode::PageUp => KeyCode::PageUp,
        cevent::KeyCode::PageDown => KeyCode::PageDown,
        cevent::KeyCode::Tab => KeyCode::Tab,
        cevent::KeyCode::BackTab => KeyCode::BackTab,
        cevent::KeyCode::Delete => KeyCode::Delete,
        cevent::KeyCode::Insert => KeyCode::Insert,
        cevent::KeyCode::Esc => KeyCode::Esc,
        cevent::KeyCode::F(x) => KeyCode::F(x),
        _ => return None,
    };
    Some(Event::Key(Key { mods, code }))
}

/// Input read from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn next(&mut self) -> Result<Option<Input>> {
        loop {
            match cevent::read()? {
                cevent::Event::Key(k) if k.kind != cevent::KeyEventKind::Release => {
                    if let Some(e) = translate_key(k) {
                        return Ok(Some(Input::Event(e)));
                    }
                }
                cevent::Event::Resize(..) => return Ok(Some(Input::Resize)),
                cevent::Event::Paste(s) => return Ok(Some(Input::Event(Event::Text(s)))),
                other => debug!(event = ?other, "ignored terminal event"),
            }
        }
    }
}

/// Run a tree on the real terminal until a widget requests exit. The
/// terminal is restored on return and on panic.
pub fn runloop(root: &mut Root<CrosstermBackend>) -> Result<i32> {
    panic::set_hook(Box::new(|pi| {
        restore_terminal();
        #[allow(unused_must_use)]
        {
            BacktracePrinter::new().print_panic_info(pi, &mut default_output_stream());
        }
    }));

    defer! {
        restore_terminal();
    }

    let mut input = CrosstermInput;
    let code = root.run(&mut input);
    if let Err(e) = &code {
        warn!(error = %e, "run loop failed");
    }
    code
}
