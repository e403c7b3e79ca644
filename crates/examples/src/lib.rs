//! Example widget trees used by trellis demos.

use std::{fs::File, path::Path, sync::Mutex};

use tracing::{Level, debug};
use tracing_subscriber::fmt;
use trellis::{
    Context, EventOutcome, Result, Widget,
    event::{Event, Key, KeyCode},
};

/// Form gym example tree.
pub mod formgym;
/// Scroll gym example tree.
pub mod scrollgym;

#[cfg(test)]
mod tests;

/// Send tracing output to a file. The terminal belongs to the UI while a
/// demo runs, so logs can't go to stderr.
pub fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let format = fmt::format()
        .with_level(true)
        .with_line_number(true)
        .with_ansi(false)
        .without_time()
        .compact();
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_max_level(Level::TRACE)
        .event_format(format)
        .init();
    Ok(())
}

/// The top of every demo tree. Routes events to its child, and exits on
/// Escape or Ctrl-C if the child doesn't want them.
#[derive(Debug, Default)]
pub struct Shell;

impl Widget for Shell {
    fn on_event(&mut self, event: &Event, cx: &mut Context<'_>) -> Result<EventOutcome> {
        if cx.route_event(event)?.is_handled() {
            return Ok(EventOutcome::Handle);
        }
        if event.is_key(KeyCode::Esc) || *event == Event::Key(Key::ctrl('c')) {
            debug!("quit");
            cx.request_exit(0);
            return Ok(EventOutcome::Handle);
        }
        Ok(EventOutcome::Ignore)
    }
}
