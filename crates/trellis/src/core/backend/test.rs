use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    backend::{Backend, InputSource},
    error::{Error, Result},
    event::{Event, Input},
    geom::{Expanse, Point},
    render::RenderBackend,
    style::Style,
};

/// What a [`TestRender`] has seen.
#[derive(Debug, Default)]
pub struct TestBuf {
    /// Captured text fragments, in output order.
    pub text: Vec<String>,
    /// Where the cursor was last placed.
    pub cursor: Option<Point>,
    /// Number of flushes.
    pub flushes: usize,
    /// Whether the backend currently owns the terminal.
    pub started: bool,
}

impl TestBuf {
    /// Return true if no text has been captured.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Return true if any captured fragment contains the provided substring.
    pub fn contains(&self, s: &str) -> bool {
        self.text.iter().any(|l| l.contains(s))
    }
}

/// A backend for testing, which logs render output instead of writing to a
/// terminal.
#[derive(Debug)]
pub struct TestRender {
    /// Shared buffer of captured output.
    pub buf: Arc<Mutex<TestBuf>>,
    /// The terminal size reported to the root.
    size: Arc<Mutex<Expanse>>,
}

impl TestRender {
    /// Create a backend of the given size. Returns a handle to the captured
    /// output along with the backend itself.
    pub fn create(size: impl Into<Expanse>) -> (Arc<Mutex<TestBuf>>, Self) {
        let tb = Arc::new(Mutex::new(TestBuf::default()));
        let backend = Self {
            buf: tb.clone(),
            size: Arc::new(Mutex::new(size.into())),
        };
        (tb, backend)
    }

    /// A handle through which a test can change the reported terminal size.
    pub fn size_handle(&self) -> Arc<Mutex<Expanse>> {
        self.size.clone()
    }

    /// Lock the capture buffer.
    fn lock(&self) -> Result<MutexGuard<'_, TestBuf>> {
        self.buf
            .lock()
            .map_err(|e| Error::Backend(format!("test buffer poisoned: {e}")))
    }
}

impl RenderBackend for TestRender {
    fn style(&mut self, _style: &Style) -> Result<()> {
        Ok(())
    }

    fn text(&mut self, _loc: Point, txt: &str) -> Result<()> {
        self.lock()?.text.push(txt.to_string());
        Ok(())
    }

    fn cursor(&mut self, loc: Option<Point>) -> Result<()> {
        self.lock()?.cursor = loc;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.lock()?.flushes += 1;
        Ok(())
    }
}

impl Backend for TestRender {
    fn size(&self) -> Result<Expanse> {
        self.size
            .lock()
            .map(|s| *s)
            .map_err(|e| Error::Backend(format!("test size poisoned: {e}")))
    }

    fn start(&mut self) -> Result<()> {
        self.lock()?.started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.lock()?.started = false;
        Ok(())
    }
}

/// An input source that replays a fixed script and then reports exhaustion.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    /// Remaining input.
    queue: VecDeque<Input>,
}

impl ScriptedInput {
    /// Construct an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn event(mut self, event: impl Into<Event>) -> Self {
        self.queue.push_back(Input::Event(event.into()));
        self
    }

    /// Append typed text, one event per character.
    pub fn text(mut self, text: &str) -> Self {
        for c in text.chars() {
            self.queue.push_back(Input::Event(Event::from(c)));
        }
        self
    }

    /// Append a resize notification.
    pub fn resize(mut self) -> Self {
        self.queue.push_back(Input::Resize);
        self
    }
}

impl InputSource for ScriptedInput {
    fn next(&mut self) -> Result<Option<Input>> {
        Ok(self.queue.pop_front())
    }
}
