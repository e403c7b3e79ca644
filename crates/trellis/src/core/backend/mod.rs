/// Crossterm backend implementation.
pub mod crossterm;
/// In-memory backend and scripted input for tests.
pub mod test;

use std::fmt::Debug;

use crate::{core::event::Input, error::Result, geom::Expanse, render::RenderBackend};

/// A terminal that a [`Root`](crate::Root) can drive: somewhere to render,
/// plus control over the terminal session.
pub trait Backend: RenderBackend + Debug {
    /// Current terminal size.
    fn size(&self) -> Result<Expanse>;

    /// Take control of the terminal.
    fn start(&mut self) -> Result<()>;

    /// Release control of the terminal.
    fn stop(&mut self) -> Result<()>;
}

/// A source of raw input. `next` blocks until input is available and
/// returns `None` once the source is exhausted.
pub trait InputSource {
    /// Wait for the next input.
    fn next(&mut self) -> Result<Option<Input>>;
}
