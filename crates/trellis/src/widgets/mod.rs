//! Leaf widgets.

mod button;
mod entry;
mod label;
mod scrollbar;
mod spacer;
pub(crate) mod text;

pub use button::{Button, ButtonConfig, CheckBox, RadioBox};
pub use entry::{Entry, EntryConfig};
pub use label::{Label, LabelConfig};
pub use scrollbar::{Scrollbar, ScrollbarConfig};
pub use spacer::Spacer;
