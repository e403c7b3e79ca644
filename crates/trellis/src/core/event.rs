//! Input events delivered through the tree.

/// Modifier keys held during a key press.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub ctrl: bool,
    /// Alt or meta.
    pub alt: bool,
}

/// Non-printable key codes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KeyCode {
    /// Backspace.
    Backspace,
    /// Enter or return.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Tab.
    Tab,
    /// Shift-Tab.
    BackTab,
    /// Delete.
    Delete,
    /// Insert.
    Insert,
    /// Escape.
    Esc,
    /// Function key.
    F(u8),
    /// A character pressed together with control or alt.
    Char(char),
}

/// A control key press: a code plus modifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Held modifiers.
    pub mods: Mods,
    /// The key itself.
    pub code: KeyCode,
}

impl Key {
    /// A key press with no modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self {
            mods: Mods::default(),
            code,
        }
    }

    /// A character pressed with control held.
    pub fn ctrl(c: char) -> Self {
        Self {
            mods: Mods {
                ctrl: true,
                ..Mods::default()
            },
            code: KeyCode::Char(c),
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

/// An event routed down the focus path.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Event {
    /// Printable text, typically a single typed character.
    Text(String),
    /// A control key press.
    Key(Key),
    /// Focus entering (`true`) or leaving (`false`) the receiving node.
    Focus(bool),
}

impl Event {
    /// Is this the forward focus-cycling key?
    pub fn is_tab(&self) -> bool {
        matches!(self, Self::Key(Key { code: KeyCode::Tab, mods }) if !mods.shift)
    }

    /// Is this the backward focus-cycling key?
    pub fn is_backtab(&self) -> bool {
        matches!(
            self,
            Self::Key(Key {
                code: KeyCode::BackTab,
                ..
            }) | Self::Key(Key {
                code: KeyCode::Tab,
                mods: Mods { shift: true, .. },
            })
        )
    }

    /// Is this a plain press of the given key?
    pub fn is_key(&self, code: KeyCode) -> bool {
        matches!(self, Self::Key(k) if k.code == code && k.mods == Mods::default())
    }
}

impl From<KeyCode> for Event {
    fn from(code: KeyCode) -> Self {
        Self::Key(Key::plain(code))
    }
}

impl From<Key> for Event {
    fn from(k: Key) -> Self {
        Self::Key(k)
    }
}

impl From<&str> for Event {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<char> for Event {
    fn from(c: char) -> Self {
        Self::Text(c.to_string())
    }
}

/// Input delivered by an input source to the root driver.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Input {
    /// An event for the tree.
    Event(Event),
    /// The terminal changed size.
    Resize,
}
