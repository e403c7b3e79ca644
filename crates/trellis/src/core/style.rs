/// A terminal color value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's own default.
    #[default]
    Reset,
    /// Black.
    Black,
    /// Dark grey.
    DarkGrey,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
    /// Grey.
    Grey,
    /// RGB color.
    Rgb {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
    },
    /// An ANSI 256-color palette index.
    AnsiValue(u8),
}

/// A text attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Attr {
    /// Bold text.
    Bold,
    /// Dim text.
    Dim,
    /// Reversed foreground and background.
    Reverse,
    /// Underlined text.
    Underline,
}

/// A set of active text attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct AttrSet {
    /// Bold flag.
    pub bold: bool,
    /// Dim flag.
    pub dim: bool,
    /// Reverse flag.
    pub reverse: bool,
    /// Underline flag.
    pub underline: bool,
}

impl AttrSet {
    /// Construct a set of text attributes with a single attribute turned on.
    pub fn new(attr: Attr) -> Self {
        Self::default().with(attr)
    }

    /// Is this attribute set empty?
    pub fn is_empty(&self) -> bool {
        !(self.bold || self.dim || self.reverse || self.underline)
    }

    /// A helper for progressive construction of attribute sets.
    pub fn with(mut self, attr: Attr) -> Self {
        match attr {
            Attr::Bold => self.bold = true,
            Attr::Dim => self.dim = true,
            Attr::Reverse => self.reverse = true,
            Attr::Underline => self.underline = true,
        };
        self
    }
}

/// A complete cell style: colors plus attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Text attributes.
    pub attrs: AttrSet,
}

impl Style {
    /// A style with the given colors and no attributes.
    pub fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: AttrSet::default(),
        }
    }

    /// Return a copy with an attribute added.
    pub fn with(mut self, attr: Attr) -> Self {
        self.attrs = self.attrs.with(attr);
        self
    }
}
