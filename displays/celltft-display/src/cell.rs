//! Character cells and color attributes

/// Color attribute of a cell
///
/// Low nibble: foreground palette index. High nibble: background palette
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attr(pub u8);

impl Attr {
    /// Light grey on black
    pub const DEFAULT: Self = Self::new(7, 0);

    /// Compose an attribute from foreground and background palette indices
    pub const fn new(fg: u8, bg: u8) -> Self {
        Self((fg & 0x0F) | ((bg & 0x0F) << 4))
    }

    /// Foreground palette index
    pub const fn fg(self) -> u8 {
        self.0 & 0x0F
    }

    /// Background palette index
    pub const fn bg(self) -> u8 {
        self.0 >> 4
    }
}

impl Default for Attr {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One character position of the text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    /// Character code (font index)
    pub ch: u8,
    /// Color attribute
    pub attr: Attr,
}

impl Cell {
    pub const fn new(ch: u8, attr: Attr) -> Self {
        Self { ch, attr }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(0, Attr::DEFAULT)
    }
}
