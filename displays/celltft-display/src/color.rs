//! RGB565 colors and the 16-entry attribute palette

/// Panel RGB565 color word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const BLUE25: Self = Self(0x0007);
    pub const BLUE50: Self = Self(0x000F);
    pub const BLUE75: Self = Self(0x0017);
    pub const BLUE: Self = Self(0x001F);
    pub const GREEN25: Self = Self(0x01E0);
    pub const GREEN50: Self = Self(0x03E0);
    pub const GREEN75: Self = Self(0x05E0);
    pub const GREEN: Self = Self(0x07E0);
    pub const CYAN25: Self = Self(0x01E7);
    pub const CYAN50: Self = Self(0x03EF);
    pub const CYAN75: Self = Self(0x05F7);
    pub const CYAN: Self = Self(0x07FF);
    pub const RED25: Self = Self(0x3800);
    pub const RED50: Self = Self(0x7800);
    pub const RED75: Self = Self(0xB800);
    pub const RED: Self = Self(0xF800);
    pub const MAGENTA25: Self = Self(0x3807);
    pub const MAGENTA50: Self = Self(0x780F);
    pub const MAGENTA75: Self = Self(0xB817);
    pub const MAGENTA: Self = Self(0xF81F);
    pub const YELLOW25: Self = Self(0x39E0);
    pub const YELLOW50: Self = Self(0x7BE0);
    pub const YELLOW75: Self = Self(0xBDE0);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const GREY25: Self = Self(0x39E7);
    pub const GREY50: Self = Self(0x7BEF);
    pub const GREY75: Self = Self(0xBDF7);
    pub const WHITE: Self = Self(0xFFFF);

    /// Convert an RGB888 triple, dropping the low bits of each channel
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self((((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16))
    }

    /// Bytes in panel wire order (high byte first)
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// 16-entry attribute palette
///
/// Each entry holds the color used when the index appears as a foreground
/// and the color used when it appears as a background, so dimmed
/// backgrounds can share an index with bright text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    entries: [(Rgb565, Rgb565); 16],
}

impl Default for Palette {
    fn default() -> Self {
        Self::uniform([
            Rgb565::BLACK,
            Rgb565::BLUE50,
            Rgb565::GREEN50,
            Rgb565::CYAN50,
            Rgb565::RED50,
            Rgb565::MAGENTA50,
            Rgb565::YELLOW50,
            Rgb565::GREY75,
            Rgb565::GREY50,
            Rgb565::BLUE,
            Rgb565::GREEN,
            Rgb565::CYAN,
            Rgb565::RED,
            Rgb565::MAGENTA,
            Rgb565::YELLOW,
            Rgb565::WHITE,
        ])
    }
}

impl Palette {
    /// Create a palette from explicit (foreground, background) pairs
    pub const fn new(entries: [(Rgb565, Rgb565); 16]) -> Self {
        Self { entries }
    }

    /// Create a palette using the same color for foreground and background
    pub const fn uniform(colors: [Rgb565; 16]) -> Self {
        let mut entries = [(Rgb565::BLACK, Rgb565::BLACK); 16];
        let mut i = 0;
        while i < 16 {
            entries[i] = (colors[i], colors[i]);
            i += 1;
        }
        Self { entries }
    }

    /// Foreground color of a palette index (low 4 bits used)
    #[inline]
    pub fn fg(&self, index: u8) -> Rgb565 {
        self.entries[(index & 0x0F) as usize].0
    }

    /// Background color of a palette index (low 4 bits used)
    #[inline]
    pub fn bg(&self, index: u8) -> Rgb565 {
        self.entries[(index & 0x0F) as usize].1
    }
}
