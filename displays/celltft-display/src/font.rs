//! Bitmap font for the cell renderer
//!
//! Glyphs are looked up one pixel row at a time. In a row byte bit 0 is the
//! leftmost pixel.

/// Fixed-cell bitmap font
pub trait Font {
    /// Cell width in pixels (at most 8)
    const WIDTH: usize;
    /// Cell height in pixels
    const HEIGHT: usize;

    /// Pixel row `row` of the glyph for character code `ch`
    fn glyph_row(&self, ch: u8, row: usize) -> u8;
}

/// Codes of the block and frame glyphs used by the widgets
pub mod glyph {
    pub const EMPTY: u8 = b' ';
    pub const ARROW_L: u8 = 0x80;
    pub const ARROW_R: u8 = 0x81;
    pub const HASH1: u8 = 0x82;
    pub const HASH2: u8 = 0x83;
    /// Horizontal line, top and bottom frame edges
    pub const FRAME_H: u8 = 0x84;
    /// Vertical line, left and right frame edges
    pub const FRAME_V: u8 = 0x85;
    pub const FRAME_NW: u8 = 0x86;
    pub const FRAME_NE: u8 = 0x87;
    pub const FRAME_SW: u8 = 0x88;
    pub const FRAME_SE: u8 = 0x89;
    pub const FULL: u8 = 0x8A;
    pub const HALF_W: u8 = 0x8B;
    pub const HALF_E: u8 = 0x8C;
    pub const HALF_N: u8 = 0x8D;
    pub const HALF_S: u8 = 0x8E;
    pub const DOT: u8 = 0x8F;
}

/// 6×8 cell font: 5×7 ASCII glyphs plus the [`glyph`] set
#[derive(Debug, Clone, Copy, Default)]
pub struct Font6x8;

impl Font for Font6x8 {
    const WIDTH: usize = 6;
    const HEIGHT: usize = 8;

    fn glyph_row(&self, ch: u8, row: usize) -> u8 {
        if row >= Self::HEIGHT {
            return 0;
        }
        match ch {
            0x20..=0x7E => {
                // Column-major source: bit `row` of each column byte
                let cols = &ASCII_5X7[(ch - 0x20) as usize];
                cols.iter()
                    .enumerate()
                    .fold(0, |acc, (x, col)| acc | (((col >> row) & 1) << x))
            }
            0x80..=0x8F => SHAPES[(ch - 0x80) as usize][row],
            _ => 0,
        }
    }
}

/// Printable ASCII, five column bytes per glyph, bit 0 = top row
#[rustfmt::skip]
const ASCII_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x08, 0x14, 0x54, 0x54, 0x3C], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x02, 0x01, 0x02, 0x04, 0x02], // ~
];

/// Block and frame glyphs `0x80..=0x8F`, row-major, full 6-pixel width
#[rustfmt::skip]
const SHAPES: [[u8; 8]; 16] = [
    [0x00, 0x08, 0x0C, 0x0E, 0x0C, 0x08, 0x00, 0x00], // ARROW_L
    [0x00, 0x02, 0x06, 0x0E, 0x06, 0x02, 0x00, 0x00], // ARROW_R
    [0x15, 0x00, 0x2A, 0x00, 0x15, 0x00, 0x2A, 0x00], // HASH1
    [0x15, 0x2A, 0x15, 0x2A, 0x15, 0x2A, 0x15, 0x2A], // HASH2
    [0x00, 0x00, 0x00, 0x3F, 0x00, 0x00, 0x00, 0x00], // FRAME_H
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // FRAME_V
    [0x00, 0x00, 0x00, 0x3C, 0x04, 0x04, 0x04, 0x04], // FRAME_NW
    [0x00, 0x00, 0x00, 0x07, 0x04, 0x04, 0x04, 0x04], // FRAME_NE
    [0x04, 0x04, 0x04, 0x3C, 0x00, 0x00, 0x00, 0x00], // FRAME_SW
    [0x04, 0x04, 0x04, 0x07, 0x00, 0x00, 0x00, 0x00], // FRAME_SE
    [0x3F, 0x3F, 0x3F, 0x3F, 0x3F, 0x3F, 0x3F, 0x3F], // FULL
    [0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07], // HALF_W
    [0x38, 0x38, 0x38, 0x38, 0x38, 0x38, 0x38, 0x38], // HALF_E
    [0x3F, 0x3F, 0x3F, 0x3F, 0x00, 0x00, 0x00, 0x00], // HALF_N
    [0x00, 0x00, 0x00, 0x00, 0x3F, 0x3F, 0x3F, 0x3F], // HALF_S
    [0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00, 0x00, 0x00], // DOT
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_and_unknown_are_blank() {
        let font = Font6x8;
        for row in 0..8 {
            assert_eq!(font.glyph_row(b' ', row), 0);
            assert_eq!(font.glyph_row(0, row), 0);
            assert_eq!(font.glyph_row(0xFF, row), 0);
        }
    }

    #[test]
    fn test_column_major_transpose() {
        let font = Font6x8;
        // '|' is a single full column in the middle
        for row in 0..7 {
            assert_eq!(font.glyph_row(b'|', row), 0b00100);
        }
        assert_eq!(font.glyph_row(b'|', 7), 0);
        // '_' is the bottom glyph row across all five columns
        assert_eq!(font.glyph_row(b'_', 6), 0b11111);
        assert_eq!(font.glyph_row(b'_', 0), 0);
    }

    #[test]
    fn test_sixth_column_is_spacing() {
        let font = Font6x8;
        for ch in 0x20..=0x7E {
            for row in 0..8 {
                assert_eq!(font.glyph_row(ch, row) & 0x20, 0);
            }
        }
    }

    #[test]
    fn test_block_glyphs() {
        let font = Font6x8;
        assert_eq!(font.glyph_row(glyph::FULL, 4), 0x3F);
        assert_eq!(font.glyph_row(glyph::HALF_W, 4), 0x07);
        assert_eq!(font.glyph_row(glyph::FULL, 8), 0);
    }
}
