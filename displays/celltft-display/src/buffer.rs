//! Character cell buffer
//!
//! The persistent model of what should be on screen. Every mutator writes
//! cells and widens the dirty rectangle by exactly the cells it touched;
//! writes outside the grid are clipped, never rejected.

use core::fmt::{self, Write as _};

use heapless::String;

use crate::cell::{Attr, Cell};
use crate::dirty::{Coord, DirtyRect};
use crate::font::glyph;

/// Number of character rows on the 160×128 panel with the 6×8 font
pub const SCREEN_ROWS: usize = 16;

/// Number of character columns on the 160×128 panel with the 6×8 font
pub const SCREEN_COLS: usize = 26;

/// W×H grid of character cells with dirty tracking
#[derive(Clone)]
pub struct CellBuffer<const W: usize = SCREEN_COLS, const H: usize = SCREEN_ROWS> {
    cells: [[Cell; W]; H],
    dirty: DirtyRect<W, H>,
    /// Attribute used by text, number, frame and bar-graph output
    attr: Attr,
}

impl<const W: usize, const H: usize> Default for CellBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> CellBuffer<W, H> {
    const MAX_X: Coord = W as Coord;
    const MAX_Y: Coord = H as Coord;

    /// Create a buffer of blank cells
    ///
    /// The whole grid starts dirty so the first render paints the panel.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::default(); W]; H],
            dirty: DirtyRect::full(),
            attr: Attr::DEFAULT,
        }
    }

    /// Set the attribute for subsequent text output
    pub fn set_attr(&mut self, attr: Attr) {
        self.attr = attr;
    }

    /// Current text attribute
    pub fn attr(&self) -> Attr {
        self.attr
    }

    /// Pending dirty rectangle
    pub fn dirty(&self) -> &DirtyRect<W, H> {
        &self.dirty
    }

    /// Mark everything as rendered
    pub fn mark_clean(&mut self) {
        self.dirty.reset();
    }

    /// Mark the whole grid for redraw (e.g. after the panel was reset)
    pub fn mark_all_dirty(&mut self) {
        self.dirty = DirtyRect::full();
    }

    /// Get a cell, or `None` outside the grid
    pub fn cell(&self, x: Coord, y: Coord) -> Option<Cell> {
        if Self::contains(x, y) {
            Some(self.cells[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Get one row of cells
    pub fn row(&self, y: usize) -> Option<&[Cell; W]> {
        self.cells.get(y)
    }

    /// Characters of a row as a string, for diagnostics and tests
    ///
    /// Non-printable codes show as `?`.
    pub fn row_text(&self, y: usize) -> String<W> {
        let mut s = String::new();
        if let Some(row) = self.cells.get(y) {
            for cell in row {
                let ch = match cell.ch {
                    0 => ' ',
                    c @ 0x20..=0x7E => c as char,
                    _ => '?',
                };
                let _ = s.push(ch);
            }
        }
        s
    }

    /// Put one character with an explicit attribute
    pub fn put_char_at(&mut self, x: Coord, y: Coord, ch: u8, attr: Attr) {
        if self.write(x, y, ch, attr) {
            self.dirty.grow(x, y, x + 1, y + 1);
        }
    }

    /// Draw text at a cell position in the current attribute
    ///
    /// Stops at the end of `s`, at a NUL byte or at the right edge. Text
    /// starting left of the grid has its leading characters skipped.
    pub fn text_out(&mut self, x: Coord, y: Coord, s: impl AsRef<[u8]>) {
        self.text_out_n(x, y, s, u16::MAX);
    }

    /// Draw at most `length` characters of `s`
    ///
    /// Characters skipped off the left edge count against `length`.
    pub fn text_out_n(&mut self, x: Coord, y: Coord, s: impl AsRef<[u8]>, length: u16) {
        if x >= Self::MAX_X || y < 0 || y >= Self::MAX_Y {
            return;
        }

        let mut chars = s
            .as_ref()
            .iter()
            .copied()
            .take_while(|&c| c != 0)
            .take(length as usize);

        let mut x = x;
        while x < 0 {
            if chars.next().is_none() {
                return;
            }
            x += 1;
        }

        let x0 = x;
        let attr = self.attr;
        let row = &mut self.cells[y as usize];
        for ch in chars {
            if x >= Self::MAX_X {
                break;
            }
            row[x as usize] = Cell::new(ch, attr);
            x += 1;
        }

        if x > x0 {
            self.dirty.grow(x0, y, x, y + 1);
        }
    }

    /// Format and draw text at a cell position
    ///
    /// Output is limited to one row (`W` bytes) and formatting stops at the
    /// first write that does not fit. A string fragment that overflows is
    /// dropped whole, while padding and single characters are written until
    /// the row is full, so the last piece shown may be cut short.
    pub fn text_fmt(&mut self, x: Coord, y: Coord, args: fmt::Arguments<'_>) {
        let mut line: String<W> = String::new();
        let _ = line.write_fmt(args);
        self.text_out(x, y, line.as_str());
    }

    /// Draw `val / 10^ndecimal` as a fixed-width decimal field
    ///
    /// The field is `ndigits` digits wide, the last `ndecimal` of them after
    /// a decimal point (no point when `ndecimal` is 0). `ndecimal` is capped
    /// at `ndigits`. Integer positions above the most significant digit show
    /// `0` if `leadzero`, else blank. Values too large for the field lose
    /// their high digits.
    pub fn decimal_out(
        &mut self,
        x: Coord,
        y: Coord,
        val: u32,
        ndigits: u16,
        ndecimal: u16,
        leadzero: bool,
    ) {
        if !(0..Self::MAX_Y).contains(&y) {
            return;
        }
        let ndecimal = ndecimal.min(ndigits);
        let width = i32::from(ndigits) + i32::from(ndecimal > 0);
        let attr = self.attr;
        let mut cx = i32::from(x) + width - 1;
        let mut val = val;

        for place in 0..ndigits {
            if cx < 0 {
                break;
            }
            let ch = if val > 0 || place < ndecimal || leadzero {
                b'0' + (val % 10) as u8
            } else {
                b' '
            };
            self.write_wide(cx, y, ch, attr);
            cx -= 1;
            val /= 10;

            if place + 1 == ndecimal {
                self.write_wide(cx, y, b'.', attr);
                cx -= 1;
            }
        }

        let x1 = (i32::from(x) + width).min(i32::from(Self::MAX_X)) as Coord;
        self.dirty.grow(x, y, x1, y + 1);
    }

    /// Fill `[x0, x1) × [y0, y1)` with one character and attribute
    pub fn bar(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord, ch: u8, attr: Attr) {
        let cell = Cell::new(ch, attr);
        let (cx0, cx1) = (x0.clamp(0, Self::MAX_X), x1.clamp(0, Self::MAX_X));
        let (cy0, cy1) = (y0.clamp(0, Self::MAX_Y), y1.clamp(0, Self::MAX_Y));

        for row in &mut self.cells[cy0 as usize..cy1.max(cy0) as usize] {
            for c in &mut row[cx0 as usize..cx1.max(cx0) as usize] {
                *c = cell;
            }
        }

        self.dirty.grow(x0, y0, x1, y1);
    }

    /// Blank the whole grid in the current attribute
    pub fn clear(&mut self) {
        self.bar(0, 0, Self::MAX_X, Self::MAX_Y, b' ', self.attr);
    }

    /// Draw a single-line frame around `[x0, x1) × [y0, y1)`
    ///
    /// The interior is blanked in the current attribute.
    pub fn frame(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let attr = self.attr;
        self.bar(x0, y0, x1, y1, b' ', attr);

        for x in x0..x1 {
            self.write(x, y0, glyph::FRAME_H, attr);
            self.write(x, y1 - 1, glyph::FRAME_H, attr);
        }
        for y in y0..y1 {
            self.write(x0, y, glyph::FRAME_V, attr);
            self.write(x1 - 1, y, glyph::FRAME_V, attr);
        }
        self.write(x0, y0, glyph::FRAME_NW, attr);
        self.write(x1 - 1, y0, glyph::FRAME_NE, attr);
        self.write(x0, y1 - 1, glyph::FRAME_SW, attr);
        self.write(x1 - 1, y1 - 1, glyph::FRAME_SE, attr);
    }

    /// Draw a horizontal bar graph measured in half characters
    ///
    /// Shows `halfchars` out of a `maxhalfchars` capacity: full blocks, a
    /// left-half block for an odd remainder, then blanks for each full pair
    /// of unused capacity.
    pub fn hbar(&mut self, x0: Coord, y0: Coord, halfchars: u8, maxhalfchars: u8) {
        if !(0..Self::MAX_Y).contains(&y0) {
            return;
        }
        let mut filled = halfchars.min(maxhalfchars);
        let mut unused = maxhalfchars - filled;
        let attr = self.attr;
        let mut x = i32::from(x0);

        while filled >= 2 {
            self.write_wide(x, y0, glyph::FULL, attr);
            filled -= 2;
            x += 1;
        }
        if filled > 0 {
            self.write_wide(x, y0, glyph::HALF_W, attr);
            x += 1;
        }
        while unused >= 2 {
            self.write_wide(x, y0, glyph::EMPTY, attr);
            unused -= 2;
            x += 1;
        }

        let x1 = x.min(i32::from(Self::MAX_X)) as Coord;
        self.dirty.grow(x0, y0, x1, y0 + 1);
    }

    fn contains(x: Coord, y: Coord) -> bool {
        (0..Self::MAX_X).contains(&x) && (0..Self::MAX_Y).contains(&y)
    }

    /// Store a cell without touching the dirty rectangle
    fn write(&mut self, x: Coord, y: Coord, ch: u8, attr: Attr) -> bool {
        if Self::contains(x, y) {
            self.cells[y as usize][x as usize] = Cell::new(ch, attr);
            true
        } else {
            false
        }
    }

    /// [`write`](Self::write) for cursors computed past the `Coord` range
    fn write_wide(&mut self, x: i32, y: Coord, ch: u8, attr: Attr) -> bool {
        Coord::try_from(x).map_or(false, |x| self.write(x, y, ch, attr))
    }
}

#[cfg(feature = "defmt")]
impl<const W: usize, const H: usize> defmt::Format for CellBuffer<W, H> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CellBuffer[");
        for y in 0..H {
            if y > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", self.row_text(y).as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dirty::Rect;

    fn clean<const W: usize, const H: usize>() -> CellBuffer<W, H> {
        let mut buf = CellBuffer::new();
        buf.mark_clean();
        buf
    }

    #[test]
    fn test_new_buffer_is_fully_dirty() {
        let buf: CellBuffer<8, 4> = CellBuffer::new();
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 0, 8, 4)));
        assert_eq!(buf.attr(), Attr::new(7, 0));
    }

    #[test]
    fn test_put_char_at() {
        let mut buf = clean::<8, 4>();
        buf.put_char_at(3, 2, b'Z', Attr::new(1, 2));
        assert_eq!(buf.cell(3, 2), Some(Cell::new(b'Z', Attr::new(1, 2))));
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(3, 2, 4, 3)));
    }

    #[test]
    fn test_put_char_outside_is_ignored() {
        let mut buf = clean::<8, 4>();
        buf.put_char_at(8, 0, b'Z', Attr::DEFAULT);
        buf.put_char_at(-1, 0, b'Z', Attr::DEFAULT);
        assert!(buf.dirty().is_empty());
    }

    #[test]
    fn test_text_out() {
        let mut buf = clean::<8, 4>();
        buf.set_attr(Attr::new(14, 1));
        buf.text_out(1, 1, "Hi");
        assert_eq!(buf.row_text(1).as_str(), " Hi     ");
        assert_eq!(buf.cell(2, 1).unwrap().attr, Attr::new(14, 1));
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(1, 1, 3, 2)));
    }

    #[test]
    fn test_text_out_negative_start_skips_leading_chars() {
        let mut buf = clean::<8, 4>();
        buf.text_out(-3, 2, "ABCDEFGHIJ");
        // First three characters fall off the left edge
        assert_eq!(buf.row_text(2).as_str(), "DEFGHIJ ");
        assert_eq!(buf.cell(7, 2), Some(Cell::default()));
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 2, 7, 3)));
    }

    #[test]
    fn test_text_out_clips_right_edge() {
        let mut buf = clean::<8, 4>();
        buf.text_out(5, 0, "overflow");
        assert_eq!(buf.row_text(0).as_str(), "     ove");
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(5, 0, 8, 1)));
    }

    #[test]
    fn test_text_out_length_budget_includes_skipped() {
        let mut buf = clean::<8, 4>();
        buf.text_out_n(-2, 0, "ABCDEF", 4);
        assert_eq!(buf.row_text(0).as_str(), "CD      ");

        let mut buf = clean::<8, 4>();
        buf.text_out_n(-4, 0, "ABCDEF", 4);
        assert!(buf.dirty().is_empty());
    }

    #[test]
    fn test_text_out_stops_at_nul() {
        let mut buf = clean::<8, 4>();
        buf.text_out(0, 0, b"AB\0CD");
        assert_eq!(buf.row_text(0).as_str(), "AB      ");
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 0, 2, 1)));
    }

    #[test]
    fn test_text_out_rows_outside_are_ignored() {
        let mut buf = clean::<8, 4>();
        buf.text_out(0, -1, "A");
        buf.text_out(0, 4, "A");
        buf.text_out(8, 0, "A");
        buf.text_out(-3, 0, "AB");
        assert!(buf.dirty().is_empty());
    }

    #[test]
    fn test_text_fmt() {
        let mut buf = clean::<16, 2>();
        buf.text_fmt(0, 1, format_args!("T={}C", 42));
        assert_eq!(buf.row_text(1).as_str(), "T=42C           ");
    }

    #[test]
    fn test_text_fmt_overflow() {
        let mut buf = clean::<4, 1>();
        buf.text_fmt(0, 0, format_args!("ab{}", 12345));
        assert_eq!(buf.row_text(0).as_str(), "ab  ");

        // Padding goes out a character at a time and is cut at the edge
        buf.text_fmt(0, 0, format_args!("{:>6}", 'z'));
        assert_eq!(buf.row_text(0).as_str(), "    ");
        assert_eq!(buf.cell(3, 0).unwrap().ch, b' ');
    }

    #[test]
    fn test_decimal_out_with_fraction() {
        let mut buf = clean::<8, 4>();
        buf.decimal_out(0, 0, 1234, 4, 2, false);
        assert_eq!(buf.row_text(0).as_str(), "12.34   ");
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 0, 5, 1)));
    }

    #[test]
    fn test_decimal_out_zero_without_leading_zeros() {
        let mut buf = clean::<8, 4>();
        buf.decimal_out(0, 0, 0, 4, 2, false);
        assert_eq!(buf.row_text(0).as_str(), "  .00   ");
    }

    #[test]
    fn test_decimal_out_leading_zeros() {
        let mut buf = clean::<8, 4>();
        buf.decimal_out(1, 0, 7, 4, 1, true);
        assert_eq!(buf.row_text(0).as_str(), " 000.7  ");
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(1, 0, 6, 1)));
    }

    #[test]
    fn test_decimal_out_integer_field() {
        let mut buf = clean::<8, 4>();
        buf.decimal_out(0, 0, 42, 5, 0, false);
        assert_eq!(buf.row_text(0).as_str(), "   42   ");
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 0, 5, 1)));
    }

    #[test]
    fn test_bar_clips() {
        let mut buf = clean::<8, 4>();
        buf.bar(6, 2, 10, 6, b'#', Attr::new(2, 0));
        assert_eq!(buf.row_text(3).as_str(), "      ##");
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(6, 2, 8, 4)));
    }

    #[test]
    fn test_clear() {
        let mut buf = clean::<8, 4>();
        buf.text_out(0, 0, "junk");
        buf.set_attr(Attr::new(0, 4));
        buf.clear();
        assert_eq!(buf.cell(0, 0), Some(Cell::new(b' ', Attr::new(0, 4))));
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 0, 8, 4)));
    }

    #[test]
    fn test_frame() {
        let mut buf = clean::<8, 4>();
        buf.text_out(0, 1, "XXXXXXXX");
        buf.frame(1, 0, 5, 3);

        assert_eq!(buf.cell(1, 0).unwrap().ch, glyph::FRAME_NW);
        assert_eq!(buf.cell(4, 0).unwrap().ch, glyph::FRAME_NE);
        assert_eq!(buf.cell(1, 2).unwrap().ch, glyph::FRAME_SW);
        assert_eq!(buf.cell(4, 2).unwrap().ch, glyph::FRAME_SE);
        assert_eq!(buf.cell(2, 0).unwrap().ch, glyph::FRAME_H);
        assert_eq!(buf.cell(1, 1).unwrap().ch, glyph::FRAME_V);
        // Interior blanked, outside untouched
        assert_eq!(buf.cell(2, 1).unwrap().ch, b' ');
        assert_eq!(buf.cell(0, 1).unwrap().ch, b'X');
        assert_eq!(buf.cell(5, 1).unwrap().ch, b'X');
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 0, 8, 3)));
    }

    #[test]
    fn test_hbar_odd_fill() {
        let mut buf = clean::<8, 4>();
        buf.hbar(0, 0, 5, 10);
        let row: [u8; 5] = core::array::from_fn(|x| buf.cell(x as Coord, 0).unwrap().ch);
        assert_eq!(
            row,
            [glyph::FULL, glyph::FULL, glyph::HALF_W, b' ', b' ']
        );
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 0, 5, 1)));
    }

    #[test]
    fn test_hbar_never_exceeds_capacity() {
        let mut buf = clean::<8, 4>();
        buf.text_out(0, 0, "........");
        buf.hbar(0, 0, 9, 6);
        assert_eq!(buf.cell(2, 0).unwrap().ch, glyph::FULL);
        assert_eq!(buf.cell(3, 0).unwrap().ch, b'.');
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 0, 8, 1)));

        let mut buf = clean::<8, 4>();
        buf.hbar(1, 1, 9, 6);
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(1, 1, 4, 2)));
    }

    #[test]
    fn test_hbar_empty() {
        let mut buf = clean::<8, 4>();
        buf.hbar(0, 3, 0, 4);
        assert_eq!(buf.cell(0, 3).unwrap().ch, b' ');
        assert_eq!(buf.cell(1, 3).unwrap().ch, b' ');
        assert_eq!(buf.cell(2, 3), Some(Cell::default()));
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 3, 2, 4)));
    }

    #[test]
    fn test_mutations_bound_dirty_rect() {
        let mut buf = clean::<8, 4>();
        buf.put_char_at(6, 0, b'a', Attr::DEFAULT);
        buf.text_out(2, 3, "b");
        buf.decimal_out(1, 1, 9, 2, 0, false);
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(1, 0, 7, 4)));
    }

    #[test]
    fn test_decimal_out_more_decimals_than_digits() {
        let mut buf = clean::<8, 4>();
        buf.decimal_out(0, 0, 7, 2, 3, false);
        assert_eq!(buf.row_text(0).as_str(), ".07     ");
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 0, 3, 1)));
    }

    #[test]
    fn test_decimal_out_far_coordinates_clip() {
        let mut buf = clean::<8, 4>();
        buf.decimal_out(Coord::MAX - 1, 0, 1, 4, 0, false);
        buf.decimal_out(0, Coord::MAX, 1, 4, 2, true);
        buf.decimal_out(Coord::MIN, 1, 1, 4, 2, true);
        assert!(buf.dirty().is_empty());

        // Field far wider than the grid: only its blank head is visible
        buf.text_out(0, 2, "XXXXXXXX");
        buf.mark_clean();
        buf.decimal_out(0, 2, 1, 40000, 0, false);
        assert_eq!(buf.row_text(2).as_str(), "        ");
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 2, 8, 3)));
    }

    #[test]
    fn test_hbar_far_coordinates_clip() {
        let mut buf = clean::<8, 4>();
        buf.hbar(Coord::MAX, 0, 4, 4);
        buf.hbar(0, Coord::MAX, 4, 4);
        assert!(buf.dirty().is_empty());

        buf.hbar(-3, 1, 8, 8);
        assert_eq!(buf.cell(0, 1).unwrap().ch, glyph::FULL);
        assert_eq!(buf.cell(1, 1), Some(Cell::default()));
        assert_eq!(buf.dirty().bounds(), Some(Rect::new(0, 1, 1, 2)));
    }
}
