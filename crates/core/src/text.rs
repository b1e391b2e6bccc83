//! TextArea - a fixed-size grid of characters
//!
//! The grid uses a bottom-left origin: row 0 is the bottom row and `y`
//! grows upward. The buffer is stored row-major with the **top** row first,
//! so the index mapping flips `y`:
//!
//! ```text
//!   y=2  | 0 1 2 |      buffer: [0 1 2 3 4 5 6 7 8]
//!   y=1  | 3 4 5 |
//!   y=0  | 6 7 8 |      index = (height - 1 - y) * width + x
//!          x=0 1 2
//! ```

use crate::types::{round_half_up, Vector};

/// A flat character buffer over a `width` x `height` grid.
///
/// Invariant: `buffer.len() == width * height`. Every mutation preserves the
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArea {
    width: usize,
    height: usize,
    buffer: Vec<char>,
}

impl TextArea {
    /// Create a grid filled with spaces.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![' '; width * height],
        }
    }

    /// Create a grid from `text`, read top row first.
    ///
    /// Text shorter than the grid is padded with spaces; longer text is cut.
    ///
    /// ```
    /// use ascii_arcade_core::TextArea;
    /// use ascii_arcade_types::Vector;
    ///
    /// let area = TextArea::from_text(3, 2, "abcdef");
    /// assert_eq!(area.get(Vector::new(0.0, 1.0)), Some('a'));
    /// assert_eq!(area.get(Vector::new(0.0, 0.0)), Some('d'));
    /// ```
    pub fn from_text(width: usize, height: usize, text: &str) -> Self {
        let len = width * height;
        let mut buffer: Vec<char> = text.chars().take(len).collect();
        buffer.resize(len, ' ');
        Self {
            width,
            height,
            buffer,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid size as a vector `(width, height)`.
    pub fn size(&self) -> Vector {
        Vector::cell(self.width as i64, self.height as i64)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.buffer
    }

    /// The glyph stored at a flat buffer index.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.buffer.get(index).copied()
    }

    /// One buffer row, counted from the top of the grid.
    pub fn row(&self, row: usize) -> &[char] {
        if row >= self.height {
            return &[];
        }
        &self.buffer[row * self.width..(row + 1) * self.width]
    }

    /// The whole buffer as a string, top row first, rows not separated.
    pub fn as_string(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Map a grid position to a flat buffer index.
    ///
    /// Positions are rounded to whole cells first. The result is not bounds
    /// checked: positions outside the grid map to indices outside
    /// `0..len()` or onto neighbouring rows.
    #[inline]
    pub fn as_index(&self, position: Vector) -> i64 {
        let x = round_half_up(position.x) as i64;
        let y = round_half_up(position.y) as i64;
        (self.height as i64 - 1 - y) * self.width as i64 + x
    }

    /// Map a flat buffer index back to its grid position.
    #[inline]
    pub fn as_vector(&self, index: usize) -> Vector {
        let x = index % self.width;
        let y = self.height as i64 - 1 - (index / self.width) as i64;
        Vector::cell(x as i64, y)
    }

    /// Whether `position`, rounded to its cell, lies inside
    /// `[0,0]..[width-1,height-1]`.
    pub fn contains(&self, position: Vector) -> bool {
        position
            .round()
            .within(Vector::ZERO, self.size() - Vector::ONE)
    }

    fn checked_index(&self, position: Vector) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        usize::try_from(self.as_index(position))
            .ok()
            .filter(|&i| i < self.buffer.len())
    }

    /// Read the glyph at `position`, or `None` outside the grid.
    pub fn get(&self, position: Vector) -> Option<char> {
        self.checked_index(position).map(|i| self.buffer[i])
    }

    /// Overwrite one cell. Returns the glyph that was there, or `None` (and
    /// leaves the grid untouched) when `position` is outside the grid.
    pub fn set(&mut self, position: Vector, ch: char) -> Option<char> {
        let i = self.checked_index(position)?;
        Some(std::mem::replace(&mut self.buffer[i], ch))
    }

    /// Write `text` on one row starting at `position`.
    ///
    /// The start column may lie up to `len - 1` columns left of the grid; the
    /// characters that fall off the left edge are dropped. Characters past
    /// the right edge are dropped too. With `transparent_whitespace`,
    /// whitespace in `text` leaves the destination glyph in place.
    ///
    /// Returns the text that occupied the written region before the write,
    /// or `None` when nothing could be placed (empty or all-whitespace text,
    /// or a start outside the allowed range).
    ///
    /// ```
    /// use ascii_arcade_core::TextArea;
    /// use ascii_arcade_types::Vector;
    ///
    /// let mut area = TextArea::from_text(5, 1, ".....");
    /// assert_eq!(area.place(Vector::new(-2.0, 0.0), "ABCDE", false), Some("...".into()));
    /// assert_eq!(area.as_string(), "CDE..");
    /// ```
    pub fn place(
        &mut self,
        position: Vector,
        text: &str,
        transparent_whitespace: bool,
    ) -> Option<String> {
        self.place_with(position, text, transparent_whitespace, false)
    }

    /// Like [`place`](Self::place), but text running past the right edge
    /// spills into the following buffer cells, i.e. the start of the next row
    /// down. The write stops at the end of the buffer.
    pub fn place_wrapping(
        &mut self,
        position: Vector,
        text: &str,
        transparent_whitespace: bool,
    ) -> Option<String> {
        self.place_with(position, text, transparent_whitespace, true)
    }

    fn place_with(
        &mut self,
        position: Vector,
        text: &str,
        transparent_whitespace: bool,
        wrap: bool,
    ) -> Option<String> {
        let glyphs: Vec<char> = text.chars().collect();
        match glyphs.as_slice() {
            [] => return None,
            [ch] => {
                if transparent_whitespace && ch.is_whitespace() {
                    return None;
                }
                return self.set(position, *ch).map(String::from);
            }
            _ => {}
        }
        if glyphs.iter().all(|c| c.is_whitespace()) {
            return None;
        }

        let position = position.round();
        let lower = Vector::cell(1 - glyphs.len() as i64, 0);
        if !position.within(lower, self.size() - Vector::ONE) {
            return None;
        }

        let x = position.x as i64;
        if x < 0 {
            // Place what is left from column 0; a blank or single-glyph
            // remainder follows the same rules as any other text.
            let rest: String = glyphs[(-x) as usize..].iter().collect();
            return self.place_with(
                Vector::new(0.0, position.y),
                &rest,
                transparent_whitespace,
                wrap,
            );
        }
        let column = x as usize;
        let mut visible = glyphs.as_slice();
        let room = self.width - column;
        if !wrap && visible.len() > room {
            visible = &visible[..room];
        }

        let row = self.height - 1 - position.y as usize;
        let start = row * self.width + column;
        let end = (start + visible.len()).min(self.buffer.len());
        let previous: String = self.buffer[start..end].iter().collect();

        for (cell, &ch) in self.buffer[start..end].iter_mut().zip(visible) {
            if transparent_whitespace && ch.is_whitespace() {
                continue;
            }
            *cell = ch;
        }
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_area_is_blank() {
        let area = TextArea::new(4, 3);
        assert_eq!(area.len(), 12);
        assert!(area.chars().iter().all(|&c| c == ' '));
        assert_eq!(area.size(), Vector::new(4.0, 3.0));
    }

    #[test]
    fn from_text_pads_and_truncates() {
        assert_eq!(TextArea::from_text(3, 1, "ab").as_string(), "ab ");
        assert_eq!(TextArea::from_text(3, 1, "abcdef").as_string(), "abc");
    }

    #[test]
    fn origin_is_bottom_left() {
        let area = TextArea::new(5, 3);
        assert_eq!(area.as_index(Vector::ZERO), 10);
        assert_eq!(area.as_index(Vector::new(0.0, 2.0)), 0);
        assert_eq!(area.as_index(Vector::new(4.0, 2.0)), 4);
        assert_eq!(area.as_vector(0), Vector::new(0.0, 2.0));
        assert_eq!(area.as_vector(14), Vector::new(4.0, 0.0));
    }

    #[test]
    fn as_index_rounds_positions() {
        let area = TextArea::new(5, 3);
        assert_eq!(area.as_index(Vector::new(1.4, 0.6)), area.as_index(Vector::new(1.0, 1.0)));
    }

    #[test]
    fn rows_are_top_first() {
        let area = TextArea::from_text(2, 2, "abcd");
        assert_eq!(area.row(0), &['a', 'b']);
        assert_eq!(area.row(1), &['c', 'd']);
        assert!(area.row(2).is_empty());
    }

    #[test]
    fn set_returns_previous_glyph() {
        let mut area = TextArea::from_text(2, 1, "ab");
        assert_eq!(area.set(Vector::new(1.0, 0.0), 'z'), Some('b'));
        assert_eq!(area.as_string(), "az");
        assert_eq!(area.set(Vector::new(2.0, 0.0), 'q'), None);
        assert_eq!(area.as_string(), "az");
    }

    #[test]
    fn get_and_set_round_like_as_index() {
        let mut area = TextArea::new(3, 1);
        assert_eq!(area.set(Vector::new(1.6, 0.4), 'y'), Some(' '));
        assert_eq!(area.get(Vector::new(2.0, 0.0)), Some('y'));
        assert!(area.contains(Vector::new(-0.4, 0.4)));
        assert!(!area.contains(Vector::new(2.5, 0.0)));
        assert!(!area.contains(Vector::new(0.0, -0.6)));
        assert_eq!(area.set(Vector::new(2.5, 0.0), 'z'), None);
        assert_eq!(area.as_string(), "  y");
    }

    #[test]
    fn left_clipped_remainder_follows_place_rules() {
        // Only blanks are left after clipping: nothing is written.
        let mut area = TextArea::from_text(3, 1, "xyz");
        assert_eq!(area.place(Vector::new(-1.0, 0.0), "A  ", false), None);
        assert_eq!(area.as_string(), "xyz");

        // A single glyph is left: it goes through `set`.
        let mut area = TextArea::from_text(3, 1, "xyz");
        assert_eq!(area.place(Vector::new(-2.0, 0.0), "ABC", false), Some("x".into()));
        assert_eq!(area.as_string(), "Cyz");

        let mut area = TextArea::from_text(3, 1, "xyz");
        assert_eq!(area.place(Vector::new(-1.0, 0.0), "AB ", false), Some("xy".into()));
        assert_eq!(area.as_string(), "B z");
    }

    #[test]
    fn place_truncates_at_right_edge() {
        let mut area = TextArea::from_text(5, 2, "..........");
        assert_eq!(area.place(Vector::new(3.0, 1.0), "XYZ", false), Some("..".into()));
        assert_eq!(area.as_string(), "...XY.....");
    }

    #[test]
    fn place_rejects_fully_off_grid_text() {
        let mut area = TextArea::new(5, 1);
        assert_eq!(area.place(Vector::new(-3.0, 0.0), "ABC", false), None);
        assert_eq!(area.place(Vector::new(5.0, 0.0), "ABC", false), None);
        assert_eq!(area.place(Vector::new(0.0, 1.0), "ABC", false), None);
        assert_eq!(area.as_string(), "     ");
    }

    #[test]
    fn place_ignores_blank_text() {
        let mut area = TextArea::from_text(3, 1, "abc");
        assert_eq!(area.place(Vector::ZERO, "", false), None);
        assert_eq!(area.place(Vector::ZERO, "   ", false), None);
        assert_eq!(area.as_string(), "abc");
    }

    #[test]
    fn single_glyph_place_delegates_to_set() {
        let mut area = TextArea::from_text(3, 1, "abc");
        assert_eq!(area.place(Vector::new(1.0, 0.0), "X", false), Some("b".into()));
        assert_eq!(area.place(Vector::new(2.0, 0.0), " ", true), None);
        assert_eq!(area.place(Vector::new(2.0, 0.0), " ", false), Some("c".into()));
        assert_eq!(area.as_string(), "aX ");
    }

    #[test]
    fn transparent_whitespace_keeps_background() {
        let mut area = TextArea::from_text(3, 1, "ABC");
        area.place(Vector::ZERO, " X ", true);
        assert_eq!(area.as_string(), "AXC");
    }

    #[test]
    fn wrapping_spills_into_next_row_and_stops_at_buffer_end() {
        let mut area = TextArea::from_text(3, 2, "......");
        area.place_wrapping(Vector::new(2.0, 1.0), "ABC", false);
        assert_eq!(area.as_string(), "..ABC.");

        let mut area = TextArea::from_text(3, 2, "......");
        assert_eq!(area.place_wrapping(Vector::new(1.0, 0.0), "ABCDE", false), Some("..".into()));
        assert_eq!(area.as_string(), "....AB");
        assert_eq!(area.len(), 6);
    }
}
