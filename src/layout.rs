//! Mapping between logical columns and display cells.
//!
//! Navigators count columns in code points. Renderers need terminal cells:
//! a tab advances to the next tab stop and wide characters take two cells.
//! [`TabStops`] converts between the two for one segment or line of text.

use unicode_width::UnicodeWidthChar;

/// Tab-stop configuration for display-column arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabStops {
    size: usize,
}

impl TabStops {
    pub const DEFAULT_SIZE: usize = 4;

    /// Tab stops every `size` cells (at least 1).
    pub const fn new(size: usize) -> Self {
        Self {
            size: if size == 0 { 1 } else { size },
        }
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cells taken by `c` when it starts at display column `at`.
    fn cells(&self, c: char, at: usize) -> usize {
        if c == '\t' {
            self.size - at % self.size
        } else {
            c.width().unwrap_or(1)
        }
    }

    /// Display column where logical `column` of `text` starts. Columns
    /// past the end continue one cell per code point.
    pub fn display_column(&self, text: &str, column: usize) -> usize {
        let mut cells = 0;
        let mut count = 0;
        for c in text.chars().take(column) {
            cells += self.cells(c, cells);
            count += 1;
        }
        cells + (column - count)
    }

    /// Logical column of the code point covering display column
    /// `display`. Past the end, the column after the last code point.
    pub fn logical_column(&self, text: &str, display: usize) -> usize {
        let mut cells = 0;
        for (column, c) in text.chars().enumerate() {
            let next = cells + self.cells(c, cells);
            if display < next {
                return column;
            }
            cells = next;
        }
        text.chars().count()
    }

    /// `text` with every tab replaced by spaces up to the next stop.
    pub fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cells = 0;
        for c in text.chars() {
            let width = self.cells(c, cells);
            if c == '\t' {
                out.extend(std::iter::repeat_n(' ', width));
            } else {
                out.push(c);
            }
            cells += width;
        }
        out
    }
}

impl Default for TabStops {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}
