//! Viewport management for scrolling over wrap segments.
//!
//! The [`Viewport`] tracks which wrap segment sits on the top screen row
//! and answers the questions a rendering loop asks: which segments are
//! visible, where the cursor lands on screen, and how the top must move to
//! keep the cursor in view.

use crate::nav::{Segment, WrapNavigator};
use crate::position::Position;
use crate::store::LineStore;

/// Manages the visible portion of a [`LineStore`] in wrap segments.
///
/// The viewport tracks:
/// - Screen dimensions (wrap width, height in rows)
/// - The position of the top segment
///
/// # Example
///
/// ```
/// use linewise::{LineStore, Position, Viewport};
///
/// let store = LineStore::from_text("one two three four five six");
/// let mut vp = Viewport::new(&store, 8, 2);
/// let rows: Vec<String> = vp
///     .visible_segments(&store)
///     .iter()
///     .map(|s| s.text().to_string())
///     .collect();
/// assert_eq!(rows, ["one two ", "three "]);
///
/// vp.scroll_down(&store, 1);
/// assert_eq!(vp.top(), Position::new(8, 0));
/// ```
#[derive(Debug, Clone)]
pub struct Viewport {
    height: usize,
    top: Position,
    nav: WrapNavigator,
}

impl Viewport {
    /// Create a viewport `width` code points wide and `height` rows tall,
    /// showing the start of the buffer.
    pub fn new(store: &LineStore, width: usize, height: usize) -> Self {
        Self {
            height: height.max(1),
            top: Position::ORIGIN,
            nav: WrapNavigator::new(store, width),
        }
    }

    /// Start of the top segment.
    pub const fn top(&self) -> Position {
        self.top
    }

    /// Wrap width in code points.
    pub const fn width(&self) -> usize {
        self.nav.width()
    }

    /// Height in screen rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Put the segment containing `pos` on the top row.
    ///
    /// Returns `false` and keeps the current top if `pos` is out of range.
    pub fn set_top(&mut self, store: &LineStore, pos: Position) -> bool {
        match self.segment_start(store, pos) {
            Some(start) => {
                self.top = start;
                true
            }
            None => false,
        }
    }

    /// Resize the viewport, re-aligning the top to a segment start.
    pub fn resize(&mut self, store: &LineStore, width: usize, height: usize) {
        self.height = height.max(1);
        self.nav.set_width(store, width);
        self.clamp_top(store);
    }

    /// Start of the segment containing `pos`.
    pub fn segment_start(&mut self, store: &LineStore, pos: Position) -> Option<Position> {
        if !self.nav.seek(store, pos) {
            return None;
        }
        self.nav.position()
    }

    /// Last position of the segment containing `pos`.
    pub fn segment_end(&mut self, store: &LineStore, pos: Position) -> Option<Position> {
        if !self.nav.seek(store, pos) {
            return None;
        }
        self.nav.current().map(Segment::end)
    }

    /// Segments shown on screen, top row first.
    pub fn visible_segments(&mut self, store: &LineStore) -> Vec<Segment> {
        self.clamp_top(store);
        let mut rows = Vec::new();
        if !self.nav.seek(store, self.top) {
            return rows;
        }
        rows.extend(self.nav.current().cloned());
        while rows.len() < self.height && self.nav.scan_next(store) {
            rows.extend(self.nav.current().cloned());
        }
        rows
    }

    /// First and last positions shown on screen.
    pub fn content_range(&mut self, store: &LineStore) -> Option<(Position, Position)> {
        let rows = self.visible_segments(store);
        let first = rows.first()?.start();
        let last = rows.last()?.end();
        Some((first, last))
    }

    /// Start of the segment `n` segments after (or, if negative, before)
    /// the one containing `from`. Stops early at either end of the buffer;
    /// returns `from` if it is out of range.
    pub fn scroll(&mut self, store: &LineStore, from: Position, n: isize) -> Position {
        if !self.nav.seek(store, from) {
            return from;
        }
        for _ in 0..n.unsigned_abs() {
            let moved = if n < 0 {
                self.nav.scan_prev(store)
            } else {
                self.nav.scan_next(store)
            };
            if !moved {
                break;
            }
        }
        self.nav.position().unwrap_or(from)
    }

    /// Scroll up by n segments.
    pub fn scroll_up(&mut self, store: &LineStore, n: usize) {
        self.clamp_top(store);
        self.top = self.scroll(store, self.top, -signed(n));
    }

    /// Scroll down by n segments, stopping once the last segment reaches
    /// the bottom row.
    pub fn scroll_down(&mut self, store: &LineStore, n: usize) {
        self.clamp_top(store);
        let target = self.scroll(store, self.top, signed(n));
        self.top = target.min(self.bottom_top(store));
    }

    /// Scroll up one page.
    pub fn page_up(&mut self, store: &LineStore) {
        self.scroll_up(store, self.height);
    }

    /// Scroll down one page.
    pub fn page_down(&mut self, store: &LineStore) {
        self.scroll_down(store, self.height);
    }

    /// Scroll up half a page.
    pub fn half_page_up(&mut self, store: &LineStore) {
        self.scroll_up(store, self.height / 2);
    }

    /// Scroll down half a page.
    pub fn half_page_down(&mut self, store: &LineStore) {
        self.scroll_down(store, self.height / 2);
    }

    /// Go to the beginning of the buffer.
    pub fn go_to_top(&mut self) {
        self.top = Position::ORIGIN;
    }

    /// Go to the end of the buffer.
    pub fn go_to_bottom(&mut self, store: &LineStore) {
        self.top = self.bottom_top(store);
    }

    /// Move the top the least amount that brings `cursor` on screen.
    ///
    /// Returns whether the top moved.
    pub fn fit_to_cursor(&mut self, store: &LineStore, cursor: Position) -> bool {
        let Some((first, last)) = self.content_range(store) else {
            return false;
        };
        let before = self.top;
        if cursor < first {
            if let Some(start) = self.segment_start(store, cursor) {
                self.top = start;
            }
        } else if cursor > last && store.in_bounds(cursor) {
            self.top = self.scroll(store, cursor, 1 - signed(self.height));
        }
        self.top != before
    }

    /// Screen (column, row) of `cursor` relative to the top-left cell, or
    /// `None` if it is off screen. The column is in code points.
    pub fn cursor_offset(&mut self, store: &LineStore, cursor: Position) -> Option<(usize, usize)> {
        self.clamp_top(store);
        if !self.nav.seek(store, self.top) {
            return None;
        }
        let top_index = self.nav.wrap_line_index()?;
        if !self.nav.seek(store, cursor) {
            return None;
        }
        let cursor_index = self.nav.wrap_line_index()?;
        let row = cursor_index.checked_sub(top_index)?;
        if row >= self.height {
            return None;
        }
        let start = self.nav.position()?;
        Some((cursor.column - start.column, row))
    }

    /// Cursor position one segment down (or up), keeping its column within
    /// the segment and clamping to the target segment's end.
    pub fn move_vertical(&mut self, store: &LineStore, cursor: Position, down: bool) -> Option<Position> {
        if !self.nav.seek(store, cursor) {
            return None;
        }
        let offset = cursor.column - self.nav.position()?.column;
        let moved = if down {
            self.nav.scan_next(store)
        } else {
            self.nav.scan_prev(store)
        };
        if !moved {
            return None;
        }
        let segment = self.nav.current()?;
        let column = (segment.start().column + offset).min(segment.end_column());
        Some(Position::new(column, segment.start().row))
    }

    /// Top position that puts the last segment on the bottom row.
    fn bottom_top(&mut self, store: &LineStore) -> Position {
        let last_row = store.line_count() - 1;
        let end = Position::new(store.line_len(last_row).unwrap_or(0), last_row);
        self.scroll(store, end, 1 - signed(self.height))
    }

    /// Keep the top on an existing segment start after edits or resizes.
    fn clamp_top(&mut self, store: &LineStore) {
        let mut top = self.top;
        if top.row >= store.line_count() {
            top = Position::new(0, store.line_count() - 1);
        }
        if let Some(len) = store.line_len(top.row) {
            top.column = top.column.min(len);
        }
        self.top = self.segment_start(store, top).unwrap_or(Position::ORIGIN);
    }
}

fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}
