use crate::position::Position;

use super::LineStore;

/// Text copied out of a store, with its length in code points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clip {
    pub text: String,
    pub len: usize,
}

impl Clip {
    fn new(text: String) -> Self {
        let len = text.chars().count();
        Self { text, len }
    }
}

impl LineStore {
    /// Copy the inclusive range between two positions.
    ///
    /// The positions may come in either order. Columns past the end of a
    /// line clamp to its terminator, and an end row past the last line
    /// clamps to the end of the buffer. Returns `None` if the start row
    /// does not exist.
    pub fn copy(&self, begin: Position, end: Position) -> Option<Clip> {
        let (begin, end) = ordered(begin, end);
        let begin = self.clamp_to_line(begin)?;
        let first = self.line_id(begin.row)?;
        let last_row = end.row.min(self.line_count() - 1);

        if begin.row == last_row {
            let end_column = if end.row == last_row { end.column } else { usize::MAX };
            let text = self.record(first).slice_inclusive(begin.column, end_column);
            return Some(Clip::new(text));
        }

        let mut text = self.record(first).slice_inclusive(begin.column, usize::MAX);
        let mut cursor = self.next_of(first);
        let mut row = begin.row + 1;
        while let Some(id) = cursor {
            let record = self.record(id);
            if row == last_row {
                let end_column = if end.row == last_row { end.column } else { usize::MAX };
                text.push_str(&record.slice_inclusive(0, end_column));
                break;
            }
            text.push_str(&record.text);
            cursor = record.next;
            row += 1;
        }
        Some(Clip::new(text))
    }

    /// Copy the inclusive range, then delete the same code points.
    ///
    /// The final terminator of the buffer is never removed, so a range
    /// reaching the end of the last line leaves that line terminated.
    pub fn cut(&mut self, begin: Position, end: Position) -> Option<Clip> {
        let clip = self.copy(begin, end)?;
        let (begin, _) = ordered(begin, end);
        let start = self.clamp_to_line(begin)?;
        self.delete_chars(start, clip.len);
        Some(clip)
    }

    /// `pos` with its column clamped to the row's terminator.
    fn clamp_to_line(&self, pos: Position) -> Option<Position> {
        let len = self.line_len(pos.row)?;
        Some(Position::new(pos.column.min(len), pos.row))
    }

    /// Insert previously copied text at `pos`.
    pub fn paste(&mut self, pos: Position, text: &str) -> Position {
        self.insert_text(pos, text)
    }

    /// Find the first occurrence of `needle` at or after `pos`.
    ///
    /// Matches are case-sensitive and confined to a single line. Later
    /// lines are searched from column 0; the search does not wrap around.
    pub fn search(&self, pos: Position, needle: &str) -> Option<Position> {
        if needle.is_empty() {
            return None;
        }
        let mut cursor = self.line_id(pos.row);
        let mut row = pos.row;
        let mut from = pos.column;
        while let Some(id) = cursor {
            let record = self.record(id);
            let body = record.body();
            let start = body.char_indices().nth(from).map(|(i, _)| i);
            if let Some(start) = start {
                if let Some(found) = body[start..].find(needle) {
                    let column = from + body[start..start + found].chars().count();
                    return Some(Position::new(column, row));
                }
            }
            cursor = record.next;
            row += 1;
            from = 0;
        }
        None
    }
}

fn ordered(a: Position, b: Position) -> (Position, Position) {
    if b < a { (b, a) } else { (a, b) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Line 1.\nLine 2.\nLine 3.\n\nNow is the time\nfor all good men\nto come to the aid\nof the party.";

    #[test]
    fn test_copy_single_line_is_inclusive() {
        let store = LineStore::from_text("Line 1.");
        let clip = store.copy(Position::new(1, 0), Position::new(5, 0)).unwrap();
        assert_eq!(clip.text, "ine 1");
        assert_eq!(clip.len, 5);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_copy_accepts_reversed_positions() {
        let store = LineStore::from_text("Line 1.");
        let clip = store.copy(Position::new(5, 0), Position::new(1, 0)).unwrap();
        assert_eq!(clip.text, "ine 1");
    }

    #[test]
    fn test_copy_multi_line() {
        let store = LineStore::from_text(SAMPLE);
        let clip = store.copy(Position::new(5, 0), Position::new(3, 2)).unwrap();
        assert_eq!(clip.text, "1.\nLine 2.\nLine");
        assert_eq!(clip.len, 15);
    }

    #[test]
    fn test_copy_clamps_columns_to_terminator() {
        let store = LineStore::from_text("ab\ncd");
        let clip = store.copy(Position::new(1, 0), Position::new(40, 0)).unwrap();
        assert_eq!(clip.text, "b\n");
    }

    #[test]
    fn test_copy_clamps_end_row() {
        let store = LineStore::from_text("ab\ncd");
        let clip = store.copy(Position::new(1, 0), Position::new(0, 9)).unwrap();
        assert_eq!(clip.text, "b\ncd\n");
    }

    #[test]
    fn test_copy_missing_start_row_is_none() {
        let store = LineStore::from_text("ab");
        assert!(store.copy(Position::new(0, 3), Position::new(0, 4)).is_none());
    }

    #[test]
    fn test_cut_removes_copied_range() {
        let mut store = LineStore::from_text(SAMPLE);
        let clip = store.cut(Position::new(5, 0), Position::new(3, 2)).unwrap();
        assert_eq!(clip.text, "1.\nLine 2.\nLine");
        assert!(store.text().starts_with("Line  3.\n\nNow"));
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_copy_begin_past_line_end_starts_at_terminator() {
        let store = LineStore::from_text("ab\ncd\nef");
        let clip = store.copy(Position::new(5, 0), Position::new(0, 1)).unwrap();
        assert_eq!(clip.text, "\nc");
        assert_eq!(clip.len, 2);
    }

    #[test]
    fn test_cut_begin_past_line_end_removes_copied_text() {
        let mut store = LineStore::from_text("ab\ncd\nef");
        let clip = store.cut(Position::new(5, 0), Position::new(0, 1)).unwrap();
        assert_eq!(clip.text, "\nc");
        assert_eq!(store.text(), "abd\nef");

        store.paste(Position::new(2, 0), &clip.text);
        assert_eq!(store.text(), "ab\ncd\nef");
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_cut_to_buffer_end_keeps_final_terminator() {
        let mut store = LineStore::from_text("ab\ncd");
        let clip = store.cut(Position::new(1, 0), Position::new(0, 9)).unwrap();
        assert_eq!(clip.text, "b\ncd\n");
        assert_eq!(store.text(), "a");
        assert_eq!(store.line_count(), 1);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_cut_then_paste_restores_text() {
        let mut store = LineStore::from_text(SAMPLE);
        let begin = Position::new(4, 4);
        let clip = store.cut(begin, Position::new(2, 6)).unwrap();
        store.paste(begin, &clip.text);
        assert_eq!(store.text(), SAMPLE);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_search_finds_later_line() {
        let store = LineStore::from_text(SAMPLE);
        assert_eq!(
            store.search(Position::ORIGIN, "is the"),
            Some(Position::new(4, 4))
        );
    }

    #[test]
    fn test_search_starts_at_column() {
        let store = LineStore::from_text(SAMPLE);
        assert_eq!(
            store.search(Position::new(1, 6), "the"),
            Some(Position::new(11, 6))
        );
        assert_eq!(
            store.search(Position::new(12, 6), "the"),
            Some(Position::new(3, 7))
        );
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let store = LineStore::from_text(SAMPLE);
        assert_eq!(store.search(Position::ORIGIN, "NOW"), None);
    }

    #[test]
    fn test_search_does_not_wrap_around() {
        let store = LineStore::from_text(SAMPLE);
        assert_eq!(store.search(Position::new(0, 1), "Line 1."), None);
    }

    #[test]
    fn test_search_reports_code_point_columns() {
        let store = LineStore::from_text("héllo wörld");
        assert_eq!(
            store.search(Position::ORIGIN, "wö"),
            Some(Position::new(6, 0))
        );
    }

    #[test]
    fn test_search_empty_needle_is_none() {
        let store = LineStore::from_text(SAMPLE);
        assert_eq!(store.search(Position::ORIGIN, ""), None);
    }
}
