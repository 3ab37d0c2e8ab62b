use crate::position::Position;

use super::{LineStore, TERMINATOR};

impl LineStore {
    /// Insert `s` at `pos` and return the position just after it.
    ///
    /// Text containing terminators is split into lines. Missing rows and
    /// columns are padded. Empty text is a no-op.
    pub fn insert_text(&mut self, pos: Position, s: &str) -> Position {
        if s.is_empty() {
            return pos;
        }
        let mut pos = pos;
        let mut pieces = s.split(TERMINATOR).peekable();
        while let Some(piece) = pieces.next() {
            let more = pieces.peek().is_some();
            let piece = if more {
                piece.strip_suffix('\r').unwrap_or(piece)
            } else {
                piece
            };
            if !piece.is_empty() {
                pos = self.insert_fragment(pos, piece);
            }
            if more {
                pos = self.insert_line_break(pos);
            }
        }
        pos
    }

    /// Insert `s` within one line. Terminators are handled as in
    /// [`insert_text`](Self::insert_text).
    pub fn insert_str(&mut self, pos: Position, s: &str) -> Position {
        if s.contains(TERMINATOR) {
            return self.insert_text(pos, s);
        }
        if s.is_empty() {
            return pos;
        }
        self.insert_fragment(pos, s)
    }

    /// Insert a single code point; a terminator splits the line.
    pub fn insert_char(&mut self, pos: Position, c: char) -> Position {
        if c == TERMINATOR {
            return self.insert_line_break(pos);
        }
        let mut buf = [0u8; 4];
        self.insert_fragment(pos, c.encode_utf8(&mut buf))
    }

    /// Split the line at `pos`, padding with spaces if the column is past
    /// the end. Returns column 0 of the new line.
    pub fn insert_line_break(&mut self, pos: Position) -> Position {
        let id = self.line_id_padded(pos.row);
        let tail = self.record_mut(id).split_off(pos.column);
        self.insert_after(id, tail);
        self.mark_dirty();
        self.bump();
        tracing::trace!(row = pos.row, column = pos.column, "line break");
        Position::new(0, pos.row + 1)
    }

    /// Delete up to `n` code points starting at `pos`.
    ///
    /// Deleting a terminator merges the next line into the current one.
    /// Starting past the end of a line rolls forward to column 0 of the
    /// next line, using up the overflow from `n`. Returns `pos` (or the
    /// rolled-forward position); a position with nothing to delete leaves
    /// the store untouched.
    pub fn delete_chars(&mut self, pos: Position, n: usize) -> Position {
        let Some(mut id) = self.line_id(pos.row) else {
            return pos;
        };
        let mut start = pos;
        let mut n = n;

        let len = self.record(id).len();
        if pos.column >= len {
            let Some(next) = self.next_of(id) else {
                return pos;
            };
            n = n.saturating_sub(pos.column - len);
            id = next;
            start = Position::new(0, pos.row + 1);
        }
        if n == 0 {
            return start;
        }

        let mut deleted = 0;
        while n > 0 {
            let removed = self.record_mut(id).remove(start.column, n);
            if removed == 0 {
                break;
            }
            deleted += removed;
            n -= removed;
            if self.record(id).is_terminated() {
                continue;
            }
            match self.next_of(id) {
                Some(next) => {
                    let text = self.unlink(next);
                    self.record_mut(id).text.push_str(&text);
                }
                None => {
                    self.record_mut(id).text.push(TERMINATOR);
                    break;
                }
            }
        }

        self.mark_dirty();
        self.bump();
        tracing::trace!(row = start.row, column = start.column, deleted, "delete");
        start
    }

    /// Delete the code point at `pos`.
    pub fn delete_char(&mut self, pos: Position) -> Position {
        self.delete_chars(pos, 1)
    }

    fn insert_fragment(&mut self, pos: Position, s: &str) -> Position {
        let id = self.line_id_padded(pos.row);
        let column = self.record_mut(id).insert_str(pos.column, s);
        self.mark_dirty();
        self.bump();
        Position::new(column, pos.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_lines() -> LineStore {
        LineStore::from_text("Line 1.\nLine 2.\n")
    }

    // --- Insertion ---

    #[test]
    fn test_insert_text_at_line_start() {
        let mut store = two_lines();
        let end = store.insert_text(Position::new(0, 1), "X");
        assert_eq!(store.text(), "Line 1.\nXLine 2.");
        assert_eq!(end, Position::new(1, 1));
        assert!(store.is_dirty());
    }

    #[test]
    fn test_insert_text_multi_line() {
        let mut store = LineStore::from_text("ab");
        let end = store.insert_text(Position::new(1, 0), "1\n22\n333");
        assert_eq!(store.text(), "a1\n22\n333b");
        assert_eq!(end, Position::new(3, 2));
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_insert_text_trailing_terminator_breaks_line() {
        let mut store = LineStore::from_text("tail");
        let end = store.insert_text(Position::ORIGIN, "head\n");
        assert_eq!(store.text(), "head\ntail");
        assert_eq!(end, Position::new(0, 1));
    }

    #[test]
    fn test_insert_text_crlf_is_one_break() {
        let mut store = LineStore::new();
        store.insert_text(Position::ORIGIN, "a\r\nb");
        assert_eq!(store.text(), "a\nb");
    }

    #[test]
    fn test_insert_text_pads_missing_rows_and_columns() {
        let mut store = LineStore::from_text("top");
        let end = store.insert_text(Position::new(3, 2), "x");
        assert_eq!(store.text(), "top\n\n   x");
        assert_eq!(end, Position::new(4, 2));
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_insert_empty_text_is_noop() {
        let mut store = LineStore::from_text("hello");
        let before = store.stamp();
        assert_eq!(store.insert_text(Position::new(9, 9), ""), Position::new(9, 9));
        assert_eq!(store.line_count(), 1);
        assert!(!store.is_dirty());
        assert_eq!(store.stamp(), before);
    }

    #[test]
    fn test_insert_str_with_terminator_splits() {
        let mut store = LineStore::from_text("ab");
        let end = store.insert_str(Position::new(1, 0), "\n");
        assert_eq!(store.text(), "a\nb");
        assert_eq!(end, Position::new(0, 1));
    }

    #[test]
    fn test_insert_char_multibyte() {
        let mut store = LineStore::from_text("caf");
        let end = store.insert_char(Position::new(3, 0), 'é');
        assert_eq!(store.text(), "café");
        assert_eq!(end, Position::new(4, 0));
    }

    #[test]
    fn test_insert_char_terminator_is_line_break() {
        let mut store = LineStore::from_text("ab");
        store.insert_char(Position::new(1, 0), '\n');
        assert_eq!(store.line_count(), 2);
    }

    #[test]
    fn test_insert_line_break_in_middle() {
        let mut store = LineStore::from_text("hello world");
        let end = store.insert_line_break(Position::new(5, 0));
        assert_eq!(store.line(0), Some("hello"));
        assert_eq!(store.line(1), Some(" world"));
        assert_eq!(end, Position::new(0, 1));
    }

    #[test]
    fn test_insert_line_break_past_end_pads_with_spaces() {
        let mut store = LineStore::from_text("ab");
        store.insert_line_break(Position::new(4, 0));
        assert_eq!(store.line(0), Some("ab  "));
        assert_eq!(store.line(1), Some(""));
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_insert_line_break_at_last_line_updates_tail() {
        let mut store = LineStore::from_text("a\nb");
        store.insert_line_break(Position::new(1, 1));
        store.append_line("c");
        assert_eq!(store.text(), "a\nb\n\nc");
        assert!(store.validate().is_ok());
    }

    // --- Deletion ---

    #[test]
    fn test_delete_within_line() {
        let mut store = LineStore::from_text("hello");
        let pos = store.delete_chars(Position::new(1, 0), 3);
        assert_eq!(store.text(), "ho");
        assert_eq!(pos, Position::new(1, 0));
    }

    #[test]
    fn test_delete_terminator_merges_lines() {
        let mut store = LineStore::from_text("hello\nworld");
        store.delete_char(Position::new(5, 0));
        assert_eq!(store.text(), "helloworld");
        assert_eq!(store.line_count(), 1);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_delete_everything_leaves_one_empty_line() {
        let mut store = two_lines();
        store.delete_chars(Position::ORIGIN, 100);
        assert_eq!(store.text(), "");
        assert_eq!(store.line_count(), 1);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_delete_spanning_several_lines() {
        let mut store = LineStore::from_text("ab\ncd\nef\ngh");
        store.delete_chars(Position::new(1, 0), 6);
        assert_eq!(store.text(), "af\ngh");
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_delete_past_line_end_rolls_forward() {
        let mut store = LineStore::from_text("ab\ncdef");
        // Column 4 is one past "ab\n": the overflow of 1 is used up.
        let pos = store.delete_chars(Position::new(4, 0), 3);
        assert_eq!(pos, Position::new(0, 1));
        assert_eq!(store.text(), "ab\nef");
    }

    #[test]
    fn test_delete_past_end_on_last_line_is_noop() {
        let mut store = LineStore::from_text("ab\ncd");
        let before = store.stamp();
        let pos = Position::new(7, 1);
        assert_eq!(store.delete_chars(pos, 2), pos);
        assert_eq!(store.text(), "ab\ncd");
        assert!(!store.is_dirty());
        assert_eq!(store.stamp(), before);
    }

    #[test]
    fn test_delete_missing_row_is_noop() {
        let mut store = LineStore::from_text("ab");
        let pos = Position::new(0, 3);
        assert_eq!(store.delete_chars(pos, 1), pos);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_delete_zero_is_noop() {
        let mut store = LineStore::from_text("ab");
        store.delete_chars(Position::ORIGIN, 0);
        assert_eq!(store.text(), "ab");
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_delete_final_terminator_keeps_line_terminated() {
        let mut store = LineStore::from_text("ab");
        store.delete_char(Position::new(2, 0));
        assert_eq!(store.text(), "ab");
        assert!(store.validate().is_ok());
    }

    // --- Sequences ---

    #[test]
    fn test_type_then_backspace_then_type() {
        let mut store = LineStore::new();
        let mut cur = Position::ORIGIN;
        for c in "heX".chars() {
            cur = store.insert_char(cur, c);
        }
        cur = Position::new(cur.column - 1, cur.row);
        store.delete_char(cur);
        for c in "lp".chars() {
            cur = store.insert_char(cur, c);
        }
        assert_eq!(store.text(), "help");
        assert_eq!(cur, Position::new(4, 0));
    }

    #[test]
    fn test_split_and_rejoin() {
        let mut store = LineStore::from_text("helloworld");
        let cur = store.insert_line_break(Position::new(5, 0));
        assert_eq!(cur, Position::new(0, 1));
        store.delete_char(Position::new(5, 0));
        assert_eq!(store.text(), "helloworld");
        assert!(store.validate().is_ok());
    }
}
