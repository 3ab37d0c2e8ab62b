use crate::position::Position;
use crate::store::{LineId, LineStore, Stamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// One before the first code point.
    BeforeStart,
    At { line: LineId, pos: Position },
    /// One past the last code point.
    AfterEnd,
}

/// Cursor over a [`LineStore`] that steps one code point at a time,
/// terminators included.
///
/// The navigator borrows the store only for the duration of each call and
/// keeps a copy of the current line's code points. It remembers the store
/// [`Stamp`] it was positioned against; if the store has changed since,
/// the next call resets it to before the start.
///
/// ```
/// use linewise::{CharNavigator, LineStore, Position};
///
/// let store = LineStore::from_text("ab\nc");
/// let mut nav = CharNavigator::new(&store);
/// let mut seen = String::new();
/// while nav.scan_next(&store) {
///     seen.extend(nav.current_char());
/// }
/// assert_eq!(seen, "ab\nc\n");
/// assert_eq!(nav.position(), Some(Position::new(1, 1)));
/// ```
#[derive(Debug, Clone)]
pub struct CharNavigator {
    stamp: Stamp,
    cursor: Cursor,
    chars: Vec<char>,
}

impl CharNavigator {
    /// Create a navigator positioned before the first code point.
    pub fn new(store: &LineStore) -> Self {
        Self {
            stamp: store.stamp(),
            cursor: Cursor::BeforeStart,
            chars: Vec::new(),
        }
    }

    /// Move before the first code point.
    pub fn reset(&mut self, store: &LineStore) {
        self.stamp = store.stamp();
        self.cursor = Cursor::BeforeStart;
        self.chars.clear();
    }

    /// Move past the last code point, so [`scan_prev`](Self::scan_prev)
    /// visits the whole buffer backwards.
    pub fn reset_to_end(&mut self, store: &LineStore) {
        self.stamp = store.stamp();
        self.cursor = Cursor::AfterEnd;
        self.chars.clear();
    }

    /// Whether the store changed since this navigator last synced with it.
    pub fn is_stale(&self, store: &LineStore) -> bool {
        self.stamp != store.stamp()
    }

    /// Current position, or `None` at either synthetic boundary.
    pub const fn position(&self) -> Option<Position> {
        match self.cursor {
            Cursor::At { pos, .. } => Some(pos),
            Cursor::BeforeStart | Cursor::AfterEnd => None,
        }
    }

    /// Code point at the current position, or `None` at a boundary.
    pub fn current_char(&self) -> Option<char> {
        match self.cursor {
            Cursor::At { pos, .. } => self.chars.get(pos.column).copied(),
            Cursor::BeforeStart | Cursor::AfterEnd => None,
        }
    }

    /// Whether the navigator sits before the first code point.
    pub const fn is_before_start(&self) -> bool {
        matches!(self.cursor, Cursor::BeforeStart)
    }

    /// Whether the navigator sits past the last code point.
    pub const fn is_after_end(&self) -> bool {
        matches!(self.cursor, Cursor::AfterEnd)
    }

    /// Step forward one code point, crossing into the next line after a
    /// terminator. Returns `false` and stays put on the last code point.
    pub fn scan_next(&mut self, store: &LineStore) -> bool {
        self.sync(store);
        match self.cursor {
            Cursor::BeforeStart => {
                self.enter(store, store.head(), 0, |_| 0);
                true
            }
            Cursor::At { line, pos } if pos.column + 1 < self.chars.len() => {
                self.cursor = Cursor::At {
                    line,
                    pos: Position::new(pos.column + 1, pos.row),
                };
                true
            }
            Cursor::At { line, pos } => match store.next_of(line) {
                Some(next) => {
                    self.enter(store, next, pos.row + 1, |_| 0);
                    true
                }
                None => false,
            },
            Cursor::AfterEnd => false,
        }
    }

    /// Step back one code point, landing on the previous line's terminator
    /// from column 0. Returns `false` and stays put on the first code point.
    pub fn scan_prev(&mut self, store: &LineStore) -> bool {
        self.sync(store);
        match self.cursor {
            Cursor::AfterEnd => {
                let row = store.line_count() - 1;
                self.enter(store, store.tail(), row, |len| len - 1);
                true
            }
            Cursor::At { line, pos } if pos.column > 0 => {
                self.cursor = Cursor::At {
                    line,
                    pos: Position::new(pos.column - 1, pos.row),
                };
                true
            }
            Cursor::At { line, pos } => match store.prev_of(line) {
                Some(prev) => {
                    self.enter(store, prev, pos.row - 1, |len| len - 1);
                    true
                }
                None => false,
            },
            Cursor::BeforeStart => false,
        }
    }

    /// Move to the same column of the next line, clamped to its terminator.
    pub fn scan_down(&mut self, store: &LineStore) -> bool {
        self.sync(store);
        let Cursor::At { line, pos } = self.cursor else {
            return false;
        };
        let Some(next) = store.next_of(line) else {
            return false;
        };
        self.enter(store, next, pos.row + 1, |len| pos.column.min(len - 1));
        true
    }

    /// Move to the same column of the previous line, clamped to its
    /// terminator.
    pub fn scan_up(&mut self, store: &LineStore) -> bool {
        self.sync(store);
        let Cursor::At { line, pos } = self.cursor else {
            return false;
        };
        let Some(prev) = store.prev_of(line) else {
            return false;
        };
        self.enter(store, prev, pos.row - 1, |len| pos.column.min(len - 1));
        true
    }

    /// Jump to `pos`, walking the chain from the head.
    ///
    /// Returns `false` and leaves the navigator where it was if the row
    /// does not exist or the column is past the row's terminator. A stale
    /// navigator resets before the range check, so after a failed seek it
    /// sits before the start.
    pub fn seek(&mut self, store: &LineStore, pos: Position) -> bool {
        self.sync(store);
        let Some(line) = store.line_id(pos.row) else {
            return false;
        };
        if pos.column > store.record(line).body_len() {
            return false;
        }
        self.enter(store, line, pos.row, |_| pos.column);
        true
    }

    fn enter(
        &mut self,
        store: &LineStore,
        line: LineId,
        row: usize,
        column: impl FnOnce(usize) -> usize,
    ) {
        self.chars.clear();
        self.chars.extend(store.record(line).text.chars());
        let column = column(self.chars.len());
        self.cursor = Cursor::At {
            line,
            pos: Position::new(column, row),
        };
    }

    fn sync(&mut self, store: &LineStore) {
        if self.is_stale(store) {
            tracing::debug!("char navigator stale; resetting");
            self.reset(store);
        }
    }
}
