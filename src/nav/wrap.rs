use crate::perf;
use crate::position::Position;
use crate::store::{LineId, LineStore, Stamp};

/// One soft-wrapped display line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    text: String,
    start: Position,
    span: usize,
}

impl Segment {
    /// Rendered text, terminator stripped.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the first code point covered.
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Columns covered on the start row. The last segment of a line also
    /// covers the terminator, so its span is one more than its text.
    pub const fn span(&self) -> usize {
        self.span
    }

    /// Last column covered on the start row.
    pub const fn end_column(&self) -> usize {
        self.start.column + self.span - 1
    }

    /// Position of the last code point covered.
    pub const fn end(&self) -> Position {
        Position::new(self.end_column(), self.start.row)
    }

    /// Whether `pos` falls inside this segment.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row == self.start.row
            && pos.column >= self.start.column
            && pos.column <= self.end_column()
    }
}

/// Where the next uncached segment begins.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    line: LineId,
    pos: Position,
}

/// Cursor over a [`LineStore`] that yields soft-wrapped segments of at
/// most `width` code points (a single word longer than the width gets a
/// segment to itself).
///
/// Lines break only between words, where a word is a run of
/// non-whitespace code points or a single whitespace code point. Every
/// segment computed since the last reset is cached, so scanning back and
/// forth over visited segments costs O(1). Scanning back stops at the
/// first segment of the current generation.
///
/// Like [`CharNavigator`](super::CharNavigator), the navigator checks the
/// store's [`Stamp`] on every call and starts a new generation from the
/// head when the store has changed.
///
/// ```
/// use linewise::{LineStore, WrapNavigator};
///
/// let store = LineStore::from_text("the quick brown fox");
/// let mut nav = WrapNavigator::new(&store, 10);
/// let mut rows = Vec::new();
/// while nav.scan_next(&store) {
///     rows.push(nav.text().to_string());
/// }
/// assert_eq!(rows, ["the quick ", "brown fox"]);
/// ```
#[derive(Debug, Clone)]
pub struct WrapNavigator {
    width: usize,
    stamp: Stamp,
    segments: Vec<Segment>,
    current: Option<usize>,
    frontier: Option<Frontier>,
    line_chars: Vec<char>,
    line_chars_of: Option<LineId>,
}

impl WrapNavigator {
    /// Create a navigator wrapping at `width` code points (at least 1).
    pub fn new(store: &LineStore, width: usize) -> Self {
        let mut nav = Self {
            width: width.max(1),
            stamp: store.stamp(),
            segments: Vec::new(),
            current: None,
            frontier: None,
            line_chars: Vec::new(),
            line_chars_of: None,
        };
        nav.reset(store);
        nav
    }

    /// Configured wrap width.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Change the wrap width; starts a new generation.
    pub fn set_width(&mut self, store: &LineStore, width: usize) {
        self.width = width.max(1);
        self.reset(store);
    }

    /// Drop the cached segments and move before the first segment.
    pub fn reset(&mut self, store: &LineStore) {
        self.stamp = store.stamp();
        self.segments.clear();
        self.current = None;
        self.frontier = Some(Frontier {
            line: store.head(),
            pos: Position::ORIGIN,
        });
        self.line_chars.clear();
        self.line_chars_of = None;
        tracing::trace!(width = self.width, "wrap generation reset");
    }

    /// Whether the store changed since this navigator last synced with it.
    pub fn is_stale(&self, store: &LineStore) -> bool {
        self.stamp != store.stamp()
    }

    /// Current segment, or `None` before the first scan.
    pub fn current(&self) -> Option<&Segment> {
        self.current.and_then(|i| self.segments.get(i))
    }

    /// Text of the current segment, empty before the first scan.
    pub fn text(&self) -> &str {
        self.current().map_or("", Segment::text)
    }

    /// Start of the current segment.
    pub fn position(&self) -> Option<Position> {
        self.current().map(Segment::start)
    }

    /// Zero-based index of the current segment in this generation, or
    /// `None` before the first scan.
    pub const fn wrap_line_index(&self) -> Option<usize> {
        self.current
    }

    /// Number of segments cached in this generation.
    pub fn cached_len(&self) -> usize {
        self.segments.len()
    }

    /// Advance to the next segment, reusing a cached one when available.
    /// Returns `false` after the last segment of the buffer.
    pub fn scan_next(&mut self, store: &LineStore) -> bool {
        self.sync(store);
        let next = self.current.map_or(0, |i| i + 1);
        if next < self.segments.len() {
            self.current = Some(next);
            return true;
        }
        let Some(frontier) = self.frontier else {
            return false;
        };
        let segment = self.compute(store, frontier);
        self.segments.push(segment);
        self.current = Some(self.segments.len() - 1);
        true
    }

    /// Move back to the previous cached segment. Returns `false` at the
    /// first segment of the generation.
    pub fn scan_prev(&mut self, store: &LineStore) -> bool {
        self.sync(store);
        match self.current {
            Some(i) if i > 0 => {
                self.current = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Rescan from the head to the segment containing `pos`.
    ///
    /// Returns `false` and leaves the navigator unchanged if the row does
    /// not exist or the column is past the row's terminator. A stale
    /// navigator starts a new generation first, so a failed seek then
    /// leaves it before the first segment. Costs one segment computation
    /// per segment before the target.
    pub fn seek(&mut self, store: &LineStore, pos: Position) -> bool {
        self.sync(store);
        if !store.in_bounds(pos) {
            return false;
        }
        let _scope = perf::scope("wrap.seek");
        self.reset(store);
        while self.scan_next(store) {
            if self.current().is_some_and(|s| s.contains(pos)) {
                perf::event("wrap.seek")
                    .field("row", pos.row)
                    .field("column", pos.column)
                    .field("width", self.width)
                    .field("segments", self.segments.len())
                    .emit();
                return true;
            }
        }
        false
    }

    /// Build the segment starting at `frontier` and advance the frontier.
    fn compute(&mut self, store: &LineStore, frontier: Frontier) -> Segment {
        if self.line_chars_of != Some(frontier.line) {
            self.line_chars.clear();
            self.line_chars.extend(store.record(frontier.line).body().chars());
            self.line_chars_of = Some(frontier.line);
        }
        let body = &self.line_chars;
        let start = frontier.pos.column;

        let mut column = start;
        let mut used = 0;
        while column < body.len() {
            let end = word_end(body, column);
            let len = end - column;
            if used > 0 && used + len > self.width {
                break;
            }
            used += len;
            column = end;
        }

        let text: String = body[start..column].iter().collect();
        let row = frontier.pos.row;
        let span = if column == body.len() {
            self.frontier = store.next_of(frontier.line).map(|line| Frontier {
                line,
                pos: Position::new(0, row + 1),
            });
            column - start + 1
        } else {
            self.frontier = Some(Frontier {
                line: frontier.line,
                pos: Position::new(column, row),
            });
            column - start
        };

        Segment {
            text,
            start: frontier.pos,
            span,
        }
    }

    fn sync(&mut self, store: &LineStore) {
        if self.is_stale(store) {
            tracing::debug!("wrap navigator stale; resetting");
            self.reset(store);
        }
    }
}

/// End (exclusive) of the word starting at `start`: one whitespace code
/// point, or a run of non-whitespace.
fn word_end(chars: &[char], start: usize) -> usize {
    if chars[start].is_whitespace() {
        return start + 1;
    }
    chars[start..]
        .iter()
        .position(|c| c.is_whitespace())
        .map_or(chars.len(), |offset| start + offset)
}
