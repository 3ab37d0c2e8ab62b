//! Line store: the editable text behind an editor view.
//!
//! Text lives in a doubly linked chain of line records. The chain is kept
//! in an arena and addressed by stable [`LineId`] indices, and freed slots
//! are recycled. Rows are never stored: a row is the ordinal of a record in
//! chain order, so resolving a row walks the chain from the head.
//!
//! Every line record ends with exactly one [`TERMINATOR`], including the
//! last one. [`LineStore::text`] strips that final terminator on export.
//!
//! Edits are pad-on-write: writing past the end of a line or past the last
//! row fills the gap with spaces or empty lines. Reads are strict.

mod edit;
mod io;
mod line;
mod range;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, StoreError};
use crate::position::Position;

pub use line::{LineId, TERMINATOR};
pub use range::Clip;

pub(crate) use line::LineRecord;

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one content state of one store.
///
/// Navigators remember the stamp they were built against and reset
/// themselves when the store's current stamp differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stamp {
    store: u64,
    version: u64,
}

/// Arena-backed chain of terminator-terminated lines.
///
/// Never empty: clearing leaves a single empty line.
pub struct LineStore {
    slots: Vec<Option<LineRecord>>,
    free: Vec<LineId>,
    head: LineId,
    tail: LineId,
    line_count: usize,
    dirty: bool,
    name: Option<PathBuf>,
    id: u64,
    version: u64,
}

impl LineStore {
    /// Create a store holding one empty line.
    pub fn new() -> Self {
        Self {
            slots: vec![Some(LineRecord::new(""))],
            free: Vec::new(),
            head: LineId(0),
            tail: LineId(0),
            line_count: 1,
            dirty: false,
            name: None,
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            version: 0,
        }
    }

    /// Create a store from text, split on line terminators.
    pub fn from_text(text: &str) -> Self {
        let mut store = Self::new();
        store.set_text(text);
        store
    }

    /// Replace all content by splitting `text` on line terminators.
    ///
    /// A trailing terminator does not produce an extra empty line, and a
    /// `\r` before a terminator is dropped. Always leaves at least one line.
    /// The new content becomes the clean baseline.
    pub fn set_text(&mut self, text: &str) {
        self.slots.clear();
        self.free.clear();
        let mut lines = text.lines();
        let first = lines.next().unwrap_or("");
        self.slots.push(Some(LineRecord::new(first)));
        self.head = LineId(0);
        self.tail = LineId(0);
        self.line_count = 1;
        for line in lines {
            self.push_back(line);
        }
        self.dirty = false;
        self.bump();
        tracing::debug!(lines = self.line_count, "set text");
    }

    /// All lines joined by terminators, without a trailing terminator.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (row, body) in self.lines().enumerate() {
            if row > 0 {
                out.push(TERMINATOR);
            }
            out.push_str(body);
        }
        out
    }

    /// Reset to a single empty line.
    pub fn clear(&mut self) {
        self.set_text("");
        self.dirty = true;
    }

    /// Append a line to the end of the chain.
    pub fn append_line(&mut self, body: &str) {
        self.push_back(body);
        self.mark_dirty();
    }

    /// Number of lines; always at least 1.
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Text of `row` without its terminator.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.line_id(row).map(|id| self.record(id).body())
    }

    /// Code points in `row`, excluding the terminator.
    pub fn line_len(&self, row: usize) -> Option<usize> {
        self.line_id(row).map(|id| self.record(id).body_len())
    }

    /// Iterate line bodies in chain order.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            store: self,
            next: Some(self.head),
        }
    }

    /// Whether `pos` addresses an existing code point (the terminator
    /// column included).
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.line_len(pos.row).is_some_and(|len| pos.column <= len)
    }

    /// Whether the content changed since the last load, save or `set_text`.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the content as modified.
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Flag the content as saved.
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Display name (the file path), if one is known.
    pub fn name(&self) -> Option<&Path> {
        self.name.as_deref()
    }

    /// Set the display name used by [`save`](Self::save).
    pub fn set_name(&mut self, name: impl Into<PathBuf>) {
        self.name = Some(name.into());
    }

    /// Current content stamp.
    pub const fn stamp(&self) -> Stamp {
        Stamp {
            store: self.id,
            version: self.version,
        }
    }

    /// Check that every line is non-empty, terminator-terminated, and
    /// correctly linked.
    ///
    /// Diagnostic only; every public mutation already keeps these
    /// properties.
    ///
    /// # Errors
    /// Returns the first violation found, naming its row.
    pub fn validate(&self) -> Result<()> {
        let mut prev = None;
        let mut cursor = Some(self.head);
        let mut row = 0;
        while let Some(id) = cursor {
            let Some(record) = self.slots.get(id.0).and_then(Option::as_ref) else {
                return Err(StoreError::BrokenChain { row });
            };
            if record.prev != prev {
                return Err(StoreError::BrokenChain { row });
            }
            if record.text.is_empty() {
                return Err(StoreError::EmptyLine { row });
            }
            if !record.is_terminated() {
                return Err(StoreError::Unterminated { row });
            }
            prev = Some(id);
            cursor = record.next;
            row += 1;
            if row > self.slots.len() {
                return Err(StoreError::BrokenChain { row });
            }
        }
        if row != self.line_count || prev != Some(self.tail) {
            return Err(StoreError::BrokenChain { row });
        }
        Ok(())
    }

    // --- Chain access for navigators ---

    pub(crate) const fn head(&self) -> LineId {
        self.head
    }

    pub(crate) const fn tail(&self) -> LineId {
        self.tail
    }

    /// Record for a live id. Ids only come from the chain, so a missing
    /// slot would be a broken chain.
    pub(crate) fn record(&self, id: LineId) -> &LineRecord {
        match self.slots.get(id.0) {
            Some(Some(record)) => record,
            _ => unreachable!("line id {} is not live", id.0),
        }
    }

    pub(crate) fn next_of(&self, id: LineId) -> Option<LineId> {
        self.record(id).next
    }

    pub(crate) fn prev_of(&self, id: LineId) -> Option<LineId> {
        self.record(id).prev
    }

    /// Line at `row`, walking from the head.
    pub(crate) fn line_id(&self, row: usize) -> Option<LineId> {
        let mut cursor = Some(self.head);
        for _ in 0..row {
            cursor = self.next_of(cursor?);
        }
        cursor
    }

    // --- Chain mutation ---

    fn record_mut(&mut self, id: LineId) -> &mut LineRecord {
        match self.slots.get_mut(id.0) {
            Some(Some(record)) => record,
            _ => unreachable!("line id {} is not live", id.0),
        }
    }

    fn alloc(&mut self, record: LineRecord) -> LineId {
        if let Some(id) = self.free.pop() {
            self.slots[id.0] = Some(record);
            id
        } else {
            self.slots.push(Some(record));
            LineId(self.slots.len() - 1)
        }
    }

    /// Link a new record holding `text` (already terminated) after `id`.
    fn insert_after(&mut self, id: LineId, text: String) -> LineId {
        let next = self.record(id).next;
        let new_id = self.alloc(LineRecord {
            text,
            prev: Some(id),
            next,
        });
        self.record_mut(id).next = Some(new_id);
        match next {
            Some(next) => self.record_mut(next).prev = Some(new_id),
            None => self.tail = new_id,
        }
        self.line_count += 1;
        new_id
    }

    /// Unlink a record that is not the head and return its text.
    fn unlink(&mut self, id: LineId) -> String {
        let record = self.slots[id.0].take();
        let Some(record) = record else {
            unreachable!("line id {} is not live", id.0);
        };
        match record.prev {
            Some(prev) => self.record_mut(prev).next = record.next,
            None => unreachable!("the head line is never unlinked"),
        }
        match record.next {
            Some(next) => self.record_mut(next).prev = record.prev,
            None => self.tail = record.prev.unwrap_or(self.head),
        }
        self.free.push(id);
        self.line_count -= 1;
        record.text
    }

    fn push_back(&mut self, body: &str) -> LineId {
        let mut text = String::with_capacity(body.len() + 1);
        text.push_str(body);
        text.push(TERMINATOR);
        let tail = self.tail;
        let id = self.insert_after(tail, text);
        self.bump();
        id
    }

    /// Line at `row`, appending empty lines until it exists.
    fn line_id_padded(&mut self, row: usize) -> LineId {
        while self.line_count <= row {
            self.push_back("");
        }
        // Just padded, so the row exists.
        self.line_id(row).unwrap_or(self.tail)
    }

    const fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineStore")
            .field("lines", &self.line_count)
            .field("dirty", &self.dirty)
            .field("name", &self.name)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Iterator over line bodies, returned by [`LineStore::lines`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    store: &'a LineStore,
    next: Option<LineId>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let record = self.store.record(id);
        self.next = record.next;
        Some(record.body())
    }
}
