/// Code point that ends every line record.
pub const TERMINATOR: char = '\n';

/// Stable index of a line record in the store's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(pub(crate) usize);

/// One line of text plus its chain links.
///
/// `text` always ends with exactly one [`TERMINATOR`] once an edit returns.
#[derive(Debug, Clone)]
pub(crate) struct LineRecord {
    pub(crate) text: String,
    pub(crate) prev: Option<LineId>,
    pub(crate) next: Option<LineId>,
}

impl LineRecord {
    /// Build a record from a line body; the terminator is appended.
    pub(crate) fn new(body: &str) -> Self {
        let mut text = String::with_capacity(body.len() + 1);
        text.push_str(body);
        text.push(TERMINATOR);
        Self {
            text,
            prev: None,
            next: None,
        }
    }

    /// Line text without the terminator.
    pub(crate) fn body(&self) -> &str {
        self.text.strip_suffix(TERMINATOR).unwrap_or(&self.text)
    }

    /// Code points including the terminator.
    pub(crate) fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Code points excluding the terminator.
    pub(crate) fn body_len(&self) -> usize {
        self.body().chars().count()
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.text.ends_with(TERMINATOR)
    }

    /// Byte offset of `column`, clamped to the end of the text.
    pub(crate) fn byte_offset(&self, column: usize) -> usize {
        self.text
            .char_indices()
            .nth(column)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Pad with spaces before the terminator until column `column` exists.
    pub(crate) fn pad_to(&mut self, column: usize) {
        let body_len = self.body_len();
        if column > body_len {
            let at = self.text.len() - TERMINATOR.len_utf8();
            self.text.insert_str(at, &" ".repeat(column - body_len));
        }
    }

    /// Insert `s` (no terminators) at `column`, padding first. Returns the
    /// column just past the inserted text.
    pub(crate) fn insert_str(&mut self, column: usize, s: &str) -> usize {
        self.pad_to(column);
        let at = self.byte_offset(column);
        self.text.insert_str(at, s);
        column + s.chars().count()
    }

    /// Cut the line at `column`, padding first. Keeps the head and returns
    /// the tail text (which keeps the original terminator).
    pub(crate) fn split_off(&mut self, column: usize) -> String {
        self.pad_to(column);
        let at = self.byte_offset(column);
        let tail = self.text.split_off(at);
        self.text.push(TERMINATOR);
        tail
    }

    /// Remove up to `n` code points starting at `column`. Returns how many
    /// were removed; removing the terminator leaves the record unterminated
    /// until the caller merges or restores it.
    pub(crate) fn remove(&mut self, column: usize, n: usize) -> usize {
        let start = self.byte_offset(column);
        let mut end = start;
        let mut removed = 0;
        for c in self.text[start..].chars().take(n) {
            end += c.len_utf8();
            removed += 1;
        }
        self.text.replace_range(start..end, "");
        removed
    }

    /// Code points in `from..=to`, clamped to the terminator.
    pub(crate) fn slice_inclusive(&self, from: usize, to: usize) -> String {
        let last = self.len().saturating_sub(1);
        let to = to.min(last);
        if from > to {
            return String::new();
        }
        self.text.chars().skip(from).take(to - from + 1).collect()
    }
}
