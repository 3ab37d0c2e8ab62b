//! Logical addresses into a [`LineStore`](crate::store::LineStore).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A (column, row) address of one code point.
///
/// Both coordinates are zero-based and counted in code points. The row is
/// an ordinal in chain order; lines never store it. Column `line_len(row)`
/// addresses the line terminator, which is a valid cursor position.
///
/// Positions order row first, then column:
///
/// ```
/// use linewise::Position;
///
/// assert!(Position::new(9, 0) < Position::new(0, 1));
/// assert!(Position::new(2, 3) < Position::new(4, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based code-point column.
    pub column: usize,
    /// Zero-based line ordinal.
    pub row: usize,
}

impl Position {
    /// The first code point of the buffer.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a position from a column and a row.
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Column 0 of the same row.
    pub const fn line_start(self) -> Self {
        Self::new(0, self.row)
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders as `ROW:COL`, the same form [`FromStr`] accepts.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Error returned when a `ROW:COL` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position {0:?} (expected ROW:COL)")]
pub struct ParsePositionError(String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let (row, column) = s.trim().split_once(':').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let column = column.trim().parse().map_err(|_| err())?;
        Ok(Self::new(column, row))
    }
}
