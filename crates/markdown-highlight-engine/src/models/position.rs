use serde::{Deserialize, Serialize};

/// A single place in the source document.
///
/// `line` and `column` are 1-based, `offset` is a 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// The source range a node was built from.
///
/// Positions are only ever read after parsing, so they are plain `Copy`
/// values: a node derived from another simply carries the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl Position {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Returns a position spanning from `self.start` to `other.end`.
    #[must_use]
    pub fn extend_to(self, other: Position) -> Position {
        Position {
            start: self.start,
            end: other.end,
        }
    }
}
