use serde::{Deserialize, Serialize};

/// A grid cell, counted from the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Coordinate { row, col }
    }

    /// Apply a signed offset, returning `None` if either component would go negative.
    pub fn offset(self, delta: Delta) -> Option<Coordinate> {
        let row = self.row.checked_add_signed(delta.row as isize)?;
        let col = self.col.checked_add_signed(delta.col as isize)?;
        Some(Coordinate { row, col })
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate { row, col }
    }
}

/// Signed row/column movement produced by one action outcome.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    pub row: i32,
    pub col: i32,
}

impl Delta {
    pub const STAY: Delta = Delta::new(0, 0);
    pub const UP: Delta = Delta::new(-1, 0);
    pub const DOWN: Delta = Delta::new(1, 0);
    pub const LEFT: Delta = Delta::new(0, -1);
    pub const RIGHT: Delta = Delta::new(0, 1);

    pub const fn new(row: i32, col: i32) -> Self {
        Delta { row, col }
    }

    /// Direction lying to the left of an agent heading along `self`.
    pub const fn left_of(self) -> Delta {
        Delta::new(-self.col, self.row)
    }

    /// Direction lying to the right of an agent heading along `self`.
    pub const fn right_of(self) -> Delta {
        Delta::new(self.col, -self.row)
    }
}

/// 1-based state number. The live states of a grid occupy `1..=|S|`,
/// and `|S| + 1` is reserved for the absorbing state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(usize);

impl StateId {
    /// Return the state number as written in exported tables.
    pub fn value(self) -> usize {
        self.0
    }

    /// Zero-based position used for dense storage.
    pub(crate) fn slot(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl From<usize> for StateId {
    fn from(value: usize) -> Self {
        StateId(value)
    }
}

/// Index into an action set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(usize);

impl ActionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ActionId {
    fn from(value: usize) -> Self {
        ActionId(value)
    }
}
