//! Grid coordinates and a fixed-size set of them.
//!
//! `PositionSet` packs the 10×10 grid into a single `u128`, one bit per
//! cell in row-major order. It is `no_std` friendly and never allocates.

use core::fmt;
use core::ops::{BitAnd, BitOr, Not};

use crate::common::BoardError;
use crate::config::BOARD_SIZE;

const CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// A grid coordinate: `x` is the column, `y` the row, both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether the position lies inside the `BOARD_SIZE`² grid.
    pub const fn in_bounds(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Fails with `OutOfBounds` when the position is off the grid.
    pub fn check(self) -> Result<Self, BoardError> {
        if self.in_bounds() {
            Ok(self)
        } else {
            Err(BoardError::OutOfBounds { x: self.x, y: self.y })
        }
    }

    fn index(self) -> usize {
        self.y * BOARD_SIZE + self.x
    }

    fn from_index(idx: usize) -> Self {
        Self::new(idx % BOARD_SIZE, idx / BOARD_SIZE)
    }
}

/// Row-major ordering, matching the grid text layout.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Set of on-grid positions.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PositionSet {
    bits: u128,
}

impl PositionSet {
    #[inline]
    fn mask() -> u128 {
        (1u128 << CELLS) - 1
    }

    /// Empty set.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Every cell of the grid.
    pub fn full() -> Self {
        Self { bits: Self::mask() }
    }

    /// Adds `pos`, returning `true` if it was not already present.
    pub fn insert(&mut self, pos: Position) -> Result<bool, BoardError> {
        let bit = 1u128 << pos.check()?.index();
        let fresh = self.bits & bit == 0;
        self.bits |= bit;
        Ok(fresh)
    }

    /// Membership test; off-grid positions are never members.
    pub fn contains(&self, pos: Position) -> bool {
        pos.in_bounds() && (self.bits >> pos.index()) & 1 == 1
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Positions in row-major order.
    pub fn iter(&self) -> Iter {
        Iter { bits: self.bits }
    }

    /// The `n`-th member in row-major order.
    pub fn nth(&self, n: usize) -> Option<Position> {
        self.iter().nth(n)
    }

    /// Builds a set from positions, failing on the first off-grid one.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut set = Self::new();
        for pos in iter {
            set.insert(pos)?;
        }
        Ok(set)
    }
}

impl BitAnd for PositionSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self { bits: self.bits & rhs.bits }
    }
}

impl BitOr for PositionSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self { bits: self.bits | rhs.bits }
    }
}

/// Complement within the grid.
impl Not for PositionSet {
    type Output = Self;
    fn not(self) -> Self {
        Self { bits: !self.bits & Self::mask() }
    }
}

impl fmt::Debug for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a PositionSet {
    type Item = Position;
    type IntoIter = Iter;
    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Iterator over the members of a [`PositionSet`].
#[derive(Clone, Copy)]
pub struct Iter {
    bits: u128,
}

impl Iterator for Iter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Position> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(Position::from_index(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut set = PositionSet::new();
        assert_eq!(set.insert(Position::new(3, 7)), Ok(true));
        assert_eq!(set.insert(Position::new(3, 7)), Ok(false));
        assert_eq!(set.len(), 1);
        assert!(set.contains(Position::new(3, 7)));
        assert!(!set.contains(Position::new(7, 3)));
    }

    #[test]
    fn rejects_off_grid() {
        let mut set = PositionSet::new();
        assert_eq!(
            set.insert(Position::new(10, 0)),
            Err(BoardError::OutOfBounds { x: 10, y: 0 })
        );
        assert!(set.is_empty());
        assert!(!set.contains(Position::new(0, 10)));
    }

    #[test]
    fn iterates_row_major() {
        let set = PositionSet::try_from_iter([
            Position::new(9, 0),
            Position::new(0, 1),
            Position::new(2, 0),
        ])
        .unwrap();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(
            order,
            vec![Position::new(2, 0), Position::new(9, 0), Position::new(0, 1)]
        );
    }

    #[test]
    fn complement_stays_on_grid() {
        assert_eq!((!PositionSet::new()).len(), CELLS);
        assert!((!PositionSet::full()).is_empty());
        let mut one = PositionSet::new();
        one.insert(Position::new(5, 5)).unwrap();
        assert_eq!((!one).len(), CELLS - 1);
        assert!(!(!one).contains(Position::new(5, 5)));
    }
}
