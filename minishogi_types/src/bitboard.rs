/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not},
};

use super::Square;

/// A set of [`Square`]s, one bit per square.
///
/// Only the low 25 bits are ever set; every operation masks off the rest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(u32);

impl Bitboard {
    /// A bitboard with no squares set.
    pub const EMPTY_BOARD: Self = Self(0);

    /// A bitboard with every square set.
    pub const FULL_BOARD: Self = Self((1 << Square::COUNT) - 1);

    /// Creates a new [`Bitboard`] from raw bits, discarding anything beyond the board.
    #[inline(always)]
    pub const fn new(bits: u32) -> Self {
        Self(bits & Self::FULL_BOARD.0)
    }

    /// Creates a [`Bitboard`] containing only `square`.
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    /// Creates a [`Bitboard`] of every square in column `col`.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::{Bitboard, Square};
    /// let col = Bitboard::col(2);
    /// assert_eq!(col.population(), 5);
    /// assert!(col.contains(Square::new(4, 2)));
    /// ```
    #[inline(always)]
    pub const fn col(col: u8) -> Self {
        Self(0b00001_00001_00001_00001_00001 << col)
    }

    /// Creates a [`Bitboard`] of every square in row `row`.
    #[inline(always)]
    pub const fn row(row: u8) -> Self {
        Self(0b11111 << (row * Square::SIDE))
    }

    /// Raw bits of this bitboard.
    #[inline(always)]
    pub const fn inner(&self) -> u32 {
        self.0
    }

    /// Returns `true` if no squares are set.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if any square is set.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns `true` if `square` is set.
    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & Self::from_square(square).0 != 0
    }

    /// Returns `true` if this bitboard shares any squares with `other`.
    #[inline(always)]
    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Number of squares set.
    #[inline(always)]
    pub const fn population(&self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Sets `square`.
    #[inline(always)]
    pub fn set(&mut self, square: Square) {
        self.0 |= Self::from_square(square).0;
    }

    /// Clears `square`.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.0 &= !Self::from_square(square).0;
    }

    /// The lowest set square, if any.
    #[inline(always)]
    pub const fn lsb(&self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as usize)
        }
    }

    /// Removes and returns the lowest set square, if any.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let square = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(square)
    }

    /// Bitwise AND, usable in `const` contexts.
    #[inline(always)]
    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Bitwise OR, usable in `const` contexts.
    #[inline(always)]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Bitwise NOT restricted to the board, usable in `const` contexts.
    #[inline(always)]
    pub const fn not(self) -> Self {
        Self(!self.0 & Self::FULL_BOARD.0)
    }

    /// An iterator over every square set in this bitboard, lowest first.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter(*self)
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::EMPTY_BOARD, |bb, square| bb | square)
    }
}

impl<T: Into<Bitboard>> BitOr<T> for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: T) -> Self::Output {
        self.or(rhs.into())
    }
}

impl<T: Into<Bitboard>> BitOrAssign<T> for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: T) {
        *self = *self | rhs;
    }
}

impl<T: Into<Bitboard>> BitAnd<T> for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: T) -> Self::Output {
        self.and(rhs.into())
    }
}

impl<T: Into<Bitboard>> BitAndAssign<T> for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: T) {
        *self = *self & rhs;
    }
}

impl<T: Into<Bitboard>> BitXor<T> for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: T) -> Self::Output {
        Self(self.0 ^ rhs.into().0)
    }
}

impl<T: Into<Bitboard>> BitXorAssign<T> for Bitboard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: T) {
        *self = *self ^ rhs;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Bitboard::not(self)
    }
}

/// An iterator over the [`Square`]s of a [`Bitboard`].
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.0.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Bitboard {
    /// Prints the board with column 4 on the left, the same way positions are displayed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..Square::SIDE {
            for col in (0..Square::SIDE).rev() {
                let c = if self.contains(Square::new(row, col)) {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{c}")?;
                if col != 0 {
                    write!(f, " ")?;
                }
            }
            if row != Square::SIDE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#09x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_lowest_first() {
        let bb = Bitboard::from_iter([Square::new(3, 1), Square::new(0, 4), Square::new(2, 2)]);
        let squares: Vec<_> = bb.into_iter().collect();
        assert_eq!(
            squares,
            [Square::new(0, 4), Square::new(2, 2), Square::new(3, 1)]
        );
    }

    #[test]
    fn not_stays_on_the_board() {
        assert_eq!(!Bitboard::EMPTY_BOARD, Bitboard::FULL_BOARD);
        assert_eq!((!Bitboard::FULL_BOARD).population(), 0);
        assert_eq!((!Bitboard::col(0)).population(), 20);
    }

    #[test]
    fn set_and_clear() {
        let mut bb = Bitboard::EMPTY_BOARD;
        let sq = Square::new(4, 4);
        bb.set(sq);
        assert!(bb.contains(sq));
        assert_eq!(bb.lsb(), Some(sq));
        bb.clear(sq);
        assert!(bb.is_empty());
    }

    #[test]
    fn rows_and_columns_partition_the_board() {
        let rows = (0..Square::SIDE).fold(Bitboard::EMPTY_BOARD, |bb, r| bb | Bitboard::row(r));
        let cols = (0..Square::SIDE).fold(Bitboard::EMPTY_BOARD, |bb, c| bb | Bitboard::col(c));
        assert_eq!(rows, Bitboard::FULL_BOARD);
        assert_eq!(cols, Bitboard::FULL_BOARD);
        assert_eq!(Bitboard::row(1) & Bitboard::col(3), Square::new(1, 3).bitboard());
    }
}
