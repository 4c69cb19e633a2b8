/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};

use super::{Bitboard, Color, Direction, SQUARES_TO_EDGE};

/// Represents a single square on a 5x5 board.
///
/// Squares are addressed `0..25` in row-major order: `row = index / 5` and `col = index % 5`.
/// Row 0 is the top of the board (Gote's back row), and row 4 is the bottom (Sente's back row).
///
/// In text, a square is written as its file (`col + 1`) followed by its rank (`a` for row 0 through `e` for row 4),
/// so square `0` is `1a` and square `24` is `5e`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 25;

    /// Number of rows (and columns) on the board.
    pub const SIDE: u8 = 5;

    /// Creates a new [`Square`] from a row and column, both in `0..5`.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::Square;
    /// let sq = Square::new(3, 4);
    /// assert_eq!(sq.index(), 19);
    /// assert_eq!(sq.to_string(), "5d");
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < Self::SIDE && col < Self::SIDE);
        Self(row * Self::SIDE + col)
    }

    /// Creates a [`Square`] from an index, if it is on the board.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Creates a [`Square`] from an index without checking that it is on the board.
    #[inline(always)]
    pub(crate) const fn from_index_unchecked(index: usize) -> Self {
        Self(index as u8)
    }

    /// An iterator over every square, in index order.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Index of this square, in `0..25`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Row of this square, in `0..5`, from top to bottom.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 / Self::SIDE
    }

    /// Column of this square, in `0..5`.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 % Self::SIDE
    }

    /// A [`Bitboard`] containing only this square.
    #[inline(always)]
    pub const fn bitboard(&self) -> Bitboard {
        Bitboard::from_square(*self)
    }

    /// Number of squares between this square and the edge of the board, travelling in `direction`.
    #[inline(always)]
    pub const fn distance_to_edge(&self, direction: Direction) -> u8 {
        SQUARES_TO_EDGE[self.index()][direction.index()]
    }

    /// The square `n` steps away in `direction`, or `None` if that walks off the board.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::{Direction, Square};
    /// let sq = Square::new(0, 0);
    /// assert_eq!(sq.step(Direction::South, 2), Some(Square::new(2, 0)));
    /// assert_eq!(sq.step(Direction::North, 1), None);
    /// assert_eq!(sq.step(Direction::SouthWest, 1), Some(Square::new(1, 1)));
    /// ```
    #[inline(always)]
    pub const fn step(&self, direction: Direction, n: u8) -> Option<Self> {
        if n > self.distance_to_edge(direction) {
            return None;
        }
        let index = self.0 as i8 + direction.offset() * n as i8;
        Some(Self(index as u8))
    }

    /// Returns `true` if this square lies in `color`'s promotion zone.
    ///
    /// The zone is the row nearest the opponent: row 0 for Sente and row 4 for Gote.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::{Color, Square};
    /// assert!(Square::new(0, 2).in_promotion_zone(Color::Sente));
    /// assert!(!Square::new(0, 2).in_promotion_zone(Color::Gote));
    /// assert!(Square::new(4, 0).in_promotion_zone(Color::Gote));
    /// ```
    #[inline(always)]
    pub const fn in_promotion_zone(&self, color: Color) -> bool {
        match color {
            Color::Sente => self.row() == 0,
            Color::Gote => self.row() == Self::SIDE - 1,
        }
    }

    /// Character for this square's file (`1` through `5`).
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'1' + self.col()) as char
    }

    /// Character for this square's rank (`a` through `e`).
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'a' + self.row()) as char
    }

    /// Parses a [`Square`] from its file and rank, such as `3c`.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::Square;
    /// assert_eq!(Square::from_notation("1a").unwrap().index(), 0);
    /// assert_eq!(Square::from_notation("5e").unwrap().index(), 24);
    /// assert!(Square::from_notation("6a").is_err());
    /// ```
    pub fn from_notation(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Square must be two characters long. Got {s:?}");
        };

        let col = file
            .to_digit(10)
            .filter(|d| (1..=5).contains(d))
            .ok_or(anyhow!("Invalid file in square {s:?}: expected 1-5"))?;

        if !('a'..='e').contains(&rank) {
            bail!("Invalid rank in square {s:?}: expected a-e");
        }
        let row = rank as u8 - b'a';

        Ok(Self::new(row, col as u8 - 1))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}
