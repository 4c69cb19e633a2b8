/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::Square;

/// One of the eight compass directions a piece can step or slide in.
///
/// North is towards row 0 and East is towards column 0, matching how the board is printed
/// (column 4 on the left, column 0 on the right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Number of directions.
    pub const COUNT: usize = 8;

    /// The four orthogonal directions.
    pub const ORTHOGONAL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The four diagonal directions.
    pub const DIAGONAL: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// All eight directions.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::North,
            Self::South,
            Self::East,
            Self::West,
            Self::NorthEast,
            Self::NorthWest,
            Self::SouthEast,
            Self::SouthWest,
        ]
    }

    /// Index of this direction, for use in `[T; Direction::COUNT]` arrays.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Change in square index when taking one step in this direction.
    #[inline(always)]
    pub const fn offset(&self) -> i8 {
        match self {
            Self::North => -5,
            Self::South => 5,
            Self::East => -1,
            Self::West => 1,
            Self::NorthEast => -6,
            Self::NorthWest => -4,
            Self::SouthEast => 4,
            Self::SouthWest => 6,
        }
    }

    /// The direction pointing the opposite way.
    #[inline(always)]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::NorthEast => Self::SouthWest,
            Self::NorthWest => Self::SouthEast,
            Self::SouthEast => Self::NorthWest,
            Self::SouthWest => Self::NorthEast,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Number of squares from each square to the edge of the board, per [`Direction`].
///
/// Indexed by `[square][direction]`. Computed at compile time, so stepping off the board
/// can be rejected with a single lookup.
pub const SQUARES_TO_EDGE: [[u8; Direction::COUNT]; Square::COUNT] = compute_squares_to_edge();

const fn compute_squares_to_edge() -> [[u8; Direction::COUNT]; Square::COUNT] {
    let mut table = [[0; Direction::COUNT]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let north = square.row();
        let south = Square::SIDE - 1 - square.row();
        let east = square.col();
        let west = Square::SIDE - 1 - square.col();

        table[i][Direction::North.index()] = north;
        table[i][Direction::South.index()] = south;
        table[i][Direction::East.index()] = east;
        table[i][Direction::West.index()] = west;
        table[i][Direction::NorthEast.index()] = min(north, east);
        table[i][Direction::NorthWest.index()] = min(north, west);
        table[i][Direction::SouthEast.index()] = min(south, east);
        table[i][Direction::SouthWest.index()] = min(south, west);

        i += 1;
    }

    table
}

const fn min(a: u8, b: u8) -> u8 {
    if a < b {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_have_expected_reach() {
        let top_right = Square::new(0, 0);
        assert_eq!(top_right.distance_to_edge(Direction::North), 0);
        assert_eq!(top_right.distance_to_edge(Direction::East), 0);
        assert_eq!(top_right.distance_to_edge(Direction::SouthWest), 4);

        let bottom_left = Square::new(4, 4);
        assert_eq!(bottom_left.distance_to_edge(Direction::NorthEast), 4);
        assert_eq!(bottom_left.distance_to_edge(Direction::SouthEast), 0);
    }

    #[test]
    fn opposite_cancels_offset() {
        for direction in Direction::all() {
            assert_eq!(direction.offset(), -direction.opposite().offset());
        }
    }
}
