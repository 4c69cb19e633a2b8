/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

/// Sets of squares, used for per-color occupancy.
mod bitboard;
/// Compass directions and the distance-to-edge tables used when stepping and sliding.
mod direction;
/// Enums for piece kinds, colors, and a struct for a minishogi piece.
mod piece;
/// Squares on the 5x5 board.
mod square;
/// Misc constants, such as well-known FEN strings.
mod utils;

pub use bitboard::*;
pub use direction::*;
pub use piece::*;
pub use square::*;
pub use utils::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::bitboard::*;
    pub use crate::direction::*;
    pub use crate::piece::*;
    pub use crate::square::*;
    pub use crate::utils::*;
}
