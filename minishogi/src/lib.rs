/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use minishogi_types::*;

/// Reading and writing positions as FEN strings.
mod fen;
/// High-level abstraction of a game of minishogi, including legality checks and the drop-pawn-mate rule.
mod game;
/// All code related to generating pseudo-legal moves and drops for pieces on a board.
mod movegen;
/// An enum for modeling board moves and drops.
mod moves;
/// Utility function for performance testing.
mod perft;
/// The board, both hands, and the undo stack.
mod position;
/// Rule variants a game can be played under.
mod rules;

pub use fen::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use position::*;
pub use rules::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::fen::*;
    pub use crate::game::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::position::*;
    pub use crate::rules::*;
    pub use minishogi_types::*;
}
