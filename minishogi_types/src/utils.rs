/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// FEN string for the starting position of minishogi.
///
/// Gote's Rook, Bishop, Silver, Gold and King fill row 0 with a Pawn in front of the King,
/// and Sente's pieces mirror them on row 4.
pub const FEN_STARTPOS: &str = "rbsgk/4p/5/P4/KGSBR b -";

/// A position in which Sente can drop a Pawn to checkmate Gote, which the rules forbid.
pub const FEN_DROP_PAWN_MATE: &str = "k2TS/2G2/BS3/b2K1/R4 b PRg";

/// A position where the number of positions at depth 2 is smaller than at depth 1.
pub const FEN_NARROWING: &str = "k3S/B1GP1/5/GS1K1/R1B2 b RP";

/// A position where Sente starts in check.
pub const FEN_SENTE_IN_CHECK: &str = "2k1S/B1rP1/2KG1/GS1p1/R1B2 b -";

/// Maximum number of moves in any reachable position.
///
/// Large enough for a full hand dropped across every empty square alongside every board move.
pub const MAX_NUM_MOVES: usize = 256;
