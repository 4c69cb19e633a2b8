/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use log::debug;

use super::Game;

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// Every legal move is made and unmade in place, so `game` is left exactly as it was.
///
/// # Example
/// ```
/// # use minishogi::{perft, Game};
/// let mut game = Game::default();
/// assert_eq!(perft(&mut game, 0), 1);
/// assert_eq!(perft(&mut game, 2), 181);
/// ```
pub fn perft(game: &mut Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves();

    // Bulk counting; no need to recurse again just to count the leaves
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        game.make_move(mv);
        nodes += perft(game, depth - 1);
        game.unmake_move(mv);
    }

    nodes
}

/// Perform a splitperft at the specified depth, printing the number of nodes reachable after each move available from the root.
///
/// Returns the total number of nodes.
pub fn splitperft(game: &mut Game, depth: usize) -> u64 {
    // Without this, splitperft(0) would print nothing and return 0
    if depth == 0 {
        return 1;
    }

    let mut total = 0;
    for mv in game.legal_moves() {
        game.make_move(mv);
        let nodes = perft(game, depth - 1);
        game.unmake_move(mv);

        debug!("{mv} leads to {nodes} nodes");
        println!("{mv}: {nodes}");
        total += nodes;
    }

    total
}

/// Print a perft summary of `game` at `depth`.
///
/// If `PRETTY` is set, the board is drawn before the results.
/// If `SPLIT` is set, the node count after each root move is printed as well.
pub fn print_perft<const PRETTY: bool, const SPLIT: bool>(game: &mut Game, depth: usize) -> u64 {
    if PRETTY {
        println!("{game:?}\n");
    } else {
        println!("{game}");
    }

    let now = Instant::now();
    let nodes = if SPLIT {
        let nodes = splitperft(game, depth);
        println!();
        nodes
    } else {
        perft(game, depth)
    };
    let elapsed = now.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64();
    println!("Depth:\t{depth}");
    println!("Nodes:\t{nodes}");
    println!("Time:\t{elapsed:.1?}");
    println!("NPS:\t{nps:.0}");

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, FEN_DROP_PAWN_MATE};

    #[test]
    fn depth_one_counts_legal_moves() {
        let mut game = Game::from_fen(FEN_DROP_PAWN_MATE).unwrap();
        let legal = game.legal_moves().len() as u64;
        assert_eq!(perft(&mut game, 1), legal);
        assert_eq!(perft(&mut game, 0), 1);
    }

    #[test]
    fn perft_restores_the_game() {
        let mut game = Game::default();
        game.make_move(Move::from_notation("5d5c").unwrap());
        let before = game.clone();

        perft(&mut game, 3);
        assert_eq!(game, before);
    }

    #[test]
    fn splitperft_matches_perft() {
        let mut game = Game::default();
        assert_eq!(splitperft(&mut game, 3), perft(&mut game, 3));
    }
}
