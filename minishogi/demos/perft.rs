/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use minishogi::{perft, splitperft, DropPawnMate, Game, Move, PawnPromotion, Position, Rules};

/// Compute total number of states reachable from a position, given a depth.
#[derive(Debug, Parser)]
struct Cli {
    /// Depth to run the perft.
    depth: usize,

    /// The FEN string of the position to run the perft.
    #[arg(required = false)]
    fen: Option<String>,

    /// List of moves to apply to the position before running the perft.
    #[arg(required = false)]
    moves: Vec<String>,

    /// If set, perform a splitperft, displaying the number of nodes reachable after each move available from the root.
    #[arg(short, long, default_value = "false")]
    split: bool,

    /// If set, a Pawn entering the promotion zone may choose not to promote.
    #[arg(long, default_value = "false")]
    optional_promotion: bool,

    /// If set, Pawns may be dropped to deliver checkmate.
    #[arg(long, default_value = "false")]
    allow_drop_pawn_mate: bool,
}

impl Cli {
    fn rules(&self) -> Rules {
        let pawn_promotion = if self.optional_promotion {
            PawnPromotion::Optional
        } else {
            PawnPromotion::Forced
        };
        let drop_pawn_mate = if self.allow_drop_pawn_mate {
            DropPawnMate::Allowed
        } else {
            DropPawnMate::Forbidden
        };
        Rules::new(pawn_promotion, drop_pawn_mate)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    // Parse args appropriately
    let position = match &args.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::default(),
    };
    let mut game = Game::with_rules(position, args.rules());

    // Apply moves, if any were provided
    for mv_str in &args.moves {
        let mv = Move::from_notation(mv_str)?;
        game.make_move_checked(mv)?;
    }

    println!(
        "Computing PERFT({}) of the following position under {}:\n{:?}\n",
        args.depth.to_string().bold(),
        game.rules(),
        game.position()
    );

    let now = Instant::now();
    let total_nodes = if args.split {
        let nodes = splitperft(&mut game, args.depth);
        println!();
        nodes
    } else {
        perft(&mut game, args.depth)
    };

    let elapsed = now.elapsed();

    // Compute nodes-per-second metrics
    let nps = total_nodes as f32 / elapsed.as_secs_f32();
    let m_nps = nps / 1_000_000.0;

    println!("  Total Nodes:\t{}", total_nodes.to_string().green());
    println!(" Elapsed Time:\t{elapsed:.1?}");
    println!("  Nodes / Sec:\t{nps:.0}");
    println!("M Nodes / Sec:\t{m_nps:.1}");

    Ok(())
}
