/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::Context;
use colored::Colorize;

use minishogi::{print_perft, Game, Move};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    // Print usage if insufficient arguments provided
    if args.len() < 2 {
        eprintln!(
            "{} {} <depth> [fen] [moves]",
            "Usage:".red().bold(),
            args[0]
        );
        std::process::exit(1);
    }

    // Parse args appropriately
    let depth = args[1].parse().context(format!(
        "Failed to parse {:?} as depth value. Expected integer.",
        args[1]
    ))?;
    let mut game = match args.get(2) {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::default(),
    };

    // Apply moves, if any were provided, as a single whitespace-separated argument
    if let Some(moves) = args.get(3) {
        for mv_str in moves.split_ascii_whitespace() {
            let mv = Move::from_notation(mv_str)?;
            game.make_move_checked(mv)
                .with_context(|| format!("Failed to apply {mv_str:?}"))?;
        }
    }

    print_perft::<true, true>(&mut game, depth);

    Ok(())
}
