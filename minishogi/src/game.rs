/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref, str::FromStr};

use anyhow::{bail, Result};
use log::debug;

use super::{
    generate_board_moves, generate_drops, is_attacked, Color, Direction, Move, MoveList, Piece,
    PieceKind, Position, Rules, Square,
};

/// Represents a game of minishogi: a [`Position`] together with the [`Rules`] it is played under.
///
/// Everything that needs to know which moves are legal lives here.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Game {
    /// The current state of the board, hands and side to move.
    position: Position,

    /// Which rule variants are in effect.
    rules: Rules,
}

impl Game {
    /// Creates a new [`Game`] from the provided [`Position`], played under the default [`Rules`].
    #[inline(always)]
    pub fn new(position: Position) -> Self {
        Self::with_rules(position, Rules::default())
    }

    /// Creates a new [`Game`] from the provided [`Position`] and [`Rules`].
    pub fn with_rules(position: Position, rules: Rules) -> Self {
        debug!("New game under {rules}: {position}");
        Self { position, rules }
    }

    /// Creates a new [`Game`] from the provided FEN string.
    #[inline(always)]
    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self::new(Position::from_fen(fen)?))
    }

    /// Fetches the rules this game is played under.
    #[inline(always)]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// Changes the rules this game is played under.
    #[inline(always)]
    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    /// Fetches the current [`Position`].
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Applies the provided [`Move`]. No enforcement of legality.
    #[inline(always)]
    pub fn make_move(&mut self, mv: Move) {
        self.position.apply(mv);
    }

    /// Reverts the provided [`Move`], which must be the last move made.
    #[inline(always)]
    pub fn unmake_move(&mut self, mv: Move) {
        self.position.revert(mv);
    }

    /// Applies all moves in the provided iterator, in order. No enforcement of legality.
    #[inline(always)]
    pub fn make_moves(&mut self, moves: impl IntoIterator<Item = Move>) {
        for mv in moves {
            self.make_move(mv);
        }
    }

    /// Applies the move, if it is legal to make. If it is not legal, returns an `Err` explaining why.
    ///
    /// # Example
    /// ```
    /// # use minishogi::{Game, Move};
    /// let mut game = Game::default();
    /// assert!(game.make_move_checked(Move::from_notation("5d5c").unwrap()).is_ok());
    /// assert!(game.make_move_checked(Move::from_notation("5c5b").unwrap()).is_err());
    /// ```
    pub fn make_move_checked(&mut self, mv: Move) -> Result<()> {
        if !self.legal_moves().contains(&mv) {
            bail!(
                "{mv} is not a legal move for {} in {}",
                self.side_to_move().name(),
                self.position
            );
        }

        self.make_move(mv);
        Ok(())
    }

    /// Returns a copy of this game after having applied the provided [`Move`].
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut copied = self.clone();
        copied.make_move(mv);
        copied
    }

    /// Finds the [`Square`] holding `color`'s King.
    ///
    /// # Panics
    /// If `color` has no King on the board. Legality cannot be judged without one.
    pub fn king_square(&self, color: Color) -> Square {
        let king = Piece::new(PieceKind::King, color);
        let Some((square, _)) = self
            .iter_for(self.color(color))
            .find(|&(_, piece)| piece == king)
        else {
            panic!("No {} King found in {}", color.name(), self.position);
        };
        square
    }

    /// Returns `true` if any of `attacker`'s pieces could move to `square` on the next turn.
    #[inline(always)]
    pub fn is_attacked(&self, square: Square, attacker: Color) -> bool {
        is_attacked(self.position.board(), square, attacker)
    }

    /// Returns `true` if the side to move is in check.
    ///
    /// # Example
    /// ```
    /// # use minishogi::{Game, FEN_SENTE_IN_CHECK};
    /// assert!(!Game::default().is_in_check());
    /// assert!(Game::from_fen(FEN_SENTE_IN_CHECK).unwrap().is_in_check());
    /// ```
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move();
        self.is_attacked(self.king_square(us), us.opponent())
    }

    /// Returns `true` if making `mv` would not leave the mover's King in check.
    ///
    /// The move is made and unmade, so the game is left as it was.
    pub fn is_legal(&mut self, mv: Move) -> bool {
        let us = self.side_to_move();
        let mut king = self.king_square(us);

        self.make_move(mv);
        if mv.from() == Some(king) {
            king = mv.to();
        }
        let in_check = self.is_attacked(king, us.opponent());
        self.unmake_move(mv);

        !in_check
    }

    /// Returns `true` if `mv` drops a Pawn directly in front of the enemy King and leaves it with no legal escape.
    ///
    /// Only replies that move the King or capture the dropped Pawn are considered,
    /// since nothing can be placed between a Pawn and the King it checks.
    ///
    /// # Example
    /// ```
    /// # use minishogi::{Game, Move, FEN_DROP_PAWN_MATE};
    /// let mut game = Game::from_fen(FEN_DROP_PAWN_MATE).unwrap();
    /// assert!(game.is_drop_pawn_mate(Move::from_notation("P*5b").unwrap()));
    /// assert!(!game.is_drop_pawn_mate(Move::from_notation("P*4b").unwrap()));
    /// ```
    pub fn is_drop_pawn_mate(&mut self, mv: Move) -> bool {
        let Move::Drop {
            to,
            kind: PieceKind::Pawn,
        } = mv
        else {
            return false;
        };

        let us = self.side_to_move();
        let them = us.opponent();
        let forward = match us {
            Color::Sente => Direction::North,
            Color::Gote => Direction::South,
        };

        // The Pawn must be giving check
        let Some(king) = to.step(forward, 1) else {
            return false;
        };
        if self.piece_at(king) != Some(Piece::new(PieceKind::King, them)) {
            return false;
        }

        self.make_move(mv);

        let mut replies = MoveList::new();
        generate_board_moves(self.position.board(), them, self.rules, &mut replies);
        let can_escape = replies
            .into_iter()
            .filter(|reply| reply.from() == Some(king) || reply.to() == to)
            .any(|reply| self.is_legal(reply));

        self.unmake_move(mv);

        !can_escape
    }

    /// Generates every move available to the side to move, without checking whether they leave its King in check.
    ///
    /// Pawn drops that deliver checkmate are never generated while [`DropPawnMate::Forbidden`](crate::DropPawnMate::Forbidden) is in effect.
    pub fn pseudolegal_moves(&mut self) -> MoveList {
        let us = self.side_to_move();
        let mut moves = MoveList::new();
        generate_board_moves(self.position.board(), us, self.rules, &mut moves);

        let mut drops = MoveList::new();
        generate_drops(&self.position, us, &mut drops);

        let forbid_mate = !self.rules.allows_drop_pawn_mate();
        for drop in drops {
            if forbid_mate && self.is_drop_pawn_mate(drop) {
                continue;
            }
            moves.push(drop);
        }

        moves
    }

    /// Generates every legal move available to the side to move.
    ///
    /// # Example
    /// ```
    /// # use minishogi::Game;
    /// let mut game = Game::default();
    /// assert_eq!(game.legal_moves().len(), 14);
    /// ```
    pub fn legal_moves(&mut self) -> MoveList {
        let mut moves = self.pseudolegal_moves();
        moves.retain(|mv| self.is_legal(*mv));
        moves
    }
}

impl Deref for Game {
    type Target = Position;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.position)?;
        write!(f, "Rules: {}", self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DropPawnMate, PawnPromotion, FEN_DROP_PAWN_MATE, FEN_SENTE_IN_CHECK};

    fn notation(moves: &MoveList) -> Vec<String> {
        let mut moves = moves.iter().map(Move::to_string).collect::<Vec<_>>();
        moves.sort();
        moves
    }

    #[test]
    fn startpos_legal_moves() {
        let mut game = Game::default();
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 14);
        assert!(moves.iter().all(|mv| !mv.is_drop()));
    }

    #[test]
    fn king_square_is_found_by_color() {
        let game = Game::default();
        assert_eq!(game.king_square(Color::Sente), Square::new(4, 4));
        assert_eq!(game.king_square(Color::Gote), Square::new(0, 0));
    }

    #[test]
    #[should_panic(expected = "No gote King found")]
    fn missing_king_panics() {
        let game = Game::from_fen("5/5/5/5/4K b -").unwrap();
        game.king_square(Color::Gote);
    }

    #[test]
    fn drop_pawn_mate_is_not_generated() {
        let mut game = Game::from_fen(FEN_DROP_PAWN_MATE).unwrap();
        let mate = Move::from_notation("P*5b").unwrap();

        let forbidden = game.pseudolegal_moves();
        assert_eq!(forbidden.len(), 60);
        assert!(!forbidden.contains(&mate));

        game.set_rules(Rules::default().with_drop_pawn_mate(DropPawnMate::Allowed));
        let allowed = game.pseudolegal_moves();
        assert_eq!(allowed.len(), 61);
        assert!(allowed.contains(&mate));
    }

    #[test]
    fn pawn_drops_under_drop_pawn_mate() {
        let mut game = Game::from_fen(FEN_DROP_PAWN_MATE).unwrap();
        let drops = game
            .pseudolegal_moves()
            .into_iter()
            .filter(Move::is_pawn_drop)
            .collect::<MoveList>();

        assert_eq!(
            notation(&drops),
            [
                "P*1b", "P*1c", "P*1d", "P*1e", "P*2b", "P*2c", "P*2e", "P*3c", "P*3d", "P*3e",
                "P*4b", "P*4d", "P*4e"
            ]
        );
    }

    #[test]
    fn legality_leaves_the_game_untouched() {
        let mut game = Game::from_fen(FEN_DROP_PAWN_MATE).unwrap();
        let before = game.clone();
        let _ = game.legal_moves();
        assert_eq!(game, before);
    }

    #[test]
    fn escaping_check() {
        let mut game = Game::from_fen(FEN_SENTE_IN_CHECK).unwrap();
        assert!(game.is_in_check());

        let moves = game.legal_moves();
        assert_eq!(moves.len(), 3);
        for mv in moves {
            game.make_move(mv);
            // After our move, it is the opponent's turn, so check our own King directly
            assert!(!game.is_attacked(game.king_square(Color::Sente), Color::Gote));
            game.unmake_move(mv);
        }
    }

    #[test]
    fn gote_pawn_promotion_policies() {
        let fen = "4k/5/5/p4/4K w -";

        let mut forced = Game::from_fen(fen).unwrap();
        assert_eq!(
            notation(&forced.legal_moves()),
            ["1a1b", "1a2a", "1a2b", "5d5e+"]
        );

        let mut optional = Game::with_rules(
            forced.position().clone(),
            Rules::default().with_pawn_promotion(PawnPromotion::Optional),
        );
        assert_eq!(
            notation(&optional.legal_moves()),
            ["1a1b", "1a2a", "1a2b", "5d5e", "5d5e+"]
        );
    }

    #[test]
    fn checked_moves_reject_illegal_moves() {
        let mut game = Game::default();
        let illegal = Move::from_notation("1e1a").unwrap();
        assert!(game.make_move_checked(illegal).is_err());
        assert_eq!(game, Game::default());
    }

    #[test]
    fn mated_side_has_no_legal_moves() {
        // The Gold on 1b is protected by the Pawn on 1c and the Gote King has nowhere to go
        let mut game = Game::from_fen("4k/4G/4P/5/K4 w -").unwrap();
        assert!(game.is_in_check());
        assert!(game.legal_moves().is_empty());

        let mut game = Game::default();
        assert!(!game.is_in_check());
        assert!(!game.legal_moves().is_empty());
    }
}
