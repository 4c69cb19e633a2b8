/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt::Write;

use log::trace;
use thiserror::Error;

use super::{Board, Color, Hand, Piece, Position, Square};

/// Reasons a FEN string can be rejected.
///
/// FEN strings have the form `<board> <side> <hand>`, such as `rbsgk/4p/5/P4/KGSBR b -`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// The string did not contain exactly three whitespace-separated fields.
    #[error("FEN must have 3 fields (board, side to move, hand). Found {0}")]
    FieldCount(usize),

    /// The board placement field was malformed.
    #[error("Invalid board placement {placement:?}: {reason}")]
    Board { placement: String, reason: String },

    /// The side-to-move field was neither `b` nor `w`.
    #[error("Side to move must be either 'b' or 'w'. Found {0:?}")]
    SideToMove(String),

    /// The hand field was malformed.
    #[error("Invalid hand {hand:?}: {reason}")]
    Hand { hand: String, reason: String },
}

/// Parses a [`Position`] from a FEN string.
///
/// Everything is parsed into fresh values, so nothing is returned unless the whole string is valid.
pub(crate) fn parse(fen: &str) -> Result<Position, FenError> {
    let fields = fen.split_whitespace().collect::<Vec<_>>();
    let [placement, side, hand] = fields[..] else {
        return Err(FenError::FieldCount(fields.len()));
    };

    trace!("Parsing FEN {fen:?}");

    let board = parse_board(placement)?;

    let side_to_move = side
        .parse::<Color>()
        .map_err(|_| FenError::SideToMove(side.to_string()))?;

    let hands = parse_hands(hand)?;

    Ok(Position::from_parts(board, hands, side_to_move))
}

fn parse_board(placement: &str) -> Result<Board, FenError> {
    let err = |reason: String| FenError::Board {
        placement: placement.to_string(),
        reason,
    };

    let rows = placement.split('/').collect::<Vec<_>>();
    if rows.len() != Square::SIDE as usize {
        return Err(err(format!(
            "expected {} rows, found {}",
            Square::SIDE,
            rows.len()
        )));
    }

    let mut board = Board::new();
    for (row, text) in rows.into_iter().enumerate() {
        let row = row as u8;

        // Squares remaining in this row; the first character is column 4
        let mut remaining = Square::SIDE;
        for c in text.chars() {
            if let Some(empty) = c.to_digit(10) {
                let empty = empty as u8;
                if empty == 0 || empty > remaining {
                    return Err(err(format!("row {} overflows at {c:?}", row + 1)));
                }
                remaining -= empty;
                continue;
            }

            if remaining == 0 {
                return Err(err(format!("row {} has more than 5 squares", row + 1)));
            }

            let piece = Piece::from_char(c).map_err(|e| err(e.to_string()))?;
            remaining -= 1;
            board.place(piece, Square::new(row, remaining));
        }

        if remaining != 0 {
            return Err(err(format!(
                "row {} is {remaining} square(s) short",
                row + 1
            )));
        }
    }

    Ok(board)
}

fn parse_hands(field: &str) -> Result<[Hand; Color::COUNT], FenError> {
    let mut hands = [Hand::new(); Color::COUNT];
    if field == "-" {
        return Ok(hands);
    }

    for c in field.chars() {
        let piece = Piece::from_char(c).map_err(|e| FenError::Hand {
            hand: field.to_string(),
            reason: e.to_string(),
        })?;

        hands[piece.color()]
            .try_add(piece.kind())
            .map_err(|e| FenError::Hand {
                hand: field.to_string(),
                reason: e.to_string(),
            })?;
    }

    Ok(hands)
}

/// Formats `position` as a FEN string.
pub(crate) fn format(position: &Position) -> String {
    let mut fen = String::with_capacity(32);

    for row in 0..Square::SIDE {
        let mut empty = 0;
        for col in (0..Square::SIDE).rev() {
            match position.piece_at(Square::new(row, col)) {
                Some(piece) => {
                    if empty > 0 {
                        let _ = write!(fen, "{empty}");
                        empty = 0;
                    }
                    fen.push(piece.char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            let _ = write!(fen, "{empty}");
        }
        if row != Square::SIDE - 1 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(position.side_to_move().char());
    fen.push(' ');

    let hands = position.hands();
    if hands.iter().all(Hand::is_empty) {
        fen.push('-');
    } else {
        for color in Color::all() {
            for (kind, n) in hands[color].iter() {
                let c = Piece::new(kind, color).char();
                fen.extend(std::iter::repeat(c).take(n as usize));
            }
        }
    }

    fen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, FEN_DROP_PAWN_MATE, FEN_NARROWING, FEN_SENTE_IN_CHECK, FEN_STARTPOS};

    #[test]
    fn known_positions_round_trip() {
        for fen in [
            FEN_STARTPOS,
            FEN_DROP_PAWN_MATE,
            FEN_SENTE_IN_CHECK,
            "5/5/5/5/5 w -",
            "k4/5/2D2/5/4K w PPSgbr",
        ] {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.to_fen(), fen);
        }
    }

    #[test]
    fn hands_are_exported_in_canonical_order() {
        let pos = Position::from_fen(FEN_NARROWING).unwrap();
        assert_eq!(pos.to_fen(), "k3S/B1GP1/5/GS1K1/R1B2 b PR");
    }

    #[test]
    fn startpos_layout() {
        let pos = Position::from_fen(FEN_STARTPOS).unwrap();
        assert_eq!(pos.side_to_move(), Color::Sente);
        assert_eq!(
            pos.piece_at(Square::new(0, 4)),
            Some(Piece::new(PieceKind::Rook, Color::Gote))
        );
        assert_eq!(
            pos.piece_at(Square::new(0, 0)),
            Some(Piece::new(PieceKind::King, Color::Gote))
        );
        assert_eq!(
            pos.piece_at(Square::new(1, 0)),
            Some(Piece::new(PieceKind::Pawn, Color::Gote))
        );
        assert_eq!(
            pos.piece_at(Square::new(4, 4)),
            Some(Piece::new(PieceKind::King, Color::Sente))
        );
        assert!(pos.hands().iter().all(Hand::is_empty));
    }

    #[test]
    fn hand_letters_accumulate_in_any_order() {
        let pos = Position::from_fen("k4/5/5/5/4K b gPrP").unwrap();
        assert_eq!(pos.hand(Color::Sente).count(PieceKind::Pawn), 2);
        assert_eq!(pos.hand(Color::Gote).count(PieceKind::Gold), 1);
        assert_eq!(pos.hand(Color::Gote).count(PieceKind::Rook), 1);
        assert_eq!(pos.to_fen(), "k4/5/5/5/4K b PPgr");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            Position::from_fen("rbsgk/4p/5/P4/KGSBR b"),
            Err(FenError::FieldCount(2))
        );
        assert_eq!(
            Position::from_fen("rbsgk/4p/5/P4/KGSBR b - 1"),
            Err(FenError::FieldCount(4))
        );
    }

    #[test]
    fn rejects_malformed_boards() {
        for fen in [
            "rbsgk/4p/5/P4 b -",
            "rbsgk/4p/5/P4/KGSBR/5 b -",
            "rbsgk/5p/5/P4/KGSBR b -",
            "rbsgk/3p/5/P4/KGSBR b -",
            "rbsgkk/4p/5/P4/KGSBR b -",
            "rbsgx/4p/5/P4/KGSBR b -",
            "rbsgk/0p4/5/P4/KGSBR b -",
        ] {
            assert!(
                matches!(Position::from_fen(fen), Err(FenError::Board { .. })),
                "{fen:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_side_to_move() {
        assert!(matches!(
            Position::from_fen("rbsgk/4p/5/P4/KGSBR x -"),
            Err(FenError::SideToMove(_))
        ));
    }

    #[test]
    fn rejects_bad_hands() {
        for hand in ["K", "T", "x", "P-"] {
            let fen = format!("rbsgk/4p/5/P4/KGSBR b {hand}");
            assert!(
                matches!(Position::from_fen(&fen), Err(FenError::Hand { .. })),
                "{fen:?}"
            );
        }
    }

    #[test]
    fn rejects_oversized_hands() {
        let fen = format!("k4/5/5/5/4K b {}", "P".repeat(256));
        let Err(FenError::Hand { reason, .. }) = Position::from_fen(&fen) else {
            panic!("{fen:?} should have been rejected");
        };
        assert!(reason.contains("too many"), "{reason}");

        let fen = format!("k4/5/5/5/4K b {}", "P".repeat(255));
        let pos = Position::from_fen(&fen).unwrap();
        assert_eq!(pos.hand(Color::Sente).count(PieceKind::Pawn), 255);
    }
}
