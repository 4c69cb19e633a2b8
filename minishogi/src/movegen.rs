/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    Bitboard, Board, Color, Direction, Move, Piece, PieceKind, Position, Rules, Square,
    MAX_NUM_MOVES,
};

use Direction::*;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

const SENTE_PAWN: &[Direction] = &[North];
const GOTE_PAWN: &[Direction] = &[South];
const SENTE_SILVER: &[Direction] = &[North, NorthEast, NorthWest, SouthEast, SouthWest];
const GOTE_SILVER: &[Direction] = &[South, NorthEast, NorthWest, SouthEast, SouthWest];
const SENTE_GOLD: &[Direction] = &[North, South, East, West, NorthEast, NorthWest];
const GOTE_GOLD: &[Direction] = &[North, South, East, West, SouthEast, SouthWest];
const KING: &[Direction] = &[
    North, South, East, West, NorthEast, NorthWest, SouthEast, SouthWest,
];
const ORTHOGONAL: &[Direction] = &Direction::ORTHOGONAL;
const DIAGONAL: &[Direction] = &Direction::DIAGONAL;

/// The directions a piece of `kind` and `color` can take a single step in.
///
/// The Horse and Dragon step one square in the directions their unpromoted forms cannot slide.
/// The Bishop and Rook only slide, so they have no steps at all.
///
/// # Example
/// ```
/// # use minishogi::{step_directions, Color, Direction, PieceKind};
/// assert_eq!(step_directions(PieceKind::Pawn, Color::Sente), &[Direction::North]);
/// assert_eq!(step_directions(PieceKind::Pawn, Color::Gote), &[Direction::South]);
/// assert!(step_directions(PieceKind::Rook, Color::Sente).is_empty());
/// ```
#[inline(always)]
pub const fn step_directions(kind: PieceKind, color: Color) -> &'static [Direction] {
    match (kind, color) {
        (PieceKind::Pawn, Color::Sente) => SENTE_PAWN,
        (PieceKind::Pawn, Color::Gote) => GOTE_PAWN,

        (PieceKind::Silver, Color::Sente) => SENTE_SILVER,
        (PieceKind::Silver, Color::Gote) => GOTE_SILVER,

        (PieceKind::Gold | PieceKind::Tokin | PieceKind::PromotedSilver, Color::Sente) => {
            SENTE_GOLD
        }
        (PieceKind::Gold | PieceKind::Tokin | PieceKind::PromotedSilver, Color::Gote) => {
            GOTE_GOLD
        }

        (PieceKind::King, _) => KING,
        (PieceKind::Horse, _) => ORTHOGONAL,
        (PieceKind::Dragon, _) => DIAGONAL,
        (PieceKind::Bishop | PieceKind::Rook, _) => &[],
    }
}

/// The directions a piece of `kind` slides along, until blocked.
///
/// Empty for every kind that does not slide.
#[inline(always)]
pub const fn slide_directions(kind: PieceKind) -> &'static [Direction] {
    match kind {
        PieceKind::Bishop | PieceKind::Horse => DIAGONAL,
        PieceKind::Rook | PieceKind::Dragon => ORTHOGONAL,
        _ => &[],
    }
}

/// Computes every square `piece` can move to from `from`, ignoring whether doing so would leave its King in check.
///
/// Sliding stops before a friendly piece and on (including) an enemy piece.
/// Steps may land on any square not occupied by a friendly piece.
pub fn mobility(board: &Board, piece: Piece, from: Square) -> Bitboard {
    let color = piece.color();
    let friendly = board.color(color);
    let mut mobility = Bitboard::EMPTY_BOARD;

    for &direction in slide_directions(piece.kind()) {
        let mut square = from;
        while let Some(to) = square.step(direction, 1) {
            if friendly.contains(to) {
                break;
            }

            mobility.set(to);

            // Captures end the ray
            if board.has(to) {
                break;
            }
            square = to;
        }
    }

    for &direction in step_directions(piece.kind(), color) {
        if let Some(to) = from.step(direction, 1) {
            if !friendly.contains(to) {
                mobility.set(to);
            }
        }
    }

    mobility
}

/// Generates every non-drop move available to `color`, including promotion variants, and appends them to `moves`.
///
/// This does not check whether a move leaves the mover's King in check.
pub fn generate_board_moves(board: &Board, color: Color, rules: Rules, moves: &mut MoveList) {
    for (from, piece) in board.iter_for(board.color(color)) {
        serialize_board_moves(piece, from, mobility(board, piece, from), rules, moves);
    }
}

/// Turns a mobility bitboard into a list of moves, adding promotion variants where allowed.
///
/// A move may promote if the piece can promote and either its origin or destination is in the promotion zone.
/// Under [`PawnPromotion::Forced`](crate::PawnPromotion::Forced), a Pawn stepping into the zone only gets the promoting move.
fn serialize_board_moves(
    piece: Piece,
    from: Square,
    mobility: Bitboard,
    rules: Rules,
    moves: &mut MoveList,
) {
    let color = piece.color();
    let from_in_zone = from.in_promotion_zone(color);

    for to in mobility {
        let to_in_zone = to.in_promotion_zone(color);
        let may_promote = piece.can_promote() && (from_in_zone || to_in_zone);
        let must_promote = piece.is_pawn() && to_in_zone && rules.forces_pawn_promotion();

        if !must_promote {
            moves.push(Move::new(from, to));
        }
        if may_promote {
            moves.push(Move::new_promotion(from, to));
        }
    }
}

/// Generates every drop available to `color` and appends them to `moves`.
///
/// Any held piece may be dropped on any empty square, except that a Pawn may not be dropped:
/// * on a column that already holds one of `color`'s unpromoted Pawns (nifu);
/// * in `color`'s promotion zone, where it could never move again.
///
/// Whether a Pawn drop delivers checkmate is left to [`Game`](crate::Game), since answering that requires making moves.
pub fn generate_drops(position: &Position, color: Color, moves: &mut MoveList) {
    let hand = position.hand(color);
    if hand.is_empty() {
        return;
    }

    let empty = position.empty();
    for (kind, _) in hand.iter() {
        let targets = if kind == PieceKind::Pawn {
            empty & !pawn_drop_exclusions(position.board(), color)
        } else {
            empty
        };

        for to in targets {
            moves.push(Move::new_drop(kind, to));
        }
    }
}

/// Squares where `color` may never drop a Pawn: its promotion zone, and every column already holding one of its unpromoted Pawns.
pub fn pawn_drop_exclusions(board: &Board, color: Color) -> Bitboard {
    let zone = match color {
        Color::Sente => Bitboard::row(0),
        Color::Gote => Bitboard::row(Square::SIDE - 1),
    };

    board
        .piece(Piece::new(PieceKind::Pawn, color))
        .into_iter()
        .fold(zone, |excluded, pawn| excluded | Bitboard::col(pawn.col()))
}

/// Returns `true` if any of `attacker`'s pieces could move to `square` on the next turn.
///
/// Drops can never capture, so they are not considered.
pub fn is_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    board
        .iter_for(board.color(attacker))
        .any(|(from, piece)| mobility(board, piece, from).contains(square))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PawnPromotion, FEN_STARTPOS};

    fn sq(s: &str) -> Square {
        Square::from_notation(s).unwrap()
    }

    fn board_moves(fen: &str, rules: Rules) -> Vec<String> {
        let pos = Position::from_fen(fen).unwrap();
        let mut moves = MoveList::new();
        generate_board_moves(pos.board(), pos.side_to_move(), rules, &mut moves);
        let mut moves = moves.iter().map(Move::to_string).collect::<Vec<_>>();
        moves.sort();
        moves
    }

    #[test]
    fn gote_steps_mirror_sente_steps() {
        for kind in PieceKind::all() {
            let sente = step_directions(kind, Color::Sente);
            let gote = step_directions(kind, Color::Gote);
            assert_eq!(sente.len(), gote.len(), "{kind:?}");

            for direction in sente {
                let mirrored = match direction {
                    North => South,
                    South => North,
                    NorthEast => SouthEast,
                    NorthWest => SouthWest,
                    SouthEast => NorthEast,
                    SouthWest => NorthWest,
                    other => *other,
                };
                assert!(gote.contains(&mirrored), "{kind:?} {direction:?}");
            }
        }
    }

    #[test]
    fn sliders_stop_at_blockers() {
        // Sente Rook on 3c, friendly Gold on 3e, enemy Pawn on 3a
        let pos = Position::from_fen("2p1k/5/2R2/5/2G1K b -").unwrap();
        let rook = mobility(pos.board(), Piece::new(PieceKind::Rook, Color::Sente), sq("3c"));

        let expected = ["3b", "3a", "3d", "1c", "2c", "4c", "5c"]
            .into_iter()
            .map(sq)
            .collect::<Bitboard>();
        assert_eq!(rook, expected);
    }

    #[test]
    fn dragon_and_horse_combine_slides_and_steps() {
        let board = Board::new();
        let center = sq("3c");

        let dragon = mobility(&board, Piece::new(PieceKind::Dragon, Color::Gote), center);
        assert_eq!(dragon.population(), 8 + 4);

        let horse = mobility(&board, Piece::new(PieceKind::Horse, Color::Sente), center);
        assert_eq!(horse.population(), 8 + 4);
    }

    #[test]
    fn startpos_board_moves() {
        let moves = board_moves(FEN_STARTPOS, Rules::default());
        assert_eq!(
            moves,
            [
                "1e1b", "1e1c", "1e1d", "2e1d", "2e3d", "2e4c", "2e5b", "3e2d", "3e3d", "3e4d",
                "4e3d", "4e4d", "5d5c", "5e4d"
            ]
        );
    }

    #[test]
    fn pawn_promotion_policies() {
        let fen = "k4/4P/5/5/4K b -";

        let forced = board_moves(fen, Rules::default());
        assert!(forced.contains(&"1b1a+".to_string()));
        assert!(!forced.contains(&"1b1a".to_string()));

        let optional = board_moves(
            fen,
            Rules::default().with_pawn_promotion(PawnPromotion::Optional),
        );
        assert!(optional.contains(&"1b1a+".to_string()));
        assert!(optional.contains(&"1b1a".to_string()));
    }

    #[test]
    fn leaving_the_zone_may_promote() {
        let moves = board_moves("1S2k/5/5/5/4K b -", Rules::default());
        assert_eq!(
            moves,
            ["1e1d", "1e2d", "1e2e", "4a3b", "4a3b+", "4a5b", "4a5b+"]
        );
    }

    #[test]
    fn pawn_drops_respect_nifu_and_zone() {
        // Sente already has a Pawn on column 5
        let pos = Position::from_fen("k4/5/5/P4/4K b P").unwrap();
        let mut moves = MoveList::new();
        generate_drops(&pos, Color::Sente, &mut moves);

        assert!(moves.iter().all(|mv| mv.to().col() != 4));
        assert!(moves.iter().all(|mv| mv.to().row() != 0));
        // Rows 1 through 4 of columns 1 through 4, minus the King on 1e
        assert_eq!(moves.len(), 4 * 4 - 1);
    }

    #[test]
    fn other_drops_fill_every_empty_square() {
        let pos = Position::from_fen("k4/5/5/5/4K w g").unwrap();
        let mut moves = MoveList::new();
        generate_drops(&pos, Color::Gote, &mut moves);
        assert_eq!(moves.len(), Square::COUNT - 2);
        assert!(moves.iter().all(|mv| mv.drop_kind() == Some(PieceKind::Gold)));
    }

    #[test]
    fn attacks() {
        let pos = Position::from_fen(FEN_STARTPOS).unwrap();
        assert!(is_attacked(pos.board(), sq("5c"), Color::Sente));
        // Along the Bishop's long diagonal
        assert!(is_attacked(pos.board(), sq("5b"), Color::Sente));
        assert!(!is_attacked(pos.board(), sq("1a"), Color::Sente));
        assert!(is_attacked(pos.board(), sq("1c"), Color::Gote));
    }
}
