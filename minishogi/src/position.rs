/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Deref, Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, ensure, Result};

use super::{Bitboard, Color, FenError, Move, Piece, PieceKind, Square, FEN_STARTPOS};

/// Counts of captured pieces held by a single player, by unpromoted kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hand([u8; PieceKind::HAND_COUNT]);

impl Hand {
    /// Creates a new, empty [`Hand`].
    #[inline(always)]
    pub const fn new() -> Self {
        Self([0; PieceKind::HAND_COUNT])
    }

    /// Number of pieces of `kind` in this hand.
    ///
    /// Always `0` for kinds that cannot be held (the King and promoted kinds).
    #[inline(always)]
    pub const fn count(&self, kind: PieceKind) -> u8 {
        match kind.hand_index() {
            Some(i) => self.0[i],
            None => 0,
        }
    }

    /// Returns `true` if at least one piece of `kind` is held.
    #[inline(always)]
    pub const fn has(&self, kind: PieceKind) -> bool {
        self.count(kind) > 0
    }

    /// Returns `true` if this hand holds nothing.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Total number of pieces held.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.iter().map(|&n| n as usize).sum()
    }

    /// Adds a piece of `kind` to this hand.
    ///
    /// # Panics
    /// If `kind` cannot be held in hand, or if the count for `kind` would overflow.
    #[inline(always)]
    pub fn add(&mut self, kind: PieceKind) {
        if let Err(err) = self.try_add(kind) {
            panic!("Cannot add to {self:?}: {err}");
        }
    }

    /// Adds a piece of `kind` to this hand, returning an `Err` if it cannot be held or the count would overflow.
    ///
    /// # Example
    /// ```
    /// # use minishogi::{Hand, PieceKind};
    /// let mut hand = Hand::new();
    /// assert!(hand.try_add(PieceKind::Gold).is_ok());
    /// assert!(hand.try_add(PieceKind::King).is_err());
    /// assert_eq!(hand.count(PieceKind::Gold), 1);
    /// ```
    pub fn try_add(&mut self, kind: PieceKind) -> Result<()> {
        let Some(i) = kind.hand_index() else {
            bail!("a {} cannot be held in hand", kind.name());
        };
        let Some(n) = self.0[i].checked_add(1) else {
            bail!("too many of {} in hand (at most {})", kind.name(), u8::MAX);
        };
        self.0[i] = n;
        Ok(())
    }

    /// Removes a piece of `kind` from this hand.
    ///
    /// # Panics
    /// If no piece of `kind` is held.
    #[inline(always)]
    pub fn remove(&mut self, kind: PieceKind) {
        let Some(i) = kind.hand_index().filter(|&i| self.0[i] > 0) else {
            panic!("Cannot remove a {} from a hand that holds none", kind.name());
        };
        self.0[i] -= 1;
    }

    /// An iterator over every held kind and its count, skipping kinds with a count of zero.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        PieceKind::HAND_KINDS
            .into_iter()
            .zip(self.0)
            .filter(|&(_, n)| n > 0)
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Data needed to revert a single move.
///
/// Records the piece captured by the move, in its pre-capture form, if there was one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UndoRecord {
    pub captured: Option<Piece>,
}

/// Represents the full state of a game of minishogi, analogous to a FEN string.
///
/// Owns the [`Board`], both players' [`Hand`]s, the side to move, and a stack of [`UndoRecord`]s
/// for every move applied and not yet reverted.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Piece placements and per-color occupancy.
    pub(crate) board: Board,

    /// Captured pieces available to drop, per player.
    hands: [Hand; Color::COUNT],

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// One record per applied move, most recent last.
    history: Vec<UndoRecord>,
}

impl Position {
    /// Creates a new, empty [`Position`] with the following properties:
    /// * No pieces on the board
    /// * Empty hands
    /// * Sente moves first
    ///
    /// # Example
    /// ```
    /// # use minishogi::Position;
    /// let pos = Position::new();
    /// assert_eq!(pos.to_fen(), "5/5/5/5/5 b -");
    /// ```
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            hands: [Hand::new(); Color::COUNT],
            side_to_move: Color::Sente,
            history: Vec::new(),
        }
    }

    /// Assembles a [`Position`] from its parts, with an empty undo history.
    pub fn from_parts(board: Board, hands: [Hand; Color::COUNT], side_to_move: Color) -> Self {
        Self {
            board,
            hands,
            side_to_move,
            history: Vec::new(),
        }
    }

    /// Creates a new [`Position`] from the provided FEN string.
    #[inline(always)]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        crate::fen::parse(fen)
    }

    /// Generates a FEN string from this [`Position`].
    #[inline(always)]
    pub fn to_fen(&self) -> String {
        crate::fen::format(self)
    }

    /// Returns the current player as a [`Color`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Fetches this position's [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Fetches `color`'s [`Hand`].
    #[inline(always)]
    pub const fn hand(&self, color: Color) -> &Hand {
        &self.hands[color.index()]
    }

    /// Fetches both players' [`Hand`]s, Sente first.
    #[inline(always)]
    pub const fn hands(&self) -> &[Hand; Color::COUNT] {
        &self.hands
    }

    /// Number of applied moves that have not yet been reverted.
    #[inline(always)]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// The undo record of the most recently applied move, if any.
    #[inline(always)]
    pub fn last_undo(&self) -> Option<&UndoRecord> {
        self.history.last()
    }

    /// Applies `mv` to this position and returns the [`UndoRecord`] needed to revert it.
    ///
    /// The record is also pushed onto this position's undo stack, so it need not be kept by the caller.
    /// No legality is enforced beyond the contract below.
    ///
    /// # Panics
    /// If `mv` breaks its preconditions:
    /// * a board move must start on one of the mover's pieces and must not land on one;
    /// * a promoting move must move a piece that can promote;
    /// * a drop must target an empty square with the dropped kind in the mover's hand.
    ///
    /// These can only be broken by hand-constructed moves; generated moves always satisfy them.
    pub fn apply(&mut self, mv: Move) -> UndoRecord {
        let us = self.side_to_move;

        let record = match mv {
            Move::Drop { to, kind } => {
                assert!(
                    !self.board.has(to),
                    "Failed to apply {mv} to {self}: {to} is not empty"
                );
                self.hands[us].remove(kind);
                self.board.place(Piece::new(kind, us), to);

                UndoRecord { captured: None }
            }

            Move::Board { from, to, promote } => {
                let Some(mut piece) = self.board.take(from) else {
                    panic!("Failed to apply {mv} to {self}: No piece found at {from}");
                };
                assert_eq!(
                    piece.color(),
                    us,
                    "Failed to apply {mv} to {self}: {piece:?} does not belong to the side to move"
                );

                let captured = self.board.take(to);
                if let Some(captured) = captured {
                    assert_ne!(
                        captured.color(),
                        us,
                        "Failed to apply {mv} to {self}: Tried to capture own {captured:?}"
                    );

                    // A captured King ends the game, so it never reaches a hand
                    if !captured.is_king() {
                        self.hands[us].add(captured.kind().demoted());
                    }
                }

                if promote {
                    let Some(promoted) = piece.promoted() else {
                        panic!("Failed to apply {mv} to {self}: {piece:?} cannot promote");
                    };
                    piece = promoted;
                }

                self.board.place(piece, to);

                UndoRecord { captured }
            }
        };

        self.history.push(record);
        self.toggle_side_to_move();

        record
    }

    /// Reverts `mv`, which must be the most recently applied move.
    ///
    /// # Panics
    /// If there is no move to revert, or if the board does not reflect `mv` having been applied.
    pub fn revert(&mut self, mv: Move) {
        let Some(record) = self.history.pop() else {
            panic!("Failed to revert {mv} on {self}: No moves have been applied");
        };

        self.toggle_side_to_move();
        let us = self.side_to_move;

        match mv {
            Move::Drop { to, kind } => {
                let piece = self.board.take(to);
                debug_assert_eq!(piece, Some(Piece::new(kind, us)));
                self.hands[us].add(kind);
            }

            Move::Board { from, to, promote } => {
                let Some(mut piece) = self.board.take(to) else {
                    panic!("Failed to revert {mv} on {self}: No piece found at {to}");
                };
                debug_assert!(!self.board.has(from));

                if promote {
                    piece = piece.demoted();
                }
                self.board.place(piece, from);

                // Put the captured piece back, promoted or not, and take it out of our hand
                if let Some(captured) = record.captured {
                    if !captured.is_king() {
                        self.hands[us].remove(captured.kind().demoted());
                    }
                    self.board.place(captured, to);
                }
            }
        }
    }

    /// Toggles the current player from Sente to Gote (or vice versa).
    #[inline(always)]
    fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Verifies the internal bookkeeping of this position.
    ///
    /// Checks that the per-color occupancy agrees with the board, that there are exactly two Kings
    /// (counting any captured by a move still on the undo stack), and, while both Kings are on the board,
    /// that every kind of piece is accounted for exactly twice across the board and both hands.
    ///
    /// Intended for tests and debugging.
    pub fn check_consistency(&self) -> Result<()> {
        let mut counts = [0u32; PieceKind::HAND_COUNT + 1];
        let king_index = PieceKind::HAND_COUNT;

        for square in Square::iter() {
            let piece = self.board.piece_at(square);
            for color in Color::all() {
                let expected = piece.is_some_and(|p| p.color() == color);
                ensure!(
                    self.board.color(color).contains(square) == expected,
                    "Occupancy of {color} disagrees with the board at {square}: {piece:?}"
                );
            }

            if let Some(piece) = piece {
                let index = piece.kind().demoted().hand_index().unwrap_or(king_index);
                counts[index] += 1;
            }
        }

        let captured_kings = self
            .history
            .iter()
            .filter(|record| record.captured.is_some_and(|piece| piece.is_king()))
            .count();
        let kings = counts[king_index] as usize;
        ensure!(
            kings + captured_kings == Color::COUNT,
            "Expected 2 Kings, found {kings} on the board and {captured_kings} captured"
        );

        if captured_kings > 0 {
            // Piece totals are only meaningful while both Kings are on the board
            return Ok(());
        }

        for hand in self.hands() {
            for (kind, n) in hand.iter() {
                if let Some(i) = kind.hand_index() {
                    counts[i] += n as u32;
                }
            }
        }

        for kind in PieceKind::HAND_KINDS {
            let Some(i) = kind.hand_index() else {
                continue;
            };
            if counts[i] != 2 {
                bail!(
                    "Expected 2 of {} on the board and in hand, found {}",
                    kind.name(),
                    counts[i]
                );
            }
        }

        Ok(())
    }
}

impl FromStr for Position {
    type Err = FenError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Deref for Position {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.board()
    }
}

impl Default for Position {
    fn default() -> Self {
        match Self::from_fen(FEN_STARTPOS) {
            Ok(pos) => pos,
            // The FEN for startpos is always valid
            Err(err) => unreachable!("{err}"),
        }
    }
}

impl fmt::Display for Position {
    /// Display this position's FEN string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    /// Draws the board framed, Gote's hand down the left and Sente's hand down the right.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hands are listed strongest piece first, with a `2` for a doubled piece.
        let column = |color: Color| {
            let mut entries = self
                .hand(color)
                .iter()
                .map(|(kind, n)| (Piece::new(kind, color), n))
                .collect::<Vec<_>>();
            entries.reverse();
            entries
        };
        let gote = column(Color::Gote);
        let mut sente = column(Color::Sente);
        // Sente's hand sits at the bottom of its column
        sente.reverse();
        let sente_offset = Square::SIDE as usize - sente.len();

        writeln!(f, "   +---+---+---+---+---+")?;
        for row in 0..Square::SIDE {
            match gote.get(row as usize) {
                Some((piece, n)) => write!(f, "{piece}{}", if *n > 1 { '2' } else { ' ' })?,
                None => write!(f, "  ")?,
            }
            write!(f, " |")?;

            for col in (0..Square::SIDE).rev() {
                let occupant = self
                    .piece_at(Square::new(row, col))
                    .map(|p| p.char())
                    .unwrap_or(' ');
                write!(f, " {occupant} |")?;
            }

            let sente_entry = (row as usize)
                .checked_sub(sente_offset)
                .and_then(|i| sente.get(i));
            if let Some((piece, n)) = sente_entry {
                write!(f, " {piece}")?;
                if *n > 1 {
                    write!(f, "2")?;
                }
            }

            match row {
                1 => write!(f, "\t  FEN: {}", self.to_fen())?,
                2 => write!(f, "\t Side: {}", self.side_to_move().name())?,
                _ => {}
            }
            writeln!(f)?;
        }
        write!(f, "   +---+---+---+---+---+")
    }
}

/// Represents all pieces and their locations on a minishogi board.
///
/// Has no knowledge of hands or whose turn it is. If you need those, see [`Position`].
///
/// Internally keeps a mailbox of pieces alongside a [`Bitboard`] of each color's occupied squares.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// All squares occupied by a specific color.
    colors: [Bitboard; Color::COUNT],

    /// The piece on every square, if any.
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            colors: [Bitboard::EMPTY_BOARD; Color::COUNT],
            mailbox: [None; Square::COUNT],
        }
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Places the provided [`Piece`] on the supplied [`Square`].
    ///
    /// If another piece occupies this square, this does *not* remove that piece.
    /// Use [`Board::take`] first.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        debug_assert!(!self.has(square), "{square} is already occupied");
        self.colors[piece.color()].set(square);
        self.mailbox[square] = Some(piece);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use minishogi::{Board, Color, Piece, PieceKind, Square};
    /// let mut board = Board::new();
    /// let gold = Piece::new(PieceKind::Gold, Color::Sente);
    /// board.place(gold, Square::new(2, 2));
    /// assert_eq!(board.take(Square::new(2, 2)), Some(gold));
    /// assert!(board.occupied().is_empty());
    /// ```
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        // Take the piece from the mailbox, exiting early if there is none
        let piece = self.mailbox[square].take()?;
        self.colors[piece.color()].clear(square);
        Some(piece)
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.mailbox[square].map(|piece| piece.color())
    }

    /// Fetches the [`PieceKind`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.mailbox[square].map(|piece| piece.kind())
    }

    /// Fetches the [`Bitboard`] of every square occupied by `color`.
    #[inline(always)]
    pub const fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Fetches a [`Bitboard`] of all occupied squares on the board.
    #[inline(always)]
    pub const fn occupied(&self) -> Bitboard {
        self.color(Color::Sente).or(self.color(Color::Gote))
    }

    /// Fetches a [`Bitboard`] of all non-occupied squares on the board.
    #[inline(always)]
    pub const fn empty(&self) -> Bitboard {
        self.occupied().not()
    }

    /// Fetches a [`Bitboard`] of every square holding `piece`.
    pub fn piece(&self, piece: Piece) -> Bitboard {
        self.iter_for(self.color(piece.color()))
            .filter(|&(_, p)| p == piece)
            .map(|(square, _)| square)
            .collect()
    }

    /// Creates a [`BoardIter`] to iterate over all occupied [`Square`]s in this [`Board`].
    #[inline(always)]
    pub const fn iter(&self) -> BoardIter<'_> {
        BoardIter {
            board: self,
            occupancy: self.occupied(),
        }
    }

    /// Returns an iterator over all of the pieces in `mask` on this board along with their corresponding locations.
    #[inline(always)]
    pub const fn iter_for(&self, mask: Bitboard) -> BoardIter<'_> {
        BoardIter {
            board: self,
            occupancy: mask.and(self.occupied()),
        }
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index]
    }
}

impl Index<Color> for Board {
    type Output = Bitboard;
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self.colors[index]
    }
}

impl IndexMut<Color> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self.colors[index]
    }
}

impl<'a> IntoIterator for &'a Board {
    type IntoIter = BoardIter<'a>;
    type Item = <BoardIter<'a> as Iterator>::Item;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sente:")?;
        writeln!(f, "{}", self.color(Color::Sente))?;
        writeln!(f, "Gote:")?;
        write!(f, "{}", self.color(Color::Gote))
    }
}

/// An iterator over a set of squares on a [`Board`].
///
/// Calls to [`Iterator::next`] will yield a tuple of a [`Square`] and a [`Piece`].
pub struct BoardIter<'a> {
    /// The board to retrieve pieces from.
    board: &'a Board,

    /// The list of squares to iterate over.
    occupancy: Bitboard,
}

impl<'a> Iterator for BoardIter<'a> {
    type Item = (Square, Piece);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let square = self.occupancy.pop_lsb()?;
        let piece = self.board.piece_at(square)?;
        Some((square, piece))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.occupancy.population() as usize;
        (size, Some(size))
    }
}

impl<'a> ExactSizeIterator for BoardIter<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_notation(s).unwrap()
    }

    #[test]
    fn apply_and_revert_quiet_move() {
        let mut pos = Position::default();
        let original = pos.clone();

        let mv = Move::new(sq("5d"), sq("5c"));
        let record = pos.apply(mv);
        assert_eq!(record.captured, None);
        assert_eq!(pos.side_to_move(), Color::Gote);
        assert_eq!(pos.to_fen(), "rbsgk/4p/P4/5/KGSBR w -");
        assert_eq!(pos.ply(), 1);

        pos.revert(mv);
        assert_eq!(pos, original);
    }

    #[test]
    fn capture_demotes_into_hand_and_reverts_promoted() {
        // Sente's Rook captures Gote's Horse on the same column
        let mut pos = Position::from_fen("4k/5/h4/5/R3K b -").unwrap();
        let original = pos.clone();

        let mv = Move::new(sq("5e"), sq("5c"));
        let record = pos.apply(mv);
        assert_eq!(
            record.captured,
            Some(Piece::new(PieceKind::Horse, Color::Gote))
        );
        assert_eq!(pos.hand(Color::Sente).count(PieceKind::Bishop), 1);
        assert!(pos.hand(Color::Gote).is_empty());
        assert_eq!(pos.to_fen(), "4k/5/R4/5/4K w B");

        pos.revert(mv);
        assert_eq!(pos, original);
        assert_eq!(
            pos.piece_at(sq("5c")),
            Some(Piece::new(PieceKind::Horse, Color::Gote))
        );
    }

    #[test]
    fn promotion_is_undone() {
        let mut pos = Position::from_fen("k4/4P/5/5/4K b -").unwrap();
        let original = pos.clone();

        let mv = Move::new_promotion(sq("1b"), sq("1a"));
        pos.apply(mv);
        assert_eq!(
            pos.piece_at(sq("1a")),
            Some(Piece::new(PieceKind::Tokin, Color::Sente))
        );

        pos.revert(mv);
        assert_eq!(pos, original);
    }

    #[test]
    fn drop_takes_from_hand() {
        let mut pos = Position::from_fen("k4/5/5/5/4K w g").unwrap();
        let original = pos.clone();

        let mv = Move::new_drop(PieceKind::Gold, sq("3c"));
        pos.apply(mv);
        assert!(pos.hand(Color::Gote).is_empty());
        assert_eq!(
            pos.piece_at(sq("3c")),
            Some(Piece::new(PieceKind::Gold, Color::Gote))
        );
        assert!(pos.color(Color::Gote).contains(sq("3c")));

        pos.revert(mv);
        assert_eq!(pos, original);
    }

    #[test]
    fn nested_moves_revert_in_reverse_order() {
        let mut pos = Position::default();
        let original = pos.clone();

        let moves = ["5d5c", "1b1c", "5c5b", "1c1d", "5b5a+"]
            .map(|mv| Move::from_notation(mv).unwrap());
        for mv in moves {
            pos.apply(mv);
            pos.check_consistency().unwrap();
        }
        // The Tokin took Gote's Rook, which is now in Sente's hand
        assert_eq!(pos.hand(Color::Sente).count(PieceKind::Rook), 1);

        for mv in moves.into_iter().rev() {
            pos.revert(mv);
            pos.check_consistency().unwrap();
        }
        assert_eq!(pos, original);
    }

    #[test]
    #[should_panic(expected = "No piece found")]
    fn moving_from_an_empty_square_panics() {
        let mut pos = Position::default();
        pos.apply(Move::new(sq("3c"), sq("3b")));
    }

    #[test]
    #[should_panic(expected = "does not belong to the side to move")]
    fn moving_an_enemy_piece_panics() {
        let mut pos = Position::default();
        pos.apply(Move::new(sq("1b"), sq("1c")));
    }

    #[test]
    #[should_panic(expected = "holds none")]
    fn dropping_an_unheld_piece_panics() {
        let mut pos = Position::default();
        pos.apply(Move::new_drop(PieceKind::Gold, sq("3c")));
    }

    #[test]
    #[should_panic(expected = "No moves have been applied")]
    fn reverting_without_history_panics() {
        let mut pos = Position::default();
        pos.revert(Move::new(sq("5d"), sq("5c")));
    }

    #[test]
    fn consistency_detects_missing_pieces() {
        // Only one Pawn on the board and none in hand
        let pos = Position::from_fen("rbsgk/5/5/P4/KGSBR b -").unwrap();
        assert!(pos.check_consistency().is_err());

        assert!(Position::default().check_consistency().is_ok());
    }

    #[test]
    fn consistency_requires_exactly_two_kings() {
        let three = Position::from_fen("kk3/5/5/5/4K b -").unwrap();
        assert!(three.check_consistency().is_err());

        let none = Position::from_fen("5/5/5/5/5 b -").unwrap();
        assert!(none.check_consistency().is_err());
    }

    #[test]
    fn consistency_allows_a_captured_king() {
        // The Rook takes the Gote King, which only happens from an illegal position
        let mut pos = Position::from_fen("k4/5/5/5/R3K b -").unwrap();
        let mv = Move::new(sq("5e"), sq("5a"));
        pos.apply(mv);
        assert!(pos.check_consistency().is_ok());
        assert!(pos.hand(Color::Sente).is_empty());

        pos.revert(mv);
        assert_eq!(pos.piece_at(sq("5a")), Some(Piece::new(PieceKind::King, Color::Gote)));
    }

    #[test]
    fn hand_counts_do_not_overflow() {
        let mut hand = Hand::new();
        for _ in 0..u8::MAX {
            hand.try_add(PieceKind::Pawn).unwrap();
        }
        assert!(hand.try_add(PieceKind::Pawn).is_err());
        assert_eq!(hand.count(PieceKind::Pawn), u8::MAX);
    }

    #[test]
    fn hand_counts() {
        let mut hand = Hand::new();
        hand.add(PieceKind::Pawn);
        hand.add(PieceKind::Pawn);
        hand.add(PieceKind::Rook);
        assert_eq!(hand.count(PieceKind::Pawn), 2);
        assert_eq!(hand.len(), 3);
        assert_eq!(
            hand.iter().collect::<Vec<_>>(),
            [(PieceKind::Pawn, 2), (PieceKind::Rook, 1)]
        );
        hand.remove(PieceKind::Pawn);
        assert_eq!(hand.count(PieceKind::Pawn), 1);
        assert_eq!(hand.count(PieceKind::King), 0);
    }

    #[test]
    fn board_piece_lookup() {
        let pos = Position::default();
        let kings = pos.piece(Piece::new(PieceKind::King, Color::Sente));
        assert_eq!(kings, sq("5e").bitboard());
        assert_eq!(pos.occupied().population(), 12);
        assert_eq!(pos.empty().population(), 13);
    }
}
