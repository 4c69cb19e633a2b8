/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{PieceKind, Square};

/// A single move in minishogi.
///
/// Either a piece already on the board moves (possibly promoting), or a piece from the mover's hand is dropped onto an empty square.
/// The color of a dropped piece is implied by whose turn it is.
///
/// Moves are written as `<from><to>` with an optional `+` for promotion (`1e1d`, `2b2a+`),
/// and drops as `<kind>*<to>` (`P*5b`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// A piece on the board moves from one square to another.
    Board {
        from: Square,
        to: Square,
        promote: bool,
    },

    /// A piece is placed from the mover's hand onto an empty square.
    Drop { to: Square, kind: PieceKind },
}

impl Move {
    /// Creates a new non-promoting board move.
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self::Board {
            from,
            to,
            promote: false,
        }
    }

    /// Creates a new promoting board move.
    #[inline(always)]
    pub const fn new_promotion(from: Square, to: Square) -> Self {
        Self::Board {
            from,
            to,
            promote: true,
        }
    }

    /// Creates a new drop of `kind` onto `to`.
    #[inline(always)]
    pub const fn new_drop(kind: PieceKind, to: Square) -> Self {
        Self::Drop { to, kind }
    }

    /// The origin of this move, or `None` if it is a drop.
    #[inline(always)]
    pub const fn from(&self) -> Option<Square> {
        match self {
            Self::Board { from, .. } => Some(*from),
            Self::Drop { .. } => None,
        }
    }

    /// The destination of this move.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        match self {
            Self::Board { to, .. } | Self::Drop { to, .. } => *to,
        }
    }

    /// Returns `true` if this move promotes the moving piece.
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        matches!(self, Self::Board { promote: true, .. })
    }

    /// Returns `true` if this move is a drop.
    #[inline(always)]
    pub const fn is_drop(&self) -> bool {
        matches!(self, Self::Drop { .. })
    }

    /// The kind being dropped, or `None` if this is a board move.
    #[inline(always)]
    pub const fn drop_kind(&self) -> Option<PieceKind> {
        match self {
            Self::Drop { kind, .. } => Some(*kind),
            Self::Board { .. } => None,
        }
    }

    /// Returns `true` if this move drops an (unpromoted) Pawn.
    #[inline(always)]
    pub const fn is_pawn_drop(&self) -> bool {
        matches!(
            self,
            Self::Drop {
                kind: PieceKind::Pawn,
                ..
            }
        )
    }

    /// Parses a move from its textual notation.
    ///
    /// # Example
    /// ```
    /// # use minishogi::{Move, PieceKind, Square};
    /// let mv = Move::from_notation("2b2a+").unwrap();
    /// assert_eq!(mv, Move::new_promotion(Square::new(1, 1), Square::new(0, 1)));
    ///
    /// let drop = Move::from_notation("P*5b").unwrap();
    /// assert_eq!(drop, Move::new_drop(PieceKind::Pawn, Square::new(1, 4)));
    ///
    /// assert!(Move::from_notation("K*3c").is_err());
    /// ```
    pub fn from_notation(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some((kind, to)) = s.split_once('*') {
            let mut chars = kind.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                bail!("Drop {s:?} must name exactly one piece");
            };
            let kind = PieceKind::from_char(c)?;
            if kind.hand_index().is_none() {
                bail!("Drop {s:?}: a {} cannot be held in hand", kind.name());
            }
            return Ok(Self::new_drop(kind, Square::from_notation(to)?));
        }

        let (squares, promote) = match s.strip_suffix('+') {
            Some(squares) => (squares, true),
            None => (s, false),
        };

        let (Some(from), Some(to)) = (squares.get(0..2), squares.get(2..)) else {
            bail!("Move {s:?} must be of the form <from><to>[+]");
        };

        let from = Square::from_notation(from)?;
        let to = Square::from_notation(to)?;
        if from == to {
            bail!("Move {s:?} does not go anywhere");
        }

        Ok(Self::Board { from, to, promote })
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board { from, to, promote } => {
                write!(f, "{from}{to}")?;
                if *promote {
                    write!(f, "+")?;
                }
                Ok(())
            }
            Self::Drop { to, kind } => write!(f, "{}*{to}", kind.char().to_ascii_uppercase()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_round_trips() {
        for notation in ["1e1d", "2b2a+", "5e4d", "P*5b", "R*3c", "G*1a"] {
            let mv = Move::from_notation(notation).unwrap();
            assert_eq!(mv.to_string(), notation);
        }
    }

    #[test]
    fn lowercase_drops_are_accepted() {
        let mv = Move::from_notation("s*2c").unwrap();
        assert_eq!(mv, Move::new_drop(PieceKind::Silver, Square::new(2, 1)));
    }

    #[test]
    fn drops_have_no_origin() {
        let drop = Move::new_drop(PieceKind::Gold, Square::new(2, 2));
        assert_eq!(drop.from(), None);
        assert_eq!(drop.drop_kind(), Some(PieceKind::Gold));
        assert!(!drop.is_promotion());

        let mv = Move::new(Square::new(4, 0), Square::new(3, 0));
        assert_eq!(mv.from(), Some(Square::new(4, 0)));
        assert_eq!(mv.drop_kind(), None);
    }

    #[test]
    fn malformed_moves_are_rejected() {
        for notation in ["", "1e", "1e1e", "1e6d", "T*3c", "PP*3c", "1e1d++"] {
            assert!(Move::from_notation(notation).is_err(), "{notation:?}");
        }
    }
}
