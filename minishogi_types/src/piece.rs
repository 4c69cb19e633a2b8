/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

/// Represents the color of a player, piece, square, etc. within a game of minishogi.
///
/// Sente moves first and plays "up" the board, towards row 0.
/// Gote moves second and plays "down" the board, towards row 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Color {
    #[default]
    Sente,
    Gote,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with Sente.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Sente, Self::Gote]
    }

    /// Returns the opponent of this color.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::Color;
    /// assert_eq!(Color::Sente.opponent(), Color::Gote);
    /// assert_eq!(Color::Gote.opponent(), Color::Sente);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Sente => Self::Gote,
            Self::Gote => Self::Sente,
        }
    }

    /// Returns `true` if this color is Sente.
    #[inline(always)]
    pub const fn is_sente(&self) -> bool {
        matches!(self, Self::Sente)
    }

    /// Returns `true` if this color is Gote.
    #[inline(always)]
    pub const fn is_gote(&self) -> bool {
        matches!(self, Self::Gote)
    }

    /// Creates a [`Color`] from a `bool`, where `false` is Sente and `true` is Gote.
    #[inline(always)]
    pub const fn from_bool(is_gote: bool) -> Self {
        if is_gote {
            Self::Gote
        } else {
            Self::Sente
        }
    }

    /// Index of this color, for use in `[T; Color::COUNT]` arrays.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Creates a [`Color`] from the side-to-move field of a FEN string.
    ///
    /// `b` is Sente and `w` is Gote.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::Color;
    /// assert_eq!(Color::from_char('b').unwrap(), Color::Sente);
    /// assert_eq!(Color::from_char('w').unwrap(), Color::Gote);
    /// assert!(Color::from_char('x').is_err());
    /// ```
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'b' => Ok(Self::Sente),
            'w' => Ok(Self::Gote),
            _ => bail!("Color must be either 'b' or 'w'. Got {c:?}"),
        }
    }

    /// Converts this [`Color`] to its side-to-move character.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Sente => 'b',
            Self::Gote => 'w',
        }
    }

    /// Name of this color.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sente => "sente",
            Self::Gote => "gote",
        }
    }
}

impl Not for Color {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => bail!("Color must be a single character. Got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

/// The kind of a piece, including its promotion state.
///
/// Unpromoted kinds occupy the values `1..=6`.
/// Promoted kinds have the [`PieceKind::PROMOTED_BIT`] set on top of their unpromoted kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Silver = 2,
    Gold = 3,
    Bishop = 4,
    Rook = 5,
    King = 6,
    Tokin = 9,
    PromotedSilver = 10,
    Horse = 12,
    Dragon = 13,
}

impl PieceKind {
    /// Bit set on every promoted kind.
    pub const PROMOTED_BIT: u8 = 0b1000;

    /// Mask to extract a [`PieceKind`] from a packed [`Piece`].
    pub const MASK: u8 = 0b1111;

    /// Number of kinds that can be held in hand (every unpromoted kind except the King).
    pub const HAND_COUNT: usize = 5;

    /// All kinds that can be held in hand, in hand order.
    pub const HAND_KINDS: [Self; Self::HAND_COUNT] =
        [Self::Pawn, Self::Silver, Self::Gold, Self::Bishop, Self::Rook];

    /// All ten piece kinds.
    #[inline(always)]
    pub const fn all() -> [Self; 10] {
        [
            Self::Pawn,
            Self::Silver,
            Self::Gold,
            Self::Bishop,
            Self::Rook,
            Self::King,
            Self::Tokin,
            Self::PromotedSilver,
            Self::Horse,
            Self::Dragon,
        ]
    }

    /// Creates a [`PieceKind`] from its raw bits, if they encode a valid kind.
    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Self::Pawn),
            2 => Some(Self::Silver),
            3 => Some(Self::Gold),
            4 => Some(Self::Bishop),
            5 => Some(Self::Rook),
            6 => Some(Self::King),
            9 => Some(Self::Tokin),
            10 => Some(Self::PromotedSilver),
            12 => Some(Self::Horse),
            13 => Some(Self::Dragon),
            _ => None,
        }
    }

    /// Raw bits of this kind.
    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        *self as u8
    }

    /// Returns `true` if this kind is a promoted kind.
    #[inline(always)]
    pub const fn is_promoted(&self) -> bool {
        self.bits() & Self::PROMOTED_BIT != 0
    }

    /// Returns `true` if this kind has a promoted form.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::PieceKind;
    /// assert!(PieceKind::Pawn.can_promote());
    /// assert!(!PieceKind::Gold.can_promote());
    /// assert!(!PieceKind::Dragon.can_promote());
    /// ```
    #[inline(always)]
    pub const fn can_promote(&self) -> bool {
        matches!(self, Self::Pawn | Self::Silver | Self::Bishop | Self::Rook)
    }

    /// Returns `true` if this kind slides along rays (Bishop, Rook and their promotions).
    #[inline(always)]
    pub const fn is_sliding(&self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Horse | Self::Dragon)
    }

    /// Returns the promoted form of this kind, or `None` if it cannot promote.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::PieceKind;
    /// assert_eq!(PieceKind::Rook.promoted(), Some(PieceKind::Dragon));
    /// assert_eq!(PieceKind::King.promoted(), None);
    /// ```
    #[inline(always)]
    pub const fn promoted(&self) -> Option<Self> {
        if self.can_promote() {
            Self::from_bits(self.bits() | Self::PROMOTED_BIT)
        } else {
            None
        }
    }

    /// Returns the unpromoted form of this kind.
    ///
    /// Unpromoted kinds are returned unchanged.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::PieceKind;
    /// assert_eq!(PieceKind::Tokin.demoted(), PieceKind::Pawn);
    /// assert_eq!(PieceKind::Gold.demoted(), PieceKind::Gold);
    /// ```
    #[inline(always)]
    pub const fn demoted(&self) -> Self {
        match *self {
            Self::Tokin => Self::Pawn,
            Self::PromotedSilver => Self::Silver,
            Self::Horse => Self::Bishop,
            Self::Dragon => Self::Rook,
            kind => kind,
        }
    }

    /// Index of this kind in a hand, or `None` for the King and promoted kinds.
    #[inline(always)]
    pub const fn hand_index(&self) -> Option<usize> {
        match self {
            Self::Pawn => Some(0),
            Self::Silver => Some(1),
            Self::Gold => Some(2),
            Self::Bishop => Some(3),
            Self::Rook => Some(4),
            _ => None,
        }
    }

    /// Lowercase letter of this kind, as used in FEN strings.
    ///
    /// The promoted Silver is `n` (for "narigin"); the other promotions have letters of their own.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Silver => 's',
            Self::Gold => 'g',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::King => 'k',
            Self::Tokin => 't',
            Self::PromotedSilver => 'n',
            Self::Horse => 'h',
            Self::Dragon => 'd',
        }
    }

    /// Parses a [`PieceKind`] from a letter of either case.
    pub fn from_char(c: char) -> Result<Self> {
        Ok(match c.to_ascii_lowercase() {
            'p' => Self::Pawn,
            's' => Self::Silver,
            'g' => Self::Gold,
            'b' => Self::Bishop,
            'r' => Self::Rook,
            'k' => Self::King,
            't' => Self::Tokin,
            'n' => Self::PromotedSilver,
            'h' => Self::Horse,
            'd' => Self::Dragon,
            _ => bail!("Invalid char for PieceKind: {c:?}"),
        })
    }

    /// Name of this kind.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::King => "king",
            Self::Tokin => "tokin",
            Self::PromotedSilver => "promoted silver",
            Self::Horse => "horse",
            Self::Dragon => "dragon",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A piece on the board, packed into a single byte.
///
/// Bits `0..4` hold the [`PieceKind`] (including its promotion bit) and bit `4` holds the [`Color`].
///
/// An empty square is represented as `Option<Piece>::None` rather than a sentinel value,
/// so asking for the color of "no piece" is not expressible.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    const COLOR_BIT: u8 = 0b1_0000;

    /// Creates a new [`Piece`] from the given kind and color.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::{Color, Piece, PieceKind};
    /// let horse = Piece::new(PieceKind::Horse, Color::Gote);
    /// assert_eq!(horse.kind(), PieceKind::Horse);
    /// assert_eq!(horse.color(), Color::Gote);
    /// assert!(horse.is_promoted());
    /// ```
    #[inline(always)]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self(kind.bits() | (color as u8) << 4)
    }

    /// Raw bits of this piece.
    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// The [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        match PieceKind::from_bits(self.0 & PieceKind::MASK) {
            Some(kind) => kind,
            // Pieces are only constructed through `Piece::new`
            None => unreachable!(),
        }
    }

    /// The [`Color`] of this piece.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        Color::from_bool(self.0 & Self::COLOR_BIT != 0)
    }

    /// Deconstructs this piece into its kind and color.
    #[inline(always)]
    pub const fn parts(&self) -> (PieceKind, Color) {
        (self.kind(), self.color())
    }

    /// Returns `true` if this piece is a promoted kind.
    #[inline(always)]
    pub const fn is_promoted(&self) -> bool {
        self.kind().is_promoted()
    }

    /// Returns `true` if this piece has a promoted form.
    #[inline(always)]
    pub const fn can_promote(&self) -> bool {
        self.kind().can_promote()
    }

    /// Returns `true` if this piece slides along rays.
    #[inline(always)]
    pub const fn is_sliding(&self) -> bool {
        self.kind().is_sliding()
    }

    /// Returns `true` if this piece is a King.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind(), PieceKind::King)
    }

    /// Returns `true` if this piece is an unpromoted Pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind(), PieceKind::Pawn)
    }

    /// Returns this piece in its promoted form, or `None` if it cannot promote.
    #[inline(always)]
    pub const fn promoted(&self) -> Option<Self> {
        match self.kind().promoted() {
            Some(kind) => Some(Self::new(kind, self.color())),
            None => None,
        }
    }

    /// Returns this piece in its unpromoted form.
    #[inline(always)]
    pub const fn demoted(&self) -> Self {
        Self::new(self.kind().demoted(), self.color())
    }

    /// Returns this piece, owned by the opposite player.
    #[inline(always)]
    pub const fn with_color(&self, color: Color) -> Self {
        Self::new(self.kind(), color)
    }

    /// Creates a [`Piece`] from a FEN letter: uppercase is Sente and lowercase is Gote.
    ///
    /// # Example
    /// ```
    /// # use minishogi_types::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::from_char('D').unwrap(), Piece::new(PieceKind::Dragon, Color::Sente));
    /// assert_eq!(Piece::from_char('n').unwrap(), Piece::new(PieceKind::PromotedSilver, Color::Gote));
    /// assert!(Piece::from_char('x').is_err());
    /// ```
    pub fn from_char(c: char) -> Result<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = Color::from_bool(c.is_ascii_lowercase());
        Ok(Self::new(kind, color))
    }

    /// FEN letter of this piece.
    #[inline(always)]
    pub const fn char(&self) -> char {
        let c = self.kind().char();
        match self.color() {
            Color::Sente => c.to_ascii_uppercase(),
            Color::Gote => c,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color().name(), self.kind().name())
    }
}
