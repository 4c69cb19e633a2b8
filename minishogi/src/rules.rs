/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

/// What happens when a Pawn steps into its promotion zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PawnPromotion {
    /// Only the promoting move is generated, since an unpromoted Pawn on the last row could never move again.
    #[default]
    Forced,

    /// Both the promoting and non-promoting moves are generated.
    Optional,
}

/// Whether a Pawn may be dropped to deliver checkmate ("uchifuzume").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DropPawnMate {
    /// Pawn drops that checkmate are never generated.
    #[default]
    Forbidden,

    /// Pawn drops are generated regardless of whether they checkmate.
    Allowed,
}

/// The rule variants a [`Game`](crate::Game) is played under.
///
/// # Example
/// ```
/// # use minishogi::{DropPawnMate, PawnPromotion, Rules};
/// let rules = Rules::default();
/// assert_eq!(rules.pawn_promotion, PawnPromotion::Forced);
/// assert_eq!(rules.drop_pawn_mate, DropPawnMate::Forbidden);
///
/// let relaxed = rules
///     .with_pawn_promotion(PawnPromotion::Optional)
///     .with_drop_pawn_mate(DropPawnMate::Allowed);
/// assert!(relaxed.allows_drop_pawn_mate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rules {
    pub pawn_promotion: PawnPromotion,
    pub drop_pawn_mate: DropPawnMate,
}

impl Rules {
    /// Creates a new [`Rules`] from both variants.
    #[inline(always)]
    pub const fn new(pawn_promotion: PawnPromotion, drop_pawn_mate: DropPawnMate) -> Self {
        Self {
            pawn_promotion,
            drop_pawn_mate,
        }
    }

    /// Returns a copy of these rules with a different [`PawnPromotion`] policy.
    #[inline(always)]
    pub const fn with_pawn_promotion(self, pawn_promotion: PawnPromotion) -> Self {
        Self {
            pawn_promotion,
            ..self
        }
    }

    /// Returns a copy of these rules with a different [`DropPawnMate`] policy.
    #[inline(always)]
    pub const fn with_drop_pawn_mate(self, drop_pawn_mate: DropPawnMate) -> Self {
        Self {
            drop_pawn_mate,
            ..self
        }
    }

    /// Returns `true` if a Pawn entering the promotion zone must promote.
    #[inline(always)]
    pub const fn forces_pawn_promotion(&self) -> bool {
        matches!(self.pawn_promotion, PawnPromotion::Forced)
    }

    /// Returns `true` if a Pawn may be dropped to deliver checkmate.
    #[inline(always)]
    pub const fn allows_drop_pawn_mate(&self) -> bool {
        matches!(self.drop_pawn_mate, DropPawnMate::Allowed)
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let promotion = if self.forces_pawn_promotion() {
            "forced"
        } else {
            "optional"
        };
        let mate = if self.allows_drop_pawn_mate() {
            "allowed"
        } else {
            "forbidden"
        };
        write!(f, "pawn promotion {promotion}, drop-pawn-mate {mate}")
    }
}
