use derive_more::Display;
use serde::{Deserialize, Serialize};
use shakmaty as sm;
use std::ops::Not;
use test_strategy::Arbitrary;

/// Denotes the color of a chess [`Piece`][`crate::chess::Piece`].
#[derive(
    Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary, Deserialize, Serialize,
)]
#[repr(u8)]
pub enum Color {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Color {
    /// Returns an iterator over [`Color`]s.
    #[inline]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        [Color::White, Color::Black].into_iter()
    }

    /// The rank step of a pawn of this color.
    #[inline]
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank pawns of this color start from.
    #[inline]
    pub fn home_rank(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// The rank on which pawns of this color promote.
    #[inline]
    pub fn last_rank(&self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[doc(hidden)]
impl From<sm::Color> for Color {
    #[inline]
    fn from(c: sm::Color) -> Self {
        match c {
            sm::Color::White => Color::White,
            sm::Color::Black => Color::Black,
        }
    }
}

#[doc(hidden)]
impl From<Color> for sm::Color {
    #[inline]
    fn from(c: Color) -> Self {
        match c {
            Color::White => sm::Color::White,
            Color::Black => sm::Color::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn color_implements_not_operator(c: Color) {
        assert_eq!(!!c, c);
    }

    #[proptest]
    fn pawns_move_away_from_their_home_rank(c: Color) {
        let two_steps = c.home_rank() + 2 * c.forward();
        assert!((c.home_rank() - c.last_rank()).abs() > (two_steps - c.last_rank()).abs());
    }

    #[proptest]
    fn opposing_colors_move_in_opposite_directions(c: Color) {
        assert_eq!(c.forward(), -(!c).forward());
    }

    #[test]
    fn ranks_follow_the_grid_convention() {
        assert_eq!(Color::White.home_rank(), 1);
        assert_eq!(Color::Black.home_rank(), 6);
        assert_eq!(Color::White.last_rank(), 7);
        assert_eq!(Color::Black.last_rank(), 0);
    }

    #[proptest]
    fn color_has_an_equivalent_shakmaty_representation(c: Color) {
        assert_eq!(Color::from(sm::Color::from(c)), c);
    }
}
