use crate::chess::{Color, Role};
use crate::util::Binary;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use shakmaty as sm;
use std::fmt::{self, Formatter};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// A chess [piece][`Role`] of a certain [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary, Deserialize, Serialize)]
pub struct Piece(pub Color, pub Role);

impl Piece {
    /// This piece's [`Color`].
    #[inline]
    pub fn color(&self) -> Color {
        self.0
    }

    /// This piece's [`Role`].
    #[inline]
    pub fn role(&self) -> Role {
        self.1
    }

    /// This piece's index in the range (0..12).
    #[inline]
    pub fn index(&self) -> u8 {
        self.color() as u8 + self.role() as u8 * 2
    }

    /// Returns an iterator over all [`Piece`]s.
    #[inline]
    pub fn iter() -> impl Iterator<Item = Self> {
        Role::iter().flat_map(|r| Color::iter().map(move |c| Piece(c, r)))
    }
}

/// Renders white pieces in uppercase and black pieces in lowercase.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.color() {
            Color::White => write!(f, "{}", self.role().to_string().to_uppercase()),
            Color::Black => write!(f, "{}", self.role()),
        }
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece")]
pub struct ParsePieceError;

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let role = s.to_lowercase().parse().map_err(|_| ParsePieceError)?;

        if s.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Piece(Color::White, role))
        } else {
            Ok(Piece(Color::Black, role))
        }
    }
}

/// The reason why decoding [`Piece`] from binary failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Arbitrary, Error)]
#[display(fmt = "not a valid piece")]
pub struct DecodePieceError;

impl Binary for Piece {
    type Bits = u8;
    type Error = DecodePieceError;

    #[inline]
    fn encode(&self) -> Self::Bits {
        self.index()
    }

    #[inline]
    fn decode(bits: Self::Bits) -> Result<Self, Self::Error> {
        Piece::iter()
            .find(|p| p.index() == bits)
            .ok_or(DecodePieceError)
    }
}

#[doc(hidden)]
impl From<sm::Piece> for Piece {
    #[inline]
    fn from(p: sm::Piece) -> Self {
        Piece(p.color.into(), p.role.into())
    }
}

#[doc(hidden)]
impl From<Piece> for sm::Piece {
    #[inline]
    fn from(p: Piece) -> Self {
        sm::Piece {
            color: p.color().into(),
            role: p.role().into(),
        }
    }
}
