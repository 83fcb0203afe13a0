use crate::util::Binary;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use shakmaty as sm;
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// A square on the chess board, addressed by `(file, rank)`.
///
/// Square `A1` is the `(0, 0)` corner, where the white army starts.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary, Deserialize, Serialize,
)]
#[serde(try_from = "(i8, i8)", into = "(i8, i8)")]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

use Square::*;

#[rustfmt::skip]
const SQUARES: [Square; 64] = [
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
];

/// The reason why a pair of coordinates does not address a [`Square`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "coordinates `({file}, {rank})` are out of bounds")]
pub struct OutOfBounds {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    /// Constructs [`Square`] from a pair of file and rank in the range (0..8).
    #[inline]
    pub fn new(file: i8, rank: i8) -> Result<Self, OutOfBounds> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Ok(SQUARES[(rank * 8 + file) as usize])
        } else {
            Err(OutOfBounds { file, rank })
        }
    }

    /// Returns an iterator over all [`Square`]s, rank by rank.
    #[inline]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        SQUARES.into_iter()
    }

    /// This square's file in the range (0..8).
    #[inline]
    pub fn file(&self) -> i8 {
        *self as i8 & 0b111
    }

    /// This square's rank in the range (0..8).
    #[inline]
    pub fn rank(&self) -> i8 {
        *self as i8 >> 3
    }

    /// This square's index in the range (0..64).
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The square displaced by `(df, dr)`, if still on the board.
    #[inline]
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        Square::new(self.file().checked_add(df)?, self.rank().checked_add(dr)?).ok()
    }
}

impl TryFrom<(i8, i8)> for Square {
    type Error = OutOfBounds;

    #[inline]
    fn try_from((file, rank): (i8, i8)) -> Result<Self, Self::Error> {
        Square::new(file, rank)
    }
}

impl From<Square> for (i8, i8) {
    #[inline]
    fn from(s: Square) -> Self {
        (s.file(), s.rank())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + self.file() as u8).into())?;
        f.write_char((b'1' + self.rank() as u8).into())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse square")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[f @ b'a'..=b'h', r @ b'1'..=b'8'] => {
                Square::new((f - b'a') as i8, (r - b'1') as i8).map_err(|_| ParseSquareError)
            }

            _ => Err(ParseSquareError),
        }
    }
}

/// The reason why decoding [`Square`] from binary failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Arbitrary, Error)]
#[display(fmt = "not a valid square")]
pub struct DecodeSquareError;

impl Binary for Square {
    type Bits = u8;
    type Error = DecodeSquareError;

    #[inline]
    fn encode(&self) -> Self::Bits {
        *self as u8
    }

    #[inline]
    fn decode(bits: Self::Bits) -> Result<Self, Self::Error> {
        SQUARES.get(bits as usize).copied().ok_or(DecodeSquareError)
    }
}

#[doc(hidden)]
impl From<sm::Square> for Square {
    #[inline]
    fn from(s: sm::Square) -> Self {
        SQUARES[s as usize]
    }
}

#[doc(hidden)]
impl From<Square> for sm::Square {
    #[inline]
    fn from(s: Square) -> Self {
        sm::Square::new(s as u32)
    }
}
