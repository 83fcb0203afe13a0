use crate::chess::Square;
use crate::util::Binary;
use derive_more::{DebugCustom, Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// A request to move whatever stands on one [`Square`] to another.
///
/// Moves carry no history, they are displayed in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary, Deserialize, Serialize)]
#[filter(#self.0 != #self.1)]
#[debug(fmt = "Move({self})")]
#[display(fmt = "{_0}{_1}")]
pub struct Move(pub Square, pub Square);

impl Move {
    /// The source [`Square`].
    #[inline]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    #[inline]
    pub fn whither(&self) -> Square {
        self.1
    }

    /// The file and rank displacement of this move.
    #[inline]
    pub fn delta(&self) -> (i8, i8) {
        (
            self.whither().file() - self.whence().file(),
            self.whither().rank() - self.whence().rank(),
        )
    }
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse move")]
pub struct ParseMoveError;

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match (s.get(..2), s.get(2..)) {
            (Some(whence), Some(whither)) => Ok(Move(
                whence.parse().map_err(|_| ParseMoveError)?,
                whither.parse().map_err(|_| ParseMoveError)?,
            )),

            _ => Err(ParseMoveError),
        }
    }
}

/// The reason why decoding [`Move`] from binary failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Arbitrary, Error)]
#[display(fmt = "not a valid move")]
pub struct DecodeMoveError;

impl From<<Square as Binary>::Error> for DecodeMoveError {
    #[inline]
    fn from(_: <Square as Binary>::Error) -> Self {
        DecodeMoveError
    }
}

impl Binary for Move {
    type Bits = u16;
    type Error = DecodeMoveError;

    #[inline]
    fn encode(&self) -> Self::Bits {
        self.whence().encode() as u16 | (self.whither().encode() as u16) << 6
    }

    #[inline]
    fn decode(bits: Self::Bits) -> Result<Self, Self::Error> {
        if bits >> 12 != 0 {
            return Err(DecodeMoveError);
        }

        Ok(Move(
            Square::decode((bits & 0b111111) as u8)?,
            Square::decode((bits >> 6) as u8)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn move_has_a_source_and_a_destination(m: Move) {
        assert_ne!(m.whence(), m.whither());
    }

    #[test]
    fn delta_is_the_displacement_from_source_to_destination() {
        assert_eq!(Move(Square::E2, Square::E4).delta(), (0, 2));
        assert_eq!(Move(Square::G8, Square::F6).delta(), (-1, -2));
    }

    #[test]
    fn move_is_printed_in_pure_coordinate_notation() {
        assert_eq!(Move(Square::E2, Square::E4).to_string(), "e2e4");
    }

    #[proptest]
    fn parsing_printed_move_is_an_identity(m: Move) {
        assert_eq!(m.to_string().parse(), Ok(m));
    }

    #[proptest]
    fn parsing_move_fails_for_invalid_string(
        #[filter(#s.parse::<Move>().is_err())] s: String,
    ) {
        assert_eq!(s.parse::<Move>(), Err(ParseMoveError));
    }

    #[test]
    fn parsing_move_fails_for_trailing_characters() {
        assert_eq!("e2e4q".parse::<Move>(), Err(ParseMoveError));
    }

    #[proptest]
    fn decoding_encoded_move_is_an_identity(m: Move) {
        assert_eq!(Move::decode(m.encode()), Ok(m));
    }

    #[proptest]
    fn decoding_move_fails_for_invalid_bits(#[strategy(4096u16..=u16::MAX)] b: u16) {
        assert_eq!(Move::decode(b), Err(DecodeMoveError));
    }
}
