use crate::chess::{Board, Color, DecodePieceError, DecodeSquareError, Piece, Square};
use crate::game::GameState;
use crate::util::Binary;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// The at-rest and on-the-wire form of a [`GameState`].
///
/// Board entries may appear in any order, if a [`Square`] is listed more than once the
/// last entry wins. Captured pieces are listed oldest first.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Layout {
    pub board: Vec<(Square, Piece)>,
    pub captured_white: Vec<Piece>,
    pub captured_black: Vec<Piece>,
    pub white_to_move: bool,
}

impl Default for Layout {
    #[inline]
    fn default() -> Self {
        Layout {
            board: Vec::new(),
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            white_to_move: true,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ron = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&ron)
    }
}

/// The reason why parsing [`Layout`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse board layout")]
pub struct ParseLayoutError(ron::de::SpannedError);

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

impl From<&GameState> for Layout {
    fn from(game: &GameState) -> Self {
        Layout {
            board: game.board().iter().map(|(p, s)| (s, p)).collect(),
            captured_white: game.captured(Color::White).to_vec(),
            captured_black: game.captured(Color::Black).to_vec(),
            white_to_move: game.turn() == Color::White,
        }
    }
}

impl From<Layout> for GameState {
    fn from(layout: Layout) -> Self {
        let board: Board = layout.board.into_iter().collect();

        let turn = match layout.white_to_move {
            true => Color::White,
            false => Color::Black,
        };

        GameState::with(board, turn, layout.captured_white, layout.captured_black)
    }
}

/// The reason why decoding [`Layout`] from binary failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum DecodeLayoutError {
    #[from(ignore)]
    #[display(fmt = "unexpected end of input")]
    Truncated,
    #[display(fmt = "invalid square")]
    Square(DecodeSquareError),
    #[display(fmt = "invalid piece")]
    Piece(DecodePieceError),
    #[from(ignore)]
    #[display(fmt = "invalid side to move `{_0}`")]
    Turn(#[error(not(source))] u8),
    #[from(ignore)]
    #[display(fmt = "unexpected trailing bytes")]
    Trailing,
}

struct Reader<'a>(&'a [u8]);

impl Reader<'_> {
    fn byte(&mut self) -> Result<u8, DecodeLayoutError> {
        let (&b, rest) = self.0.split_first().ok_or(DecodeLayoutError::Truncated)?;
        self.0 = rest;
        Ok(b)
    }

    fn len(&mut self) -> Result<usize, DecodeLayoutError> {
        let mut bytes = [0; 4];
        for b in &mut bytes {
            *b = self.byte()?;
        }

        Ok(u32::from_le_bytes(bytes) as usize)
    }

    fn pieces(&mut self) -> Result<Vec<Piece>, DecodeLayoutError> {
        let n = self.len()?;
        if n > self.0.len() {
            return Err(DecodeLayoutError::Truncated);
        }

        (0..n)
            .map(|_| -> Result<_, DecodeLayoutError> { Ok(Piece::decode(self.byte()?)?) })
            .collect()
    }
}

fn put_len(bytes: &mut Vec<u8>, n: usize) {
    bytes.extend_from_slice(&(n as u32).to_le_bytes());
}

/// Lengths are prefixed as little-endian `u32`, squares and pieces take one byte each.
impl Binary for Layout {
    type Bits = Vec<u8>;
    type Error = DecodeLayoutError;

    fn encode(&self) -> Self::Bits {
        let mut bytes = Vec::new();

        put_len(&mut bytes, self.board.len());
        for (s, p) in &self.board {
            bytes.push(s.encode());
            bytes.push(p.encode());
        }

        for captured in [&self.captured_white, &self.captured_black] {
            put_len(&mut bytes, captured.len());
            bytes.extend(captured.iter().map(Piece::encode));
        }

        bytes.push(self.white_to_move.into());
        bytes
    }

    fn decode(bits: Self::Bits) -> Result<Self, Self::Error> {
        let mut reader = Reader(&bits);

        let n = reader.len()?;
        if n > reader.0.len() / 2 {
            return Err(DecodeLayoutError::Truncated);
        }

        let board = (0..n)
            .map(|_| -> Result<_, DecodeLayoutError> {
                Ok((Square::decode(reader.byte()?)?, Piece::decode(reader.byte()?)?))
            })
            .collect::<Result<_, _>>()?;

        let captured_white = reader.pieces()?;
        let captured_black = reader.pieces()?;

        let white_to_move = match reader.byte()? {
            0 => false,
            1 => true,
            b => return Err(DecodeLayoutError::Turn(b)),
        };

        if !reader.0.is_empty() {
            return Err(DecodeLayoutError::Trailing);
        }

        Ok(Layout {
            board,
            captured_white,
            captured_black,
            white_to_move,
        })
    }
}
