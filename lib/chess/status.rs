use derive_more::Display;
use serde::{Deserialize, Serialize};
use test_strategy::Arbitrary;

/// The situation of a side once the opponent has moved.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary, Deserialize, Serialize)]
pub enum Status {
    #[display(fmt = "normal")]
    Normal,
    #[display(fmt = "check")]
    Check,
    #[display(fmt = "checkmate")]
    Checkmate,

    /// Only stalemate is detected.
    #[display(fmt = "draw")]
    Draw,
}

impl Status {
    /// Classifies a side's situation.
    #[inline]
    pub fn new(in_check: bool, has_moves: bool) -> Self {
        match (in_check, has_moves) {
            (true, false) => Status::Checkmate,
            (false, false) => Status::Draw,
            (true, true) => Status::Check,
            (false, true) => Status::Normal,
        }
    }

    /// Whether the game is over.
    #[inline]
    pub fn is_final(&self) -> bool {
        matches!(self, Status::Checkmate | Status::Draw)
    }
}
