use crate::chess::{Board, Move, Piece};
use std::ops::Deref;

/// A [`Move`] tentatively played on a [`Board`].
///
/// The board is restored to its prior state when the trial is dropped.
#[derive(Debug)]
pub struct Trial<'a> {
    board: &'a mut Board,
    m: Move,
    piece: Piece,
    capture: Option<Piece>,
}

impl Board {
    /// Tentatively plays a [`Move`] without checking its legality.
    ///
    /// Returns `None` if the source square is empty.
    #[inline]
    pub fn trial(&mut self, m: Move) -> Option<Trial<'_>> {
        let piece = self.take(m.whence())?;
        let capture = self.put(m.whither(), piece);

        Some(Trial {
            board: self,
            m,
            piece,
            capture,
        })
    }
}

impl Trial<'_> {
    /// The [`Piece`] moved.
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// The [`Piece`] captured, if any.
    #[inline]
    pub fn capture(&self) -> Option<Piece> {
        self.capture
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl Drop for Trial<'_> {
    #[inline]
    fn drop(&mut self) {
        match self.capture {
            Some(p) => self.board.put(self.m.whither(), p),
            None => self.board.take(self.m.whither()),
        };

        self.board.put(self.m.whence(), self.piece);
    }
}
