use crate::chess::{Color, Piece, Role, Square};
use derive_more::{DebugCustom, Display, Error};
use proptest::{collection::hash_map, prelude::*};
use shakmaty as sm;
use std::fmt::{self, Formatter, Write};
use std::ops::Index;
use test_strategy::Arbitrary;

/// The placement of pieces on the board.
///
/// Each [`Square`] holds at most one [`Piece`], an absent piece means an empty square.
/// The board enforces no further invariants on its own, see [`Board::validate`].
#[derive(DebugCustom, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[debug(fmt = "Board({self})")]
pub struct Board(
    #[strategy(hash_map(any::<Square>(), any::<Piece>(), 0..=32).prop_map(|pieces| {
        let mut squares = [None; 64];
        for (s, p) in pieces {
            squares[s.index()] = Some(p);
        }
        squares
    }))]
    [Option<Piece>; 64],
);

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Board([None; 64])
    }
}

impl Board {
    /// An empty board.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard army of each side on its home ranks.
    pub fn standard() -> Self {
        use Role::*;
        let officers = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Board::new();

        for c in Color::iter() {
            let pawns = c.home_rank();
            let back = pawns - c.forward();

            for (file, &r) in (0..8).zip(officers.iter()) {
                for (rank, role) in [(back, r), (pawns, Pawn)] {
                    if let Ok(s) = Square::new(file, rank) {
                        board.put(s, Piece(c, role));
                    }
                }
            }
        }

        board
    }

    /// Places a [`Piece`] on a [`Square`], returning whatever stood there.
    #[inline]
    pub fn put(&mut self, s: Square, p: Piece) -> Option<Piece> {
        self.0[s.index()].replace(p)
    }

    /// Removes the [`Piece`] on a [`Square`], if any.
    #[inline]
    pub fn take(&mut self, s: Square) -> Option<Piece> {
        self.0[s.index()].take()
    }

    /// Removes every piece.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = [None; 64];
    }

    /// The number of pieces on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    /// Whether there are no pieces on the board.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// An iterator over all pieces on the board.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Piece, Square)> + '_ {
        Square::iter().filter_map(|s| Some((self[s]?, s)))
    }

    /// [`Square`]s occupied by a [`Color`].
    #[inline]
    pub fn by_color(&self, c: Color) -> impl DoubleEndedIterator<Item = Square> + '_ {
        self.iter()
            .filter(move |(p, _)| p.color() == c)
            .map(|(_, s)| s)
    }

    /// [`Square`]s occupied by a [`Piece`].
    #[inline]
    pub fn by_piece(&self, p: Piece) -> impl DoubleEndedIterator<Item = Square> + '_ {
        self.iter().filter(move |(q, _)| *q == p).map(|(_, s)| s)
    }

    /// [`Square`] occupied by the king of the given color, if any.
    #[inline]
    pub fn king(&self, side: Color) -> Option<Square> {
        self.by_piece(Piece(side, Role::King)).next()
    }

    /// Checks the invariants the rules rely on.
    ///
    /// Both sides must have exactly one king and no pawn may rest on the first or last rank.
    pub fn validate(&self) -> Result<(), IllegalPosition> {
        for c in Color::iter() {
            match self.by_piece(Piece(c, Role::King)).count() {
                0 => return Err(IllegalPosition::MissingKing(c)),
                1 => {}
                _ => return Err(IllegalPosition::TooManyKings(c)),
            }
        }

        for c in Color::iter() {
            if let Some(s) = self
                .by_piece(Piece(c, Role::Pawn))
                .find(|s| s.rank() == 0 || s.rank() == 7)
            {
                return Err(IllegalPosition::PawnOnBackRank(s));
            }
        }

        Ok(())
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline]
    fn index(&self, s: Square) -> &Self::Output {
        &self.0[s.index()]
    }
}

impl FromIterator<(Square, Piece)> for Board {
    /// Later entries replace earlier ones on the same square.
    fn from_iter<I: IntoIterator<Item = (Square, Piece)>>(pieces: I) -> Self {
        let mut board = Board::new();
        for (s, p) in pieces {
            board.put(s, p);
        }

        board
    }
}

/// Renders the board rank by rank, from the eighth down to the first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, rank) in (0..8).rev().enumerate() {
            if i > 0 {
                f.write_char('/')?;
            }

            for file in 0..8 {
                match Square::new(file, rank).ok().and_then(|s| self[s]) {
                    Some(p) => write!(f, "{p}")?,
                    None => f.write_char('.')?,
                }
            }
        }

        Ok(())
    }
}

#[doc(hidden)]
impl From<&sm::Board> for Board {
    fn from(b: &sm::Board) -> Self {
        b.clone()
            .into_iter()
            .map(|(s, p)| (s.into(), p.into()))
            .collect()
    }
}

/// The reason why a [`Board`] cannot host a game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum IllegalPosition {
    #[display(fmt = "the {_0} side has no king")]
    MissingKing(#[error(not(source))] Color),
    #[display(fmt = "the {_0} side has multiple kings")]
    TooManyKings(#[error(not(source))] Color),
    #[display(fmt = "there is a pawn on the back-rank square `{_0}`")]
    PawnOnBackRank(#[error(not(source))] Square),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn put_places_piece_on_square(mut b: Board, s: Square, p: Piece) {
        let before = b[s];
        assert_eq!(b.put(s, p), before);
        assert_eq!(b[s], Some(p));
    }

    #[proptest]
    fn take_empties_square(mut b: Board, s: Square) {
        let before = b[s];
        assert_eq!(b.take(s), before);
        assert_eq!(b[s], None);
    }

    #[proptest]
    fn clear_removes_every_piece(mut b: Board) {
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b, Board::new());
    }

    #[proptest]
    fn iter_returns_pieces_and_squares(b: Board) {
        for (p, s) in b.iter() {
            assert_eq!(b[s], Some(p));
        }

        assert_eq!(b.iter().count(), b.len());
    }

    #[proptest]
    fn by_color_returns_squares_occupied_by_pieces_of_a_color(b: Board, c: Color) {
        for s in b.by_color(c) {
            assert_eq!(b[s].map(|p| p.color()), Some(c));
        }
    }

    #[proptest]
    fn by_piece_returns_squares_occupied_by_a_piece(b: Board, p: Piece) {
        for s in b.by_piece(p) {
            assert_eq!(b[s], Some(p));
        }
    }

    #[proptest]
    fn king_returns_square_occupied_by_a_king(b: Board, c: Color) {
        match b.king(c) {
            Some(s) => assert_eq!(b[s], Some(Piece(c, Role::King))),
            None => assert_eq!(b.by_piece(Piece(c, Role::King)).count(), 0),
        }
    }

    #[proptest]
    fn collecting_pieces_of_a_board_is_an_identity(b: Board) {
        assert_eq!(b.iter().map(|(p, s)| (s, p)).collect::<Board>(), b);
    }

    #[test]
    fn standard_board_has_thirty_two_pieces() {
        let b = Board::standard();
        assert_eq!(b.len(), 32);
        assert_eq!(b[Square::E1], Some(Piece(Color::White, Role::King)));
        assert_eq!(b[Square::D8], Some(Piece(Color::Black, Role::Queen)));
        assert_eq!(b[Square::A2], Some(Piece(Color::White, Role::Pawn)));
        assert_eq!(b[Square::H7], Some(Piece(Color::Black, Role::Pawn)));
        assert_eq!(b.validate(), Ok(()));
    }

    #[test]
    fn standard_board_is_rendered_rank_by_rank() {
        assert_eq!(
            Board::standard().to_string(),
            "rnbqkbnr/pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn standard_board_matches_shakmaty() {
        assert_eq!(Board::from(&sm::Board::default()), Board::standard());
    }

    #[test]
    fn validate_requires_a_king_per_side() {
        let b: Board = [(Square::E1, Piece(Color::White, Role::King))].into_iter().collect();
        assert_eq!(b.validate(), Err(IllegalPosition::MissingKing(Color::Black)));
    }

    #[test]
    fn validate_rejects_multiple_kings() {
        let b: Board = [
            (Square::E1, Piece(Color::White, Role::King)),
            (Square::E8, Piece(Color::Black, Role::King)),
            (Square::A8, Piece(Color::Black, Role::King)),
        ]
        .into_iter()
        .collect();

        assert_eq!(b.validate(), Err(IllegalPosition::TooManyKings(Color::Black)));
    }

    #[test]
    fn validate_rejects_pawns_on_back_rank() {
        let b: Board = [
            (Square::E1, Piece(Color::White, Role::King)),
            (Square::E8, Piece(Color::Black, Role::King)),
            (Square::C8, Piece(Color::White, Role::Pawn)),
        ]
        .into_iter()
        .collect();

        assert_eq!(b.validate(), Err(IllegalPosition::PawnOnBackRank(Square::C8)));
    }
}
