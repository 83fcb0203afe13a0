use crate::chess::{Board, Color, Move, Square, Status};

impl Board {
    /// An iterator over the legal [`Move`]s of a side.
    ///
    /// Candidates are tried on a scratch copy of this board and those that leave the
    /// king of `side` in check are discarded.
    pub fn moves(&self, side: Color) -> impl Iterator<Item = Move> + '_ {
        let mut scratch = self.clone();

        self.iter()
            .filter(move |(p, _)| p.color() == side)
            .flat_map(|(p, whence)| Square::iter().map(move |whither| (p, Move(whence, whither))))
            .filter(move |&(p, m)| self.is_legal(p, m))
            .filter_map(move |(_, m)| match scratch.trial(m) {
                Some(t) if !t.is_check(side) => Some(m),
                _ => None,
            })
    }

    /// The [`Status`] of a side.
    #[inline]
    pub fn status(&self, side: Color) -> Status {
        Status::new(self.is_check(side), self.moves(side).next().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Piece, Role};
    use proptest::{prelude::*, sample::Selector};
    use shakmaty as sm;
    use std::collections::HashSet;
    use test_strategy::proptest;
    use Color::*;
    use Role::*;
    use Square::*;

    fn played() -> impl Strategy<Value = sm::Chess> {
        (0..128usize, any::<Selector>()).prop_map(|(n, selector)| {
            let mut chess = sm::Chess::default();
            for _ in 0..n {
                match selector.try_select(sm::Position::legal_moves(&chess)) {
                    Some(m) => sm::Position::play_unchecked(&mut chess, &m),
                    _ => break,
                }
            }

            chess
        })
    }

    #[proptest]
    fn generating_moves_leaves_the_board_unchanged(b: Board, c: Color) {
        let before = b.clone();
        assert_eq!(b.moves(c).count(), b.moves(c).count());
        assert_eq!(b, before);
    }

    #[proptest]
    fn generated_moves_are_geometrically_legal(b: Board, c: Color) {
        for m in b.moves(c) {
            let p = b[m.whence()].expect("expected a piece on the source square");
            assert_eq!(p.color(), c);
            assert!(b.is_legal(p, m));
        }
    }

    #[proptest]
    fn generated_moves_never_leave_own_king_in_check(b: Board, c: Color) {
        for m in b.moves(c) {
            let mut next = b.clone();
            let p = next.take(m.whence()).expect("expected a piece on the source square");
            next.put(m.whither(), p);
            assert!(!next.is_check(c));
        }
    }

    #[proptest]
    fn generated_moves_are_all_moves_that_do_not_leave_king_in_check(b: Board, c: Color) {
        let moves: HashSet<_> = b.moves(c).collect();

        for (p, whence) in b.iter().filter(|(p, _)| p.color() == c) {
            for whither in Square::iter() {
                let m = Move(whence, whither);
                let mut next = b.clone();
                next.take(whence);
                next.put(whither, p);

                let expected = b.is_legal(p, m) && !next.is_check(c);
                assert_eq!(moves.contains(&m), expected);
            }
        }
    }

    #[proptest]
    fn status_is_consistent_with_generated_moves(b: Board, c: Color) {
        match b.status(c) {
            Status::Checkmate | Status::Draw => assert_eq!(b.moves(c).next(), None),
            Status::Check | Status::Normal => assert_ne!(b.moves(c).next(), None),
        }
    }

    #[proptest]
    fn check_agrees_with_standard_chess(#[strategy(played())] chess: sm::Chess) {
        let b = Board::from(sm::Position::board(&chess));
        let side = Color::from(sm::Position::turn(&chess));
        assert_eq!(b.is_check(side), sm::Position::is_check(&chess));
        assert!(!b.is_check(!side));
    }

    #[proptest]
    fn moves_agree_with_standard_chess_without_castling_and_en_passant(
        #[strategy(played())] chess: sm::Chess,
    ) {
        let b = Board::from(sm::Position::board(&chess));
        let side = Color::from(sm::Position::turn(&chess));

        let expected: HashSet<_> = sm::Position::legal_moves(&chess)
            .into_iter()
            .filter(|m| !m.is_castle() && !m.is_en_passant())
            .filter_map(|m| Some(Move(m.from()?.into(), m.to().into())))
            .collect();

        assert_eq!(b.moves(side).collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn standard_board_has_twenty_moves_per_side() {
        let b = Board::standard();
        assert_eq!(b.moves(White).count(), 20);
        assert_eq!(b.moves(Black).count(), 20);
        assert_eq!(b.status(White), Status::Normal);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let b: Board = [
            (E1, Piece(White, King)),
            (E2, Piece(White, Rook)),
            (E8, Piece(Black, Rook)),
            (A8, Piece(Black, King)),
        ]
        .into_iter()
        .collect();

        let rook: HashSet<_> = b.moves(White).filter(|m| m.whence() == E2).collect();
        assert!(rook.iter().all(|m| m.whither().file() == 4));
        assert!(rook.contains(&Move(E2, E8)));
        assert!(!rook.contains(&Move(E2, D2)));
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut b = Board::standard();
        for m in [Move(F2, F3), Move(E7, E5), Move(G2, G4), Move(D8, H4)] {
            let p = b.take(m.whence()).expect("expected a piece on the source square");
            b.put(m.whither(), p);
        }

        assert!(b.is_check(White));
        assert_eq!(b.moves(White).next(), None);
        assert_eq!(b.status(White), Status::Checkmate);
        assert_eq!(b.status(Black), Status::Normal);
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        let b: Board = [
            (G1, Piece(White, King)),
            (F2, Piece(White, Pawn)),
            (G2, Piece(White, Pawn)),
            (H2, Piece(White, Pawn)),
            (D1, Piece(Black, Rook)),
            (G8, Piece(Black, King)),
        ]
        .into_iter()
        .collect();

        assert_eq!(b.status(White), Status::Checkmate);
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        let b: Board = [
            (A8, Piece(Black, King)),
            (B6, Piece(White, Queen)),
            (H1, Piece(White, King)),
        ]
        .into_iter()
        .collect();

        assert!(!b.is_check(Black));
        assert_eq!(b.status(Black), Status::Draw);
    }

    #[test]
    fn king_in_check_with_escape_is_check() {
        let b: Board = [
            (E1, Piece(White, King)),
            (E8, Piece(Black, Rook)),
            (A8, Piece(Black, King)),
        ]
        .into_iter()
        .collect();

        assert_eq!(b.status(White), Status::Check);
    }
}
