use crate::chess::{Board, Color, Move, Piece, Role, Square};

impl Board {
    /// Whether every [`Square`] strictly between `whence` and `whither` is empty.
    ///
    /// Both squares must share a file, a rank or a diagonal.
    pub fn is_path_clear(&self, whence: Square, whither: Square) -> bool {
        let (df, dr) = Move(whence, whither).delta();
        let (df, dr) = (df.signum(), dr.signum());

        let mut s = whence;
        while let Some(next) = s.offset(df, dr).filter(|&n| n != whither) {
            if self[next].is_some() {
                return false;
            }

            s = next;
        }

        true
    }

    /// Whether the geometry of a [`Move`] is legal for a [`Piece`], ignoring check.
    ///
    /// The piece is assumed to stand on the move's source square.
    pub fn is_legal(&self, piece: Piece, m: Move) -> bool {
        let target = self[m.whither()];
        if target.is_some_and(|t| t.color() == piece.color()) {
            return false;
        }

        let (df, dr) = m.delta();
        let straight = (df == 0) != (dr == 0);
        let diagonal = df.abs() == dr.abs() && df != 0;

        match piece.role() {
            Role::Pawn => {
                let forward = piece.color().forward();
                match (df.abs(), dr) {
                    (1, dr) if dr == forward => target.is_some(),
                    (0, dr) if dr == forward => target.is_none(),
                    (0, dr) if dr == 2 * forward => {
                        target.is_none()
                            && m.whence().rank() == piece.color().home_rank()
                            && self.is_path_clear(m.whence(), m.whither())
                    }
                    _ => false,
                }
            }

            Role::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
            Role::Bishop => diagonal && self.is_path_clear(m.whence(), m.whither()),
            Role::Rook => straight && self.is_path_clear(m.whence(), m.whither()),
            Role::Queen => (straight || diagonal) && self.is_path_clear(m.whence(), m.whither()),
            Role::King => df.abs().max(dr.abs()) == 1,
        }
    }

    /// Whether any piece of the opponent could move onto the king of `side`.
    ///
    /// A side without a king is never in check.
    pub fn is_check(&self, side: Color) -> bool {
        match self.king(side) {
            None => false,
            Some(king) => self
                .iter()
                .filter(|(p, _)| p.color() != side)
                .any(|(p, s)| self.is_legal(p, Move(s, king))),
        }
    }
}
