use crate::chess::{Board, Color, IllegalPosition, Move, Piece, Promotion, Role, Square, Status};
use derive_more::{Display, Error, From};
use proptest::{collection::vec, prelude::*, sample::Selector};
use tracing::{debug, info, instrument};

/// Represents an attempt to move from an empty [`Square`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "there is no piece on square `{_0}`")]
pub struct EmptySquare(#[error(not(source))] pub Square);

/// The reason why a [`Move`] was rejected.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
pub enum IllegalMove {
    #[display(fmt = "{_0}")]
    Vacant(#[error(not(source))] EmptySquare),
    #[from(ignore)]
    #[display(fmt = "move `{_0}` is out of turn")]
    OutOfTurn(#[error(not(source))] Move),
    #[from(ignore)]
    #[display(fmt = "move `{_0}` is illegal for the piece on `{}`", "_0.whence()")]
    Geometry(#[error(not(source))] Move),
    #[from(ignore)]
    #[display(fmt = "move `{_0}` leaves the king in check")]
    SelfCheck(#[error(not(source))] Move),
}

/// Represents a [`Promotion`] requested on a [`Square`] without a pawn on its last rank.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "there is no pawn to promote on square `{_0}`")]
pub struct IllegalPromotion(#[error(not(source))] pub Square);

/// The outcome of a [`Move`] played through [`GameState::play`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Report {
    capture: Option<Piece>,
    promotion: Option<Square>,
    status: Status,
}

impl Report {
    /// The [`Piece`] captured, if any.
    #[inline]
    pub fn capture(&self) -> Option<Piece> {
        self.capture
    }

    /// The [`Square`] of a pawn awaiting [`GameState::promote`], if any.
    #[inline]
    pub fn promotion(&self) -> Option<Square> {
        self.promotion
    }

    /// The [`Status`] of the side to move next.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }
}

/// The state of a game: the [`Board`], the side to move and the pieces captured so far.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct GameState {
    board: Board,
    turn: Color,
    captured_white: Vec<Piece>,
    captured_black: Vec<Piece>,
}

impl Default for GameState {
    #[inline]
    fn default() -> Self {
        GameState::from(Board::default())
    }
}

impl From<Board> for GameState {
    /// White moves first, nothing has been captured.
    #[inline]
    fn from(board: Board) -> Self {
        GameState {
            board,
            turn: Color::White,
            captured_white: Vec::new(),
            captured_black: Vec::new(),
        }
    }
}

impl GameState {
    /// An empty board with white to move.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a game state from its parts.
    #[inline]
    pub fn with(
        board: Board,
        turn: Color,
        captured_white: Vec<Piece>,
        captured_black: Vec<Piece>,
    ) -> Self {
        GameState {
            board,
            turn,
            captured_white,
            captured_black,
        }
    }

    /// The current [`Board`].
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The pieces of a [`Color`] captured so far, oldest first.
    #[inline]
    pub fn captured(&self, c: Color) -> &[Piece] {
        match c {
            Color::White => &self.captured_white,
            Color::Black => &self.captured_black,
        }
    }

    /// Places a [`Piece`] on a [`Square`] regardless of the rules.
    ///
    /// Returns whatever stood there, which is *not* recorded as captured.
    #[inline]
    pub fn set_piece(&mut self, s: Square, p: Piece) -> Option<Piece> {
        self.board.put(s, p)
    }

    /// Removes the [`Piece`] on a [`Square`] regardless of the rules.
    #[inline]
    pub fn remove_piece(&mut self, s: Square) -> Option<Piece> {
        self.board.take(s)
    }

    /// Empties the board and capture lists and hands the turn to white.
    pub fn clear(&mut self) {
        self.board.clear();
        self.captured_white.clear();
        self.captured_black.clear();
        self.turn = Color::White;
    }

    /// Checks the invariants the rules rely on, see [`Board::validate`].
    #[inline]
    pub fn validate(&self) -> Result<(), IllegalPosition> {
        self.board.validate()
    }

    /// Unconditionally moves whatever stands on the source square and passes the turn.
    ///
    /// Any piece on the destination square is captured and recorded by its own color.
    /// Nothing changes if the source square is empty.
    pub fn apply(&mut self, m: Move) -> Result<Option<Piece>, EmptySquare> {
        let Some(piece) = self.board.take(m.whence()) else {
            debug!(%m, "no piece to move");
            return Err(EmptySquare(m.whence()));
        };

        let capture = self.board.put(m.whither(), piece);

        match capture {
            Some(p @ Piece(Color::White, _)) => self.captured_white.push(p),
            Some(p @ Piece(Color::Black, _)) => self.captured_black.push(p),
            None => {}
        }

        self.turn = !self.turn;
        Ok(capture)
    }

    /// The [`Status`] of a side in the current position.
    #[inline]
    pub fn evaluate(&self, side: Color) -> Status {
        self.board.status(side)
    }

    /// The [`Status`] of the side to move.
    #[inline]
    pub fn status(&self) -> Status {
        self.evaluate(self.turn)
    }

    /// Plays a [`Move`] if legal in this position.
    ///
    /// The move must be made by the side to move, follow the movement rules of the piece
    /// and not leave its own king in check, otherwise nothing changes.
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn), err(level = "debug"))]
    pub fn play(&mut self, m: Move) -> Result<Report, IllegalMove> {
        let piece = self.board[m.whence()].ok_or(EmptySquare(m.whence()))?;

        if piece.color() != self.turn {
            return Err(IllegalMove::OutOfTurn(m));
        } else if !self.board.is_legal(piece, m) {
            return Err(IllegalMove::Geometry(m));
        } else if self.board.trial(m).is_some_and(|t| t.is_check(piece.color())) {
            return Err(IllegalMove::SelfCheck(m));
        }

        let capture = self.apply(m)?;

        let promotion = match piece {
            Piece(c, Role::Pawn) if m.whither().rank() == c.last_rank() => Some(m.whither()),
            _ => None,
        };

        let status = self.status();
        info!(%m, side = %self.turn, %status, "move played");

        Ok(Report {
            capture,
            promotion,
            status,
        })
    }

    /// Substitutes a pawn that reached its last rank and re-evaluates the side to move.
    #[instrument(level = "debug", skip(self), err(level = "debug"))]
    pub fn promote(&mut self, s: Square, p: Promotion) -> Result<Status, IllegalPromotion> {
        match self.board[s] {
            Some(Piece(c, Role::Pawn)) if s.rank() == c.last_rank() => {
                self.board.put(s, Piece(c, p.into()));
                let status = self.status();
                info!(square = %s, side = %self.turn, %status, "pawn promoted");
                Ok(status)
            }

            _ => Err(IllegalPromotion(s)),
        }
    }
}

impl Arbitrary for GameState {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    /// Either a game played at random from the standard board or an arbitrary arrangement.
    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let played = (0..64usize, any::<Selector>()).prop_map(|(n, selector)| {
            let mut game = GameState::from(Board::standard());
            for _ in 0..n {
                let Some(m) = selector.try_select(game.board.moves(game.turn)) else {
                    break;
                };

                let _ = game.apply(m);
            }

            game
        });

        let arranged = (
            any::<Board>(),
            any::<Color>(),
            vec(any::<Piece>(), 0..16),
            vec(any::<Piece>(), 0..16),
        )
            .prop_map(|(b, c, w, k)| GameState::with(b, c, w, k));

        prop_oneof![played, arranged].boxed()
    }
}
