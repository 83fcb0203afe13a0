use crate::chess::{Move, Promotion, Square, Status};
use crate::game::{GameState, IllegalMove, IllegalPromotion, Layout, Report};
use derive_more::DebugCustom;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::instrument;

/// A thread-safe handle to a [`GameState`].
///
/// Every operation holds the lock for its whole duration, so the validation, application
/// and evaluation of a move are never interleaved with another move on the same game.
#[derive(DebugCustom, Clone)]
#[debug(fmt = "SharedGame")]
pub struct SharedGame(Arc<Mutex<GameState>>);

impl SharedGame {
    /// Shares a [`GameState`].
    #[inline]
    pub fn new(game: GameState) -> Self {
        SharedGame(Arc::new(Mutex::new(game)))
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        // A panic never leaves the GameState half-mutated.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`GameState::play`].
    #[instrument(level = "trace")]
    pub fn play(&self, m: Move) -> Result<Report, IllegalMove> {
        self.lock().play(m)
    }

    /// See [`GameState::promote`].
    #[instrument(level = "trace")]
    pub fn promote(&self, s: Square, p: Promotion) -> Result<Status, IllegalPromotion> {
        self.lock().promote(s, p)
    }

    /// The [`Status`] of the side to move.
    #[inline]
    pub fn status(&self) -> Status {
        self.lock().status()
    }

    /// A copy of the current [`GameState`].
    #[inline]
    pub fn snapshot(&self) -> GameState {
        self.lock().clone()
    }

    /// The current [`Layout`].
    #[inline]
    pub fn layout(&self) -> Layout {
        Layout::from(&*self.lock())
    }
}

impl From<GameState> for SharedGame {
    #[inline]
    fn from(game: GameState) -> Self {
        SharedGame::new(game)
    }
}
