use crate::chess::{Board, Color, Piece, Role};
use derive_more::{Display, Error, From};
use proptest::array::{uniform2, uniform6};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// The pieces each side brings to the board before the game starts.
///
/// Counts are kept per [`Color`] and [`Role`], alongside a per-role flag marking pieces
/// that stick where they land.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Arbitrary, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Roster {
    #[strategy(uniform2(uniform6(0u8..=2)))]
    counts: [[u8; 6]; 2],
    sticky: [bool; 6],
}

/// The reason why a [`Roster`] could not be changed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum RosterError {
    #[display(fmt = "{_0} already has {} pieces", "Roster::MAX")]
    Full(#[error(not(source))] Color),
    #[display(fmt = "there are no `{_0}` pieces left to remove")]
    Empty(#[error(not(source))] Piece),
}

impl Roster {
    /// The maximum number of pieces per [`Color`].
    pub const MAX: usize = 16;

    /// An empty roster.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the pieces on a [`Board`].
    ///
    /// The result may exceed [`Roster::MAX`] for arbitrary boards.
    pub fn of(board: &Board) -> Self {
        let mut roster = Roster::new();
        for (p, _) in board.iter() {
            roster.counts[p.color() as usize][p.role() as usize] += 1;
        }

        roster
    }

    /// How many of a [`Piece`] are listed.
    #[inline]
    pub fn count(&self, p: Piece) -> u8 {
        self.counts[p.color() as usize][p.role() as usize]
    }

    /// How many pieces of a [`Color`] are listed.
    #[inline]
    pub fn total(&self, c: Color) -> usize {
        self.counts[c as usize].iter().map(|&n| n as usize).sum()
    }

    /// Whether there is still room for another piece of a [`Color`].
    #[inline]
    pub fn is_within(&self, c: Color) -> bool {
        self.total(c) < Self::MAX
    }

    /// Adds one [`Piece`], returning the new count.
    pub fn increase(&mut self, p: Piece) -> Result<u8, RosterError> {
        if !self.is_within(p.color()) {
            return Err(RosterError::Full(p.color()));
        }

        let n = &mut self.counts[p.color() as usize][p.role() as usize];
        *n += 1;
        Ok(*n)
    }

    /// Removes one [`Piece`], returning the new count.
    pub fn decrease(&mut self, p: Piece) -> Result<u8, RosterError> {
        let n = &mut self.counts[p.color() as usize][p.role() as usize];
        *n = n.checked_sub(1).ok_or(RosterError::Empty(p))?;
        Ok(*n)
    }

    /// Whether pieces of a [`Role`] stick where they land.
    #[inline]
    pub fn is_sticky(&self, r: Role) -> bool {
        self.sticky[r as usize]
    }

    /// Marks pieces of a [`Role`] as sticky or not.
    #[inline]
    pub fn set_sticky(&mut self, r: Role, sticky: bool) {
        self.sticky[r as usize] = sticky;
    }

    /// The pieces of a [`Color`] in launch order, pawns first.
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = Piece> + '_ {
        Role::iter().flat_map(move |r| {
            let p = Piece(c, r);
            std::iter::repeat(p).take(self.count(p).into())
        })
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ron = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&ron)
    }
}

/// The reason why parsing [`Roster`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse roster")]
pub struct ParseRosterError(ron::de::SpannedError);

impl FromStr for Roster {
    type Err = ParseRosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
