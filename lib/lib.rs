/// Chess domain types and rules.
pub mod chess;
/// Game state, serialization and the setup roster.
pub mod game;
/// Assorted utilities.
pub mod util;
