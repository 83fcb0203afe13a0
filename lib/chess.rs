mod board;
mod color;
mod r#move;
mod movegen;
mod piece;
mod promotion;
mod role;
mod rules;
mod square;
mod status;
mod trial;

pub use board::*;
pub use color::*;
pub use piece::*;
pub use promotion::*;
pub use r#move::*;
pub use role::*;
pub use square::*;
pub use status::*;
pub use trial::*;
