mod layout;
mod roster;
mod shared;
mod state;

pub use layout::*;
pub use roster::*;
pub use shared::*;
pub use state::*;
