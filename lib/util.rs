mod binary;

pub use binary::*;
