// src/types/mod.rs
pub mod claims;
pub mod header;
pub mod output;

pub use claims::Claims;
pub use header::{Header, Segment, ALGORITHM, EXPIRATION_FORMAT, TOKEN_TYPE};
pub use output::Output;
