//! Text-level parsers: the transaction line grammar and the statement period header.

pub mod line;
pub mod period;
