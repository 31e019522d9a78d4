//! Systems that operate on the scanner state each tick.
//!
//! Systems are plain functions over borrowed state. They do not own state;
//! the engine does.

pub mod blips;
pub mod detection;
pub mod snapshot;
pub mod sweep;
