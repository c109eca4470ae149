//! Pure merge and aggregation logic.
//!
//! Free functions over the fetched documents; no I/O and no shared state.

pub mod merge;

pub use merge::*;
