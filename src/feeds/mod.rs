//! Feed access: wire types and the HTTP fetch client.
//!
//! This module is the only place that performs I/O against the two public
//! charging feeds.

pub mod client;
pub mod documents;

pub use client::{FeedClient, FeedOutcome, FetchError};
pub use documents::{EvseDataDocument, EvseStatusDocument};
