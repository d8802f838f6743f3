//! Data models for the gift registry.
//!
//! Wire names are camelCase to match the snapshot document format and the
//! browser frontend.

mod filter;
mod gift;
mod snapshot;

pub use filter::*;
pub use gift::*;
pub use snapshot::*;
