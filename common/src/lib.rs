//! ratepath Common Types
//!
//! Shared value types used across the ratepath workspace: currency codes,
//! directed exchange edges, conversion steps, and cache timing constants.

pub mod monetary;
pub mod error;
pub mod time;

pub use monetary::*;
pub use error::*;
pub use time::*;
