//! Way editing for the OpenStreetMap API.
//!
//! Tracks a way's node list against the version it was loaded from and
//! patches osmChange documents so they carry only the net node additions and
//! removals.
//!
//! # Key Types
//!
//! - [`Way`] -- Node-list state, topology checks, tag edits and address lookup
//! - [`NodeArg`] -- Identifier-or-node argument accepted by [`Way::remove_node`]
//! - [`WayAttributes`] -- Metadata attributes of the backing `<way>` element
//! - [`ChangeConfig`] -- Output settings for change documents and fragments
//! - [`DiffError`] / [`DiffResult`] -- Error handling

pub mod change;
pub mod config;
pub mod error;
pub mod way;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::ChangeConfig;
pub use error::{DiffError, DiffResult};
pub use way::{NodeArg, Way, WayAttributes};
