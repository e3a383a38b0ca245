//! Foundation types for OpenStreetMap way editing.
//!
//! This crate provides the small value types shared by the document model,
//! the way diff engine and the command-line tool.
//!
//! # Key Types
//!
//! - [`NodeRef`] -- Signed 64-bit node identifier referenced by a way
//! - [`HasNodeId`] -- Capability for anything exposing a node identifier
//! - [`Node`] -- Minimal node value accepted by way mutations
//! - [`Action`] -- Pending change action (`unmodified`, `create`, `modify`, `delete`)
//! - [`Tags`] -- Ordered key/value tag set
//! - [`Address`] -- Address fields extracted from `addr*` tags

pub mod action;
pub mod address;
pub mod error;
pub mod node;
pub mod tags;

pub use action::Action;
pub use address::Address;
pub use error::TypeError;
pub use node::{HasNodeId, Node, NodeRef};
pub use tags::Tags;
