//! Owned XML element tree used to read OSM documents and patch osmChange
//! payloads.
//!
//! Parsing and writing go through `quick-xml`; the tree itself is a plain
//! value that can be queried and edited in place.
//!
//! # Key Types
//!
//! - [`Element`] / [`XmlNode`] -- The document tree
//! - [`XmlCodec`] -- Parse text into a tree, serialize a subtree back to text
//! - [`strip_blank_lines`] -- Payload normalization for serialized fragments

pub mod codec;
pub mod element;
pub mod error;

pub use codec::{strip_blank_lines, XmlCodec};
pub use element::{Element, XmlNode};
pub use error::{XmlError, XmlResult};
