use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::tags::Tags;

/// Identifier of a node referenced from a way's `<nd ref="..."/>` list.
///
/// OSM ids are signed: negative values are placeholders for nodes that
/// exist only in a pending changeset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(i64);

impl NodeRef {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns `true` for placeholder (not yet uploaded) nodes.
    pub const fn is_placeholder(self) -> bool {
        self.0 < 0
    }
}

impl From<i64> for NodeRef {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<&Node> for NodeRef {
    fn from(node: &Node) -> Self {
        node.id
    }
}

impl FromStr for NodeRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidNodeRef(s.to_string()))
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", self.0)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can name the node it stands for.
pub trait HasNodeId {
    fn node_id(&self) -> NodeRef;
}

impl HasNodeId for NodeRef {
    fn node_id(&self) -> NodeRef {
        *self
    }
}

/// A map node: a point with its own tags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeRef,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: Tags,
}

impl Node {
    pub fn new(id: impl Into<NodeRef>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
            tags: Tags::new(),
        }
    }
}

impl HasNodeId for Node {
    fn node_id(&self) -> NodeRef {
        self.id
    }
}
