//! Node-list state for a single OSM way.
//!
//! A [`Way`] wraps the `<way>` element it was loaded from. The node list is
//! read from that element on first access and from then on lives only in
//! memory; additions and removals are tracked so that
//! [`Way::build_change_fragment`] can patch a change document with exactly
//! the net edits.

use std::cell::OnceCell;
use std::str::FromStr;

use osm_types::{Action, Address, HasNodeId, Node, NodeRef, Tags};
use osm_xml::{Element, XmlCodec};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DiffError, DiffResult};

/// Metadata attributes of a `<way>` element.
///
/// Values that are absent or fail to parse are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WayAttributes {
    pub id: Option<i64>,
    pub version: Option<u64>,
    pub changeset: Option<u64>,
    pub user: Option<String>,
    pub uid: Option<u64>,
    pub visible: Option<bool>,
    pub timestamp: Option<String>,
}

impl WayAttributes {
    fn from_element(element: &Element) -> Self {
        Self {
            id: parse_attr(element, "id"),
            version: parse_attr(element, "version"),
            changeset: parse_attr(element, "changeset"),
            user: element.attr("user").map(str::to_owned),
            uid: parse_attr(element, "uid"),
            visible: parse_attr(element, "visible"),
            timestamp: element.attr("timestamp").map(str::to_owned),
        }
    }
}

fn parse_attr<T: FromStr>(element: &Element, key: &str) -> Option<T> {
    element.attr(key).and_then(|v| v.parse().ok())
}

/// Argument accepted by [`Way::remove_node`]: a node id, a node, or an
/// untyped value that must parse as a numeric id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeArg {
    Id(NodeRef),
    Node(NodeRef),
    Raw(String),
}

impl NodeArg {
    /// Reduce the argument to a node id.
    pub fn resolve(self) -> DiffResult<NodeRef> {
        match self {
            NodeArg::Id(id) | NodeArg::Node(id) => Ok(id),
            NodeArg::Raw(raw) => raw.parse().map_err(|_| {
                DiffError::InvalidArgument(format!(
                    "node must be either a Node or a numeric id, got {raw:?}"
                ))
            }),
        }
    }
}

impl From<NodeRef> for NodeArg {
    fn from(id: NodeRef) -> Self {
        NodeArg::Id(id)
    }
}

impl From<i64> for NodeArg {
    fn from(id: i64) -> Self {
        NodeArg::Id(NodeRef::new(id))
    }
}

impl From<&Node> for NodeArg {
    fn from(node: &Node) -> Self {
        NodeArg::Node(node.node_id())
    }
}

impl From<&str> for NodeArg {
    fn from(raw: &str) -> Self {
        NodeArg::Raw(raw.to_string())
    }
}

impl From<String> for NodeArg {
    fn from(raw: String) -> Self {
        NodeArg::Raw(raw)
    }
}

/// An OSM way and its pending edits.
#[derive(Clone, Debug)]
pub struct Way {
    element: Element,
    attributes: WayAttributes,
    tags: Tags,
    nodes: OnceCell<Vec<NodeRef>>,
    added: Vec<NodeRef>,
    nodes_dirty: bool,
    dirty: bool,
    action: Action,
}

impl Way {
    /// Build a way from its `<way>` element.
    pub fn new(element: Element) -> Self {
        let attributes = WayAttributes::from_element(&element);
        let tags = element
            .children_named("tag")
            .filter_map(|tag| Some((tag.attr("k")?.to_owned(), tag.attr("v")?.to_owned())))
            .collect();
        Self {
            element,
            attributes,
            tags,
            nodes: OnceCell::new(),
            added: Vec::new(),
            nodes_dirty: false,
            dirty: false,
            action: Action::Unmodified,
        }
    }

    /// Parse an API response (`<osm><way>..</way></osm>`) or a bare `<way>`
    /// document. The first way in the document is used.
    pub fn from_xml(xml: &str) -> DiffResult<Self> {
        let root = XmlCodec::parse(xml)?;
        let element = if root.name == "way" {
            root
        } else {
            root.descendants("way")
                .into_iter()
                .next()
                .cloned()
                .ok_or(DiffError::MissingWay)?
        };
        Ok(Self::new(element))
    }

    /// The way's id, if the backing element carries one.
    pub fn id(&self) -> Option<i64> {
        self.attributes.id
    }

    pub fn attributes(&self) -> &WayAttributes {
        &self.attributes
    }

    /// The `<way>` element this way was loaded from.
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Set a tag. Marks the way modified unless the value is unchanged.
    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if self.tags.get(&key) != Some(&value) {
            debug!(way = ?self.id(), %key, %value, "set tag");
            self.tags.insert(key, value);
            self.mark_modified();
        }
        self
    }

    /// Remove a tag. A missing key is a no-op.
    pub fn remove_tag(&mut self, key: &str) -> &mut Self {
        if self.tags.remove(key).is_some() {
            debug!(way = ?self.id(), %key, "removed tag");
            self.mark_modified();
        }
        self
    }

    /// The way's node ids in geometry order.
    ///
    /// Read from the backing element on first call and cached.
    pub fn nodes(&self) -> &[NodeRef] {
        self.nodes.get_or_init(|| read_node_refs(&self.element))
    }

    /// Nodes appended since load, in append order.
    pub fn added_nodes(&self) -> &[NodeRef] {
        &self.added
    }

    /// Returns `true` if the first and last node are the same and the way
    /// has more than one node. Empty and single-node ways are open.
    pub fn is_closed(&self) -> bool {
        match self.nodes() {
            [] | [_] => false,
            [first, .., last] => first == last,
        }
    }

    /// Append a node unless it is already part of the way.
    pub fn add_node(&mut self, id: impl Into<NodeRef>) -> &mut Self {
        let id = id.into();
        let appended = self.edit_nodes(|nodes| {
            if nodes.contains(&id) {
                return false;
            }
            nodes.push(id);
            true
        });
        if !appended {
            return self;
        }
        self.added.push(id);
        self.nodes_dirty = true;
        self.mark_modified();
        debug!(way = ?self.id(), node = %id, "added node");
        self
    }

    /// Append the node exposed by `node`.
    pub fn add_node_of<N: HasNodeId + ?Sized>(&mut self, node: &N) -> &mut Self {
        self.add_node(node.node_id())
    }

    /// Remove the first occurrence of a node.
    ///
    /// Fails with [`DiffError::InvalidArgument`] when given a raw value that
    /// is not a numeric id. Removing a node that is not in the way is a
    /// no-op.
    pub fn remove_node(&mut self, node: impl Into<NodeArg>) -> DiffResult<&mut Self> {
        let id = node.into().resolve()?;
        Ok(self.remove_node_id(id))
    }

    /// Remove the node exposed by `node`.
    pub fn remove_node_of<N: HasNodeId + ?Sized>(&mut self, node: &N) -> &mut Self {
        self.remove_node_id(node.node_id())
    }

    /// Remove the first occurrence of `id`.
    pub fn remove_node_id(&mut self, id: NodeRef) -> &mut Self {
        let added_len = self.added.len();
        let removed = self.edit_nodes(|nodes: &mut Vec<NodeRef>| -> Option<Option<usize>> {
            let pos = nodes.iter().position(|n| *n == id)?;
            let tail_start = nodes.len() - added_len;
            nodes.remove(pos);
            Some(pos.checked_sub(tail_start))
        });
        let Some(tail_pos) = removed else {
            return self;
        };
        // A node added and removed again nets out to nothing.
        if let Some(added_pos) = tail_pos {
            self.added.remove(added_pos);
        }
        self.nodes_dirty = true;
        self.mark_modified();
        debug!(way = ?self.id(), node = %id, "removed node");
        self
    }

    /// Returns `true` once the node list has been edited.
    pub fn nodes_dirty(&self) -> bool {
        self.nodes_dirty
    }

    /// Returns `true` once anything about the way has been edited.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The pending change action.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Address details of a closed way.
    ///
    /// `None` for open ways and for ways without any `addr*` tag.
    pub fn address(&self) -> Option<Address> {
        if !self.is_closed() {
            return None;
        }
        Address::from_tags(&self.tags)
    }

    fn mark_modified(&mut self) {
        self.dirty = true;
        self.action = Action::Modify;
    }

    /// The loaded nodes still in the way, in order.
    ///
    /// The node list is always this sequence followed by
    /// [`Way::added_nodes`].
    pub(crate) fn retained_nodes(&self) -> &[NodeRef] {
        let nodes = self.nodes();
        &nodes[..nodes.len() - self.added.len()]
    }

    fn edit_nodes<R>(&mut self, edit: impl FnOnce(&mut Vec<NodeRef>) -> R) -> R {
        let mut nodes = self
            .nodes
            .take()
            .unwrap_or_else(|| read_node_refs(&self.element));
        let result = edit(&mut nodes);
        self.nodes = OnceCell::from(nodes);
        result
    }
}

/// The `<nd>` elements of a way, in document order.
pub(crate) fn node_elements(element: &Element) -> Vec<&Element> {
    element.descendants("nd")
}

fn read_node_refs(element: &Element) -> Vec<NodeRef> {
    let mut refs = Vec::new();
    for nd in node_elements(element) {
        match nd.attr("ref").map(str::parse::<NodeRef>) {
            Some(Ok(id)) => refs.push(id),
            Some(Err(e)) => warn!(error = %e, "skipping malformed node reference"),
            None => warn!("skipping <nd> without ref attribute"),
        }
    }
    refs
}
