//! osmChange generation for a way.
//!
//! [`Way::osm_change_xml`] writes the base change document (attributes,
//! tags and the node list as loaded); [`Way::build_change_fragment`] then
//! rewrites the `<nd>` children of that document's way so it reflects the
//! node edits made in memory.

use osm_types::NodeRef;
use osm_xml::{strip_blank_lines, Element, XmlCodec};
use tracing::debug;

use crate::config::ChangeConfig;
use crate::error::{DiffError, DiffResult};
use crate::way::{node_elements, Way};

impl Way {
    /// Build the base osmChange document for this way's pending action.
    ///
    /// The `<way>` carries the loaded attributes with `changeset` replaced,
    /// the loaded `<nd>` list and the current tags. Node edits are applied
    /// separately by [`Way::build_change_fragment`].
    pub fn osm_change_xml(&self, changeset: u64, config: &ChangeConfig) -> DiffResult<String> {
        let section = self.action().section().ok_or(DiffError::Unmodified)?;

        let mut way = Element::new("way");
        way.attributes = self.element().attributes.clone();
        way.set_attr("changeset", changeset.to_string());
        for nd in node_elements(self.element()) {
            way.push_child(nd.clone());
        }
        for (key, value) in self.tags() {
            way.push_child(
                Element::new("tag")
                    .with_attr("k", key.as_str())
                    .with_attr("v", value.as_str()),
            );
        }

        let mut body = Element::new(section);
        body.push_child(way);
        let mut root = Element::new("osmChange")
            .with_attr("version", config.version.as_str())
            .with_attr("generator", config.generator.as_str());
        root.push_child(body);

        Ok(XmlCodec::write_document(&root, Some(config.indent))?)
    }

    /// Patch a change document with this way's node edits, using the
    /// default [`ChangeConfig`].
    pub fn build_change_fragment(&self, change_xml: &str) -> DiffResult<String> {
        self.build_change_fragment_with(change_xml, &ChangeConfig::default())
    }

    /// Patch a change document with this way's node edits.
    ///
    /// Returns `change_xml` untouched if the node list was never edited.
    /// Otherwise the `<nd>` children of the way under the pending-action
    /// section are matched in order against the loaded nodes still in the
    /// way: each `<nd>` is kept only if it is the next expected ref, so a
    /// removed occurrence is dropped from the front as [`Way::remove_node`]
    /// does. One `<nd>` is then appended per added node, which makes the
    /// fragment's node list equal [`Way::nodes`]. The patched way is
    /// returned on its own as the fragment.
    pub fn build_change_fragment_with(
        &self,
        change_xml: &str,
        config: &ChangeConfig,
    ) -> DiffResult<String> {
        if !self.nodes_dirty() {
            return Ok(change_xml.to_string());
        }
        let section = self.action().section().ok_or(DiffError::Unmodified)?;

        let mut doc = XmlCodec::parse(change_xml)?;
        let way = find_way_mut(&mut doc, section, self.id()).ok_or_else(|| {
            DiffError::WayNotFound {
                section: section.to_string(),
            }
        })?;

        let mut expected = self.retained_nodes().iter().peekable();
        let removed = way.retain_child_elements(|child| {
            if child.name != "nd" {
                return true;
            }
            let id = child.attr("ref").and_then(|r| r.parse::<NodeRef>().ok());
            match (id, expected.peek()) {
                (Some(id), Some(&&next)) if id == next => {
                    expected.next();
                    true
                }
                _ => false,
            }
        });
        for id in self.added_nodes() {
            way.push_child(Element::new("nd").with_attr("ref", id.to_string()));
        }
        debug!(
            way = ?self.id(),
            section,
            removed,
            added = self.added_nodes().len(),
            "patched change fragment"
        );

        let fragment = XmlCodec::write(way, Some(config.indent))?;
        if config.strip_blank_lines {
            Ok(strip_blank_lines(&fragment))
        } else {
            Ok(fragment)
        }
    }

    /// Base change document and node patch in one step.
    pub fn change_fragment(&self, changeset: u64, config: &ChangeConfig) -> DiffResult<String> {
        let base = self.osm_change_xml(changeset, config)?;
        self.build_change_fragment_with(&base, config)
    }
}

/// The `<way>` under `section`, preferring the one whose id matches.
fn find_way_mut<'a>(
    doc: &'a mut Element,
    section: &str,
    id: Option<i64>,
) -> Option<&'a mut Element> {
    let mut candidates: Vec<&'a mut Element> = if doc.name == section {
        doc.child_elements_mut().filter(|e| e.name == "way").collect()
    } else {
        doc.child_elements_mut()
            .filter(|e| e.name == section)
            .flat_map(|s| s.child_elements_mut().filter(|e| e.name == "way"))
            .collect()
    };
    let id = id.map(|id| id.to_string());
    let pos = candidates
        .iter()
        .position(|w| id.is_some() && w.attr("id") == id.as_deref())
        .unwrap_or(0);
    if pos < candidates.len() {
        Some(candidates.swap_remove(pos))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use osm_types::Action;
    use osm_xml::XmlCodec;
    use proptest::prelude::*;

    fn building_change() -> String {
        let mut way = Way::from_xml(WAY_BUILDING).unwrap();
        way.set_tag("building", "house");
        way.osm_change_xml(7, &ChangeConfig::default()).unwrap()
    }

    fn way_with_nodes(ids: &[i64]) -> Way {
        let mut element = Element::new("way").with_attr("id", "1");
        for id in ids {
            element.push_child(Element::new("nd").with_attr("ref", id.to_string()));
        }
        Way::new(element)
    }

    fn nd_refs(fragment: &str) -> Vec<String> {
        XmlCodec::parse(fragment)
            .unwrap()
            .children_named("nd")
            .filter_map(|nd| nd.attr("ref").map(str::to_owned))
            .collect()
    }

    #[test]
    fn unedited_way_returns_input_unchanged() {
        let way = Way::from_xml(WAY_SERVICE).unwrap();
        assert_eq!(way.build_change_fragment(CHANGE_SERVICE).unwrap(), CHANGE_SERVICE);
        assert_eq!(way.build_change_fragment("not even xml").unwrap(), "not even xml");
    }

    #[test]
    fn tag_only_edit_returns_input_unchanged() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.set_tag("surface", "asphalt");
        assert_eq!(way.build_change_fragment(CHANGE_SERVICE).unwrap(), CHANGE_SERVICE);
    }

    #[test]
    fn added_node_is_appended() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.add_node(999i64);
        let fragment = way.build_change_fragment(CHANGE_SERVICE).unwrap();

        assert_eq!(way.action(), Action::Modify);
        assert!(fragment.starts_with("<way "));
        assert!(fragment.contains(r#"<nd ref="999"/>"#));
        assert!(!fragment.contains("osmChange"));
        assert!(!fragment.contains("<modify"));
        assert_eq!(nd_refs(&fragment), vec!["283393706", "283393707", "999"]);
    }

    #[test]
    fn removed_node_is_dropped() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.remove_node(283393706i64).unwrap();
        let fragment = way.build_change_fragment(CHANGE_SERVICE).unwrap();

        assert!(!fragment.contains(r#"<nd ref="283393706"/>"#));
        assert!(fragment.contains(r#"<nd ref="283393707"/>"#));
        assert!(fragment.contains(r#"<tag k="highway" v="service"/>"#));
    }

    #[test]
    fn fragment_has_no_blank_lines() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.add_node(999i64);
        let fragment = way.build_change_fragment(CHANGE_SERVICE).unwrap();
        assert!(fragment.lines().all(|l| !l.trim().is_empty()));
    }

    #[test]
    fn compact_fragment_is_single_line() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.remove_node(283393707i64).unwrap();
        let fragment = way
            .build_change_fragment_with(CHANGE_SERVICE, &ChangeConfig::compact())
            .unwrap();
        assert_eq!(fragment.lines().count(), 1);
        assert_eq!(nd_refs(&fragment), vec!["283393706"]);
    }

    #[test]
    fn missing_way_in_section_is_an_error() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.add_node(999i64);
        let change = r#"<osmChange version="0.6"><create><way id="25978036"/></create></osmChange>"#;
        let err = way.build_change_fragment(change).unwrap_err();
        assert!(matches!(err, DiffError::WayNotFound { ref section } if section == "modify"));
    }

    #[test]
    fn malformed_change_document_is_an_error() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.add_node(999i64);
        let err = way.build_change_fragment("<osmChange><modify>").unwrap_err();
        assert!(matches!(err, DiffError::Xml(_)));
    }

    #[test]
    fn matching_way_id_is_preferred() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.add_node(999i64);
        let change = r#"<osmChange version="0.6"><modify>
            <way id="1"><nd ref="5"/></way>
            <way id="25978036"><nd ref="283393706"/><nd ref="283393707"/></way>
        </modify></osmChange>"#;
        let fragment = way.build_change_fragment(change).unwrap();
        assert!(fragment.starts_with(r#"<way id="25978036""#));
        assert_eq!(nd_refs(&fragment), vec!["283393706", "283393707", "999"]);
    }

    #[test]
    fn first_way_used_without_id_match() {
        let mut way = Way::from_xml(r#"<way><nd ref="1"/><nd ref="2"/></way>"#).unwrap();
        way.remove_node(1i64).unwrap();
        let change = r#"<osmChange><modify><way id="8"><nd ref="1"/><nd ref="2"/></way><way id="9"/></modify></osmChange>"#;
        let fragment = way.build_change_fragment(change).unwrap();
        assert!(fragment.starts_with(r#"<way id="8""#));
        assert_eq!(nd_refs(&fragment), vec!["2"]);
    }

    #[test]
    fn removing_closing_node_drops_first_occurrence() {
        let mut way = Way::from_xml(WAY_BUILDING).unwrap();
        way.remove_node(188754561i64).unwrap();
        let fragment = way.build_change_fragment(&building_change()).unwrap();

        assert_eq!(nd_refs(&fragment), vec!["188754562", "188754563", "188754561"]);
        assert!(!way.is_closed());
    }

    #[test]
    fn readding_removed_node_moves_it_to_the_end() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.remove_node(283393706i64).unwrap().add_node(283393706i64);
        let fragment = way.build_change_fragment(CHANGE_SERVICE).unwrap();

        assert_eq!(nd_refs(&fragment), vec!["283393707", "283393706"]);
    }

    #[test]
    fn base_document_requires_pending_action() {
        let way = Way::from_xml(WAY_SERVICE).unwrap();
        let err = way.osm_change_xml(42, &ChangeConfig::default()).unwrap_err();
        assert!(matches!(err, DiffError::Unmodified));
    }

    #[test]
    fn base_document_carries_changeset_and_tags() {
        let mut way = Way::from_xml(WAY_SERVICE).unwrap();
        way.set_tag("surface", "gravel");
        let xml = way.osm_change_xml(42, &ChangeConfig::default()).unwrap();

        let doc = XmlCodec::parse(&xml).unwrap();
        assert_eq!(doc.name, "osmChange");
        assert_eq!(doc.attr("version"), Some("0.6"));
        let modify = doc.children_named("modify").next().unwrap();
        let way_el = modify.children_named("way").next().unwrap();
        assert_eq!(way_el.attr("id"), Some("25978036"));
        assert_eq!(way_el.attr("changeset"), Some("42"));
        assert_eq!(way_el.attr("version"), Some("1"));
        assert_eq!(way_el.children_named("nd").count(), 2);
        let tags: Vec<_> = way_el
            .children_named("tag")
            .map(|t| (t.attr("k").unwrap(), t.attr("v").unwrap()))
            .collect();
        assert_eq!(tags, vec![("highway", "service"), ("surface", "gravel")]);
    }

    #[test]
    fn change_fragment_end_to_end() {
        let mut way = Way::from_xml(WAY_BUILDING).unwrap();
        way.remove_node(188754562i64).unwrap().add_node(188754599i64);
        let fragment = way.change_fragment(7, &ChangeConfig::default()).unwrap();

        let el = XmlCodec::parse(&fragment).unwrap();
        assert_eq!(el.name, "way");
        assert_eq!(el.attr("changeset"), Some("7"));
        assert_eq!(
            nd_refs(&fragment),
            vec!["188754561", "188754563", "188754561", "188754599"]
        );
        assert_eq!(el.children_named("tag").count(), 3);
    }

    #[derive(Clone, Debug)]
    enum Edit {
        Add(i64),
        Remove(i64),
    }

    fn edit() -> impl Strategy<Value = Edit> {
        prop_oneof![(0i64..8).prop_map(Edit::Add), (0i64..8).prop_map(Edit::Remove)]
    }

    proptest! {
        #[test]
        fn fragment_matches_node_list(
            base in proptest::collection::vec(0i64..8, 1..8),
            edits in proptest::collection::vec(edit(), 1..10),
        ) {
            let mut way = way_with_nodes(&base);
            for e in &edits {
                match *e {
                    Edit::Add(id) => { way.add_node(id); }
                    Edit::Remove(id) => { way.remove_node_id(NodeRef::new(id)); }
                }
            }
            prop_assume!(way.nodes_dirty());

            let change = way.osm_change_xml(1, &ChangeConfig::compact()).unwrap();
            let fragment = way.build_change_fragment(&change).unwrap();
            let expected: Vec<String> = way.nodes().iter().map(|n| n.to_string()).collect();
            prop_assert_eq!(nd_refs(&fragment), expected);
        }
    }
}
