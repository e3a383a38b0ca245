use std::collections::BTreeMap;

/// Key/value tags attached to an OSM element.
pub type Tags = BTreeMap<String, String>;
