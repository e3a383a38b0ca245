//! Address details carried by `addr*` tags on buildings and areas.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tags::Tags;

/// Address fields gathered from an element's tags.
///
/// Keys are rewritten with `:` replaced by `_`, so `addr:street` becomes
/// `addr_street`. The five common fields are always present in the
/// serialized form (as `null` when unset); any other `addr*` key lands in
/// [`Address::other`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "addr_housename")]
    pub housename: Option<String>,
    #[serde(rename = "addr_housenumber")]
    pub housenumber: Option<String>,
    #[serde(rename = "addr_street")]
    pub street: Option<String>,
    #[serde(rename = "addr_city")]
    pub city: Option<String>,
    #[serde(rename = "addr_country")]
    pub country: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

impl Address {
    /// Collect address tags, or `None` if no key starts with `addr`.
    pub fn from_tags(tags: &Tags) -> Option<Self> {
        let mut address = Address::default();
        let mut found = false;
        for (key, value) in tags.iter().filter(|(k, _)| k.starts_with("addr")) {
            address.set(&key.replace(':', "_"), value.clone());
            found = true;
        }
        found.then_some(address)
    }

    fn set(&mut self, key: &str, value: String) {
        match key {
            "addr_housename" => self.housename = Some(value),
            "addr_housenumber" => self.housenumber = Some(value),
            "addr_street" => self.street = Some(value),
            "addr_city" => self.city = Some(value),
            "addr_country" => self.country = Some(value),
            _ => {
                self.other.insert(key.to_string(), value);
            }
        }
    }
}
