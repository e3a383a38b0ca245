//! Way documents shaped like OSM API 0.6 responses.

pub const WAY_SERVICE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="OpenStreetMap server">
  <way id="25978036" visible="true" timestamp="2008-08-20T22:05:03Z" version="1" changeset="2253891" user="AndrewMcCarthy" uid="1379">
    <nd ref="283393706"/>
    <nd ref="283393707"/>
    <tag k="highway" v="service"/>
  </way>
</osm>
"#;

pub const WAY_BUILDING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="OpenStreetMap server">
  <way id="18197393" visible="true" timestamp="2010-05-06T09:16:12Z" version="3" changeset="4542146" user="kenguest" uid="11234">
    <nd ref="188754561"/>
    <nd ref="188754562"/>
    <nd ref="188754563"/>
    <nd ref="188754561"/>
    <tag k="addr:housenumber" v="12"/>
    <tag k="addr:street" v="Main Street"/>
    <tag k="building" v="yes"/>
  </way>
</osm>
"#;

pub const WAY_BUILDING_NO_ADDRESS: &str = r#"<osm version="0.6">
  <way id="18197394" version="1" changeset="1">
    <nd ref="1"/>
    <nd ref="2"/>
    <nd ref="3"/>
    <nd ref="1"/>
    <tag k="building" v="yes"/>
  </way>
</osm>
"#;

pub const WAY_OPEN: &str = r#"<osm version="0.6">
  <way id="23010474" version="2" changeset="1693231">
    <nd ref="247779041"/>
    <nd ref="247779042"/>
    <nd ref="247779043"/>
    <tag k="highway" v="residential"/>
  </way>
</osm>
"#;

pub const WAY_ONE_NODE: &str = r#"<osm version="0.6">
  <way id="23010475" version="1" changeset="1693231">
    <nd ref="247779041"/>
    <tag k="highway" v="residential"/>
  </way>
</osm>
"#;

pub const WAY_EMPTY: &str = r#"<osm version="0.6">
  <way id="23010476" version="1" changeset="1693231"/>
</osm>
"#;

/// Change document as produced for `WAY_SERVICE` by an attribute/tag diff.
pub const CHANGE_SERVICE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osmChange version="0.6" generator="Services_OpenStreetMap">
  <modify>
    <way id="25978036" visible="true" version="1" changeset="42" user="AndrewMcCarthy" uid="1379">

      <nd ref="283393706"/>

      <nd ref="283393707"/>
      <tag k="highway" v="service"/>
    </way>
  </modify>
</osmChange>
"#;
