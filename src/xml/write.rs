use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::writer::Writer;

use crate::data::osm::{Changeset, Member, Meta, OsmId};
use crate::data::{Element, Tags};
use crate::errors::Result;

const ENVELOPE: &str = "osm";
const API_VERSION: &str = "0.6";
const GENERATOR: &str = concat!("osm-edit ", env!("CARGO_PKG_VERSION"));

fn push_meta(start: &mut BytesStart, meta: &Meta) {
    if let Some(version) = meta.version {
        start.push_attribute(("version", version.to_string().as_str()));
    }
    if let Some(changeset) = meta.changeset {
        start.push_attribute(("changeset", changeset.to_string().as_str()));
    }
    if let Some(user) = &meta.user {
        start.push_attribute(("user", user.as_str()));
    }
    if let Some(uid) = meta.uid {
        start.push_attribute(("uid", uid.to_string().as_str()));
    }
    if let Some(visible) = meta.visible {
        start.push_attribute(("visible", if visible { "true" } else { "false" }));
    }
    if let Some(timestamp) = &meta.timestamp {
        start.push_attribute(("timestamp", timestamp.as_str()));
    }
}

fn push_changeset(start: &mut BytesStart, changeset: &Changeset) {
    // Drafts carry nothing but tags; the server fills in the rest.
    if changeset.id.is_none() {
        return;
    }
    start.push_attribute(("open", if changeset.open { "true" } else { "false" }));
    if let Some(user) = &changeset.user {
        start.push_attribute(("user", user.as_str()));
    }
    if let Some(uid) = changeset.uid {
        start.push_attribute(("uid", uid.to_string().as_str()));
    }
    if let Some(created_at) = &changeset.created_at {
        start.push_attribute(("created_at", created_at.as_str()));
    }
    if let Some(closed_at) = &changeset.closed_at {
        start.push_attribute(("closed_at", closed_at.as_str()));
    }
}

fn element_start(element: &Element) -> BytesStart<'static> {
    let mut start = BytesStart::new(element.element_type().as_str());
    if let Some(id) = element.id() {
        start.push_attribute(("id", id.to_string().as_str()));
    }
    match element {
        Element::Node(node) => {
            // Deleted nodes have no coordinates.
            if node.meta.visible != Some(false) {
                start.push_attribute(("lat", node.lat.to_string().as_str()));
                start.push_attribute(("lon", node.lon.to_string().as_str()));
            }
            push_meta(&mut start, &node.meta);
        },
        Element::Way(way) => push_meta(&mut start, &way.meta),
        Element::Relation(relation) => push_meta(&mut start, &relation.meta),
        Element::Changeset(changeset) => push_changeset(&mut start, changeset),
    }
    start
}

fn write_tags(writer: &mut Writer<Vec<u8>>, tags: &Tags) -> Result<()> {
    for (key, value) in tags {
        let tag = BytesStart::new("tag").with_attributes([("k", key.as_str()), ("v", value.as_str())]);
        writer.write_event(Event::Empty(tag))?;
    }
    Ok(())
}

fn write_refs(writer: &mut Writer<Vec<u8>>, refs: &[OsmId]) -> Result<()> {
    for reference in refs {
        let nd = BytesStart::new("nd").with_attributes([("ref", reference.to_string().as_str())]);
        writer.write_event(Event::Empty(nd))?;
    }
    Ok(())
}

fn write_members(writer: &mut Writer<Vec<u8>>, members: &[Member]) -> Result<()> {
    for member in members {
        let reference = member.reference.to_string();
        let el = BytesStart::new("member").with_attributes([
            ("type", member.member_type.as_str()),
            ("ref", reference.as_str()),
            ("role", member.role.as_str()),
        ]);
        writer.write_event(Event::Empty(el))?;
    }
    Ok(())
}

fn has_children(element: &Element) -> bool {
    let nested = match element {
        Element::Way(way) => !way.nodes.is_empty(),
        Element::Relation(relation) => !relation.members.is_empty(),
        Element::Node(_) | Element::Changeset(_) => false,
    };
    nested || !element.tags().is_empty()
}

/// Serializes one element inside an `<osm>` envelope, ready to submit.
/// Drafts are written without an `id` attribute.
pub fn write_element(element: &Element) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let envelope = BytesStart::new(ENVELOPE).with_attributes([("version", API_VERSION), ("generator", GENERATOR)]);
    writer.write_event(Event::Start(envelope))?;

    let start = element_start(element);
    if has_children(element) {
        writer.write_event(Event::Start(start))?;
        match element {
            Element::Way(way) => write_refs(&mut writer, &way.nodes)?,
            Element::Relation(relation) => write_members(&mut writer, &relation.members)?,
            Element::Node(_) | Element::Changeset(_) => (),
        }
        write_tags(&mut writer, element.tags())?;
        writer.write_event(Event::End(BytesEnd::new(element.element_type().as_str())))?;
    } else {
        writer.write_event(Event::Empty(start))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ENVELOPE)))?;
    let bytes = writer.into_inner();
    Ok(String::from_utf8(bytes).map_err(|err| err.utf8_error())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::osm::{Node, Relation, Way};
    use crate::xml::parse_element;

    fn wheelchair_node() -> Node {
        let mut node = Node::new(51.5, -0.25).with_tag("wheelchair", "no");
        node.id = Some(1234);
        node.meta.version = Some(2);
        node.meta.changeset = Some(99);
        node.meta.visible = Some(true);
        node
    }

    #[test]
    fn node_round_trips() {
        let record = write_element(&wheelchair_node().into()).unwrap();
        let parsed = parse_element(&record).unwrap();
        assert_eq!(parsed, Element::Node(wheelchair_node()));
        assert_eq!(write_element(&parsed).unwrap(), record);
    }

    #[test]
    fn record_survives_parse_and_write() {
        let node = r#"<node id="1234" lat="51.5" lon="-0.12" version="2" changeset="10" user="mapper" uid="42" visible="true" timestamp="2024-05-01T12:00:00Z"><tag k="wheelchair" v="no"/></node>"#;
        let record = format!("<osm>{node}</osm>");

        let element = parse_element(&record).unwrap();
        let written = write_element(&element).unwrap();

        assert!(written.contains(node));
        assert_eq!(parse_element(&written).unwrap(), element);
    }

    #[test]
    fn deleted_node_round_trips_without_coordinates() {
        let record = r#"<osm><node id="7" version="4" changeset="12" visible="false"/></osm>"#;

        let element = parse_element(record).unwrap();
        let written = write_element(&element).unwrap();

        assert!(written.contains(r#"<node id="7" version="4" changeset="12" visible="false"/>"#));
        assert!(!written.contains("lat="));
        assert_eq!(parse_element(&written).unwrap(), element);
    }

    #[test]
    fn draft_has_no_id() {
        let xml = write_element(&Node::new(1.0, 2.0).into()).unwrap();
        assert!(!xml.contains("id="));
        assert!(xml.contains(r#"<node lat="1" lon="2"/>"#));
    }

    #[test]
    fn changeset_draft_is_bare() {
        let xml = write_element(&Changeset::default().into()).unwrap();
        assert!(xml.ends_with("<changeset/></osm>"));
    }

    #[test]
    fn changeset_tags_are_written() {
        let mut changeset = Changeset::default();
        changeset.tags.insert("comment".into(), "Fix <typo> & more".into());
        let xml = write_element(&changeset.clone().into()).unwrap();
        assert!(xml.contains("Fix &lt;typo&gt; &amp; more"));
        assert_eq!(parse_element(&xml).unwrap(), Element::Changeset(changeset));
    }

    #[test]
    fn way_writes_refs_before_tags() {
        let mut way = Way { id: Some(5), nodes: vec![1, 2], ..Default::default() };
        way.tags.insert("highway".into(), "path".into());
        let xml = write_element(&way.into()).unwrap();
        let nd = xml.find("<nd ref=\"1\"/>").unwrap();
        let tag = xml.find("<tag ").unwrap();
        assert!(nd < tag);
    }

    #[test]
    fn relation_round_trips() {
        let relation = Relation {
            id: Some(3),
            members: vec![Member { member_type: "way".into(), reference: 5, role: "outer".into() }],
            ..Default::default()
        };
        let xml = write_element(&relation.clone().into()).unwrap();
        assert_eq!(parse_element(&xml).unwrap(), Element::Relation(relation));
    }
}
