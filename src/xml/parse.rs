use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::data::osm::{Changeset, Member, Meta, Node, OsmId, Relation, User, Way};
use crate::data::Element;
use crate::errors::{Error, ErrorKind, Result};

fn attribute_value(attribute: &Attribute) -> Result<String> {
    Ok(attribute.unescape_value()?.into_owned())
}

fn parse_bool(value: &str) -> Result<bool> {
    value.parse().map_err(|_| Error::new(ErrorKind::GenericError, format!("expected a boolean, got {value:?}")))
}

/// Attributes shared by nodes, ways and relations. Unknown keys are skipped.
fn parse_meta(key: &[u8], value: &str, id: &mut Option<OsmId>, meta: &mut Meta) -> Result<()> {
    match key {
        b"id" => *id = Some(value.parse()?),
        b"version" => meta.version = Some(value.parse()?),
        b"changeset" => meta.changeset = Some(value.parse()?),
        b"user" => meta.user = Some(value.to_string()),
        b"uid" => meta.uid = Some(value.parse()?),
        b"visible" => meta.visible = Some(parse_bool(value)?),
        b"timestamp" => meta.timestamp = Some(value.to_string()),
        _ => (),
    }
    Ok(())
}

fn parse_node(el: &BytesStart) -> Result<Node> {
    let mut node = Node::default();
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        let value = attribute_value(&attribute)?;
        match attribute.key.as_ref() {
            b"lat" => lat = Some(value.parse()?),
            b"lon" => lon = Some(value.parse()?),
            key => parse_meta(key, &value, &mut node.id, &mut node.meta)?,
        }
    }

    // Deleted nodes come back without coordinates.
    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            node.lat = lat;
            node.lon = lon;
        },
        (None, None) if node.meta.visible == Some(false) => (),
        _ => return Err("node record without coordinates".into()),
    }
    Ok(node)
}

fn parse_way(el: &BytesStart) -> Result<Way> {
    let mut way = Way::default();
    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        let value = attribute_value(&attribute)?;
        parse_meta(attribute.key.as_ref(), &value, &mut way.id, &mut way.meta)?;
    }
    Ok(way)
}

fn parse_relation(el: &BytesStart) -> Result<Relation> {
    let mut relation = Relation::default();
    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        let value = attribute_value(&attribute)?;
        parse_meta(attribute.key.as_ref(), &value, &mut relation.id, &mut relation.meta)?;
    }
    Ok(relation)
}

fn parse_changeset(el: &BytesStart) -> Result<Changeset> {
    let mut changeset = Changeset::default();
    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        let value = attribute_value(&attribute)?;
        match attribute.key.as_ref() {
            b"id" => changeset.id = Some(value.parse()?),
            b"open" => changeset.open = parse_bool(&value)?,
            b"user" => changeset.user = Some(value),
            b"uid" => changeset.uid = Some(value.parse()?),
            b"created_at" => changeset.created_at = Some(value),
            b"closed_at" => changeset.closed_at = Some(value),
            // Bounding box and counters are derived server-side.
            _ => (),
        }
    }
    Ok(changeset)
}

fn parse_tag(el: &BytesStart) -> Result<(String, String)> {
    let mut key: Option<String> = None;
    let mut value: Option<String> = None;
    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        match attribute.key.as_ref() {
            b"k" => key = Some(attribute_value(&attribute)?),
            b"v" => value = Some(attribute_value(&attribute)?),
            _ => (),
        }
    }
    match (key, value) {
        (Some(key), Some(value)) => Ok((key, value)),
        _ => Err("tag without k or v".into()),
    }
}

fn parse_ref(el: &BytesStart) -> Result<OsmId> {
    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        if attribute.key.as_ref() == b"ref" {
            return Ok(attribute_value(&attribute)?.parse()?);
        }
    }
    Err("nd without ref".into())
}

fn parse_member(el: &BytesStart) -> Result<Member> {
    let mut member_type: Option<String> = None;
    let mut reference: Option<OsmId> = None;
    let mut role = String::new();
    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        match attribute.key.as_ref() {
            b"type" => member_type = Some(attribute_value(&attribute)?),
            b"ref" => reference = Some(attribute_value(&attribute)?.parse()?),
            b"role" => role = attribute_value(&attribute)?,
            _ => (),
        }
    }
    match (member_type, reference) {
        (Some(member_type), Some(reference)) => Ok(Member { member_type, reference, role }),
        _ => Err("member without type or ref".into()),
    }
}

/// Opens a new element if `el` names one of the element kinds.
fn parse_start(el: &BytesStart) -> Result<Option<Element>> {
    let element = match el.name().as_ref() {
        b"node" => Element::Node(parse_node(el)?),
        b"way" => Element::Way(parse_way(el)?),
        b"relation" => Element::Relation(parse_relation(el)?),
        b"changeset" => Element::Changeset(parse_changeset(el)?),
        _ => return Ok(None),
    };
    Ok(Some(element))
}

fn apply_child(element: &mut Element, el: &BytesStart) -> Result<()> {
    match el.name().as_ref() {
        b"tag" => {
            let (key, value) = parse_tag(el)?;
            element.tags_mut().insert(key, value);
        },
        b"nd" => {
            if let Element::Way(way) = element {
                way.nodes.push(parse_ref(el)?);
            }
        },
        b"member" => {
            if let Element::Relation(relation) = element {
                relation.members.push(parse_member(el)?);
            }
        },
        // Changeset discussions and the like.
        _ => (),
    }
    Ok(())
}

/// All element records in the envelope, in document order.
pub fn parse_elements(xml: &str) -> Result<Vec<Element>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut elements: Vec<Element> = Vec::new();
    let mut current: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => match current.as_mut() {
                Some(element) => apply_child(element, &e)?,
                None => current = parse_start(&e)?,
            },
            Event::Empty(e) => match current.as_mut() {
                Some(element) => apply_child(element, &e)?,
                None => elements.extend(parse_start(&e)?),
            },
            Event::End(e) => {
                let closes_current = current
                    .as_ref()
                    .is_some_and(|element| element.element_type().as_str().as_bytes() == e.name().as_ref());
                if closes_current {
                    elements.extend(current.take());
                }
            },
            _ => (),
        }
    }

    if current.is_some() {
        return Err("unterminated element record".into());
    }
    Ok(elements)
}

/// The first element record in the envelope.
pub fn parse_element(xml: &str) -> Result<Element> {
    parse_elements(xml)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::new(ErrorKind::GenericError, "response holds no element"))
}

pub fn parse_user(xml: &str) -> Result<User> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"user" => {
                let mut id: Option<u64> = None;
                let mut display_name = String::new();
                for attribute_res in e.attributes() {
                    let attribute = attribute_res?;
                    match attribute.key.as_ref() {
                        b"id" => id = Some(attribute_value(&attribute)?.parse()?),
                        b"display_name" => display_name = attribute_value(&attribute)?,
                        _ => (),
                    }
                }
                let id = id.ok_or("user record without id")?;
                return Ok(User { id, display_name });
            },
            _ => (),
        }
    }
    Err(Error::new(ErrorKind::GenericError, "response holds no user"))
}

/// Create endpoints answer with the bare new id. Ids and versions start at 1.
pub fn parse_id(body: &str) -> Result<OsmId> {
    match body.trim().parse::<OsmId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::new(ErrorKind::GenericError, format!("expected a positive numeric id, got {body:?}"))),
    }
}
