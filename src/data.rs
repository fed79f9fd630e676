use std::{fmt, str::FromStr};

use indexmap::IndexMap;

use crate::errors::{Error, ErrorKind};

use self::osm::{Changeset, Meta, Node, OsmId, Relation, Way};

pub mod osm;

/// Tags in document order. Keys are unique.
pub type Tags = IndexMap<String, String>;

/// The four element kinds the editing API knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Node,
    Way,
    Relation,
    Changeset,
}

impl ElementType {
    pub const ALL: [ElementType; 4] = [
        ElementType::Node,
        ElementType::Way,
        ElementType::Relation,
        ElementType::Changeset,
    ];

    /// Name used both as the XML element name and as the URL path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Node => "node",
            ElementType::Way => "way",
            ElementType::Relation => "relation",
            ElementType::Changeset => "changeset",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::new(ErrorKind::InvalidArgument, format!("unknown element type {s:?}")))
    }
}

/// Any element the API can return or accept.
///
/// An element without an id is a local draft; one with an id mirrors a
/// server-side object.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Node(Node),
    Way(Way),
    Relation(Relation),
    Changeset(Changeset),
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        match self {
            Element::Node(_) => ElementType::Node,
            Element::Way(_) => ElementType::Way,
            Element::Relation(_) => ElementType::Relation,
            Element::Changeset(_) => ElementType::Changeset,
        }
    }

    pub fn id(&self) -> Option<OsmId> {
        match self {
            Element::Node(node) => node.id,
            Element::Way(way) => way.id,
            Element::Relation(relation) => relation.id,
            Element::Changeset(changeset) => changeset.id,
        }
    }

    pub fn set_id(&mut self, id: OsmId) {
        match self {
            Element::Node(node) => node.id = Some(id),
            Element::Way(way) => way.id = Some(id),
            Element::Relation(relation) => relation.id = Some(id),
            Element::Changeset(changeset) => changeset.id = Some(id),
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            Element::Node(node) => &node.tags,
            Element::Way(way) => &way.tags,
            Element::Relation(relation) => &relation.tags,
            Element::Changeset(changeset) => &changeset.tags,
        }
    }

    pub fn tags_mut(&mut self) -> &mut Tags {
        match self {
            Element::Node(node) => &mut node.tags,
            Element::Way(way) => &mut way.tags,
            Element::Relation(relation) => &mut relation.tags,
            Element::Changeset(changeset) => &mut changeset.tags,
        }
    }

    /// Versioning metadata. Changesets are not versioned.
    pub fn meta(&self) -> Option<&Meta> {
        match self {
            Element::Node(node) => Some(&node.meta),
            Element::Way(way) => Some(&way.meta),
            Element::Relation(relation) => Some(&relation.meta),
            Element::Changeset(_) => None,
        }
    }

    pub fn meta_mut(&mut self) -> Option<&mut Meta> {
        match self {
            Element::Node(node) => Some(&mut node.meta),
            Element::Way(way) => Some(&mut way.meta),
            Element::Relation(relation) => Some(&mut relation.meta),
            Element::Changeset(_) => None,
        }
    }

    /// Points the element at the changeset it is edited in.
    pub fn set_changeset(&mut self, changeset_id: OsmId) {
        if let Some(meta) = self.meta_mut() {
            meta.changeset = Some(changeset_id);
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id().is_none()
    }
}

impl From<Node> for Element {
    fn from(value: Node) -> Self {
        Element::Node(value)
    }
}

impl From<Way> for Element {
    fn from(value: Way) -> Self {
        Element::Way(value)
    }
}

impl From<Relation> for Element {
    fn from(value: Relation) -> Self {
        Element::Relation(value)
    }
}

impl From<Changeset> for Element {
    fn from(value: Changeset) -> Self {
        Element::Changeset(value)
    }
}
