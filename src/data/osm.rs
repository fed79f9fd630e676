use super::Tags;

pub type OsmId = u64;

/// Versioning attributes shared by nodes, ways and relations.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Meta {
    pub version: Option<u64>,
    pub changeset: Option<OsmId>,
    pub user: Option<String>,
    pub uid: Option<u64>,
    pub visible: Option<bool>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    pub id: Option<OsmId>,
    pub lat: f64,
    pub lon: f64,
    pub meta: Meta,
    pub tags: Tags,
}

impl Node {
    pub fn new(lat: f64, lon: f64) -> Self {
        Node {
            lat,
            lon,
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Way {
    pub id: Option<OsmId>,
    /// Node references in path order.
    pub nodes: Vec<OsmId>,
    pub meta: Meta,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub member_type: String,
    pub reference: OsmId,
    pub role: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Relation {
    pub id: Option<OsmId>,
    pub members: Vec<Member>,
    pub meta: Meta,
    pub tags: Tags,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Changeset {
    pub id: Option<OsmId>,
    pub open: bool,
    pub user: Option<String>,
    pub uid: Option<u64>,
    pub created_at: Option<String>,
    pub closed_at: Option<String>,
    pub tags: Tags,
}

/// The authenticated account, as returned by `/user/details`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub display_name: String,
}
