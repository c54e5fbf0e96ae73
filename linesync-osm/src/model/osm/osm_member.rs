use serde::{Deserialize, Serialize};

use super::{OsmNodeId, OsmRelationId, OsmWayId};

/// typed target of a relation member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsmMemberRef {
    Node(OsmNodeId),
    Way(OsmWayId),
    Relation(OsmRelationId),
}

impl OsmMemberRef {
    /// value of the member `type` attribute
    pub fn type_name(&self) -> &'static str {
        match self {
            OsmMemberRef::Node(_) => "node",
            OsmMemberRef::Way(_) => "way",
            OsmMemberRef::Relation(_) => "relation",
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            OsmMemberRef::Node(id) => id.0,
            OsmMemberRef::Way(id) => id.0,
            OsmMemberRef::Relation(id) => id.0,
        }
    }

    pub fn from_type_name(type_name: &str, id: i64) -> Option<OsmMemberRef> {
        match type_name {
            "node" => Some(OsmMemberRef::Node(OsmNodeId(id))),
            "way" => Some(OsmMemberRef::Way(OsmWayId(id))),
            "relation" => Some(OsmMemberRef::Relation(OsmRelationId(id))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsmMember {
    pub target: OsmMemberRef,
    pub role: String,
}

impl OsmMember {
    pub fn new(target: OsmMemberRef, role: &str) -> OsmMember {
        OsmMember {
            target,
            role: role.to_string(),
        }
    }
}
