use serde::{Deserialize, Serialize};

use super::{OsmAction, OsmElement, OsmMember, OsmMemberRef, OsmRelationId, OsmTags};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmRelation {
    pub id: OsmRelationId,
    pub members: Vec<OsmMember>,
    pub tags: OsmTags,
    pub action: Option<OsmAction>,
    pub attributes: Vec<(String, String)>,
}

impl OsmRelation {
    pub fn new(id: OsmRelationId) -> OsmRelation {
        OsmRelation {
            id,
            members: vec![],
            tags: OsmTags::new(),
            action: None,
            attributes: vec![],
        }
    }

    /// appends a member at the end of the ordered member list.
    pub fn add_member(&mut self, target: OsmMemberRef, role: &str) {
        self.members.push(OsmMember::new(target, role));
        self.mark_modified();
    }

    pub fn members_with_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a OsmMember> {
        self.members.iter().filter(move |m| m.role == role)
    }
}

impl OsmElement for OsmRelation {
    fn tags(&self) -> &OsmTags {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut OsmTags {
        &mut self.tags
    }

    fn action(&self) -> Option<OsmAction> {
        self.action
    }

    fn set_action(&mut self, action: Option<OsmAction>) {
        self.action = action;
    }
}
