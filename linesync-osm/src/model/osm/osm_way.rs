use serde::{Deserialize, Serialize};

use super::{OsmAction, OsmElement, OsmNodeId, OsmTags, OsmWayId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmWay {
    pub id: OsmWayId,
    pub nodes: Vec<OsmNodeId>,
    pub tags: OsmTags,
    pub action: Option<OsmAction>,
    pub attributes: Vec<(String, String)>,
}

impl OsmWay {
    pub fn new(id: OsmWayId, nodes: Vec<OsmNodeId>) -> OsmWay {
        OsmWay {
            id,
            nodes,
            tags: OsmTags::new(),
            action: None,
            attributes: vec![],
        }
    }

    pub fn push_node(&mut self, node_id: OsmNodeId) {
        self.nodes.push(node_id);
        self.mark_modified();
    }
}

impl OsmElement for OsmWay {
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
