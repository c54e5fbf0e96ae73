use std::collections::BTreeMap;

use super::{
    OsmAction, OsmError, OsmNode, OsmNodeId, OsmRelation, OsmRelationId, OsmTags, OsmWay,
    OsmWayId,
};

/// an in-memory `.osm` dataset. it owns every object; callers mutate
/// objects through the `*_mut` accessors.
#[derive(Debug, Clone, Default)]
pub struct OsmDocument {
    /// attributes of the `<osm>` root element
    pub attributes: Vec<(String, String)>,
    pub nodes: BTreeMap<OsmNodeId, OsmNode>,
    pub ways: BTreeMap<OsmWayId, OsmWay>,
    pub relations: BTreeMap<OsmRelationId, OsmRelation>,
    /// last id handed out to a created object
    last_new_id: i64,
}

impl OsmDocument {
    pub fn new() -> OsmDocument {
        OsmDocument::default()
    }

    pub fn insert_node(&mut self, node: OsmNode) {
        self.reserve_id(node.id.0);
        self.nodes.insert(node.id, node);
    }

    pub fn insert_way(&mut self, way: OsmWay) {
        self.reserve_id(way.id.0);
        self.ways.insert(way.id, way);
    }

    pub fn insert_relation(&mut self, relation: OsmRelation) {
        self.reserve_id(relation.id.0);
        self.relations.insert(relation.id, relation);
    }

    /// keeps created ids below every negative id already in the document.
    fn reserve_id(&mut self, id: i64) {
        if id < self.last_new_id {
            self.last_new_id = id;
        }
    }

    fn next_new_id(&mut self) -> i64 {
        self.last_new_id -= 1;
        self.last_new_id
    }

    /// registers a new node marked for upload.
    pub fn create_node(&mut self, lat: f64, lon: f64, tags: OsmTags) -> OsmNodeId {
        let id = OsmNodeId(self.next_new_id());
        let mut node = OsmNode::new(id, lat, lon);
        node.tags = tags;
        node.action = Some(OsmAction::Modify);
        self.nodes.insert(id, node);
        id
    }

    pub fn create_way(&mut self, nodes: Vec<OsmNodeId>, tags: OsmTags) -> OsmWayId {
        let id = OsmWayId(self.next_new_id());
        let mut way = OsmWay::new(id, nodes);
        way.tags = tags;
        way.action = Some(OsmAction::Modify);
        self.ways.insert(id, way);
        id
    }

    /// registers a new empty relation marked for upload.
    pub fn create_relation(&mut self, tags: OsmTags) -> OsmRelationId {
        let id = OsmRelationId(self.next_new_id());
        let mut relation = OsmRelation::new(id);
        relation.tags = tags;
        relation.action = Some(OsmAction::Modify);
        self.relations.insert(id, relation);
        id
    }

    pub fn node(&self, id: OsmNodeId) -> Result<&OsmNode, OsmError> {
        self.nodes.get(&id).ok_or(OsmError::MissingNodeId(id))
    }

    pub fn node_mut(&mut self, id: OsmNodeId) -> Result<&mut OsmNode, OsmError> {
        self.nodes.get_mut(&id).ok_or(OsmError::MissingNodeId(id))
    }

    pub fn way(&self, id: OsmWayId) -> Result<&OsmWay, OsmError> {
        self.ways.get(&id).ok_or(OsmError::MissingWayId(id))
    }

    pub fn way_mut(&mut self, id: OsmWayId) -> Result<&mut OsmWay, OsmError> {
        self.ways.get_mut(&id).ok_or(OsmError::MissingWayId(id))
    }

    pub fn relation(&self, id: OsmRelationId) -> Result<&OsmRelation, OsmError> {
        self.relations
            .get(&id)
            .ok_or(OsmError::MissingRelationId(id))
    }

    pub fn relation_mut(&mut self, id: OsmRelationId) -> Result<&mut OsmRelation, OsmError> {
        self.relations
            .get_mut(&id)
            .ok_or(OsmError::MissingRelationId(id))
    }
}
