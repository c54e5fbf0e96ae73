mod osm_action;
mod osm_document;
mod osm_element;
mod osm_error;
mod osm_member;
mod osm_node;
mod osm_node_id;
mod osm_relation;
mod osm_relation_id;
mod osm_way;
mod osm_way_id;
pub mod osm_xml_ops;

pub use osm_action::OsmAction;
pub use osm_document::OsmDocument;
pub use osm_element::{OsmElement, OsmTags, FIXME_TAG, TODO_PREFIX};
pub use osm_error::OsmError;
pub use osm_member::{OsmMember, OsmMemberRef};
pub use osm_node::OsmNode;
pub use osm_node_id::OsmNodeId;
pub use osm_relation::OsmRelation;
pub use osm_relation_id::OsmRelationId;
pub use osm_way::OsmWay;
pub use osm_way_id::OsmWayId;
