use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use super::{OsmAction, OsmElement, OsmNodeId, OsmTags};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmNode {
    pub id: OsmNodeId,
    pub lat: f64,
    pub lon: f64,
    pub tags: OsmTags,
    pub action: Option<OsmAction>,
    /// remaining XML attributes (version, changeset, user, ...) kept for
    /// round-trip
    pub attributes: Vec<(String, String)>,
}

impl OsmNode {
    pub fn new(id: OsmNodeId, lat: f64, lon: f64) -> OsmNode {
        OsmNode {
            id,
            lat,
            lon,
            tags: OsmTags::new(),
            action: None,
            attributes: vec![],
        }
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// haversine distance in meters to a coordinate.
    pub fn distance_to(&self, lat: f64, lon: f64) -> f64 {
        Haversine.distance(self.point(), Point::new(lon, lat))
    }
}

impl OsmElement for OsmNode {
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

#[cfg(test)]
mod tests {
    use super::OsmNode;
    use crate::model::osm::{OsmElement, OsmNodeId};

    #[test]
    fn test_add_todo_fixme_prepends_once() {
        let mut node = OsmNode::new(OsmNodeId(1), 43.6, 1.44);
        node.tags
            .insert(String::from("fixme"), String::from("check position"));
        assert!(node.add_todo_fixme("name != Capitole"));
        assert!(node.is_modified());
        assert_eq!(
            node.get_tag("fixme"),
            Some("TODO: name != Capitole;check position")
        );
        assert!(!node.add_todo_fixme("name != Capitole"));
        assert!(node.add_todo_fixme("2 stops share the same reference (ref)"));
        assert_eq!(node.fixme_notes().len(), 3);
    }

    #[test]
    fn test_and_set_only_marks_changes() {
        let mut node = OsmNode::new(OsmNodeId(1), 43.6, 1.44);
        node.tags.insert(String::from("wheelchair"), String::from("yes"));
        assert!(!node.test_and_set("wheelchair", "yes"));
        assert_eq!(node.action, None);
        assert!(node.test_and_set("wheelchair", "no"));
        assert!(node.is_modified());
    }

    #[test]
    fn test_distance_in_meters() {
        let node = OsmNode::new(OsmNodeId(1), 43.6045, 1.4440);
        // about 0.001 degree of latitude
        let d = node.distance_to(43.6055, 1.4440);
        assert!((d - 111.2).abs() < 1.0, "distance was {d}");
        assert_eq!(node.distance_to(43.6045, 1.4440), 0.0);
    }
}
