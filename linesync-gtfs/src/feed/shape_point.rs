use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    pub shape_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub sequence: usize,
}

impl From<&gtfs_structures::Shape> for ShapePoint {
    fn from(shape: &gtfs_structures::Shape) -> Self {
        ShapePoint {
            shape_id: shape.id.clone(),
            latitude: shape.latitude,
            longitude: shape.longitude,
            sequence: shape.sequence,
        }
    }
}
