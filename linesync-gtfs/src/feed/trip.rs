use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub route_id: String,
    pub service_id: String,
    pub shape_id: Option<String>,
    pub headsign: String,
}

impl From<&gtfs_structures::RawTrip> for Trip {
    fn from(trip: &gtfs_structures::RawTrip) -> Self {
        Trip {
            id: trip.id.clone(),
            route_id: trip.route_id.clone(),
            service_id: trip.service_id.clone(),
            shape_id: trip.shape_id.clone(),
            headsign: trip.trip_headsign.clone().unwrap_or_default(),
        }
    }
}
