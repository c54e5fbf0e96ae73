use gtfs_structures::Availability;
use serde::{Deserialize, Serialize};

/// a GTFS stop with the fields needed to reconcile it against map data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    /// public-facing stop code. this is the external reference written on
    /// map objects. falls back to the stop id when the feed omits it.
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub wheelchair_boarding: WheelchairBoarding,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelchairBoarding {
    #[default]
    Unknown,
    Yes,
    No,
}

impl WheelchairBoarding {
    /// the OSM `wheelchair=*` value matching this accessibility level, if known.
    pub fn osm_value(&self) -> Option<&'static str> {
        match self {
            WheelchairBoarding::Unknown => None,
            WheelchairBoarding::Yes => Some("yes"),
            WheelchairBoarding::No => Some("no"),
        }
    }
}

impl From<&Availability> for WheelchairBoarding {
    fn from(value: &Availability) -> Self {
        match value {
            Availability::Available => WheelchairBoarding::Yes,
            Availability::NotAvailable => WheelchairBoarding::No,
            _ => WheelchairBoarding::Unknown,
        }
    }
}

impl Stop {
    /// converts a raw GTFS stop. stops without a location cannot be placed on
    /// the map and are rejected with `None`.
    pub fn from_gtfs(stop: &gtfs_structures::Stop) -> Option<Stop> {
        let (latitude, longitude) = match (stop.latitude, stop.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                log::warn!("stop '{}' has no lon,lat location, ignoring it", stop.id);
                return None;
            }
        };
        let code = stop
            .code
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| stop.id.clone());
        Some(Stop {
            id: stop.id.clone(),
            code,
            name: stop.name.clone().unwrap_or_default(),
            latitude,
            longitude,
            wheelchair_boarding: WheelchairBoarding::from(&stop.wheelchair_boarding),
        })
    }
}
