use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// transit modes supported by the OSM import. GTFS extended route types
/// without an OSM counterpart are imported as buses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    Tram,
    Subway,
    Train,
    Bus,
    Ferry,
    CableCar,
    Funicular,
}

impl RouteType {
    /// value of the `route=*` (and `route_master=*`) tag, also used as the
    /// vehicle tag on platforms (`bus=yes`, `tram=yes`, ...).
    pub fn route_tag(&self) -> &'static str {
        match self {
            RouteType::Tram => "tram",
            RouteType::Subway => "subway",
            RouteType::Train => "train",
            RouteType::Bus => "bus",
            RouteType::Ferry => "ferry",
            RouteType::CableCar => "cable_car",
            RouteType::Funicular => "funicular",
        }
    }

    /// prefix of a route relation name.
    pub fn display_name(&self) -> &'static str {
        match self {
            RouteType::Tram => "Tram",
            RouteType::Subway => "Métro",
            RouteType::Train => "Train",
            RouteType::Bus => "Bus",
            RouteType::Ferry => "Ferry",
            RouteType::CableCar => "Téléphérique",
            RouteType::Funicular => "Funiculaire",
        }
    }

    /// key and value tagging a pseudo-way synthesized from a shape.
    pub fn way_tag(&self) -> (&'static str, &'static str) {
        match self {
            RouteType::Tram => ("railway", "tram"),
            RouteType::Subway => ("railway", "subway"),
            RouteType::Train => ("railway", "train"),
            RouteType::Bus => ("highway", "service"),
            RouteType::Ferry => ("route", "ferry"),
            RouteType::CableCar => ("aerialway", "cable_car"),
            RouteType::Funicular => ("railway", "funicular"),
        }
    }
}

impl From<&gtfs_structures::RouteType> for RouteType {
    fn from(value: &gtfs_structures::RouteType) -> Self {
        use gtfs_structures::RouteType as G;
        match value {
            G::Tramway => RouteType::Tram,
            G::Subway => RouteType::Subway,
            G::Rail => RouteType::Train,
            G::Bus => RouteType::Bus,
            G::Ferry => RouteType::Ferry,
            // cable trams run on rails in the street
            G::CableCar => RouteType::Tram,
            G::Gondola => RouteType::CableCar,
            G::Funicular => RouteType::Funicular,
            _ => RouteType::Bus,
        }
    }
}

impl Display for RouteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.route_tag())
    }
}
