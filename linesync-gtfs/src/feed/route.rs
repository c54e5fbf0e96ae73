use serde::{Deserialize, Serialize};

use super::RouteType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    /// line code shown to riders, the `ref` of the line
    pub short_name: String,
    pub long_name: String,
    pub route_type: RouteType,
    /// hex color without leading `#`, upper case
    pub color: String,
    pub agency_id: Option<String>,
}

impl Route {
    pub fn colour_tag(&self) -> String {
        format!("#{}", self.color.to_uppercase())
    }
}

impl From<&gtfs_structures::Route> for Route {
    fn from(route: &gtfs_structures::Route) -> Self {
        let c = route.color;
        Route {
            id: route.id.clone(),
            short_name: route.short_name.clone().unwrap_or_default(),
            long_name: route.long_name.clone().unwrap_or_default(),
            route_type: RouteType::from(&route.route_type),
            color: format!("{:02X}{:02X}{:02X}", c.r, c.g, c.b),
            agency_id: route.agency_id.clone(),
        }
    }
}
