use linesync_gtfs::feed::RouteType;

use crate::config::AgencyProfile;

/// settings shared by the stops and the relation of one imported variant.
#[derive(Debug, Clone)]
pub struct ImportContext<'a> {
    /// agency name as written in the feed
    pub agency: &'a str,
    pub profile: &'a AgencyProfile,
    pub route_type: RouteType,
}
