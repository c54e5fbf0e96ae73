mod agency;
mod feed_error;
mod gtfs_feed;
mod route;
mod route_type;
mod route_variant;
mod service;
mod shape_point;
mod stop;
mod stop_time;
mod trip;
mod variant_queries;
mod variant_selection;

pub use agency::Agency;
pub use feed_error::FeedError;
pub use gtfs_feed::{Feed, FeedTables};
pub use route::Route;
pub use route_type::RouteType;
pub use route_variant::{RouteVariant, VariantId};
pub use service::Service;
pub use shape_point::ShapePoint;
pub use stop::{Stop, WheelchairBoarding};
pub use stop_time::StopTime;
pub use trip::Trip;
