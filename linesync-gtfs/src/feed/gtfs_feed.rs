use gtfs_structures::RawGtfs;
use itertools::Itertools;
use kdam::tqdm;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::Path,
};

use super::{
    Agency, FeedError, Route, RouteVariant, Service, ShapePoint, Stop, StopTime, Trip, VariantId,
};

/// flat row collections of a feed before indexing. missing optional
/// resources (calendar, shapes) are empty vectors.
#[derive(Debug, Clone, Default)]
pub struct FeedTables {
    pub agencies: Vec<Agency>,
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub stop_times: Vec<StopTime>,
    pub services: Vec<Service>,
    pub shape_points: Vec<ShapePoint>,
}

impl TryFrom<RawGtfs> for FeedTables {
    type Error = FeedError;

    fn try_from(gtfs: RawGtfs) -> Result<Self, Self::Error> {
        let agencies = gtfs.agencies?.iter().map(Agency::from).collect_vec();
        let stops = gtfs.stops?.iter().filter_map(Stop::from_gtfs).collect_vec();
        let routes = gtfs.routes?.iter().map(Route::from).collect_vec();
        let trips = gtfs.trips?.iter().map(Trip::from).collect_vec();
        let stop_times = gtfs.stop_times?.iter().map(StopTime::from).collect_vec();
        let services = match gtfs.calendar {
            Some(Ok(calendar)) => calendar.iter().map(Service::from).collect_vec(),
            Some(Err(e)) => {
                log::warn!("failure reading calendar.txt, all trips considered serviced: {e}");
                vec![]
            }
            None => {
                log::warn!("feed has no calendar.txt, all trips considered serviced");
                vec![]
            }
        };
        let shape_points = match gtfs.shapes {
            Some(Ok(shapes)) => shapes.iter().map(ShapePoint::from).collect_vec(),
            Some(Err(e)) => {
                log::warn!("failure reading shapes.txt, ignoring shapes: {e}");
                vec![]
            }
            None => vec![],
        };
        Ok(FeedTables {
            agencies,
            stops,
            routes,
            trips,
            stop_times,
            services,
            shape_points,
        })
    }
}

/// an indexed GTFS feed. trips sharing an identical stop id sequence are
/// grouped into [`RouteVariant`]s, stored in an arena ordered by sequence.
/// read-only once built.
#[derive(Debug, Clone)]
pub struct Feed {
    pub agencies: Vec<Agency>,
    pub stops: HashMap<String, Stop>,
    pub routes: HashMap<String, Route>,
    pub trips: HashMap<String, Trip>,
    pub services: HashMap<String, Service>,
    /// shape points grouped by shape id, sorted by sequence
    pub shapes: BTreeMap<String, Vec<ShapePoint>>,
    stop_times_by_trip: HashMap<String, Vec<StopTime>>,
    variants: Vec<RouteVariant>,
    variant_by_trip: HashMap<String, VariantId>,
}

impl Feed {
    /// reads a GTFS directory or zip archive.
    pub fn from_path(path: &Path) -> Result<Feed, FeedError> {
        log::info!("reading GTFS feed in {path:?}");
        let raw = RawGtfs::from_path(path)?;
        let tables = FeedTables::try_from(raw)?;
        Ok(Feed::new(tables))
    }

    pub fn new(tables: FeedTables) -> Feed {
        let FeedTables {
            agencies,
            stops,
            routes,
            trips,
            stop_times,
            services,
            shape_points,
        } = tables;
        let stops: HashMap<String, Stop> = stops.into_iter().map(|s| (s.id.clone(), s)).collect();
        let routes: HashMap<String, Route> =
            routes.into_iter().map(|r| (r.id.clone(), r)).collect();
        let trips: HashMap<String, Trip> = trips.into_iter().map(|t| (t.id.clone(), t)).collect();
        let services: HashMap<String, Service> =
            services.into_iter().map(|s| (s.id.clone(), s)).collect();

        let mut shapes: BTreeMap<String, Vec<ShapePoint>> = BTreeMap::new();
        for point in shape_points {
            shapes.entry(point.shape_id.clone()).or_default().push(point);
        }
        for points in shapes.values_mut() {
            points.sort_by_key(|p| p.sequence);
        }

        let n_stop_times = stop_times.len();
        let mut stop_times_by_trip: HashMap<String, Vec<StopTime>> = HashMap::new();
        let stop_time_iter = tqdm!(
            stop_times.into_iter(),
            total = n_stop_times,
            desc = "group stop times by trip"
        );
        for stop_time in stop_time_iter {
            stop_times_by_trip
                .entry(stop_time.trip_id.clone())
                .or_default()
                .push(stop_time);
        }
        for trip_stop_times in stop_times_by_trip.values_mut() {
            trip_stop_times.sort_by_key(|st| st.stop_sequence);
        }

        // sequence -> trips index, only used while building the arena
        let mut trips_by_sequence: BTreeMap<Vec<String>, BTreeSet<String>> = BTreeMap::new();
        let trip_iter = tqdm!(trips.keys(), total = trips.len(), desc = "group trips by stops");
        for trip_id in trip_iter {
            let sequence = stop_id_sequence(
                stop_times_by_trip
                    .get(trip_id)
                    .map(|sts| sts.as_slice())
                    .unwrap_or_default(),
            );
            if sequence.is_empty() {
                log::warn!("trip '{trip_id}' has no stop times, ignoring it");
                continue;
            }
            trips_by_sequence
                .entry(sequence)
                .or_default()
                .insert(trip_id.clone());
        }

        let mut variants = Vec::with_capacity(trips_by_sequence.len());
        let mut variant_by_trip = HashMap::new();
        for (index, (stop_ids, trip_ids)) in trips_by_sequence.into_iter().enumerate() {
            let id = VariantId(index);
            for trip_id in trip_ids.iter() {
                variant_by_trip.insert(trip_id.clone(), id);
            }
            variants.push(RouteVariant {
                id,
                stop_ids,
                trip_ids,
            });
        }
        log::info!(
            "feed has {} trips grouped into {} route variants",
            trips.len(),
            variants.len()
        );

        Feed {
            agencies,
            stops,
            routes,
            trips,
            services,
            shapes,
            stop_times_by_trip,
            variants,
            variant_by_trip,
        }
    }

    /// all route variants, in lexicographic order of their stop id sequence.
    pub fn variants(&self) -> &[RouteVariant] {
        &self.variants
    }

    pub fn variant(&self, id: VariantId) -> Result<&RouteVariant, FeedError> {
        self.variants.get(id.0).ok_or(FeedError::MissingVariant(id))
    }

    pub fn variant_of_trip(&self, trip_id: &str) -> Option<VariantId> {
        self.variant_by_trip.get(trip_id).copied()
    }

    pub fn trip(&self, trip_id: &str) -> Result<&Trip, FeedError> {
        self.trips
            .get(trip_id)
            .ok_or_else(|| FeedError::MissingTrip(trip_id.to_string()))
    }

    pub fn route_of_trip(&self, trip_id: &str) -> Result<&Route, FeedError> {
        let trip = self.trip(trip_id)?;
        self.routes
            .get(&trip.route_id)
            .ok_or_else(|| FeedError::MissingRoute(trip.route_id.clone()))
    }

    /// agency operating a route. a route without agency_id belongs to the
    /// feed's only agency.
    pub fn agency_of_route(&self, route: &Route) -> Result<&Agency, FeedError> {
        let by_id = route
            .agency_id
            .as_ref()
            .and_then(|id| self.agencies.iter().find(|a| a.id.as_ref() == Some(id)));
        match (by_id, self.agencies.as_slice()) {
            (Some(agency), _) => Ok(agency),
            (None, [only]) => Ok(only),
            _ => Err(FeedError::MissingAgency(route.id.clone())),
        }
    }

    pub fn service(&self, service_id: &str) -> Option<&Service> {
        self.services.get(service_id)
    }

    /// stop times of a trip sorted by stop_sequence.
    pub fn stop_times(&self, trip_id: &str) -> &[StopTime] {
        self.stop_times_by_trip
            .get(trip_id)
            .map(|sts| sts.as_slice())
            .unwrap_or_default()
    }

    /// the stops of a variant in order. a stop id missing from stops.txt is
    /// reported and left out.
    pub fn stops_of_variant(&self, id: VariantId) -> Result<Vec<&Stop>, FeedError> {
        let variant = self.variant(id)?;
        let stops = variant
            .stop_ids
            .iter()
            .filter_map(|stop_id| match self.stops.get(stop_id) {
                Some(stop) => Some(stop),
                None => {
                    log::error!("stop_id {stop_id} referenced but not found in GTFS stops.txt");
                    None
                }
            })
            .collect_vec();
        Ok(stops)
    }
}

/// the ordered stop ids of a trip, with consecutive repeats of the same
/// stop collapsed.
fn stop_id_sequence(stop_times: &[StopTime]) -> Vec<String> {
    stop_times
        .iter()
        .map(|st| st.stop_id.clone())
        .dedup()
        .collect_vec()
}
