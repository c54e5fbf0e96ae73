//! bulk export of a whole feed as new map objects: a platform per stop,
//! pseudo-ways drawn from the shapes, a route relation per variant and a
//! route master per line.
use chrono::NaiveDate;
use itertools::Itertools;
use kdam::tqdm;
use linesync_gtfs::feed::{Feed, RouteType, ShapePoint, VariantId};
use linesync_gtfs::schedule::ServiceWindow;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::AgencyProfiles;
use crate::model::osm::{
    OsmDocument, OsmElement, OsmMemberRef, OsmNodeId, OsmRelationId, OsmTags, OsmWayId,
};
use crate::model::LinesyncCliError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// a shape point position, compared bit for bit
type CoordinateKey = (u64, u64);

fn coordinate_key(point: &ShapePoint) -> CoordinateKey {
    (point.longitude.to_bits(), point.latitude.to_bits())
}

fn tags_of(pairs: &[(&str, &str)]) -> OsmTags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// a route master groups the route relations sharing a ref.
#[derive(Debug, Clone)]
struct RouteMaster {
    name: String,
    route_tag: &'static str,
    operator: String,
    routes: Vec<OsmRelationId>,
}

/// default output file: agency names joined with `-`.
pub fn default_output_filename(feed: &Feed) -> String {
    let names = feed.agencies.iter().map(|a| a.name.as_str()).join("-");
    format!("{names}.osm")
}

/// fills `doc` with the pseudo-way representation of the whole feed.
/// headway and opening hours are computed over the default schedule window
/// starting `today`.
pub fn export_pseudo_ways(
    feed: &Feed,
    doc: &mut OsmDocument,
    profiles: &AgencyProfiles,
    today: NaiveDate,
) -> Result<(), LinesyncCliError> {
    doc.attributes = vec![
        (String::from("version"), String::from("0.6")),
        (String::from("upload"), String::from("never")),
        (String::from("generator"), String::from("linesync-osm")),
    ];
    let stop_nodes = add_stop_nodes(feed, doc, profiles, today);
    let way_ids_by_shape = add_shape_ways(feed, doc)?;
    let window = ServiceWindow::schedule_default(today)?;

    let mut route_masters: BTreeMap<String, RouteMaster> = BTreeMap::new();
    let variant_iter = tqdm!(
        feed.variants().iter(),
        total = feed.variants().len(),
        desc = "route relations"
    );
    for variant in variant_iter {
        let line_ref = feed.get_ref(variant.id)?;
        let route_type = feed.get_primary_route_type(variant.id)?;
        let route_name = feed.get_osm_name(variant.id)?;
        let official_name = feed.get_long_name(variant.id)?;
        let operator = feed.get_agency(variant.id)?;
        let relation_id = add_route_relation(
            feed,
            doc,
            variant.id,
            &window,
            today,
            &stop_nodes,
            &way_ids_by_shape,
        )?;

        let prefix = route_name.split(':').next().unwrap_or_default();
        let master = route_masters
            .entry(line_ref)
            .or_insert_with(|| RouteMaster {
                name: format!("{prefix}: {official_name}"),
                route_tag: route_type.route_tag(),
                operator,
                routes: vec![],
            });
        master.routes.push(relation_id);
    }

    for (line_ref, master) in route_masters {
        let tags = tags_of(&[
            ("type", "route_master"),
            ("route_master", master.route_tag),
            ("name", master.name.as_str()),
            ("ref", line_ref.as_str()),
            ("operator", master.operator.as_str()),
        ]);
        let master_id = doc.create_relation(tags);
        let relation = doc.relation_mut(master_id)?;
        for route_id in master.routes {
            relation.add_member(OsmMemberRef::Relation(route_id), "");
        }
    }
    log::info!(
        "exported {} nodes, {} ways, {} relations",
        doc.nodes.len(),
        doc.ways.len(),
        doc.relations.len()
    );
    Ok(())
}

/// one platform node per feed stop, keyed by stop id.
fn add_stop_nodes(
    feed: &Feed,
    doc: &mut OsmDocument,
    profiles: &AgencyProfiles,
    today: NaiveDate,
) -> HashMap<String, OsmNodeId> {
    let agency_name = feed
        .agencies
        .first()
        .map(|a| a.name.as_str())
        .unwrap_or_default();
    let profile = profiles.get(agency_name);
    let source_date = today.format(DATE_FORMAT).to_string();
    let stops = feed.stops.values().sorted_by(|a, b| a.id.cmp(&b.id));
    let mut stop_nodes = HashMap::with_capacity(feed.stops.len());
    for stop in tqdm!(stops, total = feed.stops.len(), desc = "stop nodes") {
        let name = stop.name.replace('"', "");
        let mut tags = tags_of(&[
            ("highway", "bus_stop"),
            ("public_transport", "platform"),
            ("bus", "yes"),
            ("source", profile.source.as_str()),
            ("source:date", source_date.as_str()),
            ("name", name.as_str()),
            ("stop_id", stop.id.as_str()),
            ("ref", stop.code.as_str()),
        ]);
        tags.insert(profile.ref_tag.clone(), stop.code.clone());
        let node_id = doc.create_node(stop.latitude, stop.longitude, tags);
        stop_nodes.insert(stop.id.clone(), node_id);
    }
    stop_nodes
}

/// mode of the routes using each shape, from the first trip in id order.
fn route_type_by_shape(feed: &Feed) -> HashMap<&str, RouteType> {
    let mut route_types = HashMap::new();
    for trip in feed.trips.values().sorted_by(|a, b| a.id.cmp(&b.id)) {
        let (Some(shape_id), Some(route)) = (&trip.shape_id, feed.routes.get(&trip.route_id))
        else {
            continue;
        };
        route_types
            .entry(shape_id.as_str())
            .or_insert(route.route_type);
    }
    route_types
}

/// turns shapes into ways. points at the same position share a node; a run
/// of consecutive segments used by the same set of shapes becomes one way.
fn add_shape_ways(
    feed: &Feed,
    doc: &mut OsmDocument,
) -> Result<HashMap<String, Vec<OsmWayId>>, LinesyncCliError> {
    let mut node_by_coordinate: HashMap<CoordinateKey, OsmNodeId> = HashMap::new();
    let mut shapes_by_segment: HashMap<(OsmNodeId, OsmNodeId), BTreeSet<&str>> = HashMap::new();
    for (shape_id, points) in feed.shapes.iter() {
        let mut previous: Option<OsmNodeId> = None;
        for point in points.iter() {
            let node_id = *node_by_coordinate
                .entry(coordinate_key(point))
                .or_insert_with(|| doc.create_node(point.latitude, point.longitude, OsmTags::new()));
            if let Some(last) = previous.filter(|last| *last != node_id) {
                shapes_by_segment
                    .entry((last, node_id))
                    .or_default()
                    .insert(shape_id.as_str());
                shapes_by_segment
                    .entry((node_id, last))
                    .or_default()
                    .insert(shape_id.as_str());
            }
            previous = Some(node_id);
        }
    }

    let route_types = route_type_by_shape(feed);
    let mut way_by_segment: HashMap<(OsmNodeId, OsmNodeId), OsmWayId> = HashMap::new();
    let mut ways_by_shape: HashMap<String, Vec<OsmWayId>> = HashMap::new();
    for (shape_id, points) in feed.shapes.iter() {
        let route_type = route_types
            .get(shape_id.as_str())
            .copied()
            .unwrap_or(RouteType::Bus);
        let (way_key, way_value) = route_type.way_tag();
        let mut way_ids: Vec<OsmWayId> = vec![];
        let mut previous: Option<OsmNodeId> = None;
        // way being extended and the shapes sharing it
        let mut open_way: Option<(OsmWayId, &BTreeSet<&str>)> = None;
        for point in points.iter() {
            let Some(node_id) = node_by_coordinate.get(&coordinate_key(point)).copied() else {
                continue;
            };
            let Some(last) = previous.filter(|last| *last != node_id) else {
                previous = Some(node_id);
                continue;
            };
            previous = Some(node_id);
            let way_id = match way_by_segment.get(&(last, node_id)) {
                Some(existing) => {
                    open_way = None;
                    *existing
                }
                None => {
                    let shape_ids = shapes_by_segment.get(&(last, node_id));
                    let way_id = match (open_way, shape_ids) {
                        (Some((open_id, open_shapes)), Some(ids)) if open_shapes == ids => {
                            doc.way_mut(open_id)?.push_node(node_id);
                            open_id
                        }
                        _ => {
                            let tags = tags_of(&[(way_key, way_value)]);
                            doc.create_way(vec![last, node_id], tags)
                        }
                    };
                    if let Some(ids) = shape_ids {
                        open_way = Some((way_id, ids));
                    }
                    way_by_segment.insert((last, node_id), way_id);
                    way_by_segment.insert((node_id, last), way_id);
                    way_id
                }
            };
            if way_ids.last() != Some(&way_id) {
                way_ids.push(way_id);
            }
        }
        ways_by_shape.insert(shape_id.clone(), way_ids);
    }
    Ok(ways_by_shape)
}

fn add_route_relation(
    feed: &Feed,
    doc: &mut OsmDocument,
    variant_id: VariantId,
    window: &ServiceWindow,
    today: NaiveDate,
    stop_nodes: &HashMap<String, OsmNodeId>,
    ways_by_shape: &HashMap<String, Vec<OsmWayId>>,
) -> Result<OsmRelationId, LinesyncCliError> {
    let variant = feed.variant(variant_id)?;
    let route_type = feed.get_primary_route_type(variant_id)?;
    let (start_date, end_date) = feed.get_service_date_range(variant_id, today)?;
    let mut tags = tags_of(&[
        ("name", feed.get_osm_name(variant_id)?.as_str()),
        ("official_name", feed.get_long_name(variant_id)?.as_str()),
        ("description", feed.get_headsign(variant_id)?.as_str()),
        ("ref", feed.get_ref(variant_id)?.as_str()),
        ("type", "route"),
        ("route", route_type.route_tag()),
        ("oneway", "yes"),
    ]);
    if let Some(duration) = feed.get_duration(variant_id)? {
        tags.insert(String::from("duration"), duration);
    }
    tags.insert(
        String::from("start_date"),
        start_date.format(DATE_FORMAT).to_string(),
    );
    tags.insert(
        String::from("end_date"),
        end_date.format(DATE_FORMAT).to_string(),
    );
    tags.insert(String::from("operator"), feed.get_agency(variant_id)?);
    tags.insert(
        String::from("public_transport:version"),
        String::from("2"),
    );
    if let Some(headway) = feed.get_headway(variant_id, window)? {
        tags.insert(String::from("interval"), headway);
    }
    tags.insert(
        String::from("opening_hours"),
        feed.get_opening_hours(variant_id, window)?,
    );

    let relation_id = doc.create_relation(tags);
    let relation = doc.relation_mut(relation_id)?;
    let mut missing_stops = vec![];
    for stop_id in variant.stop_ids.iter() {
        match stop_nodes.get(stop_id) {
            Some(node_id) => relation.add_member(OsmMemberRef::Node(*node_id), "platform"),
            None => {
                log::error!("stop_id {stop_id} referenced but not found in GTFS stops.txt");
                missing_stops.push(stop_id.as_str());
            }
        }
    }
    for shape_id in feed.get_shape_ids(variant_id)? {
        for way_id in ways_by_shape.get(&shape_id).into_iter().flatten() {
            relation.add_member(OsmMemberRef::Way(*way_id), "");
        }
    }
    if !missing_stops.is_empty() {
        let fixme = format!("missing stops {}", missing_stops.join(" "));
        relation.tags.insert(String::from("fixme"), fixme);
    }
    Ok(relation_id)
}
