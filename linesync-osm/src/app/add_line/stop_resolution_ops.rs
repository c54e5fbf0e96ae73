//! matches the stops of a variant to map nodes by reference tag, flags
//! discrepancies on matched nodes and creates nodes for unmatched stops.
use linesync_gtfs::feed::Stop;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::{FixmeNote, ImportContext};
use crate::algorithm::name_matching;
use crate::config::DEFAULT_REF_TAG;
use crate::model::osm::{OsmDocument, OsmElement, OsmError, OsmNode, OsmNodeId, OsmTags};

/// a matched node farther than this from the feed position is flagged
pub const FAR_DISTANCE_METERS: f64 = 100.0;

const HIGHWAY: &str = "highway";
const BUS_STOP: &str = "bus_stop";
const PUBLIC_TRANSPORT: &str = "public_transport";
const PLATFORM: &str = "platform";
const STOP_POSITION: &str = "stop_position";
const WHEELCHAIR: &str = "wheelchair";

/// resolves every stop of `stops` to a map node, keyed by stop code.
///
/// # Arguments
///
/// * `doc` - map document, mutated in place
/// * `stops` - ordered stops of the variant
/// * `all_stop_codes` - codes of every stop in the feed
/// * `ctx` - agency settings of the variant
pub fn resolve_stops(
    doc: &mut OsmDocument,
    stops: &[&Stop],
    all_stop_codes: &HashSet<&str>,
    ctx: &ImportContext,
) -> Result<HashMap<String, OsmNodeId>, OsmError> {
    let stops_by_ref: HashMap<&str, &Stop> = stops.iter().map(|s| (s.code.as_str(), *s)).collect();
    let candidates = collect_platforms(doc, &stops_by_ref, all_stop_codes, ctx);

    let mut resolved: HashMap<String, OsmNodeId> = HashMap::new();
    for (reference, node_ids) in candidates {
        let Some(stop) = stops_by_ref.get(reference.as_str()) else {
            continue;
        };
        if let Some(best) = reconcile_bucket(doc, &reference, &node_ids, stop, ctx)? {
            resolved.insert(reference, best);
        }
    }

    for stop in stops.iter() {
        if !resolved.contains_key(&stop.code) {
            let node_id = create_stop_node(doc, stop, ctx);
            resolved.insert(stop.code.clone(), node_id);
        }
    }
    Ok(resolved)
}

/// normalizes platform nodes and buckets those carrying a reference of the
/// variant by reference value. a reference unknown to the whole feed is
/// flagged, unless the agency uses the generic `ref` tag shared with other
/// operators.
fn collect_platforms(
    doc: &mut OsmDocument,
    stops_by_ref: &HashMap<&str, &Stop>,
    all_stop_codes: &HashSet<&str>,
    ctx: &ImportContext,
) -> BTreeMap<String, Vec<OsmNodeId>> {
    let ref_tag = ctx.profile.ref_tag.as_str();
    let mut candidates: BTreeMap<String, Vec<OsmNodeId>> = BTreeMap::new();
    for node in doc.nodes.values_mut() {
        if node.tag_equals(PUBLIC_TRANSPORT, STOP_POSITION) && node.tag_equals(HIGHWAY, BUS_STOP) {
            node.remove_tag(HIGHWAY);
            continue;
        }
        if !(node.tag_equals(HIGHWAY, BUS_STOP) || node.tag_equals(PUBLIC_TRANSPORT, PLATFORM)) {
            continue;
        }
        node.test_and_set(PUBLIC_TRANSPORT, PLATFORM);
        node.test_and_set(HIGHWAY, BUS_STOP);
        let reference = match node.get_tag(ref_tag) {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => continue,
        };
        if stops_by_ref.contains_key(reference.as_str()) {
            candidates.entry(reference).or_default().push(node.id);
        } else if ref_tag != DEFAULT_REF_TAG && !all_stop_codes.contains(reference.as_str()) {
            let note = FixmeNote::ReferenceNotFound {
                ref_tag: ref_tag.to_string(),
                agency: ctx.agency.to_string(),
            };
            node.add_todo_fixme(&note.to_string());
        }
    }
    candidates
}

/// flags the nodes sharing one reference and returns the node nearest to
/// the feed stop.
fn reconcile_bucket(
    doc: &mut OsmDocument,
    reference: &str,
    node_ids: &[OsmNodeId],
    stop: &Stop,
    ctx: &ImportContext,
) -> Result<Option<OsmNodeId>, OsmError> {
    let distances = node_ids
        .iter()
        .map(|id| {
            doc.node(*id)
                .map(|n| (*id, n.distance_to(stop.latitude, stop.longitude)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let Some((best_id, _)) = distances
        .iter()
        .copied()
        .min_by(|a, b| a.1.total_cmp(&b.1))
    else {
        return Ok(None);
    };

    let ref_tag = ctx.profile.ref_tag.as_str();
    let stop_name = ctx.profile.format_stop_name(&stop.name);
    for (node_id, distance) in distances {
        let node = doc.node_mut(node_id)?;
        if node_ids.len() > 1 {
            let note = FixmeNote::SharedReference {
                count: node_ids.len(),
                ref_tag: ref_tag.to_string(),
            };
            node.add_todo_fixme(&note.to_string());
        }
        if node_id == best_id && distance > FAR_DISTANCE_METERS {
            let note = FixmeNote::FarFromSource {
                distance,
                agency: ctx.agency.to_string(),
            };
            node.add_todo_fixme(&note.to_string());
        }
        node.test_and_set(ref_tag, reference);
        sync_wheelchair(node, stop, ctx);
        check_name(node, stop, &stop_name, ctx);
    }
    Ok(Some(best_id))
}

/// fills a missing wheelchair tag from the feed, flags a conflicting one.
fn sync_wheelchair(node: &mut OsmNode, stop: &Stop, ctx: &ImportContext) {
    let Some(expected) = stop.wheelchair_boarding.osm_value() else {
        return;
    };
    if !node.has_tag(WHEELCHAIR) {
        node.test_and_set(WHEELCHAIR, expected);
    } else if !node.tag_equals(WHEELCHAIR, expected) {
        let note = FixmeNote::WheelchairMismatch {
            expected,
            agency: ctx.agency.to_string(),
        };
        node.add_todo_fixme(&note.to_string());
    }
}

fn check_name(node: &mut OsmNode, stop: &Stop, stop_name: &str, ctx: &ImportContext) {
    let ref_name_tag = ctx.profile.ref_name_tag();
    let names = [
        node.get_tag("name"),
        node.get_tag("alt_name"),
        node.get_tag("short_name"),
        node.get_tag("official_name"),
        node.get_tag(&ref_name_tag),
    ];
    if !name_matching::names_equivalent(&names, &[stop_name, stop.name.as_str()]) {
        let note = FixmeNote::NameMismatch {
            expected: stop_name.to_string(),
        };
        node.add_todo_fixme(&note.to_string());
    }
}

/// adds a platform node for a stop with no map counterpart.
fn create_stop_node(doc: &mut OsmDocument, stop: &Stop, ctx: &ImportContext) -> OsmNodeId {
    let profile = ctx.profile;
    let tags = OsmTags::from([
        (String::from("name"), profile.format_stop_name(&stop.name)),
        (String::from(HIGHWAY), String::from(BUS_STOP)),
        (String::from(PUBLIC_TRANSPORT), String::from(PLATFORM)),
        (ctx.route_type.route_tag().to_string(), String::from("yes")),
        (profile.ref_tag.clone(), stop.code.clone()),
        (profile.source_tag(), profile.source.clone()),
    ]);
    let node_id = doc.create_node(stop.latitude, stop.longitude, tags);
    if let Some(node) = doc.nodes.get_mut(&node_id) {
        node.add_todo_fixme(&FixmeNote::ImportedStop.to_string());
        if let Some(wheelchair) = stop.wheelchair_boarding.osm_value() {
            node.test_and_set(WHEELCHAIR, wheelchair);
        }
    }
    log::info!("created node {node_id} for stop {} ({})", stop.name, stop.code);
    node_id
}

#[cfg(test)]
mod tests {
    use super::resolve_stops;
    use crate::app::add_line::ImportContext;
    use crate::config::AgencyProfile;
    use crate::model::osm::{OsmDocument, OsmElement, OsmNode, OsmNodeId};
    use linesync_gtfs::feed::{RouteType, Stop, WheelchairBoarding};
    use std::collections::HashSet;

    fn stop(code: &str, name: &str, lat: f64, lon: f64, wheelchair: WheelchairBoarding) -> Stop {
        Stop {
            id: format!("S{code}"),
            code: code.to_string(),
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
            wheelchair_boarding: wheelchair,
        }
    }

    fn platform(id: i64, lat: f64, lon: f64, tags: &[(&str, &str)]) -> OsmNode {
        let mut node = OsmNode::new(OsmNodeId(id), lat, lon);
        node.tags.insert(String::from("highway"), String::from("bus_stop"));
        node.tags
            .insert(String::from("public_transport"), String::from("platform"));
        for (k, v) in tags {
            node.tags.insert(k.to_string(), v.to_string());
        }
        node
    }

    fn profile() -> AgencyProfile {
        AgencyProfile {
            ref_tag: String::from("ref:FR:Tisséo"),
            source: String::from("Tisséo"),
            network: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_far_canonical_node_is_flagged() {
        let profile = profile();
        let ctx = ImportContext {
            agency: "Tisséo",
            profile: &profile,
            route_type: RouteType::Bus,
        };
        let feed_stop = stop("1234", "Capitole", 43.6045, 1.4440, WheelchairBoarding::Unknown);
        let mut doc = OsmDocument::new();
        // about 330 m north
        doc.insert_node(platform(
            1,
            43.6075,
            1.4440,
            &[("name", "Capitole"), ("ref:FR:Tisséo", "1234")],
        ));
        let codes = HashSet::from(["1234"]);
        let resolved = resolve_stops(&mut doc, &[&feed_stop], &codes, &ctx).expect("resolves");
        assert_eq!(resolved.get("1234"), Some(&OsmNodeId(1)));
        let node = doc.node(OsmNodeId(1)).expect("node");
        let notes = node.fixme_notes();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].starts_with("TODO: 33"), "{}", notes[0]);
        assert!(notes[0].ends_with(" m far from Tisséo source data"));
    }

    #[test]
    fn test_unknown_reference_flagged_only_for_agency_tags() {
        let feed_stop = stop("1234", "Capitole", 43.6045, 1.4440, WheelchairBoarding::Unknown);
        let codes = HashSet::from(["1234"]);

        let generic = AgencyProfile {
            network: Some(String::from("TaM")),
            ..Default::default()
        };
        let ctx = ImportContext {
            agency: "TAM",
            profile: &generic,
            route_type: RouteType::Bus,
        };
        let mut doc = OsmDocument::new();
        doc.insert_node(platform(1, 43.61, 3.87, &[("ref", "A42")]));
        resolve_stops(&mut doc, &[&feed_stop], &codes, &ctx).expect("resolves");
        let other_operator = doc.node(OsmNodeId(1)).expect("node");
        assert_eq!(other_operator.get_tag("fixme"), None);
        assert!(!other_operator.is_modified());

        let profile = profile();
        let ctx = ImportContext {
            agency: "Tisséo",
            profile: &profile,
            route_type: RouteType::Bus,
        };
        let mut doc = OsmDocument::new();
        doc.insert_node(platform(1, 43.61, 1.44, &[("ref:FR:Tisséo", "9999")]));
        resolve_stops(&mut doc, &[&feed_stop], &codes, &ctx).expect("resolves");
        assert_eq!(
            doc.node(OsmNodeId(1)).expect("node").get_tag("fixme"),
            Some("TODO: ref:FR:Tisséo not found in Tisséo reference data")
        );
    }

    #[test]
    fn test_name_mismatch_and_alternative_names() {
        let profile = profile();
        let ctx = ImportContext {
            agency: "Tisséo",
            profile: &profile,
            route_type: RouteType::Bus,
        };
        let capitole = stop("1", "Capitole", 43.6045, 1.4440, WheelchairBoarding::Unknown);
        let esquirol = stop("2", "Esquirol", 43.6000, 1.4440, WheelchairBoarding::Unknown);
        let mut doc = OsmDocument::new();
        doc.insert_node(platform(
            1,
            43.6045,
            1.4440,
            &[("name", "Place du Capitole"), ("ref:FR:Tisséo", "1")],
        ));
        doc.insert_node(platform(
            2,
            43.6000,
            1.4440,
            &[("name", "Rue de Metz"), ("alt_name", "Esquirol"), ("ref:FR:Tisséo", "2")],
        ));
        let codes = HashSet::from(["1", "2"]);
        resolve_stops(&mut doc, &[&capitole, &esquirol], &codes, &ctx).expect("resolves");
        assert_eq!(
            doc.node(OsmNodeId(1)).expect("node").get_tag("fixme"),
            Some("TODO: name != Capitole")
        );
        let esquirol_node = doc.node(OsmNodeId(2)).expect("node");
        assert_eq!(esquirol_node.get_tag("fixme"), None);
        assert_eq!(esquirol_node.action, None);
    }

    #[test]
    fn test_city_dash_stop_names_on_created_nodes() {
        let profile = AgencyProfile {
            ref_tag: String::from("ref:FR:aec31"),
            source: String::from("Conseil Départemental de Haute-Garonne"),
            network: Some(String::from("Réseau Arc-en-Ciel")),
            name_format: crate::algorithm::stop_name::StopNameFormat::CityDashStop,
        };
        let ctx = ImportContext {
            agency: "HAUTE-GARONNE",
            profile: &profile,
            route_type: RouteType::Bus,
        };
        let feed_stop = stop("77", "MURET - Eglise", 43.46, 1.32, WheelchairBoarding::Unknown);
        let mut doc = OsmDocument::new();
        let codes = HashSet::from(["77"]);
        let resolved = resolve_stops(&mut doc, &[&feed_stop], &codes, &ctx).expect("resolves");
        let node = doc
            .node(*resolved.get("77").expect("created"))
            .expect("node");
        assert_eq!(node.get_tag("name"), Some("Église Muret"));
        assert_eq!(
            node.get_tag("source:ref:FR:aec31"),
            Some("Conseil Départemental de Haute-Garonne")
        );
        assert_eq!(node.get_tag("wheelchair"), None);
    }
}
