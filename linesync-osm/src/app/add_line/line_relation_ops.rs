use linesync_gtfs::feed::Stop;
use std::collections::HashMap;

use super::{FixmeNote, ImportContext};
use crate::model::osm::{
    OsmDocument, OsmElement, OsmError, OsmMemberRef, OsmNodeId, OsmRelationId, OsmTags,
};

pub const PLATFORM_ROLE: &str = "platform";

/// schedule-derived and descriptive values of an imported line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineAttributes {
    pub name: String,
    pub line_ref: String,
    pub colour: String,
    pub duration: Option<String>,
    pub headway: Option<String>,
    pub opening_hours: String,
}

/// `"<Type> <ref>: <from> → <to>"`
pub fn line_name(type_name: &str, line_ref: &str, from: &str, to: &str) -> String {
    format!("{type_name} {line_ref}: {from} → {to}")
}

/// creates the route relation of a variant with one platform member per
/// stop, in order. stops missing from `resolved` are reported and skipped.
pub fn create_line_relation(
    doc: &mut OsmDocument,
    attributes: &LineAttributes,
    stops: &[&Stop],
    resolved: &HashMap<String, OsmNodeId>,
    ctx: &ImportContext,
) -> Result<OsmRelationId, OsmError> {
    let end_name = |stop: Option<&&Stop>| -> Result<String, OsmError> {
        match stop.and_then(|s| resolved.get(&s.code)) {
            Some(node_id) => Ok(doc
                .node(*node_id)?
                .get_tag("name")
                .unwrap_or_default()
                .to_string()),
            None => Ok(String::new()),
        }
    };
    let from = end_name(stops.first())?;
    let to = end_name(stops.last())?;

    let mut tags = OsmTags::new();
    tags.insert(String::from("name"), attributes.name.clone());
    tags.insert(String::from("type"), String::from("route"));
    tags.insert(
        String::from("route"),
        ctx.route_type.route_tag().to_string(),
    );
    if let Some(duration) = &attributes.duration {
        tags.insert(String::from("duration"), duration.clone());
    }
    tags.insert(
        String::from("opening_hours"),
        attributes.opening_hours.clone(),
    );
    if let Some(headway) = &attributes.headway {
        tags.insert(String::from("interval"), headway.clone());
    }
    tags.insert(String::from("colour"), attributes.colour.clone());
    tags.insert(String::from("ref"), attributes.line_ref.clone());
    tags.insert(
        String::from("public_transport:version"),
        String::from("2"),
    );
    tags.insert(String::from("from"), from);
    tags.insert(String::from("to"), to);
    if let Some(network) = &ctx.profile.network {
        tags.insert(String::from("network"), network.clone());
    }

    let relation_id = doc.create_relation(tags);
    let relation = doc.relation_mut(relation_id)?;
    relation.add_todo_fixme(&FixmeNote::ImportedRoute.to_string());
    for stop in stops.iter() {
        match resolved.get(&stop.code) {
            Some(node_id) => relation.add_member(OsmMemberRef::Node(*node_id), PLATFORM_ROLE),
            None => log::warn!("stop {} has no map node, left out of the line", stop.code),
        }
    }
    Ok(relation_id)
}
