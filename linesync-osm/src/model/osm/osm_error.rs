use thiserror::Error;

use super::{OsmNodeId, OsmRelationId, OsmWayId};

#[derive(Error, Debug)]
pub enum OsmError {
    #[error("failure reading .osm file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("failure writing .osm file {0}: {1}")]
    WriteError(String, std::io::Error),
    #[error("failure parsing OSM XML: {source}")]
    XmlParseError {
        #[from]
        source: roxmltree::Error,
    },
    #[error("document root is <{0}>, expected <osm>")]
    InvalidRootElement(String),
    #[error("<{element}> is missing attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },
    #[error("<{element}> has invalid {attribute} '{value}'")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
    #[error("attempting to get node '{0}' not in document")]
    MissingNodeId(OsmNodeId),
    #[error("attempting to get way '{0}' not in document")]
    MissingWayId(OsmWayId),
    #[error("attempting to get relation '{0}' not in document")]
    MissingRelationId(OsmRelationId),
}
