//! reading and writing of JOSM `.osm` XML files.
use html_escape::encode_double_quoted_attribute;
use std::{path::Path, str::FromStr};

use super::{
    OsmAction, OsmDocument, OsmElement, OsmError, OsmMember, OsmMemberRef, OsmNode, OsmNodeId,
    OsmRelation, OsmRelationId, OsmTags, OsmWay, OsmWayId,
};

const GENERATOR: &str = "linesync-osm";

pub fn read_osm_file(path: &Path) -> Result<OsmDocument, OsmError> {
    log::info!("parse {}", path.display());
    let text = std::fs::read_to_string(path)
        .map_err(|e| OsmError::ReadError(path.display().to_string(), e))?;
    parse_osm_xml(&text)
}

pub fn write_osm_file(doc: &OsmDocument, path: &Path) -> Result<(), OsmError> {
    log::info!("write {}", path.display());
    std::fs::write(path, to_osm_xml(doc))
        .map_err(|e| OsmError::WriteError(path.display().to_string(), e))
}

/// parses an `<osm>` document. elements other than node, way and
/// relation are ignored.
pub fn parse_osm_xml(text: &str) -> Result<OsmDocument, OsmError> {
    let xml = roxmltree::Document::parse(text)?;
    let root = xml.root_element();
    if !root.has_tag_name("osm") {
        return Err(OsmError::InvalidRootElement(
            root.tag_name().name().to_string(),
        ));
    }
    let mut doc = OsmDocument::new();
    doc.attributes = root
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();
    for element in root.children().filter(|n| n.is_element()) {
        match element.tag_name().name() {
            "node" => doc.insert_node(read_node(element)?),
            "way" => doc.insert_way(read_way(element)?),
            "relation" => doc.insert_relation(read_relation(element)?),
            _ => {}
        }
    }
    log::info!(
        "read {} nodes, {} ways, {} relations",
        doc.nodes.len(),
        doc.ways.len(),
        doc.relations.len()
    );
    Ok(doc)
}

fn required_attribute<T: FromStr>(
    element: roxmltree::Node,
    attribute: &str,
) -> Result<T, OsmError> {
    let element_name = element.tag_name().name();
    let value = element
        .attribute(attribute)
        .ok_or_else(|| OsmError::MissingAttribute {
            element: element_name.to_string(),
            attribute: attribute.to_string(),
        })?;
    value.parse::<T>().map_err(|_| OsmError::InvalidAttribute {
        element: element_name.to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

/// action and the attributes kept verbatim for writing back.
fn common_attributes(
    element: roxmltree::Node,
    parsed: &[&str],
) -> (Option<OsmAction>, Vec<(String, String)>) {
    let action = element.attribute("action").and_then(OsmAction::from_attribute);
    let attributes = element
        .attributes()
        .filter(|a| a.name() != "action" && !parsed.contains(&a.name()))
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();
    (action, attributes)
}

fn children_named<'a, 'input: 'a>(
    element: roxmltree::Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> + 'a {
    element.children().filter(move |n| n.has_tag_name(name))
}

fn read_tags(element: roxmltree::Node) -> Result<OsmTags, OsmError> {
    let mut tags = OsmTags::new();
    for tag in children_named(element, "tag") {
        let key: String = required_attribute(tag, "k")?;
        let value: String = required_attribute(tag, "v")?;
        tags.insert(key, value);
    }
    Ok(tags)
}

fn read_node(element: roxmltree::Node) -> Result<OsmNode, OsmError> {
    let (action, attributes) = common_attributes(element, &["id", "lat", "lon"]);
    Ok(OsmNode {
        id: OsmNodeId(required_attribute(element, "id")?),
        lat: required_attribute(element, "lat")?,
        lon: required_attribute(element, "lon")?,
        tags: read_tags(element)?,
        action,
        attributes,
    })
}

fn read_way(element: roxmltree::Node) -> Result<OsmWay, OsmError> {
    let (action, attributes) = common_attributes(element, &["id"]);
    let nodes = children_named(element, "nd")
        .map(|nd| required_attribute(nd, "ref").map(OsmNodeId))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OsmWay {
        id: OsmWayId(required_attribute(element, "id")?),
        nodes,
        tags: read_tags(element)?,
        action,
        attributes,
    })
}

fn read_relation(element: roxmltree::Node) -> Result<OsmRelation, OsmError> {
    let (action, attributes) = common_attributes(element, &["id"]);
    let mut members = vec![];
    for member in children_named(element, "member") {
        let type_name: String = required_attribute(member, "type")?;
        let id: i64 = required_attribute(member, "ref")?;
        let target = OsmMemberRef::from_type_name(&type_name, id).ok_or_else(|| {
            OsmError::InvalidAttribute {
                element: String::from("member"),
                attribute: String::from("type"),
                value: type_name.clone(),
            }
        })?;
        let role = member.attribute("role").unwrap_or_default();
        members.push(OsmMember::new(target, role));
    }
    Ok(OsmRelation {
        id: OsmRelationId(required_attribute(element, "id")?),
        members,
        tags: read_tags(element)?,
        action,
        attributes,
    })
}

fn attribute(key: &str, value: &str) -> String {
    format!(" {}=\"{}\"", key, encode_double_quoted_attribute(value))
}

fn open_element<E: OsmElement>(
    name: &str,
    id: i64,
    element: &E,
    attributes: &[(String, String)],
) -> String {
    let mut out = format!("  <{name}");
    out.push_str(&attribute("id", &id.to_string()));
    if let Some(action) = element.action() {
        out.push_str(&attribute("action", action.as_str()));
    }
    for (key, value) in attributes.iter() {
        out.push_str(&attribute(key, value));
    }
    out
}

fn write_tags(out: &mut String, tags: &OsmTags) {
    for (key, value) in tags.iter() {
        out.push_str("    <tag");
        out.push_str(&attribute("k", key));
        out.push_str(&attribute("v", value));
        out.push_str(" />\n");
    }
}

/// serializes the document: nodes, then ways, then relations, each in id
/// order.
pub fn to_osm_xml(doc: &OsmDocument) -> String {
    let mut out = String::from("<?xml version='1.0' encoding='UTF-8'?>\n<osm");
    if doc.attributes.is_empty() {
        out.push_str(&attribute("version", "0.6"));
        out.push_str(&attribute("generator", GENERATOR));
    }
    for (key, value) in doc.attributes.iter() {
        out.push_str(&attribute(key, value));
    }
    out.push_str(">\n");

    for node in doc.nodes.values() {
        out.push_str(&open_element("node", node.id.0, node, &node.attributes));
        out.push_str(&attribute("lat", &node.lat.to_string()));
        out.push_str(&attribute("lon", &node.lon.to_string()));
        if node.tags.is_empty() {
            out.push_str(" />\n");
        } else {
            out.push_str(">\n");
            write_tags(&mut out, &node.tags);
            out.push_str("  </node>\n");
        }
    }
    for way in doc.ways.values() {
        out.push_str(&open_element("way", way.id.0, way, &way.attributes));
        out.push_str(">\n");
        for node_id in way.nodes.iter() {
            out.push_str(&format!("    <nd ref=\"{node_id}\" />\n"));
        }
        write_tags(&mut out, &way.tags);
        out.push_str("  </way>\n");
    }
    for relation in doc.relations.values() {
        out.push_str(&open_element(
            "relation",
            relation.id.0,
            relation,
            &relation.attributes,
        ));
        out.push_str(">\n");
        for member in relation.members.iter() {
            out.push_str("    <member");
            out.push_str(&attribute("type", member.target.type_name()));
            out.push_str(&attribute("ref", &member.target.id().to_string()));
            out.push_str(&attribute("role", &member.role));
            out.push_str(" />\n");
        }
        write_tags(&mut out, &relation.tags);
        out.push_str("  </relation>\n");
    }
    out.push_str("</osm>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::{parse_osm_xml, to_osm_xml};
    use crate::model::osm::{OsmAction, OsmElement, OsmMemberRef, OsmNodeId, OsmRelationId, OsmTags};

    const SAMPLE: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<osm version="0.6" generator="JOSM">
  <bounds minlat="43.5" minlon="1.3" maxlat="43.7" maxlon="1.5" />
  <node id="1001" version="3" lat="43.6045" lon="1.444">
    <tag k="highway" v="bus_stop" />
    <tag k="name" v="Capitole &amp; &quot;Centre&quot;" />
  </node>
  <node id="1002" action="modify" version="1" lat="43.6111" lon="1.4537" />
  <way id="20" version="2">
    <nd ref="1001" />
    <nd ref="1002" />
    <tag k="highway" v="service" />
  </way>
  <relation id="-5" action="modify">
    <member type="node" ref="1001" role="platform" />
    <member type="way" ref="20" role="" />
    <tag k="type" v="route" />
  </relation>
</osm>
"#;

    #[test]
    fn test_parse_sample() {
        let doc = parse_osm_xml(SAMPLE).expect("sample parses");
        assert_eq!(doc.nodes.len(), 2);
        let node = doc.node(OsmNodeId(1001)).expect("node 1001");
        assert_eq!(node.get_tag("name"), Some("Capitole & \"Centre\""));
        assert_eq!(node.action, None);
        assert_eq!(
            node.attributes,
            vec![(String::from("version"), String::from("3"))]
        );
        let modified = doc.node(OsmNodeId(1002)).expect("node 1002");
        assert_eq!(modified.action, Some(OsmAction::Modify));
        let relation = doc.relation(OsmRelationId(-5)).expect("relation");
        assert_eq!(relation.members.len(), 2);
        assert_eq!(relation.members[0].target, OsmMemberRef::Node(OsmNodeId(1001)));
        assert_eq!(relation.members[1].role, "");
    }

    #[test]
    fn test_write_then_read_preserves_content() {
        let mut doc = parse_osm_xml(SAMPLE).expect("sample parses");
        let mut tags = OsmTags::new();
        tags.insert(String::from("name"), String::from("Arènes <Nord>"));
        let created = doc.create_node(43.59, 1.41, tags);
        // below the smallest id read
        assert_eq!(created, OsmNodeId(-6));

        let written = to_osm_xml(&doc);
        let reread = parse_osm_xml(&written).expect("written document parses");
        assert_eq!(reread.nodes, doc.nodes);
        assert_eq!(reread.ways, doc.ways);
        assert_eq!(reread.relations, doc.relations);
        assert_eq!(reread.attributes, doc.attributes);
    }

    #[test]
    fn test_rejects_other_roots() {
        assert!(parse_osm_xml("<gpx></gpx>").is_err());
        assert!(parse_osm_xml("<osm><node id='1' lat='x' lon='1' /></osm>").is_err());
    }
}
