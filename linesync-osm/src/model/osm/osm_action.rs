use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// JOSM `action` attribute. objects without an action are unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsmAction {
    Modify,
    Delete,
}

impl OsmAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsmAction::Modify => "modify",
            OsmAction::Delete => "delete",
        }
    }

    /// unknown action values are dropped.
    pub fn from_attribute(value: &str) -> Option<OsmAction> {
        match value {
            "modify" => Some(OsmAction::Modify),
            "delete" => Some(OsmAction::Delete),
            _ => None,
        }
    }
}

impl Display for OsmAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
