use serde::{Deserialize, Serialize};

use crate::algorithm::stop_name::{self, StopNameFormat};

/// reference tag used when the agency has no dedicated one
pub const DEFAULT_REF_TAG: &str = "ref";

/// per-agency import settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyProfile {
    /// tag linking a map object to a feed stop code, e.g. `ref:FR:Tisséo`
    #[serde(default = "default_ref_tag")]
    pub ref_tag: String,
    /// value of the `source:<ref_tag>` tag on created stops
    #[serde(default)]
    pub source: String,
    /// `network` tag of created lines, omitted when None
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub name_format: StopNameFormat,
}

fn default_ref_tag() -> String {
    String::from(DEFAULT_REF_TAG)
}

impl Default for AgencyProfile {
    fn default() -> Self {
        Self {
            ref_tag: default_ref_tag(),
            source: String::new(),
            network: None,
            name_format: StopNameFormat::Plain,
        }
    }
}

impl AgencyProfile {
    pub fn format_stop_name(&self, name: &str) -> String {
        stop_name::format_stop_name(name, self.name_format)
    }

    /// key of the tag recording the provenance of the reference.
    pub fn source_tag(&self) -> String {
        format!("source:{}", self.ref_tag)
    }

    /// the map-side name tag dedicated to this agency's reference.
    pub fn ref_name_tag(&self) -> String {
        format!("name:{}", self.ref_tag)
    }
}
