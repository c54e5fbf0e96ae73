use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::AgencyProfile;
use crate::algorithm::stop_name::StopNameFormat;
use crate::model::LinesyncCliError;

/// agency profiles keyed by GTFS agency name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyProfiles {
    #[serde(default)]
    pub agencies: BTreeMap<String, AgencyProfile>,
}

impl Default for AgencyProfiles {
    /// the built-in profiles.
    fn default() -> Self {
        let agencies = BTreeMap::from([
            (
                String::from("Tisséo"),
                AgencyProfile {
                    ref_tag: String::from("ref:FR:Tisséo"),
                    source: String::from("Tisséo"),
                    network: Some(String::from("fr_tisseo")),
                    name_format: StopNameFormat::Plain,
                },
            ),
            (
                String::from("HAUTE-GARONNE"),
                AgencyProfile {
                    ref_tag: String::from("ref:FR:aec31"),
                    source: String::from("Conseil Départemental de Haute-Garonne"),
                    network: Some(String::from("Réseau Arc-en-Ciel")),
                    name_format: StopNameFormat::CityDashStop,
                },
            ),
            (
                String::from("TAM"),
                AgencyProfile {
                    network: Some(String::from("TaM")),
                    ..Default::default()
                },
            ),
        ]);
        Self { agencies }
    }
}

impl AgencyProfiles {
    /// the profile of an agency, or the generic profile when unlisted.
    pub fn get(&self, agency: &str) -> AgencyProfile {
        self.agencies.get(agency).cloned().unwrap_or_default()
    }

    /// adds the profiles of `other`, replacing profiles with the same
    /// agency name.
    pub fn extend(&mut self, other: AgencyProfiles) {
        self.agencies.extend(other.agencies);
    }

    /// built-in profiles extended by an optional configuration file.
    pub fn with_file(file: Option<&String>) -> Result<AgencyProfiles, LinesyncCliError> {
        let mut profiles = AgencyProfiles::default();
        if let Some(f) = file {
            log::info!("reading agency profiles from {f}");
            profiles.extend(AgencyProfiles::try_from(f)?);
        }
        Ok(profiles)
    }
}

impl TryFrom<&String> for AgencyProfiles {
    type Error = LinesyncCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                LinesyncCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                LinesyncCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                LinesyncCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                LinesyncCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(LinesyncCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
