//! formatting of feed stop names into map names.
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// spelling fixes applied to every formatted stop name, in order
pub const NAME_CORRECTIONS: [(&str, &str); 6] = [
    ("Eglise", "Église"),
    ("Ecole", "École"),
    (" De ", " de "),
    (" Du ", " du "),
    ("-De-", "-de-"),
    ("-Du-", "-du-"),
];

/// how an agency writes its stop names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopNameFormat {
    /// names are used as is
    #[default]
    Plain,
    /// names are written `CITY - Stop` and become `Stop City`
    CityDashStop,
}

/// capitalizes each `-`-separated word: first letter upper case, the rest
/// lower case.
pub fn capitalize_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .join("-")
}

pub fn format_stop_name(name: &str, format: StopNameFormat) -> String {
    let reordered = match format {
        StopNameFormat::CityDashStop => match name.split_once(" - ") {
            Some((city, stop)) => format!("{} {}", stop, capitalize_name(city)),
            None => name.to_string(),
        },
        StopNameFormat::Plain => name.to_string(),
    };
    NAME_CORRECTIONS
        .iter()
        .fold(reordered, |acc, (from, to)| acc.replace(from, to))
}
