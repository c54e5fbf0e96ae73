use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display};

/// index of a [`RouteVariant`] in the feed's variant arena. variants are
/// numbered in lexicographic order of their stop id sequences.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct VariantId(pub usize);

impl Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// the set of trips sharing one ordered stop id sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteVariant {
    pub id: VariantId,
    pub stop_ids: Vec<String>,
    pub trip_ids: BTreeSet<String>,
}

impl RouteVariant {
    pub fn n_stops(&self) -> usize {
        self.stop_ids.len()
    }

    pub fn n_trips(&self) -> usize {
        self.trip_ids.len()
    }

    /// ranks variants of a line: longer stop sequences served by more trips
    /// are the main pattern, short rare ones are branches.
    pub fn comparison_key(&self) -> (usize, usize) {
        (self.n_stops(), self.n_trips())
    }
}
