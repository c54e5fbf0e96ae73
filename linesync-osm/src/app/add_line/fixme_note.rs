use std::fmt::Display;

/// discrepancies recorded in the fixme tag of map objects for manual
/// review.
#[derive(Debug, Clone, PartialEq)]
pub enum FixmeNote {
    ReferenceNotFound { ref_tag: String, agency: String },
    SharedReference { count: usize, ref_tag: String },
    FarFromSource { distance: f64, agency: String },
    WheelchairMismatch { expected: &'static str, agency: String },
    NameMismatch { expected: String },
    ImportedStop,
    ImportedRoute,
}

impl Display for FixmeNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixmeNote::ReferenceNotFound { ref_tag, agency } => {
                write!(f, "{ref_tag} not found in {agency} reference data")
            }
            FixmeNote::SharedReference { count, ref_tag } => {
                write!(f, "{count} stops share the same reference ({ref_tag})")
            }
            FixmeNote::FarFromSource { distance, agency } => {
                write!(f, "{distance:.0} m far from {agency} source data")
            }
            FixmeNote::WheelchairMismatch { expected, agency } => {
                write!(f, "wheelchair != {expected} unlike {agency} source data")
            }
            FixmeNote::NameMismatch { expected } => write!(f, "name != {expected}"),
            FixmeNote::ImportedStop => {
                write!(f, "imported stop, merge if already existing and/or verify")
            }
            FixmeNote::ImportedRoute => {
                write!(f, "imported route, merge if already existing and/or verify")
            }
        }
    }
}
