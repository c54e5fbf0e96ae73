mod agency_profile;
mod agency_profiles;

pub use agency_profile::{AgencyProfile, DEFAULT_REF_TAG};
pub use agency_profiles::AgencyProfiles;
