use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    pub id: Option<String>,
    pub name: String,
}

impl From<&gtfs_structures::Agency> for Agency {
    fn from(agency: &gtfs_structures::Agency) -> Self {
        Agency {
            id: agency.id.clone(),
            name: agency.name.clone(),
        }
    }
}
