use serde::{Deserialize, Serialize};

use super::{Address, Coordinates, Property};

/// Recycling totals for a property or hub.
///
/// The server omits figures it has not computed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactStats {
    pub soap_recycled: Option<i64>,
    pub linens_recycled: Option<i64>,
    pub bottles_recycled: Option<i64>,
    pub paper_recycled: Option<i64>,
    pub people_served: Option<i64>,
    pub women_employed: Option<i64>,
}

/// A regional processing hub that serves a set of properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    pub id: String,
    pub name: String,
    pub address: Option<Address>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub workflow: Vec<String>,
    pub impact: Option<ImpactStats>,
}
