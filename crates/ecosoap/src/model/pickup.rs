use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::HospitalityService;

/// A scheduled collection of cartons from a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    pub id: String,
    pub confirmation_code: String,
    pub collection_type: CollectionType,
    pub status: PickupStatus,
    pub ready_date: NaiveDate,
    pub pickup_date: Option<NaiveDate>,
    pub property: PropertyRef,
    #[serde(default)]
    pub cartons: Vec<Carton>,
    pub notes: Option<String>,
}

/// The property a pickup belongs to, as selected in pickup queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub id: String,
    pub name: Option<String>,
}

/// One carton within a pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carton {
    pub id: String,
    pub product: Option<HospitalityService>,
    pub percent_full: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionType {
    CourierConsolidated,
    CourierDirect,
    GeneratedLabel,
    Local,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupStatus {
    Submitted,
    OutForPickup,
    Complete,
    Cancelled,
}

/// Carton contents supplied when scheduling a pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartonInput {
    pub product: HospitalityService,
    pub percent_full: i32,
}

/// Everything needed to schedule a new pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    pub collection_type: CollectionType,
    pub status: PickupStatus,
    pub ready_date: NaiveDate,
    pub property_id: String,
    pub cartons: Vec<CartonInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The server's answer to a schedule request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub pickup: Option<Pickup>,
    #[serde(rename = "labelURL")]
    pub label_url: Option<String>,
}
