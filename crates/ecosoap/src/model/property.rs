use serde::{Deserialize, Serialize};

use super::{Address, CollectionType};

/// A hotel, guesthouse, or other hospitality property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    pub property_type: PropertyType,
    pub rooms: i32,
    pub services: Vec<HospitalityService>,
    pub collection_type: CollectionType,
    pub logo: Option<String>,
    pub phone: Option<String>,
    pub billing_method: Option<BillingMethod>,
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
    pub shipping_note: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    BedAndBreakfast,
    Guesthouse,
    Hotel,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingMethod {
    Ach,
    Credit,
    Debit,
    Invoice,
}

/// Material a property sends for recycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HospitalityService {
    Bottles,
    Linens,
    Other,
    Paper,
    Soap,
}
