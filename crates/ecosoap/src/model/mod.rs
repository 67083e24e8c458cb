//! Domain types decoded from, and sent to, the EcoSoap API.
//!
//! Field names follow the server's camelCase; enum values follow its
//! SCREAMING_SNAKE_CASE.

mod impact;
mod payment;
mod pickup;
mod property;
mod user;

use serde::{Deserialize, Serialize};

pub use impact::{Hub, ImpactStats};
pub use payment::{Payment, PaymentMethod, newest_first};
pub use pickup::{
    Carton, CartonInput, CollectionType, Pickup, PickupStatus, PropertyRef, ScheduleInput,
    ScheduleResult,
};
pub use property::{BillingMethod, HospitalityService, Property, PropertyType};
pub use user::User;

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
