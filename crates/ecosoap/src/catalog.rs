//! Fixed query and mutation templates.
//!
//! Every template selects the fields the [`model`](crate::model) types
//! decode. Each reply nests its payload one level below the root key, for
//! example `userById { user { ... } }`, so each template has a matching
//! payload wrapper here that the session unwraps.

use ecosoap_net::graphql::{OperationType, QueryDescriptor};
use serde::{Deserialize, Serialize};

use crate::model::{Hub, ImpactStats, Pickup, Property, User};

/// A named GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub document: &'static str,
}

impl Template {
    pub const fn new(name: &'static str, document: &'static str) -> Self {
        Self { name, document }
    }

    pub fn kind(&self) -> OperationType {
        OperationType::infer(self.document)
    }

    /// A descriptor for this template with no variables yet.
    pub fn descriptor(&self) -> QueryDescriptor {
        QueryDescriptor::new(self.document).operation_name(self.name)
    }
}

macro_rules! address_fields {
    () => {
        "address1 address2 address3 city state postalCode country"
    };
}

macro_rules! coordinates_fields {
    () => {
        "latitude longitude"
    };
}

macro_rules! impact_stats_fields {
    () => {
        "soapRecycled linensRecycled bottlesRecycled paperRecycled peopleServed womenEmployed"
    };
}

macro_rules! property_fields {
    () => {
        concat!(
            "id name propertyType rooms services collectionType logo phone billingMethod ",
            "billingAddress { ",
            address_fields!(),
            " } shippingAddress { ",
            address_fields!(),
            " } shippingNote notes"
        )
    };
}

macro_rules! user_fields {
    () => {
        concat!(
            "id firstName middleName lastName title company email phone skype ",
            "address { ",
            address_fields!(),
            " } properties { ",
            property_fields!(),
            " }"
        )
    };
}

macro_rules! pickup_fields {
    () => {
        concat!(
            "id confirmationCode collectionType status readyDate pickupDate ",
            "property { id name } cartons { id product percentFull } notes"
        )
    };
}

/// Read-only queries.
pub mod queries {
    use super::Template;

    /// Variables: `input: PropertyIdInput`.
    pub const IMPACT_STATS_BY_PROPERTY_ID: Template = Template::new(
        "impactStatsByPropertyId",
        concat!(
            "query ImpactStatsByPropertyIdInput($input: ImpactStatsByPropertyIdInput) { ",
            "impactStatsByPropertyId(input: $input) { impactStats { ",
            impact_stats_fields!(),
            " } } }"
        ),
    );

    /// Variables: `input: UserIdInput`.
    pub const USER_BY_ID: Template = Template::new(
        "userById",
        concat!(
            "query UserByIdInput($input: UserByIdInput) { ",
            "userById(input: $input) { user { ",
            user_fields!(),
            " } } }"
        ),
    );

    /// Variables: `input: PropertyIdInput`.
    pub const HUB_BY_PROPERTY_ID: Template = Template::new(
        "hubByPropertyId",
        concat!(
            "query HubByPropertyIdInput($input: HubByPropertyIdInput) { ",
            "hubByPropertyId(input: $input) { hub { id name ",
            "address { ",
            address_fields!(),
            " } email phone coordinates { ",
            coordinates_fields!(),
            " } properties { ",
            property_fields!(),
            " } workflow impact { ",
            impact_stats_fields!(),
            " } } } }"
        ),
    );

    /// Variables: `input: UserIdInput`.
    pub const PROPERTIES_BY_USER_ID: Template = Template::new(
        "propertiesByUserId",
        concat!(
            "query PropertiesByUserIdInput($input: PropertiesByUserIdInput) { ",
            "propertiesByUserId(input: $input) { properties { ",
            property_fields!(),
            " } } }"
        ),
    );

    /// Variables: `input: PropertyIdInput`.
    pub const PICKUPS_BY_PROPERTY_ID: Template = Template::new(
        "pickupsByPropertyId",
        concat!(
            "query PickupsByPropertyIdInput($input: PickupsByPropertyIdInput) { ",
            "pickupsByPropertyId(input: $input) { pickups { ",
            pickup_fields!(),
            " } } }"
        ),
    );
}

/// State-changing mutations.
pub mod mutations {
    use super::Template;

    /// Uses only the injected `token` variable.
    pub const LOG_IN: Template = Template::new(
        "logIn",
        concat!(
            "mutation LogIn($token: String!) { ",
            "logIn(input: { token: $token }) { user { ",
            user_fields!(),
            " } } }"
        ),
    );

    /// Variables: `input: ScheduleInput`.
    pub const SCHEDULE_PICKUP: Template = Template::new(
        "schedulePickup",
        concat!(
            "mutation SchedulePickup($input: PickupInput!) { ",
            "schedulePickup(input: $input) { pickup { ",
            pickup_fields!(),
            " } labelURL } }"
        ),
    );
}

/// Every template, in catalog order.
pub const ALL: [Template; 7] = [
    queries::IMPACT_STATS_BY_PROPERTY_ID,
    queries::USER_BY_ID,
    queries::HUB_BY_PROPERTY_ID,
    queries::PROPERTIES_BY_USER_ID,
    queries::PICKUPS_BY_PROPERTY_ID,
    mutations::LOG_IN,
    mutations::SCHEDULE_PICKUP,
];

/// `{"propertyId": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyIdInput {
    pub property_id: String,
}

impl PropertyIdInput {
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
        }
    }
}

/// `{"userId": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdInput {
    pub user_id: String,
}

impl UserIdInput {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct PropertiesPayload {
    pub properties: Vec<Property>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactStatsPayload {
    pub impact_stats: ImpactStats,
}

#[derive(Debug, Deserialize)]
pub struct HubPayload {
    pub hub: Hub,
}

#[derive(Debug, Deserialize)]
pub struct PickupsPayload {
    pub pickups: Vec<Pickup>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_kinds() {
        for template in &ALL[..5] {
            assert_eq!(template.kind(), OperationType::Query, "{}", template.name);
        }
        assert_eq!(mutations::LOG_IN.kind(), OperationType::Mutation);
        assert_eq!(mutations::SCHEDULE_PICKUP.kind(), OperationType::Mutation);
    }

    #[test]
    fn test_templates_select_their_root() {
        for template in ALL {
            let call = format!("{}(input:", template.name);
            assert!(template.document.contains(&call), "{}", template.name);
        }
    }

    #[test]
    fn test_braces_balance() {
        for template in ALL {
            let open = template.document.matches('{').count();
            let close = template.document.matches('}').count();
            assert_eq!(open, close, "{}", template.name);
        }
    }

    #[test]
    fn test_fragments_expand() {
        assert!(queries::USER_BY_ID.document.contains("postalCode"));
        assert!(queries::USER_BY_ID.document.contains("propertyType"));
        assert!(queries::HUB_BY_PROPERTY_ID.document.contains("latitude longitude"));
        assert!(mutations::SCHEDULE_PICKUP.document.contains("labelURL"));
    }

    #[test]
    fn test_descriptor_is_named() {
        let descriptor = queries::HUB_BY_PROPERTY_ID.descriptor();
        assert_eq!(descriptor.name(), Some("hubByPropertyId"));
        assert_eq!(descriptor.template(), queries::HUB_BY_PROPERTY_ID.document);
        assert!(descriptor.variables_map().is_empty());
    }

    #[test]
    fn test_input_shapes() {
        assert_eq!(
            serde_json::to_value(PropertyIdInput::new("4")).unwrap(),
            json!({"propertyId": "4"})
        );
        assert_eq!(
            serde_json::to_value(UserIdInput::new("7")).unwrap(),
            json!({"userId": "7"})
        );
    }

    #[test]
    fn test_impact_payload() {
        let payload: ImpactStatsPayload = serde_json::from_value(json!({
            "impactStats": {"soapRecycled": 12, "peopleServed": null}
        }))
        .unwrap();
        assert_eq!(payload.impact_stats.soap_recycled, Some(12));
        assert_eq!(payload.impact_stats.people_served, None);
    }
}
