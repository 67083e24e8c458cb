//! Session operations against the replay transport.

use std::sync::Arc;

use chrono::NaiveDate;
use ecosoap::catalog::{mutations, queries};
use ecosoap::model::{
    CartonInput, CollectionType, HospitalityService, PickupStatus, PropertyType, ScheduleInput,
};
use ecosoap::net::{QueryClient, ReplayTransport};
use ecosoap::{
    ErrorMessage, PaymentDataProvider, PickupDataProvider, QueryError, Session, UserDataProvider,
};
use serde_json::{Value, json};

fn session_with(transport: &ReplayTransport) -> Session {
    let session = Session::new(QueryClient::with_transport(
        "http://localhost:9094/ios-api-1/",
        Arc::new(transport.clone()),
    ));
    session.provide_token("tok");
    session
}

fn property_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Hotel California",
        "propertyType": "HOTEL",
        "rooms": 200,
        "services": ["SOAP", "LINENS"],
        "collectionType": "LOCAL",
        "logo": null,
        "phone": "555-555-5555",
        "billingAddress": {"address1": "1 Sunset Blvd", "city": "Los Angeles"},
        "shippingAddress": null,
        "shippingNote": null,
        "notes": null
    })
}

fn user_json() -> Value {
    json!({
        "id": "4",
        "firstName": "Bobby",
        "middleName": null,
        "lastName": "Hall",
        "title": "Manager",
        "company": "Hotel California",
        "email": "bhall@example.com",
        "phone": null,
        "skype": null,
        "address": null,
        "properties": [property_json("5")]
    })
}

fn pickup_json(id: &str) -> Value {
    json!({
        "id": id,
        "confirmationCode": "Success",
        "collectionType": "LOCAL",
        "status": "SUBMITTED",
        "readyDate": "2020-08-20",
        "pickupDate": null,
        "property": {"id": "5", "name": "Hotel California"},
        "cartons": [{"id": "1", "product": "SOAP", "percentFull": 60}],
        "notes": null
    })
}

fn sent(transport: &ReplayTransport, index: usize) -> Value {
    transport.recorded_bodies()[index].clone()
}

#[tokio::test]
async fn test_log_in() {
    let transport =
        ReplayTransport::new().respond_with_json(json!({"data": {"logIn": {"user": user_json()}}}));
    let session = session_with(&transport);

    let user = session.log_in().await.unwrap();

    assert_eq!(user.id, "4");
    assert_eq!(user.display_name(), "Bobby Hall");
    let properties = user.properties.unwrap();
    assert_eq!(properties[0].property_type, PropertyType::Hotel);

    let body = sent(&transport, 0);
    assert_eq!(body["query"], mutations::LOG_IN.document);
    assert_eq!(body["variables"], json!({"token": "tok"}));
}

#[tokio::test]
async fn test_log_in_does_not_replace_token() {
    let mut user = user_json();
    user["token"] = json!("from-server");
    let transport =
        ReplayTransport::new().respond_with_json(json!({"data": {"logIn": {"user": user}}}));
    let session = session_with(&transport);

    session.log_in().await.unwrap();

    assert_eq!(session.client().token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_fetch_pickups() {
    let transport = ReplayTransport::new().respond_with_json(json!({
        "data": {"pickupsByPropertyId": {"pickups": [pickup_json("1"), pickup_json("2")]}}
    }));
    let session = session_with(&transport);

    let pickups = session.fetch_pickups("5").await.unwrap();

    assert_eq!(pickups.len(), 2);
    assert_eq!(pickups[1].id, "2");
    assert_eq!(pickups[0].status, PickupStatus::Submitted);

    let body = sent(&transport, 0);
    assert_eq!(body["query"], queries::PICKUPS_BY_PROPERTY_ID.document);
    assert_eq!(
        body["variables"],
        json!({"token": "tok", "input": {"propertyId": "5"}})
    );
}

#[tokio::test]
async fn test_fetch_pickups_empty() {
    let transport = ReplayTransport::new()
        .respond_with_json(json!({"data": {"pickupsByPropertyId": {"pickups": []}}}));
    let session = session_with(&transport);

    assert!(session.fetch_pickups("5").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_schedule_pickup() {
    let transport = ReplayTransport::new().respond_with_json(json!({
        "data": {"schedulePickup": {
            "pickup": pickup_json("9"),
            "labelURL": "https://labels.example.com/9.pdf"
        }}
    }));
    let session = session_with(&transport);

    let input = ScheduleInput {
        collection_type: CollectionType::GeneratedLabel,
        status: PickupStatus::Submitted,
        ready_date: NaiveDate::from_ymd_opt(2020, 8, 20).unwrap(),
        property_id: "5".into(),
        cartons: vec![CartonInput {
            product: HospitalityService::Bottles,
            percent_full: 25,
        }],
        notes: Some("Back door".into()),
    };
    let result = session.schedule_pickup(input).await.unwrap();

    assert_eq!(result.pickup.unwrap().id, "9");
    assert_eq!(result.label_url.as_deref(), Some("https://labels.example.com/9.pdf"));

    let body = sent(&transport, 0);
    assert_eq!(body["query"], mutations::SCHEDULE_PICKUP.document);
    assert_eq!(
        body["variables"]["input"],
        json!({
            "collectionType": "GENERATED_LABEL",
            "status": "SUBMITTED",
            "readyDate": "2020-08-20",
            "propertyId": "5",
            "cartons": [{"product": "BOTTLES", "percentFull": 25}],
            "notes": "Back door"
        })
    );
}

#[tokio::test]
async fn test_fetch_user_and_properties() {
    let transport = ReplayTransport::new()
        .respond_with_json(json!({"data": {"userById": {"user": user_json()}}}))
        .respond_with_json(json!({
            "data": {"propertiesByUserId": {"properties": [property_json("5"), property_json("6")]}}
        }));
    let session = session_with(&transport);

    let user = session.fetch_user("4").await.unwrap();
    let properties = session.fetch_properties("4").await.unwrap();

    assert_eq!(user.email, "bhall@example.com");
    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].services, [HospitalityService::Soap, HospitalityService::Linens]);

    let first = sent(&transport, 0);
    let second = sent(&transport, 1);
    assert_eq!(first["query"], queries::USER_BY_ID.document);
    assert_eq!(first["variables"]["input"], json!({"userId": "4"}));
    assert_eq!(second["query"], queries::PROPERTIES_BY_USER_ID.document);
    assert_eq!(second["variables"]["input"], json!({"userId": "4"}));
}

#[tokio::test]
async fn test_fetch_impact_stats_and_hub() {
    let transport = ReplayTransport::new()
        .respond_with_json(json!({
            "data": {"impactStatsByPropertyId": {"impactStats": {
                "soapRecycled": 120,
                "linensRecycled": null,
                "bottlesRecycled": 4,
                "paperRecycled": null,
                "peopleServed": 300,
                "womenEmployed": 2
            }}}
        }))
        .respond_with_json(json!({
            "data": {"hubByPropertyId": {"hub": {
                "id": "1",
                "name": "Kenya Hub",
                "address": {"city": "Nairobi"},
                "email": null,
                "phone": null,
                "coordinates": {"latitude": -1.29, "longitude": 36.82},
                "properties": [property_json("5")],
                "workflow": ["Sort", "Wash"],
                "impact": null
            }}}
        }));
    let session = session_with(&transport);

    let stats = session.fetch_impact_stats("5").await.unwrap();
    let hub = session.fetch_hub("5").await.unwrap();

    assert_eq!(stats.soap_recycled, Some(120));
    assert_eq!(stats.linens_recycled, None);
    assert_eq!(hub.name, "Kenya Hub");
    assert_eq!(hub.workflow, ["Sort", "Wash"]);
    assert_eq!(hub.address.unwrap().city.as_deref(), Some("Nairobi"));

    assert_eq!(sent(&transport, 0)["query"], queries::IMPACT_STATS_BY_PROPERTY_ID.document);
    assert_eq!(sent(&transport, 1)["query"], queries::HUB_BY_PROPERTY_ID.document);
    assert_eq!(sent(&transport, 1)["variables"]["input"], json!({"propertyId": "5"}));
}

#[tokio::test]
async fn test_fetch_payments_not_implemented() {
    let transport = ReplayTransport::new();
    let session = session_with(&transport);

    let err = session.fetch_payments("5").await.unwrap_err();

    assert!(matches!(err, QueryError::NotImplemented { operation: "fetch_payments" }));
    assert_eq!(err.kind(), "not_implemented");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_operations_require_token() {
    let transport = ReplayTransport::new();
    let session = Session::new(QueryClient::with_transport(
        "http://localhost",
        Arc::new(transport.clone()),
    ));

    assert!(!session.is_logged_in());
    assert!(matches!(session.log_in().await, Err(QueryError::NoToken)));
    assert!(matches!(session.fetch_pickups("5").await, Err(QueryError::NoToken)));
    assert!(matches!(session.fetch_hub("5").await, Err(QueryError::NoToken)));
    assert!(matches!(session.fetch_payments("5").await, Err(QueryError::NoToken)));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_server_errors_surface_as_message() {
    let transport = ReplayTransport::new().respond_with_json(json!({
        "data": {"userById": null},
        "errors": [{"message": "User not found"}]
    }));
    let session = session_with(&transport);

    let err = session.fetch_user("404").await.unwrap_err();
    let message = ErrorMessage::from(&err);

    assert_eq!(err.kind(), "decode.no_data");
    assert!(message.message.contains("User not found"));
}

#[tokio::test]
async fn test_session_behind_provider_traits() {
    let transport = ReplayTransport::new()
        .respond_with_json(json!({"data": {"logIn": {"user": user_json()}}}))
        .respond_with_json(json!({"data": {"pickupsByPropertyId": {"pickups": []}}}));
    let session = Arc::new(session_with(&transport));

    let users: Arc<dyn UserDataProvider> = session.clone();
    let pickups: Arc<dyn PickupDataProvider> = session.clone();
    let payments: Arc<dyn PaymentDataProvider> = session;

    assert_eq!(users.log_in().await.unwrap().id, "4");
    assert!(pickups.fetch_pickups("5").await.unwrap().is_empty());
    assert!(matches!(
        payments.fetch_payments("5").await,
        Err(QueryError::NotImplemented { .. })
    ));
    assert_eq!(transport.call_count(), 2);
}
