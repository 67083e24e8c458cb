//! Named, typed operations over a [`QueryClient`].

use ecosoap_net::graphql::{QueryClient, QueryDescriptor, QueryError};
use serde::de::DeserializeOwned;

use crate::catalog::{
    HubPayload, ImpactStatsPayload, PickupsPayload, PropertiesPayload, PropertyIdInput, Template,
    UserIdInput, UserPayload, mutations, queries,
};
use crate::config::{Config, ConfigError};
use crate::model::{
    Hub, ImpactStats, Payment, Pickup, Property, ScheduleInput, ScheduleResult, User,
};
use crate::targets;

type Result<T> = std::result::Result<T, QueryError>;

/// The application's view of the EcoSoap API.
///
/// Each operation binds one catalog template to one result type and hands the
/// call to the wrapped client. The session adds no state of its own, so
/// clones are interchangeable.
///
/// ```ignore
/// let session = Session::from_config(&Config::from_file("ecosoap.toml")?)?;
/// session.provide_token(token_from_login_flow);
///
/// let user = session.log_in().await?;
/// for property in user.properties.iter().flatten() {
///     let pickups = session.fetch_pickups(&property.id).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    client: QueryClient,
}

impl Session {
    pub fn new(client: QueryClient) -> Self {
        Self { client }
    }

    /// Build a session that talks HTTP to the configured endpoint.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        let client = QueryClient::builder(config.endpoint.clone())
            .http_client(config.http_client()?)
            .build()?;
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    /// Supply the credential obtained from the login flow.
    pub fn provide_token(&self, token: impl Into<String>) {
        self.client.set_token(token);
    }

    pub fn is_logged_in(&self) -> bool {
        self.client.is_logged_in()
    }

    /// Issue the login mutation and return the signed-in user.
    ///
    /// The token must already be provided; nothing in the reply is copied
    /// back into the client.
    pub async fn log_in(&self) -> Result<User> {
        let descriptor = mutations::LOG_IN.descriptor();
        let payload: UserPayload = self.run(mutations::LOG_IN, descriptor).await?;
        Ok(payload.user)
    }

    pub async fn fetch_user(&self, user_id: &str) -> Result<User> {
        let descriptor = queries::USER_BY_ID
            .descriptor()
            .variable("input", UserIdInput::new(user_id));
        let payload: UserPayload = self.run(queries::USER_BY_ID, descriptor).await?;
        Ok(payload.user)
    }

    pub async fn fetch_properties(&self, user_id: &str) -> Result<Vec<Property>> {
        let descriptor = queries::PROPERTIES_BY_USER_ID
            .descriptor()
            .variable("input", UserIdInput::new(user_id));
        let payload: PropertiesPayload = self
            .run(queries::PROPERTIES_BY_USER_ID, descriptor)
            .await?;
        Ok(payload.properties)
    }

    pub async fn fetch_pickups(&self, property_id: &str) -> Result<Vec<Pickup>> {
        let descriptor = queries::PICKUPS_BY_PROPERTY_ID
            .descriptor()
            .variable("input", PropertyIdInput::new(property_id));
        let payload: PickupsPayload = self
            .run(queries::PICKUPS_BY_PROPERTY_ID, descriptor)
            .await?;
        Ok(payload.pickups)
    }

    pub async fn schedule_pickup(&self, input: ScheduleInput) -> Result<ScheduleResult> {
        let descriptor = mutations::SCHEDULE_PICKUP.descriptor().variable("input", input);
        self.run(mutations::SCHEDULE_PICKUP, descriptor).await
    }

    pub async fn fetch_impact_stats(&self, property_id: &str) -> Result<ImpactStats> {
        let descriptor = queries::IMPACT_STATS_BY_PROPERTY_ID
            .descriptor()
            .variable("input", PropertyIdInput::new(property_id));
        let payload: ImpactStatsPayload = self
            .run(queries::IMPACT_STATS_BY_PROPERTY_ID, descriptor)
            .await?;
        Ok(payload.impact_stats)
    }

    pub async fn fetch_hub(&self, property_id: &str) -> Result<Hub> {
        let descriptor = queries::HUB_BY_PROPERTY_ID
            .descriptor()
            .variable("input", PropertyIdInput::new(property_id));
        let payload: HubPayload = self.run(queries::HUB_BY_PROPERTY_ID, descriptor).await?;
        Ok(payload.hub)
    }

    /// Payment history for a property.
    ///
    /// The API has no payments query yet, so this always fails. The token
    /// gate is checked first: without a token the error is
    /// [`QueryError::NoToken`], otherwise [`QueryError::NotImplemented`].
    pub async fn fetch_payments(&self, property_id: &str) -> Result<Vec<Payment>> {
        self.not_implemented("fetch_payments", property_id)
    }

    async fn run<T: DeserializeOwned>(
        &self,
        template: Template,
        descriptor: QueryDescriptor,
    ) -> Result<T> {
        tracing::debug!(
            target: targets::SESSION,
            operation = template.name,
            kind = template.kind().as_str(),
            "calling"
        );
        self.client.query(descriptor).await
    }

    fn not_implemented<T>(&self, operation: &'static str, subject: &str) -> Result<T> {
        if !self.client.is_logged_in() {
            return Err(QueryError::NoToken);
        }
        tracing::warn!(target: targets::SESSION, operation, subject, "operation has no template");
        Err(QueryError::NotImplemented { operation })
    }
}
