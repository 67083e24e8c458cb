//! Data-provider seams for presentation code.
//!
//! Screens hold these as `dyn` objects so they can be driven by a [`Session`]
//! in the app and by canned data in previews and tests.

use ecosoap_net::graphql::QueryError;
use futures_util::future::BoxFuture;

use crate::model::{
    Hub, ImpactStats, Payment, Pickup, Property, ScheduleInput, ScheduleResult, User,
};
use crate::session::Session;

type Result<T> = std::result::Result<T, QueryError>;

pub trait UserDataProvider: Send + Sync {
    fn log_in(&self) -> BoxFuture<'_, Result<User>>;

    fn fetch_user<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<User>>;

    fn fetch_properties<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<Vec<Property>>>;
}

pub trait PickupDataProvider: Send + Sync {
    fn fetch_pickups<'a>(&'a self, property_id: &'a str) -> BoxFuture<'a, Result<Vec<Pickup>>>;

    fn schedule_pickup(&self, input: ScheduleInput) -> BoxFuture<'_, Result<ScheduleResult>>;
}

pub trait ImpactDataProvider: Send + Sync {
    fn fetch_impact_stats<'a>(&'a self, property_id: &'a str)
    -> BoxFuture<'a, Result<ImpactStats>>;

    fn fetch_hub<'a>(&'a self, property_id: &'a str) -> BoxFuture<'a, Result<Hub>>;
}

pub trait PaymentDataProvider: Send + Sync {
    fn fetch_payments<'a>(&'a self, property_id: &'a str) -> BoxFuture<'a, Result<Vec<Payment>>>;
}

impl UserDataProvider for Session {
    fn log_in(&self) -> BoxFuture<'_, Result<User>> {
        Box::pin(Session::log_in(self))
    }

    fn fetch_user<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<User>> {
        Box::pin(Session::fetch_user(self, user_id))
    }

    fn fetch_properties<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<Vec<Property>>> {
        Box::pin(Session::fetch_properties(self, user_id))
    }
}

impl PickupDataProvider for Session {
    fn fetch_pickups<'a>(&'a self, property_id: &'a str) -> BoxFuture<'a, Result<Vec<Pickup>>> {
        Box::pin(Session::fetch_pickups(self, property_id))
    }

    fn schedule_pickup(&self, input: ScheduleInput) -> BoxFuture<'_, Result<ScheduleResult>> {
        Box::pin(Session::schedule_pickup(self, input))
    }
}

impl ImpactDataProvider for Session {
    fn fetch_impact_stats<'a>(
        &'a self,
        property_id: &'a str,
    ) -> BoxFuture<'a, Result<ImpactStats>> {
        Box::pin(Session::fetch_impact_stats(self, property_id))
    }

    fn fetch_hub<'a>(&'a self, property_id: &'a str) -> BoxFuture<'a, Result<Hub>> {
        Box::pin(Session::fetch_hub(self, property_id))
    }
}

impl PaymentDataProvider for Session {
    fn fetch_payments<'a>(&'a self, property_id: &'a str) -> BoxFuture<'a, Result<Vec<Payment>>> {
        Box::pin(Session::fetch_payments(self, property_id))
    }
}
