use serde::{Deserialize, Serialize};

use super::{Address, Property};

/// A hospitality partner account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub skype: Option<String>,
    pub address: Option<Address>,
    pub properties: Option<Vec<Property>>,
}

impl User {
    /// First and last name joined with a space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
